use std::path::PathBuf;
use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 下单页面 URL
    pub target_url: String,
    /// 订单 CSV 下载地址（为空时直接读取本地文件）
    pub orders_url: String,
    /// 订单 CSV 本地路径
    pub orders_file: PathBuf,
    /// 回执与截图输出目录
    pub receipts_dir: PathBuf,
    /// 归档文件存放目录
    pub archive_dir: PathBuf,
    /// 归档文件名前缀
    pub archive_prefix: String,
    /// 浏览器调试端口，设置后连接已有浏览器而不是启动新的
    pub browser_debug_port: Option<u16>,
    /// Chrome 可执行文件路径
    pub chrome_executable: Option<PathBuf>,
    /// 是否无头运行
    pub headless: bool,
    /// 每次页面操作后的停顿（毫秒）
    pub slow_mo_ms: u64,
    /// 点击 / 填写前等待元素出现的超时（毫秒）
    pub action_timeout_ms: u64,
    /// 等待成功徽章的超时（毫秒）
    pub badge_timeout_ms: u64,
    /// 单个订单最多提交次数（包含第一次）
    pub max_submit_attempts: u32,
    /// 两次提交之间的等待（毫秒）
    pub submit_retry_delay_ms: u64,
    /// pdfium 动态库所在目录
    pub pdfium_lib_dir: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target_url: "https://robotsparebinindustries.com/#/robot-order".to_string(),
            orders_url: "https://robotsparebinindustries.com/orders.csv".to_string(),
            orders_file: PathBuf::from("orders.csv"),
            receipts_dir: PathBuf::from("output/receipts"),
            archive_dir: PathBuf::from("."),
            archive_prefix: "Archive".to_string(),
            browser_debug_port: None,
            chrome_executable: None,
            headless: true,
            slow_mo_ms: 100,
            action_timeout_ms: 5000,
            badge_timeout_ms: 5000,
            max_submit_attempts: 10,
            submit_retry_delay_ms: 300,
            pdfium_lib_dir: PathBuf::from("."),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            target_url: std::env::var("TARGET_URL").unwrap_or(default.target_url),
            orders_url: std::env::var("ORDERS_URL").unwrap_or(default.orders_url),
            orders_file: std::env::var("ORDERS_FILE").map(PathBuf::from).unwrap_or(default.orders_file),
            receipts_dir: std::env::var("RECEIPTS_DIR").map(PathBuf::from).unwrap_or(default.receipts_dir),
            archive_dir: std::env::var("ARCHIVE_DIR").map(PathBuf::from).unwrap_or(default.archive_dir),
            archive_prefix: std::env::var("ARCHIVE_PREFIX").unwrap_or(default.archive_prefix),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().map(PathBuf::from),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            slow_mo_ms: std::env::var("SLOW_MO_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.slow_mo_ms),
            action_timeout_ms: std::env::var("ACTION_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.action_timeout_ms),
            badge_timeout_ms: std::env::var("BADGE_TIMEOUT_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.badge_timeout_ms),
            max_submit_attempts: std::env::var("MAX_SUBMIT_ATTEMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_submit_attempts),
            submit_retry_delay_ms: std::env::var("SUBMIT_RETRY_DELAY_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.submit_retry_delay_ms),
            pdfium_lib_dir: std::env::var("PDFIUM_LIB_DIR").map(PathBuf::from).unwrap_or(default.pdfium_lib_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    pub fn badge_timeout(&self) -> Duration {
        Duration::from_millis(self.badge_timeout_ms)
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    pub fn submit_retry_delay(&self) -> Duration {
        Duration::from_millis(self.submit_retry_delay_ms)
    }

    pub fn slow_mo(&self) -> Duration {
        Duration::from_millis(self.slow_mo_ms)
    }
}
