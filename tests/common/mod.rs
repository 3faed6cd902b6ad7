//! 测试用的假页面和假盖图器

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use robot_order_submit::error::AppResult;
use robot_order_submit::services::selectors;
use robot_order_submit::{Config, OrderPage, PdfStamper};

pub const ORDERS_CSV: &str = "Order number,Head,Body,Legs,Address\n\
                              1,1,2,3,Address 123\n\
                              2,3,4,5,Address 456\n";

#[derive(Default)]
struct FakeState {
    /// 每次点击下单后是否出现错误提示，用完后默认不出错
    error_script: VecDeque<bool>,
    /// 依次分配的确认订单号
    confirmations: VecDeque<String>,
    badge_never_visible: bool,
    error_present: bool,
    badge_visible: bool,
    modal_open: bool,
    current_order: String,
    actions: Vec<String>,
    /// 每次 wait_for_visible 的选择器和超时
    waits: Vec<(String, Duration)>,
}

/// 按脚本响应的下单页面
pub struct FakePage {
    state: Mutex<FakeState>,
}

impl FakePage {
    pub fn new(confirmations: &[&str]) -> Self {
        Self {
            state: Mutex::new(FakeState {
                confirmations: confirmations.iter().map(|s| s.to_string()).collect(),
                modal_open: true,
                ..Default::default()
            }),
        }
    }

    pub fn with_errors(self, script: &[bool]) -> Self {
        self.state.lock().unwrap().error_script = script.iter().copied().collect();
        self
    }

    pub fn badge_never_visible(self) -> Self {
        self.state.lock().unwrap().badge_never_visible = true;
        self
    }

    pub fn actions(&self) -> Vec<String> {
        self.state.lock().unwrap().actions.clone()
    }

    pub fn count(&self, action: &str) -> usize {
        self.actions().iter().filter(|a| a.as_str() == action).count()
    }

    pub fn waits(&self) -> Vec<(String, Duration)> {
        self.state.lock().unwrap().waits.clone()
    }

    pub fn modal_open(&self) -> bool {
        self.state.lock().unwrap().modal_open
    }
}

#[async_trait]
impl OrderPage for FakePage {
    async fn goto(&self, url: &str) -> AppResult<()> {
        self.state.lock().unwrap().actions.push(format!("goto {}", url));
        Ok(())
    }

    async fn click(&self, selector: &str) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state.actions.push(format!("click {}", selector));

        if selector == selectors::ORDER_BUTTON {
            state.error_present = state.error_script.pop_front().unwrap_or(false);
            if !state.error_present {
                state.badge_visible = !state.badge_never_visible;
                state.current_order = state.confirmations.pop_front().unwrap_or_default();
            }
        } else if selector == selectors::ORDER_ANOTHER_BUTTON {
            state.badge_visible = false;
            state.error_present = false;
            state.modal_open = true;
        }
        Ok(())
    }

    async fn click_by_text(&self, tag: &str, text: &str) -> AppResult<()> {
        let mut state = self.state.lock().unwrap();
        state.actions.push(format!("click_text {} {}", tag, text));
        state.modal_open = false;
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> AppResult<()> {
        self.state
            .lock()
            .unwrap()
            .actions
            .push(format!("select {} {}", selector, value));
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> AppResult<()> {
        self.state
            .lock()
            .unwrap()
            .actions
            .push(format!("fill {} {}", selector, value));
        Ok(())
    }

    async fn exists(&self, selector: &str) -> AppResult<bool> {
        let state = self.state.lock().unwrap();
        Ok(selector == selectors::ERROR_ALERT && state.error_present)
    }

    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> AppResult<bool> {
        let mut state = self.state.lock().unwrap();
        state.waits.push((selector.to_string(), timeout));
        Ok(selector == selectors::SUCCESS_BADGE && state.badge_visible)
    }

    async fn inner_text(&self, _selector: &str) -> AppResult<String> {
        Ok(format!("  {}\n", self.state.lock().unwrap().current_order))
    }

    async fn inner_html(&self, _selector: &str) -> AppResult<String> {
        Ok(format!(
            "<p class=\"badge badge-success\">{}</p>",
            self.state.lock().unwrap().current_order
        ))
    }

    async fn screenshot_element(&self, _selector: &str) -> AppResult<Vec<u8>> {
        Ok(b"\x89PNG fake robot".to_vec())
    }

    async fn render_pdf(&self, html: &str) -> AppResult<Vec<u8>> {
        let mut bytes = b"%PDF-1.4\n".to_vec();
        bytes.extend_from_slice(html.as_bytes());
        Ok(bytes)
    }
}

/// 把图片路径追加到 PDF 末尾，记录每次调用
#[derive(Default)]
pub struct FakeStamper {
    calls: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl FakeStamper {
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PdfStamper for FakeStamper {
    async fn embed_image(&self, pdf_path: &Path, image_path: &Path) -> AppResult<()> {
        assert!(image_path.exists(), "截图应该先于合并写入");
        let mut pdf = tokio::fs::read(pdf_path).await.unwrap();
        pdf.extend_from_slice(format!("\n%stamped {}", image_path.display()).as_bytes());
        tokio::fs::write(pdf_path, pdf).await.unwrap();

        self.calls
            .lock()
            .unwrap()
            .push((pdf_path.to_path_buf(), image_path.to_path_buf()));
        Ok(())
    }
}

/// 指向临时目录的配置
pub fn test_config(root: &Path) -> Config {
    Config {
        target_url: "http://robot.test/#/robot-order".to_string(),
        orders_url: String::new(),
        orders_file: root.join("orders.csv"),
        receipts_dir: root.join("output/receipts"),
        archive_dir: root.to_path_buf(),
        slow_mo_ms: 0,
        badge_timeout_ms: 50,
        max_submit_attempts: 5,
        submit_retry_delay_ms: 0,
        ..Config::default()
    }
}

/// 只把路径指向临时目录，其余保持默认值
pub fn default_config_in(root: &Path) -> Config {
    Config {
        orders_url: String::new(),
        orders_file: root.join("orders.csv"),
        receipts_dir: root.join("output/receipts"),
        archive_dir: root.to_path_buf(),
        ..Config::default()
    }
}

/// `dir` 下的 zip 文件
pub fn archives_in(dir: &Path) -> Vec<PathBuf> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("zip"))
        .collect()
}
