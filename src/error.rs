use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 订单数据集错误
    #[error("数据集错误: {0}")]
    Dataset(#[from] DatasetError),
    /// 表单提交错误
    #[error("表单错误: {0}")]
    Form(#[from] FormError),
    /// 回执抓取错误
    #[error("回执错误: {0}")]
    Receipt(#[from] ReceiptError),
    /// 产物文件错误（PDF / PNG）
    #[error("文件错误: {0}")]
    Artifact(#[from] ArtifactError),
    /// 归档错误
    #[error("归档错误: {0}")]
    Archive(#[from] ArchiveError),
    /// 其他错误
    #[error("错误: {0}")]
    Other(String),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 启动浏览器失败
    #[error("启动无头浏览器失败: {0}")]
    LaunchFailed(String),
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },
    /// 元素不存在
    #[error("找不到元素: {selector}")]
    ElementNotFound { selector: String },
    /// 下拉框没有这个选项
    #[error("下拉框 {selector} 没有值为 '{value}' 的选项")]
    OptionNotFound { selector: String, value: String },
    /// 脚本执行失败
    #[error("执行脚本失败: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),
    /// 脚本返回值无法解析
    #[error("脚本返回值解析失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// 数据集错误
#[derive(Debug, Error)]
pub enum DatasetError {
    /// 下载失败（网络错误或非 2xx 状态）
    #[error("下载 {url} 失败: {source}")]
    DownloadFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 写入本地副本失败
    #[error("写入 {} 失败: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 文件存在但格式错误
    #[error("解析 {} 失败 (行 {line:?}): {source}", .path.display())]
    Malformed {
        path: PathBuf,
        line: Option<u64>,
        #[source]
        source: csv::Error,
    },
}

/// 表单提交错误
#[derive(Debug, Error)]
pub enum FormError {
    /// 多次提交后错误提示仍然存在
    #[error("订单 {order_number} 提交 {attempts} 次后仍然报错")]
    SubmitRetriesExhausted { order_number: String, attempts: u32 },
}

/// 回执抓取错误
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// 成功徽章在超时时间内未出现
    #[error("等待 {selector} 可见超时 ({timeout:?})")]
    BadgeNotVisible { selector: String, timeout: Duration },
    /// 徽章文本为空
    #[error("订单号为空")]
    EmptyOrderNumber,
    /// 回执容器为空
    #[error("回执内容为空: {selector}")]
    EmptyReceipt { selector: String },
}

/// 产物文件错误
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// 写入文件失败
    #[error("写入 {} 失败: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 读取文件失败
    #[error("读取 {} 失败: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// PDF 处理失败
    #[error("PDF 处理失败 ({}): {detail}", .path.display())]
    Pdf { path: PathBuf, detail: String },
    /// 图片解码失败
    #[error("图片解码失败 ({}): {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// 归档错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// 读写文件失败
    #[error("归档 io 失败 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 归档目录位于被归档目录之内
    #[error("归档目录 {} 不能位于回执目录 {} 之内", .archive_dir.display(), .source_dir.display())]
    ArchiveInsideSource {
        archive_dir: PathBuf,
        source_dir: PathBuf,
    },
    /// 遍历目录失败
    #[error("遍历目录失败: {0}")]
    Walk(#[from] walkdir::Error),
    /// zip 写入失败
    #[error("zip 写入失败: {0}")]
    Zip(#[from] zip::result::ZipError),
    /// 删除目录失败
    #[error("删除目录 {} 失败: {source}", .path.display())]
    CleanupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::Cdp(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Browser(BrowserError::Json(err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("后台任务失败: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建元素不存在错误
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        AppError::Browser(BrowserError::ElementNotFound {
            selector: selector.into(),
        })
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Artifact(ArtifactError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::Artifact(ArtifactError::ReadFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
