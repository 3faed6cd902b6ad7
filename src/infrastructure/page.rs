//! 页面能力接口 - 基础设施层
//!
//! 订单流程只通过这两个 trait 接触浏览器和 PDF 库

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AppResult;

/// 下单页面能力
///
/// 职责：
/// - 只暴露"点击 / 填写 / 读取 / 截图 / 渲染"等原子能力
/// - 不认识订单（OrderRecord）
/// - 不处理重试和流程
///
/// 所有 `selector` 都是 CSS 选择器。
#[async_trait]
pub trait OrderPage: Send + Sync {
    /// 导航到指定 URL
    async fn goto(&self, url: &str) -> AppResult<()>;

    /// 点击元素
    async fn click(&self, selector: &str) -> AppResult<()>;

    /// 点击文本完全等于 `text` 的 `tag` 元素
    async fn click_by_text(&self, tag: &str, text: &str) -> AppResult<()>;

    /// 选择下拉框的值
    async fn select_option(&self, selector: &str, value: &str) -> AppResult<()>;

    /// 清空输入框并填入文本
    async fn fill(&self, selector: &str, value: &str) -> AppResult<()>;

    /// 元素当前是否存在（不等待）
    async fn exists(&self, selector: &str) -> AppResult<bool>;

    /// 等待元素可见，超时返回 `false`
    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> AppResult<bool>;

    /// 元素的 innerText
    async fn inner_text(&self, selector: &str) -> AppResult<String>;

    /// 元素的 innerHTML
    async fn inner_html(&self, selector: &str) -> AppResult<String>;

    /// 对元素截图，返回 PNG 字节
    async fn screenshot_element(&self, selector: &str) -> AppResult<Vec<u8>>;

    /// 把一段完整 HTML 渲染成 PDF 字节
    async fn render_pdf(&self, html: &str) -> AppResult<Vec<u8>>;
}

/// PDF 盖图能力
#[async_trait]
pub trait PdfStamper: Send + Sync {
    /// 把 `image_path` 的图片以水印层合并进 `pdf_path`，原地覆盖
    async fn embed_image(&self, pdf_path: &Path, image_path: &Path) -> AppResult<()>;
}
