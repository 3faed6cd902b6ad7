//! Chrome 页面 - 基础设施层
//!
//! 持有唯一的 Browser / Page 资源，实现 `OrderPage`

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, PrintToPdfParams};
use chromiumoxide::element::Element;
use chromiumoxide::{Browser, Page};
use serde::de::DeserializeOwned;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult, BrowserError};
use crate::infrastructure::page::OrderPage;

/// 轮询元素可见性的间隔
const VISIBILITY_POLL: Duration = Duration::from_millis(100);

/// 点击 / 填写前等待元素的默认超时
const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(5);

/// 每隔 `VISIBILITY_POLL` 调用一次 `check`，直到它返回 `true` 或超时
///
/// 超时返回 `Ok(false)`，`check` 的错误直接向上传递
pub async fn poll_until<F, Fut>(timeout: Duration, mut check: F) -> AppResult<bool>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<bool>>,
{
    let polling = async {
        loop {
            if check().await? {
                return Ok::<bool, AppError>(true);
            }
            sleep(VISIBILITY_POLL).await;
        }
    };

    match tokio::time::timeout(timeout, polling).await {
        Ok(result) => result,
        Err(_) => Ok(false),
    }
}

/// 设置下拉框的值，返回设置后的值是否等于目标值
fn select_option_script(selector: &str, value: &str) -> AppResult<String> {
    // React 受控组件需要走原生 setter 并派发 change 事件
    Ok(format!(
        r#"
        (() => {{
            const el = document.querySelector({});
            if (!el) return false;
            const value = {};
            const setter = Object.getOwnPropertyDescriptor(HTMLSelectElement.prototype, 'value').set;
            setter.call(el, value);
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return el.value === value;
        }})()
        "#,
        serde_json::to_string(selector)?,
        serde_json::to_string(value)?
    ))
}

/// Chrome 页面
///
/// 职责：
/// - 持有 Browser（渲染 PDF 需要临时页面）和下单用的 Page
/// - 每次交互后按 `slow_mo` 停顿，给页面里的 React 状态留出时间
/// - 交互前最多等待 `action_timeout` 让元素出现
pub struct ChromePage {
    browser: Browser,
    page: Page,
    slow_mo: Duration,
    action_timeout: Duration,
}

impl ChromePage {
    /// 创建新的 Chrome 页面
    pub fn new(browser: Browser, page: Page, slow_mo: Duration) -> Self {
        Self {
            browser,
            page,
            slow_mo,
            action_timeout: DEFAULT_ACTION_TIMEOUT,
        }
    }

    /// 设置交互前等待元素的超时
    pub fn with_action_timeout(mut self, action_timeout: Duration) -> Self {
        self.action_timeout = action_timeout;
        self
    }

    /// 获取 browser 的引用
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// 获取 page 的引用
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// 拆出 Browser 和 Page（用于关闭）
    pub fn into_parts(self) -> (Browser, Page) {
        (self.browser, self.page)
    }

    /// 执行 JS 代码并反序列化为指定类型
    async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let result = self.page.evaluate(js_code.into()).await?;
        Ok(result.into_value()?)
    }

    /// 等待元素可见后再取出
    async fn element(&self, selector: &str) -> AppResult<Element> {
        if !poll_until(self.action_timeout, || self.is_visible(selector)).await? {
            debug!("等待 {} 可见超时 ({:?})", selector, self.action_timeout);
            return Err(AppError::element_not_found(selector));
        }
        self.page.find_element(selector).await.map_err(|e| {
            debug!("查找元素 {} 失败: {}", selector, e);
            AppError::element_not_found(selector)
        })
    }

    async fn pause(&self) {
        if !self.slow_mo.is_zero() {
            sleep(self.slow_mo).await;
        }
    }

    async fn is_visible(&self, selector: &str) -> AppResult<bool> {
        let js_code = format!(
            r#"
            (() => {{
                const el = document.querySelector({});
                if (!el) return false;
                const rect = el.getBoundingClientRect();
                const style = window.getComputedStyle(el);
                return rect.width > 0 && rect.height > 0
                    && style.visibility !== 'hidden' && style.display !== 'none';
            }})()
            "#,
            serde_json::to_string(selector)?
        );
        self.eval_as(js_code).await
    }
}

#[async_trait]
impl OrderPage for ChromePage {
    async fn goto(&self, url: &str) -> AppResult<()> {
        self.page.goto(url).await?;
        self.pause().await;
        Ok(())
    }

    async fn click(&self, selector: &str) -> AppResult<()> {
        debug!("点击: {}", selector);
        self.element(selector).await?.click().await?;
        self.pause().await;
        Ok(())
    }

    async fn click_by_text(&self, tag: &str, text: &str) -> AppResult<()> {
        debug!("点击文本为 '{}' 的 <{}>", text, tag);
        let js_code = format!(
            r#"
            (() => {{
                const el = Array.from(document.querySelectorAll({}))
                    .find(e => e.textContent.trim() === {});
                if (!el) return false;
                el.click();
                return true;
            }})()
            "#,
            serde_json::to_string(tag)?,
            serde_json::to_string(text)?
        );
        let js_code = js_code.as_str();
        let clicked = poll_until(self.action_timeout, || self.eval_as::<bool>(js_code)).await?;
        if !clicked {
            return Err(AppError::element_not_found(format!("{}:text('{}')", tag, text)));
        }
        self.pause().await;
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> AppResult<()> {
        debug!("选择 {} = {}", selector, value);
        self.element(selector).await?;
        let selected: bool = self.eval_as(select_option_script(selector, value)?).await?;
        if !selected {
            return Err(BrowserError::OptionNotFound {
                selector: selector.to_string(),
                value: value.to_string(),
            }
            .into());
        }
        self.pause().await;
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> AppResult<()> {
        debug!("填写 {} = {}", selector, value);
        let element = self.element(selector).await?;
        element.click().await?;
        let js_code = format!(
            "(() => {{ const el = document.querySelector({}); if (el) el.select(); return true; }})()",
            serde_json::to_string(selector)?
        );
        let _: bool = self.eval_as(js_code).await?;
        element.type_str(value).await?;
        self.pause().await;
        Ok(())
    }

    async fn exists(&self, selector: &str) -> AppResult<bool> {
        let js_code = format!(
            "document.querySelector({}) !== null",
            serde_json::to_string(selector)?
        );
        self.eval_as(js_code).await
    }

    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> AppResult<bool> {
        poll_until(timeout, || self.is_visible(selector)).await
    }

    async fn inner_text(&self, selector: &str) -> AppResult<String> {
        Ok(self
            .element(selector)
            .await?
            .inner_text()
            .await?
            .unwrap_or_default())
    }

    async fn inner_html(&self, selector: &str) -> AppResult<String> {
        Ok(self
            .element(selector)
            .await?
            .inner_html()
            .await?
            .unwrap_or_default())
    }

    async fn screenshot_element(&self, selector: &str) -> AppResult<Vec<u8>> {
        let element = self.element(selector).await?;
        element.scroll_into_view().await?;
        Ok(element.screenshot(CaptureScreenshotFormat::Png).await?)
    }

    async fn render_pdf(&self, html: &str) -> AppResult<Vec<u8>> {
        // 下单页面不能被覆盖，用临时标签页渲染
        let scratch = self.browser.new_page("about:blank").await?;
        let rendered = async {
            scratch.set_content(html).await?;
            let params = PrintToPdfParams::builder().print_background(true).build();
            scratch.pdf(params).await
        }
        .await;

        // 渲染失败也要关掉临时标签页
        if let Err(e) = scratch.close().await {
            warn!("⚠️ 关闭临时标签页失败: {}", e);
        }
        Ok(rendered?)
    }
}
