//! 回执抓取服务 - 业务能力层
//!
//! 读取确认页上的订单号，把回执片段渲染成 PDF

use std::time::Duration;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{AppError, AppResult, ReceiptError};
use crate::infrastructure::OrderPage;
use crate::models::OrderArtifacts;
use crate::services::selectors;
use crate::utils::truncate_text;

/// 回执抓取服务
pub struct ReceiptCapturer {
    badge_timeout: Duration,
}

impl ReceiptCapturer {
    pub fn new(config: &Config) -> Self {
        Self::with_timeout(config.badge_timeout())
    }

    pub fn with_timeout(badge_timeout: Duration) -> Self {
        Self { badge_timeout }
    }

    /// 等待成功徽章出现并读取订单号
    ///
    /// 超时未出现时返回 `ReceiptError::BadgeNotVisible`
    pub async fn scrape_order_number(&self, page: &dyn OrderPage) -> AppResult<String> {
        let visible = page
            .wait_for_visible(selectors::SUCCESS_BADGE, self.badge_timeout)
            .await?;
        if !visible {
            return Err(ReceiptError::BadgeNotVisible {
                selector: selectors::SUCCESS_BADGE.to_string(),
                timeout: self.badge_timeout,
            }
            .into());
        }

        let order_number = page.inner_text(selectors::SUCCESS_BADGE).await?.trim().to_string();
        if order_number.is_empty() {
            return Err(ReceiptError::EmptyOrderNumber.into());
        }

        info!("✓ 订单号: {}", order_number);
        Ok(order_number)
    }

    /// 把回执容器渲染成 PDF，写到 `artifacts.receipt_pdf`
    pub async fn store_receipt_as_pdf(
        &self,
        page: &dyn OrderPage,
        artifacts: &OrderArtifacts,
    ) -> AppResult<()> {
        info!("🧾 保存回执 PDF: {}", artifacts.receipt_pdf.display());

        let receipt_html = page.inner_html(selectors::RECEIPT).await?;
        if receipt_html.trim().is_empty() {
            return Err(ReceiptError::EmptyReceipt {
                selector: selectors::RECEIPT.to_string(),
            }
            .into());
        }
        debug!("回执内容: {}", truncate_text(&receipt_html, 120));

        let pdf_bytes = page.render_pdf(&receipt_document(&receipt_html)).await?;

        let path = &artifacts.receipt_pdf;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::write_failed(parent, e))?;
        }
        tokio::fs::write(path, pdf_bytes)
            .await
            .map_err(|e| AppError::write_failed(path, e))?;

        Ok(())
    }
}

/// 把回执片段包成一个完整的 HTML 文档
pub fn receipt_document(fragment: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <style>body {{ font-family: sans-serif; margin: 2em; }}</style>\n\
         </head>\n<body>\n{}\n</body>\n</html>\n",
        fragment
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_document_wraps_fragment() {
        let html = receipt_document("<h3>Receipt</h3><p>RSB-ROBO-ORDER-1</p>");

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<body>\n<h3>Receipt</h3><p>RSB-ROBO-ORDER-1</p>\n</body>"));
        assert!(html.contains("charset=\"utf-8\""));
    }
}
