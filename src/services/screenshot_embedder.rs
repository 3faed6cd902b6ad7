//! 截图合并服务 - 业务能力层
//!
//! 截取机器人预览图，再作为水印层合并进同一订单的回执 PDF

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::infrastructure::{OrderPage, PdfStamper};
use crate::models::OrderArtifacts;
use crate::services::selectors;

/// 截图合并服务
pub struct ScreenshotEmbedder<'a> {
    stamper: &'a dyn PdfStamper,
}

impl<'a> ScreenshotEmbedder<'a> {
    pub fn new(stamper: &'a dyn PdfStamper) -> Self {
        Self { stamper }
    }

    /// 截图写到 `artifacts.screenshot_png`，然后原地合并进 `artifacts.receipt_pdf`
    pub async fn screenshot_robot(
        &self,
        page: &dyn OrderPage,
        artifacts: &OrderArtifacts,
    ) -> AppResult<()> {
        info!("📸 截取机器人预览图: {}", artifacts.screenshot_png.display());

        let png = page.screenshot_element(selectors::ROBOT_PREVIEW).await?;
        let path = &artifacts.screenshot_png;
        tokio::fs::write(path, png)
            .await
            .map_err(|e| AppError::write_failed(path, e))?;

        self.stamper
            .embed_image(&artifacts.receipt_pdf, &artifacts.screenshot_png)
            .await
    }
}
