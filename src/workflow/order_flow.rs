//! 订单处理流程 - 流程层
//!
//! 核心职责：定义"一个订单"的完整处理流程
//!
//! 流程顺序：
//! 1. 填写表单并提交（出错重试）
//! 2. 读取订单号
//! 3. 回执存为 PDF
//! 4. 截图并合并进 PDF
//! 5. 点击"再下一单"并关闭弹窗

use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{OrderPage, PdfStamper};
use crate::models::{OrderArtifacts, OrderRecord};
use crate::services::{selectors, FormFiller, ReceiptCapturer, ScreenshotEmbedder};
use crate::workflow::order_ctx::OrderCtx;

/// 单个订单的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderOutcome {
    /// 确认页上的订单号
    pub order_number: String,
    /// 生成的产物
    pub artifacts: OrderArtifacts,
    /// 下单按钮点击次数
    pub submit_attempts: u32,
}

/// 订单处理流程
///
/// - 编排单个订单的处理流程
/// - 不持有页面资源，页面由调用方传入
/// - 只依赖业务能力（services）
pub struct OrderFlow<'a> {
    form_filler: FormFiller,
    receipt_capturer: ReceiptCapturer,
    screenshot_embedder: ScreenshotEmbedder<'a>,
    receipts_dir: PathBuf,
}

impl<'a> OrderFlow<'a> {
    pub fn new(config: &Config, stamper: &'a dyn PdfStamper) -> Self {
        Self {
            form_filler: FormFiller::new(config),
            receipt_capturer: ReceiptCapturer::new(config),
            screenshot_embedder: ScreenshotEmbedder::new(stamper),
            receipts_dir: config.receipts_dir.clone(),
        }
    }

    pub async fn run(
        &self,
        page: &dyn OrderPage,
        order: &OrderRecord,
        ctx: &OrderCtx,
    ) -> AppResult<OrderOutcome> {
        let submit_attempts = self.form_filler.fill_and_submit(page, order).await?;

        let order_number = self.receipt_capturer.scrape_order_number(page).await?;
        let artifacts = OrderArtifacts::for_order(&self.receipts_dir, &order_number);

        self.receipt_capturer
            .store_receipt_as_pdf(page, &artifacts)
            .await?;
        self.screenshot_embedder
            .screenshot_robot(page, &artifacts)
            .await?;

        order_another_robot(page).await?;

        info!("{} ✅ 完成，订单号 {}", ctx, order_number);

        Ok(OrderOutcome {
            order_number,
            artifacts,
            submit_attempts,
        })
    }
}

/// 关闭页面上的提示弹窗
pub async fn close_annoying_modal(page: &dyn OrderPage) -> AppResult<()> {
    info!("关闭弹窗...");
    page.click_by_text(selectors::MODAL_BUTTON_TAG, selectors::MODAL_BUTTON_TEXT)
        .await
}

/// 点击"再下一单"，新表单会再次弹出提示框
pub async fn order_another_robot(page: &dyn OrderPage) -> AppResult<()> {
    info!("再下一单...");
    page.click(selectors::ORDER_ANOTHER_BUTTON).await?;
    close_annoying_modal(page).await
}
