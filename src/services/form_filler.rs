//! 表单填写服务 - 业务能力层
//!
//! 只负责"把一条订单填进表单并提交成功"，不关心回执和截图

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, FormError};
use crate::infrastructure::OrderPage;
use crate::models::OrderRecord;
use crate::services::selectors;

/// 表单填写服务
pub struct FormFiller {
    max_attempts: u32,
    retry_delay: Duration,
}

impl FormFiller {
    pub fn new(config: &Config) -> Self {
        Self::with_retry(config.max_submit_attempts, config.submit_retry_delay())
    }

    /// `max_attempts` 包含第一次提交，至少为 1
    pub fn with_retry(max_attempts: u32, retry_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            retry_delay,
        }
    }

    /// 填写并提交一条订单
    ///
    /// # 返回
    /// 点击下单按钮的次数
    pub async fn fill_and_submit(&self, page: &dyn OrderPage, order: &OrderRecord) -> AppResult<u32> {
        info!("📝 填写订单 {}", order.order_number);

        page.select_option(selectors::HEAD_SELECT, &order.head).await?;
        page.click(&selectors::body_radio(&order.body)).await?;
        page.fill(selectors::LEGS_INPUT, &order.legs).await?;
        page.fill(selectors::ADDRESS_INPUT, &order.address).await?;
        page.click(selectors::PREVIEW_BUTTON).await?;

        self.submit_until_accepted(page, order).await
    }

    /// 点击下单，错误提示存在就重新提交
    async fn submit_until_accepted(&self, page: &dyn OrderPage, order: &OrderRecord) -> AppResult<u32> {
        let mut attempts = 0;

        loop {
            page.click(selectors::ORDER_BUTTON).await?;
            attempts += 1;

            if !page.exists(selectors::ERROR_ALERT).await? {
                debug!("订单 {} 第 {} 次提交成功", order.order_number, attempts);
                return Ok(attempts);
            }

            if attempts >= self.max_attempts {
                return Err(FormError::SubmitRetriesExhausted {
                    order_number: order.order_number.clone(),
                    attempts,
                }
                .into());
            }

            warn!(
                "订单 {} 提交出错 (尝试 {}/{}), 重新提交...",
                order.order_number, attempts, self.max_attempts
            );
            if !self.retry_delay.is_zero() {
                sleep(self.retry_delay).await;
            }
        }
    }
}
