//! 订单处理上下文
//!
//! 封装"我正在处理第几个订单"这一信息

use std::fmt::Display;

/// 订单处理上下文
#[derive(Debug, Clone)]
pub struct OrderCtx {
    /// 订单序号（从1开始，仅用于日志显示）
    pub index: usize,

    /// 订单总数
    pub total: usize,

    /// CSV 中的订单序号
    pub csv_order_number: String,
}

impl OrderCtx {
    pub fn new(index: usize, total: usize, csv_order_number: impl Into<String>) -> Self {
        Self {
            index,
            total,
            csv_order_number: csv_order_number.into(),
        }
    }
}

impl Display for OrderCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[订单 {}/{} CSV#{}]",
            self.index, self.total, self.csv_order_number
        )
    }
}
