use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// 一行订单数据（一次表单提交）
///
/// 所有字段都保持字符串，表单接收的就是字符串
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// CSV 中的订单序号
    #[serde(rename = "Order number")]
    pub order_number: String,
    /// 头部型号（下拉框的 value）
    #[serde(rename = "Head")]
    pub head: String,
    /// 身体型号（单选框的 value）
    #[serde(rename = "Body")]
    pub body: String,
    /// 腿部型号编号
    #[serde(rename = "Legs")]
    pub legs: String,
    /// 收货地址
    #[serde(rename = "Address")]
    pub address: String,
}

/// 单个订单号对应的产物路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderArtifacts {
    pub receipt_pdf: PathBuf,
    pub screenshot_png: PathBuf,
}

impl OrderArtifacts {
    /// 根据确认页上的订单号生成产物路径
    pub fn for_order(receipts_dir: &Path, order_number: &str) -> Self {
        let key = sanitize_file_component(order_number);
        Self {
            receipt_pdf: receipts_dir.join(format!("order_{}_receipt.pdf", key)),
            screenshot_png: receipts_dir.join(format!("order_{}_screenshot.png", key)),
        }
    }
}

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9._-]").expect("静态正则"))
}

fn artifact_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^order_(.+)_(?:receipt\.pdf|screenshot\.png)$").expect("静态正则")
    })
}

/// 把订单号变成安全的文件名片段，非 `[A-Za-z0-9._-]` 字符替换为 `_`
pub fn sanitize_file_component(raw: &str) -> String {
    let cleaned = unsafe_chars().replace_all(raw.trim(), "_");
    match cleaned.as_ref() {
        "" | "." | ".." => "_".to_string(),
        other => other.to_string(),
    }
}

/// 从产物文件名中取回订单号
pub fn parse_order_number(file_name: &str) -> Option<String> {
    artifact_name()
        .captures(file_name)
        .map(|caps| caps[1].to_string())
}
