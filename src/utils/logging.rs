/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化 tracing 订阅者
///
/// `RUST_LOG` 优先；否则 `verbose` 为真时默认 debug，不然 info。
/// 重复调用不会报错（测试中多次初始化）。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("robot_order_submit={},warn", default_level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 机器人订单自动提交");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🌐 下单页面: {}", config.target_url);
    info!("📄 订单数据: {}", config.orders_url);
    info!("🔁 单个订单最多提交: {} 次", config.max_submit_attempts);
    info!("{}", "=".repeat(60));
}

/// 记录订单加载信息
pub fn log_orders_loaded(total: usize, source: &Path) {
    info!("✓ 从 {} 读取到 {} 个订单", source.display(), total);
}

/// 记录单个订单开始
pub fn log_order_start(index: usize, total: usize, order_number: &str) {
    info!("\n{}", "─".repeat(60));
    info!("📦 处理第 {}/{} 个订单 (CSV 订单号: {})", index, total, order_number);
}

/// 打印最终统计信息
///
/// # 参数
/// - `processed`: 完成的订单数
/// - `submit_attempts`: 总提交次数
/// - `archive_path`: 归档文件路径
pub fn print_final_stats(processed: usize, submit_attempts: u32, archive_path: &Path) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 完成订单: {}", processed);
    info!("🔁 提交次数: {}", submit_attempts);
    info!("🗜️ 归档文件: {}", archive_path.display());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
