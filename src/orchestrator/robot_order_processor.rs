//! 机器人订单处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整运行：
//!
//! 1. **应用初始化**：打开浏览器会话，准备 PDF 盖图能力
//! 2. **加载订单**：下载并解析订单 CSV
//! 3. **逐个处理**：委托 `OrderFlow` 顺序处理每个订单，任一订单失败即终止整个运行
//! 4. **归档清理**：打包回执目录，然后删除回执目录
//! 5. **全局统计**：输出处理结果

use std::path::PathBuf;

use chromiumoxide::Browser;
use tracing::{info, warn};

use crate::browser;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{ChromePage, OrderPage, PdfStamper, PdfiumStamper};
use crate::services::{
    archive_receipts, clean_output_folder, ensure_archive_outside, CsvFileSource,
    HttpOrderSource, OrderSource,
};
use crate::utils::logging;
use crate::workflow::{close_annoying_modal, OrderCtx, OrderFlow, OrderOutcome};

/// 一次运行的统计
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// 每个订单的结果，按处理顺序
    pub outcomes: Vec<OrderOutcome>,
    /// 总提交次数
    pub submit_attempts: u32,
    /// 归档文件路径
    pub archive_path: PathBuf,
    /// 归档内的文件名
    pub archive_entries: Vec<String>,
}

/// 处理全部订单
///
/// 页面、盖图器和数据源都由调用方传入，本函数只做调度
pub async fn process_orders(
    page: &dyn OrderPage,
    stamper: &dyn PdfStamper,
    source: &dyn OrderSource,
    config: &Config,
) -> AppResult<RunSummary> {
    // 归档目录在回执目录内时会随回执目录一起被删除
    ensure_archive_outside(&config.receipts_dir, &config.archive_dir)?;

    page.goto(&config.target_url).await?;
    close_annoying_modal(page).await?;

    let load = source.load_orders().await?;
    let source_path = load.path().to_path_buf();
    let orders = load.into_records();
    if orders.is_empty() {
        warn!("⚠️ 没有读取到订单，将只生成空归档");
    }
    logging::log_orders_loaded(orders.len(), &source_path);

    let flow = OrderFlow::new(config, stamper);
    let total = orders.len();
    let mut outcomes = Vec::with_capacity(total);

    for (index, order) in orders.iter().enumerate() {
        let ctx = OrderCtx::new(index + 1, total, order.order_number.clone());
        logging::log_order_start(ctx.index, total, &order.order_number);

        outcomes.push(flow.run(page, order, &ctx).await?);
    }

    let report = archive_receipts(
        &config.receipts_dir,
        &config.archive_dir,
        &config.archive_prefix,
    )
    .await?;
    clean_output_folder(&config.receipts_dir).await?;

    Ok(RunSummary {
        submit_attempts: outcomes.iter().map(|o| o.submit_attempts).sum(),
        outcomes,
        archive_path: report.path,
        archive_entries: report.entries,
    })
}

/// 应用主结构
pub struct App {
    config: Config,
    page: ChromePage,
    stamper: PdfiumStamper,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        logging::log_startup(&config);

        let (browser, page) = browser::open_session(&config).await?;
        let page = ChromePage::new(browser, page, config.slow_mo())
            .with_action_timeout(config.action_timeout());
        let stamper = PdfiumStamper::new(&config.pdfium_lib_dir);

        Ok(Self {
            config,
            page,
            stamper,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<RunSummary> {
        let source = self.order_source();
        let summary =
            process_orders(&self.page, &self.stamper, source.as_ref(), &self.config).await?;

        logging::print_final_stats(
            summary.outcomes.len(),
            summary.submit_attempts,
            &summary.archive_path,
        );

        Ok(summary)
    }

    /// `ORDERS_URL` 为空时直接读本地文件
    fn order_source(&self) -> Box<dyn OrderSource> {
        if self.config.orders_url.trim().is_empty() {
            info!("未配置订单下载地址，读取本地文件");
            Box::new(CsvFileSource::new(&self.config.orders_file))
        } else {
            Box::new(HttpOrderSource::new(
                &self.config.orders_url,
                &self.config.orders_file,
            ))
        }
    }

    /// 关闭浏览器
    ///
    /// 连接的是已有浏览器时只关闭本程序打开的标签页
    pub async fn shutdown(self) -> AppResult<()> {
        let (mut browser, page): (Browser, _) = self.page.into_parts();
        if self.config.browser_debug_port.is_some() {
            page.close().await?;
            return Ok(());
        }
        browser.close().await?;
        let _ = browser.wait().await;
        Ok(())
    }
}
