//! # Robot Order Submit
//!
//! 从 CSV 读取机器人订单，逐个在网页表单上下单，保存回执 PDF 和预览截图，最后打包归档
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Browser / Page / pdfium），只暴露能力
//! - `OrderPage` - 页面原子操作，`ChromePage` 为 chromiumoxide 实现
//! - `PdfStamper` - PDF 盖图，`PdfiumStamper` 为 pdfium 实现
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个订单
//! - `OrderSource` - 下载并解析订单 CSV
//! - `FormFiller` - 填表并提交（出错有限次重试）
//! - `ReceiptCapturer` - 读取订单号、回执存为 PDF
//! - `ScreenshotEmbedder` - 截图并合并进 PDF
//! - `archiver` - 打包并删除回执目录
//!
//! ### ③ 流程层（Workflow）
//! - `OrderFlow` - 一个订单的完整流程
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator` - 一次完整运行：加载、逐个处理、归档、清理

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ChromePage, OrderPage, PdfStamper, PdfiumStamper};
pub use models::{DatasetLoad, OrderArtifacts, OrderRecord};
pub use orchestrator::{process_orders, App, RunSummary};
pub use workflow::{OrderCtx, OrderFlow, OrderOutcome};
