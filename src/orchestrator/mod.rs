//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! robot_order_processor (处理 Vec<OrderRecord>，归档清理)
//!     ↓
//! workflow::OrderFlow (处理单个 OrderRecord)
//!     ↓
//! services (能力层：form / receipt / screenshot / archive)
//!     ↓
//! infrastructure (基础设施：OrderPage / PdfStamper)
//! ```
//!
//! 只有编排层持有 Browser 和 PdfiumStamper，下层只拿到 trait 引用。

pub mod robot_order_processor;

pub use robot_order_processor::{process_orders, App, RunSummary};
