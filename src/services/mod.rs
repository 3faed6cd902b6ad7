pub mod archiver;
pub mod form_filler;
pub mod order_source;
pub mod receipt_capturer;
pub mod screenshot_embedder;
pub mod selectors;

pub use archiver::{archive_receipts, clean_output_folder, ensure_archive_outside, ArchiveReport};
pub use form_filler::FormFiller;
pub use order_source::{CsvFileSource, HttpOrderSource, OrderSource};
pub use receipt_capturer::ReceiptCapturer;
pub use screenshot_embedder::ScreenshotEmbedder;
