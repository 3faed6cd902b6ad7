pub mod chrome_page;
pub mod page;
pub mod pdf_stamper;

pub use chrome_page::ChromePage;
pub use page::{OrderPage, PdfStamper};
pub use pdf_stamper::{watermark_rect, PdfiumStamper, WatermarkRect};
