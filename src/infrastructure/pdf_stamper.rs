//! pdfium 盖图 - 基础设施层
//!
//! pdfium 不能在 async 上下文里直接调用，全部放进 `spawn_blocking`

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pdfium_render::prelude::*;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, ArtifactError};
use crate::infrastructure::page::PdfStamper;

/// 图片宽度占页面宽度的比例
const WATERMARK_WIDTH_RATIO: f32 = 0.4;
/// 图片底边距页面底部的比例
const WATERMARK_BOTTOM_RATIO: f32 = 0.1;

/// 图片在页面上的位置（PDF 坐标，原点在左下角）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatermarkRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// 计算水印图片的位置：按宽度比例缩放、保持宽高比、水平居中、靠近页面底部
///
/// 缩放后高度超出页面可用高度时，改为按高度缩放。
pub fn watermark_rect(page_width: f32, page_height: f32, image_width: u32, image_height: u32) -> WatermarkRect {
    let aspect = if image_width == 0 {
        1.0
    } else {
        image_height as f32 / image_width as f32
    };

    let bottom = page_height * WATERMARK_BOTTOM_RATIO;
    let max_height = page_height - 2.0 * bottom;

    let mut width = page_width * WATERMARK_WIDTH_RATIO;
    let mut height = width * aspect;
    if height > max_height {
        height = max_height;
        width = height / aspect;
    }

    WatermarkRect {
        x: (page_width - width) / 2.0,
        y: bottom,
        width,
        height,
    }
}

/// pdfium 盖图实现
pub struct PdfiumStamper {
    lib_dir: PathBuf,
}

impl PdfiumStamper {
    /// `lib_dir` 下找不到 pdfium 动态库时回退到系统库
    pub fn new(lib_dir: impl Into<PathBuf>) -> Self {
        Self {
            lib_dir: lib_dir.into(),
        }
    }
}

#[async_trait]
impl PdfStamper for PdfiumStamper {
    async fn embed_image(&self, pdf_path: &Path, image_path: &Path) -> AppResult<()> {
        let lib_dir = self.lib_dir.clone();
        let pdf_path = pdf_path.to_path_buf();
        let image_path = image_path.to_path_buf();

        tokio::task::spawn_blocking(move || embed_image_blocking(&lib_dir, &pdf_path, &image_path))
            .await?
    }
}

fn pdf_error(path: &Path, err: impl std::fmt::Display) -> AppError {
    AppError::Artifact(ArtifactError::Pdf {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })
}

fn embed_image_blocking(lib_dir: &Path, pdf_path: &Path, image_path: &Path) -> AppResult<()> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(lib_dir))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| pdf_error(pdf_path, format!("无法加载 pdfium: {:?}", e)))?;
    let pdfium = Pdfium::new(bindings);

    // 源和目标是同一个文件，先整体读入内存再覆盖
    let pdf_bytes = std::fs::read(pdf_path).map_err(|e| AppError::read_failed(pdf_path, e))?;
    let image_bytes = std::fs::read(image_path).map_err(|e| AppError::read_failed(image_path, e))?;
    let image = image::load_from_memory(&image_bytes).map_err(|e| {
        AppError::Artifact(ArtifactError::Image {
            path: image_path.to_path_buf(),
            source: e,
        })
    })?;

    let document = pdfium
        .load_pdf_from_byte_vec(pdf_bytes, None)
        .map_err(|e| pdf_error(pdf_path, e))?;

    {
        let mut page = document.pages().first().map_err(|e| pdf_error(pdf_path, e))?;
        let rect = watermark_rect(
            page.width().value,
            page.height().value,
            image.width(),
            image.height(),
        );
        debug!("水印位置: {:?}", rect);

        let mut object = PdfPageImageObject::new_with_size(
            &document,
            &image,
            PdfPoints::new(rect.width),
            PdfPoints::new(rect.height),
        )
        .map_err(|e| pdf_error(pdf_path, e))?;
        object
            .translate(PdfPoints::new(rect.x), PdfPoints::new(rect.y))
            .map_err(|e| pdf_error(pdf_path, e))?;
        page.objects_mut()
            .add_image_object(object)
            .map_err(|e| pdf_error(pdf_path, e))?;
    }

    let stamped = document.save_to_bytes().map_err(|e| pdf_error(pdf_path, e))?;
    std::fs::write(pdf_path, stamped).map_err(|e| AppError::write_failed(pdf_path, e))?;

    info!("✓ 截图已合并进 {}", pdf_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const A4_WIDTH: f32 = 595.0;
    const A4_HEIGHT: f32 = 842.0;

    #[test]
    fn test_watermark_rect_is_centered_and_scaled() {
        let rect = watermark_rect(A4_WIDTH, A4_HEIGHT, 200, 300);

        assert!((rect.width - A4_WIDTH * 0.4).abs() < 0.01);
        assert!((rect.height - rect.width * 1.5).abs() < 0.01);
        assert!((rect.x * 2.0 + rect.width - A4_WIDTH).abs() < 0.01);
        assert!((rect.y - A4_HEIGHT * 0.1).abs() < 0.01);
    }

    #[test]
    fn test_watermark_rect_tall_image_fits_page() {
        let rect = watermark_rect(A4_WIDTH, A4_HEIGHT, 100, 2000);

        assert!(rect.y + rect.height <= A4_HEIGHT);
        assert!(rect.width < A4_WIDTH * 0.4);
        assert!(rect.x > 0.0);
    }

    #[test]
    fn test_watermark_rect_zero_width_image() {
        let rect = watermark_rect(A4_WIDTH, A4_HEIGHT, 0, 0);

        assert!((rect.width - rect.height).abs() < 0.01);
    }
}
