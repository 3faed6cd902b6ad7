//! 归档服务 - 业务能力层
//!
//! 把回执目录打成一个带时间戳的 zip，然后删除回执目录

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{AppResult, ArchiveError};

/// 归档结果
#[derive(Debug, Clone)]
pub struct ArchiveReport {
    /// 归档文件路径
    pub path: PathBuf,
    /// 归档内的文件名（相对回执目录，`/` 分隔）
    pub entries: Vec<String>,
}

/// `{prefix}-{YYYYmmdd_HHMMSS}.zip`
pub fn archive_file_name(prefix: &str, now: DateTime<Local>) -> String {
    format!("{}-{}.zip", prefix, now.format("%Y%m%d_%H%M%S"))
}

/// 解析成绝对路径；不存在的尾部目录按字面拼接
fn resolve(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    for existing in absolute.ancestors() {
        if let Ok(canonical) = existing.canonicalize() {
            let rest = absolute.strip_prefix(existing).unwrap_or(Path::new(""));
            return canonical.join(rest);
        }
    }
    absolute
}

/// 归档目录不能是回执目录本身或其子目录，否则 zip 会把自己打进去并随回执目录一起被删除
pub fn ensure_archive_outside(source_dir: &Path, archive_dir: &Path) -> Result<(), ArchiveError> {
    if resolve(archive_dir).starts_with(resolve(source_dir)) {
        return Err(ArchiveError::ArchiveInsideSource {
            archive_dir: archive_dir.to_path_buf(),
            source_dir: source_dir.to_path_buf(),
        });
    }
    Ok(())
}

/// 把 `source_dir` 下的所有文件打包到 `archive_dir` 中
pub async fn archive_receipts(
    source_dir: &Path,
    archive_dir: &Path,
    prefix: &str,
) -> AppResult<ArchiveReport> {
    info!("🗜️ 正在归档 {} ...", source_dir.display());

    ensure_archive_outside(source_dir, archive_dir)?;

    let archive_path = archive_dir.join(archive_file_name(prefix, Local::now()));
    let source = source_dir.to_path_buf();
    let target = archive_path.clone();

    let entries =
        tokio::task::spawn_blocking(move || write_zip(&source, &target)).await??;

    info!(
        "✓ 归档已创建: {} ({} 个文件)",
        archive_path.display(),
        entries.len()
    );

    Ok(ArchiveReport {
        path: archive_path,
        entries,
    })
}

fn write_zip(source_dir: &Path, archive_path: &Path) -> Result<Vec<String>, ArchiveError> {
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ArchiveError::Io { path, source }
    };

    if let Some(parent) = archive_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    let file = File::create(archive_path).map_err(io_error(archive_path))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let archive_abs = resolve(archive_path);

    let mut entries = Vec::new();
    if source_dir.exists() {
        for entry in WalkDir::new(source_dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() || resolve(entry.path()) == archive_abs {
                continue;
            }

            let name = entry
                .path()
                .strip_prefix(source_dir)
                .unwrap_or(entry.path())
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            debug!("归档: {}", name);
            let bytes = std::fs::read(entry.path()).map_err(io_error(entry.path()))?;
            zip.start_file(name.as_str(), options)?;
            zip.write_all(&bytes).map_err(io_error(archive_path))?;
            entries.push(name);
        }
    } else {
        warn!("⚠️ 回执目录不存在，将创建空归档: {}", source_dir.display());
    }

    zip.finish()?;
    Ok(entries)
}

/// 删除输出目录
pub async fn clean_output_folder(folder: &Path) -> AppResult<()> {
    if !folder.exists() {
        warn!("⚠️ 目录不存在，无需删除: {}", folder.display());
        return Ok(());
    }

    tokio::fs::remove_dir_all(folder)
        .await
        .map_err(|source| ArchiveError::CleanupFailed {
            path: folder.to_path_buf(),
            source,
        })?;

    info!("🗑️ 目录已删除: {}", folder.display());
    Ok(())
}
