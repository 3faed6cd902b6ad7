//! 订单数据源 - 业务能力层
//!
//! 只负责"拿到订单列表"能力：下载 CSV（覆盖本地副本）再解析

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{AppResult, DatasetError};
use crate::models::{read_orders_csv, DatasetLoad};

/// 订单数据源
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn load_orders(&self) -> AppResult<DatasetLoad>;
}

/// 先下载再解析
pub struct HttpOrderSource {
    client: reqwest::Client,
    url: String,
    local_path: PathBuf,
}

impl HttpOrderSource {
    pub fn new(url: impl Into<String>, local_path: impl Into<PathBuf>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            local_path: local_path.into(),
        }
    }
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    async fn load_orders(&self) -> AppResult<DatasetLoad> {
        download_dataset(&self.client, &self.url, &self.local_path).await?;
        Ok(read_orders_csv(&self.local_path)?)
    }
}

/// 直接读取本地 CSV
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl OrderSource for CsvFileSource {
    async fn load_orders(&self) -> AppResult<DatasetLoad> {
        info!("📄 读取本地订单文件: {}", self.path.display());
        Ok(read_orders_csv(&self.path)?)
    }
}

/// 下载数据集到 `dest`，已存在的文件会被覆盖
pub async fn download_dataset(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
) -> Result<(), DatasetError> {
    info!("⬇️ 下载订单数据: {}", url);

    let download_failed = |source: reqwest::Error| DatasetError::DownloadFailed {
        url: url.to_string(),
        source,
    };

    let bytes = client
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(download_failed)?
        .bytes()
        .await
        .map_err(download_failed)?;

    let write_failed = |source: std::io::Error| DatasetError::WriteFailed {
        path: dest.to_path_buf(),
        source,
    };

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_failed)?;
    }
    tokio::fs::write(dest, &bytes).await.map_err(write_failed)?;

    debug!("已写入 {} ({} 字节)", dest.display(), bytes.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ORDERS_CSV: &str = "Order number,Head,Body,Legs,Address\n1,1,2,3,Address 123\n";

    /// 只应答 `GET /orders.csv` 的服务，其他请求一律 404
    async fn orders_server(response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/orders.csv"))
            .respond_with(response)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn requested_paths(requests: Option<Vec<wiremock::Request>>) -> Vec<String> {
        requests
            .unwrap_or_default()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect()
    }

    #[tokio::test]
    async fn test_http_source_overwrites_local_copy() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("orders.csv");
        std::fs::write(&local, "stale").unwrap();

        let mock_server =
            orders_server(ResponseTemplate::new(200).set_body_string(ORDERS_CSV)).await;
        let url = format!("{}/orders.csv", mock_server.uri());

        let load = HttpOrderSource::new(url, &local).load_orders().await.unwrap();

        assert_eq!(std::fs::read_to_string(&local).unwrap(), ORDERS_CSV);
        let records = load.into_records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, "Address 123");
        assert_eq!(
            requested_paths(mock_server.received_requests().await),
            vec!["GET /orders.csv"]
        );
    }

    #[tokio::test]
    async fn test_http_source_reports_bad_status() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("orders.csv");
        let mock_server = orders_server(ResponseTemplate::new(404)).await;
        let url = format!("{}/orders.csv", mock_server.uri());

        let result = HttpOrderSource::new(url.clone(), &local).load_orders().await;

        match result {
            Err(AppError::Dataset(DatasetError::DownloadFailed { url: failed, .. })) => {
                assert_eq!(failed, url);
            }
            other => panic!("非 2xx 状态应该报下载失败: {:?}", other),
        }
        assert!(!local.exists());
        assert_eq!(
            requested_paths(mock_server.received_requests().await),
            vec!["GET /orders.csv"]
        );
    }

    #[tokio::test]
    async fn test_http_source_downloads_into_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("data/orders.csv");

        let mock_server =
            orders_server(ResponseTemplate::new(200).set_body_string(ORDERS_CSV)).await;

        HttpOrderSource::new(format!("{}/orders.csv", mock_server.uri()), &local)
            .load_orders()
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&local).unwrap(), ORDERS_CSV);
    }

    #[test]
    fn test_csv_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");

        let load = tokio_test::block_on(CsvFileSource::new(&path).load_orders()).unwrap();

        assert_eq!(load, DatasetLoad::Missing { path });
    }
}
