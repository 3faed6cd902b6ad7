use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::DatasetError;
use crate::models::order::OrderRecord;

/// 读取订单文件的结果
///
/// 文件缺失不是错误：返回 `Missing`，调用方按空订单集处理
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetLoad {
    /// 文件存在且解析成功
    Loaded {
        path: PathBuf,
        records: Vec<OrderRecord>,
    },
    /// 文件不存在
    Missing { path: PathBuf },
}

impl DatasetLoad {
    /// 取出订单；`Missing` 时为空
    pub fn into_records(self) -> Vec<OrderRecord> {
        match self {
            DatasetLoad::Loaded { records, .. } => records,
            DatasetLoad::Missing { .. } => Vec::new(),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DatasetLoad::Loaded { path, .. } | DatasetLoad::Missing { path } => path,
        }
    }
}

/// 按带表头的 CSV 读取订单
pub fn read_orders_csv(csv_path: &Path) -> Result<DatasetLoad, DatasetError> {
    if !csv_path.exists() {
        warn!("订单文件不存在: {}", csv_path.display());
        return Ok(DatasetLoad::Missing {
            path: csv_path.to_path_buf(),
        });
    }

    let malformed = |source: csv::Error| DatasetError::Malformed {
        path: csv_path.to_path_buf(),
        line: source.position().map(|p| p.line()),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .map_err(malformed)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<OrderRecord>() {
        records.push(row.map_err(malformed)?);
    }

    debug!("解析 {} 得到 {} 行", csv_path.display(), records.len());

    Ok(DatasetLoad::Loaded {
        path: csv_path.to_path_buf(),
        records,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const ORDERS_CSV: &str = "Order number,Head,Body,Legs,Address\n\
                              1,1,2,3,Address 123\n\
                              2,3,4,5,\"Main Street 7, Flat 2\"\n";

    #[test]
    fn test_read_orders_csv_in_file_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(&path, ORDERS_CSV).unwrap();

        let records = read_orders_csv(&path).unwrap().into_records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].order_number, "1");
        assert_eq!(records[0].legs, "3");
        assert_eq!(records[1].head, "3");
        assert_eq!(records[1].address, "Main Street 7, Flat 2");
    }

    #[test]
    fn test_missing_file_is_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        let load = read_orders_csv(&path).unwrap();

        assert_eq!(load, DatasetLoad::Missing { path: path.clone() });
        assert!(load.into_records().is_empty());
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(&path, "Order number,Head,Body,Legs,Address\n1,1,2\n").unwrap();

        match read_orders_csv(&path) {
            Err(DatasetError::Malformed { line, .. }) => assert_eq!(line, Some(2)),
            other => panic!("应该解析失败: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_header_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.csv");
        fs::write(&path, "id,head\n1,1\n").unwrap();

        assert!(matches!(
            read_orders_csv(&path),
            Err(DatasetError::Malformed { .. })
        ));
    }
}
