pub mod csv_loader;

pub use csv_loader::{read_orders_csv, DatasetLoad};
