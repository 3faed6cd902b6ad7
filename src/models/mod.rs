pub mod loaders;
pub mod order;

pub use loaders::{read_orders_csv, DatasetLoad};
pub use order::{parse_order_number, sanitize_file_component, OrderArtifacts, OrderRecord};
