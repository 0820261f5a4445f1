//! Policy record structures and extract loading

mod data;
pub mod loader;

pub use data::PolicyRecord;
pub use loader::{load_records, load_records_from_reader, load_default_extract, REQUIRED_COLUMNS};
