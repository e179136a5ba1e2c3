//! Item catalog adapters.

mod csv_catalog;

pub use csv_catalog::{CatalogError, CsvItemCatalog};
