//! # Dataset Crate
//!
//! Loads the processed sales-order-items file into the immutable
//! `SalesTable` the rest of the application works on.
//!
//! ## Architectural Principles
//!
//! - **Load Once:** The file is read a single time at startup. Nothing in this
//!   crate writes data back.
//! - **Fail Fast:** A missing column, an unparseable value or an empty file is a
//!   fatal `DatasetError`. The dataset is trusted, so there is no row-level
//!   recovery.
//!
//! ## Public API
//!
//! - `load_sales_table`: Reads a CSV file from disk.
//! - `load_sales_table_from_reader`: Reads CSV from any `io::Read`.
//! - `DatasetError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod loader;

// Re-export the key components to create a clean, public-facing API.
pub use error::DatasetError;
pub use loader::{REQUIRED_COLUMNS, load_sales_table, load_sales_table_from_reader};
