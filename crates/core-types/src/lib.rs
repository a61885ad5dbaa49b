pub mod enums;
pub mod error;
pub mod structs;
pub mod table;

// Re-export the core types to provide a clean public API.
pub use enums::{ALL_COMPANIES, CompanySelection};
pub use error::CoreError;
pub use structs::{DateRange, DateSelection, FilterState, MarkerStyle, SalesOrderItem};
pub use table::SalesTable;
