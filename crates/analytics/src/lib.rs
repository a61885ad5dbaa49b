//! # Sales Metrics Engine
//!
//! This crate derives every number the sales dashboard shows: the filtered
//! record set, the KPI cards with their deltas against a per-company baseline,
//! the two chart tables, and the company map.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   terminals or HTTP. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `MetricsEngine` takes the immutable
//!   `SalesTable` and the user's `FilterState` as explicit inputs and recomputes
//!   everything on each call. Nothing is cached between interactions.
//!
//! ## Public API
//!
//! - `MetricsEngine`: The main struct that contains the calculation logic.
//! - `DashboardReport`: Everything one dashboard view displays.
//! - `KpiCard`: A display-ready KPI with its optional delta.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod format;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use engine::MetricsEngine;
pub use format::{KpiCard, format_whole};
pub use report::{
    BaselineMeans, CategoryQuantity, CumulativeRevenuePoint, DashboardReport, GeoRow, KpiDeltas,
    Kpis, RecordRow,
};
