use crate::format::KpiCard;
use chrono::NaiveDate;
use core_types::{CompanySelection, DateRange, MarkerStyle, SalesOrderItem};
use rust_decimal::Decimal;
use serde::Serialize;

/// Across-company averages for the active date range.
///
/// Each mean is `None` when the range holds no companies at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineMeans {
    pub company_count: usize,
    pub mean_transaction_count: Option<Decimal>,
    pub mean_quantity_sum: Option<Decimal>,
    pub mean_revenue_sum: Option<Decimal>,
}

impl BaselineMeans {
    /// The baseline of a range without any companies.
    pub fn undefined() -> Self {
        Self {
            company_count: 0,
            mean_transaction_count: None,
            mean_quantity_sum: None,
            mean_revenue_sum: None,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.company_count > 0
    }
}

/// Differences between the selected company's totals and the baseline means.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiDeltas {
    pub transactions: Option<Decimal>,
    pub products_sold: Option<Decimal>,
    pub revenue: Option<Decimal>,
}

/// The scalar metrics of the filtered rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub transaction_count: usize,
    pub products_sold: u64,
    pub revenue: Decimal,
    /// `None` when no rows matched the filter.
    pub top_product: Option<String>,
    /// Only present when a specific company is selected.
    pub deltas: Option<KpiDeltas>,
}

/// One bar (or bar segment) of the quantity chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryQuantity {
    pub short_description: String,
    /// Set when the chart is stacked by company, i.e. no company is selected.
    pub company_name: Option<String>,
    pub quantity: u64,
}

/// One day of one category's cumulative revenue curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CumulativeRevenuePoint {
    pub short_description: String,
    pub date: NaiveDate,
    /// Revenue on this day alone, zero for days without sales.
    pub revenue: Decimal,
    pub cumulative_revenue: Decimal,
}

/// All-time activity of one company location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoRow {
    pub latitude: Decimal,
    pub longitude: Decimal,
    pub company_name: String,
    /// Drives the marker size.
    pub gross_amount: Decimal,
    pub quantity: u64,
    pub highlighted: bool,
    pub marker: MarkerStyle,
    /// `marker` as normalized RGBA channels.
    pub color: [f64; 4],
}

/// A row of the data table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordRow {
    pub order_id: String,
    pub created_at: NaiveDate,
    pub company_name: String,
    pub short_description: String,
    pub quantity: u64,
    pub gross_amount_item: Decimal,
}

impl From<&SalesOrderItem> for RecordRow {
    fn from(item: &SalesOrderItem) -> Self {
        Self {
            order_id: item.order_id.clone(),
            created_at: item.created_at,
            company_name: item.company_name.clone(),
            short_description: item.short_description.clone(),
            quantity: item.quantity,
            gross_amount_item: item.gross_amount_item,
        }
    }
}

/// Everything one dashboard view displays for a single `FilterState`.
///
/// This struct is the final output of the `MetricsEngine` and serves as the
/// data transfer object for every presentation shell.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    /// "<company> Overview" when a company is selected.
    pub heading: Option<String>,
    /// The range actually applied, after any fallback to the full span.
    pub date_range: DateRange,
    pub company: CompanySelection,
    pub baseline: BaselineMeans,
    pub kpis: Kpis,
    pub kpi_cards: Vec<KpiCard>,
    pub category_breakdown: Vec<CategoryQuantity>,
    pub cumulative_revenue: Vec<CumulativeRevenuePoint>,
    pub company_map: Vec<GeoRow>,
    pub records: Vec<RecordRow>,
}
