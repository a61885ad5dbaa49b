use crate::AppState;
use analytics::{DashboardReport, GeoRow, RecordRow};
use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use core_types::{CompanySelection, DateRange, DateSelection, FilterState};
use serde::Deserialize;
use std::sync::Arc;

/// The controls of one dashboard interaction, as query parameters.
///
/// Every parameter is optional: a missing date makes the selection incomplete
/// (and so the full span is used), a missing company means the configured
/// default.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub company: Option<String>,
}

impl FilterQuery {
    fn into_filter_state(self, default_company: &CompanySelection) -> FilterState {
        let start = parse_date_param("from", self.from.as_deref());
        let end = parse_date_param("to", self.to.as_deref());
        let company = self
            .company
            .map(CompanySelection::from)
            .unwrap_or_else(|| default_company.clone());
        FilterState::new(DateSelection::new(start, end), company)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MapQuery {
    pub company: Option<String>,
}

/// A blank or unparseable date leaves the selection incomplete, which
/// resolves to the full date span downstream.
fn parse_date_param(param: &'static str, value: Option<&str>) -> Option<NaiveDate> {
    let raw = value.map(str::trim).filter(|raw| !raw.is_empty())?;
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!(
                param,
                value = raw,
                error = %e,
                "Ignoring unparseable date parameter."
            );
            None
        }
    }
}

/// # GET /api/companies
/// The options of the company selector, "All" first.
pub async fn get_companies(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.table.company_options())
}

/// # GET /api/date-span
pub async fn get_date_span(State(state): State<Arc<AppState>>) -> Json<DateRange> {
    Json(state.table.date_span())
}

/// # GET /api/dashboard
/// Recomputes the complete dashboard for the given filters.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Json<DashboardReport> {
    let filter = query.into_filter_state(&state.default_company);
    Json(state.engine.build_dashboard(&state.table, &filter))
}

/// # GET /api/records
/// Only the data table of the dashboard.
pub async fn get_records(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> Json<Vec<RecordRow>> {
    let filter = query.into_filter_state(&state.default_company);
    let rows = state
        .engine
        .filter_rows(&state.table, &filter.dates, &filter.company);
    Json(state.engine.records(&rows))
}

/// # GET /api/map
/// The company map. It never depends on the date filter.
pub async fn get_map(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MapQuery>,
) -> Json<Vec<GeoRow>> {
    let company = query
        .company
        .map(CompanySelection::from)
        .unwrap_or_else(|| state.default_company.clone());
    Json(state.engine.company_geo_aggregate(&state.table, &company))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_dates_are_incomplete() {
        let query = FilterQuery {
            from: Some("2021-01-01".to_string()),
            to: Some("  ".to_string()),
            company: None,
        };
        let filter = query.into_filter_state(&CompanySelection::All);
        assert_eq!(filter.dates.start, NaiveDate::from_ymd_opt(2021, 1, 1));
        assert_eq!(filter.dates.end, None);
        assert_eq!(filter.company, CompanySelection::All);
    }

    #[test]
    fn unparseable_dates_are_treated_as_missing() {
        let query = FilterQuery {
            from: Some("yesterday".to_string()),
            to: Some("2021-02-30".to_string()),
            company: None,
        };
        let filter = query.into_filter_state(&CompanySelection::All);
        assert_eq!(filter.dates, DateSelection::default());
    }

    #[test]
    fn missing_company_uses_default() {
        let default_company = CompanySelection::from("Bike Lovers");
        let filter = FilterQuery::default()
            .into_filter_state(&default_company);
        assert_eq!(filter.company, default_company);
    }
}
