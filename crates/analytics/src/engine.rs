use crate::report::{
    BaselineMeans, CategoryQuantity, CumulativeRevenuePoint, DashboardReport, GeoRow, KpiDeltas,
    Kpis, RecordRow,
};
use chrono::NaiveDate;
use core_types::{
    CompanySelection, DateRange, DateSelection, FilterState, MarkerStyle, SalesOrderItem,
    SalesTable,
};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::hash::Hash;
use std::ops::AddAssign;

/// A stateless calculator for deriving dashboard metrics from sales line items.
///
/// The only configuration it carries is how map markers are styled.
#[derive(Debug, Clone)]
pub struct MetricsEngine {
    highlighted_marker: MarkerStyle,
    default_marker: MarkerStyle,
}

impl Default for MetricsEngine {
    fn default() -> Self {
        Self::new(MarkerStyle::HIGHLIGHTED, MarkerStyle::DEFAULT)
    }
}

impl MetricsEngine {
    pub fn new(highlighted_marker: MarkerStyle, default_marker: MarkerStyle) -> Self {
        Self {
            highlighted_marker,
            default_marker,
        }
    }

    /// The main entry point: recomputes one complete dashboard view.
    ///
    /// # Arguments
    ///
    /// * `table` - The full, immutable dataset.
    /// * `filter` - The date selection and company picked by the user.
    pub fn build_dashboard(&self, table: &SalesTable, filter: &FilterState) -> DashboardReport {
        let date_range = self.resolve_range(table, &filter.dates);
        let company = &filter.company;

        let rows = self.filter_rows(table, &filter.dates, company);
        let baseline = self.baseline_means(table, date_range);
        let kpis = self.kpis(&rows, &baseline, company);

        tracing::debug!(
            from = %date_range.start,
            to = %date_range.end,
            company = %company,
            rows = rows.len(),
            "Dashboard recomputed."
        );

        DashboardReport {
            heading: company.company().map(|name| format!("{} Overview", name)),
            date_range,
            company: company.clone(),
            kpi_cards: kpis.cards(),
            category_breakdown: self.category_breakdown(&rows, company),
            cumulative_revenue: self.cumulative_revenue_by_category(&rows),
            company_map: self.company_geo_aggregate(table, company),
            records: self.records(&rows),
            baseline,
            kpis,
        }
    }

    /// Resolves the user's date selection against the table's full span.
    pub fn resolve_range(&self, table: &SalesTable, dates: &DateSelection) -> DateRange {
        if dates.as_range().is_none() {
            tracing::debug!(
                start = ?dates.start,
                end = ?dates.end,
                "Incomplete date selection, using the full date span."
            );
        }
        dates.resolve(table.date_span())
    }

    /// Rows inside the (resolved) date range that belong to the selected company.
    pub fn filter_rows<'a>(
        &self,
        table: &'a SalesTable,
        dates: &DateSelection,
        company: &CompanySelection,
    ) -> Vec<&'a SalesOrderItem> {
        let range = self.resolve_range(table, dates);
        table
            .rows()
            .iter()
            .filter(|row| range.contains(row.created_at) && company.matches(&row.company_name))
            .collect()
    }

    /// Per-company means over every company active in `range`.
    ///
    /// Only the date range applies here, never the company selection: the
    /// baseline is what an average company did in the same period.
    pub fn baseline_means(&self, table: &SalesTable, range: DateRange) -> BaselineMeans {
        let per_company = sum_in_first_seen_order(
            table
                .rows()
                .iter()
                .filter(|row| range.contains(row.created_at))
                .map(|row| {
                    (
                        row.company_name.as_str(),
                        Totals {
                            transactions: 1,
                            quantity: row.quantity,
                            revenue: row.gross_amount_item,
                        },
                    )
                }),
        );

        if per_company.is_empty() {
            return BaselineMeans::undefined();
        }

        let company_count = per_company.len();
        let sum = per_company
            .into_iter()
            .fold(Totals::default(), |mut acc, (_, totals)| {
                acc += totals;
                acc
            });
        let n = Decimal::from(company_count);

        BaselineMeans {
            company_count,
            mean_transaction_count: Some(Decimal::from(sum.transactions) / n),
            mean_quantity_sum: Some(Decimal::from(sum.quantity) / n),
            mean_revenue_sum: Some(sum.revenue / n),
        }
    }

    /// The category with the largest total quantity.
    ///
    /// Ties go to the category that appears first in `rows`.
    pub fn top_product(&self, rows: &[&SalesOrderItem]) -> Option<String> {
        let totals = sum_in_first_seen_order(
            rows.iter()
                .map(|row| (row.short_description.as_str(), row.quantity)),
        );

        let mut best: Option<(&str, u64)> = None;
        for (category, quantity) in totals {
            if best.is_none_or(|(_, top)| quantity > top) {
                best = Some((category, quantity));
            }
        }
        best.map(|(category, _)| category.to_string())
    }

    /// Totals of the filtered rows, with deltas when a company is selected.
    pub fn kpis(
        &self,
        rows: &[&SalesOrderItem],
        baseline: &BaselineMeans,
        company: &CompanySelection,
    ) -> Kpis {
        let transaction_count = rows.len();
        let products_sold: u64 = rows.iter().map(|row| row.quantity).sum();
        let revenue: Decimal = rows.iter().map(|row| row.gross_amount_item).sum();

        let deltas = (!company.is_all()).then(|| KpiDeltas {
            transactions: baseline
                .mean_transaction_count
                .map(|mean| Decimal::from(transaction_count) - mean),
            products_sold: baseline
                .mean_quantity_sum
                .map(|mean| Decimal::from(products_sold) - mean),
            revenue: baseline.mean_revenue_sum.map(|mean| revenue - mean),
        });

        Kpis {
            transaction_count,
            products_sold,
            revenue,
            top_product: self.top_product(rows),
            deltas,
        }
    }

    /// Quantity per category, sorted descending.
    ///
    /// With `All` selected every category is further split by company, which
    /// yields a stacked chart. Equal quantities keep their first-seen order.
    pub fn category_breakdown(
        &self,
        rows: &[&SalesOrderItem],
        company: &CompanySelection,
    ) -> Vec<CategoryQuantity> {
        let mut breakdown: Vec<CategoryQuantity> = if company.is_all() {
            sum_in_first_seen_order(rows.iter().map(|row| {
                (
                    (row.short_description.as_str(), row.company_name.as_str()),
                    row.quantity,
                )
            }))
            .into_iter()
            .map(|((category, company_name), quantity)| CategoryQuantity {
                short_description: category.to_string(),
                company_name: Some(company_name.to_string()),
                quantity,
            })
            .collect()
        } else {
            sum_in_first_seen_order(
                rows.iter()
                    .map(|row| (row.short_description.as_str(), row.quantity)),
            )
            .into_iter()
            .map(|(category, quantity)| CategoryQuantity {
                short_description: category.to_string(),
                company_name: None,
                quantity,
            })
            .collect()
        };

        // `sort_by` is stable, which keeps ties in first-seen order.
        breakdown.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        breakdown
    }

    /// Running revenue per category over every day between the first and last
    /// sale in `rows`.
    ///
    /// Days on which a category sold nothing are filled with zero revenue, so
    /// every curve has exactly one point per calendar day.
    pub fn cumulative_revenue_by_category(
        &self,
        rows: &[&SalesOrderItem],
    ) -> Vec<CumulativeRevenuePoint> {
        let daily: HashMap<(&str, NaiveDate), Decimal> = sum_in_first_seen_order(rows.iter().map(
            |row| {
                (
                    (row.short_description.as_str(), row.created_at),
                    row.gross_amount_item,
                )
            },
        ))
        .into_iter()
        .collect();

        let mut keys: Vec<(NaiveDate, &str)> =
            daily.keys().map(|&(category, date)| (date, category)).collect();
        keys.sort_unstable();

        let (Some(&(first_day, _)), Some(&(last_day, _))) = (keys.first(), keys.last()) else {
            return Vec::new();
        };
        let span = DateRange {
            start: first_day,
            end: last_day,
        };

        // Categories in the order they first sold, ties broken by name.
        let mut seen = HashSet::new();
        let categories: Vec<&str> = keys
            .iter()
            .map(|&(_, category)| category)
            .filter(|category| seen.insert(*category))
            .collect();

        let days_per_category = usize::try_from(span.len_days()).unwrap_or(0);
        let mut points = Vec::with_capacity(categories.len() * days_per_category);
        for category in categories {
            let mut running = Decimal::ZERO;
            for day in span.days() {
                let revenue = daily
                    .get(&(category, day))
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                running += revenue;
                points.push(CumulativeRevenuePoint {
                    short_description: category.to_string(),
                    date: day,
                    revenue,
                    cumulative_revenue: running,
                });
            }
        }
        points
    }

    /// All-time totals per company location, independent of any date filter.
    ///
    /// Rows are ordered by latitude, longitude, then company name.
    pub fn company_geo_aggregate(
        &self,
        table: &SalesTable,
        highlighted: &CompanySelection,
    ) -> Vec<GeoRow> {
        let mut locations: BTreeMap<(Decimal, Decimal, &str), (Decimal, u64)> = BTreeMap::new();
        for row in table.rows() {
            let entry = locations
                .entry((row.latitude, row.longitude, row.company_name.as_str()))
                .or_default();
            entry.0 += row.gross_amount_item;
            entry.1 += row.quantity;
        }

        locations
            .into_iter()
            .map(|((latitude, longitude, company_name), (gross_amount, quantity))| {
                let is_highlighted = highlighted.company() == Some(company_name);
                let marker = if is_highlighted {
                    self.highlighted_marker
                } else {
                    self.default_marker
                };
                GeoRow {
                    latitude,
                    longitude,
                    company_name: company_name.to_string(),
                    gross_amount,
                    quantity,
                    highlighted: is_highlighted,
                    marker,
                    color: marker.to_rgba(),
                }
            })
            .collect()
    }

    /// The data-table projection of the filtered rows.
    pub fn records(&self, rows: &[&SalesOrderItem]) -> Vec<RecordRow> {
        rows.iter().map(|row| RecordRow::from(*row)).collect()
    }
}

/// Per-company accumulator used by the baseline.
#[derive(Debug, Clone, Copy, Default)]
struct Totals {
    transactions: u64,
    quantity: u64,
    revenue: Decimal,
}

impl AddAssign for Totals {
    fn add_assign(&mut self, other: Self) {
        self.transactions += other.transactions;
        self.quantity += other.quantity;
        self.revenue += other.revenue;
    }
}

/// Sums values per key, returning groups in the order their key first appeared.
fn sum_in_first_seen_order<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Vec<(K, V)>
where
    K: Eq + Hash + Clone,
    V: AddAssign,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, V)> = Vec::new();
    for (key, value) in pairs {
        match index.get(&key) {
            Some(&i) => groups[i].1 += value,
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, value));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn item(
        company: &str,
        category: &str,
        created_at: NaiveDate,
        quantity: u64,
        amount: Decimal,
    ) -> SalesOrderItem {
        let (latitude, longitude) = match company {
            "Bike Lovers" => (dec!(52.52), dec!(13.405)),
            "Sunset Wheels" => (dec!(39.7392), dec!(-104.9903)),
            _ => (dec!(48.8566), dec!(2.3522)),
        };
        SalesOrderItem {
            order_id: format!("{}-{}", company, created_at),
            created_at,
            company_name: company.to_string(),
            short_description: category.to_string(),
            quantity,
            gross_amount_item: amount,
            latitude,
            longitude,
        }
    }

    /// Three companies over the first week of 2021.
    fn sample_table() -> SalesTable {
        SalesTable::new(vec![
            item("Bike Lovers", "Road Bike", date(2021, 1, 1), 2, dec!(2000)),
            item("Sunset Wheels", "Mountain Bike", date(2021, 1, 1), 1, dec!(1500)),
            item("Bike Lovers", "Helmet", date(2021, 1, 2), 5, dec!(250)),
            item("Pedal Palace", "Road Bike", date(2021, 1, 3), 1, dec!(1000)),
            item("Sunset Wheels", "Road Bike", date(2021, 1, 4), 3, dec!(3000)),
            item("Bike Lovers", "Mountain Bike", date(2021, 1, 6), 1, dec!(1600)),
            item("Pedal Palace", "Helmet", date(2021, 1, 7), 2, dec!(100)),
        ])
        .unwrap()
    }

    fn selection(start: NaiveDate, end: NaiveDate) -> DateSelection {
        DateSelection::new(Some(start), Some(end))
    }

    #[test]
    fn filter_rows_stays_inside_the_range() {
        let table = sample_table();
        let engine = MetricsEngine::default();

        let (start, end) = (date(2021, 1, 2), date(2021, 1, 4));
        let rows = engine.filter_rows(&table, &selection(start, end), &CompanySelection::All);

        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| start <= row.created_at && row.created_at <= end));
    }

    #[test]
    fn filter_rows_with_all_matches_date_only_filter() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let range = DateRange::new(date(2021, 1, 1), date(2021, 1, 4)).unwrap();

        let rows = engine.filter_rows(
            &table,
            &DateSelection::from_range(range),
            &CompanySelection::All,
        );
        let date_only: Vec<&SalesOrderItem> = table
            .rows()
            .iter()
            .filter(|row| range.contains(row.created_at))
            .collect();

        assert_eq!(rows, date_only);
    }

    #[test]
    fn filter_rows_applies_company() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let rows = engine.filter_rows(
            &table,
            &DateSelection::default(),
            &CompanySelection::from("Bike Lovers"),
        );
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|row| row.company_name == "Bike Lovers"));
    }

    #[test]
    fn incomplete_selection_uses_full_span() {
        let table = sample_table();
        let engine = MetricsEngine::default();

        let single_date = DateSelection::new(Some(date(2021, 1, 6)), None);
        let rows = engine.filter_rows(&table, &single_date, &CompanySelection::All);
        assert_eq!(rows.len(), table.len());
        assert_eq!(engine.resolve_range(&table, &single_date), table.date_span());

        let inverted = DateSelection::new(Some(date(2021, 1, 5)), Some(date(2021, 1, 2)));
        assert_eq!(engine.resolve_range(&table, &inverted), table.date_span());
        assert_eq!(
            engine.filter_rows(&table, &inverted, &CompanySelection::All).len(),
            table.len()
        );
    }

    #[test]
    fn baseline_is_mean_over_companies_in_range() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let range = DateRange::new(date(2021, 1, 1), date(2021, 1, 4)).unwrap();

        // Bike Lovers: 2 rows, qty 7, 2250. Sunset Wheels: 2 rows, qty 4, 4500.
        // Pedal Palace: 1 row, qty 1, 1000.
        let baseline = engine.baseline_means(&table, range);
        assert_eq!(baseline.company_count, 3);
        assert_eq!(baseline.mean_transaction_count, Some(dec!(5) / dec!(3)));
        assert_eq!(baseline.mean_quantity_sum, Some(dec!(4)));
        assert_eq!(baseline.mean_revenue_sum, Some(dec!(7750) / dec!(3)));
    }

    #[test]
    fn baseline_of_empty_range_is_undefined() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let range = DateRange::new(date(2022, 1, 1), date(2022, 1, 31)).unwrap();

        let baseline = engine.baseline_means(&table, range);
        assert!(!baseline.is_defined());
        assert_eq!(baseline, BaselineMeans::undefined());
    }

    #[test]
    fn top_product_prefers_first_seen_on_ties() {
        let engine = MetricsEngine::default();
        let x = item("A", "X", date(2021, 1, 1), 5, dec!(1));
        let y = item("A", "Y", date(2021, 1, 1), 5, dec!(1));

        assert_eq!(engine.top_product(&[&x, &y]), Some("X".to_string()));
        assert_eq!(engine.top_product(&[&y, &x]), Some("Y".to_string()));
        assert_eq!(engine.top_product(&[]), None);
    }

    #[test]
    fn top_product_sums_quantities() {
        let engine = MetricsEngine::default();
        let a1 = item("A", "Helmet", date(2021, 1, 1), 2, dec!(1));
        let b = item("A", "Road Bike", date(2021, 1, 1), 3, dec!(1));
        let a2 = item("A", "Helmet", date(2021, 1, 2), 2, dec!(1));
        assert_eq!(engine.top_product(&[&a1, &b, &a2]), Some("Helmet".to_string()));
    }

    #[test]
    fn kpis_for_all_have_no_deltas() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let rows = engine.filter_rows(&table, &DateSelection::default(), &CompanySelection::All);
        let baseline = engine.baseline_means(&table, table.date_span());

        let kpis = engine.kpis(&rows, &baseline, &CompanySelection::All);
        assert_eq!(kpis.transaction_count, 7);
        assert_eq!(kpis.products_sold, 15);
        assert_eq!(kpis.revenue, dec!(9450));
        assert_eq!(kpis.top_product.as_deref(), Some("Helmet"));
        assert!(kpis.deltas.is_none());
    }

    #[test]
    fn kpis_for_company_carry_deltas() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let company = CompanySelection::from("Sunset Wheels");
        let rows = engine.filter_rows(&table, &DateSelection::default(), &company);
        let baseline = engine.baseline_means(&table, table.date_span());

        let kpis = engine.kpis(&rows, &baseline, &company);
        let deltas = kpis.deltas.unwrap();
        // Means over the full span: 7/3 rows, 15/3 = 5 units, 9450/3 = 3150.
        assert_eq!(deltas.products_sold, Some(dec!(-1)));
        assert_eq!(deltas.revenue, Some(dec!(1350)));
        assert_eq!(deltas.transactions, Some(dec!(2) - dec!(7) / dec!(3)));
    }

    #[test]
    fn kpis_without_baseline_keep_undefined_deltas() {
        let engine = MetricsEngine::default();
        let company = CompanySelection::from("Ghost Cycles");
        let kpis = engine.kpis(&[], &BaselineMeans::undefined(), &company);

        assert_eq!(kpis.transaction_count, 0);
        assert_eq!(kpis.revenue, Decimal::ZERO);
        assert_eq!(
            kpis.deltas,
            Some(KpiDeltas {
                transactions: None,
                products_sold: None,
                revenue: None,
            })
        );
    }

    #[test]
    fn breakdown_for_company_groups_by_category() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let company = CompanySelection::from("Bike Lovers");
        let rows = engine.filter_rows(&table, &DateSelection::default(), &company);

        let breakdown = engine.category_breakdown(&rows, &company);
        let summary: Vec<(&str, u64)> = breakdown
            .iter()
            .map(|b| (b.short_description.as_str(), b.quantity))
            .collect();
        assert_eq!(summary, vec![("Helmet", 5), ("Road Bike", 2), ("Mountain Bike", 1)]);
        assert!(breakdown.iter().all(|b| b.company_name.is_none()));
    }

    #[test]
    fn breakdown_for_all_is_stacked_and_sorted_descending() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let rows = engine.filter_rows(&table, &DateSelection::default(), &CompanySelection::All);

        let breakdown = engine.category_breakdown(&rows, &CompanySelection::All);
        assert_eq!(breakdown.len(), 7);
        assert!(breakdown.windows(2).all(|w| w[0].quantity >= w[1].quantity));
        assert!(breakdown.iter().all(|b| b.company_name.is_some()));

        // Two groups sum to 2: Bike Lovers' road bikes were seen before
        // Pedal Palace's helmets.
        let twos: Vec<(&str, &str)> = breakdown
            .iter()
            .filter(|b| b.quantity == 2)
            .map(|b| {
                (
                    b.short_description.as_str(),
                    b.company_name.as_deref().unwrap_or_default(),
                )
            })
            .collect();
        assert_eq!(
            twos,
            vec![("Road Bike", "Bike Lovers"), ("Helmet", "Pedal Palace")]
        );
    }

    #[test]
    fn cumulative_revenue_zero_fills_missing_days() {
        let engine = MetricsEngine::default();
        let a1 = item("Shop", "A", date(2021, 1, 1), 5, dec!(100));
        let a3 = item("Shop", "A", date(2021, 1, 3), 2, dec!(40));
        let b2 = item("Shop", "B", date(2021, 1, 2), 10, dec!(50));

        let points = engine.cumulative_revenue_by_category(&[&a1, &a3, &b2]);
        assert_eq!(points.len(), 6);

        let a: Vec<&CumulativeRevenuePoint> =
            points.iter().filter(|p| p.short_description == "A").collect();
        assert_eq!(
            a.iter().map(|p| p.date).collect::<Vec<_>>(),
            vec![date(2021, 1, 1), date(2021, 1, 2), date(2021, 1, 3)]
        );
        assert_eq!(a[1].revenue, Decimal::ZERO);
        assert_eq!(
            a.iter().map(|p| p.cumulative_revenue).collect::<Vec<_>>(),
            vec![dec!(100), dec!(100), dec!(140)]
        );

        let b: Vec<Decimal> = points
            .iter()
            .filter(|p| p.short_description == "B")
            .map(|p| p.cumulative_revenue)
            .collect();
        assert_eq!(b, vec![dec!(0), dec!(50), dec!(50)]);
    }

    #[test]
    fn cumulative_revenue_is_non_decreasing() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let rows = engine.filter_rows(&table, &DateSelection::default(), &CompanySelection::All);

        let points = engine.cumulative_revenue_by_category(&rows);
        // Three categories over seven days.
        assert_eq!(points.len(), 21);
        for category in ["Road Bike", "Mountain Bike", "Helmet"] {
            let curve: Vec<&CumulativeRevenuePoint> = points
                .iter()
                .filter(|p| p.short_description == category)
                .collect();
            assert_eq!(curve.len(), 7);
            assert!(curve.windows(2).all(|w| {
                w[0].date < w[1].date && w[0].cumulative_revenue <= w[1].cumulative_revenue
            }));
        }
    }

    #[test]
    fn cumulative_revenue_sums_same_day_sales() {
        let engine = MetricsEngine::default();
        let first = item("Shop", "A", date(2021, 1, 1), 1, dec!(10));
        let second = item("Other", "A", date(2021, 1, 1), 1, dec!(15));
        let points = engine.cumulative_revenue_by_category(&[&first, &second]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].revenue, dec!(25));
        assert_eq!(points[0].cumulative_revenue, dec!(25));
    }

    #[test]
    fn cumulative_revenue_of_nothing_is_empty() {
        let engine = MetricsEngine::default();
        assert!(engine.cumulative_revenue_by_category(&[]).is_empty());
    }

    #[test]
    fn geo_aggregate_ignores_date_filter_and_highlights_selection() {
        let table = sample_table();
        let engine = MetricsEngine::default();

        let rows = engine.company_geo_aggregate(&table, &CompanySelection::from("Bike Lovers"));
        assert_eq!(rows.len(), 3);

        let bike_lovers = rows.iter().find(|r| r.company_name == "Bike Lovers").unwrap();
        assert!(bike_lovers.highlighted);
        assert_eq!(bike_lovers.marker, MarkerStyle::HIGHLIGHTED);
        assert_eq!(bike_lovers.gross_amount, dec!(3850));
        assert_eq!(bike_lovers.quantity, 8);

        let others: Vec<&GeoRow> = rows.iter().filter(|r| !r.highlighted).collect();
        assert_eq!(others.len(), 2);
        assert!(others.iter().all(|r| r.marker == MarkerStyle::DEFAULT));

        // Ordered by latitude.
        let names: Vec<&str> = rows.iter().map(|r| r.company_name.as_str()).collect();
        assert_eq!(names, vec!["Sunset Wheels", "Pedal Palace", "Bike Lovers"]);
    }

    #[test]
    fn geo_aggregate_for_all_highlights_nothing() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let rows = engine.company_geo_aggregate(&table, &CompanySelection::All);
        assert!(rows.iter().all(|r| !r.highlighted));
    }

    #[test]
    fn dashboard_geo_rows_do_not_depend_on_dates() {
        let table = sample_table();
        let engine = MetricsEngine::default();

        let narrow = FilterState::new(
            selection(date(2021, 1, 7), date(2021, 1, 7)),
            CompanySelection::All,
        );
        let report = engine.build_dashboard(&table, &narrow);
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.company_map.len(), 3);
    }

    #[test]
    fn dashboard_for_company_has_heading_and_deltas() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let filter = FilterState::new(DateSelection::default(), CompanySelection::from("Pedal Palace"));

        let report = engine.build_dashboard(&table, &filter);
        assert_eq!(report.heading.as_deref(), Some("Pedal Palace Overview"));
        assert_eq!(report.date_range, table.date_span());
        assert_eq!(report.kpis.transaction_count, 2);
        assert!(report.kpi_cards[0].delta.is_some());
        assert_eq!(report.records.len(), 2);
        assert!(report.records.iter().all(|r| r.company_name == "Pedal Palace"));
        assert_eq!(
            report.company_map.iter().filter(|r| r.highlighted).count(),
            1
        );
    }

    #[test]
    fn dashboard_for_empty_selection_renders_zeroes() {
        let table = sample_table();
        let engine = MetricsEngine::default();
        let filter = FilterState::new(
            selection(date(2021, 1, 5), date(2021, 1, 5)),
            CompanySelection::from("Bike Lovers"),
        );

        let report = engine.build_dashboard(&table, &filter);
        assert_eq!(report.kpis.transaction_count, 0);
        assert_eq!(report.kpis.top_product, None);
        assert!(report.category_breakdown.is_empty());
        assert!(report.cumulative_revenue.is_empty());
        assert!(!report.baseline.is_defined());
        assert_eq!(report.kpi_cards[0].delta.as_deref(), Some("no baseline"));
    }
}
