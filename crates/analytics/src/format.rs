use crate::report::Kpis;
use rust_decimal::Decimal;
use serde::Serialize;

const NO_BASELINE: &str = "no baseline";
const NO_PRODUCT: &str = "n/a";

/// A display-ready KPI card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
    pub delta: Option<String>,
}

impl KpiCard {
    fn new(label: &str, value: String, delta: Option<String>) -> Self {
        Self {
            label: label.to_string(),
            value,
            delta,
        }
    }
}

/// Rounds to whole units (half to even) and groups thousands with commas.
pub fn format_whole(value: Decimal) -> String {
    let rounded = value.round();
    if rounded.is_zero() {
        return "0".to_string();
    }

    let digits = rounded.abs().trunc().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn format_delta(delta: Option<Decimal>) -> String {
    delta.map_or_else(|| NO_BASELINE.to_string(), format_whole)
}

impl Kpis {
    /// The four KPI cards in display order.
    pub fn cards(&self) -> Vec<KpiCard> {
        let deltas = self.deltas.as_ref();

        vec![
            KpiCard::new(
                "Total Transactions",
                format_whole(Decimal::from(self.transaction_count)),
                deltas.map(|d| format_delta(d.transactions)),
            ),
            KpiCard::new(
                "Total Products Sold",
                format_whole(Decimal::from(self.products_sold)),
                deltas.map(|d| format_delta(d.products_sold)),
            ),
            KpiCard::new(
                "Revenue",
                format!("${}", format_whole(self.revenue)),
                deltas.map(|d| format_delta(d.revenue)),
            ),
            KpiCard::new(
                "Top Product",
                self.top_product.as_deref().unwrap_or(NO_PRODUCT).to_string(),
                None,
            ),
        ]
    }
}
