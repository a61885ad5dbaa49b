use analytics::{DashboardReport, format_whole};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use std::fmt::{self, Write};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn align_right(table: &mut Table, columns: &[usize]) {
    for &index in columns {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Renders a dashboard view as plain-text sections for the terminal.
///
/// At most `record_limit` rows of the data table are printed.
pub fn render_dashboard(
    report: &DashboardReport,
    title: &str,
    record_limit: usize,
) -> Result<String, fmt::Error> {
    let mut out = String::new();

    writeln!(out, "{}", title)?;
    writeln!(
        out,
        "{} to {} | company: {}",
        report.date_range.start, report.date_range.end, report.company
    )?;
    if let Some(heading) = &report.heading {
        writeln!(out, "\n## {}", heading)?;
    }

    // --- KPIs ---
    let mut kpis = new_table(vec!["Metric", "Value", "vs. mean"]);
    for card in &report.kpi_cards {
        kpis.add_row(vec![
            card.label.clone(),
            card.value.clone(),
            card.delta.clone().unwrap_or_default(),
        ]);
    }
    align_right(&mut kpis, &[1, 2]);
    writeln!(out, "\n### Performance\n{}", kpis)?;

    // --- Bar chart ---
    let stacked = report.company.is_all();
    let mut bars = if stacked {
        new_table(vec!["Company Name", "Bike Type", "Quantity"])
    } else {
        new_table(vec!["Bike Type", "Quantity"])
    };
    for entry in &report.category_breakdown {
        let quantity = entry.quantity.to_string();
        match &entry.company_name {
            Some(company) if stacked => {
                bars.add_row(vec![company.clone(), entry.short_description.clone(), quantity])
            }
            _ => bars.add_row(vec![entry.short_description.clone(), quantity]),
        };
    }
    align_right(&mut bars, &[if stacked { 2 } else { 1 }]);
    let bar_title = if stacked {
        "Quantity by Company"
    } else {
        "Quantity by Bike Type"
    };
    writeln!(out, "\n### {}\n{}", bar_title, bars)?;

    // --- Area chart, summarized to the last point of each curve ---
    let mut curves = new_table(vec!["Bike Type", "Days", "Cumulative Revenue"]);
    let mut finals: Vec<(&str, usize, rust_decimal::Decimal)> = Vec::new();
    for point in &report.cumulative_revenue {
        match finals.last_mut() {
            Some(last) if last.0 == point.short_description => {
                last.1 += 1;
                last.2 = point.cumulative_revenue;
            }
            _ => finals.push((point.short_description.as_str(), 1, point.cumulative_revenue)),
        }
    }
    finals.sort_by(|a, b| b.2.cmp(&a.2));
    for (category, days, total) in finals {
        curves.add_row(vec![
            category.to_string(),
            days.to_string(),
            format!("${}", format_whole(total)),
        ]);
    }
    align_right(&mut curves, &[1, 2]);
    writeln!(out, "\n### Cumulative Revenue by Bike Type\n{}", curves)?;

    // --- Map ---
    let mut map = new_table(vec!["Company", "Latitude", "Longitude", "Revenue", "Quantity", ""]);
    for row in &report.company_map {
        map.add_row(vec![
            row.company_name.clone(),
            row.latitude.to_string(),
            row.longitude.to_string(),
            format!("${}", format_whole(row.gross_amount)),
            row.quantity.to_string(),
            if row.highlighted { "*".to_string() } else { String::new() },
        ]);
    }
    align_right(&mut map, &[1, 2, 3, 4]);
    writeln!(out, "\n### Company Map\n{}", map)?;

    // --- Data table ---
    let mut records = new_table(vec![
        "salesorderid",
        "createdat",
        "companyname",
        "short_descr",
        "quantity",
        "grossamount_item",
    ]);
    for record in report.records.iter().take(record_limit) {
        records.add_row(vec![
            record.order_id.clone(),
            record.created_at.to_string(),
            record.company_name.clone(),
            record.short_description.clone(),
            record.quantity.to_string(),
            record.gross_amount_item.to_string(),
        ]);
    }
    align_right(&mut records, &[4, 5]);
    writeln!(out, "\n### Data Table\n{}", records)?;
    if report.records.len() > record_limit {
        writeln!(
            out,
            "... {} more rows",
            report.records.len() - record_limit
        )?;
    }

    Ok(out)
}
