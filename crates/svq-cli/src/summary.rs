//! Pretty rendering of score reports.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use svq_model::OutlierReport;

/// Prints one row per (unit, column) pair in deterministic unit order.
/// P-values are shown for models that produce them.
pub fn print_report(report: &OutlierReport, with_p_values: bool) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        header_cell("Unit"),
        header_cell("Column"),
        header_cell("Score"),
    ];
    if with_p_values {
        header.push(header_cell("P-value"));
    }
    table.set_header(header);

    for (unit, columns) in &report.records {
        for (column, record) in columns {
            let mut row = vec![
                Cell::new(unit.to_string()),
                Cell::new(column),
                Cell::new(format!("{:.4}", record.score)).set_alignment(CellAlignment::Right),
            ];
            if with_p_values {
                let p_value = record
                    .p_value
                    .map_or_else(|| "-".to_string(), |p| format!("{p:.4}"));
                row.push(Cell::new(p_value).set_alignment(CellAlignment::Right));
            }
            table.add_row(row);
        }
    }

    println!("{table}");
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}
