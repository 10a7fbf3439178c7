use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::converter::Summary;

pub fn build_summary_table(summary: &Summary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["", "Value"]);

    let count_rows = [
        ("Days", summary.n_days),
        ("Half-hour samples", summary.n_samples),
        ("Within the window", summary.n_windowed),
        ("Back-filled", summary.n_backfilled),
        ("Interpolated", summary.n_interpolated),
        ("Output rows", summary.n_rows),
    ];
    for (name, count) in count_rows {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Dim),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Missing").add_attribute(Attribute::Dim),
        Cell::new(summary.n_missing)
            .set_alignment(CellAlignment::Right)
            .fg(if summary.n_missing == 0 { Color::Green } else { Color::Red }),
    ]);

    let timestamp_rows = [("From", summary.first_timestamp), ("Until", summary.last_timestamp)];
    for (name, timestamp) in timestamp_rows {
        table.add_row(vec![
            Cell::new(name).add_attribute(Attribute::Dim),
            Cell::new(timestamp.map_or_else(|| "-".to_string(), |timestamp| timestamp.to_string()))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_summary_table() {
        let summary = Summary { n_days: 2, n_rows: 577, ..Summary::default() };
        let table = build_summary_table(&summary);
        assert_eq!(table.row_iter().count(), 9);
        let rendered = table.to_string();
        assert!(rendered.contains("Output rows"));
        assert!(rendered.contains("577"));
    }
}
