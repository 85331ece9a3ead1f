use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use sos_compose::format::format_quantity;
use sos_compose::format_currency;

use crate::commands::{CheckReport, ExportOutcome};

pub fn print_export_summary(outcome: &ExportOutcome) {
    let snapshot = &outcome.prepared.snapshot;
    println!("Customer: {}", snapshot.header.customer_name);
    match &outcome.output_path {
        Some(path) => println!("Document: {}", path.display()),
        None => println!("Document: (dry run) {}", outcome.prepared.file_name),
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Qtde"),
        header_cell("Código"),
        header_cell("Descrição"),
        header_cell("Valor Unitário"),
        header_cell("Total"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for item in &snapshot.items {
        table.add_row(vec![
            Cell::new(format_quantity(item.quantity)),
            Cell::new(if item.code.is_empty() { "-" } else { &item.code }),
            Cell::new(&item.description),
            Cell::new(format_currency(item.unit_price)),
            Cell::new(format_currency(item.total)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format_currency(snapshot.grand_total)).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_check_report(report: &CheckReport) {
    if report.is_ok() {
        println!(
            "Order is ready to export: {} confirmed item(s), grand total {}",
            report.confirmed_items,
            format_currency(report.grand_total)
        );
        return;
    }
    println!("Order has {} issue(s):", report.issues.len());
    for issue in &report.issues {
        println!("- {issue}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}
