use super::ui;
use crate::store::{ConversionRecord, HistoryStore};
use comfy_table::Cell;
use tracing::info;

pub fn display_as_table(records: &[ConversionRecord]) -> String {
    if records.is_empty() {
        return ui::style_text("No conversions yet.", ui::StyleType::Subtle);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Amount"),
        ui::header_cell("From"),
        ui::header_cell("Converted"),
        ui::header_cell("To"),
    ]);

    for (i, record) in records.iter().enumerate() {
        table.add_row(vec![
            ui::number_cell((i + 1).to_string()),
            ui::number_cell(ui::format_amount(record.amount)),
            Cell::new(&record.from_currency),
            ui::number_cell(ui::format_amount(record.converted_amount)),
            Cell::new(&record.to_currency),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Conversion History", ui::StyleType::Title),
        table
    )
}

pub fn run(history: &HistoryStore, clear: bool) {
    if clear {
        history.clear();
        info!("Conversion history cleared");
        println!("Conversion history cleared.");
        return;
    }
    println!("{}", display_as_table(&history.load_all()));
}
