use super::ui;
use crate::core::RateTable;
use comfy_table::Cell;

impl RateTable {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Code"),
            ui::header_cell("Currency"),
            ui::header_cell("Rate (per 1 USD)"),
        ]);

        for code in self.codes() {
            // Every listed code has a rate.
            let rate = self.rate(code).map_or("N/A".to_string(), ui::format_rate);
            table.add_row(vec![
                Cell::new(code),
                Cell::new(self.display_name(code)),
                ui::number_cell(rate),
            ]);
        }

        format!(
            "{}\n\n{}\n{}",
            ui::style_text("Currency Rates", ui::StyleType::Title),
            table,
            ui::style_text(
                "Sample rates for demonstration, not live market values.",
                ui::StyleType::Subtle
            )
        )
    }
}

pub fn run(rates: &RateTable) {
    println!("{}", rates.display_as_table());
}
