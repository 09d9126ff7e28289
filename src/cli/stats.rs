use super::ui;
use crate::store::UsageTracker;
use comfy_table::Cell;

impl UsageTracker {
    pub fn display_as_table(&self) -> String {
        let ranked = self.ranked();
        if ranked.is_empty() {
            return ui::style_text("No conversions recorded.", ui::StyleType::Subtle);
        }

        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell("Pair"),
            ui::header_cell("Conversions"),
        ]);
        for entry in &ranked {
            table.add_row(vec![
                Cell::new(&entry.pair_key),
                ui::number_cell(entry.count.to_string()),
            ]);
        }

        format!(
            "{}\n\n{}",
            ui::style_text("Currency Pair Usage", ui::StyleType::Title),
            table
        )
    }
}

pub fn run(usage: &UsageTracker) {
    println!("{}", usage.display_as_table());
}
