use super::ui;
use crate::session::ConversionSession;
use crate::store::ConversionRecord;
use anyhow::Result;

/// One-line result, e.g. `1,000.00 USD = 850.00 EUR`.
pub fn describe(record: &ConversionRecord) -> String {
    format!(
        "{} {} = {} {}",
        ui::format_amount(record.amount),
        record.from_currency,
        ui::format_amount(record.converted_amount),
        record.to_currency
    )
}

pub fn run(session: &mut ConversionSession, amount: &str, from: &str, to: &str) -> Result<()> {
    let from = from.trim().to_uppercase();
    let to = to.trim().to_uppercase();

    let record = session.convert_input(amount, &from, &to)?;
    println!(
        "{}",
        ui::style_text(&describe(&record), ui::StyleType::Highlight)
    );

    let engine = session.engine();
    println!(
        "{}",
        ui::style_text(
            &format!(
                "{} -> {}",
                engine.rates().display_name(&from),
                engine.rates().display_name(&to)
            ),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}
