use super::ui;
use crate::core::{RateCache, RateLookup, RateOrigin, Rates};
use comfy_table::Cell;

impl RateLookup {
    pub fn display_as_table(&self) -> String {
        let mut output = format!(
            "Rates per 1 {}\n\n",
            ui::style_text(&self.key.to_uppercase(), ui::StyleType::Title)
        );
        output.push_str(&rates_table(&self.rates));

        let source = match &self.origin {
            RateOrigin::Fetched { .. } | RateOrigin::Fresh => {
                ui::style_text(&self.origin.to_string(), ui::StyleType::Subtle)
            }
            RateOrigin::Stale { .. } | RateOrigin::Default => {
                ui::style_text(&self.origin.to_string(), ui::StyleType::Warning)
            }
        };
        output.push_str(&format!("\n\nSource: {source}"));

        for failure in &self.failures {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(&format!("  {failure}"), ui::StyleType::Subtle)
            ));
        }
        output
    }
}

/// Renders rates sorted by currency code.
pub fn rates_table(rates: &Rates) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Currency"), ui::header_cell("Rate")]);

    let mut codes: Vec<_> = rates.iter().collect();
    codes.sort_by(|a, b| a.0.cmp(b.0));
    for (code, rate) in codes {
        table.add_row(vec![Cell::new(code.to_uppercase()), ui::rate_cell(*rate)]);
    }
    table.to_string()
}

pub async fn run_rates(cache: &RateCache, base: Option<&str>) {
    let spinner = ui::new_spinner("Looking up rates...");
    let lookup = cache.lookup(base).await;
    spinner.finish_and_clear();
    println!("{}", lookup.display_as_table());
}
