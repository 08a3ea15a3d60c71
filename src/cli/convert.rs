use super::ui;
use crate::core::{Conversion, RateCache};

impl Conversion {
    pub fn display(&self) -> String {
        let value = self.value.map_or_else(
            || ui::style_text("N/A", ui::StyleType::Warning),
            |v| ui::style_text(&ui::format_rate(v), ui::StyleType::Value),
        );
        format!(
            "{} {} = {} {}\n{}",
            ui::format_rate(self.amount),
            self.from.to_uppercase(),
            value,
            self.to.to_uppercase(),
            ui::style_text(&format!("Source: {}", self.origin), ui::StyleType::Subtle)
        )
    }
}

pub async fn run_convert(cache: &RateCache, amount: f64, from: &str, to: &str) {
    let spinner = ui::new_spinner("Converting...");
    let conversion = cache.convert(amount, from, to).await;
    spinner.finish_and_clear();
    println!("{}", conversion.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RateOrigin;

    #[test]
    fn test_display_conversion() {
        let conversion = Conversion {
            amount: 10.0,
            from: "usd".to_string(),
            to: "npr".to_string(),
            value: Some(1335.0),
            origin: RateOrigin::Fresh,
        };

        let output = conversion.display();

        assert!(output.contains("10.0000 USD"));
        assert!(output.contains("1335.00"));
        assert!(output.contains("NPR"));
    }

    #[test]
    fn test_display_unknown_target() {
        let conversion = Conversion {
            amount: 1.0,
            from: "usd".to_string(),
            to: "xyz".to_string(),
            value: None,
            origin: RateOrigin::Default,
        };

        assert!(conversion.display().contains("N/A"));
    }
}
