//! Plain-text summary report.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use folio_types::{AssetClass, Holding, Portfolio, format_currency};

/// Overview, per-class breakdown and the best holding of each class.
#[must_use]
pub(crate) fn summary_report(portfolio: &Portfolio, generated: DateTime<Utc>) -> String {
    let summary = portfolio.summary();
    let mut out = String::new();

    let _ = writeln!(out, "FOLIO INVESTMENT SUMMARY");
    let _ = writeln!(out, "Generated: {}", generated.format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out);

    let _ = writeln!(out, "PORTFOLIO OVERVIEW");
    let _ = writeln!(out, "Total Portfolio Value: {}", format_currency(summary.total_value()));
    let _ = writeln!(out, "Total Return: {}", format_currency(summary.total_return()));
    let _ = writeln!(out, "Total Return %: {:.2}%", summary.return_percentage());
    let _ = writeln!(out);

    let _ = writeln!(out, "ASSET BREAKDOWN");
    for class in AssetClass::ALL {
        let totals = summary.class(class);
        let _ = writeln!(
            out,
            "{}: {} {}, {}",
            class.label(),
            totals.count,
            class.count_noun(),
            format_currency(totals.value)
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "TOP PERFORMERS");
    for class in AssetClass::ALL {
        let line = match best_in_class(portfolio, class) {
            Some(h) => format!(
                "Best {}: {} ({:.1}%)",
                best_label(class),
                h.display_name(),
                h.return_percentage().unwrap_or(0.0)
            ),
            None => format!("No {}", class.label().to_lowercase()),
        };
        let _ = writeln!(out, "{line}");
    }
    out
}

fn best_in_class(portfolio: &Portfolio, class: AssetClass) -> Option<&dyn Holding> {
    portfolio
        .holdings()
        .filter(|h| h.class() == class)
        .max_by(|a, b| {
            let a = a.return_percentage().unwrap_or(0.0);
            let b = b.return_percentage().unwrap_or(0.0);
            a.total_cmp(&b)
        })
}

const fn best_label(class: AssetClass) -> &'static str {
    match class {
        AssetClass::Stock => "Stock",
        AssetClass::Etf => "ETF",
        AssetClass::Property => "Property",
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use folio_types::Stock;

    use super::*;

    fn stock(symbol: &str, purchase: f64, current: f64) -> Stock {
        Stock {
            id: symbol.to_string(),
            symbol: symbol.to_string(),
            name: symbol.to_string(),
            quantity: 10.0,
            purchase_price: purchase,
            current_price: current,
            purchase_fees: 0.0,
            exchange: None,
            sector: None,
            tags: Vec::new(),
        }
    }

    #[test]
    fn report_lists_overview_and_best_per_class() {
        let portfolio = Portfolio {
            stocks: vec![stock("BHP.AX", 40.0, 44.0), stock("CSL.AX", 100.0, 150.0)],
            ..Portfolio::default()
        };
        let generated = Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap();

        let report = summary_report(&portfolio, generated);

        assert!(report.starts_with("FOLIO INVESTMENT SUMMARY\nGenerated: 2026-03-01 09:30 UTC"));
        assert!(report.contains("Total Portfolio Value: $1,940"));
        assert!(report.contains("Total Return: $540"));
        assert!(report.contains("Stocks: 2 holdings, $1,940"));
        assert!(report.contains("Properties: 0 properties, $0"));
        assert!(report.contains("Best Stock: CSL.AX (50.0%)"));
        assert!(report.contains("No etfs"));
        assert!(report.contains("No properties"));
    }

    #[test]
    fn empty_portfolio_reports_zero_return() {
        let report = summary_report(&Portfolio::default(), Utc::now());
        assert!(report.contains("Total Return %: 0.00%"));
    }
}
