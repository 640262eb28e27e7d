//! Search and tag filtering for the holdings table.

use crate::holding::{Holding, Portfolio};

/// Case-insensitive text search plus an optional tag id.
///
/// The query matches the short name (ticker or street) or the full name.
/// An empty filter lets everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoldingFilter {
    query: String,
    tag: Option<String>,
}

impl HoldingFilter {
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || self.tag.is_some()
    }

    pub fn push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop(&mut self) {
        self.query.pop();
    }

    pub fn set_tag(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.tag = None;
    }

    #[must_use]
    pub fn matches(&self, holding: &dyn Holding) -> bool {
        if let Some(tag) = &self.tag
            && !holding.tags().iter().any(|t| t == tag)
        {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        needle.is_empty()
            || holding.display_name().to_lowercase().contains(&needle)
            || holding.full_name().to_lowercase().contains(&needle)
    }

    /// Matching holdings in class order.
    pub fn apply<'a>(&'a self, portfolio: &'a Portfolio) -> impl Iterator<Item = &'a dyn Holding> {
        portfolio.holdings().filter(move |h| self.matches(*h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holding::{Etf, Stock};

    fn portfolio() -> Portfolio {
        let stock = |symbol: &str, name: &str, tags: &[&str]| Stock {
            id: symbol.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            quantity: 1.0,
            purchase_price: 1.0,
            current_price: 1.0,
            purchase_fees: 0.0,
            exchange: None,
            sector: None,
            tags: tags.iter().map(ToString::to_string).collect(),
        };
        Portfolio {
            stocks: vec![
                stock("CBA.AX", "Commonwealth Bank", &["tag_2"]),
                stock("AAPL", "Apple Inc", &["tag_1", "tag_25"]),
            ],
            etfs: vec![Etf {
                id: "e1".to_string(),
                symbol: "VAS.AX".to_string(),
                name: "Vanguard Australian Shares".to_string(),
                quantity: 1.0,
                purchase_price: 1.0,
                current_price: 1.0,
                expense_ratio: 0.1,
                category: None,
                exchange: None,
                tags: vec!["tag_2".to_string()],
            }],
            properties: Vec::new(),
        }
    }

    fn names(filter: &HoldingFilter, portfolio: &Portfolio) -> Vec<String> {
        filter
            .apply(portfolio)
            .map(|h| h.display_name().to_string())
            .collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let p = portfolio();
        let filter = HoldingFilter::default();
        assert!(!filter.is_active());
        assert_eq!(names(&filter, &p), vec!["CBA.AX", "AAPL", "VAS.AX"]);
    }

    #[test]
    fn query_matches_symbol_or_name_ignoring_case() {
        let p = portfolio();
        let mut filter = HoldingFilter::default();
        for c in ".ax".chars() {
            filter.push(c);
        }
        assert_eq!(names(&filter, &p), vec!["CBA.AX", "VAS.AX"]);

        filter.clear();
        for c in "apple".chars() {
            filter.push(c);
        }
        assert_eq!(names(&filter, &p), vec!["AAPL"]);
        filter.pop();
        assert_eq!(filter.query(), "appl");
    }

    #[test]
    fn whitespace_query_is_inactive() {
        let mut filter = HoldingFilter::default();
        filter.push(' ');
        assert!(!filter.is_active());
    }

    #[test]
    fn tag_and_query_combine() {
        let p = portfolio();
        let mut filter = HoldingFilter::default();
        filter.set_tag(Some("tag_2".to_string()));
        assert_eq!(names(&filter, &p), vec!["CBA.AX", "VAS.AX"]);

        filter.push('v');
        assert_eq!(names(&filter, &p), vec!["VAS.AX"]);

        filter.clear();
        assert_eq!(filter.tag(), None);
        assert_eq!(names(&filter, &p).len(), 3);
    }
}
