//! Portfolio-wide aggregates: per-class totals, allocation and performers.

use serde::Serialize;

use crate::holding::{AssetClass, Holding, Portfolio};

/// Value, return and count for one asset class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTotals {
    pub value: f64,
    pub total_return: f64,
    pub count: usize,
}

impl ClassTotals {
    fn add(&mut self, holding: &dyn Holding) {
        self.value += holding.total_value();
        self.total_return += holding.total_return();
        self.count += 1;
    }

    /// Return relative to the money put in (`value - return`).
    #[must_use]
    pub fn return_percentage(&self) -> f64 {
        return_on_invested(self.value, self.total_return)
    }
}

/// Return as a percentage of the invested amount.
///
/// Zero when nothing was invested (or losses exceed the current value).
#[must_use]
pub fn return_on_invested(value: f64, total_return: f64) -> f64 {
    let invested = value - total_return;
    if invested > 0.0 {
        total_return / invested * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentSummary {
    pub stocks: ClassTotals,
    pub etfs: ClassTotals,
    pub properties: ClassTotals,
}

impl InvestmentSummary {
    #[must_use]
    pub fn from_portfolio(portfolio: &Portfolio) -> Self {
        let mut summary = Self::default();
        for holding in portfolio.holdings() {
            summary.class_mut(holding.class()).add(holding);
        }
        summary
    }

    #[must_use]
    pub fn class(&self, class: AssetClass) -> &ClassTotals {
        match class {
            AssetClass::Stock => &self.stocks,
            AssetClass::Etf => &self.etfs,
            AssetClass::Property => &self.properties,
        }
    }

    fn class_mut(&mut self, class: AssetClass) -> &mut ClassTotals {
        match class {
            AssetClass::Stock => &mut self.stocks,
            AssetClass::Etf => &mut self.etfs,
            AssetClass::Property => &mut self.properties,
        }
    }

    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.stocks.value + self.etfs.value + self.properties.value
    }

    #[must_use]
    pub fn total_return(&self) -> f64 {
        self.stocks.total_return + self.etfs.total_return + self.properties.total_return
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.stocks.count + self.etfs.count + self.properties.count
    }

    #[must_use]
    pub fn return_percentage(&self) -> f64 {
        return_on_invested(self.total_value(), self.total_return())
    }

    /// Share of total value per class. Empty when there is nothing to allocate.
    #[must_use]
    pub fn allocation(&self) -> Vec<AllocationSlice> {
        let total = self.total_value();
        if total <= 0.0 {
            return Vec::new();
        }
        AssetClass::ALL
            .into_iter()
            .map(|class| {
                let totals = self.class(class);
                AllocationSlice {
                    class,
                    value: totals.value,
                    percentage: totals.value / total * 100.0,
                    count: totals.count,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationSlice {
    pub class: AssetClass,
    pub value: f64,
    pub percentage: f64,
    pub count: usize,
}

/// One row of the performers ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceItem {
    pub id: String,
    pub name: String,
    pub class: AssetClass,
    pub return_percentage: f64,
    pub value: f64,
}

impl Portfolio {
    #[must_use]
    pub fn summary(&self) -> InvestmentSummary {
        InvestmentSummary::from_portfolio(self)
    }

    /// Every holding ranked best to worst by return percentage.
    ///
    /// Holdings without a meaningful percentage rank as 0%.
    #[must_use]
    pub fn performers(&self) -> Vec<PerformanceItem> {
        let mut items: Vec<PerformanceItem> = self
            .holdings()
            .map(|h| PerformanceItem {
                id: h.id().to_string(),
                name: h.display_name().to_string(),
                class: h.class(),
                return_percentage: h.return_percentage().unwrap_or(0.0),
                value: h.total_value(),
            })
            .collect();
        items.sort_by(|a, b| b.return_percentage.total_cmp(&a.return_percentage));
        items
    }
}
