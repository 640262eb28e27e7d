//! Holdings: stocks, ETFs and properties, plus the derived money figures
//! every panel reads.

use serde::{Deserialize, Serialize};

/// Broad asset class of a holding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    Stock,
    Etf,
    Property,
}

impl AssetClass {
    pub const ALL: [AssetClass; 3] = [AssetClass::Stock, AssetClass::Etf, AssetClass::Property];

    /// Plural heading used on cards and legends.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            AssetClass::Stock => "Stocks",
            AssetClass::Etf => "ETFs",
            AssetClass::Property => "Properties",
        }
    }

    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            AssetClass::Stock => "stock",
            AssetClass::Etf => "etf",
            AssetClass::Property => "property",
        }
    }

    /// Noun for the count line ("3 holdings", "2 properties").
    #[must_use]
    pub const fn count_noun(self) -> &'static str {
        match self {
            AssetClass::Stock | AssetClass::Etf => "holdings",
            AssetClass::Property => "properties",
        }
    }
}

/// Yearly figure that only some classes have.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnnualFigure {
    /// ETF management fees at the current value.
    ExpenseCost(f64),
    /// Property rent after expenses, as a percent of current value.
    NetYield(f64),
}

/// Common read-only view over any holding.
pub trait Holding {
    fn id(&self) -> &str;
    fn class(&self) -> AssetClass;
    /// Short label shown in tables (ticker, or street address for property).
    fn display_name(&self) -> &str;
    /// Company or fund name, or the full address.
    fn full_name(&self) -> &str;
    fn total_value(&self) -> f64;
    fn total_return(&self) -> f64;
    /// `None` when the cost base is zero and a percentage is meaningless.
    fn return_percentage(&self) -> Option<f64>;
    fn tags(&self) -> &[String];

    fn annual_figure(&self) -> Option<AnnualFigure> {
        None
    }
}

pub(crate) fn percent_of(part: f64, base: f64) -> Option<f64> {
    if base > 0.0 {
        Some(part / base * 100.0)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    /// Brokerage and commissions paid on purchase.
    #[serde(default)]
    pub purchase_fees: f64,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Stock {
    #[must_use]
    pub fn cost_basis(&self) -> f64 {
        self.purchase_price * self.quantity + self.purchase_fees
    }
}

impl Holding for Stock {
    fn id(&self) -> &str {
        &self.id
    }

    fn class(&self) -> AssetClass {
        AssetClass::Stock
    }

    fn display_name(&self) -> &str {
        &self.symbol
    }

    fn full_name(&self) -> &str {
        &self.name
    }

    fn total_value(&self) -> f64 {
        self.current_price * self.quantity
    }

    fn total_return(&self) -> f64 {
        self.total_value() - self.cost_basis()
    }

    fn return_percentage(&self) -> Option<f64> {
        percent_of(self.total_return(), self.cost_basis())
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Etf {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    pub purchase_price: f64,
    pub current_price: f64,
    /// Management expense ratio in percent per year.
    #[serde(default)]
    pub expense_ratio: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Etf {
    #[must_use]
    pub fn cost_basis(&self) -> f64 {
        self.purchase_price * self.quantity
    }

    /// Yearly fee drag at the current value.
    #[must_use]
    pub fn annual_expense_cost(&self) -> f64 {
        self.total_value() * self.expense_ratio / 100.0
    }
}

impl Holding for Etf {
    fn id(&self) -> &str {
        &self.id
    }

    fn class(&self) -> AssetClass {
        AssetClass::Etf
    }

    fn display_name(&self) -> &str {
        &self.symbol
    }

    fn full_name(&self) -> &str {
        &self.name
    }

    fn total_value(&self) -> f64 {
        self.current_price * self.quantity
    }

    fn total_return(&self) -> f64 {
        self.total_value() - self.cost_basis()
    }

    fn return_percentage(&self) -> Option<f64> {
        percent_of(self.total_return(), self.cost_basis())
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn annual_figure(&self) -> Option<AnnualFigure> {
        (self.expense_ratio > 0.0).then(|| AnnualFigure::ExpenseCost(self.annual_expense_cost()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Unit,
    Townhouse,
    House,
    Commercial,
    Land,
}

impl PropertyKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            PropertyKind::Unit => "Unit",
            PropertyKind::Townhouse => "Townhouse",
            PropertyKind::House => "House",
            PropertyKind::Commercial => "Commercial",
            PropertyKind::Land => "Land",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: String,
    pub address: String,
    pub kind: PropertyKind,
    pub purchase_price: f64,
    pub current_value: f64,
    /// Purchase price plus stamp duty, legal and other acquisition costs.
    pub total_purchase_costs: f64,
    #[serde(default)]
    pub annual_rental_income: f64,
    #[serde(default)]
    pub total_annual_expenses: f64,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Property {
    /// Street part of the address, before the first comma.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.address
            .split(',')
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Property")
    }

    #[must_use]
    pub fn capital_growth(&self) -> f64 {
        self.current_value - self.purchase_price
    }

    #[must_use]
    pub fn annual_cash_flow(&self) -> f64 {
        self.annual_rental_income - self.total_annual_expenses
    }

    #[must_use]
    pub fn gross_rental_yield(&self) -> Option<f64> {
        percent_of(self.annual_rental_income, self.current_value)
    }

    #[must_use]
    pub fn net_rental_yield(&self) -> Option<f64> {
        percent_of(self.annual_cash_flow(), self.current_value)
    }
}

impl Holding for Property {
    fn id(&self) -> &str {
        &self.id
    }

    fn class(&self) -> AssetClass {
        AssetClass::Property
    }

    fn display_name(&self) -> &str {
        self.short_name()
    }

    fn full_name(&self) -> &str {
        &self.address
    }

    fn total_value(&self) -> f64 {
        self.current_value
    }

    fn total_return(&self) -> f64 {
        self.capital_growth() + self.annual_cash_flow()
    }

    fn return_percentage(&self) -> Option<f64> {
        percent_of(self.total_return(), self.total_purchase_costs)
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn annual_figure(&self) -> Option<AnnualFigure> {
        self.net_rental_yield().map(AnnualFigure::NetYield)
    }
}

/// Everything one investor holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    #[serde(default)]
    pub stocks: Vec<Stock>,
    #[serde(default)]
    pub etfs: Vec<Etf>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl Portfolio {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty() && self.etfs.is_empty() && self.properties.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stocks.len() + self.etfs.len() + self.properties.len()
    }

    /// All holdings in class order: stocks, ETFs, properties.
    pub fn holdings(&self) -> impl Iterator<Item = &dyn Holding> {
        let stocks = self.stocks.iter().map(|h| h as &dyn Holding);
        let etfs = self.etfs.iter().map(|h| h as &dyn Holding);
        let properties = self.properties.iter().map(|h| h as &dyn Holding);
        stocks.chain(etfs).chain(properties)
    }
}
