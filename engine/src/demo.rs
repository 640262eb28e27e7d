//! Built-in sample portfolio used when no data file is configured.

use chrono::{DateTime, Duration, Utc};
use folio_types::{
    Etf, GroupActivity, GroupAggregation, GroupKind, GroupMember, MemberRole, MemberStatus,
    Portfolio, PortfolioGroup, PortfolioPerformance, Property, PropertyKind, Stock, TagCatalog,
};

use crate::source::PortfolioSnapshot;

fn tags(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| format!("tag_{id}")).collect()
}

fn stocks() -> Vec<Stock> {
    vec![
        Stock {
            id: "stock_1".to_string(),
            symbol: "CBA.AX".to_string(),
            name: "Commonwealth Bank of Australia".to_string(),
            quantity: 50.0,
            purchase_price: 85.50,
            current_price: 105.20,
            purchase_fees: 0.0,
            exchange: Some("ASX".to_string()),
            sector: Some("Financials".to_string()),
            tags: tags(&["2", "17", "22", "25"]),
        },
        Stock {
            id: "stock_2".to_string(),
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            quantity: 30.0,
            purchase_price: 150.00,
            current_price: 195.50,
            purchase_fees: 0.0,
            exchange: Some("NASDAQ".to_string()),
            sector: Some("Technology".to_string()),
            tags: tags(&["1", "18", "25", "8"]),
        },
        Stock {
            id: "stock_3".to_string(),
            symbol: "ZIP.AX".to_string(),
            name: "Zip Co Limited".to_string(),
            quantity: 200.0,
            purchase_price: 5.80,
            current_price: 2.45,
            purchase_fees: 0.0,
            exchange: Some("ASX".to_string()),
            sector: Some("Financials".to_string()),
            tags: tags(&["5", "18", "23", "26"]),
        },
    ]
}

fn etfs() -> Vec<Etf> {
    vec![
        Etf {
            id: "etf_1".to_string(),
            symbol: "VAS.AX".to_string(),
            name: "Vanguard Australian Shares Index ETF".to_string(),
            quantity: 100.0,
            purchase_price: 78.50,
            current_price: 82.30,
            expense_ratio: 0.10,
            category: Some("Australian Equity".to_string()),
            exchange: Some("ASX".to_string()),
            tags: tags(&["2", "17", "22", "8"]),
        },
        Etf {
            id: "etf_2".to_string(),
            symbol: "VTI".to_string(),
            name: "Vanguard Total Stock Market ETF".to_string(),
            quantity: 40.0,
            purchase_price: 185.00,
            current_price: 210.25,
            expense_ratio: 0.03,
            category: Some("US Total Market".to_string()),
            exchange: Some("NYSE Arca".to_string()),
            tags: tags(&["1", "18", "25", "8"]),
        },
    ]
}

fn properties() -> Vec<Property> {
    vec![
        Property {
            id: "property_1".to_string(),
            address: "15 Collins Street, Melbourne VIC 3000".to_string(),
            kind: PropertyKind::Unit,
            purchase_price: 650_000.0,
            current_value: 720_000.0,
            total_purchase_costs: 689_200.0,
            annual_rental_income: 37_440.0,
            total_annual_expenses: 8_770.0,
            tags: tags(&["2", "17", "8", "10", "29"]),
        },
        Property {
            id: "property_2".to_string(),
            address: "42 Smith Street, Fitzroy VIC 3065".to_string(),
            kind: PropertyKind::Townhouse,
            purchase_price: 850_000.0,
            current_value: 925_000.0,
            total_purchase_costs: 902_800.0,
            annual_rental_income: 44_200.0,
            total_annual_expenses: 11_344.0,
            tags: tags(&["2", "18", "8", "11", "29"]),
        },
    ]
}

fn member(id: &str, name: &str, role: MemberRole, status: MemberStatus) -> GroupMember {
    GroupMember {
        id: id.to_string(),
        display_name: name.to_string(),
        role,
        status,
    }
}

fn group(portfolio: &Portfolio, now: DateTime<Utc>) -> GroupAggregation {
    let summary = portfolio.summary();
    let activity = |id: &str, who: &str, details: &str, hours: i64| GroupActivity {
        id: id.to_string(),
        user_name: who.to_string(),
        details: details.to_string(),
        created_at: now - Duration::hours(hours),
    };

    GroupAggregation {
        group: PortfolioGroup {
            id: "group_1".to_string(),
            name: "Family Investments".to_string(),
            description: "Shared view of the household portfolios".to_string(),
            kind: GroupKind::Family,
        },
        members: vec![
            member("member_1", "Alex Morgan", MemberRole::Owner, MemberStatus::Active),
            member("member_2", "Sam Morgan", MemberRole::Admin, MemberStatus::Active),
            member("member_3", "Jordan Lee", MemberRole::Viewer, MemberStatus::Pending),
        ],
        portfolios: vec![
            PortfolioPerformance {
                portfolio_id: "portfolio_1".to_string(),
                portfolio_name: "Main Portfolio".to_string(),
                owner_name: "Alex Morgan".to_string(),
                value: summary.total_value(),
                total_return: summary.total_return(),
            },
            PortfolioPerformance {
                portfolio_id: "portfolio_2".to_string(),
                portfolio_name: "Kids Savings".to_string(),
                owner_name: "Sam Morgan".to_string(),
                value: 48_500.0,
                total_return: 6_200.0,
            },
        ],
        activity: vec![
            activity("activity_1", "Alex Morgan", "Added 10 shares of AAPL", 2),
            activity("activity_2", "Sam Morgan", "Updated rent for 42 Smith Street", 26),
            activity("activity_3", "Alex Morgan", "Invited Jordan Lee to the group", 72),
            activity("activity_4", "Sam Morgan", "Tagged VAS.AX as Long-term", 120),
        ],
    }
}

/// The sample portfolio, stamped with the current time.
#[must_use]
pub fn demo_snapshot() -> PortfolioSnapshot {
    let now = Utc::now();
    let portfolio = Portfolio {
        stocks: stocks(),
        etfs: etfs(),
        properties: properties(),
    };
    let group = group(&portfolio, now);
    PortfolioSnapshot {
        portfolio,
        tags: TagCatalog::default(),
        group: Some(group),
        as_of: now,
    }
}
