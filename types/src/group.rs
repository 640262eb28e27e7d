//! Portfolio groups: shared dashboards over several members' portfolios.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::summary::return_on_invested;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Family,
    Friends,
    InvestmentClub,
    Business,
}

impl GroupKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            GroupKind::Family => "family",
            GroupKind::Friends => "friends",
            GroupKind::InvestmentClub => "investment club",
            GroupKind::Business => "business",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: GroupKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
    Viewer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Active,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub id: String,
    pub display_name: String,
    pub role: MemberRole,
    pub status: MemberStatus,
}

impl GroupMember {
    /// Avatar letter; `U` when the name is blank.
    #[must_use]
    pub fn initial(&self) -> char {
        self.display_name
            .chars()
            .find(|c| !c.is_whitespace())
            .map_or('U', |c| c.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupActivity {
    pub id: String,
    pub user_name: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPerformance {
    pub portfolio_id: String,
    pub portfolio_name: String,
    pub owner_name: String,
    pub value: f64,
    pub total_return: f64,
}

impl PortfolioPerformance {
    #[must_use]
    pub fn return_percentage(&self) -> f64 {
        return_on_invested(self.value, self.total_return)
    }
}

/// Group view: the group, who is in it, what they hold and what happened lately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAggregation {
    pub group: PortfolioGroup,
    #[serde(default)]
    pub members: Vec<GroupMember>,
    #[serde(default)]
    pub portfolios: Vec<PortfolioPerformance>,
    #[serde(default)]
    pub activity: Vec<GroupActivity>,
}

impl GroupAggregation {
    #[must_use]
    pub fn total_value(&self) -> f64 {
        self.portfolios.iter().map(|p| p.value).sum()
    }

    #[must_use]
    pub fn active_members(&self) -> usize {
        self.members
            .iter()
            .filter(|m| m.status == MemberStatus::Active)
            .count()
    }

    /// Most recent first, at most `limit` entries.
    #[must_use]
    pub fn recent_activity(&self, limit: usize) -> Vec<&GroupActivity> {
        let mut items: Vec<&GroupActivity> = self.activity.iter().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn activity(id: &str, day: u32) -> GroupActivity {
        GroupActivity {
            id: id.to_string(),
            user_name: "Alex".to_string(),
            details: format!("event {id}"),
            created_at: Utc.with_ymd_and_hms(2024, 6, day, 9, 0, 0).unwrap(),
        }
    }

    fn overview() -> GroupAggregation {
        GroupAggregation {
            group: PortfolioGroup {
                id: "g1".to_string(),
                name: "Family".to_string(),
                description: String::new(),
                kind: GroupKind::InvestmentClub,
            },
            members: vec![
                GroupMember {
                    id: "m1".to_string(),
                    display_name: " sam".to_string(),
                    role: MemberRole::Owner,
                    status: MemberStatus::Active,
                },
                GroupMember {
                    id: "m2".to_string(),
                    display_name: String::new(),
                    role: MemberRole::Viewer,
                    status: MemberStatus::Pending,
                },
            ],
            portfolios: vec![PortfolioPerformance {
                portfolio_id: "p1".to_string(),
                portfolio_name: "Core".to_string(),
                owner_name: "Sam".to_string(),
                value: 1200.0,
                total_return: 200.0,
            }],
            activity: vec![activity("a", 1), activity("c", 3), activity("b", 2)],
        }
    }

    #[test]
    fn recent_activity_is_newest_first_and_limited() {
        let o = overview();
        let ids: Vec<_> = o.recent_activity(2).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b"]);
    }

    #[test]
    fn member_initial_skips_whitespace_and_defaults() {
        let o = overview();
        assert_eq!(o.members[0].initial(), 'S');
        assert_eq!(o.members[1].initial(), 'U');
        assert_eq!(o.active_members(), 1);
    }

    #[test]
    fn portfolio_performance_percentage() {
        let o = overview();
        assert!((o.portfolios[0].return_percentage() - 20.0).abs() < 1e-9);
        assert_eq!(o.total_value(), 1200.0);
        assert_eq!(o.group.kind.label(), "investment club");
    }
}
