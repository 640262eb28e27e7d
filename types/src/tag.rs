//! Asset tags and per-tag performance analytics.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::holding::{AssetClass, Holding, Portfolio};
use crate::summary::return_on_invested;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Strategy,
    Risk,
    Goal,
    Market,
    Tax,
}

impl TagCategory {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TagCategory::Strategy => "Strategy",
            TagCategory::Risk => "Risk",
            TagCategory::Goal => "Goal",
            TagCategory::Market => "Market",
            TagCategory::Tax => "Tax",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub category: TagCategory,
    /// `#RRGGBB`
    pub color: String,
}

impl Tag {
    fn new(id: &str, name: &str, category: TagCategory, color: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            category,
            color: color.to_string(),
        }
    }

    #[must_use]
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

/// `#RRGGBB` or `#RGB` into RGB components. Anything else is `None`.
#[must_use]
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some((channel(0)?, channel(2)?, channel(4)?))
        }
        3 => {
            // #abc is #aabbcc
            let channel = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
            Some((channel(0)?, channel(1)?, channel(2)?))
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("{class} {holding} references unknown tag '{tag}'")]
    UnknownTag {
        class: &'static str,
        holding: String,
        tag: String,
    },
}

/// Holding reference used for best/worst performer of a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformerRef {
    pub name: String,
    pub class: AssetClass,
    pub return_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaggedAssetSummary {
    pub tag_id: String,
    pub tag_name: String,
    pub tag_color: String,
    pub stocks_count: usize,
    pub etfs_count: usize,
    pub properties_count: usize,
    pub total_value: f64,
    pub total_return: f64,
    pub return_percentage: f64,
    pub best_performer: Option<PerformerRef>,
    pub worst_performer: Option<PerformerRef>,
}

impl TaggedAssetSummary {
    #[must_use]
    pub fn total_assets_count(&self) -> usize {
        self.stocks_count + self.etfs_count + self.properties_count
    }

    #[must_use]
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.tag_color)
    }
}

/// Ordering applied to the tag analytics table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TagSort {
    #[default]
    Value,
    Return,
    Count,
}

impl TagSort {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TagSort::Value => "value",
            TagSort::Return => "return",
            TagSort::Count => "count",
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            TagSort::Value => TagSort::Return,
            TagSort::Return => TagSort::Count,
            TagSort::Count => TagSort::Value,
        }
    }

    /// Sort descending by the selected key.
    pub fn apply(self, summaries: &mut [TaggedAssetSummary]) {
        match self {
            TagSort::Value => summaries.sort_by(|a, b| b.total_value.total_cmp(&a.total_value)),
            TagSort::Return => {
                summaries.sort_by(|a, b| b.return_percentage.total_cmp(&a.return_percentage));
            }
            TagSort::Count => {
                summaries.sort_by_key(|s| Reverse(s.total_assets_count()));
            }
        }
    }
}

/// The set of tags holdings may reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagCatalog {
    tags: Vec<Tag>,
}

impl Default for TagCatalog {
    fn default() -> Self {
        use TagCategory::{Goal, Market, Risk, Strategy, Tax};
        Self::new(vec![
            Tag::new("tag_1", "Growth", Strategy, "#10B981"),
            Tag::new("tag_2", "Income", Strategy, "#3B82F6"),
            Tag::new("tag_5", "Speculation", Strategy, "#EF4444"),
            Tag::new("tag_8", "Long-term", Goal, "#8B5CF6"),
            Tag::new("tag_10", "Retirement", Goal, "#6366F1"),
            Tag::new("tag_11", "House Deposit", Goal, "#EC4899"),
            Tag::new("tag_17", "Conservative", Risk, "#22C55E"),
            Tag::new("tag_18", "Aggressive", Risk, "#F97316"),
            Tag::new("tag_22", "ASX 200", Market, "#0EA5E9"),
            Tag::new("tag_23", "Australian Small Caps", Market, "#14B8A6"),
            Tag::new("tag_25", "US Markets", Market, "#A855F7"),
            Tag::new("tag_26", "Tax Loss Harvesting", Tax, "#F59E0B"),
            Tag::new("tag_29", "Negative Gearing", Tax, "#84CC16"),
        ])
    }
}

impl TagCatalog {
    #[must_use]
    pub fn new(tags: Vec<Tag>) -> Self {
        Self { tags }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// Fails on the first holding that references a tag missing from the catalog.
    pub fn validate(&self, portfolio: &Portfolio) -> Result<(), TagError> {
        for holding in portfolio.holdings() {
            if let Some(missing) = holding.tags().iter().find(|id| self.get(id).is_none()) {
                return Err(TagError::UnknownTag {
                    class: holding.class().singular(),
                    holding: holding.display_name().to_string(),
                    tag: missing.clone(),
                });
            }
        }
        Ok(())
    }

    /// Per-tag totals, sorted by value descending. Tags nobody uses are skipped.
    ///
    /// Stricter than a per-tag filter: one unknown tag id fails the whole call.
    pub fn summaries(&self, portfolio: &Portfolio) -> Result<Vec<TaggedAssetSummary>, TagError> {
        self.validate(portfolio)?;

        let mut summaries = Vec::new();
        for tag in &self.tags {
            let tagged: Vec<&dyn Holding> = portfolio
                .holdings()
                .filter(|h| h.tags().iter().any(|id| *id == tag.id))
                .collect();
            if tagged.is_empty() {
                continue;
            }

            let count = |class: AssetClass| tagged.iter().filter(|h| h.class() == class).count();
            let total_value: f64 = tagged.iter().map(|h| h.total_value()).sum();
            let total_return: f64 = tagged.iter().map(|h| h.total_return()).sum();

            let mut ranked: Vec<PerformerRef> = tagged
                .iter()
                .map(|h| PerformerRef {
                    name: h.display_name().to_string(),
                    class: h.class(),
                    return_percentage: h.return_percentage().unwrap_or(0.0),
                })
                .collect();
            ranked.sort_by(|a, b| b.return_percentage.total_cmp(&a.return_percentage));

            summaries.push(TaggedAssetSummary {
                tag_id: tag.id.clone(),
                tag_name: tag.name.clone(),
                tag_color: tag.color.clone(),
                stocks_count: count(AssetClass::Stock),
                etfs_count: count(AssetClass::Etf),
                properties_count: count(AssetClass::Property),
                total_value,
                total_return,
                return_percentage: if total_value > 0.0 {
                    return_on_invested(total_value, total_return)
                } else {
                    0.0
                },
                best_performer: ranked.first().cloned(),
                worst_performer: ranked.last().cloned(),
            });
        }

        TagSort::Value.apply(&mut summaries);
        Ok(summaries)
    }
}
