//! Core domain types for Folio.
//!
//! Pure data with no IO, no terminal and no async: holdings, tags, groups,
//! aggregates, money formatting and resolved settings. Every other crate in
//! the workspace builds on these.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)] // counts and money are well within f64 range

mod filter;
mod format;
mod group;
mod holding;
mod settings;
mod summary;
mod tag;

pub use filter::HoldingFilter;
pub use format::{format_compact_currency, format_currency, format_signed_percent};
pub use group::{
    GroupActivity, GroupAggregation, GroupKind, GroupMember, MemberRole, MemberStatus,
    PortfolioGroup, PortfolioPerformance,
};
pub use holding::{
    AnnualFigure, AssetClass, Etf, Holding, Portfolio, Property, PropertyKind, Stock,
};
pub use settings::{
    BuildMode, DataSource, FeatureFlags, ParseBuildModeError, Settings, UiOptions,
};
pub use summary::{
    AllocationSlice, ClassTotals, InvestmentSummary, PerformanceItem, return_on_invested,
};
pub use tag::{
    PerformerRef, Tag, TagCatalog, TagCategory, TagError, TagSort, TaggedAssetSummary,
    parse_hex_color,
};
