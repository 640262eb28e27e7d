use folio_types::FeatureFlags;

/// A dashboard section with its own fault boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Overview,
    Allocation,
    TagAnalytics,
    Performers,
    Holdings,
    Activity,
}

impl Panel {
    pub const ALL: [Panel; 6] = [
        Panel::Overview,
        Panel::Allocation,
        Panel::TagAnalytics,
        Panel::Performers,
        Panel::Holdings,
        Panel::Activity,
    ];

    pub const COUNT: usize = Self::ALL.len();

    /// Section name, shown in the panel title and in its fallback.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Panel::Overview => "Portfolio Overview",
            Panel::Allocation => "Group Asset Allocation",
            Panel::TagAnalytics => "Tag Analytics",
            Panel::Performers => "Top Performers",
            Panel::Holdings => "Holdings",
            Panel::Activity => "Recent Activity",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Panel::Overview => 0,
            Panel::Allocation => 1,
            Panel::TagAnalytics => 2,
            Panel::Performers => 3,
            Panel::Holdings => 4,
            Panel::Activity => 5,
        }
    }

    #[must_use]
    pub const fn is_enabled(self, features: FeatureFlags) -> bool {
        match self {
            Panel::TagAnalytics => features.analytics,
            Panel::Performers => features.benchmarking,
            Panel::Overview | Panel::Allocation | Panel::Holdings | Panel::Activity => true,
        }
    }
}
