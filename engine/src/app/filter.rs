//! Holdings search and tag filter.

use folio_types::{Holding, HoldingFilter, Tag};

use super::App;
use crate::panel::Panel;
use crate::status::StatusKind;

impl App {
    #[must_use]
    pub fn holdings_filter(&self) -> &HoldingFilter {
        &self.holdings_filter
    }

    /// Whether typed characters go to the filter instead of key bindings.
    #[must_use]
    pub fn is_editing_filter(&self) -> bool {
        self.editing_filter
    }

    /// Holdings that pass the current filter, in class order.
    pub fn filtered_holdings(&self) -> impl Iterator<Item = &dyn Holding> {
        self.holdings_filter.apply(&self.snapshot.portfolio)
    }

    pub fn start_filter_edit(&mut self) {
        self.editing_filter = true;
        if self.visible_panels().contains(&Panel::Holdings) {
            self.focus = Panel::Holdings;
        }
        self.set_status(
            StatusKind::Info,
            "Filter holdings: type to search, Enter to keep, Esc to clear",
        );
    }

    pub fn filter_push(&mut self, c: char) {
        if self.editing_filter {
            self.holdings_filter.push(c);
        }
    }

    pub fn filter_pop(&mut self) {
        if self.editing_filter {
            self.holdings_filter.pop();
        }
    }

    /// Leave edit mode. `keep = false` drops the whole filter, tag included.
    pub fn finish_filter_edit(&mut self, keep: bool) {
        self.editing_filter = false;
        if !keep {
            self.holdings_filter.clear();
            self.set_status(StatusKind::Info, "Filter cleared");
            return;
        }
        let shown = self.filtered_holdings().count();
        let total = self.snapshot.portfolio.len();
        tracing::debug!(query = self.holdings_filter.query(), shown, total, "Holdings filtered");
        self.set_status(StatusKind::Info, format!("Showing {shown} of {total} holdings"));
    }

    /// Tags some holding carries, in catalogue order.
    fn tags_in_use(&self) -> Vec<&Tag> {
        let portfolio = &self.snapshot.portfolio;
        self.snapshot
            .tags
            .iter()
            .filter(|tag| portfolio.holdings().any(|h| h.tags().contains(&tag.id)))
            .collect()
    }

    /// Step the tag filter through the tags in use, then back to none.
    pub fn cycle_holdings_tag(&mut self) {
        let tags = self.tags_in_use();
        let next = match self.holdings_filter.tag() {
            None => tags.first(),
            Some(current) => tags
                .iter()
                .position(|t| t.id == current)
                .and_then(|i| tags.get(i + 1)),
        }
        .map(|t| (t.id.clone(), t.name.clone()));

        match next {
            Some((id, name)) => {
                self.holdings_filter.set_tag(Some(id));
                self.set_status(StatusKind::Info, format!("Holdings tagged {name}"));
            }
            None => {
                self.holdings_filter.set_tag(None);
                self.set_status(StatusKind::Info, "Tag filter cleared");
            }
        }
    }

    /// Catalogue entry of the active tag filter.
    ///
    /// `None` also when a reload dropped the tag from the catalogue; the
    /// filter still applies by id.
    #[must_use]
    pub fn holdings_tag(&self) -> Option<&Tag> {
        self.snapshot.tags.get(self.holdings_filter.tag()?)
    }
}
