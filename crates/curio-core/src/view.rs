//! # View Pipeline
//!
//! Turns the canonical item list into the ordered sequence the UI renders.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  &[Item] ──► 1. draft filter   draft mode: drafts only                 │
//! │                                otherwise:  drafts hidden                │
//! │          ──► 2. search         name / series / brand contain the term  │
//! │                                (case-insensitive, taken verbatim)       │
//! │          ──► 3. status filter  skipped in draft mode                   │
//! │          ──► 4. stable sort    name ↑↓, date ↑↓, favorites first       │
//! │          ──► Vec<&Item>        borrowed, never mutated                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`apply`] is pure: same inputs, same output, no side effects.
//! [`ViewControls`] holds the UI state feeding it and enforces the rules that
//! tie draft mode and the status filter together.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Item, ItemStatus};

// =============================================================================
// Sort Option
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SortOption {
    #[default]
    #[serde(rename = "name-asc")]
    NameAsc,
    #[serde(rename = "name-desc")]
    NameDesc,
    #[serde(rename = "date-asc")]
    DateAsc,
    #[serde(rename = "date-desc")]
    DateDesc,
    #[serde(rename = "favorites")]
    FavoritesFirst,
}

impl SortOption {
    pub const ALL: &'static [SortOption] = &[
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::DateAsc,
        SortOption::DateDesc,
        SortOption::FavoritesFirst,
    ];

    /// Machine value, as persisted or passed around by the UI.
    pub const fn value(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
            SortOption::DateAsc => "date-asc",
            SortOption::DateDesc => "date-desc",
            SortOption::FavoritesFirst => "favorites",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "Name (A-Z)",
            SortOption::NameDesc => "Name (Z-A)",
            SortOption::DateAsc => "Date (Oldest)",
            SortOption::DateDesc => "Date (Newest)",
            SortOption::FavoritesFirst => "Favorites First",
        }
    }
}

impl FromStr for SortOption {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .iter()
            .copied()
            .find(|option| option.value() == s.trim())
            .ok_or_else(|| {
                ValidationError::not_allowed("sort", SortOption::ALL.iter().map(|o| o.value()))
            })
    }
}

// =============================================================================
// Status Filter
// =============================================================================

/// The status dropdown: everything, or a single status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ItemStatus),
}

impl StatusFilter {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => item.status == *status,
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Items",
            StatusFilter::Only(status) => status.label(),
        }
    }
}

/// `"all"` or a status label.
impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("all"),
            StatusFilter::Only(status) => f.write_str(status.label()),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "all" {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

// =============================================================================
// Query + Pipeline
// =============================================================================

/// Everything [`apply`] needs besides the items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub status_filter: StatusFilter,
    pub draft_mode: bool,
    pub sort: SortOption,
}

/// Runs the full pipeline over `items`.
///
/// ## Example
/// ```rust
/// use curio_core::view::{apply, ViewQuery};
///
/// let visible = apply(&[], &ViewQuery::default());
/// assert!(visible.is_empty());
/// ```
pub fn apply<'a>(items: &'a [Item], query: &ViewQuery) -> Vec<&'a Item> {
    let needle = query.search.to_lowercase();

    let mut visible: Vec<&Item> = items
        .iter()
        .filter(|item| item.is_draft == query.draft_mode)
        .filter(|item| item.matches_search(&needle))
        .filter(|item| query.draft_mode || query.status_filter.matches(item))
        .collect();

    // Every sort below is stable.
    match query.sort {
        SortOption::NameAsc => visible.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortOption::NameDesc => visible.sort_by(|a, b| compare_names(&b.name, &a.name)),
        SortOption::DateAsc => {
            visible.sort_by_cached_key(|item| parse_acquired_date(&item.acquired_date))
        }
        SortOption::DateDesc => visible
            .sort_by_cached_key(|item| std::cmp::Reverse(parse_acquired_date(&item.acquired_date))),
        SortOption::FavoritesFirst => visible.sort_by_key(|item| !item.is_favorite),
    }

    visible
}

/// Locale-style name ordering.
///
/// Case is ignored first; on a tie lowercase sorts before uppercase, so
/// `"apple" < "Apple" < "banana"`.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Parses an acquired date for sorting.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps. Anything else, including an
/// empty string, sorts as 1970-01-01.
pub fn parse_acquired_date(raw: &str) -> NaiveDate {
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .unwrap_or_default()
}

// =============================================================================
// Empty State
// =============================================================================

/// Why the rendered grid is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The store holds no items at all.
    EmptyCollection,
    /// Items exist but none survive the current filters.
    NoMatches,
}

impl EmptyState {
    pub const fn message(&self) -> &'static str {
        match self {
            EmptyState::EmptyCollection => "Your collection is empty. Add your first item!",
            EmptyState::NoMatches => "No items match your search.",
        }
    }
}

/// `None` when there is something to show.
pub fn empty_state(items: &[Item], visible: &[&Item]) -> Option<EmptyState> {
    if !visible.is_empty() {
        None
    } else if items.is_empty() {
        Some(EmptyState::EmptyCollection)
    } else {
        Some(EmptyState::NoMatches)
    }
}

// =============================================================================
// View Controls
// =============================================================================

/// UI state of the search box, status dropdown, drafts toggle and sort menu.
///
/// ## Rules
/// - The drafts toggle only exists while at least one draft exists
/// - Entering draft mode resets the status filter to "all"
/// - The status dropdown is disabled in draft mode
/// - Draft mode ends by itself once the last draft is gone
#[derive(Debug, Clone, Default)]
pub struct ViewControls {
    query: ViewQuery,
}

impl ViewControls {
    pub fn new() -> Self {
        ViewControls::default()
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn draft_mode(&self) -> bool {
        self.query.draft_mode
    }

    pub fn set_search(&mut self, term: &str) {
        self.query.search = term.to_string();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.query.sort = sort;
    }

    /// Whether the status dropdown accepts input.
    pub fn status_filter_enabled(&self) -> bool {
        !self.query.draft_mode
    }

    /// Changes the status filter.
    ///
    /// ## Returns
    /// `false` (and no change) while draft mode is on.
    pub fn set_status_filter(&mut self, filter: StatusFilter) -> bool {
        if !self.status_filter_enabled() {
            return false;
        }
        self.query.status_filter = filter;
        true
    }

    /// Whether the drafts toggle should be offered at all.
    pub fn drafts_toggle_visible(items: &[Item]) -> bool {
        items.iter().any(|item| item.is_draft)
    }

    /// Flips draft mode.
    ///
    /// Entering draft mode is refused when there are no drafts; it also
    /// resets the status filter to "all".
    ///
    /// ## Returns
    /// The new draft-mode flag.
    pub fn toggle_drafts(&mut self, items: &[Item]) -> bool {
        if self.query.draft_mode {
            self.query.draft_mode = false;
        } else if Self::drafts_toggle_visible(items) {
            self.query.draft_mode = true;
            self.query.status_filter = StatusFilter::All;
        }
        self.query.draft_mode
    }

    /// Re-checks the rules against the current items; call after every
    /// mutation.
    pub fn reconcile(&mut self, items: &[Item]) {
        if self.query.draft_mode && !Self::drafts_toggle_visible(items) {
            self.query.draft_mode = false;
        }
    }

    /// Runs the pipeline with the current controls.
    pub fn apply<'a>(&self, items: &'a [Item]) -> Vec<&'a Item> {
        apply(items, &self.query)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
