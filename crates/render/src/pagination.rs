//! Per-widget load-more state.
//!
//! [`WidgetRuntimeState`] tracks the reviews fetched so far, how many are
//! displayed, and the server-reported total. Its transitions are pure;
//! [`load_more`] drives them around the network call without holding the
//! lock across the await.

use std::sync::{Mutex, PoisonError};

use plaudit_fetch::{FetchError, WidgetDataClient};
use plaudit_protocol::{Layout, PageSize, ReviewRecord, WidgetPayload};
use tracing::{debug, instrument};

use crate::context::RenderContext;
use crate::markup::Element;
use crate::variants;

/// A page to fetch next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Offset of the first review, equal to the number already loaded.
    pub offset: usize,
    /// Number of reviews to request.
    pub limit: usize,
}

/// What a "Load More" click should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStep {
    /// A fetch is already in flight.
    Busy,
    /// Nothing left to show.
    Exhausted,
    /// Already-fetched reviews were revealed; no fetch needed.
    Revealed,
    /// Fetch this page, then call
    /// [`complete_load_more`](WidgetRuntimeState::complete_load_more).
    Fetch(PageRequest),
}

/// Derived state of the "Load More" / "Show Less" controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadMoreButton {
    /// Whether "Load More" is disabled.
    pub disabled: bool,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Whether "Show Less" is offered.
    pub show_less: bool,
    /// Whether "Show More" is offered: everything is loaded but some
    /// reviews were hidden by "Show Less".
    pub show_more: bool,
}

impl LoadMoreButton {
    /// The button label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.loading {
            "Loading..."
        } else if self.disabled {
            "No More Reviews"
        } else {
            "Load More"
        }
    }
}

/// Load-more state of one rendered widget.
///
/// Invariant: `loaded_reviews.len() <= total_review_count` and
/// `display_count <= loaded_reviews.len()`.
///
/// # Examples
///
/// ```
/// use plaudit_protocol::{Layout, ReviewRecord, WidgetPayload};
/// use plaudit_render::{LoadStep, PageRequest, WidgetRuntimeState};
///
/// let first = WidgetPayload {
///     reviews: (0..5).map(|i| ReviewRecord::new(format!("R{i}"), 5.0, "ok")).collect(),
///     total_review_count: Some(7),
///     ..WidgetPayload::default()
/// };
/// let mut state = WidgetRuntimeState::new("w", Layout::List, &first);
/// assert!(!state.button().disabled);
///
/// let step = state.begin_load_more();
/// assert_eq!(step, LoadStep::Fetch(PageRequest { offset: 5, limit: 5 }));
/// assert_eq!(state.begin_load_more(), LoadStep::Busy);
///
/// let next = WidgetPayload {
///     reviews: (5..7).map(|i| ReviewRecord::new(format!("R{i}"), 4.0, "ok")).collect(),
///     ..WidgetPayload::default()
/// };
/// state.complete_load_more(next);
/// assert_eq!(state.loaded_reviews.len(), 7);
/// assert!(state.button().disabled);
/// ```
#[derive(Debug, Clone)]
pub struct WidgetRuntimeState {
    /// Widget id used for subsequent fetches.
    pub widget_id: String,
    /// Layout the state belongs to.
    pub layout: Layout,
    /// Every review fetched so far, in server order. Append only.
    pub loaded_reviews: Vec<ReviewRecord>,
    /// Total reported by the server, never below the loaded count.
    pub total_review_count: usize,
    /// How many loaded reviews are displayed.
    pub display_count: usize,
    /// Guard against overlapping "Load More" fetches.
    pub is_fetching: bool,
    page_size: PageSize,
}

impl WidgetRuntimeState {
    /// Creates the state from the first fetched page.
    #[must_use]
    pub fn new(widget_id: impl Into<String>, layout: Layout, first_page: &WidgetPayload) -> Self {
        let page_size = layout.page_size();
        let loaded_reviews = first_page.reviews.clone();
        let total_review_count = first_page.total_or_loaded().max(loaded_reviews.len());
        let display_count = if layout.supports_load_more() {
            page_size.initial.min(loaded_reviews.len())
        } else {
            loaded_reviews.len()
        };
        Self {
            widget_id: widget_id.into(),
            layout,
            loaded_reviews,
            total_review_count,
            display_count,
            is_fetching: false,
            page_size,
        }
    }

    /// The offset of the next page.
    #[must_use]
    pub fn current_offset(&self) -> usize {
        self.loaded_reviews.len()
    }

    /// Displayed reviews that have text.
    #[must_use]
    pub fn visible_reviews(&self) -> Vec<&ReviewRecord> {
        self.loaded_reviews[..self.display_count]
            .iter()
            .filter(|review| review.has_text())
            .collect()
    }

    /// Every loaded review that has text.
    #[must_use]
    pub fn displayable_reviews(&self) -> Vec<&ReviewRecord> {
        self.loaded_reviews
            .iter()
            .filter(|review| review.has_text())
            .collect()
    }

    /// Returns `true` when the server has nothing more to send.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.total_review_count <= self.loaded_reviews.len()
    }

    /// Derives the controls from the current state.
    #[must_use]
    pub fn button(&self) -> LoadMoreButton {
        let exhausted = self.is_exhausted();
        LoadMoreButton {
            disabled: exhausted,
            loading: self.is_fetching,
            show_less: self.display_count > self.page_size.initial,
            show_more: exhausted && self.display_count < self.loaded_reviews.len(),
        }
    }

    /// Starts a "Load More".
    ///
    /// Reviews hidden by [`show_less`](Self::show_less) are revealed first.
    /// Otherwise, unless a fetch is in flight or the list is exhausted, the
    /// fetch guard is set and the page to request is returned.
    pub fn begin_load_more(&mut self) -> LoadStep {
        if self.is_fetching {
            return LoadStep::Busy;
        }
        if self.reveal_more() {
            return LoadStep::Revealed;
        }
        if self.is_exhausted() {
            return LoadStep::Exhausted;
        }

        self.is_fetching = true;
        let remaining = self.total_review_count - self.loaded_reviews.len();
        LoadStep::Fetch(PageRequest {
            offset: self.current_offset(),
            limit: self.increment().min(remaining),
        })
    }

    /// Appends a fetched page and clears the fetch guard.
    ///
    /// Never loads beyond the total. An empty page marks the list as
    /// exhausted so the button cannot loop forever.
    pub fn complete_load_more(&mut self, page: WidgetPayload) {
        self.is_fetching = false;
        if let Some(total) = page.total_review_count {
            self.total_review_count = total.max(self.loaded_reviews.len());
        }

        let room = self.total_review_count - self.loaded_reviews.len();
        if page.reviews.is_empty() || room == 0 {
            debug!(loaded = self.loaded_reviews.len(), "no more reviews");
            self.total_review_count = self.loaded_reviews.len();
        } else {
            self.loaded_reviews
                .extend(page.reviews.into_iter().take(room));
        }
        self.display_count = self.loaded_reviews.len();
    }

    /// Clears the fetch guard after a failed fetch.
    pub fn fail_load_more(&mut self) {
        self.is_fetching = false;
    }

    /// Collapses the list back to the initial page size. Fetched reviews
    /// are kept.
    pub fn show_less(&mut self) {
        self.display_count = self.page_size.initial.min(self.loaded_reviews.len());
    }

    /// Displays one more page of already-fetched reviews. Returns `false`
    /// if none were hidden.
    pub fn reveal_more(&mut self) -> bool {
        if self.display_count >= self.loaded_reviews.len() {
            return false;
        }
        self.display_count = (self.display_count + self.increment()).min(self.loaded_reviews.len());
        true
    }

    fn increment(&self) -> usize {
        self.page_size.increment.max(1)
    }
}

/// Result of [`load_more`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadMoreOutcome {
    /// The list changed; replace the subtree with this one.
    Updated(Element),
    /// Nothing to do (fetch in flight or exhausted).
    Unchanged,
}

/// Result of [`show_less`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShowLessOutcome {
    /// The collapsed list subtree.
    pub subtree: Element,
    /// Element to scroll into view.
    pub scroll_to: String,
}

/// Fetches the next page and returns the re-rendered list subtree.
///
/// The state lock is released while the request is in flight; a second
/// call during that time returns [`LoadMoreOutcome::Unchanged`].
///
/// # Errors
///
/// Returns the fetch error once retries are exhausted. The state is left
/// as it was, with the fetch guard cleared.
#[instrument(skip_all, fields(widget_id = tracing::field::Empty))]
pub async fn load_more(
    state: &Mutex<WidgetRuntimeState>,
    client: &WidgetDataClient,
    ctx: &RenderContext,
) -> Result<LoadMoreOutcome, FetchError> {
    let (step, widget_id, layout) = {
        let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
        tracing::Span::current().record("widget_id", guard.widget_id.as_str());
        (guard.begin_load_more(), guard.widget_id.clone(), guard.layout)
    };

    let request = match step {
        LoadStep::Busy | LoadStep::Exhausted => return Ok(LoadMoreOutcome::Unchanged),
        LoadStep::Revealed => {
            let guard = state.lock().unwrap_or_else(PoisonError::into_inner);
            return Ok(LoadMoreOutcome::Updated(variants::reviews_subtree(&guard, ctx)));
        }
        LoadStep::Fetch(request) => request,
    };

    debug!(offset = request.offset, limit = request.limit, "loading more reviews");
    let page = client
        .fetch_page(&widget_id, layout, request.offset, request.limit)
        .await;

    let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
    match page {
        Ok(page) => {
            guard.complete_load_more(page);
            Ok(LoadMoreOutcome::Updated(variants::reviews_subtree(&guard, ctx)))
        }
        Err(err) => {
            guard.fail_load_more();
            Err(err)
        }
    }
}

/// Reveals hidden reviews without fetching and returns the re-rendered
/// list subtree, or `None` if nothing was hidden.
pub fn show_more(state: &Mutex<WidgetRuntimeState>, ctx: &RenderContext) -> Option<Element> {
    let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
    guard
        .reveal_more()
        .then(|| variants::reviews_subtree(&guard, ctx))
}

/// Collapses the list and returns the subtree plus the element to scroll
/// into view.
pub fn show_less(state: &Mutex<WidgetRuntimeState>, ctx: &RenderContext) -> ShowLessOutcome {
    let mut guard = state.lock().unwrap_or_else(PoisonError::into_inner);
    guard.show_less();
    ShowLessOutcome {
        subtree: variants::reviews_subtree(&guard, ctx),
        scroll_to: ctx.container_id.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(range: std::ops::Range<usize>, total: Option<usize>) -> WidgetPayload {
        WidgetPayload {
            reviews: range
                .map(|i| ReviewRecord::new(format!("R{i}"), 5.0, "text"))
                .collect(),
            total_review_count: total,
            ..WidgetPayload::default()
        }
    }

    #[test]
    fn initial_display_uses_page_size() {
        let state = WidgetRuntimeState::new("w", Layout::Bar, &page(0..10, Some(30)));
        assert_eq!(state.display_count, 4);
        assert_eq!(state.visible_reviews().len(), 4);

        let grid = WidgetRuntimeState::new("w", Layout::Grid, &page(0..10, Some(30)));
        assert_eq!(grid.display_count, 10);
    }

    #[test]
    fn never_loads_past_total() {
        let mut state = WidgetRuntimeState::new("w", Layout::List, &page(0..5, Some(7)));
        let LoadStep::Fetch(request) = state.begin_load_more() else {
            panic!("expected a fetch");
        };
        assert_eq!(request, PageRequest { offset: 5, limit: 2 });

        state.complete_load_more(page(5..10, None));
        assert_eq!(state.loaded_reviews.len(), 7);
        assert!(state.button().disabled);
        assert_eq!(state.begin_load_more(), LoadStep::Exhausted);
    }

    #[test]
    fn empty_page_exhausts() {
        let mut state = WidgetRuntimeState::new("w", Layout::List, &page(0..5, Some(50)));
        assert!(matches!(state.begin_load_more(), LoadStep::Fetch(_)));
        state.complete_load_more(page(0..0, None));
        assert_eq!(state.total_review_count, 5);
        assert!(state.button().disabled);
    }

    #[test]
    fn failure_clears_guard() {
        let mut state = WidgetRuntimeState::new("w", Layout::List, &page(0..5, Some(50)));
        assert!(matches!(state.begin_load_more(), LoadStep::Fetch(_)));
        assert!(state.button().loading);
        state.fail_load_more();
        assert!(matches!(state.begin_load_more(), LoadStep::Fetch(_)));
    }

    #[test]
    fn show_less_keeps_fetched_reviews() {
        let mut state = WidgetRuntimeState::new("w", Layout::List, &page(0..5, Some(12)));
        state.begin_load_more();
        state.complete_load_more(page(5..10, None));
        assert!(state.button().show_less);

        state.show_less();
        assert_eq!(state.display_count, 5);
        assert_eq!(state.loaded_reviews.len(), 10);
        assert!(!state.button().show_less);

        // Hidden reviews come back without a fetch.
        assert_eq!(state.begin_load_more(), LoadStep::Revealed);
        assert_eq!(state.display_count, 10);
        assert!(!state.is_fetching);
    }

    #[test]
    fn fully_loaded_list_stays_disabled_after_show_less() {
        let mut state = WidgetRuntimeState::new("w", Layout::List, &page(0..5, Some(10)));
        state.begin_load_more();
        state.complete_load_more(page(5..10, None));
        state.show_less();

        let button = state.button();
        assert_eq!(state.display_count, 5);
        assert!(button.disabled);
        assert_eq!(button.label(), "No More Reviews");
        assert!(button.show_more);

        assert!(state.reveal_more());
        assert_eq!(state.display_count, 10);
        assert!(!state.button().show_more);
        assert!(!state.reveal_more());
    }

    #[test]
    fn label_follows_state() {
        let mut state = WidgetRuntimeState::new("w", Layout::List, &page(0..5, Some(6)));
        assert_eq!(state.button().label(), "Load More");
        state.begin_load_more();
        assert_eq!(state.button().label(), "Loading...");
        state.complete_load_more(page(5..6, None));
        assert_eq!(state.button().label(), "No More Reviews");
    }
}
