use crate::core::pagination::{self, REVIEWS_PER_PAGE};
use crate::core::rotator;
use crate::core::submission::ReviewForm;
use crate::domain::model::{GalleryImage, Quote, Review, Service};
use std::sync::Arc;
use tokio::sync::watch;

/// One loaded collection plus the bookkeeping that keeps a slow, older
/// request from overwriting a newer result.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    items: Vec<T>,
    issued: u64,
    applied: u64,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            issued: 0,
            applied: 0,
        }
    }
}

impl<T> Slot<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sequence number for a request about to be issued.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether a completion tagged `seq` is newer than what is applied.
    pub fn is_current(&self, seq: u64) -> bool {
        seq > self.applied
    }

    /// Replaces the items wholesale unless `seq` is stale.
    pub fn replace(&mut self, seq: u64, items: Vec<T>) -> bool {
        if !self.is_current(seq) {
            return false;
        }
        self.items = items;
        self.applied = seq;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SiteState {
    pub services: Slot<Service>,
    pub quotes: Slot<Quote>,
    pub gallery: Slot<GalleryImage>,
    pub reviews: Slot<Review>,
    pub quote_index: usize,
    pub review_page: usize,
    pub form: ReviewForm,
    /// The single visitor-facing message, shared by reviews loading and
    /// submission.
    pub error: Option<String>,
    /// True until the first reviews load settles.
    pub loading: bool,
    pub theme: Theme,
}

impl Default for SiteState {
    fn default() -> Self {
        Self {
            services: Slot::default(),
            quotes: Slot::default(),
            gallery: Slot::default(),
            reviews: Slot::default(),
            quote_index: 0,
            review_page: 0,
            form: ReviewForm::default(),
            error: None,
            loading: true,
            theme: Theme::default(),
        }
    }
}

impl SiteState {
    pub fn current_quote(&self) -> Option<&Quote> {
        self.quotes.items().get(self.quote_index)
    }

    /// Returns false when there is nothing to rotate through.
    pub fn advance_quote(&mut self) -> bool {
        let len = self.quotes.len();
        if len == 0 {
            return false;
        }
        self.quote_index = rotator::next_index(self.quote_index, len);
        true
    }

    pub fn current_reviews(&self) -> &[Review] {
        pagination::page_items(self.reviews.items(), self.review_page, REVIEWS_PER_PAGE)
    }

    pub fn page_count(&self) -> usize {
        pagination::page_count(self.reviews.len(), REVIEWS_PER_PAGE)
    }

    pub fn has_next_page(&self) -> bool {
        pagination::has_next(self.review_page, self.reviews.len(), REVIEWS_PER_PAGE)
    }

    pub fn has_prev_page(&self) -> bool {
        pagination::has_prev(self.review_page)
    }

    pub fn next_page(&mut self) -> bool {
        if !self.has_next_page() {
            return false;
        }
        self.review_page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if !self.has_prev_page() {
            return false;
        }
        self.review_page -= 1;
        true
    }

    pub fn clamp_review_page(&mut self) {
        self.review_page =
            pagination::clamp_page(self.review_page, self.reviews.len(), REVIEWS_PER_PAGE);
    }
}

/// Shared owner of the site state. Writers go through update closures,
/// readers get snapshots or a change-notifying receiver.
#[derive(Debug, Clone)]
pub struct StateHandle {
    tx: Arc<watch::Sender<SiteState>>,
}

impl Default for StateHandle {
    fn default() -> Self {
        Self::new(SiteState::default())
    }
}

impl StateHandle {
    pub fn new(state: SiteState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self { tx: Arc::new(tx) }
    }

    pub fn update(&self, f: impl FnOnce(&mut SiteState)) {
        self.tx.send_modify(f);
    }

    /// Like `update`, but subscribers are only woken when `f` returns true.
    pub fn update_if(&self, f: impl FnOnce(&mut SiteState) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }

    pub fn snapshot(&self) -> SiteState {
        self.tx.borrow().clone()
    }

    /// Reads a piece of state without cloning the whole snapshot.
    pub fn read<R>(&self, f: impl FnOnce(&SiteState) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<SiteState> {
        self.tx.subscribe()
    }
}
