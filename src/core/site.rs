use crate::core::loader::{ContentLoader, LoadOutcome, LoadReport};
use crate::core::rotator::{QuoteRotator, DEFAULT_QUOTE_INTERVAL, MIN_QUOTE_INTERVAL};
use crate::core::state::{SiteState, StateHandle, Theme};
use crate::core::submission::{self, SubmitReceipt};
use crate::core::view::PageView;
use crate::domain::ports::DataStore;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Top-level controller: owns the state, the loader and the quote timer,
/// and exposes the visitor actions.
pub struct Site<D: DataStore> {
    loader: ContentLoader<D>,
    rotator: Option<QuoteRotator>,
    quote_interval: Duration,
}

impl<D: DataStore> Site<D> {
    pub fn new(store: D) -> Self {
        Self {
            loader: ContentLoader::new(Arc::new(store), StateHandle::default()),
            rotator: None,
            quote_interval: DEFAULT_QUOTE_INTERVAL,
        }
    }

    /// Sets the quote period; anything shorter than a millisecond is raised
    /// to one.
    pub fn with_quote_interval(mut self, interval: Duration) -> Self {
        self.quote_interval = interval.max(MIN_QUOTE_INTERVAL);
        self
    }

    pub fn loader(&self) -> &ContentLoader<D> {
        &self.loader
    }

    pub fn state(&self) -> &StateHandle {
        self.loader.state()
    }

    /// Mounts the page: starts the quote timer and runs the four startup
    /// loads.
    pub async fn start(&mut self) -> LoadReport {
        self.start_rotator();
        self.loader.load_all().await
    }

    /// Starts the quote timer unless it is already running.
    pub fn start_rotator(&mut self) {
        if self.rotator.as_ref().is_some_and(QuoteRotator::is_running) {
            return;
        }
        self.rotator = Some(QuoteRotator::start(
            self.loader.state().clone(),
            self.quote_interval,
        ));
    }

    pub fn rotator_running(&self) -> bool {
        self.rotator.as_ref().is_some_and(QuoteRotator::is_running)
    }

    /// Tears the page down. Requests already in flight are left to finish.
    pub fn stop(&mut self) {
        if let Some(rotator) = self.rotator.take() {
            rotator.stop();
        }
    }

    pub fn snapshot(&self) -> SiteState {
        self.state().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SiteState> {
        self.state().subscribe()
    }

    pub fn view(&self) -> PageView {
        self.state().read(PageView::from_state)
    }

    pub async fn reload_reviews(&self) -> LoadOutcome {
        self.loader.load_reviews().await
    }

    pub fn next_page(&self) -> bool {
        self.state().update_if(SiteState::next_page)
    }

    pub fn prev_page(&self) -> bool {
        self.state().update_if(SiteState::prev_page)
    }

    /// Steps forward up to `page` (zero-based), stopping on the last page.
    pub fn go_to_page(&self, page: usize) -> usize {
        while self.state().read(|s| s.review_page) < page && self.next_page() {}
        self.state().read(|s| s.review_page)
    }

    pub fn toggle_theme(&self) -> Theme {
        self.state().update(|s| s.theme = s.theme.toggled());
        self.state().read(|s| s.theme)
    }

    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        self.state().update(|s| s.form.set_name(name));
    }

    pub fn set_review(&self, review: impl Into<String>) {
        let review = review.into();
        self.state().update(|s| s.form.set_review(review));
    }

    pub fn set_rating(&self, rating: i32) -> Result<()> {
        let mut result = Ok(());
        self.state().update_if(|s| {
            result = s.form.set_rating(rating);
            result.is_ok()
        });
        result
    }

    pub async fn submit_review(&self) -> Result<SubmitReceipt> {
        submission::submit_review(&self.loader).await
    }
}

impl<D: DataStore> Drop for Site<D> {
    fn drop(&mut self) {
        self.stop();
    }
}
