use crate::core::state::{SiteState, Slot, StateHandle};
use crate::domain::model::{Collection, GalleryImage, Quote, Review, Service};
use crate::domain::ports::DataStore;
use crate::utils::error::{Result, SiteError};
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub const REVIEWS_LOAD_FAILED: &str = "Failed to load reviews. Please try again later.";

/// A record type the loader knows how to fetch and where to put.
pub trait Record: DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn slot(state: &mut SiteState) -> &mut Slot<Self>;

    /// Runs in the same update that applied fresh items.
    fn on_loaded(_state: &mut SiteState) {}

    /// Runs in the same update that recorded a (non-stale) failure.
    fn on_failed(_state: &mut SiteState) {}
}

impl Record for Service {
    const COLLECTION: Collection = Collection::Services;

    fn slot(state: &mut SiteState) -> &mut Slot<Self> {
        &mut state.services
    }
}

impl Record for Quote {
    const COLLECTION: Collection = Collection::Quotes;

    fn slot(state: &mut SiteState) -> &mut Slot<Self> {
        &mut state.quotes
    }
}

impl Record for GalleryImage {
    const COLLECTION: Collection = Collection::GalleryImages;

    fn slot(state: &mut SiteState) -> &mut Slot<Self> {
        &mut state.gallery
    }
}

impl Record for Review {
    const COLLECTION: Collection = Collection::Reviews;

    fn slot(state: &mut SiteState) -> &mut Slot<Self> {
        &mut state.reviews
    }

    fn on_loaded(state: &mut SiteState) {
        state.error = None;
        state.loading = false;
        state.clamp_review_page();
    }

    fn on_failed(state: &mut SiteState) {
        state.error = Some(REVIEWS_LOAD_FAILED.to_string());
        state.loading = false;
    }
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// Fresh items replaced the collection.
    Applied(usize),
    /// A newer request already settled; this completion was dropped.
    Stale,
    Failed(SiteError),
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied(_))
    }
}

#[derive(Debug)]
pub struct LoadReport {
    pub services: LoadOutcome,
    pub quotes: LoadOutcome,
    pub gallery_images: LoadOutcome,
    pub reviews: LoadOutcome,
}

impl LoadReport {
    pub fn failures(&self) -> Vec<(Collection, &SiteError)> {
        [
            (Collection::Services, &self.services),
            (Collection::Quotes, &self.quotes),
            (Collection::GalleryImages, &self.gallery_images),
            (Collection::Reviews, &self.reviews),
        ]
        .into_iter()
        .filter_map(|(collection, outcome)| match outcome {
            LoadOutcome::Failed(e) => Some((collection, e)),
            _ => None,
        })
        .collect()
    }
}

pub struct ContentLoader<D: DataStore> {
    store: Arc<D>,
    state: StateHandle,
}

impl<D: DataStore> Clone for ContentLoader<D> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            state: self.state.clone(),
        }
    }
}

impl<D: DataStore> ContentLoader<D> {
    pub fn new(store: Arc<D>, state: StateHandle) -> Self {
        Self { store, state }
    }

    pub fn store(&self) -> &D {
        &self.store
    }

    pub fn state(&self) -> &StateHandle {
        &self.state
    }

    async fn fetch<T: Record>(&self) -> Result<Vec<T>> {
        let rows = self.store.list(&T::COLLECTION.list_query()).await?;
        rows.into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<T>, _>>()
            .map_err(SiteError::from)
    }

    /// Fetches one collection and replaces it in state, unless a newer
    /// request for the same collection settled first.
    pub async fn load<T: Record>(&self) -> LoadOutcome {
        let mut seq = 0;
        // Issuing a request is invisible to readers, so nobody is woken.
        self.state.update_if(|s| {
            seq = T::slot(s).begin();
            false
        });

        match self.fetch::<T>().await {
            Ok(items) => {
                let count = items.len();
                let applied = self.state.update_if(|s| {
                    if !T::slot(s).replace(seq, items) {
                        return false;
                    }
                    T::on_loaded(s);
                    true
                });
                if applied {
                    tracing::debug!("Loaded {} {} (request #{})", count, T::COLLECTION, seq);
                    LoadOutcome::Applied(count)
                } else {
                    tracing::debug!("Discarding stale {} response (request #{})", T::COLLECTION, seq);
                    LoadOutcome::Stale
                }
            }
            Err(e) => {
                let current = self.state.update_if(|s| {
                    if !T::slot(s).is_current(seq) {
                        return false;
                    }
                    T::on_failed(s);
                    true
                });
                if !current {
                    tracing::debug!("Ignoring stale {} failure: {}", T::COLLECTION, e);
                    return LoadOutcome::Stale;
                }
                tracing::warn!("Error fetching {}: {}", T::COLLECTION, e);
                LoadOutcome::Failed(SiteError::LoadError {
                    collection: T::COLLECTION.to_string(),
                    message: e.to_string(),
                })
            }
        }
    }

    pub async fn load_services(&self) -> LoadOutcome {
        self.load::<Service>().await
    }

    pub async fn load_quotes(&self) -> LoadOutcome {
        self.load::<Quote>().await
    }

    pub async fn load_gallery_images(&self) -> LoadOutcome {
        self.load::<GalleryImage>().await
    }

    /// The one load wired to the visitor-facing message.
    pub async fn load_reviews(&self) -> LoadOutcome {
        self.load::<Review>().await
    }

    /// All four collections, concurrently; each applies as it completes.
    pub async fn load_all(&self) -> LoadReport {
        let (services, quotes, gallery_images, reviews) = tokio::join!(
            self.load_services(),
            self.load_quotes(),
            self.load_gallery_images(),
            self.load_reviews(),
        );
        let report = LoadReport {
            services,
            quotes,
            gallery_images,
            reviews,
        };
        for (collection, e) in report.failures() {
            tracing::info!("{} unavailable after startup load: {}", collection, e);
        }
        report
    }
}
