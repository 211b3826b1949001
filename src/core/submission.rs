use crate::core::loader::{ContentLoader, LoadOutcome};
use crate::domain::model::{Collection, NewReview};
use crate::domain::ports::DataStore;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{validate_range, validate_required};
use serde_json::Value;

pub const SUBMIT_FAILED: &str = "Failed to submit review. Please try again later.";
pub const DEFAULT_RATING: i32 = 5;
pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// The review being typed in, not yet sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewForm {
    pub name: String,
    pub review: String,
    pub rating: i32,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            review: String::new(),
            rating: DEFAULT_RATING,
        }
    }
}

impl ReviewForm {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_review(&mut self, review: impl Into<String>) {
        self.review = review.into();
    }

    /// Only the selector's values are accepted; anything else leaves the
    /// current rating alone.
    pub fn set_rating(&mut self, rating: i32) -> Result<()> {
        validate_range("Rating", rating, MIN_RATING, MAX_RATING)?;
        self.rating = rating;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Required-field check done at the input boundary.
    pub fn to_new_review(&self) -> Result<NewReview> {
        validate_required("Your Name", &self.name)?;
        validate_required("Your Review", &self.review)?;
        validate_range("Rating", self.rating, MIN_RATING, MAX_RATING)?;
        Ok(NewReview {
            name: self.name.clone(),
            review: self.review.clone(),
            rating: self.rating,
        })
    }
}

#[derive(Debug)]
pub struct SubmitReceipt {
    /// Id the store acknowledged, when it echoed the row back.
    pub id: Option<String>,
    pub reload: LoadOutcome,
}

impl SubmitReceipt {
    /// False when the acknowledged row was missing from the reload that
    /// followed the insert.
    pub fn visible_after_reload<D: DataStore>(&self, loader: &ContentLoader<D>) -> bool {
        match &self.id {
            Some(id) => loader
                .state()
                .read(|s| s.reviews.items().iter().any(|r| &r.id == id)),
            None => self.reload.is_applied(),
        }
    }
}

/// Sends the pending form as a new review: exactly one insert attempt,
/// then a reviews reload on success. Failures are recorded in state for
/// the visitor and also returned.
pub async fn submit_review<D: DataStore>(loader: &ContentLoader<D>) -> Result<SubmitReceipt> {
    let form = loader.state().read(|s| s.form.clone());
    let new_review = form.to_new_review().inspect_err(|e| {
        tracing::info!("Review rejected before submission: {}", e);
    })?;

    let row = serde_json::to_value(&new_review)?;
    let created = match loader
        .store()
        .insert(Collection::Reviews.table(), vec![row])
        .await
    {
        Ok(created) => created,
        Err(e) => {
            tracing::error!("Error submitting review: {}", e);
            loader
                .state()
                .update(|s| s.error = Some(SUBMIT_FAILED.to_string()));
            return Err(SiteError::SubmissionError {
                message: e.to_string(),
            });
        }
    };

    let id = created
        .first()
        .and_then(|row| row.get("id"))
        .and_then(Value::as_str)
        .map(str::to_string);
    tracing::info!("Review submitted by {} (id: {:?})", new_review.name, id);

    loader.state().update(|s| {
        s.form.reset();
        s.error = None;
    });

    let reload = loader.load_reviews().await;
    let receipt = SubmitReceipt { id, reload };
    if receipt.reload.is_applied() && !receipt.visible_after_reload(loader) {
        tracing::warn!(
            "Submitted review {:?} not yet visible after reload; the store may be lagging",
            receipt.id
        );
    }
    Ok(receipt)
}
