pub mod loader;
pub mod pagination;
pub mod rotator;
pub mod site;
pub mod state;
pub mod submission;
pub mod view;

pub use crate::domain::model::{Collection, GalleryImage, NewReview, Quote, Review, Service};
pub use crate::domain::ports::{DataStore, StoreSettings};
pub use crate::utils::error::Result;
