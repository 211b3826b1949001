use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub name: String,
    pub review: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: String,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Shown verbatim, e.g. "From ₹500".
    pub price: String,
    pub created_at: DateTime<Utc>,
}

/// The row sent on insert; id and created_at are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub name: String,
    pub review: String,
    pub rating: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Services,
    Quotes,
    Reviews,
    GalleryImages,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub table: &'static str,
    pub order: Option<OrderBy>,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Services,
        Collection::Quotes,
        Collection::Reviews,
        Collection::GalleryImages,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Collection::Services => "services",
            Collection::Quotes => "quotes",
            Collection::Reviews => "reviews",
            Collection::GalleryImages => "gallery_images",
        }
    }

    /// Services oldest first, reviews and gallery newest first, quotes in
    /// whatever order the store returns them.
    pub fn list_query(self) -> ListQuery {
        let order = match self {
            Collection::Services => Some(true),
            Collection::Reviews | Collection::GalleryImages => Some(false),
            Collection::Quotes => None,
        };
        ListQuery {
            table: self.table(),
            order: order.map(|ascending| OrderBy {
                column: "created_at",
                ascending,
            }),
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}
