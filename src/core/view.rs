use crate::core::state::{SiteState, Theme};
use crate::core::submission::MAX_RATING;
use crate::domain::model::{GalleryImage, Quote, Review, Service};
use std::fmt;

pub const BUSINESS_NAME: &str = "Esha Henna Hub";
pub const TAGLINE: &str = "Creating beautiful memories with traditional & modern henna designs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactItem {
    pub label: &'static str,
    pub href: Option<&'static str>,
}

pub const CONTACT: [ContactItem; 4] = [
    ContactItem {
        label: "Phone",
        href: Some("tel:+91 63740 44646"),
    },
    ContactItem {
        label: "Instagram",
        href: Some("https://www.instagram.com/esha_henna_hub/?hl=en"),
    },
    ContactItem {
        label: "Mon-Sat: 10AM-7PM",
        href: None,
    },
    ContactItem {
        label: "Service Available in Madurai",
        href: None,
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationView {
    /// One-based, as shown to the visitor.
    pub page: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Everything one render of the page needs, detached from live state.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub theme: Theme,
    pub quote: Option<Quote>,
    pub services: Vec<Service>,
    pub gallery: Vec<GalleryImage>,
    pub reviews: Vec<Review>,
    /// None when the controls are hidden (a single page or fewer).
    pub pagination: Option<PaginationView>,
    pub error: Option<String>,
    pub loading: bool,
}

impl PageView {
    pub fn from_state(state: &SiteState) -> Self {
        let pagination = (state.page_count() > 1).then(|| PaginationView {
            page: state.review_page + 1,
            page_count: state.page_count(),
            has_prev: state.has_prev_page(),
            has_next: state.has_next_page(),
        });
        Self {
            theme: state.theme,
            quote: state.current_quote().cloned(),
            services: state.services.items().to_vec(),
            gallery: state.gallery.items().to_vec(),
            reviews: state.current_reviews().to_vec(),
            pagination,
            error: state.error.clone(),
            loading: state.loading,
        }
    }

    /// Just the reviews block: message, current page and its controls.
    pub fn reviews_section(&self) -> String {
        let mut out = String::new();
        self.write_reviews(&mut out);
        out
    }

    fn write_reviews(&self, out: &mut String) {
        out.push_str("== What Our Clients Say ==\n");
        if let Some(error) = &self.error {
            out.push_str(&format!("! {}\n", error));
        }
        if self.loading {
            out.push_str("Loading reviews...\n");
        } else if self.reviews.is_empty() {
            out.push_str("No reviews yet.\n");
        }
        for review in &self.reviews {
            out.push_str(&format!(
                "{} {}\n  \"{}\"\n",
                stars(review.rating),
                review.name,
                review.review
            ));
        }
        if let Some(p) = &self.pagination {
            out.push_str(&format!(
                "{} Page {} of {} {}\n",
                if p.has_prev { "[Previous]" } else { "(Previous)" },
                p.page,
                p.page_count,
                if p.has_next { "[Next]" } else { "(Next)" },
            ));
        }
    }
}

/// One star per rating point, capped at the form's maximum. Stored rows are
/// not range-checked by the store.
pub fn stars(rating: i32) -> String {
    "★".repeat(usize::try_from(rating.clamp(0, MAX_RATING)).unwrap_or(0))
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.theme {
            Theme::Light => "light",
            Theme::Dark => "dark",
        };
        writeln!(f, "# {} ({} mode)", BUSINESS_NAME, mode)?;
        writeln!(f, "{}", TAGLINE)?;
        writeln!(f)?;

        if let Some(quote) = &self.quote {
            writeln!(f, "\"{}\"\n  - {}", quote.text, quote.author)?;
            writeln!(f)?;
        }

        if !self.services.is_empty() {
            writeln!(f, "== Our Services ==")?;
            for service in &self.services {
                writeln!(f, "* {} - {}", service.title, service.price)?;
                writeln!(f, "  {}", service.description)?;
            }
            writeln!(f)?;
        }

        if !self.gallery.is_empty() {
            writeln!(f, "== Our Gallery ==")?;
            for image in &self.gallery {
                writeln!(f, "* {} <{}>", image.title, image.url)?;
            }
            writeln!(f)?;
        }

        let mut reviews = String::new();
        self.write_reviews(&mut reviews);
        writeln!(f, "{}", reviews)?;

        writeln!(f, "== Book Your Appointment ==")?;
        for item in &CONTACT {
            match item.href {
                Some(href) => writeln!(f, "* {} <{}>", item.label, href)?,
                None => writeln!(f, "* {}", item.label)?,
            }
        }
        Ok(())
    }
}
