pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command};

pub use adapters::{MemoryStore, RestStore};
pub use config::SiteConfig;
pub use crate::core::{loader::ContentLoader, site::Site, state::SiteState, view::PageView};
pub use utils::error::{Result, SiteError};
