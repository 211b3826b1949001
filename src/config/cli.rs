use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "henna-hub")]
#[command(about = "Esha Henna Hub: services, gallery, quotes and reviews from the hosted store")]
pub struct Cli {
    /// TOML config file; SUPABASE_URL / SUPABASE_ANON_KEY are used when absent
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Log as JSON lines instead of compact text
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Render with the dark theme
    #[arg(long, global = true)]
    pub dark: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Load everything and print the whole page
    Show {
        /// Review page, starting at 1
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Print one page of reviews
    Reviews {
        #[arg(long, default_value = "1")]
        page: usize,
    },
    /// Submit a review, then print the refreshed first page
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        review: String,
        #[arg(long, default_value = "5")]
        rating: i32,
    },
    /// Follow the rotating quote for a number of ticks
    Quotes {
        #[arg(long, default_value = "3")]
        ticks: usize,
    },
}
