use clap::Parser;
use henna_hub::core::loader::LoadOutcome;
use henna_hub::utils::logger;
use henna_hub::{Cli, Command, RestStore, Site, SiteConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging first, so setup failures are recorded.
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting henna-hub");

    // Missing or invalid store credentials stop everything here.
    let (config, store) = match setup(&cli) {
        Ok(ready) => ready,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    if cli.verbose {
        tracing::debug!("Site config: {:?}", config);
    }

    let mut site = Site::new(store).with_quote_interval(config.quote_interval());
    if cli.dark {
        site.toggle_theme();
    }

    let outcome = run(&mut site, cli.command).await;
    site.stop();

    if let Err(e) = outcome {
        tracing::error!("❌ {} (Severity: {:?})", e, e.severity());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }

    Ok(())
}

fn setup(cli: &Cli) -> henna_hub::Result<(SiteConfig, RestStore)> {
    let config = SiteConfig::load(cli.config.as_deref())?;
    let store = RestStore::from_settings(&config)?;
    Ok((config, store))
}

async fn run(site: &mut Site<RestStore>, command: Command) -> henna_hub::Result<()> {
    match command {
        Command::Show { page } => {
            site.start().await;
            site.go_to_page(page.saturating_sub(1));
            println!("{}", site.view());
        }
        Command::Reviews { page } => {
            site.reload_reviews().await;
            site.go_to_page(page.saturating_sub(1));
            println!("{}", site.view().reviews_section());
        }
        Command::Submit {
            name,
            review,
            rating,
        } => {
            site.set_name(name);
            site.set_review(review);
            site.set_rating(rating)?;

            let receipt = site.submit_review().await?;
            println!("✅ Thank you! Your review was submitted.");
            if !receipt.visible_after_reload(site.loader()) {
                println!("It may take a moment to appear below.");
            }
            println!("{}", site.view().reviews_section());
        }
        Command::Quotes { ticks } => follow_quotes(site, ticks).await?,
    }
    Ok(())
}

async fn follow_quotes(site: &mut Site<RestStore>, ticks: usize) -> henna_hub::Result<()> {
    if let LoadOutcome::Failed(e) = site.loader().load_quotes().await {
        return Err(e);
    }
    if site.snapshot().quotes.is_empty() {
        println!("No quotes to show.");
        return Ok(());
    }

    let mut rx = site.subscribe();
    let print = |state: &henna_hub::SiteState| {
        if let Some(quote) = state.current_quote() {
            println!("\"{}\" - {}", quote.text, quote.author);
        }
    };
    print(&rx.borrow_and_update());

    site.start_rotator();
    for _ in 0..ticks {
        if rx.changed().await.is_err() {
            break;
        }
        print(&rx.borrow_and_update());
    }
    Ok(())
}
