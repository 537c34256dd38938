use anyhow::Context;
use clap::Parser;
use hotel_etl::domain::model::{is_suggested_city, SUGGESTED_CITIES};
use hotel_etl::utils::error::ErrorSeverity;
use hotel_etl::utils::{logger, validation::Validate};
use hotel_etl::{CliConfig, HotelListing, HotelPipeline, LocalStorage, SearchEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting hotel-etl CLI");
    tracing::debug!("CLI config: {:?}", config);

    let settings = config
        .load_settings()
        .with_context(|| format!("Failed to load config file {:?}", config.config))?;

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if !is_suggested_city(&config.city) {
        println!("ℹ️  Suggested cities: {}", SUGGESTED_CITIES.join(", "));
    }

    let top_n = settings.top_n();
    let storage = LocalStorage::new(settings.output_path());
    let pipeline = HotelPipeline::new(storage, settings)?;
    let engine = SearchEngine::new(pipeline).with_display_limit(top_n);

    match engine
        .search(&config.city, &config.checkin, &config.checkout, config.currency)
        .await
    {
        Ok(outcome) => {
            if config.json {
                println!("{}", serde_json::to_string_pretty(outcome.display())?);
            } else {
                print_table(outcome.display());
            }
            println!("📁 Saved {} listings to {}", outcome.ranked.len(), outcome.output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Search failed: {} (Kind: {:?}, Severity: {:?})",
                e,
                e.kind(),
                e.severity()
            );

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 2,
                ErrorSeverity::Medium => 3,
                ErrorSeverity::High => 4,
                ErrorSeverity::Critical => 1,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn print_table(listings: &[HotelListing]) {
    if listings.is_empty() {
        println!("No hotels found.");
        return;
    }

    println!(
        "{:<5} {:<40} {:<10} {:<40} {:<10} {}",
        "Index", "Name", "Points", "Address", "Distance", "Price"
    );
    for (i, hotel) in listings.iter().enumerate() {
        println!(
            "{:<5} {:<40} {:<10} {:<40} {:<10} {}",
            i + 1,
            hotel.name,
            hotel.points,
            hotel.address,
            hotel.distance_to_center,
            hotel.price
        );
    }
}
