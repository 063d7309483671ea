use btc_leverage_risk::{config::Settings, utils::logging::init_tracing, RiskConsolidator};
use tracing::{debug, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    init_tracing(&settings.logging)?;
    info!("Configuration loaded successfully");

    let consolidator = RiskConsolidator::from_settings(&settings);
    debug!(calculators = %consolidator.describe(), "Registered category calculators");

    let report = consolidator.consolidate()?;
    info!(
        final_score = report.final_score,
        classification = %report.classification.label,
        "Risk analysis finished"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
