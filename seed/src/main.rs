use anyhow::{Context, Result};
use mouth_core::config::AppConfig;
use mouth_core::restaurant::{Restaurant, default_restaurants};
use mouth_core::source::dynamodb::DynamoDbRestaurantTable;
use mouth_core::telemetry::init_tracing;
use tracing::info;

/// Loads the restaurant table with fixture data.
///
/// Usage: `seed [restaurants.yaml]`. The table name and AWS overrides come
/// from the same environment the Lambda functions read (`restaurants_table`,
/// `AWS_REGION`, `AWS_ENDPOINT_URL`). Without a file argument the built-in
/// fixtures are written.
#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = AppConfig::from_env();
    config.validate()?;
    let table_name = config.require_table()?;

    let restaurants = match std::env::args().nth(1) {
        Some(path) => load_restaurants(&path)?,
        None => default_restaurants(),
    };
    info!(table = table_name, count = restaurants.len(), "seeding restaurants");

    let table = DynamoDbRestaurantTable::from_options(&config.aws, table_name).await;
    let written = table
        .write_all(&restaurants)
        .await
        .with_context(|| format!("Failed to seed table {table_name}"))?;

    info!(table = table_name, written, "all done");
    Ok(())
}

fn load_restaurants(path: &str) -> Result<Vec<Restaurant>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    parse_restaurants(&content).with_context(|| format!("Failed to parse {path}"))
}

fn parse_restaurants(content: &str) -> Result<Vec<Restaurant>> {
    let restaurants: Vec<Restaurant> = serde_yaml::from_str(content)?;
    if let Some(unnamed) = restaurants.iter().position(|r| r.name.trim().is_empty()) {
        anyhow::bail!("restaurant #{} has no name", unnamed + 1);
    }
    Ok(restaurants)
}
