use std::sync::Arc;

use lambda_http::{Error, Request, run, service_fn};
use mouth_core::api::handle_search_restaurants;
use mouth_core::restaurant::RestaurantCatalog;
use mouth_core::source::dynamodb::DynamoDbRestaurantTable;
use mouth_core::telemetry::init_tracing;
use runner_lambda::{body_bytes, into_http_response, startup_config};
use tracing::info;

/// Scans the restaurant table for entries whose themes contain the `theme`
/// given in the request body.
#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = startup_config()?;
    let table = DynamoDbRestaurantTable::from_options(&config.aws, config.require_table()?).await;
    info!(table = %table.table_name(), limit = config.default_results, "search-restaurants ready");

    let catalog = RestaurantCatalog::new(Arc::new(table), config.default_results);
    let catalog = &catalog;

    run(service_fn(move |request: Request| async move {
        let body = body_bytes(&request);
        into_http_response(handle_search_restaurants(catalog, body.as_deref()).await)
    }))
    .await
}
