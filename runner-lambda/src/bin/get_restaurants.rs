use std::sync::Arc;

use lambda_http::{Error, Request, run, service_fn};
use mouth_core::api::handle_list_restaurants;
use mouth_core::restaurant::RestaurantCatalog;
use mouth_core::source::dynamodb::DynamoDbRestaurantTable;
use mouth_core::telemetry::init_tracing;
use runner_lambda::{into_http_response, startup_config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = startup_config()?;
    let table = DynamoDbRestaurantTable::from_options(&config.aws, config.require_table()?).await;
    info!(table = %table.table_name(), limit = config.default_results, "get-restaurants ready");

    let catalog = RestaurantCatalog::new(Arc::new(table), config.default_results);
    let catalog = &catalog;

    run(service_fn(move |_request: Request| async move {
        into_http_response(handle_list_restaurants(catalog).await)
    }))
    .await
}
