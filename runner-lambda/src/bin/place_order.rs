use std::sync::Arc;

use lambda_http::{Error, Request, run, service_fn};
use mouth_core::api::handle_place_order;
use mouth_core::order::OrderPlacer;
use mouth_core::sink::kinesis::KinesisSink;
use mouth_core::telemetry::init_tracing;
use runner_lambda::{into_http_response, place_order_request, startup_config};
use tracing::info;

/// Accepts `{ "restaurantName": ... }` from an authenticated caller and
/// publishes an `order_placed` event to the order events stream.
#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let config = startup_config()?;
    let stream_name = config.require_stream()?;
    let sink = KinesisSink::from_options(&config.aws, stream_name).await;
    info!(stream = %sink.stream_name(), "place-order ready");

    let placer = OrderPlacer::new(Arc::new(sink));
    let placer = &placer;

    run(service_fn(move |request: Request| async move {
        into_http_response(handle_place_order(placer, place_order_request(&request)).await)
    }))
    .await
}
