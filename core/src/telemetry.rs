use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_DIRECTIVES: &str = "mouth_core=info,runner_lambda=info,place_order=info,\
get_restaurants=info,search_restaurants=info,seed=info";

/// Installs the global subscriber. Timestamps are left out since CloudWatch
/// stamps every line on ingestion.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_DIRECTIVES.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}
