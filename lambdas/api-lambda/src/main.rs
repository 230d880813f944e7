use std::sync::Arc;

use lambda_http::{run, service_fn, Error};
use muse_shared::AppState;
use tracing_subscriber::EnvFilter;

mod http_handler;

use http_handler::function_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .init();

    let state = Arc::new(AppState::init().await.map_err(Error::from)?);

    run(service_fn(move |event| {
        let state = state.clone();
        async move { function_handler(event, state).await }
    }))
    .await
}
