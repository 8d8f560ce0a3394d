use api::router;
use common::config::Config;
use common::logging::setup_logging;
use common::persistence::store::CarStore;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("failed to load config");
    setup_logging("api", &config.logging).expect("failed to set up logging");
    info!("starting app");
    let cancellation_token = CancellationToken::new();

    let store = CarStore::open(&config.database)
        .await
        .expect("failed to open car store");
    let app = router(store.clone());
    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .expect("failed to bind");
    info!(
        "listening on `{}:{}`",
        config.server.host, config.server.port
    );
    let app_done = serve(listener, app, cancellation_token.clone());

    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for ctrl c event");
    info!("exiting");
    cancellation_token.cancel();
    app_done.notified().await;
    store.close();
    info!("exited");
}

fn serve(
    listener: tokio::net::TcpListener,
    app: axum::Router,
    cancellation_token: CancellationToken,
) -> Arc<Notify> {
    let done = Arc::new(Notify::new());

    tokio::spawn({
        let done = done.clone();
        async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    cancellation_token.cancelled().await;
                    info!("gracefully shutting down app");
                })
                .await;
            if let Err(err) = served {
                error!("failed to serve: {err}");
            }
            // Stores a permit, so a waiter registered after this still wakes.
            done.notify_one();
        }
    });

    done
}
