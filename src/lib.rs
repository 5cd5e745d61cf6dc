pub mod db;
pub mod mail;
pub mod model;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use dotenv::dotenv;
use tokio::signal;
use tokio::sync::oneshot::{self};
use opentelemetry::{global, sdk::{propagation::TraceContextPropagator, trace, trace::Sampler}};
use tracing_subscriber::{prelude::__tracing_subscriber_SubscriberExt, Registry, util::SubscriberInitExt};

use db::credential::MongoCredentialStore;
use db::mongo;
use db::reset_token::MongoResetTokenLedger;
use mail::SmtpMailer;
use utils::config::{Configuration, self};
use utils::context::ServiceContext;
use utils::errors::{ErrorCode, ExcavatorError};

const APP_NAME: &str = "Excavator";

///
/// Entry point to start the app.
///
pub async fn lib_main() -> Result<(), ExcavatorError> {

    // Load any local dev settings as environment variables from a .env file.
    dotenv().ok();

    // Default log level to INFO if it's not specified.
    config::default_env("RUST_LOG", "INFO");

    // SIGINT/ctrl+c handling for graceful shutdown.
    let (signal_tx, signal_rx) = oneshot::channel();
    let _signal = tokio::spawn(wait_for_signal(signal_tx));

    // Load the service configuration into struct and initialise any lazy statics.
    let config = Configuration::from_env().expect("The service configuration is not correct");

    // Initialise open-telemetry distributed tracing.
    let tracing = init_tracing(&config);

    tracing::info!("{}\n{}", BANNER, config.fmt_console()?);

    // Create a MongoDB client and connect to it before proceeding.
    let db = mongo::get_mongo_db(APP_NAME, &config).await?;

    // Ensure the schema is in sync with the code.
    mongo::update_mongo(&db).await?;

    // The service context gives every handler access to shared stuff (stores, hasher, mailer, etc.).
    let ctx = Arc::new(ServiceContext::new(
        config.clone(),
        Arc::new(MongoCredentialStore::new(db.clone())),
        Arc::new(MongoResetTokenLedger::new(db.clone())),
        Arc::new(SmtpMailer::from_config(&config)?)));

    let app = routes::router(ctx);

    let listener = tokio::net::TcpListener::bind(&config.address).await?;

    tracing::info!("{} listening on {}", APP_NAME, config.address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            signal_rx.await.ok();
            tracing::info!("Graceful shutdown");
        })
        .await
        .map_err(|err| ErrorCode::ServerStartError.with_msg(&format!("Failed to run HTTP server: {}", err)))?;

    if tracing {
        opentelemetry::global::shutdown_tracer_provider(); // sending remaining spans
    }

    Ok(())
}

///
/// Sends a oneshot signal when a SIGINT is received (Ctrl+C)
///
async fn wait_for_signal(tx: oneshot::Sender<()>) {
    let _ = signal::ctrl_c().await;
    tracing::info!("SIGINT received: shutting down");
    let _ = tx.send(());
}

///
/// Initialise tracing and plug-in the Jaeger feature if enabled.
///
fn init_tracing(config: &Configuration) -> bool {
    global::set_text_map_propagator(TraceContextPropagator::new());

    match config.distributed_tracing {
        true => { // Install the Jaeger pipeline.
            let tracer = opentelemetry_jaeger::new_pipeline()
                .with_service_name(APP_NAME)
                .with_trace_config(trace::config().with_sampler(Sampler::AlwaysOn))
                .with_agent_endpoint(config.jaeger_endpoint.clone().unwrap_or_default())
                .install_batch(opentelemetry::runtime::Tokio)
                .expect("Unable to build Jaeger pipeline");

            if let Err(err) = Registry::default()
                .with(tracing_subscriber::EnvFilter::from_default_env()) // Set the tracing level to match RUST_LOG env variable.
                .with(tracing_subscriber::fmt::layer().with_test_writer().with_ansi(true))
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .try_init() {
                    tracing::info!("Tracing already initialised: {}", err.to_string()); // Allowed error here - tests call this fn repeatedly.
            }

            true
        },
        false => {
            if let Err(err) = Registry::default()
                .with(tracing_subscriber::EnvFilter::from_default_env()) // Set the tracing level to match RUST_LOG env variable.
                .with(tracing_subscriber::fmt::layer().with_test_writer().with_ansi(true))
                .try_init() {
                    tracing::info!("Tracing already initialised: {}", err.to_string()); // Allowed error here - tests call this fn repeatedly.
            }

            false
        }
    }
}

const BANNER: &str = r#"
 _____                          _
| ____|_  _____ __ ___   ____ _| |_ ___  _ __
|  _| \ \/ / __/ _` \ \ / / _` | __/ _ \| '__|
| |___ >  < (_| (_| |\ V / (_| | || (_) | |
|_____/_/\_\___\__,_| \_/ \__,_|\__\___/|_|
"#;
