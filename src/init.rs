use std::{str::FromStr, sync::Arc};

use axum::Router;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Pool, Sqlite,
};
use tokio::net::TcpListener;

use crate::{
    config::Config,
    constants::{version::get_version, DB_MAX_CONNECTIONS},
    handlers,
    repository::SqliteQuoteRepository,
    service::QuoteService,
    telemetry::{self, Telemetry},
};

pub struct Server {
    listener: TcpListener,
    router: Router,
    telemetry: Telemetry,
}

impl Server {
    /// serves until ctrl-c / SIGTERM, then flushes telemetry.
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!("listening on {}", self.listener.local_addr()?);

        let result = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        tracing::info!("server stopped, shutting down.");
        self.telemetry.shutdown();

        Ok(result?)
    }
}

async fn init_database(config: &Config) -> anyhow::Result<Pool<Sqlite>> {
    tracing::info!("initializing database connection...");
    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .inspect_err(|e| tracing::error!(err = ?e, "invalid DATABASE_URL"))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);
    let db = SqlitePoolOptions::new()
        .max_connections(DB_MAX_CONNECTIONS)
        .connect_with(opts)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when connecting to database"))?;

    tracing::info!("running migrations...");
    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("finished running migrations!");

    Ok(db)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(err = ?e, "an error occurred when listening for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(err = ?e, "an error occurred when listening for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("received shutdown signal.");
}

pub async fn init() -> anyhow::Result<Server> {
    let config = Config::load()?;

    let telemetry = telemetry::init_telemetry(&config)
        .map_err(|e| anyhow::anyhow!("failed to initialize telemetry: {e}"))?;

    tracing::info!("initializing quotes {}... please wait warmly.", get_version());

    let db = init_database(&config).await?;
    let service = Arc::new(QuoteService::new(SqliteQuoteRepository::new(db)));
    let router = handlers::router(service);

    let listener = TcpListener::bind(config.listen_addr())
        .await
        .inspect_err(|e| tracing::error!(err = ?e, addr = %config.listen_addr(), "an error occurred when binding listener"))?;

    tracing::info!("finished initializing!");
    Ok(Server {
        listener,
        router,
        telemetry,
    })
}
