mod config;
mod constants;
mod error;
mod handlers;
mod init;
mod models;
mod repository;
mod service;
mod telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let server = init::init().await?;
    server.run().await?;

    Ok(())
}
