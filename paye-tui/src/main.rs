use tracing::info;

use paye_tui::{app, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;
    info!("starting PAYE calculator");

    app::run().await
}
