mod api;
mod app;
mod config;
mod input;
mod messages;
mod services;
mod status;
mod ui;

use app::App;
use config::Config;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout belongs to the panel
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting recpanel recorder control panel");

    let config = Config::load()?;
    config.validate()?;

    let app = App::new(config)?;
    app.run().await
}
