use std::path::PathBuf;

use chat::Concierge;
use config::store::ConciergeConfig;
use utils::log::Logger;
use widget::ChatWidget;

mod business;
mod chat;
mod config;
mod utils;
mod widget;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    Logger::init(None);

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));
    let config = ConciergeConfig::read(path)?;

    let concierge = Concierge::from_config(&config);

    ChatWidget::new(concierge, config.widget.clone()).run().await
}
