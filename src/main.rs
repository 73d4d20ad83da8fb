use anyhow::Context;
use env_logger::Env;
use forest_viewer::{ForestApp, ForestConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = ForestConfig::from_env().context("reading FOREST_* configuration")?;
    ForestApp::new(config)
        .context("setting up the forest viewer")?
        .run()
        .context("running the forest viewer")
}
