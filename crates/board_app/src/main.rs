mod app;
mod config;
mod effects;
mod logging;
mod render;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);
    let config = config::load()?;
    app::run(config)
}
