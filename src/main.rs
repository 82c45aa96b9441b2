use anyhow::{Context, Result};
use fakelog::config::Conf;
use fakelog::{EventGenerator, Populator};

#[tokio::main]
async fn main() -> Result<()> {
    let conf = Conf::build();

    env_logger::Builder::new()
        .filter_level(conf.log_level)
        .parse_env("RUST_LOG")
        .init();

    let producer = fakelog::brokers(conf.brokers.as_str())
        .kafka()
        .options(conf.options.iter().cloned())
        .connect_timeout(conf.connect_timeout())
        .producer(&conf.topic, &conf.producer_name)
        .await
        .context("Failed to initialize")?;

    let mut populator = Populator::new(producer, EventGenerator::new(), conf.run_settings());
    let mut stdout = std::io::stdout();

    let outcome = tokio::select! {
        res = populator.run(&mut stdout) => res.map(drop),
        _ = tokio::signal::ctrl_c() => {
            log::info!("Interrupted, shutting down");
            Ok(())
        }
    };

    let flushed = populator.finish(conf.flush_timeout()).await;
    outcome.context("Failed to publish events")?;
    flushed.context("Failed to flush pending events")?;
    Ok(())
}
