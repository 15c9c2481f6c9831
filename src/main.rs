mod cli;
mod prettyprint;

use indicatif::ProgressStyle;
use prettyprint::prettyprint::PrettyFormatter;
use timeseddel::adapters::config::app_config::AppConfig;
use tracing::{error, info, instrument};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{
    filter::{filter_fn, LevelFilter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer, Registry,
};

use cli::{cli_adapter::CliAdapter, controller_factory::ControllerFactory};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing()?;
    setup_panic_hook();

    info!("Starting timeseddel");

    let config = AppConfig::load().map_err(|report| {
        error!("Failed to load config: {:?}", report);
        format!("{report:?}")
    })?;

    let controller = ControllerFactory::create(&config);
    let mut cli_adapter = CliAdapter::new(controller);

    match cli_adapter.run().await {
        Ok(_) => {
            info!("Bye");
            Ok(())
        }
        Err(e) => {
            error!("CLI execution failed: {:?}", e);
            Err(e)
        }
    }
}

fn setup_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let indicatif_layer = IndicatifLayer::new().with_progress_style(
        ProgressStyle::with_template("{span_child_prefix}{spinner:.green} {span_name} {wide_msg}")?,
    );

    let stderr_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(true))
        .with_writer(indicatif_layer.get_stderr_writer())
        .with_filter(LevelFilter::ERROR);

    let log_file_layer = tracing_subscriber::fmt::layer()
        .event_format(PrettyFormatter::new(false))
        .with_writer(std::fs::File::create("timeseddel.log")?)
        .with_ansi(false);

    // Only the controller operations get a spinner.
    let indicatif_layer = indicatif_layer.with_filter(filter_fn(|metadata| {
        metadata.target() == "timeseddel::application::controller"
    }));

    Registry::default()
        .with(
            tracing_subscriber::filter::Targets::new()
                .with_target("timeseddel", tracing::Level::TRACE),
        )
        .with(indicatif_layer)
        .with(log_file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}

fn setup_panic_hook() {
    tracing::trace!("Setting panic hook");
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("panic: {info}");
    }));
}
