use anyhow::Result;
use nebula_backdrop::{BackdropApp, BackdropConfig};
use nebula_engine::device::GpuInit;
use nebula_engine::logging::{LoggingConfig, init_logging};
use nebula_engine::render::GpuSurface;
use nebula_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = BackdropConfig {
        seed: std::env::var("NEBULA_SEED").ok().and_then(|s| s.parse().ok()),
        ..BackdropConfig::default()
    };
    log::info!("starting nebula backdrop (seed: {:?})", config.seed);

    Runtime::run(
        RuntimeConfig::default(),
        GpuInit::default(),
        BackdropApp::<GpuSurface>::new(config),
    )
}
