use crate::app_config::AppConfig;
use crate::simulation::{SetpointController, SimulatedBus};
use hardware_interface::InterfaceManager;
use tracing::{info, warn};

mod app_config;
mod simulation;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

    info!("🪵 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let bus = SimulatedBus::new(config.resources(), config.core().response());
    if bus.is_empty() {
        warn!("⚠️ No resources configured");
    }

    let mut interfaces = InterfaceManager::new();
    interfaces.register(bus.state_interface());
    interfaces.register(bus.command_interface());
    info!("✅  Registered {} resource(s) in {} interface(s)", bus.len(), interfaces.get_names().len());

    let controllers = config.controllers().iter().map(SetpointController::from_config).collect::<Vec<_>>();
    let infos = controllers.iter().map(SetpointController::info).collect::<Vec<_>>();
    InterfaceManager::check_for_conflict(&infos)?;
    info!(
        "✅  Loaded {} controller(s): {}",
        controllers.len(),
        controllers.iter().map(SetpointController::name).collect::<Vec<_>>().join(", ")
    );

    info!("🔥 {} is up and running", env!("CARGO_PKG_NAME"));

    simulation::run(
        &bus,
        &mut interfaces,
        &controllers,
        config.core().control_period(),
        config.core().cycles(),
    )
    .await?;

    for (name, state) in bus.states() {
        info!("📈 '{}' settled at {:.4}", name, state);
    }

    Ok(())
}
