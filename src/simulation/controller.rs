use crate::app_config::ControllerConfig;
use crate::simulation::handles::{CommandInterface, StateInterface};
use hardware_interface::{ControllerInfo, HardwareInterfaceError, InterfaceManager, InterfaceResources};
use thiserror::Error;
use tracing::{instrument, trace};

/// Drives its command resources to a fixed setpoint while observing its state resources.
#[derive(Debug)]
pub struct SetpointController {
    name: String,
    reads: Vec<String>,
    commands: Vec<String>,
    setpoint: f64,
}

impl SetpointController {
    pub fn from_config(config: &ControllerConfig) -> Self {
        SetpointController {
            name: config.name().to_owned(),
            reads: config.reads().to_vec(),
            commands: config.commands().to_vec(),
            setpoint: config.setpoint(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Only command resources are claimed, reading state never conflicts.
    pub fn info(&self) -> ControllerInfo {
        ControllerInfo {
            name: self.name.clone(),
            claimed_resources: vec![InterfaceResources::new::<CommandInterface>(
                CommandInterface::type_name(),
                self.commands.iter().cloned(),
            )],
        }
    }

    #[instrument(level = "debug", skip_all, fields(controller = %self.name))]
    pub fn update(&self, interfaces: &mut InterfaceManager) -> Result<(), ControllerError> {
        let states = interfaces
            .get::<StateInterface>()
            .ok_or_else(|| ControllerError::MissingInterface(StateInterface::type_name()))?;
        for name in &self.reads {
            let handle = states.get_handle(name)?;
            trace!("📈 '{}' is at {}", name, handle.state());
        }

        let commands = interfaces
            .get_mut::<CommandInterface>()
            .ok_or_else(|| ControllerError::MissingInterface(CommandInterface::type_name()))?;
        for name in &self.commands {
            let handle = commands.get_handle(name)?;
            trace!("🎯 '{}' at {}, command {} -> {}", name, handle.state(), handle.command(), self.setpoint);
            handle.set_command(self.setpoint);
        }

        Ok(())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ControllerError {
    #[error("missing hardware interface '{0}'")]
    MissingInterface(String),
    #[error(transparent)]
    HardwareInterface(#[from] HardwareInterfaceError),
}
