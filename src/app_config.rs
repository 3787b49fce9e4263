use config::Config;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    #[serde(default)]
    resources: Vec<ResourceConfig>,
    #[serde(default)]
    controllers: Vec<ControllerConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppConfigError> {
        let config: AppConfig = Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default().separator("__"))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppConfigError> {
        if self.core.control_period.is_zero() {
            return Err(AppConfigError::ZeroControlPeriod);
        }

        if !(self.core.response > 0.0 && self.core.response <= 1.0) {
            return Err(AppConfigError::InvalidResponse(self.core.response));
        }

        let mut names = HashSet::new();
        for resource in &self.resources {
            if !names.insert(resource.name.as_str()) {
                return Err(AppConfigError::DuplicateResource(resource.name.clone()));
            }
        }

        for controller in &self.controllers {
            for resource in controller.reads.iter().chain(&controller.commands) {
                if !names.contains(resource.as_str()) {
                    return Err(AppConfigError::UnknownResource {
                        controller: controller.name.clone(),
                        resource: resource.clone(),
                    });
                }
            }

            // A command listed twice would be claimed twice in the same cycle.
            for resources in [&controller.reads, &controller.commands] {
                let mut seen = HashSet::new();
                if let Some(resource) = resources.iter().find(|r| !seen.insert(r.as_str())) {
                    return Err(AppConfigError::DuplicateControllerResource {
                        controller: controller.name.clone(),
                        resource: resource.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn resources(&self) -> &[ResourceConfig] {
        &self.resources
    }

    pub fn controllers(&self) -> &[ControllerConfig] {
        &self.controllers
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    #[serde(with = "humantime_serde")]
    control_period: Duration,
    cycles: u64,
    #[serde(default = "default_response")]
    response: f64,
}

fn default_response() -> f64 {
    0.5
}

impl Core {
    pub fn control_period(&self) -> Duration {
        self.control_period
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Fraction of the remaining distance to the command the simulated hardware covers per cycle.
    pub fn response(&self) -> f64 {
        self.response
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ResourceConfig {
    name: String,
    #[serde(default)]
    initial_value: f64,
}

impl ResourceConfig {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial_value(&self) -> f64 {
        self.initial_value
    }
}

#[cfg(test)]
impl ResourceConfig {
    pub fn new(name: &str, initial_value: f64) -> Self {
        ResourceConfig {
            name: name.to_string(),
            initial_value,
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ControllerConfig {
    name: String,
    #[serde(default)]
    reads: Vec<String>,
    #[serde(default)]
    commands: Vec<String>,
    setpoint: f64,
}

impl ControllerConfig {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reads(&self) -> &[String] {
        &self.reads
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    pub fn setpoint(&self) -> f64 {
        self.setpoint
    }
}

#[cfg(test)]
impl ControllerConfig {
    pub fn new(name: &str, reads: &[&str], commands: &[&str], setpoint: f64) -> Self {
        ControllerConfig {
            name: name.to_string(),
            reads: reads.iter().map(|r| r.to_string()).collect(),
            commands: commands.iter().map(|c| c.to_string()).collect(),
            setpoint,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppConfigError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error("the control period must be larger than zero")]
    ZeroControlPeriod,
    #[error("the response must be in (0, 1], found {0}")]
    InvalidResponse(f64),
    #[error("resource '{0}' is configured more than once")]
    DuplicateResource(String),
    #[error("controller '{controller}' uses unknown resource '{resource}'")]
    UnknownResource { controller: String, resource: String },
    #[error("controller '{controller}' lists resource '{resource}' more than once")]
    DuplicateControllerResource { controller: String, resource: String },
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core {
                    control_period: Duration::from_millis(1),
                    cycles: 10,
                    response: 0.5,
                },
                resources: vec![
                    ResourceConfig::new("left_wheel_joint", 0.0),
                    ResourceConfig::new("right_wheel_joint", 0.0),
                ],
                controllers: vec![],
            },
        }
    }

    pub fn response(mut self, response: f64) -> Self {
        self.config.core.response = response;
        self
    }

    pub fn resource(mut self, resource: ResourceConfig) -> Self {
        self.config.resources.push(resource);
        self
    }

    pub fn controller(mut self, controller: ControllerConfig) -> Self {
        self.config.controllers.push(controller);
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
