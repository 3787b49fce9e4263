use crate::resource_manager::ResourceError;
use std::any::Any;
use thiserror::Error;

/// A category of hardware resources, e.g. everything a robot exposes for reading or for commanding.
///
/// Besides categorization this is where claims are tracked, so the owner of the interfaces can
/// reset them at the start of every control cycle without knowing the handle types involved.
pub trait HardwareInterface {
    /// Type name of the interface, used to group controller claims.
    fn interface_name(&self) -> String;

    fn get_names(&self) -> Vec<String>;

    /// Claims `name` exclusively. Fails if the name is unknown or already claimed.
    fn claim(&mut self, name: &str) -> Result<(), ResourceError>;

    fn is_claimed(&self, name: &str) -> bool;

    fn get_claims(&self) -> Vec<String>;

    fn clear_claims(&mut self);

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum HardwareInterfaceError {
    #[error("{0}")]
    ResourceNotFound(String),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

impl HardwareInterfaceError {
    /// Translates a lookup failure, keeping the original message. Anything but a missing resource
    /// passes through untouched.
    pub(crate) fn from_lookup(error: ResourceError) -> Self {
        match error {
            ResourceError::NotFound { .. } => HardwareInterfaceError::ResourceNotFound(error.to_string()),
            other => HardwareInterfaceError::Resource(other),
        }
    }
}
