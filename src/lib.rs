//! Name-indexed registries of hardware resource handles.
//!
//! A hardware layer registers handles in a [`HardwareResourceManager`] and controllers retrieve them
//! by name. Whether retrieval also claims the resource exclusively is fixed by the manager's
//! [`ClaimPolicy`]: [`ClaimResources`] for handles that command hardware, [`DontClaimResources`] for
//! handles that only read from it.

// Lets `#[derive(ResourceHandle)]` resolve `::hardware_interface` inside this crate too.
extern crate self as hardware_interface;

mod claim_policy;
mod hardware_resource_manager;
mod interface;
mod interface_manager;
mod resource_handle;
mod resource_manager;

pub use claim_policy::{ClaimPolicy, ClaimResources, DontClaimResources};
pub use handle_macros::ResourceHandle;
pub use interface::{HardwareInterface, HardwareInterfaceError};
pub use hardware_resource_manager::HardwareResourceManager;
pub use interface_manager::{ConflictError, ControllerInfo, InterfaceManager, InterfaceResources, ResourceConflict};
pub use resource_handle::ResourceHandle;
pub use resource_manager::{ResourceError, ResourceManager};
