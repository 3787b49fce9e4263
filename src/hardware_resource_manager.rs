use crate::claim_policy::{ClaimPolicy, ClaimResources, DontClaimResources};
use crate::interface::{HardwareInterface, HardwareInterfaceError};
use crate::resource_handle::ResourceHandle;
use crate::resource_manager::{ResourceError, ResourceManager};
use std::any::Any;
use std::marker::PhantomData;
use tracing::{debug, instrument};

/// Hardware interface storing resource handles by name.
///
/// The `P` parameter fixes at compile time whether [`get_handle`](Self::get_handle) claims the
/// resource. A manager with [`ClaimResources`] hands out handles exclusively and needs `&mut self`,
/// one with [`DontClaimResources`] (the default) hands out shared handles from `&self`.
///
/// ```
/// use hardware_interface::{ClaimResources, HardwareInterface, HardwareResourceManager, ResourceHandle};
///
/// #[derive(Clone, Debug, ResourceHandle)]
/// struct CommandHandle {
///     name: String,
/// }
///
/// let mut commands = HardwareResourceManager::<CommandHandle, ClaimResources>::new();
/// commands.register_handle(CommandHandle { name: "left_wheel_joint".to_string() });
///
/// let handle = commands.get_handle("left_wheel_joint").unwrap();
/// assert_eq!(handle.name(), "left_wheel_joint");
/// assert!(commands.is_claimed("left_wheel_joint"));
/// assert!(commands.get_handle("left_wheel_joint").is_err());
/// ```
///
/// There is no way to pick the retrieval behavior at run time. Claiming through a shared reference
/// doesn't compile:
///
/// ```compile_fail
/// use hardware_interface::{ClaimResources, HardwareResourceManager, ResourceHandle};
///
/// #[derive(Clone, Debug, ResourceHandle)]
/// struct CommandHandle {
///     name: String,
/// }
///
/// fn read(commands: &HardwareResourceManager<CommandHandle, ClaimResources>) {
///     let _ = commands.get_handle("left_wheel_joint");
/// }
/// ```
///
/// and neither does code that is generic over the policy:
///
/// ```compile_fail
/// use hardware_interface::{ClaimPolicy, HardwareResourceManager, ResourceHandle};
///
/// #[derive(Clone, Debug, ResourceHandle)]
/// struct StateHandle {
///     name: String,
/// }
///
/// fn read<P: ClaimPolicy>(states: &mut HardwareResourceManager<StateHandle, P>) {
///     let _ = states.get_handle("left_wheel_joint");
/// }
/// ```
#[derive(Debug)]
pub struct HardwareResourceManager<H: ResourceHandle, P: ClaimPolicy = DontClaimResources> {
    resources: ResourceManager<H>,
    policy: PhantomData<P>,
}

impl<H: ResourceHandle, P: ClaimPolicy> HardwareResourceManager<H, P> {
    pub fn new() -> Self {
        HardwareResourceManager {
            resources: ResourceManager::new(),
            policy: PhantomData,
        }
    }

    /// Readable name including handle type and policy, e.g.
    /// `HardwareResourceManager<CommandHandle, ClaimResources>`. Not unique across modules.
    pub fn type_name() -> String {
        format!("HardwareResourceManager<{}, {}>", tynm::type_name::<H>(), tynm::type_name::<P>())
    }

    pub fn register_handle(&mut self, handle: H) {
        debug!("🔵 Registering '{}' in {}", handle.name(), Self::type_name());
        self.resources.register_handle(handle);
    }

    pub fn resources(&self) -> &ResourceManager<H> {
        &self.resources
    }
}

impl<H: ResourceHandle> HardwareResourceManager<H, ClaimResources> {
    /// Returns the handle registered as `name` and claims it until claims are cleared.
    ///
    /// Fails with [`HardwareInterfaceError::ResourceNotFound`] for an unknown name and with the
    /// claim conflict of the underlying [`ResourceManager`] if the resource is already claimed.
    #[instrument(level = "debug", skip(self))]
    pub fn get_handle(&mut self, name: &str) -> Result<H, HardwareInterfaceError> {
        let handle = self.resources.get_handle(name).map_err(HardwareInterfaceError::from_lookup)?;
        self.resources.claim(name)?;
        Ok(handle)
    }
}

impl<H: ResourceHandle> HardwareResourceManager<H, DontClaimResources> {
    /// Returns the handle registered as `name` without claiming it.
    pub fn get_handle(&self, name: &str) -> Result<H, HardwareInterfaceError> {
        self.resources.get_handle(name).map_err(HardwareInterfaceError::from_lookup)
    }
}

impl<H: ResourceHandle, P: ClaimPolicy> Default for HardwareResourceManager<H, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ResourceHandle + 'static, P: ClaimPolicy> HardwareInterface for HardwareResourceManager<H, P> {
    fn interface_name(&self) -> String {
        Self::type_name()
    }

    fn get_names(&self) -> Vec<String> {
        self.resources.get_names()
    }

    fn claim(&mut self, name: &str) -> Result<(), ResourceError> {
        self.resources.claim(name)
    }

    fn is_claimed(&self, name: &str) -> bool {
        self.resources.is_claimed(name)
    }

    fn get_claims(&self) -> Vec<String> {
        self.resources.get_claims()
    }

    fn clear_claims(&mut self) {
        self.resources.clear_claims();
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
