mod sealed {
    /// Private supertrait so that only the two policies below can ever be used as a claim policy.
    pub trait ClaimPolicy: 'static + Default + Copy + std::fmt::Debug {}
}

/// Compile-time switch deciding whether retrieving a handle from a
/// [`HardwareResourceManager`](crate::HardwareResourceManager) also claims it.
///
/// The trait is sealed and carries no behavior: [`ClaimResources`] and [`DontClaimResources`] are the
/// only implementors, and each selects its own `get_handle`.
pub trait ClaimPolicy: sealed::ClaimPolicy {}

/// Retrieval claims the resource exclusively, used for handles that write to the hardware.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct ClaimResources;

/// Retrieval is a plain lookup, used for handles that only read from the hardware.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct DontClaimResources;

impl sealed::ClaimPolicy for ClaimResources {}
impl sealed::ClaimPolicy for DontClaimResources {}

impl ClaimPolicy for ClaimResources {}
impl ClaimPolicy for DontClaimResources {}
