use crate::resource_handle::ResourceHandle;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;
use tracing::{debug, warn};

/// Name-indexed storage of resource handles of a single type, plus the set of claimed names.
///
/// Every claimed name is always a registered name: [`ResourceManager::claim`] refuses unknown names
/// and handles can't be removed once registered.
#[derive(Debug)]
pub struct ResourceManager<H: ResourceHandle> {
    handles: HashMap<String, H>,
    claims: BTreeSet<String>,
}

impl<H: ResourceHandle> ResourceManager<H> {
    pub fn new() -> Self {
        ResourceManager {
            handles: HashMap::new(),
            claims: BTreeSet::new(),
        }
    }

    /// Registers a handle under its own name, replacing any handle previously registered with that name.
    pub fn register_handle(&mut self, handle: H) {
        let name = handle.name().to_owned();
        if self.handles.insert(name.clone(), handle).is_some() {
            warn!("⚠️ Replaced previously registered handle '{}' in {}", name, handle_type::<H>());
        } else {
            debug!("🔵 Registered handle '{}' in {}", name, handle_type::<H>());
        }
    }

    pub fn get_handle(&self, name: &str) -> Result<H, ResourceError> {
        self.handles.get(name).cloned().ok_or_else(|| ResourceError::NotFound {
            name: name.to_owned(),
            handle_type: handle_type::<H>(),
        })
    }

    /// Returns the names of all registered handles, sorted.
    pub fn get_names(&self) -> Vec<String> {
        let mut names = self.handles.keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Marks `name` as exclusively claimed until the next [`ResourceManager::clear_claims`].
    pub fn claim(&mut self, name: &str) -> Result<(), ResourceError> {
        if !self.contains(name) {
            return Err(ResourceError::NotFound {
                name: name.to_owned(),
                handle_type: handle_type::<H>(),
            });
        }

        if !self.claims.insert(name.to_owned()) {
            return Err(ResourceError::AlreadyClaimed { name: name.to_owned() });
        }

        debug!("🔒 Claimed '{}'", name);
        Ok(())
    }

    pub fn is_claimed(&self, name: &str) -> bool {
        self.claims.contains(name)
    }

    /// Returns the claimed names, sorted.
    pub fn get_claims(&self) -> Vec<String> {
        self.claims.iter().cloned().collect()
    }

    pub fn clear_claims(&mut self) {
        self.claims.clear();
    }
}

impl<H: ResourceHandle> Default for ResourceManager<H> {
    fn default() -> Self {
        Self::new()
    }
}

fn handle_type<H>() -> String {
    tynm::type_name::<H>()
}

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ResourceError {
    #[error("could not find resource '{name}' in '{handle_type}'")]
    NotFound { name: String, handle_type: String },
    #[error("resource '{name}' is already claimed")]
    AlreadyClaimed { name: String },
}
