//! Lifecycle of the enhancement instance attached to the live select
use crate::dom::SelectElement;
use crate::errors::ComboBoxError;
use crate::types::InstanceHandle;
use log::debug;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// What the enhancement library is constructed with.
#[derive(Debug, Clone, PartialEq)]
pub struct EnhancementSettings {
    pub options: Map<String, Value>,
    pub plugins: Vec<String>,
    /// Whether option search goes through the remote bridge.
    pub remote_load: bool,
}

/// Seam to the third-party selection-enhancement library.
pub trait Enhancer {
    fn construct(
        &mut self,
        element: &SelectElement,
        settings: &EnhancementSettings,
    ) -> Result<InstanceHandle, ComboBoxError>;

    /// Tears the instance down and detaches every listener it installed.
    fn destroy(&mut self, handle: InstanceHandle);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetInstance {
    pub element_id: String,
    pub handle: InstanceHandle,
    /// Counts constructions over the adapter's lifetime, starting at 1.
    pub generation: u64,
}

/// Owns the element-id -> instance registry; holds at most one entry.
pub struct WidgetAdapter<E: Enhancer> {
    enhancer: E,
    instances: HashMap<String, WidgetInstance>,
    generation: u64,
}

impl<E: Enhancer> WidgetAdapter<E> {
    pub fn new(enhancer: E) -> Self {
        WidgetAdapter {
            enhancer,
            instances: HashMap::new(),
            generation: 0,
        }
    }

    pub fn enhancer(&self) -> &E {
        &self.enhancer
    }

    pub fn enhancer_mut(&mut self) -> &mut E {
        &mut self.enhancer
    }

    pub fn instance(&self) -> Option<&WidgetInstance> {
        self.instances.values().next()
    }

    pub fn instance_for(&self, element_id: &str) -> Option<&WidgetInstance> {
        self.instances.get(element_id)
    }

    pub fn is_attached(&self) -> bool {
        !self.instances.is_empty()
    }

    /// Fails with `AlreadyAttached` while any instance exists; callers must
    /// destroy first. This is an `Err` in every build profile rather than a
    /// debug assertion, and `rebuild` is the only destroy-then-construct path.
    pub fn construct(
        &mut self,
        live: &SelectElement,
        settings: &EnhancementSettings,
    ) -> Result<&WidgetInstance, ComboBoxError> {
        if let Some(existing) = self.instance() {
            return Err(ComboBoxError::AlreadyAttached {
                element_id: existing.element_id.clone(),
            });
        }

        let handle = self.enhancer.construct(live, settings)?;
        self.generation += 1;
        debug!(
            "combo box: constructed instance {:?} (generation {}) on '{}'",
            handle, self.generation, live.id
        );

        let instance = WidgetInstance {
            element_id: live.id.clone(),
            handle,
            generation: self.generation,
        };
        let instance: &WidgetInstance = self.instances.entry(live.id.clone()).or_insert(instance);
        Ok(instance)
    }

    /// Idempotent. Returns whether an instance was torn down.
    pub fn destroy(&mut self) -> bool {
        let mut destroyed = false;
        for (element_id, instance) in self.instances.drain() {
            debug!(
                "combo box: destroying instance {:?} on '{}'",
                instance.handle, element_id
            );
            self.enhancer.destroy(instance.handle);
            destroyed = true;
        }
        destroyed
    }

    /// Copies the authoritative options verbatim into `live`, then replaces
    /// the instance. The only path that discards live interaction state.
    pub fn rebuild(
        &mut self,
        authoritative: &SelectElement,
        live: &mut SelectElement,
        settings: &EnhancementSettings,
    ) -> Result<&WidgetInstance, ComboBoxError> {
        live.replace_options(&authoritative.options);
        self.destroy();
        self.construct(live, settings)
    }
}
