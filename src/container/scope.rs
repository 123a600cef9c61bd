//! Invoke-scoped instance cache.

use std::collections::HashMap;

use crate::key::ComponentType;
use crate::traits::AnyValue;

/// Instances produced during a single `invoke` call.
///
/// Created empty at the start of every invocation and dropped when it
/// returns. Every parameter and every nested dependency resolved by that
/// invocation shares it, so an invoke-managed component is built at most
/// once per call.
#[derive(Default)]
pub(crate) struct InvokeScope {
    instances: HashMap<ComponentType, AnyValue>,
}

impl InvokeScope {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn get(&self, component: &ComponentType) -> Option<AnyValue> {
        self.instances.get(component).cloned()
    }

    pub(crate) fn insert(&mut self, component: ComponentType, value: AnyValue) {
        self.instances.insert(component, value);
    }
}
