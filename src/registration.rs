//! Factory registration types.

use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{DiError, DiResult};
use crate::key::ComponentType;
use crate::lifetime::LifetimeScope;
use crate::target::{ErasedFunction, Target, TargetKind};
use crate::traits::AnyValue;

/// How a component is produced.
pub(crate) enum Producer {
    /// The registered value itself
    Instance(AnyValue),
    /// A function whose parameters are resolved recursively
    Factory(ErasedFunction),
}

/// Registration with lifetime and producer
pub(crate) struct FactoryInfo {
    pub(crate) producer: Producer,
    pub(crate) lifetime: LifetimeScope,
}

impl FactoryInfo {
    /// Splits a target into the component type it produces and its factory info.
    ///
    /// Functions are keyed by their first declared result and are always
    /// invoke-managed; values are keyed by their own type and are always
    /// container-managed.
    pub(crate) fn from_target(target: Target) -> DiResult<(ComponentType, FactoryInfo)> {
        match target.kind {
            TargetKind::Value { component, value } => Ok((
                component,
                FactoryInfo {
                    producer: Producer::Instance(value),
                    lifetime: LifetimeScope::ContainerManaged,
                },
            )),
            TargetKind::Function(function) => {
                function.check_declared()?;
                let component = *function.results.first().ok_or(DiError::RequireResponse)?;
                Ok((
                    component,
                    FactoryInfo {
                        producer: Producer::Factory(function),
                        lifetime: LifetimeScope::InvokeManaged,
                    },
                ))
            }
        }
    }

    /// Dependency list, in declaration order.
    pub(crate) fn parameter_types(&self) -> &[ComponentType] {
        match &self.producer {
            Producer::Instance(_) => &[],
            Producer::Factory(function) => &function.parameters,
        }
    }

    pub(crate) fn is_callable(&self) -> bool {
        matches!(self.producer, Producer::Factory(_))
    }
}

/// Factory registry keyed by component type.
///
/// Entries are shared out as `Rc` so the registry is never borrowed while
/// a factory runs; factories may register or invoke re-entrantly.
#[derive(Default)]
pub(crate) struct Registry {
    factories: HashMap<ComponentType, Rc<FactoryInfo>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the factory for `component`.
    pub(crate) fn insert(&mut self, component: ComponentType, info: FactoryInfo) {
        self.factories.insert(component, Rc::new(info));
    }

    #[inline]
    pub(crate) fn get(&self, component: &ComponentType) -> Option<Rc<FactoryInfo>> {
        self.factories.get(component).cloned()
    }

    #[inline]
    pub(crate) fn contains_key(&self, component: &ComponentType) -> bool {
        self.factories.contains_key(component)
    }

    pub(crate) fn len(&self) -> usize {
        self.factories.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&ComponentType, &FactoryInfo)> {
        self.factories.iter().map(|(k, info)| (k, info.as_ref()))
    }
}
