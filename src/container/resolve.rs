//! Resolution engine.
//!
//! Resolves one component type at a time, recursing into the dependencies of
//! its factory. Container-managed components are cached on the container
//! for its whole lifetime; invoke-managed ones are cached in the
//! [`InvokeScope`] of the enclosing `invoke` call. Nothing is cached when a
//! factory returns an error.

use std::rc::Rc;

use super::scope::InvokeScope;
use super::Container;
use crate::error::{DiError, DiResult};
use crate::key::ComponentType;
use crate::lifetime::LifetimeScope;
use crate::registration::{FactoryInfo, Producer};
use crate::target::ErasedFunction;
use crate::traits::{AnyValue, IocContainer, ServiceLocator};

impl Container {
    /// Resolves `component`, producing it if no cached instance applies.
    pub(crate) fn resolve(&self, component: &ComponentType, scope: &mut InvokeScope) -> DiResult<AnyValue> {
        if let Some(view) = self.resolve_intrinsic(component) {
            return Ok(view);
        }

        let info = self
            .inner
            .registry
            .borrow()
            .get(component)
            .ok_or(DiError::InvalidResolveComponent(*component))?;

        let observers = &self.inner.options.observers;
        if observers.has_observers() {
            let start = std::time::Instant::now();
            observers.resolving(component);

            let result = self.resolve_registered(component, &info, scope);

            if result.is_ok() {
                observers.resolved(component, start.elapsed());
            }
            result
        } else {
            self.resolve_registered(component, &info, scope)
        }
    }

    /// Resolves each parameter in declaration order, stopping at the first error.
    pub(crate) fn resolve_arguments(
        &self,
        parameters: &[ComponentType],
        scope: &mut InvokeScope,
    ) -> DiResult<Vec<AnyValue>> {
        parameters
            .iter()
            .map(|parameter| self.resolve(parameter, scope))
            .collect()
    }

    #[inline]
    fn resolve_registered(
        &self,
        component: &ComponentType,
        info: &FactoryInfo,
        scope: &mut InvokeScope,
    ) -> DiResult<AnyValue> {
        match info.lifetime {
            LifetimeScope::ContainerManaged => self.resolve_container_managed(component, info, scope),
            LifetimeScope::InvokeManaged => self.resolve_invoke_managed(component, info, scope),
        }
    }

    // The container, under any of its three capability views
    fn resolve_intrinsic(&self, component: &ComponentType) -> Option<AnyValue> {
        if component.is::<Container>() {
            Some(Rc::new(self.clone()))
        } else if component.is::<Rc<dyn IocContainer>>() {
            let view: Rc<dyn IocContainer> = Rc::new(self.clone());
            Some(Rc::new(view))
        } else if component.is::<Rc<dyn ServiceLocator>>() {
            let view: Rc<dyn ServiceLocator> = Rc::new(self.clone());
            Some(Rc::new(view))
        } else {
            None
        }
    }

    fn resolve_container_managed(
        &self,
        component: &ComponentType,
        info: &FactoryInfo,
        scope: &mut InvokeScope,
    ) -> DiResult<AnyValue> {
        let cached = self.inner.cache.borrow().get(component).cloned();
        if let Some(value) = cached {
            return Ok(value);
        }

        // Dependencies share the caller's scope for their invoke-managed parts
        let value = match &info.producer {
            Producer::Instance(value) => value.clone(),
            Producer::Factory(function) => self.call_factory(function, scope)?,
        };

        self.inner.cache.borrow_mut().insert(*component, value.clone());
        Ok(value)
    }

    fn resolve_invoke_managed(
        &self,
        component: &ComponentType,
        info: &FactoryInfo,
        scope: &mut InvokeScope,
    ) -> DiResult<AnyValue> {
        if let Some(value) = scope.get(component) {
            return Ok(value);
        }

        let value = match &info.producer {
            Producer::Instance(value) => value.clone(),
            Producer::Factory(function) => self.call_factory(function, scope)?,
        };

        scope.insert(*component, value.clone());
        Ok(value)
    }

    fn call_factory(&self, function: &ErasedFunction, scope: &mut InvokeScope) -> DiResult<AnyValue> {
        let args = self.resolve_arguments(&function.parameters, scope)?;
        function.call(&args)?.into_first()
    }
}
