//! Diagnostic observers for container activity.
//!
//! This module provides hooks for observing registration, resolution and
//! invocation, enabling structured tracing and performance monitoring.
//! Observers are opt-in and never receive errors: failures are returned to
//! the caller, not reported on the side. A failed resolution shows up only
//! as a `resolving` event with no matching `resolved`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::key::ComponentType;
use crate::lifetime::LifetimeScope;

/// Observer trait for container events.
///
/// Observer calls are made synchronously on the calling thread. Keep
/// implementations lightweight. The container never leaves its thread, so
/// observers need not be `Send` or `Sync`.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, ContainerOptions, ComponentType, DiObserver, Target};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// struct TracingObserver {
///     trace_id: String,
/// }
///
/// impl DiObserver for TracingObserver {
///     fn resolving(&self, component: &ComponentType) {
///         println!("[{}] Resolving: {}", self.trace_id, component);
///     }
///
///     fn resolved(&self, component: &ComponentType, duration: Duration) {
///         println!("[{}] Resolved: {} in {:?}", self.trace_id, component, duration);
///     }
/// }
///
/// let options = ContainerOptions::new()
///     .observer(Arc::new(TracingObserver { trace_id: "run-123".to_string() }));
/// let container = Container::with_options(options);
/// container.register(Target::value(7u8)).unwrap();
/// container.invoke(Target::function(|n: u8| assert_eq!(n, 7))).unwrap();
/// ```
pub trait DiObserver {
    /// Called before a registered component is looked up and, if needed,
    /// produced.
    ///
    /// If production fails (a factory error or a missing nested
    /// dependency), no [`resolved`](Self::resolved) follows.
    fn resolving(&self, component: &ComponentType);

    /// Called after a component was resolved successfully.
    ///
    /// `duration` includes nested dependency resolution and cache lookups.
    fn resolved(&self, component: &ComponentType, duration: Duration);

    /// Called after a target was registered.
    fn registered(&self, _component: &ComponentType, _lifetime: LifetimeScope) {}

    /// Called after an invoker ran to completion without error.
    fn invoked(&self, _parameters: usize, _duration: Duration) {}
}

/// Container for registered observers.
///
/// Designed to have minimal overhead when no observers are registered.
#[derive(Clone, Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    #[inline]
    pub(crate) fn resolving(&self, component: &ComponentType) {
        for observer in &self.observers {
            observer.resolving(component);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, component: &ComponentType, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(component, duration);
        }
    }

    #[inline]
    pub(crate) fn registered(&self, component: &ComponentType, lifetime: LifetimeScope) {
        for observer in &self.observers {
            observer.registered(component, lifetime);
        }
    }

    #[inline]
    pub(crate) fn invoked(&self, parameters: usize, duration: Duration) {
        for observer in &self.observers {
            observer.invoked(parameters, duration);
        }
    }
}

/// Built-in observer that logs events to stdout.
///
/// Useful for development and debugging. For production use, implement
/// [`DiObserver`] on top of your logging infrastructure.
///
/// # Examples
///
/// ```
/// use ferrous_ioc::{Container, ContainerOptions, LoggingObserver};
/// use std::sync::Arc;
///
/// let options = ContainerOptions::new().observer(Arc::new(LoggingObserver::new()));
/// // All registrations, resolutions and invocations will be logged to stdout
/// let container = Container::with_options(options);
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[ferrous-ioc]".to_string(),
        }
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, component: &ComponentType) {
        println!("{} Resolving: {}", self.prefix, component);
    }

    fn resolved(&self, component: &ComponentType, duration: Duration) {
        println!("{} Resolved: {} in {:?}", self.prefix, component, duration);
    }

    fn registered(&self, component: &ComponentType, lifetime: LifetimeScope) {
        println!("{} Registered: {} ({})", self.prefix, component, lifetime);
    }

    fn invoked(&self, parameters: usize, duration: Duration) {
        println!("{} Invoked with {} parameters in {:?}", self.prefix, parameters, duration);
    }
}

/// Counting observer for post-run analysis.
///
/// Collects resolution counts and timings plus registration and invocation
/// totals.
pub struct MetricsObserver {
    resolution_count: AtomicU64,
    total_resolution_time: AtomicU64,
    registration_count: AtomicU64,
    invocation_count: AtomicU64,
}

impl MetricsObserver {
    /// Creates a new metrics observer.
    pub fn new() -> Self {
        Self {
            resolution_count: AtomicU64::new(0),
            total_resolution_time: AtomicU64::new(0),
            registration_count: AtomicU64::new(0),
            invocation_count: AtomicU64::new(0),
        }
    }

    /// Gets the total number of resolutions observed.
    pub fn resolution_count(&self) -> u64 {
        self.resolution_count.load(Ordering::Relaxed)
    }

    /// Gets the average resolution time.
    pub fn average_resolution_time(&self) -> Option<Duration> {
        let count = self.resolution_count();
        if count == 0 {
            return None;
        }

        let total_ns = self.total_resolution_time.load(Ordering::Relaxed);
        Some(Duration::from_nanos(total_ns / count))
    }

    /// Gets the total resolution time.
    pub fn total_resolution_time(&self) -> Duration {
        Duration::from_nanos(self.total_resolution_time.load(Ordering::Relaxed))
    }

    pub fn registration_count(&self) -> u64 {
        self.registration_count.load(Ordering::Relaxed)
    }

    pub fn invocation_count(&self) -> u64 {
        self.invocation_count.load(Ordering::Relaxed)
    }

    /// Resets all metrics.
    pub fn reset(&self) {
        self.resolution_count.store(0, Ordering::Relaxed);
        self.total_resolution_time.store(0, Ordering::Relaxed);
        self.registration_count.store(0, Ordering::Relaxed);
        self.invocation_count.store(0, Ordering::Relaxed);
    }
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for MetricsObserver {
    fn resolving(&self, _component: &ComponentType) {}

    fn resolved(&self, _component: &ComponentType, duration: Duration) {
        self.resolution_count.fetch_add(1, Ordering::Relaxed);
        self.total_resolution_time
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    fn registered(&self, _component: &ComponentType, _lifetime: LifetimeScope) {
        self.registration_count.fetch_add(1, Ordering::Relaxed);
    }

    fn invoked(&self, _parameters: usize, _duration: Duration) {
        self.invocation_count.fetch_add(1, Ordering::Relaxed);
    }
}
