// Container options: builder, environment and JSON sources

use ferrous_ioc::{
    ComponentType, Container, ContainerOptions, DiError, DiObserver, LifetimeScope, MetricsObserver,
    OptionsConfig, PointerPolicy, Target, DEFAULT_ENV_PREFIX,
};
use serial_test::serial;
use std::cell::{Cell, RefCell};
use std::env;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

const POLICY_VAR: &str = "FERROUS_IOC_POINTER_POLICY";

#[test]
fn test_default_prefix() {
    assert_eq!(DEFAULT_ENV_PREFIX, "FERROUS_IOC");
}

#[test]
fn test_allow_policy_registers_pointer_kinds() {
    let container = Container::with_options(ContainerOptions::new().pointer_policy(PointerPolicy::Allow));
    container.register(Target::value(Rc::new(String::from("shared")))).unwrap();

    container
        .invoke(Target::function(|shared: Rc<String>| assert_eq!(shared.as_str(), "shared")))
        .unwrap();
}

#[test]
fn test_interface_kinds_accepted_under_reject() {
    trait Clock {
        fn now(&self) -> u64;
    }
    struct Fixed;
    impl Clock for Fixed {
        fn now(&self) -> u64 {
            42
        }
    }

    let container = Container::new();
    assert_eq!(container.options().config().pointer_policy, PointerPolicy::Reject);

    let clock: Rc<dyn Clock> = Rc::new(Fixed);
    container.register(Target::value(clock)).unwrap();
    container
        .invoke(Target::function(|clock: Rc<dyn Clock>| assert_eq!(clock.now(), 42)))
        .unwrap();
}

#[test]
#[serial]
fn test_from_env_unset_uses_defaults() {
    env::remove_var(POLICY_VAR);
    let options = ContainerOptions::from_env().unwrap();
    assert_eq!(options.config(), OptionsConfig::default());
}

#[test]
#[serial]
fn test_from_env_reads_pointer_policy() {
    env::set_var(POLICY_VAR, "Allow");
    let options = ContainerOptions::from_env();
    env::remove_var(POLICY_VAR);

    let container = Container::with_options(options.unwrap());
    assert!(container.register(Target::value(Box::new(3u8))).is_ok());
}

#[test]
#[serial]
fn test_from_env_rejects_unknown_policy() {
    env::set_var(POLICY_VAR, "maybe");
    let result = ContainerOptions::from_env();
    env::remove_var(POLICY_VAR);

    match result {
        Err(DiError::InvalidConfig(msg)) => assert!(msg.contains("maybe")),
        other => panic!("expected InvalidConfig, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_from_env_with_custom_prefix() {
    env::set_var("MY_APP_POINTER_POLICY", "allow");
    env::set_var(POLICY_VAR, "reject");
    let options = ContainerOptions::from_env_with_prefix("my_app");
    env::remove_var("MY_APP_POINTER_POLICY");
    env::remove_var(POLICY_VAR);

    assert_eq!(options.unwrap().config().pointer_policy, PointerPolicy::Allow);
}

#[test]
fn test_metrics_observer_counts_activity() {
    #[derive(Clone)]
    struct Repo;
    #[derive(Clone)]
    struct Handler;

    let metrics = Arc::new(MetricsObserver::new());
    let container = Container::with_options(ContainerOptions::new().observer(metrics.clone()));
    container.register(Target::value(Repo)).unwrap();
    container.register(Target::function(|_: Repo| Handler)).unwrap();

    container.invoke(Target::function(|_: Handler| ())).unwrap();
    container.invoke(Target::function(|_: Handler, _: Repo| ())).unwrap();

    assert_eq!(metrics.registration_count(), 2);
    assert_eq!(metrics.invocation_count(), 2);
    // Handler twice, Repo as its dependency twice, Repo directly once
    assert_eq!(metrics.resolution_count(), 5);
}

#[test]
fn test_observers_skip_failures_and_intrinsics() {
    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl DiObserver for Recorder {
        fn resolving(&self, component: &ComponentType) {
            self.events.lock().unwrap().push(format!("resolving {}", component.name()));
        }

        fn resolved(&self, component: &ComponentType, _duration: Duration) {
            self.events.lock().unwrap().push(format!("resolved {}", component.name()));
        }

        fn registered(&self, component: &ComponentType, lifetime: LifetimeScope) {
            self.events
                .lock()
                .unwrap()
                .push(format!("registered {} {}", component.name(), lifetime));
        }

        fn invoked(&self, parameters: usize, _duration: Duration) {
            self.events.lock().unwrap().push(format!("invoked {}", parameters));
        }
    }

    #[derive(Clone)]
    struct Missing;

    let recorder = Arc::new(Recorder::default());
    let container = Container::with_options(ContainerOptions::new().observer(recorder.clone()));
    container.register(Target::value(9u16)).unwrap();

    container.invoke(Target::function(|_: u16, _: Container| ())).unwrap();
    assert!(container.invoke(Target::function(|_: Missing| ())).is_err());

    let events = recorder.events.lock().unwrap();
    assert_eq!(
        *events,
        vec![
            "registered u16 container-managed".to_string(),
            "resolving u16".to_string(),
            "resolved u16".to_string(),
            "invoked 2".to_string(),
        ]
    );
}

#[cfg(feature = "config")]
mod json {
    use super::*;

    #[test]
    fn test_from_json() {
        let options = ContainerOptions::from_json(r#"{"pointer_policy": "allow"}"#).unwrap();
        assert_eq!(options.config().pointer_policy, PointerPolicy::Allow);

        let options = ContainerOptions::from_json("{}").unwrap();
        assert_eq!(options.config(), OptionsConfig::default());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(matches!(
            ContainerOptions::from_json(r#"{"pointer_policy": "never"}"#),
            Err(DiError::InvalidConfig(_))
        ));
        assert!(matches!(
            ContainerOptions::from_json("not json"),
            Err(DiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_config_serializes_lowercase() {
        let config = OptionsConfig { pointer_policy: PointerPolicy::Reject };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"pointer_policy":"reject"}"#);
    }
}

#[test]
fn test_failed_resolution_has_no_resolved_event() {
    #[derive(Default)]
    struct Trace {
        events: RefCell<Vec<String>>,
        resolved: Cell<u32>,
    }

    impl DiObserver for Trace {
        fn resolving(&self, component: &ComponentType) {
            self.events.borrow_mut().push(format!("resolving {}", component.name()));
        }

        fn resolved(&self, component: &ComponentType, _duration: Duration) {
            self.resolved.set(self.resolved.get() + 1);
            self.events.borrow_mut().push(format!("resolved {}", component.name()));
        }
    }

    #[derive(Debug)]
    struct Offline;
    impl std::fmt::Display for Offline {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("offline")
        }
    }
    impl std::error::Error for Offline {}

    #[derive(Clone)]
    struct Uplink;

    // Single-threaded observers built on Cell and RefCell are accepted
    let trace = Arc::new(Trace::default());
    let container = Container::with_options(ContainerOptions::new().observer(trace.clone()));
    container
        .register(Target::fallible(|| -> Result<Uplink, Offline> { Err(Offline) }))
        .unwrap();

    assert!(container.invoke(Target::function(|_: Uplink| ())).is_err());

    let name = std::any::type_name::<Uplink>();
    assert_eq!(*trace.events.borrow(), vec![format!("resolving {}", name)]);
    assert_eq!(trace.resolved.get(), 0);
}
