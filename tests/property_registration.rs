/// Property-based tests for registration
///
/// These tests generate registration sequences and check the invariants
/// that hold for all of them.

use ferrous_ioc::{Container, LifetimeScope, PointerPolicy, ContainerOptions, Target, TypeKind};
use proptest::prelude::*;
use std::rc::Rc;

#[derive(Debug, Clone)]
struct TestService {
    id: u32,
    name: String,
}

// Property: the last registration of a type wins
proptest! {
    #[test]
    fn last_registration_wins(ids in prop::collection::vec(0u32..1000, 1..10)) {
        let container = Container::new();
        for id in &ids {
            container
                .register(Target::value(TestService { id: *id, name: format!("service_{}", id) }))
                .unwrap();
        }

        let expected = *ids.last().unwrap();
        container
            .invoke(Target::function(move |s: TestService| {
                assert_eq!(s.id, expected);
                assert_eq!(s.name, format!("service_{}", expected));
            }))
            .unwrap();
        prop_assert_eq!(container.len(), 1);
    }
}

// Property: interleaving value and factory registrations leaves the last one's lifetime
proptest! {
    #[test]
    fn lifetime_follows_last_registration(as_factory in prop::collection::vec(any::<bool>(), 1..10)) {
        let container = Container::new();
        for (i, factory) in as_factory.iter().enumerate() {
            let id = i as u32;
            if *factory {
                container
                    .register(Target::function(move || TestService { id, name: String::new() }))
                    .unwrap();
            } else {
                container
                    .register(Target::value(TestService { id, name: String::new() }))
                    .unwrap();
            }
        }

        let descriptors = container.descriptors();
        prop_assert_eq!(descriptors.len(), 1);
        let expected = if *as_factory.last().unwrap() {
            LifetimeScope::InvokeManaged
        } else {
            LifetimeScope::ContainerManaged
        };
        prop_assert_eq!(descriptors[0].lifetime, expected);

        let last = (as_factory.len() - 1) as u32;
        container
            .invoke(Target::function(move |s: TestService| assert_eq!(s.id, last)))
            .unwrap();
    }
}

// Property: pointer-kind registration is decided by the policy alone
proptest! {
    #[test]
    fn pointer_policy_decides_pointer_registration(allow in any::<bool>(), value in any::<u32>()) {
        prop_assert_eq!(TypeKind::of::<Rc<u32>>(), TypeKind::Pointer);

        let policy = if allow { PointerPolicy::Allow } else { PointerPolicy::Reject };
        let container = Container::with_options(ContainerOptions::new().pointer_policy(policy));

        let result = container.register(Target::value(Rc::new(value)));
        prop_assert_eq!(result.is_ok(), allow);
        prop_assert_eq!(container.is_registered::<Rc<u32>>(), allow);

        // Plain values are unaffected
        prop_assert!(container.register(Target::value(value)).is_ok());
    }
}
