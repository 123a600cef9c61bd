/// Unit tests for ComponentType and TypeKind

use ferrous_ioc::{component_type_of, ComponentType, TypeKind};
use std::any::TypeId;
use std::collections::HashSet;
use std::rc::Rc;

trait Plugin {}

#[test]
fn test_component_type_name() {
    let key = component_type_of::<String>();
    assert_eq!(key.name(), "alloc::string::String");
    assert_eq!(format!("{}", key), "alloc::string::String");
    assert!(!key.name().is_empty());
}

#[test]
fn test_component_type_id() {
    let key = ComponentType::of::<Vec<u8>>();
    assert_eq!(key.id(), TypeId::of::<Vec<u8>>());
    assert_ne!(key.id(), TypeId::of::<Vec<u16>>());
}

#[test]
fn test_component_type_kind() {
    assert_eq!(component_type_of::<u32>().kind(), TypeKind::Value);
    assert_eq!(component_type_of::<Box<u32>>().kind(), TypeKind::Pointer);
    assert_eq!(component_type_of::<Rc<dyn Plugin>>().kind(), TypeKind::Interface);
    assert!(component_type_of::<&'static str>().kind().is_pointer());
    assert!(!component_type_of::<Rc<dyn Plugin>>().kind().is_pointer());
}

#[test]
fn test_component_type_hash_set() {
    let mut set = HashSet::new();
    assert!(set.insert(component_type_of::<u8>()));
    assert!(set.insert(component_type_of::<u16>()));
    assert!(!set.insert(component_type_of::<u8>()));
    assert!(set.insert(component_type_of::<Rc<dyn Plugin>>()));
    assert_eq!(set.len(), 3);
}

#[test]
fn test_distinct_trait_object_views() {
    let rc = component_type_of::<Rc<dyn Plugin>>();
    let boxed = component_type_of::<Box<dyn Plugin>>();
    assert_ne!(rc, boxed);
    assert!(rc.is::<Rc<dyn Plugin>>());
    assert!(!rc.is::<Box<dyn Plugin>>());
}
