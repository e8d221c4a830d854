use graft_di::{
    Component, Container, ConstructorCatalog, InjectError, InstanceFactory, Registration,
    SubtypeTable, TypeIdentity,
};
use std::sync::Arc;

struct Endpoint {
    address: &'static str,
}

fn empty_container() -> Container {
    Container::new(Arc::new(ConstructorCatalog::new()))
}

fn instance_registration<T: std::any::Any + Send + Sync>(value: T) -> Registration {
    let identity = TypeIdentity::of::<T>();
    let mut component = Component::new(
        identity.clone(),
        identity,
        Arc::new(SubtypeTable::new()),
    )
    .unwrap();
    component.set_instance(value).unwrap();
    Registration::new(component)
}

#[test]
fn test_instance_registration_resolves_same_object() {
    let mut container = empty_container();
    container
        .register(instance_registration(Endpoint { address: "10.0.0.1" }))
        .unwrap();

    let identity = TypeIdentity::of::<Endpoint>();
    let first = container.resolve_as::<Endpoint>(&identity).unwrap();
    let second = container.resolve_as::<Endpoint>(&identity).unwrap();

    assert_eq!(first.address, "10.0.0.1");
    assert!(Arc::ptr_eq(&first, &second)); // Reference equality
}

#[test]
fn test_factory_registration_resolves_distinct_objects() {
    let identity = TypeIdentity::of::<Endpoint>();
    let mut component = Component::new(
        identity.clone(),
        identity.clone(),
        Arc::new(SubtypeTable::new()),
    )
    .unwrap();
    component
        .set_factory(InstanceFactory::new(|| Endpoint { address: "10.0.0.2" }))
        .unwrap();

    let mut container = empty_container();
    container.register(Registration::new(component)).unwrap();

    let first = container.resolve_as::<Endpoint>(&identity).unwrap();
    let second = container.resolve_as::<Endpoint>(&identity).unwrap();

    assert_eq!(first.address, "10.0.0.2");
    assert_eq!(second.address, "10.0.0.2");
    assert!(!Arc::ptr_eq(&first, &second)); // Fresh instance per call
}

#[test]
fn test_named_registrations_resolve_independently() {
    let identity = TypeIdentity::of::<Endpoint>();
    let checker = Arc::new(SubtypeTable::new());
    let mut container = empty_container();

    for (name, address) in [("primary", "10.0.0.1"), ("fallback", "10.0.0.2")] {
        let mut component =
            Component::new(identity.clone(), identity.clone(), checker.clone()).unwrap();
        component.set_instance(Endpoint { address }).unwrap();
        container
            .register(Registration::named(component, name))
            .unwrap();
    }

    let primary = container
        .resolve_named_as::<Endpoint>(&identity, "primary")
        .unwrap();
    let fallback = container
        .resolve_named_as::<Endpoint>(&identity, "fallback")
        .unwrap();

    assert_eq!(primary.address, "10.0.0.1");
    assert_eq!(fallback.address, "10.0.0.2");
    assert!(!Arc::ptr_eq(&primary, &fallback));

    // The unnamed slot stays empty
    let unnamed = container.resolve(&identity);
    assert!(matches!(unnamed, Err(InjectError::NotRegistered { .. })));
}

#[test]
fn test_duplicate_unnamed_registration_is_rejected() {
    let mut container = empty_container();
    container
        .register(instance_registration(Endpoint { address: "a" }))
        .unwrap();

    let result = container.register(instance_registration(Endpoint { address: "b" }));
    match result {
        Err(InjectError::DuplicateRegistration { key }) => {
            assert_eq!(key, TypeIdentity::of::<Endpoint>().key());
        }
        other => panic!("expected DuplicateRegistration, got {:?}", other),
    }

    // The first registration survives untouched
    let survivor = container
        .resolve_as::<Endpoint>(&TypeIdentity::of::<Endpoint>())
        .unwrap();
    assert_eq!(survivor.address, "a");
}

#[test]
fn test_resolving_unregistered_type_is_not_registered() {
    let container = empty_container();
    let result = container.resolve(&TypeIdentity::raw("ghost::Service"));

    match result {
        Err(InjectError::NotRegistered { key }) => assert_eq!(key, "ghost::Service"),
        other => panic!("expected NotRegistered, got {:?}", other),
    }
}

#[test]
fn test_resolving_unknown_name_is_not_registered() {
    let mut container = empty_container();
    container
        .register(instance_registration(Endpoint { address: "a" }))
        .unwrap();

    let result = container.resolve_named(&TypeIdentity::of::<Endpoint>(), "missing");
    assert!(matches!(result, Err(InjectError::NotRegistered { .. })));
}

#[test]
fn test_resolving_empty_identity_is_null_argument() {
    let mut container = empty_container();
    container
        .register(instance_registration(Endpoint { address: "a" }))
        .unwrap();

    // Fails before any registry lookup
    let result = container.resolve(&TypeIdentity::raw(""));
    assert!(matches!(result, Err(InjectError::NullArgument(_))));
}

#[test]
fn test_register_all_registers_every_item() {
    let mut container = empty_container();
    container
        .register_all([
            instance_registration(Endpoint { address: "a" }),
            instance_registration(7usize),
            instance_registration("label".to_string()),
        ])
        .unwrap();

    assert_eq!(container.providers().count(), 3);
    assert_eq!(
        *container.resolve_as::<usize>(&TypeIdentity::of::<usize>()).unwrap(),
        7
    );
}

#[test]
fn test_register_all_stops_at_first_failure() {
    let mut container = empty_container();
    let result = container.register_all([
        instance_registration(Endpoint { address: "a" }),
        instance_registration(Endpoint { address: "b" }),
        instance_registration(7usize),
    ]);

    assert!(matches!(result, Err(InjectError::DuplicateRegistration { .. })));
    // The item after the failure was never registered
    let usize_result = container.resolve(&TypeIdentity::of::<usize>());
    assert!(matches!(usize_result, Err(InjectError::NotRegistered { .. })));
}

#[test]
fn test_registry_view_exposes_providers() {
    let mut container = empty_container();
    container
        .register(instance_registration(Endpoint { address: "a" }))
        .unwrap();

    let identity = TypeIdentity::of::<Endpoint>();
    let provider = container.provider_for(&identity).unwrap();
    assert_eq!(provider.provided_type(), &identity);
    assert_eq!(provider.len(), 1);
    assert!(container.provider_for(&TypeIdentity::raw("ghost")).is_none());
}

#[test]
fn test_resolve_as_with_wrong_type_is_type_mismatch() {
    let mut container = empty_container();
    container
        .register(instance_registration(Endpoint { address: "a" }))
        .unwrap();

    let result = container.resolve_as::<String>(&TypeIdentity::of::<Endpoint>());
    assert!(matches!(result, Err(InjectError::TypeMismatch(_))));
}
