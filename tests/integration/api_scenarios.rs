//! End-to-end scenarios for the public API
//!
//! These run against the process-wide backend (the thread-affine default:
//! no backend is configured in the test environment), so each test sees an
//! isolated stack on its own test thread.

use ambient::{attach, create_key, current, detach, get_value, set_value, Context};

#[test]
fn test_value_scoped_to_attach_region() {
    let key = create_key("user");
    let base = current();
    let with_user = set_value(key.clone(), "alice".to_string(), Some(&base));

    let token = attach(with_user);
    let read = get_value(&key, None).expect("value visible while attached");
    assert_eq!(read.downcast::<String>().unwrap().as_str(), "alice");
    detach(token);

    assert!(get_value(&key, None).is_none());
}

#[test]
fn test_nested_attach_restores_in_reverse_order() {
    let key = create_key("depth");
    let outer = set_value(key.clone(), "outer".to_string(), None);
    let t1 = attach(outer);

    let inner = set_value(key.clone(), "inner".to_string(), None);
    let t2 = attach(inner);
    assert_eq!(
        current().get_as::<String>(&key).unwrap().as_str(),
        "inner"
    );

    detach(t2);
    assert_eq!(
        current().get_as::<String>(&key).unwrap().as_str(),
        "outer"
    );

    detach(t1);
    assert!(current().get(&key).is_none());
}

#[test]
fn test_set_value_builds_on_current_without_attaching() {
    let key = create_key("pending");
    let detached = set_value(key.clone(), 1u32, None);

    // nothing was attached, so the current context is unaffected
    assert!(current().get(&key).is_none());
    assert_eq!(*detached.get_as::<u32>(&key).unwrap(), 1);
}

#[test]
fn test_detach_with_foreign_token_is_harmless() {
    // a token minted on another thread can never match this thread's stack
    let foreign = std::thread::spawn(|| attach(Context::new()))
        .join()
        .unwrap();

    let key = create_key("survivor");
    let token = attach(set_value(key.clone(), "here".to_string(), None));

    detach(foreign); // logged and ignored
    assert_eq!(
        current().get_as::<String>(&key).unwrap().as_str(),
        "here"
    );

    detach(token);
    assert!(current().get(&key).is_none());
}

#[test]
fn test_fresh_unit_defaults_to_empty_context() {
    std::thread::spawn(|| {
        let key = create_key("anything");
        assert!(current().is_empty());
        assert!(get_value(&key, None).is_none());
    })
    .join()
    .unwrap();
}

#[test]
fn test_explicit_context_bypasses_current() {
    let key = create_key("explicit");
    let cx = set_value(key.clone(), 7i64, Some(&Context::new()));

    let attached_key = create_key("attached");
    let token = attach(set_value(attached_key.clone(), true, None));

    // explicit lookups never consult the attached context
    assert_eq!(
        *get_value(&key, Some(&cx)).unwrap().downcast::<i64>().unwrap(),
        7
    );
    assert!(get_value(&attached_key, Some(&cx)).is_none());

    detach(token);
}
