//! Backend registry and selector resolution

use std::sync::Arc;

use ambient::backend::{RuntimeContextBackend, TaskLocalBackend, ThreadLocalBackend, Token};
use ambient::config::ContextConfig;
use ambient::selector::resolve_backend;
use ambient::{register_backend, Context, ContextError};

#[test]
fn test_builtin_variants_resolve_by_name() {
    for name in [ThreadLocalBackend::NAME, TaskLocalBackend::NAME] {
        let config = ContextConfig {
            backend: name.to_string(),
        };
        let backend = resolve_backend(&config).unwrap();
        assert_eq!(backend.name(), name);
    }
}

#[test]
fn test_unknown_backend_name_is_reported() {
    let config = ContextConfig {
        backend: "gevent".to_string(),
    };
    match resolve_backend(&config) {
        Err(ContextError::UnknownBackend(name)) => assert_eq!(name, "gevent"),
        other => panic!("expected UnknownBackend, got {:?}", other.map(|b| b.name())),
    }
}

#[derive(Debug)]
struct RecordingBackend;

impl RuntimeContextBackend for RecordingBackend {
    fn current(&self) -> Context {
        Context::new()
    }

    fn attach(&self, context: Context) -> Token {
        ThreadLocalBackend::new().attach(context)
    }

    fn detach(&self, token: Token) -> Result<(), ContextError> {
        ThreadLocalBackend::new().detach(token)
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

fn make_recording() -> Result<Arc<dyn RuntimeContextBackend>, ContextError> {
    Ok(Arc::new(RecordingBackend))
}

#[test]
fn test_registered_external_backend_resolves() {
    register_backend("recording", make_recording);

    let config = ContextConfig {
        backend: "recording".to_string(),
    };
    let backend = resolve_backend(&config).unwrap();
    assert_eq!(backend.name(), "recording");
}

#[test]
fn test_resolution_satisfies_the_backend_contract() {
    let backend = resolve_backend(&ContextConfig::default()).unwrap();
    let key = ambient::create_key("probe");

    assert!(backend.current().get(&key).is_none());
    let token = backend.attach(backend.current().with_value(key.clone(), 3u16));
    assert_eq!(*backend.current().get_as::<u16>(&key).unwrap(), 3);
    backend.detach(token).unwrap();
    assert!(backend.current().get(&key).is_none());
}
