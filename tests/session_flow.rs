use std::time::Duration;

use studyflow::session::{
    AuthError, DEMO_EMAIL, DEMO_PASSWORD, MemorySessionStorage, SessionStorage, SessionStore,
    SqliteSessionStorage, authenticate, demo_user,
};

fn memory_store() -> SessionStore {
    let mut store = SessionStore::new(Box::new(MemorySessionStorage::new()), Duration::from_millis(1000));
    store.restore();
    store
}

#[tokio::test(start_paused = true)]
async fn valid_credentials_sign_in_after_delay() {
    let mut store = memory_store();
    let started = tokio::time::Instant::now();

    let user = store.login(DEMO_EMAIL, DEMO_PASSWORD).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(1000));
    assert_eq!(user.id, "1");
    assert!(store.is_authenticated());
    assert!(!store.is_loading());
    assert!(store.error().is_none());
    assert!(store.storage().load().unwrap().is_some());
}

#[tokio::test(start_paused = true)]
async fn invalid_credentials_record_error() {
    let mut store = memory_store();

    let err = store.login(DEMO_EMAIL, "wrong").await.unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(store.error(), Some("Credenciales inválidas"));
    assert!(!store.is_authenticated());
    assert!(!store.is_loading());
    assert!(store.storage().load().unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn concurrent_attempts_resolve_independently() {
    let delay = Duration::from_millis(1000);
    let good = tokio::spawn(authenticate(DEMO_EMAIL.into(), DEMO_PASSWORD.into(), delay));
    let bad = tokio::spawn(authenticate("otro@correo.com".into(), DEMO_PASSWORD.into(), delay));

    assert!(good.await.unwrap().is_ok());
    assert!(bad.await.unwrap().is_err());
}

#[test]
fn logout_then_restore_has_no_user() {
    let user = serde_json::to_string(&demo_user()).unwrap();
    let mut store = SessionStore::new(Box::new(MemorySessionStorage::with_value(user)), Duration::ZERO);
    store.restore();
    assert!(store.is_authenticated());

    store.logout().unwrap();
    assert!(!store.is_authenticated());
    store.restore();
    assert!(!store.is_authenticated());
}

#[test]
fn malformed_entry_is_discarded() {
    let mut store = SessionStore::new(
        Box::new(MemorySessionStorage::with_value("{not json")),
        Duration::ZERO,
    );
    assert!(store.is_loading());

    store.restore();

    assert!(!store.is_loading());
    assert!(!store.is_authenticated());
    assert!(store.storage().load().unwrap().is_none());
}

#[test]
fn sqlite_session_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");
    let path = path.to_str().unwrap();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .unwrap();

    {
        let storage = SqliteSessionStorage::new(path).unwrap();
        let mut store = SessionStore::new(Box::new(storage), Duration::from_millis(1000));
        store.restore();
        rt.block_on(store.login(DEMO_EMAIL, DEMO_PASSWORD)).unwrap();
    }

    let storage = SqliteSessionStorage::new(path).unwrap();
    let mut store = SessionStore::new(Box::new(storage), Duration::ZERO);
    store.restore();
    assert_eq!(store.user().map(|u| u.email.as_str()), Some(DEMO_EMAIL));

    store.logout().unwrap();
    let storage = SqliteSessionStorage::new(path).unwrap();
    assert!(storage.load().unwrap().is_none());
}
