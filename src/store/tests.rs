use super::*;
use tempfile::TempDir;

fn test_store() -> (UserStore, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = UserStore::open(dir.path()).unwrap();
    (store, dir)
}

#[test]
fn register_and_get() {
    let (store, _dir) = test_store();
    let user = store.register_user("  alice ").unwrap();
    assert_eq!(user.name, "alice");
    assert_eq!(user.highscore, 0);
    assert!(user.last_played.is_none());

    let loaded = store.user("alice").unwrap().unwrap();
    assert_eq!(loaded, user);
}

#[test]
fn duplicate_registration_fails() {
    let (store, _dir) = test_store();
    store.register_user("alice").unwrap();

    let err = store.register_user("alice").unwrap_err();
    assert!(matches!(err, StoreError::DuplicateUser(ref name) if name == "alice"));
    assert_eq!(err.to_string(), "name already exists: alice");
    assert_eq!(store.list_users().unwrap().len(), 1);
}

#[test]
fn blank_name_rejected() {
    let (store, _dir) = test_store();
    assert!(matches!(store.register_user("   "), Err(StoreError::BlankName)));
}

#[test]
fn highscore_keeps_best() {
    let (mut store, _dir) = test_store();
    store.register_user("bob").unwrap();

    assert_eq!(store.record_session("bob", 10).unwrap(), 10);
    assert_eq!(store.record_session("bob", 25).unwrap(), 25);
    assert_eq!(store.record_session("bob", 7).unwrap(), 25);
    assert_eq!(store.highscore("bob").unwrap(), Some(25));

    let scores: Vec<u32> = store
        .sessions("bob")
        .unwrap()
        .iter()
        .map(|s| s.score)
        .collect();
    assert_eq!(scores, vec![10, 25, 7]);
    assert!(store.user("bob").unwrap().unwrap().last_played.is_some());
}

#[test]
fn unknown_player_session_rejected() {
    let (mut store, _dir) = test_store();
    assert!(matches!(
        store.record_session("ghost", 3),
        Err(StoreError::UnknownUser(_))
    ));
    assert!(store.sessions("ghost").unwrap().is_empty());
    assert_eq!(store.highscore("ghost").unwrap(), None);
}

#[test]
fn list_orders_by_highscore() {
    let mut store = UserStore::open_in_memory().unwrap();
    for name in ["ann", "ben", "cat"] {
        store.register_user(name).unwrap();
    }
    store.record_session("ben", 40).unwrap();
    store.record_session("cat", 12).unwrap();

    let names: Vec<String> = store.list_users().unwrap().into_iter().map(|u| u.name).collect();
    assert_eq!(names, vec!["ben", "cat", "ann"]);
}

#[test]
fn reopen_keeps_players() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = UserStore::open(dir.path()).unwrap();
        store.register_user("dora").unwrap();
        store.record_session("dora", 18).unwrap();
    }
    let store = UserStore::open(dir.path()).unwrap();
    assert_eq!(store.highscore("dora").unwrap(), Some(18));
    assert!(dir.path().join(DB_FILE).exists());
}
