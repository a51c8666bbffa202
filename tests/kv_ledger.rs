use barkeep::{
    core::store::{SessionSnapshot, SessionStore},
    drink::{Drink, IngredientSlot},
    persist::{self, KvStore, memory::MemoryKvStore, sqlite::SqliteKvStore},
};

fn margarita() -> Drink {
    let mut drink = Drink::new("11007", "Margarita");
    drink.category = Some("Ordinary Drink".to_string());
    drink.glass = Some("Cocktail glass".to_string());
    drink.ingredients = vec![IngredientSlot {
        ingredient: Some("Tequila".to_string()),
        measure: Some("1 1/2 oz".to_string()),
    }];
    drink
}

#[test]
fn sqlite_kv_round_trips_and_survives_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("ledger.db");

    {
        let mut kv = SqliteKvStore::open(&path).expect("open");
        persist::save_favorites(&mut kv, &[margarita()]).expect("save");
        persist::save_scroll(&mut kv, 240).expect("save scroll");
    }

    let kv = SqliteKvStore::open(&path).expect("reopen");
    let favorites = persist::load_favorites(&kv).expect("load").expect("present");
    assert_eq!(favorites, vec![margarita()]);
    assert_eq!(persist::load_scroll(&kv).expect("load"), Some(240));
}

#[test]
fn sqlite_set_overwrites_and_remove_deletes() {
    let mut kv = SqliteKvStore::open_in_memory().expect("open");
    kv.set("k", "one").expect("set");
    kv.set("k", "two").expect("set");
    assert_eq!(kv.get("k").expect("get"), Some("two".to_string()));

    kv.remove("k").expect("remove");
    assert_eq!(kv.get("k").expect("get"), None);
    // Removing an absent key is not an error.
    kv.remove("k").expect("remove absent");
}

#[test]
fn snapshot_round_trip_through_the_ledger() {
    let mut kv = MemoryKvStore::new();
    let mut store = SessionStore::new();
    store.start_loading("vodka");
    store.set_results(Some(vec![margarita()]));

    persist::save_snapshot(&mut kv, &store.export_snapshot()).expect("save");

    let loaded = persist::load_snapshot(&kv).expect("load").expect("present");
    let mut fresh = SessionStore::new();
    fresh.restore_snapshot(loaded);
    assert_eq!(fresh.last_search_term(), "vodka");
    assert_eq!(fresh.results(), &[margarita()]);
}

#[test]
fn corrupt_records_surface_as_serde_errors_not_panics() {
    let mut kv = MemoryKvStore::new();
    kv.set(persist::FAVORITES_KEY, "3 <<< garbage").expect("set");
    kv.set(persist::SEARCH_STATE_KEY, "{\"term\":").expect("set");

    assert!(matches!(
        persist::load_favorites(&kv),
        Err(persist::PersistError::Serde(_))
    ));
    assert!(matches!(
        persist::load_snapshot(&kv),
        Err(persist::PersistError::Serde(_))
    ));
}

#[test]
fn absent_keys_read_as_none() {
    let kv = MemoryKvStore::new();
    assert!(persist::load_favorites(&kv).expect("load").is_none());
    assert!(persist::load_snapshot(&kv).expect("load").is_none());
    assert!(persist::load_scroll(&kv).expect("load").is_none());
}

#[test]
fn unparseable_scroll_marker_is_treated_as_absent() {
    let mut kv = MemoryKvStore::new();
    kv.set(persist::SCROLL_POSITION_KEY, "not-a-number").expect("set");
    assert_eq!(persist::load_scroll(&kv).expect("load"), None);
}

#[test]
fn clearing_the_snapshot_is_idempotent() {
    let mut kv = MemoryKvStore::new();
    let snapshot = SessionSnapshot {
        term: "gin".to_string(),
        results: vec![],
    };
    persist::save_snapshot(&mut kv, &snapshot).expect("save");
    persist::clear_snapshot(&mut kv).expect("clear");
    persist::clear_snapshot(&mut kv).expect("clear again");
    assert!(persist::load_snapshot(&kv).expect("load").is_none());
}
