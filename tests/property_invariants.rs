use std::collections::BTreeSet;

use proptest::prelude::*;

use barkeep::{core::store::SessionStore, drink::Drink};

#[derive(Debug, Clone)]
enum Action {
    SetResults { ids: Vec<u8> },
    NotFound,
    Toggle { id: u8 },
    Sync { ids: Vec<u8> },
    ToggleFilter,
    StartLoading { term: u8 },
    Fail,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        prop::collection::vec(0u8..24, 0..8).prop_map(|ids| Action::SetResults { ids }),
        Just(Action::NotFound),
        (0u8..24).prop_map(|id| Action::Toggle { id }),
        prop::collection::vec(0u8..24, 0..8).prop_map(|ids| Action::Sync { ids }),
        Just(Action::ToggleFilter),
        (0u8..24).prop_map(|term| Action::StartLoading { term }),
        Just(Action::Fail),
    ]
}

fn drink(id: u8) -> Drink {
    Drink::new(format!("d{id}"), format!("Drink {id}"))
}

fn dedup_drinks(ids: &[u8]) -> Vec<Drink> {
    let mut seen = BTreeSet::new();
    ids.iter()
        .filter(|id| seen.insert(**id))
        .map(|id| drink(*id))
        .collect()
}

fn favorite_ids(store: &SessionStore) -> Vec<String> {
    store.favorites().iter().map(|fav| fav.id.clone()).collect()
}

fn apply(store: &mut SessionStore, action: &Action) {
    match action {
        Action::SetResults { ids } => store.set_results(Some(dedup_drinks(ids))),
        Action::NotFound => store.set_results(None),
        Action::Toggle { id } => {
            store.toggle_favorite(drink(*id));
        }
        Action::Sync { ids } => store.sync_favorites(dedup_drinks(ids)),
        Action::ToggleFilter => {
            store.toggle_show_favorites_only();
        }
        Action::StartLoading { term } => store.start_loading(format!("t{term}")),
        Action::Fail => store.set_error("boom"),
    }
}

proptest! {
    #[test]
    fn favorites_never_contain_duplicate_ids(actions in prop::collection::vec(action_strategy(), 1..64)) {
        let mut store = SessionStore::new();
        for action in &actions {
            apply(&mut store, action);
            let ids = favorite_ids(&store);
            let unique: BTreeSet<&String> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());
        }
    }

    #[test]
    fn membership_index_matches_the_favorites_list(actions in prop::collection::vec(action_strategy(), 1..64)) {
        let mut store = SessionStore::new();
        for action in &actions {
            apply(&mut store, action);
            for fav in store.favorites() {
                prop_assert!(store.is_favorite(&fav.id));
            }
            for id in 0u8..24 {
                let id = format!("d{id}");
                let listed = store.favorites().iter().any(|fav| fav.id == id);
                prop_assert_eq!(store.is_favorite(&id), listed);
            }
        }
    }

    #[test]
    fn display_is_always_a_subset_of_results(actions in prop::collection::vec(action_strategy(), 1..64)) {
        let mut store = SessionStore::new();
        for action in &actions {
            apply(&mut store, action);
            let shown = store.display_results();
            prop_assert!(shown.len() <= store.results().len());
            for item in &shown {
                prop_assert!(store.results().contains(*item));
                if store.show_favorites_only() {
                    prop_assert!(store.is_favorite(&item.id));
                }
            }
            if !store.show_favorites_only() {
                prop_assert_eq!(shown.len(), store.results().len());
            }
        }
    }

    #[test]
    fn toggle_pair_is_an_involution(
        actions in prop::collection::vec(action_strategy(), 0..32),
        id in 0u8..24,
    ) {
        let mut store = SessionStore::new();
        for action in &actions {
            apply(&mut store, action);
        }
        let before: BTreeSet<String> = favorite_ids(&store).into_iter().collect();

        store.toggle_favorite(drink(id));
        store.toggle_favorite(drink(id));

        let after: BTreeSet<String> = favorite_ids(&store).into_iter().collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn loading_flag_only_moves_through_its_transitions(actions in prop::collection::vec(action_strategy(), 1..64)) {
        let mut store = SessionStore::new();
        for action in &actions {
            let was_loading = store.is_loading();
            apply(&mut store, action);
            match action {
                Action::StartLoading { .. } => {
                    prop_assert!(store.is_loading());
                    prop_assert!(store.last_error().is_none());
                }
                Action::SetResults { .. } | Action::NotFound | Action::Fail => {
                    prop_assert!(!store.is_loading())
                }
                _ => prop_assert_eq!(store.is_loading(), was_loading),
            }
        }
    }
}
