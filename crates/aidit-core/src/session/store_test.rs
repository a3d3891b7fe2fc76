#[cfg(test)]
mod tests {
    use crate::session::{MessageRole, SessionStore, StateRepository};
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MockStateRepository {
        payload: Mutex<Option<String>>,
    }

    impl StateRepository for MockStateRepository {
        fn load(&self) -> crate::error::Result<Option<String>> {
            Ok(self.payload.lock().unwrap().clone())
        }

        fn save(&self, payload: &str) -> crate::error::Result<()> {
            *self.payload.lock().unwrap() = Some(payload.to_string());
            Ok(())
        }
    }

    fn assert_invariants(store: &SessionStore) {
        assert!(!store.is_empty(), "store must never be observably empty");
        let active = store.active_session_id().expect("active id must resolve");
        assert!(store.session(active).is_some());
    }

    /// One step of a create/delete sequence.
    #[derive(Debug, Clone)]
    enum Op {
        Create,
        DeleteActive,
        /// Deletes the session at this position (modulo the current count).
        DeleteAt(usize),
        DeleteUnknown,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Create),
            Just(Op::DeleteActive),
            any::<usize>().prop_map(Op::DeleteAt),
            Just(Op::DeleteUnknown),
        ]
    }

    proptest! {
        #[test]
        fn test_create_delete_sequences_never_empty_the_store(
            ops in prop::collection::vec(op(), 0..200)
        ) {
            let mut store = SessionStore::open(Arc::new(MockStateRepository::default()));
            assert_invariants(&store);

            for op in ops {
                match op {
                    Op::Create => {
                        store.create_session(None);
                    }
                    Op::DeleteActive => {
                        let active = store.active_session_id().unwrap().to_string();
                        store.delete_session(&active);
                    }
                    Op::DeleteAt(position) => {
                        let ids: Vec<String> = store.sessions().map(|s| s.id.clone()).collect();
                        store.delete_session(&ids[position % ids.len()]);
                    }
                    Op::DeleteUnknown => {
                        store.delete_session("does-not-exist");
                    }
                }
                assert_invariants(&store);
            }
        }
    }

    #[test]
    fn test_deleting_every_session_leaves_exactly_one_fresh_session() {
        let mut store = SessionStore::open(Arc::new(MockStateRepository::default()));
        for _ in 0..5 {
            store.create_session(None);
        }
        let originals: Vec<String> = store.sessions().map(|s| s.id.clone()).collect();

        for id in &originals {
            store.delete_session(id);
        }

        assert_eq!(store.len(), 1);
        let survivor = store.active_session_id().unwrap();
        assert!(!originals.iter().any(|id| id == survivor));
        assert!(store.session(survivor).unwrap().messages.is_empty());
    }

    #[test]
    fn test_two_deletes_of_pro_sessions_keep_mode_state_observable() {
        let mut store = SessionStore::open(Arc::new(MockStateRepository::default()));
        let first = store.active_session_id().unwrap().to_string();
        store.cycle_mode();
        let second = store.create_session(None);

        store.delete_session(&second);
        assert_eq!(store.active_session_id(), Some(first.as_str()));
        assert_eq!(store.active_session().mode.to_string(), "LAB");

        store.delete_session(&first);
        assert_eq!(store.active_session().mode.to_string(), "PRO");
    }

    #[test]
    fn test_append_never_rewrites_history() {
        let mut store = SessionStore::open(Arc::new(MockStateRepository::default()));
        let mut expected = Vec::new();
        for i in 0..20 {
            let role = if i % 2 == 0 {
                MessageRole::User
            } else {
                MessageRole::Assistant
            };
            let content = format!("message {i}");
            let before = store.active_session().messages.clone();

            store.append_message(role, content.clone());
            expected.push((role, content));

            let after = &store.active_session().messages;
            assert_eq!(after.len(), before.len() + 1);
            assert_eq!(&after[..before.len()], &before[..]);
        }
        let stored: Vec<_> = store
            .active_session()
            .messages
            .iter()
            .map(|m| (m.role, m.content.clone()))
            .collect();
        assert_eq!(stored, expected);
    }
}
