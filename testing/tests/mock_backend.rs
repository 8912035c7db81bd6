//! Property tests for the in-memory backend used by store-level tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use proptest::prelude::*;
use std::sync::Arc;
use tasklist_api::{TasksApi, TodolistsApi};
use tasklist_testing::{properties, MockTransport};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_listing_is_stable(todolists in properties::todolists(8)) {
        let backend = Arc::new(MockTransport::new().with_todolists(todolists.clone()));
        let api = TodolistsApi::new(backend.clone());

        let (first, second) = tokio_test::block_on(async {
            (api.list().await.unwrap(), api.list().await.unwrap())
        });

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first, todolists);
        prop_assert_eq!(backend.request_count(), 2);
    }

    #[test]
    fn prop_create_then_remove_leaves_others(
        todolists in properties::todolists(6),
        title in properties::valid_title(),
    ) {
        let backend = Arc::new(MockTransport::new().with_todolists(todolists.clone()));
        let api = TodolistsApi::new(backend.clone());

        tokio_test::block_on(async {
            let created = api.create(&title).await.unwrap();
            assert_eq!(backend.todolists().len(), todolists.len() + 1);
            api.remove(&created.id).await.unwrap();
        });

        prop_assert_eq!(backend.todolists(), todolists);
    }

    #[test]
    fn prop_tasks_are_listed_per_list(tasks in properties::tasks(3, 10)) {
        let lists = seeded_lists();
        let backend = Arc::new(MockTransport::new().with_todolists(lists.clone()).with_tasks(tasks.clone()));
        let api = TasksApi::new(backend);

        let listed = tokio_test::block_on(async {
            let mut listed = Vec::new();
            for list in &lists {
                listed.extend(api.list(&list.id).await.unwrap());
            }
            listed
        });

        prop_assert_eq!(listed.len(), tasks.len());
        for task in &listed {
            prop_assert!(tasks.contains(task));
        }
    }
}

/// The three lists `properties::tasks(3, _)` spreads tasks over
fn seeded_lists() -> Vec<tasklist_api::Todolist> {
    (0..3)
        .map(|index| tasklist_testing::fixtures::todolist(&format!("list-{index}"), "List"))
        .collect()
}
