//! Integration tests for the task list.

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use taskfeed::{
    cancel_pair, run_session, ChangeEvent, CloseReason, ItemId, SessionEnd, Status, StreamEvent,
    SubscriptionHandle, TaskError, TaskList,
};

fn next_change(handle: &SubscriptionHandle) -> ChangeEvent {
    match handle.recv_timeout(Duration::from_millis(200)).unwrap() {
        StreamEvent::Change { event } => event,
        other => panic!("Expected Change event, got {:?}", other),
    }
}

// --- Realistic Workflow Tests ---

#[test]
fn test_grocery_list_workflow() {
    let list = TaskList::new();
    let handle = list.subscribe();

    // Add
    let item = list.add_item("buy milk");
    assert_eq!(item.id, ItemId(1));
    assert_eq!(item.status, Status::Pending);

    match next_change(&handle) {
        ChangeEvent::Added { item } => {
            assert_eq!(item.id, ItemId(1));
            assert_eq!(item.description, "buy milk");
            assert_eq!(item.status, Status::Pending);
        }
        other => panic!("Expected Added, got {:?}", other),
    }

    // Update
    let updated = list.update_status(item.id, Status::Done).unwrap();
    assert_eq!(updated.status, Status::Done);

    match next_change(&handle) {
        ChangeEvent::Updated { item } => {
            assert_eq!(item.id, ItemId(1));
            assert_eq!(item.status, Status::Done);
        }
        other => panic!("Expected Updated, got {:?}", other),
    }

    // Delete
    list.delete_item(item.id).unwrap();
    assert!(list.list_items().is_empty());

    match next_change(&handle) {
        ChangeEvent::Removed { id } => assert_eq!(id, ItemId(1)),
        other => panic!("Expected Removed, got {:?}", other),
    }
}

#[test]
fn test_two_subscribers_see_the_same_stream() {
    let list = TaskList::new();
    let first = list.subscribe();
    let second = list.subscribe();

    let a = list.add_item("a");
    list.update_status(a.id, Status::InProgress).unwrap();
    list.delete_item(a.id).unwrap();

    for handle in [&first, &second] {
        assert!(matches!(next_change(handle), ChangeEvent::Added { .. }));
        assert!(matches!(next_change(handle), ChangeEvent::Updated { .. }));
        assert!(matches!(next_change(handle), ChangeEvent::Removed { .. }));
    }
}

#[test]
fn test_late_subscriber_starts_at_next_mutation() {
    let list = TaskList::new();

    let early = list.add_item("early");

    let handle = list.subscribe();
    assert!(handle.try_recv().is_err());

    let late = list.add_item("late");

    match next_change(&handle) {
        ChangeEvent::Added { item } => assert_eq!(item.id, late.id),
        other => panic!("Expected Added, got {:?}", other),
    }
    assert!(handle.try_recv().is_err());

    // The earlier item is still visible in the snapshot, just never
    // replayed as an event.
    assert_eq!(list.list_items()[0].id, early.id);
}

#[test]
fn test_session_loop_delivers_to_sink() {
    let list = Arc::new(TaskList::new());
    let handle = list.subscribe();
    let subscription_id = handle.id;
    let (token, signal) = cancel_pair();

    let (delivered_tx, delivered_rx) = crossbeam_channel::unbounded();
    let session = {
        let list = Arc::clone(&list);
        std::thread::spawn(move || {
            let mut sink = move |event: ChangeEvent| delivered_tx.send(event).is_ok();
            run_session(list.subscriptions(), handle, signal, &mut sink)
        })
    };

    let a = list.add_item("a");
    let b = list.add_item("b");
    list.update_status(b.id, Status::Done).unwrap();

    // Closing the subscription ends the stream after the queued events.
    list.subscriptions().unsubscribe(subscription_id);

    let end = session.join().unwrap();
    assert_eq!(end, SessionEnd::Closed(CloseReason::Unsubscribed));

    let delivered: Vec<ChangeEvent> = delivered_rx.iter().collect();
    assert_eq!(delivered.len(), 3);
    assert!(matches!(&delivered[0], ChangeEvent::Added { item } if item.id == a.id));
    assert!(matches!(&delivered[1], ChangeEvent::Added { item } if item.id == b.id));
    assert!(matches!(&delivered[2], ChangeEvent::Updated { item } if item.status == Status::Done));

    drop(token);
}

#[test]
fn test_sink_failure_leaves_other_sessions_running() {
    let list = Arc::new(TaskList::new());

    let failing = list.subscribe();
    let healthy = list.subscribe();
    let (token, signal) = cancel_pair();

    let session = {
        let list = Arc::clone(&list);
        std::thread::spawn(move || {
            let mut sink = |_event: ChangeEvent| false;
            run_session(list.subscriptions(), failing, signal, &mut sink)
        })
    };

    list.add_item("first");
    assert_eq!(session.join().unwrap(), SessionEnd::SinkFailed);
    assert_eq!(list.subscriber_count(), 1);

    // The surviving subscriber keeps receiving.
    list.add_item("second");
    assert!(matches!(next_change(&healthy), ChangeEvent::Added { .. }));
    assert!(matches!(next_change(&healthy), ChangeEvent::Added { .. }));

    drop(token);
}

// --- Property Tests ---

#[derive(Clone, Debug)]
enum Op {
    Add(String),
    Update(u64, Status),
    Delete(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let status = prop_oneof![
        Just(Status::Pending),
        Just(Status::InProgress),
        Just(Status::Done),
    ];
    prop_oneof![
        "[a-z ]{0,12}".prop_map(Op::Add),
        (1u64..30, status).prop_map(|(id, status)| Op::Update(id, status)),
        (1u64..30).prop_map(Op::Delete),
    ]
}

proptest! {
    #[test]
    fn prop_add_assigns_strictly_increasing_unique_ids(
        descriptions in proptest::collection::vec("[a-z ]{0,16}", 1..40)
    ) {
        let list = TaskList::new();

        let mut last = 0u64;
        for description in &descriptions {
            let item = list.add_item(description.clone());
            prop_assert!(item.id.0 > last);
            last = item.id.0;
        }

        let items = list.list_items();
        prop_assert_eq!(items.len(), descriptions.len());
        for (item, description) in items.iter().zip(&descriptions) {
            prop_assert_eq!(&item.description, description);
            prop_assert_eq!(item.status, Status::Pending);
        }
    }

    #[test]
    fn prop_matches_sequential_oracle(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let list = TaskList::new();

        // Oracle: the same operations applied to a plain vector.
        let mut oracle: Vec<(u64, String, Status)> = Vec::new();
        let mut next_id = 1u64;

        for op in &ops {
            match op {
                Op::Add(description) => {
                    let item = list.add_item(description.clone());
                    prop_assert_eq!(item.id.0, next_id);
                    oracle.push((next_id, description.clone(), Status::Pending));
                    next_id += 1;
                }
                Op::Update(id, status) => {
                    let result = list.update_status(ItemId(*id), *status);
                    match oracle.iter_mut().find(|entry| entry.0 == *id) {
                        Some(entry) => {
                            entry.2 = *status;
                            prop_assert!(result.is_ok());
                        }
                        None => {
                            prop_assert!(matches!(result, Err(TaskError::ItemNotFound(_))));
                        }
                    }
                }
                Op::Delete(id) => {
                    let result = list.delete_item(ItemId(*id));
                    match oracle.iter().position(|entry| entry.0 == *id) {
                        Some(index) => {
                            oracle.remove(index);
                            prop_assert!(result.is_ok());
                        }
                        None => {
                            prop_assert!(matches!(result, Err(TaskError::ItemNotFound(_))));
                        }
                    }
                }
            }
        }

        let items = list.list_items();
        prop_assert_eq!(items.len(), oracle.len());
        for (item, (id, description, status)) in items.iter().zip(&oracle) {
            prop_assert_eq!(item.id.0, *id);
            prop_assert_eq!(&item.description, description);
            prop_assert_eq!(item.status, *status);
        }
    }
}
