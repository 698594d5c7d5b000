//! Tests for responses that arrive out of issue order.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rstest::rstest;
use tokio::sync::oneshot;

use crate::task::{
    adapters::memory::{InMemoryTaskStore, StoreOperation},
    domain::{Task, TaskCounts, TaskDraft, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreResult},
    services::{Settlement, TaskSynchronizer},
};

/// Store that answers status changes and listings immediately but holds
/// each response until its gate opens.
#[derive(Default)]
struct GatedStore {
    inner: InMemoryTaskStore,
    status_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    list_gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
}

impl GatedStore {
    fn gate_status(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.status_gates.lock().expect("gate lock").push_back(rx);
        tx
    }

    fn gate_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.list_gates.lock().expect("gate lock").push_back(rx);
        tx
    }
}

async fn hold(gates: &Mutex<VecDeque<oneshot::Receiver<()>>>) {
    let gate = gates.lock().expect("gate lock").pop_front();
    if let Some(open) = gate {
        open.await.expect("gate sender kept alive");
    }
}

#[async_trait]
impl TaskStore for GatedStore {
    async fn list_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        let listing = self.inner.list_tasks().await;
        hold(&self.list_gates).await;
        listing
    }

    async fn create_task(&self, draft: &TaskDraft) -> TaskStoreResult<Task> {
        self.inner.create_task(draft).await
    }

    async fn update_task(&self, id: TaskId, draft: &TaskDraft) -> TaskStoreResult<Task> {
        self.inner.update_task(id, draft).await
    }

    async fn update_task_status(&self, id: TaskId, status: TaskStatus) -> TaskStoreResult<Task> {
        let result = self.inner.update_task_status(id, status).await;
        hold(&self.status_gates).await;
        result
    }

    async fn delete_task(&self, id: TaskId) -> TaskStoreResult<()> {
        self.inner.delete_task(id).await
    }

    async fn get_stats(&self) -> TaskStoreResult<TaskCounts> {
        self.inner.get_stats().await
    }
}

async fn loaded_sync(store: &Arc<GatedStore>) -> TaskSynchronizer<GatedStore> {
    let sync = TaskSynchronizer::new(Arc::clone(store));
    sync.refresh().await.expect("initial load should succeed");
    sync
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn late_response_for_earlier_status_change_is_discarded() {
    let store = Arc::new(GatedStore::default());
    let seeded = store.inner.seed("Racing", TaskStatus::Todo);
    let sync = loaded_sync(&store).await;

    let first_gate = store.gate_status();
    let second_gate = store.gate_status();
    let (second_done_tx, second_done_rx) = oneshot::channel::<()>();

    let (first, second, ()) = tokio::join!(
        sync.change_status(seeded.id(), TaskStatus::InProgress),
        async {
            let settled = sync.change_status(seeded.id(), TaskStatus::Completed).await;
            second_done_tx.send(()).expect("releaser listening");
            settled
        },
        async {
            second_gate.send(()).expect("second call waiting");
            second_done_rx.await.expect("second call settled");
            first_gate.send(()).expect("first call waiting");
        },
    );

    assert!(matches!(first, Ok(Settlement::Superseded)));
    assert!(matches!(second, Ok(Settlement::Applied(_))));
    assert_eq!(
        sync.task(seeded.id()).map(|task| task.status()),
        Some(TaskStatus::Completed)
    );
    assert!(sync.banner().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn later_refresh_wins_over_slower_earlier_one() {
    let store = Arc::new(GatedStore::default());
    let sync = loaded_sync(&store).await;

    store.inner.seed("Only in first listing", TaskStatus::Todo);
    let slow_gate = store.gate_list();
    let fast_gate = store.gate_list();
    let (fast_done_tx, fast_done_rx) = oneshot::channel::<()>();

    let (slow, fast, ()) = tokio::join!(
        sync.refresh(),
        async {
            let settled = sync.refresh().await;
            fast_done_tx.send(()).expect("releaser listening");
            settled
        },
        async {
            fast_gate.send(()).expect("fast listing waiting");
            fast_done_rx.await.expect("fast listing settled");
            slow_gate.send(()).expect("slow listing waiting");
        },
    );

    assert!(matches!(slow, Ok(Settlement::Superseded)));
    assert_eq!(fast.ok(), Some(Settlement::Applied(1)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_taken_before_a_move_does_not_undo_it() {
    let store = Arc::new(GatedStore::default());
    let seeded = store.inner.seed("Moving", TaskStatus::Todo);
    let sync = loaded_sync(&store).await;

    let list_gate = store.gate_list();
    let (moved_tx, moved_rx) = oneshot::channel::<()>();

    let (listing, moved, ()) = tokio::join!(
        sync.refresh(),
        async {
            let settled = sync
                .move_task(seeded.id(), TaskStatus::Completed, 0)
                .await;
            moved_tx.send(()).expect("releaser listening");
            settled
        },
        async {
            moved_rx.await.expect("move settled");
            list_gate.send(()).expect("listing waiting");
        },
    );

    assert!(matches!(listing, Ok(Settlement::Applied(1))));
    assert!(matches!(moved, Ok(Settlement::Applied(_))));
    assert_eq!(
        sync.task(seeded.id()).map(|task| task.status()),
        Some(TaskStatus::Completed)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_move_overtaken_by_failed_delete_still_converges() {
    let store = Arc::new(GatedStore::default());
    let seeded = store.inner.seed("Contested", TaskStatus::Todo);
    let sync = loaded_sync(&store).await;

    store.inner.fail_once(StoreOperation::UpdateStatus);
    store.inner.fail_once(StoreOperation::Delete);
    let move_gate = store.gate_status();
    let (deleted_tx, deleted_rx) = oneshot::channel::<()>();

    let (moved, deleted, ()) = tokio::join!(
        sync.move_task(seeded.id(), TaskStatus::InProgress, 0),
        async {
            let settled = sync.delete_task(seeded.id()).await;
            deleted_tx.send(()).expect("releaser listening");
            settled
        },
        async {
            deleted_rx.await.expect("delete settled");
            move_gate.send(()).expect("move waiting");
        },
    );

    assert!(matches!(moved, Ok(Settlement::Superseded)));
    assert!(deleted.is_err());
    assert_eq!(sync.tasks(), store.inner.snapshot());
    assert_eq!(
        sync.task(seeded.id()).map(|task| task.status()),
        Some(TaskStatus::Todo)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_move_overtaken_by_failed_status_change_still_converges() {
    let store = Arc::new(GatedStore::default());
    let seeded = store.inner.seed("Contested", TaskStatus::Todo);
    let sync = loaded_sync(&store).await;

    store.inner.fail(StoreOperation::UpdateStatus);
    let move_gate = store.gate_status();
    let (changed_tx, changed_rx) = oneshot::channel::<()>();

    let (moved, changed, ()) = tokio::join!(
        sync.move_task(seeded.id(), TaskStatus::InProgress, 0),
        async {
            let settled = sync.change_status(seeded.id(), TaskStatus::Completed).await;
            changed_tx.send(()).expect("releaser listening");
            settled
        },
        async {
            changed_rx.await.expect("status change settled");
            move_gate.send(()).expect("move waiting");
        },
    );

    assert!(matches!(moved, Ok(Settlement::Superseded)));
    assert!(changed.is_err());
    assert_eq!(sync.tasks(), store.inner.snapshot());
    assert_eq!(
        sync.task(seeded.id()).map(|task| task.status()),
        Some(TaskStatus::Todo)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn confirmed_delete_stops_tracking_the_task() {
    let store = Arc::new(GatedStore::default());
    let kept = store.inner.seed("Kept", TaskStatus::Todo);
    let dropped = store.inner.seed("Dropped", TaskStatus::Todo);
    let sync = loaded_sync(&store).await;

    sync.change_status(kept.id(), TaskStatus::InProgress)
        .await
        .expect("status change should succeed");
    sync.change_status(dropped.id(), TaskStatus::InProgress)
        .await
        .expect("status change should succeed");
    assert_eq!(sync.tracked_task_count(), 2);

    sync.delete_task(dropped.id())
        .await
        .expect("delete should succeed");
    assert_eq!(sync.tracked_task_count(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_without_a_task_stops_tracking_it() {
    let store = Arc::new(GatedStore::default());
    let seeded = store.inner.seed("Removed elsewhere", TaskStatus::Todo);
    let sync = loaded_sync(&store).await;

    sync.change_status(seeded.id(), TaskStatus::Completed)
        .await
        .expect("status change should succeed");
    store
        .inner
        .delete_task(seeded.id())
        .await
        .expect("server-side delete should succeed");

    sync.refresh().await.expect("refresh should succeed");

    assert!(sync.tasks().is_empty());
    assert_eq!(sync.tracked_task_count(), 0);
}
