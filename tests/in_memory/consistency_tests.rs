//! In-memory integration tests for convergence after failed mutations.

use super::helpers::{Board, board, by_id};
use eyre::{Result, ensure};
use rstest::rstest;
use taskboard::task::{
    adapters::memory::StoreOperation,
    domain::{TaskId, TaskStatus},
    services::{MutationKind, SyncBanner, TaskRequest},
};

#[derive(Debug, Clone, Copy)]
enum Step {
    Create,
    Edit(usize),
    Status(usize, TaskStatus),
    Move(usize, TaskStatus, usize),
    Delete(usize),
}

const SCRIPT: [(Step, Option<StoreOperation>); 10] = [
    (Step::Create, None),
    (Step::Create, Some(StoreOperation::Create)),
    (Step::Create, None),
    (Step::Status(0, TaskStatus::InProgress), Some(StoreOperation::UpdateStatus)),
    (Step::Move(1, TaskStatus::Completed, 0), None),
    (Step::Move(0, TaskStatus::Completed, 3), Some(StoreOperation::UpdateStatus)),
    (Step::Edit(0), Some(StoreOperation::Update)),
    (Step::Delete(1), Some(StoreOperation::Delete)),
    (Step::Edit(1), None),
    (Step::Delete(0), None),
];

fn pick(ids: &[TaskId], index: usize) -> Option<TaskId> {
    ids.get(index).copied()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn local_state_converges_after_mixed_failures(board: Board) -> Result<()> {
    board.store.seed("Seeded", TaskStatus::Todo);
    board.sync.refresh().await?;

    for (position, (step, failure)) in SCRIPT.iter().enumerate() {
        if let Some(operation) = failure {
            board.store.fail_once(*operation);
        }
        let ids: Vec<TaskId> = board.sync.tasks().iter().map(|task| task.id()).collect();
        let outcome = match *step {
            Step::Create => board
                .sync
                .create_task(TaskRequest::new(format!("Task {position}")))
                .await
                .map(|_| ()),
            Step::Edit(index) => match pick(&ids, index) {
                Some(id) => board
                    .sync
                    .update_task(id, TaskRequest::new(format!("Edited {position}")))
                    .await
                    .map(|_| ()),
                None => Ok(()),
            },
            Step::Status(index, status) => match pick(&ids, index) {
                Some(id) => board.sync.change_status(id, status).await.map(|_| ()),
                None => Ok(()),
            },
            Step::Move(index, status, slot) => match pick(&ids, index) {
                Some(id) => board.sync.move_task(id, status, slot).await.map(|_| ()),
                None => Ok(()),
            },
            Step::Delete(index) => match pick(&ids, index) {
                Some(id) => board.sync.delete_task(id).await.map(|_| ()),
                None => Ok(()),
            },
        };
        ensure!(
            outcome.is_err() == failure.is_some(),
            "step {position} ({step:?}) outcome mismatch: {outcome:?}"
        );
    }

    ensure!(by_id(board.sync.tasks()) == by_id(board.store.snapshot()));
    ensure!(board.sync.banner().map(SyncBanner::kind) == Some(MutationKind::Delete));
    Ok(())
}
