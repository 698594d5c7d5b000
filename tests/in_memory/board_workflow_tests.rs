//! In-memory integration tests for board workflows.

use super::helpers::{Board, board, by_id, titles};
use eyre::{Result, ensure, eyre};
use rstest::rstest;
use taskboard::task::{
    adapters::memory::StoreOperation,
    domain::{StatusFilter, TaskStatus},
    services::{MutationKind, TaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_flow_across_the_board(board: Board) -> Result<()> {
    board.sync.refresh().await?;

    let report = board
        .sync
        .create_task(TaskRequest::new("Write report").with_description("Q3"))
        .await?;
    let review = board
        .sync
        .create_task(TaskRequest::new("Review PR").with_status(TaskStatus::InProgress))
        .await?;
    ensure!(titles(&board.sync.tasks()) == ["Review PR", "Write report"]);

    board
        .sync
        .move_task(report.id(), TaskStatus::InProgress, 1)
        .await?;
    let in_progress = board.sync.board();
    ensure!(
        titles(in_progress.group(TaskStatus::InProgress)) == ["Review PR", "Write report"],
        "report should land below the review"
    );

    board
        .sync
        .change_status(review.id(), TaskStatus::Completed)
        .await?;
    let counts = board.sync.counts();
    ensure!((counts.todo, counts.in_progress, counts.completed) == (0, 1, 1));

    let server = board.sync.load_stats().await?;
    ensure!(server == counts, "server and local counts should agree");
    ensure!(by_id(board.sync.tasks()) == by_id(board.store.snapshot()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn editing_preserves_position_and_creation_time(board: Board) -> Result<()> {
    board.store.seed("Third", TaskStatus::Todo);
    let middle = board.store.seed("Second", TaskStatus::Todo);
    board.store.seed("First", TaskStatus::Todo);
    board.sync.refresh().await?;

    let edited = board
        .sync
        .update_task(
            middle.id(),
            TaskRequest::from_task(&middle).with_description("Now with details"),
        )
        .await?
        .applied()
        .ok_or_else(|| eyre!("update should be applied"))?;

    ensure!(edited.created_at() == middle.created_at());
    ensure!(edited.description() == "Now with details");
    ensure!(titles(&board.sync.tasks()) == ["First", "Second", "Third"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filter_tracks_mutations(board: Board) -> Result<()> {
    let target = board.store.seed("Flip me", TaskStatus::Todo);
    board.store.seed("Stay", TaskStatus::Todo);
    board.sync.refresh().await?;

    ensure!(board.sync.filtered(StatusFilter::Only(TaskStatus::Todo)).len() == 2);
    board
        .sync
        .change_status(target.id(), TaskStatus::Completed)
        .await?;

    let completed = board
        .sync
        .filtered(StatusFilter::Only(TaskStatus::Completed));
    ensure!(titles(&completed) == ["Flip me"]);
    ensure!(board.sync.filtered(StatusFilter::All).len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn banner_reports_latest_failure_until_dismissed(board: Board) -> Result<()> {
    let task = board.store.seed("Fragile", TaskStatus::Todo);
    board.sync.refresh().await?;

    board.store.fail_once(StoreOperation::Create);
    ensure!(board.sync.create_task(TaskRequest::new("Nope")).await.is_err());
    board.store.fail_once(StoreOperation::Delete);
    ensure!(board.sync.delete_task(task.id()).await.is_err());

    let banner = board
        .sync
        .banner()
        .ok_or_else(|| eyre!("banner should be raised"))?;
    ensure!(banner.kind() == MutationKind::Delete);
    ensure!(banner.to_string() == "Failed to delete task");

    board.sync.dismiss_error();
    ensure!(board.sync.banner().is_none());
    ensure!(board.sync.task(task.id()).is_some(), "delete was rolled back");
    Ok(())
}
