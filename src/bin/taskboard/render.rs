//! Plain-text views written to the terminal.

use std::io::{self, Write};
use taskboard::auth::domain::Session;
use taskboard::task::domain::{StatusFilter, StatusGroups, Task, TaskCounts, TaskStatus};

/// Prints the signed-in user and the token to export.
pub fn session(out: &mut impl Write, session: &Session) -> io::Result<()> {
    writeln!(out, "Signed in as {}", session.username())?;
    writeln!(out, "export TASKBOARD_TOKEN={}", session.token())
}

/// Prints one task with its description indented below.
pub fn task(out: &mut impl Write, task: &Task) -> io::Result<()> {
    writeln!(
        out,
        "{}  [{}]  {}",
        task.id(),
        task.status().label(),
        task.title()
    )?;
    for line in task.description().lines() {
        writeln!(out, "    {line}")?;
    }
    Ok(())
}

/// Prints the list view for a filter.
pub fn list(out: &mut impl Write, tasks: &[Task], filter: StatusFilter) -> io::Result<()> {
    if tasks.is_empty() {
        return match filter {
            StatusFilter::All => writeln!(out, "No tasks yet"),
            StatusFilter::Only(status) => writeln!(out, "No tasks in {}", status.label()),
        };
    }
    for held in tasks {
        task(out, held)?;
    }
    Ok(())
}

/// Prints the three board columns in order.
pub fn board(out: &mut impl Write, groups: &StatusGroups) -> io::Result<()> {
    for (status, column) in groups.columns() {
        writeln!(out, "== {} ({}) ==", status.label(), column.len())?;
        for held in column {
            writeln!(out, "  {}  {}", held.id(), held.title())?;
        }
    }
    Ok(())
}

/// Prints per-status counts with their share of the total.
pub fn stats(out: &mut impl Write, counts: &TaskCounts) -> io::Result<()> {
    for status in TaskStatus::ALL {
        writeln!(
            out,
            "{:<12} {:>4}  {:>3}%",
            status.label(),
            counts.count(status),
            counts.share(status)
        )?;
    }
    writeln!(out, "{:<12} {:>4}", "Total", counts.total)?;
    if !counts.is_consistent() {
        writeln!(out, "(reported total does not match the per-status counts)")?;
    }
    Ok(())
}
