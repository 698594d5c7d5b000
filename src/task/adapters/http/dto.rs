//! Wire types for task payloads and their validated conversion.

use crate::api::RemoteCallError;
use crate::task::domain::{Task, TaskData, TaskDraft, TaskId, TaskStatus};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task payload as sent by the backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Task title.
    pub title: String,
    /// Task description; the backend sends `null` for none.
    #[serde(default)]
    pub description: Option<String>,
    /// Task status.
    pub status: TaskStatus,
    /// Creation timestamp as text.
    pub created_at: Option<String>,
    /// Modification timestamp as text.
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl TryFrom<TaskDto> for Task {
    type Error = RemoteCallError;

    fn try_from(dto: TaskDto) -> Result<Self, Self::Error> {
        let raw_created = dto
            .created_at
            .ok_or_else(|| RemoteCallError::Decode(format!("task {} has no createdAt", dto.id)))?;
        let updated_at = dto.updated_at.as_deref().map(parse_timestamp).transpose()?;

        Ok(Self::from_data(TaskData {
            id: TaskId::from_uuid(dto.id),
            title: dto.title,
            description: dto.description.unwrap_or_default(),
            status: dto.status,
            created_at: parse_timestamp(&raw_created)?,
            updated_at,
        }))
    }
}

/// Parses a backend timestamp.
///
/// Accepts RFC 3339 and zone-less ISO local date-times; the latter are read
/// as UTC.
///
/// # Errors
///
/// Returns [`RemoteCallError::Decode`] for any other format.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RemoteCallError> {
    if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
        return Ok(zoned.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|err| RemoteCallError::Decode(format!("invalid timestamp '{raw}': {err}")))
}

/// Body for create and full-update calls.
#[derive(Debug, Serialize)]
pub(super) struct TaskRequestDto<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub status: TaskStatus,
}

impl<'a> From<&'a TaskDraft> for TaskRequestDto<'a> {
    fn from(draft: &'a TaskDraft) -> Self {
        Self {
            title: draft.title(),
            description: draft.description(),
            status: draft.status(),
        }
    }
}

/// Body for status-only updates.
#[derive(Debug, Serialize)]
pub(super) struct TaskStatusRequestDto {
    pub status: TaskStatus,
}
