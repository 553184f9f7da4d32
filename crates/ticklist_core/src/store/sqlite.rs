//! SQLite task store.
//!
//! # Responsibility
//! - Provide durable CRUD over the canonical `tasks` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate titles before SQL mutations.
//! - `update`, `toggle` and `delete` are single parameterized
//!   statements; zero affected rows is the not-found evidence, so no
//!   separate existence check can race against the mutation.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::{open_db, open_db_in_memory};
use crate::model::task::{
    validate_title, Task, TaskId, TaskPatch, TaskValidationError, MAX_TITLE_LEN,
};
use crate::store::{StoreError, StoreResult, TaskStore};
use chrono::{DateTime, Utc};
use log::info;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::path::Path;

const TASK_SELECT_SQL: &str = "SELECT id, title, completed, created_at FROM tasks";

/// SQLite-backed task store owning a migrated connection.
pub struct SqliteTaskStore {
    conn: Connection,
}

impl SqliteTaskStore {
    /// Opens (or creates) the task database at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens an in-memory store, mainly for tests and ephemeral setups.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    fn get(&self, serial: i64) -> StoreResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query(params![serial])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }
}

impl TaskStore for SqliteTaskStore {
    fn list(&self) -> StoreResult<Vec<Task>> {
        // `id DESC` keeps same-millisecond inserts newest-first.
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY created_at DESC, id DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn insert(&self, title: &str) -> StoreResult<Task> {
        let title = checked_title(title)?;
        let (created_ms, created_at) = now_millis();

        self.conn.execute(
            "INSERT INTO tasks (title, completed, created_at) VALUES (?1, 0, ?2);",
            params![title, created_ms],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("event=task_insert module=store backend=sqlite status=ok id={id}");

        Ok(Task {
            id: TaskId::Serial(id),
            title: title.to_string(),
            completed: false,
            created_at,
        })
    }

    fn update(&self, id: &TaskId, patch: &TaskPatch) -> StoreResult<Task> {
        let serial = serial_id(id)?;
        if patch.is_empty() {
            return Err(TaskValidationError::EmptyPatch.into());
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = patch.title.as_deref() {
            let title = checked_title(title)?;
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.to_string()));
        }
        if let Some(completed) = patch.completed {
            assignments.push("completed = ?");
            bind_values.push(Value::Integer(i64::from(completed)));
        }
        bind_values.push(Value::Integer(serial));

        let sql = format!("UPDATE tasks SET {} WHERE id = ?;", assignments.join(", "));
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }

        self.get(serial)?
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn toggle(&self, id: &TaskId) -> StoreResult<Task> {
        let serial = serial_id(id)?;
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = NOT completed WHERE id = ?1;",
            params![serial],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }

        self.get(serial)?
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    fn delete(&self, id: &TaskId) -> StoreResult<TaskId> {
        let serial = serial_id(id)?;
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", params![serial])?;
        if changed == 0 {
            return Err(StoreError::NotFound(id.clone()));
        }
        info!("event=task_delete module=store backend=sqlite status=ok id={serial}");
        Ok(id.clone())
    }
}

/// Trims and validates a title against this backend's storage bound.
fn checked_title(raw: &str) -> Result<&str, TaskValidationError> {
    let title = raw.trim();
    validate_title(title)?;
    let length = title.chars().count();
    if length > MAX_TITLE_LEN {
        return Err(TaskValidationError::TitleTooLong {
            length,
            max: MAX_TITLE_LEN,
        });
    }
    Ok(title)
}

/// String keys are local-backend identities; they can never match a row
/// in this store.
fn serial_id(id: &TaskId) -> StoreResult<i64> {
    match id {
        TaskId::Serial(serial) => Ok(*serial),
        TaskId::Key(_) => Err(StoreError::NotFound(id.clone())),
    }
}

fn now_millis() -> (i64, DateTime<Utc>) {
    let ms = Utc::now().timestamp_millis();
    // Round-trips through storage precision so the returned record
    // equals what a later read produces.
    let truncated = DateTime::from_timestamp_millis(ms).unwrap_or_else(Utc::now);
    (ms, truncated)
}

fn parse_task_row(row: &Row<'_>) -> StoreResult<Task> {
    let id: i64 = row.get("id")?;

    let title: String = row.get("title")?;
    if title.trim().is_empty() {
        return Err(StoreError::InvalidData(format!(
            "empty title in tasks.title for id {id}"
        )));
    }

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let created_ms: i64 = row.get("created_at")?;
    let created_at = DateTime::from_timestamp_millis(created_ms).ok_or_else(|| {
        StoreError::InvalidData(format!(
            "invalid created_at value `{created_ms}` in tasks.created_at"
        ))
    })?;

    Ok(Task {
        id: TaskId::Serial(id),
        title,
        completed,
        created_at,
    })
}
