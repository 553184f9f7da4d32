//! Deterministic terminal rendering of the task list view.

use crate::controller::ViewState;

/// Prints the whole view: the error line first when present, then the
/// full task list, newest first.
pub fn render(view: &ViewState) {
    if let Some(error) = &view.last_error {
        eprintln!("error: {error}");
    }

    if view.tasks.is_empty() {
        println!("no tasks");
        return;
    }

    for task in &view.tasks {
        let mark = if task.completed { "x" } else { " " };
        println!(
            "[{mark}] {}  {}  ({})",
            task.id,
            task.title,
            task.created_at.format("%Y-%m-%d %H:%M")
        );
    }
}
