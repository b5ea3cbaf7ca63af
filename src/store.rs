// In-memory task store

use crate::error::{Result, TaskError};
use crate::filter::Filter;
use crate::models::{self, Priority, Task, TaskId};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Aggregate counts over the whole store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Pending tasks whose due date is strictly before today
    pub overdue: usize,
    /// Task count per priority, completed tasks included. Every priority has an entry.
    pub by_priority: BTreeMap<Priority, usize>,
}

/// Owner of all tasks for a session
///
/// Tasks are kept in insertion order. Ids come from a counter that only
/// moves forward, so an id is never handed out twice even after deletes.
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u32,
    clock: fn() -> NaiveDate,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Create an empty store using the local calendar date as "today"
    pub fn new() -> Self {
        Self::with_clock(models::today)
    }

    /// Create an empty store with a custom source for today's date
    pub fn with_clock(clock: fn() -> NaiveDate) -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
            clock,
        }
    }

    /// Today's date according to the store clock
    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a new task and return its id
    ///
    /// Inputs are taken as-is; empty strings are accepted.
    pub fn add(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;

        let task = Task::new(id, title.into(), description.into(), due_date, priority, self.today());
        debug!(%id, %priority, %due_date, "add: task created");
        self.tasks.push(task);

        id
    }

    /// Mark a task as completed. Completing an already completed task is a no-op.
    pub fn mark_complete(&mut self, id: TaskId) -> Result<()> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(TaskError::NotFound(id))?;

        if task.is_completed() {
            debug!(%id, "mark_complete: already completed");
        } else {
            task.mark_complete();
            debug!(%id, "mark_complete: task completed");
        }

        Ok(())
    }

    /// Remove a task permanently
    pub fn delete(&mut self, id: TaskId) -> Result<()> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id() == id)
            .ok_or(TaskError::NotFound(id))?;

        self.tasks.remove(pos);
        debug!(%id, remaining = self.tasks.len(), "delete: task removed");

        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn find_by_id(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    /// All tasks in insertion order
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks matching every filter, in insertion order
    pub fn list_filtered(&self, filters: &[Filter]) -> Vec<&Task> {
        let results: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| filters.iter().all(|f| f.matches(t)))
            .collect();

        debug!(?filters, matched = results.len(), "list_filtered");
        results
    }

    pub fn list_by_priority(&self, priority: Priority) -> Vec<&Task> {
        self.list_filtered(&[Filter::Priority(priority)])
    }

    /// Case-insensitive substring search over title and description
    pub fn search(&self, keyword: &str) -> Vec<&Task> {
        self.list_filtered(&[Filter::keyword(keyword)])
    }

    pub fn statistics(&self) -> Statistics {
        self.statistics_on(self.today())
    }

    /// Compute statistics treating `today` as the current date
    pub fn statistics_on(&self, today: NaiveDate) -> Statistics {
        let mut by_priority: BTreeMap<Priority, usize> = Priority::ALL.iter().map(|p| (*p, 0)).collect();
        let mut completed = 0;
        let mut overdue = 0;

        for task in &self.tasks {
            *by_priority.entry(task.priority()).or_insert(0) += 1;
            if task.is_completed() {
                completed += 1;
            } else if task.is_overdue_on(today) {
                overdue += 1;
            }
        }

        let stats = Statistics {
            total: self.tasks.len(),
            completed,
            pending: self.tasks.len() - completed,
            overdue,
            by_priority,
        };

        info!(
            total = stats.total,
            completed = stats.completed,
            overdue = stats.overdue,
            "Computed statistics"
        );
        stats
    }
}
