use serde::Serialize;
use strum::Display;

use atomwalk::RawTask;

use super::{StatusMatch, TaskId};

pub const UNTITLED_TASK: &str = "Untitled Task";
pub const NO_DATE: &str = "N/A";
pub const GENERAL_TASK_TYPE: &str = "General";
pub const NO_CUSTOMER: &str = "No Customer";
pub const UNASSIGNED: &str = "Unassigned";
pub const NO_OWNER: &str = "No Owner";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// "01" is high, "02" medium, everything else (missing included) low.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("01") => Priority::High,
            Some("02") => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

/// A task as the lists display it: every field resolved, no absent values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTask {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub task_date: String,
    pub end_date: String,
    pub start_time: String,
    pub end_time: String,
    /// `"{start} - {end}"`, or whichever side is present, or empty.
    pub time: String,
    pub status: String,
    pub priority: Priority,
    pub task_type: String,
    pub customer: String,
    pub assigned_to: String,
    pub owner: String,
    /// The record this task was built from; update requests are built from it.
    pub original: RawTask,
}

impl NormalizedTask {
    pub fn has_status(&self, status: &str, policy: StatusMatch) -> bool {
        policy.same(&self.status, status)
    }
}

/// Counters shown above a task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub completed: usize,
    pub planned: usize,
}

impl TaskSummary {
    pub fn from_tasks(tasks: &[NormalizedTask], policy: StatusMatch) -> Self {
        tasks.iter().fold(
            TaskSummary {
                total: tasks.len(),
                ..TaskSummary::default()
            },
            |mut summary, task| {
                if task.has_status("Completed", policy) {
                    summary.completed += 1;
                } else if task.has_status("Planned", policy) {
                    summary.planned += 1;
                }
                summary
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_codes() {
        assert_eq!(Priority::from_code(Some("01")), Priority::High);
        assert_eq!(Priority::from_code(Some("02")), Priority::Medium);
        assert_eq!(Priority::from_code(Some("03")), Priority::Low);
        assert_eq!(Priority::from_code(Some("1")), Priority::Low);
        assert_eq!(Priority::from_code(None), Priority::Low);
        assert_eq!(Priority::High.to_string(), "High");
    }
}
