use crate::domain::models::{FilterState, NormalizedTask, StatusFilter, StatusMatch};

/// Client-side half of task filtering.
///
/// The day range is resolved by the backend from
/// [`DayFilter::query_token`](crate::domain::models::DayFilter::query_token); what comes
/// back is only narrowed here by status. Pure: the same input always gives the same
/// output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilterEngine {
    status_match: StatusMatch,
}

impl TaskFilterEngine {
    pub fn new(status_match: StatusMatch) -> Self {
        Self { status_match }
    }

    pub fn status_match(&self) -> StatusMatch {
        self.status_match
    }

    pub fn matches(&self, task: &NormalizedTask, status: StatusFilter) -> bool {
        match status.label() {
            None => true,
            Some(label) => task.has_status(label, self.status_match),
        }
    }

    /// Keeps the tasks passing the status filter, in their original order.
    pub fn apply(&self, filters: &FilterState, tasks: Vec<NormalizedTask>) -> Vec<NormalizedTask> {
        if filters.status == StatusFilter::All {
            return tasks;
        }
        tasks
            .into_iter()
            .filter(|task| self.matches(task, filters.status))
            .collect()
    }

    /// Borrowing variant of [`Self::apply`].
    pub fn select<'a>(
        &self,
        filters: &FilterState,
        tasks: &'a [NormalizedTask],
    ) -> Vec<&'a NormalizedTask> {
        tasks
            .iter()
            .filter(|task| self.matches(task, filters.status))
            .collect()
    }
}
