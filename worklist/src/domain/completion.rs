use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use atomwalk::{RecordId, TaskUpdateData, YesNo};

use crate::domain::{
    models::{NormalizedTask, StatusMatch, TaskId, GENERAL_TASK_TYPE, NO_DATE, UNTITLED_TASK},
    CompletionError,
};

pub const UNNAMED_TASK: &str = "Unnamed Task";
pub const DEFAULT_TASK_TYPE: &str = "GENERAL";
/// Status a task gets when it is patched locally after a successful completion.
pub const COMPLETED_LOCALLY: &str = "Complete";
/// Date format the update endpoint expects.
pub const UPDATE_DATE_FORMAT: &str = "%d-%m-%Y";

/// What a board does with its list once a completion went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AfterCompletion {
    #[default]
    Refetch,
    PatchLocal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionPolicy {
    /// Tasks in one of these statuses cannot be marked complete.
    pub excluded_statuses: Vec<String>,
    pub status_match: StatusMatch,
    pub after_success: AfterCompletion,
}

impl Default for CompletionPolicy {
    fn default() -> Self {
        Self {
            excluded_statuses: vec!["Completed".to_string()],
            status_match: StatusMatch::default(),
            after_success: AfterCompletion::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CompletionState {
    #[default]
    Idle,
    PendingConfirmation(Box<NormalizedTask>),
    Submitting(TaskId),
}

/// An update ready to be sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSubmission {
    pub task_id: TaskId,
    pub task_data: TaskUpdateData,
    pub is_completed: YesNo,
    pub assign_user: YesNo,
}

/// Confirm/cancel state machine behind "mark complete".
///
/// `Idle -> PendingConfirmation -> Submitting -> Idle`, with cancel going straight back to
/// `Idle`. Only one completion is handled at a time.
#[derive(Debug, Clone, Default)]
pub struct CompletionWorkflow {
    policy: CompletionPolicy,
    state: CompletionState,
}

impl CompletionWorkflow {
    pub fn new(policy: CompletionPolicy) -> Self {
        Self {
            policy,
            state: CompletionState::Idle,
        }
    }

    pub fn policy(&self) -> &CompletionPolicy {
        &self.policy
    }

    pub fn state(&self) -> &CompletionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.state, CompletionState::Idle)
    }

    pub fn can_complete(&self, task: &NormalizedTask) -> bool {
        !self
            .policy
            .excluded_statuses
            .iter()
            .any(|excluded| task.has_status(excluded, self.policy.status_match))
    }

    /// Asks for confirmation to complete `task`.
    pub fn request(&mut self, task: &NormalizedTask) -> Result<(), CompletionError> {
        if self.is_busy() {
            return Err(CompletionError::Busy);
        }
        if !self.can_complete(task) {
            return Err(CompletionError::NotCompletable {
                status: task.status.clone(),
            });
        }
        self.state = CompletionState::PendingConfirmation(Box::new(task.clone()));
        Ok(())
    }

    /// Drops the pending confirmation, if any. Returns whether there was one.
    pub fn cancel(&mut self) -> bool {
        if matches!(self.state, CompletionState::PendingConfirmation(_)) {
            self.state = CompletionState::Idle;
            true
        } else {
            false
        }
    }

    /// Confirms the pending completion and hands back the update to send.
    ///
    /// A task without an identifier puts the workflow back to `Idle`.
    pub fn confirm(&mut self, today: NaiveDate) -> Result<CompletionSubmission, CompletionError> {
        let task = match std::mem::take(&mut self.state) {
            CompletionState::PendingConfirmation(task) => task,
            CompletionState::Submitting(id) => {
                self.state = CompletionState::Submitting(id);
                return Err(CompletionError::Busy);
            }
            CompletionState::Idle => return Err(CompletionError::NothingPending),
        };

        let task_data = build_update_payload(&task, today)?;
        self.state = CompletionState::Submitting(task.id.clone());

        Ok(CompletionSubmission {
            task_id: task.id.clone(),
            task_data,
            is_completed: YesNo::Yes,
            assign_user: YesNo::No,
        })
    }

    /// Ends a submission, successful or not.
    pub fn finish(&mut self) -> Option<TaskId> {
        match std::mem::take(&mut self.state) {
            CompletionState::Submitting(id) => Some(id),
            other => {
                self.state = other;
                None
            }
        }
    }
}

/// Builds the `task_data` of a completion update.
///
/// Fields come from the backend record first, then from the normalized task when it holds
/// a real value rather than a display placeholder, then from fixed defaults.
pub fn build_update_payload(
    task: &NormalizedTask,
    today: NaiveDate,
) -> Result<TaskUpdateData, CompletionError> {
    let original = &task.original;
    let id = original
        .id
        .clone()
        .and_then(RecordId::non_empty)
        .ok_or(CompletionError::MissingIdentifier)?;

    let name = non_blank(original.name.as_deref())
        .or(real_value(&task.title, UNTITLED_TASK))
        .unwrap_or(UNNAMED_TASK);
    let remarks = original
        .remarks
        .as_deref()
        .unwrap_or(task.description.as_str());
    let task_date = non_blank(original.task_date.as_deref())
        .or(real_value(&task.task_date, NO_DATE))
        .map(str::to_string)
        .unwrap_or_else(|| today.format(UPDATE_DATE_FORMAT).to_string());
    let task_type = non_blank(original.task_type.as_deref())
        .or(real_value(&task.task_type, GENERAL_TASK_TYPE))
        .unwrap_or(DEFAULT_TASK_TYPE);
    let curr_user = original
        .curr_user
        .as_ref()
        .and_then(|user| user.id.clone())
        .and_then(RecordId::non_empty);

    Ok(TaskUpdateData {
        curr_user,
        id,
        name: name.to_string(),
        remarks: remarks.to_string(),
        start_time: original.start_time.clone(),
        task_date,
        task_type: task_type.to_string(),
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn real_value<'a>(value: &'a str, placeholder: &str) -> Option<&'a str> {
    non_blank(Some(value)).filter(|v| *v != placeholder)
}
