use atomwalk::{RawTask, RawUser};

use crate::domain::{
    models::{
        NormalizedTask, Priority, TaskId, GENERAL_TASK_TYPE, NO_CUSTOMER, NO_DATE, NO_OWNER,
        UNASSIGNED, UNTITLED_TASK,
    },
    WorklistError,
};

/// Status given to tasks the backend sent without one.
pub const DEFAULT_TASK_STATUS: &str = "Pending";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerOptions {
    pub default_status: String,
}

impl Default for NormalizerOptions {
    fn default() -> Self {
        Self {
            default_status: DEFAULT_TASK_STATUS.to_string(),
        }
    }
}

/// Turns backend task records into [`NormalizedTask`]s.
///
/// Only a missing identifier is an error. Every other missing or malformed field falls
/// back to a display default.
#[derive(Debug, Clone, Default)]
pub struct TaskNormalizer {
    options: NormalizerOptions,
}

impl TaskNormalizer {
    pub fn new(options: NormalizerOptions) -> Self {
        Self { options }
    }

    pub fn with_default_status(default_status: impl Into<String>) -> Self {
        Self::new(NormalizerOptions {
            default_status: default_status.into(),
        })
    }

    pub fn normalize(&self, raw: RawTask) -> Result<NormalizedTask, WorklistError> {
        let id = TaskId::from_record(raw.id.as_ref()).ok_or_else(|| {
            WorklistError::MissingIdentifier {
                record: format!("task {:?}", raw.name.as_deref().unwrap_or(UNTITLED_TASK)),
            }
        })?;

        let start_time = non_blank(raw.start_time.as_deref()).unwrap_or_default();
        let end_time = non_blank(raw.end_time.as_deref()).unwrap_or_default();
        let task_date = non_blank(raw.task_date.as_deref()).unwrap_or(NO_DATE);

        Ok(NormalizedTask {
            id,
            title: non_blank(raw.name.as_deref())
                .unwrap_or(UNTITLED_TASK)
                .to_string(),
            description: raw.remarks.clone().unwrap_or_default(),
            task_date: task_date.to_string(),
            end_date: task_date.to_string(),
            time: time_window(start_time, end_time),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            status: non_blank(raw.task_status.as_deref())
                .unwrap_or(self.options.default_status.as_str())
                .to_string(),
            priority: Priority::from_code(raw.priority.as_deref()),
            task_type: non_blank(raw.task_type_display.as_deref())
                .or(non_blank(raw.task_type.as_deref()))
                .unwrap_or(GENERAL_TASK_TYPE)
                .to_string(),
            customer: raw
                .customer
                .as_ref()
                .and_then(|c| non_blank(c.name.as_deref()))
                .unwrap_or(NO_CUSTOMER)
                .to_string(),
            assigned_to: display_name(raw.curr_user.as_ref())
                .unwrap_or(UNASSIGNED)
                .to_string(),
            owner: display_name(raw.owner.as_ref())
                .unwrap_or(NO_OWNER)
                .to_string(),
            original: raw,
        })
    }

    /// One task per record, in order. Fails on the first record without an identifier.
    pub fn normalize_all(
        &self,
        raws: impl IntoIterator<Item = RawTask>,
    ) -> Result<Vec<NormalizedTask>, WorklistError> {
        raws.into_iter().map(|raw| self.normalize(raw)).collect()
    }

    /// Like [`Self::normalize_all`], but records without an identifier are logged and
    /// skipped instead of failing the batch.
    pub fn normalize_lenient(&self, raws: impl IntoIterator<Item = RawTask>) -> Vec<NormalizedTask> {
        raws.into_iter()
            .enumerate()
            .filter_map(|(index, raw)| match self.normalize(raw) {
                Ok(task) => Some(task),
                Err(e) => {
                    tracing::warn!(index, "Dropping task record: {}", e);
                    None
                }
            })
            .collect()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn display_name(user: Option<&RawUser>) -> Option<&str> {
    let user = user?;
    non_blank(user.user_nick_name.as_deref()).or(non_blank(user.user_name.as_deref()))
}

/// Never yields a bare `" - "`.
fn time_window(start: &str, end: &str) -> String {
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{} - {}", start, end),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (true, true) => String::new(),
    }
}
