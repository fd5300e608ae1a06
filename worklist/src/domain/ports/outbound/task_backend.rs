use async_trait::async_trait;

use atomwalk::{CompanyInfo, ProfileInfo, RawActivity, RawTask, TaskUpdateData, YesNo};

use crate::domain::{models::DayFilter, SessionContext, WorklistError};

/// Parameters of a task list fetch.
///
/// Empty optional values are not sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskQuery {
    pub day: DayFilter,
    pub customer_id: Option<String>,
    pub lead_id: Option<String>,
    pub emp_id: Option<String>,
}

impl TaskQuery {
    /// The signed-in employee's tasks for the given day range.
    pub fn for_session(session: &SessionContext, day: DayFilter) -> Self {
        Self {
            day,
            emp_id: session.emp_id().map(str::to_string),
            ..Self::default()
        }
    }
}

/// Outbound port for the task and activity backend.
///
/// Implementations are bound to one session: credentials and tenant are not passed to
/// individual methods. Records are returned raw; normalization happens in the domain.
#[async_trait]
pub trait TaskBackend: Send + Sync + 'static {
    /// Profile of the given employee, or of the signed-in user when `emp_id` is `None`.
    async fn get_profile_info(
        &self,
        emp_id: Option<&str>,
    ) -> Result<Option<ProfileInfo>, WorklistError>;

    async fn get_company_info(&self) -> Result<CompanyInfo, WorklistError>;

    /// Activities assigned to the signed-in user.
    async fn get_activity_list(&self) -> Result<Vec<RawActivity>, WorklistError>;

    /// Activities of the user's reports, for the given call mode.
    async fn get_manager_activity_list(
        &self,
        call_mode: &str,
    ) -> Result<Vec<RawActivity>, WorklistError>;

    /// Tasks already scoped by the backend to the query's day range.
    async fn get_user_tasks(&self, query: &TaskQuery) -> Result<Vec<RawTask>, WorklistError>;

    async fn update_task(
        &self,
        task_data: &TaskUpdateData,
        is_completed: YesNo,
        assign_user: YesNo,
    ) -> Result<(), WorklistError>;
}
