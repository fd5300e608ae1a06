mod conversions;

use std::time::Duration;

use async_trait::async_trait;

use atomwalk::{CompanyInfo, ProfileInfo, RawActivity, RawTask, TaskUpdateData, YesNo};

use crate::{
    config::BackendSettings,
    domain::{
        ports::outbound::{TaskBackend, TaskQuery},
        SessionContext, WorklistError,
    },
};

use self::conversions::{map_atomwalk_error, to_update_request, to_user_task_filter};

/// Adapter that wraps the Atomwalk client to implement the TaskBackend port.
pub struct AtomwalkBackend {
    client: atomwalk::AtomwalkClient,
}

impl AtomwalkBackend {
    pub fn new(client: atomwalk::AtomwalkClient) -> Self {
        Self { client }
    }

    /// Builds a client for the session's tenant and token.
    pub fn from_session(
        session: &SessionContext,
        settings: &BackendSettings,
    ) -> Result<Self, WorklistError> {
        let credentials = atomwalk::Credentials::new(&session.token, &session.db_name)
            .map_err(|_| WorklistError::Unauthorized)?;
        let client = atomwalk::AtomwalkClient::with_base_url(
            credentials,
            atomwalk::AtomwalkURL::new(&settings.base_url),
            settings.timeout_secs.map(Duration::from_secs),
        )
        .map_err(map_atomwalk_error)?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl TaskBackend for AtomwalkBackend {
    async fn get_profile_info(
        &self,
        emp_id: Option<&str>,
    ) -> Result<Option<ProfileInfo>, WorklistError> {
        let filter = atomwalk::EmployeeFilter::new(emp_id.map(str::to_string));
        let profiles = self
            .client
            .fetch_profile_info(&filter)
            .await
            .map_err(map_atomwalk_error)?;
        Ok(profiles.into_iter().next())
    }

    async fn get_company_info(&self) -> Result<CompanyInfo, WorklistError> {
        self.client
            .fetch_company_info()
            .await
            .map_err(map_atomwalk_error)
    }

    async fn get_activity_list(&self) -> Result<Vec<RawActivity>, WorklistError> {
        self.client
            .fetch_activity_list()
            .await
            .map_err(map_atomwalk_error)
    }

    async fn get_manager_activity_list(
        &self,
        call_mode: &str,
    ) -> Result<Vec<RawActivity>, WorklistError> {
        let filter = atomwalk::ManagerActivityFilter::new(call_mode.to_string());
        self.client
            .fetch_manager_activity_list(&filter)
            .await
            .map_err(map_atomwalk_error)
    }

    async fn get_user_tasks(&self, query: &TaskQuery) -> Result<Vec<RawTask>, WorklistError> {
        let tasks = self
            .client
            .fetch_user_tasks(&to_user_task_filter(query))
            .await
            .map_err(map_atomwalk_error)?;
        tracing::debug!(count = tasks.len(), day = %query.day, "Fetched user tasks");
        Ok(tasks)
    }

    async fn update_task(
        &self,
        task_data: &TaskUpdateData,
        is_completed: YesNo,
        assign_user: YesNo,
    ) -> Result<(), WorklistError> {
        let request = to_update_request(task_data, is_completed, assign_user);
        let ack = self
            .client
            .update_task(&request)
            .await
            .map_err(map_atomwalk_error)?;
        tracing::debug!(task_id = %task_data.id, ack = %ack, "Task update acknowledged");
        Ok(())
    }
}
