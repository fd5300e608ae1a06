use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    domain::{
        ActivityList, CompanyInfo, EmployeeFilter, ManagerActivityFilter, ProfileInfo,
        RawActivity, RawTask, TaskUpdateRequest, UserTaskFilter,
    },
    AtomwalkURL,
};

use super::Credentials;

const COMPANY_INFO: &str = "company_info";
const EMPLOYEE_LIST: &str = "get_employee_list";
const USER_ACTIVITY: &str = "get_user_activity";
const USER_TASK: &str = "user_task";
const UPDATE_TASK: &str = "update_task";

#[derive(Debug, Clone)]
pub struct AtomwalkClient {
    http: reqwest::Client,
    base_url: AtomwalkURL,
    credentials: Credentials,
}

impl AtomwalkClient {
    pub fn new(credentials: Credentials) -> Result<Self, AtomwalkFetchError> {
        Self::with_base_url(credentials, AtomwalkURL::default(), None)
    }

    pub fn with_base_url(
        credentials: Credentials,
        base_url: AtomwalkURL,
        timeout: Option<Duration>,
    ) -> Result<Self, AtomwalkFetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AtomwalkFetchError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    fn endpoint(&self, name: &str) -> AtomwalkURL {
        self.base_url
            .tenant_endpoint(name, &self.credentials.db_name)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: impl AsRef<str>,
    ) -> Result<T, AtomwalkFetchError> {
        tracing::debug!(url = url.as_ref(), "GET");

        let resp = self
            .http
            .get(url.as_ref())
            .header(AUTHORIZATION, self.credentials.as_auth_header())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| AtomwalkFetchError::ResponseError(e.to_string()))?;

        Self::parse(resp).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        url: impl AsRef<str>,
        body: &B,
    ) -> Result<T, AtomwalkFetchError> {
        tracing::debug!(url = url.as_ref(), "POST");

        let resp = self
            .http
            .post(url.as_ref())
            .header(AUTHORIZATION, self.credentials.as_auth_header())
            .json(body)
            .send()
            .await
            .map_err(|e| AtomwalkFetchError::ResponseError(e.to_string()))?;

        Self::parse(resp).await
    }

    async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, AtomwalkFetchError> {
        let status = resp.status();
        if status == 401 || status == 403 {
            return Err(AtomwalkFetchError::Unauthorized);
        }
        if !status.is_success() {
            return Err(AtomwalkFetchError::ResponseError(format!(
                "Unexpected status {}",
                status
            )));
        }

        resp.json::<T>().await.map_err(|e| {
            AtomwalkFetchError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    /// Profile rows for the given employee. The backend answers with a list even when
    /// filtered to a single employee.
    pub async fn fetch_profile_info(
        &self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<ProfileInfo>, AtomwalkFetchError> {
        let url = self.endpoint(EMPLOYEE_LIST).with_query(filter);
        self.fetch(url).await
    }

    pub async fn fetch_company_info(&self) -> Result<CompanyInfo, AtomwalkFetchError> {
        self.fetch(self.endpoint(COMPANY_INFO)).await
    }

    pub async fn fetch_activity_list(&self) -> Result<Vec<RawActivity>, AtomwalkFetchError> {
        let response: ActivityList = self.fetch(self.endpoint(USER_ACTIVITY)).await?;
        Ok(response.into_activities())
    }

    pub async fn fetch_manager_activity_list(
        &self,
        filter: &ManagerActivityFilter,
    ) -> Result<Vec<RawActivity>, AtomwalkFetchError> {
        let url = self.endpoint(USER_ACTIVITY).with_query(filter);
        let response: ActivityList = self.fetch(url).await?;
        Ok(response.into_activities())
    }

    /// Tasks of the signed-in employee, scoped server-side by the filter's day token.
    pub async fn fetch_user_tasks(
        &self,
        filter: &UserTaskFilter,
    ) -> Result<Vec<RawTask>, AtomwalkFetchError> {
        let url = self.endpoint(USER_TASK).with_query(filter);
        let response: Option<Vec<RawTask>> = self.fetch(url).await?;
        Ok(response.unwrap_or_default())
    }

    /// Returns the backend's acknowledgement as-is; its shape is not documented.
    pub async fn update_task(
        &self,
        request: &TaskUpdateRequest,
    ) -> Result<Value, AtomwalkFetchError> {
        self.post(self.endpoint(UPDATE_TASK), request).await
    }
}

#[derive(Error, Debug)]
pub enum AtomwalkFetchError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("Other: {0}")]
    Other(String),
}
