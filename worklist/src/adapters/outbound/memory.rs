use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use atomwalk::{CompanyInfo, ProfileInfo, RawActivity, RawTask, TaskUpdateData, YesNo};

use crate::domain::{
    models::DayFilter,
    ports::outbound::{TaskBackend, TaskQuery},
    WorklistError,
};

/// An update the in-memory backend received.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateCall {
    pub task_data: TaskUpdateData,
    pub is_completed: YesNo,
    pub assign_user: YesNo,
}

#[derive(Debug, Default)]
struct Store {
    profile: Option<ProfileInfo>,
    company: CompanyInfo,
    activities: Vec<RawActivity>,
    manager_activities: Vec<RawActivity>,
    tasks: Vec<(DayFilter, RawTask)>,
    queries: Vec<TaskQuery>,
    updates: Vec<UpdateCall>,
    failure: Option<String>,
}

/// Backend kept in memory, used for offline runs and tests.
///
/// Tasks are stored per day filter, `DayFilter::All` sees all of them. Completed tasks get
/// the "Completed" status so a re-fetch reflects the update.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBackend {
    store: Arc<Mutex<Store>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend filled with a handful of tasks and activities.
    pub fn seeded() -> Self {
        let backend = Self::new();
        backend.set_profile(sample(json!({
            "id": 4,
            "emp_id": "EMP-004",
            "name": "Asha Kulkarni",
            "email_id": "asha@example.com"
        })));
        backend.set_company(sample(json!({ "name": "Atomwalk Demo Ltd" })));

        for (day, task) in [
            (
                DayFilter::Today,
                json!({
                    "id": 101,
                    "name": "Inspect boiler",
                    "remarks": "Annual check",
                    "task_date": "19-10-2026",
                    "start_time": "09:00",
                    "end_time": "10:30",
                    "task_status": "Planned",
                    "priority": "01",
                    "task_type": "VISIT",
                    "task_type_display": "Site Visit",
                    "customer": { "id": 7, "name": "Northwind" },
                    "curr_user": { "id": 4, "user_name": "asha.k", "user_nick_name": "Asha" },
                    "owner": { "id": 2, "user_name": "ravi" }
                }),
            ),
            (
                DayFilter::Today,
                json!({
                    "id": 102,
                    "name": "Send quotation",
                    "task_date": "19-10-2026",
                    "task_status": "Completed",
                    "priority": "02",
                    "curr_user": { "id": 4, "user_name": "asha.k" }
                }),
            ),
            (
                DayFilter::Next3Days,
                json!({
                    "id": 103,
                    "name": "Follow up lead",
                    "task_date": "21-10-2026",
                    "start_time": "14:00",
                    "task_status": "Not Planned"
                }),
            ),
            (
                DayFilter::Past,
                json!({
                    "id": 90,
                    "name": "Collect payment",
                    "task_date": "12-10-2026",
                    "task_status": "Planned",
                    "customer": { "id": 9, "name": "Contoso" }
                }),
            ),
        ] {
            backend.add_task(day, sample(task));
        }

        backend.set_activities(vec![
            sample(json!({
                "activity_id": 501,
                "activity_name": "Install panels",
                "ref_num": "PRJ-100",
                "sale_order_no": "SO-2210",
                "activity_status": "02",
                "due_date": "01-Sep-2026",
                "is_over_due": false,
                "no_hold": 1,
                "no_pending": 3
            })),
            sample(json!({
                "activity_id": 502,
                "activity_name": "Wiring",
                "ref_num": "PRJ-100",
                "activity_status": "01",
                "due_date": "30-Oct-2026",
                "no_pending": 2
            })),
            sample(json!({
                "activity_id": 503,
                "activity_name": "Handover",
                "ref_num": "PRJ-200",
                "activity_status": "03",
                "due_date": "15-Oct-2026",
                "no_hold": 0,
                "no_pending": 0
            })),
        ]);
        backend
    }

    pub fn set_profile(&self, profile: ProfileInfo) {
        self.store().profile = Some(profile);
    }

    pub fn set_company(&self, company: CompanyInfo) {
        self.store().company = company;
    }

    pub fn set_activities(&self, activities: Vec<RawActivity>) {
        self.store().activities = activities;
    }

    pub fn set_manager_activities(&self, activities: Vec<RawActivity>) {
        self.store().manager_activities = activities;
    }

    pub fn add_task(&self, day: DayFilter, task: RawTask) {
        self.store().tasks.push((day, task));
    }

    /// Makes every following call fail with a network error until cleared.
    pub fn fail_with(&self, message: Option<&str>) {
        self.store().failure = message.map(str::to_string);
    }

    pub fn queries(&self) -> Vec<TaskQuery> {
        self.store().queries.clone()
    }

    pub fn updates(&self) -> Vec<UpdateCall> {
        self.store().updates.clone()
    }

    fn store(&self) -> std::sync::MutexGuard<'_, Store> {
        self.store.lock().expect("in-memory store lock poisoned")
    }

    fn check(&self) -> Result<std::sync::MutexGuard<'_, Store>, WorklistError> {
        let store = self.store();
        match &store.failure {
            Some(message) => Err(WorklistError::network(message.clone())),
            None => Ok(store),
        }
    }
}

fn sample<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
    serde_json::from_value(value).expect("sample data is well-formed")
}

#[async_trait]
impl TaskBackend for InMemoryBackend {
    async fn get_profile_info(
        &self,
        _emp_id: Option<&str>,
    ) -> Result<Option<ProfileInfo>, WorklistError> {
        Ok(self.check()?.profile.clone())
    }

    async fn get_company_info(&self) -> Result<CompanyInfo, WorklistError> {
        Ok(self.check()?.company.clone())
    }

    async fn get_activity_list(&self) -> Result<Vec<RawActivity>, WorklistError> {
        Ok(self.check()?.activities.clone())
    }

    async fn get_manager_activity_list(
        &self,
        _call_mode: &str,
    ) -> Result<Vec<RawActivity>, WorklistError> {
        Ok(self.check()?.manager_activities.clone())
    }

    async fn get_user_tasks(&self, query: &TaskQuery) -> Result<Vec<RawTask>, WorklistError> {
        let mut store = self.check()?;
        store.queries.push(query.clone());
        Ok(store
            .tasks
            .iter()
            .filter(|(day, _)| query.day == DayFilter::All || *day == query.day)
            .map(|(_, task)| task.clone())
            .collect())
    }

    async fn update_task(
        &self,
        task_data: &TaskUpdateData,
        is_completed: YesNo,
        assign_user: YesNo,
    ) -> Result<(), WorklistError> {
        let mut store = self.check()?;
        store.updates.push(UpdateCall {
            task_data: task_data.clone(),
            is_completed,
            assign_user,
        });

        if is_completed == YesNo::Yes {
            let id = Some(&task_data.id);
            if let Some((_, task)) = store
                .tasks
                .iter_mut()
                .find(|(_, task)| task.id.as_ref() == id)
            {
                task.task_status = Some("Completed".to_string());
            }
        }
        Ok(())
    }
}
