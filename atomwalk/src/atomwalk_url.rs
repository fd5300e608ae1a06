use std::env;

use crate::domain::AtomwalkQuery;

/// Production CRM host used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://crm.atomwalk.com";

const API_PREFIX: &str = "api";

#[derive(Debug, Clone, PartialEq)]
pub struct AtomwalkURL(String);

impl AsRef<str> for AtomwalkURL {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Default for AtomwalkURL {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl AtomwalkURL {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self(base_url.into())
    }

    /// Reads the base URL from `ATOMWALK_URL`, if set.
    pub fn from_env() -> Option<Self> {
        env::var("ATOMWALK_URL").ok().map(Self)
    }

    /// Append the given path to the URL.
    pub fn append_path(&self, path: &str) -> Self {
        let trimmed_url = self.0.trim_end_matches('/');
        let trimmed_path = path.trim_start_matches('/');
        Self(format!("{}/{}", trimmed_url, trimmed_path))
    }

    /// Builds `{base}/api/{endpoint}/{db_name}/`, the shape every tenant endpoint uses.
    pub fn tenant_endpoint(&self, endpoint: &str, db_name: &str) -> Self {
        let url = self
            .append_path(API_PREFIX)
            .append_path(endpoint.trim_end_matches('/'))
            .append_path(db_name.trim_matches('/'));
        Self(format!("{}/", url.0))
    }

    /// Appends the query pairs as a percent-encoded query string.
    pub fn with_query(&self, query: &impl AtomwalkQuery) -> Self {
        let pairs = query.as_query_pairs();
        if pairs.is_empty() {
            return self.clone();
        }

        let encoded = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        if self.0.contains('?') {
            Self(format!("{}&{}", self.0, encoded))
        } else {
            Self(format!("{}?{}", self.0, encoded))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserTaskFilter;

    #[test]
    fn tenant_endpoint_has_trailing_slash() {
        let url = AtomwalkURL::new("https://crm.atomwalk.com/").tenant_endpoint("user_task", "ACME_01");
        assert_eq!(url.as_ref(), "https://crm.atomwalk.com/api/user_task/ACME_01/");
    }

    #[test]
    fn with_query_skips_empty_params() {
        let filter = UserTaskFilter::new("D0").with_emp_id(Some("EMP 7".to_string()));
        let url = AtomwalkURL::default()
            .tenant_endpoint("user_task", "db")
            .with_query(&filter);
        assert_eq!(
            url.as_ref(),
            "https://crm.atomwalk.com/api/user_task/db/?task_type=D0&emp_id=EMP%207"
        );
    }
}
