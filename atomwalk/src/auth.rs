use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Per-tenant credentials attached to every backend call.
///
/// The backend is multi-tenant: each customer company lives in its own database,
/// named by `db_name`, which becomes the last path segment of every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub db_name: String,
}

#[derive(Error, Debug, PartialEq)]
pub enum IntoCredentialsError {
    #[error("Missing auth token")]
    MissingToken,
    #[error("Missing database name")]
    MissingDbName,
}

impl Credentials {
    pub fn new(
        token: impl Into<String>,
        db_name: impl Into<String>,
    ) -> Result<Credentials, IntoCredentialsError> {
        let token = token.into();
        let db_name = db_name.into();

        if token.trim().is_empty() {
            return Err(IntoCredentialsError::MissingToken);
        }
        if db_name.trim().is_empty() {
            return Err(IntoCredentialsError::MissingDbName);
        }

        Ok(Credentials { token, db_name })
    }

    pub fn as_auth_header(&self) -> String {
        format!("Token {}", self.token)
    }
}
