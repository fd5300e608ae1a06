use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use worklist::domain::SessionContext;

/// The session a signed-in app leaves behind. Only read here, never written.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct StoredSession {
    db_name: String,
    token: String,
    emp_id: Option<String>,
    pin: Option<String>,
    biometric_enabled: bool,
}

impl From<StoredSession> for SessionContext {
    fn from(stored: StoredSession) -> Self {
        let mut session =
            SessionContext::new(stored.db_name, stored.token).with_biometric(stored.biometric_enabled);
        if let Some(emp_id) = stored.emp_id {
            session = session.with_emp_id(emp_id);
        }
        if let Some(pin) = stored.pin {
            session = session.with_pin(pin);
        }
        session
    }
}

/// Loads the stored session. Returns None if nobody is signed in.
pub fn load_session(path: &Path) -> Result<Option<SessionContext>> {
    if !path.exists() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session at {}", path.display()))?;
    parse_session(&raw).with_context(|| format!("Failed to parse session at {}", path.display()))
}

fn parse_session(raw: &str) -> Result<Option<SessionContext>> {
    let stored: StoredSession = toml::from_str(raw)?;
    if stored.token.trim().is_empty() || stored.db_name.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(stored.into()))
}
