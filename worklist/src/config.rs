use std::path::Path;

use serde::Deserialize;

use crate::domain::{
    models::{DayFilter, FilterState, StatusFilter, StatusMatch},
    services::BoardOptions,
    AfterCompletion, CompletionPolicy, NormalizerOptions, DEFAULT_TASK_STATUS,
};

const ENV_PREFIX: &str = "WORKLIST";

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub backend: BackendSettings,
    pub tasks: TaskSettings,
    pub completion: CompletionSettings,
    pub logging: LoggingSettings,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BackendSettings {
    pub base_url: String,
    /// Request timeout applied by the HTTP client. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: atomwalk::DEFAULT_BASE_URL.to_string(),
            timeout_secs: Some(30),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TaskSettings {
    pub default_day: DayFilter,
    pub default_status_filter: StatusFilter,
    /// Status shown for tasks the backend sent without one.
    pub default_status: String,
    pub status_match: StatusMatch,
}

impl Default for TaskSettings {
    fn default() -> Self {
        Self {
            default_day: DayFilter::default(),
            default_status_filter: StatusFilter::default(),
            default_status: DEFAULT_TASK_STATUS.to_string(),
            status_match: StatusMatch::default(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CompletionSettings {
    pub excluded_statuses: Vec<String>,
    pub after_success: AfterCompletion,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        let policy = CompletionPolicy::default();
        Self {
            excluded_statuses: policy.excluded_statuses,
            after_success: policy.after_success,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Reads settings from an optional TOML file, then `WORKLIST_` environment variables.
    ///
    /// Nested keys use `__`, e.g. `WORKLIST_TASKS__STATUS_MATCH=exact`. A missing file is
    /// not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        Self::from_builder(builder.add_source(environment()))
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, config::ConfigError> {
        builder.build()?.try_deserialize::<Settings>()
    }

    pub fn board_options(&self) -> BoardOptions {
        BoardOptions {
            normalizer: NormalizerOptions {
                default_status: self.tasks.default_status.clone(),
            },
            status_match: self.tasks.status_match,
            filters: FilterState::new(self.tasks.default_day, self.tasks.default_status_filter),
            completion: CompletionPolicy {
                excluded_statuses: self.completion.excluded_statuses.clone(),
                status_match: self.tasks.status_match,
                after_success: self.completion.after_success,
            },
        }
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("completion.excluded_statuses")
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{Config, File, FileFormat};

    #[test]
    fn defaults_without_sources() {
        let settings = Settings::from_builder(Config::builder()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.backend.base_url, "https://crm.atomwalk.com");
        assert_eq!(settings.tasks.default_status, "Pending");
        assert_eq!(settings.completion.excluded_statuses, vec!["Completed"]);
        assert_eq!(settings.completion.after_success, AfterCompletion::Refetch);
    }

    #[test]
    fn reads_toml_file() {
        let toml = r#"
            [backend]
            base_url = "http://localhost:8000"

            [tasks]
            default_day = "NEXT 3"
            default_status_filter = "all"
            default_status = "Planned"
            status_match = "exact"

            [completion]
            excluded_statuses = ["Completed", "On Hold", "Not Planned"]
            after_success = "patch_local"
        "#;
        let settings =
            Settings::from_builder(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
                .unwrap();

        assert_eq!(settings.backend.base_url, "http://localhost:8000");
        assert_eq!(settings.backend.timeout_secs, Some(30));
        assert_eq!(settings.tasks.default_day, DayFilter::Next3Days);
        assert_eq!(settings.tasks.default_status_filter, StatusFilter::All);
        assert_eq!(settings.tasks.status_match, StatusMatch::Exact);
        assert_eq!(settings.completion.after_success, AfterCompletion::PatchLocal);

        let options = settings.board_options();
        assert_eq!(options.normalizer.default_status, "Planned");
        assert_eq!(options.completion.excluded_statuses.len(), 3);
        assert_eq!(options.completion.status_match, StatusMatch::Exact);
    }

    #[test]
    fn environment_overrides_file() {
        let env = [
            ("WORKLIST_BACKEND__TIMEOUT_SECS", "5"),
            ("WORKLIST_TASKS__DEFAULT_DAY", "past"),
            ("WORKLIST_COMPLETION__EXCLUDED_STATUSES", "Completed,Closed"),
            ("WORKLIST_LOGGING__LEVEL", "debug"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let settings = Settings::from_builder(
            Config::builder()
                .add_source(File::from_str(
                    "[tasks]\ndefault_day = \"Today\"",
                    FileFormat::Toml,
                ))
                .add_source(environment().source(Some(env))),
        )
        .unwrap();

        assert_eq!(settings.backend.timeout_secs, Some(5));
        assert_eq!(settings.tasks.default_day, DayFilter::Past);
        assert_eq!(settings.completion.excluded_statuses, vec!["Completed", "Closed"]);
        assert_eq!(settings.logging.level, "debug");
    }
}
