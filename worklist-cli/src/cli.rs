use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use worklist::domain::models::{ActivityView, DayFilter, StatusFilter};

#[derive(Debug, Parser)]
#[command(name = "worklist")]
#[command(about = "Tasks and activities of an Atomwalk employee account")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Use local in-memory data instead of the backend
    #[arg(long, global = true)]
    pub dev: bool,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file, defaults to the user config directory
    #[arg(long, global = true, env = "WORKLIST_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List tasks for a day range, filtered by status
    Tasks {
        #[arg(long, value_parser = parse_day)]
        day: Option<DayFilter>,
        #[arg(long, value_parser = parse_status)]
        status: Option<StatusFilter>,
    },
    /// List activities with their computed status
    Activities {
        #[arg(long, value_parser = parse_view, default_value = "all")]
        view: ActivityView,
        /// Only activities of this project reference
        #[arg(long = "ref")]
        ref_num: Option<String>,
        /// Show the team's activities for this call mode
        #[arg(long)]
        manager: Option<String>,
    },
    /// Mark a task complete
    Complete {
        task_id: String,
        /// Day range the task is listed under
        #[arg(long, value_parser = parse_day)]
        day: Option<DayFilter>,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Profile, company, activity count and today's tasks
    Dashboard,
    /// Print config and session paths
    ConfigPath,
}

fn parse_day(value: &str) -> Result<DayFilter, String> {
    value
        .parse()
        .map_err(|_| format!("unknown day range '{}' (today, next3, past, all)", value))
}

fn parse_status(value: &str) -> Result<StatusFilter, String> {
    value.parse().map_err(|_| {
        format!(
            "unknown status '{}' (planned, completed, not-planned, all)",
            value
        )
    })
}

fn parse_view(value: &str) -> Result<ActivityView, String> {
    value
        .parse()
        .map_err(|_| format!("unknown view '{}' (all, pending, overdue, completed)", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_task_filters() {
        let cli = Cli::try_parse_from([
            "worklist", "tasks", "--day", "next3", "--status", "not-planned", "--json",
        ])
        .unwrap();
        assert!(cli.global.json);
        match cli.command {
            Commands::Tasks { day, status } => {
                assert_eq!(day, Some(DayFilter::Next3Days));
                assert_eq!(status, Some(StatusFilter::NotPlanned));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_unknown_view() {
        assert!(Cli::try_parse_from(["worklist", "activities", "--view", "late"]).is_err());
    }

    #[test]
    fn complete_takes_a_task_id() {
        let cli = Cli::try_parse_from(["worklist", "--dev", "complete", "101", "-y"]).unwrap();
        assert!(cli.global.dev);
        assert!(matches!(
            cli.command,
            Commands::Complete { ref task_id, yes: true, day: None } if task_id == "101"
        ));
    }
}
