use std::io::{self, Write};

use anyhow::{Context, Result};
use serde_json::json;
use worklist::domain::{
    models::{ActivityView, DayFilter, NormalizedActivity, NormalizedTask, StatusFilter, TaskId},
    ports::outbound::TaskBackend,
    services::{BoardOptions, TaskBoard},
};

use crate::cli::Commands;

/// Adjusts the board's starting filters to what the command asks for.
pub fn apply_overrides(options: &mut BoardOptions, command: &Commands) {
    match command {
        Commands::Tasks { day, status } => {
            if let Some(day) = day {
                options.filters.day = *day;
            }
            if let Some(status) = status {
                options.filters.status = *status;
            }
        }
        Commands::Complete { day, .. } => {
            if let Some(day) = day {
                options.filters.day = *day;
            }
            options.filters.status = StatusFilter::All;
        }
        Commands::Dashboard => options.filters.day = DayFilter::Today,
        Commands::Activities { .. } | Commands::ConfigPath => {}
    }
}

pub async fn run<B: TaskBackend>(
    board: &mut TaskBoard<B>,
    command: Commands,
    json: bool,
) -> Result<()> {
    match command {
        Commands::Tasks { .. } => {
            board.refresh().await.context("Failed to load tasks")?;
            print_tasks(board, json)
        }
        Commands::Activities {
            view,
            ref_num,
            manager,
        } => {
            match manager {
                Some(call_mode) => board.load_manager_activities(&call_mode).await,
                None => board.load_activities().await,
            }
            .context("Failed to load activities")?;
            print_activities(board, view, ref_num.as_deref(), json)
        }
        Commands::Complete { task_id, yes, .. } => {
            board.refresh().await.context("Failed to load tasks")?;
            complete(board, TaskId::from(task_id), yes, json).await
        }
        Commands::Dashboard => {
            board
                .load_dashboard()
                .await
                .context("Failed to load dashboard")?;
            print_dashboard(board, json)
        }
        Commands::ConfigPath => Ok(()),
    }
}

async fn complete<B: TaskBackend>(
    board: &mut TaskBoard<B>,
    id: TaskId,
    yes: bool,
    json: bool,
) -> Result<()> {
    let task = board.request_completion(&id)?;
    let prompt = format!("Mark \"{}\" ({}) as complete?", task.title, task.status);

    if !yes && !confirm(&prompt)? {
        board.cancel_completion();
        println!("Cancelled");
        return Ok(());
    }

    let completed = board
        .confirm_completion()
        .await
        .with_context(|| format!("Failed to complete task {}", id))?;

    if json {
        let task = board.task(&completed);
        println!("{}", serde_json::to_string_pretty(&json!({ "completed": completed, "task": task }))?);
    } else {
        println!("Task {} completed", completed);
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N] ", prompt);
    io::stderr().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn print_tasks<B: TaskBackend>(board: &TaskBoard<B>, json: bool) -> Result<()> {
    let tasks = board.visible_tasks();
    let summary = board.summary();

    if json {
        let value = json!({ "filters": board.filters(), "tasks": tasks, "summary": summary });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let filters = board.filters();
    println!("{} / {}", filters.day, filters.status);
    if tasks.is_empty() {
        println!("No tasks found");
    }
    for task in &tasks {
        println!("{}", task_line(task));
    }
    println!(
        "Total: {}  Completed: {}  Planned: {}",
        summary.total, summary.completed, summary.planned
    );
    Ok(())
}

fn task_line(task: &NormalizedTask) -> String {
    let mut line = format!(
        "{:>8}  {:<12} {:<6} {}",
        task.id, task.status, task.priority, task.title
    );
    if !task.time.is_empty() {
        line.push_str(&format!(" [{}]", task.time));
    }
    line.push_str(&format!(" {} | {} | {}", task.task_date, task.task_type, task.customer));
    line
}

fn print_activities<B: TaskBackend>(
    board: &TaskBoard<B>,
    view: ActivityView,
    ref_num: Option<&str>,
    json: bool,
) -> Result<()> {
    let activities = board.activity_view(view, ref_num);

    if json {
        let value = json!({
            "view": view,
            "activities": activities,
            "refNums": board.ref_nums(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", view.title());
    if activities.is_empty() {
        println!("No activities found");
    }
    for activity in activities {
        println!("{}", activity_line(activity));
    }
    Ok(())
}

fn activity_line(activity: &NormalizedActivity) -> String {
    let actions = if activity.accepts_updates() {
        "  (updates open)"
    } else {
        ""
    };
    format!(
        "{:<14} {:<14} due {:<12} {}{}",
        activity.heading(),
        activity.status,
        activity.due_date_label(),
        activity.activity_name.as_deref().unwrap_or_default(),
        actions
    )
}

fn print_dashboard<B: TaskBackend>(board: &TaskBoard<B>, json: bool) -> Result<()> {
    let tasks = board.visible_tasks();

    if json {
        let value = json!({
            "profile": board.profile(),
            "company": board.company(),
            "activities": board.activities().len(),
            "overDue": board.activity_view(ActivityView::OverDue, None).len(),
            "tasks": tasks,
            "summary": board.summary(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    let profile = board.profile();
    let name = profile.and_then(|p| p.name.as_deref()).unwrap_or("Unknown employee");
    let emp_id = profile
        .and_then(|p| p.emp_id.as_deref())
        .or(board.session().emp_id())
        .unwrap_or("-");
    let company = board
        .company()
        .and_then(|c| c.name.as_deref())
        .unwrap_or("-");

    println!("{} ({}) at {}", name, emp_id, company);
    println!(
        "Activities: {} ({} over-due)",
        board.activities().len(),
        board.activity_view(ActivityView::OverDue, None).len()
    );
    println!("Today:");
    for task in &tasks {
        println!("{}", task_line(task));
    }
    let summary = board.summary();
    println!(
        "Total: {}  Completed: {}  Planned: {}",
        summary.total, summary.completed, summary.planned
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use worklist::adapters::outbound::InMemoryBackend;
    use worklist::domain::SessionContext;

    #[test]
    fn overrides_follow_the_command() {
        let mut options = BoardOptions::default();
        apply_overrides(
            &mut options,
            &Commands::Complete {
                task_id: "1".to_string(),
                day: Some(DayFilter::Past),
                yes: true,
            },
        );
        assert_eq!(options.filters.day, DayFilter::Past);
        assert_eq!(options.filters.status, StatusFilter::All);
    }

    #[tokio::test]
    async fn completes_without_prompt() {
        let backend = InMemoryBackend::seeded();
        let mut options = BoardOptions::default();
        let command = Commands::Complete {
            task_id: "101".to_string(),
            day: None,
            yes: true,
        };
        apply_overrides(&mut options, &command);
        let mut board = TaskBoard::new(
            Arc::new(backend.clone()),
            SessionContext::new("DEV", "token"),
            options,
        );

        run(&mut board, command, false).await.unwrap();
        assert_eq!(backend.updates().len(), 1);
    }

    #[test]
    fn task_line_skips_empty_time() {
        let task = worklist::domain::TaskNormalizer::default()
            .normalize(serde_json::from_value(json!({ "id": 5, "name": "Call back" })).unwrap())
            .unwrap();
        let line = task_line(&task);
        assert!(line.contains("Call back"));
        assert!(!line.contains('['));
    }
}
