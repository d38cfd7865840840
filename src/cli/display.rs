//! Text rendering for the console.

use std::fmt::Write;

use crate::models::Task;
use crate::store::StoreStatistics;

const RULE_WIDTH: usize = 60;
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub const WELCOME: &str = "Welcome to the task console!\n\
Type 'help' for available commands or 'quit' to exit.\n";

pub const GOODBYE: &str = "Thank you for using the task console!";

pub const HELP: &str = "
Available commands:
  list/ls                 - Show all tasks
  add <task>              - Add a new task
  create <task>           - Add a new task
  update <id> <new_task>  - Update a task
  delete <id>             - Delete a task
  remove <id>             - Delete a task
  complete <id>           - Toggle task completion
  done <id>               - Toggle task completion
  stats [json]            - Show store statistics
  help/h                  - Show this help message
  quit/exit/q             - Exit the application
";

/// Renders a task listing, newest first.
pub fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }

    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

    let rule = "-".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "\nFound {} task(s):\n", tasks.len());
    let _ = writeln!(out, "{}", rule);
    for (i, task) in sorted.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:2}. [{}] {}... : {}",
            i + 1,
            task.status_symbol(),
            task.short_id(),
            task.description
        );
        let _ = writeln!(out, "    Created: {}", task.created_at.format(TIME_FORMAT));
        if task.is_modified() {
            let _ = writeln!(out, "    Updated: {}", task.updated_at.format(TIME_FORMAT));
        }
        out.push('\n');
    }
    let _ = writeln!(out, "{}", rule);
    out
}

/// Renders a human-readable statistics block.
pub fn render_statistics(stats: &StoreStatistics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nStore statistics:");
    let _ = writeln!(out, "  Records:    {}", stats.total_records);
    let _ = writeln!(out, "  Hits:       {}", stats.hit_count);
    let _ = writeln!(out, "  Misses:     {}", stats.miss_count);
    let _ = writeln!(out, "  Hit rate:   {:.1}%", stats.hit_rate() * 100.0);
    let _ = writeln!(out, "  Evictions:  {}", stats.eviction_count);
    let _ = writeln!(out, "  Memory:     ~{} bytes", stats.memory_usage);
    let _ = writeln!(out, "  As of:      {}", stats.timestamp.format(TIME_FORMAT));
    out
}

/// Renders statistics as pretty-printed JSON.
pub fn render_statistics_json(stats: &StoreStatistics) -> serde_json::Result<String> {
    serde_json::to_string_pretty(stats).map(|mut json| {
        json.push('\n');
        json
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_render_empty() {
        assert_eq!(render_tasks(&[]), "No tasks found.\n");
    }

    #[test]
    fn test_render_newest_first() {
        let mut older = Task::new("Older task");
        older.created_at = older.created_at - Duration::minutes(5);
        older.updated_at = older.created_at;
        let newer = Task::new("Newer task");

        let out = render_tasks(&[older.clone(), newer.clone()]);
        assert!(out.contains("Found 2 task(s)"));
        let newer_at = out.find("Newer task").unwrap();
        let older_at = out.find("Older task").unwrap();
        assert!(newer_at < older_at);
        assert!(out.contains(&format!(" 1. [○] {}... : Newer task", newer.short_id())));
        assert!(!out.contains("Updated:"));
    }

    #[test]
    fn test_render_shows_updates() {
        let mut task = Task::new("Done task");
        task.mark_completed();

        let out = render_tasks(&[task]);
        assert!(out.contains("[✓]"));
        assert!(out.contains("Updated:"));
    }

    #[test]
    fn test_render_statistics() {
        let mut stats = StoreStatistics::new();
        stats.record_hit();
        stats.record_miss();
        stats.set_total_records(3);

        let out = render_statistics(&stats);
        assert!(out.contains("Records:    3"));
        assert!(out.contains("Hit rate:   50.0%"));
    }

    #[test]
    fn test_render_statistics_json() {
        let stats = StoreStatistics::new();
        let json = render_statistics_json(&stats).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_records"], 0);
        assert_eq!(value["eviction_count"], 0);
    }
}
