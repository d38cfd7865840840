//! Integration Tests for the Task Console
//!
//! Drives whole console sessions from scripted input and checks the output.

use bounded_store::cli::Console;
use bounded_store::models::{short_id, Task};
use bounded_store::todo::{TaskController, TaskService};
use bounded_store::{BoundedStore, EvictionPolicy, SharedStore};
use tokio::io::BufReader;
use uuid::Uuid;

// == Helper Functions ==

async fn run_session_with(store: BoundedStore<Uuid, Task>, input: &str) -> String {
    let controller = TaskController::new(TaskService::new(SharedStore::new(store)));
    let mut console = Console::new(controller, BufReader::new(input.as_bytes()), Vec::new());
    console.run().await.unwrap();
    String::from_utf8(console.into_output()).unwrap()
}

async fn run_session(input: &str) -> String {
    run_session_with(BoundedStore::unbounded(EvictionPolicy::Fifo), input).await
}

// == Session Lifecycle ==

#[tokio::test]
async fn test_quit_ends_session() {
    let output = run_session("help\nquit\nadd never runs\n").await;

    assert!(output.contains("Available commands:"));
    assert!(output.contains("Thank you for using the task console!"));
    assert!(!output.contains("Task created"));
    assert!(!output.contains("End of input received"));
}

#[tokio::test]
async fn test_eof_ends_session() {
    let output = run_session("").await;
    assert!(output.ends_with("> \nEnd of input received. Goodbye!\n"));
}

// == Task Commands ==

#[tokio::test]
async fn test_add_then_list() {
    let output = run_session("add Buy milk\ncreate Walk the dog\nls\nq\n").await;

    assert_eq!(output.matches("Task created with ID: ").count(), 2);
    assert!(output.contains("Found 2 task(s)"));
    assert!(output.contains("... : Walk the dog"));
    assert!(output.contains("... : Buy milk"));
}

#[tokio::test]
async fn test_update_delete_complete_by_prefix() {
    // Ids are random, so the task is created before the script is written
    let store = SharedStore::new(BoundedStore::unbounded(EvictionPolicy::Fifo));
    let controller = TaskController::new(TaskService::new(store.clone()));
    let id = controller.create_task("Draft").await.unwrap();
    let short = short_id(&id);

    let script = format!(
        "update {short} Final copy\ndone {short}\nlist\ndone {short}\ndelete {short}\nlist\nquit\n"
    );
    let mut console = Console::new(controller, BufReader::new(script.as_bytes()), Vec::new());
    console.run().await.unwrap();
    let output = String::from_utf8(console.into_output()).unwrap();

    assert!(output.contains(&format!("Task {}... updated successfully.", short)));
    assert!(output.contains(&format!("Task {}... marked as completed.", short)));
    assert!(output.contains(&format!("[✓] {}... : Final copy", short)));
    assert!(output.contains(&format!("Task {}... marked as incomplete.", short)));
    assert!(output.contains(&format!("Task {}... deleted successfully.", short)));
    assert!(output.contains("No tasks found."));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_missing_arguments_and_unknown_commands() {
    let output = run_session("add\nupdate abc\ndelete\ndone\nfly away\nquit\n").await;

    assert!(output.contains("Usage: add <task>"));
    assert!(output.contains("Usage: update <id> <new_task>"));
    assert!(output.contains("Usage: delete <id>"));
    assert!(output.contains("Usage: complete <id>"));
    assert!(output.contains("Unknown command: fly away. Type 'help' for available commands."));
}

#[tokio::test]
async fn test_dangerous_verb_rejected() {
    let output = run_session("ls;whoami\n../bin/sh\neval(1)\nlist\nquit\n").await;

    assert_eq!(output.matches("potentially dangerous").count(), 3);
    assert!(output.contains("No tasks found."));
}

#[tokio::test]
async fn test_task_text_keeps_shell_symbols() {
    let output = run_session("add Buy milk & eggs\nadd Pay $5\nadd a; b\nlist\nquit\n").await;

    assert_eq!(output.matches("Task created with ID: ").count(), 3);
    assert!(!output.contains("potentially dangerous"));
    assert!(output.contains("... : Buy milk & eggs"));
    assert!(output.contains("... : Pay $5"));
    assert!(output.contains("... : a; b"));
}

#[tokio::test]
async fn test_unknown_id() {
    let output = run_session("delete 00000000\nquit\n").await;
    assert!(output.contains("No task found with ID starting with: 00000000\n"));
}

// == Statistics ==

#[tokio::test]
async fn test_stats_json_reports_evictions() {
    let store = BoundedStore::with_capacity(2, EvictionPolicy::Fifo).unwrap();
    let output = run_session_with(store, "add one\nadd two\nadd three\nstats json\nquit\n").await;

    let start = output.find('{').unwrap();
    let end = output.rfind('}').unwrap();
    let value: serde_json::Value = serde_json::from_str(&output[start..=end]).unwrap();

    assert_eq!(value["total_records"], 2);
    assert_eq!(value["eviction_count"], 1);
    assert!(value["timestamp"].is_string());
}
