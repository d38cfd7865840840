//! Interactive Console
//!
//! Reads commands line by line and answers through a [`TaskController`].

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error};
use uuid::Uuid;

use crate::cli::command::Command;
use crate::cli::display::{
    render_statistics, render_statistics_json, render_tasks, GOODBYE, HELP, WELCOME,
};
use crate::error::StoreError;
use crate::models::short_id;
use crate::todo::validation::{sanitize_input, validate_command};
use crate::todo::TaskController;

pub const PROMPT: &str = "> ";

/// What the loop does after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text and read the next line
    Continue(String),
    /// Print the text and stop
    Quit(String),
}

/// REPL over any buffered reader and writer.
pub struct Console<R, W> {
    controller: TaskController,
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(controller: TaskController, input: R, output: W) -> Self {
        Self {
            controller,
            input,
            output,
        }
    }

    // == Run ==
    /// Runs until `quit` or end of input.
    ///
    /// Only I/O failures on the reader or writer end the loop with an error;
    /// command failures are printed and the loop carries on.
    pub async fn run(&mut self) -> io::Result<()> {
        self.write(WELCOME).await?;

        let mut line = String::new();
        loop {
            self.write(PROMPT).await?;
            line.clear();
            if self.input.read_line(&mut line).await? == 0 {
                self.write("\nEnd of input received. Goodbye!\n").await?;
                break;
            }

            match self.execute(&line).await {
                Outcome::Continue(text) => self.write(&text).await?,
                Outcome::Quit(text) => {
                    self.write(&text).await?;
                    break;
                }
            }
        }
        Ok(())
    }

    /// Hands the writer back, mostly for inspecting output in tests.
    pub fn into_output(self) -> W {
        self.output
    }

    // == Execute ==
    /// Executes one input line and returns the text to print.
    pub async fn execute(&self, line: &str) -> Outcome {
        let line = sanitize_input(line);
        if line.is_empty() {
            return Outcome::Continue(String::new());
        }
        // Only the verb is checked; task text may hold any character
        let verb = line.split_whitespace().next().unwrap_or_default();
        if let Err(err) = validate_command(verb) {
            return Outcome::Continue(format!("{}\n", err.user_message("")));
        }

        let command = Command::parse(line);
        debug!(?command, "console command");

        let result = match command {
            Command::Quit => return Outcome::Quit(format!("{}\n", GOODBYE)),
            Command::Empty => return Outcome::Continue(String::new()),
            Command::Help => Ok(HELP.to_string()),
            Command::Usage(hint) => Ok(format!("{}\n", hint)),
            Command::Unknown(input) => Ok(format!(
                "Unknown command: {}. Type 'help' for available commands.\n",
                input
            )),
            Command::List => Ok(render_tasks(&self.controller.get_all_tasks().await)),
            Command::Stats { json } => Ok(self.stats(json).await),
            Command::Add(description) => self.add(&description).await,
            Command::Update { id, description } => self.update(&id, &description).await,
            Command::Delete(id) => self.delete(&id).await,
            Command::Toggle(id) => self.toggle(&id).await,
        };

        Outcome::Continue(result.unwrap_or_else(|(err, context)| {
            format!("{}\n", err.user_message(context))
        }))
    }

    async fn add(&self, description: &str) -> CommandResult {
        let id = self
            .controller
            .create_task(description)
            .await
            .map_err(|e| (e, "adding task"))?;
        Ok(format!("Task created with ID: {}...\n", short_id(&id)))
    }

    async fn update(&self, prefix: &str, description: &str) -> CommandResult {
        let context = "updating task";
        let id = self.resolve(prefix, context).await?;
        let short = short_id(&id);
        let updated = self
            .controller
            .update_task(&id.to_string(), Some(description), None)
            .await
            .map_err(|e| (e, context))?;

        Ok(if updated {
            format!("Task {}... updated successfully.\n", short)
        } else {
            format!("Failed to update task with ID: {}...\n", short)
        })
    }

    async fn delete(&self, prefix: &str) -> CommandResult {
        let context = "deleting task";
        let id = self.resolve(prefix, context).await?;
        let short = short_id(&id);
        let deleted = self
            .controller
            .delete_task(&id.to_string())
            .await
            .map_err(|e| (e, context))?;

        Ok(if deleted {
            format!("Task {}... deleted successfully.\n", short)
        } else {
            format!("Failed to delete task with ID: {}...\n", short)
        })
    }

    async fn toggle(&self, prefix: &str) -> CommandResult {
        let context = "toggling task completion";
        let id = self.resolve(prefix, context).await?;
        let short = short_id(&id);
        let toggled = self
            .controller
            .toggle_task_completion(&id.to_string())
            .await
            .map_err(|e| (e, context))?;

        Ok(match toggled {
            Some(true) => format!("Task {}... marked as completed.\n", short),
            Some(false) => format!("Task {}... marked as incomplete.\n", short),
            None => format!("Failed to toggle completion for task with ID: {}...\n", short),
        })
    }

    async fn stats(&self, json: bool) -> String {
        let stats = self.controller.statistics().await;
        if !json {
            return render_statistics(&stats);
        }
        match render_statistics_json(&stats) {
            Ok(text) => text,
            Err(err) => {
                error!(%err, "failed to serialize statistics");
                format!("Could not render statistics: {}\n", err)
            }
        }
    }

    async fn resolve(
        &self,
        prefix: &str,
        context: &'static str,
    ) -> std::result::Result<Uuid, (StoreError, &'static str)> {
        self.controller
            .resolve_id(prefix)
            .await
            .map_err(|e| (e, context))
    }

    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await
    }
}

/// Text to print, or the error together with the action that failed.
type CommandResult = std::result::Result<String, (StoreError, &'static str)>;
