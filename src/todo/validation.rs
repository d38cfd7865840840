//! Input validation for the task console.
//!
//! Everything here runs before a value reaches the store; the store never
//! looks at record content.

use uuid::Uuid;

use crate::error::{Result, StoreError};

/// Longest accepted task description, in characters, after trimming
pub const MAX_DESCRIPTION_LEN: usize = 1000;

const HYPHENATED_UUID_LEN: usize = 36;

/// Characters that have no business in a console command
const FORBIDDEN_CHARS: [char; 6] = [';', '&', '|', '$', '<', '>'];

/// Checks a task description.
pub fn validate_description(description: &str) -> Result<()> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Err(StoreError::validation(
            "description",
            "Task description cannot be empty",
        ));
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(StoreError::validation(
            "description",
            format!(
                "Task description is too long (max {} characters)",
                MAX_DESCRIPTION_LEN
            ),
        ));
    }
    Ok(())
}

/// Parses a full task id. Only the hyphenated UUID form is accepted.
pub fn validate_task_id(task_id: &str) -> Result<Uuid> {
    if task_id.is_empty() {
        return Err(StoreError::validation(
            "task_id",
            "Task ID must be a non-empty string",
        ));
    }
    if task_id.len() != HYPHENATED_UUID_LEN {
        return Err(StoreError::validation("task_id", "Invalid task ID format"));
    }
    Uuid::parse_str(task_id).map_err(|_| StoreError::validation("task_id", "Invalid task ID format"))
}

/// Rejects commands carrying shell metacharacters, path traversal or `eval(`.
pub fn validate_command(command: &str) -> Result<()> {
    if command.trim().is_empty() {
        return Err(StoreError::validation("command", "Command cannot be empty"));
    }

    let lowered = command.to_ascii_lowercase();
    let dangerous = command.contains(&FORBIDDEN_CHARS[..])
        || command.contains("../")
        || contains_eval_call(&lowered);
    if dangerous {
        return Err(StoreError::validation(
            "command",
            "Command contains potentially dangerous characters",
        ));
    }
    Ok(())
}

/// Trims surrounding whitespace.
pub fn sanitize_input(input: &str) -> &str {
    input.trim()
}

/// Matches `eval` followed by optional whitespace and `(`.
fn contains_eval_call(lowered: &str) -> bool {
    lowered
        .match_indices("eval")
        .any(|(at, word)| lowered[at + word.len()..].trim_start().starts_with('('))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_ok() {
        assert!(validate_description("Buy milk").is_ok());
        assert!(validate_description(&"x".repeat(MAX_DESCRIPTION_LEN)).is_ok());
    }

    #[test]
    fn test_description_empty_or_blank() {
        assert!(matches!(
            validate_description(""),
            Err(StoreError::Validation { ref field, .. }) if field == "description"
        ));
        assert!(validate_description("   \t ").is_err());
    }

    #[test]
    fn test_description_too_long() {
        let err = validate_description(&"x".repeat(MAX_DESCRIPTION_LEN + 1)).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_description_length_counts_chars_not_bytes() {
        assert!(validate_description(&"é".repeat(MAX_DESCRIPTION_LEN)).is_ok());
    }

    #[test]
    fn test_task_id_valid() {
        let id = Uuid::new_v4();
        assert_eq!(validate_task_id(&id.to_string()).unwrap(), id);
        assert!(validate_task_id(&id.to_string().to_uppercase()).is_ok());
    }

    #[test]
    fn test_task_id_invalid() {
        assert!(validate_task_id("").is_err());
        assert!(validate_task_id("not-a-uuid").is_err());
        assert!(validate_task_id("123456789abcdef0123456789abcdef0").is_err());
        assert!(validate_task_id("zzzzzzzz-zzzz-zzzz-zzzz-zzzzzzzzzzzz").is_err());
    }

    #[test]
    fn test_command_ok() {
        assert!(validate_command("add Buy milk").is_ok());
        assert!(validate_command("update 1234 evaluate results").is_ok());
    }

    #[test]
    fn test_command_dangerous() {
        assert!(validate_command("add a; rm -rf /").is_err());
        assert!(validate_command("add $(whoami)").is_err());
        assert!(validate_command("add ../etc/passwd").is_err());
        assert!(validate_command("add EVAL (1)").is_err());
        assert!(validate_command("   ").is_err());
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("  list \n"), "list");
    }
}
