//! Script executor - applies one script atomically
//!
//! The splitter only looks for `;`. It knows nothing about string literals or
//! comments, so a script must not contain a `;` inside a literal.

use crate::domain::ExecutionError;
use crate::ports::Database;

/// Character that ends a statement
pub const STATEMENT_TERMINATOR: char = ';';

/// Split script text into statements.
///
/// Each statement keeps its terminator. Fragments that are empty or only
/// whitespace are dropped. Text after the last terminator runs as a final
/// statement unless it holds nothing but blank lines and `--` comments.
pub fn split_statements(script: &str) -> Vec<&str> {
    let (body, tail) = match script.rfind(STATEMENT_TERMINATOR) {
        Some(end) => script.split_at(end + 1),
        None => ("", script),
    };

    let mut statements: Vec<&str> = body
        .split_inclusive(STATEMENT_TERMINATOR)
        .filter(|fragment| {
            !fragment
                .strip_suffix(STATEMENT_TERMINATOR)
                .unwrap_or(fragment)
                .trim()
                .is_empty()
        })
        .collect();

    if tail
        .lines()
        .any(|line| !line.trim().is_empty() && !line.trim_start().starts_with("--"))
    {
        log::debug!("Running unterminated final statement: {:?}", tail.trim());
        statements.push(tail);
    }

    statements
}

/// Runs every statement of a script inside a single transaction
pub struct ScriptExecutor<'a> {
    db: &'a dyn Database,
}

impl<'a> ScriptExecutor<'a> {
    pub fn new(db: &'a dyn Database) -> Self {
        Self { db }
    }

    /// Apply `script`: all statements land or none do.
    ///
    /// Returns the number of statements executed. Statement indexes in errors
    /// are 1-based.
    pub fn apply(&self, script: &str) -> Result<usize, ExecutionError> {
        let statements = split_statements(script);
        let mut tx = self
            .db
            .begin()
            .map_err(|e| ExecutionError::Begin(e.to_string()))?;

        for (i, statement) in statements.iter().enumerate() {
            if let Err(e) = tx.execute(statement) {
                let index = i + 1;
                let message = e.to_string();
                return Err(match tx.rollback() {
                    Ok(()) => ExecutionError::Statement { index, message },
                    Err(rollback) => ExecutionError::Rollback {
                        index,
                        message,
                        rollback: rollback.to_string(),
                    },
                });
            }
        }

        tx.commit()
            .map_err(|e| ExecutionError::Commit(e.to_string()))?;

        Ok(statements.len())
    }
}
