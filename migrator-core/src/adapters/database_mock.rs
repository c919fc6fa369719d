//! In-memory Database that records every call, for unit tests

use std::cell::RefCell;

use crate::domain::{Error, Result};
use crate::ports::{Database, DatabaseTransaction};

/// Records calls as short event strings and fails on demand
#[derive(Default)]
pub struct MockDatabase {
    events: RefCell<Vec<String>>,
    failing_statement: Option<String>,
    failing_execute: Option<String>,
    version: Option<String>,
    fail_begin: bool,
    fail_commit: bool,
    fail_rollback: bool,
}

impl MockDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any transaction statement containing `needle`
    pub fn fail_statement(mut self, needle: &str) -> Self {
        self.failing_statement = Some(needle.to_string());
        self
    }

    /// Answer every query with a single row whose first column is `version`
    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Fail any non-transactional `execute` whose SQL contains `needle`
    pub fn fail_execute(mut self, needle: &str) -> Self {
        self.failing_execute = Some(needle.to_string());
        self
    }

    pub fn fail_begin(mut self) -> Self {
        self.fail_begin = true;
        self
    }

    pub fn fail_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn fail_rollback(mut self) -> Self {
        self.fail_rollback = true;
        self
    }

    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }

    fn push(&self, event: impl Into<String>) {
        self.events.borrow_mut().push(event.into());
    }
}

impl Database for MockDatabase {
    fn execute(&self, sql: &str, params: &[&str]) -> Result<usize> {
        self.push(format!("execute: {} {:?}", sql, params));
        match &self.failing_execute {
            Some(needle) if sql.contains(needle.as_str()) => {
                Err(Error::store(format!("execute failed: {}", sql)))
            }
            _ => Ok(0),
        }
    }

    fn query(
        &self,
        sql: &str,
        params: &[&str],
        columns: usize,
    ) -> Result<Vec<Vec<Option<String>>>> {
        self.push(format!("query: {} {:?}", sql, params));
        Ok(match &self.version {
            Some(version) => {
                let mut row = vec![None; columns];
                if let Some(first) = row.first_mut() {
                    *first = Some(version.clone());
                }
                vec![row]
            }
            None => Vec::new(),
        })
    }

    fn begin(&self) -> Result<Box<dyn DatabaseTransaction + '_>> {
        if self.fail_begin {
            return Err(Error::store("begin refused"));
        }
        self.push("begin");
        Ok(Box::new(MockTransaction { db: self }))
    }
}

struct MockTransaction<'a> {
    db: &'a MockDatabase,
}

impl DatabaseTransaction for MockTransaction<'_> {
    fn execute(&mut self, statement: &str) -> Result<()> {
        self.db.push(format!("tx: {}", statement));
        match &self.db.failing_statement {
            Some(needle) if statement.contains(needle.as_str()) => {
                Err(Error::store(format!("statement failed: {}", statement.trim())))
            }
            _ => Ok(()),
        }
    }

    fn commit(self: Box<Self>) -> Result<()> {
        if self.db.fail_commit {
            return Err(Error::store("commit refused"));
        }
        self.db.push("commit");
        Ok(())
    }

    fn rollback(self: Box<Self>) -> Result<()> {
        if self.db.fail_rollback {
            return Err(Error::store("rollback refused"));
        }
        self.db.push("rollback");
        Ok(())
    }
}
