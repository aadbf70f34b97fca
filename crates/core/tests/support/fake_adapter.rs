use std::{cell::RefCell, collections::BTreeMap, io, rc::Rc};

use sqlstage_core::{AdapterError, Connector, DatabaseAdapter};

/// Substring-triggered failure injected into [`FakeServer`].
#[derive(Debug, Clone)]
struct FailureRule {
    needle: String,
    message: String,
}

#[derive(Debug, Default)]
struct ServerState {
    executed: Vec<ExecutedSql>,
    commit_count: usize,
    connect_count: usize,
    fail_connect: bool,
    /// Refuse connections once `connect_count` reaches this value; lets
    /// a test break connectivity partway through a pipeline run.
    fail_connect_after: Option<usize>,
    fail_on: Vec<FailureRule>,
    /// Maps a substring of a count query to its scalar result; queries
    /// matching nothing fail, standing in for missing tables.
    counts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedSql {
    pub sql: String,
    pub database: Option<String>,
}

/// In-memory stand-in for a MySQL server shared by every connection a
/// test run opens. State lives behind `Rc<RefCell<_>>` so it stays
/// inspectable after adapters have been handed to the pipeline.
#[derive(Debug, Default, Clone)]
pub struct FakeServer {
    state: Rc<RefCell<ServerState>>,
}

#[allow(dead_code)]
impl FakeServer {
    pub fn fail_connect(&self) {
        self.state.borrow_mut().fail_connect = true;
    }

    pub fn fail_connect_after(&self, successful_connects: usize) {
        self.state.borrow_mut().fail_connect_after = Some(successful_connects);
    }

    pub fn fail_on_sql(&self, needle: impl Into<String>, message: impl Into<String>) {
        self.state.borrow_mut().fail_on.push(FailureRule {
            needle: needle.into(),
            message: message.into(),
        });
    }

    pub fn clear_failures(&self) {
        self.state.borrow_mut().fail_on.clear();
    }

    pub fn set_count(&self, query_needle: impl Into<String>, count: u64) {
        self.state
            .borrow_mut()
            .counts
            .insert(query_needle.into(), count);
    }

    pub fn executed(&self) -> Vec<ExecutedSql> {
        self.state.borrow().executed.clone()
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.state
            .borrow()
            .executed
            .iter()
            .map(|entry| entry.sql.clone())
            .collect()
    }

    pub fn commit_count(&self) -> usize {
        self.state.borrow().commit_count
    }

    pub fn connect_count(&self) -> usize {
        self.state.borrow().connect_count
    }
}

impl Connector for FakeServer {
    fn connect(&self, database: Option<&str>) -> Result<Box<dyn DatabaseAdapter>, AdapterError> {
        let mut state = self.state.borrow_mut();
        if state.fail_connect {
            return Err(adapter_error("CONNECT", "connection refused"));
        }
        if let Some(limit) = state.fail_connect_after
            && state.connect_count >= limit
        {
            return Err(adapter_error("CONNECT", "connection refused"));
        }
        state.connect_count += 1;

        Ok(Box::new(FakeAdapter {
            state: Rc::clone(&self.state),
            database: database.map(str::to_string),
        }))
    }
}

struct FakeAdapter {
    state: Rc<RefCell<ServerState>>,
    database: Option<String>,
}

impl DatabaseAdapter for FakeAdapter {
    fn execute(&mut self, sql: &str) -> Result<(), AdapterError> {
        let mut state = self.state.borrow_mut();

        if let Some(rule) = state
            .fail_on
            .iter()
            .find(|rule| sql.contains(rule.needle.as_str()))
        {
            let message = rule.message.clone();
            return Err(adapter_error(sql, message));
        }

        state.executed.push(ExecutedSql {
            sql: sql.to_string(),
            database: self.database.clone(),
        });
        Ok(())
    }

    fn commit(&mut self) -> Result<(), AdapterError> {
        self.state.borrow_mut().commit_count += 1;
        Ok(())
    }

    fn query_count(&mut self, sql: &str) -> Result<u64, AdapterError> {
        let state = self.state.borrow();
        state
            .counts
            .iter()
            .find(|(needle, _)| sql.contains(needle.as_str()))
            .map(|(_, count)| *count)
            .ok_or_else(|| adapter_error(sql, "Table 'missing' doesn't exist"))
    }
}

fn adapter_error(sql: &str, message: impl Into<String>) -> AdapterError {
    AdapterError::new(sql, io::Error::other(message.into()))
}
