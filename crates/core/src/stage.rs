use std::{fs, path::Path};

use crate::{
    ConnectionConfig, Connector, Error, Result,
    executor::{Executor, StageStats},
    splitter::split,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Must exist on disk and succeed.
    Mandatory,
    /// Applied only if present; absence is a silent skip.
    Optional,
}

/// One script file's worth of statements, executed as a unit within the
/// pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stage {
    pub file_name: &'static str,
    pub description: &'static str,
    pub requirement: Requirement,
}

impl Stage {
    /// Schema-creation scripts run on a server-level connection with no
    /// database selected, so the script can issue its own
    /// `CREATE DATABASE`.
    #[must_use]
    pub fn server_level(&self) -> bool {
        self.file_name.contains("schema")
    }
}

/// Fixed pipeline order. Schema and seed must exist; the rest apply only
/// when present on disk.
pub const STAGES: [Stage; 6] = [
    Stage {
        file_name: "01_schema.sql",
        description: "Schema creation (tables, constraints)",
        requirement: Requirement::Mandatory,
    },
    Stage {
        file_name: "02_seed.sql",
        description: "Sample data insertion",
        requirement: Requirement::Mandatory,
    },
    Stage {
        file_name: "03_views.sql",
        description: "View creation",
        requirement: Requirement::Optional,
    },
    Stage {
        file_name: "04_functions.sql",
        description: "Functions and stored procedures",
        requirement: Requirement::Optional,
    },
    Stage {
        file_name: "05_triggers.sql",
        description: "Trigger creation",
        requirement: Requirement::Optional,
    },
    Stage {
        file_name: "06_indexes.sql",
        description: "Index creation",
        requirement: Requirement::Optional,
    },
];

/// Executes one stage: read the script, open a scoped connection, split,
/// run. The connection lives only for the duration of the stage.
pub struct StageRunner<'a> {
    connector: &'a dyn Connector,
    config: &'a ConnectionConfig,
}

impl<'a> StageRunner<'a> {
    #[must_use]
    pub fn new(connector: &'a dyn Connector, config: &'a ConnectionConfig) -> Self {
        Self { connector, config }
    }

    pub fn run(&self, script_dir: &Path, stage: &Stage) -> Result<StageStats> {
        let path = script_dir.join(stage.file_name);
        if !path.exists() {
            return Err(Error::MissingScript { path });
        }

        let script = fs::read_to_string(&path).map_err(|source| Error::ReadScript {
            path: path.clone(),
            source,
        })?;

        let database = if stage.server_level() {
            None
        } else {
            Some(self.config.database.as_str())
        };
        let mut adapter = self
            .connector
            .connect(database)
            .map_err(Error::Connect)?;

        let statements = split(&script);
        Executor::new(adapter.as_mut()).run(stage.description, &statements)
    }
}
