use crate::{
    DatabaseAdapter, Error, Result,
    adapter::truncate_sql,
    classify::{Disposition, classify},
};

/// Per-stage execution tally. `skipped` holds the statements whose
/// failures were classified ignorable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StageStats {
    pub executed: usize,
    pub skipped: Vec<SkippedStatement>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedStatement {
    pub statement: String,
    pub error: String,
}

/// Runs an ordered statement sequence on one connection, committing each
/// unit of work on its own. There is no cross-statement transaction:
/// mutations applied before a fatal failure stay committed, and
/// re-running the pipeline (drop + recreate) is the recovery mechanism.
pub struct Executor<'a> {
    adapter: &'a mut dyn DatabaseAdapter,
}

impl<'a> Executor<'a> {
    #[must_use]
    pub fn new(adapter: &'a mut dyn DatabaseAdapter) -> Self {
        Self { adapter }
    }

    pub fn run(&mut self, stage_name: &str, statements: &[String]) -> Result<StageStats> {
        let mut stats = StageStats::default();

        for statement in statements {
            match self.execute_one(statement) {
                Ok(()) => stats.executed += 1,
                Err(source) => match classify(&source.to_string()) {
                    Disposition::Ignorable => {
                        tracing::warn!(
                            stage = stage_name,
                            statement = %truncate_sql(statement),
                            error = %source,
                            "skipping ignorable statement failure",
                        );
                        stats.skipped.push(SkippedStatement {
                            statement: truncate_sql(statement),
                            error: source.to_string(),
                        });
                    }
                    Disposition::Fatal => {
                        return Err(Error::StatementFailed {
                            stage: stage_name.to_string(),
                            statement: truncate_sql(statement),
                            source,
                        });
                    }
                },
            }
        }

        Ok(stats)
    }

    fn execute_one(&mut self, statement: &str) -> std::result::Result<(), crate::AdapterError> {
        self.adapter.execute(statement)?;
        self.adapter.commit()
    }
}
