use std::path::PathBuf;

use crate::{
    ConnectionConfig, Connector, Error, Result,
    executor::StageStats,
    stage::{Requirement, STAGES, Stage, StageRunner},
    verify::{VerificationReport, VerifyOptions, verify},
};

/// Per-stage outcome as seen by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Applied(StageStats),
    /// Optional stage whose script was not on disk.
    SkippedMissing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub file_name: &'static str,
    pub description: &'static str,
    pub outcome: StageOutcome,
}

/// Aggregate of a full run. Constructed only when every stage completed
/// without a fatal outcome; fatal paths surface as [`Error`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub stages: Vec<StageReport>,
    pub verification: VerificationReport,
}

/// Receives stage-by-stage progress while the pipeline runs. The CLI
/// prints from this; tests use [`NullSink`].
pub trait ProgressSink {
    fn connected(&mut self) {}
    fn database_dropped(&mut self, _database: &str) {}
    fn stage_started(&mut self, _stage: &Stage) {}
    fn stage_finished(&mut self, _stage: &Stage, _stats: &StageStats) {}
    fn stage_missing(&mut self, _stage: &Stage) {}
    fn verified(&mut self, _report: &VerificationReport) {}
}

#[derive(Debug, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {}

/// Drives one idempotent provisioning run: connectivity probe, drop the
/// target database, mandatory stages, present optional stages, then a
/// verification pass. Fail-fast: the first fatal condition aborts the
/// run; already-applied mutations stay committed.
pub struct Provisioner<'a> {
    connector: &'a dyn Connector,
    config: &'a ConnectionConfig,
    script_dir: PathBuf,
    verify_options: VerifyOptions,
}

impl<'a> Provisioner<'a> {
    #[must_use]
    pub fn new(
        connector: &'a dyn Connector,
        config: &'a ConnectionConfig,
        script_dir: impl Into<PathBuf>,
        verify_options: VerifyOptions,
    ) -> Self {
        Self {
            connector,
            config,
            script_dir: script_dir.into(),
            verify_options,
        }
    }

    pub fn run(&self, sink: &mut dyn ProgressSink) -> Result<PipelineReport> {
        self.probe()?;
        sink.connected();

        self.drop_database()?;
        sink.database_dropped(&self.config.database);

        let stages = self.run_stages(sink)?;
        let verification = self.run_verification(sink)?;

        Ok(PipelineReport {
            stages,
            verification,
        })
    }

    /// Connect without selecting a database; proves the server is
    /// reachable before anything destructive happens.
    fn probe(&self) -> Result<()> {
        self.connector.connect(None).map_err(Error::Connect)?;
        Ok(())
    }

    fn drop_database(&self) -> Result<()> {
        let mut adapter = self.connector.connect(None).map_err(Error::Connect)?;
        let sql = format!(
            "DROP DATABASE IF EXISTS `{}`",
            self.config.database.replace('`', "``")
        );
        adapter
            .execute(&sql)
            .and_then(|()| adapter.commit())
            .map_err(|source| Error::StatementFailed {
                stage: "drop database".to_string(),
                statement: sql.clone(),
                source,
            })
    }

    fn run_stages(&self, sink: &mut dyn ProgressSink) -> Result<Vec<StageReport>> {
        let runner = StageRunner::new(self.connector, self.config);
        let mut reports = Vec::with_capacity(STAGES.len());

        for stage in &STAGES {
            if stage.requirement == Requirement::Optional
                && !self.script_dir.join(stage.file_name).exists()
            {
                sink.stage_missing(stage);
                reports.push(StageReport {
                    file_name: stage.file_name,
                    description: stage.description,
                    outcome: StageOutcome::SkippedMissing,
                });
                continue;
            }

            sink.stage_started(stage);
            let stats = runner.run(&self.script_dir, stage)?;
            sink.stage_finished(stage, &stats);
            reports.push(StageReport {
                file_name: stage.file_name,
                description: stage.description,
                outcome: StageOutcome::Applied(stats),
            });
        }

        Ok(reports)
    }

    /// Only a connection failure aborts here; row-count findings are
    /// informational.
    fn run_verification(&self, sink: &mut dyn ProgressSink) -> Result<VerificationReport> {
        let mut adapter = self
            .connector
            .connect(Some(self.config.database.as_str()))
            .map_err(Error::Connect)?;
        let report = verify(adapter.as_mut(), &self.verify_options);
        sink.verified(&report);
        Ok(report)
    }
}
