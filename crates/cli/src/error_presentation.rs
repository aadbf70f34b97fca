use std::path::PathBuf;

use anyhow::Context;
use miette::Report;

const PIPELINE_CONTEXT: &str = "while running provisioning pipeline";

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    MissingScriptDir { path: PathBuf },
    Core(sqlstage_core::Error),
}

impl From<sqlstage_core::Error> for CliError {
    fn from(value: sqlstage_core::Error) -> Self {
        Self::Core(value)
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::MissingScriptDir { path } => {
            format!(
                "[usage] SQL script directory not found: `{}`",
                path.display()
            )
        }
        CliError::Core(source) => {
            let category = core_category(&source);
            let report = report_with_context(source, PIPELINE_CONTEXT);
            format!("[{category}] {report}")
        }
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let context = context.into();
    let anyhow_error = std::result::Result::<(), E>::Err(source)
        .context(context)
        .expect_err("context wrapping must produce an error");
    miette::miette!("{anyhow_error:#}")
}

fn core_category(error: &sqlstage_core::Error) -> &'static str {
    match error {
        sqlstage_core::Error::Connect(_) => "connect",
        sqlstage_core::Error::MissingScript { .. } | sqlstage_core::Error::ReadScript { .. } => {
            "io"
        }
        sqlstage_core::Error::StatementFailed { .. } => "execute",
    }
}
