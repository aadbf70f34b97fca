mod error_presentation;
mod output;

use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use sqlstage_core::{
    ConnectionConfig, PipelineReport, ProgressSink, Provisioner, Stage, StageStats,
    VerificationReport, VerifyOptions,
};
use sqlstage_mysql::MysqlConnector;

use crate::error_presentation::{CliError, CliResult, render_runtime_error};

#[derive(Debug, Parser)]
#[command(
    name = "sqlstage",
    about = "Idempotent database provisioning from staged SQL scripts",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Drop, recreate, seed, and verify a MySQL database.
    Mysql(MysqlArgs),
}

#[derive(Debug, Args)]
struct MysqlArgs {
    /// Server hostname.
    #[arg(long, env = "MYSQL_HOST")]
    host: Option<String>,

    /// Server TCP port.
    #[arg(long, env = "MYSQL_PORT")]
    port: Option<u16>,

    /// User to authenticate as.
    #[arg(long, env = "MYSQL_USER")]
    user: Option<String>,

    /// Password to authenticate with.
    #[arg(long, env = "MYSQL_PASSWORD")]
    password: Option<String>,

    /// Unix socket path, used instead of TCP when given.
    #[arg(long)]
    socket: Option<String>,

    /// Database the pipeline drops and recreates.
    database: String,

    /// Directory holding the staged scripts (01_schema.sql, 02_seed.sql,
    /// and the optional 03..06 stages).
    #[arg(long, value_name = "DIR", default_value = "sql")]
    sql_dir: PathBuf,

    /// Table whose row count the verification pass reports. Repeatable.
    #[arg(long = "verify-table", value_name = "TABLE")]
    verify_tables: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Mysql(args) => run_mysql(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", render_runtime_error(error));
            eprintln!("{}", output::failure("Setup failed!"));
            ExitCode::FAILURE
        }
    }
}

fn run_mysql(args: &MysqlArgs) -> CliResult<()> {
    if !args.sql_dir.is_dir() {
        return Err(CliError::MissingScriptDir {
            path: args.sql_dir.clone(),
        });
    }

    let config = ConnectionConfig {
        host: args.host.clone(),
        port: args.port,
        user: args.user.clone(),
        password: args.password.clone(),
        database: args.database.clone(),
        socket: args.socket.clone(),
    };

    println!("{}", output::header("sqlstage - Database Setup"));
    println!(
        "{}",
        output::info(&format!(
            "Database: {} @ {}:{}",
            config.database,
            config.host.as_deref().unwrap_or("localhost"),
            config.port.unwrap_or(3306),
        ))
    );
    println!(
        "{}",
        output::info(&format!("SQL directory: {}", args.sql_dir.display()))
    );

    let connector = MysqlConnector::new(config.clone());
    let verify_options = VerifyOptions {
        tables: args.verify_tables.clone(),
    };
    let provisioner = Provisioner::new(&connector, &config, &args.sql_dir, verify_options);

    let report = provisioner.run(&mut ConsoleSink::default())?;
    print_verdict(&report);
    Ok(())
}

fn print_verdict(report: &PipelineReport) {
    let applied = report
        .stages
        .iter()
        .filter(|stage| matches!(stage.outcome, sqlstage_core::StageOutcome::Applied(_)))
        .count();
    println!("\n{}", output::header("Setup Complete!"));
    println!(
        "{}",
        output::success(&format!("{applied} stage(s) applied; database is ready"))
    );
}

#[derive(Debug, Default)]
struct ConsoleSink {
    step: usize,
}

impl ProgressSink for ConsoleSink {
    fn connected(&mut self) {
        println!("{}", output::success("MySQL connection successful"));
    }

    fn database_dropped(&mut self, database: &str) {
        println!(
            "{}",
            output::success(&format!(
                "Database `{database}` dropped (if it existed) - starting fresh"
            ))
        );
    }

    fn stage_started(&mut self, stage: &Stage) {
        self.step += 1;
        println!(
            "\n{}",
            output::header(&format!("Step {}: {}", self.step, stage.description))
        );
    }

    fn stage_finished(&mut self, stage: &Stage, stats: &StageStats) {
        if !stats.skipped.is_empty() {
            println!(
                "{}",
                output::info(&format!(
                    "{} statement(s) skipped as already applied",
                    stats.skipped.len()
                ))
            );
        }
        println!(
            "{}",
            output::success(&format!("{} completed", stage.description))
        );
    }

    fn stage_missing(&mut self, stage: &Stage) {
        println!(
            "{}",
            output::info(&format!("Skipping {}: file not present", stage.file_name))
        );
    }

    fn verified(&mut self, report: &VerificationReport) {
        println!("\n{}", output::header("Verification"));
        println!("{}", output::render_verification(report));
    }
}
