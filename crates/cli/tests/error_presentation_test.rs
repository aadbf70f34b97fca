use std::process::Command;

use tempfile::tempdir;

fn run_sqlstage(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_sqlstage"))
        .args(args)
        .env_remove("MYSQL_HOST")
        .env_remove("MYSQL_PORT")
        .env_remove("MYSQL_USER")
        .env_remove("MYSQL_PASSWORD")
        .output()
        .unwrap_or_else(|error| panic!("failed to run sqlstage: {error}"))
}

#[test]
fn missing_script_directory_reports_usage_category() {
    let output = run_sqlstage(&[
        "mysql",
        "resort",
        "--sql-dir",
        "/nonexistent/sqlstage-scripts",
    ]);

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("[usage]"),
        "stderr must carry the usage category, got: {stderr}",
    );
    assert!(
        stderr.contains("/nonexistent/sqlstage-scripts"),
        "stderr must name the missing directory, got: {stderr}",
    );
}

#[test]
fn unreachable_server_reports_connect_category_with_pipeline_context() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    std::fs::write(
        tempdir.path().join("01_schema.sql"),
        "CREATE DATABASE resort;\n",
    )
    .unwrap_or_else(|error| panic!("failed to write schema script: {error}"));
    std::fs::write(tempdir.path().join("02_seed.sql"), "SELECT 1;\n")
        .unwrap_or_else(|error| panic!("failed to write seed script: {error}"));
    let sql_dir = tempdir.path().to_string_lossy().into_owned();

    // Port 1 is never a MySQL server; the probe must fail fast.
    let output = run_sqlstage(&[
        "mysql",
        "resort",
        "--host",
        "127.0.0.1",
        "--port",
        "1",
        "--sql-dir",
        sql_dir.as_str(),
    ]);

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("[connect]"),
        "stderr must preserve the connect category, got: {stderr}",
    );
    assert!(
        stderr.contains("while running provisioning pipeline"),
        "stderr must include CLI context, got: {stderr}",
    );
}
