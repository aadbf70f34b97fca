use std::process::Command;

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
fn mysql_help_lists_connection_flags_and_stage_options() {
    let output = run_sqlstage(&["mysql", "--help"]);

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--host"));
    assert!(stdout.contains("--port"));
    assert!(stdout.contains("--user"));
    assert!(stdout.contains("--password"));
    assert!(stdout.contains("--socket"));
    assert!(stdout.contains("--sql-dir"));
    assert!(stdout.contains("--verify-table"));
    assert!(stdout.contains("<DATABASE>"));
}

#[test]
fn missing_database_argument_is_a_usage_error() {
    let output = run_sqlstage(&["mysql"]);

    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("<DATABASE>"));
}

#[test]
fn unknown_subcommand_is_rejected() {
    let output = run_sqlstage(&["postgres", "db"]);

    assert_eq!(output.status.code(), Some(2));
}
