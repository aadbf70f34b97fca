use crate::DatabaseAdapter;

/// What the verifier inspects after the stages have run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Tables whose row counts are reported. A table missing from the
    /// database (its optional stage may not have run) is reported as
    /// unavailable, never as a failure.
    pub tables: Vec<String>,
}

/// Informational summary of what provisioning created. Row-count
/// findings never fail the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    pub tables: Option<u64>,
    pub views: Option<u64>,
    pub procedures: Option<u64>,
    pub functions: Option<u64>,
    pub triggers: Option<u64>,
    /// Row count per configured table, `None` when the count query
    /// failed (rendered as `N/A`).
    pub row_counts: Vec<(String, Option<u64>)>,
}

const TABLES_COUNT_QUERY: &str =
    "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = DATABASE() AND table_type = 'BASE TABLE'";
const VIEWS_COUNT_QUERY: &str =
    "SELECT COUNT(*) FROM information_schema.views WHERE table_schema = DATABASE()";
const PROCEDURES_COUNT_QUERY: &str =
    "SELECT COUNT(*) FROM information_schema.routines WHERE routine_schema = DATABASE() AND routine_type = 'PROCEDURE'";
const FUNCTIONS_COUNT_QUERY: &str =
    "SELECT COUNT(*) FROM information_schema.routines WHERE routine_schema = DATABASE() AND routine_type = 'FUNCTION'";
const TRIGGERS_COUNT_QUERY: &str =
    "SELECT COUNT(*) FROM information_schema.triggers WHERE trigger_schema = DATABASE()";

/// Queries catalog metadata and row counts on an already-open
/// connection. Every query failure degrades its single data point to
/// `None` instead of propagating; connectivity problems surface earlier,
/// when the pipeline opens the verification connection.
#[must_use]
pub fn verify(adapter: &mut dyn DatabaseAdapter, options: &VerifyOptions) -> VerificationReport {
    let mut report = VerificationReport {
        tables: count_or_unavailable(adapter, TABLES_COUNT_QUERY),
        views: count_or_unavailable(adapter, VIEWS_COUNT_QUERY),
        procedures: count_or_unavailable(adapter, PROCEDURES_COUNT_QUERY),
        functions: count_or_unavailable(adapter, FUNCTIONS_COUNT_QUERY),
        triggers: count_or_unavailable(adapter, TRIGGERS_COUNT_QUERY),
        row_counts: Vec::with_capacity(options.tables.len()),
    };

    for table in &options.tables {
        let query = format!("SELECT COUNT(*) FROM {}", quote_identifier(table));
        let count = count_or_unavailable(adapter, &query);
        report.row_counts.push((table.clone(), count));
    }

    report
}

fn count_or_unavailable(adapter: &mut dyn DatabaseAdapter, query: &str) -> Option<u64> {
    match adapter.query_count(query) {
        Ok(count) => Some(count),
        Err(error) => {
            tracing::debug!(query, %error, "verification query degraded to N/A");
            None
        }
    }
}

fn quote_identifier(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}
