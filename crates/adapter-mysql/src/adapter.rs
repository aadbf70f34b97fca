use std::io;

use mysql::{Opts, OptsBuilder, Pool, PooledConn, prelude::Queryable};
use sqlstage_core::{AdapterError, ConnectionConfig, Connector, DatabaseAdapter};

const CONNECT_SQL: &str = "CONNECT mysql";
const COMMIT_SQL: &str = "COMMIT";
const DEFAULT_MYSQL_HOST: &str = "127.0.0.1";
const DEFAULT_MYSQL_PORT: u16 = 3306;

/// Opens MySQL connections for the pipeline. Each `connect` call yields
/// an independent connection; `database: None` leaves no schema
/// selected, so the caller can drop or create the database itself.
pub struct MysqlConnector {
    config: ConnectionConfig,
}

impl MysqlConnector {
    #[must_use]
    pub fn new(config: ConnectionConfig) -> Self {
        Self { config }
    }
}

impl Connector for MysqlConnector {
    fn connect(&self, database: Option<&str>) -> Result<Box<dyn DatabaseAdapter>, AdapterError> {
        let opts = build_opts(&self.config, database);
        let pool = Pool::new(opts).map_err(|source| AdapterError::new(CONNECT_SQL, source))?;
        let connection = pool
            .get_conn()
            .map_err(|source| AdapterError::new(CONNECT_SQL, source))?;
        Ok(Box::new(MysqlAdapter { connection }))
    }
}

pub(crate) fn build_opts(config: &ConnectionConfig, database: Option<&str>) -> Opts {
    let mut builder = OptsBuilder::new()
        .ip_or_hostname(config.host.clone().or(Some(DEFAULT_MYSQL_HOST.to_string())))
        .tcp_port(config.port.unwrap_or(DEFAULT_MYSQL_PORT))
        .user(config.user.clone())
        .pass(config.password.clone())
        .db_name(database.map(str::to_string));
    if let Some(socket) = &config.socket {
        builder = builder.socket(Some(socket.clone()));
    }
    Opts::from(builder)
}

struct MysqlAdapter {
    connection: PooledConn,
}

impl DatabaseAdapter for MysqlAdapter {
    fn execute(&mut self, sql: &str) -> Result<(), AdapterError> {
        let mut result = self
            .connection
            .query_iter(sql)
            .map_err(|source| AdapterError::new(sql, source))?;

        // A CALL can return several result sets; every one must be read
        // before the next statement or the connection desyncs.
        while let Some(result_set) = result.iter() {
            for row in result_set {
                row.map_err(|source| AdapterError::new(sql, source))?;
            }
        }
        Ok(())
    }

    fn commit(&mut self) -> Result<(), AdapterError> {
        self.connection
            .query_drop(COMMIT_SQL)
            .map_err(|source| AdapterError::new(COMMIT_SQL, source))
    }

    fn query_count(&mut self, sql: &str) -> Result<u64, AdapterError> {
        self.connection
            .query_first::<u64, _>(sql)
            .map_err(|source| AdapterError::new(sql, source))?
            .ok_or_else(|| AdapterError::new(sql, io::Error::other("query returned no rows")))
    }
}
