/// Connection parameters for the target server. Passed explicitly into
/// every component that needs connectivity; there is no process-wide
/// configuration singleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub password: Option<String>,
    /// Name of the database the pipeline drops and recreates.
    pub database: String,
    pub socket: Option<String>,
}

impl ConnectionConfig {
    #[must_use]
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            host: None,
            port: None,
            user: None,
            password: None,
            database: database.into(),
            socket: None,
        }
    }
}
