mod adapter;

pub use adapter::MysqlConnector;
