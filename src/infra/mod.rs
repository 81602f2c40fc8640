pub mod authz;
pub mod export;
pub mod import;
pub mod sqlite;
