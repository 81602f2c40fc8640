pub mod authz;
pub mod export;
pub mod source;
