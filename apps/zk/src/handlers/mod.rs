pub mod env;
pub mod infra;
pub mod init;
pub mod tokens;
