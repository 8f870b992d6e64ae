//! CLI command modules

pub mod classify;
pub mod init;
pub mod tune;
pub mod validate;
