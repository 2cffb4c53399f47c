//! CLI command implementations

pub(crate) mod check;
pub(crate) mod common;
pub(crate) mod init;
pub(crate) mod run;
pub(crate) mod stats;
