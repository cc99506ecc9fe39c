mod args;
mod commands;
mod dispatch;

#[cfg(test)]
mod dispatch_tests;

pub use commands::build_cli;
pub use dispatch::{ClassParams, DumpParams, ResaveParams, SearchParams, log_level};
