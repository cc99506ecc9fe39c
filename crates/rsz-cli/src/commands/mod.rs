pub mod class;
pub mod dump;
pub mod error;
pub mod resave;
pub mod schema_source;
pub mod search;

#[cfg(test)]
mod fixtures;
