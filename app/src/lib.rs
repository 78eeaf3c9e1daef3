pub mod command;
pub mod core;
pub mod error;
pub mod operation;
pub mod room;
pub mod schedule;
pub mod settings;
pub mod wizard;

#[cfg(test)]
mod tests;

pub use error::ControlError;
