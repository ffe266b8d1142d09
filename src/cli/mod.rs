pub mod command;
pub mod dump;
pub mod progress;
