//! Bridge between the egui thread and the async prediction client.

pub mod commands;
pub mod runtime;
