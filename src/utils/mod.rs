//! Utility modules shared by the resource pipeline.

pub mod date;
pub mod plural;
pub mod slug;
