//! Shared constants and formatting

pub mod amount;
pub mod menu;
