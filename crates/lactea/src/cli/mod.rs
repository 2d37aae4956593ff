//! CLI module for Lactea
//!
//! Each command reads its inputs, hands typed data to the engine and renders
//! what comes back.

pub mod error;
pub mod input;
pub mod output;
pub mod settings;

pub mod chart;
pub mod describe;
pub mod validate;
