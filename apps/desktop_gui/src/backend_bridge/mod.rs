//! Backend bridge: command queue consumer running on its own tokio runtime.

pub mod commands;
pub mod runtime;
