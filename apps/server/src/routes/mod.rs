//! API route handlers

pub mod practice;
pub mod progress;
pub mod settings;
pub mod stats;
pub mod vocabulary;
