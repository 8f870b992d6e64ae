//! Configuration management for the JVM tuner

pub mod config;
pub mod paths;
pub mod tuning;

#[cfg(test)]
mod tests;

// Re-export main types for convenience
pub use config::Config;
pub use paths::{OutputConfig, TemplateConfig};
pub use tuning::{DirectiveConfig, GcRulesConfig, HeapConfig};
