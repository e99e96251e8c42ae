//! Text analyzer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod processing;
pub mod server;

pub use config::Config;
pub use error::{Result, TextAnalyzerError};
pub use pipeline::Pipeline;
