pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod session;
