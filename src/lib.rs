pub mod aggregator;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod parser;
pub mod stats;
pub mod table;
