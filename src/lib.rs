pub mod cli;
pub mod config;
pub mod error;
pub mod exclude;
pub mod normalize;
pub mod paths;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod snapshot;
pub mod store;
