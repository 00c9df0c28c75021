pub mod config;
pub mod error;
pub mod logging;

pub mod batch;
pub mod clone;
pub mod fetch;
pub mod markdown;
pub mod naming;
