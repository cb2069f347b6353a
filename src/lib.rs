pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod state;
pub mod store;
pub mod workflow;
