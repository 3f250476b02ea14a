//! External service interactions
//!
//! This module contains services for talking to the law query service:
//! - HTTP request/response handling
//! - Background dispatch of submissions

pub mod query_client;
pub mod query_runner;

pub use query_client::{QueryClient, QueryError};
pub use query_runner::{Completion, QueryRunner};
