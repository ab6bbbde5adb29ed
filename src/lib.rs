pub mod config;
pub mod covid;
pub mod error;
pub mod fetch;
pub mod infra;
pub mod output;
pub mod services;
pub mod text;
pub mod turing;
