pub mod auth;
pub mod classify;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod listener;
pub mod logging;
pub mod payload;
pub mod pipeline;
