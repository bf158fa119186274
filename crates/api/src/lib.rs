//! HTTP surface: router, session middleware, and the policy gate.

pub mod app;
pub mod config;
pub mod context;
pub mod gate;
pub mod middleware;
pub mod telemetry;
