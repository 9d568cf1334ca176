//! HTTP API for the fleet dashboard
//!
//! Provides:
//! - Read endpoints over the seeded fleet snapshot
//! - A stub command endpoint that acknowledges without dispatching
//! - CORS for the dashboard development origin

pub mod server;

pub use server::{router, ApiServer, ApiServerConfig, CommandAck};
