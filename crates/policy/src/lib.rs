//! `crewdir-policy` — policy decision point boundary.
//!
//! Canonical resource/action naming plus the client for the remote policy
//! engine. The engine is a black box: `check(user, resource, action,
//! context) -> bool`, with provisioning calls for newly seen users.

pub mod client;
pub mod resource;

pub use client::{HttpPdpClient, PdpConfig, PolicyClient, PolicyError};
pub use resource::{ActionName, ResourceId};
