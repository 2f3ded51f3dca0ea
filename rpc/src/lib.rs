//! HTTP API for the chamber.
//!
//! Provides endpoints for:
//! - Agenda management (secretariat)
//! - Opening and closing votes (manager)
//! - Casting ballots and the member panel
//! - Live tallies polled by the public screen
//!
//! Authentication happens upstream: the fronting proxy passes the resolved
//! identity in `x-voter-id` and the role in `x-role`, and both are trusted.

pub mod error;
pub mod handlers;
pub mod identity;
pub mod server;

pub use error::RpcError;
pub use server::{router, RpcServer};
