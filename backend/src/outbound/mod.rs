//! Outbound adapters implementing the domain's repository ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: process-local arena store for development and tests.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
