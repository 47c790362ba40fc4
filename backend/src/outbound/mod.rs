//! Outbound adapters implementing domain ports for infrastructure.
//!
//! - **persistence**: PostgreSQL repositories using Diesel ORM.
//! - **memory**: process-local store used when no database URL is set.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules beyond the shared toggle primitive.

pub mod memory;
pub mod persistence;
