//! Outbound adapters implementing domain ports for infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel
//! - **memory**: process-local dispatch store used without a database
//! - **cache**: in-process principal cache
//!
//! Adapters translate between domain types and storage representations and
//! hold the locks that make each port call atomic. Lifecycle rules live in
//! the domain.

pub mod cache;
pub mod memory;
pub mod persistence;
