//! Chair dispatch service library.
//!
//! Ride lifecycle rules, chair location ingestion, notification delivery and
//! principal authentication, wired through ports to HTTP and storage
//! adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
