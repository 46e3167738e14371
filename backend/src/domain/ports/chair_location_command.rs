//! Driving port for chair location reports.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{ChairId, Coordinate, Error};

/// Request to record the current position of a chair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordChairLocationRequest {
    pub chair_id: ChairId,
    pub position: Coordinate,
}

/// Response carrying the stored timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordChairLocationResponse {
    pub recorded_at: DateTime<Utc>,
}

/// Driving port for location ingestion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChairLocationCommand: Send + Sync {
    /// Persist the position and advance the chair's ride when it has
    /// reached its pickup point or destination.
    async fn record_location(
        &self,
        request: RecordChairLocationRequest,
    ) -> Result<RecordChairLocationResponse, Error>;
}
