//! Port for checking that backing storage answers.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Raised when storage does not answer a probe.
    pub enum StorageProbeError {
        /// No round trip to storage succeeded.
        Unreachable { message: String } => "storage is unreachable: {message}",
    }
}

/// Readiness check against the storage backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageProbe: Send + Sync {
    /// Perform one round trip.
    async fn ping(&self) -> Result<(), StorageProbeError>;
}
