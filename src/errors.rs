//! Provides the error type used throughout this crate.

use thiserror::Error;

/// The error type used throughout this crate.
///
/// The constant [crate::SystemOperatingPoint] never produces one; the variants exist for
/// providers that depend on the partition structure or on stored data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperatingTrajectoryError {
    #[error("Partition index {index} is out of bound ({count} partitions)")]
    PartitionOutOfBound { index: usize, count: usize },
    #[error("At least two partition times are required, got {0}")]
    TooFewPartitionTimes(usize),
    #[error("Times are not sorted at index {0}")]
    UnsortedTimes(usize),
    #[error("Expected {expected} subsystems for {events} event times, got {actual}")]
    SubsystemCountMismatch {
        events: usize,
        expected: usize,
        actual: usize,
    },
    #[error("No operating point for subsystem {0}")]
    UnknownSubsystem(usize),
    #[error("Provider has not been initialized for any partition")]
    NotInitialized,
    #[error("Wrong trajectory lengths: {0}")]
    DimensionMismatch(usize),
    #[error("Trajectory is empty")]
    EmptyTrajectory,
    #[error("Time is not a number")]
    NanTime,
}
