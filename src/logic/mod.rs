//! Logic rules describe the switching structure of a hybrid system: the times at which
//! events occur and which subsystem (mode) is active in between. The [LogicRulesMachine]
//! distributes these rules over the time partitions of a solver.

pub mod machine;

pub use machine::LogicRulesMachine;

use std::fmt::Debug;

use crate::{trajectory::check_sorted, OperatingTrajectoryError, Real};

/// Switching structure of a hybrid system.
///
/// Implementors guarantee that [LogicRules::event_times] is sorted and that
/// [LogicRules::subsystems_sequence] has exactly one more entry than there are events
/// (the subsystem active before the first event comes first).
pub trait LogicRules<F: Real>: Debug + Clone + Send + Sync {
    fn event_times(&self) -> &[F];
    fn subsystems_sequence(&self) -> &[usize];
}

/// Logic rules of a system without any switching: a single subsystem `0`, no events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullLogicRules;

impl<F: Real> LogicRules<F> for NullLogicRules {
    fn event_times(&self) -> &[F] {
        &[]
    }

    fn subsystems_sequence(&self) -> &[usize] {
        &[0]
    }
}

/// Logic rules given by an explicit event schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct HybridLogicRules<F: Real> {
    event_times: Vec<F>,
    subsystems: Vec<usize>,
}

impl<F: Real> HybridLogicRules<F> {
    /// `subsystems[k]` is active between `event_times[k-1]` and `event_times[k]`.
    pub fn new(event_times: Vec<F>, subsystems: Vec<usize>) -> Result<Self, OperatingTrajectoryError> {
        check_sorted(&event_times)?;
        if subsystems.len() != event_times.len() + 1 {
            return Err(OperatingTrajectoryError::SubsystemCountMismatch {
                events: event_times.len(),
                expected: event_times.len() + 1,
                actual: subsystems.len(),
            });
        }
        Ok(Self {
            event_times,
            subsystems,
        })
    }
}

impl<F: Real> LogicRules<F> for HybridLogicRules<F> {
    fn event_times(&self) -> &[F] {
        &self.event_times
    }

    fn subsystems_sequence(&self) -> &[usize] {
        &self.subsystems
    }
}

/// Read access to the partitioned switching structure, as handed to
/// [crate::OperatingTrajectories::initialize].
///
/// Implemented by [LogicRulesMachine] for every kind of [LogicRules]; providers see the
/// logic through this trait only.
pub trait LogicContext<F: Real>: Debug + Send + Sync {
    fn num_partitions(&self) -> usize;

    /// Bounds of the partition with the internal event times in between.
    fn partition_switching_times(&self, partition_index: usize) -> Result<&[F], OperatingTrajectoryError>;

    /// Subsystems active between consecutive switching times of the partition.
    fn partition_subsystems(&self, partition_index: usize) -> Result<&[usize], OperatingTrajectoryError>;
}

impl<F: Real, L: LogicRules<F>> LogicContext<F> for LogicRulesMachine<F, L> {
    fn num_partitions(&self) -> usize {
        LogicRulesMachine::num_partitions(self)
    }

    fn partition_switching_times(&self, partition_index: usize) -> Result<&[F], OperatingTrajectoryError> {
        LogicRulesMachine::partition_switching_times(self, partition_index)
    }

    fn partition_subsystems(&self, partition_index: usize) -> Result<&[usize], OperatingTrajectoryError> {
        LogicRulesMachine::partition_subsystems(self, partition_index)
    }
}
