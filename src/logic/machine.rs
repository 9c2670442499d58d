//! Distribution of logic rules over the time partitions of a solver.

use itertools::Itertools;
use tracing::debug;
use tracing_attributes::instrument;

use super::{LogicRules, NullLogicRules};
use crate::{trajectory::check_sorted, OperatingTrajectoryError, Real};

/// Holds a set of [LogicRules] and splits them along the partition times of a solver.
///
/// For a partition `[t_k, t_{k+1}]` the machine stores the switching times
/// `[t_k, e_i.., t_{k+1}]` where `e_i` are the events strictly inside the partition, and
/// the subsystem active on each of the resulting sub-intervals. An event at `e` is
/// effective from `e` on, i.e. the subsystem active on `[e_j, e_{j+1})` is the one following `e_j`.
#[derive(Debug, Clone)]
pub struct LogicRulesMachine<F: Real, L: LogicRules<F> = NullLogicRules> {
    logic_rules: L,
    partition_times: Vec<F>,
    /// Per partition: its bounds with the internal events in between
    switching_times: Vec<Vec<F>>,
    /// Per partition: one subsystem for each interval between two switching times
    subsystems: Vec<Vec<usize>>,
}

impl<F: Real, L: LogicRules<F> + Default> Default for LogicRulesMachine<F, L> {
    fn default() -> Self {
        Self::new(L::default())
    }
}

impl<F: Real, L: LogicRules<F>> LogicRulesMachine<F, L> {
    /// Creates a machine without partitions. Call [LogicRulesMachine::update_partitions] before use.
    pub fn new(logic_rules: L) -> Self {
        Self {
            logic_rules,
            partition_times: vec![],
            switching_times: vec![],
            subsystems: vec![],
        }
    }

    pub fn logic_rules(&self) -> &L {
        &self.logic_rules
    }

    /// Replaces the logic rules and redistributes them over the current partitions (if any).
    /// On error the machine keeps its previous rules and partitions.
    pub fn set_logic_rules(&mut self, logic_rules: L) -> Result<(), OperatingTrajectoryError> {
        check_rules(&logic_rules)?;
        if !self.partition_times.is_empty() {
            let (switching_times, subsystems) = distribute(&logic_rules, &self.partition_times);
            self.switching_times = switching_times;
            self.subsystems = subsystems;
        }
        self.logic_rules = logic_rules;
        Ok(())
    }

    /// Splits the logic rules along `partition_times` (at least two, sorted).
    #[instrument(skip_all, fields(partitions = partition_times.len().saturating_sub(1)))]
    pub fn update_partitions(&mut self, partition_times: &[F]) -> Result<(), OperatingTrajectoryError> {
        if partition_times.len() < 2 {
            return Err(OperatingTrajectoryError::TooFewPartitionTimes(partition_times.len()));
        }
        check_sorted(partition_times)?;
        check_rules(&self.logic_rules)?;

        let (switching_times, subsystems) = distribute(&self.logic_rules, partition_times);
        self.partition_times = partition_times.to_vec();
        self.switching_times = switching_times;
        self.subsystems = subsystems;
        Ok(())
    }

    pub fn num_partitions(&self) -> usize {
        self.switching_times.len()
    }

    pub fn partition_times(&self) -> &[F] {
        &self.partition_times
    }

    /// Bounds of the partition with the internal event times in between.
    pub fn partition_switching_times(&self, partition_index: usize) -> Result<&[F], OperatingTrajectoryError> {
        self.check_partition(partition_index)?;
        Ok(&self.switching_times[partition_index])
    }

    /// Subsystems active between consecutive [LogicRulesMachine::partition_switching_times].
    pub fn partition_subsystems(&self, partition_index: usize) -> Result<&[usize], OperatingTrajectoryError> {
        self.check_partition(partition_index)?;
        Ok(&self.subsystems[partition_index])
    }

    /// Subsystem active at `time` in the given partition. Times outside the partition are
    /// clamped to its first/last sub-interval.
    pub fn active_subsystem(&self, partition_index: usize, time: F) -> Result<usize, OperatingTrajectoryError> {
        let handle = self.active_subsystem_handle(partition_index)?;
        Ok(handle(time))
    }

    /// Returns a lookup from time to the active subsystem for the given partition.
    pub fn active_subsystem_handle(
        &self,
        partition_index: usize,
    ) -> Result<impl Fn(F) -> usize + '_, OperatingTrajectoryError> {
        let times = self.partition_switching_times(partition_index)?;
        let subsystems = self.partition_subsystems(partition_index)?;
        Ok(move |time: F| find_active_subsystem(times, subsystems, time))
    }

    fn check_partition(&self, partition_index: usize) -> Result<(), OperatingTrajectoryError> {
        if partition_index < self.num_partitions() {
            Ok(())
        } else {
            Err(OperatingTrajectoryError::PartitionOutOfBound {
                index: partition_index,
                count: self.num_partitions(),
            })
        }
    }
}

/// Event times must be sorted and followed by one more subsystem than there are events.
fn check_rules<F: Real, L: LogicRules<F>>(logic_rules: &L) -> Result<(), OperatingTrajectoryError> {
    let events = logic_rules.event_times();
    check_sorted(events)?;
    let sequence = logic_rules.subsystems_sequence();
    if sequence.len() != events.len() + 1 {
        return Err(OperatingTrajectoryError::SubsystemCountMismatch {
            events: events.len(),
            expected: events.len() + 1,
            actual: sequence.len(),
        });
    }
    Ok(())
}

/// Switching times and active subsystems per partition. Expects rules that passed [check_rules].
fn distribute<F: Real, L: LogicRules<F>>(logic_rules: &L, partition_times: &[F]) -> (Vec<Vec<F>>, Vec<Vec<usize>>) {
    let events = logic_rules.event_times();
    let sequence = logic_rules.subsystems_sequence();

    let (switching_times, subsystems): (Vec<_>, Vec<_>) = partition_times
        .iter()
        .tuple_windows()
        .map(|(&start, &end)| {
            let times = std::iter::once(start)
                .chain(events.iter().copied().filter(|&event| event > start && event < end))
                .chain(std::iter::once(end))
                .collect_vec();
            let active = times[..times.len() - 1]
                .iter()
                .map(|&time| sequence[events.partition_point(|&event| event <= time)])
                .collect_vec();
            (times, active)
        })
        .unzip();

    debug!(
        events = events.len(),
        switches = switching_times.iter().map(|times| times.len() - 2).sum::<usize>(),
        "distributed logic rules"
    );
    (switching_times, subsystems)
}

/// Lookup on the switching times of a single partition (`subsystems.len() == times.len() - 1`).
pub(crate) fn find_active_subsystem<F: Real>(times: &[F], subsystems: &[usize], time: F) -> usize {
    let internal = &times[1..times.len() - 1];
    subsystems[internal.partition_point(|&switch| switch <= time)]
}
