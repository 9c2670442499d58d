//! Operating points that depend on the active subsystem (mode) of a hybrid system.

use nalgebra::SVector;
use tracing::debug;
use tracing_attributes::instrument;

use crate::logic::machine::find_active_subsystem;
use crate::{LogicContext, OperatingTrajectories, OperatingTrajectory, OperatingTrajectoryError, Real, SystemOperatingPoint};

/// Switching structure of the partition the provider was initialized for
#[derive(Debug, Clone, PartialEq)]
struct PartitionSchedule<F: Real> {
    index: usize,
    switching_times: Vec<F>,
    subsystems: Vec<usize>,
}

/// Provider holding one [SystemOperatingPoint] per subsystem.
///
/// Consumes the logic context: [OperatingTrajectories::initialize] stores the switching structure
/// of the partition, and [OperatingTrajectories::get_trajectories] returns the operating point of
/// the subsystem active at the start of the requested interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeOperatingPoints<F: Real, const S: usize, const I: usize> {
    /// Indexed by subsystem ID
    operating_points: Vec<SystemOperatingPoint<F, S, I>>,
    schedule: Option<PartitionSchedule<F>>,
}

impl<F: Real, const S: usize, const I: usize> ModeOperatingPoints<F, S, I> {
    /// The operating point of subsystem `k` is `operating_points[k]`.
    pub fn new(operating_points: Vec<SystemOperatingPoint<F, S, I>>) -> Self {
        Self {
            operating_points,
            schedule: None,
        }
    }

    pub fn operating_point(&self, subsystem: usize) -> Result<&SystemOperatingPoint<F, S, I>, OperatingTrajectoryError> {
        self.operating_points
            .get(subsystem)
            .ok_or(OperatingTrajectoryError::UnknownSubsystem(subsystem))
    }

    /// Partition of the last successful [OperatingTrajectories::initialize]
    pub fn partition_index(&self) -> Option<usize> {
        self.schedule.as_ref().map(|schedule| schedule.index)
    }
}

impl<F: Real, const S: usize, const I: usize> FromIterator<(SVector<F, S>, SVector<F, I>)>
    for ModeOperatingPoints<F, S, I>
{
    fn from_iter<T: IntoIterator<Item = (SVector<F, S>, SVector<F, I>)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(state, input)| SystemOperatingPoint::new(state, input))
                .collect(),
        )
    }
}

impl<F: Real, const S: usize, const I: usize> OperatingTrajectories<F, S, I> for ModeOperatingPoints<F, S, I> {
    /// Fails if a subsystem of the partition has no operating point. The previous partition
    /// stays active in that case.
    #[instrument(skip(self, logic))]
    fn initialize(
        &mut self,
        logic: &dyn LogicContext<F>,
        partition_index: usize,
        algorithm_name: Option<&str>,
    ) -> Result<(), OperatingTrajectoryError> {
        let switching_times = logic.partition_switching_times(partition_index)?;
        let subsystems = logic.partition_subsystems(partition_index)?;

        if let Some(&unknown) = subsystems.iter().find(|&&id| id >= self.operating_points.len()) {
            return Err(OperatingTrajectoryError::UnknownSubsystem(unknown));
        }

        debug!(?subsystems, "mode operating points initialized");
        self.schedule = Some(PartitionSchedule {
            index: partition_index,
            switching_times: switching_times.to_vec(),
            subsystems: subsystems.to_vec(),
        });
        Ok(())
    }

    fn get_trajectories(
        &self,
        initial_state: &SVector<F, S>,
        start_time: F,
        final_time: F,
        trajectory: &mut OperatingTrajectory<F, S, I>,
        concat_output: bool,
    ) -> Result<(), OperatingTrajectoryError> {
        let schedule = self.schedule.as_ref().ok_or(OperatingTrajectoryError::NotInitialized)?;
        // No switches inside the interval, so the start decides
        let subsystem = find_active_subsystem(&schedule.switching_times, &schedule.subsystems, start_time);
        self.operating_point(subsystem)?
            .get_trajectories(initial_state, start_time, final_time, trajectory, concat_output)
    }

    fn boxed_clone(&self) -> Box<dyn OperatingTrajectories<F, S, I>> {
        Box::new(self.clone())
    }
}
