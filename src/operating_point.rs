//! The constant operating point: the simplest provider of operating trajectories.

use nalgebra::SVector;
use tracing::trace;

use crate::{OperatingTrajectories, OperatingTrajectory, OperatingTrajectoryError, Real};

/// Provider returning one fixed state and one fixed input over any interval.
///
/// It is oblivious to the switching structure: the default (no-op)
/// [OperatingTrajectories::initialize] is used and the initial state passed to
/// [OperatingTrajectories::get_trajectories] is ignored. The operating point cannot be changed
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemOperatingPoint<F: Real, const S: usize, const I: usize> {
    state_operating_point: SVector<F, S>,
    input_operating_point: SVector<F, I>,
}

impl<F: Real, const S: usize, const I: usize> Default for SystemOperatingPoint<F, S, I> {
    /// Zero state and zero input
    fn default() -> Self {
        Self::new(SVector::zeros(), SVector::zeros())
    }
}

impl<F: Real, const S: usize, const I: usize> SystemOperatingPoint<F, S, I> {
    pub fn new(state_operating_point: SVector<F, S>, input_operating_point: SVector<F, I>) -> Self {
        Self {
            state_operating_point,
            input_operating_point,
        }
    }

    pub fn state_operating_point(&self) -> &SVector<F, S> {
        &self.state_operating_point
    }

    pub fn input_operating_point(&self) -> &SVector<F, I> {
        &self.input_operating_point
    }
}

impl<F: Real, const S: usize, const I: usize> OperatingTrajectories<F, S, I> for SystemOperatingPoint<F, S, I> {
    /// Writes exactly two samples, at `start_time` and `final_time` (in that order, no matter
    /// how they compare), both carrying the stored operating point. Never fails.
    fn get_trajectories(
        &self,
        _initial_state: &SVector<F, S>,
        start_time: F,
        final_time: F,
        trajectory: &mut OperatingTrajectory<F, S, I>,
        concat_output: bool,
    ) -> Result<(), OperatingTrajectoryError> {
        if !concat_output {
            trajectory.clear();
        }

        for time in [start_time, final_time] {
            trajectory.push(
                time,
                self.state_operating_point.clone(),
                self.input_operating_point.clone(),
            );
        }
        trace!(?start_time, ?final_time, concat_output, "constant operating point");
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn OperatingTrajectories<F, S, I>> {
        Box::new(self.clone())
    }
}
