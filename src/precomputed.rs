//! Seeding from a previously computed trajectory, e.g. the result of an earlier solver run.

use nalgebra::SVector;
use tracing::trace;

use crate::{OperatingTrajectories, OperatingTrajectory, OperatingTrajectoryError, Real};

/// Provider that resamples a stored trajectory.
///
/// The returned trajectory starts at `start_time`, contains every stored sample strictly inside
/// the interval and ends at `final_time`. Values at the bounds are linearly interpolated and held
/// constant outside the stored time range. Neither the logic context nor the initial state are used.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecomputedTrajectories<F: Real, const S: usize, const I: usize> {
    trajectory: OperatingTrajectory<F, S, I>,
}

impl<F: Real, const S: usize, const I: usize> PrecomputedTrajectories<F, S, I> {
    /// Fails on an empty, unsorted, or ragged trajectory.
    pub fn new(trajectory: OperatingTrajectory<F, S, I>) -> Result<Self, OperatingTrajectoryError> {
        trajectory.validate()?;
        if trajectory.is_empty() {
            return Err(OperatingTrajectoryError::EmptyTrajectory);
        }
        Ok(Self { trajectory })
    }

    pub fn trajectory(&self) -> &OperatingTrajectory<F, S, I> {
        &self.trajectory
    }
}

impl<F: Real, const S: usize, const I: usize> OperatingTrajectories<F, S, I> for PrecomputedTrajectories<F, S, I> {
    /// For `start_time >= final_time` only the two boundary samples are written. A NaN time
    /// fails with [OperatingTrajectoryError::NanTime] and leaves `trajectory` untouched.
    fn get_trajectories(
        &self,
        _initial_state: &SVector<F, S>,
        start_time: F,
        final_time: F,
        trajectory: &mut OperatingTrajectory<F, S, I>,
        concat_output: bool,
    ) -> Result<(), OperatingTrajectoryError> {
        let stored = &self.trajectory;
        let (start_state, start_input) = (stored.state_at(start_time)?, stored.input_at(start_time)?);
        let (final_state, final_input) = (stored.state_at(final_time)?, stored.input_at(final_time)?);

        if !concat_output {
            trajectory.clear();
        }
        trajectory.push(start_time, start_state, start_input);

        let before = trajectory.len();
        for (time, state, input) in stored
            .iter()
            .filter(|(time, _, _)| **time > start_time && **time < final_time)
        {
            trajectory.push(*time, state.clone(), input.clone());
        }
        let inner_samples = trajectory.len() - before;

        trajectory.push(final_time, final_state, final_input);
        trace!(?start_time, ?final_time, inner_samples, "resampled precomputed trajectory");
        Ok(())
    }

    fn boxed_clone(&self) -> Box<dyn OperatingTrajectories<F, S, I>> {
        Box::new(self.clone())
    }
}
