/*! Interface for generating the operating trajectories that seed an optimal control solver.
 *
 * A solver calls [OperatingTrajectories::initialize] once per time partition and then
 * requests seed trajectories for intervals of that partition with
 * [OperatingTrajectories::get_trajectories]. It is written against the trait and does not
 * know which provider it talks to; the provider is typically selected at configuration time
 * (see [crate::OperatingTrajectoriesSettings]).
 */

use std::fmt::Debug;

use nalgebra::SVector;
use tracing::debug;

use crate::{LogicContext, OperatingTrajectory, OperatingTrajectoryError, Real};

/// Provider of initial state and input trajectories for a system with `S` states and `I` inputs.
///
/// Whether the logic context is consumed depends on the implementor:
/// * [crate::SystemOperatingPoint] ignores it,
/// * [crate::ModeOperatingPoints] reads the active subsystems of the partition,
/// * [crate::PrecomputedTrajectories] ignores it.
pub trait OperatingTrajectories<F: Real, const S: usize, const I: usize>: Debug + Send + Sync {
    /// Prepares the provider for the partition `partition_index` of `logic`.
    ///
    /// Must be called before [OperatingTrajectories::get_trajectories] is used for that
    /// partition. `algorithm_name` is a label of the calling algorithm, used for diagnostics only.
    /// The default does nothing.
    fn initialize(
        &mut self,
        _logic: &dyn LogicContext<F>,
        partition_index: usize,
        algorithm_name: Option<&str>,
    ) -> Result<(), OperatingTrajectoryError> {
        debug!(
            partition_index,
            algorithm = algorithm_name.unwrap_or("undefined"),
            "initialize operating trajectories"
        );
        Ok(())
    }

    /// Writes the operating trajectories for `[start_time, final_time]` into `trajectory`.
    ///
    /// The interval must not contain switches except possibly at `final_time`. With
    /// `concat_output == false` the content of `trajectory` is replaced, otherwise the samples are
    /// appended. At least the two samples at `start_time` and `final_time` are written.
    fn get_trajectories(
        &self,
        initial_state: &SVector<F, S>,
        start_time: F,
        final_time: F,
        trajectory: &mut OperatingTrajectory<F, S, I>,
        concat_output: bool,
    ) -> Result<(), OperatingTrajectoryError>;

    /// Returns an independent copy with identical state.
    fn boxed_clone(&self) -> Box<dyn OperatingTrajectories<F, S, I>>;

    /// Like [OperatingTrajectories::get_trajectories] but returns a fresh trajectory.
    fn trajectories(
        &self,
        initial_state: &SVector<F, S>,
        start_time: F,
        final_time: F,
    ) -> Result<OperatingTrajectory<F, S, I>, OperatingTrajectoryError> {
        let mut trajectory = OperatingTrajectory::with_capacity(2);
        self.get_trajectories(initial_state, start_time, final_time, &mut trajectory, false)?;
        Ok(trajectory)
    }
}

impl<F: Real, const S: usize, const I: usize> Clone for Box<dyn OperatingTrajectories<F, S, I>> {
    fn clone(&self) -> Self {
        self.boxed_clone()
    }
}
