//! Assembly of operating trajectories over all partitions, as done by a solver during its
//! initialization phase.

use itertools::Itertools;
use nalgebra::SVector;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::debug;
use tracing_attributes::instrument;

use crate::{LogicContext, OperatingTrajectories, OperatingTrajectory, OperatingTrajectoryError, Real};

/// Appends the seed of one partition, one call per interval between its switching times.
///
/// Each interval after the first starts from the last state written so far.
fn append_partition<F, P, const S: usize, const I: usize>(
    provider: &P,
    logic: &dyn LogicContext<F>,
    partition_index: usize,
    initial_state: &SVector<F, S>,
    trajectory: &mut OperatingTrajectory<F, S, I>,
) -> Result<(), OperatingTrajectoryError>
where
    F: Real,
    P: OperatingTrajectories<F, S, I> + ?Sized,
{
    for (&start_time, &final_time) in logic.partition_switching_times(partition_index)?.iter().tuple_windows() {
        let state = trajectory.state.last().unwrap_or(initial_state).clone();
        provider.get_trajectories(&state, start_time, final_time, trajectory, true)?;
    }
    Ok(())
}

/// Full-horizon operating trajectory: the partitions are initialized and queried in order and
/// their segments are concatenated.
#[instrument(skip_all, fields(algorithm = algorithm_name.unwrap_or("undefined")))]
pub fn rollout<F, P, const S: usize, const I: usize>(
    provider: &mut P,
    logic: &dyn LogicContext<F>,
    initial_state: &SVector<F, S>,
    algorithm_name: Option<&str>,
) -> Result<OperatingTrajectory<F, S, I>, OperatingTrajectoryError>
where
    F: Real,
    P: OperatingTrajectories<F, S, I> + ?Sized,
{
    let mut trajectory = OperatingTrajectory::new();
    for partition_index in 0..logic.num_partitions() {
        provider.initialize(logic, partition_index, algorithm_name)?;
        append_partition(provider, logic, partition_index, initial_state, &mut trajectory)?;
    }
    debug!(samples = trajectory.len(), "rolled out operating trajectories");
    Ok(trajectory)
}

/// One operating trajectory per partition, each computed by an independent copy of `provider`.
///
/// All partitions start from `initial_state`. With the `rayon` feature the partitions are
/// processed in parallel.
#[instrument(skip_all, fields(algorithm = algorithm_name.unwrap_or("undefined")))]
pub fn partition_trajectories<F, P, const S: usize, const I: usize>(
    provider: &P,
    logic: &dyn LogicContext<F>,
    initial_state: &SVector<F, S>,
    algorithm_name: Option<&str>,
) -> Result<Vec<OperatingTrajectory<F, S, I>>, OperatingTrajectoryError>
where
    F: Real,
    P: OperatingTrajectories<F, S, I> + ?Sized,
{
    let seed = |partition_index: usize| -> Result<OperatingTrajectory<F, S, I>, OperatingTrajectoryError> {
        let mut worker = provider.boxed_clone();
        worker.initialize(logic, partition_index, algorithm_name)?;
        let mut trajectory = OperatingTrajectory::new();
        append_partition(worker.as_ref(), logic, partition_index, initial_state, &mut trajectory)?;
        Ok(trajectory)
    };

    #[cfg(feature = "rayon")]
    let result = (0..logic.num_partitions()).into_par_iter().map(seed).collect();
    #[cfg(not(feature = "rayon"))]
    let result = (0..logic.num_partitions()).map(seed).collect();

    result
}
