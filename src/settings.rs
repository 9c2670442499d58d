//! Configuration-time selection of the operating trajectories provider.

use nalgebra::SVector;
use tracing::debug;

use crate::{
    ModeOperatingPoints, OperatingTrajectories, OperatingTrajectory, OperatingTrajectoryError, PrecomputedTrajectories,
    Real, SystemOperatingPoint,
};

/// Describes which provider a solver should be seeded with.
#[derive(Debug, Clone, PartialEq)]
pub enum OperatingTrajectoriesSettings<F: Real, const S: usize, const I: usize> {
    /// A single constant operating point, see [SystemOperatingPoint]
    OperatingPoint {
        state: SVector<F, S>,
        input: SVector<F, I>,
    },
    /// One `(state, input)` pair per subsystem, see [ModeOperatingPoints]
    ModeOperatingPoints { points: Vec<(SVector<F, S>, SVector<F, I>)> },
    /// A stored trajectory, see [PrecomputedTrajectories]
    Precomputed { trajectory: OperatingTrajectory<F, S, I> },
}

impl<F: Real, const S: usize, const I: usize> Default for OperatingTrajectoriesSettings<F, S, I> {
    /// Zero operating point
    fn default() -> Self {
        Self::OperatingPoint {
            state: SVector::zeros(),
            input: SVector::zeros(),
        }
    }
}

impl<F: Real, const S: usize, const I: usize> OperatingTrajectoriesSettings<F, S, I> {
    /// Creates the configured provider.
    pub fn build(self) -> Result<Box<dyn OperatingTrajectories<F, S, I>>, OperatingTrajectoryError> {
        let provider: Box<dyn OperatingTrajectories<F, S, I>> = match self {
            Self::OperatingPoint { state, input } => Box::new(SystemOperatingPoint::new(state, input)),
            Self::ModeOperatingPoints { points } => Box::new(points.into_iter().collect::<ModeOperatingPoints<_, S, I>>()),
            Self::Precomputed { trajectory } => Box::new(PrecomputedTrajectories::new(trajectory)?),
        };
        debug!(?provider, "built operating trajectories provider");
        Ok(provider)
    }
}
