//! ## About
//!
//! This crate provides *operating trajectories*: initial guesses for the state and control
//! input time histories that seed iterative optimal control solvers (e.g., SLQ/iLQR) before
//! they have a better estimate.
//!
//! Solvers are written against the [OperatingTrajectories] trait, which is aware of the
//! switching structure of hybrid systems (see [LogicRulesMachine]). Implementors:
//!
//! * [SystemOperatingPoint] – a constant state/input pair, oblivious to the switching structure
//! * [ModeOperatingPoints] – one operating point per subsystem
//! * [PrecomputedTrajectories] – resampling of a previously computed trajectory
//!
//! The provider is typically chosen at configuration time with [OperatingTrajectoriesSettings].
//! State and input vectors are [nalgebra] vectors with dimensions fixed at compile time.
//!
//! ## Features
//!
//! * `rayon` – computes [rollout::partition_trajectories] in parallel
//! * `ndarray` – exports an [OperatingTrajectory] to [ndarray](https://github.com/rust-ndarray/ndarray) arrays
//!
//! ## Naming conventions
//! * Methods – imperative forms with the exception of getters and factories, which
//!             use substantives (i.e., omit a `get_` prefix) much like the standard library.
//!             [OperatingTrajectories::get_trajectories] keeps the prefix as it writes into an
//!             output argument.

use nalgebra::Scalar;
use num_traits::Float;

pub mod errors;
pub mod logic;
pub mod mode;
pub mod operating;
pub mod operating_point;
pub mod precomputed;
pub mod rollout;
pub mod settings;
pub mod trajectory;

pub use errors::OperatingTrajectoryError;
pub use logic::{HybridLogicRules, LogicContext, LogicRules, LogicRulesMachine, NullLogicRules};
pub use mode::ModeOperatingPoints;
pub use operating::OperatingTrajectories;
pub use operating_point::SystemOperatingPoint;
pub use precomputed::PrecomputedTrajectories;
pub use rollout::{partition_trajectories, rollout};
pub use settings::OperatingTrajectoriesSettings;
pub use trajectory::OperatingTrajectory;

/// Scalar type for time stamps and vector entries (typically `f64`)
pub trait Real: Float + Scalar + Send + Sync {}

impl<T> Real for T where T: Float + Scalar + Send + Sync {}
