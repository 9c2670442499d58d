/*! Container for time/state/input sequences exchanged between providers and solvers */

use itertools::izip;
use nalgebra::SVector;

use crate::{OperatingTrajectoryError, Real};

/// Three parallel sequences of time stamps, state vectors and input vectors.
///
/// Providers write into a caller-owned instance so that the segments of several partitions
/// can be accumulated without copying (see [crate::OperatingTrajectories::get_trajectories]).
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingTrajectory<F: Real, const S: usize, const I: usize> {
    pub time: Vec<F>,
    pub state: Vec<SVector<F, S>>,
    pub input: Vec<SVector<F, I>>,
}

impl<F: Real, const S: usize, const I: usize> Default for OperatingTrajectory<F, S, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Real, const S: usize, const I: usize> OperatingTrajectory<F, S, I> {
    pub fn new() -> Self {
        Self {
            time: vec![],
            state: vec![],
            input: vec![],
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            time: Vec::with_capacity(capacity),
            state: Vec::with_capacity(capacity),
            input: Vec::with_capacity(capacity),
        }
    }

    /// Number of time samples. Call [OperatingTrajectory::validate] to make sure the
    /// state and input sequences agree.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn clear(&mut self) {
        self.time.clear();
        self.state.clear();
        self.input.clear();
    }

    /// Appends a single sample
    pub fn push(&mut self, time: F, state: SVector<F, S>, input: SVector<F, I>) {
        self.time.push(time);
        self.state.push(state);
        self.input.push(input);
    }

    /// Appends all samples of `other` (concatenation of partition segments).
    pub fn extend_from(&mut self, other: &Self) {
        self.time.extend_from_slice(&other.time);
        self.state.extend_from_slice(&other.state);
        self.input.extend_from_slice(&other.input);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&F, &SVector<F, S>, &SVector<F, I>)> {
        izip!(&self.time, &self.state, &self.input)
    }

    /// Checks that the sequences have equal lengths and that time is non-decreasing.
    /// Repeated time stamps are allowed, they occur at partition boundaries.
    pub fn validate(&self) -> Result<(), OperatingTrajectoryError> {
        if self.state.len() != self.time.len() {
            return Err(OperatingTrajectoryError::DimensionMismatch(self.state.len()));
        }
        if self.input.len() != self.time.len() {
            return Err(OperatingTrajectoryError::DimensionMismatch(self.input.len()));
        }
        check_sorted(&self.time)
    }

    /// Linearly interpolated state, holding the first/last value outside the stored range.
    pub fn state_at(&self, time: F) -> Result<SVector<F, S>, OperatingTrajectoryError> {
        interpolate(&self.time, &self.state, time)
    }

    /// Linearly interpolated input, holding the first/last value outside the stored range.
    pub fn input_at(&self, time: F) -> Result<SVector<F, I>, OperatingTrajectoryError> {
        interpolate(&self.time, &self.input, time)
    }

    /// Exports the trajectory as a time vector and two row-major matrices (one sample per row).
    #[cfg(feature = "ndarray")]
    pub fn to_arrays(&self) -> (ndarray::Array1<F>, ndarray::Array2<F>, ndarray::Array2<F>) {
        let time = ndarray::Array1::from(self.time.clone());
        let state = ndarray::Array2::from_shape_fn((self.state.len(), S), |(row, col)| self.state[row][col]);
        let input = ndarray::Array2::from_shape_fn((self.input.len(), I), |(row, col)| self.input[row][col]);
        (time, state, input)
    }
}

/// Returns the index of the first element that is smaller than its predecessor as an error.
/// A NaN next to any other element counts as unsorted.
pub(crate) fn check_sorted<F: Real>(times: &[F]) -> Result<(), OperatingTrajectoryError> {
    match times.windows(2).position(|pair| pair[1] < pair[0] || pair[0].is_nan() || pair[1].is_nan()) {
        Some(index) => Err(OperatingTrajectoryError::UnsortedTimes(index + 1)),
        None => Ok(()),
    }
}

/// Linear interpolation on sorted `times`, clamped to the first and last value. Fails on a NaN `time`.
pub(crate) fn interpolate<F: Real, const N: usize>(
    times: &[F],
    values: &[SVector<F, N>],
    time: F,
) -> Result<SVector<F, N>, OperatingTrajectoryError> {
    if values.len() != times.len() {
        return Err(OperatingTrajectoryError::DimensionMismatch(values.len()));
    }
    let (Some(first), Some(last)) = (times.first(), times.last()) else {
        return Err(OperatingTrajectoryError::EmptyTrajectory);
    };
    if time.is_nan() {
        return Err(OperatingTrajectoryError::NanTime);
    }
    if time <= *first {
        return Ok(values[0].clone());
    }
    if time >= *last {
        return Ok(values[values.len() - 1].clone());
    }

    // first < time < last, hence 1 <= upper < len
    let upper = times.partition_point(|stamp| *stamp <= time);
    let lower = upper - 1;
    let alpha = (time - times[lower]) / (times[upper] - times[lower]);
    Ok(values[lower].zip_map(&values[upper], |a, b| a + (b - a) * alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use itertools::Itertools;
    use nalgebra::{vector, Vector1, Vector2};

    fn ramp() -> OperatingTrajectory<f64, 2, 1> {
        let mut trajectory = OperatingTrajectory::new();
        trajectory.push(0.0, vector![0.0, 0.0], vector![1.0]);
        trajectory.push(1.0, vector![2.0, -2.0], vector![3.0]);
        trajectory.push(3.0, vector![2.0, 2.0], vector![-1.0]);
        trajectory
    }

    #[test]
    fn test_interpolation() {
        let trajectory = ramp();

        assert_abs_diff_eq!(trajectory.state_at(0.5).unwrap(), Vector2::new(1.0, -1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(trajectory.state_at(2.0).unwrap(), Vector2::new(2.0, 0.0), epsilon = 1e-12);
        assert_abs_diff_eq!(trajectory.input_at(2.5).unwrap(), Vector1::new(0.0), epsilon = 1e-12);

        // Exactly on a sample
        assert_eq!(trajectory.state_at(1.0).unwrap(), vector![2.0, -2.0]);

        // Hold first/last value outside the range
        assert_eq!(trajectory.state_at(-4.0).unwrap(), vector![0.0, 0.0]);
        assert_eq!(trajectory.input_at(10.0).unwrap(), vector![-1.0]);
    }

    #[test]
    fn test_interpolation_repeated_stamp() {
        // A partition boundary repeats the time stamp; the later sample wins
        let mut trajectory = OperatingTrajectory::<f64, 1, 1>::new();
        trajectory.push(0.0, vector![0.0], vector![0.0]);
        trajectory.push(1.0, vector![1.0], vector![0.0]);
        trajectory.push(1.0, vector![5.0], vector![0.0]);
        trajectory.push(2.0, vector![7.0], vector![0.0]);

        assert_abs_diff_eq!(trajectory.state_at(0.5).unwrap(), vector![0.5], epsilon = 1e-12);
        assert_abs_diff_eq!(trajectory.state_at(1.5).unwrap(), vector![6.0], epsilon = 1e-12);
    }

    #[test]
    fn test_nan_time() {
        let trajectory = ramp();
        assert_eq!(trajectory.state_at(f64::NAN), Err(OperatingTrajectoryError::NanTime));
        assert_eq!(trajectory.input_at(f64::NAN), Err(OperatingTrajectoryError::NanTime));

        // Also with a single sample, where every time would be clamped
        let mut single = OperatingTrajectory::<f64, 1, 1>::new();
        single.push(0.0, vector![1.0], vector![1.0]);
        assert_eq!(single.state_at(f64::NAN), Err(OperatingTrajectoryError::NanTime));
    }

    #[test]
    fn test_empty() {
        let trajectory = OperatingTrajectory::<f64, 2, 1>::default();
        assert!(trajectory.is_empty());
        assert_eq!(trajectory.state_at(0.0), Err(OperatingTrajectoryError::EmptyTrajectory));
        assert_eq!(trajectory.validate(), Ok(()));
    }

    #[test]
    fn test_validate() {
        let mut trajectory = ramp();
        assert_eq!(trajectory.validate(), Ok(()));

        trajectory.time[2] = 0.5;
        assert_eq!(trajectory.validate(), Err(OperatingTrajectoryError::UnsortedTimes(2)));

        let mut trajectory = ramp();
        trajectory.time[1] = f64::NAN;
        assert_eq!(trajectory.validate(), Err(OperatingTrajectoryError::UnsortedTimes(1)));

        let mut trajectory = ramp();
        trajectory.input.pop();
        assert_eq!(trajectory.validate(), Err(OperatingTrajectoryError::DimensionMismatch(2)));
        assert_eq!(trajectory.input_at(0.0), Err(OperatingTrajectoryError::DimensionMismatch(2)));
    }

    #[test]
    fn test_extend_and_iter() {
        let mut trajectory = ramp();
        trajectory.extend_from(&ramp());
        assert_eq!(trajectory.len(), 6);
        assert_eq!(
            trajectory.iter().map(|(t, _, u)| (*t, u[0])).collect_vec(),
            &[(0.0, 1.0), (1.0, 3.0), (3.0, -1.0), (0.0, 1.0), (1.0, 3.0), (3.0, -1.0)]
        );

        trajectory.clear();
        assert!(trajectory.is_empty());
        assert!(trajectory.state.is_empty() && trajectory.input.is_empty());
    }

    #[cfg(feature = "ndarray")]
    #[test]
    fn test_to_arrays() {
        use ndarray::array;

        let (time, state, input) = ramp().to_arrays();
        assert_eq!(time, array![0.0, 1.0, 3.0]);
        assert_eq!(state, array![[0.0, 0.0], [2.0, -2.0], [2.0, 2.0]]);
        assert_eq!(input, array![[1.0], [3.0], [-1.0]]);
    }
}
