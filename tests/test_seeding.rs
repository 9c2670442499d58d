use nalgebra::{vector, SVector};
use operating_trajectories::{
    partition_trajectories, rollout, HybridLogicRules, LogicRulesMachine, NullLogicRules, OperatingTrajectories,
    OperatingTrajectoriesSettings, OperatingTrajectory, SystemOperatingPoint,
};

/// The solver side only knows the trait object
fn seed(
    provider: &dyn OperatingTrajectories<f64, 2, 1>,
    initial_state: &SVector<f64, 2>,
    start: f64,
    end: f64,
) -> OperatingTrajectory<f64, 2, 1> {
    let mut trajectory = OperatingTrajectory::new();
    provider
        .get_trajectories(initial_state, start, end, &mut trajectory, false)
        .unwrap();
    trajectory
}

#[test_log::test]
fn test_operating_point_example() {
    let provider = OperatingTrajectoriesSettings::OperatingPoint {
        state: vector![1.0, 2.0],
        input: vector![5.0],
    }
    .build()
    .unwrap();

    let trajectory = seed(provider.as_ref(), &vector![99.0, 99.0], 0.0, 3.5);

    assert_eq!(trajectory.time, &[0.0, 3.5]);
    assert_eq!(trajectory.state, &[vector![1.0, 2.0], vector![1.0, 2.0]]);
    assert_eq!(trajectory.input, &[vector![5.0], vector![5.0]]);
}

#[test_log::test]
fn test_clone_through_trait_object() {
    let original: Box<dyn OperatingTrajectories<f64, 2, 1>> =
        Box::new(SystemOperatingPoint::new(vector![0.5, -0.5], vector![2.0]));
    let copies = vec![original.clone(); 3];

    for (start, end) in [(0.0, 1.0), (1.0, 1.0), (4.0, 2.0)] {
        let expected = seed(original.as_ref(), &vector![0.0, 0.0], start, end);
        for copy in &copies {
            assert_eq!(seed(copy.as_ref(), &vector![3.0, 3.0], start, end), expected);
        }
    }
}

#[test_log::test]
fn test_full_horizon() {
    let mut machine = LogicRulesMachine::<f64, NullLogicRules>::default();
    machine.update_partitions(&[0.0, 1.0, 2.0]).unwrap();

    let mut provider = SystemOperatingPoint::new(vector![1.0, 2.0], vector![5.0]);
    let trajectory = rollout(&mut provider, &machine, &vector![0.0, 0.0], Some("slq")).unwrap();

    assert_eq!(trajectory.time, &[0.0, 1.0, 1.0, 2.0]);
    assert_eq!(trajectory.state, vec![vector![1.0, 2.0]; 4]);
    assert_eq!(trajectory.input, vec![vector![5.0]; 4]);

    let (time, state, input) = trajectory.to_arrays();
    assert_eq!(time.len(), 4);
    assert_eq!(state.shape(), &[4, 2]);
    assert_eq!(input.shape(), &[4, 1]);
    assert_eq!(state[[3, 1]], 2.0);
}

#[test_log::test]
fn test_partitions_match_rollout() {
    let mut machine = LogicRulesMachine::new(HybridLogicRules::new(vec![0.3, 1.2, 2.7], vec![0, 1, 0, 1]).unwrap());
    machine.update_partitions(&[0.0, 1.0, 2.0, 3.0]).unwrap();

    let provider = OperatingTrajectoriesSettings::ModeOperatingPoints {
        points: vec![(vector![0.0, 0.0], vector![0.0]), (vector![1.0, 1.0], vector![1.0])],
    }
    .build()
    .unwrap();

    let partitions = partition_trajectories(provider.as_ref(), &machine, &vector![0.0, 0.0], None).unwrap();
    let mut concatenated = OperatingTrajectory::new();
    partitions.iter().for_each(|partition| concatenated.extend_from(partition));

    let mut sequential = provider.clone();
    let full = rollout(sequential.as_mut(), &machine, &vector![0.0, 0.0], None).unwrap();

    assert_eq!(concatenated, full);
    assert_eq!(full.time, &[0.0, 0.3, 0.3, 1.0, 1.0, 1.2, 1.2, 2.0, 2.0, 2.7, 2.7, 3.0]);
    assert_eq!(
        full.input.iter().map(|u| u[0]).collect::<Vec<_>>(),
        &[0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0]
    );
}
