use super::*;
use crate::extrema;
use crate::series::Sweep;
use proptest::prelude::*;

/// One small cycle: forward sweep 0..5, reverse sweep 5..10
fn cycle() -> Sweep {
    Sweep::from_parts(
        vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.4, 0.3, 0.2, 0.1, 0.0],
        vec![-2.0, -4.0, -3.0, -1.0, -0.5, 0.5, 1.0, 3.0, 4.0, 2.0],
        (0..10).map(|i| i as f64 * 0.01).collect(),
    )
    .unwrap()
}

fn anchors() -> Anchors {
    Anchors([0, 5, 5, 10])
}

#[test]
fn test_voltage_mode_bounds() {
    let mode = SelectionMode::Voltage {
        v_up: 0.02,
        v_down: 0.02,
    };
    let bounds = select(&cycle(), &anchors(), &mode).unwrap();

    assert_eq!(
        bounds,
        BoundarySet {
            up_start: 0,
            up_end: 1,
            down_start: 8,
            down_end: 9,
        }
    );
}

#[test]
fn test_voltage_tie_resolves_to_first_sample() {
    let sweep = Sweep::from_parts(
        vec![0.25, 0.75, 0.5, 0.25, 0.75],
        vec![0.0, -1.0, -2.0, 2.0, 1.0],
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
    )
    .unwrap();
    let mode = SelectionMode::Voltage {
        v_up: 0.5,
        v_down: 0.5,
    };
    let bounds = select(&sweep, &Anchors([0, 3, 3, 5]), &mode).unwrap();

    // In the lower window 0.25 and 0.75 are equally far from 0.5
    assert_eq!(bounds.up_start, 2);
    assert_eq!(bounds.up_end, 2);
    assert_eq!(bounds.down_start, 3);
    assert_eq!(bounds.down_end, 3);
}

#[test]
fn test_edge_mode_matches_extremum_locator() {
    let sweep = cycle();
    let bounds = select(&sweep, &anchors(), &SelectionMode::Edge).unwrap();
    let found = extrema::locate(sweep.current_density());

    assert_eq!(found.minima.len(), 1);
    assert_eq!(found.maxima.len(), 1);
    assert_eq!(bounds.up_start, found.minima[0]);
    assert_eq!(bounds.down_end, found.maxima[0]);
}

#[test]
fn test_inner_bounds_ignore_mode() {
    let sweep = cycle();
    let by_voltage = select(
        &sweep,
        &anchors(),
        &SelectionMode::Voltage {
            v_up: 0.0,
            v_down: 0.0,
        },
    )
    .unwrap();
    let by_edge = select(&sweep, &anchors(), &SelectionMode::Edge).unwrap();

    assert_eq!(by_voltage.up_end, by_edge.up_end);
    assert_eq!(by_voltage.down_start, by_edge.down_start);
}

#[test]
fn test_inverted_upper_branch_is_rejected() {
    let mode = SelectionMode::Voltage {
        v_up: 0.32,
        v_down: 0.02,
    };
    let err = select(&cycle(), &anchors(), &mode).unwrap_err();
    assert!(matches!(
        err,
        BoundsError::InvertedBounds {
            branch: "upper",
            start: 3,
            end: 1
        }
    ));
}

#[test]
fn test_empty_subrange() {
    let err = select(&cycle(), &Anchors([3, 3, 5, 10]), &SelectionMode::Edge).unwrap_err();
    assert!(matches!(err, BoundsError::EmptySubrange { start: 3, end: 3 }));

    let err = select(&cycle(), &Anchors([0, 5, 9, 6]), &SelectionMode::Edge).unwrap_err();
    assert!(matches!(err, BoundsError::EmptySubrange { start: 9, end: 6 }));
}

#[test]
fn test_anchor_past_end() {
    let err = select(&cycle(), &Anchors([0, 5, 5, 11]), &SelectionMode::Edge).unwrap_err();
    assert!(matches!(err, BoundsError::OutOfRange { index: 11, len: 10 }));
}

#[test]
fn test_edge_mode_without_extrema() {
    let sweep = Sweep::from_parts(
        vec![0.0, 0.1, 0.2, 0.3],
        vec![1.0, 2.0, 3.0, 4.0],
        vec![0.0, 1.0, 2.0, 3.0],
    )
    .unwrap();
    let err = select(&sweep, &Anchors([0, 2, 2, 4]), &SelectionMode::Edge).unwrap_err();
    assert!(matches!(err, BoundsError::MissingExtremum("minimum")));
}

#[test]
fn test_snap_to_nearest_sample() {
    let sweep = cycle();
    let points = [
        Point::new(0.01, -2.1),
        Point::new(0.39, -0.4),
        Point::new(0.41, 0.6),
        Point::new(-0.1, 2.2),
        Point::new(5.0, 5.0),
    ];
    let anchors = Anchors::from_points(&sweep, &points).unwrap();
    assert_eq!(anchors, Anchors([0, 4, 5, 9]));
}

#[test]
fn test_snap_ties_resolve_to_first_index() {
    let potential = [0.0, 1.0, 0.0];
    let current = [1.0, 0.0, 1.0];
    assert_eq!(snap(&potential, &current, Point::new(0.0, 1.0)), Some(0));
    assert_eq!(snap(&[], &[], Point::new(0.0, 0.0)), None);
}

#[test]
fn test_insufficient_points() {
    let points = [Point::new(0.0, 0.0); 3];
    let err = Anchors::from_points(&cycle(), &points).unwrap_err();
    assert!(matches!(
        err,
        BoundsError::InsufficientPoints {
            required: 4,
            supplied: 3
        }
    ));
}

#[test]
fn test_empty_sweep_rejected() {
    let empty = Sweep::from_parts(Vec::new(), Vec::new(), Vec::new()).unwrap();
    let points = [Point::new(0.0, 0.0); 4];
    let err = Anchors::from_points(&empty, &points).unwrap_err();
    assert!(matches!(err, BoundsError::EmptySweep));
    assert_eq!(err.to_string(), "Sweep has no samples to place bounds on");
}

#[test]
fn test_mode_parsing() {
    assert_eq!(
        SelectionMode::from_parts("Voltage", Some(0.4), Some(0.45)).unwrap(),
        SelectionMode::Voltage {
            v_up: 0.4,
            v_down: 0.45
        }
    );
    assert_eq!(
        SelectionMode::from_parts("e", None, None).unwrap(),
        SelectionMode::Edge
    );
    assert!(matches!(
        SelectionMode::from_parts("peak", None, None),
        Err(BoundsError::InvalidMode(ref m)) if m == "peak"
    ));
    assert!(matches!(
        SelectionMode::from_parts("voltage", Some(0.4), None),
        Err(BoundsError::MissingVoltage("v_down"))
    ));
}

#[test]
fn test_boundary_set_validation() {
    assert!(BoundarySet::new(0, 2, 3, 5, 6).is_ok());
    assert!(matches!(
        BoundarySet::new(0, 2, 3, 6, 6),
        Err(BoundsError::OutOfRange { index: 6, len: 6 })
    ));
    assert!(matches!(
        BoundarySet::new(0, 2, 5, 3, 6),
        Err(BoundsError::InvertedBounds { branch: "lower", .. })
    ));
}

proptest! {
    #[test]
    fn test_snapping_existing_sample_is_idempotent(
        current in prop::collection::vec(-50.0f64..50.0, 1..300),
        pick in any::<prop::sample::Index>(),
    ) {
        let potential: Vec<f64> = (0..current.len()).map(|i| i as f64 * 0.005).collect();
        let k = pick.index(current.len());
        let target = Point::new(potential[k], current[k]);

        prop_assert_eq!(snap(&potential, &current, target), Some(k));
    }
}
