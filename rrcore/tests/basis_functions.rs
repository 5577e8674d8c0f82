use rrcore::bfs::am_label;
use rrcore::prelude::*;

#[test]
fn shell_labels_follow_spectroscopic_letters() {
    let labels: Vec<String> = (0..8).map(|am| CartesianShell::new(am).label()).collect();
    assert_eq!(labels, ["s", "p", "d", "f", "g", "h", "i", "k"]);
    assert_eq!(am_label(19), "z");
    assert_eq!(am_label(20), "l20");
}

#[test]
fn function_labels_list_nonzero_axes() {
    assert_eq!(CartesianFunction::new(0, 0, 0).label(), "s");
    assert_eq!(CartesianFunction::new(1, 0, 0).label(), "px");
    assert_eq!(CartesianFunction::new(0, 1, 1).label(), "dyz");
    assert_eq!(CartesianFunction::new(0, 0, 2).label(), "dz2");
    assert_eq!(CartesianFunction::new(2, 1, 0).label(), "fx2y");
}

#[test]
fn function_quantum_numbers() {
    let f = CartesianFunction::new(2, 0, 1);
    assert_eq!(f.quantum_number(Axis::X), 2);
    assert_eq!(f.quantum_number(Axis::Y), 0);
    assert_eq!(f.quantum_number(Axis::Z), 1);
    assert_eq!(f.total_quantum_number(), 3);
}

#[test]
fn decrement_at_zero_is_a_boundary() {
    let f = CartesianFunction::new(0, 1, 0);
    assert_eq!(f.decrement(Axis::X), Err(BoundaryError { axis: Axis::X }));
    assert_eq!(f.decrement(Axis::Y), Ok(CartesianFunction::new(0, 0, 0)));

    let s = CartesianShell::new(0);
    assert_eq!(s.decrement(Axis::Z), Err(BoundaryError { axis: Axis::Z }));
}

#[test]
fn in_place_decrement_leaves_value_untouched_on_failure() {
    let mut f = CartesianFunction::new(1, 0, 0);
    f.dec(Axis::X).expect("px can be lowered along x");
    assert_eq!(f, CartesianFunction::new(0, 0, 0));

    let before = f;
    let err = f.dec(Axis::X).expect_err("s cannot be lowered");
    assert_eq!(err.axis, Axis::X);
    assert_eq!(f, before);

    f.inc(Axis::Z);
    f.inc(Axis::Z);
    assert_eq!(f.label(), "dz2");
}

#[test]
fn shells_ignore_the_axis() {
    let d = CartesianShell::new(2);
    for axis in Axis::ALL {
        assert_eq!(d.quantum_number(axis), 2);
        assert_eq!(d.increment(axis), CartesianShell::new(3));
        assert_eq!(d.decrement(axis), Ok(CartesianShell::new(1)));
    }
}

#[test]
fn derivations_walk_one_axis_for_shells() {
    assert_eq!(CartesianShell::axes(), &[Axis::X]);
    assert_eq!(CartesianFunction::axes(), &[Axis::X, Axis::Y, Axis::Z]);
    assert!(CartesianShell::ELEMENTARY);
    assert!(!CartesianFunction::ELEMENTARY);
}

#[test]
fn cartesian_shell_enumeration_is_canonical() {
    let labels: Vec<String> = CartesianFunction::shell(2).map(|f| f.label()).collect();
    assert_eq!(labels, ["dx2", "dxy", "dxz", "dy2", "dyz", "dz2"]);
    assert_eq!(CartesianFunction::shell(3).count(), CartesianShell::new(3).size());
}

#[test]
fn positions_and_axes() {
    assert_eq!(FunctionPosition::Bra.opposite(), FunctionPosition::Ket);
    assert_eq!(FunctionPosition::from_repr(1), Some(FunctionPosition::Ket));
    assert_eq!(Axis::from_repr(2), Some(Axis::Z));
    assert_eq!(Axis::Y.to_string(), "y");
}
