use std::panic;
use std::sync::Arc;

use rrcore::prelude::*;
use rrexpr::prelude::{Bindings, Parameter, PrettyExpr};

fn f(nx: u32, ny: u32, nz: u32) -> CartesianFunction {
    CartesianFunction::new(nx, ny, nz)
}

fn function_relation(
    ctx: &DerivationContext,
    functions: [CartesianFunction; 4],
    particle: u32,
) -> Arc<KineticG12Relation<CartesianFunction>> {
    let [a, b, c, d] = functions;
    let target = ctx
        .integral(IntegralKind::KineticG12, a, b, c, d, particle)
        .expect("valid target");
    KineticG12Relation::instance(ctx, target).expect("derivable target")
}

fn shell_relation(
    ctx: &DerivationContext,
    ams: [u32; 4],
    particle: u32,
) -> Arc<KineticG12Relation<CartesianShell>> {
    let [a, b, c, d] = ams.map(CartesianShell::new);
    let target = ctx
        .integral(IntegralKind::KineticG12, a, b, c, d, particle)
        .expect("valid target");
    KineticG12Relation::instance(ctx, target).expect("derivable target")
}

fn child_labels<F: BasisFunctionSet>(rr: &KineticG12Relation<F>) -> Vec<String> {
    rr.typed_children()
        .iter()
        .map(|c| c.label().to_string())
        .collect()
}

fn wide(rr: &dyn RecurrenceRelation) -> String {
    rr.rr_expr().pretty_string_with(10_000, &|i| format!("#{i}"))
}

#[test]
fn elementary_all_s_target() {
    let ctx = DerivationContext::new();
    let rr = shell_relation(&ctx, [0, 0, 0, 0], 0);

    assert_eq!(rr.label(), "RR ( s s | [T_0, G12] | s s )");
    assert_eq!(
        child_labels(&rr),
        [
            "( d s | G12 | s s )",
            "( s d | G12 | s s )",
            "( s s | G12 | s s )",
        ]
    );
    assert_eq!(rr.nflops(), 13);
    assert!(rr.is_simple());
    assert!(rr.invariant_type());
    assert_eq!(
        wide(rr.as_ref()),
        "-0.5 * (4.0 * zeta2[0][0] * #0 - 4.0 * zeta2[0][1] * #1 - (6.0 * zeta[0][0] - 6.0 * zeta[0][1]) * #2)"
    );
}

#[test]
fn elementary_relations_are_never_registered() {
    let ctx = DerivationContext::new();
    let first = shell_relation(&ctx, [1, 0, 0, 0], 0);
    let second = shell_relation(&ctx, [1, 0, 0, 0], 0);

    assert!(ctx.relations().is_empty());
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.label(), second.label());
    // Children are interned even though the relations are not.
    assert!(Arc::ptr_eq(first.child(0), second.child(0)));
}

#[test]
fn elementary_lowering_uses_the_shell_momentum() {
    let ctx = DerivationContext::new();
    let rr = shell_relation(&ctx, [2, 0, 0, 0], 0);

    assert_eq!(
        child_labels(&rr),
        [
            "( s s | G12 | s s )",
            "( g s | G12 | s s )",
            "( d d | G12 | s s )",
            "( d s | G12 | s s )",
        ]
    );
    assert_eq!(rr.nflops(), 15);
    assert!(wide(rr.as_ref()).starts_with("-0.5 * (2.0 * #0 + 4.0 * zeta2[0][0] * #1 - "));
}

#[test]
fn composite_all_s_target() {
    let ctx = DerivationContext::new();
    let s = f(0, 0, 0);
    let rr = function_relation(&ctx, [s; 4], 0);

    assert_eq!(
        child_labels(&rr),
        [
            "( dx2 s | G12 | s s )",
            "( dy2 s | G12 | s s )",
            "( dz2 s | G12 | s s )",
            "( s dx2 | G12 | s s )",
            "( s dy2 | G12 | s s )",
            "( s dz2 | G12 | s s )",
            "( s s | G12 | s s )",
        ]
    );
    assert_eq!(rr.nflops(), 29);
    assert!(!rr.is_simple());
    assert_eq!(ctx.relations().len(), 1);
    assert!(ctx.relations().contains("RR ( s s | [T_0, G12] | s s )"));
}

#[test]
fn single_lowering_never_yields_a_shifted_down_child() {
    let ctx = DerivationContext::new();
    let (s, px) = (f(0, 0, 0), f(1, 0, 0));
    let rr = function_relation(&ctx, [px, s, s, s], 0);

    assert_eq!(
        child_labels(&rr),
        [
            "( fx3 s | G12 | s s )",
            "( fxy2 s | G12 | s s )",
            "( fxz2 s | G12 | s s )",
            "( px dx2 | G12 | s s )",
            "( px dy2 | G12 | s s )",
            "( px dz2 | G12 | s s )",
            "( px s | G12 | s s )",
        ]
    );
    assert_eq!(rr.nflops(), 29);
    assert!(wide(rr.as_ref()).ends_with("(10.0 * zeta[0][0] - 6.0 * zeta[0][1]) * #6)"));
}

#[test]
fn double_lowering_comes_before_raising() {
    let ctx = DerivationContext::new();
    let s = f(0, 0, 0);
    let rr = function_relation(&ctx, [f(2, 0, 0), s, s, s], 0);

    let labels = child_labels(&rr);
    assert_eq!(labels.len(), 8);
    assert_eq!(labels[0], "( s s | G12 | s s )");
    assert_eq!(labels[1], "( gx4 s | G12 | s s )");
    assert_eq!(labels[2], "( gx2y2 s | G12 | s s )");
    assert_eq!(labels[7], "( dx2 s | G12 | s s )");
    assert_eq!(rr.nflops(), 31);
    assert!(wide(rr.as_ref()).starts_with("-0.5 * (2.0 * #0 + 4.0 * zeta2[0][0] * #1"));
}

#[test]
fn operator_on_second_particle_shifts_only_its_functions() {
    let ctx = DerivationContext::new();
    let (s, px) = (f(0, 0, 0), f(1, 0, 0));
    let rr = function_relation(&ctx, [s, s, px, s], 1);

    assert_eq!(rr.label(), "RR ( s s | [T_1, G12] | px s )");
    assert_eq!(rr.particle(), 1);
    for child in rr.typed_children() {
        assert_eq!(child.bra(0), &s);
        assert_eq!(child.ket(0), &s);
        assert_eq!(child.kind(), IntegralKind::G12);
        assert_eq!(child.aux(), 0);
    }
    assert_eq!(rr.child(0).label(), "( s s | G12 | fx3 s )");
    assert_eq!(rr.child(6).label(), "( s s | G12 | px s )");

    let expr = wide(rr.as_ref());
    assert!(expr.contains("zeta2[1][0]"));
    assert!(expr.contains("(10.0 * zeta[1][0] - 6.0 * zeta[1][1]) * #6"));
    assert!(!expr.contains("zeta[0]"));
}

#[test]
fn fully_lowerable_target_has_thirteen_children() {
    let ctx = DerivationContext::new();
    let g = f(2, 2, 2);
    let rr = function_relation(&ctx, [g, g, f(0, 0, 0), f(0, 0, 0)], 0);

    assert_eq!(rr.num_children(), 13);
    assert!(rr.num_children() <= MAX_CHILDREN);
    assert_eq!(rr.nflops(), 41);
}

#[test]
fn expression_references_exactly_the_children() {
    let ctx = DerivationContext::new();
    let rr = function_relation(&ctx, [f(2, 1, 0), f(0, 3, 0), f(1, 0, 0), f(0, 0, 0)], 0);

    let expected: Vec<usize> = (0..rr.num_children()).collect();
    let referenced: Vec<usize> = rr.rr_expr().child_references().into_iter().collect();
    assert_eq!(referenced, expected);
}

#[test]
fn composite_instances_are_shared() {
    let ctx = DerivationContext::new();
    let (s, px) = (f(0, 0, 0), f(1, 0, 0));
    let first = function_relation(&ctx, [px, s, s, s], 0);
    let second = function_relation(&ctx, [px, s, s, s], 0);
    assert!(Arc::ptr_eq(&first, &second));

    let found = ctx
        .relations()
        .find_as::<KineticG12Relation<CartesianFunction>>(first.label())
        .expect("registered");
    assert!(Arc::ptr_eq(&first, &found));
    assert!(
        ctx.relations()
            .find_as::<KineticG12Relation<CartesianShell>>(first.label())
            .is_none()
    );
}

#[test]
fn evaluates_to_the_documented_combination() {
    let ctx = DerivationContext::new();
    let rr = shell_relation(&ctx, [0, 0, 0, 0], 0);

    let (zb, zk, z2b, z2k) = (1.5, 0.25, 2.25, 0.0625);
    let children = [3.0, 5.0, 7.0];
    let env = Bindings::new()
        .with_parameter(Parameter::new("zeta", (0, 0)), zb)
        .with_parameter(Parameter::new("zeta", (0, 1)), zk)
        .with_parameter(Parameter::new("zeta2", (0, 0)), z2b)
        .with_parameter(Parameter::new("zeta2", (0, 1)), z2k)
        .with_children(children);

    let expected = -0.5
        * (4.0 * z2b * children[0] - 4.0 * z2k * children[1]
            - (6.0 * zb - 6.0 * zk) * children[2]);
    let value = rr.rr_expr().evaluate(&env).expect("all leaves bound");
    assert!((value - expected).abs() < 1e-12);
}

#[test]
fn child_access_out_of_range() {
    let ctx = DerivationContext::new();
    let rr = function_relation(&ctx, [f(0, 0, 0); 4], 0);

    assert!(rr.rr_child(7).is_none());
    assert!(matches!(
        rr.try_child(7),
        Err(RrError::ChildIndexOutOfRange {
            index: 7,
            count: 7,
            ..
        })
    ));

    let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
        let _ = rr.child(7);
    }));
    assert!(result.is_err(), "indexing past the last child should panic");
}

#[test]
fn only_kinetic_targets_are_derivable() {
    let ctx = DerivationContext::new();
    let s = f(0, 0, 0);
    let target = ctx
        .integral(IntegralKind::G12, s, s, s, s, 0)
        .expect("valid integral");
    let err = KineticG12Relation::instance(&ctx, target).expect_err("G12 is not derivable here");
    assert!(matches!(
        err,
        RrError::UnexpectedIntegralKind {
            found: IntegralKind::G12,
            ..
        }
    ));
    assert!(ctx.relations().is_empty());
}

#[test]
fn decrement_probe_states() {
    assert!(DecrementProbe::run(&f(0, 0, 0), Axis::X).is_boundary_at_zero());
    assert!(DecrementProbe::run(&f(1, 0, 0), Axis::X).is_boundary_at_one());
    assert!(DecrementProbe::run(&f(1, 0, 0), Axis::Y).is_boundary_at_zero());
    assert_eq!(
        DecrementProbe::run(&f(3, 0, 0), Axis::X),
        DecrementProbe::TwoDecremented(f(1, 0, 0))
    );
    assert!(DecrementProbe::run(&CartesianShell::new(1), Axis::X).is_boundary_at_one());
    assert_eq!(
        DecrementProbe::run(&CartesianShell::new(2), Axis::Z),
        DecrementProbe::TwoDecremented(CartesianShell::new(0))
    );
}

#[test]
fn describe_names_children_by_label() {
    let ctx = DerivationContext::new();
    let rr = shell_relation(&ctx, [0, 0, 0, 0], 1);
    let text = rr.describe();
    assert!(text.starts_with("( s s | [T_1, G12] | s s ) = "));
    assert!(text.contains("( s s | G12 | d s )"));
    assert!(!text.contains('#'));
}
