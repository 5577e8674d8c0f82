use std::cell::Cell;

use rrexpr::prelude::*;

#[test]
fn pre_order_left_to_right() {
    let e = plus(times(child(0), child(1)), child(2));
    let mut order = Vec::new();
    walk_no_input(&e, |node, schedule| {
        match node {
            Expr::Child(i) => order.push(format!("#{i}")),
            Expr::Binary { op, lhs, rhs } => {
                order.push(op.to_string());
                schedule.visit(lhs, ());
                schedule.visit(rhs, ());
            }
            _ => {}
        }
    });
    assert_eq!(order, vec!["+", "*", "#0", "#1", "#2"]);
}

#[test]
fn pruning_skips_unscheduled_subtrees() {
    let e = plus(times(child(0), child(1)), child(2));
    let visited = Cell::new(0usize);
    walk_no_input(&e, |node, schedule| {
        visited.set(visited.get() + 1);
        if let Expr::Binary { op: BinaryOp::Plus, rhs, .. } = node {
            // Only descend on the right-hand side
            schedule.visit(rhs, ());
        }
    });
    assert_eq!(visited.get(), 2);
}

#[test]
fn input_is_threaded_through_scheduled_visits() {
    let e = minus(plus(child(0), child(1)), times(child(2), plus(child(3), child(4))));
    let mut deepest = (0usize, 0usize);
    walk(&e, 0usize, |depth, node, schedule| {
        if let Expr::Child(i) = node {
            if depth > deepest.0 {
                deepest = (depth, *i);
            }
        }
        if let Some((lhs, rhs)) = node.operands() {
            schedule.visit(lhs, depth + 1);
            schedule.visit(rhs, depth + 1);
        }
    });
    assert_eq!(deepest, (3, 3));
}

#[test]
fn unique_walk_visits_shared_nodes_once() {
    let shared = times(constant(2.0), child(0));
    let e = plus(shared.clone(), minus(shared.clone(), shared));
    let mut count = 0usize;
    walk_unique(&e, |_| count += 1);
    // plus, minus, times, 2.0, #0
    assert_eq!(count, 5);
    assert_eq!(e.node_count(), 11);
}
