//! Iterative walkers over expression trees.
//!
//! - [`walk`]: thread an input value of any type through the traversal; each node decides which
//!   operands are visited next, and with which input.
//! - [`walk_no_input`]: convenience wrapper when no state needs to be threaded.
//! - [`walk_unique`]: visit every distinct node allocation exactly once, even when a subtree is
//!   shared by several parents.
//!
//! Traversal strategy
//! - Pre-order, left to right, using an explicit stack (no recursion).
//! - Only operands scheduled through [`Schedule::visit`] are traversed, which makes pruning and
//!   guided searches straightforward.
//!
//! Example: depth of an expression
//! ```
//! use rrexpr::prelude::*;
//!
//! let e = plus(times(constant(2.0), child(0)), child(1));
//! let mut depth = 0usize;
//! walk(&e, 1usize, |level, node, schedule| {
//!     depth = depth.max(level);
//!     if let Some((lhs, rhs)) = node.operands() {
//!         schedule.visit(lhs, level + 1);
//!         schedule.visit(rhs, level + 1);
//!     }
//! });
//! assert_eq!(depth, 3);
//! ```
use std::collections::HashSet;

use smallvec::SmallVec;

use crate::expr::Expr;

/// Operands scheduled for a visit by the node currently being processed.
pub struct Schedule<'a, I> {
    buffer: SmallVec<[(&'a Expr, I); 2]>,
}

impl<'a, I> Schedule<'a, I> {
    /// Schedule `node` to be visited with `input`. Nodes scheduled from one step are visited
    /// in the order they were scheduled, before any node scheduled earlier.
    #[inline]
    pub fn visit(&mut self, node: &'a Expr, input: I) {
        self.buffer.push((node, input));
    }
}

/// Walk `root` in pre-order, threading `input` through scheduled visits.
pub fn walk<'a, I>(
    root: &'a Expr,
    input: I,
    mut visitor: impl FnMut(I, &'a Expr, &mut Schedule<'a, I>),
) {
    let mut stack: Vec<(&'a Expr, I)> = vec![(root, input)];
    let mut schedule = Schedule {
        buffer: SmallVec::new(),
    };

    while let Some((node, input)) = stack.pop() {
        visitor(input, node, &mut schedule);
        // Reverse so the first scheduled operand is popped first
        stack.extend(schedule.buffer.drain(..).rev());
    }
}

/// Walk `root` in pre-order without threading any state.
pub fn walk_no_input<'a>(root: &'a Expr, mut visitor: impl FnMut(&'a Expr, &mut Schedule<'a, ()>)) {
    walk(root, (), |(), node, schedule| visitor(node, schedule));
}

/// Visit every distinct node reachable from `root` exactly once (identity is the allocation).
pub fn walk_unique<'a>(root: &'a Expr, mut visitor: impl FnMut(&'a Expr)) {
    let mut seen: HashSet<*const Expr> = HashSet::new();
    walk_no_input(root, |node, schedule| {
        if !seen.insert(node as *const Expr) {
            return;
        }
        visitor(node);
        if let Some((lhs, rhs)) = node.operands() {
            schedule.visit(lhs, ());
            schedule.visit(rhs, ());
        }
    });
}
