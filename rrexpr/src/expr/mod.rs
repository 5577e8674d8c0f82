//! Expression nodes, builders and structural queries.
//!
//! Role
//! - [`Expr`] is the single node type; [`ExprRef`] is the shared handle used everywhere.
//! - Free functions ([`constant`], [`parameter`], [`child`], [`plus`], [`minus`], [`times`])
//!   build nodes bottom-up.
//! - Structural queries ([`Expr::child_references`], [`Expr::node_count`], ...) walk the tree
//!   with the explicit-stack walker from [`crate::walker`].
//!
//! Sharing
//! - Nodes carry no back-pointers, so sharing a subtree between several parents is always
//!   sound. The tree is freed when its last holder drops it.
//!
//! Example
//! ```
//! use rrexpr::prelude::*;
//!
//! let shared = times(constant(2.0), child(0));
//! let a = plus(shared.clone(), child(1));
//! let b = minus(shared.clone(), child(2));
//! assert_eq!(a.node_count(), 5);
//! assert!(std::sync::Arc::ptr_eq(a.shared_operand(&b).unwrap(), &shared));
//! ```
pub mod eval;
pub mod pretty;

use std::collections::BTreeSet;
use std::sync::Arc;

use strum::{EnumIs, EnumIter};

use crate::walker::{walk_no_input, walk_unique};

/// Shared handle to an immutable expression node.
pub type ExprRef = Arc<Expr>;

/// Binary operators available in recurrence-relation expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, EnumIter)]
pub enum BinaryOp {
    Plus,
    Minus,
    Times,
}

impl BinaryOp {
    /// Operator symbol as printed in expressions and emitted code.
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Plus => "+",
            BinaryOp::Minus => "-",
            BinaryOp::Times => "*",
        }
    }

    /// Binding strength, higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Plus | BinaryOp::Minus => 1,
            BinaryOp::Times => 2,
        }
    }

    /// Apply the operator to two numeric operands.
    #[inline]
    pub fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            BinaryOp::Plus => lhs + rhs,
            BinaryOp::Minus => lhs - rhs,
            BinaryOp::Times => lhs * rhs,
        }
    }
}

impl std::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A named symbolic parameter with an index pair, e.g. `zeta[1][0]`.
///
/// Parameters stand for runtime quantities (orbital exponents and the like) whose value is
/// only known by the generated code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Parameter {
    pub name: String,
    pub indices: (u32, u32),
}

impl Parameter {
    pub fn new(name: impl Into<String>, indices: (u32, u32)) -> Self {
        Self {
            name: name.into(),
            indices,
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}][{}]", self.name, self.indices.0, self.indices.1)
    }
}

/// Expression node.
///
/// Leaves are constants, symbolic parameters or references to a child quantity of the
/// enclosing relation (by position in its child list). Inner nodes are binary operators.
#[derive(Debug, Clone, PartialEq, EnumIs)]
pub enum Expr {
    /// Numeric constant.
    Constant(f64),
    /// Symbolic parameter.
    Parameter(Parameter),
    /// Reference to the `i`-th child of the enclosing relation.
    Child(usize),
    /// Binary operation over two shared subtrees.
    Binary {
        op: BinaryOp,
        lhs: ExprRef,
        rhs: ExprRef,
    },
}

impl Expr {
    /// Operands of a binary node, `None` for leaves.
    #[inline]
    pub fn operands(&self) -> Option<(&ExprRef, &ExprRef)> {
        match self {
            Expr::Binary { lhs, rhs, .. } => Some((lhs, rhs)),
            _ => None,
        }
    }

    /// Operator of a binary node, `None` for leaves.
    #[inline]
    pub fn op(&self) -> Option<BinaryOp> {
        match self {
            Expr::Binary { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Set of child positions referenced anywhere in this tree.
    pub fn child_references(&self) -> BTreeSet<usize> {
        let mut refs = BTreeSet::new();
        walk_unique(self, |node| {
            if let Expr::Child(i) = node {
                refs.insert(*i);
            }
        });
        refs
    }

    /// Set of symbolic parameters referenced anywhere in this tree.
    pub fn parameters(&self) -> BTreeSet<Parameter> {
        let mut params = BTreeSet::new();
        walk_unique(self, |node| {
            if let Expr::Parameter(p) = node {
                params.insert(p.clone());
            }
        });
        params
    }

    /// Number of nodes of the tree, counting a shared subtree once per occurrence.
    pub fn node_count(&self) -> usize {
        let mut count = 0usize;
        walk_no_input(self, |node, schedule| {
            count += 1;
            if let Some((lhs, rhs)) = node.operands() {
                schedule.visit(lhs, ());
                schedule.visit(rhs, ());
            }
        });
        count
    }

    /// Number of distinct node allocations reachable from this node.
    pub fn unique_node_count(&self) -> usize {
        let mut count = 0usize;
        walk_unique(self, |_| count += 1);
        count
    }

    /// Number of binary operations a straightforward evaluation of the tree performs.
    pub fn operation_count(&self) -> usize {
        let mut count = 0usize;
        walk_no_input(self, |node, schedule| {
            if let Some((lhs, rhs)) = node.operands() {
                count += 1;
                schedule.visit(lhs, ());
                schedule.visit(rhs, ());
            }
        });
        count
    }

    /// Returns the operand of `self` that is pointer-identical to an operand of `other`.
    ///
    /// Useful to check that two relations share a coefficient subtree instead of copying it.
    pub fn shared_operand<'a>(&'a self, other: &Expr) -> Option<&'a ExprRef> {
        let (a_lhs, a_rhs) = self.operands()?;
        let (b_lhs, b_rhs) = other.operands()?;
        [a_lhs, a_rhs]
            .into_iter()
            .find(|a| Arc::ptr_eq(*a, b_lhs) || Arc::ptr_eq(*a, b_rhs))
    }
}

/// Numeric constant leaf.
#[inline]
pub fn constant(value: f64) -> ExprRef {
    Arc::new(Expr::Constant(value))
}

/// Symbolic parameter leaf.
#[inline]
pub fn parameter(name: impl Into<String>, indices: (u32, u32)) -> ExprRef {
    Arc::new(Expr::Parameter(Parameter::new(name, indices)))
}

/// Reference to the `index`-th child of the enclosing relation.
#[inline]
pub fn child(index: usize) -> ExprRef {
    Arc::new(Expr::Child(index))
}

/// Binary node `lhs op rhs`.
#[inline]
pub fn binary(op: BinaryOp, lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    Arc::new(Expr::Binary { op, lhs, rhs })
}

/// `lhs + rhs`
#[inline]
pub fn plus(lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    binary(BinaryOp::Plus, lhs, rhs)
}

/// `lhs - rhs`
#[inline]
pub fn minus(lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    binary(BinaryOp::Minus, lhs, rhs)
}

/// `lhs * rhs`
#[inline]
pub fn times(lhs: ExprRef, rhs: ExprRef) -> ExprRef {
    binary(BinaryOp::Times, lhs, rhs)
}
