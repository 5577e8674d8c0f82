//! Rrexpr: immutable expression trees for the right-hand side of recurrence relations.
//!
//! A recurrence relation expresses a target quantity as a linear combination of
//! child quantities with numeric and symbolic coefficients. This crate provides the
//! expression language used for that combination:
//! - numeric constants,
//! - named symbolic parameters carrying an index pair (e.g. `zeta2[0][1]`),
//! - references to the children of a relation by position,
//! - binary `+`, `-` and `*` nodes.
//!
//! Nodes are reference counted ([`expr::ExprRef`]) and never mutated once built, so a
//! subtree may be shared by several parents (and several relations) without copying.
//!
//! Example
//! ```
//! use rrexpr::prelude::*;
//!
//! // -0.5 * (4.0 * zeta2[0][0] * #0 - #1)
//! let zeta2 = parameter("zeta2", (0, 0));
//! let term = times(times(constant(4.0), zeta2), child(0));
//! let expr = times(constant(-0.5), minus(term, child(1)));
//!
//! assert_eq!(expr.child_references().into_iter().collect::<Vec<_>>(), vec![0, 1]);
//! assert_eq!(expr.pretty_string(), "-0.5 * (4.0 * zeta2[0][0] * #0 - #1)");
//! ```

/// Expressions API: node type, builders, evaluation and pretty printing.
pub mod expr;
/// Explicit-stack walker over expression trees.
pub mod walker;

pub mod prelude {
    //! Convenient re-exports for end users.
    //!
    //! - [`Expr`] / [`ExprRef`] and the operator enum
    //! - Free-function builders
    //! - Evaluation environment and bindings
    //! - Pretty-printing via `PrettyExpr`
    pub use crate::expr::{
        BinaryOp, Expr, ExprRef, Parameter, binary, child, constant,
        eval::{Bindings, Environment, EvalError},
        minus, parameter, plus,
        pretty::PrettyExpr,
        times,
    };

    // Walker ergonomics
    pub use crate::walker::{Schedule, walk, walk_no_input, walk_unique};
}
