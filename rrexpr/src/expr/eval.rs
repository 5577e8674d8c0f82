//! Numeric evaluation of expressions against caller-supplied leaf values.
//!
//! Evaluation does not know what a child or a parameter stands for; the caller binds them
//! through an [`Environment`]. This is mostly useful to check derived coefficients.
use std::collections::HashMap;

use thiserror::Error;

use crate::expr::{Expr, Parameter};

/// Errors raised while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// A parameter leaf has no value in the environment.
    #[error("Parameter `{0}` is not bound in the evaluation environment.")]
    UnboundParameter(Parameter),

    /// A child leaf has no value in the environment.
    #[error("Child #{0} is not bound in the evaluation environment.")]
    UnboundChild(usize),
}

/// Source of values for the leaves of an expression.
pub trait Environment {
    /// Value of a symbolic parameter, `None` when unbound.
    fn parameter(&self, parameter: &Parameter) -> Option<f64>;

    /// Value of the `index`-th child, `None` when unbound.
    fn child(&self, index: usize) -> Option<f64>;
}

/// Simple map-backed [`Environment`].
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    parameters: HashMap<Parameter, f64>,
    children: Vec<f64>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a parameter, replacing any previous value.
    pub fn with_parameter(mut self, parameter: Parameter, value: f64) -> Self {
        self.parameters.insert(parameter, value);
        self
    }

    /// Bind children `0..values.len()` in order.
    pub fn with_children(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.children = values.into_iter().collect();
        self
    }
}

impl Environment for Bindings {
    fn parameter(&self, parameter: &Parameter) -> Option<f64> {
        self.parameters.get(parameter).copied()
    }

    fn child(&self, index: usize) -> Option<f64> {
        self.children.get(index).copied()
    }
}

impl Expr {
    /// Evaluate the tree with leaves resolved through `env`.
    ///
    /// Example
    /// ```
    /// use rrexpr::prelude::*;
    ///
    /// let e = minus(times(constant(3.0), parameter("zeta", (0, 0))), child(0));
    /// let env = Bindings::new()
    ///     .with_parameter(Parameter::new("zeta", (0, 0)), 2.0)
    ///     .with_children([1.5]);
    /// assert_eq!(e.evaluate(&env), Ok(4.5));
    /// ```
    pub fn evaluate(&self, env: &impl Environment) -> Result<f64, EvalError> {
        match self {
            Expr::Constant(value) => Ok(*value),
            Expr::Parameter(p) => env
                .parameter(p)
                .ok_or_else(|| EvalError::UnboundParameter(p.clone())),
            Expr::Child(i) => env.child(*i).ok_or(EvalError::UnboundChild(*i)),
            Expr::Binary { op, lhs, rhs } => Ok(op.apply(lhs.evaluate(env)?, rhs.evaluate(env)?)),
        }
    }
}
