//! Derivation engine for the `[T_K, G12]` recurrence relation of two-body integrals.
//!
//! Given a target `( a b | [T_K, G12] | c d )`, the engine derives how it is expressed through
//! plain G12 integrals with shifted angular momenta, tracks the symbolic coefficients and
//! their cost, and emits the call statement of the generated routine.
//!
//! ```rust
//! use rrcore::prelude::*;
//!
//! let ctx = DerivationContext::new();
//! let s = CartesianFunction::new(0, 0, 0);
//! let px = CartesianFunction::new(1, 0, 0);
//! let target = ctx.integral(IntegralKind::KineticG12, px, s, s, s, 0).unwrap();
//!
//! let rr = KineticG12Relation::instance(&ctx, target).unwrap();
//! assert_eq!(rr.label(), "RR ( px s | [T_0, G12] | s s )");
//! assert!(ctx.relations().contains(rr.label()));
//! ```
pub mod bfs;
pub mod codegen;
pub mod context;
pub mod graph;
pub mod integral;
pub mod prefactors;
pub mod registry;
pub mod rr;
pub mod utils;

pub mod prelude {
    pub use crate::bfs::{
        Axis, BasisFunctionSet, BoundaryError, CartesianFunction, CartesianShell,
        FunctionPosition,
    };
    pub use crate::codegen::{CodeContext, CppCodeContext};
    pub use crate::context::DerivationContext;
    pub use crate::graph::{DerivationGraph, KineticG12Strategy, Strategy};
    pub use crate::integral::{IntegralKind, TwoBodyIntegral, Vertex};
    pub use crate::rr::{DecrementProbe, KineticG12Relation, MAX_CHILDREN, RecurrenceRelation};
    pub use crate::utils::conf::CompilationParameters;
    pub use crate::utils::error::{RrError, RrResult};
}
