//! Recurrence relations: how a target vertex is expressed through its children.
//!
//! A relation pairs a target with an ordered list of children and a coefficient expression in
//! which `Child(i)` stands for the `i`-th child. Relations are immutable once derived and are
//! shared as `Arc<dyn RecurrenceRelation>`.
use std::fmt::Debug;
use std::sync::Arc;

use downcast_rs::{DowncastSync, impl_downcast};
use rrexpr::prelude::*;

use crate::codegen::CodeContext;
use crate::integral::Vertex;
use crate::utils::error::{RrError, RrResult};

pub mod kinetic_g12;

pub use kinetic_g12::{DecrementProbe, KineticG12Relation};

/// Upper bound on the number of children of any relation in this crate.
pub const MAX_CHILDREN: usize = 18;

pub trait RecurrenceRelation: DowncastSync + Debug {
    /// Unique, human-readable label, e.g. `RR ( px s | [T_0, G12] | s s )`.
    fn label(&self) -> &str;

    fn num_children(&self) -> usize;

    fn rr_target(&self) -> Arc<dyn Vertex>;

    /// The `i`-th child, `None` when `i >= num_children()`.
    fn rr_child(&self, i: usize) -> Option<Arc<dyn Vertex>>;

    /// Coefficient expression of the target in terms of the children.
    fn rr_expr(&self) -> &ExprRef;

    /// Floating-point operations needed to evaluate [`rr_expr`](Self::rr_expr).
    fn nflops(&self) -> u32;

    /// Whether the relation works on whole shells rather than individual functions.
    fn is_simple(&self) -> bool;

    /// Whether the children have the same type as the target.
    fn invariant_type(&self) -> bool;

    fn children(&self) -> Vec<Arc<dyn Vertex>> {
        (0..self.num_children())
            .filter_map(|i| self.rr_child(i))
            .collect()
    }

    /// Human-readable form `target = expression` with children spelled out by label.
    fn describe(&self) -> String {
        let children = self.children();
        let naming = |i: usize| {
            children
                .get(i)
                .map(|c| c.label().to_string())
                .unwrap_or_else(|| format!("#{i}"))
        };
        format!(
            "{} = {}",
            self.rr_target().label(),
            self.rr_expr().pretty_string_with(100, &naming)
        )
    }

    /// Render the statement invoking the generated function of this relation.
    ///
    /// The call has the form `name(handle, &(target), &(child0), ...)` followed by the end of
    /// statement marker of `context` and a newline. One child symbol per child is required.
    fn emit_call(
        &self,
        context: &dyn CodeContext,
        target_symbol: &str,
        child_symbols: &[&str],
    ) -> RrResult<String> {
        if child_symbols.len() != self.num_children() {
            return Err(RrError::SymbolCountMismatch {
                relation: self.label().to_string(),
                expected: self.num_children(),
                found: child_symbols.len(),
            });
        }

        let prefixed = format!("{}{}", context.parameters().api_prefix, self.label());
        let mut call = context.label_to_name(&label_to_funcname(&prefixed));
        call.push('(');
        call.push_str(context.library_handle());
        call.push_str(", ");
        call.push_str(&context.value_to_pointer(target_symbol));
        for symbol in child_symbols {
            call.push_str(", ");
            call.push_str(&context.value_to_pointer(symbol));
        }
        call.push(')');
        call.push_str(context.end_of_stat());
        call.push('\n');
        Ok(call)
    }
}
impl_downcast!(sync RecurrenceRelation);

/// Turn a label into an identifier: runs of characters outside `[A-Za-z0-9_]` become a
/// single `_` and leading/trailing separators are dropped.
///
/// ```
/// # use rrcore::rr::label_to_funcname;
/// assert_eq!(label_to_funcname("RR ( px s | [T_0, G12] | s s )"), "RR_px_s_T_0_G12_s_s");
/// ```
pub fn label_to_funcname(label: &str) -> String {
    label
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
