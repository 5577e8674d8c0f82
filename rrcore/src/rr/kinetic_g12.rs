//! Relation for `( a b | [T_K, G12] | c d )`.
//!
//! The commutator of the kinetic energy of particle `K` with a Gaussian geminal is expressed
//! through plain G12 integrals in which only the functions of particle `K` are shifted. For
//! each side of the operator and each axis `i`, with `n` the quantum number of the acted-on
//! function along `i`:
//!
//! ```text
//!   + n(n-1)          ( ..f - 2i.. | G12 | .. )     (only when n >= 2)
//!   + 4 zeta2[K][p]   ( ..f + 2i.. | G12 | .. )
//! ```
//!
//! Bra terms are added and ket terms subtracted. A single unshifted term closes the sum:
//!
//! ```text
//!   - ((4 L_bra + 6) zeta[K][bra] - (4 L_ket + 6) zeta[K][ket]) ( a b | G12 | c d )
//! ```
//!
//! and the whole sum is scaled by `-1/2`. Elementary sets only walk one axis.
use std::sync::Arc;

use log::trace;
use rrexpr::prelude::*;
use strum::{EnumIs, IntoEnumIterator};

use crate::bfs::{Axis, BasisFunctionSet, FunctionPosition};
use crate::context::DerivationContext;
use crate::integral::{IntegralKind, TwoBodyIntegral, Vertex};
use crate::rr::RecurrenceRelation;
use crate::utils::error::{RrError, RrResult};

/// Outcome of lowering a function twice along one axis.
#[derive(Debug, Clone, PartialEq, Eq, EnumIs)]
pub enum DecrementProbe<F> {
    /// The quantum number is zero: nothing could be lowered.
    BoundaryAtZero,
    /// The quantum number is one: the second lowering failed.
    BoundaryAtOne,
    /// The function lowered by two units.
    TwoDecremented(F),
}

impl<F: BasisFunctionSet> DecrementProbe<F> {
    pub fn run(function: &F, axis: Axis) -> Self {
        let Ok(once) = function.decrement(axis) else {
            trace!("{} cannot be lowered along {}", function.label(), axis);
            return DecrementProbe::BoundaryAtZero;
        };

        match once.decrement(axis) {
            Ok(twice) => DecrementProbe::TwoDecremented(twice),
            Err(_) => {
                trace!("{} can only be lowered once along {}", function.label(), axis);
                DecrementProbe::BoundaryAtOne
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIs)]
enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn of(position: FunctionPosition) -> Self {
        match position {
            FunctionPosition::Bra => Sign::Plus,
            FunctionPosition::Ket => Sign::Minus,
        }
    }
}

/// Running signed sum of terms along with its operation count.
#[derive(Default)]
struct TermSum {
    expr: Option<ExprRef>,
    nflops: u32,
}

impl TermSum {
    /// Combine `sum` (if any) with a signed term.
    fn combine(&mut self, sum: Option<ExprRef>, term: ExprRef, sign: Sign) -> ExprRef {
        match (sum, sign) {
            (None, Sign::Plus) => term,
            (None, Sign::Minus) => {
                self.nflops += 1;
                times(term, constant(-1.0))
            }
            (Some(sum), Sign::Plus) => {
                self.nflops += 1;
                plus(sum, term)
            }
            (Some(sum), Sign::Minus) => {
                self.nflops += 1;
                minus(sum, term)
            }
        }
    }

    fn add(&mut self, term: ExprRef, sign: Sign) {
        let sum = self.expr.take();
        self.expr = Some(self.combine(sum, term, sign));
    }

    /// Add the closing term and return the completed sum.
    fn finish(mut self, term: ExprRef, sign: Sign) -> (ExprRef, u32) {
        let sum = self.expr.take();
        let total = self.combine(sum, term, sign);
        (total, self.nflops)
    }
}

/// Derived `( a b | [T_K, G12] | c d )` relation.
///
/// Build instances through [`KineticG12Relation::instance`] so that composite relations are
/// shared through the context's registry.
#[derive(Debug)]
pub struct KineticG12Relation<F: BasisFunctionSet> {
    target: Arc<TwoBodyIntegral<F>>,
    children: Vec<Arc<TwoBodyIntegral<F>>>,
    expr: ExprRef,
    nflops: u32,
    label: String,
}

impl<F: BasisFunctionSet> KineticG12Relation<F> {
    /// Label of the relation deriving `target`.
    pub fn generate_label(target: &TwoBodyIntegral<F>) -> String {
        format!("RR {}", target.label())
    }

    /// Obtain the relation for `target`.
    ///
    /// A composite target whose relation is already registered gets the registered instance.
    /// Otherwise the relation is derived; composite relations with children are registered,
    /// elementary ones never are. Fails with [`RrError::LabelConflict`] when the label is
    /// registered by a relation over another kind of set.
    pub fn instance(ctx: &DerivationContext, target: Arc<TwoBodyIntegral<F>>) -> RrResult<Arc<Self>> {
        if target.kind() != IntegralKind::KineticG12 {
            return Err(RrError::UnexpectedIntegralKind {
                relation: "KineticG12Relation",
                expected: IntegralKind::KineticG12,
                found: target.kind(),
            });
        }

        let label = Self::generate_label(&target);
        if !F::ELEMENTARY {
            if let Some(existing) = ctx.relations().find_as::<Self>(&label) {
                trace!("Reusing registered relation {}", label);
                return Ok(existing);
            }
        }

        let relation = Arc::new(Self::derive(ctx, target, label)?);
        if F::ELEMENTARY || relation.num_children() == 0 {
            return Ok(relation);
        }

        ctx.relations()
            .register(relation)
            .downcast_arc::<Self>()
            .map_err(|other| RrError::LabelConflict {
                label: other.label().to_string(),
            })
    }

    fn derive(ctx: &DerivationContext, target: Arc<TwoBodyIntegral<F>>, label: String) -> RrResult<Self> {
        let particle = target.aux() as usize;
        let prefactors = ctx.prefactors();
        let functions = target.functions().clone();

        let mut children: Vec<Arc<TwoBodyIntegral<F>>> = Vec::new();
        let mut push_child = |position: FunctionPosition, replacement: Option<F>| -> RrResult<ExprRef> {
            let mut shifted = functions.clone();
            if let Some(function) = replacement {
                shifted[position.index()][particle] = function;
            }
            let integral = ctx.integral_from_functions(IntegralKind::G12, shifted, 0)?;
            trace!("Child #{} of {}: {}", children.len(), label, integral.label());
            children.push(integral);
            Ok(child(children.len() - 1))
        };

        let mut sum = TermSum::default();
        let mut nflops = 0;

        for position in FunctionPosition::iter() {
            let sign = Sign::of(position);
            let current = &functions[position.index()][particle];

            for &axis in F::axes() {
                if let DecrementProbe::TwoDecremented(lowered) = DecrementProbe::run(current, axis) {
                    let n = current.quantum_number(axis);
                    let term = times(prefactors.integer(n * (n - 1)), push_child(position, Some(lowered))?);
                    sum.add(term, sign);
                    nflops += 1;
                }

                let raised = current.increment(axis).increment(axis);
                let coefficient = times(prefactors.real(4.0), prefactors.zeta2(particle, position));
                let term = times(coefficient, push_child(position, Some(raised))?);
                sum.add(term, sign);
                nflops += 3;
            }
        }

        let scaled_zeta = |position: FunctionPosition| {
            let l = functions[position.index()][particle].total_quantum_number();
            times(
                prefactors.integer(4 * l + 6),
                prefactors.zeta(particle, position),
            )
        };
        let exponent_difference = minus(
            scaled_zeta(FunctionPosition::Bra),
            scaled_zeta(FunctionPosition::Ket),
        );
        let unshifted = times(exponent_difference, push_child(FunctionPosition::Bra, None)?);
        nflops += 4;

        let (total, sum_flops) = sum.finish(unshifted, Sign::Minus);
        let expr = times(prefactors.real(-0.5), total);
        nflops += sum_flops + 1;

        Ok(Self {
            target,
            children,
            expr,
            nflops,
            label,
        })
    }

    #[inline]
    pub fn target(&self) -> &Arc<TwoBodyIntegral<F>> {
        &self.target
    }

    /// The `i`-th child.
    ///
    /// # Panics
    /// When `i >= num_children()`. See [`try_child`](Self::try_child) for a checked variant.
    pub fn child(&self, i: usize) -> &Arc<TwoBodyIntegral<F>> {
        match self.children.get(i) {
            Some(c) => c,
            None => panic!(
                "child index {} out of range for {} ({} children)",
                i,
                self.label,
                self.children.len()
            ),
        }
    }

    pub fn try_child(&self, i: usize) -> RrResult<&Arc<TwoBodyIntegral<F>>> {
        self.children.get(i).ok_or_else(|| RrError::ChildIndexOutOfRange {
            relation: self.label.clone(),
            index: i,
            count: self.children.len(),
        })
    }

    #[inline]
    pub fn typed_children(&self) -> &[Arc<TwoBodyIntegral<F>>] {
        &self.children
    }

    /// Particle the kinetic operator acts on.
    #[inline]
    pub fn particle(&self) -> u32 {
        self.target.aux()
    }
}

impl<F: BasisFunctionSet> RecurrenceRelation for KineticG12Relation<F> {
    fn label(&self) -> &str {
        &self.label
    }

    fn num_children(&self) -> usize {
        self.children.len()
    }

    fn rr_target(&self) -> Arc<dyn Vertex> {
        self.target.clone()
    }

    fn rr_child(&self, i: usize) -> Option<Arc<dyn Vertex>> {
        self.children.get(i).map(|c| c.clone() as Arc<dyn Vertex>)
    }

    fn rr_expr(&self) -> &ExprRef {
        &self.expr
    }

    fn nflops(&self) -> u32 {
        self.nflops
    }

    fn is_simple(&self) -> bool {
        F::ELEMENTARY
    }

    fn invariant_type(&self) -> bool {
        true
    }
}
