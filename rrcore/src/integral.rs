//! Two-body integrals over a quartet of basis function sets.
//!
//! An integral `( a b | op | c d )` pairs `a`/`c` on the bra side and `b`/`d` on the ket side:
//! particle 0 carries `a` and `b`, particle 1 carries `c` and `d`. The operator is selected by
//! an [`IntegralKind`] and an auxiliary index (the particle a kinetic operator acts on).
use std::any::TypeId;
use std::fmt::Debug;

use downcast_rs::{DowncastSync, impl_downcast};
use strum::{EnumIs, EnumIter};

use crate::bfs::{BasisFunctionSet, FunctionPosition};
use crate::utils::error::{RrError, RrResult};

/// Operator families known to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, EnumIter)]
pub enum IntegralKind {
    /// Commutator of the kinetic energy of particle `K` with the Gaussian geminal.
    KineticG12,
    /// Plain Gaussian geminal.
    G12,
}

impl IntegralKind {
    /// Largest admissible auxiliary index.
    pub fn max_aux(self) -> u32 {
        match self {
            IntegralKind::KineticG12 => 1,
            IntegralKind::G12 => 0,
        }
    }

    fn operator_label(self, aux: u32) -> String {
        match self {
            IntegralKind::KineticG12 => format!("[T_{aux}, G12]"),
            IntegralKind::G12 => "G12".to_string(),
        }
    }
}

impl std::fmt::Display for IntegralKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegralKind::KineticG12 => write!(f, "[T_K, G12]"),
            IntegralKind::G12 => write!(f, "G12"),
        }
    }
}

/// A node of the derivation graph.
///
/// Vertices are shared as `Arc<dyn Vertex>` and identified by their label; concrete types
/// can be recovered with `downcast_arc`.
pub trait Vertex: DowncastSync + Debug {
    fn label(&self) -> &str;

    fn kind(&self) -> IntegralKind;

    /// Whether the vertex is built from elementary basis function sets.
    fn is_elementary(&self) -> bool;
}
impl_downcast!(sync Vertex);

/// Identity of a vertex: its concrete type and its label.
///
/// Labels only name the functions, so shells and Cartesian functions of the same momenta
/// share labels (`( s s | G12 | s s )`). The type disambiguates them.
pub type VertexKey = (TypeId, String);

pub fn vertex_key(vertex: &dyn Vertex) -> VertexKey {
    (vertex.as_any().type_id(), vertex.label().to_string())
}

/// Integral `( a b | op | c d )` with its label computed once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TwoBodyIntegral<F: BasisFunctionSet> {
    /// Indexed by `[position][particle]`.
    functions: [[F; 2]; 2],
    kind: IntegralKind,
    aux: u32,
    label: String,
}

impl<F: BasisFunctionSet> TwoBodyIntegral<F> {
    /// Build `( bra1 ket1 | op | bra2 ket2 )`.
    ///
    /// Fails with [`RrError::InvalidAuxIndex`] when `aux` exceeds [`IntegralKind::max_aux`].
    pub fn make(kind: IntegralKind, bra1: F, ket1: F, bra2: F, ket2: F, aux: u32) -> RrResult<Self> {
        if aux > kind.max_aux() {
            return Err(RrError::InvalidAuxIndex {
                kind,
                aux,
                max: kind.max_aux(),
            });
        }

        let label = format!(
            "( {} {} | {} | {} {} )",
            bra1.label(),
            ket1.label(),
            kind.operator_label(aux),
            bra2.label(),
            ket2.label()
        );

        Ok(Self {
            functions: [[bra1, bra2], [ket1, ket2]],
            kind,
            aux,
            label,
        })
    }

    /// Build from functions indexed by `[position][particle]`.
    pub fn from_functions(kind: IntegralKind, functions: [[F; 2]; 2], aux: u32) -> RrResult<Self> {
        let [[bra1, bra2], [ket1, ket2]] = functions;
        Self::make(kind, bra1, ket1, bra2, ket2, aux)
    }

    #[inline]
    pub fn bra(&self, particle: usize) -> &F {
        &self.functions[FunctionPosition::Bra.index()][particle]
    }

    #[inline]
    pub fn ket(&self, particle: usize) -> &F {
        &self.functions[FunctionPosition::Ket.index()][particle]
    }

    #[inline]
    pub fn function(&self, position: FunctionPosition, particle: usize) -> &F {
        &self.functions[position.index()][particle]
    }

    /// All four functions, indexed by `[position][particle]`.
    #[inline]
    pub fn functions(&self) -> &[[F; 2]; 2] {
        &self.functions
    }

    #[inline]
    pub fn kind(&self) -> IntegralKind {
        self.kind
    }

    #[inline]
    pub fn aux(&self) -> u32 {
        self.aux
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl<F: BasisFunctionSet> Vertex for TwoBodyIntegral<F> {
    fn label(&self) -> &str {
        &self.label
    }

    fn kind(&self) -> IntegralKind {
        self.kind
    }

    fn is_elementary(&self) -> bool {
        F::ELEMENTARY
    }
}

impl<F: BasisFunctionSet> std::fmt::Display for TwoBodyIntegral<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}
