use std::sync::Arc;

use crate::bfs::BasisFunctionSet;
use crate::integral::{IntegralKind, TwoBodyIntegral};
use crate::prefactors::Prefactors;
use crate::registry::{RelationRegistry, VertexRegistry};
use crate::utils::error::RrResult;

/// State shared by one derivation session: interned vertices, registered relations and the
/// symbolic prefactors their coefficients refer to.
///
/// Contexts are independent from each other; tests typically build a fresh one each.
#[derive(Debug, Default)]
pub struct DerivationContext {
    vertices: VertexRegistry,
    relations: RelationRegistry,
    prefactors: Prefactors,
}

impl DerivationContext {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertices(&self) -> &VertexRegistry {
        &self.vertices
    }

    #[inline]
    pub fn relations(&self) -> &RelationRegistry {
        &self.relations
    }

    #[inline]
    pub fn prefactors(&self) -> &Prefactors {
        &self.prefactors
    }

    /// Build and intern `( bra1 ket1 | op | bra2 ket2 )`.
    pub fn integral<F: BasisFunctionSet>(
        &self,
        kind: IntegralKind,
        bra1: F,
        ket1: F,
        bra2: F,
        ket2: F,
        aux: u32,
    ) -> RrResult<Arc<TwoBodyIntegral<F>>> {
        let integral = TwoBodyIntegral::make(kind, bra1, ket1, bra2, ket2, aux)?;
        Ok(self.vertices.search_or_insert(integral))
    }

    /// Intern an integral given by functions indexed `[position][particle]`.
    pub fn integral_from_functions<F: BasisFunctionSet>(
        &self,
        kind: IntegralKind,
        functions: [[F; 2]; 2],
        aux: u32,
    ) -> RrResult<Arc<TwoBodyIntegral<F>>> {
        let integral = TwoBodyIntegral::from_functions(kind, functions, aux)?;
        Ok(self.vertices.search_or_insert(integral))
    }
}
