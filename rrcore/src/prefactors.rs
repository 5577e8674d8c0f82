//! Symbolic prefactors shared by every relation of a derivation.
//!
//! Exponent parameters are built once per context and handed out as shared references, so
//! the coefficient trees of different relations point at the same leaves. Numeric constants
//! are interned by value for the same reason.
use std::collections::BTreeMap;

use log::trace;
use parking_lot::RwLock;
use rrexpr::prelude::*;

use crate::bfs::FunctionPosition;

/// Name of the orbital exponent parameter: `zeta[K][position]`.
pub const ZETA: &str = "zeta";
/// Name of the squared orbital exponent parameter: `zeta2[K][position]`.
pub const ZETA2: &str = "zeta2";

#[derive(Debug)]
pub struct Prefactors {
    /// Indexed by `[particle][position]`.
    zeta: [[ExprRef; 2]; 2],
    zeta2: [[ExprRef; 2]; 2],
    constants: RwLock<BTreeMap<u64, ExprRef>>,
}

fn exponent_table(name: &str) -> [[ExprRef; 2]; 2] {
    let entry = |particle: u32, position: FunctionPosition| {
        parameter(name, (particle, position.index() as u32))
    };
    [
        [entry(0, FunctionPosition::Bra), entry(0, FunctionPosition::Ket)],
        [entry(1, FunctionPosition::Bra), entry(1, FunctionPosition::Ket)],
    ]
}

impl Default for Prefactors {
    fn default() -> Self {
        Self::new()
    }
}

impl Prefactors {
    pub fn new() -> Self {
        Self {
            zeta: exponent_table(ZETA),
            zeta2: exponent_table(ZETA2),
            constants: RwLock::new(BTreeMap::new()),
        }
    }

    /// Orbital exponent of the function of `particle` at `position`.
    ///
    /// # Panics
    /// When `particle` is not 0 or 1.
    pub fn zeta(&self, particle: usize, position: FunctionPosition) -> ExprRef {
        self.zeta[particle][position.index()].clone()
    }

    /// Squared orbital exponent of the function of `particle` at `position`.
    ///
    /// # Panics
    /// When `particle` is not 0 or 1.
    pub fn zeta2(&self, particle: usize, position: FunctionPosition) -> ExprRef {
        self.zeta2[particle][position.index()].clone()
    }

    /// Real constant, interned by bit pattern.
    pub fn real(&self, value: f64) -> ExprRef {
        let key = value.to_bits();
        let mut constants = self.constants.upgradable_read();
        if let Some(existing) = constants.get(&key) {
            return existing.clone();
        }

        constants.with_upgraded(|constants| {
            trace!("New constant prefactor {value:?}");
            constants.entry(key).or_insert_with(|| constant(value)).clone()
        })
    }

    /// Integer constant.
    pub fn integer(&self, value: u32) -> ExprRef {
        self.real(f64::from(value))
    }
}
