//! Basis function sets: the angular-momentum building blocks of integral labels.
//!
//! A set carries one non-negative quantum number per Cartesian axis. Two flavours exist:
//! - [`CartesianShell`] is *elementary*: a whole shell is handled as a unit, all axes report
//!   the same angular momentum and derivations only walk a single axis.
//! - [`CartesianFunction`] is *composite*: an individual Cartesian function with independent
//!   exponents on x, y and z.
use std::fmt::Debug;
use std::hash::Hash;

use strum::{EnumIs, EnumIter, FromRepr};
use thiserror::Error;

mod function;
mod shell;

pub use function::CartesianFunction;
pub use shell::CartesianShell;

/// Spectroscopic letters for angular momenta 0 through 19.
const AM_LETTERS: &[u8] = b"spdfghikmnoqrtuvwxyz";

/// Letter used for angular momentum `am` in labels (`s`, `p`, `d`, ...).
///
/// Past the tabulated letters the label becomes `l{am}`.
pub fn am_label(am: u32) -> String {
    match AM_LETTERS.get(am as usize) {
        Some(&letter) => char::from(letter).to_string(),
        None => format!("l{am}"),
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn symbol(self) -> char {
        match self {
            Axis::X => 'x',
            Axis::Y => 'y',
            Axis::Z => 'z',
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Side of the operator a function sits on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIs, EnumIter, FromRepr,
)]
#[repr(u8)]
pub enum FunctionPosition {
    Bra = 0,
    Ket = 1,
}

impl FunctionPosition {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn opposite(self) -> Self {
        match self {
            FunctionPosition::Bra => FunctionPosition::Ket,
            FunctionPosition::Ket => FunctionPosition::Bra,
        }
    }
}

impl std::fmt::Display for FunctionPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionPosition::Bra => write!(f, "bra"),
            FunctionPosition::Ket => write!(f, "ket"),
        }
    }
}

/// Lowering a quantum number that is already zero.
///
/// This is an expected outcome during derivations and callers usually branch on it rather
/// than propagate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot lower the quantum number along {axis}: it is already zero.")]
pub struct BoundaryError {
    pub axis: Axis,
}

/// Common interface of basis function sets.
///
/// Sets are small immutable values; shifted copies are produced by [`decrement`] and
/// [`increment`]. The in-place variants are conveniences over those.
///
/// [`decrement`]: BasisFunctionSet::decrement
/// [`increment`]: BasisFunctionSet::increment
pub trait BasisFunctionSet:
    Debug + Clone + PartialEq + Eq + Hash + Send + Sync + 'static
{
    /// Whether the set is handled as a whole shell.
    const ELEMENTARY: bool;

    fn quantum_number(&self, axis: Axis) -> u32;

    /// Total angular momentum of the set.
    fn total_quantum_number(&self) -> u32;

    /// Copy lowered by one unit along `axis`.
    fn decrement(&self, axis: Axis) -> Result<Self, BoundaryError>;

    /// Copy raised by one unit along `axis`. Never fails.
    fn increment(&self, axis: Axis) -> Self;

    /// Short textual label used inside integral labels (`s`, `px`, `dxy`, ...).
    fn label(&self) -> String;

    /// Lower in place. On failure `self` is left untouched.
    fn dec(&mut self, axis: Axis) -> Result<(), BoundaryError> {
        *self = self.decrement(axis)?;
        Ok(())
    }

    fn inc(&mut self, axis: Axis) {
        *self = self.increment(axis);
    }

    /// Axes a derivation has to walk for this kind of set.
    fn axes() -> &'static [Axis] {
        if Self::ELEMENTARY {
            &[Axis::X]
        } else {
            &Axis::ALL
        }
    }
}
