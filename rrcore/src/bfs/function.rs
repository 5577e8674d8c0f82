use crate::bfs::{Axis, BasisFunctionSet, BoundaryError, am_label};

/// A single Cartesian Gaussian `x^nx y^ny z^nz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CartesianFunction {
    exponents: [u32; 3],
}

impl CartesianFunction {
    pub fn new(nx: u32, ny: u32, nz: u32) -> Self {
        Self {
            exponents: [nx, ny, nz],
        }
    }

    pub fn from_exponents(exponents: [u32; 3]) -> Self {
        Self { exponents }
    }

    #[inline]
    pub fn exponents(&self) -> [u32; 3] {
        self.exponents
    }

    /// All Cartesian functions of total angular momentum `am`, in canonical order
    /// (x-exponent descending, then y-exponent descending).
    pub fn shell(am: u32) -> impl Iterator<Item = Self> {
        (0..=am)
            .rev()
            .flat_map(move |nx| (0..=am - nx).rev().map(move |ny| Self::new(nx, ny, am - nx - ny)))
    }
}

impl BasisFunctionSet for CartesianFunction {
    const ELEMENTARY: bool = false;

    fn quantum_number(&self, axis: Axis) -> u32 {
        self.exponents[axis.index()]
    }

    fn total_quantum_number(&self) -> u32 {
        self.exponents.iter().sum()
    }

    fn decrement(&self, axis: Axis) -> Result<Self, BoundaryError> {
        let mut exponents = self.exponents;
        let n = &mut exponents[axis.index()];
        *n = n.checked_sub(1).ok_or(BoundaryError { axis })?;
        Ok(Self { exponents })
    }

    fn increment(&self, axis: Axis) -> Self {
        let mut exponents = self.exponents;
        exponents[axis.index()] += 1;
        Self { exponents }
    }

    /// Shell letter followed by each non-zero axis, with its exponent when above one
    /// (`s`, `px`, `dxy`, `dz2`, `fx2y`).
    fn label(&self) -> String {
        let mut label = am_label(self.total_quantum_number());
        for axis in Axis::ALL {
            match self.quantum_number(axis) {
                0 => {}
                1 => label.push(axis.symbol()),
                n => {
                    label.push(axis.symbol());
                    label.push_str(&n.to_string());
                }
            }
        }
        label
    }
}

impl std::fmt::Display for CartesianFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
