use crate::bfs::{Axis, BasisFunctionSet, BoundaryError, am_label};

/// A full shell of Cartesian functions with angular momentum `am`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CartesianShell {
    am: u32,
}

impl CartesianShell {
    pub fn new(am: u32) -> Self {
        Self { am }
    }

    #[inline]
    pub fn am(&self) -> u32 {
        self.am
    }

    /// Number of Cartesian functions in the shell.
    pub fn size(&self) -> usize {
        let am = self.am as usize;
        (am + 1) * (am + 2) / 2
    }
}

impl BasisFunctionSet for CartesianShell {
    const ELEMENTARY: bool = true;

    fn quantum_number(&self, _axis: Axis) -> u32 {
        self.am
    }

    fn total_quantum_number(&self) -> u32 {
        self.am
    }

    fn decrement(&self, axis: Axis) -> Result<Self, BoundaryError> {
        match self.am.checked_sub(1) {
            Some(am) => Ok(Self { am }),
            None => Err(BoundaryError { axis }),
        }
    }

    fn increment(&self, _axis: Axis) -> Self {
        Self { am: self.am + 1 }
    }

    fn label(&self) -> String {
        am_label(self.am)
    }
}

impl std::fmt::Display for CartesianShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_sizes() {
        let sizes: Vec<usize> = (0..4).map(|am| CartesianShell::new(am).size()).collect();
        assert_eq!(sizes, vec![1, 3, 6, 10]);
    }
}
