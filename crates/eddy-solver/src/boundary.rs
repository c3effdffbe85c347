//! Boundary conditions for Laplacian assembly.

use std::fmt;
use std::str::FromStr;

use eddy_core::ParseVariantError;

/// How the 5-point stencil treats neighbours that fall outside the grid.
///
/// # Examples
///
/// ```
/// use eddy_solver::BoundaryCondition;
///
/// let bc: BoundaryCondition = "isolated".parse().unwrap();
/// assert_eq!(bc, BoundaryCondition::Neumann);
/// assert!("reflective".parse::<BoundaryCondition>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryCondition {
    /// Zero flux: a missing neighbour mirrors the cell itself, so the
    /// diagonal gains `+1` per missing neighbour. Rows sum to zero.
    Neumann,
    /// Zero value outside the grid: missing neighbours are dropped.
    Dirichlet,
    /// Periodic: neighbours wrap to the opposite edge. Rows sum to zero.
    Periodic,
}

impl BoundaryCondition {
    /// Whether every row of the assembled Laplacian sums to zero, making
    /// constants a null vector of the matrix.
    pub fn has_zero_row_sums(self) -> bool {
        match self {
            Self::Neumann | Self::Periodic => true,
            Self::Dirichlet => false,
        }
    }
}

impl FromStr for BoundaryCondition {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neumann" | "isolated" => Ok(Self::Neumann),
            "dirichlet" | "unisolated" => Ok(Self::Dirichlet),
            "periodic" | "wrap_around" => Ok(Self::Periodic),
            _ => Err(ParseVariantError {
                kind: "boundary condition",
                name: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Neumann => write!(f, "neumann"),
            Self::Dirichlet => write!(f, "dirichlet"),
            Self::Periodic => write!(f, "periodic"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_and_legacy_names() {
        assert_eq!("neumann".parse(), Ok(BoundaryCondition::Neumann));
        assert_eq!("Isolated".parse(), Ok(BoundaryCondition::Neumann));
        assert_eq!("dirichlet".parse(), Ok(BoundaryCondition::Dirichlet));
        assert_eq!("unisolated".parse(), Ok(BoundaryCondition::Dirichlet));
        assert_eq!(" periodic ".parse(), Ok(BoundaryCondition::Periodic));
        assert_eq!("wrap_around".parse(), Ok(BoundaryCondition::Periodic));
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "open".parse::<BoundaryCondition>().unwrap_err();
        assert_eq!(err.kind, "boundary condition");
        assert_eq!(err.name, "open");
    }

    #[test]
    fn display_round_trips() {
        for bc in [
            BoundaryCondition::Neumann,
            BoundaryCondition::Dirichlet,
            BoundaryCondition::Periodic,
        ] {
            assert_eq!(bc.to_string().parse(), Ok(bc));
        }
    }
}
