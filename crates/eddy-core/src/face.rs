//! Face identifiers for staggered (MAC) grids.

use std::fmt;

/// One of the four faces of a grid cell.
///
/// `Left`/`Right` faces carry the horizontal velocity component,
/// `Top`/`Bottom` faces carry the vertical one. Row indices grow
/// downwards, so `Top` sits at `row - 0.5` and `Bottom` at `row + 0.5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Horizontal face shared with the cell above.
    Top,
    /// Vertical face shared with the cell to the right.
    Right,
    /// Horizontal face shared with the cell below.
    Bottom,
    /// Vertical face shared with the cell to the left.
    Left,
}

impl Side {
    /// All sides in `[top, right, bottom, left]` order.
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// The velocity component stored on this face.
    pub fn component(self) -> Component {
        match self {
            Self::Left | Self::Right => Component::U,
            Self::Top | Self::Bottom => Component::V,
        }
    }

    /// The face on the opposite side of the same cell.
    pub fn opposite(self) -> Side {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => write!(f, "top"),
            Self::Right => write!(f, "right"),
            Self::Bottom => write!(f, "bottom"),
            Self::Left => write!(f, "left"),
        }
    }
}

/// A velocity component of a 2D field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    /// Horizontal (x) component, stored on vertical faces.
    U,
    /// Vertical (y) component, stored on horizontal faces.
    V,
}

impl Component {
    /// The other component.
    pub fn other(self) -> Component {
        match self {
            Self::U => Self::V,
            Self::V => Self::U,
        }
    }

    /// The `(near, far)` faces of a cell that carry this component,
    /// ordered along the component's own axis.
    pub fn sides(self) -> (Side, Side) {
        match self {
            Self::U => (Side::Left, Side::Right),
            Self::V => (Side::Top, Side::Bottom),
        }
    }
}
