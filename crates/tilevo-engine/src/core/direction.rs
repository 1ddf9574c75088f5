use crate::InvalidDirectionError;

/// A shift direction.
///
/// The network's output node `i` maps to [`Direction::ALL`]`[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, derive_more::IsVariant)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const LEN: usize = 4;
    pub const ALL: [Self; Self::LEN] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Unit vector `(d_row, d_col)` pointing toward the edge tiles slide to.
    #[must_use]
    pub const fn vector(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Output index of this direction.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub(crate) const fn is_horizontal(self) -> bool {
        let (d_row, _) = self.vector();
        d_row == 0
    }

    /// Whether tiles slide toward the higher-index edge (right or bottom).
    #[must_use]
    pub(crate) const fn toward_far_index(self) -> bool {
        let (d_row, d_col) = self.vector();
        d_row > 0 || d_col > 0
    }
}

impl TryFrom<usize> for Direction {
    type Error = InvalidDirectionError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(InvalidDirectionError { index })
    }
}
