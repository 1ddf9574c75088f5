use serde::{Deserialize, Serialize};

/// A coordinate on the board.
///
/// Row 0 is the top edge and column 0 is the left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring position one step along `(d_row, d_col)`,
    /// or `None` if it would leave a board of the given size.
    #[must_use]
    pub fn offset(self, (d_row, d_col): (isize, isize), size: usize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < size && col < size).then_some(Self { row, col })
    }
}

/// Identity of a tile, unique within the board that created it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    derive_more::Display,
)]
#[display("#{_0}")]
pub struct TileId(pub u64);

/// A numbered game piece occupying one cell.
///
/// Tiles are owned by the board slot that holds them. When two tiles merge the
/// surviving tile records the absorbed value in its merge history and the
/// other tile is dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    value: u32,
    position: Position,
    previous_position: Option<Position>,
    merged_from: Vec<u32>,
    is_new: bool,
    was_merged: bool,
}

impl Tile {
    pub(crate) fn new(id: TileId, value: u32, position: Position) -> Self {
        debug_assert!(value > 0, "tile values are positive");
        Self {
            id,
            value,
            position,
            previous_position: None,
            merged_from: Vec::new(),
            is_new: true,
            was_merged: false,
        }
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Position held before the most recent move, if the tile has ever moved.
    #[must_use]
    pub fn previous_position(&self) -> Option<Position> {
        self.previous_position
    }

    /// Values absorbed into this tile, oldest first.
    #[must_use]
    pub fn merged_from(&self) -> &[u32] {
        &self.merged_from
    }

    /// Whether the tile was spawned since the last shift processed it.
    #[must_use]
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// Whether the tile absorbed another tile during the latest shift.
    #[must_use]
    pub fn was_merged(&self) -> bool {
        self.was_merged
    }

    pub(crate) fn clear_flags(&mut self) {
        self.is_new = false;
        self.was_merged = false;
    }

    pub(crate) fn move_to(&mut self, dest: Position) {
        self.previous_position = Some(self.position);
        self.position = dest;
    }

    pub(crate) fn absorb(&mut self, other: &Tile) {
        self.was_merged = true;
        self.value += other.value;
        self.merged_from.push(other.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_stays_on_board() {
        let pos = Position::new(0, 3);
        assert_eq!(pos.offset((1, 0), 4), Some(Position::new(1, 3)));
        assert_eq!(pos.offset((0, -1), 4), Some(Position::new(0, 2)));
        assert_eq!(pos.offset((-1, 0), 4), None);
        assert_eq!(pos.offset((0, 1), 4), None);
    }

    #[test]
    fn test_absorb_records_history() {
        let mut a = Tile::new(TileId(0), 4, Position::new(0, 0));
        let b = Tile::new(TileId(1), 4, Position::new(0, 1));
        a.absorb(&b);
        assert_eq!(a.value(), 8);
        assert_eq!(a.merged_from(), &[4]);
        assert!(a.was_merged());

        a.clear_flags();
        assert!(!a.was_merged());
        assert!(!a.is_new());
    }

    #[test]
    fn test_move_to_tracks_previous_position() {
        let mut tile = Tile::new(TileId(7), 2, Position::new(2, 2));
        assert_eq!(tile.previous_position(), None);
        tile.move_to(Position::new(2, 0));
        assert_eq!(tile.position(), Position::new(2, 0));
        assert_eq!(tile.previous_position(), Some(Position::new(2, 2)));
    }
}
