use std::fmt;

use rand::{Rng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::{
    BoardConfigError,
    core::{Direction, Position, Tile, TileId},
};

use super::BoardSeed;

/// Probability that a spawned tile is a 2 (otherwise it is a 4).
const SPAWN_TWO_PROBABILITY: f64 = 0.9;

/// Parameters a [`Board`] is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Width and height of the square grid.
    pub size: usize,
    /// Number of random tiles placed by [`Board::rebuild`].
    pub start_tiles: usize,
    /// Tile value that counts as a win and resets the board.
    pub win_value: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            size: 4,
            start_tiles: 2,
            win_value: 4096,
        }
    }
}

impl BoardConfig {
    /// Largest number of cells a board may have.
    pub const MAX_CELL_COUNT: usize = 1 << 16;

    /// Number of cells, saturating for sizes [`Self::validate`] rejects.
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.size.saturating_mul(self.size)
    }

    pub fn validate(&self) -> Result<(), BoardConfigError> {
        if self.size == 0 {
            return Err(BoardConfigError::InvalidSize);
        }
        match self.size.checked_mul(self.size) {
            Some(cells) if cells <= Self::MAX_CELL_COUNT => Ok(()),
            _ => Err(BoardConfigError::TooLarge { size: self.size }),
        }
    }
}

/// What a single [`Board::shift`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftReport {
    /// At least one tile slid or merged.
    pub moved: bool,
    /// Number of merges performed.
    pub merges: usize,
    /// Points added by the merges (before any win reset).
    pub score_gained: u32,
    /// A merge produced the win value and the board was reset.
    pub won: bool,
    /// Cell of the tile spawned after the move, if one was placed.
    pub spawned: Option<Position>,
}

/// A square sliding-tile board.
///
/// Cells are stored row-major in a flat vector; each slot exclusively owns the
/// tile placed in it. The board also owns the random source used for spawning
/// tiles and the counter that hands out tile identities, so boards never share
/// mutable state with each other.
///
/// # Example
///
/// ```
/// use tilevo_engine::{Board, BoardConfig, BoardSeed, Direction};
///
/// let mut values = [0; 16];
/// values[..4].copy_from_slice(&[2, 2, 4, 4]);
/// let seed = BoardSeed::from_bytes([0; 16]);
/// let mut board = Board::from_values(BoardConfig::default(), &values, seed).unwrap();
///
/// let report = board.shift(Direction::Left);
/// assert_eq!(report.score_gained, 12);
/// assert_eq!(&board.values()[..2], &[4, 8]);
/// ```
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    cells: Vec<Option<Tile>>,
    score: u32,
    game_over: bool,
    wins: usize,
    next_tile_id: u64,
    rng: Pcg32,
}

impl Board {
    /// Builds a board and places its starting tiles.
    pub fn new(config: BoardConfig, seed: BoardSeed) -> Result<Self, BoardConfigError> {
        let mut board = Self::empty(config, seed)?;
        board.rebuild();
        Ok(board)
    }

    /// Builds a board with explicit tile values in row-major order (0 = empty).
    ///
    /// No starting tiles are placed; `seed` only drives later spawns.
    pub fn from_values(
        config: BoardConfig,
        values: &[u32],
        seed: BoardSeed,
    ) -> Result<Self, BoardConfigError> {
        let mut board = Self::empty(config, seed)?;
        if values.len() != config.cell_count() {
            return Err(BoardConfigError::CellCountMismatch {
                expected: config.cell_count(),
                actual: values.len(),
            });
        }
        for (i, &value) in values.iter().enumerate() {
            if value == 0 {
                continue;
            }
            if value < 2 || !value.is_power_of_two() {
                return Err(BoardConfigError::InvalidTileValue { value });
            }
            let pos = Position::new(i / config.size, i % config.size);
            let id = board.next_tile_id();
            board.cells[i] = Some(Tile::new(id, value, pos));
        }
        Ok(board)
    }

    fn empty(config: BoardConfig, seed: BoardSeed) -> Result<Self, BoardConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            cells: vec![None; config.cell_count()],
            score: 0,
            game_over: false,
            wins: 0,
            next_tile_id: 0,
            rng: seed.rng(),
        })
    }

    /// Reallocates an empty grid and places `start_tiles` random tiles.
    ///
    /// Score and game-over state are left alone; call [`Self::reset`] first
    /// to start a fresh game.
    pub fn rebuild(&mut self) {
        self.cells = vec![None; self.config.cell_count()];
        for _ in 0..self.config.start_tiles {
            self.place_random_tile();
        }
    }

    /// Clears every cell, the score and the game-over flag.
    ///
    /// Starting tiles are not placed again; see [`Self::rebuild`].
    pub fn reset(&mut self) {
        self.cells.fill(None);
        self.score = 0;
        self.game_over = false;
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.config.size
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Number of times a merge reached the win value on this board.
    #[must_use]
    pub fn wins(&self) -> usize {
        self.wins
    }

    #[must_use]
    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        if pos.row >= self.size() || pos.col >= self.size() {
            return None;
        }
        self.cells[self.index(pos)].as_ref()
    }

    /// Live tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    /// Cell values in row-major order, 0 for empty cells.
    #[must_use]
    pub fn values(&self) -> Vec<u32> {
        self.cells
            .iter()
            .map(|cell| cell.as_ref().map_or(0, Tile::value))
            .collect()
    }

    /// Largest tile value on the board, 0 if the board is empty.
    #[must_use]
    pub fn max_tile(&self) -> u32 {
        self.tiles().map(Tile::value).max().unwrap_or(0)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Empty positions in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| self.position(i))
            .collect()
    }

    /// Spawns a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
    ///
    /// Does nothing and returns `None` on a full board.
    pub fn place_random_tile(&mut self) -> Option<Position> {
        let empty = self.empty_cells();
        let &pos = empty.choose(&mut self.rng)?;
        let value = if self.rng.random_bool(SPAWN_TWO_PROBABILITY) {
            2
        } else {
            4
        };
        let id = self.next_tile_id();
        let index = self.index(pos);
        self.cells[index] = Some(Tile::new(id, value, pos));
        Some(pos)
    }

    /// Slides every tile toward the edge `direction` points at.
    ///
    /// Each line is compacted with two fingers: the scan finger walks the
    /// occupied cells starting at the destination edge, the write finger marks
    /// the slot the next tile lands in. A tile merges with the tile at the
    /// write finger when their values are equal, after which the write finger
    /// moves past the merged tile, so no tile merges twice in one shift.
    ///
    /// A merge that produces the win value resets the board, re-places the
    /// starting tiles and ends the shift. Otherwise a full board without equal
    /// neighbours becomes game over, and one tile spawns if anything moved.
    /// Shifting a board that is already game over does nothing.
    pub fn shift(&mut self, direction: Direction) -> ShiftReport {
        let mut report = ShiftReport::default();
        if self.game_over {
            return report;
        }

        let size = self.size();
        for line in 0..size {
            let mut write = 0;
            for scan in 0..size {
                let src = self.line_position(direction, line, scan);
                let src_index = self.index(src);
                let Some(value) = self.cells[src_index].as_mut().map(|tile| {
                    tile.clear_flags();
                    tile.value()
                }) else {
                    continue;
                };
                if write == scan {
                    continue;
                }

                let dest = self.line_position(direction, line, write);
                match self.value_at(dest) {
                    Some(dest_value) if dest_value == value => {
                        let merged = self.merge(src, dest);
                        report.moved = true;
                        report.merges += 1;
                        report.score_gained += merged;
                        write += 1;
                        if merged == self.config.win_value {
                            self.win();
                            report.won = true;
                            return report;
                        }
                    }
                    Some(_) => {
                        write += 1;
                        if write != scan {
                            let dest = self.line_position(direction, line, write);
                            self.move_tile(src, dest);
                            report.moved = true;
                        }
                    }
                    None => {
                        self.move_tile(src, dest);
                        report.moved = true;
                    }
                }
            }
        }

        if self.is_full() && !self.matches_remaining() {
            self.game_over = true;
        }
        if report.moved {
            report.spawned = self.place_random_tile();
        }
        report
    }

    /// Whether any two orthogonal neighbours hold equal values.
    ///
    /// Only every other cell (checkerboard) needs checking, since each
    /// adjacent pair contains exactly one cell of each colour.
    fn matches_remaining(&self) -> bool {
        let size = self.size();
        (0..size).any(|row| {
            (row % 2..size).step_by(2).any(|col| {
                let pos = Position::new(row, col);
                let value = self.value_at(pos);
                value.is_some()
                    && Direction::ALL.iter().any(|dir| {
                        pos.offset(dir.vector(), size)
                            .is_some_and(|neighbour| self.value_at(neighbour) == value)
                    })
            })
        })
    }

    fn win(&mut self) {
        tracing::info!(
            score = self.score,
            win_value = self.config.win_value,
            "win value reached, resetting board\n{}",
            self
        );
        self.wins += 1;
        self.reset();
        self.rebuild();
    }

    /// Merges the tile at `src` into the equal tile at `dest`, adds the new
    /// value to the score and returns it.
    fn merge(&mut self, src: Position, dest: Position) -> u32 {
        let (src_index, dest_index) = (self.index(src), self.index(dest));
        let absorbed = self.cells[src_index].take();
        let (Some(absorbed), Some(target)) = (absorbed, self.cells[dest_index].as_mut()) else {
            unreachable!("merge requires tiles at both {src:?} and {dest:?}");
        };
        target.absorb(&absorbed);
        let merged = target.value();
        self.score += merged;
        merged
    }

    fn move_tile(&mut self, src: Position, dest: Position) {
        let (src_index, dest_index) = (self.index(src), self.index(dest));
        debug_assert!(self.cells[dest_index].is_none());
        if let Some(mut tile) = self.cells[src_index].take() {
            tile.move_to(dest);
            self.cells[dest_index] = Some(tile);
        }
    }

    /// Cell `k` steps away from the destination edge on the given line.
    ///
    /// Lines are rows for horizontal shifts and columns for vertical ones.
    fn line_position(&self, direction: Direction, line: usize, k: usize) -> Position {
        let along = if direction.toward_far_index() {
            self.size() - 1 - k
        } else {
            k
        };
        if direction.is_horizontal() {
            Position::new(line, along)
        } else {
            Position::new(along, line)
        }
    }

    fn value_at(&self, pos: Position) -> Option<u32> {
        self.tile_at(pos).map(Tile::value)
    }

    fn next_tile_id(&mut self) -> TileId {
        let id = TileId(self.next_tile_id);
        self.next_tile_id += 1;
        id
    }

    fn index(&self, pos: Position) -> usize {
        pos.row * self.size() + pos.col
    }

    fn position(&self, index: usize) -> Position {
        Position::new(index / self.size(), index % self.size())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size()) {
            for cell in row {
                match cell {
                    Some(tile) => write!(f, "[ {:4} ]", tile.value())?,
                    None => write!(f, "[      ]")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: BoardSeed = BoardSeed::from_bytes([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    fn board(values: &[u32]) -> Board {
        Board::from_values(BoardConfig::default(), values, SEED).unwrap()
    }

    fn with_first_row(row: [u32; 4]) -> Board {
        let mut values = vec![0; 16];
        values[..4].copy_from_slice(&row);
        board(&values)
    }

    /// A full board with no equal neighbours anywhere.
    const STUCK: [u32; 16] = [2, 4, 2, 4, 4, 2, 4, 2, 2, 4, 2, 4, 4, 2, 4, 2];

    mod construction {
        use super::*;

        #[test]
        fn test_new_places_start_tiles() {
            let board = Board::new(BoardConfig::default(), SEED).unwrap();
            assert_eq!(board.tile_count(), 2);
            assert_eq!(board.score(), 0);
            assert!(!board.is_game_over());
            for tile in board.tiles() {
                assert!(matches!(tile.value(), 2 | 4));
                assert!(tile.is_new());
            }
        }

        #[test]
        fn test_zero_size_is_rejected() {
            let config = BoardConfig {
                size: 0,
                ..BoardConfig::default()
            };
            assert_eq!(
                Board::new(config, SEED).unwrap_err(),
                BoardConfigError::InvalidSize
            );
        }

        #[test]
        fn test_oversized_board_is_rejected() {
            for size in [257, 1 << 40, usize::MAX] {
                let config = BoardConfig {
                    size,
                    ..BoardConfig::default()
                };
                assert_eq!(config.validate(), Err(BoardConfigError::TooLarge { size }));
                assert_eq!(
                    Board::new(config, SEED).unwrap_err(),
                    BoardConfigError::TooLarge { size }
                );
            }
            let largest = BoardConfig {
                size: 256,
                ..BoardConfig::default()
            };
            assert!(largest.validate().is_ok());
        }

        #[test]
        fn test_from_values_validates_input() {
            let config = BoardConfig::default();
            assert_eq!(
                Board::from_values(config, &[2, 2], SEED).unwrap_err(),
                BoardConfigError::CellCountMismatch {
                    expected: 16,
                    actual: 2
                }
            );
            let mut values = [0; 16];
            values[5] = 3;
            assert_eq!(
                Board::from_values(config, &values, SEED).unwrap_err(),
                BoardConfigError::InvalidTileValue { value: 3 }
            );
        }

        #[test]
        fn test_same_seed_same_board() {
            let a = Board::new(BoardConfig::default(), SEED).unwrap();
            let b = Board::new(BoardConfig::default(), SEED).unwrap();
            assert_eq!(a.values(), b.values());
        }

        #[test]
        fn test_start_tiles_capped_by_capacity() {
            let config = BoardConfig {
                size: 2,
                start_tiles: 10,
                win_value: 2048,
            };
            let board = Board::new(config, SEED).unwrap();
            assert_eq!(board.tile_count(), 4);
            assert!(board.is_full());
        }

        #[test]
        fn test_config_deserializes_with_defaults() {
            let config: BoardConfig = serde_json::from_str(r#"{"size": 5}"#).unwrap();
            assert_eq!(config.size, 5);
            assert_eq!(config.start_tiles, 2);
            assert_eq!(config.win_value, 4096);
        }
    }

    mod lifecycle {
        use super::*;

        #[test]
        fn test_reset_clears_state_without_repopulating() {
            let mut board = with_first_row([2, 2, 0, 0]);
            board.shift(Direction::Left);
            assert!(board.score() > 0);

            board.reset();
            assert_eq!(board.tile_count(), 0);
            assert_eq!(board.score(), 0);
            assert!(!board.is_game_over());

            board.rebuild();
            assert_eq!(board.tile_count(), 2);
        }

        #[test]
        fn test_empty_cells_row_major() {
            let mut values = [2; 16];
            values[1] = 0;
            values[4] = 0;
            values[15] = 0;
            let board = board(&values);
            assert_eq!(
                board.empty_cells(),
                vec![
                    Position::new(0, 1),
                    Position::new(1, 0),
                    Position::new(3, 3)
                ]
            );
        }

        #[test]
        fn test_tile_at_out_of_range() {
            let board = board(&[2; 16]);
            assert!(board.tile_at(Position::new(3, 3)).is_some());
            assert!(board.tile_at(Position::new(0, 4)).is_none());
            assert!(board.tile_at(Position::new(4, 0)).is_none());
        }

        #[test]
        fn test_place_random_tile_on_full_board_is_noop() {
            let mut board = board(&STUCK);
            assert_eq!(board.place_random_tile(), None);
            assert_eq!(board.values(), STUCK);
        }

        #[test]
        fn test_spawned_values_are_two_or_four() {
            let mut board = board(&[0; 16]);
            let mut seen = Vec::new();
            while let Some(pos) = board.place_random_tile() {
                seen.push(board.tile_at(pos).unwrap().value());
            }
            assert_eq!(seen.len(), 16);
            assert!(seen.iter().all(|v| matches!(v, 2 | 4)));
        }

        #[test]
        fn test_tile_ids_are_unique() {
            let mut board = board(&[0; 16]);
            while board.place_random_tile().is_some() {}
            let mut ids = board.tiles().map(Tile::id).collect::<Vec<_>>();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 16);
        }

        #[test]
        fn test_display_renders_rows() {
            let board = with_first_row([2, 0, 0, 2048]);
            let rendered = board.to_string();
            let first = rendered.lines().next().unwrap();
            assert_eq!(first, "[    2 ][      ][      ][ 2048 ]");
            assert_eq!(rendered.lines().count(), 4);
        }
    }

    mod shift {
        use super::*;

        #[test]
        fn test_pair_merges_left() {
            let mut board = with_first_row([2, 2, 0, 0]);
            let report = board.shift(Direction::Left);

            assert_eq!(board.values()[0], 4);
            assert_eq!(board.score(), 4);
            assert_eq!(report.merges, 1);
            assert_eq!(report.score_gained, 4);
            assert!(report.moved);

            let spawned = report.spawned.unwrap();
            assert_ne!(spawned, Position::new(0, 0));
            assert!(board.tile_at(spawned).unwrap().is_new());
            assert_eq!(board.tile_count(), 2);
        }

        #[test]
        fn test_two_pairs_merge_once_each() {
            let mut board = with_first_row([2, 2, 4, 4]);
            let report = board.shift(Direction::Left);

            assert_eq!(&board.values()[..2], &[4, 8]);
            assert_eq!(board.score(), 12);
            assert_eq!(report.merges, 2);
            assert_eq!(board.tile_count(), 3);
        }

        #[test]
        fn test_four_equal_tiles_merge_pairwise() {
            let mut board = with_first_row([2, 2, 2, 2]);
            board.shift(Direction::Left);
            assert_eq!(&board.values()[..2], &[4, 4]);
            assert_eq!(board.score(), 8);
        }

        #[test]
        fn test_merged_tile_does_not_merge_again() {
            let mut board = with_first_row([4, 2, 2, 0]);
            board.shift(Direction::Left);
            assert_eq!(&board.values()[..2], &[4, 4]);
            assert_eq!(board.score(), 4);
        }

        #[test]
        fn test_shift_right_merges_from_the_right_edge() {
            let mut board = with_first_row([2, 2, 2, 0]);
            board.shift(Direction::Right);
            assert_eq!(&board.values()[2..4], &[2, 4]);
            assert_eq!(board.score(), 4);
        }

        #[test]
        fn test_shift_up_compacts_column() {
            let mut values = [0; 16];
            values[4] = 2;
            values[12] = 2;
            let mut board = board(&values);
            board.shift(Direction::Up);
            assert_eq!(board.values()[0], 4);
            assert_eq!(board.score(), 4);
        }

        #[test]
        fn test_shift_down_slides_past_different_values() {
            let mut values = [0; 16];
            values[0] = 4;
            values[4] = 4;
            values[8] = 8;
            let mut board = board(&values);
            board.shift(Direction::Down);
            let values = board.values();
            assert_eq!(values[8], 8);
            assert_eq!(values[12], 8);
            assert_eq!(board.score(), 8);
        }

        #[test]
        fn test_merge_records_history_and_flags() {
            let mut board = with_first_row([2, 2, 0, 0]);
            board.shift(Direction::Left);
            let merged = board.tile_at(Position::new(0, 0)).unwrap();
            assert_eq!(merged.merged_from(), &[2]);
            assert!(merged.was_merged());
            assert!(!merged.is_new());
        }

        #[test]
        fn test_moved_tile_remembers_previous_position() {
            let mut board = with_first_row([0, 0, 0, 8]);
            board.shift(Direction::Left);
            let tile = board.tile_at(Position::new(0, 0)).unwrap();
            assert_eq!(tile.previous_position(), Some(Position::new(0, 3)));
        }

        #[test]
        fn test_blocked_shift_changes_nothing() {
            let mut board = with_first_row([2, 4, 8, 16]);
            let before = board.values();
            let report = board.shift(Direction::Left);
            assert_eq!(report, ShiftReport::default());
            assert_eq!(board.values(), before);
            assert!(!board.is_game_over());

            let report = board.shift(Direction::Up);
            assert_eq!(report.spawned, None);
            assert_eq!(board.values(), before);
        }

        #[test]
        fn test_stuck_board_becomes_game_over_unchanged() {
            for dir in Direction::ALL {
                let mut board = board(&STUCK);
                let report = board.shift(dir);
                assert!(board.is_game_over(), "{dir} should end the game");
                assert_eq!(board.values(), STUCK);
                assert_eq!(board.score(), 0);
                assert!(!report.moved);
            }
        }

        #[test]
        fn test_full_board_with_vertical_pair_is_not_game_over() {
            let values = [
                2, 4, 8, 16, //
                2, 8, 16, 32, //
                4, 16, 32, 64, //
                8, 32, 64, 128,
            ];
            let mut board = board(&values);
            let report = board.shift(Direction::Left);
            assert!(!report.moved);
            assert!(!board.is_game_over());
            assert_eq!(board.values(), values);
        }

        #[test]
        fn test_game_over_board_ignores_shifts() {
            let mut board = board(&STUCK);
            board.shift(Direction::Left);
            assert!(board.is_game_over());
            assert_eq!(board.shift(Direction::Right), ShiftReport::default());
            assert_eq!(board.values(), STUCK);
        }

        #[test]
        fn test_win_resets_board() {
            let config = BoardConfig {
                win_value: 8,
                ..BoardConfig::default()
            };
            let mut values = [0; 16];
            values[0] = 4;
            values[1] = 4;
            values[15] = 2;
            let mut board = Board::from_values(config, &values, SEED).unwrap();
            let report = board.shift(Direction::Left);

            assert!(report.won);
            assert_eq!(report.score_gained, 8);
            assert_eq!(board.score(), 0);
            assert_eq!(board.tile_count(), config.start_tiles);
            assert_eq!(board.wins(), 1);
            assert!(board.max_tile() <= 4);
        }

        #[test]
        fn test_single_cell_board() {
            let config = BoardConfig {
                size: 1,
                start_tiles: 1,
                win_value: 2048,
            };
            let mut board = Board::new(config, SEED).unwrap();
            board.shift(Direction::Up);
            assert!(board.is_game_over());
        }

        #[test]
        fn test_random_play_keeps_tile_accounting() {
            let mut board = Board::new(BoardConfig::default(), SEED).unwrap();
            for turn in 0..500 {
                if board.is_game_over() {
                    break;
                }
                let before_count = board.tile_count();
                let before_score = board.score();
                let before_values = board.values();
                let report = board.shift(Direction::ALL[turn % Direction::LEN]);
                if report.won {
                    continue;
                }
                assert_eq!(board.score(), before_score + report.score_gained);
                if report.moved {
                    assert!(report.spawned.is_some());
                    assert_eq!(board.tile_count(), before_count - report.merges + 1);
                } else {
                    assert_eq!(board.values(), before_values);
                    assert_eq!(report.spawned, None);
                }
            }
        }
    }
}
