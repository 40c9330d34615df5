use super::{
    grid::{SPAWN_X, SPAWN_Y},
    shape::ShapeKind,
};

/// Absolute grid coordinate of a single cell, `(x, y)`.
///
/// X grows rightward, Y grows downward; `(0, 0)` is the top-left corner of
/// the stored grid, inside the hidden spawn rows.
pub type Cell = (i16, i16);

/// Rotation state of a piece.
///
/// One of four states, a quarter turn apart:
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise (90° counterclockwise)
///
/// Rotation operations wrap around modulo 4.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rotation(u8);

impl Rotation {
    #[must_use]
    pub fn rotated_cw(self) -> Self {
        Rotation((self.0 + 1) % 4)
    }

    #[must_use]
    pub fn rotated_ccw(self) -> Self {
        Rotation((self.0 + 3) % 4)
    }

    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Direction of a rotation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    /// Quarter turn clockwise.
    Cw,
    /// Quarter turn counterclockwise.
    Ccw,
}

/// A live tetromino: kind, rotation state, and anchor position.
///
/// Pieces are immutable values; movement and rotation return new `Piece`
/// instances, which the board validates against the grid before adopting.
/// The four occupied cells are derived on demand from the shape catalog,
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    kind: ShapeKind,
    rotation: Rotation,
    anchor: Cell,
}

impl Piece {
    /// Creates a piece of the given kind at the fixed top-center spawn
    /// anchor, in spawn orientation.
    ///
    /// The spawn cells lie within the grid's hidden headroom rows.
    #[must_use]
    pub fn spawn(kind: ShapeKind) -> Self {
        Self {
            kind,
            rotation: Rotation::default(),
            anchor: (SPAWN_X, SPAWN_Y),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    /// Returns the four absolute cells the piece occupies.
    #[must_use]
    pub fn cells(&self) -> [Cell; 4] {
        let (x, y) = self.anchor;
        self.kind
            .offsets(self.rotation)
            .map(|(dx, dy)| (x + dx, y + dy))
    }

    /// Returns the piece moved by `(dx, dy)`. Does not touch the grid;
    /// callers validate the candidate before adopting it.
    #[must_use]
    pub fn translated(&self, dx: i16, dy: i16) -> Self {
        Self {
            anchor: (self.anchor.0 + dx, self.anchor.1 + dy),
            ..*self
        }
    }

    /// Returns the piece turned a quarter turn in the given direction,
    /// anchor unchanged.
    ///
    /// There are no kick tables: if the rotated cells collide, the board
    /// discards the candidate and the piece keeps its prior orientation.
    #[must_use]
    pub fn rotated(&self, spin: Spin) -> Self {
        let rotation = match spin {
            Spin::Cw => self.rotation.rotated_cw(),
            Spin::Ccw => self.rotation.rotated_ccw(),
        };
        Self { rotation, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Grid;

    #[test]
    fn test_rotation_wraps_modulo_four() {
        let mut rotation = Rotation::default();
        for _ in 0..4 {
            rotation = rotation.rotated_cw();
        }
        assert_eq!(rotation, Rotation::default());

        let mut rotation = Rotation::default();
        for _ in 0..4 {
            rotation = rotation.rotated_ccw();
        }
        assert_eq!(rotation, Rotation::default());
    }

    #[test]
    fn test_cw_and_ccw_are_inverses() {
        let rotation = Rotation::default().rotated_cw();
        assert_eq!(rotation.rotated_ccw(), Rotation::default());
        assert_eq!(rotation.rotated_cw().rotated_ccw(), rotation);
    }

    #[test]
    fn test_spawn_cells_lie_in_hidden_rows() {
        for kind in ShapeKind::ALL {
            for (x, y) in Piece::spawn(kind).cells() {
                assert!((0..Grid::WIDTH as i16).contains(&x), "{kind:?} x={x}");
                assert!(
                    (0..Grid::HIDDEN_ROWS as i16).contains(&y),
                    "{kind:?} spawn cell y={y} should be hidden",
                );
            }
        }
    }

    #[test]
    fn test_translated_shifts_every_cell() {
        let piece = Piece::spawn(ShapeKind::T);
        let moved = piece.translated(2, 3);
        let expected: Vec<Cell> = piece.cells().iter().map(|&(x, y)| (x + 2, y + 3)).collect();
        assert_eq!(moved.cells().to_vec(), expected);
        // The original is untouched.
        assert_eq!(piece.anchor(), Piece::spawn(ShapeKind::T).anchor());
    }

    #[test]
    fn test_rotated_four_times_restores_cell_set() {
        for kind in ShapeKind::ALL {
            let piece = Piece::spawn(kind).translated(0, 5);
            let mut turned = piece;
            for _ in 0..4 {
                turned = turned.rotated(Spin::Cw);
            }
            assert_eq!(turned.cells(), piece.cells());
            assert_eq!(turned.rotation(), piece.rotation());
        }
    }

    #[test]
    fn test_rotated_keeps_anchor() {
        let piece = Piece::spawn(ShapeKind::J).translated(1, 7);
        assert_eq!(piece.rotated(Spin::Cw).anchor(), piece.anchor());
        assert_eq!(piece.rotated(Spin::Ccw).anchor(), piece.anchor());
    }
}
