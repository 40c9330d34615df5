use super::{piece::Cell, shape::ShapeKind};

const WIDTH: usize = 10;
const VISIBLE_HEIGHT: usize = 20;
// Hidden headroom rows above the visible area; pieces spawn here so they can
// enter the visible grid from above.
const HIDDEN_ROWS: usize = 2;
const TOTAL_HEIGHT: usize = VISIBLE_HEIGHT + HIDDEN_ROWS;

pub(super) const SPAWN_X: i16 = 4;
pub(super) const SPAWN_Y: i16 = 1;

/// One stored row of cells. `None` is empty; `Some(kind)` is a settled cell
/// tagged with the kind that placed it, for the renderer's color lookup.
pub type Row = [Option<ShapeKind>; WIDTH];

/// The playing matrix: 10×20 visible cells plus two hidden spawn rows above.
///
/// The grid never holds a live piece's cells; those exist only in the
/// [`Piece`](super::piece::Piece) value until lock time. All collision
/// decisions — movement, rotation, spawn, gravity — go through [`Grid::fits`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [Row; TOTAL_HEIGHT],
}

impl Grid {
    /// Width of the playing grid in cells.
    pub const WIDTH: usize = WIDTH;
    /// Height of the visible playing grid in cells.
    pub const VISIBLE_HEIGHT: usize = VISIBLE_HEIGHT;
    /// Hidden spawn rows stored above the visible area.
    pub const HIDDEN_ROWS: usize = HIDDEN_ROWS;
    /// Total stored rows, hidden headroom included.
    pub const TOTAL_HEIGHT: usize = TOTAL_HEIGHT;

    /// An entirely empty grid.
    pub const EMPTY: Self = Self {
        rows: [[None; WIDTH]; TOTAL_HEIGHT],
    };

    /// Returns a visible row by index, `0` being the topmost visible row.
    #[must_use]
    pub fn visible_row(&self, y: usize) -> &Row {
        &self.rows[y + HIDDEN_ROWS]
    }

    /// Returns an iterator over the visible rows, top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows[HIDDEN_ROWS..].iter()
    }

    /// Checks that every cell is within bounds and unoccupied.
    ///
    /// This is the single source of truth for all collision decisions.
    #[must_use]
    pub fn fits(&self, cells: [Cell; 4]) -> bool {
        cells.into_iter().all(|(x, y)| {
            (0..WIDTH as i16).contains(&x)
                && (0..TOTAL_HEIGHT as i16).contains(&y)
                && self.rows[y as usize][x as usize].is_none()
        })
    }

    /// Marks the cells settled, tagged with `kind`.
    ///
    /// The board only locks cells it has just verified with [`Grid::fits`];
    /// a failing fit here is a defect in the caller, not a runtime condition.
    pub fn lock(&mut self, cells: [Cell; 4], kind: ShapeKind) {
        debug_assert!(self.fits(cells), "lock must follow a successful fit check");
        for (x, y) in cells {
            self.rows[y as usize][x as usize] = Some(kind);
        }
    }

    /// Removes every completed row and returns how many were removed.
    ///
    /// All completed rows are removed in one pass: scanning bottom to top,
    /// each surviving row drops by the number of completed rows below it, so
    /// survivors keep their relative order even when non-adjacent rows
    /// complete in the same lock event. The freed rows reappear empty at the
    /// top.
    pub fn clear_completed_rows(&mut self) -> usize {
        let mut count = 0;
        for y in (0..TOTAL_HEIGHT).rev() {
            if self.rows[y].iter().all(Option::is_some) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill([None; WIDTH]);
        count
    }

    /// Creates a `Grid` from ASCII art for testing.
    ///
    /// `.` is empty; a kind letter (`I O T S Z J L`) is a settled cell of
    /// that kind; `#` is a settled cell with an arbitrary tag. Each row must
    /// have exactly 10 cells, and the last art row lands on the bottom grid
    /// row (art is bottom-aligned, the natural reading for stack fixtures).
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= VISIBLE_HEIGHT,
            "fixture must fit the visible grid, got {} rows",
            lines.len()
        );

        let mut grid = Self::EMPTY;
        let top = TOTAL_HEIGHT - lines.len();
        for (dy, line) in lines.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            assert_eq!(
                cells.len(),
                WIDTH,
                "each fixture row must have exactly {WIDTH} cells, got {} at row {dy}",
                cells.len(),
            );
            for (x, &c) in cells.iter().enumerate() {
                grid.rows[top + dy][x] = match c {
                    '.' => None,
                    '#' => Some(ShapeKind::I),
                    _ => Some(
                        ShapeKind::from_char(c)
                            .unwrap_or_else(|| panic!("unknown fixture cell {c:?}")),
                    ),
                };
            }
        }
        grid
    }
}
