use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::piece::Rotation;

/// Offset of a single cell relative to a piece's anchor, `(dx, dy)`.
///
/// X grows rightward, Y grows downward.
pub type CellOffset = (i16, i16);

/// One of the seven tetromino kinds.
///
/// A kind carries no state beyond its identity; its geometry lives in the
/// per-rotation offset table queried through [`ShapeKind::offsets`]. Settled
/// grid cells are tagged with the kind that placed them so the renderer can
/// look up a color per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[repr(u8)]
pub enum ShapeKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

impl Distribution<ShapeKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeKind {
        match rng.random_range(0..=6) {
            0 => ShapeKind::I,
            1 => ShapeKind::O,
            2 => ShapeKind::T,
            3 => ShapeKind::S,
            4 => ShapeKind::Z,
            5 => ShapeKind::J,
            _ => ShapeKind::L,
        }
    }
}

impl ShapeKind {
    /// Number of shape kinds (7).
    pub const LEN: usize = 7;

    /// All kinds in discriminant order.
    pub const ALL: [Self; Self::LEN] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Returns the four cell offsets of this kind in the given rotation state.
    ///
    /// Pure and total over all 7 × 4 combinations.
    #[must_use]
    pub fn offsets(self, rotation: Rotation) -> [CellOffset; 4] {
        OFFSET_TABLE[self as usize][rotation.index()]
    }

    /// Returns the single character representation of this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use quadris_engine::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_char(), 'I');
    /// assert_eq!(ShapeKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            ShapeKind::I => 'I',
            ShapeKind::O => 'O',
            ShapeKind::T => 'T',
            ShapeKind::S => 'S',
            ShapeKind::Z => 'Z',
            ShapeKind::J => 'J',
            ShapeKind::L => 'L',
        }
    }

    /// Parses a kind from its single character representation.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(ShapeKind::I),
            'O' => Some(ShapeKind::O),
            'T' => Some(ShapeKind::T),
            'S' => Some(ShapeKind::S),
            'Z' => Some(ShapeKind::Z),
            'J' => Some(ShapeKind::J),
            'L' => Some(ShapeKind::L),
            _ => None,
        }
    }
}

/// Generates all 4 rotation states of a shape by turning the base offsets a
/// quarter turn clockwise per step.
///
/// With Y growing downward a clockwise quarter turn maps `(dx, dy)` to
/// `(-dy, dx)`.
const fn quarter_turns(base: [CellOffset; 4]) -> [[CellOffset; 4]; 4] {
    let mut states = [base; 4];
    let mut i = 1;
    while i < 4 {
        let mut turned = [(0_i16, 0_i16); 4];
        let mut c = 0;
        while c < 4 {
            let (dx, dy) = states[i - 1][c];
            turned[c] = (-dy, dx);
            c += 1;
        }
        states[i] = turned;
        i += 1;
    }
    states
}

const OFFSET_TABLE: [[[CellOffset; 4]; 4]; ShapeKind::LEN] = [
    // I-piece
    quarter_turns([(-1, 0), (0, 0), (1, 0), (2, 0)]),
    // O-piece; its pivot sits between the four cells, so every state equals
    // the spawn state.
    [[(0, -1), (1, -1), (0, 0), (1, 0)]; 4],
    // T-piece
    quarter_turns([(0, -1), (-1, 0), (0, 0), (1, 0)]),
    // S-piece
    quarter_turns([(0, -1), (1, -1), (-1, 0), (0, 0)]),
    // Z-piece
    quarter_turns([(-1, -1), (0, -1), (0, 0), (1, 0)]),
    // J-piece
    quarter_turns([(-1, -1), (-1, 0), (0, 0), (1, 0)]),
    // L-piece
    quarter_turns([(1, -1), (-1, 0), (0, 0), (1, 0)]),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn all_rotations() -> [Rotation; 4] {
        let r0 = Rotation::default();
        let r1 = r0.rotated_cw();
        let r2 = r1.rotated_cw();
        let r3 = r2.rotated_cw();
        [r0, r1, r2, r3]
    }

    #[test]
    fn test_every_state_has_four_distinct_cells() {
        for kind in ShapeKind::ALL {
            for rotation in all_rotations() {
                let offsets = kind.offsets(rotation);
                for i in 0..4 {
                    for j in (i + 1)..4 {
                        assert_ne!(
                            offsets[i], offsets[j],
                            "{kind:?} {rotation:?} has duplicate cell offsets",
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_four_quarter_turns_restore_base_offsets() {
        for kind in ShapeKind::ALL {
            let base = kind.offsets(Rotation::default());
            let full_turn = Rotation::default()
                .rotated_cw()
                .rotated_cw()
                .rotated_cw()
                .rotated_cw();
            assert_eq!(kind.offsets(full_turn), base);
        }
    }

    #[test]
    fn test_square_kind_is_rotation_invariant() {
        let base = ShapeKind::O.offsets(Rotation::default());
        for rotation in all_rotations() {
            assert_eq!(ShapeKind::O.offsets(rotation), base);
        }
    }

    #[test]
    fn test_non_square_kinds_change_under_rotation() {
        for kind in ShapeKind::ALL {
            if kind == ShapeKind::O {
                continue;
            }
            let base = kind.offsets(Rotation::default());
            let turned = kind.offsets(Rotation::default().rotated_cw());
            assert_ne!(base, turned, "{kind:?} should not be rotation invariant");
        }
    }

    #[test]
    fn test_char_conversion_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(ShapeKind::from_char('X'), None);
        assert_eq!(ShapeKind::from_char('i'), None);
    }

    #[test]
    fn test_kind_serialization() {
        let serialized = serde_json::to_string(&ShapeKind::S).unwrap();
        assert_eq!(serialized, "\"S\"");
        let deserialized: ShapeKind = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, ShapeKind::S);
    }
}
