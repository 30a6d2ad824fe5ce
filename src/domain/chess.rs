//! Pure chess domain types and utilities.
//! No GPUI dependencies - this is the domain layer.

use std::fmt;

use shakmaty::{Color as SColor, File, Rank, Role, Square};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Glyph drawn for this kind. Both sides share the filled glyphs and are
    /// told apart by text colour.
    pub fn symbol(self) -> &'static str {
        match self {
            PieceKind::Rook => "♜",
            PieceKind::Knight => "♞",
            PieceKind::Bishop => "♝",
            PieceKind::Queen => "♛",
            PieceKind::King => "♚",
            PieceKind::Pawn => "♟",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum PieceColor {
    White,
    Black,
}

impl PieceColor {
    /// Side to move for a given move counter (even = White).
    pub fn from_move_count(count: u32) -> Self {
        if count % 2 == 0 {
            PieceColor::White
        } else {
            PieceColor::Black
        }
    }

    /// Logical row a pawn of this colour promotes on
    pub fn promotion_row(self) -> u8 {
        match self {
            PieceColor::White => 7,
            PieceColor::Black => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: PieceColor,
}

impl Piece {
    pub fn new(kind: PieceKind, color: PieceColor) -> Self {
        Self { kind, color }
    }

    pub fn symbol(&self) -> &'static str {
        self.kind.symbol()
    }
}

/// A square in the engine's fixed addressing: column 0 = file A, row 0 = rank 1.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct LogicalSquare {
    col: u8,
    row: u8,
}

impl LogicalSquare {
    pub fn new(col: u8, row: u8) -> Option<Self> {
        (col < 8 && row < 8).then_some(Self { col, row })
    }

    pub(crate) fn masked(col: u8, row: u8) -> Self {
        Self {
            col: col & 7,
            row: row & 7,
        }
    }

    pub fn col(self) -> u8 {
        self.col
    }

    pub fn row(self) -> u8 {
        self.row
    }

    /// Parse algebraic notation such as `e4`
    pub fn from_algebraic(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank)
        {
            return None;
        }
        Self::new(file as u8 - b'a', rank as u8 - b'1')
    }

    /// All 64 squares, file-major within each rank starting at a1
    pub fn all() -> impl Iterator<Item = LogicalSquare> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| LogicalSquare { col, row }))
    }
}

impl fmt::Display for LogicalSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

/// A square in screen order: row 0 is the top row of the rendered grid.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct VisualSquare {
    row: u8,
    col: u8,
}

impl VisualSquare {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (row < 8 && col < 8).then_some(Self { row, col })
    }

    pub(crate) fn masked(row: u8, col: u8) -> Self {
        Self {
            row: row & 7,
            col: col & 7,
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }

    pub fn col(self) -> u8 {
        self.col
    }

    /// All 64 squares in reading order (top-left first)
    pub fn all() -> impl Iterator<Item = VisualSquare> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| VisualSquare { row, col }))
    }
}

/// Pieces a pawn may promote to
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum PromotionPiece {
    #[default]
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl PromotionPiece {
    pub const ALL: [PromotionPiece; 4] = [
        PromotionPiece::Queen,
        PromotionPiece::Rook,
        PromotionPiece::Bishop,
        PromotionPiece::Knight,
    ];

    pub fn kind(self) -> PieceKind {
        match self {
            PromotionPiece::Queen => PieceKind::Queen,
            PromotionPiece::Rook => PieceKind::Rook,
            PromotionPiece::Bishop => PieceKind::Bishop,
            PromotionPiece::Knight => PieceKind::Knight,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PromotionPiece::Queen => "Queen",
            PromotionPiece::Rook => "Rook",
            PromotionPiece::Bishop => "Bishop",
            PromotionPiece::Knight => "Knight",
        }
    }
}

/// Convert a logical square to a shakmaty Square
pub fn to_square(square: LogicalSquare) -> Square {
    Square::from_coords(File::new(square.col as u32), Rank::new(square.row as u32))
}

/// Convert a shakmaty Square to a logical square
pub fn from_square(sq: Square) -> LogicalSquare {
    LogicalSquare {
        col: sq.file().to_u32() as u8,
        row: sq.rank().to_u32() as u8,
    }
}

pub fn to_shakmaty_color(color: PieceColor) -> SColor {
    match color {
        PieceColor::White => SColor::White,
        PieceColor::Black => SColor::Black,
    }
}

pub fn from_shakmaty_color(color: SColor) -> PieceColor {
    match color {
        SColor::White => PieceColor::White,
        SColor::Black => PieceColor::Black,
    }
}

pub fn promotion_role(piece: PromotionPiece) -> Role {
    match piece {
        PromotionPiece::Queen => Role::Queen,
        PromotionPiece::Rook => Role::Rook,
        PromotionPiece::Bishop => Role::Bishop,
        PromotionPiece::Knight => Role::Knight,
    }
}

/// Convert shakmaty piece to our domain Piece
pub fn shakmaty_to_piece(piece: shakmaty::Piece) -> Piece {
    let kind = match piece.role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    };
    Piece {
        kind,
        color: from_shakmaty_color(piece.color),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algebraic_parsing() {
        let e2 = LogicalSquare::from_algebraic("e2").unwrap();
        assert_eq!((e2.col(), e2.row()), (4, 1));
        assert_eq!(e2.to_string(), "e2");
        assert!(LogicalSquare::from_algebraic("i1").is_none());
        assert!(LogicalSquare::from_algebraic("a9").is_none());
        assert!(LogicalSquare::from_algebraic("a10").is_none());
    }

    #[test]
    fn test_square_bounds() {
        assert!(LogicalSquare::new(8, 0).is_none());
        assert!(VisualSquare::new(0, 8).is_none());
        assert_eq!(LogicalSquare::all().count(), 64);
        assert_eq!(VisualSquare::all().count(), 64);
    }

    #[test]
    fn test_shakmaty_square_conversion() {
        for square in LogicalSquare::all() {
            assert_eq!(from_square(to_square(square)), square);
        }
        let a1 = LogicalSquare::new(0, 0).unwrap();
        assert_eq!(to_square(a1), Square::A1);
    }

    #[test]
    fn test_turn_parity() {
        assert_eq!(PieceColor::from_move_count(0), PieceColor::White);
        assert_eq!(PieceColor::from_move_count(7), PieceColor::Black);
    }

    #[test]
    fn test_every_kind_has_a_symbol() {
        let kinds = [
            PieceKind::Pawn,
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
        ];
        for kind in kinds {
            assert!(!kind.symbol().is_empty());
        }
        assert_eq!(PromotionPiece::default(), PromotionPiece::Queen);
    }
}
