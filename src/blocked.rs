use crate::{Board, Cell, GridError, Vec2};

/// Impassable cells of a board, one bit per cell in row-major order.
///
/// Equality and hashing go by bit content, so two sets built independently compare equal as
/// soon as they block the same cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockedSet {
    height: u8,
    width: u8,
    words: Box<[u64]>,
}

impl BlockedSet {
    pub fn new(height: u8, width: u8) -> Self {
        let bits = height as usize * width as usize;
        Self {
            height,
            width,
            words: vec![0; (bits + 63) / 64].into(),
        }
    }

    /// The walls of a freshly loaded board. Goal and start cells are open.
    pub fn from_board(board: &Board) -> Self {
        let mut set = Self::new(board.height(), board.width());
        for (pos, cell) in board.cells() {
            if cell == Cell::Blocked {
                set.insert(pos);
            }
        }
        set
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    pub fn is_blocked(&self, pos: Vec2) -> Result<bool, GridError> {
        self.check(pos)?;
        Ok(self.contains(pos))
    }

    pub fn set_blocked(&mut self, pos: Vec2) -> Result<(), GridError> {
        self.check(pos)?;
        self.insert(pos);
        Ok(())
    }

    pub fn clear_blocked(&mut self, pos: Vec2) -> Result<(), GridError> {
        self.check(pos)?;
        let idx = self.bit(pos);
        self.words[idx / 64] &= !(1 << (idx % 64));
        Ok(())
    }

    fn check(&self, pos: Vec2) -> Result<(), GridError> {
        if pos.0 < self.height() && pos.1 < self.width() {
            Ok(())
        } else {
            Err(GridError::OutOfBounds(pos))
        }
    }

    fn bit(&self, pos: Vec2) -> usize {
        pos.0 as usize * self.width as usize + pos.1 as usize
    }

    // Unchecked. Callers keep `pos` on the board.
    pub(crate) fn contains(&self, pos: Vec2) -> bool {
        let idx = self.bit(pos);
        (self.words[idx / 64] >> (idx % 64)) & 1 != 0
    }

    pub(crate) fn insert(&mut self, pos: Vec2) {
        let idx = self.bit(pos);
        self.words[idx / 64] |= 1 << (idx % 64);
    }
}
