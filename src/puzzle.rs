use rand::{seq::SliceRandom, thread_rng, Rng};
use std::fmt;

use crate::error::{PuzzleError, Result};

/// A requested slide, named after the direction the tile next to the empty cell
/// appears to travel. The empty cell itself moves the opposite way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Offset from the empty cell to the tile that slides into it, as (row, col).
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (1, 0),
            Direction::Left => (0, 1),
            Direction::Down => (-1, 0),
            Direction::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Right => "right",
        };
        write!(f, "{}", s)
    }
}

/// Cell coordinates, 0-indexed from the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// An N×N board holding the values 1..N²-1 once each plus a single 0 for the
/// empty cell.
///
/// The position of the empty cell is never stored; every query rescans the
/// board so there is only one source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    board: Vec<Vec<u32>>,
}

fn check_size(size: usize) -> Result<()> {
    if size < 2 {
        return Err(PuzzleError::config(format!(
            "grid size must be at least 2, got {size}"
        )));
    }
    let cells = size
        .checked_mul(size)
        .filter(|cells| u32::try_from(*cells).is_ok());
    if cells.is_none() {
        return Err(PuzzleError::config(format!("grid size {size} is too large")));
    }
    Ok(())
}

/// `[1, 2, ..., size²-1, 0]`
fn solved_sequence(size: usize) -> Vec<u32> {
    let last = (size * size) as u32;
    (1..last).chain(std::iter::once(0)).collect()
}

impl Grid {
    /// The canonical solved arrangement.
    pub fn solved(size: usize) -> Result<Self> {
        check_size(size)?;
        Ok(Self::from_sequence(size, solved_sequence(size)))
    }

    /// Shuffles the solved sequence with the thread-local RNG.
    ///
    /// The result is not filtered for solvability.
    pub fn new_shuffled(size: usize) -> Result<Self> {
        Self::new_shuffled_with(size, &mut thread_rng())
    }

    pub fn new_shuffled_with<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        check_size(size)?;
        let mut flattened = solved_sequence(size);
        flattened.shuffle(rng);
        Ok(Self::from_sequence(size, flattened))
    }

    /// Builds a grid from explicit rows, checking shape and contents.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self> {
        let size = rows.len();
        check_size(size)?;

        let mut seen = vec![false; size * size];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(PuzzleError::config(format!(
                    "row {i} has {} cells, expected {size}",
                    row.len()
                )));
            }
            for &value in row {
                match seen.get_mut(value as usize) {
                    Some(slot) if !*slot => *slot = true,
                    Some(_) => {
                        return Err(PuzzleError::config(format!("value {value} appears twice")))
                    }
                    None => {
                        return Err(PuzzleError::config(format!(
                            "value {value} is out of range for a {size}x{size} grid"
                        )))
                    }
                }
            }
        }

        Ok(Self { size, board: rows })
    }

    fn from_sequence(size: usize, flattened: Vec<u32>) -> Self {
        let board = flattened.chunks(size).map(<[u32]>::to_vec).collect();
        Self { size, board }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.board.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.board
    }

    fn flatten(&self) -> Vec<u32> {
        self.board.iter().flat_map(|row| row.iter().copied()).collect()
    }

    pub fn locate_empty(&self) -> Result<Position> {
        for (i, row) in self.board.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value == 0 {
                    return Ok(Position::new(i, j));
                }
            }
        }
        Err(PuzzleError::invariant(format!(
            "no empty cell in {}x{} grid",
            self.size, self.size
        )))
    }

    /// Slides the tile adjacent to the empty cell in `direction` into it.
    ///
    /// Returns `Ok(false)` without touching the board when that neighbour lies
    /// outside the grid.
    pub fn apply_move(&mut self, direction: Direction) -> Result<bool> {
        let empty = self.locate_empty()?;
        let (dr, dc) = direction.as_offset();

        let new_row = empty.row as isize + dr;
        let new_col = empty.col as isize + dc;

        if new_row >= 0
            && new_row < self.size as isize
            && new_col >= 0
            && new_col < self.size as isize
        {
            let new_row = new_row as usize;
            let new_col = new_col as usize;

            self.board[empty.row][empty.col] = self.board[new_row][new_col];
            self.board[new_row][new_col] = 0;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn is_solved(&self) -> bool {
        let last = (self.size * self.size) as u32;
        self.board
            .iter()
            .flatten()
            .copied()
            .eq((1..last).chain(std::iter::once(0)))
    }

    /// Parity test for whether the solved arrangement is reachable.
    ///
    /// Informational only: shuffles are never rejected on this basis.
    pub fn is_solvable(&self) -> Result<bool> {
        let empty = self.locate_empty()?;
        let inversions = count_inversions(&self.flatten());

        if self.size % 2 == 1 {
            // Odd width: solvable if inversions count is even
            Ok(inversions % 2 == 0)
        } else {
            // Even width: solvable if (inversions + empty row index) is odd
            Ok((inversions + empty.row) % 2 == 1)
        }
    }
}

fn count_inversions(flattened: &[u32]) -> usize {
    flattened
        .iter()
        .enumerate()
        .filter(|&(_, &val)| val != 0)
        .map(|(i, &val)| {
            flattened[i + 1..]
                .iter()
                .filter(|&&next| next != 0 && next < val)
                .count()
        })
        .sum()
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.size * self.size - 1).to_string().len();
        for row in &self.board {
            for &val in row {
                if val == 0 {
                    write!(f, "{:>width$} ", "")?;
                } else {
                    write!(f, "{:>width$} ", val)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
