use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, enabled, info, Level};

use crate::error::Result;
use crate::gesture::{GestureTranslator, Point};
use crate::puzzle::{Direction, Grid};

/// One play session: the board, the drag in progress and the RNG used to
/// reshuffle on restart. Owned by the host loop.
#[derive(Debug)]
pub struct Game {
    grid: Grid,
    gestures: GestureTranslator,
    rng: StdRng,
}

impl Game {
    pub fn new(size: usize) -> Result<Self> {
        Self::with_rng(size, StdRng::from_entropy())
    }

    /// Same seed, same sequence of boards across restarts.
    pub fn with_seed(size: usize, seed: u64) -> Result<Self> {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: usize, mut rng: StdRng) -> Result<Self> {
        let grid = shuffle(size, &mut rng)?;
        Ok(Self {
            grid,
            gestures: GestureTranslator::new(),
            rng,
        })
    }

    /// Starts from a given board instead of a shuffle.
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            gestures: GestureTranslator::new(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn current_grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_solved(&self) -> bool {
        self.grid.is_solved()
    }

    pub fn is_dragging(&self) -> bool {
        self.gestures.is_dragging()
    }

    pub fn pointer_down(&mut self, x: i32, y: i32) {
        self.gestures.pointer_down(Point::new(x, y));
    }

    /// Returns how many tiles actually moved (0, 1 or 2).
    pub fn pointer_move(&mut self, x: i32, y: i32) -> Result<usize> {
        let gesture = self.gestures.pointer_move(Point::new(x, y));
        let mut moved = 0;
        for direction in gesture.directions() {
            if self.apply_move(direction)? {
                moved += 1;
            }
        }
        Ok(moved)
    }

    pub fn pointer_up(&mut self) {
        self.gestures.pointer_up();
    }

    pub fn apply_move(&mut self, direction: Direction) -> Result<bool> {
        let moved = self.grid.apply_move(direction)?;
        if moved {
            debug!(%direction, "tile moved");
            if self.grid.is_solved() {
                info!(size = self.grid.size(), "puzzle solved");
            }
        } else {
            debug!(%direction, "move off the edge ignored");
        }
        Ok(moved)
    }

    /// Throws away the board and any drag in progress and deals a new board.
    pub fn request_restart(&mut self) -> Result<()> {
        self.grid = shuffle(self.grid.size(), &mut self.rng)?;
        self.gestures.reset();
        info!(size = self.grid.size(), "puzzle restarted");
        Ok(())
    }
}

fn shuffle(size: usize, rng: &mut StdRng) -> Result<Grid> {
    let grid = Grid::new_shuffled_with(size, rng)?;
    // Quadratic in the cell count.
    if enabled!(Level::DEBUG) {
        debug!(solvable = grid.is_solvable().ok(), "shuffled\n{grid}");
    }
    Ok(grid)
}
