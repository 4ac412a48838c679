use std::path::PathBuf;

use clap::Parser;

use crate::error::{PuzzleError, Result};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "slide-puzzle",
    about = "Sliding-tile number puzzle played by dragging the mouse in the terminal",
    version
)]
pub struct Config {
    /// Tiles per side.
    #[arg(long, default_value_t = 4)]
    pub size: usize,

    /// Seed for reproducible shuffles.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Tile width in terminal columns.
    #[arg(long, default_value_t = 6)]
    pub tile_width: u16,

    /// Tile height in terminal rows.
    #[arg(long, default_value_t = 3)]
    pub tile_height: u16,

    /// Write logs to this file (filtered by RUST_LOG, default `info`).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: 4,
            seed: None,
            tile_width: 6,
            tile_height: 3,
            log_file: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.size < 2 {
            return Err(PuzzleError::config(format!(
                "--size must be at least 2, got {}",
                self.size
            )));
        }
        let label = self
            .size
            .checked_mul(self.size)
            .map(|cells| (cells - 1).to_string().len())
            .ok_or_else(|| PuzzleError::config(format!("--size {} is too large", self.size)))?;
        if usize::from(self.tile_width) < label + 2 {
            return Err(PuzzleError::config(format!(
                "--tile-width {} cannot fit {label}-digit labels",
                self.tile_width
            )));
        }
        if self.tile_height == 0 {
            return Err(PuzzleError::config("--tile-height must be at least 1"));
        }

        // Board plus border column, and board plus border, button and status rows,
        // have to be addressable as terminal cells.
        let side = u16::try_from(self.size).ok();
        let width = side
            .and_then(|side| side.checked_mul(self.tile_width))
            .and_then(|width| width.checked_add(1));
        let height = side
            .and_then(|side| side.checked_mul(self.tile_height))
            .and_then(|height| height.checked_add(4));
        if width.is_none() || height.is_none() {
            return Err(PuzzleError::config(format!(
                "a {0}x{0} board of {1}x{2} tiles does not fit a terminal",
                self.size, self.tile_width, self.tile_height
            )));
        }
        Ok(())
    }
}
