// MIT License - Copyright (c) 2026 Peter Wright
// Detection-grid bitmask codec

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{GRID_BITS, GRID_HEIGHT, GRID_WIDTH, MAX_GRID_CELLS};
use crate::error::{PtzError, Result};
use crate::protocol::coerce_u32;

/// A rectangular detection grid.
///
/// `bits` holds one character per cell in row-major order; `'1'` marks an
/// active cell. `bits.len() == width * height` is enforced whenever a grid
/// crosses the wire boundary, and by [`GridArea::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridArea {
    pub width: u32,
    pub height: u32,
    pub bits: String,
}

impl GridArea {
    /// Build a grid, rejecting dimensions that do not match the bit string.
    pub fn new(width: u32, height: u32, bits: impl Into<String>) -> Result<Self> {
        let area = Self {
            width,
            height,
            bits: bits.into(),
        };
        area.validate()?;
        Ok(area)
    }

    /// A grid with every cell active.
    pub fn filled(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, "1".repeat(cell_count(width, height)?))
    }

    /// A grid with no active cell.
    pub fn empty(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, "0".repeat(cell_count(width, height)?))
    }

    /// Check the size invariant.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PtzError::validation(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        let expected = cell_count(self.width, self.height)?;
        let actual = self.bits.chars().count();
        if actual != expected {
            return Err(PtzError::validation(format!(
                "grid bit string has {} cells, expected {}x{} = {}",
                actual, self.width, self.height, expected
            )));
        }
        Ok(())
    }

    /// Whether the cell at column `x`, row `y` is active.
    pub fn cell(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = (y as usize) * (self.width as usize) + x as usize;
        self.bits.chars().nth(index) == Some('1')
    }

    /// Number of active cells.
    pub fn active_cells(&self) -> usize {
        self.bits.chars().filter(|c| *c == '1').count()
    }
}

fn cell_count(width: u32, height: u32) -> Result<usize> {
    let cells = u64::from(width) * u64::from(height);
    if cells > MAX_GRID_CELLS {
        return Err(PtzError::validation(format!(
            "grid {}x{} exceeds {} cells",
            width, height, MAX_GRID_CELLS
        )));
    }
    Ok(cells as usize)
}

/// Decode a device `scope` object into a grid.
///
/// Accepts `cols`/`width`, `rows`/`height` and `table`/`area`/`bits`.
pub fn decode(scope: &Value) -> Result<GridArea> {
    if !scope.is_object() {
        return Err(PtzError::validation("grid scope is not an object"));
    }
    let width = GRID_WIDTH.get(scope).and_then(coerce_u32).unwrap_or(0);
    let height = GRID_HEIGHT.get(scope).and_then(coerce_u32).unwrap_or(0);
    if width == 0 || height == 0 {
        return Err(PtzError::validation(format!(
            "grid scope is missing dimensions ({}x{})",
            width, height
        )));
    }
    let bits = match GRID_BITS.get(scope) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(PtzError::validation(format!(
                "grid bit field is not a string: {}",
                other
            )));
        }
        None => return Err(PtzError::validation("grid scope has no bit field")),
    };
    GridArea::new(width, height, bits)
}

/// Encode a grid into a device `scope` object.
///
/// Both dimension alias pairs are emitted because firmware revisions
/// disagree on which one they read.
pub fn encode(area: &GridArea) -> Result<Value> {
    area.validate()?;
    let mut scope = Map::new();
    GRID_WIDTH.put(&mut scope, Value::from(area.width));
    GRID_HEIGHT.put(&mut scope, Value::from(area.height));
    GRID_BITS.put(&mut scope, Value::from(area.bits.clone()));
    Ok(Value::Object(scope))
}
