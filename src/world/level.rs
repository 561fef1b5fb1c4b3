// Occupancy grid the rays march through.
// Built once from a decoded image, immutable afterwards.

use std::fmt;

use glam::Vec2;
use thiserror::Error;

/// Raw cell value: 0 = floor, anything else = wall material id.
pub type Cell = u8;

pub const EMPTY: Cell = 0;

/// Value reported for every query outside the grid.
///
/// Treated as solid so neither rays nor the player can leave the map.
pub const BOUNDARY: Cell = Cell::MAX;

/// Palette for the common wall colours (0x00RRGGBB → material id).
const FIXED_MATERIALS: [(u32, Cell); 4] = [
    (0x00_00_00_00, 1), // black
    (0x00_FF_00_00, 2), // red
    (0x00_00_FF_00, 3), // green
    (0x00_00_00_FF, 4), // blue
];

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LevelError {
    #[error("level image has no pixels")]
    Empty,

    #[error("pixel buffer holds {got} bytes, expected {expected} for {width}x{height} RGBA")]
    SizeMismatch {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    #[error("level uses more than 254 distinct wall colours")]
    TooManyMaterials,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Level {
    /// Build from row-major cell values.
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, LevelError> {
        if width == 0 || height == 0 {
            return Err(LevelError::Empty);
        }
        if cells.len() != width * height {
            return Err(LevelError::SizeMismatch {
                width,
                height,
                expected: width * height,
                got: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build from tightly packed RGBA8 pixels, one pixel per cell.
    ///
    /// * white or fully transparent → [`EMPTY`]
    /// * black, red, green, blue → materials 1‥4
    /// * other colours → next free id, in row-major order of first use
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Result<Self, LevelError> {
        if width == 0 || height == 0 {
            return Err(LevelError::Empty);
        }
        let expected = width * height * 4;
        if rgba.len() != expected {
            return Err(LevelError::SizeMismatch {
                width,
                height,
                expected,
                got: rgba.len(),
            });
        }

        let mut palette: Vec<(u32, Cell)> = FIXED_MATERIALS.to_vec();
        let mut next_id = FIXED_MATERIALS.len() as Cell + 1;
        let mut cells = Vec::with_capacity(width * height);

        for px in rgba.chunks_exact(4) {
            let rgb = u32::from_be_bytes([0, px[0], px[1], px[2]]);
            if px[3] == 0 || rgb == 0x00_FF_FF_FF {
                cells.push(EMPTY);
                continue;
            }
            let id = match palette.iter().find(|(c, _)| *c == rgb) {
                Some(&(_, id)) => id,
                None => {
                    if next_id == BOUNDARY {
                        return Err(LevelError::TooManyMaterials);
                    }
                    palette.push((rgb, next_id));
                    next_id += 1;
                    next_id - 1
                }
            };
            cells.push(id);
        }

        Self::new(width, height, cells)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell value at `(x, y)`; anything outside the grid is [`BOUNDARY`].
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return BOUNDARY;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    #[inline]
    pub fn is_solid(&self, x: i32, y: i32) -> bool {
        self.get(x, y) != EMPTY
    }

    /// Cell under a world-space point (cells are one unit wide).
    #[inline]
    pub fn at_point(&self, p: Vec2) -> Cell {
        self.get(p.x.floor() as i32, p.y.floor() as i32)
    }

    /// Highest material id present, used to size texture lookups.
    pub fn max_material(&self) -> Cell {
        self.cells.iter().copied().max().unwrap_or(EMPTY)
    }
}

/// ASCII dump: `.` for floor, hex digit for materials below 16, `#` otherwise.
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for &c in row {
                let ch = match c {
                    EMPTY => '.',
                    1..=15 => char::from_digit(c as u32, 16).unwrap_or('#'),
                    _ => '#',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
