//! D4 symmetry group operations on square grids
//!
//! The engine is generic over the cell type so it can be exercised on plain
//! integer grids as well as on boards. Transforms are always produced in the
//! same order: four successive counter-clockwise quarter turns, a left-right
//! mirror of the result, then four more quarter turns of the mirrored grid.
//! Canonical keys depend on that order staying fixed.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A non-empty square grid stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SquareGrid<T> {
    side: usize,
    cells: Vec<T>,
}

impl<T: Clone> SquareGrid<T> {
    /// Build a grid from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`] if there are no rows, a row is empty,
    /// or any row length differs from the number of rows.
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self> {
        let side = rows.len();
        if side == 0 {
            return Err(Error::InvalidShape {
                reason: "grid has no rows".to_string(),
            });
        }

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != side) {
            return Err(Error::InvalidShape {
                reason: format!(
                    "row {index} has {} cells but the grid has {side} rows",
                    row.len()
                ),
            });
        }

        Ok(Self {
            side,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Build a grid from row-major cells.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidShape`] if `side` is zero or `cells` does not
    /// hold exactly `side * side` values.
    pub fn from_cells(side: usize, cells: Vec<T>) -> Result<Self> {
        if side == 0 || cells.len() != side * side {
            return Err(Error::InvalidShape {
                reason: format!("expected {} cells for side {side}, got {}", side * side, cells.len()),
            });
        }
        Ok(Self { side, cells })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<T> {
        self.cells
    }

    /// Cell at (`row`, `col`), if inside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.side && col < self.side {
            self.cells.get(row * self.side + col)
        } else {
            None
        }
    }

    /// Copy the grid back out as nested rows
    pub fn rows(&self) -> Vec<Vec<T>> {
        self.cells.chunks(self.side).map(<[T]>::to_vec).collect()
    }

    /// Rotate a quarter turn counter-clockwise
    #[must_use]
    pub fn rotate(&self) -> Self {
        D4Transform::ROTATE_QUARTER.apply(self)
    }

    /// Rotate `turns` quarter turns counter-clockwise
    #[must_use]
    pub fn rotate_by(&self, turns: usize) -> Self {
        D4Transform::rotation(turns).apply(self)
    }

    /// Mirror across the vertical axis (left and right columns swap)
    #[must_use]
    pub fn reflect(&self) -> Self {
        D4Transform::MIRROR.apply(self)
    }
}

/// Element of the dihedral group of the square.
///
/// A transform mirrors first (when `reflection` is set) and then applies
/// `rotation` counter-clockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Counter-clockwise quarter turns (0-3)
    pub rotation: u8,
    /// Whether to mirror before rotating
    pub reflection: bool,
}

impl D4Transform {
    pub const IDENTITY: D4Transform = D4Transform {
        rotation: 0,
        reflection: false,
    };

    const ROTATE_QUARTER: D4Transform = D4Transform {
        rotation: 1,
        reflection: false,
    };

    const MIRROR: D4Transform = D4Transform {
        rotation: 0,
        reflection: true,
    };

    /// Pure rotation by `turns` counter-clockwise quarter turns
    pub fn rotation(turns: usize) -> Self {
        D4Transform {
            rotation: (turns % 4) as u8,
            reflection: false,
        }
    }

    /// All 8 transforms in generation order.
    ///
    /// Index `k < 4` is `k + 1` quarter turns (so the identity is index 3);
    /// index `k >= 4` is the mirror followed by `k - 3` quarter turns.
    pub fn all() -> [D4Transform; 8] {
        let mut transforms = [D4Transform::IDENTITY; 8];
        for (index, transform) in transforms.iter_mut().enumerate() {
            *transform = if index < 4 {
                D4Transform::rotation(index + 1)
            } else {
                D4Transform {
                    rotation: ((index - 3) % 4) as u8,
                    reflection: true,
                }
            };
        }
        transforms
    }

    /// Position of this transform in [`D4Transform::all`]
    pub fn index(&self) -> usize {
        let rotation = usize::from(self.rotation);
        if self.reflection {
            (rotation + 3) % 4 + 4
        } else {
            (rotation + 3) % 4
        }
    }

    /// Where the cell at (`row`, `col`) lands on a grid of the given side
    pub fn map_position(&self, side: usize, row: usize, col: usize) -> (usize, usize) {
        let (mut row, mut col) = (row, col);
        if self.reflection {
            col = side - 1 - col;
        }
        for _ in 0..self.rotation {
            (row, col) = (side - 1 - col, row);
        }
        (row, col)
    }

    /// Apply the transform to a grid
    pub fn apply<T: Clone>(&self, grid: &SquareGrid<T>) -> SquareGrid<T> {
        let side = grid.side;
        let mut cells = grid.cells.clone();
        for (index, cell) in grid.cells.iter().enumerate() {
            let (row, col) = self.map_position(side, index / side, index % side);
            cells[row * side + col] = cell.clone();
        }
        SquareGrid { side, cells }
    }

    /// The transform equivalent to applying `self` and then `next`
    #[must_use]
    pub fn then(&self, next: D4Transform) -> D4Transform {
        // Mirroring after a rotation is the same as rotating the other way
        // after mirroring.
        let carried = if next.reflection {
            (4 - self.rotation) % 4
        } else {
            self.rotation
        };
        D4Transform {
            rotation: (next.rotation + carried) % 4,
            reflection: self.reflection ^ next.reflection,
        }
    }

    /// Get the inverse transform
    #[must_use]
    pub fn inverse(&self) -> D4Transform {
        if self.reflection {
            // every mirrored element of D4 is an involution
            *self
        } else {
            D4Transform::rotation(usize::from((4 - self.rotation) % 4))
        }
    }
}

/// All 8 symmetric variants of `grid` in generation order
pub fn all_transforms<T: Clone>(grid: &SquareGrid<T>) -> Vec<SquareGrid<T>> {
    let mut transforms = Vec::with_capacity(8);
    let mut current = grid.clone();
    for _ in 0..2 {
        for _ in 0..4 {
            current = current.rotate();
            transforms.push(current.clone());
        }
        current = current.reflect();
    }
    transforms
}

/// [`all_transforms`] on raw nested rows.
///
/// # Errors
///
/// Returns [`Error::InvalidShape`] if `rows` is not a non-empty square grid.
pub fn all_transforms_of<T: Clone>(rows: Vec<Vec<T>>) -> Result<Vec<SquareGrid<T>>> {
    Ok(all_transforms(&SquareGrid::new(rows)?))
}

/// Whether `b` is one of the symmetric variants of `a`
pub fn are_equivalent<T: Clone + PartialEq>(a: &SquareGrid<T>, b: &SquareGrid<T>) -> bool {
    a.side == b.side && all_transforms(a).iter().any(|variant| variant == b)
}

/// [`are_equivalent`] on raw nested rows.
///
/// # Errors
///
/// Returns [`Error::InvalidShape`] if either input is not a non-empty square grid.
pub fn are_equivalent_rows<T: Clone + PartialEq>(a: Vec<Vec<T>>, b: Vec<Vec<T>>) -> Result<bool> {
    Ok(are_equivalent(&SquareGrid::new(a)?, &SquareGrid::new(b)?))
}
