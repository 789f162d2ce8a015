//! Static occupancy grid and cell/world coordinate mapping
//!
//! Cells are addressed as `(col, row)` integer pairs. World positions are
//! continuous and share units with `cell_size`: cell `(c, r)` spans
//! `[c*size, (c+1)*size)` on x and `[r*size, (r+1)*size)` on y.

use glam::{IVec2, Vec2};

/// Integer cell coordinate `(col, row)`
pub type CellIndex = IVec2;

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tile {
    Open,
    #[default]
    Wall,
}

/// One of the four axis directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Unit cell offset (y grows downward)
    #[inline]
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    /// Direction of a single axis step between neighbouring cells
    pub fn between(from: CellIndex, to: CellIndex) -> Option<Direction> {
        match (to - from).to_array() {
            [0, -1] => Some(Direction::Up),
            [0, 1] => Some(Direction::Down),
            [-1, 0] => Some(Direction::Left),
            [1, 0] => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Width x height occupancy table
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    cell_size: f32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// A grid with every cell walled
    pub fn filled(width: usize, height: usize, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
            tiles: vec![Tile::Wall; width * height],
        }
    }

    /// A grid whose only walls are the outer border
    pub fn bordered(width: usize, height: usize, cell_size: f32) -> Self {
        let mut grid = Self::filled(width, height, cell_size);
        for row in 1..height.saturating_sub(1) {
            for col in 1..width.saturating_sub(1) {
                grid.open(IVec2::new(col as i32, row as i32));
            }
        }
        grid
    }

    /// Build a grid from rows of text: `#` is a wall, anything else is open
    pub fn from_rows(rows: &[&str], cell_size: f32) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
        let mut grid = Self::filled(width, height, cell_size);
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.bytes().enumerate() {
                if ch != b'#' {
                    grid.open(IVec2::new(col as i32, row as i32));
                }
            }
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Fixed start cell
    #[inline]
    pub fn start(&self) -> CellIndex {
        IVec2::new(1, 1)
    }

    /// Fixed goal cell
    #[inline]
    pub fn goal(&self) -> CellIndex {
        IVec2::new(self.width as i32 - 2, self.height as i32 - 2)
    }

    /// Packed `row * width + col` key, `None` when out of range
    #[inline]
    pub fn index(&self, cell: CellIndex) -> Option<usize> {
        if self.contains(cell) {
            Some(cell.y as usize * self.width + cell.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn contains(&self, cell: CellIndex) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    /// True for cells on the outermost ring
    #[inline]
    pub fn is_border(&self, cell: CellIndex) -> bool {
        cell.x == 0
            || cell.y == 0
            || cell.x == self.width as i32 - 1
            || cell.y == self.height as i32 - 1
    }

    /// True for in-range cells strictly inside the border
    #[inline]
    pub fn is_interior(&self, cell: CellIndex) -> bool {
        self.contains(cell) && !self.is_border(cell)
    }

    /// Tile at `cell`; out-of-range cells read as walls
    #[inline]
    pub fn tile(&self, cell: CellIndex) -> Tile {
        self.index(cell).map_or(Tile::Wall, |i| self.tiles[i])
    }

    #[inline]
    pub fn is_open(&self, cell: CellIndex) -> bool {
        self.tile(cell) == Tile::Open
    }

    /// Clear a cell (ignored when out of range)
    pub fn open(&mut self, cell: CellIndex) {
        if let Some(i) = self.index(cell) {
            self.tiles[i] = Tile::Open;
        }
    }

    /// Cell containing a world position
    #[inline]
    pub fn cell_of(&self, pos: Vec2) -> CellIndex {
        (pos / self.cell_size).floor().as_ivec2()
    }

    /// World position of a cell's center
    #[inline]
    pub fn center_of(&self, cell: CellIndex) -> Vec2 {
        cell.as_vec2() * self.cell_size + Vec2::splat(self.cell_size / 2.0)
    }

    /// Top-left corner of a cell in world units
    #[inline]
    pub fn origin_of(&self, cell: CellIndex) -> Vec2 {
        cell.as_vec2() * self.cell_size
    }

    /// The four world-space corners of a cell
    pub fn corners_of(&self, cell: CellIndex) -> [Vec2; 4] {
        let min = self.origin_of(cell);
        let s = self.cell_size;
        [
            min,
            min + Vec2::new(s, 0.0),
            min + Vec2::new(0.0, s),
            min + Vec2::new(s, s),
        ]
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = CellIndex> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width).map(move |col| IVec2::new(col as i32, row as i32))
        })
    }

    /// Every wall cell in row-major order
    pub fn walls(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.cells().filter(|&c| !self.is_open(c))
    }

    /// Render as rows of `#` and `.` (trace logging and tests)
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| {
                        if self.is_open(IVec2::new(col as i32, row as i32)) {
                            '.'
                        } else {
                            '#'
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
