use std::error::Error;

/// Visual/logical state of a single cell.
///
/// State is an explicit tag; colours are derived at render time only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Empty,
    Start,
    Goal,
    Wall,
    /// Discovered but not yet expanded.
    Frontier,
    /// Expanded.
    Visited,
    /// On the final reconstructed path.
    Path,
}

/// A single grid cell: position, state and its current neighbour list.
#[derive(Debug, Clone)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
    pub state: CellState,
    /// Ids of orthogonally adjacent non-wall cells. Valid only for the wall
    /// configuration at the moment `rebuild_neighbours` last ran.
    pub neighbours: Vec<i32>,
}

/// Square N x N grid of cells, stored flat with id = col + row * size.
#[derive(Clone)]
pub struct Grid {
    pub size: i32,
    pub cells: Vec<Cell>,
    pub start: Option<i32>,
    pub goal: Option<i32>,
    /// Revision number - incremented whenever a cell state changes.
    pub revision: u64,
}

impl Grid {
    /// Create a new grid with all cells Empty and no start/goal.
    pub fn new(size: i32) -> Self {
        let mut cells = Vec::with_capacity((size * size) as usize);
        for row in 0..size {
            for col in 0..size {
                cells.push(Cell {
                    row,
                    col,
                    state: CellState::Empty,
                    neighbours: Vec::new(),
                });
            }
        }
        Grid {
            size,
            cells,
            start: None,
            goal: None,
            revision: 0,
        }
    }

    /// Full reset: fresh cells, start/goal cleared.
    pub fn reset(&mut self) {
        *self = Grid::new(self.size);
    }

    /// Convert (row, col) coordinates to cell id.
    pub fn id(&self, row: i32, col: i32) -> i32 {
        col + row * self.size
    }

    /// Convert cell id to (row, col) coordinates.
    pub fn coords(&self, id: i32) -> (i32, i32) {
        (id / self.size, id % self.size)
    }

    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        row >= 0 && row < self.size && col >= 0 && col < self.size
    }

    pub fn state(&self, id: i32) -> CellState {
        self.cells[id as usize].state
    }

    pub fn set_state(&mut self, id: i32, state: CellState) {
        let cell = &mut self.cells[id as usize];
        if cell.state != state {
            cell.state = state;
            self.revision += 1;
        }
    }

    pub fn is_wall(&self, row: i32, col: i32) -> bool {
        self.in_bounds(row, col) && self.cells[self.id(row, col) as usize].state == CellState::Wall
    }

    /// Primary-click edit: assign Start first, then Goal, then Wall.
    ///
    /// Start and Goal cells are never overwritten with Wall, so the
    /// at-most-one-start / at-most-one-goal invariant holds by construction.
    pub fn paint(&mut self, id: i32) {
        match self.state(id) {
            CellState::Start | CellState::Goal => {}
            _ => {
                if self.start.is_none() {
                    self.set_state(id, CellState::Start);
                    self.start = Some(id);
                } else if self.goal.is_none() {
                    self.set_state(id, CellState::Goal);
                    self.goal = Some(id);
                } else {
                    self.set_state(id, CellState::Wall);
                }
            }
        }
    }

    /// Secondary-click edit: clear the cell back to Empty, releasing the
    /// start/goal slot if this cell held one.
    pub fn erase(&mut self, id: i32) {
        if self.start == Some(id) {
            self.start = None;
        }
        if self.goal == Some(id) {
            self.goal = None;
        }
        self.set_state(id, CellState::Empty);
    }

    /// Reset every Frontier/Visited/Path cell to Empty so a re-triggered
    /// search starts from a clean display.
    pub fn clear_search_markers(&mut self) {
        for id in 0..(self.size * self.size) {
            match self.state(id) {
                CellState::Frontier | CellState::Visited | CellState::Path => {
                    self.set_state(id, CellState::Empty);
                }
                _ => {}
            }
        }
    }

    /// Recompute every cell's neighbour list from the current wall state.
    ///
    /// Each list is cleared before refilling, so repeated calls never
    /// accumulate duplicates. Wall cells keep an empty list and are excluded
    /// from every other cell's list. Fixed order: south, north, east, west.
    pub fn rebuild_neighbours(&mut self) {
        const OFFSETS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

        for id in 0..(self.size * self.size) {
            let (row, col) = self.coords(id);
            let mut neighbours = Vec::new();
            if !self.is_wall(row, col) {
                for (dr, dc) in OFFSETS {
                    let (nr, nc) = (row + dr, col + dc);
                    if self.in_bounds(nr, nc) && !self.is_wall(nr, nc) {
                        neighbours.push(self.id(nr, nc));
                    }
                }
            }
            self.cells[id as usize].neighbours = neighbours;
        }
    }

    /// Parse an ASCII layout into a grid.
    ///
    /// Symbols: 'S' start, 'G' goal, '■' or '#' wall, '□' or '.' empty.
    /// Search markers ('o', 'x', '*') parse as Empty. The layout must be
    /// square with one row per line.
    pub fn from_layout(layout: &str) -> Result<Grid, Box<dyn Error>> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Err("empty layout".into());
        }

        let size = lines.len() as i32;
        let mut grid = Grid::new(size);

        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() as i32 != size {
                return Err(format!(
                    "layout is not square: row {} has {} cells, expected {}",
                    row,
                    chars.len(),
                    size
                )
                .into());
            }
            for (col, ch) in chars.iter().enumerate() {
                let id = grid.id(row as i32, col as i32);
                match ch {
                    'S' => {
                        if grid.start.is_some() {
                            return Err("layout has more than one start".into());
                        }
                        grid.set_state(id, CellState::Start);
                        grid.start = Some(id);
                    }
                    'G' => {
                        if grid.goal.is_some() {
                            return Err("layout has more than one goal".into());
                        }
                        grid.set_state(id, CellState::Goal);
                        grid.goal = Some(id);
                    }
                    '■' | '#' => grid.set_state(id, CellState::Wall),
                    '□' | '.' | ' ' | 'o' | 'x' | '*' => {}
                    _ => return Err(format!("unknown layout symbol '{}'", ch).into()),
                }
            }
        }

        Ok(grid)
    }

    /// Format the grid as an ASCII layout (inverse of `from_layout`, plus
    /// search-marker symbols). Used by the clipboard export and tests.
    pub fn to_layout(&self) -> String {
        let mut result = String::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let symbol = match self.state(self.id(row, col)) {
                    CellState::Empty => '□',
                    CellState::Start => 'S',
                    CellState::Goal => 'G',
                    CellState::Wall => '■',
                    CellState::Frontier => 'o',
                    CellState::Visited => 'x',
                    CellState::Path => '*',
                };
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }
}
