use pathvis::{AstarSearch, CellState, Grid, SearchOutcome};
use serde::{Deserialize, Serialize};

/// Declarative search scenario, JSON-encoded in the test sources.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathTestData {
    #[serde(rename = "testName")]
    pub test_name: String,
    #[serde(rename = "gridSize")]
    pub grid_size: i32,
    #[serde(rename = "wallCells")]
    pub wall_cells: Vec<i32>,
    #[serde(rename = "startCell")]
    pub start_cell: i32,
    #[serde(rename = "goalCell")]
    pub goal_cell: i32,
    /// Expected shortest-path edge count; null when no path exists.
    #[serde(rename = "expectedEdges")]
    pub expected_edges: Option<u32>,
}

/// Helper functions for coordinate transformation
pub fn cell_id_to_coords(id: i32, size: i32) -> (i32, i32) {
    (id / size, id % size)
}

pub fn coords_to_cell_id(row: i32, col: i32, size: i32) -> i32 {
    col + row * size
}

pub fn build_grid(data: &PathTestData) -> Grid {
    let mut grid = Grid::new(data.grid_size);
    for &id in &data.wall_cells {
        grid.set_state(id, CellState::Wall);
    }
    grid.set_state(data.start_cell, CellState::Start);
    grid.start = Some(data.start_cell);
    grid.set_state(data.goal_cell, CellState::Goal);
    grid.goal = Some(data.goal_cell);
    grid
}

/// Recompute adjacency and run one full search with a no-op redraw and no
/// cancellation. Returns the outcome and the number of expansions.
pub fn run_search(grid: &mut Grid) -> (SearchOutcome, u32) {
    grid.rebuild_neighbours();
    let start = grid.start.expect("scenario has no start");
    let goal = grid.goal.expect("scenario has no goal");
    let mut search = AstarSearch::new(grid, start, goal);
    let outcome = search.run(grid, || (), || false);
    (outcome, search.expanded())
}

/// Flip scenario horizontally (mirror left-right)
pub fn flip_horizontal(data: &PathTestData) -> PathTestData {
    let size = data.grid_size;
    let flip = |id: i32| {
        let (row, col) = cell_id_to_coords(id, size);
        coords_to_cell_id(row, size - 1 - col, size)
    };
    PathTestData {
        test_name: format!("{}_h_flip", data.test_name),
        grid_size: size,
        wall_cells: data.wall_cells.iter().map(|&id| flip(id)).collect(),
        start_cell: flip(data.start_cell),
        goal_cell: flip(data.goal_cell),
        expected_edges: data.expected_edges,
    }
}

/// Flip scenario vertically (mirror top-bottom)
pub fn flip_vertical(data: &PathTestData) -> PathTestData {
    let size = data.grid_size;
    let flip = |id: i32| {
        let (row, col) = cell_id_to_coords(id, size);
        coords_to_cell_id(size - 1 - row, col, size)
    };
    PathTestData {
        test_name: format!("{}_v_flip", data.test_name),
        grid_size: size,
        wall_cells: data.wall_cells.iter().map(|&id| flip(id)).collect(),
        start_cell: flip(data.start_cell),
        goal_cell: flip(data.goal_cell),
        expected_edges: data.expected_edges,
    }
}

/// Flip scenario both horizontally and vertically
pub fn flip_both(data: &PathTestData) -> PathTestData {
    flip_vertical(&flip_horizontal(data))
}

/// Run a scenario in all 4 variants (original, h_flip, v_flip, hv_flip);
/// outcome and shortest-path length are mirror-invariant.
pub fn check_all_variants(data: &PathTestData) {
    let variants = vec![
        ("original", data.clone()),
        ("h_flip", flip_horizontal(data)),
        ("v_flip", flip_vertical(data)),
        ("hv_flip", flip_both(data)),
    ];

    for (variant_name, variant) in variants {
        let mut grid = build_grid(&variant);
        let (outcome, _) = run_search(&mut grid);

        match variant.expected_edges {
            Some(edges) => match outcome {
                SearchOutcome::PathFound(path) => {
                    assert_eq!(
                        path.len() as u32 - 1,
                        edges,
                        "scenario '{}' [{}]: wrong path length",
                        variant.test_name,
                        variant_name
                    );
                }
                other => panic!(
                    "scenario '{}' [{}]: expected a path, got {:?}",
                    variant.test_name, variant_name, other
                ),
            },
            None => {
                assert_eq!(
                    outcome,
                    SearchOutcome::NoPathFound,
                    "scenario '{}' [{}]: expected no path",
                    variant.test_name,
                    variant_name
                );
            }
        }
    }
}
