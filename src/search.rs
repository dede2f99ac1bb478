use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::grid::{CellState, Grid};
use crate::heuristic::manhattan;

// Trace logging flag - set to true to enable debug output
const TRACE_SEARCH: bool = false;

/// Cost assigned to cells the search has not reached yet.
pub const UNREACHABLE: u32 = u32::MAX;

/// Final result of one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Shortest path found; ids from start to goal inclusive.
    PathFound(Vec<i32>),
    /// Frontier exhausted before the goal was reached.
    NoPathFound,
    /// External quit observed mid-run; no result is meaningful.
    Cancelled,
}

/// Result of a single expansion step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Continue,
    /// Goal popped; ids from start to goal inclusive. Endpoint markers are
    /// restored, path cells are not yet marked (see [`mark_path`]).
    Found(Vec<i32>),
    Exhausted,
}

/// Priority-queue entry ordered by (f ascending, insertion sequence
/// ascending), i.e. FIFO among equal f-scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    f: u32,
    seq: u64,
    id: i32,
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap behaviour (BinaryHeap is a max-heap).
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One A* run over a grid whose neighbour lists are current.
///
/// All bookkeeping lives here and is dropped with the value when the run
/// ends; nothing persists across runs. The caller is responsible for calling
/// `Grid::rebuild_neighbours` beforehand and for checking that start and goal
/// are set (see the app's trigger handling).
pub struct AstarSearch {
    start: i32,
    goal: i32,
    g: Vec<u32>,
    f: Vec<u32>,
    came_from: Vec<Option<i32>>,
    in_open: Vec<bool>,
    frontier: BinaryHeap<FrontierEntry>,
    /// Monotonic push counter, never reset during a run.
    seq: u64,
    expanded: u32,
}

impl AstarSearch {
    pub fn new(grid: &Grid, start: i32, goal: i32) -> Self {
        let n = (grid.size * grid.size) as usize;
        let mut search = AstarSearch {
            start,
            goal,
            g: vec![UNREACHABLE; n],
            f: vec![UNREACHABLE; n],
            came_from: vec![None; n],
            in_open: vec![false; n],
            frontier: BinaryHeap::new(),
            seq: 0,
            expanded: 0,
        };

        search.g[start as usize] = 0;
        search.f[start as usize] = manhattan(grid.coords(start), grid.coords(goal));
        search.frontier.push(FrontierEntry {
            f: search.f[start as usize],
            seq: 0,
            id: start,
        });
        search.in_open[start as usize] = true;
        search
    }

    /// Number of cells popped from the frontier so far.
    pub fn expanded(&self) -> u32 {
        self.expanded
    }

    /// Perform one expansion: pop the best frontier entry, test for the goal,
    /// relax its neighbours, call `redraw`, then mark the popped cell Visited.
    pub fn step(&mut self, grid: &mut Grid, redraw: &mut impl FnMut()) -> StepResult {
        let Some(entry) = self.frontier.pop() else {
            return StepResult::Exhausted;
        };
        let current = entry.id;
        self.in_open[current as usize] = false;
        self.expanded += 1;

        if TRACE_SEARCH {
            let (row, col) = grid.coords(current);
            println!(
                "[astar] pop ({},{}) f={} seq={} expanded={}",
                row, col, entry.f, entry.seq, self.expanded
            );
        }

        if current == self.goal {
            // Frontier colouring may have touched the goal; restore both
            // endpoint markers so path colouring never overwrites them.
            grid.set_state(self.start, CellState::Start);
            grid.set_state(self.goal, CellState::Goal);
            return StepResult::Found(self.reconstruct());
        }

        let tentative = self.g[current as usize] + 1;
        let neighbours = grid.cells[current as usize].neighbours.clone();
        for id in neighbours {
            let n = id as usize;
            if tentative < self.g[n] {
                self.came_from[n] = Some(current);
                self.g[n] = tentative;
                self.f[n] = tentative + manhattan(grid.coords(id), grid.coords(self.goal));
                if !self.in_open[n] {
                    self.seq += 1;
                    self.frontier.push(FrontierEntry {
                        f: self.f[n],
                        seq: self.seq,
                        id,
                    });
                    self.in_open[n] = true;
                    grid.set_state(id, CellState::Frontier);
                }
            }
        }

        redraw();

        if current != self.start {
            grid.set_state(current, CellState::Visited);
        }

        StepResult::Continue
    }

    /// Run to completion: `cancelled` is checked before every iteration,
    /// `redraw` fires once per iteration and once per marked path cell.
    pub fn run(
        &mut self,
        grid: &mut Grid,
        mut redraw: impl FnMut(),
        mut cancelled: impl FnMut() -> bool,
    ) -> SearchOutcome {
        loop {
            if cancelled() {
                return SearchOutcome::Cancelled;
            }
            match self.step(grid, &mut redraw) {
                StepResult::Continue => {}
                StepResult::Found(path) => {
                    mark_path(grid, &path, &mut redraw);
                    if TRACE_SEARCH {
                        println!("[astar] path found, {} edges", path.len() - 1);
                    }
                    return SearchOutcome::PathFound(path);
                }
                StepResult::Exhausted => {
                    if TRACE_SEARCH {
                        println!("[astar] frontier exhausted after {} pops", self.expanded);
                    }
                    return SearchOutcome::NoPathFound;
                }
            }
        }
    }

    /// Walk predecessors backward from the goal to the predecessor-less
    /// start. Terminates because predecessor links form a tree rooted at
    /// start: g strictly decreases along every update chain.
    fn reconstruct(&self) -> Vec<i32> {
        let mut path = vec![self.goal];
        let mut current = self.goal;
        while let Some(prev) = self.came_from[current as usize] {
            path.push(prev);
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Mark every intermediate path cell (start and goal excluded, their markers
/// take precedence), walking backward from the goal end, one redraw per cell.
pub fn mark_path(grid: &mut Grid, path: &[i32], mut redraw: impl FnMut()) {
    if path.len() < 3 {
        return;
    }
    for &id in path[1..path.len() - 1].iter().rev() {
        grid.set_state(id, CellState::Path);
        redraw();
    }
}
