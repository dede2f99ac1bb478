/// Manhattan distance between two grid positions, in grid units.
///
/// Admissible and consistent for unit-cost 4-directional movement, which is
/// what guarantees A* returns shortest paths here.
pub fn manhattan(a: (i32, i32), b: (i32, i32)) -> u32 {
    ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as u32
}
