use alloc::collections::VecDeque;

use ndarray::Array2;

use crate::*;

/// Single-agent BFS distance field from `from`, ignoring the adversary. Unreachable cells are `None`.
pub fn distances(maze: &Maze, from: Position) -> Array2<Option<u32>> {
    let mut distances = Array2::from_elem([maze.height() as usize, maze.width() as usize], None);
    if !maze.contains(from) {
        return distances;
    }

    distances[from.to_nd_index()] = Some(0);
    let mut to_visit = VecDeque::from([(from, 0)]);
    while let Some((position, distance)) = to_visit.pop_front() {
        for neighbor in maze.open_neighbors(position) {
            let slot = &mut distances[neighbor.to_nd_index()];
            if slot.is_none() {
                *slot = Some(distance + 1);
                to_visit.push_back((neighbor, distance + 1));
            }
        }
    }
    distances
}

/// Whether `to` can be reached from `from` at all. A cheap pre-filter before the joint search.
pub fn reachable(maze: &Maze, from: Position, to: Position) -> bool {
    if !maze.contains(from) || !maze.contains(to) {
        return false;
    }
    if from == to {
        return true;
    }

    let mut visited: Array2<bool> = Array2::default([maze.height() as usize, maze.width() as usize]);
    visited[from.to_nd_index()] = true;
    let mut to_visit = VecDeque::from([from]);
    while let Some(position) = to_visit.pop_front() {
        for neighbor in maze.open_neighbors(position) {
            if neighbor == to {
                return true;
            }
            if !visited[neighbor.to_nd_index()] {
                visited[neighbor.to_nd_index()] = true;
                to_visit.push_back(neighbor);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: Coord, y: Coord) -> Position {
        Position::new(x, y)
    }

    /// 3x3 maze whose middle column is walled off from the left column.
    fn split_maze() -> Maze {
        let mut builder = MazeBuilder::new(3, 3).unwrap();
        for y in 0..3 {
            builder.add_wall(pos(0, y), Direction::Right).unwrap();
        }
        builder.build()
    }

    #[test]
    fn open_maze_is_fully_reachable() {
        let maze = Maze::open(4, 3).unwrap();

        assert!(reachable(&maze, pos(0, 0), pos(3, 2)));
        assert!(reachable(&maze, pos(1, 1), pos(1, 1)));
    }

    #[test]
    fn walls_can_disconnect_regions() {
        let maze = split_maze();

        assert!(!reachable(&maze, pos(0, 0), pos(2, 2)));
        assert!(reachable(&maze, pos(1, 0), pos(2, 2)));
        assert!(!reachable(&maze, pos(0, 0), pos(9, 9)));
    }

    #[test]
    fn distance_field_counts_steps() {
        let maze = split_maze();
        let field = distances(&maze, pos(0, 0));

        assert_eq!(field[pos(0, 2).to_nd_index()], Some(2));
        assert_eq!(field[pos(1, 0).to_nd_index()], None);

        let field = distances(&maze, pos(1, 1));
        assert_eq!(field[pos(2, 0).to_nd_index()], Some(2));
    }
}
