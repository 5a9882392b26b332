use alloc::vec::Vec;
use core::ops::Index;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Immutable maze grid. Every wall is stored on both cells sharing the edge, and grid-boundary edges never carry a
/// wall bit: leaving the grid is blocked by [`Maze::is_edge_blocked`] itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MazeRepr", into = "MazeRepr")]
pub struct Maze {
    walls: Array2<Walls>,
}

impl Maze {
    /// Maze without any internal wall.
    pub fn open(width: Coord, height: Coord) -> Result<Self> {
        Ok(MazeBuilder::new(width, height)?.build())
    }

    /// Builds a maze from raw row-major wall masks, rejecting anything that would break the wall invariants.
    pub fn from_wall_masks(width: Coord, height: Coord, masks: &[u8]) -> Result<Self> {
        check_dimensions(width, height)?;
        let walls = masks
            .iter()
            .map(|&mask| Walls::from_bits_retain(mask))
            .collect::<Vec<_>>();
        let walls = Array2::from_shape_vec([height as usize, width as usize], walls)
            .map_err(|_| MazeError::InvalidShape)?;
        let maze = Self { walls };
        maze.validate()?;
        Ok(maze)
    }

    fn validate(&self) -> Result<()> {
        for position in self.positions() {
            let walls = self[position];
            if Walls::from_bits(walls.bits()).is_none() {
                return Err(MazeError::InvalidWallBits {
                    position,
                    mask: walls.bits(),
                });
            }
            for direction in Direction::ALL {
                if !walls.contains(direction.wall()) {
                    continue;
                }
                let neighbor = position.offset(direction);
                if !self.contains(neighbor) {
                    return Err(MazeError::BoundaryWall {
                        position,
                        direction,
                    });
                }
                if !self[neighbor].contains(direction.opposite().wall()) {
                    return Err(MazeError::AsymmetricWall {
                        position,
                        direction,
                    });
                }
            }
        }
        Ok(())
    }

    pub fn width(&self) -> Coord {
        self.walls.dim().1 as Coord
    }

    pub fn height(&self) -> Coord {
        self.walls.dim().0 as Coord
    }

    pub fn cell_count(&self) -> usize {
        self.walls.len()
    }

    pub fn contains(&self, position: Position) -> bool {
        (0..self.width()).contains(&position.x) && (0..self.height()).contains(&position.y)
    }

    pub fn validate_position(&self, position: Position) -> Result<Position> {
        if self.contains(position) {
            Ok(position)
        } else {
            Err(MazeError::OutOfBounds(position))
        }
    }

    pub fn walls_at(&self, position: Position) -> Walls {
        self[position]
    }

    /// The single movement primitive: true when stepping from `position` towards `direction` would leave the grid
    /// or cross a wall. Positions outside the grid are treated as fully enclosed.
    pub fn is_edge_blocked(&self, position: Position, direction: Direction) -> bool {
        if !self.contains(position) || !self.contains(position.offset(direction)) {
            return true;
        }
        self[position].contains(direction.wall())
    }

    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        if self.is_edge_blocked(position, direction) {
            None
        } else {
            Some(position.offset(direction))
        }
    }

    pub fn open_neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.neighbor(position, direction))
    }

    /// All cells in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (width, height) = (self.width(), self.height());
        (0..height).flat_map(move |y| (0..width).map(move |x| Position::new(x, y)))
    }

    /// Number of internal edges carrying a wall.
    pub fn wall_count(&self) -> usize {
        self.positions()
            .map(|position| {
                [Direction::Right, Direction::Down]
                    .into_iter()
                    .filter(|&direction| self[position].contains(direction.wall()))
                    .count()
            })
            .sum()
    }

    pub fn wall_masks(&self) -> Vec<u8> {
        self.walls.iter().map(|walls| walls.bits()).collect()
    }
}

impl Index<Position> for Maze {
    type Output = Walls;

    fn index(&self, position: Position) -> &Self::Output {
        &self.walls[position.to_nd_index()]
    }
}

fn check_dimensions(width: Coord, height: Coord) -> Result<()> {
    let range = 1..=MAX_DIMENSION;
    if range.contains(&width) && range.contains(&height) {
        Ok(())
    } else {
        Err(MazeError::InvalidDimensions { width, height })
    }
}

/// Mutable construction surface for [`Maze`]. Walls can only be toggled on edges shared by two cells, and both
/// cells are always updated together.
#[derive(Clone, Debug, PartialEq)]
pub struct MazeBuilder {
    walls: Array2<Walls>,
}

impl MazeBuilder {
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            walls: Array2::default([height as usize, width as usize]),
        })
    }

    fn contains(&self, position: Position) -> bool {
        let (height, width) = self.walls.dim();
        (0..width as Coord).contains(&position.x) && (0..height as Coord).contains(&position.y)
    }

    pub fn set_wall(
        &mut self,
        position: Position,
        direction: Direction,
        present: bool,
    ) -> Result<&mut Self> {
        if !self.contains(position) {
            return Err(MazeError::OutOfBounds(position));
        }
        let neighbor = position.offset(direction);
        if !self.contains(neighbor) {
            return Err(MazeError::BoundaryWall {
                position,
                direction,
            });
        }
        self.walls[position.to_nd_index()].set(direction.wall(), present);
        self.walls[neighbor.to_nd_index()].set(direction.opposite().wall(), present);
        Ok(self)
    }

    pub fn add_wall(&mut self, position: Position, direction: Direction) -> Result<&mut Self> {
        self.set_wall(position, direction, true)
    }

    pub fn remove_wall(&mut self, position: Position, direction: Direction) -> Result<&mut Self> {
        self.set_wall(position, direction, false)
    }

    pub fn build(self) -> Maze {
        Maze { walls: self.walls }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct MazeRepr {
    width: Coord,
    height: Coord,
    walls: Vec<u8>,
}

impl TryFrom<MazeRepr> for Maze {
    type Error = MazeError;

    fn try_from(repr: MazeRepr) -> Result<Self> {
        Self::from_wall_masks(repr.width, repr.height, &repr.walls)
    }
}

impl From<Maze> for MazeRepr {
    fn from(maze: Maze) -> Self {
        Self {
            width: maze.width(),
            height: maze.height(),
            walls: maze.wall_masks(),
        }
    }
}
