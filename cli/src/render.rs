use labyrinth_core::{Direction, Maze, Position};

/// Cells marked on the board, in drawing priority order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Marks {
    pub protagonist: Position,
    pub adversary: Position,
    pub exit: Position,
}

impl Marks {
    fn symbol_at(&self, position: Position) -> char {
        if position == self.adversary {
            'M'
        } else if position == self.protagonist {
            'T'
        } else if position == self.exit {
            'E'
        } else {
            ' '
        }
    }
}

/// ASCII board: `T` protagonist, `M` adversary, `E` exit.
pub fn render(maze: &Maze, marks: &Marks) -> String {
    let mut out = String::new();

    for y in 0..maze.height() {
        out.push('+');
        for x in 0..maze.width() {
            let blocked = maze.is_edge_blocked(Position::new(x, y), Direction::Up);
            out.push_str(if blocked { "---+" } else { "   +" });
        }
        out.push('\n');

        out.push('|');
        for x in 0..maze.width() {
            let position = Position::new(x, y);
            out.push(' ');
            out.push(marks.symbol_at(position));
            out.push(' ');
            out.push(if maze.is_edge_blocked(position, Direction::Right) {
                '|'
            } else {
                ' '
            });
        }
        out.push('\n');
    }

    out.push('+');
    for _ in 0..maze.width() {
        out.push_str("---+");
    }
    out.push('\n');
    out
}
