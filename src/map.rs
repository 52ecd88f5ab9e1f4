use std::ops::{Index, IndexMut};

use anyhow::{bail, Context};

/// Row-major `(row, col)` coordinate.
pub type Position = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    // Counter-clockwise
    pub fn turn_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    pub fn turn_right(self) -> Self {
        self.turn_left().opposite()
    }
}

/// Dense 2-D grid parsed from puzzle text.
///
/// The grid knows nothing about walls or costs; transitions decide what a cell
/// means. Out-of-range access through [`Grid::get`] yields `None` instead of
/// panicking, so transitions can probe freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    pub height: usize,
    pub width: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    pub fn new(height: usize, width: usize, fill: T) -> Self
    where
        T: Clone,
    {
        Grid {
            height,
            width,
            cells: vec![fill; height * width],
        }
    }

    pub fn from_rows(rows: Vec<Vec<T>>) -> anyhow::Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            bail!("grid is empty");
        }

        let mut cells = Vec::with_capacity(height * width);
        for (row_index, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                bail!(
                    "row {row_index} has {} cells, expected {width}",
                    row.len()
                );
            }
            cells.extend(row);
        }

        Ok(Grid {
            height,
            width,
            cells,
        })
    }

    /// Parse one cell per character, skipping blank lines and trailing whitespace.
    pub fn parse<F>(input: &str, mut parse_cell: F) -> anyhow::Result<Self>
    where
        F: FnMut(Position, char) -> anyhow::Result<T>,
    {
        let rows = input
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(x, line)| {
                line.chars()
                    .enumerate()
                    .map(|(y, ch)| {
                        parse_cell((x, y), ch)
                            .with_context(|| format!("invalid cell {ch:?} at ({x}, {y})"))
                    })
                    .collect::<anyhow::Result<Vec<T>>>()
            })
            .collect::<anyhow::Result<Vec<Vec<T>>>>()?;

        Self::from_rows(rows)
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.0 < self.height && position.1 < self.width
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        if self.in_bounds(position) {
            self.cells.get(position.0 * self.width + position.1)
        } else {
            None
        }
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let width = self.width;
        (0..self.height).flat_map(move |x| (0..width).map(move |y| (x, y)))
    }

    pub fn find<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = Position> + 'a
    where
        P: FnMut(&T) -> bool + 'a,
    {
        self.positions().filter(move |&position| predicate(&self[position]))
    }

    pub fn step(&self, position: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let x = position.0.checked_add_signed(dx)?;
        let y = position.1.checked_add_signed(dy)?;
        self.in_bounds((x, y)).then_some((x, y))
    }

    /// 4-connected neighbors inside the grid.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| self.step(position, direction))
    }

    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            height: self.height,
            width: self.width,
            cells: self.cells.iter().map(f).collect(),
        }
    }
}

impl Grid<char> {
    pub fn from_chars(input: &str) -> anyhow::Result<Self> {
        Self::parse(input, |_, ch| Ok(ch))
    }
}

impl Grid<u8> {
    pub fn from_digits(input: &str) -> anyhow::Result<Self> {
        Self::parse(input, |_, ch| match ch.to_digit(10) {
            Some(digit) => Ok(digit as u8),
            None => bail!("expected a digit"),
        })
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, position: Position) -> &T {
        assert!(
            self.in_bounds(position),
            "position {position:?} outside {}x{} grid",
            self.height,
            self.width
        );
        &self.cells[position.0 * self.width + position.1]
    }
}

impl<T> IndexMut<Position> for Grid<T> {
    fn index_mut(&mut self, position: Position) -> &mut T {
        assert!(
            self.in_bounds(position),
            "position {position:?} outside {}x{} grid",
            self.height,
            self.width
        );
        &mut self.cells[position.0 * self.width + position.1]
    }
}
