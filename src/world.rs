use crate::{Coords, TermInt};
use crate::snake::Snake;
use crate::term::{Color, Screen};

use anyhow::{ensure, Result};
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const WALL_CHAR: char = '■';
pub const BERRY_CHAR: char = '■';

pub struct World {
    width: TermInt,
    height: TermInt,
    berry: Coords,
    rng: StdRng,
}

impl World {
    pub fn new<S: Screen>(width: TermInt, height: TermInt, screen: &mut S) -> Result<Self> {
        Self::with_rng(width, height, screen, StdRng::from_entropy())
    }

    pub fn with_rng<S: Screen>(width: TermInt, height: TermInt, screen: &mut S, rng: StdRng) -> Result<Self> {
        ensure!(width >= 3 && height >= 3, "grid of {}x{} has no interior", width, height);

        screen.set_size(width, height)?;

        let mut world = World { width, height, berry: (1, 1), rng };
        world.place_berry();
        Ok(world)
    }

    pub fn width(&self) -> TermInt {
        self.width
    }

    pub fn height(&self) -> TermInt {
        self.height
    }

    /// Where the snake starts.
    pub fn center(&self) -> Coords {
        (self.width / 2, self.height / 2)
    }

    pub fn berry(&self) -> Coords {
        self.berry
    }

    #[cfg(test)]
    pub fn set_berry(&mut self, pos: Coords) {
        self.berry = pos;
    }

    /// Any interior cell is fair game, including ones under the snake.
    pub fn place_berry(&mut self) {
        let x = self.rng.gen_range(1..=self.width - 2);
        let y = self.rng.gen_range(1..=self.height - 2);
        self.berry = (x, y);
    }

    pub fn check_berry_collision(&mut self, snake: &mut Snake) -> bool {
        if snake.head() != self.berry {
            return false;
        }

        snake.eat();
        self.place_berry();
        debug!("Berry eaten, score {}, length {}, next berry at {:?}", snake.score(), snake.body().len(), self.berry);
        true
    }

    pub fn check_wall_collision(&self, snake: &Snake) -> bool {
        let (x, y) = snake.head();
        x == 0 || y == 0 || x == self.width - 1 || y == self.height - 1
    }

    pub fn draw_borders<S: Screen>(&self, screen: &mut S) -> Result<()> {
        let (end_x, end_y) = (self.width - 1, self.height - 1);
        screen.set_color(Color::White)?;

        for x in 0..self.width {
            screen.print_at((x, 0), WALL_CHAR)?;
            screen.print_at((x, end_y), WALL_CHAR)?;
        }

        for y in 0..self.height {
            screen.print_at((0, y), WALL_CHAR)?;
            screen.print_at((end_x, y), WALL_CHAR)?;
        }

        Ok(())
    }

    pub fn draw_berry<S: Screen>(&self, screen: &mut S) -> Result<()> {
        screen.set_color(Color::Cyan)?;
        screen.print_at(self.berry, BERRY_CHAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::fake::{FakeTerm, Op};

    fn seeded_world(width: TermInt, height: TermInt) -> (World, FakeTerm) {
        let mut term = FakeTerm::new();
        let world = World::with_rng(width, height, &mut term, StdRng::seed_from_u64(7)).unwrap();
        (world, term)
    }

    #[test]
    fn test_new_sizes_screen() {
        let (world, term) = seeded_world(32, 16);
        assert_eq!((world.width(), world.height()), (32, 16));
        assert_eq!(term.ops, vec![Op::SetSize(32, 16)]);
    }

    #[test]
    fn test_center() {
        assert_eq!(seeded_world(32, 16).0.center(), (16, 8));
        assert_eq!(seeded_world(5, 3).0.center(), (2, 1));
    }

    #[test]
    fn test_rejects_grid_without_interior() {
        let mut term = FakeTerm::new();
        assert!(World::new(2, 16, &mut term).is_err());
        assert!(World::new(32, 2, &mut term).is_err());
        assert!(term.ops.is_empty());
        assert!(World::new(3, 3, &mut term).is_ok());
    }

    #[test]
    fn test_berry_stays_in_interior() {
        let (mut world, _) = seeded_world(32, 16);
        let (mut seen_max_x, mut seen_max_y) = (false, false);

        for _ in 0..2000 {
            world.place_berry();
            let (x, y) = world.berry();
            assert!(x >= 1 && x <= 30, "x = {}", x);
            assert!(y >= 1 && y <= 14, "y = {}", y);
            seen_max_x |= x == 30;
            seen_max_y |= y == 14;
        }

        assert!(seen_max_x && seen_max_y);
    }

    #[test]
    fn test_smallest_grid_has_one_berry_cell() {
        let (mut world, _) = seeded_world(3, 3);
        for _ in 0..10 {
            world.place_berry();
            assert_eq!(world.berry(), (1, 1));
        }
    }

    #[test]
    fn test_eating_berry() {
        let (mut world, _) = seeded_world(32, 16);
        let mut snake = Snake::new((16, 8));
        world.set_berry((16, 8));

        assert!(world.check_berry_collision(&mut snake));
        assert_eq!(snake.score(), 1);
        let (x, y) = world.berry();
        assert!(x >= 1 && x <= 30 && y >= 1 && y <= 14);
    }

    #[test]
    fn test_missing_berry() {
        let (mut world, _) = seeded_world(32, 16);
        let mut snake = Snake::new((16, 8));
        world.set_berry((3, 3));

        assert!(!world.check_berry_collision(&mut snake));
        assert_eq!(snake.score(), 0);
        assert_eq!(world.berry(), (3, 3));
    }

    #[test]
    fn test_wall_collision_on_ring_only() {
        let (world, _) = seeded_world(32, 16);

        for x in 0..32 {
            for y in 0..16 {
                let on_ring = x == 0 || y == 0 || x == 31 || y == 15;
                assert_eq!(world.check_wall_collision(&Snake::new((x, y))), on_ring, "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_left_column_is_wall_on_every_row() {
        let (world, _) = seeded_world(32, 16);
        for y in 0..16 {
            let mut snake = Snake::new((1, y));
            snake.set_direction(crate::snake::Direction::Up);
            snake.set_direction(crate::snake::Direction::Left);
            snake.move_step();
            assert_eq!(snake.head(), (0, y));
            assert!(world.check_wall_collision(&snake));
        }
    }

    #[test]
    fn test_draw_borders() {
        let (world, mut term) = seeded_world(5, 4);
        world.draw_borders(&mut term).unwrap();

        assert_eq!(term.cells.len(), 2 * 5 + 2 * 4 - 4);
        assert!(term.cells.values().all(|&c| c == (WALL_CHAR, Color::White)));
        assert_eq!(term.cell((2, 1)), None);
        assert_eq!(term.cell((4, 3)), Some((WALL_CHAR, Color::White)));
    }

    #[test]
    fn test_draw_berry() {
        let (mut world, mut term) = seeded_world(32, 16);
        world.set_berry((9, 4));
        world.draw_berry(&mut term).unwrap();

        assert_eq!(term.cell((9, 4)), Some((BERRY_CHAR, Color::Cyan)));
        assert_eq!(term.cells.len(), 1);
    }
}
