use crate::Coords;
use crate::term::{Color, Screen};
use Direction::*;

use anyhow::Result;
use crossterm::event::KeyCode;
use log::trace;

pub const SNAKE_CHAR: char = '■';
const BODY_COLOR: Color = Color::Green;
const HEAD_COLOR: Color = Color::Red;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub fn from_key(code: KeyCode) -> Option<Direction> {
        match code {
            KeyCode::Up => Some(Up),
            KeyCode::Down => Some(Down),
            KeyCode::Left => Some(Left),
            KeyCode::Right => Some(Right),
            _ => None,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        matches!((self, other), (Up, Down) | (Down, Up) | (Right, Left) | (Left, Right))
    }
}

/// The body is stored tail first, so the head is always the last element.
pub struct Snake {
    body: Vec<Coords>,
    direction: Direction,
    score: u32,
}

impl Snake {
    pub fn new(pos: Coords) -> Self {
        Snake { body: vec![pos], direction: Right, score: 0 }
    }

    pub fn body(&self) -> &[Coords] {
        &self.body
    }

    pub fn head(&self) -> Coords {
        self.body[self.body.len() - 1]
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Credits one berry. The body catches up on the next move.
    pub fn eat(&mut self) {
        self.score += 1;
    }

    /// Arrow keys turn the snake; reversals and any other key are ignored.
    pub fn change_direction(&mut self, code: KeyCode) {
        if let Some(dir) = Direction::from_key(code) {
            self.set_direction(dir);
        }
    }

    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction.is_opposite(self.direction) {
            trace!("Ignoring reversal from {:?} to {:?}", self.direction, new_direction);
        } else {
            trace!("Heading {:?}", new_direction);
            self.direction = new_direction;
        }
    }

    pub fn move_step(&mut self) {
        let old_head = self.head();

        let new_head = match &self.direction {
            Up => (old_head.0, old_head.1.saturating_sub(1)),
            Down => (old_head.0, old_head.1 + 1),
            Left => (old_head.0.saturating_sub(1), old_head.1),
            Right => (old_head.0 + 1, old_head.1),
        };

        self.body.push(new_head);

        if self.body.len() > self.score as usize + 1 {
            self.body.remove(0);
        }
    }

    /// True when the head overlaps any other segment. Walls are the world's business.
    pub fn check_collision(&self) -> bool {
        let head = self.head();
        self.body[..self.body.len() - 1].contains(&head)
    }

    pub fn draw<S: Screen>(&self, screen: &mut S) -> Result<()> {
        screen.set_color(BODY_COLOR)?;
        for pos in &self.body {
            screen.print_at(*pos, SNAKE_CHAR)?;
        }

        screen.set_color(HEAD_COLOR)?;
        screen.print_at(self.head(), SNAKE_CHAR)
    }
}
