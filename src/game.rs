use std::time::Instant;

use crate::config::GameConfig;
use crate::snake::Snake;
use crate::term::{Color, KeySource, Screen};
use crate::world::World;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Running,
    GameOver,
    /// Ctrl+C, the raw terminal swallows SIGINT
    Quit,
}

pub struct SnakeGame<'t, T> {
    config: GameConfig,
    world: World,
    snake: Snake,
    term: &'t mut T,
    state: GameState,
    last_tick: Instant,
}

impl<'t, T: Screen + KeySource> SnakeGame<'t, T> {
    pub fn new(config: GameConfig, term: &'t mut T) -> Result<Self> {
        let world = World::new(config.width, config.height, term)?;
        Ok(Self::with_world(config, term, world))
    }

    #[cfg(test)]
    pub fn with_rng(config: GameConfig, term: &'t mut T, rng: rand::rngs::StdRng) -> Result<Self> {
        let world = World::with_rng(config.width, config.height, term, rng)?;
        Ok(Self::with_world(config, term, world))
    }

    fn with_world(config: GameConfig, term: &'t mut T, world: World) -> Self {
        let snake = Snake::new(world.center());
        SnakeGame { config, world, snake, term, state: GameState::Running, last_tick: Instant::now() }
    }

    /// Plays until the snake crashes or the player quits, returning the final score.
    pub fn run(&mut self) -> Result<u32> {
        self.last_tick = Instant::now();

        while self.state == GameState::Running {
            self.step()?;
        }

        if self.state == GameState::GameOver {
            self.end_game()?;
        }

        Ok(self.snake.score())
    }

    /// One loop iteration: at most one key, then a tick if one is due.
    pub fn step(&mut self) -> Result<()> {
        let wait = self.config.tick_interval.saturating_sub(self.last_tick.elapsed());

        if self.term.key_available(wait)? {
            let key = self.term.read_key()?;
            self.process_input(key);
        }

        if self.state == GameState::Running && self.last_tick.elapsed() >= self.config.tick_interval {
            self.tick()?;
            self.last_tick = Instant::now();
        }

        Ok(())
    }

    fn process_input(&mut self, key: KeyEvent) {
        if is_ctrl_c(&key) {
            info!("Quit requested with score {}", self.snake.score());
            self.state = GameState::Quit;
        } else {
            self.snake.change_direction(key.code);
        }
    }

    fn tick(&mut self) -> Result<()> {
        self.snake.move_step();
        self.world.check_berry_collision(&mut self.snake);
        self.draw_world()?;

        let hit_self = self.snake.check_collision();
        let hit_wall = self.world.check_wall_collision(&self.snake);

        if hit_self || hit_wall {
            info!(
                "Game over at {:?} ({}), score {}",
                self.snake.head(),
                if hit_self { "self" } else { "wall" },
                self.snake.score()
            );
            self.state = GameState::GameOver;
        } else {
            debug!(
                "Head at {:?} heading {:?}, berry at {:?}",
                self.snake.head(),
                self.snake.get_direction(),
                self.world.berry()
            );
        }

        Ok(())
    }

    fn draw_world(&mut self) -> Result<()> {
        self.term.clear()?;
        self.world.draw_borders(self.term)?;
        self.world.draw_berry(self.term)?;
        self.snake.draw(self.term)?;
        self.term.flush()
    }

    fn end_game(&mut self) -> Result<()> {
        let pos = (self.world.width() / 5, self.world.height() / 2);

        self.term.set_color(Color::White)?;
        self.term.move_to(pos)?;
        self.term.write_str(&format!("Game over, Score: {}", self.snake.score()))?;
        self.term.flush()
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
