use crate::constants::{CENTER_EPSILON, LEVEL_SPEED_INCREASE, MAX_SPEED};
use crate::maze::Maze;
use crate::types::{CellPos, CharacterView, Direction};

/// Motion state shared by the player and the ghosts.
///
/// Coordinates are pixels; speeds are pixels per reference tick and are
/// always axis-aligned.
#[derive(Clone, Debug)]
pub struct Character {
    x: f64,
    y: f64,
    x_speed: f64,
    y_speed: f64,
    speed: f64,
    normal_speed: f64,
    base_speed: f64,
    spawn: CellPos,
}

impl Character {
    pub fn new(spawn: CellPos, base_speed: f64) -> Self {
        let (x, y) = Maze::cell_center(spawn);
        Self {
            x,
            y,
            x_speed: 0.0,
            y_speed: 0.0,
            speed: base_speed,
            normal_speed: base_speed,
            base_speed,
            spawn,
        }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn x_speed(&self) -> f64 {
        self.x_speed
    }

    pub fn y_speed(&self) -> f64 {
        self.y_speed
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn normal_speed(&self) -> f64 {
        self.normal_speed
    }

    pub fn spawn(&self) -> CellPos {
        self.spawn
    }

    pub fn cell(&self) -> CellPos {
        CellPos::new(Maze::row_from_y(self.y), Maze::col_from_x(self.x))
    }

    pub fn direction(&self) -> Direction {
        if self.x_speed > 0.0 {
            Direction::Right
        } else if self.x_speed < 0.0 {
            Direction::Left
        } else if self.y_speed > 0.0 {
            Direction::Down
        } else if self.y_speed < 0.0 {
            Direction::Up
        } else {
            Direction::None
        }
    }

    pub fn is_moving(&self) -> bool {
        self.direction() != Direction::None
    }

    pub fn go(&mut self, dir: Direction) {
        let (x_speed, y_speed) = match dir {
            Direction::Up => (0.0, -self.speed),
            Direction::Down => (0.0, self.speed),
            Direction::Left => (-self.speed, 0.0),
            Direction::Right => (self.speed, 0.0),
            Direction::None => (0.0, 0.0),
        };
        self.x_speed = x_speed;
        self.y_speed = y_speed;
    }

    pub fn stop(&mut self) {
        self.go(Direction::None);
    }

    /// Changes the current speed while keeping the heading.
    pub fn set_speed(&mut self, speed: f64) {
        let dir = self.direction();
        self.speed = speed.min(MAX_SPEED);
        self.go(dir);
    }

    pub fn increase_speed(&mut self) {
        self.normal_speed = (self.normal_speed * (1.0 + LEVEL_SPEED_INCREASE)).min(MAX_SPEED);
    }

    /// Back to the tier speed, then `levels` level increments.
    pub fn init_speed(&mut self, levels: u32) {
        self.normal_speed = self.base_speed;
        for _ in 0..levels {
            self.increase_speed();
        }
        self.set_speed(self.normal_speed);
    }

    pub fn compute_next_position(&self, dt: f64) -> (f64, f64) {
        (self.x + self.x_speed * dt, self.y + self.y_speed * dt)
    }

    pub fn advance(&mut self, dt: f64) {
        let (x, y) = self.compute_next_position(dt);
        self.x = x;
        self.y = y;
    }

    /// True when the current cell's center lies within this tick's step.
    pub fn is_on_center(&self, dt: f64) -> bool {
        let (cx, cy) = Maze::cell_center(self.cell());
        reaches_center(self.x, self.x_speed * dt, cx)
            && reaches_center(self.y, self.y_speed * dt, cy)
    }

    pub fn move_on_center(&mut self) {
        let (cx, cy) = Maze::cell_center(self.cell());
        self.x = cx;
        self.y = cy;
    }

    pub fn respawn(&mut self) {
        let (x, y) = Maze::cell_center(self.spawn);
        self.x = x;
        self.y = y;
        self.stop();
    }

    pub fn view(&self) -> CharacterView {
        CharacterView {
            x: self.x,
            y: self.y,
            x_speed: self.x_speed,
            y_speed: self.y_speed,
            dir: self.direction(),
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

fn reaches_center(pos: f64, step: f64, center: f64) -> bool {
    if step == 0.0 {
        (pos - center).abs() < CENTER_EPSILON
    } else if step > 0.0 {
        pos <= center + CENTER_EPSILON && pos + step >= center - CENTER_EPSILON
    } else {
        pos >= center - CENTER_EPSILON && pos + step <= center + CENTER_EPSILON
    }
}
