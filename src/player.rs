use crate::character::Character;
use crate::maze::Maze;
use crate::types::{CellPos, Direction};

#[derive(Clone, Debug)]
pub struct Player {
    pub character: Character,
    asked_dir: Option<Direction>,
    facing: Direction,
}

impl Player {
    pub fn new(spawn: CellPos, base_speed: f64) -> Self {
        Self {
            character: Character::new(spawn, base_speed),
            asked_dir: None,
            facing: Direction::None,
        }
    }

    pub fn asked_direction(&self) -> Option<Direction> {
        self.asked_dir
    }

    /// Last direction the player moved in; kept while stopped against a wall.
    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Queues a turn; it is taken the first time the corridor opens.
    pub fn ask(&mut self, dir: Direction) {
        if dir == Direction::None {
            return;
        }
        self.asked_dir = Some(dir);
    }

    pub fn init(&mut self) {
        self.character.respawn();
        self.asked_dir = None;
        self.facing = Direction::None;
    }

    pub fn update_move(&mut self, maze: &Maze, dt: f64) {
        let current = self.character.direction();
        if let Some(asked) = self.asked_dir {
            if asked == current {
                self.asked_dir = None;
            } else if current != Direction::None && asked == current.opposite() {
                self.turn(asked);
            } else if (current == Direction::None || self.character.is_on_center(dt))
                && maze.is_walkable(self.character.cell().step(asked))
            {
                self.character.move_on_center();
                self.turn(asked);
            }
        }

        let current = self.character.direction();
        if current == Direction::None {
            return;
        }
        if self.character.is_on_center(dt)
            && !maze.is_walkable(self.character.cell().step(current))
        {
            self.character.move_on_center();
            self.character.stop();
            return;
        }
        self.character.advance(dt);
    }

    fn turn(&mut self, dir: Direction) {
        self.character.go(dir);
        self.facing = dir;
        self.asked_dir = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MEDIUM_SPEED;
    use crate::layout::parse_layout;

    fn maze_and_player() -> (Maze, Player) {
        let layout = parse_layout(&[
            "#######",
            "#P....#",
            "#.###.#",
            "#.....#",
            "#######",
            "#GGGGB#",
            "#######",
        ])
        .expect("layout parses");
        let player = Player::new(layout.player_spawn, MEDIUM_SPEED);
        (layout.maze, player)
    }

    fn run(player: &mut Player, maze: &Maze, ticks: usize) {
        for _ in 0..ticks {
            player.update_move(maze, 1.0);
        }
    }

    #[test]
    fn stops_on_center_in_front_of_a_wall_and_keeps_facing() {
        let (maze, mut player) = maze_and_player();
        player.ask(Direction::Right);
        run(&mut player, &maze, 60);
        assert_eq!(player.character.cell(), CellPos::new(1, 5));
        assert_eq!(player.character.direction(), Direction::None);
        assert_eq!(player.facing(), Direction::Right);
        assert_eq!((player.character.x(), player.character.y()), (110.0, 30.0));
    }

    #[test]
    fn blocked_intent_stays_queued_until_the_corridor_opens() {
        let (maze, mut player) = maze_and_player();
        player.ask(Direction::Right);
        player.update_move(&maze, 1.0);
        player.ask(Direction::Down);
        run(&mut player, &maze, 3);
        assert_eq!(player.asked_direction(), Some(Direction::Down));
        run(&mut player, &maze, 60);
        assert_eq!(player.asked_direction(), None);
        assert_eq!(player.character.cell().col, 5);
        assert!(player.character.cell().row >= 2);
    }

    #[test]
    fn reverse_is_taken_immediately() {
        let (maze, mut player) = maze_and_player();
        player.ask(Direction::Right);
        run(&mut player, &maze, 3);
        let x_before = player.character.x();
        player.ask(Direction::Left);
        player.update_move(&maze, 1.0);
        assert_eq!(player.character.direction(), Direction::Left);
        assert!(player.character.x() < x_before);
    }

    #[test]
    fn intent_into_a_wall_from_rest_is_ignored() {
        let (maze, mut player) = maze_and_player();
        player.ask(Direction::Up);
        run(&mut player, &maze, 5);
        assert_eq!(player.character.direction(), Direction::None);
        assert_eq!(player.character.cell(), CellPos::new(1, 1));
        assert_eq!(player.asked_direction(), Some(Direction::Up));
    }
}
