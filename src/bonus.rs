use crate::constants::get_bonus_points;
use crate::maze::Maze;
use crate::types::{BonusView, CellPos};

#[derive(Clone, Debug)]
pub struct Bonus {
    cell: CellPos,
    points: u64,
    visible: bool,
}

impl Bonus {
    pub fn new(cell: CellPos, level: u32) -> Self {
        Self {
            cell,
            points: get_bonus_points(level),
            visible: false,
        }
    }

    pub fn cell(&self) -> CellPos {
        self.cell
    }

    pub fn position(&self) -> (f64, f64) {
        Maze::cell_center(self.cell)
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn set_points(&mut self, points: u64) {
        self.points = points;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Returns whether the bonus was on screen.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    pub fn view(&self) -> BonusView {
        let (x, y) = self.position();
        BonusView {
            x,
            y,
            points: self.points,
            visible: self.visible,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_follow_the_level() {
        let mut bonus = Bonus::new(CellPos::new(3, 4), 1);
        assert_eq!(bonus.points(), 100);
        bonus.set_points(get_bonus_points(4));
        assert_eq!(bonus.view().points, 400);
        assert_eq!(bonus.position(), (90.0, 70.0));
    }

    #[test]
    fn hide_reports_previous_visibility() {
        let mut bonus = Bonus::new(CellPos::new(1, 1), 1);
        assert!(!bonus.hide());
        bonus.show();
        assert!(bonus.is_visible());
        assert!(bonus.hide());
        assert!(!bonus.is_visible());
    }
}
