// src/model/geometry.rs

use serde::Serialize;

/// A cell on the delivery grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Straight-line distance, used for proximity rankings.
    pub fn euclidean_distance(&self, other: &Location) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Travel cost in turns: the Euclidean distance rounded up.
    pub fn distance_to(&self, other: &Location) -> u32 {
        self.euclidean_distance(other).ceil() as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub rows: u32,
    pub cols: u32,
}

impl Grid {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    pub fn is_valid_location(&self, location: &Location) -> bool {
        location.x >= 0
            && location.y >= 0
            && (location.x as u32) < self.rows
            && (location.y as u32) < self.cols
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_rounds_up() {
        let a = Location::new(0, 0);
        assert_eq!(a.distance_to(&Location::new(1, 1)), 2);
        assert_eq!(a.distance_to(&Location::new(3, 4)), 5);
        assert_eq!(a.distance_to(&Location::new(0, 10)), 10);
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let points = [
            Location::new(0, 0),
            Location::new(7, 3),
            Location::new(-2, 11),
            Location::new(5, 5),
        ];
        for a in &points {
            assert_eq!(a.distance_to(a), 0);
            for b in &points {
                assert_eq!(a.distance_to(b), b.distance_to(a));
                assert_eq!(a.distance_to(b) as f64, a.euclidean_distance(b).ceil());
            }
        }
    }

    #[test]
    fn grid_bounds() {
        let grid = Grid::new(10, 5);
        assert!(grid.is_valid_location(&Location::new(0, 0)));
        assert!(grid.is_valid_location(&Location::new(9, 4)));
        assert!(!grid.is_valid_location(&Location::new(10, 0)));
        assert!(!grid.is_valid_location(&Location::new(0, 5)));
        assert!(!grid.is_valid_location(&Location::new(-1, 2)));
    }
}
