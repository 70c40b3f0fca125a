use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Initial travel direction of a door.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorDirection {
    #[default]
    Up,
    Down,
}

impl DoorDirection {
    pub fn vector(self) -> Vec3 {
        match self {
            DoorDirection::Up => Vec3::Y,
            DoorDirection::Down => Vec3::NEG_Y,
        }
    }
}

/// Obstacle door moving back and forth along the vertical axis.
///
/// The door travels at `speed` units per second and reverses once it is
/// `max_distance` away from where its current leg started.
#[derive(Debug, Clone, PartialEq)]
pub struct OscillatingDoor {
    position: Vec3,
    anchor: Vec3,
    direction: Vec3,
    speed: f32,
    max_distance: f32,
}

impl OscillatingDoor {
    pub fn new(position: Vec3, direction: DoorDirection, speed: f32, max_distance: f32) -> Self {
        Self {
            position,
            anchor: position,
            direction: direction.vector(),
            speed,
            max_distance,
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.position += self.direction * self.speed * dt;

        if self.anchor.distance(self.position) >= self.max_distance {
            self.direction = -self.direction;
            self.anchor = self.position;
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_after_max_distance() {
        let mut door = OscillatingDoor::new(Vec3::ZERO, DoorDirection::Up, 2.0, 4.0);

        door.update(1.0);
        assert_eq!(door.position(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(door.direction(), Vec3::Y);

        door.update(1.0);
        assert_eq!(door.position(), Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(door.direction(), Vec3::NEG_Y);

        door.update(1.0);
        assert_eq!(door.position(), Vec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn down_door_starts_downwards_and_comes_back() {
        let mut door = OscillatingDoor::new(Vec3::new(1.0, 5.0, 0.0), DoorDirection::Down, 1.0, 1.0);
        door.update(1.0);
        assert_eq!(door.position(), Vec3::new(1.0, 4.0, 0.0));
        assert_eq!(door.direction(), Vec3::Y);

        door.update(1.0);
        assert_eq!(door.position(), Vec3::new(1.0, 5.0, 0.0));
        assert_eq!(door.direction(), Vec3::NEG_Y);
    }

    #[test]
    fn stationary_door_never_flips() {
        let mut door = OscillatingDoor::new(Vec3::ZERO, DoorDirection::Up, 0.0, 1.0);
        for _ in 0..10 {
            door.update(0.1);
        }
        assert_eq!(door.direction(), Vec3::Y);
    }
}
