use serde::{Deserialize, Serialize};

/// Settings for the on-screen steering wheel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringWheelSettings {
    /// Rotation in degrees at which the wheel reports full lock.
    pub maximum_angle: f32,

    /// Degrees per second the wheel rotates back to center once released.
    pub return_to_center_speed: f32,
}

impl Default for SteeringWheelSettings {
    fn default() -> Self {
        Self {
            maximum_angle: 270.0,
            return_to_center_speed: 300.0,
        }
    }
}

/// On-screen wheel widget rotated by dragging.
#[derive(Debug, Clone, PartialEq)]
pub struct SteeringWheel {
    settings: SteeringWheelSettings,
    angle: f32,
    held: bool,
}

impl SteeringWheel {
    pub fn new(settings: SteeringWheelSettings) -> Self {
        Self {
            settings,
            angle: 0.0,
            held: false,
        }
    }

    pub fn grab(&mut self) {
        self.held = true;
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Rotates by `delta_deg`, stopping at full lock either side.
    pub fn drag(&mut self, delta_deg: f32) {
        let max = self.settings.maximum_angle;
        if max.is_nan() || max <= 0.0 {
            return;
        }
        self.angle = (self.angle + delta_deg).clamp(-max, max);
    }

    /// Returns the wheel towards center while it is not held.
    pub fn update(&mut self, dt: f32) {
        if self.held {
            return;
        }
        // NaN or negative speeds never push the wheel outwards
        let step = (self.settings.return_to_center_speed * dt).max(0.0);
        if self.angle.abs() <= step {
            self.angle = 0.0;
        } else {
            self.angle -= step * self.angle.signum();
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Wheel position normalised to `-1..1`.
    pub fn clamped_value(&self) -> f32 {
        if self.settings.maximum_angle <= 0.0 {
            return 0.0;
        }
        (self.angle / self.settings.maximum_angle).clamp(-1.0, 1.0)
    }
}

impl Default for SteeringWheel {
    fn default() -> Self {
        Self::new(SteeringWheelSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_is_clamped_to_full_lock() {
        let mut wheel = SteeringWheel::default();
        wheel.grab();
        wheel.drag(1000.0);
        assert_eq!(wheel.angle(), 270.0);
        assert_eq!(wheel.clamped_value(), 1.0);

        wheel.drag(-405.0);
        assert_eq!(wheel.clamped_value(), -0.5);
    }

    #[test]
    fn released_wheel_returns_to_center() {
        let mut wheel = SteeringWheel::default();
        wheel.grab();
        wheel.drag(135.0);

        wheel.update(1.0);
        assert_eq!(wheel.angle(), 135.0);

        wheel.release();
        wheel.update(0.25);
        assert_eq!(wheel.angle(), 60.0);
        wheel.update(1.0);
        assert_eq!(wheel.angle(), 0.0);
    }

    #[test]
    fn zero_maximum_angle_reports_neutral() {
        let wheel = SteeringWheel::new(SteeringWheelSettings {
            maximum_angle: 0.0,
            return_to_center_speed: 0.0,
        });
        assert_eq!(wheel.clamped_value(), 0.0);
    }

    #[test]
    fn broken_settings_keep_wheel_centered() {
        let mut wheel = SteeringWheel::new(SteeringWheelSettings {
            maximum_angle: -90.0,
            return_to_center_speed: -300.0,
        });
        wheel.drag(10.0);
        assert_eq!(wheel.angle(), 0.0);
        assert_eq!(wheel.clamped_value(), 0.0);

        let mut wheel = SteeringWheel::new(SteeringWheelSettings {
            maximum_angle: 270.0,
            return_to_center_speed: -300.0,
        });
        wheel.drag(10.0);
        for _ in 0..10 {
            wheel.update(1.0);
        }
        assert_eq!(wheel.angle(), 10.0);
    }
}
