//! Fold rules used when several providers report the same control.

use glam::Vec2;

/// How values of one type are combined across providers.
///
/// Numeric and vector values are summed. Booleans are OR'd and stop the scan
/// on the first `true`. Gear requests take the first provider that asks for one.
pub trait Combine: Copy {
    /// Result when no provider contributes.
    const IDENTITY: Self;

    fn combine(self, other: Self) -> Self;

    /// Once saturated, further values cannot change the result.
    fn is_saturated(&self) -> bool {
        false
    }
}

impl Combine for f32 {
    const IDENTITY: Self = 0.0;

    fn combine(self, other: Self) -> Self {
        self + other
    }
}

impl Combine for i32 {
    const IDENTITY: Self = 0;

    fn combine(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl Combine for Vec2 {
    const IDENTITY: Self = Vec2::ZERO;

    fn combine(self, other: Self) -> Self {
        self + other
    }
}

impl Combine for bool {
    const IDENTITY: Self = false;

    fn combine(self, other: Self) -> Self {
        self || other
    }

    fn is_saturated(&self) -> bool {
        *self
    }
}

impl Combine for Option<i32> {
    const IDENTITY: Self = None;

    fn combine(self, other: Self) -> Self {
        self.or(other)
    }

    fn is_saturated(&self) -> bool {
        self.is_some()
    }
}
