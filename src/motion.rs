//! Cosmetic motion for the roadmap panel.
//!
//! The timeline fill eases toward its target instead of jumping, and the
//! cards fade in for a few frames after each phase change.

/// Fraction of the remaining distance covered per frame
const FILL_EASING: f64 = 0.25;
/// Distance below which the fill snaps to its target
const FILL_EPSILON: f64 = 0.002;
/// Frames the cards stay dimmed after a change
pub const REVEAL_FRAMES: u8 = 6;

/// Eased timeline fill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillTween {
    current: f64,
    target: f64,
}

impl FillTween {
    pub fn new(value: f64) -> Self {
        Self {
            current: value,
            target: value,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target.clamp(0.0, 1.0);
    }

    pub fn value(&self) -> f64 {
        self.current
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        if self.is_settled() {
            return;
        }
        let delta = self.target - self.current;
        if delta.abs() < FILL_EPSILON {
            self.current = self.target;
        } else {
            self.current += delta * FILL_EASING;
        }
    }
}

/// Card fade-in after a phase change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardReveal {
    frames_left: u8,
}

impl CardReveal {
    pub fn start(&mut self) {
        self.frames_left = REVEAL_FRAMES;
    }

    pub fn tick(&mut self) {
        self.frames_left = self.frames_left.saturating_sub(1);
    }

    /// Whether the cards should still render dimmed
    pub fn is_revealing(&self) -> bool {
        self.frames_left > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_converges_monotonically() {
        let mut tween = FillTween::new(0.0);
        tween.set_target(0.8);
        let mut last = 0.0;
        for _ in 0..100 {
            tween.tick();
            assert!(tween.value() >= last);
            assert!(tween.value() <= 0.8);
            last = tween.value();
        }
        assert!(tween.is_settled());
        assert_eq!(tween.value(), 0.8);
    }

    #[test]
    fn test_fill_target_is_clamped() {
        let mut tween = FillTween::new(0.5);
        tween.set_target(1.4);
        for _ in 0..100 {
            tween.tick();
        }
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn test_reveal_expires() {
        let mut reveal = CardReveal::default();
        assert!(!reveal.is_revealing());
        reveal.start();
        for _ in 0..REVEAL_FRAMES {
            assert!(reveal.is_revealing());
            reveal.tick();
        }
        assert!(!reveal.is_revealing());
    }
}
