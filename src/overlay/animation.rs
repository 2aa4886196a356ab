//! Property animations with completion callbacks
//!
//! Time is always passed in by the caller, so the same animation can be
//! driven by a frame loop or by a virtual clock in tests.

use std::time::{Duration, Instant};

/// Ease-in-out timing curve over `t` in `0.0..=1.0`
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Values that can be interpolated
pub trait Lerp: Copy {
    fn lerp(self, to: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(self, to: Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

/// Animatable properties of the container and panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelVisuals {
    /// Opacity of the tinted container (fades on exit)
    pub container_alpha: f32,
    /// Opacity of the panel itself (fades on entry)
    pub panel_alpha: f32,
    /// Uniform scale of the panel about its center
    pub panel_scale: f32,
}

impl PanelVisuals {
    /// Resting state, also restored after every exit for reuse
    pub const IDENTITY: PanelVisuals = PanelVisuals {
        container_alpha: 1.0,
        panel_alpha: 1.0,
        panel_scale: 1.0,
    };

    /// Start of the pop-in
    pub fn popped(initial_scale: f32) -> Self {
        Self {
            container_alpha: 1.0,
            panel_alpha: 0.0,
            panel_scale: initial_scale,
        }
    }

    /// End of the pop-out
    pub fn shrunk(initial_scale: f32) -> Self {
        Self {
            container_alpha: 0.0,
            panel_alpha: 1.0,
            panel_scale: initial_scale,
        }
    }
}

impl Lerp for PanelVisuals {
    fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            container_alpha: self.container_alpha.lerp(to.container_alpha, t),
            panel_alpha: self.panel_alpha.lerp(to.panel_alpha, t),
            panel_scale: self.panel_scale.lerp(to.panel_scale, t),
        }
    }
}

/// A timed transition between two values
#[derive(Debug, Clone, Copy)]
pub struct Tween<T> {
    from: T,
    to: T,
    start: Instant,
    duration: Duration,
}

impl<T: Lerp> Tween<T> {
    pub fn new(from: T, to: T, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Linear progress in `0.0..=1.0`
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Eased value at `now`, exactly the target once finished
    pub fn value_at(&self, now: Instant) -> T {
        let progress = self.progress(now);
        if progress >= 1.0 {
            self.to
        } else {
            self.from.lerp(self.to, ease_in_out(progress))
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}

/// A tween plus the callbacks waiting for it
///
/// Completions run only when the animation finishes. A newer animation of the
/// same property that supersedes it inherits them, ahead of its own.
pub struct Animation<T, F> {
    tween: Tween<T>,
    completions: Vec<F>,
}

impl<T: Lerp, F> Animation<T, F> {
    pub fn new(tween: Tween<T>) -> Self {
        Self {
            tween,
            completions: Vec::new(),
        }
    }

    pub fn on_complete(&mut self, completion: Option<F>) {
        self.completions.extend(completion);
    }

    pub fn value_at(&self, now: Instant) -> T {
        self.tween.value_at(now)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.tween.is_finished(now)
    }

    /// Take over the callbacks of the animation this one replaces
    pub fn inherit(&mut self, previous: Self) {
        self.completions.extend(previous.completions);
    }

    pub fn into_completions(self) -> Vec<F> {
        self.completions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_in_out_endpoints() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 0.001);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
        assert_eq!(ease_in_out(-1.0), 0.0);
        assert_eq!(ease_in_out(2.0), 1.0);
    }

    #[test]
    fn test_tween_progress() {
        let start = Instant::now();
        let tween = Tween::new(0.0f32, 1.0, start, Duration::from_millis(300));

        assert_eq!(tween.value_at(start), 0.0);
        assert!(!tween.is_finished(start + Duration::from_millis(299)));
        assert!(tween.is_finished(start + Duration::from_millis(300)));
        assert_eq!(tween.value_at(start + Duration::from_secs(5)), 1.0);
        assert!((tween.value_at(start + Duration::from_millis(150)) - 0.5).abs() < 0.01);
    }

    #[test]
    fn test_zero_duration_finishes_immediately() {
        let start = Instant::now();
        let tween = Tween::new(0.0f32, 1.0, start, Duration::ZERO);
        assert!(tween.is_finished(start));
        assert_eq!(tween.value_at(start), 1.0);
    }

    #[test]
    fn test_panel_visuals_lerp() {
        let from = PanelVisuals::popped(0.1);
        let mid = from.lerp(PanelVisuals::IDENTITY, 0.5);

        assert!((mid.panel_scale - 0.55).abs() < 0.001);
        assert!((mid.panel_alpha - 0.5).abs() < 0.001);
        assert_eq!(mid.container_alpha, 1.0);
    }

    #[test]
    fn test_animation_collects_completions() {
        let start = Instant::now();
        let mut animation: Animation<f32, &str> =
            Animation::new(Tween::new(0.0, 1.0, start, Duration::from_millis(300)));
        animation.on_complete(Some("first"));
        animation.on_complete(None);
        animation.on_complete(Some("second"));

        assert_eq!(animation.into_completions(), vec!["first", "second"]);
    }

    #[test]
    fn test_replacement_inherits_completions_first() {
        let start = Instant::now();
        let mut previous: Animation<f32, &str> =
            Animation::new(Tween::new(0.0, 1.0, start, Duration::from_millis(300)));
        previous.on_complete(Some("superseded"));

        let mut replacement = Animation::new(Tween::new(0.4, 0.0, start, Duration::from_millis(300)));
        replacement.inherit(previous);
        replacement.on_complete(Some("own"));

        assert_eq!(replacement.into_completions(), vec!["superseded", "own"]);
    }
}
