//! Scroll-progress controller.
//!
//! Maps the viewport's scroll position onto a discrete active phase index.
//! Geometry comes from an injected [`GeometryProvider`]; observers receive
//! changes through a `tokio::sync::watch` channel, so a recompute that lands
//! on the same index never notifies anyone.

use clap::ValueEnum;
use tokio::sync::watch;

/// Fraction of the viewport height where the activation line sits
pub const DEFAULT_TRIGGER_RATIO: f64 = 0.3;

/// Layout measurements needed for one recompute, in terminal rows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportGeometry {
    /// Offset of the roadmap container from the document top
    pub container_top: f64,
    /// Rendered height of the roadmap container
    pub container_height: f64,
    /// Current vertical scroll offset
    pub scroll_y: f64,
    /// Height of the visible viewport
    pub viewport_height: f64,
}

/// Host capability that measures the layout on demand.
///
/// Returns `None` when the container is detached or cannot be measured.
pub trait GeometryProvider {
    fn geometry(&self) -> Option<ViewportGeometry>;
}

/// How many buckets the scroll progress is divided into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BucketPolicy {
    /// `N + 1` buckets; the last one selects the placeholder phase
    #[default]
    Skewed,
    /// `N` buckets, one per phase
    Exact,
}

impl BucketPolicy {
    pub fn bucket_count(&self, phase_count: usize) -> usize {
        match self {
            BucketPolicy::Skewed => phase_count + 1,
            BucketPolicy::Exact => phase_count,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BucketPolicy::Skewed => "skewed (N+1)",
            BucketPolicy::Exact => "exact (N)",
        }
    }
}

/// Tunables for the controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub trigger_ratio: f64,
    pub bucket_policy: BucketPolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            trigger_ratio: DEFAULT_TRIGGER_RATIO,
            bucket_policy: BucketPolicy::default(),
        }
    }
}

/// A transition of the active index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseChange {
    pub from: usize,
    pub to: usize,
}

/// Visual state of a timeline position relative to the active index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    Completed,
    Current,
    Upcoming,
}

/// Classify a catalog position against the active index
pub fn classify(position: usize, active: usize) -> PhaseStatus {
    use std::cmp::Ordering;
    match position.cmp(&active) {
        Ordering::Less => PhaseStatus::Completed,
        Ordering::Equal => PhaseStatus::Current,
        Ordering::Greater => PhaseStatus::Upcoming,
    }
}

/// Map a progress fraction onto a bucket index in `[0, bucket_count - 1]`
pub fn map_progress(progress: f64, bucket_count: usize) -> usize {
    if bucket_count == 0 {
        return 0;
    }
    let raw = (progress * bucket_count as f64).floor();
    if raw <= 0.0 || raw.is_nan() {
        0
    } else {
        (raw as usize).min(bucket_count - 1)
    }
}

/// Timeline fill fraction for the active index, in `[0, 1]`
pub fn fill_ratio(active: usize, phase_count: usize) -> f64 {
    if phase_count <= 1 {
        return 1.0;
    }
    (active as f64 / (phase_count - 1) as f64).clamp(0.0, 1.0)
}

/// Receiving end of the change notifications
#[derive(Debug)]
pub struct PhaseReceiver {
    rx: watch::Receiver<usize>,
}

impl PhaseReceiver {
    /// New index if it changed since the last call
    pub fn take_change(&mut self) -> Option<usize> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }
}

/// Owns the active phase index and recomputes it on scroll signals
#[derive(Debug)]
pub struct ScrollController {
    phase_count: usize,
    config: ControllerConfig,
    active: usize,
    tx: watch::Sender<usize>,
}

impl ScrollController {
    pub fn new(phase_count: usize, config: ControllerConfig) -> Self {
        let (tx, _) = watch::channel(0);
        Self {
            phase_count,
            config,
            active: 0,
            tx,
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn phase_count(&self) -> usize {
        self.phase_count
    }

    pub fn config(&self) -> ControllerConfig {
        self.config
    }

    /// Register an observer; dropping the receiver unsubscribes it
    pub fn subscribe(&self) -> PhaseReceiver {
        PhaseReceiver {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Handle a scroll signal, measuring through the provider.
    ///
    /// A provider that cannot measure skips the cycle and keeps the state.
    pub fn on_scroll(&mut self, provider: &dyn GeometryProvider) -> Option<PhaseChange> {
        match provider.geometry() {
            Some(geometry) => self.recompute(&geometry),
            None => {
                tracing::trace!("geometry unavailable, recompute skipped");
                None
            }
        }
    }

    /// Compute the index for `geometry` without touching the state
    pub fn target_index(&self, geometry: &ViewportGeometry) -> Option<usize> {
        if self.phase_count == 0
            || geometry.container_height.is_nan()
            || geometry.container_height <= 0.0
        {
            return None;
        }

        let trigger_y = geometry.scroll_y + geometry.viewport_height * self.config.trigger_ratio;
        let container_top = geometry.container_top;
        let container_bottom = container_top + geometry.container_height;

        if trigger_y >= container_top && trigger_y <= container_bottom {
            let progress = (trigger_y - container_top) / geometry.container_height;
            let buckets = self.config.bucket_policy.bucket_count(self.phase_count);
            Some(map_progress(progress, buckets))
        } else if trigger_y < container_top {
            Some(0)
        } else {
            Some(self.phase_count - 1)
        }
    }

    /// Smallest scroll offset at which `index` becomes active.
    ///
    /// Only meaningful for indices inside the bucket range.
    pub fn activation_scroll(
        &self,
        index: usize,
        container_top: f64,
        container_height: f64,
        viewport_height: f64,
    ) -> f64 {
        let buckets = self.config.bucket_policy.bucket_count(self.phase_count).max(1);
        let trigger_y = container_top + container_height * index as f64 / buckets as f64;
        (trigger_y - viewport_height * self.config.trigger_ratio).ceil()
    }

    /// Run the transition function against `geometry`
    pub fn recompute(&mut self, geometry: &ViewportGeometry) -> Option<PhaseChange> {
        let next = self.target_index(geometry)?;
        self.transition(next)
    }

    /// Return to the initial state
    pub fn reset(&mut self) -> Option<PhaseChange> {
        self.transition(0)
    }

    fn transition(&mut self, next: usize) -> Option<PhaseChange> {
        if next == self.active {
            return None;
        }

        let change = PhaseChange {
            from: self.active,
            to: next,
        };
        self.active = next;
        self.tx.send_if_modified(|value| {
            if *value == next {
                false
            } else {
                *value = next;
                true
            }
        });

        tracing::debug!(from = change.from, to = change.to, "active phase changed");
        Some(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const N: usize = 6;

    /// Container at y=[1000, 4000), viewport 1000 rows tall
    fn scenario(scroll_y: f64) -> ViewportGeometry {
        ViewportGeometry {
            container_top: 1000.0,
            container_height: 3000.0,
            scroll_y,
            viewport_height: 1000.0,
        }
    }

    fn controller() -> ScrollController {
        ScrollController::new(N, ControllerConfig::default())
    }

    struct Fixed(Option<ViewportGeometry>);

    impl GeometryProvider for Fixed {
        fn geometry(&self) -> Option<ViewportGeometry> {
            self.0
        }
    }

    #[test]
    fn test_above_container_forces_first_phase() {
        let mut c = controller();
        c.recompute(&scenario(2600.0));
        assert_eq!(c.active_index(), 4);

        let change = c.recompute(&scenario(0.0));
        assert_eq!(change, Some(PhaseChange { from: 4, to: 0 }));
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_scenario_a_starts_at_zero() {
        let mut c = controller();
        assert_eq!(c.recompute(&scenario(0.0)), None);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_scenario_b_early_progress() {
        let mut c = controller();
        assert_eq!(c.recompute(&scenario(1000.0)), None);
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_scenario_c_selects_fifth_phase() {
        let mut c = controller();
        assert_eq!(c.recompute(&scenario(2600.0)), Some(PhaseChange { from: 0, to: 4 }));
        assert_eq!(crate::catalog::resolve(c.active_index()).label(), "PHASE 5:");
    }

    #[test]
    fn test_scenario_d_below_container_forces_last_phase() {
        let mut c = controller();
        c.recompute(&scenario(10_000.0));
        assert_eq!(c.active_index(), N - 1);
    }

    #[test]
    fn test_scenario_e_fill_ratio() {
        assert!((fill_ratio(4, N) - 0.8).abs() < 1e-9);
        assert_eq!(fill_ratio(0, N), 0.0);
        assert_eq!(fill_ratio(5, N), 1.0);
        // Placeholder index stays capped
        assert_eq!(fill_ratio(6, N), 1.0);
    }

    #[test]
    fn test_single_phase_fill_is_full() {
        assert_eq!(fill_ratio(0, 1), 1.0);
    }

    #[test]
    fn test_trigger_at_container_top_maps_to_zero() {
        let mut c = controller();
        // trigger_y = 700 + 300 = 1000 == container_top
        c.recompute(&scenario(700.0));
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_trigger_at_container_bottom_hits_placeholder() {
        let mut c = controller();
        // trigger_y = 3700 + 300 = 4000 == container_bottom
        c.recompute(&scenario(3700.0));
        assert_eq!(c.active_index(), N);
        assert!(crate::catalog::resolve(c.active_index()).is_placeholder());
    }

    #[test]
    fn test_exact_policy_never_exceeds_catalog() {
        let config = ControllerConfig {
            bucket_policy: BucketPolicy::Exact,
            ..ControllerConfig::default()
        };
        let mut c = ScrollController::new(N, config);
        for step in 0..=500 {
            c.recompute(&scenario(step as f64 * 10.0));
            assert!(c.active_index() < N);
        }
        c.recompute(&scenario(3700.0));
        assert_eq!(c.active_index(), N - 1);
    }

    #[test]
    fn test_index_stays_in_range_and_monotonic() {
        let mut c = controller();
        let mut last = 0;
        for step in 0..=1200 {
            c.recompute(&scenario(step as f64 * 10.0));
            let index = c.active_index();
            assert!(index <= N);
            // Past the container bottom the index snaps back to N-1
            if step as f64 * 10.0 + 300.0 <= 4000.0 {
                assert!(index >= last, "index went backwards at step {}", step);
                last = index;
            }
        }
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut c = controller();
        let mut rx = c.subscribe();

        assert!(c.recompute(&scenario(2600.0)).is_some());
        assert_eq!(rx.take_change(), Some(4));

        assert!(c.recompute(&scenario(2600.0)).is_none());
        assert_eq!(rx.take_change(), None);
        assert_eq!(c.active_index(), 4);
    }

    #[test]
    fn test_detached_provider_keeps_state() {
        let mut c = controller();
        c.on_scroll(&Fixed(Some(scenario(2600.0))));
        assert_eq!(c.active_index(), 4);

        assert_eq!(c.on_scroll(&Fixed(None)), None);
        assert_eq!(c.active_index(), 4);
    }

    #[test]
    fn test_zero_height_container_is_skipped() {
        let mut c = controller();
        c.recompute(&scenario(2600.0));
        let flat = ViewportGeometry {
            container_height: 0.0,
            ..scenario(0.0)
        };
        assert_eq!(c.recompute(&flat), None);
        assert_eq!(c.active_index(), 4);
    }

    #[test]
    fn test_dropped_receiver_unsubscribes() {
        let c = controller();
        let rx = c.subscribe();
        assert_eq!(c.subscriber_count(), 1);
        drop(rx);
        assert_eq!(c.subscriber_count(), 0);
    }

    #[test]
    fn test_reset_notifies_once() {
        let mut c = controller();
        let mut rx = c.subscribe();
        c.recompute(&scenario(10_000.0));
        assert_eq!(rx.take_change(), Some(5));
        assert_eq!(c.reset(), Some(PhaseChange { from: 5, to: 0 }));
        assert_eq!(rx.take_change(), Some(0));
        assert_eq!(c.reset(), None);
        assert_eq!(rx.take_change(), None);
    }

    #[test]
    fn test_activation_scroll_lands_in_bucket() {
        let mut c = controller();
        for index in 1..=N {
            let y = c.activation_scroll(index, 1000.0, 3000.0, 1000.0);
            c.recompute(&scenario(y));
            assert_eq!(c.active_index(), index);
            // One row earlier is still the previous bucket
            c.recompute(&scenario(y - 1.0));
            assert_eq!(c.active_index(), index - 1);
        }
    }

    #[test]
    fn test_classify_positions() {
        assert_eq!(classify(1, 3), PhaseStatus::Completed);
        assert_eq!(classify(3, 3), PhaseStatus::Current);
        assert_eq!(classify(4, 3), PhaseStatus::Upcoming);
    }

    #[test]
    fn test_map_progress_clamps() {
        assert_eq!(map_progress(0.0, 7), 0);
        assert_eq!(map_progress(1.0, 7), 6);
        assert_eq!(map_progress(1.5, 7), 6);
        assert_eq!(map_progress(-0.2, 7), 0);
        assert_eq!(map_progress(0.5, 0), 0);
    }
}
