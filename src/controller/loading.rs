//! Loading gate: holds the page back until a progress signal reaches 100%.

use crate::config::LoadingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Loading { percent: u32 },
    Complete,
}

/// Completion barrier with a progress readout
pub struct LoadingGate {
    progress: f32,
    completed: bool,
    on_progress: Option<Box<dyn FnMut(u32)>>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl LoadingGate {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            completed: false,
            on_progress: None,
            on_complete: None,
        }
    }

    /// Called with the rounded percentage after every update
    pub fn on_progress(mut self, f: impl FnMut(u32) + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Called once, the first time progress reaches 100%
    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    pub fn update_progress(&mut self, loaded: u32, total: u32) -> GateState {
        self.progress = if total == 0 {
            1.0
        } else {
            (loaded as f32 / total as f32).clamp(self.progress, 1.0)
        };

        let percent = self.percent();
        if let Some(cb) = self.on_progress.as_mut() {
            cb(percent);
        }

        if loaded >= total && !self.completed {
            self.completed = true;
            tracing::debug!("loading gate complete");
            if let Some(cb) = self.on_complete.take() {
                cb();
            }
        }
        self.state()
    }

    pub fn percent(&self) -> u32 {
        (self.progress * 100.0).round() as u32
    }

    pub fn state(&self) -> GateState {
        if self.completed {
            GateState::Complete
        } else {
            GateState::Loading { percent: self.percent() }
        }
    }
}

/// Source of progress signals feeding a [`LoadingGate`]
pub trait LoadingStrategy {
    fn name(&self) -> &'static str;

    /// Interval between ticks, `None` when signals come from asset events
    fn tick_interval_ms(&self) -> Option<u32>;

    /// Called once before any signal
    fn start(&mut self, gate: &mut LoadingGate) -> GateState {
        gate.state()
    }

    /// One asset settled or one timer tick elapsed
    fn signal(&mut self, gate: &mut LoadingGate) -> GateState;
}

/// Event-driven: one signal per asset `load` or `error`
#[derive(Debug, Clone)]
pub struct AssetProgress {
    pub loaded: u32,
    pub total: u32,
}

impl AssetProgress {
    pub fn new(total: u32) -> Self {
        Self { loaded: 0, total }
    }
}

impl LoadingStrategy for AssetProgress {
    fn name(&self) -> &'static str { "assets" }

    fn tick_interval_ms(&self) -> Option<u32> { None }

    fn start(&mut self, gate: &mut LoadingGate) -> GateState {
        if self.total == 0 {
            return gate.update_progress(0, 0);
        }
        gate.state()
    }

    fn signal(&mut self, gate: &mut LoadingGate) -> GateState {
        if self.loaded < self.total {
            self.loaded += 1;
        }
        gate.update_progress(self.loaded, self.total)
    }
}

/// Timer-driven: a counter stepped on a fixed interval up to a target
#[derive(Debug, Clone)]
pub struct SimulatedProgress {
    pub counter: u32,
    pub step: u32,
    pub target: u32,
    pub interval_ms: u32,
}

impl SimulatedProgress {
    pub fn new(step: u32, target: u32, interval_ms: u32) -> Self {
        Self { counter: 0, step, target, interval_ms }
    }
}

impl LoadingStrategy for SimulatedProgress {
    fn name(&self) -> &'static str { "simulated" }

    fn tick_interval_ms(&self) -> Option<u32> { Some(self.interval_ms) }

    fn signal(&mut self, gate: &mut LoadingGate) -> GateState {
        self.counter = self.counter.saturating_add(self.step).min(self.target);
        gate.update_progress(self.counter, self.target)
    }
}

/// Pick the strategy named by the config; `asset_count` sizes the event-driven one
pub fn strategy_from_config(config: &LoadingConfig, asset_count: u32) -> Box<dyn LoadingStrategy> {
    match *config {
        LoadingConfig::Assets => Box::new(AssetProgress::new(asset_count)),
        LoadingConfig::Simulated { step, target, interval_ms } => {
            Box::new(SimulatedProgress::new(step, target, interval_ms))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn counting_gate() -> (LoadingGate, Rc<RefCell<u32>>, Rc<RefCell<Vec<u32>>>) {
        let fired = Rc::new(RefCell::new(0));
        let shown = Rc::new(RefCell::new(Vec::new()));
        let gate = LoadingGate::new()
            .on_progress({
                let shown = shown.clone();
                move |pct| shown.borrow_mut().push(pct)
            })
            .on_complete({
                let fired = fired.clone();
                move || *fired.borrow_mut() += 1
            });
        (gate, fired, shown)
    }

    #[test]
    fn test_ten_updates_reach_hundred_and_fire_once() {
        let (mut gate, fired, shown) = counting_gate();
        for loaded in 1..=10 {
            let state = gate.update_progress(loaded, 10);
            if loaded < 10 {
                assert_eq!(state, GateState::Loading { percent: loaded * 10 });
                assert_eq!(*fired.borrow(), 0);
            }
        }
        assert_eq!(gate.percent(), 100);
        assert_eq!(*shown.borrow().last().unwrap(), 100);
        assert_eq!(shown.borrow().len(), 10);
        assert_eq!(*fired.borrow(), 1);

        gate.update_progress(10, 10);
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_asset_strategy_counts_signals() {
        let (mut gate, fired, _) = counting_gate();
        let mut assets = AssetProgress::new(4);
        assert_eq!(assets.start(&mut gate), GateState::Loading { percent: 0 });
        for _ in 0..3 {
            assets.signal(&mut gate);
        }
        assert_eq!(gate.percent(), 75);
        assert_eq!(assets.signal(&mut gate), GateState::Complete);
        assets.signal(&mut gate);
        assert_eq!(assets.loaded, 4);
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_no_assets_completes_on_start() {
        let (mut gate, fired, _) = counting_gate();
        let mut assets = AssetProgress::new(0);
        assert_eq!(assets.start(&mut gate), GateState::Complete);
        assert_eq!(gate.percent(), 100);
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_simulated_stops_at_target() {
        let (mut gate, fired, shown) = counting_gate();
        let mut sim = SimulatedProgress::new(30, 100, 100);
        assert_eq!(sim.tick_interval_ms(), Some(100));
        let mut ticks = 0;
        while sim.signal(&mut gate) != GateState::Complete {
            ticks += 1;
        }
        assert_eq!(ticks, 3);
        assert_eq!(sim.counter, 100);
        assert_eq!(*shown.borrow(), vec![30, 60, 90, 100]);
        assert_eq!(*fired.borrow(), 1);
    }

    #[test]
    fn test_progress_never_goes_backwards() {
        let (mut gate, _, _) = counting_gate();
        gate.update_progress(5, 10);
        gate.update_progress(2, 10);
        assert_eq!(gate.percent(), 50);
    }

    #[test]
    fn test_strategy_selection() {
        let s = strategy_from_config(&LoadingConfig::Assets, 4);
        assert_eq!((s.name(), s.tick_interval_ms()), ("assets", None));
        let s = strategy_from_config(
            &LoadingConfig::Simulated { step: 10, target: 100, interval_ms: 50 },
            4,
        );
        assert_eq!((s.name(), s.tick_interval_ms()), ("simulated", Some(50)));
    }
}
