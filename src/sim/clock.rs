//! Logical timers on a simulated millisecond timeline
//!
//! Each game owns one `Scheduler`. Timers are next-fire timestamps, so cancel and
//! restart are plain field writes and the whole thing runs without a real clock.

use serde::{Deserialize, Serialize};

/// Named logical timers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerId {
    /// Fixed-step simulation tick
    Tick,
    /// Runner obstacle spawner
    Spawn,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    id: TimerId,
    period: f64,
    /// None while suspended
    next_fire: Option<f64>,
}

/// Fixed-period timers sharing one timeline
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now: f64,
    /// Registration order breaks ties between timers due at the same instant
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position on the timeline (ms)
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Arm `id` to fire every `period` ms starting one period from now.
    /// Restarting a live timer discards its pending fire time.
    pub fn start(&mut self, id: TimerId, period: f64) {
        let next_fire = Some(self.now + period);
        match self.timers.iter_mut().find(|t| t.id == id) {
            Some(timer) => {
                timer.period = period;
                timer.next_fire = next_fire;
            }
            None => self.timers.push(Timer {
                id,
                period,
                next_fire,
            }),
        }
    }

    /// Remove every timer
    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    /// Stop every timer from firing but remember its period
    pub fn suspend(&mut self) {
        for timer in &mut self.timers {
            timer.next_fire = None;
        }
    }

    /// Re-arm every suspended timer one full period from now
    pub fn resume(&mut self) {
        for timer in &mut self.timers {
            if timer.next_fire.is_none() {
                timer.next_fire = Some(self.now + timer.period);
            }
        }
    }

    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers
            .iter()
            .any(|t| t.id == id && t.next_fire.is_some())
    }

    pub fn period(&self, id: TimerId) -> Option<f64> {
        self.timers.iter().find(|t| t.id == id).map(|t| t.period)
    }

    pub fn next_fire(&self, id: TimerId) -> Option<f64> {
        self.timers
            .iter()
            .find(|t| t.id == id)
            .and_then(|t| t.next_fire)
    }

    /// Fire the earliest timer due at or before `until`.
    ///
    /// Moves `now` to the fire time and schedules the timer's next fire, so a
    /// callback that restarts a timer sees the correct current time.
    pub fn next_due(&mut self, until: f64) -> Option<TimerId> {
        let (idx, at) = self
            .timers
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.next_fire.map(|at| (i, at)))
            .filter(|&(_, at)| at <= until)
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        self.now = at;
        let timer = &mut self.timers[idx];
        timer.next_fire = Some(at + timer.period);
        Some(timer.id)
    }

    /// Move `now` up to `until` once nothing else is due
    pub fn settle(&mut self, until: f64) {
        if until > self.now {
            self.now = until;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(clock: &mut Scheduler, until: f64) -> Vec<(TimerId, f64)> {
        let mut fired = Vec::new();
        while let Some(id) = clock.next_due(until) {
            fired.push((id, clock.now()));
        }
        clock.settle(until);
        fired
    }

    #[test]
    fn test_fires_in_timestamp_order() {
        let mut clock = Scheduler::new();
        clock.start(TimerId::Tick, 20.0);
        clock.start(TimerId::Spawn, 50.0);

        let fired = drain(&mut clock, 60.0);
        assert_eq!(
            fired,
            vec![
                (TimerId::Tick, 20.0),
                (TimerId::Tick, 40.0),
                (TimerId::Spawn, 50.0),
                (TimerId::Tick, 60.0),
            ]
        );
        assert_eq!(clock.now(), 60.0);
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        let mut clock = Scheduler::new();
        clock.start(TimerId::Tick, 10.0);
        clock.start(TimerId::Spawn, 10.0);
        assert_eq!(clock.next_due(10.0), Some(TimerId::Tick));
        assert_eq!(clock.next_due(10.0), Some(TimerId::Spawn));
        assert_eq!(clock.next_due(10.0), None);
    }

    #[test]
    fn test_restart_measures_from_now() {
        let mut clock = Scheduler::new();
        clock.start(TimerId::Tick, 20.0);
        clock.start(TimerId::Spawn, 100.0);
        drain(&mut clock, 40.0);

        clock.start(TimerId::Spawn, 30.0);
        assert_eq!(clock.next_fire(TimerId::Spawn), Some(70.0));
        assert_eq!(clock.period(TimerId::Spawn), Some(30.0));
    }

    #[test]
    fn test_suspend_and_resume() {
        let mut clock = Scheduler::new();
        clock.start(TimerId::Tick, 20.0);
        drain(&mut clock, 30.0);

        clock.suspend();
        assert!(!clock.is_armed(TimerId::Tick));
        assert_eq!(clock.next_due(1_000.0), None);

        clock.resume();
        assert_eq!(clock.next_fire(TimerId::Tick), Some(50.0));
    }

    #[test]
    fn test_cancel_all() {
        let mut clock = Scheduler::new();
        clock.start(TimerId::Tick, 20.0);
        clock.start(TimerId::Spawn, 20.0);
        clock.cancel_all();
        assert_eq!(clock.next_due(f64::MAX), None);
        assert_eq!(clock.period(TimerId::Tick), None);
    }
}
