//! Input side: turning held directions into thrust pulses
//!
//! The device layer (keys, pointer, touch) is outside the crate. It reports
//! press/release with timestamps; `ThrustRepeater` fires the first pulse on
//! press and one more every repeat interval until release.

use crate::simulation::thrust::ThrustDirection;

/// Most pulses one poll may return after a stall
pub const MAX_CATCH_UP: usize = 4;

/// Source of thrust pulses, polled once per display frame
pub trait InputAdapter {
    /// Pulses due up to and including `now` (seconds)
    fn poll(&mut self, now: f64) -> Vec<ThrustDirection>;
}

impl ThrustDirection {
    /// Dominant axis of a pointer offset from the screen center (y up).
    /// `None` for a zero offset.
    pub fn from_offset(dx: f64, dy: f64) -> Option<Self> {
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        let dir = if dx.abs() > dy.abs() {
            if dx > 0.0 { ThrustDirection::Right } else { ThrustDirection::Left }
        } else if dy > 0.0 {
            ThrustDirection::Up
        } else {
            ThrustDirection::Down
        };
        Some(dir)
    }
}

#[derive(Debug, Clone, Copy)]
struct Held {
    dir: ThrustDirection,
    next_fire: f64,
}

#[derive(Debug, Clone)]
pub struct ThrustRepeater {
    interval: f64,
    held: Option<Held>,
}

impl ThrustRepeater {
    /// `interval` is clamped to at least 1 ms
    pub fn new(interval: f64) -> Self {
        Self { interval: interval.max(1e-3), held: None }
    }

    pub fn held(&self) -> Option<ThrustDirection> {
        self.held.map(|h| h.dir)
    }

    /// Start holding `dir`; restarts the schedule if something was already held.
    pub fn press(&mut self, dir: ThrustDirection, now: f64) {
        self.held = Some(Held { dir, next_fire: now });
    }

    pub fn release(&mut self) {
        self.held = None;
    }
}

impl InputAdapter for ThrustRepeater {
    fn poll(&mut self, now: f64) -> Vec<ThrustDirection> {
        let mut pulses = Vec::new();
        let Some(held) = self.held.as_mut() else {
            return pulses;
        };

        while held.next_fire <= now && pulses.len() < MAX_CATCH_UP {
            pulses.push(held.dir);
            held.next_fire += self.interval;
        }

        // drop the rest of a stall instead of firing it all at once
        if held.next_fire <= now {
            log::debug!("thrust repeat stalled, skipping to t = {:.3} s", now);
            held.next_fire = now + self.interval;
        }
        pulses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_on_press_then_repeats() {
        let mut input = ThrustRepeater::new(0.05);
        input.press(ThrustDirection::Right, 0.0);
        assert_eq!(input.poll(0.0), vec![ThrustDirection::Right]);
        assert!(input.poll(0.04).is_empty());
        // pulses at 0.05 and 0.10
        assert_eq!(input.poll(0.12).len(), 2);

        input.release();
        assert!(input.poll(1.0).is_empty());
    }

    #[test]
    fn stall_fires_a_bounded_burst() {
        let mut input = ThrustRepeater::new(0.05);
        input.press(ThrustDirection::Down, 0.0);

        // 200 pulses were due, only a few come out
        assert_eq!(input.poll(10.0).len(), MAX_CATCH_UP);
        // schedule resumes one interval after the stall
        assert!(input.poll(10.04).is_empty());
        assert_eq!(input.poll(10.05), vec![ThrustDirection::Down]);
    }

    #[test]
    fn new_press_restarts_schedule() {
        let mut input = ThrustRepeater::new(0.05);
        input.press(ThrustDirection::Up, 0.0);
        input.poll(0.0);
        input.press(ThrustDirection::Left, 0.02);
        assert_eq!(input.poll(0.02), vec![ThrustDirection::Left]);
        assert_eq!(input.held(), Some(ThrustDirection::Left));
    }

    #[test]
    fn pointer_offsets_pick_dominant_axis() {
        assert_eq!(ThrustDirection::from_offset(5.0, 1.0), Some(ThrustDirection::Right));
        assert_eq!(ThrustDirection::from_offset(-5.0, 1.0), Some(ThrustDirection::Left));
        assert_eq!(ThrustDirection::from_offset(1.0, 5.0), Some(ThrustDirection::Up));
        assert_eq!(ThrustDirection::from_offset(1.0, -5.0), Some(ThrustDirection::Down));
        assert_eq!(ThrustDirection::from_offset(0.0, 0.0), None);
    }
}
