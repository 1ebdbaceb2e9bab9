/// Fixed timestep clock
///
/// The client is driven by whoever feeds it frames (a renderer, a network
/// tick, a replayed script). Each frame reports how long it took and gets
/// back the number of fixed updates the scene should run.
use std::time::Duration;

/// Scene update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667);

/// Maximum number of updates per frame to prevent spiral of death
const MAX_UPDATE_STEPS: u32 = 5;

/// Game loop timing state
#[derive(Debug, Default)]
pub struct GameLoop {
    /// Time not yet consumed by fixed updates
    accumulator: Duration,

    /// Total simulated time
    elapsed: Duration,

    frame_count: u64,

    update_count: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a frame that took `frame_time`, returns the number of fixed
    /// updates to run
    pub fn begin_frame(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        self.elapsed += frame_time;
        self.accumulator += frame_time;

        let mut updates = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && updates < MAX_UPDATE_STEPS {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            updates += 1;
        }
        // Drop time we could not catch up on
        if updates == MAX_UPDATE_STEPS && !self.accumulator.is_zero() {
            log::debug!("Dropping {:?} of simulation time", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        self.update_count += updates as u64;
        updates
    }

    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.update_count(), 0);
        assert_eq!(game_loop.elapsed(), Duration::ZERO);
        assert!((game_loop.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_one_update_per_fixed_frame() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.begin_frame(FIXED_TIMESTEP_DURATION), 1);
        assert_eq!(game_loop.begin_frame(FIXED_TIMESTEP_DURATION), 1);
        assert_eq!(game_loop.update_count(), 2);
    }

    #[test]
    fn test_accumulates_short_frames() {
        let mut game_loop = GameLoop::new();
        let half = Duration::from_micros(8_400);
        assert_eq!(game_loop.begin_frame(half), 0);
        assert_eq!(game_loop.begin_frame(half), 1);
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_max_update_steps_limit() {
        let mut game_loop = GameLoop::new();
        let updates = game_loop.begin_frame(Duration::from_millis(300));
        assert_eq!(updates, MAX_UPDATE_STEPS);
        assert_eq!(game_loop.elapsed(), Duration::from_millis(300));

        // The backlog is dropped rather than replayed
        assert_eq!(game_loop.begin_frame(Duration::ZERO), 0);
    }
}
