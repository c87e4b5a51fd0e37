//! Party driver
//!
//! Owns every entity and the shared bounds, and turns host frame timestamps
//! into `update` + `draw` calls. Host-agnostic: whoever owns the animation
//! loop calls [`Party::frame`] once per tick.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::balloon::Balloon;
use super::confetti::Confetti;
use super::entity::{Bounds, Entity};
use super::ribbon::Ribbon;
use crate::config::PartyConfig;
use crate::consts::MAX_FRAME_DELTA;
use crate::renderer::Surface;

/// Run every entity of one type for a frame, in index order
fn run_all<E: Entity, S: Surface + ?Sized>(
    entities: &mut [E],
    dt: f32,
    bounds: &Bounds,
    rng: &mut Pcg32,
    surface: &mut S,
) {
    for entity in entities.iter_mut() {
        entity.update(dt, bounds, rng);
        entity.draw(surface);
    }
}

#[derive(Debug)]
pub struct Party {
    config: PartyConfig,
    bounds: Bounds,
    rng: Pcg32,
    confetti: Vec<Confetti>,
    balloons: Vec<Balloon>,
    ribbons: Vec<Ribbon>,
    /// Host timestamp (ms) of the previous frame
    last_timestamp: Option<f64>,
    stopped: bool,
    destroyed: bool,
}

impl Party {
    /// Build every entity up front with the given seed
    pub fn new(config: PartyConfig, bounds: Bounds, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let counts = config.counts;

        let confetti = (0..counts.confetti)
            .map(|_| Confetti::new(config.confetti, &bounds, &mut rng))
            .collect();
        let balloons = (0..counts.balloon)
            .map(|_| Balloon::new(config.balloon, &bounds, &mut rng))
            .collect();
        let ribbons = (0..counts.ribbon)
            .map(|_| Ribbon::new(config.ribbon, &bounds, &mut rng))
            .collect();

        log::info!(
            "Party created: {} confetti, {} balloons, {} ribbons on {}x{} (seed {})",
            counts.confetti,
            counts.balloon,
            counts.ribbon,
            bounds.width,
            bounds.height,
            seed
        );

        Self {
            config,
            bounds,
            rng,
            confetti,
            balloons,
            ribbons,
            last_timestamp: None,
            stopped: false,
            destroyed: false,
        }
    }

    pub fn config(&self) -> &PartyConfig {
        &self.config
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn confetti(&self) -> &[Confetti] {
        &self.confetti
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn ribbons(&self) -> &[Ribbon] {
        &self.ribbons
    }

    pub fn entity_count(&self) -> usize {
        self.confetti.len() + self.balloons.len() + self.ribbons.len()
    }

    /// Replace the bounds snapshot; entities see it from the next update
    pub fn resize(&mut self, bounds: Bounds) {
        log::debug!("Party resized to {}x{}", bounds.width, bounds.height);
        self.bounds = bounds;
    }

    /// Resume frame processing. No effect once destroyed.
    pub fn start(&mut self) {
        if self.destroyed {
            log::warn!("Party already destroyed, not starting");
            return;
        }
        self.stopped = false;
        self.last_timestamp = None;
        log::info!("Party started");
    }

    /// Stop processing frames. Resume with `start`.
    pub fn stop(&mut self) {
        self.stopped = true;
        log::info!("Party stopped");
    }

    pub fn is_running(&self) -> bool {
        !self.stopped
    }

    /// Stop for good and drop every entity
    pub fn destroy(&mut self) {
        self.stop();
        self.destroyed = true;
        self.confetti.clear();
        self.balloons.clear();
        self.ribbons.clear();
        log::info!("Party destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Forget the last timestamp so time spent unfocused isn't simulated
    pub fn focus(&mut self) {
        self.last_timestamp = None;
    }

    /// Seconds to simulate for a frame at `timestamp_ms`
    fn frame_delta(&mut self, timestamp_ms: f64) -> f32 {
        let delta = match self.last_timestamp {
            Some(last) => ((timestamp_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_timestamp = Some(timestamp_ms);
        delta.clamp(0.0, MAX_FRAME_DELTA) * self.config.timescale
    }

    /// Process one host animation frame.
    ///
    /// Returns whether the host should request another frame.
    pub fn frame<S: Surface + ?Sized>(&mut self, timestamp_ms: f64, surface: &mut S) -> bool {
        if self.stopped {
            return false;
        }
        let dt = self.frame_delta(timestamp_ms);
        self.step(dt, surface);
        true
    }

    /// Clear the surface, then update and draw every entity by `dt` seconds
    pub fn step<S: Surface + ?Sized>(&mut self, dt: f32, surface: &mut S) {
        let bounds = self.bounds;
        surface.clear(bounds.width, bounds.height);

        run_all(&mut self.confetti, dt, &bounds, &mut self.rng, surface);
        run_all(&mut self.balloons, dt, &bounds, &mut self.rng, surface);
        run_all(&mut self.ribbons, dt, &bounds, &mut self.rng, surface);
    }
}
