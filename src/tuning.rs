//! Simulation and movement tuning values, loadable from a RON file.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// All gameplay-facing physics numbers in one place.
///
/// The simulation works in screen space: +Y points down, so `gravity` is
/// positive and a jump sets a negative vertical speed. Distances are pixels,
/// times are seconds.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration applied to every non-static entity, px/s².
    pub gravity: f32,
    /// Per-axis speed cap, px/s. Applied independently to |vx| and |vy|.
    pub terminal_velocity_x: f32,
    pub terminal_velocity_y: f32,
    /// Horizontal friction while grounded, px/s². Decays speed toward zero.
    pub ground_friction: f32,
    /// Horizontal air resistance while airborne, px/s². Lower than ground.
    pub air_friction: f32,

    /// Horizontal speed requested by walk input, px/s.
    pub walk_speed: f32,
    /// Horizontal burst speed requested by dash input, px/s.
    pub dash_speed: f32,

    /// Upward launch speed of a jump, px/s (applied as negative vy).
    pub jump_speed: f32,
    /// Fraction of upward speed kept when jump is released mid-ascent.
    pub jump_cut_factor: f32,
    /// Grace window after walking off a ledge during which a jump still fires.
    pub coyote_time: f32,
    /// How long a jump press is held while airborne, waiting for landing.
    pub jump_buffer_time: f32,
    /// Minimum time between two jumps.
    pub jump_cooldown: f32,

    /// How far past the hitbox edge the foot probes reach, px.
    pub edge_probe_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 980.0,
            terminal_velocity_x: 600.0,
            terminal_velocity_y: 1200.0,
            ground_friction: 2400.0,
            air_friction: 300.0,

            walk_speed: 160.0,
            dash_speed: 420.0,

            jump_speed: 420.0,
            jump_cut_factor: 0.45,
            coyote_time: 0.1,
            jump_buffer_time: 0.12,
            jump_cooldown: 0.15,

            edge_probe_threshold: 4.0,
        }
    }
}

/// Failure to read or parse a tuning file. Fatal at setup, never at runtime.
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ron::error::SpannedError,
    },
}

/// Load a [`Tuning`] from a RON file. Missing fields fall back to defaults.
pub fn load_tuning(path: &Path) -> Result<Tuning, TuningError> {
    let display = path.display().to_string();
    let contents = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
        path: display.clone(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| TuningError::Parse {
        path: display,
        source,
    })
}
