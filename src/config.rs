// Centralized configuration for splash parameters

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ====================
// Splash Parameters
// ====================
pub const PARTICLES_PER_SPLASH: usize = 20;
/// Life removed from every splash each frame (1.0 -> 0.0 in ~100 frames)
pub const SPLASH_DECAY: f64 = 0.01;
pub const DEFAULT_SPLASH_COLOR: &str = "#000";

// ====================
// Particle Parameters
// ====================
pub const PARTICLE_DECAY_MIN: f64 = 0.01;
pub const PARTICLE_DECAY_MAX: f64 = 0.03; // exclusive
pub const PARTICLE_SPEED_MIN: f64 = 2.0;
pub const PARTICLE_SPEED_MAX: f64 = 5.0; // exclusive
pub const GRAVITY: f64 = 0.1; // added to vy every frame
pub const PARTICLE_RADIUS: f64 = 2.0; // px

// ====================
// Emission Triggers
// ====================
pub const SCROLL_DEBOUNCE_MS: f64 = 100.0;
pub const LOAD_SPLASH_DELAY_MS: f64 = 1000.0;
pub const HOVER_THROTTLE_MS: f64 = 100.0;
pub const CLICK_EXCLUDED_SELECTORS: [&str; 2] = [".pdf-modal", ".btn"];
pub const CARD_SELECTOR: &str = ".certificate-card, .project-card";

// ====================
// Window/Rendering
// ====================
pub const WINDOW_WIDTH: u32 = 1280; // Headless viewport width in pixels
pub const WINDOW_HEIGHT: u32 = 720; // Headless viewport height in pixels
pub const CANVAS_ELEMENT_ID: &str = "paintCanvas";

/// What happens to an emission once `max_active_splashes` is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Evict the splash that was emitted first and accept the new one
    DropOldest,
    /// Keep the active set and discard the new emission
    DropNewest,
}

impl Default for OverflowPolicy {
    fn default() -> Self {
        OverflowPolicy::DropOldest
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashConfig {
    pub particles_per_splash: usize,
    pub splash_decay: f64,
    pub particle_decay_min: f64,
    pub particle_decay_max: f64,
    pub speed_min: f64,
    pub speed_max: f64,
    pub gravity: f64,
    pub particle_radius: f64,
    /// CSS hex or named color used when an emission carries none
    pub default_color: String,
    /// Upper bound on concurrent splashes. `None` keeps the collection unbounded.
    pub max_active_splashes: Option<usize>,
    pub overflow_policy: OverflowPolicy,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            particles_per_splash: PARTICLES_PER_SPLASH,
            splash_decay: SPLASH_DECAY,
            particle_decay_min: PARTICLE_DECAY_MIN,
            particle_decay_max: PARTICLE_DECAY_MAX,
            speed_min: PARTICLE_SPEED_MIN,
            speed_max: PARTICLE_SPEED_MAX,
            gravity: GRAVITY,
            particle_radius: PARTICLE_RADIUS,
            default_color: DEFAULT_SPLASH_COLOR.to_string(),
            max_active_splashes: None,
            overflow_policy: OverflowPolicy::default(),
        }
    }
}

impl SplashConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particles_per_splash == 0 {
            return Err(ConfigError::Invalid(
                "particles_per_splash must be at least 1".to_string(),
            ));
        }
        if !(self.splash_decay > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "splash_decay must be positive, got {}",
                self.splash_decay
            )));
        }
        if !(self.particle_decay_min > 0.0) || self.particle_decay_min >= self.particle_decay_max {
            return Err(ConfigError::Invalid(format!(
                "particle decay range [{}, {}) must be positive and non-empty",
                self.particle_decay_min, self.particle_decay_max
            )));
        }
        if !(self.speed_min >= 0.0) || self.speed_min >= self.speed_max {
            return Err(ConfigError::Invalid(format!(
                "speed range [{}, {}) must be non-negative and non-empty",
                self.speed_min, self.speed_max
            )));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::Invalid("gravity must be finite".to_string()));
        }
        if !(self.particle_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "particle_radius must be positive, got {}",
                self.particle_radius
            )));
        }
        if self.max_active_splashes == Some(0) {
            return Err(ConfigError::Invalid(
                "max_active_splashes must be at least 1 when set".to_string(),
            ));
        }
        crate::color::SplashColor::parse(&self.default_color)
            .map_err(|e| ConfigError::Invalid(format!("default_color: {e}")))?;
        Ok(())
    }
}

/// Timings and filters for the page events that produce splashes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    pub click_splashes: bool,
    pub click_excluded_selectors: Vec<String>,
    pub scroll_splashes: bool,
    pub scroll_debounce_ms: f64,
    pub load_splash: bool,
    pub load_splash_delay_ms: f64,
    pub modal_splash: bool,
    /// Splash at the centre of a card when the pointer enters it
    pub card_hover_splashes: bool,
    /// CSS selector list identifying cards
    pub card_selector: String,
    /// Splash at the pointer on every move, throttled; off by default
    pub hover_splashes: bool,
    pub hover_throttle_ms: f64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            click_splashes: true,
            click_excluded_selectors: CLICK_EXCLUDED_SELECTORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            scroll_splashes: true,
            scroll_debounce_ms: SCROLL_DEBOUNCE_MS,
            load_splash: true,
            load_splash_delay_ms: LOAD_SPLASH_DELAY_MS,
            modal_splash: true,
            card_hover_splashes: true,
            card_selector: CARD_SELECTOR.to_string(),
            hover_splashes: false,
            hover_throttle_ms: HOVER_THROTTLE_MS,
        }
    }
}

impl TriggerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("scroll_debounce_ms", self.scroll_debounce_ms),
            ("load_splash_delay_ms", self.load_splash_delay_ms),
            ("hover_throttle_ms", self.hover_throttle_ms),
        ] {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a non-negative duration, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_hover_on_and_pointer_hover_off_by_default() {
        let triggers = TriggerConfig::default();
        assert!(triggers.card_hover_splashes);
        assert_eq!(triggers.card_selector, ".certificate-card, .project-card");
        assert!(!triggers.hover_splashes);
    }

    #[test]
    fn defaults_are_valid() {
        assert!(SplashConfig::default().validate().is_ok());
        assert!(TriggerConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_speed_range_is_rejected() {
        let cfg = SplashConfig {
            speed_min: 5.0,
            speed_max: 2.0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn zero_decay_is_rejected() {
        let cfg = SplashConfig {
            particle_decay_min: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        let cfg = SplashConfig {
            splash_decay: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn unknown_default_color_is_rejected() {
        let cfg = SplashConfig {
            default_color: "not-a-color".to_string(),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn negative_debounce_is_rejected() {
        let cfg = TriggerConfig {
            scroll_debounce_ms: -1.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
