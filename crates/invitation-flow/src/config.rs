//! Tunables for the recipient flow.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delay between pressing "Yes" and the preferences step.
pub const DEFAULT_ACCEPT_DELAY: Duration = Duration::from_secs(2);

/// Size of an on-screen region or control, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    /// The invitation card: `max-w-md` wide.
    fn default() -> Self {
        Self::new(448.0, 360.0)
    }
}

/// Geometry and shrink curve of the evasive "No" control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvasiveConfig {
    /// Unscaled footprint; placement keeps this whole box inside the viewport.
    pub control: Viewport,
    /// Scale before the first press.
    pub scale_start: f64,
    /// Scale lost per press.
    pub scale_step: f64,
    /// Scale never drops below this.
    pub scale_floor: f64,
    /// Width of the "Yes" control before any press.
    pub yes_base_width: f64,
    /// Width the "Yes" control gains per "No" press.
    pub yes_growth: f64,
}

impl Default for EvasiveConfig {
    fn default() -> Self {
        Self {
            control: Viewport::new(100.0, 40.0),
            scale_start: 0.8,
            scale_step: 0.1,
            scale_floor: 0.4,
            yes_base_width: 100.0,
            yes_growth: 20.0,
        }
    }
}

/// Configuration for a [`FlowController`](crate::FlowController).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowConfig {
    /// Delay between acceptance and the preferences step.
    /// Default: 2 seconds.
    pub accept_delay: Duration,

    /// Evasive control tunables.
    pub evasive: EvasiveConfig,

    /// Viewport used until the host reports a real one.
    pub viewport: Viewport,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            accept_delay: DEFAULT_ACCEPT_DELAY,
            evasive: EvasiveConfig::default(),
            viewport: Viewport::default(),
        }
    }
}

impl FlowConfig {
    /// Create a config with a custom starting viewport.
    pub fn with_viewport(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }
}
