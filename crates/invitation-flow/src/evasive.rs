//! The evasive "No" control.
//!
//! Each press moves the control to a random spot inside the viewport and
//! shrinks it, while the "Yes" control grows. Nothing here records a
//! decision or touches the store.

use rand::Rng;
use serde::Serialize;

use crate::config::{EvasiveConfig, Viewport};

/// Offset of the control's top-left corner inside its viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Current placement and size of the "No" control.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvasiveControl {
    presses: u32,
    position: Position,
    scale: f64,
}

impl EvasiveControl {
    /// A control that has not been pressed yet.
    pub fn new(config: &EvasiveConfig) -> Self {
        Self {
            presses: 0,
            position: Position::default(),
            scale: scale_for(0, config),
        }
    }

    /// Number of presses so far.
    pub fn presses(&self) -> u32 {
        self.presses
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Width of the "Yes" control after this many presses.
    pub fn yes_width(&self, config: &EvasiveConfig) -> f64 {
        config.yes_base_width + config.yes_growth * f64::from(self.presses)
    }

    /// Register one press: count it, jump somewhere new, shrink.
    pub fn press<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: Viewport, config: &EvasiveConfig) {
        self.presses = self.presses.saturating_add(1);
        self.position = random_position(rng, viewport, config.control);
        self.scale = scale_for(self.presses, config);
    }
}

/// Scale after `presses` presses, never below the configured floor.
pub fn scale_for(presses: u32, config: &EvasiveConfig) -> f64 {
    (config.scale_start - config.scale_step * f64::from(presses)).max(config.scale_floor)
}

/// Pick a position that keeps the whole `control` box inside `viewport`.
///
/// When the viewport is narrower or shorter than the control the offset on
/// that axis is pinned to 0.
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, control: Viewport) -> Position {
    Position {
        x: random_offset(rng, viewport.width - control.width),
        y: random_offset(rng, viewport.height - control.height),
    }
}

fn random_offset<R: Rng + ?Sized>(rng: &mut R, room: f64) -> f64 {
    // `max` also maps NaN to 0.
    let room = room.max(0.0);
    if room > 0.0 && room.is_finite() {
        rng.gen_range(0.0..room)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scale_starts_at_start_and_floors() {
        let config = EvasiveConfig::default();
        assert!((scale_for(0, &config) - 0.8).abs() < 1e-9);
        assert!((scale_for(1, &config) - 0.7).abs() < 1e-9);
        assert!((scale_for(4, &config) - 0.4).abs() < 1e-9);
        assert!((scale_for(50, &config) - 0.4).abs() < 1e-9);
        assert!((scale_for(u32::MAX, &config) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_press_counts_and_grows_yes() {
        let config = EvasiveConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut control = EvasiveControl::new(&config);

        for _ in 0..3 {
            control.press(&mut rng, Viewport::default(), &config);
        }

        assert_eq!(control.presses(), 3);
        assert!((control.yes_width(&config) - 160.0).abs() < 1e-9);
    }

    #[test]
    fn test_position_stays_inside_viewport() {
        let config = EvasiveConfig::default();
        let viewport = Viewport::new(320.0, 200.0);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..1_000 {
            let pos = random_position(&mut rng, viewport, config.control);
            assert!(pos.x >= 0.0 && pos.x + config.control.width <= viewport.width);
            assert!(pos.y >= 0.0 && pos.y + config.control.height <= viewport.height);
        }
    }

    #[test]
    fn test_tiny_viewport_pins_to_origin() {
        let config = EvasiveConfig::default();
        let mut rng = StdRng::seed_from_u64(1);

        let pos = random_position(&mut rng, Viewport::new(50.0, 10.0), config.control);
        assert_eq!(pos, Position::default());

        let pos = random_position(&mut rng, Viewport::new(f64::NAN, 100.0), config.control);
        assert_eq!(pos.x, 0.0);
    }
}
