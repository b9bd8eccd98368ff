//! Physical quantity newtypes for partitioning inputs.
//!
//! These types keep water depth and wind forcing from being mixed up with
//! the many other `f64` values that flow through the classifier, and they
//! are the point where non-physical inputs are rejected.

use std::fmt;

use crate::error::PartitionError;

// =============================================================================
// Depth (water column depth, always positive)
// =============================================================================

/// Water depth, always positive.
///
/// # Convention
///
/// Depth is **always positive**. A location with 100m of water
/// has `Depth(100.0)`, not `Depth(-100.0)`.
///
/// # Example
///
/// ```
/// use specpart_rs::types::Depth;
///
/// let h = Depth::try_new(200.0).unwrap();
/// assert_eq!(h.meters(), 200.0);
/// assert!(Depth::try_new(-5.0).is_err());
/// assert!(Depth::try_new(f64::NAN).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct Depth(f64);

impl Depth {
    /// Create a depth value, rejecting non-positive and non-finite input.
    pub fn try_new(meters: f64) -> Result<Self, PartitionError> {
        if !meters.is_finite() || meters <= 0.0 {
            return Err(PartitionError::domain(format!(
                "depth must be positive and finite, got {}",
                meters
            )));
        }
        Ok(Self(meters))
    }

    /// Create depth without validation.
    ///
    /// Consumers that need a valid depth (e.g. [`crate::spectrum::celerity`])
    /// still check the value and fail with a `Domain` error.
    #[inline]
    pub const fn new_unchecked(meters: f64) -> Self {
        Self(meters)
    }

    /// Get the depth in meters.
    #[inline]
    pub fn meters(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}m", self.0)
    }
}

impl From<Depth> for f64 {
    #[inline]
    fn from(d: Depth) -> f64 {
        d.0
    }
}

// =============================================================================
// Wind forcing (speed and direction)
// =============================================================================

/// Wind speed and direction driving the wind-sea classification.
///
/// Direction is in degrees using the same convention as the spectral
/// direction axis, so `cos(dir - wind_dir)` is the projection of the wind
/// onto each spectral direction.
///
/// # Example
///
/// ```
/// use specpart_rs::types::WindForcing;
///
/// let wind = WindForcing::try_new(12.0, 270.0).unwrap();
/// assert_eq!(wind.speed(), 12.0);
/// assert_eq!(wind.direction_deg(), 270.0);
/// assert!(WindForcing::try_new(f64::INFINITY, 0.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindForcing {
    speed: f64,
    direction_deg: f64,
}

impl WindForcing {
    /// Create wind forcing, rejecting negative or non-finite values.
    pub fn try_new(speed: f64, direction_deg: f64) -> Result<Self, PartitionError> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(PartitionError::domain(format!(
                "wind speed must be non-negative and finite, got {}",
                speed
            )));
        }
        if !direction_deg.is_finite() {
            return Err(PartitionError::domain(format!(
                "wind direction must be finite, got {}",
                direction_deg
            )));
        }
        Ok(Self {
            speed,
            direction_deg,
        })
    }

    /// Calm conditions: no bin can be wind-driven.
    pub const CALM: Self = Self {
        speed: 0.0,
        direction_deg: 0.0,
    };

    /// Wind speed in m/s.
    #[inline]
    pub fn speed(self) -> f64 {
        self.speed
    }

    /// Wind direction in degrees.
    #[inline]
    pub fn direction_deg(self) -> f64 {
        self.direction_deg
    }

    /// Wind speed component projected onto a spectral direction (degrees).
    #[inline]
    pub fn projected_speed(self, dir_deg: f64) -> f64 {
        self.speed * (dir_deg - self.direction_deg).to_radians().cos()
    }
}

impl fmt::Display for WindForcing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}m/s from {:.1}°", self.speed, self.direction_deg)
    }
}
