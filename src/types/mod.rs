//! Strongly-typed domain types for safer APIs.
//!
//! - [`SpectralShape`]: (frequency × direction) grid shape, also the topology cache key
//! - [`Depth`]: water depth, validated positive and finite
//! - [`WindForcing`]: wind speed and direction for the wave-age criterion
//!
//! # Example
//!
//! ```
//! use specpart_rs::types::{Depth, SpectralShape, WindForcing};
//!
//! let shape = SpectralShape::new(36, 24).unwrap();
//! let depth = Depth::try_new(50.0).unwrap();
//! let wind = WindForcing::try_new(15.0, 180.0).unwrap();
//! assert_eq!(shape.n_bins(), 864);
//! assert!(depth.meters() > 0.0);
//! assert!(wind.projected_speed(180.0) > 14.9);
//! ```

mod physical;
mod shape;

pub use physical::{Depth, WindForcing};
pub use shape::SpectralShape;
