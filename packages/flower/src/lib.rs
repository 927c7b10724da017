#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Flower chart and progress ring rendering.
//!
//! The chart is described declaratively: [`build_scene`] turns a set of
//! domain scores into a [`FlowerScene`] of [`Arc`]s (angles, radii, color),
//! independent of any drawing technology. [`FlowerChart`] layers the hover
//! interaction on top and [`svg`] turns either into markup.

pub mod chart;
pub mod progress;
pub mod scene;
pub mod svg;

pub use chart::{CenterText, DIM_GRAY, FlowerChart, FlowerEvent};
pub use progress::ProgressRing;
pub use scene::{Arc, ArcStyle, FlowerGeometry, FlowerScene, Petal, build_scene};
