//! Composable, deterministic noise synthesis: conversion curves, octaves,
//! noise layers, and noise generators.
//!
//! The pipeline is a weighted-sum tree. Octaves sample a seeded lattice or
//! sinusoidal field; layers sum octaves; generators sum layers. Each level
//! may shape its aggregate through a piecewise-linear conversion curve.
//! Everything is a frozen value object after construction, so sampling is
//! pure and safe to run concurrently.

mod curve;
mod error;
mod field;
mod generator;
mod layer;
mod octave;
pub mod seed;

pub use curve::ConversionCurve;
pub use error::NoiseConfigError;
pub use generator::{NoiseGenerator, NoiseGeneratorBuilder};
pub use layer::{NoiseLayer, NoiseLayerBuilder};
pub use octave::{NoiseOctave, OctaveBuilder, OctaveKind};
