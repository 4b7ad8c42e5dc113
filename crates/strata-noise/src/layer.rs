//! A noise layer: a weighted sum of octaves.

use glam::DVec3;

use crate::curve::ConversionCurve;
use crate::octave::NoiseOctave;
use crate::seed::mix;

/// An ordered sequence of octaves summed together, with an optional
/// conversion curve shaping the aggregate.
///
/// Insertion order does not affect the sum; it only determines the
/// index-derived seed each octave receives, so sibling octaves with
/// identical parameters still decorrelate.
#[derive(Clone, Debug)]
pub struct NoiseLayer {
    octaves: Vec<NoiseOctave>,
    curve: Option<ConversionCurve>,
}

impl NoiseLayer {
    /// Starts building a layer.
    pub fn builder() -> NoiseLayerBuilder {
        NoiseLayerBuilder {
            octaves: Vec::new(),
            curve: None,
        }
    }

    /// Returns the layer's octaves in insertion order.
    pub fn octaves(&self) -> &[NoiseOctave] {
        &self.octaves
    }

    /// Samples the layer: the sum of every octave's sample, shaped by the
    /// layer curve when one is attached.
    ///
    /// Octave-level curves have already been applied inside each child
    /// before its value enters the sum; the layer curve only ever sees the
    /// aggregate.
    pub fn sample(&self, seed: u64, point: DVec3) -> f64 {
        let mut sum = 0.0;
        for (i, octave) in self.octaves.iter().enumerate() {
            sum += octave.sample(mix(seed, i as u64 + 1), point);
        }
        match &self.curve {
            Some(curve) => curve.evaluate(sum * 0.5 + 0.5),
            None => sum,
        }
    }
}

/// Fluent builder for [`NoiseLayer`].
#[derive(Clone, Debug, Default)]
pub struct NoiseLayerBuilder {
    octaves: Vec<NoiseOctave>,
    curve: Option<ConversionCurve>,
}

impl NoiseLayerBuilder {
    /// Appends an octave.
    pub fn octave(mut self, octave: NoiseOctave) -> Self {
        self.octaves.push(octave);
        self
    }

    /// Conversion curve applied to the summed result.
    pub fn curve(mut self, curve: ConversionCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Freezes the layer. A layer with no octaves sums to 0, which is a
    /// valid degenerate configuration.
    pub fn build(self) -> NoiseLayer {
        NoiseLayer {
            octaves: self.octaves,
            curve: self.curve,
        }
    }
}
