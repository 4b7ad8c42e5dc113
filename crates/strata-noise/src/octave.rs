//! A single parameterized noise octave.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::curve::ConversionCurve;
use crate::error::NoiseConfigError;
use crate::field;

/// The kind of field an octave samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OctaveKind {
    /// 3D gradient noise over the seeded integer lattice.
    Perlin,
    /// Value noise: hashed lattice values, trilinear blend, no gradients.
    Gray,
    /// Checkerboard parity of the floored lattice coordinates.
    Chess,
    SineX,
    SineY,
    SineZ,
    SineXy,
    SineYz,
    SineXz,
    SineXyz,
}

/// One parameterized noise sample source, owned by the layer holding it.
///
/// Sampling applies the translation, then the scale, to the input
/// coordinate, evaluates the kind's field on the result, optionally shapes
/// the raw `[-1, 1]` sample through a conversion curve (remapped into the
/// curve's unit domain), and finally multiplies by the weight. A weight of
/// 0 is a valid degenerate octave contributing exactly 0.
#[derive(Clone, Debug)]
pub struct NoiseOctave {
    kind: OctaveKind,
    translation: DVec3,
    scale: DVec3,
    weight: f64,
    seed_offset: [i64; 3],
    curve: Option<ConversionCurve>,
}

impl NoiseOctave {
    /// Starts building an octave of the given kind.
    pub fn builder(kind: OctaveKind) -> OctaveBuilder {
        OctaveBuilder {
            kind,
            translation: DVec3::ZERO,
            scale: DVec3::ONE,
            weight: 1.0,
            seed_offset: [0; 3],
            curve: None,
        }
    }

    /// Returns the octave's field kind.
    pub fn kind(&self) -> OctaveKind {
        self.kind
    }

    /// Returns the octave's weight.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Samples the octave at a world coordinate.
    pub fn sample(&self, seed: u64, point: DVec3) -> f64 {
        let q = (point + self.translation) * self.scale;
        let off = (
            self.seed_offset[0],
            self.seed_offset[1],
            self.seed_offset[2],
        );
        let raw = match self.kind {
            OctaveKind::Perlin => field::perlin(seed, off, q),
            OctaveKind::Gray => field::gray(seed, off, q),
            OctaveKind::Chess => field::chess(off, q),
            OctaveKind::SineX => field::sine(q.x),
            OctaveKind::SineY => field::sine(q.y),
            OctaveKind::SineZ => field::sine(q.z),
            OctaveKind::SineXy => field::sine(q.x + q.y),
            OctaveKind::SineYz => field::sine(q.y + q.z),
            OctaveKind::SineXz => field::sine(q.x + q.z),
            OctaveKind::SineXyz => field::sine(q.x + q.y + q.z),
        };
        let shaped = match &self.curve {
            Some(curve) => curve.evaluate(raw * 0.5 + 0.5),
            None => raw,
        };
        shaped * self.weight
    }
}

/// Fluent builder for [`NoiseOctave`].
#[derive(Clone, Debug)]
pub struct OctaveBuilder {
    kind: OctaveKind,
    translation: DVec3,
    scale: DVec3,
    weight: f64,
    seed_offset: [i64; 3],
    curve: Option<ConversionCurve>,
}

impl OctaveBuilder {
    /// Translation applied to the input coordinate before scaling.
    pub fn translation(mut self, translation: DVec3) -> Self {
        self.translation = translation;
        self
    }

    /// Per-axis scale applied after translation. A uniform scale of `s`
    /// gives the field a feature size of `1 / s` blocks.
    pub fn scale(mut self, scale: DVec3) -> Self {
        self.scale = scale;
        self
    }

    /// Uniform scale on all three axes.
    pub fn uniform_scale(self, s: f64) -> Self {
        self.scale(DVec3::splat(s))
    }

    /// Weight multiplying the shaped sample.
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Per-axis integer seed offsets, shifting the lattice in seed space to
    /// decorrelate octaves that otherwise share parameters.
    pub fn seed_offset(mut self, x: i64, y: i64, z: i64) -> Self {
        self.seed_offset = [x, y, z];
        self
    }

    /// Conversion curve shaping the raw sample before weighting.
    pub fn curve(mut self, curve: ConversionCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    /// Validates parameters and freezes the octave.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseConfigError::NonFinite`] if the translation, scale, or
    /// weight contains a NaN or infinity.
    pub fn build(self) -> Result<NoiseOctave, NoiseConfigError> {
        if !self.translation.is_finite() {
            return Err(NoiseConfigError::NonFinite("octave translation"));
        }
        if !self.scale.is_finite() {
            return Err(NoiseConfigError::NonFinite("octave scale"));
        }
        if !self.weight.is_finite() {
            return Err(NoiseConfigError::NonFinite("octave weight"));
        }
        Ok(NoiseOctave {
            kind: self.kind,
            translation: self.translation,
            scale: self.scale,
            weight: self.weight,
            seed_offset: self.seed_offset,
            curve: self.curve,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_scales_linearly() {
        let single = NoiseOctave::builder(OctaveKind::Perlin)
            .uniform_scale(0.1)
            .weight(1.0)
            .build()
            .unwrap();
        let double = NoiseOctave::builder(OctaveKind::Perlin)
            .uniform_scale(0.1)
            .weight(2.0)
            .build()
            .unwrap();

        let p = DVec3::new(3.7, 12.1, -8.4);
        let a = single.sample(5, p);
        let b = double.sample(5, p);
        assert!(
            (b - 2.0 * a).abs() < 1e-12,
            "doubling the weight must double the contribution: {a} vs {b}"
        );
    }

    #[test]
    fn test_zero_weight_contributes_nothing() {
        let octave = NoiseOctave::builder(OctaveKind::Gray)
            .weight(0.0)
            .build()
            .unwrap();
        assert_eq!(octave.sample(1, DVec3::new(0.5, 0.5, 0.5)), 0.0);
    }

    #[test]
    fn test_translation_then_scale_order() {
        // (p + t) * s: translating by one feature period under scale 0.5
        // must differ from scaling first.
        let octave = NoiseOctave::builder(OctaveKind::SineX)
            .translation(DVec3::new(0.5, 0.0, 0.0))
            .uniform_scale(0.5)
            .build()
            .unwrap();
        // (0.0 + 0.5) * 0.5 = 0.25 -> sin(pi/2) = 1.
        let v = octave.sample(0, DVec3::ZERO);
        assert!((v - 1.0).abs() < 1e-9, "expected sin at quarter period, got {v}");
    }

    #[test]
    fn test_curve_applies_before_weight() {
        // A constant curve makes the octave emit curve(y) * weight.
        let curve = ConversionCurve::from_nodes(&[(0.5, 0.25)]).unwrap();
        let octave = NoiseOctave::builder(OctaveKind::Perlin)
            .curve(curve)
            .weight(4.0)
            .build()
            .unwrap();
        let v = octave.sample(9, DVec3::new(1.3, 2.4, 3.5));
        assert_eq!(v, 1.0, "constant curve 0.25 times weight 4 must be 1");
    }

    #[test]
    fn test_rejects_non_finite_parameters() {
        assert!(matches!(
            NoiseOctave::builder(OctaveKind::Perlin)
                .weight(f64::NAN)
                .build(),
            Err(NoiseConfigError::NonFinite(_))
        ));
        assert!(matches!(
            NoiseOctave::builder(OctaveKind::Perlin)
                .scale(DVec3::new(1.0, f64::INFINITY, 1.0))
                .build(),
            Err(NoiseConfigError::NonFinite(_))
        ));
    }
}
