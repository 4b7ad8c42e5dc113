//! Piecewise-linear conversion curves.

use crate::error::NoiseConfigError;

/// An ordered set of (x, y) control points defining a clamped
/// piecewise-linear mapping over the unit interval.
///
/// Evaluation below the first node returns the first node's y; above the
/// last node, the last node's y. With zero nodes the curve evaluates to 0
/// everywhere, and with a single node to that node's y — both are valid
/// degenerate curves, not errors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversionCurve {
    /// Sorted by x; x values are unique.
    nodes: Vec<(f64, f64)>,
}

impl ConversionCurve {
    /// Creates an empty curve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a curve from a node list in one call.
    ///
    /// # Errors
    ///
    /// Same validation as [`ConversionCurve::add_node`].
    pub fn from_nodes(nodes: &[(f64, f64)]) -> Result<Self, NoiseConfigError> {
        let mut curve = Self::new();
        for &(x, y) in nodes {
            curve.add_node(x, y)?;
        }
        Ok(curve)
    }

    /// Inserts a control point, keeping nodes sorted by x.
    ///
    /// Re-adding a node at an existing x replaces it (last write wins), so
    /// the curve stays well-defined.
    ///
    /// # Errors
    ///
    /// Returns [`NoiseConfigError::NonFinite`] for NaN/infinite inputs and
    /// [`NoiseConfigError::NodeOutOfRange`] if `x` is outside `[0, 1]`.
    pub fn add_node(&mut self, x: f64, y: f64) -> Result<&mut Self, NoiseConfigError> {
        if !x.is_finite() {
            return Err(NoiseConfigError::NonFinite("conversion node x"));
        }
        if !y.is_finite() {
            return Err(NoiseConfigError::NonFinite("conversion node y"));
        }
        if !(0.0..=1.0).contains(&x) {
            return Err(NoiseConfigError::NodeOutOfRange(x));
        }
        match self.nodes.binary_search_by(|probe| probe.0.total_cmp(&x)) {
            Ok(i) => self.nodes[i].1 = y,
            Err(i) => self.nodes.insert(i, (x, y)),
        }
        Ok(self)
    }

    /// Returns the number of control points.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the curve has no control points.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Evaluates the curve at `x` with clamped linear interpolation.
    ///
    /// `x` may lie anywhere on the real line; values outside the node span
    /// clamp to the nearest boundary node.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self.nodes.as_slice() {
            [] => 0.0,
            [(_, y)] => *y,
            [(x0, y0), .., (xn, yn)] => {
                if x <= *x0 {
                    return *y0;
                }
                if x >= *xn {
                    return *yn;
                }
                // First node strictly above x; the guards ensure 1 <= i < len.
                let i = self.nodes.partition_point(|&(nx, _)| nx <= x);
                let (xa, ya) = self.nodes[i - 1];
                let (xb, yb) = self.nodes[i];
                ya + (yb - ya) * ((x - xa) / (xb - xa))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ramp_interpolates() {
        let curve = ConversionCurve::from_nodes(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();
        assert_eq!(curve.evaluate(0.5), 0.5);
        assert_eq!(curve.evaluate(0.25), 0.25);
    }

    #[test]
    fn test_clamps_outside_node_span() {
        let curve = ConversionCurve::from_nodes(&[(0.0, 0.0), (1.0, 1.0)]).unwrap();
        assert_eq!(curve.evaluate(-3.0), 0.0, "below first node clamps");
        assert_eq!(curve.evaluate(2.0), 1.0, "above last node clamps");
    }

    #[test]
    fn test_empty_curve_evaluates_to_zero() {
        let curve = ConversionCurve::new();
        for x in [-1.0, 0.0, 0.5, 1.0, 10.0] {
            assert_eq!(curve.evaluate(x), 0.0);
        }
    }

    #[test]
    fn test_single_node_is_constant() {
        let curve = ConversionCurve::from_nodes(&[(0.3, -0.25)]).unwrap();
        for x in [-1.0, 0.0, 0.3, 1.0, 10.0] {
            assert_eq!(curve.evaluate(x), -0.25);
        }
    }

    #[test]
    fn test_readding_node_replaces() {
        let mut curve = ConversionCurve::new();
        curve
            .add_node(0.5, 1.0)
            .unwrap()
            .add_node(0.5, -1.0)
            .unwrap();
        assert_eq!(curve.len(), 1);
        assert_eq!(curve.evaluate(0.5), -1.0, "last write wins at the same x");
    }

    #[test]
    fn test_multi_segment_interpolation() {
        let curve =
            ConversionCurve::from_nodes(&[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)]).unwrap();
        assert_eq!(curve.evaluate(0.25), 0.5);
        assert_eq!(curve.evaluate(0.75), 0.5);
        assert_eq!(curve.evaluate(0.5), 1.0);
    }

    #[test]
    fn test_rejects_bad_nodes() {
        let mut curve = ConversionCurve::new();
        assert!(matches!(
            curve.add_node(f64::NAN, 0.0),
            Err(NoiseConfigError::NonFinite(_))
        ));
        assert!(matches!(
            curve.add_node(0.0, f64::INFINITY),
            Err(NoiseConfigError::NonFinite(_))
        ));
        assert!(matches!(
            curve.add_node(1.5, 0.0),
            Err(NoiseConfigError::NodeOutOfRange(_))
        ));
    }
}
