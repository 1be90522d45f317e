use ndarray::Array3;

use crate::error::{DatasetError, Result};

/// A unary array transform applied to an image or to its one-hot mask.
///
/// Any `Fn(Array3<f32>) -> Array3<f32> + Send + Sync` closure is a transform.
pub trait Transform: Send + Sync {
    fn apply(&self, input: Array3<f32>) -> Array3<f32>;

    /// Whether the output is channels-first `(C, H, W)` for a `(H, W, C)` input.
    fn channels_first(&self) -> bool {
        false
    }
}

impl<F> Transform for F
where
    F: Fn(Array3<f32>) -> Array3<f32> + Send + Sync,
{
    fn apply(&self, input: Array3<f32>) -> Array3<f32> {
        self(input)
    }
}

// ---------------------------------------------------------------------------
// Built-in transforms
// ---------------------------------------------------------------------------

/// Rescale every value to `[0, 1]` using the array's own min and max.
/// A constant array maps to zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinMaxNorm;

impl Transform for MinMaxNorm {
    fn apply(&self, input: Array3<f32>) -> Array3<f32> {
        let min = input.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = input.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let range = max - min;
        if !range.is_finite() || range.abs() < f32::EPSILON {
            return Array3::zeros(input.raw_dim());
        }
        input.mapv(|v| (v - min) / range)
    }
}

/// `(H, W, C)` to channels-first `(C, H, W)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transpose;

impl Transform for Transpose {
    fn apply(&self, input: Array3<f32>) -> Array3<f32> {
        input.permuted_axes([2, 0, 1]).as_standard_layout().into_owned()
    }

    fn channels_first(&self) -> bool {
        true
    }
}

/// Chain transforms, applied in order.
pub struct Compose {
    transforms: Vec<Box<dyn Transform>>,
}

impl Compose {
    pub fn new(transforms: Vec<Box<dyn Transform>>) -> Self {
        Self { transforms }
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl Transform for Compose {
    fn apply(&self, mut input: Array3<f32>) -> Array3<f32> {
        for t in &self.transforms {
            input = t.apply(input);
        }
        input
    }

    fn channels_first(&self) -> bool {
        self.transforms.iter().any(|t| t.channels_first())
    }
}

// ---------------------------------------------------------------------------
// Registry: config names → transforms
// ---------------------------------------------------------------------------

/// Names accepted in `transforms` / `target_transforms`.
pub const TRANSFORM_NAMES: &[&str] = &["min_max_norm", "transpose", "min_max_norm_transpose"];

/// Instantiate a single built-in transform by name.
pub fn transform_by_name(name: &str) -> Result<Box<dyn Transform>> {
    match name {
        "min_max_norm" => Ok(Box::new(MinMaxNorm)),
        "transpose" => Ok(Box::new(Transpose)),
        "min_max_norm_transpose" => {
            let steps: Vec<Box<dyn Transform>> = vec![Box::new(MinMaxNorm), Box::new(Transpose)];
            Ok(Box::new(Compose::new(steps)))
        }
        other => Err(DatasetError::Config(format!(
            "unknown transform '{other}' (expected one of {TRANSFORM_NAMES:?})"
        ))),
    }
}

/// Build the transform for a list of names.
///
/// An empty list yields `None` rather than an identity transform.
pub fn load_transforms(names: &[String]) -> Result<Option<Box<dyn Transform>>> {
    match names {
        [] => Ok(None),
        [single] => transform_by_name(single).map(Some),
        many => {
            let transforms = many
                .iter()
                .map(|n| transform_by_name(n))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(Box::new(Compose::new(transforms))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    fn sample() -> Array3<f32> {
        // (H=1, W=2, C=3)
        array![[[0.0, 10.0, 20.0], [30.0, 40.0, 50.0]]]
    }

    #[test]
    fn min_max_norm_spans_unit_interval() {
        let out = MinMaxNorm.apply(sample());
        assert_eq!(out[[0, 0, 0]], 0.0);
        assert_eq!(out[[0, 1, 2]], 1.0);
        assert!((out[[0, 0, 1]] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn min_max_norm_of_constant_is_zero() {
        let out = MinMaxNorm.apply(Array3::from_elem((2, 2, 1), 7.0));
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn transpose_moves_channels_first() {
        let out = Transpose.apply(sample());
        assert_eq!(out.dim(), (3, 1, 2));
        assert_eq!(out[[2, 0, 1]], 50.0);
        assert_eq!(out[[1, 0, 0]], 10.0);
        assert!(Transpose.channels_first());
        assert!(!MinMaxNorm.channels_first());
    }

    #[test]
    fn closures_are_transforms() {
        let double = |a: Array3<f32>| a * 2.0f32;
        let out = double.apply(sample());
        assert_eq!(out[[0, 1, 0]], 60.0);
        assert!(!double.channels_first());
    }

    #[test]
    fn compose_applies_in_order() {
        let steps: Vec<Box<dyn Transform>> = vec![
            Box::new(|a: Array3<f32>| a + 1.0f32),
            Box::new(|a: Array3<f32>| a * 10.0f32),
        ];
        let t = Compose::new(steps);
        assert_eq!(t.len(), 2);
        let out = t.apply(sample());
        assert_eq!(out[[0, 0, 0]], 10.0);
    }

    #[test]
    fn empty_name_list_means_no_transform() {
        assert!(load_transforms(&[]).unwrap().is_none());
    }

    #[test]
    fn named_transforms_chain() {
        let names = vec!["min_max_norm".to_string(), "transpose".to_string()];
        let t = load_transforms(&names).unwrap().unwrap();
        let out = t.apply(sample());
        assert_eq!(out.dim(), (3, 1, 2));
        assert_eq!(out[[2, 0, 1]], 1.0);
        assert!(t.channels_first());
    }

    #[test]
    fn unknown_name_is_a_config_error() {
        let names = vec!["rotate_90".to_string()];
        assert!(matches!(load_transforms(&names), Err(DatasetError::Config(_))));
    }
}
