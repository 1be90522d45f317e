use ndarray::{Array2, Array3, ArrayView2, Axis};

/// Raw mask value that stands for class index 1.
pub const MASK_SCALE: f32 = 255.0;

/// One-hot encode a single-channel mask of raw 8-bit values.
///
/// Raw values are divided by [`MASK_SCALE`] and channel `v` is `1.0` wherever
/// the normalised value equals `v` exactly. Masks are expected to hold only
/// 0 and 255; any other raw value normalises to a fraction that matches no
/// label, so that pixel gets an all-zero row.
pub fn one_hot(raw: ArrayView2<'_, f32>, num_labels: usize) -> Array3<f32> {
    let normalized = raw.mapv(|v| v / MASK_SCALE);
    let (height, width) = normalized.dim();

    let mut out = Array3::<f32>::zeros((height, width, num_labels));
    for v in 0..num_labels {
        let plane: Array2<f32> = normalized.mapv(|m| if m == v as f32 { 1.0 } else { 0.0 });
        out.index_axis_mut(Axis(2), v).assign(&plane);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn zero_and_full_values_split_into_two_channels() {
        let raw = array![[0.0f32, 255.0], [255.0, 0.0]];
        let mask = one_hot(raw.view(), 2);

        assert_eq!(mask.dim(), (2, 2, 2));
        assert_eq!(mask.index_axis(Axis(2), 0), array![[1.0f32, 0.0], [0.0, 1.0]]);
        assert_eq!(mask.index_axis(Axis(2), 1), array![[0.0f32, 1.0], [1.0, 0.0]]);
    }

    #[test]
    fn out_of_domain_values_produce_empty_rows() {
        let raw = array![[0.0f32, 128.0, 1.0, 255.0]];
        let mask = one_hot(raw.view(), 2);
        let sums = mask.sum_axis(Axis(2));
        assert_eq!(sums, array![[1.0f32, 0.0, 0.0, 1.0]]);
    }

    #[test]
    fn extra_labels_stay_empty_for_binary_masks() {
        let raw = array![[0.0f32, 255.0]];
        let mask = one_hot(raw.view(), 3);
        assert_eq!(mask.index_axis(Axis(2), 2), array![[0.0f32, 0.0]]);
    }
}
