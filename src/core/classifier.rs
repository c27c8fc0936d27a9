use ndarray::{Array2, ArrayView3};
use tracing::debug;

use crate::core::indices::SpectralIndices;
use crate::core::normalize::{FloatElement, FloatStack, normalize};
use crate::core::stack::{BandPlanes, BandStack};
use crate::core::tree::{FeaturePlanes, evaluate};
use crate::error::Result;

/// Classifies six-band surface reflectance stacks into no-water (0),
/// unclassified (1) and water (128).
#[derive(Debug, Clone, Copy, Default)]
pub struct WaterClassifier;

impl WaterClassifier {
    /// Revision of the decision tree.
    pub const VERSION: u32 = 7;

    pub fn new() -> Self {
        Self
    }

    pub fn version(&self) -> u32 {
        Self::VERSION
    }

    /// Classify a `(6, rows, cols)` band stack into a `(rows, cols)` array.
    ///
    /// Computation runs in `f64` when `force_f64` is set or the stack already
    /// holds `f64`, in `f32` otherwise.
    pub fn classify(&self, stack: &BandStack, force_f64: bool) -> Result<Array2<u8>> {
        stack.validate()?;
        let (rows, cols) = stack.dim();
        debug!(
            "Started: {}x{} {} stack, force_f64={}",
            rows,
            cols,
            stack.element_type(),
            force_f64
        );

        let classified = match normalize(stack, force_f64) {
            FloatStack::F32(data) => classify_float(data.view())?,
            FloatStack::F64(data) => classify_float(data.view())?,
        };

        debug!("Completed");
        Ok(classified)
    }
}

fn classify_float<F: FloatElement>(data: ArrayView3<'_, F>) -> Result<Array2<u8>> {
    let bands = BandPlanes::new(data.view())?;
    let indices = SpectralIndices::compute(&bands)?;
    let features = FeaturePlanes::new(bands, &indices)?;
    Ok(evaluate(&features))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    fn water_stack<T: Copy>(values: [T; 6]) -> Array3<T> {
        Array3::from_shape_fn((6, 2, 3), |(b, _, _)| values[b])
    }

    #[test]
    fn borrowed_and_converted_stacks_classify_alike() {
        let borrowed = BandStack::F32(water_stack([100.0f32, 100.0, 100.0, 130.0, 140.0, 90.0]));
        let converted = BandStack::I16(water_stack([100i16, 100, 100, 130, 140, 90]));
        let classifier = WaterClassifier::new();

        for force_f64 in [false, true] {
            let from_borrowed = classifier.classify(&borrowed, force_f64).unwrap();
            let from_converted = classifier.classify(&converted, force_f64).unwrap();
            assert_eq!(from_borrowed, Array2::from_elem((2, 3), 128u8));
            assert_eq!(from_borrowed, from_converted);
        }
    }
}
