use ndarray::{Array3, CowArray, Ix3, Zip};
use num_traits::{AsPrimitive, Float};
use tracing::debug;

use crate::core::stack::BandStack;
use crate::types::ElementType;

/// Floating point representations the classifier computes in.
pub trait FloatElement: Float + Send + Sync + std::fmt::Debug + 'static {
    /// Threshold literal in this precision. Comparisons happen in the
    /// working precision of the data, not in `f64`.
    fn from_threshold(threshold: f64) -> Self;

    fn as_f64(self) -> f64;
}

impl FloatElement for f32 {
    fn from_threshold(threshold: f64) -> Self {
        threshold as f32
    }

    fn as_f64(self) -> f64 {
        self as f64
    }
}

impl FloatElement for f64 {
    fn from_threshold(threshold: f64) -> Self {
        threshold
    }

    fn as_f64(self) -> f64 {
        self
    }
}

/// A band stack in working precision; borrowed when no conversion was needed.
#[derive(Debug, Clone)]
pub enum FloatStack<'a> {
    F32(CowArray<'a, f32, Ix3>),
    F64(CowArray<'a, f64, Ix3>),
}

impl FloatStack<'_> {
    pub fn element_type(&self) -> ElementType {
        match self {
            FloatStack::F32(_) => ElementType::Float32,
            FloatStack::F64(_) => ElementType::Float64,
        }
    }

    /// True if the data was copied during normalization.
    pub fn is_converted(&self) -> bool {
        match self {
            FloatStack::F32(data) => data.is_owned(),
            FloatStack::F64(data) => data.is_owned(),
        }
    }
}

/// Coerce a stack to floating point.
///
/// `Float64` input is always kept as is. Otherwise the target is `Float64`
/// when `force_f64` is set and `Float32` when it is not. Data is only copied
/// when its element type differs from the target.
pub fn normalize(stack: &BandStack, force_f64: bool) -> FloatStack<'_> {
    let normalized = match stack {
        BandStack::F64(data) => FloatStack::F64(CowArray::from(data.view())),
        BandStack::F32(data) if !force_f64 => FloatStack::F32(CowArray::from(data.view())),
        _ if force_f64 => FloatStack::F64(CowArray::from(to_f64(stack))),
        _ => FloatStack::F32(CowArray::from(to_f32(stack))),
    };

    debug!(
        "Normalized {} stack to {} (converted: {})",
        stack.element_type(),
        normalized.element_type(),
        normalized.is_converted()
    );
    normalized
}

fn to_f32(stack: &BandStack) -> Array3<f32> {
    match stack {
        BandStack::U8(data) => cast(data),
        BandStack::U16(data) => cast(data),
        BandStack::I16(data) => cast(data),
        BandStack::U32(data) => cast(data),
        BandStack::I32(data) => cast(data),
        BandStack::F32(data) => data.clone(),
        BandStack::F64(data) => cast(data),
    }
}

fn to_f64(stack: &BandStack) -> Array3<f64> {
    match stack {
        BandStack::U8(data) => cast(data),
        BandStack::U16(data) => cast(data),
        BandStack::I16(data) => cast(data),
        BandStack::U32(data) => cast(data),
        BandStack::I32(data) => cast(data),
        BandStack::F32(data) => cast(data),
        BandStack::F64(data) => data.clone(),
    }
}

fn cast<T, F>(data: &Array3<T>) -> Array3<F>
where
    T: AsPrimitive<F> + Send + Sync,
    F: Copy + Send + Sync + 'static,
{
    Zip::from(data).par_map_collect(|&value| value.as_())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack_of<T: Copy>(value: T) -> Array3<T> {
        Array3::from_elem((6, 2, 2), value)
    }

    #[test]
    fn integer_input_becomes_single_precision() {
        let stack = BandStack::U16(stack_of(2083u16));
        match normalize(&stack, false) {
            FloatStack::F32(data) => {
                assert!(data.is_owned());
                assert!(data.iter().all(|&v| v == 2083.0));
            }
            other => panic!("expected Float32, got {}", other.element_type()),
        }
    }

    #[test]
    fn single_precision_input_is_borrowed() {
        let stack = BandStack::F32(stack_of(0.25f32));
        let normalized = normalize(&stack, false);
        assert_eq!(normalized.element_type(), ElementType::Float32);
        assert!(!normalized.is_converted());
    }

    #[test]
    fn double_precision_input_stays_double_without_force() {
        let stack = BandStack::F64(stack_of(0.1f64));
        let normalized = normalize(&stack, false);
        assert_eq!(normalized.element_type(), ElementType::Float64);
        assert!(!normalized.is_converted());
    }

    #[test]
    fn force_promotes_to_double() {
        let stack = BandStack::F32(stack_of(0.1f32));
        match normalize(&stack, true) {
            FloatStack::F64(data) => {
                assert!(data.is_owned());
                assert!(data.iter().all(|&v| v == 0.1f32 as f64));
            }
            other => panic!("expected Float64, got {}", other.element_type()),
        }

        let stack = BandStack::I32(stack_of(-7i32));
        let normalized = normalize(&stack, true);
        assert_eq!(normalized.element_type(), ElementType::Float64);
        assert!(normalized.is_converted());

        let stack = BandStack::F64(stack_of(3.0f64));
        assert!(!normalize(&stack, true).is_converted());
    }

    #[test]
    fn thresholds_round_to_working_precision() {
        assert_eq!(f32::from_threshold(-0.01), -0.01f32);
        assert_eq!(f64::from_threshold(-0.01), -0.01f64);
        assert_eq!(f32::from_threshold(2083.5).as_f64(), 2083.5);
    }
}
