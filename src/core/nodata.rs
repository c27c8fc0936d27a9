use ndarray::{Array2, ArrayView2, Axis, Zip};
use num_traits::AsPrimitive;

use crate::core::stack::{BAND_COUNT, BandStack, dispatch};
use crate::error::{Error, Result};
use crate::types::WaterClass;

/// Pixels lacking valid source data in at least one band.
#[derive(Debug, Clone, PartialEq)]
pub struct NoDataMask {
    mask: Array2<bool>,
}

impl NoDataMask {
    pub fn new(dim: (usize, usize)) -> Self {
        Self {
            mask: Array2::from_elem(dim, false),
        }
    }

    /// Build the mask for a whole stack from per-band no-data values,
    /// given in [B1, B2, B3, B4, B5, B7] order.
    pub fn from_stack(stack: &BandStack, nodata: &[Option<f64>; BAND_COUNT]) -> Result<Self> {
        stack.validate()?;
        let mut mask = Self::new(stack.dim());
        dispatch!(stack, data => {
            for (plane, value) in data.axis_iter(Axis(0)).zip(nodata) {
                mask.accumulate(plane, *value)?;
            }
        });
        Ok(mask)
    }

    /// Mark pixels of `plane` equal to `nodata`. Values compare as `f64`;
    /// `None` marks nothing and a `NaN` no-data value never matches.
    pub fn accumulate<T>(&mut self, plane: ArrayView2<'_, T>, nodata: Option<f64>) -> Result<()>
    where
        T: AsPrimitive<f64> + Send + Sync,
    {
        self.check_dim(plane.dim())?;
        if let Some(nodata) = nodata {
            Zip::from(&mut self.mask)
                .and(&plane)
                .par_for_each(|masked, &value| *masked |= value.as_() == nodata);
        }
        Ok(())
    }

    /// Overwrite masked pixels of a classification with no-water.
    pub fn apply(&self, classification: &mut Array2<u8>) -> Result<()> {
        self.check_dim(classification.dim())?;
        let no_water = WaterClass::NoWater.value();
        Zip::from(classification)
            .and(&self.mask)
            .par_for_each(|class, &masked| {
                if masked {
                    *class = no_water;
                }
            });
        Ok(())
    }

    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&masked| masked).count()
    }

    pub fn as_array(&self) -> &Array2<bool> {
        &self.mask
    }

    fn check_dim(&self, actual: (usize, usize)) -> Result<()> {
        if actual != self.mask.dim() {
            return Err(Error::ShapeMismatch {
                band: "no-data mask".to_string(),
                expected: self.mask.dim(),
                actual,
            });
        }
        Ok(())
    }
}

impl From<Array2<bool>> for NoDataMask {
    fn from(mask: Array2<bool>) -> Self {
        Self { mask }
    }
}

/// No-data values for all six bands, shared across bands.
pub fn uniform_nodata(value: Option<f64>) -> [Option<f64>; BAND_COUNT] {
    [value; BAND_COUNT]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Band;
    use ndarray::{Array3, array};

    #[test]
    fn any_band_at_nodata_masks_the_pixel() {
        let mut data = Array3::<i16>::from_elem((6, 2, 2), 500);
        data[[0, 0, 0]] = -999;
        data[[5, 1, 1]] = 0;
        let stack = BandStack::I16(data);

        let mut nodata = uniform_nodata(Some(-999.0));
        nodata[Band::B7.index()] = Some(0.0);
        let mask = NoDataMask::from_stack(&stack, &nodata).unwrap();

        assert_eq!(mask.as_array(), &array![[true, false], [false, true]]);
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn missing_or_nan_nodata_matches_nothing() {
        let plane = array![[f32::NAN, 0.0]];
        let mut mask = NoDataMask::new((1, 2));
        mask.accumulate(plane.view(), None).unwrap();
        mask.accumulate(plane.view(), Some(f64::NAN)).unwrap();
        assert_eq!(mask.count(), 0);
    }

    #[test]
    fn apply_sets_masked_pixels_to_no_water() {
        let mask = NoDataMask::from(array![[true, false, true]]);
        let mut classified = array![[128u8, 128, 1]];
        mask.apply(&mut classified).unwrap();
        assert_eq!(classified, array![[0u8, 128, 0]]);
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let mask = NoDataMask::new((2, 2));
        let mut classified = Array2::<u8>::zeros((3, 3));
        assert!(matches!(
            mask.apply(&mut classified),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
