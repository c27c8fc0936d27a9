use ndarray::{Array2, ArrayView2, Zip};

use crate::core::normalize::FloatElement;
use crate::core::stack::BandPlanes;
use crate::error::{Error, Result};
use crate::types::SpectralIndex;

/// Normalized difference `(a - b) / (a + b)`.
///
/// There is no zero guard: where `a + b == 0` the result follows IEEE
/// division (`NaN` for `0 / 0`, `±inf` otherwise).
pub fn normalized_difference<F: FloatElement>(
    a: ArrayView2<'_, F>,
    b: ArrayView2<'_, F>,
) -> Result<Array2<F>> {
    difference_of("normalized difference", a, b)
}

fn difference_of<F: FloatElement>(
    name: &str,
    a: ArrayView2<'_, F>,
    b: ArrayView2<'_, F>,
) -> Result<Array2<F>> {
    if a.dim() != b.dim() {
        return Err(Error::ShapeMismatch {
            band: name.to_string(),
            expected: a.dim(),
            actual: b.dim(),
        });
    }
    Ok(Zip::from(&a)
        .and(&b)
        .par_map_collect(|&a, &b| (a - b) / (a + b)))
}

/// One index over a pair of planes, named after the index in errors.
pub fn index_plane<F: FloatElement>(
    index: SpectralIndex,
    a: ArrayView2<'_, F>,
    b: ArrayView2<'_, F>,
) -> Result<Array2<F>> {
    difference_of(&index.to_string(), a, b)
}

/// The three indices the decision tree tests, computed once per call.
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralIndices<F> {
    pub ndi_52: Array2<F>,
    pub ndi_43: Array2<F>,
    pub ndi_72: Array2<F>,
}

impl<F: FloatElement> SpectralIndices<F> {
    pub fn compute(bands: &BandPlanes<'_, F>) -> Result<Self> {
        let ndi = |index: SpectralIndex| {
            let (a, b) = index.bands();
            index_plane(index, bands.band(a), bands.band(b))
        };
        Ok(Self {
            ndi_52: ndi(SpectralIndex::Ndi52)?,
            ndi_43: ndi(SpectralIndex::Ndi43)?,
            ndi_72: ndi(SpectralIndex::Ndi72)?,
        })
    }

    pub fn get(&self, index: SpectralIndex) -> ArrayView2<'_, F> {
        match index {
            SpectralIndex::Ndi52 => self.ndi_52.view(),
            SpectralIndex::Ndi43 => self.ndi_43.view(),
            SpectralIndex::Ndi72 => self.ndi_72.view(),
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.ndi_52.dim()
    }
}
