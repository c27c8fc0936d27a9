//! High-level, ergonomic library API: classify a band stack with its no-data
//! mask applied, classify a series of time slices, and summarize results.
//! Prefer these entrypoints over the low-level `core` modules when
//! integrating the classifier.
use ndarray::Array2;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::core::classifier::WaterClassifier;
use crate::core::nodata::NoDataMask;
use crate::core::params::ClassifierParams;
use crate::core::stack::BandStack;
use crate::error::Result;
use crate::types::WaterClass;

/// Classify a stack, then set every pixel that is no-data in any band to
/// no-water.
pub fn classify_with_nodata(stack: &BandStack, params: &ClassifierParams) -> Result<Array2<u8>> {
    let mask = NoDataMask::from_stack(stack, &params.nodata)?;
    let mut classified = WaterClassifier::new().classify(stack, params.force_f64)?;
    mask.apply(&mut classified)?;
    debug!("Applied no-data mask to {} pixels", mask.count());
    Ok(classified)
}

/// Classify independent time slices concurrently, preserving their order.
/// Fails as a whole if any slice fails.
pub fn classify_series(stacks: &[BandStack], params: &ClassifierParams) -> Result<Vec<Array2<u8>>> {
    info!(
        "Classifying {} time slices (tree version {})",
        stacks.len(),
        WaterClassifier::VERSION
    );
    stacks
        .par_iter()
        .map(|stack| classify_with_nodata(stack, params))
        .collect()
}

/// Per-class pixel counts of a classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClassSummary {
    pub no_water: usize,
    pub unclassified: usize,
    pub water: usize,
    /// Values outside {0, 1, 128}
    pub other: usize,
}

impl ClassSummary {
    pub fn from_classification(classified: &Array2<u8>) -> Self {
        classified
            .iter()
            .fold(ClassSummary::default(), |mut summary, &value| {
                match WaterClass::from_value(value) {
                    Some(WaterClass::NoWater) => summary.no_water += 1,
                    Some(WaterClass::Unclassified) => summary.unclassified += 1,
                    Some(WaterClass::Water) => summary.water += 1,
                    None => summary.other += 1,
                }
                summary
            })
    }

    pub fn total(&self) -> usize {
        self.no_water + self.unclassified + self.water + self.other
    }

    /// Share of water pixels, `0.0` for an empty classification.
    pub fn water_fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.water as f64 / total as f64,
        }
    }
}
