//! The fixed surface water decision tree.
//!
//! The tree was produced by CART on Landsat 5/7 surface reflectance
//! (Mueller et al., 2016, doi:10.1016/j.rse.2015.11.003) and is part of the
//! algorithm, not configuration. Its 22 tests live in [`PREDICATES`] and its
//! 45 nodes in [`TREE`]. Every test is `feature <= threshold`; a value equal
//! to the threshold takes the true branch.
//!
//! [`evaluate`] runs the tree over whole arrays with boolean masks. A node's
//! false mask is the negation of its true mask, so a pixel whose tested value
//! is `NaN` continues down the false branch. [`classify_pixel`] walks the same
//! structure for a single pixel and yields identical results.
use ndarray::{Array2, ArrayView2, Zip};
use serde::Serialize;

use crate::core::indices::SpectralIndices;
use crate::core::normalize::FloatElement;
use crate::core::stack::BandPlanes;
use crate::error::{Error, Result};
use crate::types::{Band, Feature, SpectralIndex, WaterClass};

/// A single `feature <= threshold` test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Predicate {
    pub id: &'static str,
    pub feature: Feature,
    pub threshold: f64,
}

impl Predicate {
    const fn band(id: &'static str, band: Band, threshold: f64) -> Self {
        Self {
            id,
            feature: Feature::Band(band),
            threshold,
        }
    }

    const fn index(id: &'static str, index: SpectralIndex, threshold: f64) -> Self {
        Self {
            id,
            feature: Feature::Index(index),
            threshold,
        }
    }

    /// `value <= threshold` in the working precision of `value`.
    pub fn holds<F: FloatElement>(&self, value: F) -> bool {
        value <= F::from_threshold(self.threshold)
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} <= {}", self.id, self.feature, self.threshold)
    }
}

pub const PREDICATES: [Predicate; 22] = [
    Predicate::index("P1", SpectralIndex::Ndi52, -0.01),
    Predicate::band("P2", Band::B1, 2083.5),
    Predicate::band("P3", Band::B7, 323.5),
    Predicate::index("P4", SpectralIndex::Ndi43, 0.61),
    Predicate::band("P5", Band::B1, 1400.5),
    Predicate::index("P6", SpectralIndex::Ndi43, -0.01),
    Predicate::index("P7", SpectralIndex::Ndi72, -0.23),
    Predicate::band("P8", Band::B1, 379.0),
    Predicate::index("P9", SpectralIndex::Ndi43, 0.22),
    Predicate::band("P10", Band::B1, 473.0),
    Predicate::index("P11", SpectralIndex::Ndi52, 0.23),
    Predicate::band("P12", Band::B1, 334.5),
    Predicate::index("P13", SpectralIndex::Ndi43, 0.54),
    Predicate::index("P14", SpectralIndex::Ndi52, 0.12),
    Predicate::band("P15", Band::B3, 364.5),
    Predicate::band("P16", Band::B1, 129.5),
    Predicate::band("P17", Band::B1, 300.5),
    Predicate::index("P18", SpectralIndex::Ndi52, 0.34),
    Predicate::band("P19", Band::B1, 249.5),
    Predicate::index("P20", SpectralIndex::Ndi43, 0.45),
    Predicate::band("P21", Band::B3, 364.5),
    Predicate::band("P22", Band::B1, 129.5),
];

/// A tree node. `predicate` indexes into [`PREDICATES`].
#[derive(Debug, PartialEq)]
pub enum Node {
    Split {
        predicate: usize,
        when_true: &'static Node,
        when_false: &'static Node,
    },
    Leaf(WaterClass),
}

const NO_WATER: Node = Node::Leaf(WaterClass::NoWater);
const WATER: Node = Node::Leaf(WaterClass::Water);

macro_rules! split {
    ($predicate:expr, $when_true:expr, $when_false:expr) => {
        Node::Split {
            predicate: $predicate,
            when_true: &$when_true,
            when_false: &$when_false,
        }
    };
}

/// Root of the tree (node 1). Predicate `k` is `PREDICATES[k - 1]`.
pub static TREE: Node = split!(
    0,
    // node 2
    split!(
        1,
        // node 4
        split!(
            2,
            split!(3, WATER, NO_WATER),
            // node 8
            split!(
                4,
                // node 12
                split!(
                    6,
                    // node 16
                    split!(8, WATER, split!(9, WATER, NO_WATER)),
                    split!(7, WATER, NO_WATER)
                ),
                split!(5, WATER, NO_WATER)
            )
        ),
        NO_WATER
    ),
    // node 21
    split!(
        10,
        // node 22
        split!(
            11,
            split!(
                12,
                // node 26
                split!(
                    13,
                    WATER,
                    // node 28
                    split!(
                        14,
                        split!(15, WATER, NO_WATER),
                        split!(16, WATER, NO_WATER)
                    )
                ),
                NO_WATER
            ),
            NO_WATER
        ),
        // node 35
        split!(
            17,
            split!(
                18,
                split!(
                    19,
                    split!(20, split!(21, WATER, NO_WATER), NO_WATER),
                    NO_WATER
                ),
                NO_WATER
            ),
            NO_WATER
        )
    )
);

impl Node {
    pub fn node_count(&self) -> usize {
        match self {
            Node::Split {
                when_true,
                when_false,
                ..
            } => 1 + when_true.node_count() + when_false.node_count(),
            Node::Leaf(_) => 1,
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Node::Split {
                when_true,
                when_false,
                ..
            } => when_true.leaf_count() + when_false.leaf_count(),
            Node::Leaf(_) => 1,
        }
    }

    /// Predicate indices in depth-first order, true branch first.
    pub fn predicates(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_predicates(&mut out);
        out
    }

    fn collect_predicates(&self, out: &mut Vec<usize>) {
        if let Node::Split {
            predicate,
            when_true,
            when_false,
        } = self
        {
            out.push(*predicate);
            when_true.collect_predicates(out);
            when_false.collect_predicates(out);
        }
    }
}

/// Band planes and index planes the tree reads, all of one shape.
#[derive(Debug, Clone)]
pub struct FeaturePlanes<'a, F> {
    bands: BandPlanes<'a, F>,
    indices: &'a SpectralIndices<F>,
}

impl<'a, F: FloatElement> FeaturePlanes<'a, F> {
    pub fn new(bands: BandPlanes<'a, F>, indices: &'a SpectralIndices<F>) -> Result<Self> {
        let expected = bands.dim();
        for index in SpectralIndex::ALL {
            let actual = indices.get(index).dim();
            if actual != expected {
                return Err(Error::ShapeMismatch {
                    band: index.to_string(),
                    expected,
                    actual,
                });
            }
        }
        Ok(Self { bands, indices })
    }

    pub fn get(&self, feature: Feature) -> ArrayView2<'a, F> {
        match feature {
            Feature::Band(band) => self.bands.band(band),
            Feature::Index(index) => self.indices.get(index),
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.bands.dim()
    }
}

/// Classify every pixel with whole-array mask operations.
///
/// The output starts as `Unclassified` and each leaf writes its class through
/// the mask of pixels that reached it.
pub fn evaluate<F: FloatElement>(features: &FeaturePlanes<'_, F>) -> Array2<u8> {
    let dim = features.dim();
    let mut classified = Array2::from_elem(dim, WaterClass::Unclassified.value());
    let reached = Array2::from_elem(dim, true);
    descend(&TREE, &reached, features, &mut classified);
    classified
}

fn descend<F: FloatElement>(
    node: &Node,
    reached: &Array2<bool>,
    features: &FeaturePlanes<'_, F>,
    classified: &mut Array2<u8>,
) {
    if !reached.iter().any(|&r| r) {
        return;
    }

    match node {
        Node::Leaf(class) => {
            let value = class.value();
            Zip::from(classified)
                .and(reached)
                .par_for_each(|out, &r| {
                    if r {
                        *out = value;
                    }
                });
        }
        Node::Split {
            predicate,
            when_true,
            when_false,
        } => {
            let predicate = &PREDICATES[*predicate];
            let threshold = F::from_threshold(predicate.threshold);
            let values = features.get(predicate.feature);

            let passed = Zip::from(reached)
                .and(&values)
                .par_map_collect(|&r, &v| r && v <= threshold);
            let failed = Zip::from(reached)
                .and(&passed)
                .par_map_collect(|&r, &p| r && !p);

            descend(when_true, &passed, features, classified);
            descend(when_false, &failed, features, classified);
        }
    }
}

/// Band and index values of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelFeatures<F> {
    pub bands: [F; 6],
    pub indices: [F; 3],
}

impl<F: FloatElement> PixelFeatures<F> {
    /// Derive the indices from band values in [B1, B2, B3, B4, B5, B7] order.
    pub fn from_bands(bands: [F; 6]) -> Self {
        let indices = SpectralIndex::ALL.map(|index| {
            let (a, b) = index.bands();
            let (a, b) = (bands[a.index()], bands[b.index()]);
            (a - b) / (a + b)
        });
        Self { bands, indices }
    }

    pub fn get(&self, feature: Feature) -> F {
        match feature {
            Feature::Band(band) => self.bands[band.index()],
            Feature::Index(index) => match index {
                SpectralIndex::Ndi52 => self.indices[0],
                SpectralIndex::Ndi43 => self.indices[1],
                SpectralIndex::Ndi72 => self.indices[2],
            },
        }
    }
}

/// One visited decision on a pixel's path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceStep {
    pub predicate: Predicate,
    pub value: f64,
    pub passed: bool,
}

/// A pixel's path through the tree and the leaf it ended on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PixelTrace {
    pub steps: Vec<TraceStep>,
    pub class: WaterClass,
}

pub fn trace_pixel<F: FloatElement>(pixel: &PixelFeatures<F>) -> PixelTrace {
    let mut steps = Vec::new();
    let mut node = &TREE;
    loop {
        match node {
            Node::Leaf(class) => {
                return PixelTrace {
                    steps,
                    class: *class,
                };
            }
            Node::Split {
                predicate,
                when_true,
                when_false,
            } => {
                let predicate = PREDICATES[*predicate];
                let value = pixel.get(predicate.feature);
                let passed = predicate.holds(value);
                steps.push(TraceStep {
                    predicate,
                    value: value.as_f64(),
                    passed,
                });
                node = if passed { *when_true } else { *when_false };
            }
        }
    }
}

pub fn classify_pixel<F: FloatElement>(pixel: &PixelFeatures<F>) -> WaterClass {
    trace_pixel(pixel).class
}
