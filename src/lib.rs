#![doc = r#"
WATERCLASS: per-pixel surface water classification for Landsat surface reflectance.

This crate classifies every pixel of a six-band surface reflectance stack
(Landsat 5/7 bands 1, 2, 3, 4, 5 and 7, scaled 0–10000) as no-water (0),
unclassified (1) or water (128) by evaluating a fixed, pre-trained decision
tree against the band values and three normalized difference indices. It
powers the `waterclass` CLI and can be embedded in your own Rust applications.

Quick start
-----------
```rust
use ndarray::Array3;
use waterclass::{BandStack, WaterClassifier};

fn main() -> waterclass::Result<()> {
    // (band, row, column), bands ordered B1, B2, B3, B4, B5, B7
    let data = Array3::from_shape_vec(
        (6, 1, 1),
        vec![100i16, 100, 100, 130, 140, 90],
    )
    .expect("six values");
    let stack = BandStack::new(data)?;

    let classified = WaterClassifier::new().classify(&stack, false)?;
    assert_eq!(classified[[0, 0]], 128);
    Ok(())
}
```

No-data and time series
-----------------------
```rust
use ndarray::Array3;
use waterclass::{BandStack, ClassSummary, ClassifierParams, classify_series};

fn main() -> waterclass::Result<()> {
    let params = ClassifierParams {
        nodata: [Some(-999.0); 6],
        ..ClassifierParams::default()
    };
    let slices = vec![
        BandStack::new(Array3::<i16>::from_elem((6, 4, 4), 500))?,
        BandStack::new(Array3::<i16>::from_elem((6, 4, 4), -999))?,
    ];

    for classified in classify_series(&slices, &params)? {
        let summary = ClassSummary::from_classification(&classified);
        println!("water fraction: {:.3}", summary.water_fraction());
    }
    Ok(())
}
```

Numeric semantics
-----------------
- Integer and `f32` input is computed in `f32`; `f64` input, or any input with
  `force_f64`, is computed in `f64`.
- Indices are `(a - b) / (a + b)` without a zero guard. `NaN` fails every
  `<=` test and so follows the false branch of each node it reaches.
- A value equal to a threshold takes the true branch.

Error handling
--------------
All fallible functions return `waterclass::Result<T>`; structural problems
(band count, plane shapes, buffer decoding, complex input) are reported as
`waterclass::Error` before any computation.

Useful modules
--------------
- [`api`] - high-level entry points.
- [`crate::core`] - stack, normalization, indices, the decision tree and the classifier.
- [`types`] - `Band`, `SpectralIndex`, `Feature`, `WaterClass`, `ElementType`.
- [`error`] - crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod types;

// Curated public API surface
pub use crate::core::classifier::WaterClassifier;
pub use crate::core::indices::{SpectralIndices, index_plane, normalized_difference};
pub use crate::core::nodata::{NoDataMask, uniform_nodata};
pub use crate::core::normalize::{FloatElement, FloatStack, normalize};
pub use crate::core::params::ClassifierParams;
pub use crate::core::stack::{BAND_COUNT, BandPlanes, BandStack};
pub use crate::core::tree::{
    FeaturePlanes, Node, PREDICATES, PixelFeatures, PixelTrace, Predicate, TREE, TraceStep,
    classify_pixel, evaluate, trace_pixel,
};
pub use crate::error::{Error, Result};
pub use crate::types::{Band, ElementType, Feature, SpectralIndex, WaterClass};

pub use crate::api::{ClassSummary, classify_series, classify_with_nodata};
