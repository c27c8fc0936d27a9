use std::io::Write;

use ndarray::{Array2, Array3, array};
use waterclass::{
    Band, BandStack, ClassSummary, ClassifierParams, ElementType, Error, NoDataMask,
    WaterClassifier, classify_series, classify_with_nodata, uniform_nodata,
};

const WATER: [i16; 6] = [100, 100, 100, 130, 140, 90];
const LAND: [i16; 6] = [3000, 2500, 2200, 2100, 1800, 1500];

/// A 2x2 scene: water on the diagonal, land elsewhere.
fn checkerboard() -> Array3<i16> {
    Array3::from_shape_fn((6, 2, 2), |(b, r, c)| {
        if r == c { WATER[b] } else { LAND[b] }
    })
}

#[test]
fn nodata_pixels_become_no_water() {
    let mut data = checkerboard();
    data[[Band::B4.index(), 1, 1]] = -9999;
    let stack = BandStack::new(data).unwrap();

    let params = ClassifierParams {
        nodata: uniform_nodata(Some(-9999.0)),
        ..ClassifierParams::default()
    };
    let classified = classify_with_nodata(&stack, &params).unwrap();
    assert_eq!(classified, array![[128u8, 0], [0, 0]]);

    let unmasked = classify_with_nodata(&stack, &ClassifierParams::default()).unwrap();
    assert_eq!(unmasked, WaterClassifier::new().classify(&stack, false).unwrap());
}

#[test]
fn nodata_compares_in_source_type() {
    // Integer no-data values match exactly after widening to f64
    let mut data = Array3::from_shape_fn((6, 1, 2), |(b, _, _)| WATER[b] as u16);
    data[[0, 0, 1]] = u16::MAX;
    let stack = BandStack::new(data).unwrap();
    let mask = NoDataMask::from_stack(&stack, &uniform_nodata(Some(65535.0))).unwrap();
    assert_eq!(mask.as_array(), &array![[false, true]]);
}

#[test]
fn series_preserves_order() {
    let water = BandStack::new(Array3::from_shape_fn((6, 3, 3), |(b, _, _)| WATER[b])).unwrap();
    let land = BandStack::new(Array3::from_shape_fn((6, 3, 3), |(b, _, _)| LAND[b])).unwrap();
    let slices = vec![water.clone(), land.clone(), water, BandStack::new(checkerboard()).unwrap()];

    let results = classify_series(&slices, &ClassifierParams::default()).unwrap();
    assert_eq!(results.len(), 4);
    assert_eq!(results[0], Array2::from_elem((3, 3), 128u8));
    assert_eq!(results[1], Array2::from_elem((3, 3), 0u8));
    assert_eq!(results[2], results[0]);
    assert_eq!(results[3], array![[128u8, 0], [0, 128]]);
}

#[test]
fn series_fails_as_a_whole() {
    let good = BandStack::new(checkerboard()).unwrap();
    let bad = BandStack::I16(Array3::zeros((4, 2, 2)));
    let result = classify_series(&[good.clone(), bad, good], &ClassifierParams::default());
    assert!(matches!(result, Err(Error::BandCount { actual: 4, .. })));

    assert!(classify_series(&[], &ClassifierParams::default()).unwrap().is_empty());
}

#[test]
fn summary_counts_each_class() {
    let classified = array![[0u8, 1, 128], [128, 128, 7]];
    let summary = ClassSummary::from_classification(&classified);
    assert_eq!(
        summary,
        ClassSummary {
            no_water: 1,
            unclassified: 1,
            water: 3,
            other: 1,
        }
    );
    assert_eq!(summary.total(), 6);
    assert_eq!(summary.water_fraction(), 0.5);

    let empty = ClassSummary::from_classification(&Array2::zeros((0, 0)));
    assert_eq!(empty.water_fraction(), 0.0);
}

#[test]
fn params_load_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"force_f64": true, "nodata": [0, 0, 0, 0, 0, null]}}"#
    )
    .unwrap();

    let params = ClassifierParams::from_json_file(file.path()).unwrap();
    assert!(params.force_f64);
    assert_eq!(params.nodata[Band::B1.index()], Some(0.0));
    assert_eq!(params.nodata[Band::B7.index()], None);

    let mut data = checkerboard();
    data[[Band::B2.index(), 0, 0]] = 0;
    let classified = classify_with_nodata(&BandStack::new(data).unwrap(), &params).unwrap();
    assert_eq!(classified[[0, 0]], 0);
    assert_eq!(classified[[1, 1]], 128);
}

#[test]
fn missing_params_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ClassifierParams::from_json_file(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn raw_buffers_decode_band_sequential() {
    let values: Vec<u8> = checkerboard()
        .iter()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    let stack = BandStack::from_le_bytes(ElementType::Int16, 2, 2, &values).unwrap();
    assert_eq!(stack, BandStack::new(checkerboard()).unwrap());

    assert!(matches!(
        BandStack::from_le_bytes(ElementType::Int16, 2, 2, &values[1..]),
        Err(Error::BufferLength { .. })
    ));
    assert!(matches!(
        BandStack::from_le_bytes(ElementType::CFloat32, 2, 2, &values),
        Err(Error::UnsupportedType(ElementType::CFloat32))
    ));
}
