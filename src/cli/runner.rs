use std::path::Path;

use ndarray::Array3;
use serde::Serialize;
use tracing::{debug, info};

use waterclass::{
    BandStack, ClassifierParams, FloatElement, NoDataMask, PREDICATES, PixelFeatures, PixelTrace,
    TREE, WaterClass, WaterClassifier, trace_pixel,
};

use super::args::{CliArgs, Command};
use super::errors::AppError;

#[derive(Serialize)]
struct PixelReport {
    bands: [f64; 6],
    indices: [f64; 3],
    precision: &'static str,
    trace: PixelTrace,
    /// Final value after the no-data overlay
    value: u8,
    nodata: bool,
}

fn print_thresholds(json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&PREDICATES)?);
        return Ok(());
    }
    println!(
        "Decision tree version {} ({} nodes, {} leaves)",
        WaterClassifier::VERSION,
        TREE.node_count(),
        TREE.leaf_count()
    );
    for predicate in PREDICATES.iter() {
        println!("  {}", predicate);
    }
    Ok(())
}

fn trace_in<F: FloatElement>(bands: [F; 6]) -> (PixelTrace, [f64; 3]) {
    let pixel = PixelFeatures::from_bands(bands);
    (trace_pixel(&pixel), pixel.indices.map(|v| v.as_f64()))
}

/// Classify one pixel given as f64 band values. No-data values are matched
/// against those values before any narrowing to f32.
fn pixel_report(
    bands: [f64; 6],
    params: &ClassifierParams,
) -> Result<PixelReport, AppError> {
    let source = Array3::from_shape_fn((6, 1, 1), |(b, _, _)| bands[b]);
    let mask = NoDataMask::from_stack(&BandStack::new(source.clone())?, &params.nodata)?;

    // A 1x1 stack in the requested precision goes through the same path as a scene
    let (stack, (trace, indices)) = if params.force_f64 {
        (BandStack::new(source)?, trace_in(bands))
    } else {
        let single = bands.map(|v| v as f32);
        (BandStack::new(source.mapv(|v| v as f32))?, trace_in(single))
    };

    let mut classified = WaterClassifier::new().classify(&stack, params.force_f64)?;
    if classified[[0, 0]] != trace.class.value() {
        return Err(AppError::TraceMismatch {
            stack: classified[[0, 0]],
            trace: trace.class.value(),
        });
    }
    mask.apply(&mut classified)?;
    let value = classified[[0, 0]];
    debug!(
        "Pixel visited {} nodes, leaf {}, final value {}",
        trace.steps.len(),
        trace.class,
        value
    );

    Ok(PixelReport {
        bands,
        indices,
        precision: if params.force_f64 { "f64" } else { "f32" },
        trace,
        value,
        nodata: mask.count() > 0,
    })
}

fn classify_one(
    bands: [f64; 6],
    force_f64: bool,
    config: Option<&Path>,
    json: bool,
) -> Result<(), AppError> {
    let mut params = match config {
        Some(path) => {
            info!("Loading classifier parameters from {:?}", path);
            ClassifierParams::from_json_file(path)?
        }
        None => ClassifierParams::default(),
    };
    params.force_f64 |= force_f64;
    let report = pixel_report(bands, &params)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Precision: {}", report.precision);
    println!(
        "Indices: NDI_52 = {:.6}, NDI_43 = {:.6}, NDI_72 = {:.6}",
        report.indices[0], report.indices[1], report.indices[2]
    );
    for step in &report.trace.steps {
        println!(
            "  {:<4} {} = {} <= {} -> {}",
            step.predicate.id,
            step.predicate.feature,
            step.value,
            step.predicate.threshold,
            step.passed
        );
    }
    if report.nodata {
        println!("Leaf: {} (masked as no-data)", report.trace.class);
    }
    match WaterClass::from_value(report.value) {
        Some(class) => println!("Class: {} ({})", report.value, class),
        None => println!("Class: {}", report.value),
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    match args.command {
        Command::Thresholds { json } => print_thresholds(json)?,
        Command::Pixel {
            b1,
            b2,
            b3,
            b4,
            b5,
            b7,
            float64,
            config,
            json,
        } => classify_one([b1, b2, b3, b4, b5, b7], float64, config.as_deref(), json)?,
    }
    Ok(())
}
