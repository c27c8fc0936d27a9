//! Shared types and enums used across the classifier.
//! Includes `Band`, `SpectralIndex`, `Feature`, `WaterClass` and the input
//! `ElementType` of a band stack.
use serde::{Deserialize, Serialize};

/// Landsat 5/7 reflective bands in the fixed band-stack order.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Band {
    B1,
    B2,
    B3,
    B4,
    B5,
    B7,
}

impl Band {
    /// Band-stack order: B1, B2, B3, B4, B5, B7.
    pub const ALL: [Band; 6] = [Band::B1, Band::B2, Band::B3, Band::B4, Band::B5, Band::B7];

    /// Position of the band along the first axis of a band stack.
    pub fn index(self) -> usize {
        match self {
            Band::B1 => 0,
            Band::B2 => 1,
            Band::B3 => 2,
            Band::B4 => 3,
            Band::B5 => 4,
            Band::B7 => 5,
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Band::B1 => "B1",
            Band::B2 => "B2",
            Band::B3 => "B3",
            Band::B4 => "B4",
            Band::B5 => "B5",
            Band::B7 => "B7",
        };
        write!(f, "{}", s)
    }
}

/// Normalized difference indices `(a - b) / (a + b)` used by the tree.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum SpectralIndex {
    Ndi52,
    Ndi43,
    Ndi72,
}

impl SpectralIndex {
    pub const ALL: [SpectralIndex; 3] =
        [SpectralIndex::Ndi52, SpectralIndex::Ndi43, SpectralIndex::Ndi72];

    /// The `(a, b)` band pair of the index, minuend first.
    pub fn bands(self) -> (Band, Band) {
        match self {
            SpectralIndex::Ndi52 => (Band::B5, Band::B2),
            SpectralIndex::Ndi43 => (Band::B4, Band::B3),
            SpectralIndex::Ndi72 => (Band::B7, Band::B2),
        }
    }
}

impl std::fmt::Display for SpectralIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpectralIndex::Ndi52 => write!(f, "NDI_52"),
            SpectralIndex::Ndi43 => write!(f, "NDI_43"),
            SpectralIndex::Ndi72 => write!(f, "NDI_72"),
        }
    }
}

/// A value a decision node can test: a raw band or a derived index.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Feature {
    Band(Band),
    Index(SpectralIndex),
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Feature::Band(band) => write!(f, "{}", band),
            Feature::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Classification states written to the output array.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum WaterClass {
    NoWater = 0,
    Unclassified = 1,
    Water = 128,
}

impl WaterClass {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(WaterClass::NoWater),
            1 => Some(WaterClass::Unclassified),
            128 => Some(WaterClass::Water),
            _ => None,
        }
    }
}

impl std::fmt::Display for WaterClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WaterClass::NoWater => write!(f, "NoWater"),
            WaterClass::Unclassified => write!(f, "Unclassified"),
            WaterClass::Water => write!(f, "Water"),
        }
    }
}

/// Element type of an incoming band stack, following GDAL's data type codes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ElementType {
    UInt8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64,
    CInt16,
    CInt32,
    CFloat32,
    CFloat64,
}

impl ElementType {
    /// Map a GDAL data type code. Unknown codes are read as `Float64`.
    pub fn from_gdal_code(code: u32) -> Self {
        match code {
            1 => ElementType::UInt8,
            2 => ElementType::UInt16,
            3 => ElementType::Int16,
            4 => ElementType::UInt32,
            5 => ElementType::Int32,
            6 => ElementType::Float32,
            7 => ElementType::Float64,
            8 => ElementType::CInt16,
            9 => ElementType::CInt32,
            10 => ElementType::CFloat32,
            11 => ElementType::CFloat64,
            _ => ElementType::Float64,
        }
    }

    pub fn is_complex(self) -> bool {
        matches!(
            self,
            ElementType::CInt16 | ElementType::CInt32 | ElementType::CFloat32 | ElementType::CFloat64
        )
    }

    /// Bytes per element.
    pub fn size(self) -> usize {
        match self {
            ElementType::UInt8 => 1,
            ElementType::UInt16 | ElementType::Int16 => 2,
            ElementType::UInt32 | ElementType::Int32 | ElementType::Float32 => 4,
            ElementType::CInt16 => 4,
            ElementType::Float64 | ElementType::CInt32 | ElementType::CFloat32 => 8,
            ElementType::CFloat64 => 16,
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ElementType::UInt8 => "UInt8",
            ElementType::UInt16 => "UInt16",
            ElementType::Int16 => "Int16",
            ElementType::UInt32 => "UInt32",
            ElementType::Int32 => "Int32",
            ElementType::Float32 => "Float32",
            ElementType::Float64 => "Float64",
            ElementType::CInt16 => "CInt16",
            ElementType::CInt32 => "CInt32",
            ElementType::CFloat32 => "CFloat32",
            ElementType::CFloat64 => "CFloat64",
        };
        write!(f, "{}", s)
    }
}
