use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};

use crate::error::{Error, Result};
use crate::types::{Band, ElementType};

/// Number of spectral planes in a band stack.
pub const BAND_COUNT: usize = Band::ALL.len();

/// Six-band surface reflectance stack ordered (band, row, column),
/// band order [B1, B2, B3, B4, B5, B7].
#[derive(Debug, Clone, PartialEq)]
pub enum BandStack {
    U8(Array3<u8>),
    U16(Array3<u16>),
    I16(Array3<i16>),
    U32(Array3<u32>),
    I32(Array3<i32>),
    F32(Array3<f32>),
    F64(Array3<f64>),
}

/// Apply `$body` to the wrapped array of any `BandStack` variant.
macro_rules! dispatch {
    ($stack:expr, $data:ident => $body:expr) => {
        match $stack {
            BandStack::U8($data) => $body,
            BandStack::U16($data) => $body,
            BandStack::I16($data) => $body,
            BandStack::U32($data) => $body,
            BandStack::I32($data) => $body,
            BandStack::F32($data) => $body,
            BandStack::F64($data) => $body,
        }
    };
}
pub(crate) use dispatch;

/// Element types a `BandStack` can hold.
pub trait BandElement: Copy + Send + Sync + 'static {
    fn wrap(data: Array3<Self>) -> BandStack;
}

macro_rules! band_element {
    ($t:ty, $variant:ident) => {
        impl BandElement for $t {
            fn wrap(data: Array3<Self>) -> BandStack {
                BandStack::$variant(data)
            }
        }

        impl TryFrom<Array3<$t>> for BandStack {
            type Error = Error;

            fn try_from(data: Array3<$t>) -> Result<Self> {
                BandStack::new(data)
            }
        }
    };
}

band_element!(u8, U8);
band_element!(u16, U16);
band_element!(i16, I16);
band_element!(u32, U32);
band_element!(i32, I32);
band_element!(f32, F32);
band_element!(f64, F64);

impl BandStack {
    /// Wrap a `(6, rows, cols)` array.
    pub fn new<T: BandElement>(data: Array3<T>) -> Result<Self> {
        check_band_count(data.len_of(Axis(0)))?;
        Ok(T::wrap(data))
    }

    /// Stack six equally shaped planes in [B1, B2, B3, B4, B5, B7] order.
    pub fn from_planes<T: BandElement>(planes: Vec<Array2<T>>) -> Result<Self> {
        check_band_count(planes.len())?;
        let expected = planes[0].dim();
        for (band, plane) in Band::ALL.iter().zip(&planes) {
            if plane.dim() != expected {
                return Err(Error::ShapeMismatch {
                    band: band.to_string(),
                    expected,
                    actual: plane.dim(),
                });
            }
        }
        let views: Vec<ArrayView2<'_, T>> = planes.iter().map(|plane| plane.view()).collect();
        let data = ndarray::stack(Axis(0), &views).map_err(Error::processing)?;
        Ok(T::wrap(data))
    }

    /// Decode a band-sequential little-endian buffer of `6 * rows * cols` elements.
    pub fn from_le_bytes(
        element_type: ElementType,
        rows: usize,
        cols: usize,
        bytes: &[u8],
    ) -> Result<Self> {
        if element_type.is_complex() {
            return Err(Error::UnsupportedType(element_type));
        }
        let expected = BAND_COUNT
            .checked_mul(rows)
            .and_then(|n| n.checked_mul(cols))
            .and_then(|n| n.checked_mul(element_type.size()))
            .ok_or_else(|| {
                Error::Processing(format!(
                    "{}x{} {} buffer size overflows usize",
                    rows, cols, element_type
                ))
            })?;
        if bytes.len() != expected {
            return Err(Error::BufferLength {
                expected,
                actual: bytes.len(),
            });
        }

        let shape = (BAND_COUNT, rows, cols);
        let stack = match element_type {
            ElementType::UInt8 => BandStack::U8(decode(bytes, shape, u8::from_le_bytes)?),
            ElementType::UInt16 => BandStack::U16(decode(bytes, shape, u16::from_le_bytes)?),
            ElementType::Int16 => BandStack::I16(decode(bytes, shape, i16::from_le_bytes)?),
            ElementType::UInt32 => BandStack::U32(decode(bytes, shape, u32::from_le_bytes)?),
            ElementType::Int32 => BandStack::I32(decode(bytes, shape, i32::from_le_bytes)?),
            ElementType::Float32 => BandStack::F32(decode(bytes, shape, f32::from_le_bytes)?),
            ElementType::Float64 => BandStack::F64(decode(bytes, shape, f64::from_le_bytes)?),
            ElementType::CInt16
            | ElementType::CInt32
            | ElementType::CFloat32
            | ElementType::CFloat64 => return Err(Error::UnsupportedType(element_type)),
        };
        Ok(stack)
    }

    /// Fail with `BandCount` unless the band axis holds exactly six planes.
    pub fn validate(&self) -> Result<()> {
        dispatch!(self, data => check_band_count(data.len_of(Axis(0))))
    }

    /// `(rows, cols)` of every band plane.
    pub fn dim(&self) -> (usize, usize) {
        let (_, rows, cols) = dispatch!(self, data => data.dim());
        (rows, cols)
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            BandStack::U8(_) => ElementType::UInt8,
            BandStack::U16(_) => ElementType::UInt16,
            BandStack::I16(_) => ElementType::Int16,
            BandStack::U32(_) => ElementType::UInt32,
            BandStack::I32(_) => ElementType::Int32,
            BandStack::F32(_) => ElementType::Float32,
            BandStack::F64(_) => ElementType::Float64,
        }
    }
}

fn check_band_count(actual: usize) -> Result<()> {
    if actual != BAND_COUNT {
        return Err(Error::BandCount {
            expected: BAND_COUNT,
            actual,
        });
    }
    Ok(())
}

fn decode<T, const N: usize>(
    bytes: &[u8],
    shape: (usize, usize, usize),
    from_le: fn([u8; N]) -> T,
) -> Result<Array3<T>> {
    let values: Vec<T> = bytes
        .chunks_exact(N)
        .map(|chunk| {
            let mut raw = [0u8; N];
            raw.copy_from_slice(chunk);
            from_le(raw)
        })
        .collect();
    Array3::from_shape_vec(shape, values).map_err(Error::processing)
}

/// Read-only access to the six planes of a stack by band name.
#[derive(Debug, Clone)]
pub struct BandPlanes<'a, T> {
    data: ArrayView3<'a, T>,
}

impl<'a, T> BandPlanes<'a, T> {
    pub fn new(data: ArrayView3<'a, T>) -> Result<Self> {
        check_band_count(data.len_of(Axis(0)))?;
        Ok(Self { data })
    }

    pub fn band(&self, band: Band) -> ArrayView2<'a, T> {
        self.data.clone().index_axis_move(Axis(0), band.index())
    }

    pub fn dim(&self) -> (usize, usize) {
        let (_, rows, cols) = self.data.dim();
        (rows, cols)
    }
}
