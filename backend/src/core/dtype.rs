//! Element types a view may carry
//!
//! Every element type has a runtime [`DType`] tag. The boundary adapter
//! compares the host's tag against the native one before it reinterprets
//! any bytes, so a `float32` host array can never be read as `f64`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime tag for a numeric element type
///
/// Names follow the numpy spelling (`float64`, `int32`, ...) so error
/// messages read the same on both sides of the boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    U8,
    I32,
    U32,
    I64,
    F32,
    #[default]
    F64,
}

impl DType {
    /// Returns the size of the type in bytes.
    pub fn size_of(self) -> usize {
        match self {
            DType::U8 => 1,
            DType::I32 | DType::U32 | DType::F32 => 4,
            DType::I64 | DType::F64 => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            DType::U8 => "uint8",
            DType::I32 => "int32",
            DType::U32 => "uint32",
            DType::I64 => "int64",
            DType::F32 => "float32",
            DType::F64 => "float64",
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A plain-old-data numeric type that can sit behind a view
///
/// The `bytemuck::Pod` bound is what lets the boundary reinterpret a host
/// byte buffer as `&[T]` without copying.
pub trait Element:
    bytemuck::Pod + fmt::Debug + PartialEq + Send + Sync + 'static
{
    const DTYPE: DType;
}

macro_rules! map_type {
    ($t:ty, $v:ident) => {
        impl Element for $t {
            const DTYPE: DType = DType::$v;
        }
    };
}

map_type!(u8, U8);
map_type!(i32, I32);
map_type!(u32, U32);
map_type!(i64, I64);
map_type!(f32, F32);
map_type!(f64, F64);
