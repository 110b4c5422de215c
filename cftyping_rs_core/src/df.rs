//! # df
//!
//! the native containers: a temporal [`DataFrame`] / [`Series`] pair sharing a
//! datetime [`Index`], and the [`NativeHost`] binding them into [`crate::typing`].
//!
//! concepts the native containers do not have (extension arrays, groupbys, windows,
//! resamplers, storage managers, the engineering formatter) are bound to
//! [`Infallible`], so shapes mentioning them can only be built from their other
//! alternatives.

use crate::scalar::Timestamp;
use crate::typing::{Datetime64, Host, Label};
use core::convert::Infallible;
use numpy::{
    ndarray::{Array1, CowArray},
    Ix1, PyFixedString,
};

pub const COLUMNS_NBYTES: usize = 32;
pub type IndexDtype = Datetime64;
pub type ColumnsDtype = PyFixedString<COLUMNS_NBYTES>;
pub const INDEX_NBYTES: usize = core::mem::size_of::<IndexDtype>();

mod frame;
mod series;

pub use frame::DataFrame;
pub use series::Series;

/// encode a column name, truncated to [`COLUMNS_NBYTES`] bytes
pub fn column(name: &str) -> ColumnsDtype {
    let mut bytes = [0u8; COLUMNS_NBYTES];
    let src = name.as_bytes();
    let nbytes = src.len().min(COLUMNS_NBYTES);
    bytes[..nbytes].copy_from_slice(&src[..nbytes]);
    PyFixedString(bytes)
}

pub fn column_label(column: &ColumnsDtype) -> Label {
    let end = column
        .0
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(COLUMNS_NBYTES);
    Label::Str(String::from_utf8_lossy(&column.0[..end]).into_owned())
}

#[derive(Debug, Clone)]
pub struct Index<'a> {
    pub values: CowArray<'a, IndexDtype, Ix1>,
}

impl<'a> Index<'a> {
    pub fn new(values: CowArray<'a, IndexDtype, Ix1>) -> Self {
        Self { values }
    }

    /// `n` consecutive nanoseconds since the epoch
    pub fn range(n: usize) -> Index<'static> {
        let values = Array1::from_iter((0..n as i64).map(IndexDtype::from));
        Index::new(values.into())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn labels(&self) -> Vec<Label> {
        self.values
            .iter()
            .map(|&value| Label::Timestamp(Timestamp::new(value.into())))
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NativeHost;

impl Host for NativeHost {
    type DataFrame = DataFrame<'static, f64>;
    type Series = Series<'static, f64>;
    type Index = Index<'static>;
    type ExtensionArray = Infallible;
    type ExtensionDtype = Infallible;

    type DataFrameGroupBy = Infallible;
    type SeriesGroupBy = Infallible;
    type Window = Infallible;
    type Resampler = Infallible;

    type ArrayManager = Infallible;
    type BlockManager = Infallible;
    type SingleArrayManager = Infallible;
    type SingleBlockManager = Infallible;

    type EngFormatter = Infallible;
}
