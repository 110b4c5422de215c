use super::{ColumnsDtype, IndexDtype};
use crate::toolkit::array::AFloat;
use crate::typing::{NDFrame, Shape};
use numpy::{ndarray::CowArray, Ix1, Ix2};

mod meta;

#[derive(Debug, Clone)]
pub struct DataFrame<'a, T: AFloat> {
    pub index: CowArray<'a, IndexDtype, Ix1>,
    pub columns: CowArray<'a, ColumnsDtype, Ix1>,
    pub values: CowArray<'a, T, Ix2>,
}

impl<'a, T: AFloat> NDFrame for DataFrame<'a, T> {
    const NAME: &'static str = "DataFrame";
    const NDIM: usize = 2;

    fn shape(&self) -> Shape {
        vec![self.index.len(), self.columns.len()]
    }
}
