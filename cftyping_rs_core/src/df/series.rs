use super::{column, DataFrame, Index, IndexDtype};
use crate::toolkit::array::AFloat;
use crate::typing::{Label, NDFrame, Shape};
use numpy::{
    ndarray::{Array1, Axis as NdAxis, CowArray},
    Ix1,
};

#[derive(Debug, Clone)]
pub struct Series<'a, T: AFloat> {
    pub index: CowArray<'a, IndexDtype, Ix1>,
    pub values: CowArray<'a, T, Ix1>,
    pub name: Option<Label>,
}

impl<'a, T: AFloat> Series<'a, T> {
    pub fn new(
        index: CowArray<'a, IndexDtype, Ix1>,
        values: CowArray<'a, T, Ix1>,
        name: Option<Label>,
    ) -> Self {
        Self {
            index,
            values,
            name,
        }
    }

    /// an unnamed series over a default [`Index::range`]
    pub fn from_values(values: Vec<T>) -> Series<'static, T> {
        let index = Index::range(values.len()).values;
        Series::new(index, Array1::from_vec(values).into(), None)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// a single-column frame, the column named after the series (`"0"` if unnamed)
    pub fn to_frame(&self) -> DataFrame<'static, T> {
        let name = match &self.name {
            Some(name) => name.to_string(),
            None => "0".to_string(),
        };
        DataFrame::new(
            self.index.to_owned().into(),
            Array1::from_vec(vec![column(&name)]).into(),
            self.values.to_owned().insert_axis(NdAxis(1)).into(),
        )
    }
}

impl<'a, T: AFloat> NDFrame for Series<'a, T> {
    const NAME: &'static str = "Series";
    const NDIM: usize = 1;

    fn shape(&self) -> Shape {
        vec![self.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_frame() {
        let series = Series::from_values(vec![1., 2., 3.]);
        assert_eq!(series.shape(), vec![3]);
        let df = series.to_frame();
        assert_eq!(df.shape(), vec![3, 1]);
        assert_eq!(df.column_labels(), vec![Label::from("0")]);
        let mut named = df.column(0);
        assert_eq!(named.values, series.values);
        named.name = Some("close".into());
        assert_eq!(named.to_frame().column_labels(), vec![Label::from("close")]);
    }
}
