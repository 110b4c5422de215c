use super::DataFrame;
use crate::{
    df::{column_label, ColumnsDtype, IndexDtype, Series},
    toolkit::array::AFloat,
    typing::Label,
};
use numpy::{
    ndarray::{Array1, Array2, CowArray},
    Ix1, Ix2,
};

impl<'a, T: AFloat> DataFrame<'a, T> {
    pub fn new(
        index: CowArray<'a, IndexDtype, Ix1>,
        columns: CowArray<'a, ColumnsDtype, Ix1>,
        values: CowArray<'a, T, Ix2>,
    ) -> Self {
        Self {
            index,
            columns,
            values,
        }
    }

    pub fn empty() -> DataFrame<'static, T> {
        DataFrame::new(
            Array1::from_vec(vec![]).into(),
            Array1::from_vec(vec![]).into(),
            Array2::zeros((0, 0)).into(),
        )
    }

    pub fn column_labels(&self) -> Vec<Label> {
        self.columns.iter().map(column_label).collect()
    }

    /// the `i`-th column as an owned [`Series`]
    ///
    /// # Panics
    ///
    /// panics if `i` is out of bounds.
    pub fn column(&self, i: usize) -> Series<'static, T> {
        Series::new(
            self.index.to_owned().into(),
            self.values.column(i).to_owned().into(),
            Some(column_label(&self.columns[i])),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::df::{column, Index};
    use crate::typing::NDFrame;

    #[test]
    fn test_columns() {
        let df = DataFrame::<f32>::new(
            Index::range(2).values,
            Array1::from_vec(vec![column("a"), column("b")]).into(),
            Array2::from_shape_vec((2, 2), vec![1., 2., 3., 4.]).unwrap().into(),
        );
        assert_eq!(df.shape(), vec![2, 2]);
        assert_eq!(df.column_labels(), vec![Label::from("a"), Label::from("b")]);
        let b = df.column(1);
        assert_eq!(b.name, Some(Label::from("b")));
        assert_eq!(b.values.to_vec(), vec![2., 4.]);
    }

    #[test]
    fn test_empty() {
        let df = DataFrame::<f64>::empty();
        assert_eq!(df.shape(), vec![0, 0]);
        assert!(df.column_labels().is_empty());
    }
}
