use super::{Axis, Host};
use crate::error::Result;
use core::fmt::Debug;

pub type Shape = Vec<usize>;

/// the common base of the library's DataFrame and Series
pub trait NDFrame: Debug {
    /// the type name used in error messages
    const NAME: &'static str;
    const NDIM: usize;

    fn shape(&self) -> Shape;

    fn axis_number(axis: &Axis) -> Result<usize>
    where
        Self: Sized,
    {
        axis.number(Self::NDIM, Self::NAME)
    }
}

/// "the same subclass of [`NDFrame`] in, the same subclass out"
///
/// Use it as a bound, `fn f<F: FrameOrSeries>(obj: F) -> F`, to promise that a Series
/// argument gives back a Series and a DataFrame argument gives back a DataFrame.
/// Returning any other concrete type is rejected at compile time:
///
/// ```compile_fail
/// use cftyping_core::df::{DataFrame, Series};
/// use cftyping_core::typing::FrameOrSeries;
///
/// fn squeeze<F: FrameOrSeries>(obj: F) -> F {
///     let _ = obj;
///     Series::<f64>::from_values(vec![1.0])
/// }
/// ```
///
/// ```compile_fail
/// use cftyping_core::df::{DataFrame, NativeHost};
/// use cftyping_core::typing::{FrameOrSeries, FrameOrSeriesUnion};
///
/// fn to_frame<F: FrameOrSeries>(obj: F) -> F {
///     let _ = obj;
///     FrameOrSeriesUnion::<NativeHost>::DataFrame(DataFrame::empty())
/// }
/// ```
///
/// If "either is fine" is what is meant, use [`FrameOrSeriesUnion`] instead.
pub trait FrameOrSeries: NDFrame + Clone {}

impl<F: NDFrame + Clone> FrameOrSeries for F {}

/// "either a DataFrame or a Series", with no correlation between input and output
#[derive(Debug, Clone)]
pub enum FrameOrSeriesUnion<H: Host> {
    DataFrame(H::DataFrame),
    Series(H::Series),
}

impl<H: Host> FrameOrSeriesUnion<H> {
    pub fn ndim(&self) -> usize {
        match self {
            FrameOrSeriesUnion::DataFrame(_) => <H::DataFrame as NDFrame>::NDIM,
            FrameOrSeriesUnion::Series(_) => <H::Series as NDFrame>::NDIM,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            FrameOrSeriesUnion::DataFrame(df) => df.shape(),
            FrameOrSeriesUnion::Series(series) => series.shape(),
        }
    }

    pub fn axis_number(&self, axis: &Axis) -> Result<usize> {
        match self {
            FrameOrSeriesUnion::DataFrame(_) => H::DataFrame::axis_number(axis),
            FrameOrSeriesUnion::Series(_) => H::Series::axis_number(axis),
        }
    }
}

/// the objects `aggregate` can be called on
#[derive(Debug)]
pub enum AggObjType<H: Host> {
    Series(H::Series),
    DataFrame(H::DataFrame),
    SeriesGroupBy(H::SeriesGroupBy),
    DataFrameGroupBy(H::DataFrameGroupBy),
    Window(H::Window),
    Resampler(H::Resampler),
}

impl<H: Host> From<FrameOrSeriesUnion<H>> for AggObjType<H> {
    fn from(obj: FrameOrSeriesUnion<H>) -> Self {
        match obj {
            FrameOrSeriesUnion::DataFrame(df) => AggObjType::DataFrame(df),
            FrameOrSeriesUnion::Series(series) => AggObjType::Series(series),
        }
    }
}

/// storage backend of a DataFrame
#[derive(Debug)]
pub enum Manager<H: Host> {
    Array(H::ArrayManager),
    Block(H::BlockManager),
}

/// storage backend of a Series
#[derive(Debug)]
pub enum SingleManager<H: Host> {
    Array(H::SingleArrayManager),
    Block(H::SingleBlockManager),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::df::{DataFrame, NativeHost, Series};
    use crate::typing::tests::{BlockManager, TestHost};
    use crate::error::TypingError;

    fn identity<F: FrameOrSeries>(obj: F) -> F {
        obj
    }

    fn swap(obj: FrameOrSeriesUnion<NativeHost>) -> FrameOrSeriesUnion<NativeHost> {
        match obj {
            FrameOrSeriesUnion::DataFrame(df) => FrameOrSeriesUnion::Series(df.column(0)),
            FrameOrSeriesUnion::Series(series) => FrameOrSeriesUnion::DataFrame(series.to_frame()),
        }
    }

    #[test]
    fn test_bound_keeps_concrete_type() {
        let series: Series<f64> = identity(Series::from_values(vec![1., 2.]));
        assert_eq!(series.shape(), vec![2]);
        let df: DataFrame<f64> = identity(DataFrame::empty());
        assert_eq!(df.shape(), vec![0, 0]);
    }

    #[test]
    fn test_union_may_change_alternative() {
        let obj = FrameOrSeriesUnion::<NativeHost>::Series(Series::from_values(vec![1., 2., 3.]));
        assert_eq!(obj.ndim(), 1);
        let swapped = swap(obj);
        assert_eq!(swapped.ndim(), 2);
        assert_eq!(swapped.shape(), vec![3, 1]);
        assert_eq!(swapped.axis_number(&"columns".into()).unwrap(), 1);
        let back = swap(swapped);
        assert!(matches!(
            back.axis_number(&"columns".into()),
            Err(TypingError::InvalidAxis { object: "Series", .. })
        ));
    }

    #[test]
    fn test_agg_obj_and_managers() {
        let obj = FrameOrSeriesUnion::<TestHost>::DataFrame(DataFrame::empty());
        assert!(matches!(AggObjType::from(obj), AggObjType::DataFrame(_)));
        let manager = Manager::<TestHost>::Block(BlockManager(2));
        assert!(matches!(manager, Manager::Block(BlockManager(2))));
    }
}
