//! # typing
//!
//! the shared vocabulary of argument / return shapes used across the public API of a
//! tabular data-analysis library: "a value convertible to a timestamp", "an array-like
//! object", "a dtype specifier", "a file path or open stream", and so on.
//!
//! # Design
//!
//! Every shape is a closed Rust type, so the compiler rejects anything outside the
//! listed alternatives at the call site.
//!
//! Shapes fall into two tiers:
//!
//! - leaf shapes, which only mention primitives and the scalar kinds of [`crate::scalar`],
//!   are plain enums / aliases (e.g. [`Scalar`], [`Axis`], [`NumpyDtype`]).
//! - host shapes, which mention the containers of the library itself (its DataFrame,
//!   Series, Index, extension arrays, storage managers, ...). Those containers live in
//!   crates that depend on this one, so they are only *named* here, as the associated
//!   types of [`Host`]. A host binds every name exactly once by implementing [`Host`],
//!   and nothing is resolved until a shape is instantiated with a concrete host
//!   (e.g. [`Dtype<NativeHost>`](crate::df::NativeHost)).
//!
//! Two constructs are kept deliberately apart:
//!
//! - [`FrameOrSeries`] is a *bound*: `fn f<F: FrameOrSeries>(obj: F) -> F` returns the
//!   exact concrete type it was given.
//! - [`FrameOrSeriesUnion`] is a *union*: `fn f(obj: FrameOrSeriesUnion<H>) -> FrameOrSeriesUnion<H>`
//!   only promises one of the alternatives, with no correlation to the input.

mod array;
mod dtype;
mod format;
mod frame;
mod func;
mod host;
mod io;
mod label;
mod scalars;

pub use array::{AnyArrayLike, ArrayLike};
pub use dtype::{Dtype, DtypeArg, DtypeObj, NpDtype, NumpyDtype, TypeTag};
pub use format::{
    ColspaceArgType, ColspaceType, FloatFormatType, FloatFormatter, Formatter, FormattersType,
    StrOrInt,
};
pub use frame::{
    AggObjType, FrameOrSeries, FrameOrSeriesUnion, Manager, NDFrame, Shape, SingleManager,
};
pub use func::{
    ensure_index_key_mapped, ensure_key_mapped, AggFuncSpec, AggFuncType, AggFuncTypeBase,
    AggFuncTypeDict, FuncType, IndexKeyFunc, IndexOrArrayLike, NamedFunc, PythonFuncType,
    ReduceFn, SeriesOrArrayLike, ValueKeyFunc,
};
pub use host::{ExtensionArray, ExtensionDtype, Host};
pub use io::{
    check_storage_options, get_compression_method, infer_compression, Buffer, Compression,
    CompressionDict, CompressionMethod, CompressionOptions, FileOrBuffer, FilePathOrBuffer,
    StorageOptions, Writer,
};
pub use label::{Axes, Axis, IndexLabel, Label, LabelFn, Level, Ordered, Renamer, Suffixes};
pub use scalars::{
    json_value, Datetime64, DatetimeLikeScalar, Frequency, JsonSerializable, JsonValue, PandasScalar,
    PythonScalar, Scalar, Timedelta64, TimedeltaConvertible, TimestampConvertible, Timezone,
};

#[cfg(test)]
pub(crate) mod tests {
    use super::{ExtensionArray, ExtensionDtype, Host};
    use crate::df::{DataFrame, Index, Series};

    #[derive(Debug, Clone, PartialEq)]
    pub struct Category;

    impl ExtensionDtype for Category {
        fn name(&self) -> &str {
            "category"
        }

        fn construct_from_string(s: &str) -> Option<Self> {
            (s == "category").then_some(Category)
        }
    }

    #[derive(Debug, Clone)]
    pub struct Categorical(pub Vec<String>);

    impl ExtensionArray for Categorical {
        fn len(&self) -> usize {
            self.0.len()
        }
    }

    #[derive(Debug)]
    pub struct GroupBy;
    #[derive(Debug)]
    pub struct Rolling;
    #[derive(Debug)]
    pub struct Resampler;
    #[derive(Debug)]
    pub struct ArrayManager;
    #[derive(Debug, PartialEq)]
    pub struct BlockManager(pub usize);

    #[derive(Debug, Clone)]
    pub struct EngFormatter {
        pub accuracy: usize,
    }

    /// a host with every concept bound, backed by the native containers
    #[derive(Debug, Clone)]
    pub struct TestHost;

    impl Host for TestHost {
        type DataFrame = DataFrame<'static, f64>;
        type Series = Series<'static, f64>;
        type Index = Index<'static>;
        type ExtensionArray = Categorical;
        type ExtensionDtype = Category;

        type DataFrameGroupBy = GroupBy;
        type SeriesGroupBy = GroupBy;
        type Window = Rolling;
        type Resampler = Resampler;

        type ArrayManager = ArrayManager;
        type BlockManager = BlockManager;
        type SingleArrayManager = ArrayManager;
        type SingleBlockManager = BlockManager;

        type EngFormatter = EngFormatter;
    }

    #[test]
    fn test_host_binds_every_name() {
        let category = Category::construct_from_string("category").unwrap();
        assert_eq!(category.name(), "category");
        assert!(Category::construct_from_string("int64").is_none());
        assert!(Categorical(vec![]).is_empty());
    }
}
