use super::{AnyArrayLike, Host, Label, Scalar};
use crate::error::{Result, TypingError};
use core::fmt;
use indexmap::IndexMap;
use itertools::Itertools;
use numpy::ndarray::ArrayView1;
use std::sync::Arc;

/// an erased callable of any arity
///
/// where the signature of a wrapped function must be preserved, take a generic
/// `F: Fn(..)` instead.
pub type FuncType = Arc<dyn Fn(&[Scalar]) -> Scalar + Send + Sync>;

/// an element-wise function, as taken by `map` / `apply`
pub type PythonFuncType = Arc<dyn Fn(&Scalar) -> Scalar + Send + Sync>;

pub type ReduceFn = Arc<dyn for<'a> Fn(ArrayView1<'a, f64>) -> Scalar + Send + Sync>;

/// a reducing callable together with the name it is reported under
#[derive(Clone)]
pub struct NamedFunc {
    name: String,
    func: ReduceFn,
}

impl NamedFunc {
    pub fn new(
        name: impl Into<String>,
        func: impl for<'a> Fn(ArrayView1<'a, f64>) -> Scalar + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, values: ArrayView1<f64>) -> Scalar {
        (self.func)(values)
    }
}

impl fmt::Debug for NamedFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

#[derive(Debug, Clone)]
pub enum AggFuncTypeBase {
    Func(NamedFunc),
    Name(String),
}

impl AggFuncTypeBase {
    pub fn name(&self) -> &str {
        match self {
            AggFuncTypeBase::Func(func) => func.name(),
            AggFuncTypeBase::Name(name) => name,
        }
    }
}

impl From<&str> for AggFuncTypeBase {
    fn from(name: &str) -> Self {
        AggFuncTypeBase::Name(name.to_string())
    }
}
impl From<NamedFunc> for AggFuncTypeBase {
    fn from(func: NamedFunc) -> Self {
        AggFuncTypeBase::Func(func)
    }
}

/// the value of an [`AggFuncTypeDict`] entry
#[derive(Debug, Clone)]
pub enum AggFuncSpec {
    One(AggFuncTypeBase),
    Many(Vec<AggFuncTypeBase>),
}

impl AggFuncSpec {
    fn funcs(&self) -> &[AggFuncTypeBase] {
        match self {
            AggFuncSpec::One(func) => core::slice::from_ref(func),
            AggFuncSpec::Many(funcs) => funcs,
        }
    }
}

pub type AggFuncTypeDict = IndexMap<Label, AggFuncSpec>;

/// the `func` argument of `aggregate`
#[derive(Debug, Clone)]
pub enum AggFuncType {
    Base(AggFuncTypeBase),
    List(Vec<AggFuncTypeBase>),
    Dict(AggFuncTypeDict),
}

impl AggFuncType {
    /// whether the result gets one entry per function
    pub fn is_multi(&self) -> bool {
        match self {
            AggFuncType::Base(_) => false,
            AggFuncType::List(_) => true,
            AggFuncType::Dict(dict) => dict.values().any(|spec| matches!(spec, AggFuncSpec::Many(_))),
        }
    }

    pub fn func_names(&self) -> Vec<&str> {
        match self {
            AggFuncType::Base(func) => vec![func.name()],
            AggFuncType::List(funcs) => funcs.iter().map(AggFuncTypeBase::name).collect(),
            AggFuncType::Dict(dict) => dict
                .values()
                .flat_map(AggFuncSpec::funcs)
                .map(AggFuncTypeBase::name)
                .collect(),
        }
    }

    /// keys of a dict spec must all be existing columns
    pub fn validate_columns(&self, columns: &[Label]) -> Result<()> {
        let AggFuncType::Dict(dict) = self else {
            return Ok(());
        };
        let missing = dict
            .keys()
            .filter(|key| !columns.contains(key))
            .map(Label::repr)
            .sorted()
            .collect_vec();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TypingError::UnknownColumns(missing))
        }
    }
}

impl From<AggFuncTypeBase> for AggFuncType {
    fn from(func: AggFuncTypeBase) -> Self {
        AggFuncType::Base(func)
    }
}
impl From<Vec<AggFuncTypeBase>> for AggFuncType {
    fn from(funcs: Vec<AggFuncTypeBase>) -> Self {
        AggFuncType::List(funcs)
    }
}
impl From<AggFuncTypeDict> for AggFuncType {
    fn from(dict: AggFuncTypeDict) -> Self {
        AggFuncType::Dict(dict)
    }
}

impl TryFrom<AggFuncType> for AggFuncTypeBase {
    type Error = AggFuncType;

    fn try_from(func: AggFuncType) -> core::result::Result<Self, AggFuncType> {
        match func {
            AggFuncType::Base(func) => Ok(func),
            other => Err(other),
        }
    }
}

/// the result of a sort key on a Series
#[derive(Debug)]
pub enum SeriesOrArrayLike<H: Host, T = f64> {
    Series(H::Series),
    ArrayLike(AnyArrayLike<H, T>),
}

/// the result of a sort key on an Index
#[derive(Debug)]
pub enum IndexOrArrayLike<H: Host, T = f64> {
    Index(H::Index),
    ArrayLike(AnyArrayLike<H, T>),
}

/// vectorized key of `sort_values`
pub type ValueKeyFunc<H, T = f64> =
    Option<Arc<dyn Fn(&<H as Host>::Series) -> SeriesOrArrayLike<H, T> + Send + Sync>>;

/// vectorized key of `sort_index`
pub type IndexKeyFunc<H, T = f64> =
    Option<Arc<dyn Fn(&<H as Host>::Index) -> IndexOrArrayLike<H, T> + Send + Sync>>;

/// apply an optional sort key, passing the values through when there is none
pub fn ensure_key_mapped<H: Host, T>(
    values: H::Series,
    key: &ValueKeyFunc<H, T>,
) -> SeriesOrArrayLike<H, T> {
    match key {
        Some(key) => key(&values),
        None => SeriesOrArrayLike::Series(values),
    }
}

pub fn ensure_index_key_mapped<H: Host, T>(
    index: H::Index,
    key: &IndexKeyFunc<H, T>,
) -> IndexOrArrayLike<H, T> {
    match key {
        Some(key) => key(&index),
        None => IndexOrArrayLike::Index(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::df::{NativeHost, Series};
    use crate::typing::{ArrayLike, PythonScalar};
    use numpy::ndarray::{array, ArrayD};

    fn sum() -> NamedFunc {
        NamedFunc::new("sum", |values: ArrayView1<f64>| {
            Scalar::Python(PythonScalar::Float(values.sum()))
        })
    }

    #[test]
    fn test_named_func() {
        let func = sum();
        assert_eq!(func.name(), "sum");
        assert_eq!(
            func.call(array![1., 2., 3.].view()),
            Scalar::Python(PythonScalar::Float(6.))
        );
        assert_eq!(format!("{func:?}"), "<function sum>");
    }

    #[test]
    fn test_agg_func_type() {
        let single = AggFuncType::from(AggFuncTypeBase::from("mean"));
        assert!(!single.is_multi());
        assert_eq!(single.func_names(), vec!["mean"]);
        assert!(AggFuncTypeBase::try_from(single).is_ok());

        let list = AggFuncType::from(vec![sum().into(), "max".into()]);
        assert!(list.is_multi());
        assert_eq!(list.func_names(), vec!["sum", "max"]);
        assert!(AggFuncTypeBase::try_from(list).is_err());

        let mut dict = AggFuncTypeDict::new();
        dict.insert("a".into(), AggFuncSpec::One("min".into()));
        dict.insert("b".into(), AggFuncSpec::Many(vec!["min".into(), sum().into()]));
        let dict = AggFuncType::from(dict);
        assert!(dict.is_multi());
        assert_eq!(dict.func_names(), vec!["min", "min", "sum"]);
        assert!(dict
            .validate_columns(&["a".into(), "b".into(), "c".into()])
            .is_ok());
        let err = dict.validate_columns(&["a".into()]).unwrap_err();
        assert_eq!(err.to_string(), "Column(s) ['b'] do not exist");

        let mut dict = AggFuncTypeDict::new();
        dict.insert(Label::Int(3), AggFuncSpec::One("sum".into()));
        dict.insert("z".into(), AggFuncSpec::One("sum".into()));
        dict.insert(Label::Float(1.), AggFuncSpec::One("sum".into()));
        let err = AggFuncType::from(dict)
            .validate_columns(&["a".into(), Label::Int(1)])
            .unwrap_err();
        assert_eq!(err.to_string(), "Column(s) ['z', 3] do not exist");
    }

    #[test]
    fn test_ensure_key_mapped() {
        let series = Series::from_values(vec![3., 1., 2.]);
        let mapped = ensure_key_mapped::<NativeHost, f64>(series.clone(), &None);
        assert!(matches!(mapped, SeriesOrArrayLike::Series(_)));
        let key: ValueKeyFunc<NativeHost> = Some(Arc::new(|series: &Series<'static, f64>| {
            let negated: ArrayD<f64> = series.values.mapv(|x| -x).into_dyn();
            SeriesOrArrayLike::ArrayLike(AnyArrayLike::Array(ArrayLike::Ndarray(negated)))
        }));
        match ensure_key_mapped(series, &key) {
            SeriesOrArrayLike::ArrayLike(AnyArrayLike::Array(ArrayLike::Ndarray(values))) => {
                assert_eq!(values.into_raw_vec(), vec![-3., -1., -2.]);
            }
            other => panic!("unexpected key result: {other:?}"),
        }
    }
}
