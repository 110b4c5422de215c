use super::{ExtensionDtype, Host, Label};
use crate::error::{Result, TypingError};
use crate::scalar::TimeUnit;
use core::fmt;
use core::str::FromStr;
use indexmap::IndexMap;

/// a numpy dtype, as far as the library's columns can hold it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumpyDtype {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    Datetime64(TimeUnit),
    Timedelta64(TimeUnit),
    Str,
    Object,
}

impl NumpyDtype {
    pub fn name(&self) -> String {
        let name = match self {
            NumpyDtype::Bool => "bool",
            NumpyDtype::Int8 => "int8",
            NumpyDtype::Int16 => "int16",
            NumpyDtype::Int32 => "int32",
            NumpyDtype::Int64 => "int64",
            NumpyDtype::UInt8 => "uint8",
            NumpyDtype::UInt16 => "uint16",
            NumpyDtype::UInt32 => "uint32",
            NumpyDtype::UInt64 => "uint64",
            NumpyDtype::Float32 => "float32",
            NumpyDtype::Float64 => "float64",
            NumpyDtype::Complex64 => "complex64",
            NumpyDtype::Complex128 => "complex128",
            NumpyDtype::Datetime64(unit) => return format!("datetime64[{}]", unit.code()),
            NumpyDtype::Timedelta64(unit) => return format!("timedelta64[{}]", unit.code()),
            NumpyDtype::Str => "str",
            NumpyDtype::Object => "object",
        };
        name.to_string()
    }

    /// numpy's one-character kind code
    pub fn kind(&self) -> char {
        match self {
            NumpyDtype::Bool => 'b',
            NumpyDtype::Int8 | NumpyDtype::Int16 | NumpyDtype::Int32 | NumpyDtype::Int64 => 'i',
            NumpyDtype::UInt8 | NumpyDtype::UInt16 | NumpyDtype::UInt32 | NumpyDtype::UInt64 => {
                'u'
            }
            NumpyDtype::Float32 | NumpyDtype::Float64 => 'f',
            NumpyDtype::Complex64 | NumpyDtype::Complex128 => 'c',
            NumpyDtype::Datetime64(_) => 'M',
            NumpyDtype::Timedelta64(_) => 'm',
            NumpyDtype::Str => 'U',
            NumpyDtype::Object => 'O',
        }
    }

    /// bytes per element, `None` for variable-width strings
    pub fn itemsize(&self) -> Option<usize> {
        let size = match self {
            NumpyDtype::Bool | NumpyDtype::Int8 | NumpyDtype::UInt8 => 1,
            NumpyDtype::Int16 | NumpyDtype::UInt16 => 2,
            NumpyDtype::Int32 | NumpyDtype::UInt32 | NumpyDtype::Float32 => 4,
            NumpyDtype::Int64
            | NumpyDtype::UInt64
            | NumpyDtype::Float64
            | NumpyDtype::Complex64
            | NumpyDtype::Datetime64(_)
            | NumpyDtype::Timedelta64(_)
            | NumpyDtype::Object => 8,
            NumpyDtype::Complex128 => 16,
            NumpyDtype::Str => return None,
        };
        Some(size)
    }
}

/// `"datetime64[ns]"` -> `Some("ns")`, `"datetime64"` -> `Some("")`
fn strip_unit<'a>(s: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    let rest = prefixes.iter().find_map(|prefix| s.strip_prefix(prefix))?;
    if rest.is_empty() {
        return Some("");
    }
    rest.strip_prefix('[')?.strip_suffix(']')
}

fn parse_unit(unit: &str, input: &str) -> Result<TimeUnit> {
    if unit.is_empty() {
        log::debug!("'{input}' has no unit, nanoseconds are assumed");
        return Ok(TimeUnit::Nano);
    }
    [
        TimeUnit::Day,
        TimeUnit::Hour,
        TimeUnit::Minute,
        TimeUnit::Second,
        TimeUnit::Milli,
        TimeUnit::Micro,
        TimeUnit::Nano,
    ]
    .into_iter()
    .find(|candidate| candidate.code() == unit)
    .ok_or_else(|| TypingError::UnknownDtype(input.to_string()))
}

impl FromStr for NumpyDtype {
    type Err = TypingError;

    fn from_str(input: &str) -> Result<Self> {
        let s = input.trim_start_matches(['<', '>', '=', '|']);
        if let Some(unit) = strip_unit(s, &["datetime64", "M8"]) {
            return parse_unit(unit, input).map(NumpyDtype::Datetime64);
        }
        if let Some(unit) = strip_unit(s, &["timedelta64", "m8"]) {
            return parse_unit(unit, input).map(NumpyDtype::Timedelta64);
        }
        let dtype = match s {
            "bool" | "?" | "b1" => NumpyDtype::Bool,
            "int8" | "i1" => NumpyDtype::Int8,
            "int16" | "i2" => NumpyDtype::Int16,
            "int32" | "i4" => NumpyDtype::Int32,
            "int64" | "i8" | "int" => NumpyDtype::Int64,
            "uint8" | "u1" => NumpyDtype::UInt8,
            "uint16" | "u2" => NumpyDtype::UInt16,
            "uint32" | "u4" => NumpyDtype::UInt32,
            "uint64" | "u8" => NumpyDtype::UInt64,
            "float32" | "f4" => NumpyDtype::Float32,
            "float64" | "f8" | "float" | "double" => NumpyDtype::Float64,
            "complex64" | "c8" => NumpyDtype::Complex64,
            "complex128" | "c16" | "complex" => NumpyDtype::Complex128,
            "str" | "U" => NumpyDtype::Str,
            "object" | "O" => NumpyDtype::Object,
            _ => return Err(TypingError::UnknownDtype(input.to_string())),
        };
        Ok(dtype)
    }
}

impl fmt::Display for NumpyDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// a numpy dtype, by name or already resolved
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NpDtype {
    Name(String),
    Dtype(NumpyDtype),
}

impl NpDtype {
    pub fn resolve(&self) -> Result<NumpyDtype> {
        match self {
            NpDtype::Name(name) => name.parse(),
            NpDtype::Dtype(dtype) => Ok(*dtype),
        }
    }
}

/// a python builtin type used as a dtype (`dtype=float`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Str,
    Float,
    Int,
    Complex,
    Bool,
    Object,
}

impl TypeTag {
    pub fn numpy_dtype(self) -> NumpyDtype {
        match self {
            TypeTag::Str => NumpyDtype::Str,
            TypeTag::Float => NumpyDtype::Float64,
            TypeTag::Int => NumpyDtype::Int64,
            TypeTag::Complex => NumpyDtype::Complex128,
            TypeTag::Bool => NumpyDtype::Bool,
            TypeTag::Object => NumpyDtype::Object,
        }
    }
}

/// a dtype specifier, as accepted by `astype` & co.
#[derive(Debug, Clone)]
pub enum Dtype<H: Host> {
    Extension(H::ExtensionDtype),
    Np(NpDtype),
    Type(TypeTag),
}

/// a resolved dtype
#[derive(Debug, Clone)]
pub enum DtypeObj<H: Host> {
    Np(NumpyDtype),
    Extension(H::ExtensionDtype),
}

impl<H: Host> Dtype<H> {
    /// strings name an extension dtype of the host first, then a numpy dtype
    pub fn resolve(&self) -> Result<DtypeObj<H>> {
        match self {
            Dtype::Extension(dtype) => Ok(DtypeObj::Extension(dtype.clone())),
            Dtype::Np(NpDtype::Name(name)) => {
                match <H::ExtensionDtype as ExtensionDtype>::construct_from_string(name) {
                    Some(dtype) => {
                        log::debug!("'{name}' resolved to extension dtype {dtype:?}");
                        Ok(DtypeObj::Extension(dtype))
                    }
                    None => name.parse().map(DtypeObj::Np),
                }
            }
            Dtype::Np(NpDtype::Dtype(dtype)) => Ok(DtypeObj::Np(*dtype)),
            Dtype::Type(tag) => Ok(DtypeObj::Np(tag.numpy_dtype())),
        }
    }
}

impl<H: Host> From<&str> for Dtype<H> {
    fn from(name: &str) -> Self {
        Dtype::Np(NpDtype::Name(name.to_string()))
    }
}
impl<H: Host> From<NumpyDtype> for Dtype<H> {
    fn from(dtype: NumpyDtype) -> Self {
        Dtype::Np(NpDtype::Dtype(dtype))
    }
}
impl<H: Host> From<TypeTag> for Dtype<H> {
    fn from(tag: TypeTag) -> Self {
        Dtype::Type(tag)
    }
}

impl<H: Host> DtypeObj<H> {
    pub fn name(&self) -> String {
        match self {
            DtypeObj::Np(dtype) => dtype.name(),
            DtypeObj::Extension(dtype) => dtype.name().to_string(),
        }
    }

    pub fn is_extension(&self) -> bool {
        matches!(self, DtypeObj::Extension(_))
    }
}

/// a dtype for every column, or one per column label
#[derive(Debug, Clone)]
pub enum DtypeArg<H: Host> {
    Single(Dtype<H>),
    PerColumn(IndexMap<Label, Dtype<H>>),
}

impl<H: Host> DtypeArg<H> {
    pub fn for_column(&self, column: &Label) -> Option<&Dtype<H>> {
        match self {
            DtypeArg::Single(dtype) => Some(dtype),
            DtypeArg::PerColumn(dtypes) => dtypes.get(column),
        }
    }
}

impl<H: Host> From<Dtype<H>> for DtypeArg<H> {
    fn from(dtype: Dtype<H>) -> Self {
        DtypeArg::Single(dtype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::df::NativeHost;
    use crate::typing::tests::{Category, TestHost};

    #[test]
    fn test_numpy_dtype_from_str() {
        let parse = |s: &str| s.parse::<NumpyDtype>().unwrap();
        assert_eq!(parse("int"), NumpyDtype::Int64);
        assert_eq!(parse("<f8"), NumpyDtype::Float64);
        assert_eq!(parse("u1"), NumpyDtype::UInt8);
        assert_eq!(parse("?"), NumpyDtype::Bool);
        assert_eq!(parse("M8[ms]"), NumpyDtype::Datetime64(TimeUnit::Milli));
        assert_eq!(parse("datetime64"), NumpyDtype::Datetime64(TimeUnit::Nano));
        assert_eq!(parse("timedelta64[s]"), NumpyDtype::Timedelta64(TimeUnit::Second));
        assert_eq!(parse("O"), NumpyDtype::Object);
        assert_eq!(parse("datetime64[us]").name(), "datetime64[us]");
        assert_eq!(parse("c8").itemsize(), Some(8));
        assert_eq!(parse("U").itemsize(), None);
        assert_eq!(parse("uint16").kind(), 'u');
        assert_eq!(parse("m8[m]"), NumpyDtype::Timedelta64(TimeUnit::Minute));
        assert_eq!(parse("M8[D]"), NumpyDtype::Datetime64(TimeUnit::Day));
        for invalid in [
            "int128",
            "datetime64[M]",
            "datetime64[ns",
            "datetime64[min]",
            "m8[days]",
            "M8[T]",
            "category",
        ] {
            assert!(matches!(
                invalid.parse::<NumpyDtype>(),
                Err(TypingError::UnknownDtype(_))
            ));
        }
    }

    #[test]
    fn test_resolve_prefers_extension_dtypes() {
        let dtype: Dtype<TestHost> = "category".into();
        let resolved = dtype.resolve().unwrap();
        assert!(resolved.is_extension());
        assert_eq!(resolved.name(), "category");
        let dtype: Dtype<TestHost> = "float32".into();
        assert!(matches!(
            dtype.resolve().unwrap(),
            DtypeObj::Np(NumpyDtype::Float32)
        ));
        let dtype: Dtype<TestHost> = Dtype::Extension(Category);
        assert!(dtype.resolve().unwrap().is_extension());
        let dtype: Dtype<NativeHost> = "category".into();
        assert!(matches!(dtype.resolve(), Err(TypingError::UnknownDtype(_))));
    }

    #[test]
    fn test_type_tags() {
        let resolve = |tag: TypeTag| Dtype::<NativeHost>::from(tag).resolve().unwrap().name();
        assert_eq!(resolve(TypeTag::Int), "int64");
        assert_eq!(resolve(TypeTag::Float), "float64");
        assert_eq!(resolve(TypeTag::Complex), "complex128");
        assert_eq!(resolve(TypeTag::Bool), "bool");
        assert_eq!(resolve(TypeTag::Str), "str");
        assert_eq!(resolve(TypeTag::Object), "object");
    }

    #[test]
    fn test_dtype_arg_for_column() {
        let single = DtypeArg::<NativeHost>::from(Dtype::from(NumpyDtype::Int8));
        assert!(single.for_column(&"anything".into()).is_some());
        let per_column: IndexMap<Label, Dtype<NativeHost>> =
            [(Label::from("a"), Dtype::from(TypeTag::Float))]
                .into_iter()
                .collect();
        let per_column = DtypeArg::PerColumn(per_column);
        assert!(per_column.for_column(&"a".into()).is_some());
        assert!(per_column.for_column(&"b".into()).is_none());
    }
}
