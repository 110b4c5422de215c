use super::{Host, Label, Scalar};
use crate::error::{Result, TypingError};
use core::fmt;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StrOrInt {
    Str(String),
    Int(i64),
}

impl From<&str> for StrOrInt {
    fn from(s: &str) -> Self {
        StrOrInt::Str(s.to_string())
    }
}
impl From<i64> for StrOrInt {
    fn from(i: i64) -> Self {
        StrOrInt::Int(i)
    }
}

impl TryFrom<&Label> for StrOrInt {
    type Error = ();

    fn try_from(label: &Label) -> core::result::Result<Self, ()> {
        match label {
            Label::Str(s) => Ok(StrOrInt::Str(s.clone())),
            Label::Int(i) => Ok(StrOrInt::Int(*i)),
            _ => Err(()),
        }
    }
}

pub type Formatter = Arc<dyn Fn(&Scalar) -> String + Send + Sync>;

/// per-column formatters, positional or keyed by column
#[derive(Clone)]
pub enum FormattersType {
    List(Vec<Formatter>),
    Tuple(Box<[Formatter]>),
    Mapping(HashMap<StrOrInt, Formatter>),
}

impl FormattersType {
    pub fn len(&self) -> usize {
        match self {
            FormattersType::List(formatters) => formatters.len(),
            FormattersType::Tuple(formatters) => formatters.len(),
            FormattersType::Mapping(formatters) => formatters.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// positional formatters must cover every one of the `ncols` columns
    pub fn check(&self, ncols: usize) -> Result<()> {
        match self {
            FormattersType::Mapping(_) => Ok(()),
            _ if self.len() == ncols => Ok(()),
            _ => Err(TypingError::LengthMismatch {
                what: "Formatters",
                expected: ncols,
                got: self.len(),
            }),
        }
    }

    /// the formatter of the `i`-th column, labelled `label`
    pub fn get(&self, i: usize, label: &Label) -> Option<&Formatter> {
        match self {
            FormattersType::List(formatters) => formatters.get(i),
            FormattersType::Tuple(formatters) => formatters.get(i),
            FormattersType::Mapping(formatters) => {
                let key = StrOrInt::try_from(label).ok()?;
                formatters.get(&key)
            }
        }
    }
}

impl fmt::Debug for FormattersType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattersType::List(formatters) => write!(f, "List(<{} formatters>)", formatters.len()),
            FormattersType::Tuple(formatters) => {
                write!(f, "Tuple(<{} formatters>)", formatters.len())
            }
            FormattersType::Mapping(formatters) => f
                .debug_tuple("Mapping")
                .field(&formatters.keys().collect::<Vec<_>>())
                .finish(),
        }
    }
}

pub type ColspaceType = IndexMap<Label, StrOrInt>;

pub type FloatFormatter = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// how floats are rendered: a format spec, a function or the engineering formatter
#[derive(Clone)]
pub enum FloatFormatType<H: Host> {
    Spec(String),
    Func(FloatFormatter),
    Eng(H::EngFormatter),
}

impl<H: Host> fmt::Debug for FloatFormatType<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FloatFormatType::Spec(spec) => f.debug_tuple("Spec").field(spec).finish(),
            FloatFormatType::Func(_) => f.write_str("Func(..)"),
            FloatFormatType::Eng(eng) => f.debug_tuple("Eng").field(eng).finish(),
        }
    }
}

/// the `col_space` argument of the renderers
#[derive(Debug, Clone, PartialEq)]
pub enum ColspaceArgType {
    Str(String),
    Int(i64),
    Sequence(Vec<StrOrInt>),
    Mapping(ColspaceType),
}

impl ColspaceArgType {
    /// the minimum width of each column, keyed by column label
    ///
    /// a scalar width also applies to the index, which is keyed by `""`.
    pub fn resolve(&self, columns: &[Label]) -> Result<ColspaceType> {
        let broadcast = |width: StrOrInt| -> ColspaceType {
            std::iter::once(Label::from(""))
                .chain(columns.iter().cloned())
                .map(|column| (column, width.clone()))
                .collect()
        };
        match self {
            ColspaceArgType::Str(width) => Ok(broadcast(StrOrInt::Str(width.clone()))),
            ColspaceArgType::Int(width) => Ok(broadcast(StrOrInt::Int(*width))),
            ColspaceArgType::Mapping(mapping) => {
                let empty = Label::from("");
                if let Some(unknown) = mapping
                    .keys()
                    .find(|column| **column != empty && !columns.contains(column))
                {
                    return Err(TypingError::UnknownColspaceColumn(unknown.to_string()));
                }
                Ok(mapping.clone())
            }
            ColspaceArgType::Sequence(widths) => {
                if widths.len() != columns.len() {
                    return Err(TypingError::LengthMismatch {
                        what: "Col_space",
                        expected: columns.len(),
                        got: widths.len(),
                    });
                }
                Ok(columns.iter().cloned().zip(widths.iter().cloned()).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typing::tests::{EngFormatter, TestHost};
    use crate::typing::PythonScalar;

    fn columns() -> Vec<Label> {
        vec!["a".into(), "b".into()]
    }

    fn upper() -> Formatter {
        Arc::new(|scalar: &Scalar| format!("{scalar:?}").to_uppercase())
    }

    #[test]
    fn test_formatters() {
        let formatters = FormattersType::List(vec![upper(), upper()]);
        assert!(formatters.check(2).is_ok());
        let err = formatters.check(3).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Formatters length(2) should match DataFrame number of columns(3)"
        );
        let tuple = FormattersType::Tuple(vec![upper()].into_boxed_slice());
        assert!(tuple.check(2).is_err());
        assert!(tuple.get(1, &"b".into()).is_none());

        let mut mapping = HashMap::new();
        mapping.insert(StrOrInt::from("b"), upper());
        let formatters = FormattersType::Mapping(mapping);
        assert!(formatters.check(5).is_ok());
        assert!(formatters.get(0, &"a".into()).is_none());
        let formatter = formatters.get(1, &"b".into()).unwrap();
        let rendered = formatter(&Scalar::Python(PythonScalar::Bool(true)));
        assert_eq!(rendered, "PYTHON(BOOL(TRUE))");
    }

    #[test]
    fn test_colspace_scalar() {
        let resolved = ColspaceArgType::Int(10).resolve(&columns()).unwrap();
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[&Label::from("")], StrOrInt::Int(10));
        assert_eq!(resolved[&Label::from("b")], StrOrInt::Int(10));
        let resolved = ColspaceArgType::Str("5em".into()).resolve(&[]).unwrap();
        assert_eq!(resolved.keys().collect::<Vec<_>>(), vec![&Label::from("")]);
    }

    #[test]
    fn test_colspace_sequence_and_mapping() {
        let sequence = ColspaceArgType::Sequence(vec![1i64.into(), "2px".into()]);
        let resolved = sequence.resolve(&columns()).unwrap();
        assert_eq!(resolved[&Label::from("b")], StrOrInt::from("2px"));
        let err = sequence.resolve(&["a".into()]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Col_space length(2) should match DataFrame number of columns(1)"
        );

        let mut mapping = ColspaceType::new();
        mapping.insert("".into(), 3i64.into());
        mapping.insert("a".into(), 4i64.into());
        assert_eq!(
            ColspaceArgType::Mapping(mapping.clone())
                .resolve(&columns())
                .unwrap(),
            mapping
        );
        mapping.insert("z".into(), 4i64.into());
        let err = ColspaceArgType::Mapping(mapping)
            .resolve(&columns())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Col_space is defined for an unknown column: z"
        );
    }

    #[test]
    fn test_float_format() {
        let spec = FloatFormatType::<TestHost>::Spec("%.2f".into());
        assert_eq!(format!("{spec:?}"), r#"Spec("%.2f")"#);
        let func = FloatFormatType::<TestHost>::Func(Arc::new(|x| format!("{:.1}", x * 2.)));
        if let FloatFormatType::Func(f) = &func {
            assert_eq!(f(1.25), "2.5");
        }
        let eng = FloatFormatType::<TestHost>::Eng(EngFormatter { accuracy: 3 });
        assert!(format!("{eng:?}").starts_with("Eng("));
    }
}
