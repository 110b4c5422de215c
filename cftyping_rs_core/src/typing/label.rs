use crate::error::{Result, TypingError};
use crate::scalar::{Timedelta, Timestamp};
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem;
use indexmap::IndexMap;
use itertools::Itertools;
use std::sync::Arc;

/// a hashable label of a row, a column or an index level
#[derive(Debug, Clone)]
pub enum Label {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Timestamp(Timestamp),
    Timedelta(Timedelta),
    Tuple(Vec<Label>),
}

impl Label {
    /// the integer a numeric label stands for, bools and integral floats included
    fn as_int(&self) -> Option<i64> {
        match self {
            Label::Bool(b) => Some(*b as i64),
            Label::Int(i) => Some(*i),
            Label::Float(x) if x.fract() == 0. && *x >= i64::MIN as f64 && *x < i64::MAX as f64 => {
                Some(*x as i64)
            }
            _ => None,
        }
    }

    /// python's `repr` of the label, as quoted in error messages
    pub fn repr(&self) -> String {
        match self {
            Label::Str(s) => format!("'{s}'"),
            Label::Tuple(labels) if labels.len() == 1 => format!("({},)", labels[0].repr()),
            Label::Tuple(labels) => format!("({})", labels.iter().map(Label::repr).join(", ")),
            _ => self.to_string(),
        }
    }
}

// numbers compare by value across `Bool` / `Int` / `Float`, and all NaNs are the same label
impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(a), Some(b)) = (self.as_int(), other.as_int()) {
            return a == b;
        }
        match (self, other) {
            (Label::None, Label::None) => true,
            (Label::Float(a), Label::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Label::Str(a), Label::Str(b)) => a == b,
            (Label::Timestamp(a), Label::Timestamp(b)) => a == b,
            (Label::Timedelta(a), Label::Timedelta(b)) => a == b,
            (Label::Tuple(a), Label::Tuple(b)) => a == b,
            _ => false,
        }
    }
}
impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if let Some(i) = self.as_int() {
            mem::discriminant(&Label::Int(i)).hash(state);
            return i.hash(state);
        }
        mem::discriminant(self).hash(state);
        match self {
            Label::None | Label::Bool(_) | Label::Int(_) => {}
            Label::Float(x) => {
                let bits = if x.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    x.to_bits()
                };
                bits.hash(state)
            }
            Label::Str(s) => s.hash(state),
            Label::Timestamp(ts) => ts.hash(state),
            Label::Timedelta(td) => td.hash(state),
            Label::Tuple(labels) => labels.hash(state),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::None => write!(f, "None"),
            Label::Bool(true) => write!(f, "True"),
            Label::Bool(false) => write!(f, "False"),
            Label::Int(i) => write!(f, "{i}"),
            Label::Float(x) => write!(f, "{x:?}"),
            Label::Str(s) => write!(f, "{s}"),
            Label::Timestamp(ts) => write!(f, "{ts}"),
            Label::Timedelta(td) => write!(f, "{td}"),
            Label::Tuple(labels) => write!(f, "({})", labels.iter().join(", ")),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Str(s.to_string())
    }
}
impl From<String> for Label {
    fn from(s: String) -> Self {
        Label::Str(s)
    }
}
impl From<i64> for Label {
    fn from(i: i64) -> Self {
        Label::Int(i)
    }
}
impl From<f64> for Label {
    fn from(x: f64) -> Self {
        Label::Float(x)
    }
}
impl From<bool> for Label {
    fn from(b: bool) -> Self {
        Label::Bool(b)
    }
}
impl From<Timestamp> for Label {
    fn from(ts: Timestamp) -> Self {
        Label::Timestamp(ts)
    }
}
impl From<Timedelta> for Label {
    fn from(td: Timedelta) -> Self {
        Label::Timedelta(td)
    }
}

/// one label, or several of them
///
/// a tuple is a single (hierarchical) label, not several labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexLabel {
    Single(Label),
    Multiple(Vec<Label>),
}

impl IndexLabel {
    pub fn into_labels(self) -> Vec<Label> {
        match self {
            IndexLabel::Single(label) => vec![label],
            IndexLabel::Multiple(labels) => labels,
        }
    }
}

impl From<Label> for IndexLabel {
    fn from(label: Label) -> Self {
        IndexLabel::Single(label)
    }
}
impl From<Vec<Label>> for IndexLabel {
    fn from(labels: Vec<Label>) -> Self {
        IndexLabel::Multiple(labels)
    }
}

/// a level of a (multi-)index, either by name or by position
///
/// integers coming from users are names first (see [`Level::resolve`]), only
/// `Position` skips the name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    Name(Label),
    Position(i64),
}

fn level_position(level: i64, nlevels: usize) -> Result<usize> {
    let resolved = if level < 0 {
        level + nlevels as i64
    } else {
        level
    };
    if resolved < 0 || resolved >= nlevels as i64 {
        Err(TypingError::InvalidLevel { level, nlevels })
    } else {
        Ok(resolved as usize)
    }
}

impl Level {
    /// resolve against the level `names` of an index
    ///
    /// names win over positions: an integer name is only read as a position when no
    /// level carries it as its name.
    pub fn resolve(&self, names: &[Label]) -> Result<usize> {
        match self {
            Level::Position(level) => level_position(*level, names.len()),
            Level::Name(label) => {
                let mut hits = names.iter().positions(|name| name == label);
                match (hits.next(), hits.next()) {
                    (Some(_), Some(_)) if !matches!(label, Label::Int(_)) => {
                        Err(TypingError::AmbiguousLevel(label.to_string()))
                    }
                    (Some(i), _) => Ok(i),
                    (None, _) => match label {
                        Label::Int(level) => level_position(*level, names.len()),
                        _ => Err(TypingError::LevelNotFound(label.to_string())),
                    },
                }
            }
        }
    }
}

impl From<i64> for Level {
    fn from(level: i64) -> Self {
        Level::Name(Label::Int(level))
    }
}
impl From<Label> for Level {
    fn from(label: Label) -> Self {
        Level::Name(label)
    }
}

/// an axis, as its number or its name (`"index"`, `"rows"`, `"columns"`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    Name(String),
    Number(i64),
}

impl Axis {
    /// the axis number on an object with `ndim` dimensions, `object` names it in errors
    pub fn number(&self, ndim: usize, object: &'static str) -> Result<usize> {
        let number = match self {
            Axis::Number(n) => usize::try_from(*n).ok(),
            Axis::Name(name) => match name.as_str() {
                "index" | "rows" => Some(0),
                "columns" => Some(1),
                _ => None,
            },
        };
        match number {
            Some(n) if n < ndim => Ok(n),
            _ => Err(TypingError::InvalidAxis {
                axis: self.to_string(),
                object,
            }),
        }
    }
}

impl Default for Axis {
    fn default() -> Self {
        Axis::Number(0)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Name(name) => write!(f, "{name}"),
            Axis::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Axis {
    fn from(name: &str) -> Self {
        Axis::Name(name.to_string())
    }
}
impl From<i64> for Axis {
    fn from(n: i64) -> Self {
        Axis::Number(n)
    }
}

pub type Axes = Vec<Label>;
pub type Suffixes = (String, String);
pub type Ordered = Option<bool>;

pub type LabelFn = Arc<dyn Fn(&Label) -> Label + Send + Sync>;

/// converts one label to another, as taken by `rename`-like methods
#[derive(Clone)]
pub enum Renamer {
    Mapping(IndexMap<Label, Label>),
    Func(LabelFn),
}

impl Renamer {
    pub fn func(f: impl Fn(&Label) -> Label + Send + Sync + 'static) -> Self {
        Renamer::Func(Arc::new(f))
    }

    /// labels missing from a mapping are kept as they are
    pub fn apply(&self, label: &Label) -> Label {
        match self {
            Renamer::Mapping(mapping) => mapping.get(label).unwrap_or(label).clone(),
            Renamer::Func(f) => f(label),
        }
    }
}

impl fmt::Debug for Renamer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Renamer::Mapping(mapping) => f.debug_tuple("Mapping").field(mapping).finish(),
            Renamer::Func(_) => f.write_str("Func(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_label_hash_eq() {
        let labels: HashSet<Label> = [
            Label::Float(f64::NAN),
            Label::Float(f64::NAN),
            Label::Float(0.),
            Label::Float(-0.),
            Label::Int(0),
            Label::from("0"),
        ]
        .into_iter()
        .collect();
        assert_eq!(labels.len(), 3);
        let tuple = Label::Tuple(vec![Label::from("a"), Label::Int(1)]);
        assert_eq!(tuple.to_string(), "(a, 1)");
        assert_eq!(tuple.repr(), "('a', 1)");
        assert_eq!(Label::Tuple(vec![Label::from("a")]).repr(), "('a',)");
        assert_eq!(Label::Float(2.).repr(), "2.0");
        assert_eq!(
            IndexLabel::from(tuple.clone()).into_labels(),
            vec![tuple.clone()]
        );
    }

    #[test]
    fn test_numeric_labels_match_across_kinds() {
        assert_eq!(Label::Int(1), Label::Float(1.));
        assert_eq!(Label::Int(1), Label::Bool(true));
        assert_eq!(Label::Float(0.), Label::Bool(false));
        assert_ne!(Label::Int(1), Label::Float(1.5));
        assert_ne!(Label::Int(1), Label::from("1"));
        assert_ne!(Label::Float(f64::INFINITY), Label::Int(i64::MAX));
        let labels: HashSet<Label> = [
            Label::Int(1),
            Label::Float(1.),
            Label::Bool(true),
            Label::Float(1.5),
            Label::Tuple(vec![Label::Int(2)]),
            Label::Tuple(vec![Label::Float(2.)]),
        ]
        .into_iter()
        .collect();
        assert_eq!(labels.len(), 3);

        let mapping: IndexMap<Label, Label> = [(Label::Int(1), "x".into())].into_iter().collect();
        let renamer = Renamer::Mapping(mapping);
        assert_eq!(renamer.apply(&Label::Float(1.)), Label::from("x"));
        assert_eq!(renamer.apply(&Label::Bool(true)), Label::from("x"));
        let names = vec![Label::from("a"), Label::Float(7.)];
        assert_eq!(Level::Name(Label::Int(7)).resolve(&names).unwrap(), 1);
    }

    #[test]
    fn test_axis_number() {
        assert_eq!(Axis::from("index").number(2, "DataFrame").unwrap(), 0);
        assert_eq!(Axis::from("rows").number(1, "Series").unwrap(), 0);
        assert_eq!(Axis::from("columns").number(2, "DataFrame").unwrap(), 1);
        assert_eq!(Axis::Number(1).number(2, "DataFrame").unwrap(), 1);
        let err = Axis::from("columns").number(1, "Series").unwrap_err();
        assert_eq!(err.to_string(), "No axis named columns for object type Series");
        assert!(Axis::Number(-1).number(2, "DataFrame").is_err());
        assert!(Axis::Number(2).number(2, "DataFrame").is_err());
    }

    #[test]
    fn test_level_resolve() {
        let names = vec![Label::from("a"), Label::from("b"), Label::Int(0)];
        assert_eq!(Level::Name("b".into()).resolve(&names).unwrap(), 1);
        assert_eq!(Level::Name(Label::Int(0)).resolve(&names).unwrap(), 2);
        assert_eq!(Level::Name(Label::Int(1)).resolve(&names).unwrap(), 1);
        assert_eq!(Level::Position(-1).resolve(&names).unwrap(), 2);
        assert!(matches!(
            Level::Position(3).resolve(&names),
            Err(TypingError::InvalidLevel { level: 3, nlevels: 3 })
        ));
        assert!(matches!(
            Level::Name("c".into()).resolve(&names),
            Err(TypingError::LevelNotFound(_))
        ));
        let duplicated = vec![Label::from("a"), Label::from("a")];
        assert!(matches!(
            Level::Name("a".into()).resolve(&duplicated),
            Err(TypingError::AmbiguousLevel(_))
        ));
    }

    #[test]
    fn test_integer_level_names_win() {
        let names = vec![Label::Int(1), Label::Int(0)];
        assert_eq!(Level::from(0i64).resolve(&names).unwrap(), 1);
        assert_eq!(Level::from(1i64).resolve(&names).unwrap(), 0);
        assert_eq!(Level::Position(0).resolve(&names).unwrap(), 0);
        assert_eq!(Level::from(-1i64).resolve(&names).unwrap(), 1);
        assert!(matches!(
            Level::from(2i64).resolve(&names),
            Err(TypingError::InvalidLevel { level: 2, nlevels: 2 })
        ));
    }

    #[test]
    fn test_renamer() {
        let mapping: IndexMap<Label, Label> = [("a".into(), "x".into())].into_iter().collect();
        let renamer = Renamer::Mapping(mapping);
        assert_eq!(renamer.apply(&"a".into()), Label::from("x"));
        assert_eq!(renamer.apply(&"b".into()), Label::from("b"));
        let renamer = Renamer::func(|label| Label::Str(format!("{label}_1")));
        assert_eq!(renamer.apply(&Label::Int(3)), Label::from("3_1"));
    }
}
