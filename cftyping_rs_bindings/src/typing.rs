use cftyping_core::error::TypingError;
use cftyping_core::typing::{
    Axis, Compression, Datetime64, Frequency, IndexLabel, Label, Level, NpDtype, PythonScalar,
    Timedelta64, TimedeltaConvertible, TimestampConvertible, Timezone,
};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use pyo3::exceptions::{
    PyIndexError, PyKeyError, PyNotImplementedError, PyOverflowError, PyTypeError, PyValueError,
};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyList, PyLong, PyString, PyTuple, PyType};

/// the Python exception matching a core error
pub fn to_py_err(err: TypingError) -> PyErr {
    let msg = err.to_string();
    match err {
        TypingError::Io(err) => err.into(),
        TypingError::LevelNotFound(_) | TypingError::UnknownColumns(_) => PyKeyError::new_err(msg),
        TypingError::InvalidLevel { .. } => PyIndexError::new_err(msg),
        TypingError::UnknownDtype(_) => PyTypeError::new_err(msg),
        TypingError::UnsupportedCompression(_) => PyNotImplementedError::new_err(msg),
        TypingError::OutOfBounds(_) => PyOverflowError::new_err(msg),
        _ => PyValueError::new_err(msg),
    }
}

/// read a vocabulary shape from an arbitrary Python object
///
/// this is a local trait because both the shapes and [`FromPyObject`] are foreign to
/// this crate; wrap the shape in [`Vocab`] to take it as a `#[pyfunction]` argument.
pub trait FromPyVocab: Sized {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self>;
}

#[derive(Debug, Clone)]
pub struct Vocab<T>(pub T);

impl<T> Vocab<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<'py, T: FromPyVocab> FromPyObject<'py> for Vocab<T> {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        T::from_py(ob).map(Vocab)
    }
}

impl<T: FromPyVocab> FromPyVocab for Option<T> {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        if ob.is_none() {
            Ok(None)
        } else {
            T::from_py(ob).map(Some)
        }
    }
}

fn unsupported<T>(ob: &Bound<'_, PyAny>, shape: &str) -> PyResult<T> {
    let type_name = ob.get_type().getattr("__name__")?.extract::<String>()?;
    Err(PyTypeError::new_err(format!(
        "'{type_name}' object cannot be used as {shape}"
    )))
}

/// `dtype.kind` of numpy scalars, `None` for everything else
fn numpy_kind(ob: &Bound<'_, PyAny>) -> PyResult<Option<String>> {
    if !ob.hasattr("dtype")? {
        return Ok(None);
    }
    let kind = ob.getattr("dtype")?.getattr("kind")?;
    Ok(kind.extract::<String>().ok())
}

/// nanoseconds held by a numpy `datetime64` / `timedelta64` scalar
fn numpy_nanos(ob: &Bound<'_, PyAny>, dtype: &str) -> PyResult<i64> {
    ob.call_method1("astype", (dtype,))?
        .call_method1("astype", ("int64",))?
        .extract()
}

fn json_value(ob: &Bound<'_, PyAny>) -> PyResult<serde_json::Value> {
    if ob.is_none() {
        return Ok(serde_json::Value::Null);
    }
    if ob.is_instance_of::<PyBool>() {
        return Ok(ob.extract::<bool>()?.into());
    }
    if ob.is_instance_of::<PyLong>() {
        return Ok(ob.extract::<i64>()?.into());
    }
    if ob.is_instance_of::<PyFloat>() {
        let x = ob.extract::<f64>()?;
        return Ok(serde_json::Number::from_f64(x).map_or(serde_json::Value::Null, Into::into));
    }
    if let Ok(s) = ob.downcast::<PyString>() {
        return Ok(s.to_cow()?.into_owned().into());
    }
    if let Ok(dict) = ob.downcast::<PyDict>() {
        let mut map = serde_json::Map::new();
        for (key, value) in dict.iter() {
            map.insert(key.str()?.to_cow()?.into_owned(), json_value(&value)?);
        }
        return Ok(map.into());
    }
    if ob.is_instance_of::<PyList>() || ob.is_instance_of::<PyTuple>() {
        let values = ob
            .iter()?
            .map(|item| json_value(&item?))
            .collect::<PyResult<Vec<_>>>()?;
        return Ok(values.into());
    }
    unsupported(ob, "a JSON value")
}

impl FromPyVocab for Label {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        if ob.is_none() {
            return Ok(Label::None);
        }
        if ob.is_instance_of::<PyBool>() {
            return Ok(Label::Bool(ob.extract()?));
        }
        if ob.is_instance_of::<PyLong>() {
            return Ok(Label::Int(ob.extract()?));
        }
        if ob.is_instance_of::<PyFloat>() {
            return Ok(Label::Float(ob.extract()?));
        }
        if let Ok(s) = ob.downcast::<PyString>() {
            return Ok(Label::Str(s.to_cow()?.into_owned()));
        }
        if let Ok(tuple) = ob.downcast::<PyTuple>() {
            let labels = tuple
                .iter()
                .map(|item| Label::from_py(&item))
                .collect::<PyResult<Vec<_>>>()?;
            return Ok(Label::Tuple(labels));
        }
        match numpy_kind(ob)?.as_deref() {
            Some("b") => return Ok(Label::Bool(ob.extract()?)),
            Some("i" | "u") => return Ok(Label::Int(ob.extract()?)),
            Some("f") => return Ok(Label::Float(ob.extract()?)),
            Some("M") => return TimestampConvertible::from_py(ob).and_then(timestamp_label),
            Some("m") => return TimedeltaConvertible::from_py(ob).and_then(timedelta_label),
            _ => {}
        }
        if let Ok(dt) = ob.extract::<DateTime<FixedOffset>>() {
            return timestamp_label(dt.into());
        }
        if let Ok(dt) = ob.extract::<NaiveDateTime>() {
            return timestamp_label(dt.into());
        }
        if let Ok(td) = ob.extract::<TimeDelta>() {
            return timedelta_label(td.into());
        }
        unsupported(ob, "a label")
    }
}

fn timestamp_label(value: TimestampConvertible) -> PyResult<Label> {
    value.to_timestamp(None).map(Label::Timestamp).map_err(to_py_err)
}

fn timedelta_label(value: TimedeltaConvertible) -> PyResult<Label> {
    value.to_timedelta(None).map(Label::Timedelta).map_err(to_py_err)
}

impl FromPyVocab for IndexLabel {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        match ob.downcast::<PyList>() {
            Ok(list) => list
                .iter()
                .map(|item| Label::from_py(&item))
                .collect::<PyResult<Vec<_>>>()
                .map(IndexLabel::Multiple),
            Err(_) => Label::from_py(ob).map(IndexLabel::Single),
        }
    }
}

// integers stay names, `Level::resolve` falls back to positions
impl FromPyVocab for Level {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        Label::from_py(ob).map(Level::Name)
    }
}

impl FromPyVocab for Axis {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        if let Ok(s) = ob.downcast::<PyString>() {
            return Ok(Axis::Name(s.to_cow()?.into_owned()));
        }
        if ob.is_instance_of::<PyLong>() && !ob.is_instance_of::<PyBool>() {
            return Ok(Axis::Number(ob.extract()?));
        }
        unsupported(ob, "an axis")
    }
}

impl FromPyVocab for PythonScalar {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        if ob.is_instance_of::<PyBool>() {
            return Ok(PythonScalar::Bool(ob.extract()?));
        }
        if ob.is_instance_of::<PyLong>() {
            return Ok(PythonScalar::Int(ob.extract()?));
        }
        if ob.is_instance_of::<PyFloat>() {
            return Ok(PythonScalar::Float(ob.extract()?));
        }
        if let Ok(s) = ob.downcast::<PyString>() {
            return Ok(PythonScalar::Str(s.to_cow()?.into_owned()));
        }
        unsupported(ob, "a python scalar")
    }
}

impl FromPyVocab for Timezone {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        if let Ok(s) = ob.downcast::<PyString>() {
            return Ok(Timezone::Name(s.to_cow()?.into_owned()));
        }
        if !ob.hasattr("utcoffset")? {
            return unsupported(ob, "a timezone");
        }
        let offset = ob
            .call_method1("utcoffset", (ob.py().None(),))?
            .extract::<TimeDelta>()?;
        let offset = i32::try_from(offset.num_seconds())
            .ok()
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| PyValueError::new_err(format!("invalid utc offset {offset}")))?;
        Ok(Timezone::TzInfo(offset))
    }
}

impl FromPyVocab for TimestampConvertible {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        if ob.is_instance_of::<PyBool>() {
            return unsupported(ob, "a timestamp");
        }
        match numpy_kind(ob)?.as_deref() {
            Some("M") => {
                let nanos = numpy_nanos(ob, "datetime64[ns]")?;
                return Ok(TimestampConvertible::Datetime64(Datetime64::from(nanos)));
            }
            Some("i" | "u") => return Ok(TimestampConvertible::Int64(ob.extract()?)),
            _ => {}
        }
        if ob.is_instance_of::<PyLong>() {
            return Ok(TimestampConvertible::Int(ob.extract()?));
        }
        if ob.is_instance_of::<PyFloat>() {
            return Ok(TimestampConvertible::Float(ob.extract()?));
        }
        if let Ok(s) = ob.downcast::<PyString>() {
            return Ok(TimestampConvertible::Str(s.to_cow()?.into_owned()));
        }
        if let Ok(dt) = ob.extract::<DateTime<FixedOffset>>() {
            return Ok(dt.into());
        }
        if let Ok(dt) = ob.extract::<NaiveDateTime>() {
            return Ok(dt.into());
        }
        unsupported(ob, "a timestamp")
    }
}

impl FromPyVocab for TimedeltaConvertible {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        if ob.is_instance_of::<PyBool>() {
            return unsupported(ob, "a timedelta");
        }
        match numpy_kind(ob)?.as_deref() {
            Some("m") => {
                let nanos = numpy_nanos(ob, "timedelta64[ns]")?;
                return Ok(TimedeltaConvertible::Timedelta64(Timedelta64::from(nanos)));
            }
            Some("i" | "u") => return Ok(TimedeltaConvertible::Int64(ob.extract()?)),
            _ => {}
        }
        if ob.is_instance_of::<PyLong>() {
            return Ok(TimedeltaConvertible::Int(ob.extract()?));
        }
        if ob.is_instance_of::<PyFloat>() {
            return Ok(TimedeltaConvertible::Float(ob.extract()?));
        }
        if let Ok(s) = ob.downcast::<PyString>() {
            return Ok(TimedeltaConvertible::Str(s.to_cow()?.into_owned()));
        }
        if let Ok(td) = ob.extract::<TimeDelta>() {
            return Ok(td.into());
        }
        unsupported(ob, "a timedelta")
    }
}

impl FromPyVocab for Frequency {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        if let Ok(s) = ob.downcast::<PyString>() {
            return Ok(Frequency::Alias(s.to_cow()?.into_owned()));
        }
        // offset objects carry their own alias
        if ob.hasattr("freqstr")? {
            return Ok(Frequency::Alias(ob.getattr("freqstr")?.extract()?));
        }
        unsupported(ob, "a frequency")
    }
}

impl FromPyVocab for NpDtype {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        if let Ok(s) = ob.downcast::<PyString>() {
            return Ok(NpDtype::Name(s.to_cow()?.into_owned()));
        }
        let name = if ob.is_instance_of::<PyType>() {
            ob.getattr("__name__")?
        } else if ob.hasattr("name")? {
            ob.getattr("name")?
        } else {
            return unsupported(ob, "a dtype");
        };
        let name = name.extract::<String>()?;
        name.parse().map(NpDtype::Dtype).map_err(to_py_err)
    }
}

impl FromPyVocab for Compression {
    fn from_py(ob: &Bound<'_, PyAny>) -> PyResult<Self> {
        if let Ok(s) = ob.downcast::<PyString>() {
            return Ok(Compression::Method(s.to_cow()?.into_owned()));
        }
        if ob.is_instance_of::<PyDict>() {
            let serde_json::Value::Object(map) = json_value(ob)? else {
                return unsupported(ob, "compression options");
            };
            return Ok(Compression::Dict(map.into_iter().collect()));
        }
        unsupported(ob, "compression options")
    }
}
