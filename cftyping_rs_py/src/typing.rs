use anyhow::Context;
use cftyping_bindings::typing::{to_py_err, Vocab};
use cftyping_core::scalar::TimeUnit;
use cftyping_core::typing::{
    self as vocab, Axis, Compression, FilePathOrBuffer, Frequency, NpDtype,
    TimedeltaConvertible, TimestampConvertible,
};
use pyo3::prelude::*;
use pyo3::types::PyBytes;
use std::io::Read;
use std::path::PathBuf;

type LocalTarget = FilePathOrBuffer<std::io::Empty>;

fn parse_unit(unit: Option<&str>) -> PyResult<Option<TimeUnit>> {
    unit.map(str::parse::<TimeUnit>).transpose().map_err(to_py_err)
}

/// nanoseconds since the epoch, `NAT_VALUE` for missing values
#[pyfunction]
#[pyo3(signature = (value, unit=None))]
pub fn to_datetime64_ns(value: Vocab<TimestampConvertible>, unit: Option<&str>) -> PyResult<i64> {
    let ts = value
        .into_inner()
        .to_timestamp(parse_unit(unit)?)
        .map_err(to_py_err)?;
    Ok(ts.value())
}

#[pyfunction]
#[pyo3(signature = (value, unit=None))]
pub fn to_timedelta64_ns(value: Vocab<TimedeltaConvertible>, unit: Option<&str>) -> PyResult<i64> {
    let td = value
        .into_inner()
        .to_timedelta(parse_unit(unit)?)
        .map_err(to_py_err)?;
    Ok(td.value())
}

/// the canonical name of a numpy dtype specifier
#[pyfunction]
pub fn pandas_dtype(dtype: Vocab<NpDtype>) -> PyResult<String> {
    let dtype = dtype.into_inner().resolve().map_err(to_py_err)?;
    Ok(dtype.name())
}

#[pyfunction]
#[pyo3(signature = (axis, ndim=2))]
pub fn axis_number(axis: Vocab<Axis>, ndim: usize) -> PyResult<usize> {
    let object = if ndim == 1 { "Series" } else { "DataFrame" };
    axis.into_inner().number(ndim, object).map_err(to_py_err)
}

/// the normalized alias of a frequency, e.g. `"5min"` -> `"5T"`
#[pyfunction]
pub fn to_offset(freq: Vocab<Frequency>) -> PyResult<String> {
    let offset = freq.into_inner().to_offset().map_err(to_py_err)?;
    Ok(offset.freqstr())
}

#[pyfunction]
#[pyo3(signature = (path, compression=Some("infer")))]
pub fn infer_compression(path: PathBuf, compression: Option<&str>) -> PyResult<Option<&'static str>> {
    let target = LocalTarget::from(path);
    let method = vocab::infer_compression(&target, compression).map_err(to_py_err)?;
    Ok(method.map(|method| method.name()))
}

/// read a whole (possibly compressed) local file
#[pyfunction]
#[pyo3(signature = (path, compression=None))]
pub fn read_bytes(
    py: Python<'_>,
    path: PathBuf,
    compression: Option<Vocab<Compression>>,
) -> anyhow::Result<Py<PyBytes>> {
    let compression = compression.map(Vocab::into_inner);
    let display = path.display().to_string();
    let mut reader = LocalTarget::from(path)
        .into_reader(compression)
        .with_context(|| format!("failed to open '{display}'"))?;
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .with_context(|| format!("failed to read '{display}'"))?;
    log::debug!("read {} bytes", buf.len());
    Ok(PyBytes::new_bound(py, &buf).unbind())
}
