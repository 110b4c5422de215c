mod logging;
mod typing;

use cftyping_bindings::register_submodule;
use pyo3::{prelude::*, py_run};

#[pymodule]
fn cftyping(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let rs_module = register_submodule!(m, "cftyping._rs");
    let typing_module = register_submodule!(rs_module, "cftyping._rs.typing");

    typing_module.add("NAT_VALUE", cftyping_core::scalar::NAT_VALUE)?;
    typing_module.add_function(wrap_pyfunction!(typing::to_datetime64_ns, &typing_module)?)?;
    typing_module.add_function(wrap_pyfunction!(typing::to_timedelta64_ns, &typing_module)?)?;
    typing_module.add_function(wrap_pyfunction!(typing::pandas_dtype, &typing_module)?)?;
    typing_module.add_function(wrap_pyfunction!(typing::axis_number, &typing_module)?)?;
    typing_module.add_function(wrap_pyfunction!(typing::to_offset, &typing_module)?)?;
    typing_module.add_function(wrap_pyfunction!(typing::infer_compression, &typing_module)?)?;
    typing_module.add_function(wrap_pyfunction!(typing::read_bytes, &typing_module)?)?;
    typing_module.add_function(wrap_pyfunction!(
        logging::enable_verbose_logging,
        &typing_module
    )?)?;

    Ok(())
}
