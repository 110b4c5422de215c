//! Some useful bindings for pyo3.
//!
//! # Design
//!
//! The vocabulary in `cftyping_core::typing` is pure Rust, so it knows nothing about
//! Python objects. This crate teaches it to read them: every shape that a Python
//! caller may pass gets a [`typing::FromPyVocab`] implementation, and can be taken
//! as a `#[pyfunction]` argument through the [`typing::Vocab`] wrapper.
//!
//! Errors raised by the core are mapped to the Python exceptions a pandas user
//! would expect by [`typing::to_py_err`].

pub mod typing;

#[macro_export]
macro_rules! register_submodule {
    ($parent:expr, $hierarchy:expr) => {{
        let py = $parent.py();
        let module_name = $hierarchy.split('.').last().unwrap();
        let submodule = PyModule::new_bound(py, module_name)?;
        py_run!(
            py,
            submodule,
            concat!("import sys; sys.modules['", $hierarchy, "'] = submodule")
        );
        $parent.add_submodule(&submodule)?;
        submodule
    }};
}
