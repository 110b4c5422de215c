use log::LevelFilter;
use pyo3::prelude::*;
use std::{fs::OpenOptions, io::Write, path::PathBuf, sync::Once};

static INIT_LOGGER: Once = Once::new();

/// route the core's `log` records to stderr, or to `log_file` (appending)
///
/// the level defaults to `debug` and can be overridden with `RUST_LOG`. only the
/// first call has an effect.
#[pyfunction]
#[pyo3(signature = (log_file=None))]
pub fn enable_verbose_logging(log_file: Option<PathBuf>) -> PyResult<()> {
    let target = match log_file {
        Some(path) => {
            let file = OpenOptions::new().append(true).create(true).open(path)?;
            Some(env_logger::Target::Pipe(Box::new(file)))
        }
        None => None,
    };
    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.is_test(false);
        builder.filter_level(LevelFilter::Debug);
        builder.parse_default_env();
        builder.format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())?;
            buf.flush()
        });
        if let Some(target) = target {
            builder.target(target);
        }
        let _ = builder.try_init();
    });
    Ok(())
}
