pub mod codec;
pub mod error;
mod shuffle;
pub mod table;

pub use error::{ErrorKind, Result, ShuffleError};
pub use shuffle::*;
pub use table::Table;

// Python bindings - only when the `python` feature is enabled
#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
fn to_py_err(e: ShuffleError) -> PyErr {
    let msg = e.to_string();
    match e.kind() {
        ErrorKind::NotFound => pyo3::exceptions::PyFileNotFoundError::new_err(msg),
        ErrorKind::Parse | ErrorKind::Config => pyo3::exceptions::PyValueError::new_err(msg),
        ErrorKind::Write => pyo3::exceptions::PyIOError::new_err(msg),
    }
}

#[cfg(feature = "python")]
#[pyfunction]
#[pyo3(
    name = "shuffle_csv",
    signature = (input_file, output_file, seed=None, header=false, delimiter=",")
)]
fn shuffle_csv_py(
    input_file: &str,
    output_file: &str,
    seed: Option<i64>,
    header: bool,
    delimiter: &str,
) -> PyResult<usize> {
    let config = ShuffleConfig::new(input_file, output_file, seed, header, delimiter)
        .map_err(to_py_err)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| pyo3::exceptions::PyRuntimeError::new_err(e.to_string()))?;

    let summary = runtime
        .block_on(shuffle_file(&config))
        .map_err(to_py_err)?;

    Ok(summary.rows)
}

#[cfg(feature = "python")]
#[pymodule]
fn rowshuffle(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(shuffle_csv_py, m)?)?;
    Ok(())
}
