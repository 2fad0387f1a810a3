//! C ABI bindings for batch PDF to plain-text conversion.
//!
//! The exported entry point keeps the historical contract: two NUL-terminated
//! directory paths in, `0` (success) or `1` (any error) out. Error details are
//! logged to stderr and kept as the calling thread's last error.
//!
//! # Example (C)
//!
//! ```c
//! if (extract_text_from_pdfs_c("./pdfs", "./txt") != 0) {
//!     fprintf(stderr, "conversion failed: %s\n", pdftext_last_error());
//! }
//! ```
//!
//! # Thread Safety
//!
//! Calls may come from any thread. Batches are serialized through a
//! process-wide lock, so two overlapping calls never write into the same
//! output directory at the same time.

use std::cell::RefCell;
use std::ffi::{CStr, CString, c_char, c_int};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::ptr;
use std::sync::Once;

use parking_lot::{Mutex, const_mutex};
use thiserror::Error;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use pdftext_core::{BatchReport, ConvertError, Converter, PdfTextConfig};

/// Status returned when the whole batch succeeded.
pub const PDFTEXT_STATUS_OK: c_int = 0;

/// Status returned on any failure.
pub const PDFTEXT_STATUS_ERROR: c_int = 1;

static BATCH_LOCK: Mutex<()> = const_mutex(());
static LOGGING: Once = Once::new();

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

/// Failures at the boundary, before or around the core conversion.
#[derive(Error, Debug)]
enum BoundaryError {
    #[error("{0} cannot be NULL")]
    NullArgument(&'static str),

    #[error("invalid UTF-8 in {name}: {source}")]
    InvalidUtf8 {
        name: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("{failed} of {total} PDF files could not be converted")]
    PartialFailure { failed: usize, total: usize },

    #[error("internal error: conversion panicked")]
    Panic,
}

/// Set the last error message
fn set_last_error(message: String) {
    // CString rejects interior NULs.
    let message = CString::new(message.replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|last| *last.borrow_mut() = Some(message));
}

/// Clear the last error message
fn clear_last_error() {
    LAST_ERROR.with(|last| *last.borrow_mut() = None);
}

fn init_logging() {
    LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        // The host may already have installed a subscriber; keep it.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

/// Borrow a C string argument.
///
/// # Safety
///
/// `ptr` must be NULL or point to a valid NUL-terminated string that outlives `'a`.
unsafe fn c_str_arg<'a>(ptr: *const c_char, name: &'static str) -> Result<&'a CStr, BoundaryError> {
    if ptr.is_null() {
        return Err(BoundaryError::NullArgument(name));
    }

    // SAFETY: checked for NULL above; the caller guarantees NUL termination.
    Ok(unsafe { CStr::from_ptr(ptr) })
}

/// Borrow a C string argument as UTF-8.
///
/// # Safety
///
/// Same as [`c_str_arg`].
unsafe fn str_arg<'a>(ptr: *const c_char, name: &'static str) -> Result<&'a str, BoundaryError> {
    unsafe { c_str_arg(ptr, name) }?
        .to_str()
        .map_err(|source| BoundaryError::InvalidUtf8 { name, source })
}

/// Borrow a C string argument as a path. Unix paths are taken as raw bytes.
///
/// # Safety
///
/// Same as [`c_str_arg`].
#[cfg(unix)]
unsafe fn path_arg<'a>(ptr: *const c_char, name: &'static str) -> Result<&'a Path, BoundaryError> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let bytes = unsafe { c_str_arg(ptr, name) }?.to_bytes();
    Ok(Path::new(OsStr::from_bytes(bytes)))
}

/// Borrow a C string argument as a path. Non-Unix paths must be UTF-8.
///
/// # Safety
///
/// Same as [`c_str_arg`].
#[cfg(not(unix))]
unsafe fn path_arg<'a>(ptr: *const c_char, name: &'static str) -> Result<&'a Path, BoundaryError> {
    unsafe { str_arg(ptr, name) }.map(Path::new)
}

/// # Safety
///
/// Pointer arguments follow the rules of [`str_arg`]; `config_json` may be NULL.
unsafe fn convert(
    pdf_dir: *const c_char,
    txt_dir: *const c_char,
    config_json: *const c_char,
) -> Result<BatchReport, BoundaryError> {
    // SAFETY: forwarded from the exported function's contract.
    let pdf_dir = unsafe { path_arg(pdf_dir, "pdf_dir") }?;
    let txt_dir = unsafe { path_arg(txt_dir, "txt_dir") }?;

    let config = if config_json.is_null() {
        PdfTextConfig::default()
    } else {
        let json = unsafe { str_arg(config_json, "config_json") }?;
        PdfTextConfig::from_json(json)?
    };

    let _guard = BATCH_LOCK.lock();
    debug!("Converting {} -> {}", pdf_dir.display(), txt_dir.display());

    let report = Converter::from_config(config).convert_all(pdf_dir, txt_dir)?;
    if !report.is_success() {
        return Err(BoundaryError::PartialFailure {
            failed: report.failed.len(),
            total: report.total(),
        });
    }
    Ok(report)
}

/// Run a batch and reduce the outcome to a status code.
///
/// # Safety
///
/// Same pointer requirements as [`convert`].
unsafe fn run_batch(
    pdf_dir: *const c_char,
    txt_dir: *const c_char,
    config_json: *const c_char,
) -> c_int {
    init_logging();
    clear_last_error();

    // SAFETY: forwarded from the caller's contract.
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| unsafe {
        convert(pdf_dir, txt_dir, config_json)
    }))
    .unwrap_or(Err(BoundaryError::Panic));

    match outcome {
        Ok(report) => {
            debug!("Converted {} PDF files", report.converted.len());
            PDFTEXT_STATUS_OK
        }
        Err(err) => {
            error!("{}", err);
            set_last_error(err.to_string());
            PDFTEXT_STATUS_ERROR
        }
    }
}

/// Convert every PDF under `pdf_dir` (recursively) into `txt_dir/<name>.txt`.
///
/// Uses the default configuration: the batch stops at the first file that
/// cannot be read, extracted or written. `txt_dir` must already exist.
///
/// # Safety
///
/// - `pdf_dir` and `txt_dir` must be valid NUL-terminated strings
/// - Returns `0` on success and `1` on any error (see `pdftext_last_error`)
#[unsafe(no_mangle)]
pub unsafe extern "C" fn extract_text_from_pdfs_c(
    pdf_dir: *const c_char,
    txt_dir: *const c_char,
) -> c_int {
    // SAFETY: forwarded from this function's contract.
    unsafe { run_batch(pdf_dir, txt_dir, ptr::null()) }
}

/// Same as `extract_text_from_pdfs_c`, with a JSON configuration.
///
/// With `"conversion": {"error_policy": "skip_and_report"}` every PDF is
/// attempted and `1` is returned afterwards if any of them failed.
///
/// # Safety
///
/// - `pdf_dir` and `txt_dir` must be valid NUL-terminated strings
/// - `config_json` must be NULL (defaults) or a valid NUL-terminated UTF-8 string
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pdftext_convert_with_config(
    pdf_dir: *const c_char,
    txt_dir: *const c_char,
    config_json: *const c_char,
) -> c_int {
    // SAFETY: forwarded from this function's contract.
    unsafe { run_batch(pdf_dir, txt_dir, config_json) }
}

/// Last error message raised on the calling thread, or NULL.
///
/// The string is owned by the library and stays valid until the next
/// conversion call on the same thread. Do not free it.
#[unsafe(no_mangle)]
pub extern "C" fn pdftext_last_error() -> *const c_char {
    LAST_ERROR.with(|last| {
        last.borrow()
            .as_ref()
            .map_or(ptr::null(), |message| message.as_ptr())
    })
}

/// Library version as a static NUL-terminated string.
#[unsafe(no_mangle)]
pub extern "C" fn pdftext_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr().cast()
}
