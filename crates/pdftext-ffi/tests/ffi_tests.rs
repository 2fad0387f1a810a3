//! Tests for the exported C ABI.

use std::ffi::{CStr, CString};
use std::fs;
use std::path::Path;
use std::ptr;

use pdftext_core::fixtures::sample_pdf;
use pdftext_ffi::{
    PDFTEXT_STATUS_ERROR, PDFTEXT_STATUS_OK, extract_text_from_pdfs_c, pdftext_convert_with_config,
    pdftext_last_error, pdftext_version,
};
use pretty_assertions::assert_eq;

fn c_path(path: &Path) -> CString {
    CString::new(path.to_str().unwrap()).unwrap()
}

fn last_error() -> Option<String> {
    let ptr = pdftext_last_error();
    if ptr.is_null() {
        None
    } else {
        // SAFETY: the library returns a valid NUL-terminated string or NULL.
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
    }
}

fn scratch() -> (tempfile::TempDir, std::path::PathBuf, std::path::PathBuf) {
    let root = tempfile::tempdir().unwrap();
    let input = root.path().join("pdfs");
    let output = root.path().join("txt");
    fs::create_dir_all(input.join("nested")).unwrap();
    fs::create_dir_all(&output).unwrap();
    (root, input, output)
}

#[test]
fn converts_tree_and_returns_zero() {
    let (_root, input, output) = scratch();
    fs::write(input.join("a.pdf"), sample_pdf(&["Alpha"])).unwrap();
    fs::write(input.join("nested/b.pdf"), sample_pdf(&["Bravo"])).unwrap();

    let (pdf_dir, txt_dir) = (c_path(&input), c_path(&output));
    let status = unsafe { extract_text_from_pdfs_c(pdf_dir.as_ptr(), txt_dir.as_ptr()) };

    assert_eq!(status, PDFTEXT_STATUS_OK);
    assert_eq!(last_error(), None);
    assert!(fs::read_to_string(output.join("a.txt")).unwrap().contains("Alpha"));
    assert!(fs::read_to_string(output.join("b.txt")).unwrap().contains("Bravo"));
}

#[test]
fn null_argument_returns_one() {
    let (_root, _input, output) = scratch();
    let txt_dir = c_path(&output);

    let status = unsafe { extract_text_from_pdfs_c(ptr::null(), txt_dir.as_ptr()) };

    assert_eq!(status, PDFTEXT_STATUS_ERROR);
    assert_eq!(last_error().as_deref(), Some("pdf_dir cannot be NULL"));
}

#[test]
fn missing_input_dir_returns_one() {
    let (_root, input, output) = scratch();
    let (pdf_dir, txt_dir) = (c_path(&input.join("missing")), c_path(&output));

    let status = unsafe { extract_text_from_pdfs_c(pdf_dir.as_ptr(), txt_dir.as_ptr()) };

    assert_eq!(status, PDFTEXT_STATUS_ERROR);
    assert!(last_error().unwrap().contains("failed to list PDFs"));
}

#[test]
fn broken_pdf_aborts_with_default_config() {
    let (_root, input, output) = scratch();
    fs::write(input.join("a.pdf"), b"").unwrap();
    fs::write(input.join("b.pdf"), sample_pdf(&["Bravo"])).unwrap();

    let (pdf_dir, txt_dir) = (c_path(&input), c_path(&output));
    let status = unsafe { extract_text_from_pdfs_c(pdf_dir.as_ptr(), txt_dir.as_ptr()) };

    assert_eq!(status, PDFTEXT_STATUS_ERROR);
    assert!(last_error().unwrap().contains("a.pdf"));
    assert!(!output.join("a.txt").exists());
    assert!(!output.join("b.txt").exists());
}

#[test]
fn skip_policy_converts_the_rest_but_still_reports_failure() {
    let (_root, input, output) = scratch();
    fs::write(input.join("a.pdf"), b"").unwrap();
    fs::write(input.join("b.pdf"), sample_pdf(&["Bravo"])).unwrap();

    let (pdf_dir, txt_dir) = (c_path(&input), c_path(&output));
    let config = CString::new(r#"{"conversion": {"error_policy": "skip_and_report"}}"#).unwrap();
    let status = unsafe {
        pdftext_convert_with_config(pdf_dir.as_ptr(), txt_dir.as_ptr(), config.as_ptr())
    };

    assert_eq!(status, PDFTEXT_STATUS_ERROR);
    assert_eq!(
        last_error().as_deref(),
        Some("1 of 2 PDF files could not be converted")
    );
    assert!(!output.join("a.txt").exists());
    assert!(output.join("b.txt").exists());
}

#[test]
fn invalid_config_returns_one() {
    let (_root, input, output) = scratch();
    let (pdf_dir, txt_dir) = (c_path(&input), c_path(&output));
    let config = CString::new("{not json").unwrap();

    let status = unsafe {
        pdftext_convert_with_config(pdf_dir.as_ptr(), txt_dir.as_ptr(), config.as_ptr())
    };

    assert_eq!(status, PDFTEXT_STATUS_ERROR);
    assert!(last_error().unwrap().starts_with("configuration error"));
}

#[test]
fn success_clears_previous_error() {
    let (_root, input, output) = scratch();
    let txt_dir = c_path(&output);
    unsafe { extract_text_from_pdfs_c(ptr::null(), txt_dir.as_ptr()) };
    assert!(last_error().is_some());

    let pdf_dir = c_path(&input);
    let status = unsafe { extract_text_from_pdfs_c(pdf_dir.as_ptr(), txt_dir.as_ptr()) };

    assert_eq!(status, PDFTEXT_STATUS_OK);
    assert_eq!(last_error(), None);
}

#[test]
fn version_matches_package() {
    let version = unsafe { CStr::from_ptr(pdftext_version()) };
    assert_eq!(version.to_str().unwrap(), env!("CARGO_PKG_VERSION"));
}

#[cfg(unix)]
#[test]
fn non_utf8_directory_names_are_accepted() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let (root, _input, output) = scratch();
    let input = root.path().join(OsStr::from_bytes(b"pdfs-\xff"));
    fs::create_dir_all(&input).unwrap();
    fs::write(input.join("a.pdf"), sample_pdf(&["Alpha"])).unwrap();

    let pdf_dir = CString::new(input.as_os_str().as_bytes()).unwrap();
    let txt_dir = c_path(&output);
    let status = unsafe { extract_text_from_pdfs_c(pdf_dir.as_ptr(), txt_dir.as_ptr()) };

    assert_eq!(status, PDFTEXT_STATUS_OK);
    assert!(fs::read_to_string(output.join("a.txt")).unwrap().contains("Alpha"));
}
