//! Shared helpers for the pdftext-core integration tests.

use std::fs;
use std::path::{Path, PathBuf};

pub use pdftext_core::fixtures::sample_pdf;

/// Scratch input and output directories.
pub struct Workspace {
    _root: tempfile::TempDir,
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("pdfs");
        let output = root.path().join("txt");
        fs::create_dir_all(&input).unwrap();
        fs::create_dir_all(&output).unwrap();
        Self {
            _root: root,
            input,
            output,
        }
    }

    pub fn write(&self, rel: &str, data: &[u8]) -> PathBuf {
        let path = self.input.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, data).unwrap();
        path
    }

    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.output)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn read_output(&self, name: &str) -> String {
        read(&self.output.join(name))
    }
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
