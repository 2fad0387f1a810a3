//! End-to-end conversion tests against real PDF documents.

mod common;

use common::{Workspace, sample_pdf};
use pdftext_core::{
    ConvertError, Converter, ErrorKind, ErrorPolicy, ExtractionError, FailureStage,
    PageExtractor, PdfExtractor, convert_all, pdf::merge_pages,
};
use pretty_assertions::assert_eq;

#[test]
fn non_pdf_files_produce_no_output() {
    let ws = Workspace::new();
    ws.write("notes.txt", b"plain text");
    ws.write("scan.PDF", b"upper-case extension is not selected");
    ws.write("deep/readme.md", b"# readme");

    let report = convert_all(&ws.input, &ws.output).unwrap();

    assert_eq!(report.total(), 0);
    assert!(report.is_success());
    assert!(ws.output_names().is_empty());
}

#[test]
fn output_is_concatenation_of_page_text() {
    let ws = Workspace::new();
    let data = sample_pdf(&["First page", "Second page", "Third page"]);
    ws.write("doc.pdf", &data);

    let pages = PdfExtractor::new().extract_pages(&data).unwrap();
    let report = convert_all(&ws.input, &ws.output).unwrap();

    assert_eq!(report.converted.len(), 1);
    assert_eq!(report.converted[0].pages, 3);

    let text = ws.read_output("doc.txt");
    assert_eq!(text, merge_pages(&pages));
    let first = text.find("First page").unwrap();
    let second = text.find("Second page").unwrap();
    let third = text.find("Third page").unwrap();
    assert!(first < second && second < third);
}

#[test]
fn nested_inputs_are_written_flat() {
    let ws = Workspace::new();
    ws.write("a.pdf", &sample_pdf(&["A"]));
    ws.write("b/c.pdf", &sample_pdf(&["C"]));
    ws.write("b/d/e.pdf", &sample_pdf(&["E"]));

    let report = convert_all(&ws.input, &ws.output).unwrap();

    assert_eq!(report.converted.len(), 3);
    assert_eq!(ws.output_names(), vec!["a.txt", "c.txt", "e.txt"]);
}

#[test]
fn second_run_overwrites_with_identical_content() {
    let ws = Workspace::new();
    ws.write("a.pdf", &sample_pdf(&["Hello", "World"]));
    ws.write("sub/b.pdf", &sample_pdf(&["Other"]));

    convert_all(&ws.input, &ws.output).unwrap();
    let first = (ws.read_output("a.txt"), ws.read_output("b.txt"));

    convert_all(&ws.input, &ws.output).unwrap();
    let second = (ws.read_output("a.txt"), ws.read_output("b.txt"));

    assert_eq!(first, second);
}

#[test]
fn stale_output_is_truncated() {
    let ws = Workspace::new();
    ws.write("a.pdf", &sample_pdf(&["Short"]));
    std::fs::write(ws.output.join("a.txt"), "x".repeat(10_000)).unwrap();

    convert_all(&ws.input, &ws.output).unwrap();

    let text = ws.read_output("a.txt");
    assert!(text.contains("Short"));
    assert!(!text.contains("xxxx"));
}

#[test]
fn zero_byte_pdf_fails_fast() {
    let ws = Workspace::new();
    ws.write("a.pdf", &sample_pdf(&["A"]));
    ws.write("b.pdf", b"");
    ws.write("c.pdf", &sample_pdf(&["C"]));

    let err = convert_all(&ws.input, &ws.output).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Extraction);
    match err {
        ConvertError::Extraction { path, source } => {
            assert_eq!(path, ws.input.join("b.pdf"));
            assert!(matches!(source, ExtractionError::Parse(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(ws.output_names(), vec!["a.txt"]);
}

#[test]
fn non_pdf_content_is_skipped_and_reported() {
    let ws = Workspace::new();
    ws.write("a.pdf", &sample_pdf(&["A"]));
    ws.write("fake.pdf", b"not really a pdf");
    ws.write("z.pdf", &sample_pdf(&["Z"]));

    let report = Converter::new()
        .with_error_policy(ErrorPolicy::SkipAndReport)
        .convert_all(&ws.input, &ws.output)
        .unwrap();

    assert_eq!(report.converted.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].source, ws.input.join("fake.pdf"));
    assert_eq!(report.failed[0].stage, FailureStage::Extract);
    assert_eq!(ws.output_names(), vec!["a.txt", "z.txt"]);
}

#[test]
fn same_name_in_different_directories_last_one_wins() {
    let ws = Workspace::new();
    ws.write("first/x.pdf", &sample_pdf(&["From first"]));
    ws.write("second/x.pdf", &sample_pdf(&["From second"]));

    let report = convert_all(&ws.input, &ws.output).unwrap();

    assert_eq!(report.converted.len(), 2);
    assert_eq!(report.converted[0].output, report.converted[1].output);
    assert_eq!(ws.output_names(), vec!["x.txt"]);

    let text = ws.read_output("x.txt");
    assert!(text.contains("From second"));
    assert!(!text.contains("From first"));
}

#[test]
fn missing_input_dir_is_io_error() {
    let ws = Workspace::new();
    let err = convert_all(&ws.input.join("missing"), &ws.output).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(matches!(err, ConvertError::Discovery { .. }));
}

#[test]
fn empty_batch_succeeds_without_output_dir() {
    let ws = Workspace::new();
    let report = convert_all(&ws.input, &ws.output.join("never-created")).unwrap();

    assert_eq!(report.total(), 0);
    assert!(!ws.output.join("never-created").exists());
}
