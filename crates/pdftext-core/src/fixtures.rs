//! In-memory PDF documents for tests.

use lopdf::content::{Content, Operation};
use lopdf::encryption::{decrypt_object, get_encryption_key};
use lopdf::{Document, Object, Stream, dictionary};

use crate::error::ExtractionError;
use crate::pdf::{PageExtractor, PageText};

const FILE_ID: &[u8] = b"pdftext-fixture!";

/// Build a PDF with one page per entry, each page showing its string in Courier.
/// An empty string produces a blank page.
pub fn sample_pdf(pages: &[&str]) -> Vec<u8> {
    save(&mut sample_document(pages))
}

/// Same pages as [`sample_pdf`], RC4-encrypted with an empty user password.
pub fn encrypted_sample_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = sample_document(pages);

    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 4,
        "R" => 4,
        "Length" => 128,
        "O" => Object::string_literal(vec![0x4f_u8; 32]),
        "P" => -4_i64,
        "CF" => dictionary! {
            "StdCF" => dictionary! {
                "CFM" => "V2",
                "Length" => 16,
                "AuthEvent" => "DocOpen",
            },
        },
        "StmF" => "StdCF",
        "StrF" => "StdCF",
    });
    doc.trailer.set("Encrypt", encrypt_id);
    doc.trailer.set(
        "ID",
        vec![Object::string_literal(FILE_ID), Object::string_literal(FILE_ID)],
    );

    // RC4 is symmetric, so running the decryption over plain content encrypts it.
    let key = get_encryption_key(&doc, "", false).expect("encryption key derives");
    for (&id, object) in doc.objects.iter_mut() {
        if !matches!(object, Object::Stream(_)) {
            continue;
        }
        let encrypted = decrypt_object(&key, id, &*object, false).expect("stream encrypts");
        if let Object::Stream(stream) = object {
            stream.set_content(encrypted);
        }
    }

    save(&mut doc)
}

fn save(doc: &mut Document) -> Vec<u8> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).expect("document serializes");
    buffer
}

fn sample_document(pages: &[&str]) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for text in pages {
        let operations = if text.is_empty() {
            Vec::new()
        } else {
            vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ]
        };
        let content = Content { operations };
        let encoded = content.encode().expect("content stream encodes");
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

/// Extractor that treats the file bytes as UTF-8 page texts separated by `|`.
///
/// Content starting with `!` fails with [`ExtractionError::Parse`], as does empty content.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedExtractor;

impl PageExtractor for ScriptedExtractor {
    fn extract_pages(&self, data: &[u8]) -> crate::pdf::Result<Vec<PageText>> {
        let content = std::str::from_utf8(data)
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;
        if content.is_empty() {
            return Err(ExtractionError::Parse("empty document".to_string()));
        }
        if let Some(reason) = content.strip_prefix('!') {
            return Err(ExtractionError::Parse(reason.to_string()));
        }

        Ok(content
            .split('|')
            .enumerate()
            .map(|(i, text)| PageText::new(i as u32 + 1, text))
            .collect())
    }
}
