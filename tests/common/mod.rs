//! In-memory PDF fixtures built with lopdf.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text drawn at a given size.
pub struct Line {
    pub text: String,
    pub size: f32,
    pub font: &'static str,
}

pub fn line(text: &str, size: f32) -> Line {
    Line {
        text: text.to_string(),
        size,
        font: "F1",
    }
}

pub fn bold(text: &str, size: f32) -> Line {
    Line {
        text: text.to_string(),
        size,
        font: "F2",
    }
}

/// Build a PDF whose pages hold the given lines, top to bottom.
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        let mut y = 760.0_f32;
        for l in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(l.font.as_bytes().to_vec()), Object::Real(l.size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Real(72.0), Object::Real(y)],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(l.text.as_str())],
            ));
            operations.push(Operation::new("ET", vec![]));
            y -= l.size * 2.0;
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
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
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("save pdf");
    buf
}

/// The four-size sample document used across tests.
pub fn sample_pdf() -> Vec<u8> {
    build_pdf(&[
        vec![bold("Doc Title", 24.0), bold("Introduction", 18.0)],
        vec![line("Background.", 14.0)],
        vec![line("Page 3", 10.0)],
    ])
}

/// Write `data` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).expect("write fixture");
    path
}
