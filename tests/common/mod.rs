//! Small PDF fixtures written with lopdf
#![allow(dead_code)]

use anyhow::Result;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::path::Path;

/// A bookmark pointing at a 1-based page, with nested children
pub struct Bookmark {
    pub title: &'static str,
    pub page: usize,
    pub children: Vec<Bookmark>,
}

pub fn bookmark(title: &'static str, page: usize) -> Bookmark {
    Bookmark {
        title,
        page,
        children: Vec::new(),
    }
}

impl Bookmark {
    pub fn with_children(mut self, children: Vec<Bookmark>) -> Self {
        self.children = children;
        self
    }
}

/// Write a PDF with one text line per entry of each page, plus an optional outline tree
pub fn write_pdf(path: &Path, pages: &[&[&str]], bookmarks: &[Bookmark]) -> Result<()> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (idx, line) in lines.iter().enumerate() {
            let y = 740 - 28 * idx as i64;
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![72.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };

    if !bookmarks.is_empty() {
        let outlines_id = doc.new_object_id();
        let (first, last, count) = add_bookmarks(&mut doc, outlines_id, bookmarks, &page_ids);
        doc.objects.insert(
            outlines_id,
            Object::Dictionary(dictionary! {
                "Type" => "Outlines",
                "First" => first,
                "Last" => last,
                "Count" => count,
            }),
        );
        catalog.set("Outlines", outlines_id);
    }

    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);
    doc.save(path)?;
    Ok(())
}

fn add_bookmarks(
    doc: &mut Document,
    parent: ObjectId,
    items: &[Bookmark],
    page_ids: &[ObjectId],
) -> (ObjectId, ObjectId, i64) {
    let ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();
    let mut count = items.len() as i64;

    for (idx, item) in items.iter().enumerate() {
        let mut node: Dictionary = dictionary! {
            "Title" => Object::string_literal(item.title),
            "Parent" => parent,
            "Dest" => vec![
                Object::Reference(page_ids[item.page - 1]),
                Object::Name(b"Fit".to_vec()),
            ],
        };
        if idx > 0 {
            node.set("Prev", ids[idx - 1]);
        }
        if idx + 1 < ids.len() {
            node.set("Next", ids[idx + 1]);
        }
        if !item.children.is_empty() {
            let (first, last, child_count) =
                add_bookmarks(doc, ids[idx], &item.children, page_ids);
            node.set("First", first);
            node.set("Last", last);
            node.set("Count", child_count);
            count += child_count;
        }
        doc.objects.insert(ids[idx], Object::Dictionary(node));
    }

    (ids[0], ids[ids.len() - 1], count)
}

/// Two-page travel guide with a nested outline tree
pub fn write_guide(path: &Path) -> Result<()> {
    write_pdf(
        path,
        &[
            &[
                "Comprehensive Guide to Nice",
                "NICE OLD TOWN",
                "The old town has narrow lanes and markets.",
            ],
            &["2.1 Coastal Walks", "The promenade runs along the bay."],
        ],
        &[
            bookmark("Old Town Nice", 1).with_children(vec![bookmark("Castle Hill", 2)]),
            bookmark("2.1 Coastal Walks", 2),
        ],
    )
}

/// One-page recipe sheet without bookmarks
pub fn write_cuisine(path: &Path) -> Result<()> {
    write_pdf(
        path,
        &[&["Flavours of Provence", "Bouillabaisse is a fish stew."]],
        &[],
    )
}
