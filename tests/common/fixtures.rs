#![allow(dead_code)]

use image::{ImageBuffer, ImageFormat, Rgb};
use std::io::Cursor;

/// A document of `count` numbered paragraphs, each long enough to wrap.
pub fn numbered_paragraphs(count: usize) -> String {
    (1..=count)
        .map(|i| {
            format!(
                "Paragraph {} carries enough words to wrap across more than one line of the \
                 text column so that pages fill up at a realistic rate.",
                i
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Front-matter block declaring a title, followed by `body`.
pub fn with_front_matter(title: &str, body: &str) -> String {
    format!("---\ntitle: \"{}\"\n---\n{}", title, body)
}

/// A level-2 references heading followed by a bullet list of `entries`.
pub fn references_section(heading: &str, entries: &[&str]) -> String {
    let mut out = format!("## {}\n", heading);
    for entry in entries {
        out.push_str(&format!("- {}\n", entry));
    }
    out
}

/// A pipe table with a header row and body rows.
pub fn pipe_table(header: &[&str], rows: &[&[&str]]) -> String {
    let mut out = format!("| {} |\n", header.join(" | "));
    out.push_str(&format!("|{}|\n", vec!["---"; header.len()].join("|")));
    for row in rows {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out
}

/// PNG bytes of a solid `width` x `height` image.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(width, height, Rgb([200, 40, 40]));
    let mut bytes = Cursor::new(Vec::new());
    buffer
        .write_to(&mut bytes, ImageFormat::Png)
        .expect("encode test png");
    bytes.into_inner()
}
