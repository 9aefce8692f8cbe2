//! Advance widths for the standard PDF faces.
//!
//! Widths are in thousandths of an em, indexed by `char - 32` for printable
//! ASCII. Oblique faces share their upright widths; Times italics are measured
//! with the upright tables, which differ by a few units per glyph.

use quire_style::{FontChoice, FontFace};

const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // :;<=>?@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A-M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N-Z
    278, 278, 278, 469, 556, 333, // [\]^_`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a-m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n-z
    334, 260, 334, 584, // {|}~
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

const TIMES_ROMAN: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

const TIMES_BOLD: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

const COURIER_WIDTH: u16 = 600;

fn table_for(face: FontFace) -> Option<&'static [u16; 95]> {
    match face {
        FontFace::Helvetica | FontFace::HelveticaOblique => Some(&HELVETICA),
        FontFace::HelveticaBold | FontFace::HelveticaBoldOblique => Some(&HELVETICA_BOLD),
        FontFace::TimesRoman | FontFace::TimesItalic => Some(&TIMES_ROMAN),
        FontFace::TimesBold | FontFace::TimesBoldItalic => Some(&TIMES_BOLD),
        _ => None,
    }
}

/// Width of a character outside printable ASCII that WinAnsi can still encode.
fn extended_width(c: char, face: FontFace) -> u16 {
    let sans = face.family() == FontChoice::Sans;
    match c {
        '\u{2022}' => 350,
        '\u{2013}' => if sans { 556 } else { 500 },
        '\u{2014}' | '\u{2026}' => 1000,
        '\u{2018}' | '\u{2019}' => if sans { 222 } else { 333 },
        '\u{201C}' | '\u{201D}' => if sans { 333 } else { 444 },
        '\u{00A0}' => if sans { 278 } else { 250 },
        _ => if sans { 556 } else { 500 },
    }
}

/// Advance width of `c` in thousandths of an em.
pub fn char_width(c: char, face: FontFace) -> u16 {
    if face.family() == FontChoice::Monospace {
        return COURIER_WIDTH;
    }
    let Some(table) = table_for(face) else {
        return COURIER_WIDTH;
    };
    match c {
        ' '..='~' => table[(c as usize) - 32],
        '\t' => table[0] * 4,
        _ => extended_width(c, face),
    }
}

/// Rendered width of `text` in points.
pub fn text_width(text: &str, face: FontFace, font_size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, face))).sum();
    units as f32 * font_size / 1000.0
}
