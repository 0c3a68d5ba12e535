use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use mathfont::{Font, Tag};
use rand::seq::IteratorRandom;
use rand::thread_rng;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use ttf_parser::GlyphId;

// Note that this is not really meant as an example for how to use this crate, but
// rather just so that we can conveniently compare it against ttf-parser.

const SAMPLE_SIZE: usize = 500;

fn main() {
    let exclude_fonts = [
        // Has `seac` operator.
        "waltograph42.otf",
    ];

    let paths = walkdir::WalkDir::new(std::env::var("FONTS_DIR").unwrap())
        .into_iter()
        .map(|p| p.unwrap().path().to_path_buf())
        .filter(|p| {
            p.extension().and_then(OsStr::to_str) == Some("otf")
                && !exclude_fonts.contains(&p.file_name().unwrap().to_str().unwrap())
        })
        .collect::<Vec<_>>();

    println!("Checking {} fonts...", paths.len());

    paths.par_iter().for_each(|path| match run_test(path) {
        Ok(0) => {}
        Ok(checked) => println!("{path:?}: {checked} glyphs agree"),
        Err(msg) => println!("Error while checking {path:?}: {msg}"),
    });
}

/// Decode a random sample of glyphs of a math font from several threads at
/// once and compare their bounding boxes with ttf-parser's.
fn run_test(path: &Path) -> Result<usize, String> {
    let data = fs::read(path).map_err(|_| "failed to read file".to_string())?;
    let face = ttf_parser::Face::parse(&data, 0)
        .map_err(|_| "failed to parse face with ttf-parser".to_string())?;

    if face.raw_face().table(ttf_parser::Tag::from_bytes(&Tag::MATH.0)).is_none() {
        return Ok(0);
    }

    let font = Font::parse(&data).map_err(|err| format!("failed to parse font: {err}"))?;
    if font.num_glyphs() != face.number_of_glyphs() {
        return Err("glyph counts differ".into());
    }

    let sample = (0..font.num_glyphs()).choose_multiple(&mut thread_rng(), SAMPLE_SIZE);
    sample.par_iter().try_for_each(|&id| {
        let metrics = font
            .glyph_metrics(id)
            .map_err(|err| format!("failed to decode glyph {id}: {err}"))?;

        let Some(bbox) = face.glyph_bounding_box(GlyphId(id)) else {
            return Ok(());
        };

        let ours = [
            metrics.bearing_x,
            metrics.bearing_y - metrics.height,
            metrics.bearing_x + metrics.width,
            metrics.bearing_y,
        ]
        .map(|v| v.round() as i16);
        let theirs = [bbox.x_min, bbox.y_min, bbox.x_max, bbox.y_max];

        if ours != theirs {
            return Err(format!("bounding box of glyph {id} is {ours:?}, expected {theirs:?}"));
        }

        Ok(())
    })?;

    Ok(sample.len())
}
