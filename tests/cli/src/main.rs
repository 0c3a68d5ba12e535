use std::env;
use std::process::exit;

use mathfont::{FileSource, Font};

// Note that this is more of an experimental CLI used for testing.
fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (Some(path), Some(text)) = (args.get(1), args.get(2)) else {
        eprintln!("usage: cli <font> <text>");
        exit(2);
    };

    let font = match FileSource::open(path).and_then(|source| Font::parse(&source)) {
        Ok(font) => font,
        Err(err) => {
            eprintln!("failed to open {path}: {err}");
            exit(1);
        }
    };

    println!(
        "{} with {} glyphs, {} units per em",
        font.cff().name(),
        font.num_glyphs(),
        font.units_per_em()
    );

    for c in text.chars() {
        let Some(id) = font.glyph_id(c) else {
            println!("{c:?}: not mapped");
            continue;
        };

        match font.glyph(id) {
            Ok(glyph) => {
                println!("{c:?}: glyph {id} {:?} {:?}", glyph.name, font.glyph_metrics(id).ok());
                for command in &glyph.path {
                    println!("  {command:?}");
                }
            }
            Err(err) => println!("{c:?}: glyph {id} failed: {err}"),
        }

        let math = font.math();
        if math.glyph_info.is_extended_shape(id) {
            println!("  extended shape");
        }

        for (direction, table) in
            [("vertical", &math.variants.vertical), ("horizontal", &math.variants.horizontal)]
        {
            match table.construction(id) {
                Ok(Some(construction)) => {
                    println!("  {direction} variants: {:?}", construction.variants);
                    if let Some(assembly) = &construction.assembly {
                        println!("  {direction} assembly: {:?}", assembly.parts);
                    }
                }
                Ok(None) => {}
                Err(err) => println!("  {direction} construction failed: {err}"),
            }
        }
    }
}
