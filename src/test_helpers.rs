//! Shared test utilities for the bday-post test suite.
//!
//! Provides synthetic image fixtures, sample people, and a ready-to-render
//! [`PostConfig`] rooted in a temp directory. The label font is the one
//! shipped in `assets/` — tests resolve it through `CARGO_MANIFEST_DIR` so
//! they work from any working directory.

use crate::config::PostConfig;
use crate::input::Person;
use ab_glyph::FontVec;
use image::{ImageEncoder, Rgba, RgbaImage, RgbImage};
use std::path::{Path, PathBuf};

/// Path to a file shipped in the repo's `assets/` directory.
pub fn repo_asset(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join(name)
}

/// Load the bundled label font.
pub fn load_repo_font() -> FontVec {
    let data = std::fs::read(repo_asset("DMSans-default.ttf")).unwrap();
    FontVec::try_from_vec(data).unwrap()
}

/// Create a small valid JPEG file with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Create a solid-color RGBA PNG (overlay/sticker fixture).
pub fn create_test_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
    RgbaImage::from_pixel(width, height, Rgba(color))
        .save(path)
        .unwrap();
}

/// A validated person with no date of birth.
pub fn person(name: &str, image_path: &str) -> Person {
    Person {
        name: name.to_string(),
        image_path: PathBuf::from(image_path),
        dob: None,
    }
}

/// `n` people with freshly-written photo files under `dir`.
pub fn sample_people(dir: &Path, n: usize) -> Vec<Person> {
    (0..n)
        .map(|i| {
            let photo = dir.join(format!("person{i}.jpg"));
            create_test_jpeg(&photo, 320, 240);
            person(&format!("Person {i}"), photo.to_str().unwrap())
        })
        .collect()
}

/// A config rendering onto a fresh 600x600 template under `dir`.
///
/// Template fill is the same warm tone as the shipped asset so pixel
/// assertions can tell background from portraits.
pub fn render_config(dir: &Path) -> PostConfig {
    let template = dir.join("template.png");
    RgbaImage::from_pixel(600, 600, Rgba([250, 235, 215, 255]))
        .save(&template)
        .unwrap();
    PostConfig {
        template,
        font: repo_asset("DMSans-default.ttf"),
        output_dir: dir.join("output"),
        ..PostConfig::default()
    }
}

/// Two well-formed records, JSON form.
pub fn sample_records_json() -> &'static str {
    r#"[
  {"name": "Alice Raj", "image_path": "photos/alice.jpg", "dob": "1994-08-06"},
  {"name": "Bo Chen", "image_path": "photos/bo.jpg"}
]"#
}
