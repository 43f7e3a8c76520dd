//! Post rendering and output writing.
//!
//! Takes validated people and a [`PostConfig`], chunks them into per-post
//! batches, and renders each batch onto a fresh copy of the template:
//!
//! ```text
//! check photos → (per batch) open template → overlays → layout
//!              → circular portraits + rings + labels → Post<N>.jpg
//! ```
//!
//! Posts are written to `output_dir` as `Post1.jpg`, `Post2.jpg`, … in
//! batch order and overwritten on every run. Errors propagate immediately;
//! there is no retry and no partial-batch completion.

use crate::compose;
use crate::config::PostConfig;
use crate::input::{self, InputError, Person};
use crate::layout::compute_layout;
use ab_glyph::FontVec;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Input error: {0}")]
    Input(#[from] InputError),
    #[error("invalid font file: {0}")]
    InvalidFont(PathBuf),
}

/// Render all posts for `people` and return the written paths in order.
///
/// Photo paths are verified up front, so a missing file fails the run
/// before any template is opened or any post written.
pub fn render_posts(people: &[Person], config: &PostConfig) -> Result<Vec<PathBuf>, RenderError> {
    input::check_photos(people)?;

    fs::create_dir_all(&config.output_dir)?;

    let font_data = fs::read(&config.font)?;
    let font = FontVec::try_from_vec(font_data)
        .map_err(|_| RenderError::InvalidFont(config.font.clone()))?;

    let template = image::open(&config.template)?;

    let stickers: Vec<DynamicImage> = config
        .overlays
        .iter()
        .map(|overlay| image::open(&overlay.path))
        .collect::<Result<_, _>>()?;

    let mut written = Vec::new();
    for (batch_index, batch) in input::chunk_people(people, config.layout.max_per_row)
        .iter()
        .enumerate()
    {
        let mut canvas = template.to_rgba8();

        for (sticker, overlay) in stickers.iter().zip(&config.overlays) {
            compose::place_overlay(&mut canvas, sticker, overlay.position, overlay.size);
        }

        let cells = compute_layout(batch.len(), canvas.dimensions(), &config.layout);
        for (person, cell) in batch.iter().zip(&cells) {
            let photo = image::open(&person.image_path)?;
            let portrait = compose::circular_portrait(&photo, config.layout.mask_size);
            compose::paste_portrait(&mut canvas, &portrait, cell);
            compose::draw_ring(&mut canvas, cell, config.layout.mask_size, &config.border);
            compose::draw_label(&mut canvas, &font, config.layout.mask_size, cell, &person.name);
        }

        let path = config.output_dir.join(format!("Post{}.jpg", batch_index + 1));
        save_jpeg(canvas, &path, config.jpeg.quality)?;
        info!(post = %path.display(), people = batch.len(), "wrote post");
        written.push(path);
    }

    Ok(written)
}

/// Flatten to RGB (posts are opaque) and encode as JPEG.
fn save_jpeg(canvas: RgbaImage, path: &Path, quality: u8) -> Result<(), RenderError> {
    let rgb = DynamicImage::ImageRgba8(canvas).to_rgb8();
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(writer, quality);
    rgb.write_with_encoder(encoder)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OverlayConfig;
    use crate::test_helpers::{
        create_test_jpeg, create_test_png, person, render_config, sample_people,
    };

    #[test]
    fn two_people_yield_one_post() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = render_config(tmp.path());
        let people = sample_people(tmp.path(), 2);

        let paths = render_posts(&people, &config).unwrap();

        assert_eq!(paths, vec![config.output_dir.join("Post1.jpg")]);
        let post = image::open(&paths[0]).unwrap();
        // Post dimensions match the template
        assert_eq!(post.width(), 600);
        assert_eq!(post.height(), 600);
    }

    #[test]
    fn seven_people_yield_two_posts() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = render_config(tmp.path());
        let people = sample_people(tmp.path(), 7);

        let paths = render_posts(&people, &config).unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("Post1.jpg"));
        assert!(paths[1].ends_with("Post2.jpg"));
        for path in &paths {
            assert!(image::open(path).is_ok());
        }
    }

    #[test]
    fn post_count_is_ceiling_of_people_over_cap() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = render_config(tmp.path());
        let people = sample_people(tmp.path(), 11);

        let paths = render_posts(&people, &config).unwrap();
        assert_eq!(paths.len(), 3);
    }

    #[test]
    fn rerender_overwrites_in_place() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = render_config(tmp.path());
        let people = sample_people(tmp.path(), 2);

        let first = render_posts(&people, &config).unwrap();
        let second = render_posts(&people, &config).unwrap();

        assert_eq!(first, second);
        assert!(first[0].exists());
        // Still exactly one post on disk
        let jpgs = fs::read_dir(&config.output_dir).unwrap().count();
        assert_eq!(jpgs, 1);
    }

    #[test]
    fn empty_people_write_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = render_config(tmp.path());

        let paths = render_posts(&[], &config).unwrap();
        assert!(paths.is_empty());
    }

    #[test]
    fn missing_photo_fails_before_any_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = render_config(tmp.path());
        let mut people = sample_people(tmp.path(), 2);
        people.push(person("Ghost", "/nonexistent/ghost.jpg"));

        let err = render_posts(&people, &config).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Input(InputError::MissingPhotos(_))
        ));
        // Nothing was written — the output dir was never even created
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn missing_template_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = render_config(tmp.path());
        config.template = tmp.path().join("no-such-template.png");
        let people = sample_people(tmp.path(), 1);

        assert!(matches!(
            render_posts(&people, &config),
            Err(RenderError::Image(_))
        ));
    }

    #[test]
    fn garbage_font_file_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = render_config(tmp.path());
        let bad_font = tmp.path().join("bad.ttf");
        fs::write(&bad_font, b"not a font").unwrap();
        config.font = bad_font.clone();
        let people = sample_people(tmp.path(), 1);

        assert!(matches!(
            render_posts(&people, &config),
            Err(RenderError::InvalidFont(path)) if path == bad_font
        ));
    }

    #[test]
    fn overlays_are_composited_onto_posts() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = render_config(tmp.path());
        let sticker = tmp.path().join("sticker.png");
        create_test_png(&sticker, 40, 40, [0, 255, 0, 255]);
        config.overlays = vec![OverlayConfig {
            path: sticker,
            position: [10, 10],
            size: [60, 60],
        }];
        let people = sample_people(tmp.path(), 1);

        let paths = render_posts(&people, &config).unwrap();
        let post = image::open(&paths[0]).unwrap().to_rgb8();
        // Inside the sticker footprint: green (JPEG-lossy, so approximate)
        let pixel = post.get_pixel(40, 40);
        assert!(pixel[1] > 180, "expected green sticker, got {pixel:?}");
    }

    #[test]
    fn missing_overlay_file_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut config = render_config(tmp.path());
        config.overlays = vec![OverlayConfig {
            path: tmp.path().join("no-sticker.png"),
            position: [0, 0],
            size: [10, 10],
        }];
        let people = sample_people(tmp.path(), 1);

        assert!(render_posts(&people, &config).is_err());
    }

    #[test]
    fn undecodable_photo_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = render_config(tmp.path());
        let fake = tmp.path().join("fake.jpg");
        fs::write(&fake, b"definitely not a jpeg").unwrap();
        let people = vec![person("Fake", fake.to_str().unwrap())];

        assert!(matches!(
            render_posts(&people, &config),
            Err(RenderError::Image(_))
        ));
    }

    #[test]
    fn portraits_land_inside_the_template() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = render_config(tmp.path());
        let photo = tmp.path().join("solid.jpg");
        create_test_jpeg(&photo, 300, 300);
        let people = vec![person("Solo", photo.to_str().unwrap())];

        let paths = render_posts(&people, &config).unwrap();
        let post = image::open(&paths[0]).unwrap().to_rgb8();

        // Single cell on a 600x600 canvas: x = 225, y = 325 (+100 bias),
        // portrait center at (300, 400) — must differ from the template fill
        let center = post.get_pixel(300, 400);
        assert_ne!(
            (center[0], center[1], center[2]),
            (250, 235, 215),
            "portrait center still shows template background"
        );
    }
}
