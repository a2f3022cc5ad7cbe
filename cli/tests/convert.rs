use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};

use snapimg::io::{collect_files, load_selection, write_file};
use snapimg_core::config::{ProcessingConfig, TargetFormat};
use snapimg_core::processor::converter_for;
use snapimg_core::{NoopObserver, Session, SessionState};

fn write_image(path: &Path, format: ImageFormat) {
    let img = RgbaImage::from_pixel(5, 3, Rgba([10, 200, 30, 255]));
    let img = image::DynamicImage::ImageRgba8(img);
    let img = if format == ImageFormat::Jpeg {
        image::DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };
    img.save_with_format(path, format).unwrap();
}

fn session(target: TargetFormat) -> Session {
    let config = ProcessingConfig {
        concurrency: 2,
        ..ProcessingConfig::default()
    };
    Session::new(converter_for(target), config)
}

#[test]
fn directory_converts_into_one_archive() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in");
    fs::create_dir(&input).unwrap();
    write_image(&input.join("a.png"), ImageFormat::Png);
    write_image(&input.join("b.gif"), ImageFormat::Gif);
    write_image(&input.join("c.webp"), ImageFormat::WebP);
    fs::write(input.join("readme.txt"), "not an image").unwrap();

    let paths = collect_files(&[input], false).unwrap();
    assert_eq!(paths.len(), 3);

    let mut session = session(TargetFormat::Jpg);
    assert!(session.accept(load_selection(&paths).unwrap()));
    let outcome = session.process(&NoopObserver).unwrap();
    assert_eq!(outcome.results.len(), 3);

    let download = session.download(&NoopObserver).unwrap();
    let out = dir.path().join("out").join(download.name());
    write_file(&out, download.data()).unwrap();

    assert_eq!(out.file_name().unwrap(), "processed-images.zip");
    let archive = zip::ZipArchive::new(Cursor::new(fs::read(&out).unwrap())).unwrap();
    let mut names: Vec<_> = archive.file_names().map(str::to_string).collect();
    names.sort();
    assert_eq!(
        names,
        ["a_converted.jpg", "b_converted.jpg", "c_converted.jpg"]
    );
}

#[test]
fn explicit_text_file_is_rejected_but_others_convert() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("a.png");
    let txt = dir.path().join("b.txt");
    write_image(&png, ImageFormat::Png);
    fs::write(&txt, "hello").unwrap();

    let paths = collect_files(&[png, txt], false).unwrap();
    let mut session = session(TargetFormat::Png);
    session.accept(load_selection(&paths).unwrap());
    let outcome = session.process(&NoopObserver).unwrap();
    assert_eq!(outcome.unsupported, 1);

    let download = session.download(&NoopObserver).unwrap();
    assert!(!download.is_archive());
    assert_eq!(download.name(), "a_converted.png");
    let decoded = image::load_from_memory_with_format(download.data(), ImageFormat::Png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (5, 3));
}

#[test]
fn excluding_every_convertible_file_leaves_no_results() {
    let dir = tempfile::tempdir().unwrap();
    let jpg = dir.path().join("a.jpg");
    let txt = dir.path().join("b.txt");
    write_image(&jpg, ImageFormat::Jpeg);
    fs::write(&txt, "hello").unwrap();

    let mut session = session(TargetFormat::Webp);
    session.accept(load_selection(&[jpg, txt]).unwrap());
    session.remove(0).unwrap();
    session.process(&NoopObserver).unwrap();
    assert_eq!(session.state(), SessionState::NoResults);
    assert!(session.download(&NoopObserver).is_err());
}
