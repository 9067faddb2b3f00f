use std::fs;
use std::path::Path;

use assert_cmd::Command;
use image::{GrayImage, Luma, imageops};
use predicates::prelude::*;
use tagtrack_rs::{MarkerDictionary, render_marker};

fn marker_scene() -> GrayImage {
    let marker = render_marker(MarkerDictionary::AprilTag36h11.dictionary(), 5, 10, 1).unwrap();
    let mut canvas = GrayImage::from_pixel(240, 200, Luma([255]));
    imageops::replace(&mut canvas, &marker, 40, 30);
    canvas
}

fn ppm_bytes(frame: &GrayImage) -> Vec<u8> {
    let mut out = format!("P6\n{} {}\n255\n", frame.width(), frame.height()).into_bytes();
    out.extend(frame.pixels().flat_map(|p| [p.0[0]; 3]));
    out
}

fn tagtrack() -> Command {
    let mut cmd = Command::cargo_bin("tagtrack").unwrap();
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn write_config(dir: &Path, json: &str) -> std::path::PathBuf {
    let path = dir.join("config.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn writes_annotated_frames_and_report() {
    let work = tempfile::tempdir().unwrap();
    let frames = work.path().join("frames");
    fs::create_dir(&frames).unwrap();
    for i in 0..3 {
        marker_scene().save(frames.join(format!("{i:02}.png"))).unwrap();
    }
    let config = write_config(work.path(), r#"{"resize_width": null, "max_frames": 2}"#);
    let out = work.path().join("out");
    let report = work.path().join("report.jsonl");

    tagtrack()
        .arg("--video")
        .arg(&frames)
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(&out)
        .arg("--report")
        .arg(&report)
        .assert()
        .success();

    assert!(out.join("frame_000001.png").is_file());
    assert!(out.join("frame_000002.png").is_file());
    assert!(!out.join("frame_000003.png").exists());

    // Without --font the bundled font still draws the status labels.
    let frame = image::open(out.join("frame_000001.png")).unwrap().to_rgb8();
    let (w, h) = frame.dimensions();
    assert!((h - 45..h).any(|y| (0..w / 2).any(|x| {
        let [r, g, b] = frame.get_pixel(x, y).0;
        r > 250 && g < 128 && g == b
    })));

    let report = fs::read_to_string(&report).unwrap();
    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains(r#""state":"detected""#));
    assert!(lines[0].contains(r#""id":5"#));
}

#[test]
fn streams_stdin_frames_to_stdout() {
    let mut input = ppm_bytes(&marker_scene());
    input.extend(ppm_bytes(&GrayImage::from_pixel(240, 200, Luma([200]))));

    tagtrack()
        .args(["--tracker", "kalman", "--reinit", "once"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::function(|out: &[u8]| {
            out.starts_with(b"P6\n750 625\n255\n")
        }));
}

#[test]
fn no_display_discards_frames() {
    tagtrack()
        .arg("--no-display")
        .write_stdin(ppm_bytes(&marker_scene()))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_video_fails() {
    tagtrack()
        .args(["--video", "/no/such/video.ppm", "--no-display"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NotFound"));
}

#[test]
fn unknown_tracker_is_rejected() {
    tagtrack()
        .args(["--tracker", "mosse"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tracker kind"));
}

#[test]
fn invalid_config_fails() {
    let work = tempfile::tempdir().unwrap();
    let config = write_config(work.path(), r#"{"resize_width": 0}"#);
    tagtrack()
        .arg("--config")
        .arg(&config)
        .arg("--no-display")
        .write_stdin(Vec::new())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid"));
}
