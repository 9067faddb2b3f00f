use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;

use image::{GrayImage, Luma, imageops};
use tagtrack_rs::{
    AprilTagDetector, DirectorySink, DisplayError, Frame, FrameLoop, FrameReporter, FrameSink,
    FrameSource, Handoff, ImageSequence, LoopOptions, MarkerDictionary, NullSink, PipelineError,
    ReinitPolicy, SinkEvent, Termination, TrackerSettings, VideoError, VideoSource,
    render_marker,
};

const NATIVE: LoopOptions = LoopOptions {
    resize_width: None,
    max_frames: None,
};

fn marker_scene(id: u32) -> GrayImage {
    let marker = render_marker(MarkerDictionary::AprilTag36h11.dictionary(), id, 10, 1).unwrap();
    let mut canvas = GrayImage::from_pixel(240, 200, Luma([255]));
    imageops::replace(&mut canvas, &marker, 30, 40);
    canvas
}

fn blank_scene() -> GrayImage {
    GrayImage::from_pixel(240, 200, Luma([200]))
}

fn write_frames(dir: &Path, frames: &[GrayImage]) {
    for (i, frame) in frames.iter().enumerate() {
        frame.save(dir.join(format!("{i:03}.png"))).unwrap();
    }
}

fn detector() -> AprilTagDetector {
    AprilTagDetector::with_default_params(MarkerDictionary::AprilTag36h11)
}

fn handoff() -> Handoff<TrackerSettings> {
    Handoff::new(TrackerSettings::default(), ReinitPolicy::EveryFrame)
}

#[test]
fn test_image_directory_end_to_end() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    write_frames(input.path(), &[marker_scene(7), blank_scene(), blank_scene()]);
    let report_path = output.path().join("report.jsonl");

    let mut frame_loop = FrameLoop::new(
        ImageSequence::from_dir(input.path()).unwrap(),
        detector(),
        handoff(),
        DirectorySink::new(output.path().join("frames")).unwrap(),
    )
    .with_options(NATIVE)
    .with_report(FrameReporter::create(&report_path).unwrap());

    let summary = frame_loop.run().unwrap();
    assert_eq!(summary.frames, 3);
    assert_eq!(summary.detected_frames, 1);
    assert_eq!(summary.termination, Termination::EndOfStream);
    assert_eq!(frame_loop.source().remaining(), 0);
    assert_eq!(frame_loop.sink().written(), 3);

    let annotated = image::open(output.path().join("frames/frame_000001.png"))
        .unwrap()
        .to_rgb8();
    assert!(annotated.pixels().any(|p| p.0 == [0, 0, 255]));

    // Status labels are drawn in red at the bottom-left of every frame.
    let tracked = image::open(output.path().join("frames/frame_000002.png"))
        .unwrap()
        .to_rgb8();
    let (w, h) = tracked.dimensions();
    let red_text = |y0: u32| {
        (y0..h).any(|y| {
            (0..w / 2).any(|x| {
                let [r, g, b] = tracked.get_pixel(x, y).0;
                r > g.saturating_add(40) && g == b
            })
        })
    };
    assert!(red_text(h - 60));
    assert!((0..h - 65).all(|y| (0..w).all(|x| tracked.get_pixel(x, y).0 == [200, 200, 200])));

    let lines: Vec<serde_json::Value> = BufReader::new(fs::File::open(&report_path).unwrap())
        .lines()
        .map(|l| serde_json::from_str(&l.unwrap()).unwrap())
        .collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["frame"], 1);
    assert_eq!(lines[0]["state"], "detected");
    assert_eq!(lines[0]["markers"][0]["id"], 7);
    assert_eq!(lines[0]["labels"][0], "Detector: DICT_APRILTAG_36h11");
    assert_eq!(lines[0]["boxes"].as_array().unwrap().len(), 1);
    assert_eq!(lines[1]["state"], "tracking_init");
    assert_eq!(lines[1]["source"], "tracker");
    // A featureless frame cannot seed a tracker.
    assert_eq!(lines[1]["boxes"].as_array().unwrap().len(), 0);
    assert_eq!(lines[2]["state"], "tracking");
    assert_eq!(lines[2]["labels"][0], "Tracker: kcf");
    assert_eq!(lines[2]["labels"][1], "Tracking: No");
}

#[test]
fn test_exhausted_ppm_file_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clip.ppm");
    let mut bytes = Vec::new();
    for scene in [marker_scene(3), blank_scene()] {
        let rgb = Frame::from_gray(&scene).into_image();
        bytes.extend(format!("P6\n{} {}\n255\n", rgb.width(), rgb.height()).into_bytes());
        bytes.extend_from_slice(rgb.as_raw());
    }
    fs::write(&path, bytes).unwrap();

    let source = VideoSource::open(Some(path.as_path())).unwrap();
    assert_eq!(source.kind(), "PPM stream");
    let mut frame_loop = FrameLoop::new(source, detector(), handoff(), NullSink).with_options(NATIVE);
    let summary = frame_loop.run().unwrap();
    assert_eq!(summary.frames, 2);
    assert_eq!(summary.detected_frames, 1);
    assert_eq!(summary.termination, Termination::EndOfStream);
    match frame_loop.source() {
        VideoSource::PpmFile(stream) => {
            assert!(stream.is_released());
            assert_eq!(stream.frames_read(), 2);
        }
        _ => panic!("expected a PPM stream"),
    }
}

/// Asks to quit after a fixed number of frames.
struct QuitAfter {
    limit: u64,
    seen: u64,
}

impl FrameSink for QuitAfter {
    fn present(&mut self, _frame: &Frame, index: u64) -> Result<SinkEvent, DisplayError> {
        self.seen = index;
        Ok(if index >= self.limit {
            SinkEvent::Quit
        } else {
            SinkEvent::Continue
        })
    }
}

#[test]
fn test_quit_and_frame_limit() {
    let input = tempfile::tempdir().unwrap();
    write_frames(input.path(), &vec![blank_scene(); 5]);

    let mut frame_loop = FrameLoop::new(
        ImageSequence::from_dir(input.path()).unwrap(),
        detector(),
        handoff(),
        QuitAfter { limit: 2, seen: 0 },
    )
    .with_options(NATIVE);
    let summary = frame_loop.run().unwrap();
    assert_eq!(summary.frames, 2);
    assert_eq!(summary.termination, Termination::Quit);
    assert_eq!(frame_loop.sink().seen, 2);
    assert_eq!(frame_loop.source().remaining(), 0);

    let mut frame_loop = FrameLoop::new(
        ImageSequence::from_dir(input.path()).unwrap(),
        detector(),
        handoff(),
        NullSink,
    )
    .with_options(LoopOptions {
        resize_width: Some(120),
        max_frames: Some(3),
    });
    let summary = frame_loop.run().unwrap();
    assert_eq!(summary.frames, 3);
    assert_eq!(summary.termination, Termination::FrameLimit);
    assert_eq!(frame_loop.source().remaining(), 0);
}

#[test]
fn test_unreadable_frame_releases_source() {
    let input = tempfile::tempdir().unwrap();
    blank_scene().save(input.path().join("000.png")).unwrap();
    fs::write(input.path().join("001.png"), b"corrupt").unwrap();
    blank_scene().save(input.path().join("002.png")).unwrap();

    let mut frame_loop = FrameLoop::new(
        ImageSequence::from_dir(input.path()).unwrap(),
        detector(),
        handoff(),
        NullSink,
    )
    .with_options(NATIVE);
    let err = frame_loop.run().unwrap_err();
    assert!(matches!(err, PipelineError::Video(VideoError::Decode { .. })));
    assert_eq!(frame_loop.source().remaining(), 0);
}

#[test]
fn test_short_frame_does_not_stop_the_loop() {
    let input = tempfile::tempdir().unwrap();
    write_frames(
        input.path(),
        &[
            GrayImage::from_pixel(400, 16, Luma([255])),
            marker_scene(7),
            GrayImage::from_pixel(400, 16, Luma([0])),
        ],
    );

    let mut frame_loop = FrameLoop::new(
        ImageSequence::from_dir(input.path()).unwrap(),
        detector(),
        handoff(),
        NullSink,
    )
    .with_options(NATIVE);
    let summary = frame_loop.run().unwrap();
    assert_eq!(summary.frames, 3);
    assert_eq!(summary.detected_frames, 1);
    assert_eq!(summary.termination, Termination::EndOfStream);
}

/// Yields blank frames, then fails.
struct FailingSource {
    frames: u32,
}

impl FrameSource for FailingSource {
    fn next_frame(&mut self) -> Result<Option<Frame>, VideoError> {
        if self.frames == 0 {
            return Err(VideoError::Io(std::io::ErrorKind::BrokenPipe.into()));
        }
        self.frames -= 1;
        Ok(Some(Frame::from_gray(&blank_scene())))
    }
}

/// Counts presented frames and records whether it was closed.
#[derive(Default)]
struct ClosingSink {
    presented: u64,
    closed: bool,
}

impl FrameSink for ClosingSink {
    fn present(&mut self, _frame: &Frame, _index: u64) -> Result<SinkEvent, DisplayError> {
        self.presented += 1;
        Ok(SinkEvent::Continue)
    }

    fn close(&mut self) -> Result<(), DisplayError> {
        self.closed = true;
        Ok(())
    }
}

#[test]
fn test_failed_stream_still_flushes_report() {
    let output = tempfile::tempdir().unwrap();
    let report_path = output.path().join("report.jsonl");

    let mut frame_loop = FrameLoop::new(
        FailingSource { frames: 2 },
        detector(),
        handoff(),
        ClosingSink::default(),
    )
    .with_options(NATIVE)
    .with_report(FrameReporter::create(&report_path).unwrap());

    let err = frame_loop.run().unwrap_err();
    assert!(matches!(err, PipelineError::Video(VideoError::Io(_))));
    assert_eq!(frame_loop.sink().presented, 2);
    assert!(frame_loop.sink().closed);

    // The loop is still alive, so only an explicit flush makes these visible.
    let report = fs::read_to_string(&report_path).unwrap();
    let states: Vec<serde_json::Value> = report
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(states.len(), 2);
    assert_eq!(states[1]["frame"], 2);
    assert_eq!(states[1]["state"], "no_target");
}
