//! Concatenated binary PNM frames (`P6`, and `P5` for grey input).

use std::io::{BufRead, ErrorKind};

use image::codecs::pnm::PnmDecoder;
use image::{DynamicImage, ImageError};
use log::{debug, warn};

use super::{FrameSource, VideoError};
use crate::frame::Frame;

/// Reads one frame after another from a byte stream such as the output of
/// `ffmpeg -f image2pipe -vcodec ppm -`.
///
/// A stream that stops in the middle of a frame ends like a clean one; the
/// partial frame is dropped with a warning.
pub struct PpmStream<R> {
    reader: Option<R>,
    frames: u64,
}

impl<R: BufRead> PpmStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Some(reader),
            frames: 0,
        }
    }

    /// Frames decoded so far.
    pub fn frames_read(&self) -> u64 {
        self.frames
    }

    pub fn is_released(&self) -> bool {
        self.reader.is_none()
    }
}

impl<R: BufRead> FrameSource for PpmStream<R> {
    fn next_frame(&mut self) -> Result<Option<Frame>, VideoError> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(None);
        };
        if at_end(reader)? {
            debug!("PPM stream ended after {} frames", self.frames);
            return Ok(None);
        }

        match PnmDecoder::new(&mut *reader).and_then(DynamicImage::from_decoder) {
            Ok(image) => {
                self.frames += 1;
                Ok(Some(Frame::new(image.to_rgb8())))
            }
            Err(e) if is_truncation(&e) || reader.fill_buf()?.is_empty() => {
                warn!("PPM stream truncated after {} frames", self.frames);
                self.release();
                Ok(None)
            }
            Err(source) => Err(VideoError::MalformedFrame {
                frame: self.frames + 1,
                source,
            }),
        }
    }

    fn release(&mut self) {
        self.reader = None;
    }
}

/// Skip whitespace between frames; `true` once nothing is left.
fn at_end<R: BufRead>(r: &mut R) -> Result<bool, VideoError> {
    loop {
        let buf = r.fill_buf()?;
        if buf.is_empty() {
            return Ok(true);
        }
        let blank = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
        if blank == 0 {
            return Ok(false);
        }
        r.consume(blank);
    }
}

fn is_truncation(e: &ImageError) -> bool {
    matches!(e, ImageError::IoError(io) if io.kind() == ErrorKind::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ppm(width: u32, height: u32, fill: [u8; 3]) -> Vec<u8> {
        let mut out = format!("P6\n{width} {height}\n255\n").into_bytes();
        for _ in 0..width * height {
            out.extend_from_slice(&fill);
        }
        out
    }

    #[test]
    fn reads_consecutive_frames() {
        let mut bytes = ppm(3, 2, [10, 20, 30]);
        bytes.extend(ppm(2, 2, [1, 2, 3]));
        let mut stream = PpmStream::new(Cursor::new(bytes));

        let first = stream.next_frame().unwrap().unwrap();
        assert_eq!((first.width(), first.height()), (3, 2));
        assert_eq!(first.image().get_pixel(2, 1).0, [10, 20, 30]);

        let second = stream.next_frame().unwrap().unwrap();
        assert_eq!((second.width(), second.height()), (2, 2));

        assert!(stream.next_frame().unwrap().is_none());
        assert_eq!(stream.frames_read(), 2);
    }

    #[test]
    fn header_comments_are_skipped() {
        let mut bytes = b"P6 # produced by a test\n# another\n2 1 # size\n255\n".to_vec();
        bytes.extend_from_slice(&[255, 0, 0, 0, 0, 255]);
        let mut stream = PpmStream::new(Cursor::new(bytes));
        let frame = stream.next_frame().unwrap().unwrap();
        assert_eq!(frame.image().get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(frame.image().get_pixel(1, 0).0, [0, 0, 255]);
    }

    #[test]
    fn grey_and_wide_samples_are_scaled() {
        let mut bytes = b"P5\n2 1\n15\n".to_vec();
        bytes.extend_from_slice(&[0, 15]);
        bytes.extend_from_slice(b"P6 1 1 65535\n");
        bytes.extend_from_slice(&[0xff, 0xff, 0x80, 0x00, 0x00, 0x00]);
        let mut stream = PpmStream::new(Cursor::new(bytes));

        let grey = stream.next_frame().unwrap().unwrap();
        assert_eq!(grey.image().get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(grey.image().get_pixel(1, 0).0, [255, 255, 255]);

        let wide = stream.next_frame().unwrap().unwrap();
        let [r, g, b] = wide.image().get_pixel(0, 0).0;
        assert_eq!((r, b), (255, 0));
        assert!((127..=128).contains(&g));
        assert_eq!(stream.frames_read(), 2);
    }

    #[test]
    fn truncated_frame_ends_stream() {
        let mut bytes = ppm(2, 2, [5, 5, 5]);
        let partial = ppm(4, 4, [9, 9, 9]);
        bytes.extend_from_slice(&partial[..partial.len() - 7]);
        let mut stream = PpmStream::new(Cursor::new(bytes));

        assert!(stream.next_frame().unwrap().is_some());
        assert!(stream.next_frame().unwrap().is_none());
        assert!(stream.is_released());
        assert!(stream.next_frame().unwrap().is_none());
    }

    #[test]
    fn bad_magic_is_an_error() {
        let mut stream = PpmStream::new(Cursor::new(b"GIF89a\x01\x00\x01\x00".to_vec()));
        assert!(matches!(
            stream.next_frame(),
            Err(VideoError::MalformedFrame { frame: 1, .. })
        ));
    }

    #[test]
    fn truncated_header_ends_stream() {
        let mut bytes = ppm(1, 1, [7, 7, 7]);
        bytes.extend_from_slice(b"P6\n4 ");
        let mut stream = PpmStream::new(Cursor::new(bytes));

        assert!(stream.next_frame().unwrap().is_some());
        assert!(stream.next_frame().unwrap().is_none());
        assert!(stream.is_released());
        assert_eq!(stream.frames_read(), 1);
    }

    #[test]
    fn frames_may_be_separated_by_newlines() {
        let mut bytes = ppm(1, 1, [1, 2, 3]);
        bytes.extend_from_slice(b"\n\n");
        bytes.extend(ppm(1, 1, [4, 5, 6]));
        bytes.push(b'\n');
        let mut stream = PpmStream::new(Cursor::new(bytes));

        assert_eq!(stream.next_frame().unwrap().unwrap().image().get_pixel(0, 0).0, [1, 2, 3]);
        assert_eq!(stream.next_frame().unwrap().unwrap().image().get_pixel(0, 0).0, [4, 5, 6]);
        assert!(stream.next_frame().unwrap().is_none());
        assert!(!stream.is_released());
    }

    #[test]
    fn empty_stream_has_no_frames() {
        let mut stream = PpmStream::new(Cursor::new(b"\n\n".to_vec()));
        assert!(stream.next_frame().unwrap().is_none());
        assert!(!stream.is_released());
    }
}
