//! Fixed-interval frame polling around [`decode`]
//!
//! A [`ScanSession`] owns its [`FrameSource`] for the length of the scan: it
//! pulls one frame at a time, decodes it, and stops at the first payload.
//! The source is released exactly once, on success, on [`ScanSession::stop`]
//! or when the session is dropped.

use crate::config;
use crate::decoder::decode;
use crate::error::DecodeError;
use crate::models::{QRCode, RasterImage};
use std::collections::VecDeque;
use std::time::Duration;

/// Something that hands out captured frames, such as a camera stream
pub trait FrameSource {
    /// Next frame, or `None` once the source is exhausted
    fn next_frame(&mut self) -> Option<RasterImage>;

    /// Give back the underlying device. Called once per session.
    fn release(&mut self) {}
}

/// Frames already in memory, served in order
#[derive(Debug, Default)]
pub struct StillFrames {
    frames: VecDeque<RasterImage>,
}

impl StillFrames {
    /// Serve `frames` front to back
    pub fn new(frames: impl IntoIterator<Item = RasterImage>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Frames not yet handed out
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl FrameSource for StillFrames {
    fn next_frame(&mut self) -> Option<RasterImage> {
        self.frames.pop_front()
    }

    fn release(&mut self) {
        self.frames.clear();
    }
}

/// Result of one poll
#[derive(Debug, Clone)]
pub enum PollOutcome {
    /// A payload was decoded; the session has stopped
    Decoded(QRCode),
    /// The frame held no readable symbol; poll again after the interval
    Missed(DecodeError),
    /// The source ran dry or the session was stopped
    Finished,
}

/// One scanning run over a frame source
pub struct ScanSession<S: FrameSource> {
    source: S,
    interval: Duration,
    max_frames: Option<usize>,
    frames_tried: usize,
    released: bool,
}

impl<S: FrameSource> ScanSession<S> {
    /// Session polling every `QR_SCAN_INTERVAL_MS` with no frame limit
    pub fn new(source: S) -> Self {
        Self {
            source,
            interval: Duration::from_millis(config::scan_interval_ms()),
            max_frames: None,
            frames_tried: 0,
            released: false,
        }
    }

    /// Wait `interval` between frames
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Give up after `max_frames` frames
    pub fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = Some(max_frames);
        self
    }

    /// Frames decoded so far
    pub fn frames_tried(&self) -> usize {
        self.frames_tried
    }

    /// Whether the source has been released
    pub fn is_stopped(&self) -> bool {
        self.released
    }

    /// Pull and decode a single frame
    pub fn poll_once(&mut self) -> PollOutcome {
        if self.released || self.max_frames.is_some_and(|max| self.frames_tried >= max) {
            self.stop();
            return PollOutcome::Finished;
        }
        let Some(frame) = self.source.next_frame() else {
            self.stop();
            return PollOutcome::Finished;
        };
        self.frames_tried += 1;

        match decode(&frame) {
            Ok(qr) => {
                tracing::debug!(frame = self.frames_tried, "scan hit");
                self.stop();
                PollOutcome::Decoded(qr)
            }
            Err(e) => {
                tracing::trace!(frame = self.frames_tried, error = %e, "scan miss");
                PollOutcome::Missed(e)
            }
        }
    }

    /// Poll until a payload is decoded or the source is exhausted, sleeping
    /// the interval between frames. On exhaustion the error is the furthest
    /// stage any frame reached.
    pub fn run(&mut self) -> Result<QRCode, DecodeError> {
        let mut furthest = DecodeError::NotFound;
        loop {
            match self.poll_once() {
                PollOutcome::Decoded(qr) => return Ok(qr),
                PollOutcome::Missed(e) => {
                    furthest = furthest.max(e);
                    if !self.interval.is_zero() {
                        std::thread::sleep(self.interval);
                    }
                }
                PollOutcome::Finished => return Err(furthest),
            }
        }
    }

    /// Release the source; later polls report [`PollOutcome::Finished`]
    pub fn stop(&mut self) {
        if !self.released {
            self.released = true;
            self.source.release();
            tracing::debug!(frames = self.frames_tried, "scan session stopped");
        }
    }
}

impl<S: FrameSource> Drop for ScanSession<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
