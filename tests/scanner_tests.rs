//! Scan sessions over in-memory frames

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use wifi_qr::{
    DecodeError, ECLevel, FrameSource, PollOutcome, RasterImage, RenderOptions, ScanSession,
    StillFrames, encode, render,
};

fn blank() -> RasterImage {
    RasterImage::from_gray(64, 64, vec![255; 64 * 64]).unwrap()
}

fn symbol(text: &str) -> RasterImage {
    render(&encode(text, ECLevel::L).unwrap(), RenderOptions::with_scale(3))
}

/// Source that counts frames handed out and releases
struct Camera {
    frames: StillFrames,
    served: Arc<AtomicUsize>,
    released: Arc<AtomicUsize>,
}

impl FrameSource for Camera {
    fn next_frame(&mut self) -> Option<RasterImage> {
        let frame = self.frames.next_frame()?;
        self.served.fetch_add(1, Ordering::SeqCst);
        Some(frame)
    }

    fn release(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_session_stops_polling_after_success() {
    let served = Arc::new(AtomicUsize::new(0));
    let released = Arc::new(AtomicUsize::new(0));
    let camera = Camera {
        frames: StillFrames::new([blank(), blank(), symbol("found"), symbol("ignored")]),
        served: Arc::clone(&served),
        released: Arc::clone(&released),
    };

    let mut session = ScanSession::new(camera).with_interval(Duration::ZERO);
    assert_eq!(session.run().unwrap().content, "found");
    assert_eq!(served.load(Ordering::SeqCst), 3);
    assert_eq!(released.load(Ordering::SeqCst), 1);

    drop(session);
    assert_eq!(released.load(Ordering::SeqCst), 1);
}

#[test]
fn test_manual_polling() {
    let mut session = ScanSession::new(StillFrames::new([blank(), symbol("tick")]));
    assert!(matches!(
        session.poll_once(),
        PollOutcome::Missed(DecodeError::NotFound)
    ));
    match session.poll_once() {
        PollOutcome::Decoded(qr) => assert_eq!(qr.content, "tick"),
        other => panic!("expected a payload, got {other:?}"),
    }
    assert!(matches!(session.poll_once(), PollOutcome::Finished));
}

#[test]
fn test_interval_between_misses() {
    let mut session = ScanSession::new(StillFrames::new([blank(), blank(), blank()]))
        .with_interval(Duration::from_millis(20));
    let started = Instant::now();
    assert_eq!(session.run().unwrap_err(), DecodeError::NotFound);
    assert!(started.elapsed() >= Duration::from_millis(60));
    assert!(session.is_stopped());
}
