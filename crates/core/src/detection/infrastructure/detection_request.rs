use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::JoinHandle;

use thiserror::Error;

use crate::detection::domain::face_landmark_detector::FaceLandmarkDetector;
use crate::detection::domain::face_observation::FaceObservation;
use crate::shared::frame::Frame;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("face detection was cancelled")]
    Cancelled,
    #[error("face detection failed: {0}")]
    Detector(String),
    #[error("face detection worker panicked")]
    WorkerPanicked,
}

/// Home of a detector between requests. Empty while a request runs, and
/// for good once a worker panicked with the detector.
pub type DetectorSlot = Arc<Mutex<Option<Box<dyn FaceLandmarkDetector>>>>;

pub fn detector_slot(detector: Box<dyn FaceLandmarkDetector>) -> DetectorSlot {
    Arc::new(Mutex::new(Some(detector)))
}

type WorkerResult = Result<Vec<FaceObservation>, String>;

/// A single landmark-detection run on a worker thread.
///
/// The detector is borrowed from its slot for the run and put back by the
/// worker when it finishes, whether or not anyone waits for the result.
/// Completes exactly once: [`DetectionRequest::wait`] consumes the request.
/// A cancelled request always reports [`DetectionError::Cancelled`], even
/// if the detector already finished.
pub struct DetectionRequest {
    result_rx: crossbeam_channel::Receiver<WorkerResult>,
    handle: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
}

impl DetectionRequest {
    /// `None` when the slot is empty.
    pub fn submit(slot: &DetectorSlot, frame: Frame) -> Option<Self> {
        let mut detector = slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()?;

        let (result_tx, result_rx) = crossbeam_channel::bounded::<WorkerResult>(1);
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let home = slot.clone();

        let handle = std::thread::spawn(move || {
            if !flag.load(Ordering::Relaxed) {
                let result = detector.detect(&frame).map_err(|e| e.to_string());
                let _ = result_tx.send(result);
            }
            *home.lock().unwrap_or_else(PoisonError::into_inner) = Some(detector);
        });

        Some(Self {
            result_rx,
            handle,
            cancelled,
        })
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Blocks until the worker is done and the detector is back in its slot.
    pub fn wait(self) -> Result<Vec<FaceObservation>, DetectionError> {
        // Disconnects without a message when the worker skipped detection.
        let received = self.result_rx.recv().ok();

        if self.handle.join().is_err() {
            return Err(DetectionError::WorkerPanicked);
        }
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(DetectionError::Cancelled);
        }
        match received {
            Some(Ok(observations)) => Ok(observations),
            Some(Err(message)) => Err(DetectionError::Detector(message)),
            None => Err(DetectionError::Cancelled),
        }
    }
}
