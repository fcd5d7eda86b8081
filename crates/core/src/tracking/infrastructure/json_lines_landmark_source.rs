use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::shared::frame_dimensions::FrameDimensions;
use crate::shared::landmark_frame::{Handedness, Point};
use crate::tracking::domain::landmark_source::{HandObservation, LandmarkSource};

#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("failed to open recording {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("recording {0} has no header line")]
    MissingHeader(PathBuf),
    #[error("line {line}: read failed: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("recording is not open")]
    NotOpen,
}

#[derive(Deserialize)]
struct RecordedHand {
    handedness: Handedness,
    points: Vec<[f64; 2]>,
}

#[derive(Deserialize)]
struct RecordedFrame {
    hand: Option<RecordedHand>,
}

/// Replays detector output captured as JSON lines.
///
/// Line 1 is the header `{"width": W, "height": H}`; every following
/// non-blank line is one frame, `{"hand": null}` or
/// `{"hand": {"handedness": "Left", "points": [[x, y], ...]}}`.
pub struct JsonLinesLandmarkSource {
    path: PathBuf,
    lines: Option<Lines<BufReader<File>>>,
    line_no: usize,
}

impl JsonLinesLandmarkSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            lines: None,
            line_no: 0,
        }
    }

    fn next_content_line(&mut self) -> Option<Result<(usize, String), RecordingError>> {
        let lines = self.lines.as_mut()?;
        for line in lines.by_ref() {
            self.line_no += 1;
            match line {
                Ok(text) if text.trim().is_empty() => continue,
                Ok(text) => return Some(Ok((self.line_no, text))),
                Err(source) => {
                    return Some(Err(RecordingError::Read {
                        line: self.line_no,
                        source,
                    }))
                }
            }
        }
        None
    }

    fn parse_frame(line: usize, text: &str, index: usize) -> Result<HandObservation, RecordingError> {
        let frame: RecordedFrame =
            serde_json::from_str(text).map_err(|source| RecordingError::Parse { line, source })?;
        Ok(match frame.hand {
            None => HandObservation::empty(index),
            Some(hand) => HandObservation::with_hand(
                index,
                hand.handedness,
                hand.points.iter().map(|&[x, y]| Point::new(x, y)).collect(),
            ),
        })
    }
}

impl LandmarkSource for JsonLinesLandmarkSource {
    fn open(&mut self) -> Result<FrameDimensions, Box<dyn std::error::Error>> {
        let file = File::open(&self.path).map_err(|source| RecordingError::Open {
            path: self.path.clone(),
            source,
        })?;
        self.lines = Some(BufReader::new(file).lines());
        self.line_no = 0;

        let (line, header) = self
            .next_content_line()
            .ok_or_else(|| RecordingError::MissingHeader(self.path.clone()))??;
        let dims: FrameDimensions =
            serde_json::from_str(&header).map_err(|source| RecordingError::Parse { line, source })?;
        log::info!(
            "Opened recording {} ({}x{})",
            self.path.display(),
            dims.width,
            dims.height
        );
        Ok(dims)
    }

    fn observations(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<HandObservation, Box<dyn std::error::Error>>> + '_> {
        if self.lines.is_none() {
            let err: Box<dyn std::error::Error> = Box::new(RecordingError::NotOpen);
            return Box::new(std::iter::once(Err(err)));
        }
        let mut index = 0;
        let mut failed = false;
        Box::new(std::iter::from_fn(move || {
            if failed {
                return None;
            }
            let result = self.next_content_line()?.and_then(|(line, text)| {
                Self::parse_frame(line, &text, index)
            });
            index += 1;
            failed = result.is_err();
            Some(result.map_err(|e| Box::new(e) as Box<dyn std::error::Error>))
        }))
    }

    fn close(&mut self) {
        self.lines = None;
    }
}
