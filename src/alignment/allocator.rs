use crate::errors::AlignmentError;

// @module: Proportional time allocation

/// A block's time span in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedInterval {
    pub start: f64,
    pub end: f64,
}

impl TimedInterval {
    // @validates: end > start
    pub fn new(start: f64, end: f64) -> Result<Self, AlignmentError> {
        if end.partial_cmp(&start) != Some(std::cmp::Ordering::Greater) {
            return Err(AlignmentError::DegenerateInterval { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// A sentence with its unrounded sub-interval
#[derive(Debug, Clone, PartialEq)]
pub struct AllocatedSentence {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Divide an interval among sentences in proportion to their character counts.
///
/// Boundaries are accumulated from the unrounded cursor, so consecutive
/// sentences share their boundary exactly and the last one ends at
/// `interval.end` up to floating point error. Nothing is returned when the
/// interval has no positive duration.
pub fn allocate(interval: TimedInterval, sentences: &[String]) -> Vec<AllocatedSentence> {
    let total_duration = interval.duration();
    if total_duration.is_nan() || total_duration <= 0.0 {
        return Vec::new();
    }

    let total_chars: usize = sentences.iter().map(|s| s.chars().count()).sum();
    let mut cursor = interval.start;

    sentences
        .iter()
        .map(|sentence| {
            let share = if total_chars == 0 {
                0.0
            } else {
                (sentence.chars().count() as f64 / total_chars as f64) * total_duration
            };

            let start = cursor;
            let end = cursor + share;
            cursor = end;

            AllocatedSentence {
                start,
                end,
                text: sentence.clone(),
            }
        })
        .collect()
}

/// Round seconds to millisecond precision, halves away from zero
pub fn round_millis(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}
