//! Media player collaborator.
//!
//! Playback lives outside the core. The viewer only reads and sets the current
//! time and asks the player to play a segment.

use crate::annotations::Segment;

pub trait MediaPlayer {
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;
    fn seek(&mut self, seconds: f64);
    fn play_segment(&mut self, segment: &Segment, looped: bool);
}

/// Segment playback request recorded by [`ClockPlayer`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRange {
    pub start: f64,
    pub end: f64,
    pub looped: bool,
}

/// Headless player driven by an internal clock instead of real audio.
#[derive(Debug, Default, Clone)]
pub struct ClockPlayer {
    time_seconds: f64,
    playing: Option<PlayRange>,
}

impl ClockPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward, wrapping or stopping at the end of the
    /// segment being played.
    pub fn advance(&mut self, delta: f64) {
        self.time_seconds = (self.time_seconds + delta).max(0.0);

        if let Some(range) = &self.playing {
            if self.time_seconds >= range.end {
                if range.looped {
                    let length = range.end - range.start;
                    self.time_seconds = range.start + (self.time_seconds - range.start) % length;
                } else {
                    self.time_seconds = range.end;
                    self.playing = None;
                }
            }
        }
    }

    pub fn playing(&self) -> Option<&PlayRange> {
        self.playing.as_ref()
    }
}

impl MediaPlayer for ClockPlayer {
    fn current_time(&self) -> f64 {
        self.time_seconds
    }

    fn seek(&mut self, seconds: f64) {
        self.time_seconds = seconds.max(0.0);
    }

    fn play_segment(&mut self, segment: &Segment, looped: bool) {
        self.time_seconds = segment.start_time;
        self.playing = Some(PlayRange {
            start: segment.start_time,
            end: segment.end_time,
            looped,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::AnnotationId;

    fn segment(start_time: f64, end_time: f64) -> Segment {
        Segment {
            id: AnnotationId::from("s"),
            start_time,
            end_time,
            editable: false,
            color: String::new(),
            label_text: String::new(),
        }
    }

    #[test]
    fn stops_at_segment_end() {
        let mut player = ClockPlayer::new();
        player.play_segment(&segment(2.0, 3.0), false);

        player.advance(0.5);
        assert_eq!(player.current_time(), 2.5);
        player.advance(1.0);

        assert_eq!(player.current_time(), 3.0);
        assert!(player.playing().is_none());
    }

    #[test]
    fn loops_within_segment() {
        let mut player = ClockPlayer::new();
        player.play_segment(&segment(2.0, 4.0), true);

        player.advance(2.5);

        assert_eq!(player.current_time(), 2.5);
        assert!(player.playing().is_some());
    }

    #[test]
    fn clamps_at_zero() {
        let mut player = ClockPlayer::new();
        player.advance(-3.0);
        player.seek(-1.0);
        assert_eq!(player.current_time(), 0.0);
    }
}
