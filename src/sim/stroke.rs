//! Stroke capture and the draw-a-circle round
//!
//! A stroke lives from pointer-down to pointer-up. The round owns at most one
//! stroke at a time and turns it into a score (or a retry prompt) on release.

use serde::{Deserialize, Serialize};

use super::circle::{CircleScore, ScoreError, score_stroke_with_min, verdict};
use crate::Point;
use crate::consts::MIN_STROKE_POINTS;

/// Points captured during one continuous drag
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn begin(at: Point) -> Self {
        Self { points: vec![at] }
    }

    pub fn push(&mut self, at: Point) {
        self.points.push(at);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent point (the start of the next line segment to draw)
    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// Where the round currently is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Waiting for the player to start drawing
    Idle,
    /// Pointer is down, points are being recorded
    Drawing(Stroke),
    /// Attempt finished and scored
    Scored(CircleScore),
    /// Attempt refused; the platform layer resets after a short delay
    Rejected(ScoreError),
}

/// What pointer-down did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    Started,
    /// A score was showing, so the press only cleared the board
    Reset,
}

/// One draw-a-circle round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleRound {
    pub phase: RoundPhase,
    min_points: usize,
    /// The scored stroke, kept so it can be shown under the fit
    #[serde(default)]
    released: Stroke,
}

impl Default for CircleRound {
    fn default() -> Self {
        Self::new(MIN_STROKE_POINTS)
    }
}

impl CircleRound {
    pub fn new(min_points: usize) -> Self {
        Self {
            phase: RoundPhase::Idle,
            min_points,
            released: Stroke::default(),
        }
    }

    pub fn reset(&mut self) {
        self.phase = RoundPhase::Idle;
        self.released = Stroke::default();
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.phase, RoundPhase::Drawing(_))
    }

    pub fn pointer_down(&mut self, at: Point) -> PressOutcome {
        if matches!(self.phase, RoundPhase::Scored(_)) {
            self.reset();
            return PressOutcome::Reset;
        }
        self.phase = RoundPhase::Drawing(Stroke::begin(at));
        PressOutcome::Started
    }

    /// Record a point; returns the segment to draw, if drawing
    pub fn pointer_move(&mut self, at: Point) -> Option<(Point, Point)> {
        match &mut self.phase {
            RoundPhase::Drawing(stroke) => {
                let from = stroke.last().unwrap_or(at);
                stroke.push(at);
                Some((from, at))
            }
            _ => None,
        }
    }

    /// Freeze the stroke and score it. No-op unless drawing.
    pub fn pointer_up(&mut self) -> Option<Result<CircleScore, ScoreError>> {
        let RoundPhase::Drawing(stroke) = std::mem::replace(&mut self.phase, RoundPhase::Idle) else {
            return None;
        };

        let result = score_stroke_with_min(stroke.points(), self.min_points);
        match &result {
            Ok(score) => {
                log::debug!("Circle scored {:.1} from {} points", score.score, stroke.len());
                self.phase = RoundPhase::Scored(*score);
                self.released = stroke;
            }
            Err(err) => {
                log::debug!("Circle attempt refused: {}", err);
                self.phase = RoundPhase::Rejected(*err);
            }
        }
        Some(result)
    }

    /// Prompt line for the current phase
    pub fn message(&self) -> &'static str {
        match &self.phase {
            RoundPhase::Idle => "Draw a circle around the dot.",
            RoundPhase::Drawing(_) => "Keep going...",
            RoundPhase::Scored(score) => verdict(score.score),
            RoundPhase::Rejected(_) => "Too short. Try again.",
        }
    }

    /// Stroke to draw: the one in progress, or the one that was scored
    pub fn stroke(&self) -> Option<&Stroke> {
        match &self.phase {
            RoundPhase::Drawing(stroke) => Some(stroke),
            RoundPhase::Scored(_) => Some(&self.released),
            _ => None,
        }
    }

    pub fn score(&self) -> Option<&CircleScore> {
        match &self.phase {
            RoundPhase::Scored(score) => Some(score),
            _ => None,
        }
    }
}
