//! Roundness scoring for freehand strokes
//!
//! The fitted circle's center is the centroid of the stroke and its radius
//! the mean distance to it. Wobble is measured relative to
//! that radius, so the score does not depend on how big the circle is.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::{Point, centroid, round_to_tenth};

/// Circle fitted to a stroke, used to draw the comparison outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleFit {
    pub center: Point,
    pub radius: f64,
}

/// Score of a single attempt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleScore {
    /// Roundness in [0, 100], one decimal
    pub score: f64,
    pub fit: CircleFit,
    /// Standard deviation of point distances from the fitted radius
    pub wobble: f64,
    /// Gap between first and last point
    pub closure_gap: f64,
}

/// Why a stroke could not be scored
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
pub enum ScoreError {
    #[error("stroke too short: {points} points, need {required}")]
    TooShort { points: usize, required: usize },
    #[error("stroke has no extent to fit a circle to")]
    Degenerate,
}

/// Score a stroke with the default minimum length
pub fn score_stroke(points: &[Point]) -> Result<CircleScore, ScoreError> {
    score_stroke_with_min(points, MIN_STROKE_POINTS)
}

/// Score a stroke, refusing anything shorter than `min_points`
pub fn score_stroke_with_min(points: &[Point], min_points: usize) -> Result<CircleScore, ScoreError> {
    if points.len() < min_points {
        return Err(ScoreError::TooShort {
            points: points.len(),
            required: min_points,
        });
    }
    let center = centroid(points).ok_or(ScoreError::Degenerate)?;

    let distances: Vec<f64> = points.iter().map(|p| p.distance(center)).collect();
    let n = distances.len() as f64;
    let radius = distances.iter().sum::<f64>() / n;
    if !radius.is_finite() || radius <= f64::EPSILON {
        return Err(ScoreError::Degenerate);
    }

    let wobble = (distances.iter().map(|d| (d - radius).powi(2)).sum::<f64>() / n).sqrt();
    let normalized_wobble = wobble / radius * 100.0;

    let first = points[0];
    let last = points[points.len() - 1];
    let closure_gap = first.distance(last);
    let closure_penalty = (closure_gap / radius * CLOSURE_PENALTY_CAP).min(CLOSURE_PENALTY_CAP);

    let raw = 100.0 - normalized_wobble * WOBBLE_WEIGHT - closure_penalty;
    if !raw.is_finite() {
        return Err(ScoreError::Degenerate);
    }

    Ok(CircleScore {
        score: round_to_tenth(raw.clamp(0.0, 100.0)),
        fit: CircleFit { center, radius },
        wobble,
        closure_gap,
    })
}

/// Message shown under a finished attempt
pub fn verdict(score: f64) -> &'static str {
    if score > 95.0 {
        "Unbelievable!"
    } else if score > 90.0 {
        "So close!"
    } else if score > 80.0 {
        "Great job!"
    } else {
        "Try again!"
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::DVec2;
    use proptest::prelude::*;
    use std::f64::consts::TAU;

    /// `n` points evenly around a circle, closed (last == first)
    pub(crate) fn closed_circle(center: DVec2, radius: f64, n: usize) -> Vec<DVec2> {
        let mut pts: Vec<DVec2> = (0..n)
            .map(|i| {
                let t = TAU * i as f64 / n as f64;
                center + DVec2::new(t.cos(), t.sin()) * radius
            })
            .collect();
        pts.push(pts[0]);
        pts
    }

    #[test]
    fn test_too_short() {
        let pts = vec![DVec2::new(1.0, 2.0); 19];
        assert_eq!(
            score_stroke(&pts),
            Err(ScoreError::TooShort {
                points: 19,
                required: 20
            })
        );
    }

    #[test]
    fn test_perfect_closed_circle_scores_100() {
        // The closing duplicate pulls the centroid by r/(n+1), so sample densely
        let pts = closed_circle(DVec2::new(200.0, 150.0), 80.0, 5000);
        let result = score_stroke(&pts).unwrap();
        assert_eq!(result.score, 100.0);
        assert!(result.closure_gap < 1e-9);
    }

    #[test]
    fn test_fit_matches_circle() {
        // Uniform sampling without the duplicated closing point keeps the centroid exact
        let mut pts = closed_circle(DVec2::new(50.0, -20.0), 30.0, 40);
        pts.pop();
        let result = score_stroke(&pts).unwrap();
        assert!(result.fit.center.distance(DVec2::new(50.0, -20.0)) < 1e-9);
        assert!((result.fit.radius - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_points_identical_is_degenerate() {
        let pts = vec![DVec2::new(10.0, 10.0); 30];
        assert_eq!(score_stroke(&pts), Err(ScoreError::Degenerate));
    }

    #[test]
    fn test_open_half_circle_is_penalized() {
        let pts: Vec<DVec2> = (0..40)
            .map(|i| {
                let t = std::f64::consts::PI * i as f64 / 39.0;
                DVec2::new(t.cos(), t.sin()) * 100.0
            })
            .collect();
        let result = score_stroke(&pts).unwrap();
        assert!(result.score < 60.0, "score was {}", result.score);
    }

    #[test]
    fn test_straight_line_floors_at_zero() {
        let pts: Vec<DVec2> = (0..30).map(|i| DVec2::new(i as f64 * 10.0, 0.0)).collect();
        let result = score_stroke(&pts).unwrap();
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_verdict() {
        assert_eq!(verdict(99.0), "Unbelievable!");
        assert_eq!(verdict(95.0), "So close!");
        assert_eq!(verdict(85.5), "Great job!");
        assert_eq!(verdict(80.0), "Try again!");
    }

    fn wobbly_stroke() -> impl Strategy<Value = Vec<DVec2>> {
        prop::collection::vec((0.0f64..TAU, 80.0f64..120.0), 20..80).prop_map(|samples| {
            samples
                .into_iter()
                .map(|(t, r)| DVec2::new(t.cos(), t.sin()) * r)
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_score_in_bounds(pts in wobbly_stroke()) {
            if let Ok(result) = score_stroke(&pts) {
                prop_assert!((0.0..=100.0).contains(&result.score));
            }
        }

        #[test]
        fn prop_translation_invariant(pts in wobbly_stroke(), dx in -500.0f64..500.0, dy in -500.0f64..500.0) {
            let moved: Vec<DVec2> = pts.iter().map(|p| *p + DVec2::new(dx, dy)).collect();
            let a = score_stroke(&pts).unwrap();
            let b = score_stroke(&moved).unwrap();
            prop_assert!((a.score - b.score).abs() <= 0.1 + 1e-9);
        }

        #[test]
        fn prop_scale_invariant(pts in wobbly_stroke(), k in 0.25f64..8.0) {
            let scaled: Vec<DVec2> = pts.iter().map(|p| *p * k).collect();
            let a = score_stroke(&pts).unwrap();
            let b = score_stroke(&scaled).unwrap();
            prop_assert!((a.score - b.score).abs() <= 0.1 + 1e-9);
            prop_assert!((b.fit.radius / (a.fit.radius * k) - 1.0).abs() < 1e-9);
        }
    }
}
