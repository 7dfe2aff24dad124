//! Score aggregation, letter grades and small scoring utilities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{RoastError, RoastResult, WebsiteAudit};

/// Letter grade derived from an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "F")]
    F,
}

/// Inclusive lower bounds, highest first. Anything below the last entry is an F.
const GRADE_THRESHOLDS: [(u8, Grade); 12] = [
    (97, Grade::APlus),
    (93, Grade::A),
    (90, Grade::AMinus),
    (87, Grade::BPlus),
    (83, Grade::B),
    (80, Grade::BMinus),
    (77, Grade::CPlus),
    (73, Grade::C),
    (70, Grade::CMinus),
    (67, Grade::DPlus),
    (63, Grade::D),
    (60, Grade::DMinus),
];

impl Grade {
    /// Map a 0-100 score onto the 13-step grade table.
    pub fn from_score(score: u8) -> Grade {
        GRADE_THRESHOLDS
            .iter()
            .find(|(min, _)| score >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
        }
    }

    /// One-line verdict for the grade.
    pub fn description(self) -> &'static str {
        match self {
            Grade::APlus => "Exceptional - exceeds all expectations",
            Grade::A => "Excellent - meets best practices",
            Grade::AMinus => "Very Good - minor improvements needed",
            Grade::BPlus => "Good - above average",
            Grade::B => "Above Average - competent work",
            Grade::BMinus => "Average Plus - acceptable with room for improvement",
            Grade::CPlus => "Slightly Above Average - meets minimum standards",
            Grade::C => "Average - acceptable but unremarkable",
            Grade::CMinus => "Below Average - needs work",
            Grade::DPlus => "Poor - significant issues present",
            Grade::D => "Very Poor - major improvements needed",
            Grade::DMinus => "Critical - barely functional",
            Grade::F => "Failing - requires complete overhaul",
        }
    }

    /// The letter without its modifier (`'A'` for A+, A and A-).
    pub fn letter(self) -> char {
        self.as_str().chars().next().unwrap_or('F')
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rounded (half up) mean of the ten category scores.
pub fn overall_score(audit: &WebsiteAudit) -> u8 {
    calculate_average(&audit.results().scores())
}

/// Rounded (half up) arithmetic mean. Empty input averages to 0.
pub fn calculate_average(scores: &[u8]) -> u8 {
    if scores.is_empty() {
        return 0;
    }
    let n = scores.len() as u64;
    let sum: u64 = scores.iter().map(|s| u64::from(*s)).sum();
    ((2 * sum + n) / (2 * n)) as u8
}

/// Weighted mean of `scores`, rounded half up.
///
/// Weights that do not sum to 100 are normalised. Mismatched lengths are an
/// error; the inputs are never truncated.
pub fn weighted_average(scores: &[u8], weights: &[u32]) -> RoastResult<u8> {
    if scores.len() != weights.len() {
        return Err(RoastError::MismatchedLengths {
            scores: scores.len(),
            weights: weights.len(),
        });
    }
    let total_weight: u64 = weights.iter().map(|w| u64::from(*w)).sum();
    if scores.is_empty() || total_weight == 0 {
        return Ok(0);
    }
    let weighted_sum: u64 = scores
        .iter()
        .zip(weights)
        .map(|(s, w)| u64::from(*s) * u64::from(*w))
        .sum();
    let mean = (2 * weighted_sum + total_weight) / (2 * total_weight);
    Ok(mean.min(100) as u8)
}

/// Linearly map `value` from `[min, max]` onto `[target_min, target_max]`.
///
/// Out-of-range values are clamped; a degenerate source range maps to
/// `target_max`.
pub fn normalize_score(value: f64, min: f64, max: f64, target_min: u8, target_max: u8) -> u8 {
    if (max - min).abs() < f64::EPSILON {
        return target_max;
    }
    let ratio = ((value - min) / (max - min)).clamp(0.0, 1.0);
    let span = f64::from(target_max) - f64::from(target_min);
    let score = (ratio * span + f64::from(target_min)) as i64;
    score.clamp(i64::from(target_min), i64::from(target_max)) as u8
}

/// Subtract `amount`, never going below `floor`.
pub fn penalty(score: i32, amount: i32, floor: i32) -> i32 {
    (score - amount).max(floor)
}

/// Add `amount`, never going above `ceiling`.
pub fn bonus(score: i32, amount: i32, ceiling: i32) -> i32 {
    (score + amount).min(ceiling)
}

/// Qualitative bucket for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Average,
    Poor,
    Critical,
    Disaster,
}

impl ScoreBand {
    pub fn categorize(score: u8) -> ScoreBand {
        match score {
            90..=u8::MAX => ScoreBand::Excellent,
            75..=89 => ScoreBand::Good,
            60..=74 => ScoreBand::Average,
            40..=59 => ScoreBand::Poor,
            20..=39 => ScoreBand::Critical,
            _ => ScoreBand::Disaster,
        }
    }

    /// Lowest score that still falls into this band.
    pub fn threshold(self) -> u8 {
        match self {
            ScoreBand::Excellent => 90,
            ScoreBand::Good => 75,
            ScoreBand::Average => 60,
            ScoreBand::Poor => 40,
            ScoreBand::Critical => 20,
            ScoreBand::Disaster => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Average => "average",
            ScoreBand::Poor => "poor",
            ScoreBand::Critical => "critical",
            ScoreBand::Disaster => "disaster",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CategoryResult, CategoryResults};
    use chrono::Utc;

    fn audit_with(scores: [i32; 10]) -> WebsiteAudit {
        let mut it = scores.into_iter();
        let results =
            CategoryResults::from_fn(|_| CategoryResult::new(it.next().unwrap_or(0), vec![], vec![]));
        WebsiteAudit::new("https://example.com", Utc::now(), 12, results)
    }

    #[test]
    fn test_grade_boundaries_are_inclusive() {
        assert_eq!(Grade::from_score(100), Grade::APlus);
        assert_eq!(Grade::from_score(97), Grade::APlus);
        assert_eq!(Grade::from_score(96), Grade::A);
        assert_eq!(Grade::from_score(93), Grade::A);
        assert_eq!(Grade::from_score(92), Grade::AMinus);
        assert_eq!(Grade::from_score(80), Grade::BMinus);
        assert_eq!(Grade::from_score(79), Grade::CPlus);
        assert_eq!(Grade::from_score(63), Grade::D);
        assert_eq!(Grade::from_score(60), Grade::DMinus);
        assert_eq!(Grade::from_score(59), Grade::F);
        assert_eq!(Grade::from_score(0), Grade::F);
    }

    #[test]
    fn test_every_score_maps_to_a_grade() {
        let mut previous = Grade::F;
        let order: Vec<Grade> = GRADE_THRESHOLDS.iter().rev().map(|(_, g)| *g).collect();
        for score in 0..=100u8 {
            let grade = Grade::from_score(score);
            if grade != previous {
                assert!(order.contains(&grade));
                previous = grade;
            }
        }
        assert_eq!(previous, Grade::APlus);
    }

    #[test]
    fn test_grade_strings() {
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!(Grade::DMinus.as_str(), "D-");
        assert_eq!(Grade::BPlus.letter(), 'B');
        assert_eq!(serde_json::to_string(&Grade::CMinus).unwrap(), "\"C-\"");
        assert!(!Grade::F.description().is_empty());
    }

    #[test]
    fn test_overall_score_rounds_half_up() {
        // mean 84.5
        let audit = audit_with([80, 89, 80, 89, 80, 89, 80, 89, 80, 89]);
        assert_eq!(audit.overall_score(), 85);
        assert_eq!(audit.grade(), Grade::B);

        // mean 84.4
        let audit = audit_with([80, 89, 80, 89, 80, 89, 80, 89, 80, 88]);
        assert_eq!(audit.overall_score(), 84);
    }

    #[test]
    fn test_calculate_average() {
        assert_eq!(calculate_average(&[80, 90, 100]), 90);
        assert_eq!(calculate_average(&[50]), 50);
        assert_eq!(calculate_average(&[]), 0);
        assert_eq!(calculate_average(&[0, 1]), 1);
    }

    #[test]
    fn test_weighted_average() {
        assert_eq!(weighted_average(&[80, 90], &[50, 50]).unwrap(), 85);
        assert_eq!(weighted_average(&[100, 0], &[3, 1]).unwrap(), 75);
        assert_eq!(weighted_average(&[], &[]).unwrap(), 0);
        assert_eq!(weighted_average(&[70, 30], &[0, 0]).unwrap(), 0);
    }

    #[test]
    fn test_weighted_average_rejects_mismatched_lengths() {
        let err = weighted_average(&[80, 90, 100], &[50, 50]).unwrap_err();
        assert!(matches!(
            err,
            RoastError::MismatchedLengths {
                scores: 3,
                weights: 2
            }
        ));
    }

    #[test]
    fn test_normalize_score() {
        assert_eq!(normalize_score(50.0, 0.0, 100.0, 0, 100), 50);
        assert_eq!(normalize_score(75.0, 0.0, 100.0, 0, 100), 75);
        assert_eq!(normalize_score(0.0, 0.0, 100.0, 0, 100), 0);
        assert_eq!(normalize_score(100.0, 0.0, 100.0, 0, 100), 100);
        assert_eq!(normalize_score(250.0, 0.0, 100.0, 0, 100), 100);
        assert_eq!(normalize_score(5.0, 5.0, 5.0, 0, 100), 100);
    }

    #[test]
    fn test_penalty_and_bonus() {
        assert_eq!(penalty(100, 20, 0), 80);
        assert_eq!(penalty(50, 20, 40), 40);
        assert_eq!(bonus(50, 20, 100), 70);
        assert_eq!(bonus(90, 20, 100), 100);
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::categorize(95), ScoreBand::Excellent);
        assert_eq!(ScoreBand::categorize(80), ScoreBand::Good);
        assert_eq!(ScoreBand::categorize(65), ScoreBand::Average);
        assert_eq!(ScoreBand::categorize(50), ScoreBand::Poor);
        assert_eq!(ScoreBand::categorize(30), ScoreBand::Critical);
        assert_eq!(ScoreBand::categorize(10), ScoreBand::Disaster);
        assert_eq!(ScoreBand::Excellent.threshold(), 90);
        assert_eq!(ScoreBand::Good.threshold(), 75);
    }
}
