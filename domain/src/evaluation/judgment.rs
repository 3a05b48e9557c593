//! Judge verdicts on a finished proposal run.

use serde::{Deserialize, Serialize};

pub const JUDGMENT_SCORE_MIN: u8 = 1;
pub const JUDGMENT_SCORE_MAX: u8 = 10;

/// One verdict on a run: six rubric scores, an overall score and feedback.
///
/// Scores are on a 1..=10 scale; out-of-range values from the model are
/// clamped by [`Judgment::clamped`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgment {
    pub overall_score: u8,
    /// Quality and completeness of the cited sources.
    pub reliability: u8,
    pub logical_consistency: u8,
    pub practicality: u8,
    pub completeness: u8,
    /// Whether the chosen actions were efficient and to the point.
    pub action_appropriateness: u8,
    pub goal_achievement: u8,
    pub goal_achieved: bool,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub weaknesses: String,
    #[serde(default)]
    pub reasoning: String,
}

impl Judgment {
    pub fn clamped(mut self) -> Self {
        for score in self.scores_mut() {
            *score = (*score).clamp(JUDGMENT_SCORE_MIN, JUDGMENT_SCORE_MAX);
        }
        self
    }

    fn scores(&self) -> [u8; 7] {
        [
            self.overall_score,
            self.reliability,
            self.logical_consistency,
            self.practicality,
            self.completeness,
            self.action_appropriateness,
            self.goal_achievement,
        ]
    }

    fn scores_mut(&mut self) -> [&mut u8; 7] {
        [
            &mut self.overall_score,
            &mut self.reliability,
            &mut self.logical_consistency,
            &mut self.practicality,
            &mut self.completeness,
            &mut self.action_appropriateness,
            &mut self.goal_achievement,
        ]
    }

    fn feedback_len(&self) -> usize {
        [&self.summary, &self.strengths, &self.weaknesses, &self.reasoning]
            .iter()
            .map(|text| text.chars().count())
            .sum()
    }

    /// Merges several rounds of judging into one verdict.
    ///
    /// Each score is the rounded mean (halves round up), `goal_achieved`
    /// needs a strict majority, and the feedback texts come from the round
    /// with the most feedback. Returns `None` for no rounds.
    pub fn aggregate(rounds: &[Judgment]) -> Option<Judgment> {
        let (first, rest) = rounds.split_first()?;
        if rest.is_empty() {
            return Some(first.clone());
        }

        let n = rounds.len();
        let mut totals = [0usize; 7];
        for round in rounds {
            for (total, score) in totals.iter_mut().zip(round.scores()) {
                *total += score as usize;
            }
        }
        let mean = |total: usize| ((total + n / 2) / n) as u8;
        let achieved = rounds.iter().filter(|r| r.goal_achieved).count();

        let mut detailed = first;
        for round in rest {
            if round.feedback_len() > detailed.feedback_len() {
                detailed = round;
            }
        }

        Some(Judgment {
            overall_score: mean(totals[0]),
            reliability: mean(totals[1]),
            logical_consistency: mean(totals[2]),
            practicality: mean(totals[3]),
            completeness: mean(totals[4]),
            action_appropriateness: mean(totals[5]),
            goal_achievement: mean(totals[6]),
            goal_achieved: achieved > n / 2,
            summary: detailed.summary.clone(),
            strengths: detailed.strengths.clone(),
            weaknesses: detailed.weaknesses.clone(),
            reasoning: detailed.reasoning.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn judgment(score: u8, achieved: bool, summary: &str) -> Judgment {
        Judgment {
            overall_score: score,
            reliability: score,
            logical_consistency: score,
            practicality: score,
            completeness: score,
            action_appropriateness: score,
            goal_achievement: score,
            goal_achieved: achieved,
            summary: summary.to_string(),
            strengths: String::new(),
            weaknesses: String::new(),
            reasoning: String::new(),
        }
    }

    #[test]
    fn test_aggregate_empty_is_none() {
        assert!(Judgment::aggregate(&[]).is_none());
    }

    #[test]
    fn test_aggregate_single_round_unchanged() {
        let only = judgment(7, true, "solid");
        assert_eq!(Judgment::aggregate(&[only.clone()]), Some(only));
    }

    #[test]
    fn test_aggregate_rounds_mean_and_majority() {
        let rounds = [
            judgment(6, true, "ok"),
            judgment(7, false, "the most detailed feedback"),
            judgment(8, false, "fine"),
        ];
        let merged = Judgment::aggregate(&rounds).unwrap();
        assert_eq!(merged.overall_score, 7);
        assert_eq!(merged.goal_achievement, 7);
        assert!(!merged.goal_achieved);
        assert_eq!(merged.summary, "the most detailed feedback");

        // 6 and 7 average to 6.5, which rounds up
        let merged = Judgment::aggregate(&rounds[..2]).unwrap();
        assert_eq!(merged.reliability, 7);
        // one of two is not a strict majority
        assert!(!merged.goal_achieved);
    }

    #[test]
    fn test_clamped() {
        let judged = judgment(0, true, "").clamped();
        assert_eq!(judged.overall_score, JUDGMENT_SCORE_MIN);
        let judged = judgment(12, true, "").clamped();
        assert_eq!(judged.goal_achievement, JUDGMENT_SCORE_MAX);
    }

    #[test]
    fn test_deserialize_model_json() {
        let json = r#"{
            "overall_score": 8, "reliability": 6, "logical_consistency": 8,
            "practicality": 7, "completeness": 8, "action_appropriateness": 9,
            "goal_achievement": 8, "goal_achieved": true,
            "summary": "Convincing rollout plan"
        }"#;
        let judged: Judgment = serde_json::from_str(json).unwrap();
        assert_eq!(judged.reliability, 6);
        assert!(judged.weaknesses.is_empty());
    }
}
