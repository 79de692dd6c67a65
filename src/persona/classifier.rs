//! Persona classifier - maps a five-answer quiz vector to a persona.
//!
//! Scoring is a plain weighted vote: every answer adds the weights from
//! [`super::weights::QUESTION_WEIGHTS`] to a per-persona tally, and the
//! highest tally wins.  Ties resolve to the persona declared first in
//! [`PersonaName::ALL`].

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::catalog::{PersonaCatalog, PersonaName};
use super::report::PersonaReport;
use super::weights::{option_weights, OPTION_COUNT, QUESTION_COUNT};
use crate::error::ClassifyError;

/// Lower bound of the reported confidence.
pub const MIN_CONFIDENCE: f64 = 0.30;
/// Upper bound of the reported confidence.
pub const MAX_CONFIDENCE: f64 = 0.95;
/// Confidence reported when no weights matched at all.
pub const DEFAULT_CONFIDENCE: f64 = 0.50;

/// Number of runner-up personas reported.
const ALTERNATIVE_COUNT: usize = 2;

// ============================================================================
// Answer vector
// ============================================================================

/// A validated quiz answer vector: exactly five option indices in `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AnswerVector([u8; QUESTION_COUNT]);

impl AnswerVector {
    pub fn new(values: &[i64]) -> Result<Self, ClassifyError> {
        if values.len() != QUESTION_COUNT {
            return Err(ClassifyError::InvalidInput(format!(
                "expected {} answers, got {}",
                QUESTION_COUNT,
                values.len()
            )));
        }
        let mut answers = [0u8; QUESTION_COUNT];
        for (i, &value) in values.iter().enumerate() {
            if !(0..OPTION_COUNT as i64).contains(&value) {
                return Err(ClassifyError::InvalidInput(format!(
                    "answer {} = {} is outside 0..={}",
                    i,
                    value,
                    OPTION_COUNT - 1
                )));
            }
            answers[i] = value as u8;
        }
        Ok(Self(answers))
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Chosen option for `question`.
    pub fn get(&self, question: usize) -> Option<u8> {
        self.0.get(question).copied()
    }
}

impl TryFrom<&[i64]> for AnswerVector {
    type Error = ClassifyError;

    fn try_from(values: &[i64]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

// ============================================================================
// Score map
// ============================================================================

/// Per-persona tally, every persona starting at zero.
///
/// Serializes as a JSON object keyed by persona label in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreMap([u32; 5]);

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: PersonaName) -> u32 {
        self.0[name.index()]
    }

    pub fn add(&mut self, name: PersonaName, weight: u32) {
        self.0[name.index()] += weight;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Personas sorted by score descending; equal scores keep canonical order.
    pub fn ranked(&self) -> Vec<(PersonaName, u32)> {
        let mut ranked: Vec<(PersonaName, u32)> =
            PersonaName::ALL.iter().map(|&p| (p, self.get(p))).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl Serialize for ScoreMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PersonaName::ALL.len()))?;
        for name in PersonaName::ALL {
            map.serialize_entry(name.as_str(), &self.get(name))?;
        }
        map.end()
    }
}

/// Tally the weights of every answer.
pub fn score(answers: &AnswerVector) -> ScoreMap {
    let mut scores = ScoreMap::new();
    for (question, &option) in answers.as_slice().iter().enumerate() {
        for &(persona, weight) in option_weights(question, option as usize) {
            scores.add(persona, weight);
        }
    }
    scores
}

/// `top / total`, clamped to `[MIN_CONFIDENCE, MAX_CONFIDENCE]`.
pub fn confidence(scores: &ScoreMap, top: u32) -> f64 {
    let total = scores.total();
    if total == 0 {
        return DEFAULT_CONFIDENCE;
    }
    (top as f64 / total as f64).clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// `score / top * 100`, rounded to one decimal; 0 when `top` is 0.
pub fn likelihood(score: u32, top: u32) -> f64 {
    if top == 0 {
        return 0.0;
    }
    (score as f64 / top as f64 * 1000.0).round() / 10.0
}

// ============================================================================
// Classification result
// ============================================================================

/// A runner-up persona.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    pub name: PersonaName,
    pub score: u32,
    /// Percentage of the winning score.
    pub likelihood: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub persona_name: PersonaName,
    pub confidence: f64,
    pub scores: ScoreMap,
    pub alternatives: Vec<Alternative>,
}

// ============================================================================
// Classifier
// ============================================================================

/// Stateless classifier bound to a persona catalog.
///
/// Construct once at startup and share by reference; `classify` never
/// touches the catalog, only [`PersonaClassifier::report`] does.
#[derive(Debug, Clone, Default)]
pub struct PersonaClassifier {
    catalog: PersonaCatalog,
}

impl PersonaClassifier {
    pub fn new(catalog: PersonaCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PersonaCatalog {
        &self.catalog
    }

    /// Validate raw answers and classify them.
    pub fn classify(&self, answers: &[i64]) -> Result<ClassificationResult, ClassifyError> {
        let answers = AnswerVector::new(answers)?;
        Ok(self.classify_vector(&answers))
    }

    pub fn classify_vector(&self, answers: &AnswerVector) -> ClassificationResult {
        let scores = score(answers);
        let ranked = scores.ranked();
        let (persona_name, top) = ranked[0];

        let alternatives = ranked
            .iter()
            .skip(1)
            .take(ALTERNATIVE_COUNT)
            .map(|&(name, s)| Alternative {
                name,
                score: s,
                likelihood: likelihood(s, top),
            })
            .collect();

        let result = ClassificationResult {
            persona_name,
            confidence: confidence(&scores, top),
            scores,
            alternatives,
        };
        log::debug!(
            "Classified {:?} as '{}' (confidence {:.2})",
            answers.as_slice(),
            result.persona_name,
            result.confidence
        );
        result
    }

    /// Classify and build the full persona report for the result.
    pub fn report(
        &self,
        answers: &[i64],
    ) -> Result<(ClassificationResult, PersonaReport<'_>), ClassifyError> {
        let vector = AnswerVector::new(answers)?;
        let result = self.classify_vector(&vector);
        let report = PersonaReport::build(&self.catalog, result.persona_name, &vector);
        Ok((result, report))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> PersonaClassifier {
        PersonaClassifier::new(PersonaCatalog::builtin())
    }

    #[test]
    fn test_all_zero_answers_tie_breaks_canonically() {
        let result = classifier().classify(&[0, 0, 0, 0, 0]).unwrap();
        // Social 9, TechAware 9 -> canonical order decides.
        assert_eq!(result.persona_name, PersonaName::BalancedSocialParticipant);
        assert_eq!(result.scores.get(PersonaName::BalancedSocialParticipant), 9);
        assert_eq!(result.scores.get(PersonaName::TechnologyAwareParticipant), 9);
        assert_eq!(result.scores.get(PersonaName::CulturalPreservationist), 2);
        assert!((result.confidence - 0.45).abs() < 1e-9);

        assert_eq!(result.alternatives.len(), 2);
        assert_eq!(result.alternatives[0].name, PersonaName::TechnologyAwareParticipant);
        assert_eq!(result.alternatives[0].likelihood, 100.0);
        assert_eq!(result.alternatives[1].name, PersonaName::CulturalPreservationist);
        assert_eq!(result.alternatives[1].likelihood, 22.2);
    }

    #[test]
    fn test_all_three_answers_security() {
        let result = classifier().classify(&[3, 3, 3, 3, 3]).unwrap();
        assert_eq!(result.persona_name, PersonaName::BalancedSecurityParticipant);
        assert_eq!(result.scores.get(PersonaName::BalancedSecurityParticipant), 13);
        assert_eq!(result.scores.total(), 22);
        assert!((result.confidence - 13.0 / 22.0).abs() < 1e-9);
        assert_eq!(result.alternatives[0].name, PersonaName::CulturalPreservationist);
        assert_eq!(result.alternatives[0].likelihood, 53.8);
        assert_eq!(result.alternatives[1].likelihood, 15.4);
    }

    #[test]
    fn test_classify_is_deterministic() {
        let c = classifier();
        for answers in [[0, 0, 0, 0, 0], [3, 3, 3, 3, 3]] {
            assert_eq!(c.classify(&answers).unwrap(), c.classify(&answers).unwrap());
        }
    }

    #[test]
    fn test_every_valid_vector_is_in_bounds() {
        let c = classifier();
        for n in 0..5i64.pow(5) {
            let answers: Vec<i64> = (0..5).map(|i| (n / 5i64.pow(i)) % 5).collect();
            let result = c.classify(&answers).unwrap();
            assert!(PersonaName::ALL.contains(&result.persona_name));
            assert!(
                (MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&result.confidence),
                "{:?} -> {}",
                answers,
                result.confidence
            );
            assert!(result.alternatives.iter().all(|a| a.likelihood <= 100.0));
        }
    }

    #[test]
    fn test_invalid_inputs() {
        let c = classifier();
        assert!(matches!(
            c.classify(&[0, 1, 2, 3]),
            Err(ClassifyError::InvalidInput(_))
        ));
        assert!(matches!(
            c.classify(&[0, 1, 2, 3, 5]),
            Err(ClassifyError::InvalidInput(_))
        ));
        assert!(matches!(
            c.classify(&[0, -1, 2, 3, 4]),
            Err(ClassifyError::InvalidInput(_))
        ));
        assert!(c.classify(&[0, 1, 2, 3, 4, 0]).is_err());
        assert!(c.classify(&[]).is_err());
    }

    #[test]
    fn test_confidence_clamp_and_default() {
        let mut scores = ScoreMap::new();
        assert_eq!(confidence(&scores, 0), DEFAULT_CONFIDENCE);

        scores.add(PersonaName::CulturalPreservationist, 10);
        assert_eq!(confidence(&scores, 10), MAX_CONFIDENCE);

        for p in PersonaName::ALL {
            scores.add(p, 10);
        }
        // 20 / 60 is within bounds
        assert!((confidence(&scores, 20) - 1.0 / 3.0).abs() < 1e-9);

        let mut flat = ScoreMap::new();
        for p in PersonaName::ALL {
            flat.add(p, 1);
        }
        assert_eq!(confidence(&flat, 1), MIN_CONFIDENCE);
    }

    #[test]
    fn test_zero_scores_pick_first_persona() {
        let ranked = ScoreMap::new().ranked();
        assert_eq!(ranked[0].0, PersonaName::BalancedSocialParticipant);
        assert_eq!(likelihood(0, 0), 0.0);
    }

    #[test]
    fn test_result_serialization_shape() {
        let result = classifier().classify(&[3, 3, 3, 3, 3]).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["personaName"], "Balanced Security Participant");
        assert_eq!(json["scores"]["Balanced Security Participant"], 13);
        assert_eq!(json["scores"].as_object().unwrap().len(), 5);
        assert_eq!(json["alternatives"][0]["name"], "Cultural Preservationist");
    }

    #[test]
    fn test_answer_vector_try_from() {
        let raw: &[i64] = &[4, 3, 2, 1, 0];
        let v = AnswerVector::try_from(raw).unwrap();
        assert_eq!(v.as_slice(), &[4, 3, 2, 1, 0]);
        assert_eq!(v.get(0), Some(4));
        assert_eq!(v.get(5), None);
    }
}
