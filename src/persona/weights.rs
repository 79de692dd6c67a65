//! Per-question answer weights.
//!
//! Hand-calibrated against the study clusters.  Each question maps each of
//! its five options to a small set of `(persona, weight)` contributions.

use super::catalog::PersonaName;
use super::catalog::PersonaName::{
    BalancedSecurityParticipant as Security, BalancedSocialParticipant as Social,
    ConsistentSocialResponder as Responder, CulturalPreservationist as Cultural,
    TechnologyAwareParticipant as TechAware,
};

/// Contributions of a single chosen option.
pub type OptionWeights = &'static [(PersonaName, u32)];

/// Number of quiz questions.
pub const QUESTION_COUNT: usize = 5;

/// Number of options per question.
pub const OPTION_COUNT: usize = 5;

/// `QUESTION_WEIGHTS[question][option]`.
pub const QUESTION_WEIGHTS: [[OptionWeights; OPTION_COUNT]; QUESTION_COUNT] = [
    // Q0: job displacement
    [
        &[(Social, 3), (TechAware, 1)],
        &[(TechAware, 3), (Responder, 1)],
        &[(Responder, 3), (Cultural, 1)],
        &[(Security, 3), (Cultural, 2)],
        &[(TechAware, 2), (Social, 1)],
    ],
    // Q1: privacy
    [
        &[(TechAware, 3), (Social, 1)],
        &[(Security, 3), (TechAware, 1)],
        &[(Social, 2), (TechAware, 1)],
        &[(Security, 3), (Cultural, 1)],
        &[(TechAware, 2), (Social, 1)],
    ],
    // Q2: future vision
    [
        &[(Social, 3), (TechAware, 2)],
        &[(TechAware, 2), (Responder, 1)],
        &[(Responder, 3), (Security, 1)],
        &[(Cultural, 3), (Security, 2)],
        &[(TechAware, 3), (Social, 1)],
    ],
    // Q3: education
    [
        &[(Cultural, 2), (Social, 1)],
        &[(Security, 3), (TechAware, 1)],
        &[(Responder, 3), (Security, 1)],
        &[(Security, 2), (TechAware, 2)],
        &[(Cultural, 3), (Social, 1)],
    ],
    // Q4: AI mistakes
    [
        &[(TechAware, 3), (Social, 1)],
        &[(Security, 2), (Responder, 1)],
        &[(Social, 2), (Security, 1)],
        &[(Security, 3), (Cultural, 1)],
        &[(TechAware, 2), (Social, 1)],
    ],
];

/// Weights for `option` of `question`; empty when either is out of the table.
pub fn option_weights(question: usize, option: usize) -> OptionWeights {
    QUESTION_WEIGHTS
        .get(question)
        .and_then(|q| q.get(option))
        .copied()
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_in_observed_range() {
        for question in QUESTION_WEIGHTS.iter() {
            for option in question.iter() {
                assert!(!option.is_empty());
                for (_, w) in option.iter() {
                    assert!((1..=3).contains(w));
                }
            }
        }
    }

    #[test]
    fn test_out_of_table_lookup_is_empty() {
        assert!(option_weights(0, 5).is_empty());
        assert!(option_weights(5, 0).is_empty());
        assert_eq!(option_weights(3, 4), &[(Cultural, 3), (Social, 1)]);
    }
}
