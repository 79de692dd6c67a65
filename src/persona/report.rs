//! Persona report - details, answer-pattern insights and recommendations
//! for a classified respondent.

use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::{PersonaCatalog, PersonaInsights, PersonaName};
use super::classifier::AnswerVector;

/// Question indices the answer-pattern insights look at.
const JOBS_QUESTION: usize = 0;
const PRIVACY_QUESTION: usize = 1;
const EDUCATION_QUESTION: usize = 3;

/// How many people in the study share the persona.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarUsers<'a> {
    pub global_count: u64,
    pub percentage: f64,
    pub regional_distribution: &'a BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaReport<'a> {
    pub persona: PersonaInsights<'a>,
    pub user_answers: AnswerVector,
    pub insights: Vec<&'static str>,
    pub recommendations: &'static [&'static str],
    pub similar_users: SimilarUsers<'a>,
}

impl<'a> PersonaReport<'a> {
    pub fn build(catalog: &'a PersonaCatalog, name: PersonaName, answers: &AnswerVector) -> Self {
        let persona = catalog.get(name);
        Self {
            persona: catalog.insights(name),
            user_answers: *answers,
            insights: answer_insights(answers),
            recommendations: recommendations(name),
            similar_users: SimilarUsers {
                global_count: persona.size,
                percentage: persona.percentage,
                regional_distribution: &persona.regional_distribution,
            },
        }
    }
}

/// Observations drawn from individual answers, independent of the persona.
pub fn answer_insights(answers: &AnswerVector) -> Vec<&'static str> {
    let mut insights = Vec::new();
    if answers.get(PRIVACY_QUESTION).is_some_and(|a| a >= 3) {
        insights.push("You show significant concern about AI privacy and surveillance.");
    }
    if answers.get(JOBS_QUESTION).is_some_and(|a| a >= 3) {
        insights.push("Economic impacts of AI are a key concern for you.");
    }
    if answers.get(EDUCATION_QUESTION) == Some(4) {
        insights.push("You highly value human guidance and mentorship in learning.");
    }
    insights
}

pub fn recommendations(name: PersonaName) -> &'static [&'static str] {
    match name {
        PersonaName::BalancedSocialParticipant => &[
            "Explore AI tools that enhance human collaboration",
            "Look for AI applications that strengthen social connections",
            "Stay informed about AI development through balanced sources",
        ],
        PersonaName::ConsistentSocialResponder => &[
            "Engage in discussions about AI ethics and social impact",
            "Support organizations working on inclusive AI development",
            "Consider how AI can address social justice issues",
        ],
        PersonaName::BalancedSecurityParticipant => &[
            "Follow AI regulation and policy developments",
            "Learn about AI safety and security measures",
            "Support transparent AI development practices",
        ],
        PersonaName::CulturalPreservationist => &[
            "Explore how AI can help preserve cultural heritage",
            "Connect with others who share cultural preservation values",
            "Advocate for diverse perspectives in AI development",
        ],
        PersonaName::TechnologyAwareParticipant => &[
            "Stay updated on AI research and developments",
            "Explore advanced AI applications in your field",
            "Share knowledge about AI benefits and risks",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_insights() {
        let quiet = AnswerVector::new(&[0, 0, 0, 0, 0]).unwrap();
        assert!(answer_insights(&quiet).is_empty());

        let worried = AnswerVector::new(&[3, 4, 0, 4, 0]).unwrap();
        let insights = answer_insights(&worried);
        assert_eq!(insights.len(), 3);
        assert!(insights[0].contains("privacy"));
        assert!(insights[1].contains("Economic"));
        assert!(insights[2].contains("mentorship"));
    }

    #[test]
    fn test_every_persona_has_three_recommendations() {
        for name in PersonaName::ALL {
            assert_eq!(recommendations(name).len(), 3);
        }
    }

    #[test]
    fn test_report_shape() {
        let catalog = PersonaCatalog::builtin();
        let answers = AnswerVector::new(&[2, 2, 2, 2, 2]).unwrap();
        let report = PersonaReport::build(&catalog, PersonaName::ConsistentSocialResponder, &answers);
        assert_eq!(report.similar_users.global_count, 13241);
        assert_eq!(report.similar_users.regional_distribution["GD2"], 5876);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["persona"]["name"], "Consistent Social Responder");
        assert_eq!(json["userAnswers"], serde_json::json!([2, 2, 2, 2, 2]));
        assert_eq!(json["similarUsers"]["percentage"], 22.2);
    }
}
