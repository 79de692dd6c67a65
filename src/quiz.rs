//! The five quiz questions, in answer-vector order.
//!
//! Option `i` of question `q` is what answer `q = i` refers to in
//! [`crate::persona::weights::QUESTION_WEIGHTS`].

use serde::Serialize;

use crate::persona::weights::{OPTION_COUNT, QUESTION_COUNT};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuizQuestion {
    pub question: &'static str,
    pub options: [&'static str; OPTION_COUNT],
}

pub static QUIZ_QUESTIONS: [QuizQuestion; QUESTION_COUNT] = [
    QuizQuestion {
        question: "When you see news about AI taking jobs, your first thought is:",
        options: [
            "This could free people to do more meaningful work",
            "We need better retraining programs for displaced workers",
            "This will increase inequality and social division",
            "We should slow down AI development until we figure this out",
            "People will adapt like they always have to new technology",
        ],
    },
    QuizQuestion {
        question: "How do you feel about AI systems knowing your daily habits?",
        options: [
            "It's fine if it makes services more helpful",
            "I'm worried about who else might access this data",
            "It makes me uncomfortable but I accept it for convenience",
            "I actively try to limit what AI systems know about me",
            "I think the benefits outweigh privacy concerns",
        ],
    },
    QuizQuestion {
        question: "When you imagine AI in 20 years, you see:",
        options: [
            "A world where humans and AI collaborate seamlessly",
            "Significant social upheaval but eventual adaptation",
            "A divided society between AI-haves and have-nots",
            "Careful regulation ensuring AI serves human values",
            "Revolutionary changes in how we live and work",
        ],
    },
    QuizQuestion {
        question: "Your biggest concern about AI in education is:",
        options: [
            "Students losing the ability to think critically",
            "Increased surveillance of learning behaviors",
            "Widening gaps between privileged and underprivileged students",
            "AI making wrong decisions about students' futures",
            "Loss of human mentorship and guidance",
        ],
    },
    QuizQuestion {
        question: "When AI makes a mistake that affects you, you think:",
        options: [
            "It's a learning opportunity to improve the system",
            "Someone should be held accountable for AI decisions",
            "This shows why we need human oversight",
            "We need stronger safety testing before deployment",
            "Mistakes are inevitable with any new technology",
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_match_weight_table_shape() {
        assert_eq!(QUIZ_QUESTIONS.len(), crate::persona::QUESTION_WEIGHTS.len());
        for q in QUIZ_QUESTIONS.iter() {
            assert!(q.question.ends_with(':') || q.question.ends_with('?'));
            assert!(q.options.iter().all(|o| !o.is_empty()));
        }
    }

    #[test]
    fn test_questions_serialize() {
        let json = serde_json::to_value(&QUIZ_QUESTIONS[3]).unwrap();
        assert_eq!(json["options"][4], "Loss of human mentorship and guidance");
    }
}
