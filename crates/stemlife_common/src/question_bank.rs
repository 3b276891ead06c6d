//! Built-in question bank for the legacy local quiz variant.
//!
//! Eight fixed questions served in order. Content sourced from the
//! original prototype's embedded bank.

use crate::event::Question;

fn question(
    id: i64,
    category: &str,
    text: &str,
    options: [&str; 4],
    correct: usize,
    explanation: &str,
) -> Question {
    Question {
        id,
        text: text.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        correct: Some(correct),
        explanation: explanation.to_string(),
        category: Some(category.to_string()),
    }
}

/// The full bank, in presentation order.
pub fn builtin() -> Vec<Question> {
    vec![
        question(
            1,
            "science",
            "What is the chemical formula for water?",
            ["H2O", "CO2", "O2", "N2"],
            0,
            "Water is composed of two hydrogen atoms and one oxygen atom.",
        ),
        question(
            2,
            "science",
            "Which planet is closest to the Sun?",
            ["Venus", "Mercury", "Earth", "Mars"],
            1,
            "Mercury is the first planet from the Sun in our solar system.",
        ),
        question(
            3,
            "math",
            "What is the square root of 144?",
            ["10", "11", "12", "13"],
            2,
            "12 x 12 = 144, so the square root of 144 is 12.",
        ),
        question(
            4,
            "science",
            "What type of energy does a moving object have?",
            ["Potential", "Kinetic", "Thermal", "Chemical"],
            1,
            "Kinetic energy is the energy of motion.",
        ),
        question(
            5,
            "math",
            "How many sides does a hexagon have?",
            ["4", "5", "6", "7"],
            2,
            "A hexagon is a six-sided polygon.",
        ),
        question(
            6,
            "science",
            "What is the main component of air?",
            ["Oxygen", "Nitrogen", "Carbon dioxide", "Hydrogen"],
            1,
            "Nitrogen makes up about 78% of Earth's atmosphere.",
        ),
        question(
            7,
            "math",
            "What is 2^3 equal to?",
            ["4", "6", "8", "10"],
            2,
            "2^3 = 2 x 2 x 2 = 8.",
        ),
        question(
            8,
            "science",
            "Which element has the chemical symbol 'Fe'?",
            ["Iron", "Fluorine", "Francium", "Fermium"],
            0,
            "Fe is the chemical symbol for Iron, from the Latin 'ferrum'.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_has_eight_questions_in_id_order() {
        let bank = builtin();
        assert_eq!(bank.len(), 8);
        for (i, q) in bank.iter().enumerate() {
            assert_eq!(q.id, i as i64 + 1);
        }
    }

    #[test]
    fn every_question_is_answerable() {
        for q in builtin() {
            assert!(!q.options.is_empty() && q.options.len() <= 4);
            let correct = q.correct.expect("bank questions are graded");
            assert!(correct < q.options.len());
            assert!(!q.explanation.is_empty());
        }
    }
}
