use anyhow::{bail, Result};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// A multiple-choice practice question; `correct` indexes into `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizCard {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub card_id: u32,
    pub selected: usize,
    pub correct: usize,
    pub is_correct: bool,
}

impl QuizCard {
    pub fn answer(&self, selected: usize) -> Result<Answer> {
        if selected >= self.options.len() {
            bail!("option {} out of range for question {} ({} options)", selected, self.id, self.options.len());
        }
        Ok(Answer { card_id: self.id, selected, correct: self.correct, is_correct: selected == self.correct })
    }

    /// Options prefixed `A. `, `B. `, ... for display.
    pub fn lettered_options(&self) -> Vec<String> {
        self.options
            .iter()
            .zip('A'..='Z')
            .map(|(opt, letter)| format!("{letter}. {opt}"))
            .collect()
    }
}

fn card(id: u32, question: &str, options: [&str; 4], correct: usize) -> QuizCard {
    QuizCard {
        id,
        question: question.to_string(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct,
    }
}

lazy_static! {
    pub static ref DEFAULT_DECK: Vec<QuizCard> = vec![
        card(1, "Q1. Who is known as the Father of Indian Constitution?",
            ["Mahatma Gandhi", "Dr. B.R. Ambedkar", "Jawaharlal Nehru", "Sardar Patel"], 1),
        card(2, "Q2. Which is the capital of Nagaland?",
            ["Dimapur", "Kohima", "Imphal", "Shillong"], 1),
        card(3, "Q3. The Brahmaputra River is known as _____ in Tibet.",
            ["Tsangpo", "Jamuna", "Meghna", "Padma"], 0),
        card(4, "Q4. Which article of the Indian Constitution deals with Right to Education?",
            ["Article 19", "Article 21A", "Article 14", "Article 32"], 1),
        card(5, "Q5. Hornbill Festival is celebrated in which state?",
            ["Assam", "Manipur", "Nagaland", "Meghalaya"], 2),
    ];
}

pub fn find_card(deck: &[QuizCard], id: u32) -> Option<&QuizCard> {
    deck.iter().find(|c| c.id == id)
}
