//! Local game variant: the built-in quiz bank, no server.
//!
//! The original prototype of the game before it grew a backend: eight
//! questions in fixed order, a plant that grows with each answered year,
//! +10 points for advancing and +20 more for a correct answer. The player
//! starts at age 10, so finishing the bank lands exactly on the
//! recommendation threshold.

use crate::backend::GameBackend;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stemlife_common::event::{AnswerFeedback, Question};
use stemlife_common::protocol::{ChoiceResult, EventBundle, FetchOutcome};
use stemlife_common::question_bank;
use stemlife_common::recommendation::{recommend, Recommendation, RECOMMENDATION_AGE};
use stemlife_common::{GameError, PlayerState};

pub struct LocalGame {
    player: PlayerState,
    bank: Vec<Question>,
    answered: usize,
    current: Option<Question>,
    plant_height: i64,
    rng: StdRng,
}

impl LocalGame {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Seedable constructor so tests get a deterministic plant.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            player: PlayerState::legacy_start(),
            bank: question_bank::builtin(),
            answered: 0,
            current: None,
            plant_height: 0,
            rng,
        }
    }

    pub fn questions_answered(&self) -> usize {
        self.answered
    }
}

impl Default for LocalGame {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameBackend for LocalGame {
    async fn fetch_current_event(&mut self) -> Result<FetchOutcome, GameError> {
        if self.answered >= self.bank.len() {
            return Ok(FetchOutcome::Exhausted);
        }
        let question = self.bank[self.answered].clone();
        let event = question.to_event();
        self.current = Some(question);
        Ok(FetchOutcome::Event(EventBundle {
            event,
            player: self.player.clone(),
        }))
    }

    async fn submit_choice(&mut self, choice_index: usize) -> Result<ChoiceResult, GameError> {
        let question = self
            .current
            .take()
            .ok_or_else(|| GameError::Protocol("no current question".to_string()))?;

        if choice_index >= question.options.len() {
            let available = question.options.len();
            self.current = Some(question);
            return Err(GameError::InvalidChoice {
                index: choice_index,
                available,
            });
        }

        let correct = question.correct == Some(choice_index);
        self.player.score += 10;
        if correct {
            self.player.score += 20;
        }
        self.player.age += 1;
        self.plant_height += self.rng.gen_range(1..=3);
        self.answered += 1;

        let recommendation = (self.player.age >= RECOMMENDATION_AGE)
            .then(|| recommend(self.player.interests()).field);

        Ok(ChoiceResult {
            player: self.player.clone(),
            recommendation,
            feedback: Some(AnswerFeedback {
                correct,
                explanation: question.explanation,
            }),
        })
    }

    async fn fetch_recommendation(&mut self) -> Result<Recommendation, GameError> {
        Ok(recommend(self.player.interests()))
    }

    async fn reset(&mut self) -> Result<(), GameError> {
        self.player = PlayerState::legacy_start();
        self.answered = 0;
        self.current = None;
        self.plant_height = 0;
        Ok(())
    }

    fn plant_height(&self) -> Option<i64> {
        Some(self.plant_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> LocalGame {
        LocalGame::with_rng(StdRng::seed_from_u64(7))
    }

    #[tokio::test]
    async fn correct_answer_scores_thirty_and_ages_one_year() {
        let mut game = seeded();
        let outcome = game.fetch_current_event().await.unwrap();
        let bundle = match outcome {
            FetchOutcome::Event(b) => b,
            FetchOutcome::Exhausted => panic!("bank should have content"),
        };
        assert_eq!(bundle.player.age, 10);

        // First question: H2O, correct index 0.
        let result = game.submit_choice(0).await.unwrap();
        assert_eq!(result.player.age, 11);
        assert_eq!(result.player.score, 30);
        let feedback = result.feedback.unwrap();
        assert!(feedback.correct);
        assert!((1..=3).contains(&game.plant_height().unwrap()));
    }

    #[tokio::test]
    async fn wrong_answer_scores_ten() {
        let mut game = seeded();
        game.fetch_current_event().await.unwrap();
        let result = game.submit_choice(1).await.unwrap();
        assert_eq!(result.player.score, 10);
        assert!(!result.feedback.unwrap().correct);
    }

    #[tokio::test]
    async fn out_of_range_choice_is_invalid_and_keeps_the_question() {
        let mut game = seeded();
        game.fetch_current_event().await.unwrap();
        let err = game.submit_choice(9).await.unwrap_err();
        assert!(matches!(
            err,
            GameError::InvalidChoice {
                index: 9,
                available: 4,
            }
        ));
        assert_eq!(game.player.age, 10);
        assert_eq!(game.player.score, 0);
        // The question is still current, so a corrected retry succeeds.
        assert!(game.submit_choice(0).await.is_ok());
    }

    #[tokio::test]
    async fn bank_exhausts_after_eight_answers() {
        let mut game = seeded();
        for _ in 0..8 {
            match game.fetch_current_event().await.unwrap() {
                FetchOutcome::Event(_) => {}
                FetchOutcome::Exhausted => panic!("exhausted early"),
            }
            game.submit_choice(0).await.unwrap();
        }
        assert_eq!(game.questions_answered(), 8);
        assert_eq!(game.player.age, 18);
        assert_eq!(
            game.fetch_current_event().await.unwrap(),
            FetchOutcome::Exhausted
        );
    }

    #[tokio::test]
    async fn finishing_the_bank_unlocks_the_recommendation() {
        let mut game = seeded();
        for answered in 0..8 {
            game.fetch_current_event().await.unwrap();
            let result = game.submit_choice(0).await.unwrap();
            if answered < 7 {
                assert!(result.recommendation.is_none());
            } else {
                assert!(result.recommendation.is_some());
            }
        }
    }

    #[tokio::test]
    async fn reset_restores_the_legacy_start() {
        let mut game = seeded();
        game.fetch_current_event().await.unwrap();
        game.submit_choice(0).await.unwrap();
        game.reset().await.unwrap();
        assert_eq!(game.player, PlayerState::legacy_start());
        assert_eq!(game.questions_answered(), 0);
        assert_eq!(game.plant_height(), Some(0));
    }
}
