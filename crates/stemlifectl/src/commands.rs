//! Command handlers for stemlifectl.
//!
//! Every game-level failure is rendered as a user-visible message here;
//! the error is still returned so main can log it and pick an exit code.
//! Nothing is retried automatically: retrying is always a user action.

use crate::backend::GameBackend;
use crate::display;
use crate::session::{AdvanceOutcome, Session};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use stemlife_common::question_bank;
use stemlife_common::recommendation::RECOMMENDATION_AGE;
use stemlife_common::GameError;

enum PlayerInput {
    Choice(usize),
    Reset,
    Quit,
}

/// Prompt and read one trimmed line. `None` means end of input.
fn read_input(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush().context("flushing prompt")?;
    let mut line = String::new();
    let bytes = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading input")?;
    if bytes == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn read_selection(available: usize) -> Result<PlayerInput> {
    loop {
        let line = match read_input(&format!(
            "Choose [1-{available}] (r = reset, q = quit): "
        ))? {
            Some(line) => line,
            None => return Ok(PlayerInput::Quit),
        };
        match line.as_str() {
            "q" | "quit" => return Ok(PlayerInput::Quit),
            "r" | "reset" => return Ok(PlayerInput::Reset),
            other => match other.parse::<usize>() {
                Ok(n) if (1..=available).contains(&n) => return Ok(PlayerInput::Choice(n - 1)),
                _ => println!("Enter a number between 1 and {available}."),
            },
        }
    }
}

/// Interactive loop: present, answer, pause, repeat until the content runs
/// out or the player quits.
pub async fn play<B: GameBackend>(session: &mut Session<B>) -> Result<()> {
    println!("Life As STEM");
    'game: loop {
        let event = match session.advance().await {
            Ok(AdvanceOutcome::Presented(event)) => event,
            Ok(AdvanceOutcome::NoMoreContent) => {
                display::print_completed(session.player());
                if session.player().age >= RECOMMENDATION_AGE {
                    match session.recommendation().await {
                        Ok(rec) => display::print_recommendation(&rec),
                        Err(e) => {
                            tracing::warn!(error = %e, "recommendation fetch failed");
                            println!("Error getting recommendation. Please try again.");
                        }
                    }
                }
                return Ok(());
            }
            Err(e) => {
                tracing::warn!(error = %e, "event load failed");
                println!("Error loading life event. Please try again.");
                match read_input("Press Enter to retry (q = quit): ")? {
                    Some(line) if line == "q" => return Ok(()),
                    Some(_) => continue 'game,
                    None => return Ok(()),
                }
            }
        };

        display::print_player(session.player(), session.backend().plant_height());
        display::print_event(&event);
        session.begin_selection()?;

        loop {
            match read_selection(event.choices.len())? {
                PlayerInput::Quit => return Ok(()),
                PlayerInput::Reset => {
                    match session.reset().await {
                        Ok(()) => println!("Game reset. A new life begins."),
                        Err(e) => {
                            tracing::warn!(error = %e, "reset failed");
                            println!("Error resetting game. Please try again.");
                        }
                    }
                    continue 'game;
                }
                PlayerInput::Choice(index) => match session.submit_choice(index).await {
                    Ok(outcome) => {
                        if let Some(feedback) = &outcome.feedback {
                            display::print_feedback(feedback);
                        }
                        println!("Choice made! You're now {} years old.", outcome.player.age);
                        if let Some(field) = &outcome.recommendation {
                            println!("A STEM recommendation is ready: {field}.");
                        }
                        tokio::time::sleep(outcome.advance_after).await;
                        continue 'game;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "choice submission failed");
                        println!("Error processing choice. Please try again.");
                    }
                },
            }
        }
    }
}

/// Fetch and show the current event without answering it.
pub async fn event<B: GameBackend>(session: &mut Session<B>) -> Result<()> {
    match session.advance().await {
        Ok(AdvanceOutcome::Presented(event)) => {
            display::print_player(session.player(), session.backend().plant_height());
            display::print_event(&event);
            Ok(())
        }
        Ok(AdvanceOutcome::NoMoreContent) => {
            display::print_completed(session.player());
            Ok(())
        }
        Err(e) => {
            println!("Error loading life event. Please try again.");
            Err(e.into())
        }
    }
}

/// One-shot answer: load the current event, then submit the numbered
/// choice (1-based, as displayed).
pub async fn choose<B: GameBackend>(session: &mut Session<B>, number: usize) -> Result<()> {
    match session.advance().await {
        Ok(AdvanceOutcome::Presented(_)) => {}
        Ok(AdvanceOutcome::NoMoreContent) => {
            display::print_completed(session.player());
            return Ok(());
        }
        Err(e) => {
            println!("Error loading life event. Please try again.");
            return Err(e.into());
        }
    }
    session.begin_selection()?;

    let Some(index) = number.checked_sub(1) else {
        println!("Choices are numbered from 1.");
        return Ok(());
    };
    match session.submit_choice(index).await {
        Ok(outcome) => {
            if let Some(feedback) = &outcome.feedback {
                display::print_feedback(feedback);
            }
            println!("Choice made! You're now {} years old.", outcome.player.age);
            if let Some(field) = &outcome.recommendation {
                println!("A STEM recommendation is ready: {field}.");
            }
            display::print_player(session.player(), session.backend().plant_height());
            Ok(())
        }
        Err(e @ GameError::InvalidChoice { .. }) => {
            println!("{e}");
            Err(e.into())
        }
        Err(e) => {
            println!("Error processing choice. Please try again.");
            Err(e.into())
        }
    }
}

/// Show the current player profile.
pub async fn stats<B: GameBackend>(session: &mut Session<B>) -> Result<()> {
    match session.advance().await {
        Ok(_) => {
            display::print_player(session.player(), session.backend().plant_height());
            Ok(())
        }
        Err(e) => {
            println!("Error loading player state. Please try again.");
            Err(e.into())
        }
    }
}

/// Show the STEM recommendation with its interest breakdown.
pub async fn recommend<B: GameBackend>(session: &mut Session<B>) -> Result<()> {
    // Refresh the player snapshot first; the age gate works off it.
    if let Err(e) = session.advance().await {
        tracing::debug!(error = %e, "player refresh failed before recommendation");
    }
    match session.recommendation().await {
        Ok(rec) => {
            display::print_recommendation(&rec);
            Ok(())
        }
        Err(e @ GameError::RecommendationLocked { .. }) => {
            println!("{e}");
            Err(e.into())
        }
        Err(e) => {
            println!("Error getting recommendation. Please try again.");
            Err(e.into())
        }
    }
}

/// Reset the game and start a new life.
pub async fn reset<B: GameBackend>(session: &mut Session<B>) -> Result<()> {
    match session.reset().await {
        Ok(()) => {
            println!("Game reset. A new life begins.");
            Ok(())
        }
        Err(e) => {
            println!("Error resetting game. Please try again.");
            Err(e.into())
        }
    }
}

/// Print the built-in question bank.
pub fn questions() -> Result<()> {
    display::print_questions(&question_bank::builtin());
    Ok(())
}
