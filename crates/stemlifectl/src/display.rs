//! Terminal rendering of game data.
//!
//! Pure presentation: consumes structured data, holds no game state.

use owo_colors::OwoColorize;
use stemlife_common::event::{AnswerFeedback, LifeEvent, Question};
use stemlife_common::recommendation::Recommendation;
use stemlife_common::PlayerState;

const BAR_WIDTH: usize = 20;

fn interest_bar(value: i64) -> String {
    let filled = (value.clamp(0, 100) as usize * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {value:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

pub fn print_event(event: &LifeEvent) {
    println!();
    if let Some(category) = &event.category {
        println!("{} {}", event.title.bold(), format!("[{category}]").dimmed());
    } else {
        println!("{}", event.title.bold());
    }
    println!("{}", event.description);
    println!();
    for (i, choice) in event.choices.iter().enumerate() {
        println!("  {}. {}", (i + 1).cyan(), choice.text);
    }
}

pub fn print_player(player: &PlayerState, plant_height: Option<i64>) {
    println!();
    println!(
        "{} age {} ({})   score {}",
        "player".bold(),
        player.age,
        player.stage(),
        player.score
    );
    println!(
        "  health {:>3}  intelligence {:>3}  creativity {:>3}  logic {:>3}  social {:>3}",
        player.health, player.intelligence, player.creativity, player.logic, player.social_skills
    );
    println!("  science     {}", interest_bar(player.science_interest));
    println!("  technology  {}", interest_bar(player.technology_interest));
    println!("  engineering {}", interest_bar(player.engineering_interest));
    println!("  math        {}", interest_bar(player.math_interest));
    if let Some(height) = plant_height {
        println!("  plant height {height}");
    }
}

pub fn print_feedback(feedback: &AnswerFeedback) {
    if feedback.correct {
        println!("{}", "Correct!".green().bold());
    } else {
        println!("{}", "Incorrect!".red().bold());
    }
    println!("{}", feedback.explanation);
}

pub fn print_recommendation(rec: &Recommendation) {
    println!();
    println!(
        "Based on your life choices, we recommend a career in {}.",
        rec.field.green().bold()
    );
    println!("  science     {}", interest_bar(rec.interests.science));
    println!("  technology  {}", interest_bar(rec.interests.technology));
    println!("  engineering {}", interest_bar(rec.interests.engineering));
    println!("  math        {}", interest_bar(rec.interests.math));
}

pub fn print_completed(player: &PlayerState) {
    println!();
    println!("{}", "No more events. Your life as STEM is complete!".bold());
    print_player(player, None);
}

pub fn print_questions(questions: &[Question]) {
    for q in questions {
        let category = q.category.as_deref().unwrap_or("general");
        println!("{} {}", format!("{}.", q.id).cyan(), q.text);
        println!("   {}", format!("[{category}]").dimmed());
        for (i, option) in q.options.iter().enumerate() {
            println!("   {}. {option}", i + 1);
        }
        println!();
    }
}
