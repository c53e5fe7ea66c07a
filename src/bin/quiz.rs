//! Interactive preflop trainer.
//!
//! Loads the pre-built range data and runs a stdin/stdout quiz loop:
//! answer with FOLD / RAISE / CALL / CHECK / LIMP_CALL, or a number when
//! a follow-up sizing question is open.

use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;

use range_trainer::quiz::{
    AttemptRecord, Difficulty, EngineState, QuestionEngine, QuestionGenerator, SessionStats,
};
use range_trainer::range::RangeTable;

fn main() -> io::Result<()> {
    env_logger::init();

    let data_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "final_tags.json".to_string());

    println!("=== Preflop Range Trainer ===\n");

    let table = match RangeTable::load(&data_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("[FATAL] could not load range data from {}: {}", data_path, e);
            eprintln!("Run the build step first to produce final_tags.json.");
            process::exit(1);
        }
    };
    println!("Loaded range data: kinds = {:?}\n", table.list_kinds());

    let generator = QuestionGenerator::from_table(&table);
    let mut engine = QuestionEngine::new(&table, generator, StdRng::from_entropy());
    let mut stats = SessionStats::new();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let difficulty = loop {
        println!("Pick a difficulty: 1=Beginner (OR)  2=Intermediate (OR_SB/3BET)  3=Advanced (ROL)");
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        match line?.trim() {
            "1" => break Difficulty::Beginner,
            "2" => break Difficulty::Intermediate,
            "3" => break Difficulty::Advanced,
            other => println!("Unknown choice: {}\n", other),
        }
    };

    let question = engine.start(difficulty);
    println!("\n{}", question.header);
    println!("Hand: {} ({})", question.hole_cards, question.hand_key);
    println!("Commands: action to answer, 'next', 'grid', 'stats', 'quit'\n");

    while let Some(line) = lines.next() {
        let input = line?.trim().to_string();

        match input.to_ascii_uppercase().as_str() {
            "QUIT" | "Q" => break,
            "NEXT" | "N" => match engine.new_question() {
                Ok(q) => {
                    println!("\n{}", q.header);
                    println!("Hand: {} ({})", q.hole_cards, q.hand_key);
                }
                Err(e) => println!("{}", e),
            },
            "STATS" => {
                let s = stats.summary(50);
                println!(
                    "Attempts: {}  Correct: {}  Accuracy: {:.0}%  (recent {}: {:.0}%)",
                    s.total_attempts,
                    s.total_correct,
                    s.total_accuracy * 100.0,
                    s.recent.attempts,
                    s.recent.accuracy * 100.0
                );
                for rate in &s.by_kind {
                    println!(
                        "  {:>6}: {}/{} ({:.0}%)",
                        rate.key,
                        rate.correct,
                        rate.attempts,
                        rate.accuracy * 100.0
                    );
                }
            }
            "GRID" => {
                if let Some(q) = engine.current_question() {
                    match table.get_range_grid_view(q.kind.key(), &q.position) {
                        Ok(view) => println!("{}", view),
                        Err(e) => println!("cannot render grid: {}", e),
                    }
                }
            }
            _ => {
                let outcome = engine.submit(&input);
                println!("{}", outcome.text);

                if let Some(choices) = &outcome.followup_choices {
                    println!("Choices: {:?}", choices);
                }

                if let Some(correct) = outcome.is_correct {
                    if let Some(verdict) = &outcome.verdict {
                        stats.record(AttemptRecord::from_verdict(verdict));
                        if !correct {
                            println!("  ({})", verdict.reason);
                        }
                    }
                }

                if engine.state() == EngineState::Resolved {
                    println!("Type 'next' for a new question.");
                }
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }

    let s = stats.summary(50);
    println!(
        "\nSession done. {}/{} correct ({:.0}%).",
        s.total_correct,
        s.total_attempts,
        s.total_accuracy * 100.0
    );
    Ok(())
}
