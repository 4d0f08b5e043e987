//! Statement calculator
//!
//! Scans and parses `;`-terminated sums, recovering from syntax errors.
//!
//! ```text
//! cargo run --example calculator -- "1 + 2; 3 4; 5 + + 6;"
//! echo "40 + 2;" | cargo run --example calculator
//! ```

use std::io::Read;
use stx::lexer::Scanner;
use stx::parser::{EngineConfig, LogEventHandler, Parser};
use stx::testing::fixtures::{self, lexeme_value, StatementCalculator};
use stx::StrSource;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let text = match std::env::args().nth(1) {
        Some(text) => text,
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let automaton = fixtures::token_automaton()?;
    let scanner = Scanner::new(
        &automaton,
        &fixtures::TOKEN_MODES,
        &fixtures::KEYWORD_GRAMMAR,
        StrSource::new(&text),
    );
    let mut parser = Parser::new(&fixtures::STMT_PACKED, &fixtures::STMT_GRAMMAR, EngineConfig::default())
        .with_event_handler(LogEventHandler);
    let mut calc = StatementCalculator::default();

    let outcome = parser.parse(scanner.symbols(lexeme_value), &mut calc);

    for (i, value) in calc.results.iter().enumerate() {
        println!("statement {}: {value}", i + 1);
    }
    for report in &calc.reports {
        println!(
            "error in state {} on {}: {}",
            report.state,
            parser.token_name(report.token),
            report.message
        );
    }

    let stats = parser.stats();
    println!(
        "{} shifts, {} reductions, max depth {}, {} dropped tokens",
        stats.shifts, stats.reductions, stats.max_depth, stats.dropped_tokens
    );

    outcome?;
    Ok(())
}
