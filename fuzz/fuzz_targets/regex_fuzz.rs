#![no_main]
use libfuzzer_sys::fuzz_target;
use stx::lexer::{Automaton, CharCursor, Scanner, StrSource};
use stx::testing::fixtures;
use stx::END_OF_INPUT;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    // Arbitrary automaton data must decode or fail cleanly
    let words: Vec<i32> = data
        .chunks_exact(4)
        .map(|chunk| i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();
    let split = words.len() / 4;
    if let Ok(automaton) = Automaton::decode(&words[..split], &words[split..]) {
        for start in 0..automaton.vertices().len() {
            let mut cursor = CharCursor::new(StrSource::new(input));
            match automaton.matches(start, &mut cursor) {
                Some(lexeme) => assert!(input.starts_with(lexeme.as_str())),
                None => assert_eq!(cursor.offset(), 0),
            }
        }
    }

    // Scanning terminates and spans stay inside the input
    let Ok(automaton) = fixtures::token_automaton() else {
        return;
    };
    let mut scanner = Scanner::new(
        &automaton,
        &fixtures::TOKEN_MODES,
        &fixtures::KEYWORD_GRAMMAR,
        StrSource::new(input),
    );
    let limit = input.chars().count() + 1;
    for _ in 0..=limit {
        match scanner.next_lexeme() {
            Ok(lexeme) if lexeme.token == END_OF_INPUT => return,
            Ok(lexeme) => assert!(lexeme.span.end <= limit),
            Err(err) => assert!(err.span.end <= limit),
        }
    }
    panic!("scanner did not reach end of input");
});
