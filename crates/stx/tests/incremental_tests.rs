//! Caller-driven parsing, one symbol per call

use stx::parser::{EngineConfig, Parser, ParserStatus, StepOutcome};
use stx::testing::fixtures::{self, Calculator, StatementCalculator, NUMBER, PLUS, SEMICOLON};
use stx::{ParseError, END_OF_INPUT};

#[test]
fn test_step_by_step_sum() {
    let mut parser = Parser::new(&fixtures::EXPR_PACKED, &fixtures::EXPR_GRAMMAR, EngineConfig::default());
    let mut calc = Calculator::default();

    assert_eq!(parser.parse_step(NUMBER, 3, &mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(PLUS, 0, &mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(NUMBER, 4, &mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(END_OF_INPUT, 0, &mut calc), StepOutcome::Accepted);
    assert_eq!(parser.result(), Some(&7));
    assert_eq!(parser.status(), ParserStatus::Accepted);
}

#[test]
fn test_yield_on_reduce() {
    let config = EngineConfig {
        yield_on_reduce: true,
        ..EngineConfig::default()
    };
    let mut parser = Parser::new(&fixtures::EXPR_DENSE, &fixtures::EXPR_GRAMMAR, config);
    let mut calc = Calculator::default();

    assert_eq!(parser.parse_step(NUMBER, 3, &mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(PLUS, 0, &mut calc), StepOutcome::ReducedAndContinue);
    assert_eq!(parser.resume(&mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(NUMBER, 4, &mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(END_OF_INPUT, 0, &mut calc), StepOutcome::ReducedAndContinue);
    assert_eq!(parser.depth(), 3);
    assert_eq!(parser.resume(&mut calc), StepOutcome::ReducedAndContinue);
    assert_eq!(parser.depth(), 1);
    assert_eq!(parser.resume(&mut calc), StepOutcome::Accepted);
    assert_eq!(parser.result(), Some(&7));
}

#[test]
fn test_resume_without_pending_symbol() {
    let mut parser = Parser::new(&fixtures::EXPR_DENSE, &fixtures::EXPR_GRAMMAR, EngineConfig::default());
    let mut calc = Calculator::default();
    assert_eq!(parser.resume(&mut calc), StepOutcome::Shifted);
    assert_eq!(parser.status(), ParserStatus::Ready);
}

#[test]
fn test_calls_after_accept_are_rejected() {
    let mut parser = Parser::new(&fixtures::EXPR_PACKED, &fixtures::EXPR_GRAMMAR, EngineConfig::default());
    let mut calc = Calculator::default();
    parser.parse_step(NUMBER, 1, &mut calc);
    assert_eq!(parser.parse_step(END_OF_INPUT, 0, &mut calc), StepOutcome::Accepted);
    assert_eq!(
        parser.parse_step(NUMBER, 2, &mut calc),
        StepOutcome::InternalError(ParseError::Finished {
            status: ParserStatus::Accepted
        })
    );
    assert_eq!(parser.result(), Some(&1));
}

#[test]
fn test_fatal_error_ends_parse() {
    let mut parser = Parser::new(&fixtures::EXPR_PACKED, &fixtures::EXPR_GRAMMAR, EngineConfig::default());
    let mut calc = Calculator::default();
    assert_eq!(
        parser.parse_step(99, 0, &mut calc),
        StepOutcome::InternalError(ParseError::RecoveryExhausted { state: 0, token: 99 })
    );
    assert_eq!(parser.status(), ParserStatus::Failed);
    assert_eq!(
        parser.resume(&mut calc),
        StepOutcome::InternalError(ParseError::Finished {
            status: ParserStatus::Failed
        })
    );

    parser.reset();
    assert_eq!(parser.parse_step(NUMBER, 5, &mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(END_OF_INPUT, 0, &mut calc), StepOutcome::Accepted);
    assert_eq!(parser.result(), Some(&5));
}

#[test]
fn test_incremental_recovery() {
    let mut parser = Parser::new(&fixtures::STMT_DENSE, &fixtures::STMT_GRAMMAR, EngineConfig::default());
    let mut calc = StatementCalculator::default();

    assert_eq!(parser.parse_step(NUMBER, 3, &mut calc), StepOutcome::Shifted);
    // Each later number is shifted only after a ';' is synthesized
    for value in [4, 4, 4] {
        assert_eq!(parser.parse_step(NUMBER, value, &mut calc), StepOutcome::ParsingError);
    }
    assert_eq!(parser.parse_step(END_OF_INPUT, 0, &mut calc), StepOutcome::Accepted);
    assert_eq!(calc.results, vec![3, 4, 4, 4]);
    assert_eq!(parser.error_count(), 1);
    assert_eq!(calc.reports.len(), 1);
}

#[test]
fn test_resynchronized_symbol_is_a_parsing_error() {
    let mut parser = Parser::new(&fixtures::STMT_PACKED, &fixtures::STMT_GRAMMAR, EngineConfig::default());
    let mut calc = StatementCalculator::default();

    assert_eq!(parser.parse_step(NUMBER, 3, &mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(NUMBER, 4, &mut calc), StepOutcome::ParsingError);
    assert_eq!(calc.reports.len(), 1);
    assert_eq!(parser.stats().dropped_tokens, 0);

    // Clean symbols afterwards are plain shifts again
    assert_eq!(parser.parse_step(PLUS, 0, &mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(NUMBER, 1, &mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(SEMICOLON, 0, &mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(END_OF_INPUT, 0, &mut calc), StepOutcome::Accepted);
    assert_eq!(calc.results, vec![3, 5]);
}

#[test]
fn test_recovery_reported_across_yielded_reductions() {
    let config = EngineConfig {
        yield_on_reduce: true,
        ..EngineConfig::default()
    };
    let mut parser = Parser::new(&fixtures::STMT_DENSE, &fixtures::STMT_GRAMMAR, config);
    let mut calc = StatementCalculator::default();

    assert_eq!(parser.parse_step(NUMBER, 3, &mut calc), StepOutcome::Shifted);
    let mut outcome = parser.parse_step(NUMBER, 4, &mut calc);
    while outcome == StepOutcome::ReducedAndContinue {
        outcome = parser.resume(&mut calc);
    }
    assert_eq!(outcome, StepOutcome::ParsingError);
    assert_eq!(calc.results, vec![3]);
    assert_eq!(calc.reports.len(), 1);
}

#[test]
fn test_new_symbol_while_pending_is_rejected() {
    let config = EngineConfig {
        yield_on_reduce: true,
        ..EngineConfig::default()
    };
    let mut parser = Parser::new(&fixtures::EXPR_PACKED, &fixtures::EXPR_GRAMMAR, config);
    let mut calc = Calculator::default();

    assert_eq!(parser.parse_step(NUMBER, 3, &mut calc), StepOutcome::Shifted);
    assert_eq!(parser.parse_step(PLUS, 0, &mut calc), StepOutcome::ReducedAndContinue);
    assert_eq!(
        parser.parse_step(NUMBER, 9, &mut calc),
        StepOutcome::InternalError(ParseError::SymbolPending {
            pending: PLUS,
            token: NUMBER
        })
    );
    assert_eq!(parser.status(), ParserStatus::Reducing);

    // The pending '+' is still the one that gets shifted
    assert_eq!(parser.resume(&mut calc), StepOutcome::Shifted);
    assert_eq!(parser.state(), 3);
    assert_eq!(parser.parse_step(NUMBER, 4, &mut calc), StepOutcome::Shifted);
    let mut outcome = parser.parse_step(END_OF_INPUT, 0, &mut calc);
    while outcome == StepOutcome::ReducedAndContinue {
        outcome = parser.resume(&mut calc);
    }
    assert_eq!(outcome, StepOutcome::Accepted);
    assert_eq!(parser.result(), Some(&7));
}

#[test]
fn test_valid_transitions_follow_state() {
    let mut parser = Parser::new(&fixtures::STMT_PACKED, &fixtures::STMT_GRAMMAR, EngineConfig::default());
    let mut calc = StatementCalculator::default();

    assert_eq!(parser.valid_transitions().as_slice(), &[NUMBER]);
    parser.parse_step(NUMBER, 1, &mut calc);
    assert_eq!(
        parser.valid_transitions().as_slice(),
        &[END_OF_INPUT, NUMBER, PLUS, SEMICOLON]
    );
    parser.parse_step(PLUS, 0, &mut calc);
    assert_eq!(parser.state(), 7);
    assert_eq!(parser.valid_transitions().as_slice(), &[NUMBER]);
    parser.parse_step(NUMBER, 2, &mut calc);
    parser.parse_step(SEMICOLON, 0, &mut calc);
    assert_eq!(parser.state(), 6);
    parser.parse_step(END_OF_INPUT, 0, &mut calc);
    assert_eq!(calc.results, vec![3]);
}
