#![no_main]
use libfuzzer_sys::fuzz_target;
use stx::parser::{EngineConfig, Parser, SymbolStream};
use stx::testing::fixtures::{self, StatementCalculator, NUMBER, PLUS, SEMICOLON};
use stx::TokenId;

fuzz_target!(|data: &[u8]| {
    // Two bits per token, the rest of the byte is the value
    let tokens: Vec<(TokenId, i64)> = data
        .iter()
        .map(|&byte| {
            let token = match byte & 0b11 {
                0 => NUMBER,
                1 => PLUS,
                2 => SEMICOLON,
                _ => TokenId::from(byte),
            };
            (token, i64::from(byte >> 2))
        })
        .collect();

    let mut packed_calc = StatementCalculator::default();
    let mut packed = Parser::new(&fixtures::STMT_PACKED, &fixtures::STMT_GRAMMAR, EngineConfig::default());
    let packed_result = packed.parse(SymbolStream::new(tokens.clone()), &mut packed_calc);

    let mut dense_calc = StatementCalculator::default();
    let mut dense = Parser::new(&fixtures::STMT_DENSE, &fixtures::STMT_GRAMMAR, EngineConfig::default());
    let dense_result = dense.parse(SymbolStream::new(tokens), &mut dense_calc);

    // Both encodings must drive the engine identically
    assert_eq!(packed_result, dense_result);
    assert_eq!(packed_calc.results, dense_calc.results);
    assert_eq!(packed.stats(), dense.stats());
    if let Err(err) = packed_result {
        assert!(err.is_syntax_related(), "unexpected error {err:?}");
    }
});
