use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use stx::lexer::{Automaton, CharCursor, Scanner, StrSource};
use stx::parser::{EngineConfig, Parser, SymbolStream};
use stx::table::TableQuery;
use stx::testing::fixtures::{self, lexeme_value, StatementCalculator};
use stx::testing::statement_tokens;
use stx::TokenId;

fn program(statements: usize) -> Vec<Vec<i64>> {
    (0..statements)
        .map(|i| {
            let i = i64::try_from(i).unwrap_or(0);
            vec![i, i + 1, i * 2]
        })
        .collect()
}

fn parse_tokens<T: TableQuery>(table: T, tokens: &[(TokenId, i64)]) -> Option<i64> {
    let mut parser = Parser::new(table, &fixtures::STMT_GRAMMAR, EngineConfig::default());
    let mut calc = StatementCalculator::default();
    parser
        .parse(SymbolStream::new(tokens.iter().copied()), &mut calc)
        .ok()?;
    parser.take_result()
}

fn bench_encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_list");
    for size in [10, 100, 1000] {
        let tokens = statement_tokens(&program(size));
        group.bench_with_input(BenchmarkId::new("packed", size), &tokens, |b, tokens| {
            b.iter(|| black_box(parse_tokens(&fixtures::STMT_PACKED, black_box(tokens))));
        });
        group.bench_with_input(BenchmarkId::new("dense", size), &tokens, |b, tokens| {
            b.iter(|| black_box(parse_tokens(&fixtures::STMT_DENSE, black_box(tokens))));
        });
    }
    group.finish();
}

fn bench_recovery(c: &mut Criterion) {
    // Every statement is missing its ';'
    let tokens: Vec<_> = statement_tokens(&program(100))
        .into_iter()
        .filter(|&(token, _)| token != fixtures::SEMICOLON)
        .collect();

    c.bench_function("recovery_missing_semicolons", |b| {
        b.iter(|| black_box(parse_tokens(&fixtures::STMT_PACKED, black_box(&tokens))));
    });
}

fn bench_regex(c: &mut Criterion) {
    let automaton = Automaton::decode(&fixtures::DIGITS_VERTICES, &fixtures::DIGITS_EDGES)
        .unwrap_or_else(|err| panic!("{err}"));
    let text = "1234567890".repeat(10);

    c.bench_function("regex_digits_100", |b| {
        b.iter(|| {
            let mut cursor = CharCursor::new(StrSource::new(black_box(&text)));
            black_box(automaton.matches(0, &mut cursor))
        });
    });
}

fn bench_scan_and_parse(c: &mut Criterion) {
    let automaton = fixtures::token_automaton().unwrap_or_else(|err| panic!("{err}"));
    let text = "12 + 30 + 7;\n".repeat(200);

    c.bench_function("scan_and_parse_200_statements", |b| {
        b.iter(|| {
            let scanner = Scanner::new(
                &automaton,
                &fixtures::TOKEN_MODES,
                &fixtures::KEYWORD_GRAMMAR,
                StrSource::new(black_box(&text)),
            );
            let mut parser = Parser::new(&fixtures::STMT_PACKED, &fixtures::STMT_GRAMMAR, EngineConfig::default());
            let mut calc = StatementCalculator::default();
            black_box(parser.parse(scanner.symbols(lexeme_value), &mut calc).is_ok())
        });
    });
}

criterion_group!(
    benches,
    bench_encodings,
    bench_recovery,
    bench_regex,
    bench_scan_and_parse
);
criterion_main!(benches);
