//! Canonical form tests

use loxwood::ast::{from_canonical, to_canonical};
use loxwood::{AstPrinter, Error, Expr, LiteralValue, RpnPrinter, Stmt, Token, TokenKind};
use pretty_assertions::assert_eq;

fn ident(name: &str, line: usize) -> Token {
    Token::identifier(name, line)
}

fn op(kind: TokenKind, lexeme: &str, line: usize) -> Token {
    Token::symbol(kind, lexeme, line)
}

fn string_token(text: &str, line: usize) -> Token {
    Token::new(
        TokenKind::String,
        format!("\"{}\"", text),
        Some(LiteralValue::String(text.to_string())),
        line,
    )
}

/// A program touching every variant of both families.
fn sample_program() -> Vec<Stmt> {
    vec![
        Stmt::var(ident("greeting", 1), Some(Expr::literal(LiteralValue::from("hi")))),
        Stmt::var(ident("pending", 2), None),
        Stmt::function(
            ident("shout", 3),
            vec![ident("times", 3)],
            vec![Stmt::r#while(
                Expr::binary(
                    Expr::variable(ident("times", 4)),
                    op(TokenKind::Greater, ">", 4),
                    Expr::literal(LiteralValue::Number(0.0)),
                ),
                Stmt::block(vec![
                    Stmt::print(Expr::call(
                        Expr::variable(ident("upper", 5)),
                        op(TokenKind::RightParen, ")", 5),
                        vec![Expr::variable(ident("greeting", 5))],
                    )),
                    Stmt::expression(Expr::assign(
                        ident("times", 6),
                        Expr::binary(
                            Expr::variable(ident("times", 6)),
                            op(TokenKind::Minus, "-", 6),
                            Expr::literal(LiteralValue::Number(1.0)),
                        ),
                    )),
                ]),
            )],
        ),
        Stmt::r#if(
            Expr::logical(
                Expr::unary(op(TokenKind::Bang, "!", 8), Expr::variable(ident("pending", 8))),
                op(TokenKind::Or, "or", 8),
                Expr::literal(LiteralValue::Bool(true)),
            ),
            Stmt::print(Expr::ternary(
                Expr::grouping(Expr::literal(LiteralValue::Nil)),
                op(TokenKind::Question, "?", 9),
                Expr::literal(LiteralValue::Number(2.5)),
                op(TokenKind::Colon, ":", 9),
                Expr::literal(LiteralValue::String("done".into())),
            )),
            Some(Stmt::print(Expr::literal(LiteralValue::Number(-3.0)))),
        ),
        Stmt::print(Expr::literal(LiteralValue::Nil)),
        Stmt::expression(Expr::variable(Token::new(
            TokenKind::Identifier,
            "quoted",
            None,
            11,
        ))),
        Stmt::print(Expr::literal(LiteralValue::String("line\nbreak".into()))),
        Stmt::expression(Expr::literal(LiteralValue::String("s".into()))),
        Stmt::print(Expr::variable(string_token("tok", 12))),
    ]
}

#[test]
fn test_round_trip_is_equal() {
    let program = sample_program();
    let text = to_canonical(&program).unwrap();
    let restored = from_canonical(&text).unwrap();
    assert_eq!(restored, program);
}

#[test]
fn test_round_trip_prints_identically() {
    let program = sample_program();
    let restored = from_canonical(&to_canonical(&program).unwrap()).unwrap();

    assert_eq!(
        AstPrinter.print_program(&restored),
        AstPrinter.print_program(&program)
    );
}

#[test]
fn test_round_trip_rpn_identical() {
    let tree = Expr::binary(
        Expr::grouping(Expr::binary(
            Expr::literal(LiteralValue::Number(1.0)),
            op(TokenKind::Plus, "+", 1),
            Expr::literal(LiteralValue::Number(2.0)),
        )),
        op(TokenKind::Star, "*", 1),
        Expr::literal(LiteralValue::Number(3.0)),
    );
    let program = vec![Stmt::expression(tree.clone())];
    let restored = from_canonical(&to_canonical(&program).unwrap()).unwrap();

    let Some(Stmt::Expression(stmt)) = restored.first() else {
        panic!("expected an expression statement, got {:?}", restored);
    };
    assert_eq!(RpnPrinter.print(stmt.expression()), RpnPrinter.print(&tree));
    assert_eq!(RpnPrinter.print(&tree), "1 2 + 3 *");
}

#[test]
fn test_canonical_text_is_deterministic() {
    let first = to_canonical(&sample_program()).unwrap();
    let second = to_canonical(&sample_program()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_tokens_keep_line_and_literal() {
    let program = vec![Stmt::print(Expr::variable(string_token("payload", 42)))];
    let restored = from_canonical(&to_canonical(&program).unwrap()).unwrap();

    let Stmt::Print(print) = &restored[0] else {
        panic!("expected print");
    };
    let Expr::Variable(var) = print.expression() else {
        panic!("expected variable");
    };
    assert_eq!(var.name().line, 42);
    assert_eq!(
        var.name().literal,
        Some(LiteralValue::String("payload".into()))
    );
}

#[test]
fn test_empty_program() {
    let text = to_canonical(&[]).unwrap();
    assert_eq!(from_canonical(&text).unwrap(), Vec::<Stmt>::new());
}

#[test]
fn test_garbage_is_rejected() {
    assert!(matches!(from_canonical("not json"), Err(Error::Canonical(_))));
    assert!(matches!(
        from_canonical(r#"[{"Print": {"expression": 1}}]"#),
        Err(Error::Canonical(_))
    ));
}

fn literal_number(program: &[Stmt]) -> f64 {
    let Some(Stmt::Print(print)) = program.first() else {
        panic!("expected print, got {:?}", program);
    };
    let Expr::Literal(literal) = print.expression() else {
        panic!("expected literal");
    };
    match literal.value() {
        LiteralValue::Number(n) => *n,
        other => panic!("expected number, got {:?}", other),
    }
}

fn round_trip_number(n: f64) -> f64 {
    let program = vec![Stmt::print(Expr::literal(LiteralValue::Number(n)))];
    let restored = from_canonical(&to_canonical(&program).unwrap()).unwrap();
    literal_number(&restored)
}

#[test]
fn test_non_finite_literals_round_trip() {
    assert_eq!(round_trip_number(f64::INFINITY), f64::INFINITY);
    assert_eq!(round_trip_number(f64::NEG_INFINITY), f64::NEG_INFINITY);
    assert!(round_trip_number(f64::NAN).is_nan());
}

#[test]
fn test_negative_zero_keeps_its_sign() {
    let n = round_trip_number(-0.0);
    assert_eq!(n, 0.0);
    assert!(n.is_sign_negative());
}

#[test]
fn test_infinite_literal_prints_identically_after_round_trip() {
    let program = vec![Stmt::print(Expr::literal(LiteralValue::Number(f64::INFINITY)))];
    let restored = from_canonical(&to_canonical(&program).unwrap()).unwrap();
    assert_eq!(restored, program);
    assert_eq!(AstPrinter.print_program(&restored), "(print inf)");
}
