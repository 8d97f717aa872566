use mikroc::{
    ast::{BinaryOperator, Fixity, Kind, Node, UnaryOperator},
    error::{Diagnostics, ParseError},
    interpreter::{
        context::Context,
        lexer::{Location, Token, tokenize},
        parser::core::parse_program,
    },
};
use pretty_assertions::assert_eq;

fn parse(source: &str) -> (Option<Node>, Context, Diagnostics) {
    let mut context = Context::new();
    let mut diagnostics = Diagnostics::new();
    let root = parse_program(source, &mut context, &mut diagnostics).unwrap();
    (root, context, diagnostics)
}

fn messages(source: &str) -> Vec<String> {
    parse(source).2.messages().to_vec()
}

#[test]
fn empty_program_has_no_root() {
    let (root, _, diagnostics) = parse("  // nothing here\n;;");
    assert!(root.is_none());
    assert!(!diagnostics.had_errors());
}

#[test]
fn statements_fold_into_left_nested_blocks() {
    let (root, _, _) = parse("a = 1; b = 2; c = 3;");

    let Some(Node::Block { first, second }) = root.as_ref() else {
        panic!("expected a block");
    };
    assert!(matches!(first.as_deref(), Some(Node::Block { .. })));
    assert!(matches!(second.as_deref(), Some(Node::Assign { .. })));
}

#[test]
fn precedence_builds_the_expected_tree() {
    let (root, _, _) = parse("x = 1 + 2 * 3;");

    let Some(Node::Assign { value, .. }) = root.as_ref() else {
        panic!("expected an assignment");
    };
    let Some(Node::Binary { op: BinaryOperator::Add, right, .. }) = value.as_deref() else {
        panic!("expected an addition");
    };
    assert!(matches!(right.as_deref(), Some(Node::Binary { op: BinaryOperator::Mul, .. })));
}

#[test]
fn increments_keep_their_fixity() {
    let (root, _, _) = parse("++x; y--;");

    let Some(Node::Block { first, second }) = root.as_ref() else {
        panic!("expected a block");
    };
    assert!(matches!(first.as_deref(), Some(Node::Increment { fixity: Fixity::Prefix, .. })));
    assert!(matches!(second.as_deref(), Some(Node::Decrement { fixity: Fixity::Postfix, .. })));
}

#[test]
fn not_keyword_and_bang_are_distinct() {
    let (root, _, _) = parse("print(not x);");

    let Some(Node::Print { operand, .. }) = root.as_ref() else {
        panic!("expected a print");
    };
    let operand = operand.as_deref().unwrap();
    assert!(matches!(operand, Node::Unary { op: UnaryOperator::NotWord, .. }));
    assert_eq!(operand.kind(), Kind::NOT_WORD);
}

#[test]
fn else_branch_is_wrapped() {
    let (root, _, _) = parse("if (x) y = 1; else y = 2;");

    let Some(Node::If { else_branch, .. }) = root.as_ref() else {
        panic!("expected an if");
    };
    assert!(matches!(else_branch.as_deref(), Some(Node::Else { .. })));
}

#[test]
fn parsing_registers_variables_and_strings() {
    let (_, context, _) = parse("x = 1; print(\"a\"); print(\"a\"); print(\"b\", y);");

    assert_eq!(context.variables.len(), 2);
    assert_eq!(context.strings.len(), 2);
    assert_eq!(context.variable("y"), Some(0));
    assert_eq!(context.variable("z"), None);
}

#[test]
fn syntax_error_reports_line_and_column() {
    assert_eq!(messages("x = 1;\n  y = * 2;\nz = 3;"),
               ["2.7 Syntax error: unexpected '*', expected an expression."]);
}

#[test]
fn recovery_keeps_later_statements() {
    let (root, _, diagnostics) = parse("a = 1;\nb = (2;\nc = 3;");

    assert_eq!(diagnostics.messages(), ["2.7 Syntax error: unexpected ';', expected ')'."]);
    let Some(Node::Block { second, .. }) = root.as_ref() else {
        panic!("expected a block");
    };
    assert!(matches!(second.as_deref(), Some(Node::Assign { .. })));
}

#[test]
fn recovery_stops_at_closing_brace() {
    let (_, context, diagnostics) = parse("while (x) { y = ) }\nz = 1;");

    assert_eq!(diagnostics.messages(), ["1.17 Syntax error: unexpected ')', expected an expression."]);
    assert_eq!(context.variable("z"), Some(0));
}

#[test]
fn stray_closing_brace_is_reported() {
    assert_eq!(messages("x = 1; }\ny = 2;"),
               ["1.8 Syntax error: unexpected '}', expected a statement."]);
}

#[test]
fn assignment_to_non_variable_reports_line_only() {
    assert_eq!(messages("x = 1;\n\n1 + x = 2;"),
               ["3 Lvalue required as the operand of '='."]);
    assert_eq!(messages("(x + 1)++;"), ["1 Lvalue required as the operand of '++'."]);
    assert_eq!(messages("scan(x + 1);"), ["1 Lvalue required as the operand of 'scan'."]);
}

#[test]
fn invalid_characters_are_reported_and_skipped() {
    let (root, _, diagnostics) = parse("x = 1 $ ;\nprint(x);");

    assert_eq!(diagnostics.messages(), ["1.7 Invalid token '$'."]);
    assert!(root.is_some());
}

#[test]
fn end_of_input_is_not_recoverable() {
    let mut context = Context::new();
    let mut diagnostics = Diagnostics::new();

    let error = parse_program("x = 1;\nif (x) {", &mut context, &mut diagnostics).unwrap_err();
    assert_eq!(error,
               ParseError::UnexpectedEndOfInput { expected: "'}'",
                                                  location: Location { line: 2, column: 9 }, });
    assert!(!error.is_recoverable());
}

#[test]
fn lexer_resolves_escapes_and_keywords() {
    let mut diagnostics = Diagnostics::new();
    let lexed = tokenize("print(\"a\\tb\\n\\\"\") and or not", &mut diagnostics);
    let tokens: Vec<Token> = lexed.tokens.into_iter().map(|(tok, _)| tok).collect();

    assert_eq!(tokens,
               [Token::Print,
                Token::LParen,
                Token::Str("a\tb\n\"".to_string()),
                Token::RParen,
                Token::And,
                Token::Or,
                Token::Not]);
}

#[test]
fn lexer_tracks_lines_through_block_comments() {
    let mut diagnostics = Diagnostics::new();
    let lexed = tokenize("/* one\ntwo */ x\n  y", &mut diagnostics);

    assert_eq!(lexed.tokens[0].1, Location { line: 2, column: 8 });
    assert_eq!(lexed.tokens[1].1, Location { line: 3, column: 3 });
}

#[test]
fn oversized_literal_is_invalid() {
    assert_eq!(messages("x = 2147483648;"),
               ["1.5 Invalid token '2147483648'.",
                "1.15 Syntax error: unexpected ';', expected an expression."]);
}
