use std::fs;

use mikroc::{
    error::{Error, RuntimeError},
    run,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn corpus_programs_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "mc"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                                                              panic!("Failed to read {expected_path:?}: {e}")
                                                          });
        let input = fs::read_to_string(path.with_extension("in")).unwrap_or_default();

        count += 1;
        let mut output = Vec::new();
        if let Err(e) = run(&source, input.as_bytes(), &mut output) {
            panic!("Program {path:?} failed:\n{source}\nError: {e:?}");
        }
        assert_eq!(String::from_utf8_lossy(&output), expected, "output of {path:?}");
    }

    assert!(count > 0, "No programs found in tests/programs");
}

fn output_of(src: &str) -> String {
    output_with_input(src, "")
}

fn output_with_input(src: &str, input: &str) -> String {
    let mut output = Vec::new();
    match run(src, input.as_bytes(), &mut output) {
        Ok(diagnostics) => {
            assert!(!diagnostics.had_errors(),
                    "Script reported errors: {:?}",
                    diagnostics.messages());
        },
        Err(e) => panic!("Script failed: {e}"),
    }
    String::from_utf8(output).expect("program output is UTF-8")
}

fn runtime_failure(src: &str) -> (RuntimeError, String) {
    let mut output = Vec::new();
    match run(src, std::io::empty(), &mut output) {
        Err(Error::Runtime(e)) => (e, String::from_utf8_lossy(&output).into_owned()),
        Err(Error::Parse(e)) => panic!("Script did not parse: {e}"),
        Ok(_) => panic!("Script succeeded but was expected to fail"),
    }
}

#[test]
fn block_with_print() {
    assert_eq!(output_of("{ x = 5; print(x); }"), "5");
}

#[test]
fn for_loop_counts() {
    assert_eq!(output_of("for(i=0; i<3; i++) print(i);"), "012");
}

#[test]
fn compound_multiplication() {
    assert_eq!(output_of("x = 4; x *= 3; print(x);"), "12");
}

#[test]
fn division_by_zero_stops_the_program() {
    let (error, output) = runtime_failure("{ x = 0; print(1); y = 10/x; print(2); }");

    assert!(matches!(error, RuntimeError::DivisionByZero));
    assert_eq!(error.to_string(), "Division by zero");
    assert_eq!(output, "1");
}

#[test]
fn modulo_by_zero_stops_the_program() {
    let (error, _) = runtime_failure("x = 7 % 0;");
    assert!(matches!(error, RuntimeError::DivisionByZero));
}

#[test]
fn compound_division_by_zero_is_not_a_division_by_zero() {
    let (error, _) = runtime_failure("x = 8; x /= 0;");
    assert!(matches!(error, RuntimeError::ArithmeticFault { .. }));

    let (error, _) = runtime_failure("x = 8; x %= 0;");
    assert_eq!(error.to_string(), "Arithmetic fault in '%='");
}

#[test]
fn operator_precedence_follows_c() {
    assert_eq!(output_of("print(2 + 3 * 4);"), "14");
    assert_eq!(output_of("print((2 + 3) * 4);"), "20");
    assert_eq!(output_of("print(1 << 2 + 1);"), "8");
    assert_eq!(output_of("print(6 & 3 | 8);"), "10");
    assert_eq!(output_of("print(1 + 2 == 3);"), "1");
    assert_eq!(output_of("print(10 - 4 - 3);"), "3");
    assert_eq!(output_of("print(-2 * -3);"), "6");
}

#[test]
fn assignment_is_right_associative_and_yields_its_value() {
    assert_eq!(output_of("a = b = 3; print(a + b);"), "6");
    assert_eq!(output_of("b = 1; a = b += 4; print(a); print(b);"), "55");
    assert_eq!(output_of("print(x = 9);"), "9");
}

#[test]
fn arithmetic_wraps_around() {
    assert_eq!(output_of("x = 2147483647; x++; print(x);"), "-2147483648");
    assert_eq!(output_of("print(-2147483647 - 2);"), "2147483647");
    assert_eq!(output_of("print(65536 * 65536);"), "0");
}

#[test]
fn division_truncates_towards_zero() {
    assert_eq!(output_of("print(-7 / 2); print(\" \"); print(-7 % 2);"), "-3 -1");
}

#[test]
fn shifts_and_bitwise_operators() {
    assert_eq!(output_of("print(-16 >> 2);"), "-4");
    assert_eq!(output_of("print(1 << 33);"), "2");
    assert_eq!(output_of("print(~0);"), "-1");
    assert_eq!(output_of("print(5 ^ 3);"), "6");
}

#[test]
fn logical_operators_yield_zero_or_one() {
    assert_eq!(output_of("print(3 && 4);"), "1");
    assert_eq!(output_of("print(0 || 0);"), "0");
    assert_eq!(output_of("print(2 and 0);"), "0");
    assert_eq!(output_of("print(0 or 5);"), "1");
    assert_eq!(output_of("print(!7); print(not 0);"), "01");
}

#[test]
fn logical_operators_evaluate_both_sides() {
    assert_eq!(output_of("x = 0; y = 0 && (x = 1); print(x);"), "1");
    assert_eq!(output_of("x = 0; y = 1 || (x = 1); print(x);"), "1");
}

#[test]
fn increment_and_decrement() {
    assert_eq!(output_of("x = 5; print(x++); print(x);"), "56");
    assert_eq!(output_of("x = 5; print(++x); print(x);"), "66");
    assert_eq!(output_of("x = 5; print(x--); print(--x);"), "53");
}

#[test]
fn incrementing_a_literal_updates_the_literal() {
    assert_eq!(output_of("for (i = 0; i < 3; i++) print(5++);"), "567");
}

#[test]
fn if_else_chains() {
    let src = "for (i = 0; i < 3; i++) { if (i == 0) print(\"zero \"); else if (i == 1) \
               print(\"one \"); else print(\"many\"); }";
    assert_eq!(output_of(src), "zero one many");
}

#[test]
fn dangling_else_binds_to_nearest_if() {
    assert_eq!(output_of("if (0) if (1) print(1); else print(2);"), "");
    assert_eq!(output_of("if (1) if (0) print(1); else print(2);"), "2");
}

#[test]
fn while_with_false_condition_never_runs() {
    assert_eq!(output_of("x = 0; while (x) { print(1); } print(2);"), "2");
}

#[test]
fn do_while_runs_once_with_false_condition() {
    assert_eq!(output_of("x = 0; do { print(1); } while (x); print(2);"), "12");
}

#[test]
fn for_loop_with_empty_condition_never_runs_body() {
    assert_eq!(output_of("for (i = 7; ; i++) print(1); print(i);"), "7");
}

#[test]
fn print_with_template() {
    assert_eq!(output_of("x = 42; print(\"x = %d\\n\", x);"), "x = 42\n");
    assert_eq!(output_of("print(\"[%5d|%-3x]\", 255);"), "[  255|%-3x]");
    assert_eq!(output_of("print(\"100%% done\\n\");"), "100% done\n");
    assert_eq!(output_of("print(\"%c%c\", 72);"), "H%c");
}

#[test]
fn template_ends_at_nul() {
    assert_eq!(output_of("print(\"ab\\0cd\"); print(\"%d\\0%d\", 7);"), "ab7");
}

#[test]
fn oversized_field_width_is_printed_verbatim() {
    assert_eq!(output_of("print(\"[%99999999999999999999d]\", 1);"),
               "[%99999999999999999999d]");
}

#[test]
fn print_of_integer_ignores_argument() {
    assert_eq!(output_of("x = 1; print(x, x = 5); print(x);"), "11");
}

#[test]
fn string_in_expression_is_its_first_character() {
    assert_eq!(output_of("x = \"A\" + 1; print(x);"), "66");
    assert_eq!(output_of("x = \"\"; print(x);"), "0");
}

#[test]
fn scan_reads_integers() {
    assert_eq!(output_with_input("scan(a); scan(b); print(a * b);", "  6\n-7\n"), "-42");
}

#[test]
fn scan_leaves_variable_on_bad_input() {
    assert_eq!(output_with_input("x = 3; scan(x); print(x);", "abc"), "3");
    assert_eq!(output_with_input("x = 3; scan(x); print(x);", ""), "3");
}

#[test]
fn comments_are_ignored() {
    assert_eq!(output_of("// one\nx = 1; /* two\n lines */ print(x); // trailing"), "1");
}

#[test]
fn unset_variables_are_zero() {
    assert_eq!(output_of("print(never_assigned);"), "0");
}

#[test]
fn recovered_syntax_errors_still_run_the_rest() {
    let mut output = Vec::new();
    let diagnostics = run("print(1);\nx = ;\nprint(2);", std::io::empty(), &mut output).unwrap();

    assert!(diagnostics.had_errors());
    assert_eq!(diagnostics.messages(),
               ["2.5 Syntax error: unexpected ';', expected an expression."]);
    assert_eq!(output, b"12");
}

#[test]
fn unfinished_program_is_not_run() {
    let mut output = Vec::new();
    let result = run("print(1);\nwhile (1) {", std::io::empty(), &mut output);

    assert!(matches!(result, Err(Error::Parse(_))));
    assert!(output.is_empty());
}

#[test]
fn long_straight_line_program_runs() {
    let source = "x = x + 1;\n".repeat(100_000) + "print(x);";
    assert_eq!(output_of(&source), "100000");
}
