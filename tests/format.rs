use mikroc::interpreter::evaluator::format::render;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn rendered(template: &str, argument: Option<i32>) -> String {
    String::from_utf8(render(template, argument)).unwrap()
}

#[rstest]
#[case("%d", 42, "42")]
#[case("%i", -42, "-42")]
#[case("%5d", 42, "   42")]
#[case("%-5d|", 42, "42   |")]
#[case("%05d", -42, "-0042")]
#[case("%+d", 7, "+7")]
#[case("% d", 7, " 7")]
#[case("%.3d", 7, "007")]
#[case("%8.3d", -7, "    -007")]
#[case("%08.3d", 7, "     007")]
#[case("%.0d", 0, "")]
#[case("%u", -2, "4294967294")]
#[case("%x", 48879, "beef")]
#[case("%X", 48879, "BEEF")]
#[case("%#x", 48879, "0xbeef")]
#[case("%#x", 0, "0")]
#[case("%o", 8, "10")]
#[case("%#o", 8, "010")]
#[case("%#o", 0, "0")]
#[case("%c", 97, "a")]
#[case("%3c", 97, "  a")]
#[case("%-3c|", 97, "a  |")]
#[case("%hhd %ld %lld", 5, "5 %ld %lld")]
#[case("%d", i32::MIN, "-2147483648")]
fn conversions(#[case] template: &str, #[case] argument: i32, #[case] expected: &str) {
    assert_eq!(rendered(template, Some(argument)), expected);
}

#[test]
fn percent_escape_always_collapses() {
    assert_eq!(rendered("50%% of %d%%", Some(8)), "50% of 8%");
    assert_eq!(rendered("%%d", None), "%d");
}

#[test]
fn only_the_first_conversion_consumes_the_argument() {
    assert_eq!(rendered("%d and %d", Some(1)), "1 and %d");
    assert_eq!(rendered("%x%x", Some(255)), "ff%x");
}

#[test]
fn conversions_without_argument_are_verbatim() {
    assert_eq!(rendered("value: %5d\n", None), "value: %5d\n");
}

#[test]
fn unsupported_directives_are_verbatim() {
    assert_eq!(rendered("%s|%f|%d", Some(3)), "%s|%f|3");
    assert_eq!(rendered("trailing %", Some(3)), "trailing %");
    assert_eq!(rendered("trailing %-0", Some(3)), "trailing %-0");
}

#[rstest]
#[case("%99999999999999999999d")]
#[case("%.99999999999999999999d")]
#[case("%-2147483648x")]
#[case("%5.2147483648o")]
fn oversized_fields_are_verbatim(#[case] template: &str) {
    assert_eq!(rendered(template, Some(1)), template);
    assert_eq!(rendered(&format!("{template}|%d"), Some(1)), format!("{template}|1"));
}

#[test]
fn template_stops_at_nul() {
    assert_eq!(rendered("ab\0cd", None), "ab");
    assert_eq!(rendered("%d\0%d", Some(4)), "4");
    assert_eq!(rendered("\0%d", Some(4)), "");
}

#[test]
fn plain_text_is_copied() {
    assert_eq!(rendered("h\u{e9}llo\tw\u{f6}rld\n", Some(1)), "h\u{e9}llo\tw\u{f6}rld\n");
}

#[test]
fn char_conversion_emits_raw_bytes() {
    assert_eq!(render("%c", Some(0x1ff)), [0xff]);
    assert_eq!(render("%c", Some(0)), [0]);
}
