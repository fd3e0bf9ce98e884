use super::*;
use crate::command::{ArgSpec, CommandSpec};

const NO_CHOOSER: fn(ArgId, &str) -> usize = |_, _| 0;

fn spec(builders: Vec<crate::command::ArgSpecBuilder>) -> CommandSpec {
    let mut builder = CommandSpec::builder("test");
    for arg in builders {
        builder = builder.argument(arg);
    }
    builder.build().unwrap()
}

#[test]
fn single_word_arguments_consume_in_order() {
    let spec = spec(vec![
        ArgSpec::builder(0, "first"),
        ArgSpec::builder(1, "second"),
    ]);
    let args = resolve(&spec, "  alpha   beta gamma", &NO_CHOOSER);
    assert!(args.is_valid());
    assert_eq!(args.text(ArgId(0)), Some("alpha"));
    assert_eq!(args.text(ArgId(1)), Some("beta"));
    assert_eq!(args.raw_remainder(), "gamma");
}

#[test]
fn missing_required_argument_is_invalid() {
    let spec = spec(vec![ArgSpec::builder(0, "target")]);
    let args = resolve(&spec, "", &NO_CHOOSER);
    assert!(!args.is_valid());
    assert!(args.invalid_ids().contains(&ArgId(0)));
    assert!(!args.is_present(ArgId(0)));
}

#[test]
fn missing_optional_numeric_argument_uses_default() {
    let spec = spec(vec![ArgSpec::builder(0, "count")
        .optional(true)
        .parse_number(true)
        .default_number(1.0)]);
    let args = resolve(&spec, "", &NO_CHOOSER);
    assert!(args.is_valid());
    assert_eq!(args.number(ArgId(0)), Some(1.0));
}

#[test]
fn missing_optional_text_argument_uses_default() {
    let spec = spec(vec![ArgSpec::builder(0, "greeting")
        .optional(true)
        .default_text("hello")]);
    let args = resolve(&spec, "   ", &NO_CHOOSER);
    assert!(args.is_valid());
    assert_eq!(args.text(ArgId(0)), Some("hello"));
}

#[test]
fn missing_optional_without_default_is_absent_but_valid() {
    let spec = spec(vec![ArgSpec::builder(0, "greeting").optional(true)]);
    let args = resolve(&spec, "", &NO_CHOOSER);
    assert!(args.is_valid());
    assert!(!args.is_present(ArgId(0)));
}

#[test]
fn option_mismatch_marks_invalid() {
    let spec = spec(vec![ArgSpec::builder(0, "mode").options(["a", "b"])]);
    let args = resolve(&spec, "c", &NO_CHOOSER);
    assert!(!args.is_valid());
    assert!(args.invalid_ids().contains(&ArgId(0)));
    // the raw token is still recorded
    assert_eq!(args.text(ArgId(0)), Some("c"));
}

#[test]
fn option_match_is_case_insensitive() {
    let spec = spec(vec![ArgSpec::builder(0, "mode").options(["On", "Off"])]);
    let args = resolve(&spec, "ON", &NO_CHOOSER);
    assert!(args.is_valid());
}

#[test]
fn option_check_is_waived_for_optional_arguments() {
    let spec = spec(vec![ArgSpec::builder(0, "mode")
        .optional(true)
        .options(["a", "b"])]);
    let args = resolve(&spec, "c", &NO_CHOOSER);
    assert!(args.is_valid());
    assert_eq!(args.text(ArgId(0)), Some("c"));
}

#[test]
fn numeric_parse_failure_marks_invalid() {
    let spec = spec(vec![ArgSpec::builder(0, "amount").parse_number(true)]);
    let args = resolve(&spec, "abc", &NO_CHOOSER);
    assert!(!args.is_valid());
    assert!(args.invalid_ids().contains(&ArgId(0)));
    assert_eq!(args.number(ArgId(0)), None);
}

#[test]
fn numeric_predicate_failure_marks_invalid() {
    let spec = spec(vec![ArgSpec::builder(0, "amount")
        .parse_number(true)
        .number_check(|n| n > 0.0)]);
    let args = resolve(&spec, "-3", &NO_CHOOSER);
    assert!(!args.is_valid());

    let args = resolve(&spec, "3", &NO_CHOOSER);
    assert!(args.is_valid());
    assert_eq!(args.number(ArgId(0)), Some(3.0));
}

#[test]
fn string_predicate_failure_marks_invalid() {
    let spec = spec(vec![
        ArgSpec::builder(0, "name").string_check(|s| s.len() >= 3)
    ]);
    let args = resolve(&spec, "ab", &NO_CHOOSER);
    assert!(!args.is_valid());
}

#[test]
fn quoted_round_trip_keeps_remainder() {
    let spec = spec(vec![ArgSpec::builder(0, "phrase").quoted(true)]);
    let args = resolve(&spec, "\"hello world\" rest", &NO_CHOOSER);
    assert!(args.is_valid());
    assert_eq!(args.text(ArgId(0)), Some("hello world"));
    assert_eq!(args.raw_remainder(), " rest");
}

#[test]
fn quoted_value_may_start_mid_string() {
    let spec = spec(vec![
        ArgSpec::builder(0, "who"),
        ArgSpec::builder(1, "phrase").quoted(true),
    ]);
    let args = resolve(&spec, "alice \"good morning\"", &NO_CHOOSER);
    assert!(args.is_valid());
    assert_eq!(args.text(ArgId(0)), Some("alice"));
    assert_eq!(args.text(ArgId(1)), Some("good morning"));
}

#[test]
fn missing_quotes_mark_invalid_and_consume_nothing() {
    let spec = spec(vec![
        ArgSpec::builder(0, "phrase").quoted(true),
        ArgSpec::builder(1, "tail").optional(true),
    ]);
    let args = resolve(&spec, "no quotes here", &NO_CHOOSER);
    assert!(!args.is_valid());
    assert!(args.invalid_ids().contains(&ArgId(0)));
    // processing continues with the untouched remainder
    assert_eq!(args.text(ArgId(1)), Some("no"));
}

#[test]
fn unclosed_quote_marks_invalid() {
    let spec = spec(vec![ArgSpec::builder(0, "phrase").quoted(true)]);
    let args = resolve(&spec, "\"dangling", &NO_CHOOSER);
    assert!(!args.is_valid());
}

#[test]
fn quoted_string_predicates_run_against_inner_text() {
    let spec = spec(vec![ArgSpec::builder(0, "phrase")
        .quoted(true)
        .string_check(|s| s.contains(' '))]);
    let args = resolve(&spec, "\"oneword\"", &NO_CHOOSER);
    assert!(!args.is_valid());
}

#[test]
fn custom_chooser_consumes_chosen_span() {
    let spec = spec(vec![
        ArgSpec::builder(0, "picked").custom_tokenization(true),
        ArgSpec::builder(1, "rest"),
    ]);
    // the chooser takes the first two words ("red apple" = 9 chars)
    let choose = |_: ArgId, s: &str| if s.starts_with("red apple") { 9 } else { 0 };
    let args = resolve(&spec, "red apple pie", &choose);
    assert!(args.is_valid());
    assert_eq!(args.text(ArgId(0)), Some("red apple"));
    assert_eq!(args.text(ArgId(1)), Some("pie"));
}

#[test]
fn declining_chooser_marks_invalid_and_consumes_nothing() {
    let spec = spec(vec![
        ArgSpec::builder(0, "picked").custom_tokenization(true),
        ArgSpec::builder(1, "word"),
    ]);
    let args = resolve(&spec, "anything", &NO_CHOOSER);
    assert!(!args.is_valid());
    assert!(args.invalid_ids().contains(&ArgId(0)));
    assert_eq!(args.text(ArgId(1)), Some("anything"));
}

#[test]
fn chooser_span_is_clamped_to_input_length() {
    let spec = spec(vec![ArgSpec::builder(0, "picked").custom_tokenization(true)]);
    let choose = |_: ArgId, _: &str| usize::MAX;
    let args = resolve(&spec, "short", &choose);
    assert!(args.is_valid());
    assert_eq!(args.text(ArgId(0)), Some("short"));
}

#[test]
fn raw_args_mode_bypasses_resolution() {
    let spec = CommandSpec::builder("echo")
        .raw_args("text", "text to echo")
        .build()
        .unwrap();
    let args = resolve(&spec, "anything at all \" unbalanced", &NO_CHOOSER);
    assert!(args.is_valid());
    assert_eq!(args.raw_remainder(), "anything at all \" unbalanced");
}

#[test]
#[should_panic(expected = "raw-args only")]
fn typed_accessors_panic_in_raw_mode() {
    let spec = CommandSpec::builder("echo")
        .raw_args("text", "text to echo")
        .build()
        .unwrap();
    let args = resolve(&spec, "anything", &NO_CHOOSER);
    let _ = args.text(ArgId(0));
}

#[test]
fn all_invalid_arguments_are_collected() {
    let spec = spec(vec![
        ArgSpec::builder(0, "mode").options(["a", "b"]),
        ArgSpec::builder(1, "amount").parse_number(true),
    ]);
    let args = resolve(&spec, "z nope", &NO_CHOOSER);
    let invalid: Vec<ArgId> = args.invalid_ids().iter().copied().collect();
    assert_eq!(invalid, vec![ArgId(0), ArgId(1)]);
}
