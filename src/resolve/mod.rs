//! Argument resolution
//!
//! Turns the raw argument string of a matched command into per-argument
//! values, validated against the command's [`ArgSpec`] list. Arguments are
//! processed strictly in declared order, each consuming a prefix of the
//! remaining string. Invalid arguments are collected rather than aborting
//! the pass, so the wrong-usage reply can list all of them at once.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use crate::command::{ArgId, ArgSpec, CommandSpec, NumberCheck, StringCheck, TokenMode};

#[cfg(test)]
mod tests;

/// Callback that decides how many leading characters a custom-tokenized
/// argument consumes; see
/// [`CommandBody::choose_argument_span`](crate::command::CommandBody::choose_argument_span)
pub type SpanChooser<'a> = &'a dyn Fn(ArgId, &str) -> usize;

/// Resolved argument values of one dispatch attempt.
///
/// Constructed by [`resolve`], immutable afterwards and discarded when the
/// dispatch completes.
#[derive(Debug)]
pub struct ResolvedArgs {
    texts: HashMap<ArgId, String>,
    numbers: HashMap<ArgId, f64>,
    invalid: BTreeSet<ArgId>,
    remainder: String,
    raw_only: bool,
}

impl ResolvedArgs {
    fn raw(remainder: impl Into<String>) -> Self {
        Self {
            texts: HashMap::new(),
            numbers: HashMap::new(),
            invalid: BTreeSet::new(),
            remainder: remainder.into(),
            raw_only: true,
        }
    }

    /// True iff no argument was judged invalid
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Resolved string value of an argument
    ///
    /// # Panics
    /// Panics on a raw-args command; raw-args bodies read
    /// [`raw_remainder`](Self::raw_remainder) instead.
    pub fn text(&self, arg: ArgId) -> Option<&str> {
        self.check_not_raw_only();
        self.texts.get(&arg).map(String::as_str)
    }

    /// Resolved numeric value of an argument
    ///
    /// # Panics
    /// Panics on a raw-args command.
    pub fn number(&self, arg: ArgId) -> Option<f64> {
        self.check_not_raw_only();
        self.numbers.get(&arg).copied()
    }

    /// Whether the argument resolved to any value
    ///
    /// # Panics
    /// Panics on a raw-args command.
    pub fn is_present(&self, arg: ArgId) -> bool {
        self.check_not_raw_only();
        self.texts.contains_key(&arg) || self.numbers.contains_key(&arg)
    }

    /// Ids of the arguments judged invalid, in id order
    pub fn invalid_ids(&self) -> &BTreeSet<ArgId> {
        &self.invalid
    }

    /// Unconsumed rest of the argument string. For raw-args commands this
    /// is the entire post-name string.
    pub fn raw_remainder(&self) -> &str {
        &self.remainder
    }

    fn check_not_raw_only(&self) {
        assert!(
            !self.raw_only,
            "the command is declared raw-args only; use raw_remainder()"
        );
    }
}

/// Resolve `raw` against the command's argument specs.
///
/// `choose` is consulted for custom-tokenized arguments. Raw-args commands
/// skip resolution entirely: the whole string becomes the remainder and the
/// result is always valid.
pub fn resolve(spec: &CommandSpec, raw: &str, choose: SpanChooser<'_>) -> ResolvedArgs {
    if spec.is_raw_args() {
        return ResolvedArgs::raw(raw);
    }

    let mut texts = HashMap::new();
    let mut numbers = HashMap::new();
    let mut invalid = BTreeSet::new();
    let mut rest = raw.trim();

    for arg in spec.args() {
        trace!(argument = arg.name(), remaining = rest, "resolving argument");
        rest = rest.trim_start();

        if rest.is_empty() {
            if arg.is_optional() {
                apply_default(arg, &mut texts, &mut numbers);
            } else {
                debug!(argument = arg.name(), "required argument has no value");
                invalid.insert(arg.id());
            }
            continue;
        }

        match arg.mode() {
            TokenMode::Word { options, checks } => {
                let token = take_token(&mut rest);
                texts.insert(arg.id(), token.to_string());
                if !option_allowed(token, options, arg.is_optional()) {
                    debug!(argument = arg.name(), value = token, "value not in option set");
                    invalid.insert(arg.id());
                }
                run_string_checks(arg, token, checks, &mut invalid);
            }
            TokenMode::Number { checks } => {
                let token = take_token(&mut rest);
                texts.insert(arg.id(), token.to_string());
                match token.parse::<f64>() {
                    Ok(value) => {
                        numbers.insert(arg.id(), value);
                        run_number_checks(arg, value, checks, &mut invalid);
                    }
                    Err(_) => {
                        debug!(argument = arg.name(), value = token, "not a number");
                        invalid.insert(arg.id());
                    }
                }
            }
            TokenMode::Custom => {
                let span = choose(arg.id(), rest);
                if span == 0 {
                    debug!(argument = arg.name(), "chooser declined the remaining input");
                    invalid.insert(arg.id());
                } else {
                    let end = char_span_to_bytes(rest, span);
                    let value = &rest[..end];
                    trace!(argument = arg.name(), value, "chooser picked a span");
                    texts.insert(arg.id(), value.to_string());
                    rest = &rest[end..];
                }
            }
            TokenMode::Quoted { checks } => match take_quoted(&mut rest) {
                Some(value) => {
                    run_string_checks(arg, value, checks, &mut invalid);
                    texts.insert(arg.id(), value.to_string());
                }
                None => {
                    debug!(argument = arg.name(), "quoted value not found");
                    invalid.insert(arg.id());
                }
            },
        }
    }

    ResolvedArgs {
        texts,
        numbers,
        invalid,
        remainder: rest.to_string(),
        raw_only: false,
    }
}

/// Split the leading whitespace-delimited token off `rest`
fn take_token<'a>(rest: &mut &'a str) -> &'a str {
    let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let token = &rest[..end];
    *rest = rest[end..].trim_start();
    token
}

/// Extract the text strictly between the first pair of double quotes and
/// advance `rest` past the closing quote. `None` when either quote is
/// missing; `rest` is left untouched in that case.
fn take_quoted<'a>(rest: &mut &'a str) -> Option<&'a str> {
    let open = rest.find('"')?;
    let after_open = &rest[open + 1..];
    let close = after_open.find('"')?;
    let value = &after_open[..close];
    *rest = &after_open[close + 1..];
    Some(value)
}

/// The option-mismatch check is waived for optional arguments
fn option_allowed(token: &str, options: &[String], optional: bool) -> bool {
    if options.is_empty() || optional {
        return true;
    }
    options.iter().any(|o| o.eq_ignore_ascii_case(token))
}

fn run_string_checks(
    arg: &ArgSpec,
    value: &str,
    checks: &[StringCheck],
    invalid: &mut BTreeSet<ArgId>,
) {
    for check in checks {
        if !check(value) {
            debug!(argument = arg.name(), value, "string predicate failed");
            invalid.insert(arg.id());
            break;
        }
    }
}

fn run_number_checks(
    arg: &ArgSpec,
    value: f64,
    checks: &[NumberCheck],
    invalid: &mut BTreeSet<ArgId>,
) {
    for check in checks {
        if !check(value) {
            debug!(argument = arg.name(), value, "numeric predicate failed");
            invalid.insert(arg.id());
            break;
        }
    }
}

fn apply_default(arg: &ArgSpec, texts: &mut HashMap<ArgId, String>, numbers: &mut HashMap<ArgId, f64>) {
    if matches!(arg.mode(), TokenMode::Number { .. }) {
        trace!(
            argument = arg.name(),
            default = arg.default_number(),
            "argument omitted, using numeric default"
        );
        numbers.insert(arg.id(), arg.default_number());
    } else if let Some(default) = arg.default_text() {
        trace!(argument = arg.name(), default, "argument omitted, using default");
        texts.insert(arg.id(), default.to_string());
    }
}

/// Convert a chooser-returned character count into a byte offset, clamped
/// to the end of the string
fn char_span_to_bytes(s: &str, chars: usize) -> usize {
    s.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(s.len())
}
