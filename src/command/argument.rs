//! Argument specifications
//!
//! An [`ArgSpec`] describes how the resolver consumes one argument from the
//! raw argument string. The tokenization behavior is a tagged [`TokenMode`]
//! variant, so illegal flag combinations (quoted numbers, option sets on
//! numeric arguments, ...) are unrepresentable once a spec is built. The
//! [`ArgSpecBuilder`] keeps a flat setter surface and rejects those
//! combinations with a fatal [`ConfigError`] when collapsing to a variant.

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigError;

/// Predicate over a resolved string value
pub type StringCheck = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Predicate over a resolved numeric value
pub type NumberCheck = Arc<dyn Fn(f64) -> bool + Send + Sync>;

/// Identifier of an argument within one command.
///
/// Command authors use the id to look resolved values up; the usual
/// pattern is a `const` per argument next to the command definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArgId(pub u32);

impl fmt::Display for ArgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the resolver consumes and validates one argument
pub enum TokenMode {
    /// One whitespace-delimited token, optionally restricted to a literal
    /// option set and checked by string predicates
    Word {
        options: Vec<String>,
        checks: Vec<StringCheck>,
    },
    /// One whitespace-delimited token parsed as `f64` and checked by
    /// numeric predicates
    Number { checks: Vec<NumberCheck> },
    /// The text between the first pair of double quotes, checked by
    /// string predicates
    Quoted { checks: Vec<StringCheck> },
    /// The command body chooses how many leading characters to consume
    Custom,
}

impl fmt::Debug for TokenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word { options, checks } => f
                .debug_struct("Word")
                .field("options", options)
                .field("checks", &checks.len())
                .finish(),
            Self::Number { checks } => f
                .debug_struct("Number")
                .field("checks", &checks.len())
                .finish(),
            Self::Quoted { checks } => f
                .debug_struct("Quoted")
                .field("checks", &checks.len())
                .finish(),
            Self::Custom => f.write_str("Custom"),
        }
    }
}

/// Immutable specification of one command argument
#[derive(Debug)]
pub struct ArgSpec {
    id: ArgId,
    name: String,
    description: String,
    optional: bool,
    error_message: Option<String>,
    default_text: Option<String>,
    /// NaN means no default was configured
    default_number: f64,
    mode: TokenMode,
}

impl ArgSpec {
    /// Start building an argument spec
    pub fn builder(id: u32, name: impl Into<String>) -> ArgSpecBuilder {
        ArgSpecBuilder::new(id, name)
    }

    pub fn id(&self) -> ArgId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Message shown for this argument in the wrong-usage reply; falls back
    /// to the description when no override is configured
    pub fn usage_message(&self) -> &str {
        match &self.error_message {
            Some(msg) if !msg.is_empty() => msg,
            _ => &self.description,
        }
    }

    pub fn default_text(&self) -> Option<&str> {
        self.default_text.as_deref()
    }

    /// Default numeric value; NaN when unset
    pub fn default_number(&self) -> f64 {
        self.default_number
    }

    pub fn mode(&self) -> &TokenMode {
        &self.mode
    }

    /// Literal options of a word argument, empty otherwise
    pub fn options(&self) -> &[String] {
        match &self.mode {
            TokenMode::Word { options, .. } => options,
            _ => &[],
        }
    }
}

/// Builder for [`ArgSpec`].
///
/// Keeps the flat boolean surface (`parse_number`, `quoted`,
/// `custom_tokenization`) for ergonomics; [`ArgSpecBuilder::build`]
/// validates the combination and collapses it into a [`TokenMode`].
pub struct ArgSpecBuilder {
    id: u32,
    name: String,
    description: String,
    optional: bool,
    error_message: Option<String>,
    options: Vec<String>,
    string_checks: Vec<StringCheck>,
    number_checks: Vec<NumberCheck>,
    parse_number: bool,
    quoted: bool,
    custom_tokenization: bool,
    default_text: Option<String>,
    default_number: f64,
}

impl ArgSpecBuilder {
    /// Create a builder for the argument with the given id and display name.
    ///
    /// Defaults: not optional, no description, no options or predicates,
    /// plain single-word tokenization, no default values.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            optional: false,
            error_message: None,
            options: Vec::new(),
            string_checks: Vec::new(),
            number_checks: Vec::new(),
            parse_number: false,
            quoted: false,
            custom_tokenization: false,
            default_text: None,
            default_number: f64::NAN,
        }
    }

    /// Description shown in inspection output and wrong-usage replies
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Override for the message shown when this argument is invalid
    pub fn error_message(mut self, msg: impl Into<String>) -> Self {
        self.error_message = Some(msg.into());
        self
    }

    /// Optional arguments may be omitted; they are only allowed at the
    /// tail of a command's argument list
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Restrict the value to a literal option set (matched
    /// case-insensitively). Empty options are ignored.
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for option in options {
            let option = option.into();
            if !option.is_empty() {
                self.options.push(option);
            }
        }
        self
    }

    /// Add a predicate run against the resolved string value
    pub fn string_check<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.string_checks.push(Arc::new(check));
        self
    }

    /// Add a predicate run against the parsed numeric value; requires
    /// [`parse_number`](Self::parse_number)
    pub fn number_check<F>(mut self, check: F) -> Self
    where
        F: Fn(f64) -> bool + Send + Sync + 'static,
    {
        self.number_checks.push(Arc::new(check));
        self
    }

    /// Parse the token as `f64` instead of keeping it as text
    pub fn parse_number(mut self, parse: bool) -> Self {
        self.parse_number = parse;
        self
    }

    /// The value must be typed between double quotes; useful for values
    /// containing spaces
    pub fn quoted(mut self, quoted: bool) -> Self {
        self.quoted = quoted;
        self
    }

    /// Let the command body decide how many leading characters the
    /// argument consumes (see
    /// [`CommandBody::choose_argument_span`](crate::command::CommandBody::choose_argument_span))
    pub fn custom_tokenization(mut self, custom: bool) -> Self {
        self.custom_tokenization = custom;
        self
    }

    /// Default string value used when an optional argument is omitted
    pub fn default_text(mut self, value: impl Into<String>) -> Self {
        self.default_text = Some(value.into());
        self
    }

    /// Default numeric value used when an optional numeric argument is
    /// omitted
    pub fn default_number(mut self, value: f64) -> Self {
        self.default_number = value;
        self
    }

    /// Validate the flag combination and produce the immutable spec
    pub fn build(self) -> Result<ArgSpec, ConfigError> {
        if self.parse_number && !self.options.is_empty() {
            return Err(ConfigError::NumberWithOptions { arg: self.id });
        }
        if !self.number_checks.is_empty() && !self.parse_number {
            return Err(ConfigError::NumberChecksWithoutNumber { arg: self.id });
        }
        if !self.string_checks.is_empty() && (self.custom_tokenization || self.parse_number) {
            return Err(ConfigError::StringChecksWithMode { arg: self.id });
        }
        if self.custom_tokenization && self.quoted {
            return Err(ConfigError::CustomAndQuoted { arg: self.id });
        }
        if (self.custom_tokenization || self.quoted) && self.parse_number {
            return Err(ConfigError::QuotedOrCustomNumber { arg: self.id });
        }

        let mode = if self.custom_tokenization {
            TokenMode::Custom
        } else if self.quoted {
            TokenMode::Quoted {
                checks: self.string_checks,
            }
        } else if self.parse_number {
            TokenMode::Number {
                checks: self.number_checks,
            }
        } else {
            TokenMode::Word {
                options: self.options,
                checks: self.string_checks,
            }
        };

        Ok(ArgSpec {
            id: ArgId(self.id),
            name: self.name,
            description: self.description,
            optional: self.optional,
            error_message: self.error_message,
            default_text: self.default_text,
            default_number: self.default_number,
            mode,
        })
    }
}
