//! Single-dash flag parsing for console command arguments.
//!
//! Operators type flags as `-name value`, `-name=value`, or `--name value`.
//! Boolean flags take no value unless written as `-name=true|false`. Parsing
//! stops at the first token that is not a flag or after a bare `--`; any
//! remaining tokens are kept as positional arguments.

use thiserror::Error;

/// Value type accepted by a flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Free-form text. Defaults to the empty string.
    String,
    /// Signed integer. Defaults to `0`.
    ///
    /// Accepts `0x`, `0o`, `0b`, and leading-zero octal prefixes, and `_`
    /// between digits.
    Integer,
    /// Presence switch. Defaults to `false`.
    Boolean,
}

impl FlagKind {
    /// Returns the name used in usage and error text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
        }
    }
}

/// Declaration of a single flag accepted by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    /// Flag name without leading dashes.
    pub name: &'static str,
    /// Expected value type.
    pub kind: FlagKind,
    /// One-line description.
    pub help: &'static str,
}

impl FlagSpec {
    pub(crate) const fn string(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            kind: FlagKind::String,
            help,
        }
    }

    pub(crate) const fn integer(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            kind: FlagKind::Integer,
            help,
        }
    }

    pub(crate) const fn boolean(name: &'static str, help: &'static str) -> Self {
        Self {
            name,
            kind: FlagKind::Boolean,
            help,
        }
    }
}

/// Typed value captured for a flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    /// Text value.
    String(String),
    /// Integer value.
    Integer(i64),
    /// Boolean value.
    Boolean(bool),
}

/// Errors raised for malformed flag syntax.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagError {
    /// The flag is not declared for the command.
    #[error("flag provided but not defined: -{flag}")]
    Undefined {
        /// Flag name as typed.
        flag: String,
    },
    /// A value-taking flag appeared as the final token.
    #[error("flag needs an argument: -{flag}")]
    MissingValue {
        /// Flag name.
        flag: String,
    },
    /// The value could not be converted to the declared type.
    #[error("invalid value \"{value}\" for flag -{flag}: expected {kind}")]
    InvalidValue {
        /// Flag name.
        flag: String,
        /// Offending value.
        value: String,
        /// Declared type name.
        kind: &'static str,
    },
    /// `-h` or `-help` was given to a command that does not declare it.
    #[error("flag: help requested")]
    HelpRequested,
    /// The token looked like a flag but had no usable name.
    #[error("bad flag syntax: {token}")]
    BadSyntax {
        /// Offending token.
        token: String,
    },
}

/// Flags captured for one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFlags {
    values: Vec<(&'static str, FlagValue)>,
    positional: Vec<String>,
}

impl ParsedFlags {
    /// Returns the text value of `name`, or the empty string when unset.
    #[must_use]
    pub fn string(&self, name: &str) -> &str {
        match self.lookup(name) {
            Some(FlagValue::String(value)) => value.as_str(),
            _ => "",
        }
    }

    /// Returns the integer value of `name`, or `0` when unset.
    #[must_use]
    pub fn integer(&self, name: &str) -> i64 {
        match self.lookup(name) {
            Some(FlagValue::Integer(value)) => *value,
            _ => 0,
        }
    }

    /// Returns the boolean value of `name`, or `false` when unset.
    #[must_use]
    pub fn boolean(&self, name: &str) -> bool {
        matches!(self.lookup(name), Some(FlagValue::Boolean(true)))
    }

    /// Tokens left over after flag parsing stopped.
    #[must_use]
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    fn lookup(&self, name: &str) -> Option<&FlagValue> {
        self.values
            .iter()
            .rev()
            .find(|(flag, _)| *flag == name)
            .map(|(_, value)| value)
    }
}

/// Parses `args` against the declared `specs`.
///
/// # Errors
///
/// Returns a [`FlagError`] for undeclared flags, missing values, values of the
/// wrong type, or tokens such as `---x` and `-=x`.
pub fn parse_flags(specs: &[FlagSpec], args: &[&str]) -> Result<ParsedFlags, FlagError> {
    let mut parsed = ParsedFlags::default();
    let mut remaining = args.iter().copied();

    while let Some(token) = remaining.next() {
        if token == "--" {
            break;
        }
        let Some(body) = flag_body(token) else {
            parsed.positional.push(token.to_owned());
            break;
        };
        if body.is_empty() || body.starts_with('-') || body.starts_with('=') {
            return Err(FlagError::BadSyntax {
                token: token.to_owned(),
            });
        }

        let (name, inline) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };
        let Some(spec) = specs.iter().find(|spec| spec.name == name) else {
            return Err(if matches!(name, "h" | "help") {
                FlagError::HelpRequested
            } else {
                FlagError::Undefined {
                    flag: name.to_owned(),
                }
            });
        };

        let value = match spec.kind {
            FlagKind::Boolean => {
                let flag = inline.map_or(Ok(true), |raw| parse_bool(spec, raw))?;
                FlagValue::Boolean(flag)
            }
            FlagKind::String | FlagKind::Integer => {
                let raw = match inline {
                    Some(raw) => raw,
                    None => remaining.next().ok_or_else(|| FlagError::MissingValue {
                        flag: spec.name.to_owned(),
                    })?,
                };
                typed_value(spec, raw)?
            }
        };
        parsed.values.push((spec.name, value));
    }

    parsed
        .positional
        .extend(remaining.map(ToOwned::to_owned));
    Ok(parsed)
}

fn flag_body(token: &str) -> Option<&str> {
    if token.len() < 2 {
        return None;
    }
    token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'))
}

fn typed_value(spec: &FlagSpec, raw: &str) -> Result<FlagValue, FlagError> {
    match spec.kind {
        FlagKind::String => Ok(FlagValue::String(raw.to_owned())),
        FlagKind::Integer => parse_integer(raw)
            .map(FlagValue::Integer)
            .ok_or_else(|| invalid_value(spec, raw)),
        FlagKind::Boolean => parse_bool(spec, raw).map(FlagValue::Boolean),
    }
}

fn parse_integer(raw: &str) -> Option<i64> {
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'-') => (true, raw.get(1..)?),
        Some(b'+') => (false, raw.get(1..)?),
        _ => (false, raw),
    };
    let (radix, digits, prefixed) = split_radix(unsigned);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return None;
    }
    if digits.contains('_') && !separators_ok(digits, prefixed) {
        return None;
    }
    let digits = digits.replace('_', "");
    let signed = if negative {
        format!("-{digits}")
    } else {
        digits
    };
    i64::from_str_radix(&signed, radix).ok()
}

/// Returns the radix, the digits after any prefix, and whether a prefix was
/// present.
fn split_radix(unsigned: &str) -> (u32, &str, bool) {
    let lower = unsigned.get(..2).map(str::to_ascii_lowercase);
    match (lower.as_deref(), unsigned.get(2..)) {
        (Some("0x"), Some(rest)) => (16, rest, true),
        (Some("0o"), Some(rest)) => (8, rest, true),
        (Some("0b"), Some(rest)) => (2, rest, true),
        _ => match unsigned.strip_prefix('0') {
            Some(rest) if !rest.is_empty() => (8, rest, true),
            _ => (10, unsigned, false),
        },
    }
}

/// Underscores may only separate digits or directly follow a prefix.
fn separators_ok(digits: &str, prefixed: bool) -> bool {
    (prefixed || !digits.starts_with('_')) && !digits.ends_with('_') && !digits.contains("__")
}

fn parse_bool(spec: &FlagSpec, raw: &str) -> Result<bool, FlagError> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(invalid_value(spec, raw)),
    }
}

fn invalid_value(spec: &FlagSpec, raw: &str) -> FlagError {
    FlagError::InvalidValue {
        flag: spec.name.to_owned(),
        value: raw.to_owned(),
        kind: spec.kind.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const SPECS: &[FlagSpec] = &[
        FlagSpec::string("from", "source"),
        FlagSpec::integer("amount", "amount"),
        FlagSpec::boolean("mine", "mine"),
    ];

    #[rstest]
    #[case::separate(&["-from", "A"])]
    #[case::inline(&["-from=A"])]
    #[case::double_dash(&["--from", "A"])]
    fn accepts_value_spellings(#[case] args: &[&str]) {
        let parsed = parse_flags(SPECS, args).expect("flags should parse");
        assert_eq!(parsed.string("from"), "A");
    }

    #[test]
    fn unset_flags_fall_back_to_zero_values() {
        let parsed = parse_flags(SPECS, &[]).expect("empty args parse");
        assert_eq!(parsed.string("from"), "");
        assert_eq!(parsed.integer("amount"), 0);
        assert!(!parsed.boolean("mine"));
    }

    #[rstest]
    #[case::bare(&["-mine"], true)]
    #[case::explicit_true(&["-mine=true"], true)]
    #[case::explicit_false(&["-mine=false"], false)]
    #[case::numeric(&["-mine=0"], false)]
    fn parses_boolean_switches(#[case] args: &[&str], #[case] expected: bool) {
        let parsed = parse_flags(SPECS, args).expect("flags should parse");
        assert_eq!(parsed.boolean("mine"), expected);
    }

    #[test]
    fn boolean_switch_does_not_consume_next_token() {
        let parsed = parse_flags(SPECS, &["-mine", "-amount", "5"]).expect("flags parse");
        assert!(parsed.boolean("mine"));
        assert_eq!(parsed.integer("amount"), 5);
    }

    #[test]
    fn later_occurrence_wins() {
        let parsed = parse_flags(SPECS, &["-amount", "1", "-amount", "7"]).expect("parse");
        assert_eq!(parsed.integer("amount"), 7);
    }

    #[test]
    fn stops_at_first_positional_token() {
        let parsed = parse_flags(SPECS, &["-from", "A", "extra", "-amount", "x"])
            .expect("parsing stops before the malformed amount");
        assert_eq!(parsed.string("from"), "A");
        assert_eq!(parsed.positional(), ["extra", "-amount", "x"]);
    }

    #[test]
    fn rejects_undefined_flag() {
        let error = parse_flags(SPECS, &["-bogus", "1"]).expect_err("undefined flag");
        assert_eq!(
            error,
            FlagError::Undefined {
                flag: "bogus".to_owned()
            }
        );
        assert_eq!(error.to_string(), "flag provided but not defined: -bogus");
    }

    #[test]
    fn rejects_missing_value() {
        let error = parse_flags(SPECS, &["-from"]).expect_err("missing value");
        assert!(matches!(error, FlagError::MissingValue { .. }));
    }

    #[rstest]
    #[case::amount(&["-amount", "ten"])]
    #[case::boolean(&["-mine=maybe"])]
    fn rejects_values_of_the_wrong_type(#[case] args: &[&str]) {
        let error = parse_flags(SPECS, args).expect_err("invalid value");
        assert!(matches!(error, FlagError::InvalidValue { .. }));
    }

    #[rstest]
    #[case::decimal("42", 42)]
    #[case::negative("-7", -7)]
    #[case::plus("+7", 7)]
    #[case::zero("0", 0)]
    #[case::hex("0x1F", 31)]
    #[case::upper_hex("0X1f", 31)]
    #[case::octal_prefix("0o17", 15)]
    #[case::leading_zero_octal("017", 15)]
    #[case::binary("0b101", 5)]
    #[case::separated("0x_FF_FF", 65_535)]
    #[case::decimal_separators("1_000", 1_000)]
    #[case::octal_separator("0_17", 15)]
    #[case::negative_hex("-0x10", -16)]
    fn integers_accept_base_prefixes(#[case] raw: &str, #[case] expected: i64) {
        let parsed = parse_flags(SPECS, &["-amount", raw]).expect("integer should parse");
        assert_eq!(parsed.integer("amount"), expected);
    }

    #[rstest]
    #[case::leading_separator("_1")]
    #[case::trailing_separator("0x1_")]
    #[case::doubled_separator("0x1__0")]
    #[case::bad_octal("09")]
    #[case::empty_hex("0x")]
    #[case::double_sign("0x-5")]
    #[case::overflow("9223372036854775808")]
    fn integers_reject_malformed_literals(#[case] raw: &str) {
        let error = parse_flags(SPECS, &["-amount", raw]).expect_err("integer should fail");
        assert!(matches!(error, FlagError::InvalidValue { .. }));
    }

    #[rstest]
    #[case::short("-h")]
    #[case::long("-help")]
    #[case::double_dash("--help")]
    fn help_flags_request_help(#[case] token: &str) {
        let error = parse_flags(SPECS, &[token]).expect_err("help requested");
        assert_eq!(error, FlagError::HelpRequested);
        assert_eq!(error.to_string(), "flag: help requested");
    }

    #[test]
    fn declared_help_flag_is_parsed_normally() {
        let specs = [FlagSpec::boolean("help", "show help")];
        let parsed = parse_flags(&specs, &["-help"]).expect("declared flag");
        assert!(parsed.boolean("help"));
    }

    #[rstest]
    #[case::triple_dash("---from")]
    #[case::empty_name("-=A")]
    fn rejects_bad_syntax(#[case] token: &str) {
        let error = parse_flags(SPECS, &[token]).expect_err("bad syntax");
        assert!(matches!(error, FlagError::BadSyntax { .. }));
    }
}
