//! Route description compiler.
//!
//! # Syntax
//! - `(any)` one or more non-`/` characters
//! - `(num)` digits only
//! - `(all)` everything that is left, `/` included
//! - `(name:kind)` the same three kinds, published by name instead of
//!   passed positionally
//!
//! Everything outside a token is literal text. A single trailing `/` is
//! insignificant, both in the description and in the matched URI.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::routing::params::ParamValue;

/// Errors raised while compiling a route description.
///
/// All of them are configuration errors: a description that fails to
/// compile must never be mistaken for one that simply did not match.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("unknown token `({token})` in `{description}`")]
    UnknownToken { description: String, token: String },

    #[error("unknown kind `{kind}` for capture `{name}` in `{description}`")]
    UnknownKind {
        description: String,
        name: String,
        kind: String,
    },

    #[error("invalid capture name `{name}` in `{description}`")]
    InvalidName { description: String, name: String },

    #[error("capture `{name}` declared twice in `{description}`")]
    DuplicateName { description: String, name: String },

    #[error("unclosed `(` in `{0}`")]
    Unclosed(String),

    #[error("regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// What a token is allowed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Any,
    Num,
    All,
}

impl Kind {
    fn fragment(&self) -> &'static str {
        match self {
            Kind::Any => "[^/]+?",
            Kind::Num => "[0-9]+?",
            Kind::All => ".+?",
        }
    }

    /// Coerce a captured string for the typed-parameter store.
    pub fn coerce(&self, raw: &str) -> ParamValue {
        match self {
            // Digits only, so the parse can only fail on overflow.
            Kind::Num => ParamValue::Int(raw.parse().unwrap_or(i64::MAX)),
            Kind::Any | Kind::All => ParamValue::Str(raw.to_string()),
        }
    }
}

impl FromStr for Kind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(Kind::Any),
            "num" => Ok(Kind::Num),
            "all" => Ok(Kind::All),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::Any => "any",
            Kind::Num => "num",
            Kind::All => "all",
        })
    }
}

/// One capture group of a compiled pattern, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum Capture {
    Positional { kind: Kind },
    Named { name: String, kind: Kind },
}

/// Values extracted from a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captured {
    /// Unnamed captures, in order.
    pub args: Vec<String>,
    /// Named captures, already coerced.
    pub named: Vec<(String, ParamValue)>,
}

/// A compiled route description.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    description: String,
    regex: Regex,
    captures: Vec<Capture>,
}

impl CompiledPattern {
    pub fn compile(description: &str) -> Result<Self, PatternError> {
        let normalized = trim_trailing_slash(description);

        let mut source = String::with_capacity(normalized.len() + 16);
        let mut captures = Vec::new();
        let mut seen = HashSet::new();

        source.push('^');
        let mut rest = normalized;
        while let Some(open) = rest.find('(') {
            source.push_str(&regex::escape(&rest[..open]));

            let after = &rest[open + 1..];
            let close = after
                .find(')')
                .ok_or_else(|| PatternError::Unclosed(description.to_string()))?;

            let capture = parse_token(description, &after[..close])?;
            if let Capture::Named { name, .. } = &capture {
                if !seen.insert(name.clone()) {
                    return Err(PatternError::DuplicateName {
                        description: description.to_string(),
                        name: name.clone(),
                    });
                }
            }

            match &capture {
                Capture::Positional { kind } => {
                    source.push('(');
                    source.push_str(kind.fragment());
                }
                Capture::Named { name, kind } => {
                    source.push_str("(?P<");
                    source.push_str(name);
                    source.push('>');
                    source.push_str(kind.fragment());
                }
            }
            source.push(')');
            captures.push(capture);

            rest = &after[close + 1..];
        }
        source.push_str(&regex::escape(rest));
        source.push('$');

        Ok(Self {
            description: description.to_string(),
            regex: Regex::new(&source)?,
            captures,
        })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The anchored regex this description compiled to.
    pub fn as_regex(&self) -> &str {
        self.regex.as_str()
    }

    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    /// Match against an already trimmed URI.
    pub fn matches(&self, uri: &str) -> Option<Captured> {
        let caps = self.regex.captures(uri)?;

        let mut captured = Captured::default();
        for (index, capture) in self.captures.iter().enumerate() {
            // Group 0 is the full match; token groups follow in order.
            let raw = caps.get(index + 1).map(|m| m.as_str()).unwrap_or_default();
            match capture {
                Capture::Positional { .. } => captured.args.push(raw.to_string()),
                Capture::Named { name, kind } => {
                    captured.named.push((name.clone(), kind.coerce(raw)));
                }
            }
        }
        Some(captured)
    }
}

fn parse_token(description: &str, token: &str) -> Result<Capture, PatternError> {
    match token.split_once(':') {
        None => token
            .parse()
            .map(|kind| Capture::Positional { kind })
            .map_err(|_| PatternError::UnknownToken {
                description: description.to_string(),
                token: token.to_string(),
            }),
        Some((name, kind)) => {
            if !is_valid_name(name) {
                return Err(PatternError::InvalidName {
                    description: description.to_string(),
                    name: name.to_string(),
                });
            }
            let kind = kind.parse().map_err(|_| PatternError::UnknownKind {
                description: description.to_string(),
                name: name.to_string(),
                kind: kind.to_string(),
            })?;
            Ok(Capture::Named {
                name: name.to_string(),
                kind,
            })
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Drop one trailing `/`, never reducing `/` itself to the empty string.
pub(crate) fn trim_trailing_slash(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}
