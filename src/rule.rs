//! Annotation grammar
//!
//! A field annotation has the form `"<kind>:<parameter>"`. Parsing only
//! separates the two halves and resolves the kind; interpreting the
//! parameter is left to the checker, because whether an empty or odd
//! parameter is a syntax error depends on the constraint.

use std::fmt;
use std::str::FromStr;

use crate::error::Violation;

/// Separator between the constraint kind and its parameter.
pub const SEPARATOR: char = ':';

/// The built-in constraint kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConstraintKind {
    /// `len:<n>`: exact length.
    Length,
    /// `in:<a>,<b>,...`: membership in a set.
    Membership,
    /// `min:<n>`: lower bound.
    Minimum,
    /// `max:<n>`: upper bound.
    Maximum,
    /// `between:<lo>,<hi>`: inclusive range.
    Range,
}

impl ConstraintKind {
    /// Every kind, in table order.
    pub const ALL: [ConstraintKind; 5] = [
        ConstraintKind::Length,
        ConstraintKind::Membership,
        ConstraintKind::Minimum,
        ConstraintKind::Maximum,
        ConstraintKind::Range,
    ];

    /// Annotation tokens, in table order.
    pub const TOKENS: [&'static str; 5] = {
        let mut tokens = [""; 5];
        let mut i = 0;
        while i < tokens.len() {
            tokens[i] = Self::ALL[i].token();
            i += 1;
        }
        tokens
    };

    /// The annotation token for this kind.
    pub const fn token(self) -> &'static str {
        match self {
            ConstraintKind::Length => "len",
            ConstraintKind::Membership => "in",
            ConstraintKind::Minimum => "min",
            ConstraintKind::Maximum => "max",
            ConstraintKind::Range => "between",
        }
    }

    /// Resolve an annotation token.
    ///
    /// ```
    /// use fieldguard::ConstraintKind;
    ///
    /// assert_eq!(ConstraintKind::from_token("between"), Some(ConstraintKind::Range));
    /// assert_eq!(ConstraintKind::from_token("regexp"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.token() == token)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ConstraintKind {
    type Err = Violation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or(Violation::UnrecognizedKind)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ConstraintKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ConstraintKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::from_token(&token).ok_or_else(|| {
            serde::de::Error::unknown_variant(&token, &Self::TOKENS)
        })
    }
}

/// A parsed annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule<'a> {
    /// Which checker to run.
    pub kind: ConstraintKind,
    /// Raw parameter text, possibly empty.
    pub parameter: &'a str,
}

impl<'a> Rule<'a> {
    /// Parse a raw annotation.
    ///
    /// Fails with [`Violation::InvalidRuleSyntax`] unless the annotation
    /// splits into exactly two parts, and with
    /// [`Violation::UnrecognizedKind`] if the kind token is unknown.
    ///
    /// ```
    /// use fieldguard::{ConstraintKind, Rule, Violation};
    ///
    /// let rule = Rule::parse("in:a,b").unwrap();
    /// assert_eq!(rule.kind, ConstraintKind::Membership);
    /// assert_eq!(rule.parameter, "a,b");
    ///
    /// assert_eq!(Rule::parse("len"), Err(Violation::InvalidRuleSyntax));
    /// assert_eq!(Rule::parse("len:1:2"), Err(Violation::InvalidRuleSyntax));
    /// assert_eq!(Rule::parse("regexp:.*"), Err(Violation::UnrecognizedKind));
    /// ```
    pub fn parse(raw: &'a str) -> Result<Self, Violation> {
        let mut parts = raw.split(SEPARATOR);
        let (Some(token), Some(parameter), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(Violation::InvalidRuleSyntax);
        };

        let kind = token.parse::<ConstraintKind>()?;
        Ok(Rule { kind, parameter })
    }
}

impl fmt::Display for Rule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind, SEPARATOR, self.parameter)
    }
}

/// Parse a base-10 signed integer parameter.
pub(crate) fn parse_integer(text: &str) -> Result<i64, Violation> {
    text.parse::<i64>().map_err(|_| Violation::InvalidRuleSyntax)
}

/// Parse a `<lo>,<hi>` parameter.
pub(crate) fn parse_pair(text: &str) -> Result<(i64, i64), Violation> {
    let mut parts = text.split(',');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(lo), Some(hi), None) => Ok((parse_integer(lo)?, parse_integer(hi)?)),
        _ => Err(Violation::InvalidRuleSyntax),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_round_trip() {
        for kind in ConstraintKind::ALL {
            assert_eq!(ConstraintKind::from_token(kind.token()), Some(kind));
        }
    }

    #[test]
    fn test_token_list_follows_table_order() {
        assert_eq!(ConstraintKind::TOKENS, ["len", "in", "min", "max", "between"]);
        for (token, kind) in ConstraintKind::TOKENS.iter().zip(ConstraintKind::ALL) {
            assert_eq!(*token, kind.token());
        }
    }

    #[test]
    fn test_table_order_matches_index() {
        for (i, kind) in ConstraintKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_parse_keeps_empty_parameter() {
        let rule = Rule::parse("in:").unwrap();
        assert_eq!(rule.kind, ConstraintKind::Membership);
        assert_eq!(rule.parameter, "");
    }

    #[test]
    fn test_parse_rejects_wrong_part_count() {
        assert_eq!(Rule::parse(""), Err(Violation::InvalidRuleSyntax));
        assert_eq!(Rule::parse("min"), Err(Violation::InvalidRuleSyntax));
        assert_eq!(Rule::parse("min:1:"), Err(Violation::InvalidRuleSyntax));
    }

    #[test]
    fn test_parse_unknown_kind() {
        assert_eq!(
            Rule::parse("unexpected_option:heh"),
            Err(Violation::UnrecognizedKind)
        );
        assert_eq!(Rule::parse(":5"), Err(Violation::UnrecognizedKind));
        // Tokens are case sensitive.
        assert_eq!(Rule::parse("LEN:5"), Err(Violation::UnrecognizedKind));
    }

    #[test]
    fn test_display() {
        let rule = Rule::parse("between:1,5").unwrap();
        assert_eq!(rule.to_string(), "between:1,5");
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(parse_integer("-6"), Ok(-6));
        assert_eq!(parse_integer("+6"), Ok(6));
        assert_eq!(parse_integer(""), Err(Violation::InvalidRuleSyntax));
        assert_eq!(parse_integer("%12"), Err(Violation::InvalidRuleSyntax));
        assert_eq!(parse_integer("5-"), Err(Violation::InvalidRuleSyntax));
        assert_eq!(parse_integer(" 4"), Err(Violation::InvalidRuleSyntax));
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("3,17"), Ok((3, 17)));
        assert_eq!(parse_pair("-5,-1"), Ok((-5, -1)));
        assert_eq!(parse_pair("3"), Err(Violation::InvalidRuleSyntax));
        assert_eq!(parse_pair("3,"), Err(Violation::InvalidRuleSyntax));
        assert_eq!(parse_pair("1,2,3"), Err(Violation::InvalidRuleSyntax));
    }
}
