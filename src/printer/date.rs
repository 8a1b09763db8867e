//! Timestamp formats.
//!
//! Printers accept `SimpleDateFormat`-style patterns such as
//! `yyyy-MM-dd HH:mm:ss`, which are translated once into a chrono strftime
//! string. Raw strftime strings are accepted too.

use std::fmt;
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, TimeZone};
use serde::Deserialize;

use crate::error::PrinterError;

/// A validated timestamp format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct DateFormat {
    source: String,
    strftime: String,
}

impl DateFormat {
    /// Pattern used when none is configured (ISO 8601 date and time).
    pub const DEFAULT_PATTERN: &'static str = "yyyy-MM-dd HH:mm:ss";

    /// Build from a `SimpleDateFormat`-style pattern.
    pub fn pattern(pattern: &str) -> Result<Self, PrinterError> {
        let strftime = translate(pattern)?;
        Ok(Self {
            source: pattern.to_string(),
            strftime,
        })
    }

    /// Build from a chrono strftime string.
    pub fn strftime(format: &str) -> Result<Self, PrinterError> {
        validate(format, format)?;
        Ok(Self {
            source: format.to_string(),
            strftime: format.to_string(),
        })
    }

    /// The string this format was built from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The equivalent strftime string.
    pub fn as_strftime(&self) -> &str {
        &self.strftime
    }

    /// Format an arbitrary point in time.
    pub fn format<Tz>(&self, time: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        time.format(&self.strftime).to_string()
    }

    /// Format the current local time.
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            source: Self::DEFAULT_PATTERN.to_string(),
            strftime: "%Y-%m-%d %H:%M:%S".to_string(),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for DateFormat {
    type Err = PrinterError;

    /// Strings containing `%` are read as strftime, everything else as a pattern.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('%') {
            Self::strftime(s)
        } else {
            Self::pattern(s)
        }
    }
}

impl TryFrom<String> for DateFormat {
    type Error = PrinterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn translate(pattern: &str) -> Result<String, PrinterError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }
            i += 1;
            loop {
                match chars.get(i) {
                    None => {
                        return Err(PrinterError::invalid_date_format(
                            pattern,
                            "unterminated quote",
                        ));
                    }
                    Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                        out.push('\'');
                        i += 2;
                    }
                    Some('\'') => {
                        i += 1;
                        break;
                    }
                    Some(&ch) => {
                        push_literal(&mut out, ch);
                        i += 1;
                    }
                }
            }
            continue;
        }

        if c.is_ascii_alphabetic() {
            let run = chars[i..].iter().take_while(|&&ch| ch == c).count();
            let field = field(c, run).ok_or_else(|| {
                PrinterError::invalid_date_format(pattern, format!("unsupported letter '{c}'"))
            })?;
            out.push_str(field);
            i += run;
            continue;
        }

        push_literal(&mut out, c);
        i += 1;
    }

    validate(pattern, &out)?;
    Ok(out)
}

fn field(letter: char, run: usize) -> Option<&'static str> {
    let spec = match (letter, run) {
        ('y', 2) => "%y",
        ('y', _) => "%Y",
        ('M', 1) => "%-m",
        ('M', 2) => "%m",
        ('M', 3) => "%b",
        ('M', _) => "%B",
        ('d', 1) => "%-d",
        ('d', _) => "%d",
        ('H', 1) => "%-H",
        ('H', _) => "%H",
        ('h', 1) => "%-I",
        ('h', _) => "%I",
        ('m', 1) => "%-M",
        ('m', _) => "%M",
        ('s', 1) => "%-S",
        ('s', _) => "%S",
        ('S', _) => "%3f",
        ('a', _) => "%p",
        ('E', 1..=3) => "%a",
        ('E', _) => "%A",
        ('z', _) => "%Z",
        ('Z', _) => "%z",
        ('X', _) => "%:z",
        _ => return None,
    };
    Some(spec)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn validate(source: &str, strftime: &str) -> Result<(), PrinterError> {
    if StrftimeItems::new(strftime).any(|item| matches!(item, Item::Error)) {
        return Err(PrinterError::invalid_date_format(
            source,
            "not a valid strftime string",
        ));
    }
    Ok(())
}
