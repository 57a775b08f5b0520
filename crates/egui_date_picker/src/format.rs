use std::fmt::Write as _;

use chrono::{NaiveDate, format::StrftimeItems};

/// The format used when none is given, e.g. `2021-01-31`.
pub const DEFAULT_FORMAT: &str = "%Y-%m-%d";

/// A [`chrono::format::strftime`] pattern that is known to format and parse whole dates.
///
/// ```
/// use chrono::NaiveDate;
/// use egui_date_picker::DateFormat;
///
/// let format = DateFormat::new("%d/%m/%Y").unwrap();
/// assert_eq!(format.hint(), "DD/MM/YYYY");
///
/// let date = format.parse("31/01/2021").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2021, 1, 31).unwrap());
/// assert_eq!(format.format(date), "31/01/2021");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
}

/// A format string that cannot be used for a date picker.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DateFormatError {
    #[error("invalid date format {pattern:?}")]
    InvalidFormat { pattern: String },

    #[error("date format {pattern:?} does not identify a single day")]
    Incomplete { pattern: String },
}

/// Text that could not be read as a date.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseDateError {
    #[error("no date entered")]
    Empty,

    #[error("{input:?} is not a date in the format {hint}")]
    Mismatch {
        input: String,
        hint: String,

        #[source]
        source: chrono::ParseError,
    },
}

impl DateFormat {
    /// Validate a strftime pattern.
    ///
    /// # Errors
    /// [`DateFormatError::InvalidFormat`] if chrono does not understand the pattern, and
    /// [`DateFormatError::Incomplete`] if the pattern lacks the fields needed to parse a date back,
    /// e.g. `"%Y-%m"`.
    pub fn new(pattern: impl Into<String>) -> Result<Self, DateFormatError> {
        let pattern = pattern.into();
        if StrftimeItems::new(&pattern).parse().is_err() {
            return Err(DateFormatError::InvalidFormat { pattern });
        }

        // Day, month, and year all differ, so a pattern that drops or mixes up a field shows here.
        let probe = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap_or_default();
        let mut formatted = String::new();
        if write!(formatted, "{}", probe.format(&pattern)).is_err() {
            // Time or timezone fields, which a plain date cannot fill in.
            return Err(DateFormatError::InvalidFormat { pattern });
        }
        match NaiveDate::parse_from_str(&formatted, &pattern) {
            Ok(parsed) if parsed == probe => Ok(Self { pattern }),
            _ => Err(DateFormatError::Incomplete { pattern }),
        }
    }

    /// The strftime pattern, e.g. `"%Y-%m-%d"`.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(&self.pattern).to_string()
    }

    /// Parse user input, ignoring surrounding whitespace.
    ///
    /// # Errors
    /// [`ParseDateError::Empty`] for blank input, [`ParseDateError::Mismatch`] for anything else
    /// that does not match the pattern.
    pub fn parse(&self, text: &str) -> Result<NaiveDate, ParseDateError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseDateError::Empty);
        }
        NaiveDate::parse_from_str(text, &self.pattern).map_err(|source| ParseDateError::Mismatch {
            input: text.to_owned(),
            hint: self.hint(),
            source,
        })
    }

    /// A human readable version of the pattern, e.g. `"YYYY-MM-DD"` for `"%Y-%m-%d"`.
    pub fn hint(&self) -> String {
        let mut hint = String::with_capacity(self.pattern.len() + 4);
        let mut chars = self.pattern.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                hint.push(c);
                continue;
            }

            let mut spec = chars.next();
            // Padding modifiers: `%-d`, `%_m`, `%0e`.
            let mut unpadded = false;
            if let Some(flag @ ('-' | '_' | '0')) = spec {
                unpadded = flag == '-';
                spec = chars.next();
            }
            match spec {
                Some('Y') => hint.push_str("YYYY"),
                Some('y') => hint.push_str("YY"),
                Some('m') if unpadded => hint.push('M'),
                Some('m') => hint.push_str("MM"),
                Some('d') if unpadded => hint.push('D'),
                Some('d') => hint.push_str("DD"),
                Some('e') => hint.push('D'),
                Some('b' | 'h') => hint.push_str("MMM"),
                Some('B') => hint.push_str("MMMM"),
                Some('a') => hint.push_str("ddd"),
                Some('A') => hint.push_str("dddd"),
                Some('j') => hint.push_str("DDD"),
                Some('F') => hint.push_str("YYYY-MM-DD"),
                Some('D' | 'x') => hint.push_str("MM/DD/YY"),
                Some('%') => hint.push('%'),
                Some(other) => {
                    hint.push('%');
                    hint.push(other);
                }
                None => hint.push('%'),
            }
        }
        hint
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_FORMAT.to_owned(),
        }
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pattern)
    }
}
