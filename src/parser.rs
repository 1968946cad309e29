use crate::types::{Diagnostic, Sample};

/// Result of interpreting one input line.
#[derive(Clone, Debug, PartialEq)]
pub enum ParsedLine {
    Sample(Sample),
    /// The line started with a letter: it is reported and the fallback is plotted instead.
    Malformed {
        line: String,
        fallback: Sample,
        diagnostic: Diagnostic,
    },
}

impl ParsedLine {
    pub fn sample(&self) -> Sample {
        match self {
            ParsedLine::Sample(s) => *s,
            ParsedLine::Malformed { fallback, .. } => *fallback,
        }
    }
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ParseError {
    #[error("missing field {index}")]
    MissingField { index: usize },
    #[error("field {index} is not a number: {field:?}")]
    InvalidNumber { index: usize, field: String },
}

/// Parses `x,y,z`. Only the first three comma separated fields are read;
/// anything after them is ignored.
pub fn parse_line(raw: &str, fallback: Sample) -> Result<ParsedLine, ParseError> {
    let line = raw.trim_end_matches(['\r', '\n']);

    if line.chars().next().is_some_and(char::is_alphabetic) {
        return Ok(ParsedLine::Malformed {
            line: line.to_string(),
            fallback,
            diagnostic: Diagnostic::classify(line),
        });
    }

    let mut fields = line.split(',');
    let mut values = [0.0f64; 3];
    for (index, slot) in values.iter_mut().enumerate() {
        let field = fields
            .next()
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .ok_or(ParseError::MissingField { index })?;
        *slot = field.parse().map_err(|_| ParseError::InvalidNumber {
            index,
            field: field.to_string(),
        })?;
    }

    Ok(ParsedLine::Sample(Sample::from(values)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_FALLBACK_SAMPLE;

    fn parse(line: &str) -> Result<ParsedLine, ParseError> {
        parse_line(line, DEFAULT_FALLBACK_SAMPLE)
    }

    #[test]
    fn parses_plain_triple() {
        assert_eq!(
            parse("50.00,50.00,50.00").unwrap(),
            ParsedLine::Sample(Sample::new(50.0, 50.0, 50.0))
        );
        assert_eq!(
            parse("12.5,-3.2,0.0").unwrap(),
            ParsedLine::Sample(Sample::new(12.5, -3.2, 0.0))
        );
    }

    #[test]
    fn strips_crlf_terminator() {
        assert_eq!(parse("1.00,2.00,-3.00\r\n").unwrap().sample(), Sample::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn letter_prefix_substitutes_fallback() {
        let parsed = parse("error: sensor offline\n").unwrap();
        assert_eq!(parsed.sample(), Sample::new(50.0, 50.0, 50.0));
        match parsed {
            ParsedLine::Malformed { line, diagnostic, .. } => {
                assert_eq!(line, "error: sensor offline");
                assert_eq!(diagnostic, Diagnostic::Message("error: sensor offline".into()));
            }
            other => panic!("expected malformed, got {other:?}"),
        }
    }

    #[test]
    fn configured_fallback_is_used() {
        let parsed = parse_line("offline", Sample::new(0.0, 0.0, 0.0)).unwrap();
        assert_eq!(parsed.sample(), Sample::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn extra_fields_are_ignored() {
        assert_eq!(parse("1,2,3,4,junk").unwrap().sample(), Sample::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn short_line_is_an_error() {
        assert_eq!(parse("1.0,2.0"), Err(ParseError::MissingField { index: 2 }));
        assert_eq!(parse(""), Err(ParseError::MissingField { index: 0 }));
        assert_eq!(parse("\r\n"), Err(ParseError::MissingField { index: 0 }));
    }

    #[test]
    fn non_numeric_field_is_an_error() {
        assert_eq!(
            parse("1.0,#,3.0"),
            Err(ParseError::InvalidNumber { index: 1, field: "#".into() })
        );
    }

    #[test]
    fn digit_led_garbage_is_not_treated_as_malformed() {
        assert!(matches!(parse("1x,2,3"), Err(ParseError::InvalidNumber { index: 0, .. })));
    }
}
