/// What a malformed input line was about.
///
/// The sensor bridge prints human readable notices on the same stream as
/// the samples; they are surfaced to the operator and never plotted.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// `Gesture detected index <f> score <f>`
    Gesture { index: f64, score: f64 },
    Message(String),
}

impl Diagnostic {
    pub fn classify(line: &str) -> Self {
        Self::parse_gesture(line).unwrap_or_else(|| Diagnostic::Message(line.to_string()))
    }

    fn parse_gesture(line: &str) -> Option<Self> {
        let rest = line.strip_prefix("Gesture detected index")?;
        let (index, score) = rest.split_once("score")?;
        Some(Diagnostic::Gesture {
            index: index.trim().parse().ok()?,
            score: score.trim().parse().ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gesture_line_is_recognised() {
        let d = Diagnostic::classify("Gesture detected index 3.00 score 0.87");
        assert_eq!(d, Diagnostic::Gesture { index: 3.0, score: 0.87 });
    }

    #[test]
    fn other_notices_are_kept_verbatim() {
        let d = Diagnostic::classify("Not enough data, got 8, expected 12");
        assert_eq!(d, Diagnostic::Message("Not enough data, got 8, expected 12".into()));
    }

    #[test]
    fn garbled_gesture_falls_back_to_message() {
        let d = Diagnostic::classify("Gesture detected index ?? score 1");
        assert!(matches!(d, Diagnostic::Message(_)));
    }
}
