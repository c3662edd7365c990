//! Sent/received loss classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic conclusion from comparing both directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Sent is clean but received has gaps: the loss happened on the path
    RealLoss,
    /// Both directions have gaps: callbacks themselves are dropping samples
    SystemIssue,
    /// Neither direction has gaps
    Clean,
    /// Sent has gaps but received does not
    Unexpected,
}

impl Verdict {
    /// First line of the conclusion
    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::RealLoss => "CONCLUSION: Losses are REAL (sent clean, received has gaps)",
            Verdict::SystemIssue => "WARNING: Both sent and received have gaps!",
            Verdict::Clean => "CLEAN: No losses detected in either direction",
            Verdict::Unexpected => "UNEXPECTED: Sent has gaps but received is clean",
        }
    }

    /// Follow-up line, if the verdict has one
    pub fn detail(&self) -> Option<&'static str> {
        match self {
            Verdict::RealLoss => Some("The loss detection algorithm is correct."),
            Verdict::SystemIssue => {
                Some("This may indicate a system-level issue (CPU overload, driver problem)")
            }
            Verdict::Clean => None,
            Verdict::Unexpected => Some("This needs investigation"),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verdict::RealLoss => "real-loss",
            Verdict::SystemIssue => "system-issue",
            Verdict::Clean => "clean",
            Verdict::Unexpected => "unexpected",
        };
        f.write_str(name)
    }
}

/// Classify a run from the gap counts of each direction
pub fn classify(sent_gaps: u64, recv_gaps: u64) -> Verdict {
    match (sent_gaps > 0, recv_gaps > 0) {
        (false, false) => Verdict::Clean,
        (false, true) => Verdict::RealLoss,
        (true, true) => Verdict::SystemIssue,
        (true, false) => Verdict::Unexpected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_table() {
        assert_eq!(classify(0, 0), Verdict::Clean);
        assert_eq!(classify(0, 1), Verdict::RealLoss);
        assert_eq!(classify(3, 7), Verdict::SystemIssue);
        assert_eq!(classify(2, 0), Verdict::Unexpected);
    }

    #[test]
    fn test_only_presence_matters() {
        for sent in [0u64, 1, 17, u64::MAX] {
            for recv in [0u64, 1, 17, u64::MAX] {
                assert_eq!(classify(sent, recv), classify(sent.min(1), recv.min(1)));
            }
        }
    }

    #[test]
    fn test_messages() {
        assert!(Verdict::RealLoss.headline().contains("Losses are REAL"));
        assert!(Verdict::SystemIssue
            .detail()
            .unwrap()
            .contains("system-level issue"));
        assert!(Verdict::Clean.headline().starts_with("CLEAN"));
        assert!(Verdict::Clean.detail().is_none());
        assert_eq!(Verdict::Unexpected.detail(), Some("This needs investigation"));
    }

    #[test]
    fn test_serializes_by_name() {
        let json = serde_json::to_string(&Verdict::RealLoss).unwrap();
        assert_eq!(json, "\"RealLoss\"");
    }
}
