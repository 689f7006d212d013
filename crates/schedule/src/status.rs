use std::fmt;

use strum::{AsRefStr, Display, EnumString, VariantArray};

/// Statuses the completion form can record. Cells may hold anything though,
/// so lookups keep the raw string.
#[derive(EnumString, Display, AsRefStr, VariantArray, Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompletionStatus {
    #[strum(serialize = "Completed")]
    Completed,
    #[strum(serialize = "Not Completed")]
    NotCompleted,
    #[strum(serialize = "Partially Completed")]
    PartiallyCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEmoji {
    Affirmative,
    Negative,
    Unsure,
}

impl StatusEmoji {
    pub fn from_status(status: &str) -> Self {
        if status == CompletionStatus::Completed.as_ref() {
            Self::Affirmative
        } else if status == CompletionStatus::NotCompleted.as_ref() {
            Self::Negative
        } else {
            Self::Unsure
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Affirmative => "\u{2705}",
            Self::Negative => "\u{274c}",
            Self::Unsure => "\u{1f937}\u{200d}\u{2640}\u{fe0f}",
        }
    }
}

impl fmt::Display for StatusEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_emoji_mapping_is_total() {
        assert_eq!(StatusEmoji::from_status("Completed"), StatusEmoji::Affirmative);
        assert_eq!(StatusEmoji::from_status("Not Completed"), StatusEmoji::Negative);
        assert_eq!(
            StatusEmoji::from_status("Partially Completed"),
            StatusEmoji::Unsure
        );
        assert_eq!(StatusEmoji::from_status(""), StatusEmoji::Unsure);
        assert_eq!(StatusEmoji::from_status("completed"), StatusEmoji::Unsure);
        assert_eq!(StatusEmoji::from_status("asdf"), StatusEmoji::Unsure);
    }

    #[test]
    fn test_completion_status_strings() {
        assert_eq!(CompletionStatus::NotCompleted.to_string(), "Not Completed");
        assert_eq!(
            CompletionStatus::from_str("Partially Completed").unwrap(),
            CompletionStatus::PartiallyCompleted
        );
        assert_eq!(CompletionStatus::VARIANTS.len(), 3);
    }
}
