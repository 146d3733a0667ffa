//! Alert shown over the screen

use crate::error::ScanError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeStyle {
    Error,
    Warning,
}

impl NoticeStyle {
    /// Get the icon for this style
    pub fn icon(&self) -> &'static str {
        match self {
            NoticeStyle::Error => "✗",
            NoticeStyle::Warning => "⚠",
        }
    }
}

/// One alert at a time, cleared by `Message::DismissNotice`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub style: NoticeStyle,
}

impl Notice {
    pub fn new(title: impl Into<String>, message: impl Into<String>, style: NoticeStyle) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            style,
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NoticeStyle::Error)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NoticeStyle::Warning)
    }
}

impl From<&ScanError> for Notice {
    fn from(error: &ScanError) -> Self {
        match error {
            ScanError::CapacityExceeded { .. } | ScanError::EmptySelection => {
                Notice::warning(error.title(), error.user_message())
            }
            ScanError::FetchFailed(_) | ScanError::CaptureFailed(_) => {
                Notice::error(error.title(), error.user_message())
            }
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.style.icon(), self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_from_error() {
        let notice = Notice::from(&ScanError::CapacityExceeded { capacity: 8 });
        assert_eq!(notice.title, "Maximum Reached");
        assert_eq!(notice.message, "You can only select up to 8 photos");
        assert_eq!(notice.style, NoticeStyle::Warning);

        let notice = Notice::from(&ScanError::FetchFailed("disk gone".into()));
        assert_eq!(notice.style, NoticeStyle::Error);
        assert_eq!(notice.message, "Could not load photos");
    }
}
