//! Scan session errors
//!
//! Every condition here is recoverable: the screen surfaces it as a single
//! notice and keeps its previous state.

/// Errors raised by the capture sheet core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// Selection is already at capacity
    CapacityExceeded { capacity: usize },
    /// Media provider failed to deliver a page
    FetchFailed(String),
    /// Continue pressed with nothing selected
    EmptySelection,
    /// Capture device or item admission failed
    CaptureFailed(String),
}

impl ScanError {
    /// Short title for the user-facing alert
    pub fn title(&self) -> &'static str {
        match self {
            ScanError::CapacityExceeded { .. } => "Maximum Reached",
            ScanError::FetchFailed(_) => "Could Not Load Photos",
            ScanError::EmptySelection => "No Photos Selected",
            ScanError::CaptureFailed(_) => "Capture Failed",
        }
    }

    /// Body text for the user-facing alert
    pub fn user_message(&self) -> String {
        match self {
            ScanError::CapacityExceeded { capacity } => {
                format!("You can only select up to {} photos", capacity)
            }
            ScanError::FetchFailed(_) => "Could not load photos".to_string(),
            ScanError::EmptySelection => "Please select at least one photo".to_string(),
            ScanError::CaptureFailed(_) => "Failed to take picture".to_string(),
        }
    }
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanError::CapacityExceeded { capacity } => {
                write!(f, "Selection capacity exceeded ({})", capacity)
            }
            ScanError::FetchFailed(e) => write!(f, "Fetch failed: {}", e),
            ScanError::EmptySelection => write!(f, "No items selected"),
            ScanError::CaptureFailed(e) => write!(f, "Capture failed: {}", e),
        }
    }
}

impl std::error::Error for ScanError {}
