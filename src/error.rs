use std::fmt;

/// Errors surfaced by the window facade.
#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    /// Native look-and-feel initialization failed. Non-fatal: the caller
    /// reports it through the error-popup channel and keeps going.
    #[error("native look-and-feel unavailable: {reason}")]
    LookAndFeelUnavailable { reason: String },

    /// The user dismissed a file or folder dialog without confirming.
    /// Distinct from every success value; never conflated with an empty path.
    #[error("selection cancelled by user")]
    SelectionCancelled,

    /// A print operation ran before any output area was attached.
    #[error("output area has not been attached")]
    OutputAreaNotInitialized,

    /// `add_output_area` was called a second time. The window carries at most
    /// one output area; re-attaching fails instead of silently stacking
    /// widgets.
    #[error("output area is already attached")]
    OutputAreaAlreadyAttached,

    /// The host toolkit failed to create a window resource.
    #[error("window creation failed: {reason}")]
    WindowCreation { reason: String },

    /// The native file dialog failed for a reason other than cancellation.
    #[error("file dialog failed: HRESULT 0x{hresult:08X}")]
    DialogFailed { hresult: i32 },
}

impl WindowError {
    pub fn look_and_feel(reason: impl fmt::Display) -> Self {
        Self::LookAndFeelUnavailable {
            reason: reason.to_string(),
        }
    }

    pub fn creation(reason: impl fmt::Display) -> Self {
        Self::WindowCreation {
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_is_not_a_dialog_failure() {
        let cancelled = WindowError::SelectionCancelled;
        let failed = WindowError::DialogFailed { hresult: -1 };
        assert!(!matches!(cancelled, WindowError::DialogFailed { .. }));
        assert!(matches!(failed, WindowError::DialogFailed { hresult: -1 }));
    }

    #[test]
    fn test_display_messages() {
        let err = WindowError::look_and_feel("uxtheme.dll not found");
        assert_eq!(
            err.to_string(),
            "native look-and-feel unavailable: uxtheme.dll not found"
        );
        assert_eq!(
            WindowError::OutputAreaNotInitialized.to_string(),
            "output area has not been attached"
        );
    }
}
