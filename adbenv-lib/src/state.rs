//! Installer UI state machine
//!
//! `Idle -> Installing -> Succeeded | Failed`. Both outcomes are terminal;
//! a failed install is retried by starting the program again.

use crate::installer::InstallReport;
use std::path::Path;

/// Exit code of every "Quit", whatever the outcome
pub const QUIT_EXIT_CODE: i32 = -1;

/// UI-visible install state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InstallState {
    #[default]
    Idle,
    Installing,
    Succeeded(InstallReport),
    Failed(String),
}

impl InstallState {
    /// Enter `Installing`. Returns false (and leaves the state alone) unless idle.
    pub fn begin(&mut self) -> bool {
        if *self != InstallState::Idle {
            return false;
        }
        *self = InstallState::Installing;
        true
    }

    /// Record the outcome of the running install. Ignored in any other state.
    pub fn finish(&mut self, result: Result<InstallReport, String>) -> bool {
        if *self != InstallState::Installing {
            return false;
        }
        *self = match result {
            Ok(report) => InstallState::Succeeded(report),
            Err(message) => InstallState::Failed(message),
        };
        true
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, InstallState::Succeeded(_) | InstallState::Failed(_))
    }

    pub fn can_open_terminal(&self) -> bool {
        matches!(self, InstallState::Succeeded(_))
    }

    /// Install directory once the install succeeded
    pub fn target_dir(&self) -> Option<&Path> {
        match self {
            InstallState::Succeeded(report) => Some(&report.target_dir),
            _ => None,
        }
    }

    /// Process exit code for "Quit". The same non-zero code in every state.
    pub fn exit_code(&self) -> i32 {
        QUIT_EXIT_CODE
    }
}
