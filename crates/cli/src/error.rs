//! CLI exit codes.
//!
//! Responsibilities:
//! - Define the exit codes the `headplane` binary can return.
//!
//! Does NOT handle:
//! - Error message formatting (handled by `tracing` and anyhow Display).
//!
//! Invariants:
//! - Every configuration failure maps to exit code 1.
//! - Argument errors are reported by clap itself (exit code 2).

/// Structured exit codes for the `headplane` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - configuration loaded.
    Success = 0,

    /// General error - the configuration could not be loaded or printed.
    GeneralError = 1,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl<T, E> From<&Result<T, E>> for ExitCode {
    fn from(result: &Result<T, E>) -> Self {
        match result {
            Ok(_) => ExitCode::Success,
            Err(_) => ExitCode::GeneralError,
        }
    }
}
