//! Verbosity-gated logging for the allocator.
//!
//! Nothing is formatted when verbosity is 0. Levels:
//! - 0: SILENT
//! - 1: CHANGES (placements and per-pass totals)
//! - 2: CHECKS (groups skipped at target, overflow candidates)
//! - 3: DEBUG (target computation, pool sizes)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
///
/// Used for: placing a person into a group, pass summaries.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!("[allocate] {}", format_args!($($arg)*));
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: skip reasons, overflow candidate selection.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!("[allocate]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[allocate]     {}", format_args!($($arg)*));
        }
    };
}
