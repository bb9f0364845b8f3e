// ABOUTME: Version and the fixed strings of the REPL's I/O protocol

pub const VERSION: &str = "1.0.0";

/// Printed once after the throwaway handshake line.
pub const WELCOME_MESSAGE: &str = "Welcome to OurScheme!";

/// Written before each top-level read; the newline is part of the protocol.
pub const PROMPT: &str = "\n> ";

/// Written (with a leading newline, no trailing one) when the session ends.
pub const FAREWELL_MESSAGE: &str = "Thanks for using OurScheme!";

/// Written when stdin runs out before `(exit)`.
pub const EOF_MESSAGE: &str = "ERROR (no more input) : END-OF-FILE encountered";
