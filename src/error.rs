//! # Error Types
//!
//! Custom error types for Joy MIDI Bridge using `thiserror`.
//!
//! Every variant is fatal. Helpers return them up the call chain and `main`
//! is the only place that turns one into a process exit code.

use thiserror::Error;

/// Main error type for Joy MIDI Bridge
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Malformed axis configuration token
    #[error("Invalid axis {axis} configuration '{token}': {reason}")]
    Configuration {
        axis: usize,
        token: String,
        reason: String,
    },

    /// Profile file could not be read, parsed or validated
    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    /// Help requested on the command line
    #[error("{0}")]
    Help(String),

    /// Unrecognized or malformed command line option
    #[error("{0}")]
    Usage(String),

    /// Joystick device unreachable on every attempted path
    #[error("Failed to open joystick device (tried: {0})")]
    DeviceOpen(String),

    /// MIDI client or output port could not be created
    #[error("Failed to access the MIDI sequencer: {0}")]
    TransportAccess(String),

    /// I/O failure or short read while waiting for joystick events
    #[error("Error reading from joystick device: {0}")]
    RuntimeRead(#[from] std::io::Error),
}

impl BridgeError {
    /// Process exit code for this error.
    ///
    /// Codes are distinct per failure category so scripts can tell a bad
    /// axis token from a missing joystick.
    ///
    /// # Examples
    ///
    /// ```
    /// use joy_midi_bridge::error::BridgeError;
    ///
    /// let err = BridgeError::DeviceOpen("/dev/js0".to_string());
    /// assert_eq!(err.exit_code(), 3);
    /// ```
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::Configuration { .. } | BridgeError::ConfigFile(_) => 1,
            BridgeError::Help(_) | BridgeError::Usage(_) => 2,
            BridgeError::DeviceOpen(_) => 3,
            BridgeError::TransportAccess(_) => 4,
            BridgeError::RuntimeRead(_) => 5,
        }
    }
}

/// Result type alias for Joy MIDI Bridge
pub type Result<T> = std::result::Result<T, BridgeError>;
