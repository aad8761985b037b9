//! # Command Line
//!
//! Option surface of the `joy-midi-bridge` binary.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

use crate::axis::MAX_AXES;
use crate::error::{BridgeError, Result};

/// Turn a Linux joystick into a MIDI controller.
///
/// Axis specs are either a controller number (`-0 7`) or
/// `<min>:<max>:<ev>` where `ev` is a controller number or `p` for pitch
/// bend (`-1 -32768:32767:p`). Swapping min and max inverts the axis.
#[derive(Debug, Parser)]
#[command(name = "joy-midi-bridge")]
pub struct Cli {
    /// Select the joystick to use: 0..3
    #[arg(short = 'd', value_name = "JOYSTICK_NO")]
    pub device: Option<u32>,

    /// Read settings from a TOML profile (command line options win)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use fine control change events (14 bit resolution)
    #[arg(short = 'r')]
    pub high_resolution: bool,

    /// Verbose mode: report channel switches and every value sent
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Controller spec for axis 0
    #[arg(short = '0', value_name = "SPEC", allow_hyphen_values = true)]
    pub axis0: Option<String>,

    /// Controller spec for axis 1
    #[arg(short = '1', value_name = "SPEC", allow_hyphen_values = true)]
    pub axis1: Option<String>,

    /// Controller spec for axis 2
    #[arg(short = '2', value_name = "SPEC", allow_hyphen_values = true)]
    pub axis2: Option<String>,

    /// Controller spec for axis 3
    #[arg(short = '3', value_name = "SPEC", allow_hyphen_values = true)]
    pub axis3: Option<String>,

    /// Controller spec for axis 4
    #[arg(short = '4', value_name = "SPEC", allow_hyphen_values = true)]
    pub axis4: Option<String>,

    /// Controller spec for axis 5
    #[arg(short = '5', value_name = "SPEC", allow_hyphen_values = true)]
    pub axis5: Option<String>,

    /// Controller spec for axis 6
    #[arg(short = '6', value_name = "SPEC", allow_hyphen_values = true)]
    pub axis6: Option<String>,

    /// Controller spec for axis 7
    #[arg(short = '7', value_name = "SPEC", allow_hyphen_values = true)]
    pub axis7: Option<String>,

    /// Controller spec for axis 8
    #[arg(short = '8', value_name = "SPEC", allow_hyphen_values = true)]
    pub axis8: Option<String>,

    /// Controller spec for axis 9
    #[arg(short = '9', value_name = "SPEC", allow_hyphen_values = true)]
    pub axis9: Option<String>,
}

impl Cli {
    /// Parses the given arguments.
    ///
    /// `-h` comes back as `Help` and invalid arguments as `Usage`, both
    /// carrying the text to show the user.
    ///
    /// # Errors
    ///
    /// Returns `Help` if help was requested, `Usage` if the arguments are
    /// invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use joy_midi_bridge::cli::Cli;
    ///
    /// let cli = Cli::parse_from_args(["joy-midi-bridge", "-d", "1", "-0", "-100:100:p"])?;
    /// assert_eq!(cli.device, Some(1));
    /// assert_eq!(cli.axis_tokens()[0], Some("-100:100:p"));
    /// # Ok::<(), joy_midi_bridge::error::BridgeError>(())
    /// ```
    pub fn parse_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args).map_err(|e| {
            let text = e.render().to_string();
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                    BridgeError::Help(text)
                }
                _ => BridgeError::Usage(text),
            }
        })
    }

    /// Axis tokens given on the command line, indexed by axis.
    #[must_use]
    pub fn axis_tokens(&self) -> [Option<&str>; MAX_AXES] {
        [
            &self.axis0,
            &self.axis1,
            &self.axis2,
            &self.axis3,
            &self.axis4,
            &self.axis5,
            &self.axis6,
            &self.axis7,
            &self.axis8,
            &self.axis9,
        ]
        .map(|token| token.as_deref())
    }
}
