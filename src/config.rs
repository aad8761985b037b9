//! # Configuration Module
//!
//! Handles loading the optional TOML profile and merging it with the
//! command line.
//!
//! ## Profile Format
//!
//! ```toml
//! device = 0
//! high_resolution = false
//! verbose = false
//!
//! [axes]
//! 0 = "64"
//! 1 = "-32768:32767:p"
//! ```
//!
//! Every key is optional. Command line options override the profile.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::axis::spec::AxisConfigs;
use crate::axis::MAX_AXES;
use crate::cli::Cli;
use crate::error::{BridgeError, Result};
use crate::midi::port::client_name;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Joystick number
    #[serde(default = "default_device")]
    pub device: u32,

    /// Switch 7-bit control changes to 14-bit
    #[serde(default)]
    pub high_resolution: bool,

    /// Report channel switches and sent values
    #[serde(default)]
    pub verbose: bool,

    /// Sequencer client name, `Joystick<device>` when unset
    #[serde(default)]
    pub client_name: Option<String>,

    /// Axis spec tokens keyed by axis number
    #[serde(default)]
    pub axes: BTreeMap<String, String>,
}

fn default_device() -> u32 { 0 }

impl Default for Config {
    fn default() -> Self {
        Self {
            device: default_device(),
            high_resolution: false,
            verbose: false,
            client_name: None,
            axes: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the profile
    ///
    /// # Errors
    ///
    /// Returns `ConfigFile` if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use joy_midi_bridge::config::Config;
    ///
    /// let config = Config::load("joystick.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            BridgeError::ConfigFile(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&contents).map_err(|e| {
            BridgeError::ConfigFile(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigFile` if an `axes` key is not an axis number or the
    /// client name is empty.
    fn validate(&self) -> Result<()> {
        for key in self.axes.keys() {
            parse_axis_key(key)?;
        }

        if matches!(&self.client_name, Some(name) if name.is_empty()) {
            return Err(BridgeError::ConfigFile(
                "client_name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Applies command line options on top of this configuration.
    ///
    /// `-d` replaces the device, `-r` and `-v` can only switch their
    /// setting on, and an axis token replaces the profile's token for
    /// the same axis.
    pub fn merge_cli(&mut self, cli: &Cli) {
        if let Some(device) = cli.device {
            self.device = device;
        }
        self.high_resolution |= cli.high_resolution;
        self.verbose |= cli.verbose;

        for (axis, token) in cli.axis_tokens().into_iter().enumerate() {
            if let Some(token) = token {
                self.axes.insert(axis.to_string(), token.to_string());
            }
        }
    }

    /// Parses every axis token, in axis order.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` for the first malformed token.
    ///
    /// # Examples
    ///
    /// ```
    /// use joy_midi_bridge::config::Config;
    ///
    /// let mut config = Config::default();
    /// config.axes.insert("0".to_string(), "10:20".to_string());
    /// assert!(config.axis_configs().is_err());
    /// ```
    pub fn axis_configs(&self) -> Result<AxisConfigs> {
        let mut tokens = self
            .axes
            .iter()
            .map(|(key, token)| Ok((parse_axis_key(key)?, token.as_str())))
            .collect::<Result<Vec<_>>>()?;
        tokens.sort_by_key(|&(axis, _)| axis);

        let mut configs = AxisConfigs::default();
        for (axis, token) in tokens {
            configs.configure(axis, token)?;
        }
        Ok(configs)
    }

    /// Sequencer client name to register.
    #[must_use]
    pub fn client_name(&self) -> String {
        self.client_name
            .clone()
            .unwrap_or_else(|| client_name(self.device))
    }
}

fn parse_axis_key(key: &str) -> Result<usize> {
    key.trim()
        .parse::<usize>()
        .ok()
        .filter(|&axis| axis < MAX_AXES)
        .ok_or_else(|| {
            BridgeError::ConfigFile(format!(
                "axes key '{}' must be an axis number 0-{}",
                key,
                MAX_AXES - 1
            ))
        })
}
