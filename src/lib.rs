//! # Joy MIDI Bridge Library
//!
//! Turn a Linux joystick into a MIDI controller.
//!
//! This library provides the core functionality for translating joystick
//! axis movements into MIDI control change, pitch bend and 14-bit
//! controller messages, with joystick buttons selecting the MIDI channel.

pub mod axis;
pub mod bridge;
pub mod cli;
pub mod config;
pub mod error;
pub mod joystick;
pub mod midi;
