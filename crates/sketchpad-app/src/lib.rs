//! Sketchpad Application
//!
//! Headless front end for the sketchpad canvas: replays input scripts and
//! reports notifications the way the interactive shell shows message boxes.

pub mod script;
pub mod session;

pub use script::{Command, ScriptError, parse_line, parse_script};
pub use session::{Session, describe_scene, describe_shape};
