//! Studio management commands: email digests, Instagram sync and image
//! optimisation.

pub mod cli;
pub mod commands;
