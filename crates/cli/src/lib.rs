//! ac-time CLI Library
//!
//! This crate provides the command-line interface for ac-time, an interactive
//! client for logging time against an ActiveCollab server and reviewing what
//! has been logged.
//!
//! # Key Features
//!
//! - **Fuzzy Prompts**: Terminal-based selection of actions, projects, job types, dates and weeks
//! - **Time Entry**: Minutes, decimal hours or `H:MM`, converted to hours before submission
//! - **Summaries**: Daily and weekly listings with billable / non-billable totals
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`selection`]: Interactive selector and line prompts
//! - [`report`]: Rendering of daily and weekly summaries
//! - [`actions`]: The actions offered at the top-level prompt
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode - shows the action prompt until cancelled
//! act
//!
//! # Run one action directly
//! act "List Weekly Time Records"
//!
//! # Use another config and a password file
//! act -c ~/work/ac.yml --password-file ~/.ac-time/password
//! ```

pub mod actions;
pub mod cli_args;
pub mod report;
pub mod selection;
