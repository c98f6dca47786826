//! ac-time Core Library
//!
//! This crate provides the core functionality for ac-time, an interactive
//! client for logging and reviewing time records on an ActiveCollab server.
//!
//! # Key Features
//!
//! - **Fuzzy Completion**: Subsequence matching over projects, job types, dates and weeks
//! - **Date Windows**: Recent-day and Monday to Sunday week candidates
//! - **Summaries**: Daily and weekly billable / non-billable totals
//! - **API Client**: Blocking REST client for the ActiveCollab endpoints used
//! - **Configuration Management**: YAML configuration and password resolution
//! - **Error Handling**: One error type for all failure modes
//!
//! # Examples
//!
//! Summarising a day of records:
//!
//! ```
//! use ac_time_core::records::{aggregate, TimeRecord, Window};
//! use chrono::NaiveDate;
//!
//! let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let records = vec![
//!     TimeRecord { value: 2.0, billable: true, summary: "Feature".into(), record_date: day },
//!     TimeRecord { value: 1.0, billable: false, summary: "Standup".into(), record_date: day },
//! ];
//! let summary = aggregate(&records, Window::Day(day), day);
//! assert_eq!(summary.totals.total(), 3.0);
//! ```

pub mod api;
pub mod calendar;
pub mod completion;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod records;
