//! The top-level actions offered by the action prompt.

use std::fmt::{Display, Formatter};

use ac_time_core::api::{current_user, NewTimeRecord, TimeTracking};
use ac_time_core::calendar::format_date;
use ac_time_core::completion::{resolve_entity, Completer};
use ac_time_core::config::Config;
use ac_time_core::error::Result;
use ac_time_core::execution::calendar_lines;
use ac_time_core::records::{aggregate, Window};
use chrono::{Local, NaiveDate};
use log::{debug, info};

use crate::report::{daily_report, format_hours, print_report, weekly_report};
use crate::selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateTimeRecord,
    ListDailyTimeRecords,
    ListWeeklyTimeRecords,
}

impl Action {
    pub const ALL: [Action; 3] = [
        Action::CreateTimeRecord,
        Action::ListDailyTimeRecords,
        Action::ListWeeklyTimeRecords,
    ];

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Action::CreateTimeRecord => "Create Time Record",
            Action::ListDailyTimeRecords => "List Daily Time Records",
            Action::ListWeeklyTimeRecords => "List Weekly Time Records",
        }
    }

    /// Finds the action with exactly this name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    /// Completer over every action name, alphabetically.
    #[must_use]
    pub fn completer() -> Completer {
        Completer::sorted(Self::ALL.iter().map(Action::name))
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn cancelled() -> Result<()> {
    println!("Cancelled.");
    Ok(())
}

/// Runs one action to completion. Cancelling a prompt ends the action quietly.
///
/// # Errors
///
/// API failures, entity lookups that do not resolve to exactly one entity,
/// and terminal failures are returned.
pub fn run_action<A: TimeTracking>(action: Action, api: &A, config: &Config) -> Result<()> {
    info!("Running action `{action}`");
    match action {
        Action::CreateTimeRecord => create_time_record(api, config),
        Action::ListDailyTimeRecords => list_daily_time_records(api, config),
        Action::ListWeeklyTimeRecords => list_weekly_time_records(api, config),
    }
}

fn create_time_record<A: TimeTracking>(api: &A, config: &Config) -> Result<()> {
    let projects = api.list_projects()?;
    let completer = Completer::sorted(projects.iter().map(|project| project.name.as_str()));
    let Some(project_name) = selection::select_text("Project", &completer)? else {
        return cancelled();
    };
    let project = resolve_entity("project", &project_name, &projects, |p| p.name.as_str())?;

    let hours = selection::prompt_hours("Value")?;

    let job_types = api.list_job_types()?;
    let completer = Completer::sorted(job_types.iter().map(|job_type| job_type.name.as_str()));
    let Some(job_type_name) = selection::select_text("Job Type", &completer)? else {
        return cancelled();
    };
    let job_type = resolve_entity("job type", &job_type_name, &job_types, |j| j.name.as_str())?;

    let context = calendar_lines(&config.calendar_command);
    let Some(record_date) = selection::select_date("Date", today(), &context)? else {
        return cancelled();
    };

    let billable = selection::confirm("Billable")?;
    let summary = selection::prompt_summary("Summary")?;

    let user = current_user(api, &config.user)?;
    let record = NewTimeRecord::new(hours, &user, job_type, record_date, billable, summary);
    debug!("Submitting {record:?}");
    api.create_time_record(project.id, &record)?;

    println!(
        "Logged {}h on {} to {}.",
        format_hours(hours),
        format_date(record_date),
        project.name
    );
    Ok(())
}

fn list_daily_time_records<A: TimeTracking>(api: &A, config: &Config) -> Result<()> {
    let context = calendar_lines(&config.calendar_command);
    let Some(date) = selection::select_date("Date", today(), &context)? else {
        return cancelled();
    };

    let user = current_user(api, &config.user)?;
    let records = api.list_time_records(user.id)?;
    let summary = aggregate(&records, Window::Day(date), today());

    print_report(&daily_report(&summary, config.summary_width))
}

fn list_weekly_time_records<A: TimeTracking>(api: &A, config: &Config) -> Result<()> {
    let context = calendar_lines(&config.calendar_command);
    let Some(week) = selection::select_week("Week", today(), &context)? else {
        return cancelled();
    };

    let user = current_user(api, &config.user)?;
    let records = api.list_time_records(user.id)?;
    let summary = aggregate(&records, Window::Week(week), today());

    print_report(&weekly_report(
        &summary,
        config.summary_width,
        config.target_weekly_hours,
    ))
}
