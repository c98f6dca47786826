//! Blocking client for the ActiveCollab REST API.
//!
//! Only the handful of endpoints the time tracker needs are covered. The
//! client authenticates once with [`ActiveCollab::authenticate`] and then
//! sends the issued token with every request.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, TimeDelta};
use log::{debug, info};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::calendar::ISO_DATE_FORMAT;
use crate::completion::resolve_entity;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::records::TimeRecord;

/// Header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "X-Angie-AuthApiToken";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct JobType {
    pub id: u64,
    pub name: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
}

/// A time record as the API sends it.
#[derive(Deserialize, Debug, Clone)]
pub struct RawTimeRecord {
    pub value: f64,
    pub billable_status: u8,
    pub summary: Option<String>,
    /// Unix timestamp of the record's day.
    pub record_date: i64,
}

impl RawTimeRecord {
    /// Converts the wire record, shifting its timestamp by `utc_offset_hours` before taking the date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidResponse`] if the timestamp is out of range.
    pub fn into_record(self, utc_offset_hours: i32) -> Result<TimeRecord> {
        let timestamp = DateTime::from_timestamp(self.record_date, 0).ok_or_else(|| {
            Error::InvalidResponse(format!("record_date {} is out of range", self.record_date))
        })?;
        let record_date = (timestamp + TimeDelta::hours(i64::from(utc_offset_hours))).date_naive();

        Ok(TimeRecord {
            value: self.value,
            billable: self.billable_status != 0,
            summary: self.summary.unwrap_or_default(),
            record_date,
        })
    }
}

#[derive(Deserialize, Debug)]
struct TimeRecordsResponse {
    time_records: Vec<RawTimeRecord>,
}

/// Form payload for creating a time record.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewTimeRecord {
    pub value: f64,
    pub user_id: u64,
    pub job_type_id: u64,
    pub record_date: String,
    pub billable_status: u8,
    pub summary: String,
}

impl NewTimeRecord {
    #[must_use]
    pub fn new(
        hours: f64,
        user: &User,
        job_type: &JobType,
        record_date: NaiveDate,
        billable: bool,
        summary: String,
    ) -> Self {
        Self {
            value: hours,
            user_id: user.id,
            job_type_id: job_type.id,
            record_date: record_date.format(ISO_DATE_FORMAT).to_string(),
            billable_status: u8::from(billable),
            summary,
        }
    }
}

/// The remote operations the time tracker relies on.
pub trait TimeTracking {
    fn list_projects(&self) -> Result<Vec<Project>>;
    fn list_job_types(&self) -> Result<Vec<JobType>>;
    fn list_users(&self) -> Result<Vec<User>>;
    fn list_time_records(&self, user_id: u64) -> Result<Vec<TimeRecord>>;
    fn create_time_record(&self, project_id: u64, record: &NewTimeRecord) -> Result<()>;
}

/// Looks up the user whose email is `email`.
///
/// # Errors
///
/// Fails if the users cannot be listed or if not exactly one user has that email.
pub fn current_user<A: TimeTracking + ?Sized>(api: &A, email: &str) -> Result<User> {
    let users = api.list_users()?;
    resolve_entity("user", email, &users, |user| user.email.as_str()).cloned()
}

#[derive(Serialize)]
struct IssueTokenRequest<'a> {
    username: &'a str,
    password: &'a str,
    client_name: &'a str,
    client_vendor: &'a str,
}

pub struct ActiveCollab {
    http: Client,
    config: Config,
    token: Option<String>,
}

impl fmt::Debug for ActiveCollab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveCollab")
            .field("url", &self.config.url)
            .field("authenticated", &self.token.is_some())
            .finish_non_exhaustive()
    }
}

fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(Error::Authentication(format!(
            "the API refused the request ({status})"
        )));
    }

    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}

fn token_from_body(body: &str) -> Result<String> {
    let json: serde_json::Value = serde_json::from_str(body)
        .map_err(|_| Error::Authentication("the token response was not JSON".to_string()))?;

    json.get("token")
        .and_then(serde_json::Value::as_str)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .ok_or_else(|| Error::Authentication("no token in the response".to_string()))
}

impl ActiveCollab {
    /// Creates an unauthenticated client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] if the HTTP client fails to build.
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder().timeout(DEFAULT_TIMEOUT).build()?;

        Ok(Self {
            http,
            config,
            token: None,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.url, path)
    }

    fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| Error::Authentication("not authenticated yet".to_string()))
    }

    /// Exchanges the configured credentials for a session token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the credentials are rejected and
    /// [`Error::Transport`] if the server cannot be reached.
    pub fn authenticate(&mut self) -> Result<()> {
        let request = IssueTokenRequest {
            username: &self.config.user,
            password: &self.config.password,
            client_name: &self.config.client_name,
            client_vendor: &self.config.client_vendor,
        };

        let response = self
            .http
            .post(self.url("/issue-token"))
            .form(&request)
            .send()?;
        let body = check_status(response)?.text()?;

        self.token = Some(token_from_body(&body)?);
        info!("Authenticated as {}", self.config.user);
        Ok(())
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {path}");
        let response = self
            .http
            .get(self.url(path))
            .header(AUTH_TOKEN_HEADER, self.token()?)
            .send()?;

        check_status(response)?
            .json()
            .map_err(|e| Error::InvalidResponse(format!("{path}: {e}")))
    }

    fn post_form<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        debug!("POST {path}");
        let response = self
            .http
            .post(self.url(path))
            .header(AUTH_TOKEN_HEADER, self.token()?)
            .form(body)
            .send()?;

        check_status(response)?;
        Ok(())
    }

    /// System information reported by the server.
    ///
    /// # Errors
    ///
    /// Fails like any other authenticated request.
    pub fn info(&self) -> Result<serde_json::Value> {
        self.get("/info")
    }
}

impl TimeTracking for ActiveCollab {
    fn list_projects(&self) -> Result<Vec<Project>> {
        self.get("/projects")
    }

    fn list_job_types(&self) -> Result<Vec<JobType>> {
        self.get("/job-types")
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.get("/users")
    }

    fn list_time_records(&self, user_id: u64) -> Result<Vec<TimeRecord>> {
        let response: TimeRecordsResponse = self.get(&format!("/users/{user_id}/time-records"))?;
        response
            .time_records
            .into_iter()
            .map(|raw| raw.into_record(self.config.utc_offset_hours))
            .collect()
    }

    fn create_time_record(&self, project_id: u64, record: &NewTimeRecord) -> Result<()> {
        self.post_form(&format!("/projects/{project_id}/time-records"), record)?;
        info!(
            "Created a {}h time record on {} for project {project_id}",
            record.value, record.record_date
        );
        Ok(())
    }
}
