//! GitHub GraphQL client for the contribution calendar.
//!
//! The response is decoded into typed structs at this boundary; anything
//! that does not match (missing user, GraphQL errors, bad JSON) becomes a
//! [`FetchError`] instead of a partial calendar.
use crate::calendar::ContributionCalendar;
use serde::{Deserialize, Serialize};

const USER_AGENT: &str = concat!("ghmines/", env!("CARGO_PKG_VERSION"));

const CALENDAR_QUERY: &str = "query($login: String!) {
  user(login: $login) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            contributionCount
            date
          }
        }
      }
    }
  }
}";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("API error: HTTP {0}")]
    Status(u16),

    #[error("malformed API response: {0}")]
    Decode(String),

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("user {0:?} not found")]
    UserNotFound(String),
}

/// Anything that can produce a contribution calendar for a login.
pub trait ContributionSource {
    fn fetch(&self, username: &str, token: Option<&str>)
        -> Result<ContributionCalendar, FetchError>;
}

/// Live source backed by the GitHub GraphQL API.
#[derive(Debug, Clone)]
pub struct GraphqlSource {
    api_url: String,
}

impl GraphqlSource {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }
}

#[derive(Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Serialize)]
struct Variables<'a> {
    login: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ResponseData>,
    #[serde(default)]
    errors: Vec<GraphqlErrorItem>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorItem {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

impl ContributionSource for GraphqlSource {
    fn fetch(
        &self,
        username: &str,
        token: Option<&str>,
    ) -> Result<ContributionCalendar, FetchError> {
        let body = GraphqlRequest {
            query: CALENDAR_QUERY,
            variables: Variables { login: username },
        };
        let mut request = ureq::post(&self.api_url).header("User-Agent", USER_AGENT);
        if let Some(token) = token {
            request = request.header("Authorization", &format!("Bearer {token}"));
        }
        tracing::debug!(url = %self.api_url, authenticated = token.is_some(), "fetching contribution calendar");

        let mut response = request.send_json(&body).map_err(|err| match err {
            ureq::Error::StatusCode(code) => FetchError::Status(code),
            other => FetchError::Transport {
                url: self.api_url.clone(),
                message: other.to_string(),
            },
        })?;
        let text = response
            .body_mut()
            .read_to_string()
            .map_err(|err| FetchError::Transport {
                url: self.api_url.clone(),
                message: err.to_string(),
            })?;
        parse_response(&text, username)
    }
}

/// Decode a GraphQL response body into the calendar for `username`.
pub fn parse_response(text: &str, username: &str) -> Result<ContributionCalendar, FetchError> {
    let parsed: GraphqlResponse =
        serde_json::from_str(text).map_err(|err| FetchError::Decode(err.to_string()))?;
    if !parsed.errors.is_empty() {
        return Err(FetchError::GraphQl(
            parsed.errors.into_iter().map(|item| item.message).collect(),
        ));
    }
    let data = parsed
        .data
        .ok_or_else(|| FetchError::Decode("response has no data".to_string()))?;
    let user = data
        .user
        .ok_or_else(|| FetchError::UserNotFound(username.to_string()))?;
    Ok(user.contributions_collection.contribution_calendar)
}
