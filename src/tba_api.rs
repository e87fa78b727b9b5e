pub mod report;

use std::{env, fmt};

use log::{debug, info, trace};
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use thiserror::Error;

pub const AUTH_KEY_VAR: &str = "TBA_AUTH_KEY";
pub const API_URI_VAR: &str = "TBA_API_URI";
pub const SEASON_VAR: &str = "TBA_SEASON";

pub const DEFAULT_API_URI: &str = "https://www.thebluealliance.com/api/v3";
pub const DEFAULT_SEASON: &str = "2017";

const AUTH_HEADER: &str = "X-TBA-Auth-Key";

#[derive(Debug, Error)]
pub enum TbaError {
    #[error("Error making request")]
    NetError(#[from] reqwest::Error),
    #[error("Error parsing request response")]
    ParseError(#[from] serde_json::Error),
    #[error("{0} not defined")]
    MissingVar(&'static str),
}

/// Settings needed to talk to The Blue Alliance
#[derive(Clone, PartialEq)]
pub struct TbaConfig {
    pub api_uri: String,
    pub auth_key: String,
    pub season: String,
}

impl TbaConfig {
    /// Read config from the process environment, falling back to `.env` when the key is missing.
    /// `.env` is only read in that case, so with `TBA_AUTH_KEY` already exported any
    /// `TBA_API_URI` or `TBA_SEASON` set in `.env` is ignored.
    /// # Errors
    /// `TBA_AUTH_KEY` is not set anywhere
    pub fn from_env() -> Result<Self, TbaError> {
        if env::var(AUTH_KEY_VAR).is_err() {
            match dotenv::dotenv() {
                Ok(path) => debug!("Loaded env vars from {}", path.display()),
                Err(e) => debug!("Failed to load .env: {e}"),
            }
        }
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Resolve config through any variable lookup, applying defaults for optional values
    /// # Errors
    /// The auth key is absent or empty
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, TbaError> {
        let auth_key = lookup(AUTH_KEY_VAR)
            .filter(|key| !key.is_empty())
            .ok_or(TbaError::MissingVar(AUTH_KEY_VAR))?;
        let api_uri = lookup(API_URI_VAR)
            .filter(|uri| !uri.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URI.to_string())
            .trim_end_matches('/')
            .to_string();
        let season = lookup(SEASON_VAR)
            .filter(|season| !season.is_empty())
            .unwrap_or_else(|| DEFAULT_SEASON.to_string());

        Ok(Self {
            api_uri,
            auth_key,
            season,
        })
    }
}

// Keep the key out of logs
impl fmt::Debug for TbaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TbaConfig")
            .field("api_uri", &self.api_uri)
            .field("auth_key", &"<redacted>")
            .field("season", &self.season)
            .finish()
    }
}

/// Anything that can answer the two queries a report is built from
#[allow(async_fn_in_trait)]
pub trait AwardSource {
    /// Events `team` attended in `season`
    async fn events(&self, team: &str, season: &str) -> Result<Vec<Event>, TbaError>;
    /// Awards `team` won at the event identified by the season-prefixed `event_key`
    async fn awards(&self, team: &str, event_key: &str) -> Result<Vec<Award>, TbaError>;
}

#[derive(Debug)]
pub struct TbaApi {
    config: TbaConfig,
    client: reqwest::Client,
}

impl TbaApi {
    /// Form a TBA interface from the environment, does not make any requests by itself
    /// # Errors
    /// Missing auth key
    pub fn new() -> Result<Self, TbaError> {
        Ok(Self::with_config(TbaConfig::from_env()?))
    }

    #[must_use]
    pub fn with_config(config: TbaConfig) -> Self {
        info!("TBA API initializing against {}", config.api_uri);
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn season(&self) -> &str {
        &self.config.season
    }

    fn events_url(&self, team: &str, season: &str) -> String {
        format!(
            "{}/team/frc{team}/events/{season}/simple",
            self.config.api_uri
        )
    }

    fn awards_url(&self, team: &str, event_key: &str) -> String {
        format!(
            "{}/team/frc{team}/event/{event_key}/awards",
            self.config.api_uri
        )
    }

    /// Authorized GET, body parsed as JSON into `T`
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, TbaError> {
        debug!("GET {url}");
        let resp = self
            .client
            .get(url)
            .header(AUTH_HEADER, &self.config.auth_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        trace!("Raw response from {url}: {resp}");
        Ok(serde_json::from_str(&resp)?)
    }
}

impl AwardSource for TbaApi {
    async fn events(&self, team: &str, season: &str) -> Result<Vec<Event>, TbaError> {
        info!("Events requested for team {team} in {season}");
        let events: Vec<Event> = self.get(&self.events_url(team, season)).await?;
        debug!("Team {team} attended {} events", events.len());
        Ok(events)
    }

    async fn awards(&self, team: &str, event_key: &str) -> Result<Vec<Award>, TbaError> {
        debug!("Awards requested for team {team} at {event_key}");
        self.get(&self.awards_url(team, event_key)).await
    }
}

/// Item of the `/events/{year}/simple` listing, other fields are ignored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Event {
    pub event_code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Award {
    pub name: String,
}
