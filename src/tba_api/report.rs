use std::fmt::{self, Display};

use log::{debug, info};

use super::{AwardSource, TbaError};

/// Awards one team won at one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub team: String,
    /// Season-prefixed event code, e.g. `2017casj`
    pub event_key: String,
    pub name: String,
    /// Award names in the order the API returned them
    pub awards: Vec<String>,
}

/// One summary per event the team attended, in events query order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventReport {
    pub summaries: Vec<EventSummary>,
}

/// Fetch every event for `team` in `season`, then the awards for each one in turn
/// # Errors
/// The first failed request or unparseable response
pub async fn build_report<S: AwardSource>(
    source: &S,
    team: &str,
    season: &str,
) -> Result<EventReport, TbaError> {
    let events = source.events(team, season).await?;
    info!("Building report for team {team} across {} events", events.len());

    let mut summaries = Vec::with_capacity(events.len());
    for event in events {
        let event_key = format!("{season}{}", event.event_code);
        let awards: Vec<String> = source
            .awards(team, &event_key)
            .await?
            .into_iter()
            .map(|award| award.name)
            .collect();
        debug!("{event_key}: {} awards", awards.len());
        summaries.push(EventSummary {
            team: team.to_string(),
            event_key,
            name: event.name,
            awards,
        });
    }

    Ok(EventReport { summaries })
}

impl EventReport {
    /// One sentence per event
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.summaries.iter().map(ToString::to_string).collect()
    }
}

impl Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (team, event) = (&self.team, &self.name);
        match self.awards.as_slice() {
            [] => write!(f, "Team {team} did not win an award at {event}."),
            [only] => write!(f, "Team {team} won the {only} at {event}."),
            [first, second] => {
                write!(f, "Team {team} won the {first} and the {second} at {event}.")
            }
            // Last award picked by position so repeated names still all print
            [rest @ .., last] => {
                let listed = rest
                    .iter()
                    .fold(String::new(), |acc, award| format!("{acc}the {award}, "));
                write!(f, "Team {team} won {listed}and the {last} at {event}.")
            }
        }
    }
}
