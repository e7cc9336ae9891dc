//! Schedule-oriented JSON feed adapter.
//!
//! The feed wraps its payload in a `{status, data, metadata}` envelope;
//! the `status` discriminator must say `"success"` before the payload is
//! trusted — anything else is a fetch failure, not an empty round. Games
//! carry a `confirmed | result` status enum, and the feed is documented
//! to rarely flip entries to `result`, which is why it is never trusted
//! over the results feed during merging.

use crate::client::{ApiError, ApiResult, CourtsideApi};
use crate::{dates, teams, Match, MatchDetails, MatchExtras, MatchStatus, Team};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FeedEnvelope {
    status: Option<String>,
    #[serde(default)]
    data: Vec<FeedGame>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedGame {
    id: Option<String>,
    game_code: Option<i64>,
    date: Option<String>, // ISO-8601 with offset
    status: Option<String>,
    venue: Option<FeedVenue>,
    home: Option<FeedSide>,
    away: Option<FeedSide>,
}

#[derive(Debug, Deserialize)]
struct FeedVenue {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedSide {
    id: Option<String>,
    name: Option<String>,
    code: Option<String>,
    logo_url: Option<String>,
    score: Option<u16>,
}

// ---------------------------------------------------------------------------
// Adapter operations
// ---------------------------------------------------------------------------

impl CourtsideApi {
    /// Full-season schedule for one competition. `pageSize=100` covers a
    /// whole regular season in one page.
    pub async fn incrowd_schedule(
        &self,
        competition: &str,
        season_code: &str,
    ) -> ApiResult<Vec<Match>> {
        let url = format!(
            "{}/competitions/{competition}/seasons/{season_code}/games?pageSize=100",
            self.incrowd_base
        );
        let body = self.get_text(&url, None).await?;
        parse_schedule(&body, &url, season_code)
    }

    /// Schedule-level detail: the match itself, no boxscore (the feed has
    /// none). `Ok(None)` when the game is not in the schedule.
    pub async fn incrowd_match_details(
        &self,
        match_id: &str,
        competition: &str,
        season_code: &str,
    ) -> ApiResult<Option<MatchDetails>> {
        let games = self.incrowd_schedule(competition, season_code).await?;
        Ok(games
            .into_iter()
            .find(|m| m.id == match_id)
            .map(|game| MatchDetails::for_match(game, MatchExtras::default())))
    }
}

pub(crate) fn parse_schedule(body: &str, url: &str, season_code: &str) -> ApiResult<Vec<Match>> {
    let envelope: FeedEnvelope =
        serde_json::from_str(body).map_err(|e| ApiError::parse(url, e.to_string()))?;
    match envelope.status.as_deref() {
        Some("success") => {}
        other => {
            return Err(ApiError::parse(
                url,
                format!("feed status {:?}, expected \"success\"", other.unwrap_or("<missing>")),
            ));
        }
    }
    Ok(envelope
        .data
        .into_iter()
        .map(|g| map_game(g, season_code))
        .collect())
}

fn map_game(g: FeedGame, season_code: &str) -> Match {
    let status = match g.status.as_deref() {
        Some("result") => MatchStatus::Completed,
        // "confirmed" and anything unrecognized are upcoming games.
        _ => MatchStatus::Scheduled,
    };

    let (date, time) = g
        .date
        .as_deref()
        .and_then(dates::from_rfc3339)
        .unwrap_or_else(|| (String::new(), dates::TBC.to_owned()));

    let home = map_side(g.home);
    let away = map_side(g.away);

    // Key on the competition-wide game code so the id lines up with the
    // results feed's entries for the same real-world game. Stubs missing
    // both code and native id still need distinct ids, or they would
    // dedupe against each other in the merge.
    let id = match g.game_code {
        Some(code) => format!("{season_code}_{code}"),
        None => g
            .id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| {
                format!("{date}-{}-{}", teams::slug(&home.0.name), teams::slug(&away.0.name))
            }),
    };
    let (home_score, away_score) = if status == MatchStatus::Scheduled {
        (None, None)
    } else {
        (home.1, away.1)
    };

    Match {
        id,
        home_team: home.0,
        away_team: away.0,
        home_score,
        away_score,
        date,
        time,
        venue: g.venue.and_then(|v| v.name).unwrap_or_default(),
        status,
    }
}

fn map_side(side: Option<FeedSide>) -> (Team, Option<u16>) {
    let Some(side) = side else {
        return (Team::default(), None);
    };
    let name = side.name.unwrap_or_default();
    let team = Team {
        id: side.id.or(side.code).unwrap_or_default(),
        short_name: teams::short_name(&name),
        name,
        logo: side.logo_url,
    };
    (team, side.score)
}
