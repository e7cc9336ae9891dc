//! HTTP client, error taxonomy and the aggregator entry points.
//!
//! [`CourtsideApi`] owns one reqwest client and the per-provider base URLs.
//! The four aggregator operations resolve a league through the routing
//! table, run the provider fetches (concurrently for dual-source leagues),
//! merge, sort and hand back canonical entities. Adapter errors propagate;
//! substituting fallback data is the caller's policy, not ours.

use crate::leagues::{season_code, source_for, League, Sources};
use crate::merge::merge_match_lists;
use crate::{dates, LeagueData, Match, MatchDetails, StandingsEntry};
use chrono::{DateTime, Datelike, Local};
use std::time::Duration;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

const SLB_WIDGET_BASE: &str = "https://widgets.streamlinesports.co.uk/slb";
const EUROLEAGUE_API_BASE: &str = "https://api-live.euroleague.net/v1";
const INCROWD_FEED_BASE: &str = "https://feeds.incrowdsports.com/v2";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure before any response was obtained.
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Non-2xx response.
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },
    /// Malformed payload: broken XML, JSON discriminator mismatch,
    /// unusable markup envelope. A well-formed *empty* payload is not a
    /// parse error; adapters return empty collections for those.
    #[error("parse error for {url}: {message}")]
    Parse { url: String, message: String },
}

impl ApiError {
    pub(crate) fn parse(url: &str, message: impl Into<String>) -> Self {
        ApiError::Parse { url: url.to_owned(), message: message.into() }
    }
}

/// What to do when exactly one feed of a dual-source league fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PartialFeedPolicy {
    /// Fail the whole call.
    #[default]
    Strict,
    /// Surface the surviving feed's matches (only completed or only
    /// upcoming games, depending on which feed died).
    Tolerant,
}

/// Aggregating client over the three upstream providers.
#[derive(Debug, Clone)]
pub struct CourtsideApi {
    client: reqwest::Client,
    timeout: Duration,
    policy: PartialFeedPolicy,
    season_year: Option<i32>,
    pub(crate) slb_base: String,
    pub(crate) euroleague_base: String,
    pub(crate) incrowd_base: String,
}

impl Default for CourtsideApi {
    fn default() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("courtside/0.1 (fixtures aggregator)")
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_secs(10),
            policy: PartialFeedPolicy::default(),
            season_year: None,
            slb_base: SLB_WIDGET_BASE.to_owned(),
            euroleague_base: EUROLEAGUE_API_BASE.to_owned(),
            incrowd_base: INCROWD_FEED_BASE.to_owned(),
        }
    }
}

impl CourtsideApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: PartialFeedPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Pin the season year used to build season codes (`E2025`). Unset,
    /// the current season is derived from the local clock.
    pub fn with_season_year(mut self, year: i32) -> Self {
        self.season_year = Some(year);
        self
    }

    /// Point the client at alternative hosts. Used by tests; also handy
    /// behind a proxy.
    pub fn with_bases(
        mut self,
        slb: impl Into<String>,
        euroleague: impl Into<String>,
        incrowd: impl Into<String>,
    ) -> Self {
        self.slb_base = slb.into();
        self.euroleague_base = euroleague.into();
        self.incrowd_base = incrowd.into();
        self
    }

    // -----------------------------------------------------------------------
    // Aggregator operations
    // -----------------------------------------------------------------------

    /// All matches for a league, deduplicated across feeds and sorted
    /// ascending by date (stable, so same-day games keep feed order).
    pub async fn fetch_matches(&self, league: League) -> ApiResult<Vec<Match>> {
        let mut matches = match source_for(league) {
            Sources::Markup => self.slb_matches().await?,
            Sources::Dual { competition, season_prefix } => {
                let code = season_code(season_prefix, self.season_year());
                let (results, schedule) = futures_util::future::join(
                    self.euroleague_results(&code),
                    self.incrowd_schedule(competition, &code),
                )
                .await;
                self.combine_feeds(results, schedule)?
            }
        };
        matches.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(matches)
    }

    /// League table, sorted ascending by position.
    pub async fn fetch_standings(&self, league: League) -> ApiResult<Vec<StandingsEntry>> {
        let mut standings = match source_for(league) {
            Sources::Markup => self.slb_standings().await?,
            Sources::Dual { season_prefix, .. } => {
                // Standings live on the results-oriented feed only.
                let code = season_code(season_prefix, self.season_year());
                self.euroleague_standings(&code).await?
            }
        };
        standings.sort_by_key(|e| e.position);
        Ok(standings)
    }

    /// Detail view for one match. Dual-source leagues ask the
    /// results-oriented feed first; the schedule feed only fills in when
    /// the game is unknown there (it rarely carries finals at all).
    pub async fn fetch_match_details(
        &self,
        match_id: &str,
        league: League,
    ) -> ApiResult<Option<MatchDetails>> {
        match source_for(league) {
            Sources::Markup => self.slb_match_details(match_id).await,
            Sources::Dual { competition, season_prefix } => {
                if let Some(details) = self.euroleague_match_details(match_id).await? {
                    return Ok(Some(details));
                }
                let code = season_code(season_prefix, self.season_year());
                self.incrowd_match_details(match_id, competition, &code).await
            }
        }
    }

    /// Matches and standings together, fetched concurrently.
    pub async fn fetch_all_data(&self, league: League) -> ApiResult<LeagueData> {
        let (matches, standings) = futures_util::future::join(
            self.fetch_matches(league),
            self.fetch_standings(league),
        )
        .await;
        Ok(LeagueData { matches: matches?, standings: standings? })
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn season_year(&self) -> i32 {
        self.season_year
            .unwrap_or_else(|| season_start_year(Local::now()))
    }

    /// Year assumed for provider dates that omit one. Pinned with the
    /// season year so normalization stays deterministic for callers that
    /// set it.
    pub(crate) fn reporting_year(&self) -> i32 {
        self.season_year.unwrap_or_else(dates::current_year)
    }

    fn combine_feeds(
        &self,
        results: ApiResult<Vec<Match>>,
        schedule: ApiResult<Vec<Match>>,
    ) -> ApiResult<Vec<Match>> {
        match (results, schedule) {
            (Ok(results), Ok(schedule)) => Ok(merge_match_lists(results, schedule)),
            (Ok(survivor), Err(failed)) | (Err(failed), Ok(survivor))
                if self.policy == PartialFeedPolicy::Tolerant =>
            {
                log::warn!("one feed failed, serving partial match list: {failed}");
                Ok(survivor)
            }
            (Err(e), _) | (_, Err(e)) => Err(e),
        }
    }

    /// One GET round trip: status check, body as text. No retries here;
    /// retrying is a caller policy.
    pub(crate) async fn get_text(&self, url: &str, accept: Option<&str>) -> ApiResult<String> {
        let mut request = self.client.get(url).timeout(self.timeout);
        if let Some(accept) = accept {
            request = request.header(reqwest::header::ACCEPT, accept);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network { url: url.to_owned(), source: e })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http { status: status.as_u16(), url: url.to_owned() });
        }
        response
            .text()
            .await
            .map_err(|e| ApiError::Network { url: url.to_owned(), source: e })
    }
}

/// First calendar year of the season in progress: a European season spans
/// October–June, so from July onwards queries target the new season code.
fn season_start_year(now: DateTime<Local>) -> i32 {
    if now.month() >= 7 { now.year() } else { now.year() - 1 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchStatus;
    use chrono::TimeZone;

    fn api(server: &mockito::Server) -> CourtsideApi {
        CourtsideApi::new()
            .with_bases(server.url(), server.url(), server.url())
            .with_season_year(2025)
    }

    const RESULTS_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
        <results>
            <game>
                <gamecode>170</gamecode>
                <date>Oct 3, 2025</date>
                <time>20:05</time>
                <hometeam>Real Madrid</hometeam>
                <homecode>MAD</homecode>
                <homescore>95</homescore>
                <awayteam>Panathinaikos AKTOR Athens</awayteam>
                <awaycode>PAN</awaycode>
                <awayscore>88</awayscore>
                <played>true</played>
            </game>
        </results>"#;

    const SCHEDULE_JSON: &str = r#"{
        "status": "success",
        "data": [
            {
                "gameCode": 170,
                "date": "2025-10-03T20:05:00+02:00",
                "status": "confirmed",
                "venue": { "name": "Movistar Arena" },
                "home": { "id": "mad", "name": "Real Madrid", "code": "MAD" },
                "away": { "id": "pan", "name": "Panathinaikos AKTOR Athens", "code": "PAN" }
            },
            {
                "gameCode": 171,
                "date": "2025-10-05T19:00:00+02:00",
                "status": "confirmed",
                "venue": { "name": "Zalgirio Arena" },
                "home": { "id": "zal", "name": "Zalgiris Kaunas", "code": "ZAL" },
                "away": { "id": "bar", "name": "FC Barcelona", "code": "BAR" }
            }
        ],
        "metadata": { "pageSize": 100 }
    }"#;

    #[test]
    fn season_rolls_over_in_july() {
        let feb = Local.with_ymd_and_hms(2026, 2, 15, 12, 0, 0).unwrap();
        let aug = Local.with_ymd_and_hms(2026, 8, 15, 12, 0, 0).unwrap();
        assert_eq!(season_start_year(feb), 2025);
        assert_eq!(season_start_year(aug), 2026);
    }

    #[tokio::test]
    async fn dual_source_league_merges_and_sorts() {
        let mut server = mockito::Server::new_async().await;
        let results = server
            .mock("GET", "/results")
            .match_query(mockito::Matcher::UrlEncoded("seasoncode".into(), "E2025".into()))
            .with_body(RESULTS_XML)
            .create_async()
            .await;
        let schedule = server
            .mock("GET", "/competitions/E/seasons/E2025/games")
            .match_query(mockito::Matcher::UrlEncoded("pageSize".into(), "100".into()))
            .with_body(SCHEDULE_JSON)
            .create_async()
            .await;

        let matches = api(&server).fetch_matches(League::Euroleague).await.unwrap();
        results.assert_async().await;
        schedule.assert_async().await;

        // Game 170 exists in both feeds; the results entry must win.
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, "E2025_170");
        assert_eq!(matches[0].status, MatchStatus::Completed);
        assert_eq!(matches[0].home_score, Some(95));
        assert_eq!(matches[0].away_score, Some(88));

        // Game 171 comes from the schedule feed, sorted after by date.
        assert_eq!(matches[1].id, "E2025_171");
        assert_eq!(matches[1].status, MatchStatus::Scheduled);
        assert_eq!(matches[1].date, "2025-10-05");
    }

    #[tokio::test]
    async fn tolerant_policy_serves_the_surviving_feed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/results")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/competitions/E/seasons/E2025/games")
            .match_query(mockito::Matcher::Any)
            .with_body(SCHEDULE_JSON)
            .create_async()
            .await;

        let matches = api(&server)
            .with_policy(PartialFeedPolicy::Tolerant)
            .fetch_matches(League::Euroleague)
            .await
            .unwrap();
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.status == MatchStatus::Scheduled));
    }

    #[tokio::test]
    async fn tolerant_policy_works_in_the_other_direction_too() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/results")
            .match_query(mockito::Matcher::Any)
            .with_body(RESULTS_XML)
            .create_async()
            .await;
        server
            .mock("GET", "/competitions/E/seasons/E2025/games")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let matches = api(&server)
            .with_policy(PartialFeedPolicy::Tolerant)
            .fetch_matches(League::Euroleague)
            .await
            .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].status, MatchStatus::Completed);
    }

    #[tokio::test]
    async fn strict_policy_propagates_the_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/results")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/competitions/E/seasons/E2025/games")
            .match_query(mockito::Matcher::Any)
            .with_body(SCHEDULE_JSON)
            .create_async()
            .await;

        let err = api(&server).fetch_matches(League::Euroleague).await.unwrap_err();
        match err {
            ApiError::Http { status, .. } => assert_eq!(status, 500),
            other => panic!("expected HTTP error, got {other}"),
        }
    }

    #[tokio::test]
    async fn both_feeds_failing_is_an_error_even_under_tolerant() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/results")
            .match_query(mockito::Matcher::Any)
            .with_status(502)
            .create_async()
            .await;
        server
            .mock("GET", "/competitions/E/seasons/E2025/games")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let err = api(&server)
            .with_policy(PartialFeedPolicy::Tolerant)
            .fetch_matches(League::Euroleague)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Http { .. }));
    }

    #[tokio::test]
    async fn standings_come_from_the_results_feed_sorted_by_position() {
        let standings_xml = r#"<standings>
            <team code="PAN" name="Panathinaikos AKTOR Athens">
                <ranking>2</ranking>
                <totalgames>18</totalgames>
                <wins>14</wins>
                <losses>4</losses>
                <ptsfavour>1502</ptsfavour>
                <ptsagainst>1390</ptsagainst>
            </team>
            <team code="MAD" name="Real Madrid">
                <ranking>1</ranking>
                <totalgames>18</totalgames>
                <wins>15</wins>
                <losses>3</losses>
                <ptsfavour>1540</ptsfavour>
                <ptsagainst>1402</ptsagainst>
            </team>
        </standings>"#;

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/standings")
            .match_query(mockito::Matcher::UrlEncoded("seasoncode".into(), "E2025".into()))
            .with_body(standings_xml)
            .create_async()
            .await;

        let standings = api(&server).fetch_standings(League::Euroleague).await.unwrap();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].position, 1);
        assert_eq!(standings[0].team.name, "Real Madrid");
        assert_eq!(standings[0].points, 33); // 2*15 + 3, no points field in feed
        assert_eq!(standings[1].position, 2);
    }

    #[tokio::test]
    async fn fetch_all_data_combines_matches_and_standings() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/results")
            .match_query(mockito::Matcher::Any)
            .with_body(RESULTS_XML)
            .create_async()
            .await;
        server
            .mock("GET", "/standings")
            .match_query(mockito::Matcher::Any)
            .with_body("<standings></standings>")
            .create_async()
            .await;
        server
            .mock("GET", "/competitions/E/seasons/E2025/games")
            .match_query(mockito::Matcher::Any)
            .with_body(SCHEDULE_JSON)
            .create_async()
            .await;

        let data = api(&server).fetch_all_data(League::Euroleague).await.unwrap();
        assert_eq!(data.matches.len(), 2);
        assert!(data.standings.is_empty()); // well-formed empty ≠ error
    }

    #[tokio::test]
    async fn slb_schedule_asks_for_the_full_season_window() {
        let html = r#"
            <div class="match-row STATUS_COMPLETE" data-match-id="1024">
                <span class="home-team">Leicester Riders</span>
                <span class="home-score">92</span>
                <span class="away-team">London Lions</span>
                <span class="away-score">85</span>
                <span class="match-date">Sep 28 2025 - 7:30 PM</span>
            </div>
            <div class="match-row STATUS_SCHEDULED" data-match-id="1031">
                <span class="home-team">Newcastle Eagles</span>
                <span class="home-score">&nbsp;</span>
                <span class="away-team">Sheffield Sharks</span>
                <span class="away-score">&nbsp;</span>
                <span class="match-date">Oct 12 2025 - 3:00 PM</span>
            </div>"#;
        let envelope = serde_json::json!({ "html": html, "css": [], "js": [] }).to_string();

        let mut server = mockito::Server::new_async().await;
        // roundNumber=-1 is load-bearing: without it the widget serves a
        // recent-only window.
        let schedule = server
            .mock("GET", "/schedule")
            .match_query(mockito::Matcher::UrlEncoded("roundNumber".into(), "-1".into()))
            .with_body(envelope)
            .create_async()
            .await;

        let matches = api(&server).fetch_matches(League::Slb).await.unwrap();
        schedule.assert_async().await;
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].status, MatchStatus::Completed);
        assert_eq!(matches[1].status, MatchStatus::Scheduled);
    }

    #[tokio::test]
    async fn unusable_widget_envelope_is_a_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/schedule")
            .match_query(mockito::Matcher::Any)
            .with_body(r#"{"css":[],"js":[]}"#)
            .create_async()
            .await;

        let err = api(&server).fetch_matches(League::Slb).await.unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[tokio::test]
    async fn network_failure_is_a_network_error() {
        // Point at a port nothing listens on.
        let dead = "http://127.0.0.1:1";
        let api = CourtsideApi::new()
            .with_bases(dead, dead, dead)
            .with_season_year(2025);
        let err = api.fetch_standings(League::Euroleague).await.unwrap_err();
        assert!(matches!(err, ApiError::Network { .. }));
    }
}
