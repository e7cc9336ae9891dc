pub mod client;
pub mod dates;
pub mod euroleague;
pub mod incrowd;
pub mod leagues;
pub mod markup;
pub mod merge;
pub mod slb;
pub mod teams;
pub mod xml;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Canonical entities — provider-independent model all adapters map into
// ---------------------------------------------------------------------------

/// A club as one provider knows it. `id` is provider-local (numeric string,
/// short code, or derived slug) and is only comparable within a single
/// provider's result set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,       // "Leicester Riders"
    pub short_name: String, // "Riders"
    pub logo: Option<String>,
}

/// One fixture or result. `id` is the provider-native game identifier and
/// doubles as the dedup key when two feeds cover the same competition, so
/// adapters sharing a competition must derive it from the shared game code
/// (e.g. `E2025_170`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Match {
    pub id: String,
    pub home_team: Team,
    pub away_team: Team,
    pub home_score: Option<u16>,
    pub away_score: Option<u16>,
    /// ISO calendar date `YYYY-MM-DD`, local wall-clock interpretation of
    /// the source timestamp (see [`dates`]).
    pub date: String,
    /// `HH:MM` 24-hour local time, or `"TBC"` when the provider omits it.
    pub time: String,
    pub venue: String,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    #[default]
    Scheduled,
    Live,
    Completed,
}

/// One row of a league table. Emitted sorted ascending by `position`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StandingsEntry {
    pub position: u16,
    pub team: Team,
    pub played: u16,
    pub won: u16,
    pub lost: u16,
    pub points_for: u16,
    pub points_against: u16,
    pub points_difference: i32,
    /// League standings points (not total score). Provider-reported, or
    /// derived via [`StandingsEntry::derive_points`] when absent.
    pub points: u16,
}

impl StandingsEntry {
    /// Basketball-standard standings points: 2 per win, 1 per loss.
    pub fn derive_points(won: u16, lost: u16) -> u16 {
        2 * won + lost
    }
}

/// Match plus everything a detail view needs. Quarter scores, stats and
/// box-score rows are populated only for live/completed games; a scheduled
/// game carries none of them (enforced by [`MatchDetails::for_match`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchDetails {
    pub game: Match,
    pub current_period: Option<String>,
    pub quarter_scores: Option<QuarterScores>,
    pub home_stats: Option<TeamStats>,
    pub away_stats: Option<TeamStats>,
    pub home_players: Vec<PlayerLine>,
    pub away_players: Vec<PlayerLine>,
}

impl MatchDetails {
    /// Wrap a match, keeping the in-game extras only when the match has
    /// actually started. Scheduled games never carry quarter scores or
    /// stats, whatever the provider happens to send.
    pub fn for_match(game: Match, extras: MatchExtras) -> Self {
        if game.status == MatchStatus::Scheduled {
            return Self { game, ..Default::default() };
        }
        Self {
            game,
            current_period: extras.current_period,
            quarter_scores: extras.quarter_scores,
            home_stats: extras.home_stats,
            away_stats: extras.away_stats,
            home_players: extras.home_players,
            away_players: extras.away_players,
        }
    }
}

/// In-game extras an adapter extracted before wrapping them into
/// [`MatchDetails`].
#[derive(Debug, Clone, Default)]
pub struct MatchExtras {
    pub current_period: Option<String>,
    pub quarter_scores: Option<QuarterScores>,
    pub home_stats: Option<TeamStats>,
    pub away_stats: Option<TeamStats>,
    pub home_players: Vec<PlayerLine>,
    pub away_players: Vec<PlayerLine>,
}

/// Per-quarter (home, away) pairs, plus a combined overtime pair when the
/// game went long.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuarterScores {
    pub quarters: Vec<(u16, u16)>,
    pub overtime: Option<(u16, u16)>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TeamStats {
    pub field_goal_pct: f32,
    pub three_point_pct: f32,
    pub free_throw_pct: f32,
    pub rebounds_offensive: u16,
    pub rebounds_defensive: u16,
    pub assists: u16,
    pub turnovers: u16,
    pub steals: u16,
    pub blocks: u16,
}

/// One box-score row.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerLine {
    pub id: String,
    pub name: String,
    pub points: u16,
    pub rebounds: u16,
    pub assists: u16,
    pub minutes: String,
}

/// Matches and standings for one league, fetched together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeagueData {
    pub matches: Vec<Match>,
    pub standings: Vec<StandingsEntry>,
}

// ---------------------------------------------------------------------------
// Shared status helpers
// ---------------------------------------------------------------------------

/// Parse a score field, accepting only an anchored all-digit string.
///
/// Providers fill unplayed score cells with placeholder text (`\u{a0}`,
/// em-dashes, "-"); loose numeric coercion would turn those into 0 and
/// fabricate a final score, so anything but pure digits is rejected.
pub fn parse_score_text(raw: &str) -> Option<u16> {
    let s = raw.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl MatchStatus {
    /// Classify a free-text game-phase label ("Quarter 3", "Halftime",
    /// "Final"...). Terminal phases win over in-progress ones; anything
    /// unrecognized stays Scheduled.
    pub fn from_phase(phase: &str) -> Self {
        let p = phase.trim().to_lowercase();
        if p.is_empty() {
            return MatchStatus::Scheduled;
        }
        const TERMINAL: [&str; 3] = ["final", "finished", "full time"];
        if TERMINAL.iter().any(|t| p.contains(t)) {
            return MatchStatus::Completed;
        }
        const IN_PROGRESS: [&str; 4] = ["quarter", "halftime", "half-time", "overtime"];
        if IN_PROGRESS.iter().any(|t| p.contains(t))
            || matches!(p.as_str(), "q1" | "q2" | "q3" | "q4" | "ot")
        {
            return MatchStatus::Live;
        }
        MatchStatus::Scheduled
    }
}
