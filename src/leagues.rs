//! Static league → provider routing.
//!
//! Which upstream(s) serve a competition is configuration, not runtime
//! discovery: each league is either markup-only or a results + schedule
//! split that the aggregator merges. Season codes for the split feeds are
//! a single competition letter glued to the season year (`E2025`).

/// Supported competitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum League {
    /// Super League Basketball (UK) — widget markup provider.
    Slb,
    /// Turkish Airlines Euroleague — XML results + JSON schedule.
    Euroleague,
    /// BKT Eurocup — XML results + JSON schedule.
    Eurocup,
}

impl League {
    /// Resolve a downstream league identifier ("slb", "euroleague",
    /// "eurocup").
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_lowercase().as_str() {
            "slb" => Some(League::Slb),
            "euroleague" => Some(League::Euroleague),
            "eurocup" => Some(League::Eurocup),
            _ => None,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            League::Slb => "slb",
            League::Euroleague => "euroleague",
            League::Eurocup => "eurocup",
        }
    }
}

/// How a league's data is sourced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sources {
    /// One markup widget serves fixtures, results and standings.
    Markup,
    /// Results-oriented XML feed merged with a schedule-oriented JSON
    /// feed. `competition` is the feed's competition path segment;
    /// `season_prefix` builds the season code.
    Dual {
        competition: &'static str,
        season_prefix: char,
    },
}

/// The routing table. Adding a league means adding an arm here; nothing
/// in the adapters changes.
pub fn source_for(league: League) -> Sources {
    match league {
        League::Slb => Sources::Markup,
        League::Euroleague => Sources::Dual { competition: "E", season_prefix: 'E' },
        League::Eurocup => Sources::Dual { competition: "U", season_prefix: 'U' },
    }
}

/// Season code for a dual-source league: prefix letter + season year.
pub fn season_code(prefix: char, year: i32) -> String {
    format!("{prefix}{year}")
}
