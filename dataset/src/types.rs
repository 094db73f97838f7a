//! Tournament entity types
//!
//! Field names follow the dataset document. Matches reference teams by name
//! and stadiums by id; groups and knockout stages embed their matches.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stadium {
    pub id: i32,
    pub name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i32,

    /// Join key used by [`Match::home_team`] and [`Match::away_team`]
    pub name: String,

    pub eliminated: bool,
    pub eliminated_at_which_stage: String,
    pub fifa_code: String,
    pub iso2: String,
    pub flag: String,
    pub emoji: String,
    pub emoji_string: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: i32,

    #[serde(rename = "type")]
    pub match_type: String,

    /// Present in the document but not used to resolve teams
    pub home_team_id: i32,
    pub away_team_id: i32,

    /// Team name, resolved against [`Team::name`]
    pub home_team: String,
    pub away_team: String,

    /// Scores are kept as text; unplayed fixtures carry placeholders
    pub home_score: String,
    pub away_score: String,

    #[serde(default, deserialize_with = "deserialize_scorers")]
    pub home_scorers: Option<String>,
    #[serde(default, deserialize_with = "deserialize_scorers")]
    pub away_scorers: Option<String>,

    pub date: String,
    pub stadium_id: i32,
    pub time_elapsed: String,
    pub finished: bool,
    pub matchday: i32,
}

impl Match {
    /// Whether either side of the fixture is the given team name
    pub fn involves(&self, team_name: &str) -> bool {
        self.home_team == team_name || self.away_team == team_name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub runnerup: Option<String>,
    pub matches: Vec<Match>,
}

/// A bracket stage such as "Round of 16" or "Final"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Knockout {
    pub name: String,
    pub matches: Vec<Match>,
}

/// Scorers arrive either as one string or as a list of names.
fn deserialize_scorers<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scorers {
        Text(String),
        List(Vec<String>),
    }

    Ok(
        Option::<Scorers>::deserialize(deserializer)?.map(|scorers| match scorers {
            Scorers::Text(text) => text,
            Scorers::List(names) => names.join(", "),
        }),
    )
}
