//! Entity lookup layer
//!
//! [`Tournament`] owns the loaded collections and answers every lookup the
//! query schema needs. Name and id indexes are built once at construction;
//! when several entities share a name the first one in document order wins,
//! which is exactly what a linear scan would return.

use crate::error::{DatasetError, DatasetResult};
use crate::types::{Group, Knockout, Match, Stadium, Team};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// The loaded, immutable tournament dataset
#[derive(Debug, Clone)]
pub struct Tournament {
    stadiums: Vec<Stadium>,
    teams: Vec<Team>,
    groups: Vec<Group>,
    knockouts: Vec<Knockout>,
    index: LookupIndex,
}

#[derive(Debug, Clone, Default)]
struct LookupIndex {
    stadium_ids: HashMap<i32, usize>,
    stadium_names: HashMap<String, usize>,
    team_names: HashMap<String, usize>,
    group_names: HashMap<String, usize>,
    knockout_names: HashMap<String, usize>,
}

/// Collection sizes of a loaded tournament
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TournamentSummary {
    pub stadiums: usize,
    pub teams: usize,
    pub groups: usize,
    pub knockouts: usize,
    pub matches: usize,
}

impl fmt::Display for TournamentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} stadiums, {} teams, {} groups, {} knockout stages, {} matches",
            self.stadiums, self.teams, self.groups, self.knockouts, self.matches
        )
    }
}

impl Tournament {
    /// Assemble a tournament from already-parsed collections.
    ///
    /// Fails if two stadiums or two teams share an id.
    pub fn new(
        stadiums: Vec<Stadium>,
        teams: Vec<Team>,
        groups: Vec<Group>,
        knockouts: Vec<Knockout>,
    ) -> DatasetResult<Self> {
        let mut stadium_ids = HashMap::with_capacity(stadiums.len());
        for (position, stadium) in stadiums.iter().enumerate() {
            if stadium_ids.insert(stadium.id, position).is_some() {
                return Err(DatasetError::DuplicateStadiumId(stadium.id));
            }
        }

        let mut team_ids = HashSet::with_capacity(teams.len());
        for team in &teams {
            if !team_ids.insert(team.id) {
                return Err(DatasetError::DuplicateTeamId(team.id));
            }
        }

        let index = LookupIndex {
            stadium_ids,
            stadium_names: first_positions(stadiums.iter().map(|s| s.name.clone())),
            team_names: first_positions(teams.iter().map(|t| t.name.clone())),
            group_names: first_positions(groups.iter().map(|g| g.name.clone())),
            knockout_names: first_positions(knockouts.iter().map(|k| k.name.clone())),
        };

        Ok(Self {
            stadiums,
            teams,
            groups,
            knockouts,
            index,
        })
    }

    pub fn stadiums(&self) -> &[Stadium] {
        &self.stadiums
    }

    pub fn stadium_by_name(&self, name: &str) -> Option<&Stadium> {
        self.index
            .stadium_names
            .get(name)
            .map(|&position| &self.stadiums[position])
    }

    pub fn stadium_by_id(&self, id: i32) -> Option<&Stadium> {
        self.index
            .stadium_ids
            .get(&id)
            .map(|&position| &self.stadiums[position])
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team_by_name(&self, name: &str) -> Option<&Team> {
        self.index
            .team_names
            .get(name)
            .map(|&position| &self.teams[position])
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group_by_name(&self, name: &str) -> Option<&Group> {
        self.index
            .group_names
            .get(name)
            .map(|&position| &self.groups[position])
    }

    pub fn knockouts(&self) -> &[Knockout] {
        &self.knockouts
    }

    pub fn knockout_by_name(&self, name: &str) -> Option<&Knockout> {
        self.index
            .knockout_names
            .get(name)
            .map(|&position| &self.knockouts[position])
    }

    /// Team named by `game.home_team`; team ids on the match are ignored
    pub fn home_team(&self, game: &Match) -> Option<&Team> {
        self.team_by_name(&game.home_team)
    }

    /// Team named by `game.away_team`
    pub fn away_team(&self, game: &Match) -> Option<&Team> {
        self.team_by_name(&game.away_team)
    }

    pub fn match_stadium(&self, game: &Match) -> Option<&Stadium> {
        self.stadium_by_id(game.stadium_id)
    }

    /// Matches of the group registered under `group.name` in this tournament.
    ///
    /// The group is looked up again by name rather than read from the argument,
    /// so a detached copy resolves to the loaded record.
    pub fn group_matches(&self, group: &Group) -> Option<&[Match]> {
        self.group_by_name(&group.name)
            .map(|found| found.matches.as_slice())
    }

    pub fn knockout_matches(&self, knockout: &Knockout) -> Option<&[Match]> {
        self.knockout_by_name(&knockout.name)
            .map(|found| found.matches.as_slice())
    }

    /// Every match, group stage first, each container in document order
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.groups
            .iter()
            .flat_map(|g| g.matches.iter())
            .chain(self.knockouts.iter().flat_map(|k| k.matches.iter()))
    }

    /// Matches where `team.name` plays on either side
    pub fn team_matches(&self, team: &Team) -> Vec<&Match> {
        self.matches().filter(|m| m.involves(&team.name)).collect()
    }

    pub fn summary(&self) -> TournamentSummary {
        TournamentSummary {
            stadiums: self.stadiums.len(),
            teams: self.teams.len(),
            groups: self.groups.len(),
            knockouts: self.knockouts.len(),
            matches: self.matches().count(),
        }
    }
}

fn first_positions<K, I>(keys: I) -> HashMap<K, usize>
where
    K: Eq + Hash,
    I: IntoIterator<Item = K>,
{
    let mut positions = HashMap::new();
    for (position, key) in keys.into_iter().enumerate() {
        positions.entry(key).or_insert(position);
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stadium(id: i32, name: &str) -> Stadium {
        Stadium {
            id,
            name: name.to_string(),
            city: "Doha".to_string(),
            latitude: 25.0,
            longitude: 51.0,
            image: format!("images/{id}.jpg"),
        }
    }

    fn team(id: i32, name: &str) -> Team {
        Team {
            id,
            name: name.to_string(),
            eliminated: false,
            eliminated_at_which_stage: "none".to_string(),
            fifa_code: name[..3].to_uppercase(),
            iso2: name[..2].to_lowercase(),
            flag: String::new(),
            emoji: String::new(),
            emoji_string: String::new(),
        }
    }

    fn fixture(id: i32, home: &str, away: &str, stadium_id: i32) -> Match {
        Match {
            id,
            match_type: "group".to_string(),
            home_team_id: 0,
            away_team_id: 0,
            home_team: home.to_string(),
            away_team: away.to_string(),
            home_score: "-".to_string(),
            away_score: "-".to_string(),
            home_scorers: None,
            away_scorers: None,
            date: "2022-11-20T16:00:00Z".to_string(),
            stadium_id,
            time_elapsed: "notstarted".to_string(),
            finished: false,
            matchday: 1,
        }
    }

    fn sample() -> Tournament {
        Tournament::new(
            vec![stadium(1, "Lusail Stadium"), stadium(2, "Stadium 974")],
            vec![team(5, "Brazil"), team(6, "Germany"), team(7, "Serbia")],
            vec![Group {
                name: "Group A".to_string(),
                winner: None,
                runnerup: None,
                matches: vec![
                    fixture(1, "Brazil", "Germany", 1),
                    fixture(2, "Serbia", "Atlantis", 9),
                ],
            }],
            vec![Knockout {
                name: "Final".to_string(),
                matches: vec![fixture(3, "Germany", "Brazil", 2)],
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_find_by_name() {
        let t = sample();
        assert_eq!(t.stadium_by_name("Stadium 974").unwrap().id, 2);
        assert_eq!(t.team_by_name("Germany").unwrap().id, 6);
        assert_eq!(t.group_by_name("Group A").unwrap().matches.len(), 2);
        assert_eq!(t.knockout_by_name("Final").unwrap().matches.len(), 1);
    }

    #[test]
    fn test_find_by_name_misses_are_none() {
        let t = sample();
        assert!(t.stadium_by_name("nonexistent").is_none());
        assert!(t.team_by_name("nonexistent").is_none());
        assert!(t.group_by_name("Group Z").is_none());
        assert!(t.knockout_by_name("Round of 32").is_none());
        // exact match only
        assert!(t.team_by_name("brazil").is_none());
        assert!(t.team_by_name("").is_none());
    }

    #[test]
    fn test_match_resolution() {
        let t = sample();
        let group = t.group_by_name("Group A").unwrap();
        let opener = &group.matches[0];
        assert_eq!(t.home_team(opener).unwrap().name, "Brazil");
        assert_eq!(t.away_team(opener).unwrap().name, "Germany");
        assert_eq!(t.match_stadium(opener).unwrap().name, "Lusail Stadium");

        let broken = &group.matches[1];
        assert_eq!(t.home_team(broken).unwrap().name, "Serbia");
        assert!(t.away_team(broken).is_none());
        assert!(t.match_stadium(broken).is_none());
    }

    #[test]
    fn test_team_resolution_ignores_numeric_ids() {
        let t = sample();
        let mut game = fixture(10, "Brazil", "Germany", 1);
        game.home_team_id = 6;
        game.away_team_id = 5;
        assert_eq!(t.home_team(&game).unwrap().name, "Brazil");
        assert_eq!(t.away_team(&game).unwrap().name, "Germany");
    }

    #[test]
    fn test_container_matches_relookup_by_name() {
        let t = sample();
        let detached = Group {
            name: "Group A".to_string(),
            winner: None,
            runnerup: None,
            matches: Vec::new(),
        };
        assert_eq!(t.group_matches(&detached).unwrap().len(), 2);

        let unknown = Knockout {
            name: "Round of 32".to_string(),
            matches: vec![fixture(99, "Brazil", "Serbia", 1)],
        };
        assert!(t.knockout_matches(&unknown).is_none());
    }

    #[test]
    fn test_duplicate_names_first_wins() {
        let t = Tournament::new(
            vec![stadium(1, "Twin"), stadium(2, "Twin")],
            vec![],
            vec![],
            vec![],
        )
        .unwrap();
        assert_eq!(t.stadium_by_name("Twin").unwrap().id, 1);
        assert_eq!(t.stadiums().len(), 2);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = Tournament::new(
            vec![stadium(1, "One"), stadium(1, "Other")],
            vec![],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateStadiumId(1)));

        let err = Tournament::new(
            vec![],
            vec![team(5, "Brazil"), team(5, "Germany")],
            vec![],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateTeamId(5)));
    }

    #[test]
    fn test_team_matches_and_summary() {
        let t = sample();
        let brazil = t.team_by_name("Brazil").unwrap();
        let ids: Vec<i32> = t.team_matches(brazil).iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let summary = t.summary();
        assert_eq!(
            summary,
            TournamentSummary {
                stadiums: 2,
                teams: 3,
                groups: 1,
                knockouts: 1,
                matches: 3,
            }
        );
        assert_eq!(
            summary.to_string(),
            "2 stadiums, 3 teams, 1 groups, 1 knockout stages, 3 matches"
        );
    }
}
