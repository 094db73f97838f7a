//! GraphQL object types
//!
//! Each object borrows its record and, where it resolves cross-references,
//! the [`Tournament`] it came from. Nothing is cloned per request.

use async_graphql::Object;
use dataset::{Group, Knockout, Match, Stadium, Team, Tournament};
use tracing::debug;

pub struct StadiumObject<'a>(pub &'a Stadium);

/// List of All Stadiums
#[Object(name = "Stadium", rename_fields = "snake_case")]
impl<'a> StadiumObject<'a> {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn name(&self) -> &str {
        &self.0.name
    }

    async fn city(&self) -> &str {
        &self.0.city
    }

    async fn latitude(&self) -> f64 {
        self.0.latitude
    }

    async fn longitude(&self) -> f64 {
        self.0.longitude
    }

    async fn image(&self) -> &str {
        &self.0.image
    }
}

pub struct TeamObject<'a> {
    pub tournament: &'a Tournament,
    pub team: &'a Team,
}

/// List of All Teams
#[Object(name = "Team", rename_fields = "snake_case")]
impl<'a> TeamObject<'a> {
    async fn id(&self) -> i32 {
        self.team.id
    }

    async fn name(&self) -> &str {
        &self.team.name
    }

    async fn eliminated(&self) -> bool {
        self.team.eliminated
    }

    async fn eliminated_at_which_stage(&self) -> &str {
        &self.team.eliminated_at_which_stage
    }

    async fn fifa_code(&self) -> &str {
        &self.team.fifa_code
    }

    async fn iso2(&self) -> &str {
        &self.team.iso2
    }

    async fn flag(&self) -> &str {
        &self.team.flag
    }

    async fn emoji(&self) -> &str {
        &self.team.emoji
    }

    async fn emoji_string(&self) -> &str {
        &self.team.emoji_string
    }

    /// Group and knockout matches this team plays in
    async fn matches(&self) -> Vec<MatchObject<'a>> {
        self.tournament
            .team_matches(self.team)
            .into_iter()
            .map(|record| MatchObject::new(self.tournament, record))
            .collect()
    }
}

pub struct GroupObject<'a> {
    pub tournament: &'a Tournament,
    pub group: &'a Group,
}

/// List of All Groups
#[Object(name = "Group", rename_fields = "snake_case")]
impl<'a> GroupObject<'a> {
    async fn name(&self) -> &str {
        &self.group.name
    }

    async fn winner(&self) -> Option<&str> {
        self.group.winner.as_deref()
    }

    async fn runnerup(&self) -> Option<&str> {
        self.group.runnerup.as_deref()
    }

    /// List of All Matches
    async fn matches(&self) -> Option<Vec<MatchObject<'a>>> {
        let tournament = self.tournament;
        let matches = tournament.group_matches(self.group);
        if matches.is_none() {
            debug!("Group {:?} is not part of the loaded tournament", self.group.name);
        }
        matches.map(|records| {
            records
                .iter()
                .map(|record| MatchObject::new(tournament, record))
                .collect()
        })
    }
}

pub struct KnockoutObject<'a> {
    pub tournament: &'a Tournament,
    pub knockout: &'a Knockout,
}

/// List of All Knockouts
#[Object(name = "Knockout", rename_fields = "snake_case")]
impl<'a> KnockoutObject<'a> {
    async fn name(&self) -> &str {
        &self.knockout.name
    }

    /// List of All Matches
    async fn matches(&self) -> Option<Vec<MatchObject<'a>>> {
        let tournament = self.tournament;
        let matches = tournament.knockout_matches(self.knockout);
        if matches.is_none() {
            debug!(
                "Knockout stage {:?} is not part of the loaded tournament",
                self.knockout.name
            );
        }
        matches.map(|records| {
            records
                .iter()
                .map(|record| MatchObject::new(tournament, record))
                .collect()
        })
    }
}

pub struct MatchObject<'a> {
    tournament: &'a Tournament,
    record: &'a Match,
}

impl<'a> MatchObject<'a> {
    pub fn new(tournament: &'a Tournament, record: &'a Match) -> Self {
        Self { tournament, record }
    }
}

/// List of All Matches
#[Object(name = "Match", rename_fields = "snake_case")]
impl<'a> MatchObject<'a> {
    async fn id(&self) -> i32 {
        self.record.id
    }

    #[graphql(name = "type")]
    async fn match_type(&self) -> &str {
        &self.record.match_type
    }

    async fn home_team_id(&self) -> i32 {
        self.record.home_team_id
    }

    async fn away_team_id(&self) -> i32 {
        self.record.away_team_id
    }

    /// Resolved by team name, not by `home_team_id`
    async fn home_team(&self) -> Option<TeamObject<'a>> {
        let team = self.tournament.home_team(self.record);
        if team.is_none() {
            debug!(
                "Match {} home team {:?} not found",
                self.record.id, self.record.home_team
            );
        }
        team.map(|team| TeamObject {
            tournament: self.tournament,
            team,
        })
    }

    /// Resolved by team name, not by `away_team_id`
    async fn away_team(&self) -> Option<TeamObject<'a>> {
        let team = self.tournament.away_team(self.record);
        if team.is_none() {
            debug!(
                "Match {} away team {:?} not found",
                self.record.id, self.record.away_team
            );
        }
        team.map(|team| TeamObject {
            tournament: self.tournament,
            team,
        })
    }

    async fn home_score(&self) -> &str {
        &self.record.home_score
    }

    async fn away_score(&self) -> &str {
        &self.record.away_score
    }

    async fn home_scorers(&self) -> Option<&str> {
        self.record.home_scorers.as_deref()
    }

    async fn away_scorers(&self) -> Option<&str> {
        self.record.away_scorers.as_deref()
    }

    async fn date(&self) -> &str {
        &self.record.date
    }

    /// The stadium whose id equals the match's `stadium_id`
    async fn stadium_id(&self) -> Option<StadiumObject<'a>> {
        let stadium = self.tournament.match_stadium(self.record);
        if stadium.is_none() {
            debug!(
                "Match {} stadium {} not found",
                self.record.id, self.record.stadium_id
            );
        }
        stadium.map(StadiumObject)
    }

    async fn time_elapsed(&self) -> &str {
        &self.record.time_elapsed
    }

    async fn finished(&self) -> bool {
        self.record.finished
    }

    async fn matchday(&self) -> i32 {
        self.record.matchday
    }
}
