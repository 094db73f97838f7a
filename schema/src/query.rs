use crate::objects::{GroupObject, KnockoutObject, StadiumObject, TeamObject};
use async_graphql::{Context, Object, Result};
use dataset::Tournament;
use std::sync::Arc;
use tracing::debug;

/// Root query. Matches have no root field; they are reached through groups,
/// knockout stages and teams.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueryRoot;

fn tournament<'ctx>(ctx: &Context<'ctx>) -> Result<&'ctx Tournament> {
    Ok(ctx.data::<Arc<Tournament>>()?.as_ref())
}

/// Logs a miss for a singular root field; a miss is null, not an error.
fn logged<T>(kind: &str, name: Option<&str>, found: Option<T>) -> Option<T> {
    if found.is_none() {
        debug!("No {} named {:?}", kind, name);
    }
    found
}

/// Root Query
#[Object(name = "Query")]
impl QueryRoot {
    /// List of All Stadiums
    async fn stadiums<'ctx>(&self, ctx: &Context<'ctx>) -> Result<Vec<StadiumObject<'ctx>>> {
        Ok(tournament(ctx)?
            .stadiums()
            .iter()
            .map(StadiumObject)
            .collect())
    }

    /// A Single Stadium
    async fn stadium<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        name: Option<String>,
    ) -> Result<Option<StadiumObject<'ctx>>> {
        let tournament = tournament(ctx)?;
        let found = name.as_deref().and_then(|n| tournament.stadium_by_name(n));
        Ok(logged("stadium", name.as_deref(), found).map(StadiumObject))
    }

    /// List of All Teams
    async fn teams<'ctx>(&self, ctx: &Context<'ctx>) -> Result<Vec<TeamObject<'ctx>>> {
        let tournament = tournament(ctx)?;
        Ok(tournament
            .teams()
            .iter()
            .map(|team| TeamObject { tournament, team })
            .collect())
    }

    /// A Single Team
    async fn team<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        name: Option<String>,
    ) -> Result<Option<TeamObject<'ctx>>> {
        let tournament = tournament(ctx)?;
        let found = name.as_deref().and_then(|n| tournament.team_by_name(n));
        Ok(logged("team", name.as_deref(), found).map(|team| TeamObject { tournament, team }))
    }

    /// List of All Groups
    async fn groups<'ctx>(&self, ctx: &Context<'ctx>) -> Result<Vec<GroupObject<'ctx>>> {
        let tournament = tournament(ctx)?;
        Ok(tournament
            .groups()
            .iter()
            .map(|group| GroupObject { tournament, group })
            .collect())
    }

    /// A Single Group
    async fn group<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        name: Option<String>,
    ) -> Result<Option<GroupObject<'ctx>>> {
        let tournament = tournament(ctx)?;
        let found = name.as_deref().and_then(|n| tournament.group_by_name(n));
        Ok(logged("group", name.as_deref(), found).map(|group| GroupObject { tournament, group }))
    }

    /// List of All Knockouts
    async fn knockouts<'ctx>(&self, ctx: &Context<'ctx>) -> Result<Vec<KnockoutObject<'ctx>>> {
        let tournament = tournament(ctx)?;
        Ok(tournament
            .knockouts()
            .iter()
            .map(|knockout| KnockoutObject {
                tournament,
                knockout,
            })
            .collect())
    }

    /// A Single Knockout
    async fn knockout<'ctx>(
        &self,
        ctx: &Context<'ctx>,
        name: Option<String>,
    ) -> Result<Option<KnockoutObject<'ctx>>> {
        let tournament = tournament(ctx)?;
        let found = name.as_deref().and_then(|n| tournament.knockout_by_name(n));
        Ok(
            logged("knockout", name.as_deref(), found).map(|knockout| KnockoutObject {
                tournament,
                knockout,
            }),
        )
    }
}
