//! GraphQL query schema for the tournament dataset
//!
//! Declares the queryable shape (`Stadium`, `Team`, `Group`, `Knockout`,
//! `Match` and the root `Query`) and binds every cross-reference field to a
//! lookup on [`dataset::Tournament`]. Field names are snake_case, matching the
//! dataset document.

pub mod objects;
pub mod query;

pub use objects::{GroupObject, KnockoutObject, MatchObject, StadiumObject, TeamObject};
pub use query::QueryRoot;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};
use dataset::Tournament;
use std::sync::Arc;

pub type TournamentSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaOptions {
    /// Reject queries nested deeper than this
    pub max_depth: Option<usize>,
    pub introspection: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(15),
            introspection: true,
        }
    }
}

/// Build the executable schema over a loaded tournament.
///
/// The tournament is shared, never copied: resolvers borrow entities from it
/// for the duration of a request.
pub fn build_schema(tournament: Arc<Tournament>, options: &SchemaOptions) -> TournamentSchema {
    let mut builder =
        Schema::build(QueryRoot, EmptyMutation, EmptySubscription).data(tournament);

    if let Some(depth) = options.max_depth {
        builder = builder.limit_depth(depth);
    }

    if !options.introspection {
        builder = builder.disable_introspection();
    }

    builder.finish()
}

/// Schema definition language for the query surface
pub fn sdl() -> String {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .finish()
        .sdl()
}
