//! Tournament dataset
//!
//! Entity model, loader and lookup layer for a static tournament document
//! (stadiums, teams, groups, knockout stages and their matches). The dataset is
//! loaded once and never mutated; every lookup borrows from the loaded
//! [`Tournament`].
//!
//! ```no_run
//! use dataset::Tournament;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tournament = Tournament::load("data/world-cup.json")?;
//! if let Some(group) = tournament.group_by_name("Group A") {
//!     for game in &group.matches {
//!         let home = tournament.home_team(game).map(|t| t.name.as_str());
//!         println!("{} vs {} ({:?})", game.home_team, game.away_team, home);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;
pub mod lookup;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use lookup::{Tournament, TournamentSummary};
pub use types::{Group, Knockout, Match, Stadium, Team};

pub mod prelude {
    pub use crate::error::*;
    pub use crate::lookup::*;
    pub use crate::types::*;
}
