//! Dataset loader
//!
//! Parses the tournament document. `groups` and `knockout` are JSON objects
//! keyed by arbitrary ids; their keys are dropped and the records are kept in
//! document order. Any structural defect is an error, so a process never
//! serves a partially loaded dataset.

use crate::error::{DatasetError, DatasetResult};
use crate::lookup::Tournament;
use crate::types::{Group, Knockout, Stadium, Team};
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct TournamentDocument {
    stadiums: Vec<Stadium>,
    teams: Vec<Team>,
    #[serde(deserialize_with = "records_in_document_order")]
    groups: Vec<Group>,
    #[serde(rename = "knockout", deserialize_with = "records_in_document_order")]
    knockouts: Vec<Knockout>,
}

impl TournamentDocument {
    fn into_tournament(self) -> DatasetResult<Tournament> {
        Tournament::new(self.stadiums, self.teams, self.groups, self.knockouts)
    }
}

impl Tournament {
    pub fn from_json_str(json: &str) -> DatasetResult<Self> {
        let document: TournamentDocument = serde_json::from_str(json)?;
        document.into_tournament()
    }

    pub fn from_reader<R: Read>(reader: R) -> DatasetResult<Self> {
        let document: TournamentDocument = serde_json::from_reader(reader)?;
        document.into_tournament()
    }

    /// Read, parse and validate the document at `path`
    pub fn load(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        debug!("Reading tournament dataset from {}", path.display());

        let file = File::open(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tournament = Self::from_reader(BufReader::new(file))?;

        info!("Loaded {} ({})", path.display(), tournament.summary());
        Ok(tournament)
    }
}

fn records_in_document_order<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct RecordsVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for RecordsVisitor<T> {
        type Value = Vec<T>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("an object of keyed records")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut records = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_, record)) = map.next_entry::<IgnoredAny, T>()? {
                records.push(record);
            }
            Ok(records)
        }
    }

    deserializer.deserialize_map(RecordsVisitor(PhantomData))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> serde_json::Value {
        json!({
            "stadiums": [
                {"id": 1, "name": "Lusail Stadium", "city": "Lusail",
                 "latitude": 25.42, "longitude": 51.49, "image": "lusail.jpg"}
            ],
            "teams": [
                {"id": 5, "name": "Brazil", "eliminated": true,
                 "eliminated_at_which_stage": "quarter_finals", "fifa_code": "BRA",
                 "iso2": "br", "flag": "br.png", "emoji": "flag-br", "emoji_string": "🇧🇷"}
            ],
            "groups": {
                "h": {"name": "Group H", "winner": null, "runnerup": null, "matches": []},
                "a": {"name": "Group A", "winner": "Brazil", "runnerup": null, "matches": []}
            },
            "knockout": {
                "round_2": {"name": "Final", "matches": []}
            },
            "tvchannels": [{"id": 1, "name": "BBC"}]
        })
    }

    #[test]
    fn test_parse_document() {
        let tournament = Tournament::from_json_str(&document().to_string()).unwrap();
        assert_eq!(tournament.stadiums().len(), 1);
        assert_eq!(tournament.teams()[0].name, "Brazil");
        assert_eq!(tournament.knockouts()[0].name, "Final");
    }

    #[test]
    fn test_keyed_records_keep_document_order() {
        // raw text: json! would sort the keys
        let raw = r#"{
            "stadiums": [],
            "teams": [],
            "groups": {
                "h": {"name": "Group H", "matches": []},
                "a": {"name": "Group A", "matches": []},
                "c": {"name": "Group C", "matches": []}
            },
            "knockout": {
                "round_2": {"name": "Final", "matches": []},
                "round_16": {"name": "Round of 16", "matches": []}
            }
        }"#;
        let tournament = Tournament::from_json_str(raw).unwrap();
        let groups: Vec<&str> = tournament.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(groups, vec!["Group H", "Group A", "Group C"]);
        let stages: Vec<&str> = tournament
            .knockouts()
            .iter()
            .map(|k| k.name.as_str())
            .collect();
        assert_eq!(stages, vec!["Final", "Round of 16"]);
    }

    #[test]
    fn test_missing_collection_is_rejected() {
        let mut value = document();
        value.as_object_mut().unwrap().remove("teams");
        let err = Tournament::from_json_str(&value.to_string()).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
        assert!(err.to_string().contains("teams"));
    }

    #[test]
    fn test_groups_as_list_is_rejected() {
        let mut value = document();
        value["groups"] = json!([]);
        assert!(matches!(
            Tournament::from_json_str(&value.to_string()),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let mut value = document();
        value["stadiums"][0].as_object_mut().unwrap().remove("city");
        assert!(matches!(
            Tournament::from_json_str(&value.to_string()),
            Err(DatasetError::Parse(_))
        ));
    }

    #[test]
    fn test_from_reader() {
        let bytes = document().to_string().into_bytes();
        let tournament = Tournament::from_reader(bytes.as_slice()).unwrap();
        assert_eq!(tournament.summary().groups, 2);
        assert!(tournament.group_by_name("Group A").is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Tournament::load("/definitely/not/here.json").unwrap_err();
        match err {
            DatasetError::Io { path, source } => {
                assert_eq!(path, Path::new("/definitely/not/here.json"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
