use crate::billing::{Performance, Play};
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct PlayRecord {
    pub(crate) play_id: String,
    pub(crate) play: Play,
}

pub(crate) fn parse_play_rows<R: Read>(reader: R) -> Result<Vec<PlayRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<PlayRow>() {
        let row = record?;
        records.push(PlayRecord {
            play_id: row.id,
            play: Play::new(row.name, row.kind),
        });
    }

    Ok(records)
}

pub(crate) fn parse_performance_rows<R: Read>(reader: R) -> Result<Vec<Performance>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<PerformanceRow>()
        .map(|record| record.map(|row| Performance::new(row.play_id, row.audience)))
        .collect()
}

#[derive(Debug, Deserialize)]
struct PlayRow {
    #[serde(alias = "playID", alias = "play_id")]
    id: String,
    name: String,
    #[serde(rename = "type", deserialize_with = "lowercase_string")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct PerformanceRow {
    #[serde(rename = "playID", alias = "play_id", alias = "id")]
    play_id: String,
    audience: u32,
}

fn lowercase_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::PlayType;

    #[test]
    fn play_rows_are_trimmed_and_normalized() {
        let csv = "id,name,type\n hamlet , Hamlet , Tragedy \nas-like,As You Like It,comedy\n";
        let records = parse_play_rows(csv.as_bytes()).expect("plays parse");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].play_id, "hamlet");
        assert_eq!(records[0].play.name, "Hamlet");
        assert_eq!(records[0].play.kind, "tragedy");
        assert_eq!(records[1].play.play_type(), Ok(PlayType::Comedy));
    }

    #[test]
    fn performance_rows_reject_negative_audience() {
        let csv = "playID,audience\nhamlet,-4\n";
        assert!(parse_performance_rows(csv.as_bytes()).is_err());
    }

    #[test]
    fn performance_rows_accept_play_id_alias() {
        let csv = "play_id,audience\nhamlet,0\n";
        let performances = parse_performance_rows(csv.as_bytes()).expect("rows parse");
        assert_eq!(performances, vec![Performance::new("hamlet", 0)]);
    }
}
