//! CSV export of a bracket, one row per match.

use crate::models::{Match, MatchId, MatchStatus, TournamentError};
use serde::Serialize;

#[derive(Serialize)]
struct MatchRow<'a> {
    match_id: Option<MatchId>,
    round: u32,
    player1: &'a str,
    player2: &'a str,
    winner: Option<&'a str>,
    status: MatchStatus,
}

/// Render `matches` as CSV with a header row.
pub fn matches_to_csv(matches: &[Match]) -> Result<String, TournamentError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for m in matches {
        writer
            .serialize(MatchRow {
                match_id: m.id,
                round: m.round,
                player1: &m.player1.name,
                player2: &m.player2.name,
                winner: m.winner().map(|p| p.name.as_str()),
                status: m.status,
            })
            .map_err(|e| TournamentError::Export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| TournamentError::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| TournamentError::Export(e.to_string()))
}
