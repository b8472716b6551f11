//! Integration tests for the bracket functions: pairing, results, round advancement, standings.

use pong_tournament_web::{
    advance_round, apply_result, build_initial_matches, compute_top3, matches_to_csv,
    participant_stats, Match, MatchStatus, Player, RoundOutcome, TournamentError,
};

fn players(n: usize) -> Vec<Player> {
    (1..=n)
        .map(|i| Player::registered(i as i64, format!("P{i}")))
        .collect()
}

/// Decide `m` for the side named `name`.
fn win(m: &Match, name: &str) -> Match {
    let winner = if m.player1.name == name {
        m.player1.clone()
    } else {
        m.player2.clone()
    };
    apply_result(m, &winner).unwrap()
}

#[test]
fn initial_matches_pair_adjacent_players() {
    for n in [4, 8] {
        let ps = players(n);
        let matches = build_initial_matches(9, &ps);
        assert_eq!(matches.len(), n / 2);
        for (i, m) in matches.iter().enumerate() {
            assert_eq!(m.round, 1);
            assert_eq!(m.tournament_id, 9);
            assert_eq!(m.status, MatchStatus::Pending);
            assert!(!m.is_decided());
            assert_eq!(m.player1, ps[2 * i]);
            assert_eq!(m.player2, ps[2 * i + 1]);
        }
    }
}

#[test]
fn initial_matches_drop_unpaired_player() {
    let matches = build_initial_matches(1, &players(5));
    assert_eq!(matches.len(), 2);
    assert!(matches.iter().all(|m| m.player1.name != "P5" && m.player2.name != "P5"));
}

#[test]
fn apply_result_sets_winner_id_or_alias() {
    let m = Match::new(1, 1, Player::registered(1, "A"), Player::guest("B"));

    let a_won = apply_result(&m, &Player::registered(1, "A")).unwrap();
    assert_eq!(a_won.winner_id, Some(1));
    assert_eq!(a_won.winner_alias, None);
    assert_eq!(a_won.status, MatchStatus::Completed);

    let b_won = apply_result(&m, &Player::guest("B")).unwrap();
    assert_eq!(b_won.winner_id, None);
    assert_eq!(b_won.winner_alias.as_deref(), Some("B"));
    assert_eq!(b_won.status, MatchStatus::Completed);
}

#[test]
fn apply_result_is_idempotent() {
    let m = Match::new(1, 1, Player::registered(1, "A"), Player::registered(2, "B"));
    let once = apply_result(&m, &Player::registered(2, "B")).unwrap();
    let twice = apply_result(&once, &Player::registered(2, "B")).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn apply_result_rejects_outsider() {
    let m = Match::new(1, 1, Player::registered(1, "A"), Player::registered(2, "B"));
    assert_eq!(
        apply_result(&m, &Player::registered(3, "C")),
        Err(TournamentError::InvalidWinner)
    );
}

#[test]
fn apply_result_rejects_winner_naming_both_sides() {
    // Id points at player2, alias at player1.
    let m = Match::new(1, 1, Player::guest("A"), Player::registered(2, "B"));
    assert_eq!(
        apply_result(&m, &Player::registered(2, "A")),
        Err(TournamentError::InvalidWinner)
    );
    assert_eq!(
        apply_result(&m, &Player::registered(2, "B")).map(|d| d.winner_id),
        Ok(Some(2))
    );
}

#[test]
fn apply_result_rejects_second_different_winner() {
    let mut m = Match::new(1, 1, Player::registered(1, "A"), Player::registered(2, "B"));
    m.id = Some(4);
    let decided = apply_result(&m, &Player::registered(1, "A")).unwrap();
    assert_eq!(
        apply_result(&decided, &Player::registered(2, "B")),
        Err(TournamentError::MatchAlreadyDecided(Some(4)))
    );
}

#[test]
fn advance_waits_for_incomplete_round() {
    let round = build_initial_matches(1, &players(4));
    assert_eq!(advance_round(&round, 4), Ok(RoundOutcome::Waiting));

    let partly = vec![win(&round[0], "P1"), round[1].clone()];
    assert_eq!(advance_round(&partly, 4), Ok(RoundOutcome::Waiting));

    assert_eq!(advance_round(&[], 4), Ok(RoundOutcome::Waiting));
}

#[test]
fn advance_pairs_winners_in_match_order() {
    let round: Vec<Match> = build_initial_matches(1, &players(8))
        .iter()
        .zip(["P2", "P3", "P6", "P8"])
        .map(|(m, w)| win(m, w))
        .collect();

    let RoundOutcome::NextRound { matches, bye } = advance_round(&round, 8).unwrap() else {
        panic!("expected a next round");
    };
    assert_eq!(bye, None);
    assert_eq!(matches.len(), 2);
    let names: Vec<(&str, &str)> = matches
        .iter()
        .map(|m| (m.player1.name.as_str(), m.player2.name.as_str()))
        .collect();
    assert_eq!(names, vec![("P2", "P3"), ("P6", "P8")]);
    assert!(matches
        .iter()
        .all(|m| m.round == 2 && m.status == MatchStatus::Pending && !m.is_decided()));
}

#[test]
fn advance_reports_odd_trailing_winner_as_bye() {
    let round: Vec<Match> = build_initial_matches(1, &players(6))
        .iter()
        .zip(["P1", "P4", "P5"])
        .map(|(m, w)| win(m, w))
        .collect();

    let RoundOutcome::NextRound { matches, bye } = advance_round(&round, 8).unwrap() else {
        panic!("expected a next round");
    };
    assert_eq!(bye, Some(Player::registered(5, "P5")));
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].round, 2);
    assert_eq!(matches[0].player1.name, "P1");
    assert_eq!(matches[0].player2.name, "P4");
}

#[test]
fn advance_finishes_after_final() {
    let ps = players(4);
    let mut all: Vec<Match> = build_initial_matches(1, &ps);
    all[0] = win(&all[0], "P1");
    all[1] = win(&all[1], "P3");
    let final_match = Match::new(1, 2, ps[0].clone(), ps[2].clone());
    all.push(final_match.clone());
    assert_eq!(advance_round(&all, 4), Ok(RoundOutcome::Waiting));

    all[2] = win(&final_match, "P1");
    assert_eq!(advance_round(&all, 4), Ok(RoundOutcome::Finished));
}

#[test]
fn advance_rejects_unsupported_size() {
    let round = build_initial_matches(1, &players(4));
    assert_eq!(
        advance_round(&round, 6),
        Err(TournamentError::InvalidBracketSize(6))
    );
}

#[test]
fn top3_four_players() {
    let ps = players(4);
    let (a, b, c, d) = (&ps[0], &ps[1], &ps[2], &ps[3]);
    let semis = [
        apply_result(&Match::new(1, 1, a.clone(), b.clone()), a).unwrap(),
        apply_result(&Match::new(1, 1, c.clone(), d.clone()), c).unwrap(),
    ];
    let final_match = apply_result(&Match::new(1, 2, a.clone(), c.clone()), a).unwrap();
    let all = vec![semis[0].clone(), semis[1].clone(), final_match];
    assert_eq!(compute_top3(&all), vec![a.clone(), c.clone(), b.clone()]);
}

#[test]
fn top3_empty_until_final_decided() {
    assert!(compute_top3(&[]).is_empty());

    let ps = players(4);
    let semis = build_initial_matches(1, &ps);
    let mut all = vec![win(&semis[0], "P1"), win(&semis[1], "P4")];
    all.push(Match::new(1, 2, ps[0].clone(), ps[3].clone()));
    assert!(compute_top3(&all).is_empty());
}

#[test]
fn top3_empty_before_final_round() {
    // Eight entrants, stopped after round 2: two decided matches share the top round.
    let ps = players(8);
    let mut all: Vec<Match> = build_initial_matches(1, &ps)
        .iter()
        .zip(["P1", "P3", "P5", "P7"])
        .map(|(m, w)| win(m, w))
        .collect();
    all.push(win(&Match::new(1, 2, ps[0].clone(), ps[2].clone()), "P1"));
    all.push(win(&Match::new(1, 2, ps[4].clone(), ps[6].clone()), "P5"));
    assert!(compute_top3(&all).is_empty());
}

#[test]
fn top3_works_for_guests() {
    let a = Player::guest("Ann");
    let b = Player::guest("Ben");
    let c = Player::registered(3, "Cid");
    let d = Player::guest("Dot");
    let all = vec![
        apply_result(&Match::new(1, 1, a.clone(), b.clone()), &b).unwrap(),
        apply_result(&Match::new(1, 1, c.clone(), d.clone()), &c).unwrap(),
        apply_result(&Match::new(1, 2, b.clone(), c.clone()), &c).unwrap(),
    ];
    assert_eq!(compute_top3(&all), vec![c, b, a]);
}

#[test]
fn stats_count_wins_and_losses() {
    let ps = players(4);
    let semis = build_initial_matches(1, &ps);
    let all = vec![win(&semis[0], "P1"), win(&semis[1], "P3")];
    let stats = participant_stats(&ps, &all);
    assert_eq!(stats.len(), 4);
    assert_eq!((stats[0].stats.wins, stats[0].stats.losses), (1, 0));
    assert!(!stats[0].stats.eliminated);
    assert_eq!((stats[1].stats.wins, stats[1].stats.losses), (0, 1));
    assert!(stats[1].stats.eliminated);
}

#[test]
fn csv_has_header_and_one_row_per_match() {
    let semis = build_initial_matches(1, &players(4));
    let all = vec![win(&semis[0], "P2"), semis[1].clone()];
    let csv = matches_to_csv(&all).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "match_id,round,player1,player2,winner,status");
    assert_eq!(lines[1], ",1,P1,P2,P2,completed");
    assert_eq!(lines[2], ",1,P3,P4,,pending");
}
