//! Integration tests for knockout bracket generation: slot resolution after
//! the group stage, feeder wiring for the later rounds, and result copying.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wc94_tournament_web::{
    apply_match_to_standings, generate_bracket, initialize_standings, FullKnockoutBracket,
    MatchRecord, ReferenceData, Standings,
};

fn reference() -> ReferenceData {
    ReferenceData::load_embedded().unwrap()
}

/// Standings and processed records for every match with an id at or below
/// `last_id` (ids sort in schedule order).
fn simulate_through<'a>(
    reference: &'a ReferenceData,
    last_id: &str,
) -> (Standings, Vec<&'a MatchRecord>) {
    let mut standings = initialize_standings(reference);
    let processed: Vec<&MatchRecord> = reference
        .matches()
        .iter()
        .filter(|m| m.id.as_str() <= last_id)
        .collect();
    for m in &processed {
        apply_match_to_standings(&mut standings, m);
    }
    (standings, processed)
}

fn bracket_through(reference: &ReferenceData, last_id: &str, user: &str) -> FullKnockoutBracket {
    let (standings, processed) = simulate_through(reference, last_id);
    let mut rng = StdRng::seed_from_u64(7);
    generate_bracket(&processed, &standings, reference, user, &mut rng)
}

#[test]
fn bracket_has_four_knockout_rounds() {
    let reference = reference();
    let bracket = bracket_through(&reference, "M36", "GER");
    let names: Vec<&str> = bracket.rounds.iter().map(|r| r.round_name.as_str()).collect();
    assert_eq!(
        names,
        ["Round of 16", "Quarter-finals", "Semi-finals", "Finals"]
    );
    assert_eq!(bracket.rounds[0].matches.len(), 8);
    assert_eq!(bracket.rounds[1].matches.len(), 4);
    assert_eq!(bracket.rounds[2].matches.len(), 2);
    assert_eq!(bracket.rounds[3].matches.len(), 2);
}

#[test]
fn round_of_16_slots_resolve_to_the_historical_qualifiers() {
    let reference = reference();
    let bracket = bracket_through(&reference, "M36", "GER");
    let ro16 = bracket.round("Round of 16").unwrap();
    let expected = [
        ("M37", "GER", "BEL"),
        ("M38", "ESP", "SUI"),
        ("M39", "SWE", "KSA"),
        ("M40", "ROU", "ARG"),
        ("M41", "NED", "IRL"),
        ("M42", "BRA", "USA"),
        ("M43", "NGA", "ITA"),
        ("M44", "MEX", "BUL"),
    ];
    for (id, team1, team2) in expected {
        let m = ro16.matches.iter().find(|m| m.match_id == id).unwrap();
        assert_eq!(m.team1_key.as_deref(), Some(team1), "{id} side 1");
        assert_eq!(m.team2_key.as_deref(), Some(team2), "{id} side 2");
        assert_eq!(m.winner_key, None);
        assert_eq!(m.score, None);
    }
}

#[test]
fn slot_labels_describe_the_qualification_position() {
    let reference = reference();
    let bracket = bracket_through(&reference, "M36", "GER");
    let ro16 = bracket.round("Round of 16").unwrap();
    let m37 = ro16.matches.iter().find(|m| m.match_id == "M37").unwrap();
    assert_eq!(m37.slot1, "Winner Group C");
    assert_eq!(m37.slot2, "3rd Place F");
    let m38 = ro16.matches.iter().find(|m| m.match_id == "M38").unwrap();
    assert_eq!(m38.slot1, "Runner-up Group C");
    assert_eq!(m38.slot2, "Runner-up Group A");
}

#[test]
fn unplayed_later_rounds_carry_feeder_labels_and_no_teams() {
    let reference = reference();
    let bracket = bracket_through(&reference, "M36", "GER");
    let quarters = bracket.round("Quarter-finals").unwrap();
    let m45 = quarters.matches.iter().find(|m| m.match_id == "M45").unwrap();
    assert_eq!(m45.slot1, "Winner M43");
    assert_eq!(m45.slot2, "Winner M38");
    assert_eq!(m45.team1_key, None);
    assert_eq!(m45.team2_key, None);

    let finals = bracket.round("Finals").unwrap();
    let m51 = finals.matches.iter().find(|m| m.match_id == "M51").unwrap();
    assert_eq!(m51.slot1, "Loser M50");
    assert_eq!(m51.slot2, "Loser M49");
    let m52 = finals.matches.iter().find(|m| m.match_id == "M52").unwrap();
    assert_eq!(m52.slot1, "Winner M50");
    assert_eq!(m52.slot2, "Winner M49");
    assert_eq!(m52.team1_key, None);
}

#[test]
fn quarter_finals_fill_in_once_the_round_of_16_is_processed() {
    let reference = reference();
    let bracket = bracket_through(&reference, "M44", "GER");
    let quarters = bracket.round("Quarter-finals").unwrap();
    let expected = [
        ("M45", "ITA", "ESP"),
        ("M46", "NED", "BRA"),
        ("M47", "BUL", "GER"),
        ("M48", "ROU", "SWE"),
    ];
    for (id, team1, team2) in expected {
        let m = quarters.matches.iter().find(|m| m.match_id == id).unwrap();
        assert_eq!(m.team1_key.as_deref(), Some(team1), "{id} side 1");
        assert_eq!(m.team2_key.as_deref(), Some(team2), "{id} side 2");
    }
}

#[test]
fn finals_wire_up_from_the_processed_semifinals() {
    let reference = reference();
    let bracket = bracket_through(&reference, "M50", "BRA");
    let finals = bracket.round("Finals").unwrap();

    let third = finals.matches.iter().find(|m| m.match_id == "M51").unwrap();
    assert_eq!(third.team1_key.as_deref(), Some("SWE")); // loser of M50
    assert_eq!(third.team2_key.as_deref(), Some("BUL")); // loser of M49

    let final_match = finals.matches.iter().find(|m| m.match_id == "M52").unwrap();
    assert_eq!(final_match.team1_key.as_deref(), Some("BRA"));
    assert_eq!(final_match.team2_key.as_deref(), Some("ITA"));
    assert!(final_match.user_is_team1);
    assert!(!final_match.user_is_team2);
    assert_eq!(final_match.winner_key, None); // M52 itself not yet processed
}

#[test]
fn processed_knockout_matches_carry_scores_and_winners() {
    let reference = reference();
    let bracket = bracket_through(&reference, "M52", "BRA");

    let ro16 = bracket.round("Round of 16").unwrap();
    let m43 = ro16.matches.iter().find(|m| m.match_id == "M43").unwrap();
    // Extra-time score shown for matches that went past 90 minutes.
    assert_eq!(m43.score.as_deref(), Some("1-2"));
    assert_eq!(m43.winner_key.as_deref(), Some("ITA"));

    let finals = bracket.round("Finals").unwrap();
    let m52 = finals.matches.iter().find(|m| m.match_id == "M52").unwrap();
    assert_eq!(m52.score.as_deref(), Some("0-0"));
    assert_eq!(m52.penalties.as_deref(), Some("BRA 3-2 ITA"));
    assert_eq!(m52.winner_key.as_deref(), Some("BRA"));
}
