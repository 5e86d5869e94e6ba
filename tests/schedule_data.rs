//! Cross-checks over the embedded reference data: the schedule, the squads,
//! and the static tables must agree with each other.

use wc94_tournament_web::{parse_score, score_from_events, winner_of, ReferenceData};

fn reference() -> ReferenceData {
    ReferenceData::load_embedded().unwrap()
}

#[test]
fn the_embedded_data_loads() {
    let reference = reference();
    assert_eq!(reference.matches().len(), 52);
    assert_eq!(reference.teams().count(), 24);
    assert_eq!(reference.groups().len(), 6);
    assert_eq!(reference.rounds().len(), 7);
}

#[test]
fn every_squad_has_22_unique_numbers() {
    let reference = reference();
    for team in reference.teams() {
        assert_eq!(team.squad.len(), 22, "{}", team.key);
        for number in 1..=22 {
            assert!(
                team.player_by_number(number).is_some(),
                "{} missing number {}",
                team.key,
                number
            );
        }
    }
}

#[test]
fn every_team_belongs_to_exactly_one_group() {
    let reference = reference();
    for team in reference.teams() {
        assert!(reference.group_of(&team.key).is_some(), "{}", team.key);
    }
    let member_count: usize = reference.groups().iter().map(|(_, keys)| keys.len()).sum();
    assert_eq!(member_count, 24);
}

#[test]
fn round_match_ids_cover_the_schedule_exactly_once() {
    let reference = reference();
    let mut seen = Vec::new();
    for round in reference.rounds() {
        for id in &round.match_ids {
            assert!(reference.match_by_id(id).is_some(), "{id}");
            assert!(!seen.contains(id), "{id} scheduled twice");
            seen.push(id.clone());
        }
    }
    assert_eq!(seen.len(), reference.matches().len());
}

#[test]
fn goal_timelines_reproduce_the_recorded_scores() {
    let reference = reference();
    for m in reference.matches() {
        let replayed = score_from_events(&m.team1, &m.team2, &m.goal_scorers, 45);
        assert_eq!(
            Some(replayed),
            parse_score(&m.half_time_score),
            "half-time of {}",
            m.id
        );
        let replayed = score_from_events(&m.team1, &m.team2, &m.goal_scorers, 90);
        assert_eq!(Some(replayed), parse_score(&m.score), "full-time of {}", m.id);
        if let Some(et) = &m.extra_time_score {
            let replayed = score_from_events(&m.team1, &m.team2, &m.goal_scorers, 120);
            assert_eq!(Some(replayed), parse_score(et), "extra time of {}", m.id);
        }
    }
}

#[test]
fn scorers_and_booked_players_are_in_their_squads() {
    let reference = reference();
    for m in reference.matches() {
        for goal in &m.goal_scorers {
            let team = reference.team(&goal.team).unwrap();
            assert!(
                team.squad.iter().any(|p| p.name == goal.player),
                "{} not in {} ({})",
                goal.player,
                goal.team,
                m.id
            );
        }
        for event in &m.events {
            let team = reference.team(&event.team).unwrap();
            assert!(
                team.squad.iter().any(|p| p.name == event.player),
                "{} not in {} ({})",
                event.player,
                event.team,
                m.id
            );
        }
    }
}

#[test]
fn recorded_lineups_are_legal_selections() {
    let reference = reference();
    let mut seen_any = false;
    for m in reference.matches() {
        for (team_key, lineup) in &m.lineups {
            seen_any = true;
            assert!(m.involves(team_key), "{}", m.id);
            let team = reference.team(team_key).unwrap();
            assert_eq!(lineup.starters.len(), 11, "{} {}", m.id, team_key);
            let rules = reference.formation(&lineup.formation).unwrap();
            let mut gk = 0;
            let mut df = 0;
            let mut mf = 0;
            let mut fw = 0;
            for &number in &lineup.starters {
                let player = team.player_by_number(number).unwrap();
                match player.category {
                    wc94_tournament_web::PlayerCategory::Gk => gk += 1,
                    wc94_tournament_web::PlayerCategory::Df => df += 1,
                    wc94_tournament_web::PlayerCategory::Mf => mf += 1,
                    wc94_tournament_web::PlayerCategory::Fw => fw += 1,
                    wc94_tournament_web::PlayerCategory::Unknown => {}
                }
            }
            assert_eq!((gk, df, mf, fw), (rules.gk, rules.df, rules.mf, rules.fw));
            for &number in &lineup.subs {
                assert!(team.player_by_number(number).is_some());
            }
        }
    }
    assert!(seen_any, "schedule carries no sample lineups");
}

#[test]
fn knockout_matches_always_produce_a_winner() {
    let reference = reference();
    for m in reference.matches() {
        if m.is_group_stage() {
            assert!(m.group.is_some(), "{}", m.id);
            assert!(m.extra_time_score.is_none(), "{}", m.id);
            assert!(m.penalties.is_none(), "{}", m.id);
        } else {
            let winner = winner_of(m, &reference);
            assert!(winner.is_some(), "{} has no winner", m.id);
            assert!(m.involves(winner.as_deref().unwrap()), "{}", m.id);
        }
    }
}
