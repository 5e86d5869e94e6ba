//! Integration tests for squad selection validation.

use wc94_tournament_web::logic::{MAX_SUBS, STARTERS};
use wc94_tournament_web::{validate_squad_selection, ReferenceData, SessionError};

fn reference() -> ReferenceData {
    ReferenceData::load_embedded().unwrap()
}

// A valid 4-4-2 from the German squad: GK 1, defenders 2-5, midfielders
// 8/10/17/18, forwards 9/11.
const VALID_STARTERS: [u8; 11] = [1, 2, 3, 4, 5, 8, 10, 17, 18, 9, 11];

#[test]
fn a_valid_selection_passes() {
    let reference = reference();
    let team = reference.team("GER").unwrap();
    let result = validate_squad_selection(team, &VALID_STARTERS, &[12, 6, 16, 7, 19], "4-4-2", &reference);
    assert_eq!(result, Ok(()));
}

#[test]
fn starter_count_must_be_exactly_eleven() {
    let reference = reference();
    let team = reference.team("GER").unwrap();
    let result = validate_squad_selection(team, &VALID_STARTERS[..10], &[], "4-4-2", &reference);
    assert_eq!(
        result,
        Err(SessionError::WrongStarterCount {
            needed: STARTERS,
            selected: 10
        })
    );
}

#[test]
fn the_bench_is_capped() {
    let reference = reference();
    let team = reference.team("GER").unwrap();
    let result = validate_squad_selection(
        team,
        &VALID_STARTERS,
        &[12, 6, 16, 7, 19, 20],
        "4-4-2",
        &reference,
    );
    assert_eq!(
        result,
        Err(SessionError::TooManySubs {
            allowed: MAX_SUBS,
            selected: 6
        })
    );
}

#[test]
fn selections_must_come_from_the_squad() {
    let reference = reference();
    let team = reference.team("GER").unwrap();
    let mut starters = VALID_STARTERS;
    starters[10] = 99;
    let result = validate_squad_selection(team, &starters, &[], "4-4-2", &reference);
    assert_eq!(result, Err(SessionError::UnknownPlayerNumber(99)));
}

#[test]
fn a_number_cannot_start_and_sit_on_the_bench() {
    let reference = reference();
    let team = reference.team("GER").unwrap();
    let result = validate_squad_selection(team, &VALID_STARTERS, &[9], "4-4-2", &reference);
    assert_eq!(result, Err(SessionError::DuplicatePlayerNumber(9)));
}

#[test]
fn the_formation_must_exist() {
    let reference = reference();
    let team = reference.team("GER").unwrap();
    let result = validate_squad_selection(team, &VALID_STARTERS, &[], "2-2-6", &reference);
    assert_eq!(
        result,
        Err(SessionError::UnknownFormation("2-2-6".to_string()))
    );
}

#[test]
fn category_counts_must_match_the_formation() {
    let reference = reference();
    let team = reference.team("GER").unwrap();
    // Five defenders against a 4-4-2.
    let starters = [1, 2, 3, 4, 5, 6, 8, 10, 17, 9, 11];
    let result = validate_squad_selection(team, &starters, &[], "4-4-2", &reference);
    assert!(matches!(
        result,
        Err(SessionError::FormationMismatch { needed: 4, selected: 5, .. })
    ));
    // The same eleven is a legal 5-3-2.
    let result = validate_squad_selection(team, &starters, &[], "5-3-2", &reference);
    assert_eq!(result, Ok(()));
}
