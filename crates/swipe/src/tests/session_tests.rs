use super::*;
use catalog::Catalog;

fn paris_deck() -> Vec<Attraction> {
    let catalog = Catalog::builtin().expect("builtin catalog");
    catalog
        .city(&CityId::new("paris"))
        .expect("paris")
        .attractions
        .clone()
}

fn paris() -> CityId {
    CityId::new("paris")
}

fn viewing_name(session: &SwipeSession, deck: &[Attraction]) -> Option<String> {
    match session.position(deck, &paris()) {
        Position::Viewing { attraction, .. } => Some(attraction.name.clone()),
        _ => None,
    }
}

#[test]
fn first_view_starts_at_the_top_of_the_deck() {
    let deck = paris_deck();
    let mut session = SwipeSession::new();
    let cursor = session.open(&paris());
    assert_eq!(cursor.current_index(), 0);
    assert!(!cursor.is_finalized());
    assert_eq!(viewing_name(&session, &deck).as_deref(), Some("Eiffel Tower"));
}

#[test]
fn liking_records_the_attraction_under_the_cursor() {
    let deck = paris_deck();
    let session = reduce(SwipeSession::new(), &deck, &paris(), SwipeEvent::Like).expect("like");
    let session = reduce(session, &deck, &paris(), SwipeEvent::Like).expect("like");

    let cursor = session.cursor(&paris()).expect("cursor");
    assert_eq!(cursor.liked(), ["Eiffel Tower", "Louvre Museum"]);
    assert_eq!(cursor.current_index(), 2);
}

#[test]
fn skip_advances_without_liking() {
    let deck = paris_deck();
    let mut session = SwipeSession::new();
    session
        .apply(&deck, &paris(), SwipeEvent::NextPhoto)
        .expect("next photo");
    session
        .apply(&deck, &paris(), SwipeEvent::Skip)
        .expect("skip");

    let cursor = session.cursor(&paris()).expect("cursor");
    assert_eq!(cursor.current_index(), 1);
    assert_eq!(cursor.current_photo_index(), 0);
    assert!(cursor.liked().is_empty());
}

#[test]
fn photo_navigation_is_bounded_by_the_current_attraction() {
    let deck = paris_deck();
    let mut session = SwipeSession::new();
    for _ in 0..5 {
        session
            .apply(&deck, &paris(), SwipeEvent::NextPhoto)
            .expect("next photo");
    }
    assert_eq!(
        session.cursor(&paris()).expect("cursor").current_photo_index(),
        1
    );

    for _ in 0..5 {
        session
            .apply(&deck, &paris(), SwipeEvent::PrevPhoto)
            .expect("prev photo");
    }
    assert_eq!(
        session.cursor(&paris()).expect("cursor").current_photo_index(),
        0
    );
}

#[test]
fn museum_filter_leaves_one_attraction() {
    let deck = paris_deck();
    let mut session = SwipeSession::new();
    session
        .apply(
            &deck,
            &paris(),
            SwipeEvent::SetFilter {
                categories: vec![AttractionCategory::Museum],
            },
        )
        .expect("filter");

    assert_eq!(session.filter().apply(&deck).len(), 1);
    assert_eq!(viewing_name(&session, &deck).as_deref(), Some("Louvre Museum"));
}

#[test]
fn empty_filter_shows_the_whole_deck() {
    let deck = paris_deck();
    let mut session = SwipeSession::new();
    session.apply_filter([AttractionCategory::Shopping]);
    session.apply_filter(Vec::new());
    assert!(session.filter().is_empty());
    assert_eq!(session.filter().apply(&deck).len(), 4);
}

#[test]
fn filter_with_no_matches_is_reported_separately() {
    let deck = paris_deck();
    let mut session = SwipeSession::new();
    session.apply_filter([AttractionCategory::Temple]);
    assert_eq!(session.position(&deck, &paris()), Position::NoMatches);

    let err = session
        .apply(&deck, &paris(), SwipeEvent::Skip)
        .expect_err("nothing to skip");
    assert_eq!(err, SwipeError::Exhausted { city: paris() });
}

#[test]
fn swiping_past_the_end_is_rejected_and_leaves_state_untouched() {
    let deck = paris_deck();
    let mut session = SwipeSession::new();
    for _ in 0..deck.len() {
        session
            .apply(&deck, &paris(), SwipeEvent::Like)
            .expect("like");
    }
    assert_eq!(session.position(&deck, &paris()), Position::Exhausted);

    let before = session.clone();
    for event in [
        SwipeEvent::Like,
        SwipeEvent::Skip,
        SwipeEvent::NextPhoto,
        SwipeEvent::PrevPhoto,
    ] {
        assert!(session.apply(&deck, &paris(), event).is_err());
    }
    assert_eq!(session, before);
    assert_eq!(
        session.cursor(&paris()).expect("cursor").current_index(),
        deck.len()
    );
}

#[test]
fn narrowing_the_filter_keeps_the_cursor_where_it_was() {
    let deck = paris_deck();
    let mut session = SwipeSession::new();
    session
        .apply(&deck, &paris(), SwipeEvent::Skip)
        .expect("skip");
    session
        .apply(&deck, &paris(), SwipeEvent::Skip)
        .expect("skip");

    session
        .apply(
            &deck,
            &paris(),
            SwipeEvent::SetFilter {
                categories: vec![AttractionCategory::Museum],
            },
        )
        .expect("filter");

    assert_eq!(
        session.cursor(&paris()).expect("cursor").current_index(),
        2
    );
    assert_eq!(session.position(&deck, &paris()), Position::Exhausted);
}

#[test]
fn finalize_is_idempotent_and_does_not_move_the_cursor() {
    let deck = paris_deck();
    let once = reduce(SwipeSession::new(), &deck, &paris(), SwipeEvent::Finalize).expect("once");
    let twice = reduce(once.clone(), &deck, &paris(), SwipeEvent::Finalize).expect("twice");
    assert_eq!(once, twice);

    let cursor = twice.cursor(&paris()).expect("cursor");
    assert!(cursor.is_finalized());
    assert_eq!(cursor.current_index(), 0);
}

#[test]
fn finalize_is_accepted_on_an_exhausted_deck() {
    let deck = paris_deck();
    let mut session = SwipeSession::new();
    session.apply_filter([AttractionCategory::Temple]);
    session
        .apply(&deck, &paris(), SwipeEvent::Finalize)
        .expect("finalize");
    assert!(session.cursor(&paris()).expect("cursor").is_finalized());
}

#[test]
fn cities_keep_independent_cursors() {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let bangkok = CityId::new("bangkok");
    let bangkok_deck = &catalog.city(&bangkok).expect("bangkok").attractions;
    let paris_deck = paris_deck();

    let mut session = SwipeSession::new();
    session
        .apply(&paris_deck, &paris(), SwipeEvent::Like)
        .expect("like paris");
    session
        .apply(bangkok_deck, &bangkok, SwipeEvent::Finalize)
        .expect("finalize bangkok");

    let paris_cursor = session.cursor(&paris()).expect("paris cursor");
    let bangkok_cursor = session.cursor(&bangkok).expect("bangkok cursor");
    assert_eq!(paris_cursor.liked(), ["Eiffel Tower"]);
    assert!(!paris_cursor.is_finalized());
    assert!(bangkok_cursor.liked().is_empty());
    assert!(bangkok_cursor.is_finalized());
}

fn attraction(name: &str, category: AttractionCategory, photos: usize) -> Attraction {
    Attraction {
        name: name.to_string(),
        category,
        rating: 4.5,
        reviews: 10,
        hours: "9:00 - 18:00".to_string(),
        summary: String::new(),
        photos: (0..photos).map(|i| format!("{name}_{i}.jpg")).collect(),
    }
}

#[test]
fn photo_index_stays_in_bounds_when_a_filter_swaps_the_attraction() {
    let deck = vec![
        attraction("Gallery", AttractionCategory::Museum, 3),
        attraction("Market", AttractionCategory::Shopping, 1),
    ];
    let mut session = SwipeSession::new();
    for _ in 0..2 {
        session
            .apply(&deck, &paris(), SwipeEvent::NextPhoto)
            .expect("next photo");
    }
    session.apply_filter([AttractionCategory::Shopping]);

    match session.position(&deck, &paris()) {
        Position::Viewing {
            attraction,
            photo_index,
            ..
        } => {
            assert_eq!(attraction.name, "Market");
            assert_eq!(photo_index, 0);
        }
        other => panic!("unexpected position {other:?}"),
    }

    for event in [SwipeEvent::PrevPhoto, SwipeEvent::NextPhoto] {
        session.apply(&deck, &paris(), event).expect("photo");
        let stored = session.cursor(&paris()).expect("cursor").current_photo_index();
        assert!(stored <= deck[1].max_photo_index(), "stored index {stored}");
    }
}
