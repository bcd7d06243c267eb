use super::*;
use catalog::Catalog;

#[test]
fn gradient_ends_are_red_and_green() {
    assert_eq!(index_color(20), "rgb(255,76,76)");
    assert_eq!(index_color(75), "rgb(76,175,80)");
}

#[test]
fn indices_outside_the_gradient_are_clamped() {
    // 15 would give a red channel above 255
    let below = index_color(15);
    assert!(below.starts_with("rgb(255,"));
    assert!(below.ends_with(",75)"));
    assert!(index_color(100).starts_with("rgb(0,"));
}

#[test]
fn tiers_follow_the_where_to_go_index() {
    assert_eq!(tier(75), RecommendationTier::HighlyRecommended);
    assert_eq!(tier(70), RecommendationTier::HighlyRecommended);
    assert_eq!(tier(69), RecommendationTier::GoodChoice);
    assert_eq!(tier(60), RecommendationTier::GoodChoice);
    assert_eq!(tier(59), RecommendationTier::ConsiderCarefully);
}

#[test]
fn safety_colour_flips_at_thirty() {
    assert_eq!(safety_color(31), "#4ECDC4");
    assert_eq!(safety_color(30), "#FF6B6B");
}

#[test]
fn board_is_built_from_the_bundled_destinations() {
    let catalog = Catalog::builtin().expect("builtin catalog");
    let board = destination_board(catalog.destinations());
    assert_eq!(board.origin.name, "Bangalore (India)");
    assert_eq!(board.destinations.len(), 5);

    let cairo = board
        .destinations
        .iter()
        .find(|d| d.country == "Egypt")
        .expect("cairo");
    assert_eq!(cairo.tier, RecommendationTier::ConsiderCarefully);
    assert_eq!(cairo.safety_color, "#FF6B6B");
    assert_eq!(cairo.badge_colors[0], "rgb(255,76,76)");

    let siem_reap = &board.destinations[3];
    assert_eq!(siem_reap.tier, RecommendationTier::GoodChoice);
    assert_eq!(siem_reap.flight_path[0], board.origin.location);
    assert_eq!(siem_reap.flight_path[1], siem_reap.location);
    let mid = siem_reap.midpoint;
    assert!((mid.lat - (12.9716 + 13.3671) / 2.0).abs() < 1e-9);
    assert!((mid.lon - (77.5946 + 103.852) / 2.0).abs() < 1e-9);
}
