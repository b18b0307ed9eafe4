use std::collections::HashSet;

use super::*;

#[test]
fn flower_ids_are_unique() {
    let mut seen = HashSet::new();
    for f in FLOWERS {
        assert!(seen.insert(f.id), "duplicate flower id {}", f.id);
    }
}

#[test]
fn find_flower_by_id_hits_and_misses() {
    let rose = find_flower_by_id("rose").unwrap();
    assert_eq!(rose.display_name, "Rose");
    assert_eq!(rose.tier, Tier::Medium);
    assert!(find_flower_by_id("dandelion").is_none());
    assert!(find_flower_by_id("").is_none());
}

#[test]
fn all_flowers_preserves_catalog_order() {
    let ids: Vec<&str> = all_flowers().iter().map(|f| f.id).collect();
    assert_eq!(ids.first(), Some(&"foliage-1"));
    assert_eq!(ids.last(), Some(&"anemone"));
    assert_eq!(ids.len(), FLOWERS.len());
}

#[test]
fn flowers_by_tier_filters() {
    let foliage: Vec<_> = flowers_by_tier(Tier::Foliage).collect();
    assert_eq!(foliage.len(), 5);
    assert!(foliage.iter().all(|f| f.tier.is_foliage()));

    let tall: Vec<&str> = flowers_by_tier(Tier::Tall).map(|f| f.id).collect();
    assert_eq!(tall, vec!["lily", "orchid", "sunflower"]);
}

#[test]
fn tier_parses_case_insensitively() {
    assert_eq!(Tier::parse("Foliage"), Some(Tier::Foliage));
    assert_eq!(Tier::parse(" small "), Some(Tier::Small));
    assert_eq!(Tier::parse("huge"), None);
    for tier in [Tier::Tall, Tier::Medium, Tier::Small, Tier::Foliage] {
        assert_eq!(Tier::parse(tier.as_str()), Some(tier));
    }
}

#[test]
fn tier_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Tier::Foliage).unwrap(), "\"foliage\"");
    let back: Tier = serde_json::from_str("\"tall\"").unwrap();
    assert_eq!(back, Tier::Tall);
}

#[test]
fn wraps_include_none_sentinel() {
    let none = find_wrap(NO_WRAP).unwrap();
    assert!(none.image_ref.is_empty());
    assert!(find_wrap("kraft").is_some());
    assert!(find_wrap("glitter").is_none());
}

#[test]
fn default_background_is_first_and_a_color() {
    assert_eq!(BACKGROUNDS[0].value, DEFAULT_BACKGROUND);
    assert!(is_color_background(DEFAULT_BACKGROUND));
    assert!(!is_color_background("/backgrounds/garden.webp"));
}
