//! Tests for the built-in variant table.

use image::{Rgba, RgbaImage};

use super::*;
use crate::test_support::test_tiles;

struct Blank;

impl VariantBuilder for Blank {
    fn generate(&self, _state: AncillaryState, _tiles: &TileSet) -> Option<RgbaImage> {
        Some(RgbaImage::new(24, 24))
    }
}

#[test]
fn test_every_declared_state_is_generated() {
    let tiles = test_tiles();
    let registry = VariantRegistry::standard().unwrap();

    for kind in registry.stateful_kinds() {
        let domain = registry.domain(kind).unwrap().clone();
        for state in domain.states() {
            let sprite = registry.generate(kind, Some(state), &tiles);
            assert!(sprite.is_some(), "{kind} state {state} should be present");
            assert_eq!(sprite.unwrap().dimensions(), (24, 24));
        }
    }
}

#[test]
fn test_states_outside_domain_are_absent() {
    let tiles = test_tiles();
    let registry = VariantRegistry::standard().unwrap();

    assert!(registry.generate(BlockKind(50), Some(0), &tiles).is_none());
    assert!(registry.generate(BlockKind(50), Some(6), &tiles).is_none());
    assert!(registry.generate(BlockKind(65), Some(0), &tiles).is_none());
    assert!(registry.generate(BlockKind(65), Some(6), &tiles).is_none());
    assert!(registry.generate(BlockKind(17), Some(3), &tiles).is_none());
    assert!(registry.generate(BlockKind(55), Some(128), &tiles).is_none());
    // Kinds without a stateful builder.
    assert!(registry.generate(BlockKind(1), Some(0), &tiles).is_none());
    assert!(registry.generate(BlockKind(200), Some(0), &tiles).is_none());
}

#[test]
fn test_plain_kinds_follow_the_tile_table() {
    let tiles = test_tiles();
    let registry = VariantRegistry::standard().unwrap();
    let plain = registry.plain_kinds();

    assert!(plain.contains(&BlockKind(1)));
    assert!(plain.contains(&BlockKind(91)));
    assert!(!plain.contains(&BlockKind(0)));
    assert!(!plain.contains(&BlockKind(55)));
    assert!(!plain.contains(&BlockKind(92)));
    assert!(registry.generate(BlockKind(0), None, &tiles).is_none());

    // Still water shows only its surface.
    let still = registry.generate(BlockKind(9), None, &tiles).unwrap();
    assert!((12..24).all(|y| (0..24).all(|x| still.get_pixel(x, y)[3] == 0)));
    let flowing = registry.generate(BlockKind(8), None, &tiles).unwrap();
    assert!(flowing.get_pixel(6, 18)[3] > 0);
}

#[test]
fn test_declared_domains() {
    let registry = VariantRegistry::standard().unwrap();
    let states = |id: u8| registry.domain(BlockKind(id)).unwrap().states();

    assert_eq!(states(50), vec![1, 2, 3, 4, 5]);
    assert_eq!(states(65), vec![2, 3, 4, 5]);
    assert_eq!(states(58), vec![0]);
    assert_eq!(states(55).len(), 128);
    assert_eq!(states(85).len(), 17);
    assert_eq!(states(2).len(), 11);
    assert_eq!(registry.stateful_kinds().len(), 30);
}

#[test]
fn test_jobs_cover_plain_and_stateful_entries() {
    let registry = VariantRegistry::standard().unwrap();
    let jobs = registry.jobs();

    let plain = jobs.iter().filter(|(_, s)| s.is_none()).count();
    assert_eq!(plain, registry.plain_kinds().len());
    assert!(jobs.contains(&(BlockKind(35), Some(15))));
    assert!(!jobs.contains(&(BlockKind(35), Some(16))));
}

#[test]
fn test_duplicate_registration_is_rejected() {
    let mut registry = VariantRegistry::new();
    registry.register_plain(BlockKind(1), Blank).unwrap();
    assert!(matches!(
        registry.register_plain(BlockKind(1), Blank),
        Err(RegistryError::DuplicatePlain(BlockKind(1)))
    ));

    registry
        .register_states(BlockKind(1), StateDomain::Range(0..2), Blank)
        .unwrap();
    assert!(matches!(
        registry.register_states(BlockKind(1), StateDomain::Only(&[3]), Blank),
        Err(RegistryError::DuplicateStateful(BlockKind(1)))
    ));
    assert!(matches!(
        registry.register_states(BlockKind(2), StateDomain::Range(4..4), Blank),
        Err(RegistryError::EmptyDomain(BlockKind(2)))
    ));
}

#[test]
fn test_white_wool_has_white_top() {
    let tiles = test_tiles();
    let registry = VariantRegistry::standard().unwrap();
    let wool = registry.generate(BlockKind(35), Some(0), &tiles).unwrap();

    for (x, y) in [(12, 6), (6, 6), (18, 6), (12, 3), (12, 9)] {
        assert_eq!(wool.get_pixel(x, y), &Rgba([255, 255, 255, 255]), "({x},{y})");
    }
}

#[test]
fn test_generation_is_deterministic() {
    let tiles = test_tiles();
    let registry = VariantRegistry::standard().unwrap();
    for (kind, state) in [(53, 3), (85, 15), (66, 8), (64, 13), (76, 5)] {
        let a = registry.generate(BlockKind(kind), Some(state), &tiles);
        let b = registry.generate(BlockKind(kind), Some(state), &tiles);
        assert_eq!(a, b);
    }
}
