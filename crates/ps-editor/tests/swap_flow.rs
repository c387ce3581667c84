//! Integration tests: full drag-and-drop swap (ps-editor ↔ ps-core).
//!
//! Drives two `SwappableTile`s and a `PrintPage` the way the browser host
//! does, then checks the committed entries and the derived tile states.

use pretty_assertions::assert_eq;
use ps_core::{Entries, Entry, ImageId, ImageState, Slot, SwapConfig};
use ps_editor::{
    DropOutcome, IgnoreReason, MeasuredTile, PrintPage, SwappableTile, TileEffect, TileEvent,
};

const EPSILON: f64 = 0.001;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn scenario_page() -> PrintPage {
    let entries = Entries::new(vec![
        Entry::new("A", ["flow-x", "flow-y"]),
        Entry::new("B", ["flow-z"]),
    ])
    .unwrap();
    PrintPage::new(entries, SwapConfig::default())
}

fn id(url: &str) -> ImageId {
    ImageId::intern(url)
}

/// Press, drag `source` over `target`, and drop it. Returns the page outcome.
fn drag_and_drop(
    page: &mut PrintPage,
    source: ImageId,
    target: ImageId,
    now_ms: f64,
) -> Option<DropOutcome> {
    let config = page.config().clone();
    let source_layout = MeasuredTile::new(0.0, 0.0, 270.0, 151.0);
    let target_layout = MeasuredTile::new(300.0, 0.0, 270.0, 151.0);
    let mut source_tile = SwappableTile::new();
    let mut target_tile = SwappableTile::new();

    let source_state = page.image_state_of(source);
    source_tile.handle(
        &TileEvent::from_pointer_down(100.0, 70.0, 0),
        &source_state,
        &source_layout,
        &config,
    );
    let effects = source_tile.handle(&TileEvent::DragStart, &source_state, &source_layout, &config);
    let payload = effects.iter().find_map(|e| match e {
        TileEffect::SetPayload { image, .. } => Some(image.as_str().to_string()),
        _ => None,
    });

    let target_state = page.image_state_of(target);
    target_tile.handle(&TileEvent::DragEnter, &target_state, &target_layout, &config);
    let effects = target_tile.handle(
        &TileEvent::from_drop(340.0, 50.0, payload.as_deref().unwrap_or("")),
        &target_state,
        &target_layout,
        &config,
    );
    source_tile.handle(&TileEvent::DragEnd, &source_state, &source_layout, &config);
    assert!(source_tile.armed().is_none());
    assert!(!source_tile.is_dragging());

    effects.into_iter().find_map(|e| match e {
        TileEffect::Dropped(info) => Some(page.on_drop(target, info, now_ms)),
        _ => None,
    })
}

#[test]
fn drop_z_onto_x_swaps_across_entries() {
    init_logging();
    let mut page = scenario_page();
    let outcome = drag_and_drop(&mut page, id("flow-z"), id("flow-x"), 0.0);
    assert!(matches!(outcome, Some(DropOutcome::Accepted(_))));

    let swapping = page.swapping().expect("swap in flight");
    assert_eq!(swapping.drop_x, 40.0);
    assert_eq!(swapping.drop_y, 50.0);

    page.tick(500.0).unwrap().expect("commit at duration");
    let expected = Entries::new(vec![
        Entry::new("A", ["flow-z", "flow-y"]),
        Entry::new("B", ["flow-x"]),
    ])
    .unwrap();
    assert_eq!(page.entries(), &expected);
    assert!(page.swapping().is_none());
}

#[test]
fn self_drop_never_creates_swapping_state() {
    let mut page = scenario_page();
    let before = page.entries().clone();

    // The tile itself filters the self-drop: no notification reaches the page
    let outcome = drag_and_drop(&mut page, id("flow-y"), id("flow-y"), 0.0);
    assert_eq!(outcome, None);
    assert!(page.swapping().is_none());

    // And the page refuses it even if notified directly
    let direct = page.on_drop(
        id("flow-y"),
        ps_core::DropInfo {
            image: id("flow-y"),
            drop_x: 0.0,
            drop_y: 0.0,
        },
        0.0,
    );
    assert_eq!(direct, DropOutcome::Ignored(IgnoreReason::SelfDrop));
    assert!(page.swapping().is_none());
    assert_eq!(page.tick(10_000.0).unwrap(), None);
    assert_eq!(page.entries(), &before);
}

#[test]
fn exactly_one_ripple_and_one_fade_in_flight() {
    let mut page = scenario_page();
    drag_and_drop(&mut page, id("flow-z"), id("flow-x"), 0.0);

    let states = page.image_states();
    let ripples = states
        .iter()
        .filter(|(_, s)| matches!(s, ImageState::ReplacingRipple { .. }))
        .count();
    let fades = states
        .iter()
        .filter(|(_, s)| matches!(s, ImageState::ReplacingFade { .. }))
        .count();
    let defaults = states.iter().filter(|(_, s)| s.is_default()).count();
    assert_eq!((ripples, fades, defaults), (1, 1, 1));

    assert_eq!(
        page.image_state(Slot::new(0, 0)),
        Some(ImageState::ReplacingRipple {
            original: id("flow-x"),
            replacement: id("flow-z"),
            drop_x: 40.0,
            drop_y: 50.0,
        })
    );
    assert_eq!(
        page.image_state(Slot::new(1, 0)),
        Some(ImageState::ReplacingFade {
            original: id("flow-z"),
            replacement: id("flow-x"),
        })
    );
}

#[test]
fn commit_lands_exactly_at_duration() {
    let mut page = scenario_page();
    let before = page.entries().clone();
    let start = 1_234.0;
    drag_and_drop(&mut page, id("flow-z"), id("flow-x"), start);

    let duration = f64::from(page.config().swap_duration_ms);
    assert_eq!(page.tick(start + duration - EPSILON).unwrap(), None);
    assert_eq!(page.entries(), &before);
    assert!(page.swapping().is_some());

    assert!(page.tick(start + duration + EPSILON).unwrap().is_some());
    assert_ne!(page.entries(), &before);
    assert!(page.swapping().is_none());
}

#[test]
fn overlapping_drop_is_rejected_and_first_commits() {
    let mut page = scenario_page();
    drag_and_drop(&mut page, id("flow-z"), id("flow-x"), 0.0);
    let second = drag_and_drop(&mut page, id("flow-y"), id("flow-z"), 100.0);
    // flow-z is mid-fade, so its tile does not accept the drop at all
    assert_eq!(second, None);

    let direct = page.on_drop(
        id("flow-y"),
        ps_core::DropInfo {
            image: id("flow-x"),
            drop_x: 0.0,
            drop_y: 0.0,
        },
        100.0,
    );
    assert_eq!(direct, DropOutcome::Ignored(IgnoreReason::SwapInFlight));

    page.tick(500.0).unwrap().expect("first swap commits");
    assert_eq!(page.entries().as_slice()[0].images[0], id("flow-z"));
}

#[test]
fn swap_sequences_preserve_the_multiset() {
    let urls: Vec<String> = (0..9).map(|i| format!("perm-{i}")).collect();
    let entries = Entries::new(vec![
        Entry::new("one", urls[0..4].iter().map(String::as_str)),
        Entry::new("two", urls[4..6].iter().map(String::as_str)),
        Entry::new("three", urls[6..9].iter().map(String::as_str)),
    ])
    .unwrap();
    let counts: Vec<usize> = entries.iter().map(|e| e.images.len()).collect();
    let mut sorted_before: Vec<String> = urls.clone();
    sorted_before.sort();

    let mut page = PrintPage::new(entries, SwapConfig::default());
    let mut now = 0.0;
    // Deterministic walk over index pairs, including self-pairs
    let mut seed: u64 = 0x2545_F491_4F6C_DD1D;
    for _ in 0..60 {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        let a = id(&urls[(seed % 9) as usize]);
        let b = id(&urls[((seed >> 8) % 9) as usize]);
        page.on_drop(
            a,
            ps_core::DropInfo {
                image: b,
                drop_x: 1.0,
                drop_y: 1.0,
            },
            now,
        );
        now += 600.0;
        page.tick(now).unwrap();

        let current: Vec<usize> = page.entries().iter().map(|e| e.images.len()).collect();
        assert_eq!(current, counts);
        let mut sorted: Vec<String> = page
            .entries()
            .slots()
            .map(|(_, image)| image.as_str().to_string())
            .collect();
        sorted.sort();
        assert_eq!(sorted, sorted_before);
    }
}

#[test]
fn drag_end_clears_target_overlay_too() {
    let page = scenario_page();
    let config = page.config().clone();
    let layout = MeasuredTile::new(0.0, 0.0, 270.0, 151.0);
    let state = page.image_state_of(id("flow-y"));
    let mut tile = SwappableTile::new();

    tile.handle(&TileEvent::DragEnter, &state, &layout, &config);
    assert!(tile.overlay_visible());
    tile.handle(&TileEvent::DragExit, &state, &layout, &config);
    assert!(!tile.overlay_visible());
}
