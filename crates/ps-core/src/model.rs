//! Core data model for a print-layout page.
//!
//! The page is a list of titled entries, each holding an ordered run of
//! image identifiers (one per tile). Identifiers are unique across the whole
//! collection; `Entries` enforces this at construction and is never mutated
//! in place afterwards. A swap produces a fresh collection.
//!
//! Each tile's visual state (`ImageState`) is not stored anywhere. It is
//! projected from `(entries, swapping state, slot)` by `derive_image_state`.

use crate::error::SwapError;
use crate::id::ImageId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;

// ─── Entries ─────────────────────────────────────────────────────────────

/// A titled group of tiles (one print page section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub images: SmallVec<[ImageId; 4]>,
}

impl Entry {
    pub fn new<'a>(title: impl Into<String>, images: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            title: title.into(),
            images: images.into_iter().map(ImageId::intern).collect(),
        }
    }
}

/// Position of a tile: entry index plus index within that entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub entry: usize,
    pub index: usize,
}

impl Slot {
    pub const fn new(entry: usize, index: usize) -> Self {
        Self { entry, index }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry {} tile {}", self.entry, self.index)
    }
}

/// Validated collection of entries with globally unique image identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Entries(Vec<Entry>);

impl Entries {
    /// Validate and wrap a list of entries.
    ///
    /// # Errors
    /// `SwapError::DuplicateImage` if any identifier occurs in more than one slot.
    pub fn new(entries: Vec<Entry>) -> Result<Self, SwapError> {
        let mut seen: HashMap<ImageId, Slot> = HashMap::new();
        for (e, entry) in entries.iter().enumerate() {
            for (i, &image) in entry.images.iter().enumerate() {
                let slot = Slot::new(e, i);
                if let Some(&first) = seen.get(&image) {
                    log::warn!("entries rejected: `{image}` at {first} and {slot}");
                    return Err(SwapError::DuplicateImage {
                        image,
                        first,
                        second: slot,
                    });
                }
                seen.insert(image, slot);
            }
        }
        log::debug!("entries loaded: {} entries, {} tiles", entries.len(), seen.len());
        Ok(Self(entries))
    }

    /// Parse `[{"title": "...", "images": ["..."]}, ...]` and validate.
    pub fn from_json(json: &str) -> Result<Self, SwapError> {
        let entries: Vec<Entry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    pub fn to_json(&self) -> Result<String, SwapError> {
        Ok(serde_json::to_string(&self.0)?)
    }

    pub fn as_slice(&self) -> &[Entry] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of tiles across all entries.
    pub fn tile_count(&self) -> usize {
        self.0.iter().map(|e| e.images.len()).sum()
    }

    /// The image at `slot`, if the slot exists.
    pub fn get(&self, slot: Slot) -> Option<ImageId> {
        self.0
            .get(slot.entry)
            .and_then(|e| e.images.get(slot.index))
            .copied()
    }

    /// Find the slot holding `image`.
    pub fn locate(&self, image: ImageId) -> Option<Slot> {
        self.0.iter().enumerate().find_map(|(e, entry)| {
            entry
                .images
                .iter()
                .position(|&id| id == image)
                .map(|i| Slot::new(e, i))
        })
    }

    /// Iterate every tile in layout order.
    pub fn slots(&self) -> impl Iterator<Item = (Slot, ImageId)> + '_ {
        self.0.iter().enumerate().flat_map(|(e, entry)| {
            entry
                .images
                .iter()
                .enumerate()
                .map(move |(i, &id)| (Slot::new(e, i), id))
        })
    }

    /// Return a copy with the positions of `a` and `b` exchanged.
    /// `self` is left untouched.
    ///
    /// # Errors
    /// `SwapError::ImageNotFound` if either identifier is absent.
    pub fn swapped(&self, a: ImageId, b: ImageId) -> Result<Self, SwapError> {
        let slot_a = self.locate(a).ok_or(SwapError::ImageNotFound(a))?;
        let slot_b = self.locate(b).ok_or(SwapError::ImageNotFound(b))?;

        let mut next = self.clone();
        next.0[slot_a.entry].images[slot_a.index] = b;
        next.0[slot_b.entry].images[slot_b.index] = a;
        Ok(next)
    }
}

impl TryFrom<Vec<Entry>> for Entries {
    type Error = SwapError;

    fn try_from(entries: Vec<Entry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

// ─── Swap state ──────────────────────────────────────────────────────────

/// Identity of one swap, from drop to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SwapId(pub u64);

/// What a tile reports upward when something is dropped on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropInfo {
    /// The dragged (incoming) image.
    pub image: ImageId,
    /// Drop point relative to the target tile's container.
    pub drop_x: f64,
    pub drop_y: f64,
}

/// The single in-flight swap, held by the page between drop and commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwappingState {
    pub id: SwapId,
    /// Image of the drop target.
    pub original: ImageId,
    /// Image of the drag source.
    pub replacement: ImageId,
    pub drop_x: f64,
    pub drop_y: f64,
}

/// Visual state of a single tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ImageState {
    /// Idle and draggable.
    Default { image: ImageId },
    /// Drop target: ripple, avatar move-to-center, then mask reveal.
    ReplacingRipple {
        original: ImageId,
        replacement: ImageId,
        drop_x: f64,
        drop_y: f64,
    },
    /// Drag source: cross-fades to the image that displaced it.
    ReplacingFade {
        original: ImageId,
        replacement: ImageId,
    },
}

impl ImageState {
    /// The image painted underneath any animation layers.
    pub fn base_image(&self) -> ImageId {
        match *self {
            ImageState::Default { image } => image,
            ImageState::ReplacingRipple { original, .. } => original,
            ImageState::ReplacingFade { original, .. } => original,
        }
    }

    /// The image animating in, if any.
    pub fn incoming(&self) -> Option<ImageId> {
        match *self {
            ImageState::Default { .. } => None,
            ImageState::ReplacingRipple { replacement, .. } => Some(replacement),
            ImageState::ReplacingFade { replacement, .. } => Some(replacement),
        }
    }

    pub fn is_default(&self) -> bool {
        match self {
            ImageState::Default { .. } => true,
            ImageState::ReplacingRipple { .. } | ImageState::ReplacingFade { .. } => false,
        }
    }
}

/// Project the state of the tile showing `image`.
///
/// The drop target gets the ripple, the drag source gets the fade (with
/// `original`/`replacement` seen from its own side), every other tile stays
/// default.
pub fn image_state_for(image: ImageId, swapping: Option<&SwappingState>) -> ImageState {
    match swapping {
        Some(s) if s.original == image => ImageState::ReplacingRipple {
            original: image,
            replacement: s.replacement,
            drop_x: s.drop_x,
            drop_y: s.drop_y,
        },
        Some(s) if s.replacement == image => ImageState::ReplacingFade {
            original: s.replacement,
            replacement: s.original,
        },
        _ => ImageState::Default { image },
    }
}

/// Project the state of the tile at `slot`. `None` if the slot is out of range.
pub fn derive_image_state(
    entries: &Entries,
    swapping: Option<&SwappingState>,
    slot: Slot,
) -> Option<ImageState> {
    entries
        .get(slot)
        .map(|image| image_state_for(image, swapping))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Entries {
        Entries::new(vec![
            Entry::new("A", ["model-x", "model-y"]),
            Entry::new("B", ["model-z"]),
        ])
        .unwrap()
    }

    #[test]
    fn duplicate_images_rejected_at_construction() {
        let err = Entries::new(vec![
            Entry::new("A", ["dup-1", "dup-2"]),
            Entry::new("B", ["dup-1"]),
        ])
        .unwrap_err();
        match err {
            SwapError::DuplicateImage {
                image,
                first,
                second,
            } => {
                assert_eq!(image.as_str(), "dup-1");
                assert_eq!(first, Slot::new(0, 0));
                assert_eq!(second, Slot::new(1, 0));
            }
            other => panic!("expected DuplicateImage, got {other:?}"),
        }
    }

    #[test]
    fn locate_and_get_agree() {
        let entries = sample();
        for (slot, image) in entries.slots() {
            assert_eq!(entries.locate(image), Some(slot));
            assert_eq!(entries.get(slot), Some(image));
        }
        assert_eq!(entries.tile_count(), 3);
        assert_eq!(entries.get(Slot::new(1, 1)), None);
        assert_eq!(entries.get(Slot::new(5, 0)), None);
    }

    #[test]
    fn swapped_across_entries() {
        let entries = sample();
        let next = entries
            .swapped(ImageId::intern("model-x"), ImageId::intern("model-z"))
            .unwrap();
        let expected = Entries::new(vec![
            Entry::new("A", ["model-z", "model-y"]),
            Entry::new("B", ["model-x"]),
        ])
        .unwrap();
        assert_eq!(next, expected);
        // Source collection untouched
        assert_eq!(entries, sample());
    }

    #[test]
    fn swapped_within_one_entry() {
        let entries = sample();
        let next = entries
            .swapped(ImageId::intern("model-y"), ImageId::intern("model-x"))
            .unwrap();
        assert_eq!(
            next.as_slice()[0].images.as_slice(),
            &[ImageId::intern("model-y"), ImageId::intern("model-x")]
        );
    }

    #[test]
    fn swapped_missing_image_fails() {
        let entries = sample();
        let ghost = ImageId::intern("model-ghost");
        let err = entries
            .swapped(ImageId::intern("model-x"), ghost)
            .unwrap_err();
        assert!(matches!(err, SwapError::ImageNotFound(id) if id == ghost));
    }

    #[test]
    fn derive_marks_exactly_target_and_source() {
        let entries = sample();
        let swapping = SwappingState {
            id: SwapId(1),
            original: ImageId::intern("model-x"),
            replacement: ImageId::intern("model-z"),
            drop_x: 12.0,
            drop_y: 34.0,
        };

        let states: Vec<ImageState> = entries
            .slots()
            .map(|(slot, _)| derive_image_state(&entries, Some(&swapping), slot).unwrap())
            .collect();

        assert_eq!(
            states,
            vec![
                ImageState::ReplacingRipple {
                    original: ImageId::intern("model-x"),
                    replacement: ImageId::intern("model-z"),
                    drop_x: 12.0,
                    drop_y: 34.0,
                },
                ImageState::Default {
                    image: ImageId::intern("model-y"),
                },
                ImageState::ReplacingFade {
                    original: ImageId::intern("model-z"),
                    replacement: ImageId::intern("model-x"),
                },
            ]
        );
    }

    #[test]
    fn derive_without_swap_is_all_default() {
        let entries = sample();
        for (slot, image) in entries.slots() {
            assert_eq!(
                derive_image_state(&entries, None, slot),
                Some(ImageState::Default { image })
            );
        }
        assert_eq!(derive_image_state(&entries, None, Slot::new(9, 9)), None);
    }

    #[test]
    fn image_state_json_is_tagged() {
        let state = ImageState::ReplacingFade {
            original: ImageId::intern("fade-a"),
            replacement: ImageId::intern("fade-b"),
        };
        let json = serde_json::to_value(state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "state": "replacing-fade",
                "original": "fade-a",
                "replacement": "fade-b",
            })
        );

        let ripple = ImageState::ReplacingRipple {
            original: ImageId::intern("fade-a"),
            replacement: ImageId::intern("fade-b"),
            drop_x: 1.0,
            drop_y: 2.0,
        };
        let json = serde_json::to_value(ripple).unwrap();
        assert_eq!(json["state"], "replacing-ripple");
        assert_eq!(json["dropX"], 1.0);
    }

    #[test]
    fn entries_json_roundtrip() {
        let json = r#"[{"title":"A","images":["json-1","json-2"]},{"title":"B","images":["json-3"]}]"#;
        let entries = Entries::from_json(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.to_json().unwrap(), json);
    }

    #[test]
    fn base_and_incoming_images() {
        let a = ImageId::intern("base-a");
        let b = ImageId::intern("base-b");
        let ripple = ImageState::ReplacingRipple {
            original: a,
            replacement: b,
            drop_x: 0.0,
            drop_y: 0.0,
        };
        assert_eq!(ripple.base_image(), a);
        assert_eq!(ripple.incoming(), Some(b));
        assert!(!ripple.is_default());

        let idle = ImageState::Default { image: a };
        assert_eq!(idle.base_image(), a);
        assert_eq!(idle.incoming(), None);
        assert!(idle.is_default());
    }
}
