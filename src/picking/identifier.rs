//! Pick identifiers and their color encoding.
//!
//! Each pickable object is drawn in the picking pass with a flat color whose
//! red channel holds its identifier. Reading that channel back as an 8-bit
//! value recovers the identifier; `0` is the cleared background.

use std::fmt;
use std::num::NonZeroU8;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::MolscopeError;

/// Largest identifier one identifier space can hand out.
pub const MAX_PICK_ID: u8 = u8::MAX;

/// Identifier of a pickable object, in `1..=255`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
pub struct PickId(NonZeroU8);

impl PickId {
    /// Wrap a raw value; `None` for the reserved background value `0`.
    #[must_use]
    pub fn new(raw: u8) -> Option<Self> {
        NonZeroU8::new(raw).map(Self)
    }

    /// Raw identifier value.
    #[must_use]
    pub fn get(self) -> u8 {
        self.0.get()
    }

    /// Flat color this object is drawn with in the picking pass.
    #[must_use]
    pub fn color(self) -> Vec3 {
        encode(self.get())
    }
}

impl fmt::Display for PickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Independent identifier spaces, each drawn in its own picking pass.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PickSpace {
    /// Atom spheres.
    Atom,
    /// Bond segment cylinders.
    Bond,
}

impl fmt::Display for PickSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom => f.write_str("atom"),
            Self::Bond => f.write_str("bond"),
        }
    }
}

/// Hands out pick IDs for one identifier space.
///
/// IDs increase monotonically from 1 and are never reused, so the mapping
/// between an ID and its object is stable for the allocator's lifetime.
#[derive(Debug, Clone)]
pub struct IdentifierAllocator {
    space: PickSpace,
    next: u16,
}

impl IdentifierAllocator {
    /// Fresh allocator whose first ID is 1.
    #[must_use]
    pub fn new(space: PickSpace) -> Self {
        Self { space, next: 1 }
    }

    /// The identifier space this allocator serves.
    #[must_use]
    pub fn space(&self) -> PickSpace {
        self.space
    }

    /// Number of IDs still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        (usize::from(MAX_PICK_ID) + 1).saturating_sub(usize::from(self.next))
    }

    /// Take the next unused ID.
    ///
    /// # Errors
    ///
    /// [`MolscopeError::CapacityExceeded`] once all 255 IDs are taken. The
    /// counter never wraps.
    pub fn allocate(&mut self) -> Result<PickId, MolscopeError> {
        let id = u8::try_from(self.next)
            .ok()
            .and_then(PickId::new)
            .ok_or(MolscopeError::CapacityExceeded {
                space: self.space,
                capacity: u32::from(MAX_PICK_ID),
            })?;
        self.next += 1;
        Ok(id)
    }
}

/// Encode an identifier (or `0` for background) as a picking-pass color.
#[must_use]
pub fn encode(id: u8) -> Vec3 {
    Vec3::new(f32::from(id) / 255.0, 0.0, 0.0)
}

/// 8-bit RGB form of [`encode`], as it lands in the framebuffer.
#[must_use]
pub fn encode_rgb8(id: u8) -> [u8; 3] {
    [id, 0, 0]
}

/// Convert a normalized color channel to its 8-bit framebuffer value,
/// rounding to nearest as unorm render targets do.
#[must_use]
pub fn quantize_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Recover an identifier from the sampled red-channel byte.
#[must_use]
pub fn decode(sampled: u8) -> u8 {
    sampled
}

/// Recover an identifier from a sampled RGB pixel.
#[must_use]
pub fn decode_rgb8(pixel: [u8; 3]) -> u8 {
    decode(pixel[0])
}
