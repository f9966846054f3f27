//! Color-ID picking.
//!
//! Every pickable object gets an identifier from an
//! [`IdentifierAllocator`] and is drawn in an offscreen pass with the flat
//! color [`encode`] produces. The byte sampled under the cursor is
//! [`decode`]d and resolved against the objects, either through a
//! [`PickMap`] or directly with [`resolve_selection`].

mod identifier;
mod pick_map;
mod selection;

pub use identifier::{
    decode, decode_rgb8, encode, encode_rgb8, quantize_channel,
    IdentifierAllocator, PickId, PickSpace, MAX_PICK_ID,
};
pub use pick_map::{PickMap, PickReadback, PickTarget};
pub use selection::{picking_mesh, resolve_selection, PickableObject, Selection};
