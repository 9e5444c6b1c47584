// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// pipeline works with: image geometry, label arrays, pair
// batches, and the errors the data layer can raise.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - ndarray is allowed: the image and label arrays ARE
//     the domain of this crate
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Errors raised by loading, preprocessing and sampling
pub mod error;

// Height / width / channel layout of one image
pub mod geometry;

// Dense or one-hot label arrays
pub mod labels;

// Anchor / partner / match-label minibatch
pub mod pair_batch;

// Core abstractions (traits) that other layers implement
pub mod traits;
