// -*- mode: rust; -*-
//
// This file is part of elligator-ref.
// See LICENSE for licensing information.

//! Reference arithmetic for X25519/X448-style curves and the
//! Elligator2 encoding, built to *generate and cross-check test
//! vectors*, not to be deployed.
//!
//! A constant-time Diffie-Hellman library needs known-good numbers to
//! test against: field inversions, ladder outputs, Edwards additions,
//! cofactored scalar multiplications, Elligator representatives.  This
//! crate computes those numbers over arbitrary-precision integers, and
//! earns the right to call them "known good" by computing every
//! operation that matters through two or three structurally different
//! algorithms and refusing to emit anything when they disagree:
//!
//! * cofactored scalar multiplication runs as a dirty-base Montgomery
//!   ladder, as an Edwards double-scalar-multiplication, and as an
//!   Edwards multiplication with a table-selected torsion component
//!   ([`cofactor::co_scalarmult`]);
//! * both Elligator2 directions run through a reference formula and
//!   the fused `inv_sqrt` formula a real implementation uses
//!   ([`elligator2`]);
//! * the 448 curve's Edwards leg runs both on standard Ed448 (through
//!   the 4-isogeny) and directly on the birationally-equivalent curve
//!   ([`constants::CURVE448`], [`constants::CURVE448_DIRECT`]).
//!
//! Curve configurations are explicit values ([`constants::CurveParams`])
//! threaded through every call; there is no global curve state and no
//! way to silently mix the 255-bit and 448-bit fields.
//!
//! # Warning
//!
//! Nothing here is constant time, and nothing here handles secrets.
//! The branchless *shapes* (conditional swaps in the ladder, the
//! selection helpers in [`traits::Select`]) are preserved so that a
//! hardened port can keep the structure and replace the primitives.

pub mod cofactor;
pub mod constants;
pub mod edwards;
pub mod elligator2;
pub mod errors;
pub mod field;
pub mod montgomery;
pub mod scalar;
pub mod traits;

pub use crate::constants::{CurveParams, CURVE25519, CURVE448, CURVE448_DIRECT};
pub use crate::edwards::EdwardsPoint;
pub use crate::errors::ConsistencyError;
pub use crate::field::FieldElement;
pub use crate::montgomery::MontgomeryPoint;
