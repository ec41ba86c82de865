// -*- mode: rust; -*-
//
// This file is part of elligator-ref.
// See LICENSE for licensing information.

//! Traits shared by the field and point types.

use subtle::Choice;

use crate::field::FieldParams;

/// Types with a distinguished identity element.
///
/// Point identities depend on the active field, so unlike the usual
/// `identity()` constructor this one takes the field parameters
/// explicitly; nothing in this crate is reachable from global state.
pub trait Identity {
    /// The identity element for the given field.
    fn identity(field: &'static FieldParams) -> Self;
}

/// Conditional selection and swapping, keyed by a [`Choice`].
///
/// These mirror the constant-time primitives a production
/// implementation would use: `select` is `cmove` (picks `b` when the
/// flag is set), `swap` is `cswap`.  Only the *shape* is preserved
/// here; both are implemented with an ordinary branch, which is fine
/// for a reference that never touches secret data.  A constant-time
/// port must replace the bodies, not the call sites.
pub trait Select: Sized {
    /// Return `b` if `choice` is set, else `a`.
    fn select(a: &Self, b: &Self, choice: Choice) -> Self;

    /// Swap `a` and `b` if `choice` is set.
    fn swap(a: &mut Self, b: &mut Self, choice: Choice);
}
