// -*- mode: rust; -*-
//
// This file is part of elligator-ref.
// See LICENSE for licensing information.

//! Scalars and X25519/X448-style clamping.
//!
//! Scalars here are plain non-negative big integers; both ladders
//! consume them most-significant-bit first.  Clamping fixes the low
//! bits to a multiple of the cofactor and pins the top bit at the
//! field's `msb` position, so every clamped scalar has the same bit
//! length and a cleared cofactor component.

use num_bigint::BigUint;

use crate::constants::CurveParams;

/// Clamp a scalar for the given curve.
///
/// Clears the low `log2(cofactor)` bits, truncates below
/// \\(2^{msb}\\), then sets bit `msb`.
pub fn clamp(scalar: &BigUint, curve: &CurveParams) -> BigUint {
    let cofactor = BigUint::from(curve.cofactor);
    let high_bit = BigUint::from(1u32) << curve.field.msb;
    let clamped = scalar - (scalar % &cofactor);
    (clamped % &high_bit) + &high_bit
}

/// The bits of `scalar`, most significant first.
///
/// Zero yields an empty iterator; multiplying by zero is the identity
/// in both ladders without taking a single step.
pub fn bits_be(scalar: &BigUint) -> impl Iterator<Item = bool> + '_ {
    (0..scalar.bits()).rev().map(move |i| scalar.bit(i))
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
