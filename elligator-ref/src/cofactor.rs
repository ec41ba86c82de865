// -*- mode: rust; -*-
//
// This file is part of elligator-ref.
// See LICENSE for licensing information.

//! Cofactor-aware scalar multiplication, three ways.
//!
//! A representative only looks random if the point it encodes keeps a
//! random torsion component, so the vector harness multiplies by
//! "clamped scalar plus `c` times the low-order point" rather than
//! clearing the cofactor.  The same value is computed here through
//! three structurally different constructions:
//!
//! 1. a single Montgomery ladder on a *dirty* base point (one that
//!    generates the whole curve, not just the prime-order subgroup),
//!    with the torsion class folded into the scalar;
//! 2. two Edwards scalar multiplications (main term and low-order
//!    term) and a point addition;
//! 3. the same main term with the low-order component looked up by
//!    table selection or coordinate rotation instead of multiplied.
//!
//! [`co_scalarmult`] runs all three and refuses to return anything if
//! they disagree.  A disagreement can only mean the parameters or the
//! formulas are wrong, and vectors computed from a wrong model are
//! worse than no vectors at all.

use num_bigint::BigUint;

use crate::constants::CurveParams;
use crate::edwards::{add_lop, select_lop};
use crate::errors::ConsistencyError;
use crate::montgomery::MontgomeryPoint;
use crate::scalar::clamp;

/// Method 1: fold `c` into the scalar and run one ladder on the dirty
/// base.
///
/// `(c mod cofactor) * order` is zero on the prime-order component and
/// shifts the torsion component into class `c`, because the dirty base
/// was built as `base + co_clear * lop` with
/// `co_clear * order = 1 (mod cofactor)`.
pub fn ladder_scalarmult(scalar: &BigUint, c: u64, curve: &CurveParams) -> MontgomeryPoint {
    let co_cleared = BigUint::from(c % curve.cofactor) * &curve.order;
    let combined = clamp(scalar, curve) + co_cleared;
    curve.mt_base_dirty.scalar_mul(&combined, curve)
}

/// Method 2: Edwards double scalar multiplication,
/// `clamp(scalar) * base + c * lop`, converted to Montgomery.
pub fn double_scalarmult(scalar: &BigUint, c: u64, curve: &CurveParams) -> MontgomeryPoint {
    let main = curve
        .ed_base
        .scalar_mul(&clamp(scalar, curve), curve)
        .to_birational(curve);
    // The low-order multiples carry a zero coordinate, so adding one
    // is independent of d; this addition is valid even when `main`
    // just crossed the isogeny onto the birationally-equivalent curve.
    let low = curve
        .lop
        .scalar_mul(&BigUint::from(c % curve.cofactor), curve);
    main.add(&low, curve).to_montgomery(curve)
}

/// Method 3: like method 2, but the low-order component comes from a
/// constant-time-shaped lookup instead of a scalar multiplication:
/// table selection on the cofactor-8 curve, coordinate rotation on the
/// cofactor-4 curve.
pub fn table_scalarmult(scalar: &BigUint, c: u64, curve: &CurveParams) -> MontgomeryPoint {
    let c = c % curve.cofactor;
    let main = curve
        .ed_base
        .scalar_mul(&clamp(scalar, curve), curve)
        .to_birational(curve);
    let combined = match curve.cofactor {
        8 => main.add(&select_lop(c, curve), curve),
        4 => add_lop(&main, c),
        _ => unreachable!("unsupported cofactor"),
    };
    combined.to_montgomery(curve)
}

/// Compute the cofactored scalar multiplication through all three
/// methods and cross-check them.
///
/// Returns the common Montgomery \\(u\\), or a [`ConsistencyError`]
/// naming the first pair of methods that disagreed.  Divergence is
/// fatal by design; there is nothing to retry.
pub fn co_scalarmult(
    scalar: &BigUint,
    c: u64,
    curve: &CurveParams,
) -> Result<MontgomeryPoint, ConsistencyError> {
    let by_ladder = ladder_scalarmult(scalar, c, curve);
    let by_double = double_scalarmult(scalar, c, curve);
    let by_table = table_scalarmult(scalar, c, curve);

    if by_ladder != by_double {
        return Err(ConsistencyError::ScalarMult);
    }
    if by_double != by_table {
        return Err(ConsistencyError::LowOrderSelection);
    }
    Ok(by_ladder)
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{CURVE25519, CURVE448, CURVE448_DIRECT};

    use num_bigint::RandBigInt;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn three_methods_agree() {
        let mut rng = ChaCha20Rng::seed_from_u64(10);
        for curve in [&*CURVE25519, &*CURVE448, &*CURVE448_DIRECT] {
            for c in 0..curve.cofactor {
                let scalar = rng.gen_biguint(curve.field.nb_bytes as u64 * 8);
                co_scalarmult(&scalar, c, curve)
                    .expect("scalar multiplication methods disagree");
            }
        }
    }

    #[test]
    fn torsion_class_changes_the_result() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for curve in [&*CURVE25519, &*CURVE448] {
            let scalar = rng.gen_biguint(curve.field.nb_bytes as u64 * 8);
            let clean = co_scalarmult(&scalar, 0, curve).unwrap();
            let dirty = co_scalarmult(&scalar, 1, curve).unwrap();
            assert_ne!(clean, dirty);
        }
    }

    #[test]
    fn cofactor_class_is_reduced() {
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let curve = &*CURVE25519;
        let scalar = rng.gen_biguint(256);
        let a = co_scalarmult(&scalar, 3, curve).unwrap();
        let b = co_scalarmult(&scalar, 3 + curve.cofactor, curve).unwrap();
        assert_eq!(a, b);
    }
}
