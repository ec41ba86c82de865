// -*- mode: rust; -*-
//
// This file is part of elligator-ref.
// See LICENSE for licensing information.

//! The Elligator2 maps between field elements and curve points.
//!
//! The direct map sends any field element \\(r\\) (the
//! "representative") to a point \\((u, v)\\) of the Montgomery curve;
//! it is total, with \\(0 \mapsto (0, 0)\\).  The reverse map recovers
//! a non-negative representative from \\((u, \mathrm{sign}(v))\\) when
//! one exists; roughly half the curve points have none, which is an
//! expected outcome (`None`), not a failure.
//!
//! Each direction exists twice: a straightforward reference formula,
//! and the optimized formula a production implementation uses, which
//! fuses the inversion and square root into one `inv_sqrt` call and
//! repairs the result with the per-curve `ufactor`/`vfactor`
//! constants.  The `*_checked` entry points run both and treat any
//! disagreement as fatal.

use subtle::Choice;

use crate::constants::CurveParams;
use crate::errors::ConsistencyError;
use crate::field::FieldElement;
use crate::traits::Select;

/// Reference direct map: representative \\(r\\) to curve point
/// \\((u, v)\\).
///
/// Computes \\(w = -A/(1 + Z r^2)\\), decides with the Legendre symbol
/// whether \\(w\\) or \\(-w-A\\) is the \\(u\\)-coordinate, and takes
/// the corresponding square root for \\(v\\).  Always succeeds.
pub fn map_to_point(r: &FieldElement, curve: &CurveParams) -> (FieldElement, FieldElement) {
    let field = r.field();
    let one = field.one();
    let a = &curve.montgomery_a;
    let z = &curve.elligator.z;

    let w = &(-a) / &(&one + &(z * &r.square()));
    let w2 = w.square();
    let e = (&(&(&w2 * &w) + &(a * &w2)) + &w).legendre();

    // u = e*w - (1-e)*(A/2): w for squares, -w - A for non-squares,
    // and the A/2 midpoint in the e = 0 corner.
    let u = &(&e * &w) - &(&(&one - &e) * &a.floor_div(2));
    let u2 = u.square();
    let v = &(-&e) * &(&(&(&u2 * &u) + &(a * &u2)) + &u).sqrt();
    (u, v)
}

/// Fast direct map, same mapping as [`map_to_point`].
///
/// Straight-line transcription of the explicit formulas: one
/// `inv_sqrt`, no division, sign and twist bookkeeping through the
/// precomputed `ufactor`/`vfactor`.
pub fn map_to_point_fast(r: &FieldElement, curve: &CurveParams) -> (FieldElement, FieldElement) {
    let field = r.field();
    let one = field.one();
    let a = &curve.montgomery_a;
    let ell = &curve.elligator;

    let r2 = r.square();
    let t1 = &r2 * &ell.z;
    let v0 = &t1 + &one;
    let t2 = v0.square();
    let t3 = &(&(&a.square() * &t1) - &t2) * a;
    let (isr, is_square) = (&t3 * &(&t2 * &v0)).inv_sqrt();

    let u = &r2 * &ell.ufactor;
    let v = r * &ell.vfactor;
    let u = FieldElement::select(&u, &one, is_square);
    let v = FieldElement::select(&v, &one, is_square);

    let v = &(&v * &t3) * &isr;
    let u = &(&(&(&u * &(-a)) * &t3) * &t2) * &isr.square();
    let flip = is_square ^ Choice::from(v.is_negative() as u8);
    let neg_v = -&v;
    let v = FieldElement::select(&v, &neg_v, flip);
    (u, v)
}

/// Reference reverse map: the representative of \\((u, v)\\), or
/// `None` when the point has none.
///
/// Fails exactly when \\(u = -A\\) or \\(-Zu(u+A)\\) is a non-square.
/// The `v_is_negative` flag selects which of the two candidate roots
/// belongs to the caller's \\(v\\); the result is always non-negative.
pub fn point_to_representative(
    u: &FieldElement,
    v_is_negative: bool,
    curve: &CurveParams,
) -> Option<FieldElement> {
    let a = &curve.montgomery_a;
    let z = &curve.elligator.z;

    if u == &(-a) || !(&(&(-z) * u) * &(u + a)).is_square() {
        return None;
    }

    let sq1 = (&(-u) / &(z * &(u + a))).sqrt();
    let sq2 = (&(-&(u + a)) / &(z * u)).sqrt();
    let rep = FieldElement::select(&sq1, &sq2, Choice::from(v_is_negative as u8));
    Some(rep.abs())
}

/// Fast reverse map, same mapping as [`point_to_representative`].
///
/// One `inv_sqrt` of \\(-Zu(u+A)\\) doubles as the squareness test and
/// the shared factor of both candidate roots; \\(u = 0\\) (where the
/// product degenerates to zero) is let through explicitly and lands on
/// representative zero.
pub fn point_to_representative_fast(
    u: &FieldElement,
    v_is_negative: bool,
    curve: &CurveParams,
) -> Option<FieldElement> {
    let a = &curve.montgomery_a;
    let z = &curve.elligator.z;

    let t = u + a;
    let r = &(&(-z) * u) * &t;
    let (isr, is_square) = r.inv_sqrt();
    if !(bool::from(is_square) || u.is_zero()) {
        return None;
    }

    let sel = FieldElement::select(u, &t, Choice::from(v_is_negative as u8));
    Some((&sel * &isr).abs())
}

/// Direct map through both formulas, erroring if they disagree.
pub fn map_to_point_checked(
    r: &FieldElement,
    curve: &CurveParams,
) -> Result<(FieldElement, FieldElement), ConsistencyError> {
    let reference = map_to_point(r, curve);
    let fast = map_to_point_fast(r, curve);
    if reference != fast {
        return Err(ConsistencyError::Elligator2Map);
    }
    Ok(reference)
}

/// Reverse map through both formulas, erroring if they disagree
/// (including on whether a representative exists at all).
pub fn point_to_representative_checked(
    u: &FieldElement,
    v_is_negative: bool,
    curve: &CurveParams,
) -> Result<Option<FieldElement>, ConsistencyError> {
    let reference = point_to_representative(u, v_is_negative, curve);
    let fast = point_to_representative_fast(u, v_is_negative, curve);
    if reference != fast {
        return Err(ConsistencyError::Elligator2Map);
    }
    Ok(reference)
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::constants::{CURVE25519, CURVE448};

    use num_bigint::RandBigInt;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    /// Sample a non-negative field element the way the vector harness
    /// does.
    fn random_representative(
        rng: &mut ChaCha20Rng,
        curve: &'static CurveParams,
    ) -> FieldElement {
        curve
            .field
            .element(rng.gen_biguint_below(&curve.field.p))
            .abs()
    }

    #[test]
    fn zero_maps_to_the_origin() {
        for curve in [&*CURVE25519, &*CURVE448] {
            let zero = curve.field.zero();
            let (u, v) = map_to_point_checked(&zero, curve).unwrap();
            assert!(u.is_zero());
            assert!(v.is_zero());
        }
    }

    #[test]
    fn origin_reverse_maps_to_zero() {
        for curve in [&*CURVE25519, &*CURVE448] {
            let zero = curve.field.zero();
            let rep = point_to_representative_checked(&zero, false, curve).unwrap();
            assert_eq!(rep, Some(curve.field.zero()));
        }
    }

    #[test]
    fn reference_and_fast_maps_agree() {
        let mut rng = ChaCha20Rng::seed_from_u64(13);
        for curve in [&*CURVE25519, &*CURVE448] {
            for _ in 0..24 {
                let r = random_representative(&mut rng, curve);
                let (u, v) = map_to_point_checked(&r, curve).unwrap();
                // The image is a genuine curve point: v^2 = u^3+Au^2+u.
                let a = &curve.montgomery_a;
                let u2 = u.square();
                let rhs = &(&(&u2 * &u) + &(a * &u2)) + &u;
                assert_eq!(v.square(), rhs);
            }
        }
    }

    #[test]
    fn map_is_even() {
        let mut rng = ChaCha20Rng::seed_from_u64(14);
        for curve in [&*CURVE25519, &*CURVE448] {
            for _ in 0..8 {
                let r = random_representative(&mut rng, curve);
                let minus_r = -&r;
                assert_eq!(map_to_point(&r, curve), map_to_point(&minus_r, curve));
                assert_eq!(
                    map_to_point_fast(&r, curve),
                    map_to_point_fast(&minus_r, curve)
                );
            }
        }
    }

    #[test]
    fn roundtrip_recovers_absolute_value() {
        let mut rng = ChaCha20Rng::seed_from_u64(15);
        for curve in [&*CURVE25519, &*CURVE448] {
            for _ in 0..16 {
                let r = random_representative(&mut rng, curve);
                let (u, v) = map_to_point_checked(&r, curve).unwrap();
                let rep = point_to_representative_checked(&u, v.is_negative(), curve)
                    .unwrap()
                    .expect("image of the direct map must reverse-map");
                assert_eq!(rep, r.abs());
            }
        }
    }

    #[test]
    fn reverse_then_direct_is_identity_up_to_sign() {
        let mut rng = ChaCha20Rng::seed_from_u64(16);
        for curve in [&*CURVE25519, &*CURVE448] {
            let mut mapped = 0;
            while mapped < 8 {
                let r = random_representative(&mut rng, curve);
                let (u, _v) = map_to_point_checked(&r, curve).unwrap();
                for v_is_negative in [false, true] {
                    if let Some(rep) =
                        point_to_representative_checked(&u, v_is_negative, curve).unwrap()
                    {
                        let (u2, v2) = map_to_point_checked(&rep, curve).unwrap();
                        assert_eq!(u2, u);
                        assert_eq!(v2.is_negative(), v_is_negative);
                        mapped += 1;
                    }
                }
            }
        }
    }

    #[test]
    fn some_points_have_no_representative() {
        let mut rng = ChaCha20Rng::seed_from_u64(17);
        for curve in [&*CURVE25519, &*CURVE448] {
            let a = &curve.montgomery_a;
            let mut unmapped = 0;
            let mut tried = 0;
            while unmapped == 0 && tried < 4096 {
                tried += 1;
                let u = curve.field.element(rng.gen_biguint_below(&curve.field.p));
                let u2 = u.square();
                let rhs = &(&(&u2 * &u) + &(a * &u2)) + &u;
                if !rhs.is_square() {
                    continue; // not a curve point
                }
                if point_to_representative_checked(&u, false, curve)
                    .unwrap()
                    .is_none()
                {
                    // Both signs must fail together.
                    assert!(point_to_representative_checked(&u, true, curve)
                        .unwrap()
                        .is_none());
                    unmapped += 1;
                }
            }
            assert!(unmapped > 0, "elligator2 looked surjective on {}", curve.name);
        }
    }
}
