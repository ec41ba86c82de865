// -*- mode: rust; -*-
//
// This file is part of elligator-ref.
// See LICENSE for licensing information.

//! Point arithmetic on the (twisted) Edwards form of the curve.
//!
//! The same code serves both configurations: Edwards25519 is twisted
//! (\\(a = -1\\)) with an 8-element torsion subgroup, Edwards448 is
//! untwisted (\\(a = 1\\)) with a 4-element one.  Points are projective
//! triples \\((X : Y : Z)\\) with \\(x = X/Z\\), \\(y = Y/Z\\) on
//! \\(a x^2 + y^2 = 1 + d x^2 y^2\\).
//!
//! Scalar multiplication re-validates the curve equation after every
//! step.  That check is a debug assertion: it exists to catch formula
//! or parameter bugs immediately while the vectors are being computed,
//! not to guard a production hot path.
//!
//! # Montgomery conversion
//!
//! The birational map to the Montgomery \\(u\\)-line differs per
//! family: \\((Z+Y)/(Z-Y)\\) for the twisted curve,
//! \\((Y+Z)/(Y-Z)\\) for the untwisted one.  Ed448 adds a wrinkle:
//! the standard curve (RFC 8032) is not the one birationally
//! equivalent to the X448 Montgomery curve but a 4-isogeny of it, so
//! points computed on the standard curve pass through
//! [`EdwardsPoint::to_birational`] before conversion.

#![allow(non_snake_case)]

use num_bigint::BigUint;
use subtle::Choice;

use crate::constants::{CurveParams, IsogenyParams};
use crate::field::{FieldElement, FieldParams};
use crate::montgomery::MontgomeryPoint;
use crate::scalar::bits_be;
use crate::traits::{Identity, Select};

/// A point on the (twisted) Edwards curve, in projective coordinates.
#[derive(Clone, Debug)]
pub struct EdwardsPoint {
    /// Projective X; \\(x = X/Z\\).
    pub X: FieldElement,
    /// Projective Y; \\(y = Y/Z\\).
    pub Y: FieldElement,
    /// Projective Z.
    pub Z: FieldElement,
}

impl PartialEq for EdwardsPoint {
    /// Projective equality: \\(X_1 Z_2 = X_2 Z_1\\) and
    /// \\(Y_1 Z_2 = Y_2 Z_1\\).
    fn eq(&self, other: &EdwardsPoint) -> bool {
        &self.X * &other.Z == &other.X * &self.Z
            && &self.Y * &other.Z == &other.Y * &self.Z
    }
}

impl Eq for EdwardsPoint {}

impl Identity for EdwardsPoint {
    fn identity(field: &'static FieldParams) -> EdwardsPoint {
        EdwardsPoint {
            X: field.zero(),
            Y: field.one(),
            Z: field.one(),
        }
    }
}

impl Select for EdwardsPoint {
    fn select(a: &EdwardsPoint, b: &EdwardsPoint, choice: Choice) -> EdwardsPoint {
        EdwardsPoint {
            X: FieldElement::select(&a.X, &b.X, choice),
            Y: FieldElement::select(&a.Y, &b.Y, choice),
            Z: FieldElement::select(&a.Z, &b.Z, choice),
        }
    }

    fn swap(a: &mut EdwardsPoint, b: &mut EdwardsPoint, choice: Choice) {
        FieldElement::swap(&mut a.X, &mut b.X, choice);
        FieldElement::swap(&mut a.Y, &mut b.Y, choice);
        FieldElement::swap(&mut a.Z, &mut b.Z, choice);
    }
}

impl EdwardsPoint {
    /// Lift an affine point to projective coordinates.
    pub fn from_affine(x: FieldElement, y: FieldElement) -> EdwardsPoint {
        let one = x.field().one();
        EdwardsPoint { X: x, Y: y, Z: one }
    }

    /// Dehomogenize to affine \\((x, y)\\).
    pub fn to_affine(&self) -> (FieldElement, FieldElement) {
        let zinv = self.Z.invert();
        (&self.X * &zinv, &self.Y * &zinv)
    }

    /// Unified projective point addition.
    ///
    /// Affine formula, with \\(t = d x_1 x_2 y_1 y_2\\):
    /// \\(x_3 = (x_1 y_2 + x_2 y_1) / (1 + t)\\),
    /// \\(y_3 = (y_1 y_2 - a x_1 x_2) / (1 - t)\\).
    /// Carrying a projective \\(Z\\) trades the two divisions for
    /// multiplications.
    pub fn add(&self, other: &EdwardsPoint, curve: &CurveParams) -> EdwardsPoint {
        let (x1, y1, z1) = (&self.X, &self.Y, &self.Z);
        let (x2, y2, z2) = (&other.X, &other.Y, &other.Z);
        let a = &curve.ed_a;
        let d = &curve.ed_d;

        let denum = &(&(d * &(x1 * x2)) * y1) * y2;
        let t1 = z1 * z2;
        let t2 = t1.square();
        let xt = &t1 * &(&(x1 * y2) + &(x2 * y1));
        let yt = &t1 * &(&(y1 * y2) - &(a * &(x1 * x2)));
        let zx = &t2 + &denum;
        let zy = &t2 - &denum;

        EdwardsPoint {
            X: &xt * &zy,
            Y: &yt * &zx,
            Z: &zx * &zy,
        }
    }

    /// Double-and-add scalar multiplication, most significant bit
    /// first, from an identity accumulator.
    ///
    /// Every intermediate point is checked against the curve equation
    /// (debug builds); a violation is a formula bug or an off-curve
    /// input, never a recoverable condition.
    pub fn scalar_mul(&self, scalar: &BigUint, curve: &CurveParams) -> EdwardsPoint {
        let field = self.X.field();
        let mut acc = EdwardsPoint::identity(field);
        for bit in bits_be(scalar) {
            acc = acc.add(&acc, curve);
            debug_assert!(acc.is_on_curve(curve), "doubling left the curve");
            if bit {
                acc = acc.add(self, curve);
                debug_assert!(acc.is_on_curve(curve), "addition left the curve");
            }
        }
        acc
    }

    /// Check the projective curve equation
    /// \\(a X^2 Z^2 + Y^2 Z^2 = Z^4 + d X^2 Y^2\\).
    pub fn is_on_curve(&self, curve: &CurveParams) -> bool {
        let xx = self.X.square();
        let yy = self.Y.square();
        let zz = self.Z.square();
        let lhs = &(&curve.ed_a * &(&xx * &zz)) + &(&yy * &zz);
        let rhs = &zz.square() + &(&curve.ed_d * &(&xx * &yy));
        lhs == rhs
    }

    /// The Montgomery \\(u\\)-coordinate of this point.
    ///
    /// \\(u = (Z+Y)/(Z-Y)\\) on the twisted family,
    /// \\(u = (Y+Z)/(Y-Z)\\) on the untwisted one.  The \\(v\\)
    /// coordinate is never needed by the vector harness.
    pub fn to_montgomery(&self, curve: &CurveParams) -> MontgomeryPoint {
        let u = if curve.is_twisted() {
            &(&self.Z + &self.Y) / &(&self.Z - &self.Y)
        } else {
            &(&self.Y + &self.Z) / &(&self.Y - &self.Z)
        };
        MontgomeryPoint(u)
    }

    /// Lift a Montgomery \\(u\\)-coordinate to an Edwards point.
    ///
    /// Derives \\(y\\) from the family's sign convention and recovers
    /// \\(x = \sqrt{(y^2-1)/(d y^2 - a)}\\) as the non-negative root.
    /// The radicand is a square exactly when `u` lies on the curve;
    /// callers only invoke this on curve points.
    pub fn from_montgomery(u: &FieldElement, curve: &CurveParams) -> EdwardsPoint {
        let field = u.field();
        let one = field.one();
        let y = if curve.is_twisted() {
            &(u - &one) / &(u + &one)
        } else {
            &(u + &one) / &(u - &one)
        };
        let yy = y.square();
        let x = (&(&yy - &one) / &(&(&curve.ed_d * &yy) - &curve.ed_a)).sqrt();
        EdwardsPoint::from_affine(x, y)
    }

    /// Map a point of the standard Ed448 curve to the curve
    /// birationally equivalent to the Montgomery model (a 4-isogeny).
    /// Identity when the configuration already lives on the birational
    /// curve.
    pub fn to_birational(&self, curve: &CurveParams) -> EdwardsPoint {
        match &curve.isogeny {
            None => self.clone(),
            Some(iso) => self.isogeny_map(iso),
        }
    }

    fn isogeny_map(&self, iso: &IsogenyParams) -> EdwardsPoint {
        let field = self.X.field();
        let two = field.from_u64(2);
        let xx = self.X.square();
        let yy = self.Y.square();
        let du = &(&two * &self.Z.square()) - &(&xx + &yy);
        let dv = &yy - &xx;

        EdwardsPoint {
            X: &(&(&dv * &self.X) * &self.Y) * &(&two * &iso.sqrt_d),
            Y: &(&yy + &xx) * &du,
            Z: &du * &dv,
        }
    }
}

/// Select the `i`-th multiple of the order-8 low-order point by table
/// lookup (curves with cofactor 8).
///
/// The eight torsion points cycle through \\(\pm\\{0, x_8, \sqrt{-1},
/// x_8\\}\\) in \\(x\\) and \\(\pm\\{1, y_8, 0, y_8\\}\\) in \\(y\\),
/// so three conditional moves per coordinate replace a scalar
/// multiplication.
pub fn select_lop(i: u64, curve: &CurveParams) -> EdwardsPoint {
    debug_assert_eq!(curve.cofactor, 8);
    let field = curve.field;

    fn select(x: &FieldElement, k: &FieldElement, i: u64) -> FieldElement {
        let field = x.field();
        let mut r = field.zero();
        r = FieldElement::select(&r, k, Choice::from(((i >> 1) & 1) as u8));
        r = FieldElement::select(&r, x, Choice::from((i & 1) as u8));
        let neg = -&r;
        FieldElement::select(&r, &neg, Choice::from(((i >> 2) & 1) as u8))
    }

    let x = select(&curve.lop.X, &field.sqrt_m1(), i);
    let y = select(&curve.lop.Y, &field.one(), i + 2);
    EdwardsPoint::from_affine(x, y)
}

/// Add the `i`-th multiple of the order-4 low-order point \\((1, 0)\\)
/// to `point` by coordinate rotation (curves with cofactor 4).
///
/// Equivalent to a point addition, because
/// \\((x, y) \mapsto (y, -x)\\) *is* addition of \\((1, 0)\\) on an
/// untwisted Edwards curve; the torsion points' zero coordinates make
/// the unified formula collapse to this d-free rotation.
pub fn add_lop(point: &EdwardsPoint, i: u64) -> EdwardsPoint {
    let low = Choice::from((i & 1) as u8);
    let high = Choice::from(((i >> 1) & 1) as u8);

    let mut x = point.X.clone();
    let mut y = point.Y.clone();
    FieldElement::swap(&mut x, &mut y, low);
    let neg_x = -&x;
    let x = FieldElement::select(&x, &neg_x, high);
    let neg_y = -&y;
    let y = FieldElement::select(&y, &neg_y, low ^ high);

    EdwardsPoint {
        X: x,
        Y: y,
        Z: point.Z.clone(),
    }
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

    fn curves() -> [&'static CurveParams; 3] {
        [&CURVE25519, &CURVE448, &CURVE448_DIRECT]
    }

    #[test]
    fn base_points_are_on_curve() {
        for curve in curves() {
            assert!(curve.ed_base.is_on_curve(curve));
            assert!(curve.lop.is_on_curve(curve));
        }
    }

    #[test]
    fn identity_is_neutral() {
        for curve in curves() {
            let id = EdwardsPoint::identity(curve.field);
            assert!(id.is_on_curve(curve));
            assert_eq!(curve.ed_base.add(&id, curve), curve.ed_base);
        }
    }

    #[test]
    fn low_order_point_has_cofactor_order() {
        for curve in curves() {
            let cofactor = BigUint::from(curve.cofactor);
            let id = EdwardsPoint::identity(curve.field);
            assert_eq!(curve.lop.scalar_mul(&cofactor, curve), id);
            assert_ne!(
                curve.lop.scalar_mul(&(cofactor >> 1), curve),
                id,
                "low order point's order divides cofactor/2"
            );
        }
    }

    #[test]
    fn select_lop_matches_scalar_mul() {
        let curve = &*CURVE25519;
        for i in 0..curve.cofactor {
            let expected = curve.lop.scalar_mul(&BigUint::from(i), curve);
            assert_eq!(select_lop(i, curve), expected, "lop table entry {i}");
        }
    }

    #[test]
    fn add_lop_matches_addition() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        for curve in [&*CURVE448, &*CURVE448_DIRECT] {
            let k = rng.gen_biguint(250);
            let point = curve.ed_base.scalar_mul(&k, curve).to_birational(curve);
            for i in 0..curve.cofactor {
                let torsion = curve.lop.scalar_mul(&BigUint::from(i), curve);
                let slow = point.add(&torsion, curve);
                assert_eq!(add_lop(&point, i), slow, "lop rotation {i}");
            }
        }
    }

    #[test]
    fn montgomery_conversion_roundtrip() {
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        for curve in [&*CURVE25519, &*CURVE448_DIRECT] {
            for _ in 0..4 {
                let k = rng.gen_biguint(curve.field.msb);
                let point = curve.ed_base.scalar_mul(&k, curve);
                let u = point.to_montgomery(curve);
                let lifted = EdwardsPoint::from_montgomery(u.u(), curve);
                assert!(lifted.is_on_curve(curve));
                // x-only conversion loses the sign of x.
                assert_eq!(lifted.to_montgomery(curve), u);
                let (_, y) = point.to_affine();
                let (_, ly) = lifted.to_affine();
                assert_eq!(y, ly);
            }
        }
    }

    #[test]
    fn isogeny_and_direct_bases_agree_in_montgomery() {
        let iso = CURVE448
            .ed_base
            .to_birational(&CURVE448)
            .to_montgomery(&CURVE448);
        let direct = CURVE448_DIRECT
            .ed_base
            .to_montgomery(&CURVE448_DIRECT);
        assert_eq!(iso, direct);
        assert_eq!(iso, CURVE448.mt_base);
    }
}
