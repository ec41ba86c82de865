// -*- mode: rust; -*-
//
// This file is part of elligator-ref.
// See LICENSE for licensing information.

//! Scalar multiplication on the Montgomery form of the curve.
//!
//! To avoid notational confusion with the Edwards code, we use
//! variables \\(u, v\\) for Montgomery coordinates.  The curve is
//! \\(v^2 = u(u^2 + Au + 1)\\) (B is fixed to 1 for both supported
//! configurations), and the ladder is "x-only": it works on the
//! \\(u\\)-line, conflating \\((u, v)\\) with \\((u, -v)\\).
//!
//! The ladder's swap–update–swap structure is the point of this
//! module.  The update formulas contain no branch on the scalar bit;
//! the bit only drives the two conditional swaps around them.  A
//! constant-time port keeps exactly this shape and swaps in genuinely
//! branchless primitives.

// We allow non snake_case names because coordinates in projective space
// are traditionally denoted by the capitalisation of their respective
// counterparts in affine space.
#![allow(non_snake_case)]

use num_bigint::BigUint;
use subtle::Choice;

use crate::constants::CurveParams;
use crate::field::{FieldElement, FieldParams};
use crate::scalar::bits_be;
use crate::traits::{Identity, Select};

/// The affine \\(u\\)-coordinate of a point on the Montgomery curve
/// (or its twist; the \\(u\\)-line does not distinguish them).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MontgomeryPoint(pub FieldElement);

impl MontgomeryPoint {
    /// The \\(u\\)-coordinate.
    pub fn u(&self) -> &FieldElement {
        &self.0
    }

    /// Montgomery ladder: the \\(u\\)-coordinate of `scalar * self`.
    ///
    /// Scalar bits are consumed most significant first.  Each step
    /// conditionally swaps the accumulator pair on the bit, applies
    /// the fixed differential add/double formulas, and swaps back.
    /// Multiplying a point of order \\(n\\) by a multiple of \\(n\\)
    /// drives the accumulator to the projective identity \\((1 : 0)\\),
    /// which extracts to \\(u = 0\\) through `invert(0) = 0`.
    pub fn scalar_mul(&self, scalar: &BigUint, curve: &CurveParams) -> MontgomeryPoint {
        let field = self.0.field();
        let u = &self.0;
        let A = &curve.montgomery_a;
        let four = field.from_u64(4);

        let mut x0 = ProjectivePoint::identity(field);
        let mut x1 = ProjectivePoint {
            U: u.clone(),
            W: field.one(),
        };

        for bit in bits_be(scalar) {
            let choice = Choice::from(bit as u8);
            ProjectivePoint::swap(&mut x0, &mut x1, choice);

            // Differential addition of x0 and x1 (their difference is
            // the base point), and doubling of x0.
            let U1 = &(&x0.U * &x1.U) - &(&x0.W * &x1.W);
            let W1 = &(&x0.U * &x1.W) - &(&x0.W * &x1.U);
            let sum = ProjectivePoint {
                U: U1.square(),
                W: &W1.square() * u,
            };

            let UU = x0.U.square();
            let WW = x0.W.square();
            let UW = &x0.U * &x0.W;
            let dbl = ProjectivePoint {
                U: (&UU - &WW).square(),
                W: &(&four * &UW) * &(&(&UU + &(A * &UW)) + &WW),
            };

            x0 = dbl;
            x1 = sum;
            ProjectivePoint::swap(&mut x0, &mut x1, choice);
        }

        MontgomeryPoint(x0.to_affine())
    }
}

/// A point of the projective \\(u\\)-line, \\(u = U/W\\).
///
/// Only used inside the ladder; created from an affine point, consumed
/// bit by bit, discarded after the affine extraction.
#[derive(Clone, Debug)]
pub struct ProjectivePoint {
    /// Numerator.
    pub U: FieldElement,
    /// Denominator.
    pub W: FieldElement,
}

impl ProjectivePoint {
    /// Dehomogenize to the affine \\(u\\)-coordinate.
    ///
    /// The identity \\((1 : 0)\\) maps to \\(u = 0\\), the value the
    /// vector format uses for the point at infinity.
    pub fn to_affine(&self) -> FieldElement {
        &self.U / &self.W
    }
}

impl Identity for ProjectivePoint {
    fn identity(field: &'static FieldParams) -> ProjectivePoint {
        ProjectivePoint {
            U: field.one(),
            W: field.zero(),
        }
    }
}

impl Select for ProjectivePoint {
    fn select(a: &ProjectivePoint, b: &ProjectivePoint, choice: Choice) -> ProjectivePoint {
        ProjectivePoint {
            U: FieldElement::select(&a.U, &b.U, choice),
            W: FieldElement::select(&a.W, &b.W, choice),
        }
    }

    fn swap(a: &mut ProjectivePoint, b: &mut ProjectivePoint, choice: Choice) {
        FieldElement::swap(&mut a.U, &mut b.U, choice);
        FieldElement::swap(&mut a.W, &mut b.W, choice);
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
