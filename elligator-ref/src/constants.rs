// -*- mode: rust; -*-
//
// This file is part of elligator-ref.
// See LICENSE for licensing information.

//! The two supported curve configurations.
//!
//! Everything curve-specific lives in an immutable [`CurveParams`]
//! record built once and handed out as `&'static`: prime field, curve
//! constants for both models, order and cofactor, base points (clean
//! and "dirty"), the canonical low-order point, Elligator2 constants,
//! and, for the 448 curve, the isogeny data.  There is no
//! process-wide mutable state; code that needs a configuration takes
//! it as an argument.
//!
//! The 448 curve is exposed twice.  [`CURVE448`] computes on the
//! standard Ed448 curve of RFC 8032 and crosses the 4-isogeny before
//! any Montgomery conversion; [`CURVE448_DIRECT`] computes on the
//! (non-standard) Edwards curve birationally equivalent to the X448
//! Montgomery curve.  Both produce identical Montgomery output, and
//! the test suite holds them to that.

use lazy_static::lazy_static;
use num_bigint::BigUint;
use num_traits::One;

use crate::edwards::EdwardsPoint;
use crate::field::{FieldElement, FieldParams, NegativeRule};
use crate::montgomery::MontgomeryPoint;

/// Per-curve Elligator2 constants.
///
/// `Z` is the standard non-square; `ufactor = -Z * sqrt(-1)` (or
/// `-Z` where \\(-1\\) has no root) and `vfactor = sqrt(ufactor)`
/// absorb the twist bookkeeping of the fast formulas.
#[derive(Clone, Debug)]
pub struct ElligatorParams {
    /// The non-square \\(Z\\).
    pub z: FieldElement,
    /// Correction factor for the fast map's \\(u\\) output.
    pub ufactor: FieldElement,
    /// Correction factor for the fast map's \\(v\\) output.
    pub vfactor: FieldElement,
}

/// Data for the 4-isogeny between standard Ed448 and the curve
/// birationally equivalent to the Montgomery model.
#[derive(Clone, Debug)]
pub struct IsogenyParams {
    /// The principal-root candidate for the standard curve's \\(d\\).
    /// `d = -39081` is a non-square, so this is actually a root of
    /// \\(-d\\); the isogeny formulas want exactly this value.
    pub sqrt_d: FieldElement,
}

/// An immutable curve configuration.
#[derive(Clone, Debug)]
pub struct CurveParams {
    /// Configuration name, as selected on the command line.
    pub name: &'static str,
    /// The underlying prime field.
    pub field: &'static FieldParams,
    /// Montgomery constant \\(A\\) of \\(v^2 = u(u^2 + Au + 1)\\)
    /// (\\(B\\) is 1 for both supported curves).
    pub montgomery_a: FieldElement,
    /// Edwards constant \\(a\\): \\(-1\\) (twisted) or \\(1\\).
    pub ed_a: FieldElement,
    /// Edwards constant \\(d\\).
    pub ed_d: FieldElement,
    /// Order of the prime-order subgroup.
    pub order: BigUint,
    /// Size of the torsion subgroup.
    pub cofactor: u64,
    /// Multiplier with `co_clear * order = 1 (mod cofactor)`, used to
    /// build the dirty base point.
    pub co_clear: BigUint,
    /// Standard Montgomery base point (generates the prime-order
    /// subgroup).
    pub mt_base: MontgomeryPoint,
    /// Standard Edwards base point.
    pub ed_base: EdwardsPoint,
    /// "Dirty" base point `ed_base + co_clear * lop`, which generates
    /// the whole curve.
    pub mt_base_dirty: MontgomeryPoint,
    /// Canonical low-order point of order `cofactor`.
    pub lop: EdwardsPoint,
    /// Isogeny data when the Edwards arithmetic runs on standard
    /// Ed448 rather than the birationally-equivalent curve.
    pub isogeny: Option<IsogenyParams>,
    /// Elligator2 constants.
    pub elligator: ElligatorParams,
}

impl CurveParams {
    /// Whether the Edwards form is twisted (\\(a = -1\\)).
    ///
    /// This also selects the sign convention of the birational map to
    /// the Montgomery \\(u\\)-line.
    pub fn is_twisted(&self) -> bool {
        self.ed_a == self.field.minus_one()
    }

    /// Look a configuration up by its command-line name.
    pub fn by_name(name: &str) -> Option<&'static CurveParams> {
        match name {
            "curve25519" => Some(&CURVE25519),
            "curve448" => Some(&CURVE448),
            _ => None,
        }
    }
}

lazy_static! {
    /// The field of \\(2^{255} - 19\\), with the upper-half sign rule.
    pub static ref FIELD25519: FieldParams = FieldParams::new(
        (BigUint::one() << 255u32) - 19u32,
        NegativeRule::UpperHalf,
    );

    /// The field of \\(2^{448} - 2^{224} - 1\\), with the parity sign
    /// rule.
    pub static ref FIELD448: FieldParams = FieldParams::new(
        (BigUint::one() << 448u32) - (BigUint::one() << 224u32) - 1u32,
        NegativeRule::Odd,
    );

    /// Curve25519 / edwards25519.
    pub static ref CURVE25519: CurveParams = build_curve25519();

    /// Curve448 with Edwards arithmetic on standard Ed448 (RFC 8032),
    /// isogeny-corrected before Montgomery conversion.
    pub static ref CURVE448: CurveParams = build_curve448(true);

    /// Curve448 with Edwards arithmetic directly on the curve
    /// birationally equivalent to the Montgomery model.
    pub static ref CURVE448_DIRECT: CurveParams = build_curve448(false);
}

fn build_curve25519() -> CurveParams {
    let field: &'static FieldParams = &FIELD25519;
    let one = field.one();

    let montgomery_a = field.from_u64(486662);
    let ed_a = field.minus_one();
    let ed_d = &field.from_i64(-121665) / &field.from_u64(121666);

    let order = (BigUint::one() << 252u32)
        + BigUint::parse_bytes(b"27742317777372353535851937790883648493", 10).unwrap();
    let cofactor = 8u64;
    let co_clear = BigUint::from(5u32);

    // The order-8 point with both coordinates non-negative; the other
    // three differ only in coordinate signs.
    let sqrt_m1 = field.sqrt_m1();
    let lop_x = (&(&(&ed_d + &one).sqrt() + &one) / &ed_d).sqrt();
    let lop_y = &(-&lop_x) * &sqrt_m1;
    let lop = EdwardsPoint::from_affine(lop_x, lop_y);

    // Standard base point: y = 4/5, x recovered non-negative.
    let eby = &field.from_u64(4) / &field.from_u64(5);
    let ebx = (&(&eby.square() - &one) / &(&one + &(&ed_d * &eby.square()))).sqrt();
    let ed_base = EdwardsPoint::from_affine(ebx, eby);
    let mt_base = MontgomeryPoint(field.from_u64(9));

    let z = field.from_u64(2);
    let ufactor = &(-&z) * &sqrt_m1;
    let vfactor = ufactor.sqrt();

    let mut curve = CurveParams {
        name: "curve25519",
        field,
        montgomery_a,
        ed_a,
        ed_d,
        order,
        cofactor,
        co_clear,
        mt_base: mt_base.clone(),
        ed_base,
        mt_base_dirty: mt_base,
        lop,
        isogeny: None,
        elligator: ElligatorParams {
            z,
            ufactor,
            vfactor,
        },
    };

    // mt_base_dirty = ed_base + co_clear * lop, in Montgomery form.
    let lop_c = curve.lop.scalar_mul(&curve.co_clear, &curve);
    curve.mt_base_dirty = curve
        .ed_base
        .add(&lop_c, &curve)
        .to_montgomery(&curve);
    curve
}

fn build_curve448(isogeny: bool) -> CurveParams {
    let field: &'static FieldParams = &FIELD448;

    let montgomery_a = field.from_u64(156326);
    let ed_a = field.one();
    let ed_d = if isogeny {
        field.from_i64(-39081)
    } else {
        &field.from_u64(39082) / &field.from_u64(39081)
    };

    let order = (BigUint::one() << 446u32)
        - BigUint::parse_bytes(
            b"8335dc163bb124b65129c96fde933d8d723a70aadc873d6d54a7bb0d",
            16,
        )
        .unwrap();
    let cofactor = 4u64;
    let co_clear = &order % 4u32; // 3

    let mt_base = MontgomeryPoint(field.from_u64(5));
    // The order-4 points are (1, 0) and (-1, 0); (1, 0) is the
    // canonical pick.  It lies on both Edwards presentations.
    let lop = EdwardsPoint::from_affine(field.one(), field.zero());

    let z = field.minus_one();
    let ufactor = -&z; // 1
    let vfactor = ufactor.sqrt(); // -1 under the parity sign rule

    let mut curve = CurveParams {
        name: "curve448",
        field,
        montgomery_a,
        ed_a,
        ed_d: ed_d.clone(),
        order,
        cofactor,
        co_clear,
        mt_base: mt_base.clone(),
        ed_base: EdwardsPoint::from_affine(field.zero(), field.one()),
        mt_base_dirty: mt_base,
        lop,
        isogeny: if isogeny {
            Some(IsogenyParams {
                sqrt_d: ed_d.sqrt(),
            })
        } else {
            None
        },
        elligator: ElligatorParams {
            z,
            ufactor,
            vfactor,
        },
    };

    curve.ed_base = if isogeny {
        // RFC 8032 base point of standard Ed448.
        EdwardsPoint::from_affine(
            field.element(
                BigUint::parse_bytes(
                    b"224580040295924300187604334099896036246789641632564134246125461\
                      686950415467406032909029192869357953282578032075146446173674602\
                      635247710",
                    10,
                )
                .unwrap(),
            ),
            field.element(
                BigUint::parse_bytes(
                    b"298819210078481492676017930443930673437544040154080242095928241\
                      372331506189835876003536878655418784733982303233503462500531545\
                      062832660",
                    10,
                )
                .unwrap(),
            ),
        )
    } else {
        // Base point of the birationally-equivalent curve: the image
        // of u = 5.
        EdwardsPoint::from_montgomery(curve.mt_base.u(), &curve)
    };

    // mt_base_dirty = ed_base + co_clear * lop, computed on the
    // birational curve.
    let lop_c = curve.lop.scalar_mul(&curve.co_clear, &curve);
    curve.mt_base_dirty = curve
        .ed_base
        .to_birational(&curve)
        .add(&lop_c, &curve)
        .to_montgomery(&curve);
    curve
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn edwards_d_values() {
        // d * 121666 = -121665 on the 25519 curve.
        assert_eq!(
            &CURVE25519.ed_d * &FIELD25519.from_u64(121666),
            FIELD25519.from_i64(-121665)
        );
        // d * 39081 = 39082 on the direct 448 curve.
        assert_eq!(
            &CURVE448_DIRECT.ed_d * &FIELD448.from_u64(39081),
            FIELD448.from_u64(39082)
        );
        assert_eq!(CURVE448.ed_d, FIELD448.from_i64(-39081));
    }

    #[test]
    fn co_clear_inverts_the_order_mod_cofactor() {
        for curve in [&*CURVE25519, &*CURVE448] {
            let cofactor = BigUint::from(curve.cofactor);
            let product = (&curve.co_clear * &curve.order) % &cofactor;
            assert_eq!(product, BigUint::one());
        }
        assert_eq!(CURVE25519.co_clear, BigUint::from(5u32));
        assert_eq!(CURVE448.co_clear, BigUint::from(3u32));
    }

    #[test]
    fn base_points() {
        assert_eq!(CURVE25519.mt_base.u(), &FIELD25519.from_u64(9));
        assert_eq!(CURVE448.mt_base.u(), &FIELD448.from_u64(5));
        let (_, y) = CURVE25519.ed_base.to_affine();
        assert_eq!(y, &FIELD25519.from_u64(4) / &FIELD25519.from_u64(5));
    }

    #[test]
    fn twist_classification() {
        assert!(CURVE25519.is_twisted());
        assert!(!CURVE448.is_twisted());
        assert!(!CURVE448_DIRECT.is_twisted());
    }

    #[test]
    fn elligator_constants() {
        // Z must be a non-square in both fields.
        assert!(!CURVE25519.elligator.z.is_square());
        assert!(!CURVE448.elligator.z.is_square());
        // vfactor^2 = ufactor by construction.
        for curve in [&*CURVE25519, &*CURVE448] {
            assert_eq!(curve.elligator.vfactor.square(), curve.elligator.ufactor);
        }
        // The 448 factors collapse to 1 and -1.
        assert_eq!(CURVE448.elligator.ufactor, FIELD448.one());
        assert_eq!(CURVE448.elligator.vfactor, FIELD448.minus_one());
    }

    #[test]
    fn low_order_point_choice() {
        // The 25519 pick has both coordinates non-negative.
        assert!(CURVE25519.lop.X.is_positive());
        assert!(CURVE25519.lop.Y.is_positive());
        // The 448 pick is (1, 0).
        assert_eq!(CURVE448.lop.X, FIELD448.one());
        assert!(CURVE448.lop.Y.is_zero());
    }

    #[test]
    fn dirty_base_differs_from_base() {
        for curve in [&*CURVE25519, &*CURVE448, &*CURVE448_DIRECT] {
            assert_ne!(curve.mt_base_dirty, curve.mt_base);
        }
    }

    #[test]
    fn both_448_presentations_share_the_dirty_base() {
        assert_eq!(CURVE448.mt_base_dirty, CURVE448_DIRECT.mt_base_dirty);
    }

    #[test]
    fn known_derived_values_25519() {
        let fe = |s: &str| FIELD25519.element(BigUint::parse_bytes(s.as_bytes(), 10).unwrap());
        assert_eq!(
            FIELD25519.sqrt_m1(),
            fe("19681161376707505956807079304988542015446066515923890162744021073123829784752")
        );
        assert_eq!(
            CURVE25519.lop.X,
            fe("14399317868200118260347934320527232580618823971194345261214217575416788799818")
        );
        assert_eq!(
            CURVE25519.lop.Y,
            fe("2707385501144840649318225287225658788936804267575313519463743609750303402022")
        );
        let (x, _) = CURVE25519.ed_base.to_affine();
        assert_eq!(
            x,
            fe("15112221349535400772501151409588531511454012693041857206046113283949847762202")
        );
        assert_eq!(
            CURVE25519.mt_base_dirty.u(),
            &fe("53315860285189919089239497590085921958905393261225306850292972698633491875544")
        );
        assert_eq!(
            CURVE25519.elligator.ufactor,
            fe("18533721865243085798171333894366869895742859300972501694240749857708905250445")
        );
        assert_eq!(
            CURVE25519.elligator.vfactor,
            fe("19681161376707505956807079304988542015446066515923890162744021073123829784751")
        );
    }

    #[test]
    fn known_derived_values_448() {
        let fe = |s: &str| FIELD448.element(BigUint::parse_bytes(s.as_bytes(), 10).unwrap());
        assert_eq!(
            CURVE448.mt_base_dirty.u(),
            &fe("2849263909748372925809027410203524669341124121984925780474268869513510187990\
                 21072222778755168649464863442075375759097193918879068423582")
        );
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(CurveParams::by_name("curve25519").unwrap().name, "curve25519");
        assert_eq!(CurveParams::by_name("curve448").unwrap().name, "curve448");
        assert!(CurveParams::by_name("curve1174").is_none());
    }
}
