// -*- mode: rust; -*-
//
// This file is part of gen-vectors.
// See LICENSE for licensing information.

//! The vector classes and their text format.
//!
//! Every value is serialized as little-endian hex, padded to the
//! field's byte width, with a trailing `:` delimiter.  Booleans are
//! `01:`/`00:`, an absent value is a bare `:`, and the reverse-map
//! class marks unmappable points with an `ff:` status line.  Values
//! within one vector are separated by single newlines, vectors by
//! blank lines.
//!
//! Sampling is deterministic: every class reseeds its own ChaCha
//! stream with the fixed constant 12345, so the emitted files are
//! reproducible run over run.  Any consistency failure inside the
//! core aborts vector generation; a vector file computed from a
//! self-contradictory model must never be written.

use anyhow::{bail, Result};

use elligator_ref::cofactor::co_scalarmult;
use elligator_ref::elligator2::{map_to_point_checked, point_to_representative_checked};
use elligator_ref::{CurveParams, EdwardsPoint, FieldElement};

use num_bigint::{BigUint, RandBigInt};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Fixed seed; every vector class starts its own stream from it.
const SEED: u64 = 12345;

/// Little-endian hex with trailing delimiter, `nb_bytes` wide.
fn int_hex(n: &BigUint, nb_bytes: usize) -> String {
    let mut bytes = n.to_bytes_le();
    bytes.resize(nb_bytes, 0);
    format!("{}:", hex::encode(bytes))
}

fn fe_hex(fe: &FieldElement) -> String {
    format!("{}:", hex::encode(fe.encode_le()))
}

fn bool_hex(b: bool) -> String {
    String::from(if b { "01:" } else { "00:" })
}

/// A non-negative field element, the canonical form of a
/// representative.
fn random_representative(rng: &mut ChaCha20Rng, curve: &'static CurveParams) -> FieldElement {
    let bound = &curve.field.p - 1u32;
    curve.field.element(rng.gen_biguint_below(&bound)).abs()
}

/// A uniform curve point, by rejection on the curve equation.
fn random_curve_point(rng: &mut ChaCha20Rng, curve: &'static CurveParams) -> FieldElement {
    loop {
        let bound = &curve.field.p - 1u32;
        let u = curve.field.element(rng.gen_biguint_below(&bound));
        let a = &curve.montgomery_a;
        let u2 = u.square();
        let rhs = &(&(&u2 * &u) + &(a * &u2)) + &u;
        if rhs.is_square() {
            return u;
        }
    }
}

/// Direct-map vectors: `r`, `u`, `v` per vector.
///
/// Anchored by representative zero mapping to the point \\((0, 0)\\),
/// followed by 256 random representatives.
pub fn direct_map(curve: &'static CurveParams) -> Result<String> {
    let mut rng = ChaCha20Rng::seed_from_u64(SEED);
    let zero = curve.field.zero();
    let mut blocks = vec![[fe_hex(&zero), fe_hex(&zero), fe_hex(&zero)].join("\n")];

    for _ in 0..256 {
        let r = random_representative(&mut rng, curve);
        let (u, v) = map_to_point_checked(&r, curve)?;
        blocks.push([fe_hex(&r), fe_hex(&u), fe_hex(&v)].join("\n"));
    }
    Ok(blocks.join("\n\n"))
}

/// Reverse-map vectors: `u`, `sign(v)`, status, representative.
///
/// Anchored by the origin mapping to representative zero; then 16
/// unmappable points (status `ff:`, empty representative) and 256
/// mappable points, each under both signs of \\(v\\).
pub fn reverse_map(curve: &'static CurveParams) -> Result<String> {
    let mut rng = ChaCha20Rng::seed_from_u64(SEED);
    let zero = curve.field.zero();
    let mut blocks = vec![[
        fe_hex(&zero),
        bool_hex(false),
        String::from("00:"),
        fe_hex(&zero),
    ]
    .join("\n")];

    // Some points that do not map.
    for _ in 0..16 {
        let mut u = random_curve_point(&mut rng, curve);
        while point_to_representative_checked(&u, false, curve)?.is_some() {
            u = random_curve_point(&mut rng, curve);
        }
        if point_to_representative_checked(&u, true, curve)?.is_some() {
            bail!("reverse map should fail for both signs of v");
        }
        for v_is_negative in [false, true] {
            blocks.push(
                [
                    fe_hex(&u),
                    bool_hex(v_is_negative),
                    String::from("ff:"),
                    String::from(":"),
                ]
                .join("\n"),
            );
        }
    }

    // Lots of points that do map.
    for _ in 0..256 {
        let mut u = random_curve_point(&mut rng, curve);
        let mut rep = point_to_representative_checked(&u, false, curve)?;
        while rep.is_none() {
            u = random_curve_point(&mut rng, curve);
            rep = point_to_representative_checked(&u, false, curve)?;
        }
        let rep_pos = rep.expect("loop exits on Some");
        let Some(rep_neg) = point_to_representative_checked(&u, true, curve)? else {
            bail!("reverse map should succeed for both signs of v");
        };
        blocks.push(
            [
                fe_hex(&u),
                bool_hex(false),
                String::from("00:"),
                fe_hex(&rep_pos),
            ]
            .join("\n"),
        );
        blocks.push(
            [
                fe_hex(&u),
                bool_hex(true),
                String::from("00:"),
                fe_hex(&rep_neg),
            ]
            .join("\n"),
        );
    }
    Ok(blocks.join("\n\n"))
}

/// Cofactored scalar-multiplication vectors: scalar, Montgomery `u`.
///
/// The torsion class cycles through `i mod cofactor` and is folded
/// into the scalar's cleared low bits, exactly as a clamping caller
/// would see it.
pub fn scalarmult(curve: &'static CurveParams) -> Result<String> {
    let mut rng = ChaCha20Rng::seed_from_u64(SEED);
    let cofactor = BigUint::from(curve.cofactor);
    let mut blocks = Vec::new();

    for i in 0..64 {
        let c = i % curve.cofactor;
        let raw = rng.gen_biguint(curve.field.nb_bytes as u64 * 8);
        let scalar = (&raw / &cofactor) * &cofactor + BigUint::from(c);
        let result = co_scalarmult(&scalar, c, curve)?;
        blocks.push(
            [
                int_hex(&scalar, curve.field.nb_bytes),
                fe_hex(result.u()),
            ]
            .join("\n"),
        );
    }
    Ok(blocks.join("\n\n"))
}

/// Map a uniform 256-bit integer to a compressed Edwards point,
/// libsodium style (curve25519 only): Elligator direct map, Edwards
/// lift with the requested sign of `x`, cofactor multiplication, and
/// `y`-with-sign-bit encoding.
fn map_to_curve_point(random: &BigUint, curve: &'static CurveParams) -> Result<BigUint> {
    let y_sign = (random >> 255u32).bit(0);
    let r = random % (BigUint::from(1u32) << 255u32);

    let (u, _) = map_to_point_checked(&curve.field.element(r), curve)?;
    let point = EdwardsPoint::from_montgomery(&u, curve);
    let (mut x, y) = (point.X.clone(), point.Y.clone());
    // "Negative" means odd in this encoding.
    if x.value().bit(0) != y_sign {
        x = -&x;
    }

    let eight = BigUint::from(8u32);
    let cleared = EdwardsPoint::from_affine(x, y).scalar_mul(&eight, curve);
    let (x, y) = cleared.to_affine();

    let x_sign = x.value().bit(0);
    Ok(y.value() + (BigUint::from(x_sign as u8) << 255u32))
}

/// Hash-to-point vectors: 256-bit input, encoded Edwards point.
pub fn hash_to_point(curve: &'static CurveParams) -> Result<String> {
    let mut rng = ChaCha20Rng::seed_from_u64(SEED);
    let mut blocks = Vec::new();

    for _ in 0..64 {
        let r = rng.gen_biguint(256);
        let encoded = map_to_curve_point(&r, curve)?;
        blocks.push([int_hex(&r, 32), int_hex(&encoded, 32)].join("\n"));
    }
    Ok(blocks.join("\n\n"))
}
