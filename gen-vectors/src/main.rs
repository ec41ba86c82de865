// -*- mode: rust; -*-
//
// This file is part of gen-vectors.
// See LICENSE for licensing information.

//! Deterministic test-vector generator.
//!
//! ```text
//! gen-vectors <curve> <vectors>
//! ```
//!
//! writes one class of vectors for one curve configuration to stdout.
//! Vector generation aborts with a diagnostic if any of the core's
//! cross-checked computations disagree; a vector file must never be
//! produced from an incoherent model.

use anyhow::{anyhow, ensure, Result};
use clap::{Parser, ValueEnum};

use elligator_ref::CurveParams;

mod vectors;

#[derive(Parser)]
#[command(
    name = "gen-vectors",
    about = "Generate cross-checked test vectors for X25519/X448 Elligator2 implementations"
)]
struct Args {
    /// Curve configuration: curve25519 or curve448.
    curve: String,

    /// Which class of vectors to generate.
    #[arg(value_enum)]
    vectors: VectorClass,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VectorClass {
    /// Elligator2 direct map: representative to point.
    Direct,
    /// Elligator2 reverse map: point and sign to representative.
    Reverse,
    /// Cofactored scalar multiplication.
    Scalarmult,
    /// Uniform 256-bit integer to encoded Edwards point
    /// (curve25519 only).
    HashToPoint,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let curve = CurveParams::by_name(&args.curve)
        .ok_or_else(|| anyhow!("unknown curve {:?} (expected curve25519 or curve448)", args.curve))?;

    let output = match args.vectors {
        VectorClass::Direct => vectors::direct_map(curve)?,
        VectorClass::Reverse => vectors::reverse_map(curve)?,
        VectorClass::Scalarmult => vectors::scalarmult(curve)?,
        VectorClass::HashToPoint => {
            ensure!(
                curve.name == "curve25519",
                "hash-to-point vectors are only defined for curve25519"
            );
            vectors::hash_to_point(curve)?
        }
    };

    println!("{output}");
    Ok(())
}
