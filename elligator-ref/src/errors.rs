// -*- mode: rust; -*-
//
// This file is part of elligator-ref.
// See LICENSE for licensing information.

//! Errors raised when independently derived formulas disagree.
//!
//! Every operation in this crate that matters is computed at least
//! twice, through structurally different algorithms.  A disagreement
//! means the mathematical model itself is wrong; there is nothing to
//! retry and no caller that can meaningfully recover, so these errors
//! exist only to carry a diagnostic up to the process boundary.
//!
//! "No Elligator representative exists for this point" is *not* an
//! error: that is an expected outcome of the reverse map, reported as
//! `Option::None`.

use thiserror::Error;

/// A consistency failure between two independent computations of the
/// same value, or a point that left its curve.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ConsistencyError {
    /// The ladder, double-scalar-multiplication and table methods of
    /// cofactored scalar multiplication did not all agree.
    #[error("incoherent scalar multiplication")]
    ScalarMult,

    /// The fast low-order-point selection disagreed with the generic
    /// low-order scalar multiplication.
    #[error("incoherent low order point selection")]
    LowOrderSelection,

    /// The reference and fast Elligator2 formulas disagreed.
    #[error("incoherent Elligator2 mapping")]
    Elligator2Map,

    /// A computed point does not satisfy its curve equation.
    #[error("point does not satisfy the curve equation")]
    OffCurve,
}
