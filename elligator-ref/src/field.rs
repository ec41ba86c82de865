// -*- mode: rust; -*-
//
// This file is part of elligator-ref.
// See LICENSE for licensing information.

//! Field arithmetic modulo a configurable prime.
//!
//! Unlike a hardened X25519/X448 implementation, which bakes its prime
//! into fixed-width limb arithmetic, this crate computes over
//! arbitrary-precision integers so that the same code serves both the
//! 255-bit and the 448-bit field.  A [`FieldElement`] is a canonical
//! residue in \\([0, p)\\) together with a reference to the immutable
//! [`FieldParams`] describing its field; the reference is how we rule
//! out ever mixing the two configurations in one computation.
//!
//! None of this runs in constant time, and it does not try to.  The
//! output of this crate is *numbers*, checked for mutual consistency;
//! the constant-time discipline belongs to the production library these
//! numbers validate.

use num_bigint::BigUint;
use num_traits::Zero;
use subtle::Choice;

use crate::traits::Select;

/// How a field classifies elements as negative.
///
/// The two supported curves genuinely disagree here and no unifying
/// rule exists: Curve25519's convention puts the "negative" elements in
/// the upper half of the field, Curve448's uses plain parity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NegativeRule {
    /// Negative iff \\(x \in [(p+1)/2, p-1]\\), computed as "is
    /// \\(2x \bmod p\\) odd".
    UpperHalf,
    /// Negative iff \\(x\\) is odd.
    Odd,
}

/// The prime's residue class mod 8, which decides the square-root
/// algorithm.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PrimeShape {
    /// \\(p \equiv 5 \pmod 8\\); carries the precomputed non-negative
    /// \\(\sqrt{-1}\\) needed to fix up the candidate root.
    FiveMod8 {
        /// The non-negative square root of \\(-1\\) in this field.
        sqrt_m1: BigUint,
    },
    /// \\(p \equiv 3 \pmod 4\\); the candidate root is already
    /// principal.
    ThreeMod4,
}

/// Immutable description of one prime field.
///
/// Built once per supported curve and handed out as `&'static`; every
/// [`FieldElement`] carries one of these references.  The derived size
/// constants (`msb`, `nb_bytes`, `pad_bits`) are shared read-only state
/// for scalar clamping and serialization.
#[derive(Clone, Debug)]
pub struct FieldParams {
    /// The field prime \\(p\\).
    pub p: BigUint,
    /// Index of the highest set bit of \\(p\\) (bit length minus one).
    pub msb: u64,
    /// Bytes needed to hold a canonical residue.
    pub nb_bytes: usize,
    /// Spare bits in the top byte of the encoding.
    pub pad_bits: u32,
    /// Square-root algorithm selector.
    pub shape: PrimeShape,
    /// Sign-classification rule.
    pub negative: NegativeRule,
}

impl FieldParams {
    /// Build the parameters for the prime `p`.
    ///
    /// Derives the size constants and, for \\(p \equiv 5 \pmod 8\\),
    /// the square root of \\(-1\\) as \\(|2^{(p-1)/4}|\\).
    pub fn new(p: BigUint, negative: NegativeRule) -> FieldParams {
        let msb = p.bits() - 1;
        let nb_bytes = ((msb + 1 + 7) / 8) as usize;
        let pad_bits = (nb_bytes as u64 * 8 - msb - 1) as u32;

        let shape = if (&p % 8u32) == BigUint::from(5u32) {
            let exp = (&p - 1u32) / 4u32;
            let root = BigUint::from(2u32).modpow(&exp, &p);
            let sqrt_m1 = if raw_is_negative(&root, &p, negative) {
                &p - root
            } else {
                root
            };
            PrimeShape::FiveMod8 { sqrt_m1 }
        } else {
            debug_assert_eq!(&p % 4u32, BigUint::from(3u32));
            PrimeShape::ThreeMod4
        };

        FieldParams {
            p,
            msb,
            nb_bytes,
            pad_bits,
            shape,
            negative,
        }
    }

    /// Construct an element of this field, reducing `value` mod \\(p\\).
    pub fn element(&'static self, value: BigUint) -> FieldElement {
        FieldElement {
            value: value % &self.p,
            field: self,
        }
    }

    /// Construct an element from a small unsigned integer.
    pub fn from_u64(&'static self, value: u64) -> FieldElement {
        self.element(BigUint::from(value))
    }

    /// Construct an element from a small signed integer.
    pub fn from_i64(&'static self, value: i64) -> FieldElement {
        if value < 0 {
            -&self.from_u64(value.unsigned_abs())
        } else {
            self.from_u64(value as u64)
        }
    }

    /// The additive identity.
    pub fn zero(&'static self) -> FieldElement {
        self.from_u64(0)
    }

    /// The multiplicative identity.
    pub fn one(&'static self) -> FieldElement {
        self.from_u64(1)
    }

    /// The element \\(p - 1\\).
    pub fn minus_one(&'static self) -> FieldElement {
        self.from_i64(-1)
    }

    /// The non-negative \\(\sqrt{-1}\\), for fields that have one.
    ///
    /// # Panics
    ///
    /// Panics when \\(p \equiv 3 \pmod 4\\) (where \\(-1\\) is not a
    /// square).
    pub fn sqrt_m1(&'static self) -> FieldElement {
        match &self.shape {
            PrimeShape::FiveMod8 { sqrt_m1 } => self.element(sqrt_m1.clone()),
            PrimeShape::ThreeMod4 => panic!("-1 is not a square mod p = 3 mod 4"),
        }
    }
}

/// Sign classification over a raw residue, used while the
/// `FieldParams` under construction cannot hand out elements yet.
fn raw_is_negative(value: &BigUint, p: &BigUint, rule: NegativeRule) -> bool {
    match rule {
        NegativeRule::UpperHalf => ((value * 2u32) % p).bit(0),
        NegativeRule::Odd => value.bit(0),
    }
}

/// An element of the field \\(\mathbb F\_p\\), held canonically in
/// \\([0, p)\\).
///
/// Arithmetic is provided on references, matching how the operands are
/// usually borrowed out of points:
///
/// ```
/// use elligator_ref::constants::FIELD25519;
/// let two = FIELD25519.from_u64(2);
/// let four = &two * &two;
/// assert_eq!(four, FIELD25519.from_u64(4));
/// ```
#[derive(Clone, Debug)]
pub struct FieldElement {
    value: BigUint,
    field: &'static FieldParams,
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &FieldElement) -> bool {
        debug_assert!(
            core::ptr::eq(self.field, other.field),
            "compared field elements from different fields"
        );
        self.value == other.value
    }
}

impl Eq for FieldElement {}

impl FieldElement {
    /// The canonical residue.
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The field this element belongs to.
    pub fn field(&self) -> &'static FieldParams {
        self.field
    }

    /// True iff this is the zero element.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// \\(x^2\\).
    pub fn square(&self) -> FieldElement {
        self.field.element((&self.value * &self.value) % &self.field.p)
    }

    /// \\(x^e \bmod p\\) for a non-negative integer exponent.
    pub fn pow(&self, exponent: &BigUint) -> FieldElement {
        self.field
            .element(self.value.modpow(exponent, &self.field.p))
    }

    /// Modular inverse by Fermat's little theorem, \\(x^{p-2}\\).
    ///
    /// Maps zero to zero.  That is deliberate and load-bearing: the
    /// ladder's identity extraction and the reverse Elligator map's
    /// \\(u = 0\\) case both rely on it.
    pub fn invert(&self) -> FieldElement {
        self.pow(&(&self.field.p - 2u32))
    }

    /// Floor division of the residue by a plain integer.
    ///
    /// This is integer division of the canonical value, not field
    /// division; the reference Elligator map uses it for its
    /// \\(A/2\\) term.
    pub fn floor_div(&self, divisor: u64) -> FieldElement {
        self.field.element(&self.value / BigUint::from(divisor))
    }

    /// True iff this element is classified negative under the field's
    /// rule.
    pub fn is_negative(&self) -> bool {
        raw_is_negative(&self.value, &self.field.p, self.field.negative)
    }

    /// Complement of [`is_negative`](Self::is_negative).
    pub fn is_positive(&self) -> bool {
        !self.is_negative()
    }

    /// The non-negative element among \\(\\{x, -x\\}\\).
    pub fn abs(&self) -> FieldElement {
        if self.is_positive() {
            self.clone()
        } else {
            -self
        }
    }

    /// Legendre symbol \\(\chi(x) = x^{(p-1)/2}\\), as a field element.
    ///
    /// Evaluates to the field's \\(0\\), \\(1\\) or \\(-1\\) according
    /// to whether \\(x\\) is zero, a nonzero square, or a non-square.
    pub fn legendre(&self) -> FieldElement {
        self.pow(&((&self.field.p - 1u32) / 2u32))
    }

    /// True iff \\(x\\) is a square (zero counts).
    pub fn is_square(&self) -> bool {
        let chi = self.legendre();
        chi.is_zero() || chi == self.field.one()
    }

    /// Non-negative (principal) square root.
    ///
    /// If `self` is not a square the result is unspecified; callers
    /// check [`is_square`](Self::is_square) first or use
    /// [`inv_sqrt`](Self::inv_sqrt), whose flag reports squareness.
    pub fn sqrt(&self) -> FieldElement {
        let f = self.field;
        match &f.shape {
            PrimeShape::FiveMod8 { .. } => {
                // Candidate root n^((p+3)/8); off by a factor of
                // sqrt(-1) for half of the squares.
                let root = self.pow(&((&f.p + 3u32) / 8u32));
                let fixup = &root * &f.sqrt_m1();
                let wrong = Choice::from((&root.square() != self) as u8);
                FieldElement::select(&root, &fixup, wrong).abs()
            }
            PrimeShape::ThreeMod4 => {
                // n^((p+1)/4) is already a root; make it principal.
                let root = self.pow(&((&f.p + 1u32) / 4u32));
                let negative = Choice::from(root.is_negative() as u8);
                let negated = -&root;
                FieldElement::select(&root, &negated, negative)
            }
        }
    }

    /// Inverse square root with a squareness flag.
    ///
    /// Returns \\((0, 1)\\) for zero, \\((\sqrt{1/x}, 1)\\) for a
    /// nonzero square, and a \\(\sqrt{-1}\\)-twisted value with flag
    /// \\(0\\) for a non-square.  The candidate is *not* guaranteed
    /// non-negative; callers fold the flag into their own sign and
    /// twist bookkeeping.
    pub fn inv_sqrt(&self) -> (FieldElement, Choice) {
        let f = self.field;
        match &f.shape {
            PrimeShape::FiveMod8 { .. } => {
                let isr = self.pow(&((&f.p - 5u32) / 8u32));
                let quartic = self * &isr.square();
                let minus_one = f.minus_one();
                let minus_sqrt_m1 = -&f.sqrt_m1();
                let needs_twist =
                    Choice::from((quartic == minus_one || quartic == minus_sqrt_m1) as u8);
                let is_square = Choice::from(
                    (quartic == minus_one || quartic == f.one() || self.is_zero()) as u8,
                );
                let twisted = &isr * &f.sqrt_m1();
                (FieldElement::select(&isr, &twisted, needs_twist), is_square)
            }
            PrimeShape::ThreeMod4 => {
                let isr = self.pow(&((&f.p - 3u32) / 4u32));
                let legendre = self * &isr.square();
                let is_square = Choice::from((legendre != f.minus_one()) as u8);
                (isr, is_square)
            }
        }
    }

    /// Canonical little-endian encoding, `nb_bytes` wide.
    pub fn encode_le(&self) -> Vec<u8> {
        let mut bytes = self.value.to_bytes_le();
        bytes.resize(self.field.nb_bytes, 0);
        bytes
    }
}

// ------------------------------------------------------------------------
// Arithmetic on references
// ------------------------------------------------------------------------

impl<'a, 'b> core::ops::Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        debug_assert!(core::ptr::eq(self.field, rhs.field));
        self.field.element(&self.value + &rhs.value)
    }
}

impl<'a, 'b> core::ops::Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        debug_assert!(core::ptr::eq(self.field, rhs.field));
        // rhs is canonical, so adding p first keeps BigUint
        // subtraction from underflowing.
        self.field
            .element(&self.value + &self.field.p - &rhs.value)
    }
}

impl<'a, 'b> core::ops::Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        debug_assert!(core::ptr::eq(self.field, rhs.field));
        self.field.element(&self.value * &rhs.value)
    }
}

impl<'a, 'b> core::ops::Div<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;
    fn div(self, rhs: &'b FieldElement) -> FieldElement {
        self * &rhs.invert()
    }
}

impl<'a> core::ops::Neg for &'a FieldElement {
    type Output = FieldElement;
    fn neg(self) -> FieldElement {
        self.field.element(&self.field.p - &self.value)
    }
}

impl Select for FieldElement {
    fn select(a: &FieldElement, b: &FieldElement, choice: Choice) -> FieldElement {
        if bool::from(choice) {
            b.clone()
        } else {
            a.clone()
        }
    }

    fn swap(a: &mut FieldElement, b: &mut FieldElement, choice: Choice) {
        if bool::from(choice) {
            core::mem::swap(a, b);
        }
    }
}

// ------------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------------
