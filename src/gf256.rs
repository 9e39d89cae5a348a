//! # GF(256) Arithmetic and Reed-Solomon Coding
//!
//! QR Codes protect their codewords with Reed-Solomon codes over GF(256)
//! built on the primitive polynomial `x^8 + x^4 + x^3 + x^2 + 1` (0x11D)
//! with generator element α = 2. This module provides:
//!
//! - log/exp lookup tables, built once at compile time and shared read-only
//! - polynomial helpers over the field
//! - [`ReedSolomonCoder`]: EC codeword generation for the encoder and
//!   syndrome-based error correction for the decoder
//!
//! ## Encoding
//!
//! The generator polynomial for `n` EC codewords is `∏ (x - α^i)` for
//! `i = 0..n`. Encoding is the remainder of `data·x^n` divided by the
//! generator; the remainder bytes are appended to the block.
//!
//! ## Decoding
//!
//! Decoding computes the 2t syndromes `r(α^i)`. A zero syndrome vector means
//! the block is clean. Otherwise Berlekamp-Massey produces the error-locator
//! polynomial, a Chien search finds the error positions, and Forney's formula
//! yields the error magnitudes. Up to `⌊n/2⌋` byte errors per block are
//! corrected silently; anything beyond that surfaces as
//! [`QrError::ReedSolomonFailure`].

use crate::error::QrError;

/// Exponential table: `EXP[i] = α^i`, doubled so products of two logs
/// (max 508) index without a modulo.
static EXP: [u8; 512] = build_exp_table();

/// Logarithm table: `LOG[α^i] = i`. `LOG[0]` is unused.
static LOG: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 512 {
        table[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= 0x11D;
        }
        i += 1;
    }
    table
}

const fn build_log_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        table[x as usize] = i as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= 0x11D;
        }
        i += 1;
    }
    table
}

/// Multiply two field elements.
#[inline]
pub(crate) fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        0
    } else {
        EXP[usize::from(LOG[usize::from(a)]) + usize::from(LOG[usize::from(b)])]
    }
}

/// Divide `a` by `b`. Division by zero is a caller bug.
#[inline]
pub(crate) fn div(a: u8, b: u8) -> u8 {
    assert!(b != 0, "GF(256) division by zero");
    if a == 0 {
        0
    } else {
        EXP[255 + usize::from(LOG[usize::from(a)]) - usize::from(LOG[usize::from(b)])]
    }
}

/// α raised to `power` (any non-negative exponent).
#[inline]
pub(crate) fn alpha_pow(power: usize) -> u8 {
    EXP[power % 255]
}

/// α raised to `-power`.
#[inline]
fn alpha_pow_neg(power: usize) -> u8 {
    EXP[(255 - power % 255) % 255]
}

/// Evaluate a polynomial with ascending coefficient order at `x`.
fn eval_ascending(poly: &[u8], x: u8) -> u8 {
    let mut result = 0u8;
    for &coef in poly.iter().rev() {
        result = mul(result, x) ^ coef;
    }
    result
}

/// Reed-Solomon coder for a fixed number of EC codewords per block.
///
/// The generator polynomial is precomputed at construction; the coder is
/// immutable afterwards and safe to share between callers.
#[derive(Debug, Clone)]
pub struct ReedSolomonCoder {
    /// Number of EC codewords this coder produces and consumes.
    ec_len: usize,
    /// Generator coefficients from `x^(ec_len-1)` down to `x^0`; the leading
    /// `x^ec_len` coefficient is an implicit 1.
    generator: Vec<u8>,
}

impl ReedSolomonCoder {
    /// Build a coder for `ec_len` EC codewords (1..=255).
    pub fn new(ec_len: usize) -> Self {
        assert!(
            (1..=255).contains(&ec_len),
            "EC codeword count out of range: {ec_len}"
        );
        // Start with the monic degree-0 polynomial, then multiply by
        // (x - α^i) for i = 0..ec_len.
        let mut generator = vec![0u8; ec_len - 1];
        generator.push(1);
        let mut root: u8 = 1;
        for _ in 0..ec_len {
            for j in 0..ec_len {
                generator[j] = mul(generator[j], root);
                if j + 1 < generator.len() {
                    generator[j] ^= generator[j + 1];
                }
            }
            root = mul(root, 0x02);
        }
        Self { ec_len, generator }
    }

    /// Number of EC codewords per block.
    pub fn ec_len(&self) -> usize {
        self.ec_len
    }

    /// Compute the EC codewords for `data`: the remainder of
    /// `data·x^ec_len` divided by the generator polynomial.
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let mut remainder = vec![0u8; self.ec_len];
        for &b in data {
            let factor = b ^ remainder.remove(0);
            remainder.push(0);
            for (x, &g) in remainder.iter_mut().zip(self.generator.iter()) {
                *x ^= mul(g, factor);
            }
        }
        remainder
    }

    /// Correct a full block (data codewords followed by `ec_len` EC
    /// codewords) in place. Returns the number of corrected byte errors.
    pub fn decode(&self, block: &mut [u8]) -> Result<usize, QrError> {
        let syndromes = self.syndromes(block);
        if syndromes.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        let sigma = berlekamp_massey(&syndromes);
        let degree = sigma.len() - 1;
        if degree > self.ec_len / 2 {
            return Err(QrError::ReedSolomonFailure(
                "error count exceeds correction capacity",
            ));
        }

        let positions = chien_search(&sigma, block.len());
        if positions.len() != degree {
            return Err(QrError::ReedSolomonFailure(
                "error locator roots do not match its degree",
            ));
        }

        // Error evaluator Ω(x) = S(x)·σ(x) mod x^ec_len.
        let mut omega = vec![0u8; self.ec_len];
        for (i, &s) in syndromes.iter().enumerate() {
            for (j, &c) in sigma.iter().enumerate() {
                if i + j < self.ec_len {
                    omega[i + j] ^= mul(s, c);
                }
            }
        }

        for &power in &positions {
            let x_inv = alpha_pow_neg(power);
            // Formal derivative of σ keeps only the odd-degree terms.
            let mut denom = 0u8;
            for (j, &c) in sigma.iter().enumerate() {
                if j % 2 == 1 {
                    denom ^= mul(c, alpha_pow_neg(power * (j - 1)));
                }
            }
            if denom == 0 {
                return Err(QrError::ReedSolomonFailure("zero Forney denominator"));
            }
            let magnitude = mul(alpha_pow(power), div(eval_ascending(&omega, x_inv), denom));
            block[block.len() - 1 - power] ^= magnitude;
        }

        if self.syndromes(block).iter().any(|&s| s != 0) {
            return Err(QrError::ReedSolomonFailure(
                "residual syndromes after correction",
            ));
        }
        Ok(degree)
    }

    /// Syndromes `r(α^i)` for `i = 0..ec_len`. `block[0]` is the coefficient
    /// of the highest power of x.
    fn syndromes(&self, block: &[u8]) -> Vec<u8> {
        (0..self.ec_len)
            .map(|i| {
                let x = alpha_pow(i);
                block.iter().fold(0u8, |acc, &b| mul(acc, x) ^ b)
            })
            .collect()
    }
}

/// Berlekamp-Massey: smallest LFSR (error-locator polynomial, ascending
/// coefficients, `σ[0] = 1`) generating the syndrome sequence.
fn berlekamp_massey(syndromes: &[u8]) -> Vec<u8> {
    let mut sigma = vec![1u8];
    let mut prev = vec![1u8];
    let mut length = 0usize;
    let mut shift = 1usize;
    let mut prev_discrepancy = 1u8;

    for i in 0..syndromes.len() {
        let mut delta = syndromes[i];
        for j in 1..=length.min(sigma.len() - 1) {
            delta ^= mul(sigma[j], syndromes[i - j]);
        }
        if delta == 0 {
            shift += 1;
            continue;
        }
        let scale = div(delta, prev_discrepancy);
        let mut next = sigma.clone();
        if next.len() < prev.len() + shift {
            next.resize(prev.len() + shift, 0);
        }
        for (j, &c) in prev.iter().enumerate() {
            next[j + shift] ^= mul(scale, c);
        }
        if 2 * length <= i {
            prev = sigma;
            prev_discrepancy = delta;
            length = i + 1 - length;
            shift = 1;
        } else {
            shift += 1;
        }
        sigma = next;
    }

    // Trim trailing zero coefficients so the degree is meaningful.
    while sigma.len() > 1 && *sigma.last().unwrap() == 0 {
        sigma.pop();
    }
    sigma
}

/// Find the term powers (exponents of x in the codeword polynomial) where
/// the locator has a root, i.e. the error positions.
fn chien_search(sigma: &[u8], block_len: usize) -> Vec<usize> {
    (0..block_len)
        .filter(|&power| eval_ascending(sigma, alpha_pow_neg(power)) == 0)
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
