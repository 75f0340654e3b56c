//! Interrupt-safe millisecond clock arithmetic.
//!
//! The ESP32 high-resolution timer counts microseconds.  Converting to
//! milliseconds inside the edge ISR must not touch the FPU or call the
//! libgcc 64-bit divide routine, so the quotient is computed with the
//! shift-and-add reciprocal approximation from *Hacker's Delight* (10-23)
//! extended to 64 bits, followed by a single remainder correction.
//!
//! ```text
//!   µs ──div10──▶ 10µs ──div10──▶ 100µs ──div10──▶ ms
//! ```

/// Exact `n / 10` using only shifts, adds and one multiply-by-constant.
///
/// `q` approximates `n * 0.8 / 8` from below; the truncation error is at most
/// one, so the remainder `r` lies in `0..20` and `(r + 6) >> 4` is the
/// branch-free form of `r > 9`.
#[inline(always)]
pub const fn div10(n: u64) -> u64 {
    let mut q = (n >> 1) + (n >> 2);
    q += q >> 4;
    q += q >> 8;
    q += q >> 16;
    q += q >> 32;
    q >>= 3;
    let r = n - q * 10;
    q + ((r + 6) >> 4)
}

/// Exact `n / 1000`.
#[inline(always)]
pub const fn div1000(n: u64) -> u64 {
    div10(div10(div10(n)))
}

/// Convert a microsecond timestamp to milliseconds.
#[inline(always)]
pub const fn micros_to_millis(us: u64) -> u64 {
    div1000(us)
}
