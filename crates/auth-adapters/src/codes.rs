use argon2::password_hash::rand_core::{OsRng, RngCore};
use domains::OtpCodeGenerator;
use secrecy::SecretString;

/// Numeric login codes drawn from the OS random source.
pub struct OsRngCodeGenerator {
    digits: u32,
}

impl OsRngCodeGenerator {
    /// `digits` is clamped to 4..=9 so the code always fits a `u32`.
    pub fn new(digits: u32) -> Self {
        Self {
            digits: digits.clamp(4, 9),
        }
    }
}

impl Default for OsRngCodeGenerator {
    fn default() -> Self {
        Self::new(6)
    }
}

impl OtpCodeGenerator for OsRngCodeGenerator {
    fn generate(&self) -> SecretString {
        let value = uniform_below(10u32.pow(self.digits), || OsRng.next_u32());
        SecretString::from(format!("{value:0width$}", width = self.digits as usize))
    }
}

/// Uniform value in `0..bound`. Draws past the last whole multiple of
/// `bound` are discarded, otherwise the low codes would come up more often.
fn uniform_below(bound: u32, mut draw: impl FnMut() -> u32) -> u32 {
    let zone = (1u64 << 32) / u64::from(bound) * u64::from(bound);
    loop {
        let value = draw();
        if u64::from(value) < zone {
            return value % bound;
        }
    }
}
