use rand::rngs::OsRng;
use rand::Rng;

/// One-time numeric code generator for out-of-band verification.
///
/// Codes are drawn digit by digit from the operating system CSPRNG and are
/// fixed-width (leading zeros are kept). The generator holds no state about
/// codes it has already issued.
#[derive(Debug, Clone, Copy)]
pub struct VerificationCodeGenerator {
    length: usize,
}

impl VerificationCodeGenerator {
    pub const DEFAULT_LENGTH: usize = 6;

    /// Create a generator producing codes of `length` digits.
    ///
    /// A zero length is bumped to one digit.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.max(1),
        }
    }

    /// Number of digits in every generated code.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Generate a fresh code.
    pub fn generate(&self) -> String {
        let mut rng = OsRng;
        (0..self.length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }
}

impl Default for VerificationCodeGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LENGTH)
    }
}
