pub mod generator;

pub use generator::VerificationCodeGenerator;
