pub mod verifier;

pub use verifier::TaskVerifier;
