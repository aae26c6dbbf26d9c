pub mod gemini;
pub mod opendota;

pub use gemini::GeminiClient;
pub use opendota::OpenDotaClient;
