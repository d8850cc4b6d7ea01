pub mod gemini_synthesis_repository;
pub mod synthesis_repository;

pub use gemini_synthesis_repository::GeminiSynthesisRepository;
pub use synthesis_repository::SynthesisRepository;
