// End-to-end tests for the voice-studio core
//
// Each test gets its own TestContext: a wiremock server standing in for the
// Gemini speech API, a temporary history directory, and a SpeechSession
// wired exactly as the binary wires it (Config -> SpeechSession::from_config).
//
// Nothing here touches the real network.

mod test_history;
mod test_speech;
