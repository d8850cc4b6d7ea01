use crate::e2e::helpers;

use helpers::fixtures::{encode_payload, pcm_ramp, request};
use helpers::{gemini_mocks, TestContext, TEST_API_KEY};
use pretty_assertions::assert_eq;
use serde_json::json;
use voice_studio::domain::session::SessionError;
use voice_studio::domain::speech::{Gender, SpeechError};
use voice_studio::error::AppError;
use wiremock::matchers::{header, method};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn it_should_synthesize_and_make_the_audio_current() {
    let ctx = TestContext::new().await.unwrap();
    let pcm = pcm_ramp(480);
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm)).await;

    let outcome = ctx
        .session
        .speak(&request("Hello from the studio.", Gender::Female))
        .await
        .unwrap();

    assert!(outcome.uri.starts_with("blob:"), "URI should be an ephemeral handle");
    assert_eq!(outcome.size, 44 + pcm.len());
    assert!(!outcome.truncated);
    assert_eq!(ctx.session.current_uri().await, Some(outcome.uri.clone()));

    let history = ctx.session.history().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, outcome.entry_id);
    assert_eq!(history[0].text_excerpt, "Hello from the studio.");
    assert_eq!(history[0].gender, Gender::Female);
}

#[tokio::test]
async fn it_should_send_the_instruction_and_voice_to_the_provider() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm_ramp(8))).await;

    ctx.session
        .speak(&request("Good morning.", Gender::Male))
        .await
        .unwrap();

    let requests = ctx.provider_requests().await;
    assert_eq!(requests.len(), 1, "exactly one provider call per speak");

    let expected = json!({
        "contents": [{
            "parts": [{
                "text": "Read the following text in English with a standard accent as a male. \
                         The tone should be natural and proper. Good morning."
            }]
        }],
        "generationConfig": {
            "responseModalities": ["AUDIO"],
            "speechConfig": {
                "voiceConfig": {
                    "prebuiltVoiceConfig": { "voiceName": "Puck" }
                }
            }
        }
    });
    assert_eq!(requests[0], expected);
}

#[tokio::test]
async fn it_should_use_the_female_voice_for_female_requests() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm_ramp(8))).await;

    ctx.session
        .speak(&request("Bonjour.", Gender::Female))
        .await
        .unwrap();

    let requests = ctx.provider_requests().await;
    let voice = &requests[0]["generationConfig"]["speechConfig"]["voiceConfig"]
        ["prebuiltVoiceConfig"]["voiceName"];
    assert_eq!(voice, "Kore");
}

#[tokio::test]
async fn it_should_truncate_long_text_and_report_it() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm_ramp(8))).await;

    let long_text = "é".repeat(6000);
    let outcome = ctx
        .session
        .speak(&request(&long_text, Gender::Male))
        .await
        .unwrap();

    assert!(outcome.truncated);

    let requests = ctx.provider_requests().await;
    let instruction = requests[0]["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap();
    let submitted = instruction.rsplit(' ').next().unwrap();
    assert_eq!(submitted.chars().count(), 5000);

    let history = ctx.session.history().await;
    assert_eq!(history[0].text_excerpt.chars().count(), 100);
}

#[tokio::test]
async fn it_should_not_call_the_provider_without_a_credential() {
    let ctx = TestContext::with_api_key(None).await.unwrap();
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let err = ctx
        .session
        .speak(&request("Hello.", Gender::Male))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Speech(SpeechError::MissingCredential)));
    assert!(matches!(AppError::from(err), AppError::Configuration(_)));
    assert!(ctx.session.history().await.is_empty());
    assert_eq!(ctx.session.current_uri().await, None);
}

#[tokio::test]
async fn it_should_report_missing_audio_when_content_is_filtered() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_filtered(&ctx.server).await;

    let err = ctx
        .session
        .speak(&request("Something the filter dislikes.", Gender::Female))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Speech(SpeechError::NoAudio)));
    assert!(err.to_string().contains("content filters"));
    assert!(ctx.session.history().await.is_empty());
}

#[tokio::test]
async fn it_should_surface_provider_errors_without_retrying() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_status(&ctx.server, 500, "upstream exploded").await;

    let err = ctx
        .session
        .speak(&request("Hello.", Gender::Male))
        .await
        .unwrap_err();

    match &err {
        SessionError::Speech(SpeechError::Provider(message)) => {
            assert!(message.contains("500"), "status missing from: {}", message);
            assert!(message.contains("upstream exploded"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(matches!(AppError::from(err), AppError::Synthesis(_)));
    assert_eq!(ctx.provider_requests().await.len(), 1);
}

#[tokio::test]
async fn it_should_reject_undecodable_audio_payloads() {
    let ctx = TestContext::new().await.unwrap();
    gemini_mocks::mount_audio(&ctx.server, "!!! not base64 !!!").await;

    let err = ctx
        .session
        .speak(&request("Hello.", Gender::Male))
        .await
        .unwrap_err();

    assert!(matches!(err, SessionError::Audio(_)));
    assert!(ctx.session.history().await.is_empty());
    assert_eq!(ctx.session.current_uri().await, None);
}

#[tokio::test]
async fn it_should_authenticate_with_the_api_key_header() {
    let ctx = TestContext::new().await.unwrap();
    Mock::given(method("POST"))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(gemini_mocks::audio_response(&encode_payload(&pcm_ramp(4)))),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.session
        .speak(&request("Hello.", Gender::Male))
        .await
        .unwrap();
}

#[tokio::test]
async fn it_should_save_the_current_audio_as_a_wav_file() {
    let ctx = TestContext::new().await.unwrap();
    let pcm = pcm_ramp(240);
    gemini_mocks::mount_audio(&ctx.server, &encode_payload(&pcm)).await;

    ctx.session
        .speak(&request("Save me.", Gender::Female))
        .await
        .unwrap();

    let out_dir = tempfile::tempdir().unwrap();
    let path = ctx.session.save_current(out_dir.path()).await.unwrap();
    assert_eq!(path.file_name().unwrap(), "synthesized_voice.wav");

    let bytes = tokio::fs::read(&path).await.unwrap();
    assert_eq!(&bytes[0..4], b"RIFF");
    assert_eq!(&bytes[8..12], b"WAVE");
    assert_eq!(u32::from_le_bytes(bytes[24..28].try_into().unwrap()), 24_000);
    assert_eq!(u16::from_le_bytes(bytes[22..24].try_into().unwrap()), 1);
    assert_eq!(u16::from_le_bytes(bytes[34..36].try_into().unwrap()), 16);
    assert_eq!(&bytes[44..], pcm.as_slice());
}

#[tokio::test]
async fn it_should_refuse_to_save_when_nothing_is_loaded() {
    let ctx = TestContext::new().await.unwrap();
    let out_dir = tempfile::tempdir().unwrap();

    let err = ctx.session.save_current(out_dir.path()).await.unwrap_err();

    assert!(matches!(err, SessionError::NothingLoaded));
}
