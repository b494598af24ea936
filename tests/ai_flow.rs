//! AI request flow: fingerprinting, response cache, inference fallback.

mod common;

use std::time::Duration;

use common::{harness, FakeInference, FakeSource};
use pulseboard::cache::{CacheStore, DEFAULT_INSTRUCTION};
use pulseboard::inference::InferenceOutput;
use pulseboard::{AiRequest, ErrorKind, Message};

#[tokio::test]
async fn repeated_prompt_calls_inference_once() {
    let h = harness(FakeSource::default(), FakeInference::answering("1. a\n2. b\n3. c"));
    let request = AiRequest::prompt("Summarize in 3 points.");

    let first = h.services.ai.respond(&request).await.unwrap();
    h.services.background.wait_idle().await;
    let second = h.services.ai.respond(&request).await.unwrap();

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(second.text, first.text);
    assert_eq!(second.fingerprint, first.fingerprint);
    assert_eq!(h.inference.calls(), 1);
}

#[tokio::test]
async fn message_form_and_prompt_form_are_cached_separately() {
    let h = harness(FakeSource::default(), FakeInference::answering("hello"));
    let as_messages = AiRequest::messages(vec![Message::user("hi")]);
    let as_prompt = AiRequest::prompt("hi");

    let a = h.services.ai.respond(&as_messages).await.unwrap();
    h.services.background.wait_idle().await;
    let b = h.services.ai.respond(&as_prompt).await.unwrap();
    h.services.background.wait_idle().await;

    assert_ne!(a.fingerprint, b.fingerprint);
    assert!(!b.cached);
    assert_eq!(h.inference.calls(), 2);
    assert_eq!(h.store.len().await, 2);
    for fp in [&a.fingerprint, &b.fingerprint] {
        assert!(h.store.get(&fp.cache_key()).await.unwrap().is_some());
    }
}

#[tokio::test]
async fn backend_receives_canonical_text() {
    let h = harness(FakeSource::default(), FakeInference::answering("ok"));
    let request = AiRequest::messages(vec![Message::system("be brief"), Message::user("why is the sky blue?")]);

    h.services.ai.respond(&request).await.unwrap();
    h.services.ai.respond(&AiRequest::default()).await.unwrap();

    let prompts = h.inference.prompts.lock().unwrap().clone();
    assert_eq!(
        prompts,
        vec![
            "system: be brief\nuser: why is the sky blue?".to_string(),
            DEFAULT_INSTRUCTION.to_string(),
        ]
    );
}

#[tokio::test]
async fn fragment_output_is_normalized_before_caching() {
    let output = InferenceOutput::Fragments(vec!["Hel".into(), "lo".into()]);
    let h = harness(FakeSource::default(), FakeInference::answering(output));
    let request = AiRequest::prompt("greet me");

    let reply = h.services.ai.respond(&request).await.unwrap();
    assert_eq!(reply.text, "Hello");
    h.services.background.wait_idle().await;

    let cached = h.services.ai.respond(&request).await.unwrap();
    assert!(cached.cached);
    assert_eq!(cached.text, "Hello");
}

#[tokio::test]
async fn inference_failure_propagates_without_cache_write() {
    let h = harness(FakeSource::default(), FakeInference::failing(503));

    let err = h.services.ai.respond(&AiRequest::prompt("anything")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Inference);
    assert_eq!(err.kind().http_status(), 502);

    h.services.background.wait_idle().await;
    assert!(h.store.is_empty().await);
    assert_eq!(h.services.cache.stats().writes, 0);
}

#[tokio::test(start_paused = true)]
async fn slow_inference_times_out() {
    let h = harness(FakeSource::default(), FakeInference::slow(Duration::from_secs(60)));

    let err = h.services.ai.respond(&AiRequest::prompt("take your time")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InferenceTimeout);
    assert!(err.to_string().contains("30s"));

    h.services.background.wait_idle().await;
    assert!(h.store.is_empty().await);
}

#[tokio::test]
async fn malformed_body_is_rejected_before_inference() {
    let h = harness(FakeSource::default(), FakeInference::answering("unused"));

    let err = AiRequest::from_slice(br#"{"messages":[{"role":"robot","content":"hi"}]}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedRequest);
    assert_eq!(h.inference.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_misses_both_infer_and_cache_ends_valid() {
    let inference = FakeInference {
        delay: Some(Duration::from_millis(50)),
        ..FakeInference::answering("same answer")
    };
    let h = harness(FakeSource::default(), inference);
    let request = AiRequest::prompt("race");
    let ai = &h.services.ai;

    let (a, b) = tokio::join!(ai.respond(&request), ai.respond(&request));
    let (a, b) = (a.unwrap(), b.unwrap());
    assert!(!a.cached && !b.cached);
    assert_eq!(h.inference.calls(), 2);

    h.services.background.wait_idle().await;
    let cached = h.services.ai.respond(&request).await.unwrap();
    assert!(cached.cached);
    assert_eq!(cached.text, "same answer");
    assert_eq!(h.inference.calls(), 2);
}
