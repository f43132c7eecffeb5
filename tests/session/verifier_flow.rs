use serde_json::json;
use skillproof::config::Config;
use skillproof::llm::OpenAiClient;
use skillproof::verifier::prompt::{CHAT_FAILED, TASK_FETCH_FAILED};
use skillproof::verifier::{
    ChatEngine, ChatMessage, EngineOptions, ExchangeOutcome, NullEngineSink, TaskPhase,
};
use skillproof::workflow::WorkflowState;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> Config {
    Config {
        api_key: Some("test-key".into()),
        base_url: format!("{}/v1", server.uri()),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

fn confirmed_workflow() -> WorkflowState {
    let mut state = WorkflowState::new();
    state
        .set_file_link(" https://figma.com/file/abc ")
        .expect("link step is open");
    state.submit_file_link().expect("link is non-empty");
    state.toggle_skill("Typography").expect("skill step is open");
    state.submit_skills().expect("one skill selected");
    state
}

fn engine_for(server: &MockServer, workflow: &WorkflowState) -> ChatEngine {
    let config = config_for(server);
    let client = OpenAiClient::from_config(&config).expect("client builds from config");
    ChatEngine::new(
        Arc::new(client),
        Arc::new(NullEngineSink),
        EngineOptions::from_config(&config),
        workflow.file_link(),
        workflow.selected_skills_in_catalog_order(),
    )
}

async fn mount_tasks(server: &MockServer, content: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({
            "model": "o3-mini",
            "response_format": {"type": "json_schema", "json_schema": {"name": "tasks"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "o3-mini",
            "choices": [{
                "message": {"role": "assistant", "content": content, "refusal": null},
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(server)
        .await;
}

fn sse(deltas: &[&str]) -> String {
    let mut body = String::new();
    for delta in deltas {
        body.push_str(&format!(
            "data: {}\n\n",
            json!({"choices": [{"delta": {"content": delta}}]})
        ));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

#[tokio::test]
async fn full_session_from_link_to_streamed_reply() {
    let server = MockServer::start().await;
    mount_tasks(
        &server,
        r#"{"tasks":[{"id":"t1","title":"Task A","taskDescription":"Desc A"},{"id":"t2","title":"Task B","taskDescription":"Desc B"}]}"#,
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(json!({"model": "gpt-3.5-turbo", "stream": true})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse(&["Hel", "lo"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let workflow = confirmed_workflow();
    assert_eq!(workflow.file_link(), "https://figma.com/file/abc");
    let engine = engine_for(&server, &workflow);

    assert_eq!(engine.initialize().await, TaskPhase::Ready);
    assert_eq!(engine.tasks().len(), 2);
    assert_eq!(
        engine.transcript().messages(),
        &[ChatMessage::assistant(
            "1. **Task A**\nDesc A\n\n2. **Task B**\nDesc B"
        )]
    );

    let outcome = engine.send("Task A is done").await.expect("engine is idle");
    assert!(matches!(outcome, ExchangeOutcome::Replied(ref reply) if reply == "Hello"));
    let transcript = engine.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.messages()[1], ChatMessage::user("Task A is done"));
    assert_eq!(transcript.last(), Some(&ChatMessage::assistant("Hello")));

    assert!(engine.mark_task_completed("t1").await);
    assert!(!engine.mark_task_completed("t1").await);
    assert!(engine.tasks()[0].completed);

    let requests = server.received_requests().await.expect("recording enabled");
    let prompt = requests[0].body_json::<serde_json::Value>().expect("json body");
    let user_prompt = prompt["messages"][1]["content"].as_str().expect("user prompt");
    assert!(user_prompt.contains("Figma file link: https://figma.com/file/abc"));
    assert!(user_prompt.contains("Skillsets selected: Typography"));

    let chat = requests[1].body_json::<serde_json::Value>().expect("json body");
    assert_eq!(chat["messages"].as_array().map(Vec::len), Some(3));
    assert_eq!(chat["messages"][2], json!({"role": "assistant", "content": ""}));

    server.verify().await;
}

#[tokio::test]
async fn failures_surface_as_fixed_messages_without_blocking() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let engine = engine_for(&server, &confirmed_workflow());

    assert_eq!(engine.initialize().await, TaskPhase::Failed);
    assert!(engine.tasks().is_empty());
    assert_eq!(
        engine.transcript().messages(),
        &[ChatMessage::assistant(TASK_FETCH_FAILED)]
    );

    let outcome = engine.send("hello?").await.expect("engine is idle");
    assert!(matches!(outcome, ExchangeOutcome::Failed(_)));
    let transcript = engine.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript.messages()[0], ChatMessage::assistant(TASK_FETCH_FAILED));
    assert_eq!(transcript.last(), Some(&ChatMessage::assistant(CHAT_FAILED)));
    assert!(engine.can_send());
}

#[tokio::test]
async fn off_schema_task_content_is_a_fetch_failure() {
    let server = MockServer::start().await;
    mount_tasks(&server, r#"{"tasks":[{"id":"t1","title":"Task A"}]}"#).await;

    let engine = engine_for(&server, &confirmed_workflow());

    assert_eq!(engine.initialize().await, TaskPhase::Failed);
    assert!(engine.tasks().is_empty());
    assert_eq!(
        engine.transcript().last(),
        Some(&ChatMessage::assistant(TASK_FETCH_FAILED))
    );
}
