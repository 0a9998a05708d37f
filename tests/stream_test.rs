//! End-to-end streaming tests: a mock backend serves NDJSON over real
//! HTTP and the client drives it through the assembler.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use bytes::Bytes;

use iris::adapters::{AgentBundle, AgentClient, StreamAgentRequest};
use iris::chat::{AgentLevel, ThreadEntry, TurnSinks};
use iris::domain::Agent;

#[derive(Default)]
struct CollectingSinks {
    final_text: Vec<String>,
    entries: Vec<ThreadEntry>,
}

impl TurnSinks for CollectingSinks {
    fn append_final_text(&mut self, text: &str) {
        self.final_text.push(text.to_string());
    }

    fn push_entry(&mut self, entry: ThreadEntry) {
        self.entries.push(entry);
    }
}

fn steps(entries: &[ThreadEntry]) -> Vec<(AgentLevel, String)> {
    entries
        .iter()
        .map(|e| match e {
            ThreadEntry::Step { level, text, .. } => (*level, text.clone()),
            ThreadEntry::Separator { .. } => panic!("unexpected separator"),
        })
        .collect()
}

fn test_agent() -> Agent {
    Agent {
        name: "Helper".to_string(),
        description: "Test agent".to_string(),
        system_prompt: "Be helpful.".to_string(),
        direct_answer_validation_prompt: "Always usable.".to_string(),
        direct_answers_allowed: Some(false),
        direct_answer_prompt: None,
        toolbased_answer_prompt: None,
        max_toolcalls: None,
        only_one_model_call: Some(false),
        tool_schemas: Vec::new(),
        sub_agents: None,
    }
}

fn test_bundle() -> AgentBundle {
    AgentBundle {
        agent: test_agent(),
        tool_schemas: Vec::new(),
        sub_agents: Vec::new(),
    }
}

async fn spawn_app(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Serves the given byte chunks as a chunked NDJSON response, after
/// checking that the request body deserializes as a stream request.
fn ndjson_app(chunks: Vec<&'static [u8]>) -> Router {
    Router::new().route(
        "/stream-test",
        post(move |Json(request): Json<StreamAgentRequest>| {
            let chunks = chunks.clone();
            async move {
                assert!(!request.agent_config.name.is_empty());
                let stream = futures::stream::iter(
                    chunks
                        .into_iter()
                        .map(|c| Ok::<Bytes, Infallible>(Bytes::from_static(c))),
                );
                Body::from_stream(stream).into_response()
            }
        }),
    )
}

async fn run_turn(addr: SocketAddr) -> (CollectingSinks, anyhow::Result<()>) {
    let client = AgentClient::new(
        reqwest::Client::new(),
        format!("http://{addr}/stream-test"),
        test_bundle(),
    );
    let mut sinks = CollectingSinks::default();
    let result = client
        .stream_turn(&[iris::domain::ChatMessage::user("hi")], &mut sinks)
        .await
        .map_err(Into::into);
    (sinks, result)
}

#[tokio::test]
async fn test_stream_with_line_split_across_chunks() {
    let addr = spawn_app(ndjson_app(vec![
        br#"{"type":"text_step","level":"outer_agent","data":"Hel"#,
        b"lo\"}\n",
    ]))
    .await;

    let (sinks, result) = run_turn(addr).await;
    result.unwrap();

    assert_eq!(
        steps(&sinks.entries),
        vec![(AgentLevel::OuterAgent, "Hello".to_string())]
    );
    assert!(sinks.final_text.is_empty());
}

#[tokio::test]
async fn test_stream_mixed_levels_and_final_flush() {
    let addr = spawn_app(ndjson_app(vec![
        b"{\"type\":\"text_step\",\"level\":\"outer_agent\",\"data\":\"planning\"}\n\
          {\"type\":\"tool_results\",\"level\":\"inner_agent\",\"data\":\"result: 3\"}\n",
        b"not json\n",
        b"{\"type\":\"text_final\",\"level\":\"inner_agent\",\"data\":\"sub answer\"}\n",
        b"{\"type\":\"text_final\",\"level\":\"outer_agent\",\"data\":\"foo\"}\n",
        b"{\"type\":\"text_final\",\"level\":\"outer_agent\",\"data\":\"bar\"}\n",
    ]))
    .await;

    let (sinks, result) = run_turn(addr).await;
    result.unwrap();

    // live chat answer streamed incrementally
    assert_eq!(sinks.final_text, vec!["foo".to_string(), "bar".to_string()]);

    // thread order: steps as they arrived, consolidated outer final last
    assert_eq!(
        steps(&sinks.entries),
        vec![
            (AgentLevel::OuterAgent, "planning".to_string()),
            (AgentLevel::InnerAgent, "result: 3".to_string()),
            (AgentLevel::InnerAgent, "sub answer".to_string()),
            (AgentLevel::OuterAgent, "foobar".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_stream_unterminated_trailing_line_discarded() {
    let addr = spawn_app(ndjson_app(vec![
        b"{\"type\":\"text_step\",\"level\":\"outer_agent\",\"data\":\"a\"}\n",
        b"{\"type\":\"text_step\",\"level\":\"outer_agent\",\"data\":\"b\"}",
    ]))
    .await;

    let (sinks, result) = run_turn(addr).await;
    result.unwrap();

    assert_eq!(
        steps(&sinks.entries),
        vec![(AgentLevel::OuterAgent, "a".to_string())]
    );
}

#[tokio::test]
async fn test_non_success_status_is_fatal_with_body_text() {
    let app = Router::new().route(
        "/stream-test",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream agent crashed") }),
    );
    let addr = spawn_app(app).await;

    let (sinks, result) = run_turn(addr).await;
    let err = result.unwrap_err().to_string();
    assert!(err.contains("502"), "unexpected error: {err}");
    assert!(err.contains("upstream agent crashed"), "unexpected error: {err}");

    assert!(sinks.entries.is_empty());
    assert!(sinks.final_text.is_empty());
}

#[tokio::test]
async fn test_empty_stream_emits_nothing() {
    let addr = spawn_app(ndjson_app(vec![b""])).await;

    let (sinks, result) = run_turn(addr).await;
    result.unwrap();

    assert!(sinks.entries.is_empty());
    assert!(sinks.final_text.is_empty());
}
