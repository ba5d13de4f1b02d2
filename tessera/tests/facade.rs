use std::sync::Arc;
use std::time::Duration;

use tessera::prelude::*;
use tessera::{AgentErrorKind, MemoryErrorKind};

#[tokio::test]
async fn unreachable_endpoint_surfaces_as_transport_error() {
    let store = Arc::new(InMemoryHistoryStore::new());
    let agent = build_agent_with_store(
        AgentConfig::new(Model::Gpt4oMini, "sk-test")
            .with_base_url("http://127.0.0.1:1/v1")
            .with_timeout(Duration::from_secs(5)),
        store.clone(),
    )
    .expect("agent should build");

    let error = agent
        .call(&CallContext::new(), AgentInput::new("conversation-1", "hello"))
        .await
        .expect_err("nothing listens on port 1");

    assert_eq!(error.kind, AgentErrorKind::Transport);
    let missing = store
        .retrieve(&ConversationId::from("conversation-1"))
        .await
        .expect_err("failed calls are not persisted");
    assert_eq!(missing.kind, MemoryErrorKind::NotFound);
}

#[tokio::test]
async fn facade_agent_validates_before_touching_the_network() {
    let agent = build_agent(
        AgentConfig::new(Model::Gemini2Flash, "gemini-key").with_base_url("http://127.0.0.1:1"),
    )
    .expect("agent should build");

    let error = agent
        .call(&CallContext::new(), AgentInput::new("conversation-2", ""))
        .await
        .expect_err("empty input");
    assert_eq!(error.kind, AgentErrorKind::InvalidInput);
}

#[test]
fn facade_re_exports_tool_registration() {
    #[derive(serde::Deserialize, schemars::JsonSchema)]
    struct Input {
        n: i64,
    }

    let mut agent = build_agent(AgentConfig::new(Model::Gpt4o, "sk-test")).expect("agent");
    agent
        .register_fn("double", "Doubles n", |input: Input| async move {
            Ok::<_, ToolError>(input.n * 2)
        })
        .expect("register");
    assert_eq!(agent.tool_names(), ["double"]);
}
