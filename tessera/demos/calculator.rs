//! Runs a one-tool calculator agent against a live provider.
//!
//! ```text
//! OPENAI_API_KEY=sk-... RUST_LOG=tagent=debug cargo run -p tessera --example calculator -- gpt-4o-mini
//! ```

use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tessera::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Deserialize, JsonSchema)]
struct DoubleInput {
    /// The number to double.
    n: i64,
}

#[derive(Debug, Serialize)]
struct DoubleOutput {
    n: i64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let model = std::env::args()
        .nth(1)
        .and_then(|name| parse_model(&name))
        .unwrap_or(Model::Gpt4oMini);
    let config = AgentConfig::from_env(model)?
        .with_system_prompt("You are a calculator. Use the tools you are given.");

    let mut agent = build_agent_with_store(config, Arc::new(InMemoryHistoryStore::new()))?;
    agent.register_fn("double", "Doubles the number n", |input: DoubleInput| async move {
        Ok::<_, ToolError>(DoubleOutput { n: input.n * 2 })
    })?;

    let context = CallContext::new();
    for question in ["What is 21 doubled?", "And doubled once more?"] {
        let output = agent.call(&context, AgentInput::new("demo", question)).await?;
        println!("> {question}\n{}", output.text);
    }
    Ok(())
}
