use blogwright_agents::{AgentContext, Pipeline, Topic};
use blogwright_core::testing::ScriptedTransport;
use blogwright_core::{AgentError, Outcome, Settings, Stage};
use std::sync::Arc;

const RESEARCH_JSON: &str = r#"{
    "blogTitle": "Edge Computing for Latency-Critical Apps",
    "summary": ["Edge moves compute closer to users.", "It cuts round trips."],
    "keywords": ["edge", "latency"],
    "sources": ["https://example.com/edge", "not-a-url"]
}"#;

const POST: &str = "Edge computing shifts work toward the network boundary so requests travel less.\n\n\
## Overview\nA longer look at where edge nodes live and what they run.\n\n\
## Conclusion\nMeasure before moving.\n\n\
## Sources\n- https://example.com/edge";

fn settings() -> Settings {
    Settings::default()
        .with_endpoint("https://llm.example/v1/chat/completions")
        .with_api_key("sk-test")
        .with_model(Stage::Topic, "topic-model")
        .with_model(Stage::Research, "research-model")
        .with_model(Stage::Scriptwriter, "writer-model")
}

fn pipeline(transport: &Arc<ScriptedTransport>, settings: Settings) -> Pipeline {
    Pipeline::new(AgentContext::new(settings, transport.clone()))
}

#[tokio::test]
async fn full_run_chains_all_three_stages() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_completion("Edge Computing");
    transport.push_completion(RESEARCH_JSON);
    transport.push_completion(POST);

    let post = pipeline(&transport, settings()).run().await.unwrap();

    assert_eq!(transport.calls(), 3);
    assert_eq!(post.title, "Edge Computing for Latency-Critical Apps");
    assert_eq!(post.sections, vec!["Overview", "Conclusion", "Sources"]);

    let sent = transport.requests();
    let models: Vec<&str> = sent.iter().map(|s| s.request.model.as_str()).collect();
    assert_eq!(models, vec!["topic-model", "research-model", "writer-model"]);
    assert!(sent[1].request.messages[1].content.contains("Edge Computing"));
    assert!(
        sent[2].request.messages[1]
            .content
            .contains("Edge Computing for Latency-Critical Apps")
    );
    assert!(
        !sent[2].request.messages[1].content.contains("not-a-url"),
        "invalid sources must not reach the scriptwriter"
    );
}

#[tokio::test]
async fn topic_failure_stops_the_run() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_status(500, "Internal Server Error");

    let err = pipeline(&transport, settings()).run().await.unwrap_err();

    assert_eq!(
        err,
        AgentError::HttpStatus {
            stage: Stage::Topic,
            status: 500,
            reason: "Internal Server Error".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Completion API error: 500 Internal Server Error");
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn missing_topic_model_fails_before_any_request() {
    let transport = Arc::new(ScriptedTransport::new());
    let settings = Settings {
        topic_model: None,
        ..settings()
    };

    let err = pipeline(&transport, settings).run().await.unwrap_err();

    assert_eq!(err.stage(), Stage::Topic);
    assert!(err.to_string().contains("TOPIC_GENERATOR_MODEL"), "{err}");
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn research_parse_failure_skips_scriptwriter() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_completion("Edge Computing");
    transport.push_completion("Sure! Here is your research: {oops");

    let err = pipeline(&transport, settings()).run().await.unwrap_err();

    assert_eq!(err.stage(), Stage::Research);
    assert!(matches!(err, AgentError::MalformedJson { .. }));
    assert_eq!(transport.calls(), 2);
}

#[tokio::test]
async fn seeded_run_skips_topic_generation() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_completion(RESEARCH_JSON);
    transport.push_completion(POST);

    let post = pipeline(&transport, settings())
        .run_with_topic(Topic::new("Rust in Embedded Systems"))
        .await
        .unwrap();

    assert_eq!(transport.calls(), 2);
    assert_eq!(post.title, "Edge Computing for Latency-Critical Apps");
    let sent = transport.requests();
    assert_eq!(sent[0].request.model, "research-model");
    assert!(
        sent[0].request.messages[1]
            .content
            .contains("Rust in Embedded Systems")
    );
}

#[tokio::test]
async fn short_post_fails_at_scriptwriter() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_completion("Edge Computing");
    transport.push_completion(RESEARCH_JSON);
    transport.push_completion("## Overview\nTiny.");

    let err = pipeline(&transport, settings()).run().await.unwrap_err();

    assert_eq!(err.stage(), Stage::Scriptwriter);
    assert_eq!(err.to_string(), "Invalid or too short response from API");
    assert_eq!(transport.calls(), 3);
}

#[tokio::test]
async fn report_keeps_intermediate_outputs_and_timings() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_completion("  Edge Computing \n");
    transport.push_completion(RESEARCH_JSON);
    transport.push_completion(POST);

    let report = pipeline(&transport, settings())
        .run_with_report(None)
        .await
        .unwrap();

    assert_eq!(report.topic.as_str(), "Edge Computing");
    assert_eq!(report.research.sources, vec!["https://example.com/edge"]);
    let stages: Vec<Stage> = report.stages.iter().map(|t| t.stage).collect();
    assert_eq!(stages, vec![Stage::Topic, Stage::Research, Stage::Scriptwriter]);
    assert_eq!(report.post.content, POST);
}

#[tokio::test]
async fn failure_converts_into_outcome_envelope() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_status(429, "Too Many Requests");

    let outcome = Outcome::from(pipeline(&transport, settings()).run().await);
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Completion API error: 429 Too Many Requests");
    assert!(json.get("data").is_none());
}
