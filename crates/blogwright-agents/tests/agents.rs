//! Agent behaviour against a scripted completion endpoint.

use blogwright_agents::{
    AgentContext, ResearchAgent, ResearchOutput, ScriptwriterAgent, Topic, TopicAgent,
};
use blogwright_core::testing::ScriptedTransport;
use blogwright_core::{AgentError, ErrorKind, Settings, Stage, TransportError};
use std::sync::Arc;

fn settings() -> Settings {
    Settings::default()
        .with_endpoint("https://llm.example/v1/chat/completions")
        .with_api_key("sk-test")
        .with_model(Stage::Topic, "topic-model")
        .with_model(Stage::Research, "research-model")
        .with_model(Stage::Scriptwriter, "writer-model")
}

fn context(transport: &Arc<ScriptedTransport>) -> AgentContext {
    AgentContext::new(settings(), transport.clone())
}

fn research_bundle() -> ResearchOutput {
    ResearchOutput {
        blog_title: "Edge Computing for Latency-Critical Apps".into(),
        summary: vec!["Edge moves compute closer to users.".into()],
        keywords: vec!["edge".into(), "latency".into()],
        sources: vec!["https://example.com/edge".into()],
    }
}

const LONG_POST: &str = "Edge computing shifts work toward the network boundary so requests travel less.\n\n\
It matters most when every millisecond counts.\n\n\
## Overview\nText about the overview of edge computing.\n\n\
## Conclusion\nDone.\n\n\
## Sources\n- https://example.com/edge";

#[tokio::test]
async fn research_agent_filters_sources_from_completion() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_completion(
        r#"{"blogTitle":"X","summary":["a"],"keywords":[],"sources":["not-a-url","https://example.com"]}"#,
    );

    let output = ResearchAgent::new(context(&transport))
        .research(&Topic::new("Edge Computing"))
        .await
        .expect("research should succeed");

    assert_eq!(output.sources, vec!["https://example.com".to_string()]);

    let sent = transport.requests();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].request.model, "research-model");
    assert_eq!(sent[0].request.max_tokens, 600);
    assert!(sent[0].request.messages[1].content.contains("Edge Computing"));
}

#[tokio::test]
async fn research_agent_defaults_title_to_topic() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_completion(r#"{"summary":["a"],"keywords":["k"],"sources":[]}"#);

    let output = ResearchAgent::new(context(&transport))
        .research(&Topic::new("Edge Computing"))
        .await
        .unwrap();
    assert_eq!(output.blog_title, "Edge Computing");
}

#[tokio::test]
async fn research_agent_reports_parse_failure() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_completion("not json at all");

    let err = ResearchAgent::new(context(&transport))
        .research(&Topic::new("Edge Computing"))
        .await
        .unwrap_err();
    assert!(matches!(err, AgentError::MalformedJson { .. }));
    assert!(err.to_string().contains("Failed to parse AI response as JSON"));
}

#[tokio::test]
async fn research_agent_rejects_blank_topic_without_calling_out() {
    let transport = Arc::new(ScriptedTransport::new());

    let err = ResearchAgent::new(context(&transport))
        .research(&Topic::new("   "))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn scriptwriter_derives_sections_and_word_count() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_completion(&format!("\n\n{LONG_POST}\n  "));

    let post = ScriptwriterAgent::new(context(&transport))
        .write_script(&research_bundle())
        .await
        .unwrap();

    assert_eq!(post.title, "Edge Computing for Latency-Critical Apps");
    assert_eq!(post.content, LONG_POST);
    assert_eq!(post.sections, vec!["Overview", "Conclusion", "Sources"]);
    assert_eq!(post.word_count, LONG_POST.split_whitespace().count());

    let sent = transport.requests();
    assert_eq!(sent[0].request.max_tokens, 2500);
    assert!(
        sent[0].request.messages[1]
            .content
            .contains("- https://example.com/edge")
    );
}

#[tokio::test]
async fn scriptwriter_rejects_short_completion_despite_http_success() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_completion("## Overview\nToo short.");

    let err = ScriptwriterAgent::new(context(&transport))
        .write_script(&research_bundle())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid or too short response from API");
    assert_eq!(err.kind(), ErrorKind::Content);
}

#[tokio::test(start_paused = true)]
async fn scriptwriter_times_out_after_its_own_deadline() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_hang();

    let err = ScriptwriterAgent::new(context(&transport))
        .write_script(&research_bundle())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AgentError::Timeout {
            stage: Stage::Scriptwriter,
            seconds: 120
        }
    );
    assert_eq!(err.to_string(), "Request timed out after 120 seconds");
}

#[tokio::test(start_paused = true)]
async fn topic_times_out_after_thirty_seconds() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_hang();

    let err = TopicAgent::new(context(&transport))
        .generate_topic()
        .await
        .unwrap_err();
    assert!(err.to_string().contains("timed out after 30 seconds"));
}

#[tokio::test]
async fn topic_wraps_unclassified_transport_failure() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_error(TransportError::Network("dns error: no such host".into()));

    let err = TopicAgent::new(context(&transport))
        .generate_topic()
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to generate topic: dns error: no such host"
    );
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn every_agent_reports_missing_endpoint_without_network() {
    let transport = Arc::new(ScriptedTransport::new());
    let context = AgentContext::new(
        Settings {
            endpoint: None,
            ..settings()
        },
        transport.clone(),
    );

    let topic_err = TopicAgent::new(context.clone())
        .generate_topic()
        .await
        .unwrap_err();
    let research_err = ResearchAgent::new(context.clone())
        .research(&Topic::new("Edge Computing"))
        .await
        .unwrap_err();
    let writer_err = ScriptwriterAgent::new(context)
        .write_script(&research_bundle())
        .await
        .unwrap_err();

    for err in [topic_err, research_err, writer_err] {
        assert!(err.to_string().contains("OPEN_ROUTER_URL"), "{err}");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
    assert_eq!(transport.calls(), 0);
}
