//! Pipeline orchestrator: Topic → Research → Scriptwriter.
//!
//! Stages run strictly in sequence because each consumes the previous stage's
//! output. The first failure ends the run: its error is returned unchanged,
//! later stages are never invoked and earlier outputs are dropped. Nothing is
//! retried.

use crate::agent_context::{Agent, AgentContext};
use crate::researcher::{ResearchAgent, ResearchOutput};
use crate::scriptwriter::{ScriptwriterAgent, ScriptwriterOutput};
use crate::topic::{Topic, TopicAgent};
use blogwright_core::{AgentError, Stage};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

/// Position of a run in the linear stage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Topic,
    Research,
    Scriptwriter,
    Succeeded,
    Failed(Stage),
}

impl PipelineState {
    /// Seeded runs skip topic generation.
    pub fn start(seeded: bool) -> Self {
        if seeded {
            PipelineState::Research
        } else {
            PipelineState::Topic
        }
    }

    /// Transition after the current stage finishes. Terminal states absorb.
    pub fn advance(self, stage_succeeded: bool) -> Self {
        match (self, stage_succeeded) {
            (PipelineState::Topic, true) => PipelineState::Research,
            (PipelineState::Research, true) => PipelineState::Scriptwriter,
            (PipelineState::Scriptwriter, true) => PipelineState::Succeeded,
            (PipelineState::Topic, false) => PipelineState::Failed(Stage::Topic),
            (PipelineState::Research, false) => PipelineState::Failed(Stage::Research),
            (PipelineState::Scriptwriter, false) => PipelineState::Failed(Stage::Scriptwriter),
            (terminal, _) => terminal,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Succeeded | PipelineState::Failed(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub duration_ms: u64,
}

/// Everything a successful run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub topic: Topic,
    pub research: ResearchOutput,
    pub post: ScriptwriterOutput,
    pub stages: Vec<StageTiming>,
}

struct RunProgress {
    state: PipelineState,
    timings: Vec<StageTiming>,
}

impl RunProgress {
    async fn step<A: Agent>(&mut self, agent: &A, input: A::Input) -> Result<A::Output, AgentError> {
        let stage = agent.stage();
        let started = Instant::now();
        let result = agent.execute(input).await;

        self.timings.push(StageTiming {
            stage,
            duration_ms: started.elapsed().as_millis() as u64,
        });
        self.state = self.state.advance(result.is_ok());

        match &result {
            Ok(_) => info!(stage = %stage, state = ?self.state, "stage complete"),
            Err(err) => warn!(stage = %stage, error = %err, "pipeline stopped"),
        }
        result
    }
}

/// Runs the three agents in order over one shared context.
pub struct Pipeline {
    topic: TopicAgent,
    researcher: ResearchAgent,
    scriptwriter: ScriptwriterAgent,
}

impl Pipeline {
    pub fn new(context: AgentContext) -> Self {
        Self {
            topic: TopicAgent::new(context.clone()),
            researcher: ResearchAgent::new(context.clone()),
            scriptwriter: ScriptwriterAgent::new(context),
        }
    }

    pub fn topic_agent(&self) -> &TopicAgent {
        &self.topic
    }

    pub fn research_agent(&self) -> &ResearchAgent {
        &self.researcher
    }

    pub fn scriptwriter_agent(&self) -> &ScriptwriterAgent {
        &self.scriptwriter
    }

    /// Generate a topic, research it and write the post.
    pub async fn run(&self) -> Result<ScriptwriterOutput, AgentError> {
        self.run_with_report(None).await.map(|report| report.post)
    }

    /// Research and write about a caller-supplied topic.
    pub async fn run_with_topic(&self, topic: Topic) -> Result<ScriptwriterOutput, AgentError> {
        self.run_with_report(Some(topic))
            .await
            .map(|report| report.post)
    }

    /// Same as [`Pipeline::run`], keeping intermediate outputs and stage timings.
    pub async fn run_with_report(&self, seed: Option<Topic>) -> Result<PipelineReport, AgentError> {
        let run_id = Uuid::new_v4();
        let span = info_span!("pipeline.run", %run_id, seeded = seed.is_some());
        self.execute(run_id, seed).instrument(span).await
    }

    async fn execute(&self, run_id: Uuid, seed: Option<Topic>) -> Result<PipelineReport, AgentError> {
        let started_at = Utc::now();
        let mut progress = RunProgress {
            state: PipelineState::start(seed.is_some()),
            timings: Vec::with_capacity(Stage::ALL.len()),
        };

        let topic = match seed {
            Some(topic) => topic,
            None => progress.step(&self.topic, ()).await?,
        };
        let research = progress.step(&self.researcher, topic.clone()).await?;
        let post = progress.step(&self.scriptwriter, research.clone()).await?;

        info!(
            title = %post.title,
            word_count = post.word_count,
            "pipeline succeeded"
        );

        Ok(PipelineReport {
            run_id,
            started_at,
            topic,
            research,
            post,
            stages: progress.timings,
        })
    }
}
