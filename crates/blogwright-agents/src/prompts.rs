//! Fixed instructions sent by each stage.

use blogwright_core::StagePrompt;

use crate::researcher::ResearchOutput;
use crate::topic::Topic;

const TOPIC_SYSTEM: &str = "You are a technical topic generator. Output ONLY a short topic of 2-6 words. \
Never use generic words and avoid repeating concepts you have produced before. Count the words carefully.";

const TOPIC_EXAMPLES: &[&str] = &[
    "API Design Patterns",
    "GraphQL Performance",
    "Cloud DevOps",
    "Event Driven Architecture",
    "Type Safety in Codebases",
    "AI Assisted Testing",
    "Microservices Observability",
    "CI/CD Pipelines",
];

const RESEARCH_SYSTEM: &str = "You are a technical researcher. Gather factual, concise information about a \
technical topic and return clear summaries, keywords, sources and a blog-ready title as structured JSON.";

const SCRIPTWRITER_SYSTEM: &str = "You are an expert technical blog writer.\n\
You MUST:\n\
- Write valid Markdown\n\
- Follow every formatting rule exactly\n\
- Never include a title or H1 heading\n\
- Start directly with an introduction paragraph, with no heading before it\n\
- Write clear, professional technical prose";

pub fn topic() -> StagePrompt {
    let examples = TOPIC_EXAMPLES
        .iter()
        .map(|example| format!("- {example}"))
        .collect::<Vec<_>>()
        .join("\n");

    let user = format!(
        "Generate ONE technical blog topic.\n\n\
Rules:\n\
- Exactly 2-6 words\n\
- No punctuation\n\
- Focus on a single technical concept, tool or framework\n\
- Avoid the words: programming, coding\n\
- Avoid repeating concepts or synonyms from previous topics\n\n\
Examples:\n{examples}\n\n\
Return ONLY the topic text.\nTopic:"
    );

    StagePrompt {
        system: TOPIC_SYSTEM.to_string(),
        user,
    }
}

pub fn research(topic: &Topic) -> StagePrompt {
    let user = format!(
        "Research this topic: \"{topic}\"\n\n\
Respond with ONLY a valid JSON object. No markdown code fences, no explanations, no text before or after it.\n\n\
Format:\n\
{{\n\
  \"blogTitle\": \"5-12 word catchy title\",\n\
  \"summary\": [\"sentence 1\", \"sentence 2\", \"sentence 3\", \"sentence 4\", \"sentence 5\"],\n\
  \"keywords\": [\"keyword1\", \"keyword2\", \"keyword3\", \"keyword4\", \"keyword5\"],\n\
  \"sources\": [\"source1\", \"source2\", \"source3\"]\n\
}}\n\n\
Requirements:\n\
- blogTitle: clear and technical, 5-12 words\n\
- summary: 5-8 sentences explaining the topic\n\
- keywords: exactly 5 relevant technical terms\n\
- sources: 1-3 authoritative URLs\n\n\
Return ONLY the JSON object."
    );

    StagePrompt {
        system: RESEARCH_SYSTEM.to_string(),
        user,
    }
}

pub fn scriptwriter(research: &ResearchOutput) -> StagePrompt {
    let notes = research.summary.join("\n");
    let keywords = research.keywords.join(", ");
    let sources = research
        .sources
        .iter()
        .map(|source| format!("- {source}"))
        .collect::<Vec<_>>()
        .join("\n");

    let user = format!(
        "Topic:\n\"{title}\"\n\n\
Research notes:\n{notes}\n\n\
Target keywords:\n{keywords}\n\n\
Structure requirements (MANDATORY):\n\
- Start immediately with 2-3 introduction paragraphs (NO title, NO headings before the text)\n\
- Add exactly 3-4 main content sections using ## headings (not counting Conclusion and Sources)\n\
- Each section must contain 2-3 paragraphs and at least one fenced code block with a real-world example\n\
- End with a ## Conclusion section\n\
- Finish with a ## Sources section formatted as a Markdown list\n\n\
Tone: clear, confident, practical. No fluff and no marketing language.\n\n\
Code examples: prefer TypeScript or JavaScript unless another language is clearly more appropriate.\n\n\
Sources to include:\n{sources}\n\n\
Length: 800-1200 words total.\n\n\
Markdown rules:\n\
- Use **bold** for emphasis\n\
- Use `inline code`\n\
- Use fenced code blocks with language identifiers when possible\n\n\
Write the blog post now.",
        title = research.blog_title,
    );

    StagePrompt {
        system: SCRIPTWRITER_SYSTEM.to_string(),
        user,
    }
}
