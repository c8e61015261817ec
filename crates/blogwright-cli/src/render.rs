//! Markdown rendering for finished posts.

use blogwright_agents::{ResearchOutput, SUMMARY_PLACEHOLDER, ScriptwriterOutput};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct FrontMatter<'a> {
    title: &'a str,
    date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    tags: &'a [String],
    sources: &'a [String],
}

/// Render `post` as a Markdown document with a YAML front matter block.
///
/// Keywords become `tags`; the first summary sentence becomes `description`
/// unless it is the placeholder.
pub fn render_post(
    research: &ResearchOutput,
    post: &ScriptwriterOutput,
    date: NaiveDate,
) -> Result<String, serde_yaml::Error> {
    let front_matter = FrontMatter {
        title: &post.title,
        date: date.format("%Y-%m-%d").to_string(),
        description: research
            .summary
            .first()
            .map(String::as_str)
            .filter(|sentence| *sentence != SUMMARY_PLACEHOLDER),
        tags: &research.keywords,
        sources: &research.sources,
    };

    let yaml = serde_yaml::to_string(&front_matter)?;
    Ok(format!("---\n{yaml}---\n\n{}\n", post.content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn research() -> ResearchOutput {
        ResearchOutput {
            blog_title: "Edge Computing for Latency-Critical Apps".into(),
            summary: vec!["Edge moves compute closer to users.".into()],
            keywords: vec!["edge".into(), "latency".into()],
            sources: vec!["https://example.com/edge".into()],
        }
    }

    fn post() -> ScriptwriterOutput {
        ScriptwriterOutput {
            title: "Edge Computing for Latency-Critical Apps".into(),
            content: "Intro.\n\n## Overview\nBody.".into(),
            sections: vec!["Overview".into()],
            word_count: 4,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    /// Split a rendered document into its parsed front matter and body.
    fn split(rendered: &str) -> (Value, &str) {
        let rest = rendered.strip_prefix("---\n").expect("opening fence");
        let (yaml, body) = rest.split_once("---\n\n").expect("closing fence");
        (serde_yaml::from_str(yaml).unwrap(), body)
    }

    #[test]
    fn test_front_matter_precedes_body() {
        let rendered = render_post(&research(), &post(), date()).unwrap();
        let (front, body) = split(&rendered);

        assert_eq!(front["title"], "Edge Computing for Latency-Critical Apps");
        assert_eq!(front["date"], "2026-10-16");
        assert_eq!(front["description"], "Edge moves compute closer to users.");
        assert_eq!(
            front["tags"],
            serde_yaml::from_str::<Value>("[edge, latency]").unwrap()
        );
        assert_eq!(front["sources"][0], "https://example.com/edge");
        assert_eq!(body, "Intro.\n\n## Overview\nBody.\n");
    }

    #[test]
    fn test_placeholder_summary_and_empty_lists() {
        let mut research = research();
        research.summary = vec![SUMMARY_PLACEHOLDER.to_string()];
        research.keywords.clear();
        research.sources.clear();

        let rendered = render_post(&research, &post(), date()).unwrap();
        let (front, _) = split(&rendered);
        assert!(front.get("description").is_none());
        assert_eq!(front["tags"], Value::Sequence(Vec::new()));
        assert_eq!(front["sources"], Value::Sequence(Vec::new()));
    }

    #[test]
    fn test_awkward_titles_survive_a_yaml_round_trip() {
        let mut post = post();
        for title in [
            "Bell\u{7} and Escape\u{1b} Codes",
            r#"Say "hi" \ bye: a guide"#,
            "two\nlines",
            "- leading dash # not a comment",
        ] {
            post.title = title.to_string();
            let rendered = render_post(&research(), &post, date()).unwrap();
            let (front, _) = split(&rendered);
            assert_eq!(front["title"], title, "{rendered}");
        }
    }
}
