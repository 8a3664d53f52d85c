use std::sync::Arc;

use nq_core::{CompletionOptions, FinalAnswer, InferenceModel, SourceRef, SummaryRecord};

const SYNTHESIS_TEMPERATURE: f32 = 0.2;
const SYNTHESIS_MAX_TOKENS: u32 = 500;

/// Combines the per-article summaries into one cited answer.
pub struct Synthesizer {
    model: Arc<dyn InferenceModel>,
    include_sources: bool,
}

impl Synthesizer {
    pub fn new(model: Arc<dyn InferenceModel>, include_sources: bool) -> Self {
        Self {
            model,
            include_sources,
        }
    }

    /// One model call over all summaries. The source list is assembled
    /// from the input records rather than the model's text, so citations
    /// always match what was actually summarized; `include_sources`
    /// additionally renders the list into the answer text.
    pub async fn synthesize(&self, question: &str, summaries: &[SummaryRecord]) -> FinalAnswer {
        let mut prompt = format!(
            "User question: \"{}\"\n\nHere are the top relevant articles with their full content analysis:\n\n",
            question
        );
        for (i, record) in summaries.iter().enumerate() {
            prompt.push_str(&format!(
                "\nARTICLE {}: {}\nURL: {}\nSUMMARY: {}\n",
                i + 1,
                record.title,
                record.url,
                record.summary
            ));
        }
        prompt.push_str(
            "\nUsing ONLY this information, provide a single, comprehensive, direct answer to the user's question.\n\
             Be concise, factual, and cite which article(s) your answer comes from (e.g., \"According to Article 1...\").\n\
             Format naturally for the user.",
        );

        let options = CompletionOptions {
            temperature: Some(SYNTHESIS_TEMPERATURE),
            max_tokens: Some(SYNTHESIS_MAX_TOKENS),
        };

        let mut answer = match self.model.complete(&prompt, options).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => format!("Error generating final response: {}", e),
        };

        let sources: Vec<SourceRef> = summaries
            .iter()
            .enumerate()
            .map(|(i, record)| SourceRef {
                index: i + 1,
                title: record.title.clone(),
                url: record.url.clone(),
            })
            .collect();

        if self.include_sources {
            answer.push_str(&render_sources(&sources));
        }

        FinalAnswer { answer, sources }
    }
}

fn render_sources(sources: &[SourceRef]) -> String {
    let mut rendered = String::from("\n\n📚 **Sources:**\n");
    for source in sources {
        rendered.push_str(&format!(
            "{}. {}\n   🔗 {}\n",
            source.index, source.title, source.url
        ));
    }
    rendered
}
