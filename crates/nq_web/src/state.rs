use nq_pipeline::NewsAssistant;

pub struct AppState {
    pub assistant: NewsAssistant,
}
