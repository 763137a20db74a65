//! Summary generation: prompt, generate, extract, label.

use super::error::StoryError;
use super::extractor::summarize_candidates;
use super::metrics;
use super::prompts::build_prompt;
use super::providers::{GenerationParams, TextGenerator};
use crate::models::{StorySelection, StorySummary};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// Orchestrates one summary request end to end.
///
/// Holds the shared generator and the prompt RNG; cloning is cheap.
#[derive(Clone)]
pub struct StoryService {
    generator: Arc<dyn TextGenerator>,
    params: GenerationParams,
    model: String,
    rng: Arc<Mutex<StdRng>>,
}

impl StoryService {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        params: GenerationParams,
        model: impl Into<String>,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            generator,
            params,
            model: model.into(),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    pub fn generator(&self) -> &Arc<dyn TextGenerator> {
        &self.generator
    }

    /// Pick the seed prompt. The RNG lock never outlives this call.
    pub fn prompt_for(&self, selection: &StorySelection) -> String {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        build_prompt(selection, &mut *rng)
    }

    #[tracing::instrument(
        skip(self, request_id),
        fields(mode = selection.mode(), generator = self.generator.name())
    )]
    pub async fn generate_summaries(
        &self,
        selection: &StorySelection,
        request_id: Option<&str>,
    ) -> Result<Vec<StorySummary>, StoryError> {
        let result = self.run(selection, request_id).await;

        match &result {
            Ok(summaries) => metrics::record_story_request(selection.mode(), "ok", summaries.len()),
            Err(e) => metrics::record_story_request(selection.mode(), error_outcome(e), 0),
        }

        result
    }

    async fn run(
        &self,
        selection: &StorySelection,
        request_id: Option<&str>,
    ) -> Result<Vec<StorySummary>, StoryError> {
        let prompt = self.prompt_for(selection);
        tracing::debug!(prompt = %prompt, "Built story prompt");

        let start = Instant::now();
        let candidates = self
            .generator
            .generate(&prompt, &self.params, request_id)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Story generation failed");
                metrics::record_generator_error(self.generator.name(), e.kind());
                e
            })?;
        metrics::record_generator_latency(
            self.generator.name(),
            &self.model,
            start.elapsed().as_secs_f64(),
        );

        tracing::info!(
            candidates = candidates.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Generated story candidates"
        );

        let story_type = selection.type_label();
        let summaries = summarize_candidates(&candidates)?
            .into_iter()
            .map(|summary| StorySummary {
                story_type: story_type.clone(),
                summary,
            })
            .collect();

        Ok(summaries)
    }
}

fn error_outcome(err: &StoryError) -> &'static str {
    match err {
        StoryError::MissingSelection => "missing_selection",
        StoryError::EmptyGeneration => "empty_generation",
        StoryError::Generation(e) => e.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockGenerator;
    use crate::services::providers::ProviderError;
    use async_trait::async_trait;

    fn service(generator: impl TextGenerator + 'static) -> StoryService {
        StoryService::new(
            Arc::new(generator),
            GenerationParams::default(),
            "gpt2",
            Some(11),
        )
    }

    fn single(label: &str) -> StorySelection {
        StorySelection::Single(label.to_string())
    }

    #[tokio::test]
    async fn single_genre_labels_both_summaries() {
        let svc = service(MockGenerator::new(true));
        let summaries = svc.generate_summaries(&single("Fantasy"), None).await.unwrap();

        assert_eq!(summaries.len(), 2);
        for s in &summaries {
            assert_eq!(s.story_type, "Fantasy");
            assert!(s.summary.ends_with("..."));
            assert!(s.summary.starts_with("This is a **Fantasy**"));
        }
    }

    #[tokio::test]
    async fn combined_genres_share_joined_label() {
        let svc = service(MockGenerator::new(true));
        let selection = StorySelection::Combined(vec!["Fantasy".into(), "Horror".into()]);
        let summaries = svc.generate_summaries(&selection, None).await.unwrap();

        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().all(|s| s.story_type == "Fantasy, Horror"));
        assert!(summaries[0]
            .summary
            .starts_with("This is a Fantasy and Horror story"));
    }

    #[tokio::test]
    async fn single_candidate_is_duplicated() {
        let svc = service(MockGenerator::with_candidates(["One. Two. Three. Four. Five."]));
        let summaries = svc.generate_summaries(&single("Horror"), None).await.unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0], summaries[1]);
        assert_eq!(summaries[0].summary, "One. Two. Three. Four...");
    }

    #[tokio::test]
    async fn empty_generation_is_an_error() {
        let svc = service(MockGenerator::with_candidates(Vec::<String>::new()));
        let err = svc
            .generate_summaries(&single("Horror"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoryError::EmptyGeneration));
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn generate(
            &self,
            _prompt: &str,
            _params: &GenerationParams,
            _request_id: Option<&str>,
        ) -> Result<Vec<String>, ProviderError> {
            Err(ProviderError::Unavailable("model loading".to_string()))
        }

        async fn health_check(&self) -> Result<(), ProviderError> {
            Err(ProviderError::Unavailable("model loading".to_string()))
        }
    }

    #[tokio::test]
    async fn generator_failure_propagates() {
        let svc = service(FailingGenerator);
        let err = svc
            .generate_summaries(&single("Comedy"), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoryError::Generation(ProviderError::Unavailable(_))
        ));
    }

    #[test]
    fn seeded_services_pick_the_same_prompts() {
        let a = service(MockGenerator::new(true));
        let b = service(MockGenerator::new(true));
        for _ in 0..5 {
            assert_eq!(a.prompt_for(&single("Mystery")), b.prompt_for(&single("Mystery")));
        }
    }
}
