//! The editing orchestrator: template resolution, input validation, and
//! provider dispatch.
//!
//! `Editor` owns a provider and a shared template registry. Edit and
//! generate prompts pass through the registry so template names expand to
//! full prompts; combine prompts never do, since combine instructions are
//! free text describing how the inputs merge.

use crate::error::{PrismError, ValidationError};
use crate::format::ImageFormat;
use crate::provider::{EditResult, Provider, SourceImage};
use crate::template::TemplateRegistry;
use std::sync::Arc;

/// Orchestrates image operations against a single provider.
pub struct Editor {
    registry: Arc<TemplateRegistry>,
    provider: Box<dyn Provider>,
}

impl Editor {
    pub fn new(registry: Arc<TemplateRegistry>, provider: Box<dyn Provider>) -> Self {
        Self { registry, provider }
    }

    /// Name of the underlying provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Edit an image according to a prompt or template name.
    pub async fn edit(
        &self,
        image: &[u8],
        prompt_or_template: &str,
        mime_type: Option<&str>,
    ) -> Result<EditResult, PrismError> {
        let prompt = self.registry.resolve_prompt(prompt_or_template);
        if prompt != prompt_or_template {
            tracing::debug!("Resolved template '{prompt_or_template}'");
        }
        Ok(self.provider.edit(image, prompt, mime_type).await?)
    }

    /// Generate an image from a prompt or template name.
    pub async fn generate(&self, prompt_or_template: &str) -> Result<EditResult, PrismError> {
        let prompt = self.registry.resolve_prompt(prompt_or_template);
        if prompt != prompt_or_template {
            tracing::debug!("Resolved template '{prompt_or_template}'");
        }
        Ok(self.provider.generate(prompt).await?)
    }

    /// Combine two or more images according to a free-text prompt.
    ///
    /// Fails fast with a validation error before any provider call when
    /// fewer than two images are given. Missing MIME types are filled by
    /// sniffing the bytes, defaulting to PNG.
    pub async fn combine(
        &self,
        mut images: Vec<SourceImage>,
        prompt: &str,
    ) -> Result<EditResult, PrismError> {
        if images.len() < 2 {
            return Err(ValidationError::TooFewImages {
                count: images.len(),
            }
            .into());
        }
        for image in &mut images {
            if image.mime_type.is_none() {
                let mime = ImageFormat::detect(&image.data)
                    .map(|f| f.mime_type())
                    .unwrap_or("image/png");
                image.mime_type = Some(mime.to_string());
            }
        }
        // Combine prompts are free text; template names are not expanded here
        Ok(self.provider.combine(&images, prompt).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// What the stub provider saw for each call, for post-hoc assertions.
    #[derive(Debug)]
    enum RecordedCall {
        Edit {
            prompt: String,
            mime_type: Option<String>,
        },
        Generate {
            prompt: String,
        },
        Combine {
            mimes: Vec<Option<String>>,
            prompt: String,
        },
    }

    /// A recording stub provider for testing orchestrator behavior.
    struct StubProvider {
        call_count: Arc<AtomicU32>,
        recorded: Arc<Mutex<Vec<RecordedCall>>>,
        fail_with: Option<fn() -> ProviderError>,
    }

    impl StubProvider {
        fn ok() -> Self {
            Self {
                call_count: Arc::new(AtomicU32::new(0)),
                recorded: Arc::new(Mutex::new(Vec::new())),
                fail_with: None,
            }
        }

        fn failing(factory: fn() -> ProviderError) -> Self {
            Self {
                fail_with: Some(factory),
                ..Self::ok()
            }
        }

        fn call_count_handle(&self) -> Arc<AtomicU32> {
            self.call_count.clone()
        }

        fn recorded_handle(&self) -> Arc<Mutex<Vec<RecordedCall>>> {
            self.recorded.clone()
        }

        fn result(&self) -> Result<EditResult, ProviderError> {
            match self.fail_with {
                Some(factory) => Err(factory()),
                None => Ok(EditResult {
                    image_data: vec![9, 9, 9],
                    mime_type: "image/png".to_string(),
                    provider: "stub".to_string(),
                    model: Some("stub-v1".to_string()),
                }),
            }
        }
    }

    #[async_trait]
    impl Provider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn edit(
            &self,
            _image: &[u8],
            prompt: &str,
            mime_type: Option<&str>,
        ) -> Result<EditResult, ProviderError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.recorded.lock().unwrap().push(RecordedCall::Edit {
                prompt: prompt.to_string(),
                mime_type: mime_type.map(String::from),
            });
            self.result()
        }

        async fn generate(&self, prompt: &str) -> Result<EditResult, ProviderError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.recorded.lock().unwrap().push(RecordedCall::Generate {
                prompt: prompt.to_string(),
            });
            self.result()
        }

        async fn combine(
            &self,
            images: &[SourceImage],
            prompt: &str,
        ) -> Result<EditResult, ProviderError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.recorded.lock().unwrap().push(RecordedCall::Combine {
                mimes: images.iter().map(|i| i.mime_type.clone()).collect(),
                prompt: prompt.to_string(),
            });
            self.result()
        }
    }

    fn editor_with(provider: StubProvider) -> Editor {
        Editor::new(
            Arc::new(TemplateRegistry::with_builtins()),
            Box::new(provider),
        )
    }

    const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
    const UNKNOWN_BYTES: &[u8] = &[0x00, 0x01, 0x02, 0x03, 0x04];

    #[tokio::test(flavor = "multi_thread")]
    async fn test_edit_resolves_template_name() {
        let provider = StubProvider::ok();
        let recorded = provider.recorded_handle();
        let editor = editor_with(provider);

        editor.edit(JPEG_BYTES, "remove-bg", None).await.unwrap();

        let calls = recorded.lock().unwrap();
        match &calls[0] {
            RecordedCall::Edit { prompt, .. } => {
                assert_ne!(prompt, "remove-bg");
                assert!(prompt.contains("transparent"), "Got: {prompt}");
            }
            other => panic!("Expected edit call, got: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_edit_passes_literal_prompt_through() {
        let provider = StubProvider::ok();
        let recorded = provider.recorded_handle();
        let editor = editor_with(provider);

        editor
            .edit(JPEG_BYTES, "make the sky purple", Some("image/jpeg"))
            .await
            .unwrap();

        let calls = recorded.lock().unwrap();
        match &calls[0] {
            RecordedCall::Edit { prompt, mime_type } => {
                assert_eq!(prompt, "make the sky purple");
                assert_eq!(mime_type.as_deref(), Some("image/jpeg"));
            }
            other => panic!("Expected edit call, got: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_generate_resolves_alias() {
        let provider = StubProvider::ok();
        let recorded = provider.recorded_handle();
        let editor = editor_with(provider);

        editor.generate("improve").await.unwrap();

        let calls = recorded.lock().unwrap();
        match &calls[0] {
            RecordedCall::Generate { prompt } => {
                // "improve" is an alias for the enhance template
                assert_ne!(prompt, "improve");
                assert!(prompt.contains("lighting"), "Got: {prompt}");
            }
            other => panic!("Expected generate call, got: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_combine_rejects_zero_images() {
        let provider = StubProvider::ok();
        let call_count = provider.call_count_handle();
        let editor = editor_with(provider);

        let err = editor.combine(vec![], "merge them").await.unwrap_err();
        match err {
            PrismError::Validation(ValidationError::TooFewImages { count }) => {
                assert_eq!(count, 0);
            }
            other => panic!("Expected TooFewImages, got: {other}"),
        }
        // Provider never called
        assert_eq!(call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_combine_rejects_single_image() {
        let provider = StubProvider::ok();
        let call_count = provider.call_count_handle();
        let editor = editor_with(provider);

        let images = vec![SourceImage::new(JPEG_BYTES.to_vec())];
        let err = editor.combine(images, "merge them").await.unwrap_err();
        assert!(matches!(
            err,
            PrismError::Validation(ValidationError::TooFewImages { count: 1 })
        ));
        assert_eq!(call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_combine_fills_missing_mime_types() {
        let provider = StubProvider::ok();
        let recorded = provider.recorded_handle();
        let editor = editor_with(provider);

        let images = vec![
            SourceImage::new(JPEG_BYTES.to_vec()),
            SourceImage::new(UNKNOWN_BYTES.to_vec()),
            SourceImage::with_mime(UNKNOWN_BYTES.to_vec(), "image/webp"),
        ];
        editor.combine(images, "stack these").await.unwrap();

        let calls = recorded.lock().unwrap();
        match &calls[0] {
            RecordedCall::Combine { mimes, .. } => {
                assert_eq!(mimes[0].as_deref(), Some("image/jpeg"));
                // Unknown bytes fall back to PNG
                assert_eq!(mimes[1].as_deref(), Some("image/png"));
                // Explicit MIME types are left alone
                assert_eq!(mimes[2].as_deref(), Some("image/webp"));
            }
            other => panic!("Expected combine call, got: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_combine_does_not_resolve_templates() {
        let provider = StubProvider::ok();
        let recorded = provider.recorded_handle();
        let editor = editor_with(provider);

        let images = vec![
            SourceImage::new(JPEG_BYTES.to_vec()),
            SourceImage::new(JPEG_BYTES.to_vec()),
        ];
        // "remove-bg" is a template name, but combine treats it as free text
        editor.combine(images, "remove-bg").await.unwrap();

        let calls = recorded.lock().unwrap();
        match &calls[0] {
            RecordedCall::Combine { prompt, .. } => {
                assert_eq!(prompt, "remove-bg");
            }
            other => panic!("Expected combine call, got: {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_provider_error_passes_through_unwrapped() {
        let provider = StubProvider::failing(|| ProviderError::NoImage {
            provider: "stub".to_string(),
        });
        let editor = editor_with(provider);

        let err = editor.edit(JPEG_BYTES, "enhance", None).await.unwrap_err();
        // Wrapped exactly once: the ProviderError variant is still matchable
        match err {
            PrismError::Provider(ProviderError::NoImage { provider }) => {
                assert_eq!(provider, "stub");
            }
            other => panic!("Expected passthrough NoImage, got: {other}"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_result_fields_pass_through() {
        let editor = editor_with(StubProvider::ok());
        let result = editor.generate("a quiet forest").await.unwrap();
        assert_eq!(result.image_data, vec![9, 9, 9]);
        assert_eq!(result.mime_type, "image/png");
        assert_eq!(result.provider, "stub");
        assert_eq!(result.model.as_deref(), Some("stub-v1"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_empty_registry_passes_prompts_unchanged() {
        let provider = StubProvider::ok();
        let recorded = provider.recorded_handle();
        let editor = Editor::new(Arc::new(TemplateRegistry::new()), Box::new(provider));

        editor.edit(JPEG_BYTES, "remove-bg", None).await.unwrap();

        let calls = recorded.lock().unwrap();
        match &calls[0] {
            RecordedCall::Edit { prompt, .. } => assert_eq!(prompt, "remove-bg"),
            other => panic!("Expected edit call, got: {other:?}"),
        }
    }
}
