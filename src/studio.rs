//! Generation orchestration.
//!
//! [`Studio`] validates the selection, assembles the instructions and runs the
//! image edit and the ad copy requests together, publishing both results at
//! once. [`Session`] is the UI-owned state the studio drives.

use crate::error::{AdCraftError, Result};
use crate::prompt;
use crate::provider::{Copywriter, ImageEditor};
use crate::selection::SelectionState;
use crate::types::{AdCopy, GeneratedImage, GenerationResult};
use std::time::Instant;

/// Message shown when a generation is requested while one is running.
pub const BUSY_MESSAGE: &str = "이미 광고 크리에이티브를 생성 중입니다.";

/// Orchestrates one image editor and one copywriter.
#[derive(Debug, Clone)]
pub struct Studio<E, C> {
    image_editor: E,
    copywriter: C,
}

#[cfg(feature = "gemini")]
impl Studio<crate::providers::GeminiImageEditor, crate::providers::GeminiCopywriter> {
    /// Studio backed by Gemini for both calls.
    pub fn gemini(client: &crate::providers::GeminiClient) -> Self {
        Self::new(client.image_editor(), client.copywriter())
    }
}

impl<E: ImageEditor, C: Copywriter> Studio<E, C> {
    /// Creates a studio from its two adapters.
    pub fn new(image_editor: E, copywriter: C) -> Self {
        Self {
            image_editor,
            copywriter,
        }
    }

    /// The image adapter.
    pub fn image_editor(&self) -> &E {
        &self.image_editor
    }

    /// The copy adapter.
    pub fn copywriter(&self) -> &C {
        &self.copywriter
    }

    /// Generates a creative and its copy.
    ///
    /// Fails without any remote call if image or style is missing. The copy
    /// request is skipped when brand and tone are both blank. A response
    /// without an image fails the whole generation, discarding any copy.
    pub async fn generate(&self, state: &SelectionState) -> Result<GenerationResult> {
        let (upload, style) = state.require_inputs()?;
        let instructions = prompt::assemble(state)?;
        let start = Instant::now();

        tracing::debug!(
            style = %style,
            image_adapter = self.image_editor.name(),
            copy_adapter = self.copywriter.name(),
            with_copy = instructions.copy.is_some(),
            "starting generation"
        );

        let copy_future = async {
            if instructions.copy.is_some() {
                self.copywriter
                    .write_copies(&state.brand_name, &state.tone_and_manner)
                    .await
            } else {
                Ok(Vec::new())
            }
        };

        let (image, copies) = tokio::join!(
            self.image_editor.edit(upload, &instructions.image),
            copy_future
        );

        let image: Option<GeneratedImage> = image?;
        let copies: Vec<AdCopy> = copies?;
        let image = image.ok_or_else(|| {
            tracing::warn!(
                discarded_copies = copies.len(),
                "image model returned no image"
            );
            AdCraftError::NoImage
        })?;

        tracing::debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            copies = copies.len(),
            "generation complete"
        );
        Ok(GenerationResult::success(image, copies))
    }

    /// Runs one generation against `session`, the way the UI drives it.
    ///
    /// Validation failures only set the error message; anything else resets
    /// the previous result, marks the session busy for the duration, and
    /// publishes either the full result or the error.
    pub async fn run<'s>(
        &self,
        session: &'s mut Session,
        state: &SelectionState,
    ) -> &'s GenerationResult {
        if session.busy {
            session.result.error = Some(BUSY_MESSAGE.to_string());
            return &session.result;
        }
        if let Err(e) = state.require_inputs() {
            session.result.error = Some(e.user_message());
            return &session.result;
        }

        session.busy = true;
        session.result = GenerationResult::default();

        session.result = match self.generate(state).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "generation failed");
                GenerationResult::failure(e.user_message())
            }
        };
        session.busy = false;
        &session.result
    }
}

/// UI-owned generation state: busy flag plus the last published result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    busy: bool,
    result: GenerationResult,
}

impl Session {
    /// Fresh idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a generation is in flight; the trigger should be disabled.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Last published result.
    pub fn result(&self) -> &GenerationResult {
        &self.result
    }

    /// Last error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.result.error.as_deref()
    }

    /// Clears the busy flag and result, e.g. after an abandoned run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AspectRatio, FrameSetting, StylePreset};
    use crate::selection::MISSING_INPUT_MESSAGE;
    use crate::upload::UploadedImage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone)]
    enum ImageOutcome {
        Image,
        Nothing,
        Fail(&'static str),
    }

    #[derive(Clone)]
    struct MockEditor {
        outcome: ImageOutcome,
        calls: Arc<AtomicUsize>,
        last_instruction: Arc<Mutex<Option<String>>>,
    }

    impl MockEditor {
        fn new(outcome: ImageOutcome) -> Self {
            Self {
                outcome,
                calls: Arc::new(AtomicUsize::new(0)),
                last_instruction: Arc::new(Mutex::new(None)),
            }
        }
    }

    #[async_trait]
    impl ImageEditor for MockEditor {
        async fn edit(
            &self,
            image: &UploadedImage,
            instruction: &str,
        ) -> Result<Option<GeneratedImage>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_instruction.lock().unwrap() = Some(instruction.to_string());
            tokio::time::sleep(Duration::from_millis(5)).await;
            match self.outcome {
                ImageOutcome::Image => Ok(Some(GeneratedImage::from_base64(
                    image.mime_type(),
                    "AAAA",
                ))),
                ImageOutcome::Nothing => Ok(None),
                ImageOutcome::Fail(msg) => Err(AdCraftError::Api {
                    status: 500,
                    message: msg.into(),
                }),
            }
        }

        fn name(&self) -> &str {
            "mock editor"
        }
    }

    #[derive(Clone)]
    enum CopyOutcome {
        Copies(Vec<&'static str>),
        Fail(&'static str),
    }

    #[derive(Clone)]
    struct MockCopywriter {
        outcome: CopyOutcome,
        calls: Arc<AtomicUsize>,
    }

    impl MockCopywriter {
        fn new(outcome: CopyOutcome) -> Self {
            Self {
                outcome,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl Copywriter for MockCopywriter {
        async fn write_copies(&self, _brand: &str, _tone: &str) -> Result<Vec<AdCopy>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.outcome {
                CopyOutcome::Copies(items) => Ok(items.iter().map(|c| AdCopy::new(*c)).collect()),
                CopyOutcome::Fail(msg) => Err(AdCraftError::Api {
                    status: 503,
                    message: (*msg).into(),
                }),
            }
        }

        fn name(&self) -> &str {
            "mock copywriter"
        }
    }

    fn upload() -> UploadedImage {
        UploadedImage::from_bytes(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg").unwrap()
    }

    fn ready_state() -> SelectionState {
        SelectionState::new()
            .with_image(upload())
            .with_style(StylePreset::Marble)
    }

    fn make_studio(
        image: ImageOutcome,
        copy: CopyOutcome,
    ) -> (Studio<MockEditor, MockCopywriter>, MockEditor, MockCopywriter) {
        let editor = MockEditor::new(image);
        let writer = MockCopywriter::new(copy);
        (Studio::new(editor.clone(), writer.clone()), editor, writer)
    }

    #[tokio::test]
    async fn test_missing_image_makes_no_calls() {
        let (studio, editor, writer) =
            make_studio(ImageOutcome::Image, CopyOutcome::Copies(vec!["x"]));
        let state = SelectionState::new()
            .with_style(StylePreset::Wood)
            .with_copy_brief("Aura", "");

        let err = studio.generate(&state).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), MISSING_INPUT_MESSAGE);
        assert_eq!(editor.calls.load(Ordering::SeqCst), 0);
        assert_eq!(writer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_style_makes_no_calls() {
        let (studio, editor, writer) = make_studio(ImageOutcome::Image, CopyOutcome::Copies(vec![]));
        let state = SelectionState::new().with_image(upload());

        assert!(studio.generate(&state).await.unwrap_err().is_validation());
        assert_eq!(editor.calls.load(Ordering::SeqCst), 0);
        assert_eq!(writer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blank_brief_skips_copywriter() {
        let (studio, editor, writer) =
            make_studio(ImageOutcome::Image, CopyOutcome::Copies(vec!["unused"]));
        let state = ready_state().with_copy_brief("  ", "");

        let result = studio.generate(&state).await.unwrap();
        assert!(result.generated_image.is_some());
        assert!(result.generated_copies.is_empty());
        assert_eq!(editor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(writer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_brief_invokes_copywriter() {
        for (brand, tone) in [("Aura", ""), ("", "playful"), ("Aura", "playful")] {
            let (studio, _, writer) =
                make_studio(ImageOutcome::Image, CopyOutcome::Copies(vec!["a", "b", "c"]));
            let state = ready_state().with_copy_brief(brand, tone);

            let result = studio.generate(&state).await.unwrap();
            assert_eq!(writer.calls.load(Ordering::SeqCst), 1);
            let copies: Vec<&str> = result
                .generated_copies
                .iter()
                .map(|c| c.copy.as_str())
                .collect();
            assert_eq!(copies, vec!["a", "b", "c"]);
            assert!(result.error.is_none());
        }
    }

    #[tokio::test]
    async fn test_no_image_fails_and_discards_copy() {
        let (studio, _, writer) =
            make_studio(ImageOutcome::Nothing, CopyOutcome::Copies(vec!["lost"]));
        let state = ready_state().with_copy_brief("Aura", "playful");

        let err = studio.generate(&state).await.unwrap_err();
        assert!(matches!(err, AdCraftError::NoImage));
        assert_eq!(writer.calls.load(Ordering::SeqCst), 1);

        let mut session = Session::new();
        let result = studio.run(&mut session, &state).await;
        assert!(result.generated_image.is_none());
        assert!(result.generated_copies.is_empty());
        assert_eq!(
            result.error.as_deref(),
            Some(AdCraftError::NoImage.to_string().as_str())
        );
    }

    /// Serves one canned `200 OK` JSON body on a local port.
    #[cfg(feature = "gemini")]
    async fn serve_once(body: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
                    let len = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if request.len() >= end + 4 + len {
                        break;
                    }
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}")
    }

    #[cfg(feature = "gemini")]
    #[tokio::test]
    async fn test_unparsable_copy_still_succeeds() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "Sure! 1. Glow like Aura 2. Shine on"}]}, "finishReason": "STOP"}]}"#;
        let client = crate::providers::GeminiClient::builder()
            .api_key("test-key")
            .base_url(serve_once(body).await)
            .build()
            .unwrap();
        let editor = MockEditor::new(ImageOutcome::Image);
        let studio = Studio::new(editor.clone(), client.copywriter());
        let state = ready_state().with_copy_brief("Aura", "playful");

        let result = studio.generate(&state).await.unwrap();
        assert!(result.generated_image.is_some());
        assert!(result.error.is_none());
        assert_eq!(
            result.generated_copies,
            vec![AdCopy::new(crate::providers::COPY_FALLBACK_MESSAGE)]
        );
        assert_eq!(editor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_adapter_errors_surface_message() {
        let (studio, _, _) = make_studio(
            ImageOutcome::Fail("quota exhausted"),
            CopyOutcome::Copies(vec![]),
        );
        let mut session = Session::new();
        let result = studio.run(&mut session, &ready_state()).await;
        assert_eq!(result.error.as_deref(), Some("quota exhausted"));
        assert!(!session.is_busy());

        let (studio, _, _) = make_studio(ImageOutcome::Image, CopyOutcome::Fail("copy down"));
        let state = ready_state().with_copy_brief("Aura", "");
        let result = studio.run(&mut session, &state).await;
        assert!(result.generated_image.is_none());
        assert_eq!(result.error.as_deref(), Some("copy down"));
    }

    #[tokio::test]
    async fn test_empty_service_message_uses_fallback() {
        let (studio, _, _) = make_studio(ImageOutcome::Fail(""), CopyOutcome::Copies(vec![]));
        let mut session = Session::new();
        studio.run(&mut session, &ready_state()).await;
        assert_eq!(session.error(), Some(crate::error::GENERIC_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_run_publishes_and_resets() {
        let (studio, _, _) = make_studio(ImageOutcome::Image, CopyOutcome::Copies(vec!["hi"]));
        let mut session = Session::new();

        let state = ready_state().with_copy_brief("Aura", "");
        let result = studio.run(&mut session, &state).await.clone();
        assert!(result.generated_image.is_some());
        assert_eq!(result.generated_copies.len(), 1);
        assert!(!session.is_busy());

        // A second failing run replaces the earlier success entirely.
        let (failing, _, _) = make_studio(ImageOutcome::Nothing, CopyOutcome::Copies(vec![]));
        failing.run(&mut session, &state).await;
        assert!(session.result().generated_image.is_none());
        assert!(session.error().is_some());
    }

    #[tokio::test]
    async fn test_run_validation_keeps_previous_result() {
        let (studio, editor, _) = make_studio(ImageOutcome::Image, CopyOutcome::Copies(vec![]));
        let mut session = Session::new();
        studio.run(&mut session, &ready_state()).await;
        assert!(session.result().generated_image.is_some());

        studio.run(&mut session, &SelectionState::new()).await;
        assert_eq!(session.error(), Some(MISSING_INPUT_MESSAGE));
        assert!(session.result().generated_image.is_some());
        assert_eq!(editor.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_run_refuses_busy_session() {
        let (studio, editor, _) = make_studio(ImageOutcome::Image, CopyOutcome::Copies(vec![]));
        let mut session = Session {
            busy: true,
            result: GenerationResult::default(),
        };
        studio.run(&mut session, &ready_state()).await;
        assert_eq!(session.error(), Some(BUSY_MESSAGE));
        assert_eq!(editor.calls.load(Ordering::SeqCst), 0);

        session.reset();
        assert!(!session.is_busy());
        assert!(session.result().is_empty());
    }

    #[tokio::test]
    async fn test_instruction_reaches_image_adapter() {
        let (studio, editor, _) = make_studio(ImageOutcome::Image, CopyOutcome::Copies(vec![]));
        let mut state = ready_state()
            .with_aspect_ratio(AspectRatio::Square)
            .with_frame_setting(FrameSetting::Filled);
        state.set_quantity(2).unwrap();

        studio.generate(&state).await.unwrap();
        let sent = editor.last_instruction.lock().unwrap().clone().unwrap();
        assert_eq!(sent, prompt::build_image_instruction(&state).unwrap());
        assert!(sent.contains("1:1"));
        assert!(sent.contains(prompt::FRAME_FILLED_CLAUSE));
    }

    #[tokio::test]
    async fn test_requests_run_concurrently() {
        struct SlowWriter(Arc<AtomicUsize>);

        #[async_trait]
        impl Copywriter for SlowWriter {
            async fn write_copies(&self, _: &str, _: &str) -> Result<Vec<AdCopy>> {
                tokio::time::sleep(Duration::from_millis(200)).await;
                self.0.fetch_add(1, Ordering::SeqCst);
                Ok(vec![AdCopy::new("slow")])
            }

            fn name(&self) -> &str {
                "slow"
            }
        }

        struct SlowEditor;

        #[async_trait]
        impl ImageEditor for SlowEditor {
            async fn edit(&self, _: &UploadedImage, _: &str) -> Result<Option<GeneratedImage>> {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(Some(GeneratedImage::from_base64("image/png", "AAAA")))
            }

            fn name(&self) -> &str {
                "slow"
            }
        }

        let done = Arc::new(AtomicUsize::new(0));
        let studio = Studio::new(SlowEditor, SlowWriter(done.clone()));
        let state = ready_state().with_copy_brief("Aura", "");

        let start = Instant::now();
        let result = studio.generate(&state).await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(390));
        assert_eq!(done.load(Ordering::SeqCst), 1);
        assert_eq!(result.generated_copies.len(), 1);
    }
}
