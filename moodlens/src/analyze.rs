//! Input validation and the analysis workflows built on [`AnalysisApi`].
//!
//! Everything here checks its input before the first network call, so a
//! rejected submission never reaches the service.

use tracing::{debug, info};
use url::Url;

use crate::api::AnalysisApi;
use crate::error::{AnalysisError, Result};
use crate::types::{BulkAnalysisResponse, ComprehensiveAnalysis, SentimentResponse};

/// Most texts accepted in one submission.
pub const MAX_TEXTS: usize = 50;

/// Shortest extracted page text worth analyzing.
pub const MIN_URL_TEXT_LEN: usize = 10;

pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to analyze";
pub const TOO_MANY_TEXTS_MESSAGE: &str = "Maximum 50 texts allowed per analysis";
pub const EMPTY_BATCH_MESSAGE: &str = "Please enter at least one text to analyze";
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid http(s) URL";
pub const NO_URL_TEXT_MESSAGE: &str = "Could not extract meaningful text from URL";

/// Split free-form input into texts on `;`, `,` and newlines.
///
/// Pieces are trimmed and blank pieces dropped.
pub fn split_texts(input: &str) -> Vec<String> {
    input
        .split([';', ',', '\n'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split and check a free-form submission.
///
/// Input made only of separators is submitted whole, as a single text.
pub fn validate_texts(input: &str) -> Result<Vec<String>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::validation(EMPTY_INPUT_MESSAGE));
    }

    let mut texts = split_texts(input);
    if texts.is_empty() {
        texts.push(trimmed.to_string());
    }
    if texts.len() > MAX_TEXTS {
        return Err(AnalysisError::validation(TOO_MANY_TEXTS_MESSAGE));
    }
    Ok(texts)
}

/// Keep the non-blank entries of a batch, enforcing 1..=[`MAX_TEXTS`].
pub fn validate_bulk(texts: &[String]) -> Result<Vec<String>> {
    let valid: Vec<String> = texts.iter().filter(|t| !t.trim().is_empty()).cloned().collect();

    if valid.is_empty() {
        return Err(AnalysisError::validation(EMPTY_BATCH_MESSAGE));
    }
    if valid.len() > MAX_TEXTS {
        return Err(AnalysisError::validation(TOO_MANY_TEXTS_MESSAGE));
    }
    Ok(valid)
}

/// Accept absolute `http`/`https` URLs only.
pub fn validate_url(input: &str) -> Result<Url> {
    let url = Url::parse(input.trim()).map_err(|_| AnalysisError::validation(INVALID_URL_MESSAGE))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(AnalysisError::validation(INVALID_URL_MESSAGE)),
    }
}

/// Sentiment for a single text.
pub async fn analyze_sentiment<A: AnalysisApi>(api: &A, text: &str) -> Result<SentimentResponse> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AnalysisError::validation(EMPTY_INPUT_MESSAGE));
    }
    api.analyze_sentiment(text).await
}

/// Sentiment, emotion and aspects for a submission.
///
/// Multi-text input analyzes only the first text; the full list is kept on
/// the result. The three calls run concurrently and the first failure fails
/// the whole analysis.
pub async fn analyze_comprehensive<A: AnalysisApi>(
    api: &A,
    input: &str,
    timestamp: i64,
) -> Result<ComprehensiveAnalysis> {
    let mut texts = validate_texts(input)?;
    let text = texts[0].clone();
    let texts = if texts.len() > 1 {
        debug!(count = texts.len(), "Analyzing first of several texts");
        Some(std::mem::take(&mut texts))
    } else {
        None
    };

    analyze_text(api, text, texts, timestamp).await
}

/// Fetch a page through the service and analyze its text.
pub async fn analyze_url<A: AnalysisApi>(
    api: &A,
    input: &str,
    timestamp: i64,
) -> Result<ComprehensiveAnalysis> {
    let url = validate_url(input)?;
    let content = api.fetch_url(url.as_str()).await?;

    let text = content.text.trim();
    if text.chars().count() < MIN_URL_TEXT_LEN {
        return Err(AnalysisError::request(NO_URL_TEXT_MESSAGE));
    }

    info!(
        url = %content.url,
        length = content.length,
        title = content.title.as_deref().unwrap_or(""),
        "Fetched page text"
    );
    analyze_text(api, text.to_string(), None, timestamp).await
}

/// One bulk call over the non-blank texts.
pub async fn analyze_bulk<A: AnalysisApi>(api: &A, texts: &[String]) -> Result<BulkAnalysisResponse> {
    let texts = validate_bulk(texts)?;
    api.analyze_bulk(&texts).await
}

async fn analyze_text<A: AnalysisApi>(
    api: &A,
    text: String,
    texts: Option<Vec<String>>,
    timestamp: i64,
) -> Result<ComprehensiveAnalysis> {
    let (sentiment, emotion, aspects) = futures::try_join!(
        api.analyze_sentiment(&text),
        api.analyze_emotion(&text),
        api.analyze_aspects(&text),
    )?;

    Ok(ComprehensiveAnalysis {
        text,
        texts,
        sentiment,
        emotion,
        aspects,
        timestamp,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::types::*;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    /// Scripted [`AnalysisApi`] that counts calls.
    #[derive(Default)]
    pub(crate) struct MockApi {
        pub sentiment: Option<SentimentResponse>,
        pub fail_sentiment: Option<String>,
        pub fail_emotion: Option<String>,
        pub page_text: String,
        pub calls: Cell<usize>,
        pub seen: RefCell<Vec<String>>,
    }

    impl MockApi {
        pub(crate) fn positive() -> Self {
            Self {
                sentiment: Some(SentimentResponse::new(
                    Sentiment::Positive,
                    SentimentScores::new(0.95, 0.02, 0.03),
                )),
                page_text: "A long enough page about good things.".to_string(),
                ..Default::default()
            }
        }

        fn record(&self, what: &str) {
            self.calls.set(self.calls.get() + 1);
            self.seen.borrow_mut().push(what.to_string());
        }
    }

    pub(crate) fn emotion() -> EmotionResponse {
        EmotionResponse {
            emotion: Emotion::Joy,
            probabilities: EmotionProbabilities {
                joy: 0.8,
                neutral: 0.1,
                surprise: 0.1,
                ..Default::default()
            },
        }
    }

    pub(crate) fn aspects(text: &str) -> AspectAnalysisResponse {
        AspectAnalysisResponse {
            text: text.to_string(),
            aspects: Vec::new(),
            overall_sentiment: OverallSentiment {
                sentiment: Sentiment::Positive,
                confidence: 0.9,
                probabilities: SentimentScores::new(0.9, 0.05, 0.05),
            },
            total_aspects: 0,
        }
    }

    impl AnalysisApi for MockApi {
        async fn analyze_sentiment(&self, text: &str) -> Result<SentimentResponse> {
            self.record(text);
            if let Some(ref msg) = self.fail_sentiment {
                return Err(AnalysisError::request(msg.clone()));
            }
            self.sentiment
                .clone()
                .ok_or_else(|| AnalysisError::request("Failed to analyze sentiment"))
        }

        async fn analyze_emotion(&self, text: &str) -> Result<EmotionResponse> {
            self.record(text);
            match self.fail_emotion {
                Some(ref msg) => Err(AnalysisError::request(msg.clone())),
                None => Ok(emotion()),
            }
        }

        async fn analyze_aspects(&self, text: &str) -> Result<AspectAnalysisResponse> {
            self.record(text);
            Ok(aspects(text))
        }

        async fn analyze_bulk(&self, texts: &[String]) -> Result<BulkAnalysisResponse> {
            self.record(&texts.join("|"));
            Ok(BulkAnalysisResponse {
                results: Vec::new(),
                total: texts.len(),
                successful: 0,
                failed: texts.len(),
            })
        }

        async fn fetch_url(&self, url: &str) -> Result<UrlContent> {
            self.record(url);
            Ok(UrlContent {
                url: url.to_string(),
                text: self.page_text.clone(),
                title: Some("Page".to_string()),
                length: self.page_text.len(),
            })
        }
    }

    #[test]
    fn test_split_texts() {
        assert_eq!(
            split_texts("good; bad,\n  ok  ,,;\n"),
            vec!["good".to_string(), "bad".to_string(), "ok".to_string()]
        );
        assert!(split_texts(" ;,\n ").is_empty());
    }

    #[test]
    fn test_validate_texts_messages() {
        assert_eq!(validate_texts("   ").unwrap_err().to_string(), EMPTY_INPUT_MESSAGE);

        let many = vec!["x"; 51].join(";");
        assert_eq!(validate_texts(&many).unwrap_err().to_string(), TOO_MANY_TEXTS_MESSAGE);

        let fifty = vec!["x"; 50].join(";");
        assert_eq!(validate_texts(&fifty).unwrap().len(), 50);
    }

    #[test]
    fn test_separator_only_input_is_one_text() {
        assert_eq!(validate_texts(" ,;, ").unwrap(), vec![",;,".to_string()]);
        assert_eq!(validate_texts("\n;\n").unwrap(), vec![";".to_string()]);
    }

    #[test]
    fn test_validate_bulk() {
        let blank = vec!["".to_string(), "  ".to_string()];
        assert_eq!(validate_bulk(&blank).unwrap_err().to_string(), EMPTY_BATCH_MESSAGE);

        let mixed = vec!["a".to_string(), " ".to_string(), "b".to_string()];
        assert_eq!(validate_bulk(&mixed).unwrap(), vec!["a".to_string(), "b".to_string()]);

        let many: Vec<String> = (0..51).map(|i| i.to_string()).collect();
        assert!(validate_bulk(&many).unwrap_err().is_validation());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://example.com/post").is_ok());
        assert!(validate_url(" http://localhost:3000 ").is_ok());
        for bad in ["example.com", "ftp://example.com", "mailto:a@b.c", ""] {
            assert_eq!(validate_url(bad).unwrap_err().to_string(), INVALID_URL_MESSAGE);
        }
    }

    #[test]
    fn test_empty_text_makes_no_call() {
        let api = MockApi::positive();
        let err = block_on(analyze_sentiment(&api, "   ")).unwrap_err();
        assert_eq!(err.to_string(), EMPTY_INPUT_MESSAGE);
        assert_eq!(api.calls.get(), 0);

        let err = block_on(analyze_comprehensive(&api, "\n", 1)).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(api.calls.get(), 0);
    }

    #[test]
    fn test_too_many_texts_makes_no_call() {
        let api = MockApi::positive();
        let input = vec!["fine"; 51].join("\n");
        assert!(block_on(analyze_comprehensive(&api, &input, 1)).is_err());
        assert_eq!(api.calls.get(), 0);
    }

    #[test]
    fn test_comprehensive_uses_first_text() {
        let api = MockApi::positive();
        let result = block_on(analyze_comprehensive(&api, "great phone; awful case", 42)).unwrap();

        assert_eq!(result.text, "great phone");
        assert_eq!(
            result.texts,
            Some(vec!["great phone".to_string(), "awful case".to_string()])
        );
        assert_eq!(result.timestamp, 42);
        assert_eq!(api.calls.get(), 3);
        assert!(api.seen.borrow().iter().all(|t| t == "great phone"));
    }

    #[test]
    fn test_comprehensive_fails_if_any_call_fails() {
        let api = MockApi {
            fail_emotion: Some("Model unavailable".to_string()),
            ..MockApi::positive()
        };
        let err = block_on(analyze_comprehensive(&api, "hello there", 1)).unwrap_err();
        assert_eq!(err.to_string(), "Model unavailable");
    }

    #[test]
    fn test_url_analysis() {
        let api = MockApi::positive();
        let result = block_on(analyze_url(&api, "https://example.com/a", 7)).unwrap();
        assert_eq!(result.text, "A long enough page about good things.");
        assert_eq!(api.seen.borrow()[0], "https://example.com/a");
    }

    #[test]
    fn test_url_with_too_little_text() {
        let api = MockApi {
            page_text: "  short ".to_string(),
            ..MockApi::positive()
        };
        let err = block_on(analyze_url(&api, "https://example.com", 7)).unwrap_err();
        assert_eq!(err.to_string(), NO_URL_TEXT_MESSAGE);
        assert_eq!(api.calls.get(), 1);
    }

    #[test]
    fn test_bulk_sends_only_non_blank() {
        let api = MockApi::positive();
        let texts = vec!["one".to_string(), "".to_string(), "two".to_string()];
        let result = block_on(analyze_bulk(&api, &texts)).unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(api.seen.borrow()[0], "one|two");
    }
}
