//! Decoding and shape checks for service responses.
//!
//! Every payload coming back from the service goes through [`decode`], so a
//! malformed response becomes an [`AnalysisError::InvalidResponse`] here
//! instead of a half-filled value further down in the views.

use serde::de::DeserializeOwned;

use crate::error::{AnalysisError, Result};
use crate::types::{
    AspectAnalysisResponse, BulkAnalysisResponse, EmotionProbabilities, EmotionResponse,
    SentimentResponse, SentimentScores, UrlContent,
};

/// Slack allowed around [0, 1] for model probabilities.
const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Structural checks that serde alone cannot express.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Parse a response body and validate it.
pub fn decode<T: DeserializeOwned + Validate>(body: &str) -> Result<T> {
    let value: T = serde_json::from_str(body)?;
    value.validate()?;
    Ok(value)
}

fn check_probability(field: &str, value: f64) -> Result<()> {
    if !value.is_finite()
        || value < -PROBABILITY_TOLERANCE
        || value > 1.0 + PROBABILITY_TOLERANCE
    {
        return Err(AnalysisError::InvalidResponse(format!(
            "{} out of range: {}",
            field, value
        )));
    }
    Ok(())
}

impl Validate for SentimentScores {
    fn validate(&self) -> Result<()> {
        check_probability("scores.positive", self.positive)?;
        check_probability("scores.neutral", self.neutral)?;
        check_probability("scores.negative", self.negative)
    }
}

impl Validate for SentimentResponse {
    fn validate(&self) -> Result<()> {
        self.scores.validate()?;
        if let Some(ref risk) = self.risk_analysis {
            check_probability("risk_analysis.risk_score", risk.risk_score)?;
        }
        Ok(())
    }
}

impl Validate for EmotionProbabilities {
    fn validate(&self) -> Result<()> {
        for (emotion, p) in self.iter() {
            check_probability(&format!("probabilities.{}", emotion), p)?;
        }
        Ok(())
    }
}

impl Validate for EmotionResponse {
    fn validate(&self) -> Result<()> {
        self.probabilities.validate()
    }
}

impl Validate for AspectAnalysisResponse {
    fn validate(&self) -> Result<()> {
        for aspect in &self.aspects {
            check_probability("aspect.confidence", aspect.confidence)?;
            aspect.probabilities.validate()?;
            if aspect.position.start > aspect.position.end {
                return Err(AnalysisError::InvalidResponse(format!(
                    "aspect '{}' has an inverted position",
                    aspect.aspect
                )));
            }
        }
        check_probability("overall_sentiment.confidence", self.overall_sentiment.confidence)?;
        self.overall_sentiment.probabilities.validate()?;
        if self.total_aspects != self.aspects.len() {
            return Err(AnalysisError::InvalidResponse(format!(
                "total_aspects is {} but {} aspects were returned",
                self.total_aspects,
                self.aspects.len()
            )));
        }
        Ok(())
    }
}

impl Validate for BulkAnalysisResponse {
    fn validate(&self) -> Result<()> {
        for item in &self.results {
            item.scores.validate()?;
            item.probabilities.validate()?;
        }
        if self.successful + self.failed != self.total {
            return Err(AnalysisError::InvalidResponse(format!(
                "successful ({}) + failed ({}) does not match total ({})",
                self.successful, self.failed, self.total
            )));
        }
        if self.results.len() != self.successful {
            return Err(AnalysisError::InvalidResponse(format!(
                "{} results returned for {} successful analyses",
                self.results.len(),
                self.successful
            )));
        }
        Ok(())
    }
}

impl Validate for UrlContent {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}
