//! # Authenticity Scorers
//!
//! `HistogramScorer` reads the uploaded media for POST_IMAGE transactions and
//! computes the Shannon entropy of the byte histogram (bits per byte, 0..=8)
//! and the standard deviation of byte values. Other actions score zero.
//!
//! The scores are recorded in the block. Admission thresholds are applied
//! only when `ScoringPolicy::enforce` is set.

use crate::ports::outbound::AuthenticityScorer;
use serde::{Deserialize, Serialize};
use shared_types::{Action, AuthenticityScore, ScoringError, Transaction};
use std::path::PathBuf;

/// Optional admission thresholds for uploaded media.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    /// Reject media outside the thresholds instead of only recording scores.
    pub enforce: bool,
    pub min_entropy: f64,
    pub min_std_dev: f64,
    pub max_std_dev: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            enforce: false,
            min_entropy: 7.0,
            min_std_dev: 40.0,
            max_std_dev: 90.0,
        }
    }
}

impl ScoringPolicy {
    /// True if `score` lies within the thresholds.
    pub fn admits(&self, score: &AuthenticityScore) -> bool {
        score.entropy >= self.min_entropy
            && score.std_dev >= self.min_std_dev
            && score.std_dev <= self.max_std_dev
    }
}

/// Entropy and standard deviation of `data`. Empty input scores zero.
pub fn analyze_bytes(data: &[u8]) -> AuthenticityScore {
    if data.is_empty() {
        return AuthenticityScore::default();
    }

    let mut counts = [0u64; 256];
    let mut sum = 0.0_f64;
    let mut sq_sum = 0.0_f64;
    for &byte in data {
        counts[byte as usize] += 1;
        let value = f64::from(byte);
        sum += value;
        sq_sum += value * value;
    }

    let total = data.len() as f64;
    let entropy: f64 = counts
        .iter()
        .filter(|&&count| count > 0)
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();

    let mean = sum / total;
    let variance = (sq_sum / total - mean * mean).max(0.0);

    AuthenticityScore::new(entropy, variance.sqrt())
}

/// Scores POST_IMAGE media read from the upload directory.
#[derive(Debug, Clone)]
pub struct HistogramScorer {
    upload_dir: PathBuf,
    policy: ScoringPolicy,
}

impl HistogramScorer {
    pub fn new(upload_dir: impl Into<PathBuf>, policy: ScoringPolicy) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            policy,
        }
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    fn score_media(&self, filename: &str) -> Result<AuthenticityScore, ScoringError> {
        let not_found = || ScoringError::MediaNotFound {
            filename: filename.to_owned(),
        };
        if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
            return Err(not_found());
        }

        let path = self.upload_dir.join(filename);
        let data = match std::fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(not_found()),
            Err(e) => {
                return Err(ScoringError::Unavailable(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let score = analyze_bytes(&data);
        tracing::debug!(
            filename,
            bytes = data.len(),
            entropy = score.entropy,
            std_dev = score.std_dev,
            "[pc-02] scored media"
        );

        if self.policy.enforce && !self.policy.admits(&score) {
            tracing::warn!(
                filename,
                entropy = score.entropy,
                std_dev = score.std_dev,
                "[pc-02] media rejected by scoring policy"
            );
            return Err(ScoringError::Rejected {
                entropy: score.entropy,
                std_dev: score.std_dev,
            });
        }
        Ok(score)
    }
}

impl AuthenticityScorer for HistogramScorer {
    fn score(&self, transaction: &Transaction) -> Result<AuthenticityScore, ScoringError> {
        match &transaction.action {
            Action::PostImage { content } => self.score_media(content),
            _ => Ok(AuthenticityScore::default()),
        }
    }
}

/// Scores every transaction zero. For tests and media-less deployments.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullScorer;

impl AuthenticityScorer for NullScorer {
    fn score(&self, _transaction: &Transaction) -> Result<AuthenticityScore, ScoringError> {
        Ok(AuthenticityScore::default())
    }
}
