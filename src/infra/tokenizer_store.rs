// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Provides the sub-tokenizer the encoders run on.
//
//   TokenizerStore — loads <dir>/tokenizer.json, or builds a
//                    word-level tokenizer from the corpus texts
//                    and saves it there first
//   HfSubTokenizer — adapts a HuggingFace Tokenizer to the
//                    SubTokenizer trait from Layer 3
//
// The built vocabulary reserves the ids the default
// EncoderConfig expects:
//
//   <s>   = 0   leading marker
//   </s>  = 1   trailing marker
//   <pad> = 2
//   <unk> = 3
//
// In tokenizers 0.15, train_from_files requires Trainer::Model
// to equal ModelWrapper. We write the tokenizer JSON by hand
// and load it back instead.
//
// Markers are never added by the HuggingFace post-processor:
// the window stage decides where they go after truncation.
//
// Reference: HuggingFace tokenizers documentation

use anyhow::{Context, Result};
use std::{collections::HashMap, fs, path::PathBuf};
use tokenizers::Tokenizer;

use crate::domain::config::EncoderConfig;
use crate::domain::error::PipelineError;
use crate::domain::traits::SubTokenizer;

pub const TOKENIZER_FILE: &str = "tokenizer.json";

const SPECIAL_TOKENS: [&str; 4] = ["<s>", "</s>", "<pad>", "<unk>"];
const UNK_TOKEN: &str = "<unk>";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load the saved tokenizer, or build one from `texts`.
    pub fn load_or_build(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        if self.dir.join(TOKENIZER_FILE).exists() {
            tracing::info!("Loading existing tokenizer from '{}'", self.dir.display());
            self.load()
        } else {
            tracing::info!("Building new tokenizer (vocab_size={})", vocab_size);
            self.build_and_save(texts, vocab_size)
        }
    }

    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join(TOKENIZER_FILE);
        Tokenizer::from_file(&path)
            .map_err(|e| anyhow::anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e))
    }

    /// Count lowercased whitespace-separated words, keep the
    /// `vocab_size - 4` most frequent ones after the special
    /// tokens, and write a WordLevel tokenizer JSON.
    pub fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<Tokenizer> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        let mut freq: HashMap<String, usize> = HashMap::new();
        for text in texts {
            for word in text.split_whitespace() {
                *freq.entry(word.to_lowercase()).or_insert(0) += 1;
            }
        }

        // Frequency first, then alphabetical so rebuilds are stable
        let mut words: Vec<(String, usize)> = freq
            .into_iter()
            .filter(|(w, _)| !SPECIAL_TOKENS.contains(&w.as_str()))
            .collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        words.truncate(vocab_size.saturating_sub(SPECIAL_TOKENS.len()));

        let mut vocab = serde_json::Map::new();
        for (id, token) in SPECIAL_TOKENS.iter().enumerate() {
            vocab.insert(token.to_string(), serde_json::json!(id));
        }
        for (offset, (word, _)) in words.iter().enumerate() {
            vocab.insert(word.clone(), serde_json::json!(SPECIAL_TOKENS.len() + offset));
        }

        let added_tokens: Vec<serde_json::Value> = SPECIAL_TOKENS
            .iter()
            .enumerate()
            .map(|(id, token)| {
                serde_json::json!({
                    "id": id, "content": token, "single_word": false, "lstrip": false,
                    "rstrip": false, "normalized": false, "special": true
                })
            })
            .collect();

        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": added_tokens,
            "normalizer": { "type": "Lowercase" },
            "pre_tokenizer": { "type": "WhitespaceSplit" },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": UNK_TOKEN
            }
        });

        let tok_path = self.dir.join(TOKENIZER_FILE);
        fs::write(&tok_path, serde_json::to_string_pretty(&tokenizer_json)?)
            .with_context(|| format!("Cannot write tokenizer JSON to '{}'", tok_path.display()))?;

        tracing::info!(
            "Tokenizer built with {} entries, saved to '{}'",
            SPECIAL_TOKENS.len() + words.len(),
            tok_path.display()
        );

        Tokenizer::from_file(&tok_path).map_err(|e| anyhow::anyhow!("Cannot reload tokenizer: {e}"))
    }
}

// ─── HfSubTokenizer ───────────────────────────────────────────────────────────
/// SubTokenizer over a HuggingFace tokenizer. Marker ids come
/// from the EncoderConfig so both always agree.
pub struct HfSubTokenizer {
    inner: Tokenizer,
    leading: u32,
    trailing: u32,
}

impl HfSubTokenizer {
    pub fn new(inner: Tokenizer, config: &EncoderConfig) -> Self {
        Self {
            inner,
            leading: config.leading_marker_id,
            trailing: config.trailing_marker_id,
        }
    }

    pub fn vocab_size(&self) -> usize {
        self.inner.get_vocab_size(true)
    }

    fn ids(&self, input: &str) -> Result<Vec<u32>, PipelineError> {
        self.inner
            .encode(input, false)
            .map(|enc| enc.get_ids().to_vec())
            .map_err(|e| PipelineError::Tokenizer {
                input: input.to_string(),
                reason: e.to_string(),
            })
    }
}

impl SubTokenizer for HfSubTokenizer {
    fn encode_word(&self, word: &str) -> Result<Vec<u32>, PipelineError> {
        self.ids(word)
    }

    fn encode_text(&self, text: &str, with_markers: bool) -> Result<Vec<u32>, PipelineError> {
        let body = self.ids(text)?;
        if !with_markers {
            return Ok(body);
        }
        let mut ids = Vec::with_capacity(body.len() + 2);
        ids.push(self.leading);
        ids.extend(body);
        ids.push(self.trailing);
        Ok(ids)
    }
}
