// Test double for the SubTokenizer collaborator: one sub-token
// per character, id = Unicode scalar value. An empty word has
// no sub-tokens, which is how unknown words show up in practice.

use crate::domain::error::PipelineError;
use crate::domain::row::{DefinitionRow, ExampleRow};
use crate::domain::traits::SubTokenizer;

pub struct CharTokenizer;

impl SubTokenizer for CharTokenizer {
    fn encode_word(&self, word: &str) -> Result<Vec<u32>, PipelineError> {
        Ok(word.chars().map(|c| c as u32).collect())
    }

    fn encode_text(&self, text: &str, with_markers: bool) -> Result<Vec<u32>, PipelineError> {
        let mut ids = Vec::new();
        if with_markers {
            ids.push(0);
        }
        for word in text.split_whitespace() {
            ids.extend(self.encode_word(word)?);
        }
        if with_markers {
            ids.push(1);
        }
        Ok(ids)
    }
}

pub fn id(c: char) -> u32 {
    c as u32
}

pub fn definition(sense_id: &str, lemma: &str, text: &str, supersense: &str) -> DefinitionRow {
    DefinitionRow {
        sense_id:   sense_id.to_string(),
        lemma:      lemma.to_string(),
        definition: Some(text.to_string()),
        supersense: supersense.to_string(),
        partition:  "train".to_string(),
        ann_stage:  None,
    }
}

pub fn example(sense_id: &str, lemma: &str, text: &str, rank: i64, supersense: &str) -> ExampleRow {
    ExampleRow {
        sense_id:   sense_id.to_string(),
        lemma:      lemma.to_string(),
        example:    Some(text.to_string()),
        word_rank:  rank,
        supersense: supersense.to_string(),
        partition:  "train".to_string(),
        ann_stage:  None,
    }
}
