//! In-memory lookup tables derived from a parsed dataset.
//!
//! The tables are built once per load in a single linear pass and never
//! mutated afterwards; the relation predicates in [`crate::relations`]
//! only read from them. A dataset change means a wholesale rebuild, not an
//! incremental update.

use std::collections::HashMap;

use log::info;

use crate::models::{LinkType, PartOfSpeech, SynsetId, WordnetDatabase};

/// The four lookup tables the relation predicates query: definitions,
/// lemmas (both directions), part-of-speech tags, and typed link edges.
///
/// Edges are stored unidirectionally as authored. Inverse traversal relies
/// on the dataset's explicit inverse link types (hypernym/hyponym and
/// friends), never on synthesized reverse edges.
#[derive(Debug, Default)]
pub struct LexiconIndex {
    definitions: HashMap<SynsetId, String>,
    lemmas: HashMap<SynsetId, Vec<String>>,
    synsets_by_lemma: HashMap<String, Vec<SynsetId>>,
    pos_tags: HashMap<SynsetId, PartOfSpeech>,
    links: HashMap<LinkType, HashMap<SynsetId, Vec<SynsetId>>>,
    link_count: usize,
}

impl LexiconIndex {
    /// Builds all tables from a parsed database in one pass. Assumes
    /// well-formed input; referential integrity is the dataset's contract.
    pub fn build(db: WordnetDatabase) -> Self {
        let mut index = LexiconIndex::default();

        for synset in db.synsets {
            index.pos_tags.insert(synset.id, synset.pos);
            index.definitions.insert(synset.id, synset.definition);
            for lemma in &synset.lemmas {
                let entry = index.synsets_by_lemma.entry(lemma.clone()).or_default();
                push_unique(entry, synset.id);
            }
            index.lemmas.insert(synset.id, synset.lemmas);
        }

        for edge in db.links {
            let targets = index
                .links
                .entry(edge.link)
                .or_default()
                .entry(edge.source)
                .or_default();
            if push_unique(targets, edge.target) {
                index.link_count += 1;
            }
        }

        info!(
            "Indexed {} synsets and {} links across {} link types",
            index.pos_tags.len(),
            index.link_count,
            index.links.len()
        );
        index
    }

    pub fn definition(&self, id: SynsetId) -> Option<&str> {
        self.definitions.get(&id).map(String::as_str)
    }

    pub fn lemmas(&self, id: SynsetId) -> Option<&[String]> {
        self.lemmas.get(&id).map(Vec::as_slice)
    }

    /// Inverted lemma index: every synset authored with this surface form.
    pub fn synsets_with_lemma(&self, lemma: &str) -> Option<&[SynsetId]> {
        self.synsets_by_lemma.get(lemma).map(Vec::as_slice)
    }

    pub fn pos(&self, id: SynsetId) -> Option<PartOfSpeech> {
        self.pos_tags.get(&id).copied()
    }

    /// Destinations of the authored edges of one type leaving `source`,
    /// in authorship order.
    pub fn link_targets(&self, link: LinkType, source: SynsetId) -> Option<&[SynsetId]> {
        self.links.get(&link)?.get(&source).map(Vec::as_slice)
    }

    /// Link types present in the dataset, in no particular order.
    pub fn link_types(&self) -> impl Iterator<Item = LinkType> + '_ {
        self.links.keys().copied()
    }

    pub fn synset_ids(&self) -> impl Iterator<Item = SynsetId> + '_ {
        self.pos_tags.keys().copied()
    }

    pub fn synset_count(&self) -> usize {
        self.pos_tags.len()
    }

    pub fn link_count(&self) -> usize {
        self.link_count
    }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        false
    } else {
        items.push(item);
        true
    }
}
