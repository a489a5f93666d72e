//! The four lexical relations, exposed as goals for the unification engine.
//!
//! Each relation captures an immutable [`LexiconIndex`] snapshot and turns
//! one table lookup into a goal: applied to a substitution it yields zero
//! or more extended substitutions, lazily. Absence of a table entry is a
//! normal "no solution" outcome, never an error; faults belong to load
//! time, not query time.

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::index::LexiconIndex;
use crate::logic::{self, Var};
use crate::models::{LinkType, PartOfSpeech, SynsetId, SynsetRef};

// --- The lexical value domain ---

/// Everything a logic term may stand for in a lexical query.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A raw synset id.
    Synset(SynsetId),
    /// A part-of-speech tag.
    Pos(PartOfSpeech),
    /// A lemma or definition string.
    Text(String),
    /// A link-tagged destination synset, as produced by [`Relations::links`].
    /// Accepted wherever a raw synset id is accepted.
    Ref(SynsetRef),
}

impl Value {
    /// The synset id this value denotes, projecting through a reference.
    pub fn synset_id(&self) -> Option<SynsetId> {
        match self {
            Value::Synset(id) => Some(*id),
            Value::Ref(reference) => Some(reference.synset),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_pos(&self) -> Option<PartOfSpeech> {
        match self {
            Value::Pos(pos) => Some(*pos),
            _ => None,
        }
    }

    pub fn as_synset_ref(&self) -> Option<SynsetRef> {
        match self {
            Value::Ref(reference) => Some(*reference),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Synset(id) => write!(f, "{id}"),
            Value::Pos(pos) => write!(f, "{pos}"),
            Value::Text(text) => write!(f, "{text}"),
            Value::Ref(reference) => write!(f, "{} -> {}", reference.link, reference.synset),
        }
    }
}

/// A term over the lexical value domain.
pub type Term = logic::Term<Value>;
/// A substitution over the lexical value domain.
pub type Subst = logic::Subst<Value>;
/// A goal over the lexical value domain.
pub type Goal = logic::Goal<Value>;
/// A lazy solution sequence over the lexical value domain.
pub type Solutions = logic::Solutions<Value>;

impl From<Value> for Term {
    fn from(value: Value) -> Self {
        Term::Val(value)
    }
}

impl From<SynsetId> for Term {
    fn from(id: SynsetId) -> Self {
        Value::Synset(id).into()
    }
}

impl From<PartOfSpeech> for Term {
    fn from(pos: PartOfSpeech) -> Self {
        Value::Pos(pos).into()
    }
}

impl From<SynsetRef> for Term {
    fn from(reference: SynsetRef) -> Self {
        Value::Ref(reference).into()
    }
}

impl From<&str> for Term {
    fn from(text: &str) -> Self {
        Value::Text(text.to_string()).into()
    }
}

impl From<String> for Term {
    fn from(text: String) -> Self {
        Value::Text(text).into()
    }
}

/// Resolves a walked term to the synset id it denotes, if any. A
/// [`Value::Ref`] projects transparently to its carried id, which is what
/// lets one relation's output feed the next relation's sense argument.
fn synset_id(term: &Term) -> Option<SynsetId> {
    term.value().and_then(Value::synset_id)
}

// --- The relations ---

/// The relation predicates, bound to one immutable index snapshot.
///
/// Cloning is cheap; clones share the snapshot. Reloading the dataset
/// means building a fresh `Relations` and handing it out in place of the
/// old one; goals already constructed keep the snapshot they captured.
#[derive(Debug, Clone)]
pub struct Relations {
    index: Arc<LexiconIndex>,
}

impl Relations {
    pub fn new(index: Arc<LexiconIndex>) -> Self {
        Relations { index }
    }

    pub fn index(&self) -> &LexiconIndex {
        &self.index
    }

    /// `pos(sense, tag)`: at most one solution, the authored
    /// part-of-speech tag of the (projected) sense.
    pub fn pos(&self, sense: impl Into<Term>, pos_out: impl Into<Term>) -> Goal {
        let index = Arc::clone(&self.index);
        let sense = sense.into();
        let pos_out = pos_out.into();
        Goal::new(move |subst| {
            let subject = subst.walk(&sense);
            match synset_id(&subject).and_then(|id| index.pos(id)) {
                Some(tag) => logic::eq(pos_out.clone(), Value::Pos(tag)).solve(subst),
                None => logic::no_solution(),
            }
        })
    }

    /// `definition(sense, text)`: at most one solution, the authored
    /// definition of the (projected) sense.
    pub fn definition(&self, sense: impl Into<Term>, definition_out: impl Into<Term>) -> Goal {
        let index = Arc::clone(&self.index);
        let sense = sense.into();
        let definition_out = definition_out.into();
        Goal::new(move |subst| {
            let subject = subst.walk(&sense);
            match synset_id(&subject).and_then(|id| index.definition(id)) {
                Some(text) => {
                    logic::eq(definition_out.clone(), Value::Text(text.to_string())).solve(subst)
                }
                None => logic::no_solution(),
            }
        })
    }

    /// `lemmas(sense, lemma)`: mode-polymorphic.
    ///
    /// With the sense side concrete, one solution per lemma of that sense.
    /// With only the lemma side concrete, one solution per synset listing
    /// that lemma. With neither side concrete the query is underspecified
    /// and yields nothing; enumerating the whole lexicon is not an option.
    pub fn lemmas(&self, sense: impl Into<Term>, lemma_out: impl Into<Term>) -> Goal {
        let index = Arc::clone(&self.index);
        let sense = sense.into();
        let lemma_out = lemma_out.into();
        Goal::new(move |subst| {
            let subject = subst.walk(&sense);
            if let Some(id) = synset_id(&subject) {
                let candidates: Vec<Term> = index
                    .lemmas(id)
                    .unwrap_or_default()
                    .iter()
                    .map(|lemma| Value::Text(lemma.clone()).into())
                    .collect();
                return logic::membero(lemma_out.clone(), candidates).solve(subst);
            }
            if let Some(Value::Text(lemma)) = subst.walk(&lemma_out).value() {
                let candidates: Vec<Term> = index
                    .synsets_with_lemma(lemma)
                    .unwrap_or_default()
                    .iter()
                    .map(|id| Value::Synset(*id).into())
                    .collect();
                return logic::membero(sense.clone(), candidates).solve(subst);
            }
            debug!("lemmas query with neither side bound; refusing to scan");
            logic::no_solution()
        })
    }

    /// `links(a, b, edge, linkType?)`: enumerates the authored outgoing
    /// edges of the anchor sense as link-tagged references, one solution
    /// per edge, unified against `edge_out`.
    ///
    /// The anchor is the first of `a`, `b` to resolve to a concrete sense
    /// id; `a` wins when both do, mirroring authored edge direction. With
    /// a link type the enumeration is restricted to that type, otherwise
    /// it is the union across every type present in the dataset (order
    /// across types is unspecified, order within a type is authored
    /// order). An unknown or absent type yields zero solutions. With
    /// neither side concrete the query yields nothing.
    pub fn links(
        &self,
        a: impl Into<Term>,
        b: impl Into<Term>,
        edge_out: impl Into<Term>,
        link_type: Option<LinkType>,
    ) -> Goal {
        let index = Arc::clone(&self.index);
        let a = a.into();
        let b = b.into();
        let edge_out = edge_out.into();
        Goal::new(move |subst| {
            let walked_a = subst.walk(&a);
            let walked_b = subst.walk(&b);
            let source = match synset_id(&walked_a).or_else(|| synset_id(&walked_b)) {
                Some(id) => id,
                None => {
                    debug!("links query with neither side bound; refusing to scan");
                    return logic::no_solution();
                }
            };
            let candidates: Vec<Term> = match link_type {
                Some(link) => tagged_targets(&index, link, source).collect(),
                None => index
                    .link_types()
                    .flat_map(|link| tagged_targets(&index, link, source))
                    .collect(),
            };
            logic::membero(edge_out.clone(), candidates).solve(subst)
        })
    }

    /// Convenience wrapper: a fresh output variable and the goal querying
    /// it, for callers that only want the edge enumeration.
    pub fn outgoing(&self, sense: impl Into<Term>, link_type: Option<LinkType>) -> (Var, Goal) {
        let edge = Var::fresh();
        let goal = self.links(sense, Var::fresh(), edge, link_type);
        (edge, goal)
    }
}

fn tagged_targets<'a>(
    index: &'a LexiconIndex,
    link: LinkType,
    source: SynsetId,
) -> impl Iterator<Item = Term> + 'a {
    index
        .link_targets(link, source)
        .unwrap_or_default()
        .iter()
        .map(move |target| {
            Value::Ref(SynsetRef {
                link,
                synset: *target,
            })
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::eq;
    use crate::models::{LinkEdge, Synset, WordnetDatabase};

    /// Two noun synsets joined by a single hypernym edge.
    fn canis_relations() -> Relations {
        let db = WordnetDatabase {
            synsets: vec![
                Synset {
                    id: 1,
                    pos: PartOfSpeech::N,
                    lemmas: vec!["dog".to_string(), "hound".to_string()],
                    definition: "a domesticated carnivore".to_string(),
                },
                Synset {
                    id: 2,
                    pos: PartOfSpeech::N,
                    lemmas: vec!["canine".to_string()],
                    definition: "any member of genus Canis".to_string(),
                },
            ],
            links: vec![LinkEdge {
                link: LinkType::Hypernym,
                source: 1,
                target: 2,
            }],
        };
        Relations::new(Arc::new(LexiconIndex::build(db)))
    }

    /// A lexicon where "dog" is ambiguous and synset 1 has edges of two
    /// different types.
    fn richer_relations() -> Relations {
        let db = WordnetDatabase {
            synsets: vec![
                Synset {
                    id: 1,
                    pos: PartOfSpeech::N,
                    lemmas: vec!["dog".to_string()],
                    definition: "a domesticated carnivore".to_string(),
                },
                Synset {
                    id: 2,
                    pos: PartOfSpeech::N,
                    lemmas: vec!["canine".to_string()],
                    definition: "any member of genus Canis".to_string(),
                },
                Synset {
                    id: 3,
                    pos: PartOfSpeech::V,
                    lemmas: vec!["dog".to_string(), "chase".to_string()],
                    definition: "go after persistently".to_string(),
                },
            ],
            links: vec![
                LinkEdge {
                    link: LinkType::Hypernym,
                    source: 1,
                    target: 2,
                },
                LinkEdge {
                    link: LinkType::Also,
                    source: 1,
                    target: 3,
                },
                LinkEdge {
                    link: LinkType::Hyponym,
                    source: 2,
                    target: 1,
                },
            ],
        };
        Relations::new(Arc::new(LexiconIndex::build(db)))
    }

    fn edge_pairs(goal: Goal, edge: Var) -> Vec<(LinkType, SynsetId)> {
        goal.run()
            .filter_map(|s| s.walk(&edge.into()).value().and_then(Value::as_synset_ref))
            .map(|r| (r.link, r.synset))
            .collect()
    }

    #[test]
    fn pos_yields_the_authored_tag_exactly_once() {
        let rel = canis_relations();
        let p = Var::fresh();
        let solutions: Vec<_> = rel.pos(1u64, p).run().collect();
        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions[0].walk(&p.into()).value().and_then(Value::as_pos),
            Some(PartOfSpeech::N)
        );
    }

    #[test]
    fn pos_is_silent_for_absent_ids() {
        let rel = canis_relations();
        let p = Var::fresh();
        assert_eq!(rel.pos(99u64, p).run().count(), 0);
    }

    #[test]
    fn pos_checks_an_already_bound_tag() {
        let rel = canis_relations();
        assert_eq!(rel.pos(1u64, Value::Pos(PartOfSpeech::N)).run().count(), 1);
        assert_eq!(rel.pos(1u64, Value::Pos(PartOfSpeech::V)).run().count(), 0);
    }

    #[test]
    fn definition_yields_the_authored_text() {
        let rel = canis_relations();
        let d = Var::fresh();
        let solutions: Vec<_> = rel.definition(2u64, d).run().collect();
        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions[0].walk(&d.into()).value().and_then(|v| v.as_text().map(str::to_string)),
            Some("any member of genus Canis".to_string())
        );
    }

    #[test]
    fn lemmas_enumerates_every_lemma_of_a_sense() {
        let rel = canis_relations();
        let l = Var::fresh();
        let seen: Vec<_> = rel
            .lemmas(1u64, l)
            .run()
            .filter_map(|s| s.walk(&l.into()).value().and_then(|v| v.as_text().map(str::to_string)))
            .collect();
        assert_eq!(seen, vec!["dog".to_string(), "hound".to_string()]);
    }

    #[test]
    fn lemmas_inverts_when_only_the_lemma_is_bound() {
        let rel = richer_relations();
        let s = Var::fresh();
        let seen: Vec<_> = rel
            .lemmas(s, "dog")
            .run()
            .filter_map(|sol| sol.walk(&s.into()).value().and_then(Value::synset_id))
            .collect();
        assert_eq!(seen, vec![1, 3]);
    }

    #[test]
    fn lemmas_with_neither_side_bound_yields_nothing() {
        let rel = canis_relations();
        let s = Var::fresh();
        let l = Var::fresh();
        assert_eq!(rel.lemmas(s, l).run().count(), 0);
    }

    #[test]
    fn lemmas_is_silent_for_unknown_words() {
        let rel = canis_relations();
        let s = Var::fresh();
        assert_eq!(rel.lemmas(s, "unicorn").run().count(), 0);
    }

    #[test]
    fn links_enumerates_one_edge_per_candidate() {
        let rel = canis_relations();
        let b = Var::fresh();
        let z = Var::fresh();
        let goal = rel.links(1u64, b, z, None);
        assert_eq!(edge_pairs(goal, z), vec![(LinkType::Hypernym, 2)]);
    }

    #[test]
    fn links_restricts_to_the_requested_type() {
        let rel = richer_relations();
        let b = Var::fresh();
        let z = Var::fresh();
        let goal = rel.links(1u64, b, z, Some(LinkType::Hypernym));
        assert_eq!(edge_pairs(goal, z), vec![(LinkType::Hypernym, 2)]);
    }

    #[test]
    fn links_unions_across_types_when_unrestricted() {
        let rel = richer_relations();
        let b = Var::fresh();
        let z = Var::fresh();
        let mut pairs = edge_pairs(rel.links(1u64, b, z, None), z);
        pairs.sort_by_key(|(_, target)| *target);
        assert_eq!(pairs, vec![(LinkType::Hypernym, 2), (LinkType::Also, 3)]);
    }

    #[test]
    fn links_yields_nothing_for_types_without_edges() {
        let rel = canis_relations();
        let b = Var::fresh();
        let z = Var::fresh();
        assert_eq!(
            rel.links(1u64, b, z, Some(LinkType::Hyponym)).run().count(),
            0
        );
        assert_eq!(
            rel.links(1u64, b, z, Some(LinkType::Antonym)).run().count(),
            0
        );
    }

    #[test]
    fn links_anchors_on_b_when_a_is_unbound() {
        let rel = richer_relations();
        let a = Var::fresh();
        let z = Var::fresh();
        let goal = rel.links(a, 2u64, z, None);
        assert_eq!(edge_pairs(goal, z), vec![(LinkType::Hyponym, 1)]);
    }

    #[test]
    fn links_prefers_a_as_anchor_when_both_are_bound() {
        let rel = richer_relations();
        let z = Var::fresh();
        let goal = rel.links(1u64, 2u64, z, Some(LinkType::Hypernym));
        assert_eq!(edge_pairs(goal, z), vec![(LinkType::Hypernym, 2)]);
    }

    #[test]
    fn links_with_neither_side_bound_yields_nothing() {
        let rel = canis_relations();
        let a = Var::fresh();
        let b = Var::fresh();
        let z = Var::fresh();
        assert_eq!(rel.links(a, b, z, None).run().count(), 0);
    }

    #[test]
    fn references_project_like_raw_ids() {
        let rel = canis_relations();
        let reference = SynsetRef {
            link: LinkType::Hypernym,
            synset: 2,
        };
        let p = Var::fresh();
        let via_ref: Vec<_> = rel.pos(reference, p).run().collect();
        let via_id: Vec<_> = rel.pos(2u64, p).run().collect();
        assert_eq!(via_ref, via_id);

        let l = Var::fresh();
        assert_eq!(
            rel.lemmas(reference, l).run().count(),
            rel.lemmas(2u64, l).run().count()
        );
    }

    #[test]
    fn link_output_chains_into_further_relations() {
        let rel = canis_relations();
        let b = Var::fresh();
        let z = Var::fresh();
        let d = Var::fresh();
        // The hypernym reference flows straight into definition's sense slot.
        let goal = rel
            .links(1u64, b, z, Some(LinkType::Hypernym))
            .and(rel.definition(z, d));
        let solutions: Vec<_> = goal.run().collect();
        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions[0].walk(&d.into()).value().and_then(|v| v.as_text().map(str::to_string)),
            Some("any member of genus Canis".to_string())
        );
    }

    #[test]
    fn conjunction_selects_the_noun_sense_of_an_ambiguous_word() {
        let rel = richer_relations();
        let s = Var::fresh();
        let p = Var::fresh();
        let goal = rel
            .lemmas(s, "dog")
            .and(rel.pos(s, p))
            .and(eq(p, Value::Pos(PartOfSpeech::N)));
        let solutions: Vec<_> = goal.run().collect();
        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions[0].walk(&s.into()).value().and_then(Value::synset_id),
            Some(1)
        );
    }

    #[test]
    fn values_format_for_display() {
        assert_eq!(Value::Synset(7).to_string(), "7");
        assert_eq!(Value::Pos(PartOfSpeech::N).to_string(), "noun");
        assert_eq!(Value::Text("dog".to_string()).to_string(), "dog");
        assert_eq!(
            Value::Ref(SynsetRef {
                link: LinkType::Hypernym,
                synset: 2,
            })
            .to_string(),
            "hypernym -> 2"
        );
    }
}
