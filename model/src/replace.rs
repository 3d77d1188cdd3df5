//! IRI substitution.
//!
//! [`IriReplacer`] is the mapping consumed by `replace_iris` on axioms and
//! changes. [`MapIriReplacer`] is the usual implementation, backed by an
//! old-to-new map (entity renames, namespace moves, merges).

use std::collections::HashMap;

use crate::model::Iri;

/// Maps IRIs to their replacements.
pub trait IriReplacer {
    /// Returns the replacement for `iri`, or `None` to keep it.
    fn replace(&self, iri: &Iri) -> Option<Iri>;
}

impl<F> IriReplacer for F
where
    F: Fn(&Iri) -> Option<Iri>,
{
    fn replace(&self, iri: &Iri) -> Option<Iri> {
        self(iri)
    }
}

/// An [`IriReplacer`] backed by an explicit old-to-new map.
#[derive(Debug, Clone, Default)]
pub struct MapIriReplacer {
    map: HashMap<Iri, Iri>,
}

impl MapIriReplacer {
    /// Creates an empty replacer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `from` to `to`, returning the previous target of `from`.
    pub fn insert(&mut self, from: Iri, to: Iri) -> Option<Iri> {
        self.map.insert(from, to)
    }

    /// Number of mapped IRIs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether no IRI is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl FromIterator<(Iri, Iri)> for MapIriReplacer {
    fn from_iter<I: IntoIterator<Item = (Iri, Iri)>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}

impl IriReplacer for MapIriReplacer {
    fn replace(&self, iri: &Iri) -> Option<Iri> {
        self.map.get(iri).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(text: &str) -> Iri {
        Iri::parse(text).expect("valid IRI")
    }

    #[test]
    fn map_replacer_returns_mapped_targets() {
        let replacer: MapIriReplacer = [(iri("http://a.org/x"), iri("http://b.org/x"))]
            .into_iter()
            .collect();
        assert_eq!(replacer.replace(&iri("http://a.org/x")), Some(iri("http://b.org/x")));
        assert_eq!(replacer.replace(&iri("http://a.org/y")), None);
        assert_eq!(replacer.len(), 1);
    }

    #[test]
    fn closures_are_replacers() {
        let target = iri("http://b.org/any");
        let replacer = |_: &Iri| Some(target.clone());
        assert_eq!(replacer.replace(&iri("http://a.org/x")), Some(iri("http://b.org/any")));
    }
}
