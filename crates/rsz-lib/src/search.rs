//! Instance search by class name, field name and field value.

use std::collections::HashMap;

use regex_automata::dfa::{Automaton, StartKind, dense};
use regex_automata::Input;

use crate::error::{Error, Result};
use crate::instance::{Instance, InstanceId};
use crate::rsz::Rsz;

/// How a [`TextMatcher`] compares text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    #[default]
    Contains,
    Regex,
}

#[derive(Clone, Debug)]
enum Pattern {
    Disabled,
    Exact(String),
    Contains(String),
    Regex(dense::DFA<Vec<u32>>),
}

/// One search criterion. A disabled matcher does not take part.
#[derive(Clone, Debug)]
pub struct TextMatcher {
    pattern: Pattern,
}

impl Default for TextMatcher {
    fn default() -> Self {
        Self::disabled()
    }
}

impl TextMatcher {
    pub fn disabled() -> Self {
        Self {
            pattern: Pattern::Disabled,
        }
    }

    pub fn exact(text: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::Exact(text.into()),
        }
    }

    pub fn contains(text: impl Into<String>) -> Self {
        Self {
            pattern: Pattern::Contains(text.into()),
        }
    }

    /// Unanchored regex; matches if the pattern occurs anywhere.
    pub fn regex(pattern: &str) -> Result<Self> {
        let dfa = dense::DFA::builder()
            .configure(dense::DFA::config().start_kind(StartKind::Unanchored))
            .build(pattern)
            .map_err(|e| Error::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            pattern: Pattern::Regex(dfa),
        })
    }

    pub fn new(mode: MatchMode, text: &str) -> Result<Self> {
        match mode {
            MatchMode::Exact => Ok(Self::exact(text)),
            MatchMode::Contains => Ok(Self::contains(text)),
            MatchMode::Regex => Self::regex(text),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !matches!(self.pattern, Pattern::Disabled)
    }

    pub fn matches(&self, text: &str) -> bool {
        match &self.pattern {
            Pattern::Disabled => false,
            Pattern::Exact(expected) => text == expected,
            Pattern::Contains(needle) => text.contains(needle.as_str()),
            Pattern::Regex(dfa) => matches!(dfa.try_search_fwd(&Input::new(text)), Ok(Some(_))),
        }
    }
}

/// Criteria combined with AND. With nothing enabled nothing matches.
#[derive(Clone, Debug, Default)]
pub struct SearchQuery {
    pub instance_name: TextMatcher,
    pub field_name: TextMatcher,
    pub field_value: TextMatcher,
}

impl SearchQuery {
    pub fn is_empty(&self) -> bool {
        !(self.instance_name.is_enabled() || self.field_name.is_enabled() || self.field_value.is_enabled())
    }
}

/// Runs queries, caching field-name results per class.
#[derive(Debug)]
pub struct Searcher {
    query: SearchQuery,
    field_name_hits: HashMap<u32, bool>,
    class_scans: usize,
}

impl Searcher {
    pub fn new(query: SearchQuery) -> Self {
        Self {
            query,
            field_name_hits: HashMap::new(),
            class_scans: 0,
        }
    }

    /// How many classes had their field names scanned.
    pub fn class_scans(&self) -> usize {
        self.class_scans
    }

    /// Matching instances of `rsz`, in instance list order.
    pub fn search(&mut self, rsz: &Rsz) -> Vec<InstanceId> {
        if self.query.is_empty() {
            return Vec::new();
        }
        let mut hits = Vec::new();
        for id in rsz.instance_ids() {
            let Some(instance) = rsz.instance(id) else {
                continue;
            };
            if !instance.is_null() && self.is_hit(rsz, instance) {
                hits.push(id);
            }
        }
        hits
    }

    fn is_hit(&mut self, rsz: &Rsz, instance: &Instance) -> bool {
        if self.query.instance_name.is_enabled() && !self.query.instance_name.matches(instance.name()) {
            return false;
        }
        if self.query.field_name.is_enabled() && !self.has_matching_field_name(instance) {
            return false;
        }
        if self.query.field_value.is_enabled() {
            return instance
                .values
                .iter()
                .any(|value| self.query.field_value.matches(&rsz.value_text(value)));
        }
        true
    }

    fn has_matching_field_name(&mut self, instance: &Instance) -> bool {
        if let Some(&hit) = self.field_name_hits.get(&instance.type_hash()) {
            return hit;
        }
        self.class_scans += 1;
        let matcher = &self.query.field_name;
        let hit = instance.class.fields.iter().any(|f| matcher.matches(&f.name));
        self.field_name_hits.insert(instance.type_hash(), hit);
        hit
    }
}
