/*!
The [`Registry`] owns every declared option, in declaration order.
 */

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::{errors::RegistrationError, option::OptionSpec};

/// Why a short option character couldn't be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ShortError {
    #[error("no option uses this short name")]
    Undefined,

    #[error("more than one option uses this short name")]
    Ambiguous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShortSlot {
    /// The index of the one option that uses this short name
    Owner(usize),

    /// Poisoned: several options use this short name
    Ambiguous,
}

/// Lookup table from short names to options, kept in step with the
/// registry by [`Registry::insert`].
#[derive(Debug, Clone, Default)]
pub struct ShortLookup {
    slots: HashMap<char, ShortSlot>,
}

impl ShortLookup {
    /// Get the index in the registry of the option with this short name
    pub fn resolve(&self, short: char) -> Result<usize, ShortError> {
        match self.slots.get(&short) {
            None => Err(ShortError::Undefined),
            Some(ShortSlot::Ambiguous) => Err(ShortError::Ambiguous),
            Some(&ShortSlot::Owner(index)) => Ok(index),
        }
    }

    fn add(&mut self, short: char, index: usize) {
        self.slots
            .entry(short)
            .and_modify(|slot| *slot = ShortSlot::Ambiguous)
            .or_insert(ShortSlot::Owner(index));
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    options: IndexMap<String, OptionSpec>,
    shorts: ShortLookup,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new option. Fails, without modifying the registry, if the name
    /// is empty or already in use.
    ///
    /// Short names are *not* required to be unique here; a short name shared
    /// by several options is instead rejected whenever it's used.
    pub fn insert(&mut self, spec: OptionSpec) -> Result<(), RegistrationError> {
        if spec.name().is_empty() {
            return Err(RegistrationError::EmptyName);
        }

        if self.options.contains_key(spec.name()) {
            return Err(RegistrationError::Duplicate(spec.name().to_owned()));
        }

        if let Some(short) = spec.short()
            && let Some(other) = self.iter().find(|other| other.short() == Some(short))
        {
            warn!(
                short = %short,
                option = spec.name(),
                other = other.name(),
                "short name is shared; it will be ambiguous on the command line"
            );
        }

        debug!(
            option = spec.name(),
            short = ?spec.short(),
            takes_value = spec.takes_value(),
            required = spec.is_required(),
            "registered option"
        );

        if let Some(short) = spec.short() {
            self.shorts.add(short, self.options.len());
        }

        self.options.insert(spec.name().to_owned(), spec);
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut OptionSpec> {
        self.options.get_mut(name)
    }

    #[inline]
    pub(crate) fn get_index_mut(&mut self, index: usize) -> Option<&mut OptionSpec> {
        self.options.get_index_mut(index).map(|(_, spec)| spec)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// All options, in the order they were declared
    #[inline]
    pub fn iter(&self) -> indexmap::map::Values<'_, String, OptionSpec> {
        self.options.values()
    }

    /// The short name lookup table for the current set of options
    #[inline]
    #[must_use]
    pub fn short_lookup(&self) -> &ShortLookup {
        &self.shorts
    }

    /// Find the name of the option with this short name.
    pub fn resolve_short(&self, short: char) -> Result<&str, ShortError> {
        let index = self.shorts.resolve(short)?;

        self.options
            .get_index(index)
            .map(|(name, _)| name.as_str())
            .ok_or(ShortError::Undefined)
    }

    /// Forget the results of the previous parse
    pub(crate) fn reset(&mut self) {
        self.options.values_mut().for_each(OptionSpec::reset);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{option::Requirement, reader::DefaultReader};

    fn registry() -> Registry {
        let mut registry = Registry::new();

        registry
            .insert(OptionSpec::valued(
                "host",
                Some('h'),
                "host name",
                Requirement::Mandatory,
                String::new(),
                DefaultReader,
            ))
            .unwrap();
        registry
            .insert(OptionSpec::flag("gzip", None, "gzip when transfer"))
            .unwrap();
        registry
            .insert(OptionSpec::flag("verbose", Some('v'), "be loud"))
            .unwrap();

        registry
    }

    #[test]
    fn keeps_declaration_order() {
        let registry = registry();
        let names: Vec<&str> = registry.iter().map(OptionSpec::name).collect();
        assert_eq!(names, ["host", "gzip", "verbose"]);
    }

    #[test]
    fn duplicate_name_is_rejected_without_changes() {
        let mut registry = registry();

        assert_eq!(
            registry.insert(OptionSpec::flag("host", Some('x'), "another host")),
            Err(RegistrationError::Duplicate("host".to_owned()))
        );
        assert_eq!(registry.len(), 3);
        assert!(registry.get("host").unwrap().takes_value());
        assert_eq!(registry.resolve_short('x'), Err(ShortError::Undefined));
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut registry = Registry::new();

        assert_eq!(
            registry.insert(OptionSpec::flag("", None, "")),
            Err(RegistrationError::EmptyName)
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn resolves_short_names() {
        let registry = registry();

        assert_eq!(registry.resolve_short('h'), Ok("host"));
        assert_eq!(registry.resolve_short('v'), Ok("verbose"));
        assert_eq!(registry.resolve_short('g'), Err(ShortError::Undefined));
    }

    #[test]
    fn shared_short_names_are_poisoned() {
        let mut registry = registry();
        registry
            .insert(OptionSpec::flag("version", Some('v'), "print version"))
            .unwrap();

        assert_eq!(registry.resolve_short('v'), Err(ShortError::Ambiguous));
        assert_eq!(registry.resolve_short('h'), Ok("host"));
    }

    #[test]
    fn short_lookup_follows_insertions() {
        let mut registry = registry();
        assert_eq!(registry.resolve_short('q'), Err(ShortError::Undefined));

        registry
            .insert(OptionSpec::flag("quiet", Some('q'), "say nothing"))
            .unwrap();
        assert_eq!(registry.resolve_short('q'), Ok("quiet"));
        assert_eq!(registry.short_lookup().resolve('q'), Ok(3));

        registry
            .insert(OptionSpec::flag("verbose", Some('q'), "shadowed"))
            .unwrap_err();
        assert_eq!(registry.resolve_short('q'), Ok("quiet"));

        registry
            .insert(OptionSpec::flag("query", Some('q'), "ask first"))
            .unwrap();
        assert_eq!(registry.resolve_short('q'), Err(ShortError::Ambiguous));
    }
}
