//! Option sections
//!
//! Groups options of different types under one name so textual updates
//! (`option = value`) can be dispatched without knowing the option type.

use std::any::Any;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::ConfigError;
use crate::option::{ConfigOption, OptionValue};

/// Type-erased view of a [`ConfigOption`]
pub trait AnyOption {
    fn name(&self) -> &str;
    fn set_value_str(&self, text: &str) -> Result<(), ConfigError>;
    fn get_value_str(&self) -> String;
    fn reset_to_default(&self);
    fn into_any(self: Rc<Self>) -> Rc<dyn Any>;
}

impl<T: OptionValue> AnyOption for ConfigOption<T> {
    fn name(&self) -> &str {
        ConfigOption::name(self)
    }

    fn set_value_str(&self, text: &str) -> Result<(), ConfigError> {
        ConfigOption::set_value_str(self, text)
    }

    fn get_value_str(&self) -> String {
        ConfigOption::get_value_str(self)
    }

    fn reset_to_default(&self) {
        ConfigOption::reset_to_default(self)
    }

    fn into_any(self: Rc<Self>) -> Rc<dyn Any> {
        self
    }
}

/// A named group of options
#[derive(Default)]
pub struct OptionSection {
    name: String,
    options: FxHashMap<String, Rc<dyn AnyOption>>,
}

impl OptionSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: FxHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register an option, replacing any option with the same name
    pub fn register<T: OptionValue>(&mut self, option: Rc<ConfigOption<T>>) {
        let name = option.name().to_string();
        if self.options.insert(name.clone(), option).is_some() {
            tracing::debug!(section = %self.name, option = %name, "replaced existing option");
        }
    }

    /// Typed lookup; `None` if absent or registered with another type
    pub fn get<T: OptionValue>(&self, name: &str) -> Option<Rc<ConfigOption<T>>> {
        let option = self.options.get(name)?.clone();
        option.into_any().downcast::<ConfigOption<T>>().ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    /// Route a textual value to the named option
    pub fn set_value_str(&self, name: &str, text: &str) -> Result<(), ConfigError> {
        let option = self
            .options
            .get(name)
            .ok_or_else(|| ConfigError::UnknownOption {
                section: self.name.clone(),
                option: name.to_string(),
            })?;
        option.set_value_str(text)
    }

    pub fn get_value_str(&self, name: &str) -> Option<String> {
        self.options.get(name).map(|o| o.get_value_str())
    }

    pub fn reset_to_defaults(&self) {
        for option in self.options.values() {
            option.reset_to_default();
        }
    }

    /// Registered option names, sorted
    pub fn option_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.options.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
