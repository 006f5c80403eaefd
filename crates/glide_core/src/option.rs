//! Typed configuration options
//!
//! A [`ConfigOption`] is a named value with a default that other components
//! hold by `Rc` and re-read whenever they need it. Writes that change the
//! value notify registered update handlers.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

use crate::error::{ConfigError, ValueParseError};

new_key_type! {
    /// Handle returned by [`ConfigOption::add_updated_handler`]
    pub struct UpdateHandlerId;
}

/// Callback fired after an option value changed
pub type UpdateHandler = Rc<dyn Fn()>;

/// Conversion between an option type and its textual configuration form
pub trait OptionValue: Clone + PartialEq + Sized + 'static {
    /// Parse a value from configuration text
    fn from_config_str(text: &str) -> Result<Self, ValueParseError>;

    /// Format a value the way it is written to configuration
    fn to_config_string(&self) -> String;
}

impl OptionValue for i32 {
    fn from_config_str(text: &str) -> Result<Self, ValueParseError> {
        text.trim()
            .parse::<i32>()
            .map_err(|e| ValueParseError::new(text, "int", e.to_string()))
    }

    fn to_config_string(&self) -> String {
        self.to_string()
    }
}

impl OptionValue for f64 {
    fn from_config_str(text: &str) -> Result<Self, ValueParseError> {
        text.trim()
            .parse::<f64>()
            .map_err(|e| ValueParseError::new(text, "double", e.to_string()))
    }

    fn to_config_string(&self) -> String {
        self.to_string()
    }
}

impl OptionValue for bool {
    fn from_config_str(text: &str) -> Result<Self, ValueParseError> {
        match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ValueParseError::new(
                text,
                "bool",
                "expected true, false, 1 or 0",
            )),
        }
    }

    fn to_config_string(&self) -> String {
        self.to_string()
    }
}

impl OptionValue for String {
    fn from_config_str(text: &str) -> Result<Self, ValueParseError> {
        Ok(text.to_string())
    }

    fn to_config_string(&self) -> String {
        self.clone()
    }
}

/// A named, observable configuration value
pub struct ConfigOption<T: OptionValue> {
    name: String,
    default_value: T,
    value: RefCell<T>,
    handlers: RefCell<SlotMap<UpdateHandlerId, UpdateHandler>>,
}

impl<T: OptionValue> ConfigOption<T> {
    /// Create an option whose current value is its default
    pub fn new(name: impl Into<String>, default_value: T) -> Self {
        Self {
            name: name.into(),
            value: RefCell::new(default_value.clone()),
            default_value,
            handlers: RefCell::new(SlotMap::with_key()),
        }
    }

    /// Create an option and wrap it for sharing
    pub fn shared(name: impl Into<String>, default_value: T) -> Rc<Self> {
        Rc::new(Self::new(name, default_value))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value
    pub fn get_value(&self) -> T {
        self.value.borrow().clone()
    }

    /// Inspect the current value without cloning it
    pub fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    pub fn default_value(&self) -> T {
        self.default_value.clone()
    }

    /// Store a new value, notifying handlers if it differs from the old one
    pub fn set_value(&self, value: T) {
        {
            let mut current = self.value.borrow_mut();
            if *current == value {
                return;
            }
            *current = value;
        }

        self.notify_updated();
    }

    /// Parse and store a textual value
    ///
    /// On failure the previous value is kept and no handler fires.
    pub fn set_value_str(&self, text: &str) -> Result<(), ConfigError> {
        match T::from_config_str(text) {
            Ok(value) => {
                self.set_value(value);
                Ok(())
            }
            Err(source) => {
                tracing::debug!(
                    option = %self.name,
                    value = text,
                    "rejected option value: {source}"
                );
                Err(ConfigError::InvalidValue {
                    option: self.name.clone(),
                    source,
                })
            }
        }
    }

    pub fn get_value_str(&self) -> String {
        self.value.borrow().to_config_string()
    }

    pub fn get_default_value_str(&self) -> String {
        self.default_value.to_config_string()
    }

    pub fn reset_to_default(&self) {
        self.set_value(self.default_value.clone());
    }

    /// Register a callback fired after every effective value change
    pub fn add_updated_handler<F: Fn() + 'static>(&self, handler: F) -> UpdateHandlerId {
        self.handlers.borrow_mut().insert(Rc::new(handler))
    }

    /// Unregister a callback; returns whether it was registered
    pub fn remove_updated_handler(&self, id: UpdateHandlerId) -> bool {
        self.handlers.borrow_mut().remove(id).is_some()
    }

    fn notify_updated(&self) {
        // Snapshot so handlers may read the option or (un)register handlers.
        let handlers: Vec<UpdateHandler> = self.handlers.borrow().values().cloned().collect();
        for handler in handlers {
            handler();
        }
    }
}

impl<T: OptionValue + fmt::Debug> fmt::Debug for ConfigOption<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOption")
            .field("name", &self.name)
            .field("value", &*self.value.borrow())
            .field("default_value", &self.default_value)
            .field("handlers", &self.handlers.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_new_option_uses_default() {
        let opt = ConfigOption::new("core/duration", 300);
        assert_eq!(opt.name(), "core/duration");
        assert_eq!(opt.get_value(), 300);
        assert_eq!(opt.default_value(), 300);
    }

    #[test]
    fn test_set_value_str_parses_and_stores() {
        let opt = ConfigOption::new("speed", 1.0f64);
        opt.set_value_str(" 2.5 ").unwrap();
        assert_eq!(opt.get_value(), 2.5);
        assert_eq!(opt.get_value_str(), "2.5");
    }

    #[test]
    fn test_invalid_value_keeps_previous() {
        let opt = ConfigOption::new("duration", 150);
        opt.set_value(200);

        let err = opt.set_value_str("fast").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref option, .. } if option == "duration"
        ));
        assert_eq!(opt.get_value(), 200);
    }

    #[test]
    fn test_handlers_fire_only_on_change() {
        let opt = ConfigOption::new("enabled", false);
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        opt.add_updated_handler(move || calls_clone.set(calls_clone.get() + 1));

        opt.set_value(true);
        opt.set_value(true);
        opt.set_value_str("TRUE").unwrap();
        assert_eq!(calls.get(), 1);

        opt.reset_to_default();
        assert_eq!(calls.get(), 2);
        assert!(!opt.get_value());
    }

    #[test]
    fn test_removed_handler_is_not_called() {
        let opt = ConfigOption::new("name", String::from("a"));
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let id = opt.add_updated_handler(move || calls_clone.set(calls_clone.get() + 1));

        assert!(opt.remove_updated_handler(id));
        assert!(!opt.remove_updated_handler(id));
        opt.set_value("b".to_string());
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_handler_can_read_option() {
        let opt = ConfigOption::shared("duration", 100);
        let seen = Rc::new(Cell::new(0));
        let (opt_clone, seen_clone) = (Rc::downgrade(&opt), seen.clone());
        opt.add_updated_handler(move || {
            if let Some(opt) = opt_clone.upgrade() {
                seen_clone.set(opt.get_value());
            }
        });

        opt.set_value(450);
        assert_eq!(seen.get(), 450);
    }

    #[test]
    fn test_bool_and_int_parsing() {
        assert_eq!(bool::from_config_str("0"), Ok(false));
        assert_eq!(bool::from_config_str("False"), Ok(false));
        assert!(bool::from_config_str("yes").is_err());
        assert_eq!(i32::from_config_str("-20"), Ok(-20));
        assert!(i32::from_config_str("20ms").is_err());
    }
}
