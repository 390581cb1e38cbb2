//! Parse context supplied by the host: notification type and enum capabilities

use crate::error::{Result, TileError};
use crate::types::{AttributeEnum, ElementKind, EnumKind, NotificationType};
use std::collections::HashMap;

/// Host-provided override of which enum values an element may use.
///
/// The parser does not decide feature availability itself. When the host
/// lists values for an (element, enum) pair, exactly those values are
/// accepted; pairs without an entry fall back to the element's own defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    overrides: HashMap<(ElementKind, EnumKind), Vec<String>>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow exactly `values` of `E` on `element`.
    pub fn allow<E: AttributeEnum>(mut self, element: ElementKind, values: &[E]) -> Self {
        self.overrides.insert(
            (element, E::KIND),
            values.iter().map(|v| v.as_str().to_string()).collect(),
        );
        self
    }

    pub fn supported_names(&self, element: ElementKind, kind: EnumKind) -> Option<&[String]> {
        self.overrides.get(&(element, kind)).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Build from a config table shaped `element -> enum key -> [values]`.
    pub fn from_table(
        table: &HashMap<String, HashMap<String, Vec<String>>>,
        file: &str,
    ) -> Result<Self> {
        let mut capabilities = Self::new();

        for (tag, enums) in table {
            let element = ElementKind::from_tag(tag)
                .ok_or_else(|| TileError::config(file, format!("unknown element '{}'", tag)))?;

            for (key, values) in enums {
                let kind = EnumKind::from_key(key).ok_or_else(|| {
                    TileError::config(file, format!("unknown enum '{}' for element '{}'", key, tag))
                })?;
                let spellings = kind.spellings();

                let mut names = Vec::with_capacity(values.len());
                for value in values {
                    let canonical = spellings
                        .iter()
                        .find(|s| s.eq_ignore_ascii_case(value))
                        .ok_or_else(|| {
                            TileError::config(
                                file,
                                format!(
                                    "'{}' is not a valid {} value (expected one of: {})",
                                    value,
                                    key,
                                    spellings.join(", ")
                                ),
                            )
                        })?;
                    names.push(canonical.to_string());
                }

                log::debug!("Capability override {}.{} = {:?}", tag, key, names);
                capabilities.overrides.insert((element, kind), names);
            }
        }

        Ok(capabilities)
    }
}

/// Everything a parse depends on besides the document itself.
#[derive(Debug, Clone, Default)]
pub struct ParseContext {
    pub notification_type: NotificationType,
    pub capabilities: Capabilities,
}

impl ParseContext {
    pub fn tile() -> Self {
        Self::default()
    }

    pub fn toast() -> Self {
        Self {
            notification_type: NotificationType::Toast,
            ..Self::default()
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}
