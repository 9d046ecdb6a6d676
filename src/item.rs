//! The JSON-LD-like output model
//!
//! This module provides the [`Item`] and [`PropertyValue`] types that every
//! extraction produces. An item is an insertion-ordered mapping from
//! property names to values, plus the reserved `@type`/`@context`/`@id`
//! keys, and serializes to the JSON shape consumers of JSON-LD expect.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

/// A single value stored under a property name
///
/// Values are either a scalar string, a nested [`Item`], or an ordered
/// list of further values (produced when the same property name recurs on
/// one item). The enum is untagged, so it serializes directly as a JSON
/// string, object, or array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Scalar text extracted from an element's content or attribute
    Text(String),
    /// A nested item extracted from an element with an `itemtype`
    Item(Item),
    /// Ordered values collected from repeated uses of one property name
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Return the scalar text, if this value is one
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Return the nested item, if this value is one
    pub fn as_item(&self) -> Option<&Item> {
        match self {
            PropertyValue::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Return the ordered values, if this value is a list
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(values) => Some(values),
            _ => None,
        }
    }
}

impl From<String> for PropertyValue {
    fn from(text: String) -> Self {
        PropertyValue::Text(text)
    }
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        PropertyValue::Text(text.to_string())
    }
}

impl From<Item> for PropertyValue {
    fn from(item: Item) -> Self {
        PropertyValue::Item(item)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(values: Vec<PropertyValue>) -> Self {
        PropertyValue::List(values)
    }
}

/// One extracted microdata item
///
/// Items serialize with the reserved keys first, each omitted when absent,
/// followed by the properties in insertion order:
///
/// ```
/// use microdata::microdata;
///
/// let items = microdata(
///     r#"<div itemscope itemtype="http://schema.org/Person">
///         <span itemprop="name">John Doe</span>
///     </div>"#,
/// );
///
/// let json = serde_json::to_string(&items[0]).unwrap();
/// assert_eq!(
///     json,
///     r#"{"@type":"Person","@context":"http://schema.org/","name":"John Doe"}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Item {
    /// The trailing segment of the scope's `itemtype` URL, if resolvable
    #[serde(rename = "@type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    /// The `itemtype` URL up to and including its final `/`, if resolvable
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// The scope's `itemid`, or an identifier derived from its `id`
    #[serde(rename = "@id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Named property values in document order
    #[serde(flatten)]
    pub properties: IndexMap<String, PropertyValue>,
}

impl Item {
    /// Create an empty item with no type, context, id, or properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a value into the item under a property name
    ///
    /// The first value for a name is stored as-is. A second value converts
    /// the slot into an ordered two-element list, and later values append.
    /// Duplicate values are preserved as separate entries, never collapsed.
    ///
    /// ```
    /// use microdata::{Item, PropertyValue};
    ///
    /// let mut item = Item::new();
    /// item.push("author", "Alice");
    /// assert_eq!(item.get("author").and_then(|v| v.as_text()), Some("Alice"));
    ///
    /// item.push("author", "Bob");
    /// let authors = item.get("author").and_then(|v| v.as_list()).unwrap();
    /// assert_eq!(authors.len(), 2);
    /// ```
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        let value = value.into();
        match self.properties.entry(name.into()) {
            Entry::Vacant(slot) => {
                slot.insert(value);
            }
            Entry::Occupied(mut slot) => match slot.get_mut() {
                PropertyValue::List(values) => values.push(value),
                existing => {
                    let first =
                        std::mem::replace(existing, PropertyValue::List(Vec::with_capacity(2)));
                    if let PropertyValue::List(values) = existing {
                        values.push(first);
                        values.push(value);
                    }
                }
            },
        }
    }

    /// Get the value stored under a property name
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    /// Number of named properties (reserved keys are not counted)
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the item carries no named properties
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterate over properties in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> + '_ {
        self.properties.iter().map(|(name, value)| (name.as_str(), value))
    }
}
