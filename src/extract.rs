//! Microdata extraction from HTML documents
//!
//! The entry points are [`microdata`] for the common case and [`Extractor`]
//! when the scan needs to be limited to part of the document or given a
//! base URL for derived `@id` values.
//!
//! Extraction walks every element carrying `itemscope` in document order,
//! including elements nested inside other items, and produces one
//! [`Item`] per scope. A nested item therefore appears twice in the
//! output: embedded as a property value of its parent, and again as its
//! own top-level entry.

use std::sync::LazyLock;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use crate::error::Error;
use crate::item::{Item, PropertyValue};

/// Suffix appended to the limiter to match scope elements.
const SCOPE_SUFFIX: &str = "[itemscope]";

static ALL_SCOPES: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(SCOPE_SUFFIX).expect("Failed to parse scope selector - this is a bug")
});

static ID_CARRIERS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("[id]").expect("Failed to parse id-carrier selector - this is a bug")
});

static BASE_HREF: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("base[href]").expect("Failed to parse base selector - this is a bug")
});

static SELECTED_OPTION: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("option[selected]")
        .expect("Failed to parse selected-option selector - this is a bug")
});

/// Extract every microdata item from an HTML string
///
/// Scans the whole document for `itemscope` elements with no limiter and
/// no base URL. Equivalent to `Extractor::new().extract(html)`.
///
/// # Examples
///
/// ```
/// let items = microdata::microdata(
///     r#"<div itemscope itemtype="http://schema.org/Person">
///         <span itemprop="name">John Doe</span>
///     </div>"#,
/// );
///
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].item_type.as_deref(), Some("Person"));
/// assert_eq!(items[0].context.as_deref(), Some("http://schema.org/"));
/// assert_eq!(items[0].get("name").and_then(|v| v.as_text()), Some("John Doe"));
/// ```
pub fn microdata(html: &str) -> Vec<Item> {
    Extractor::new().extract(html)
}

/// A reusable, configured microdata extractor
///
/// Holds the compiled scope selector and the optional base URL, so one
/// extractor can run over any number of documents. Configure through
/// [`Extractor::builder`]:
///
/// ```
/// use microdata::Extractor;
///
/// let extractor = Extractor::builder()
///     .limit("article ")
///     .base("https://example.com/post")
///     .build()
///     .unwrap();
///
/// let items = extractor.extract(
///     r#"<article><div itemscope id="intro">
///         <span itemprop="name">Jane</span>
///     </div></article>
///     <div itemscope><span itemprop="name">Ignored</span></div>"#,
/// );
///
/// assert_eq!(items.len(), 1);
/// assert_eq!(items[0].id.as_deref(), Some("https://example.com/post#intro"));
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    scopes: Selector,
    base: Option<String>,
}

impl Extractor {
    /// Create an extractor that scans the whole document with no base URL
    pub fn new() -> Self {
        Self {
            scopes: ALL_SCOPES.clone(),
            base: None,
        }
    }

    /// Start building a configured extractor
    pub fn builder() -> ExtractorBuilder {
        ExtractorBuilder::new()
    }

    /// Parse an HTML string and extract its microdata items
    ///
    /// Parsing uses html5ever's lenient document-mode recovery, so broken
    /// markup never fails; it just yields whatever items survive.
    pub fn extract(&self, html: &str) -> Vec<Item> {
        self.extract_document(&Html::parse_document(html))
    }

    /// Extract microdata items from an already-parsed document
    pub fn extract_document(&self, doc: &Html) -> Vec<Item> {
        let base = self.effective_base(doc);
        let mut trail = Vec::new();
        let mut items = Vec::new();

        for scope in doc.select(&self.scopes) {
            items.push(self.build_item(doc, scope, base, &mut trail));
        }

        debug!("extracted {} microdata items", items.len());
        items
    }

    /// The base used to derive `@id` from plain `id` attributes: the
    /// configured base wins over the document's own `<base href>`.
    fn effective_base<'a>(&'a self, doc: &'a Html) -> &'a str {
        if let Some(base) = &self.base {
            return base;
        }
        doc.select(&BASE_HREF)
            .next()
            .and_then(|el| el.attr("href"))
            .unwrap_or("")
    }

    /// Build one item for a scope element: seed `@type`/`@context` from its
    /// `itemtype`, then collect the properties it owns.
    fn build_item(
        &self,
        doc: &Html,
        scope: ElementRef<'_>,
        base: &str,
        trail: &mut Vec<NodeId>,
    ) -> Item {
        let mut item = Item::new();
        if let Some(itemtype) = scope.attr("itemtype") {
            if let Some((name, context)) = ldify_url(itemtype) {
                item.item_type = Some(name);
                item.context = Some(context);
            }
        }

        trail.push(scope.id());
        self.fill_item(doc, scope, base, trail, &mut item);
        trail.pop();
        item
    }

    /// Collect everything a scope element owns: its in-subtree properties,
    /// its `@id`, and the properties pulled in through `itemref`.
    fn fill_item(
        &self,
        doc: &Html,
        scope: ElementRef<'_>,
        base: &str,
        trail: &mut Vec<NodeId>,
        item: &mut Item,
    ) {
        let mut props = Vec::new();
        collect_props(scope, &mut props);
        for prop in props {
            if let Some(name) = prop.attr("itemprop") {
                let value = self.extract_value(doc, prop, base, trail);
                item.push(name, value);
            }
        }

        if let Some(itemid) = scope.attr("itemid") {
            item.id = Some(itemid.trim().to_string());
        } else if let Some(id) = scope.attr("id") {
            item.id = Some(format!("{base}#{id}"));
        }

        if let Some(refs) = scope.attr("itemref") {
            for target in refs.split_whitespace() {
                self.merge_referenced(doc, target, base, trail, item);
            }
        }
    }

    /// Merge the properties of every element carrying the referenced id.
    ///
    /// Ids should be unique, but duplicates in the wild are tolerated:
    /// every match is processed in document order. Only the referenced
    /// element's own `itemprop` counts, never its subtree.
    fn merge_referenced(
        &self,
        doc: &Html,
        target: &str,
        base: &str,
        trail: &mut Vec<NodeId>,
        item: &mut Item,
    ) {
        let mut found = false;
        for el in doc.select(&ID_CARRIERS) {
            if el.attr("id") != Some(target) {
                continue;
            }
            found = true;
            if let Some(name) = el.attr("itemprop") {
                let value = self.extract_value(doc, el, base, trail);
                item.push(name, value);
            }
        }

        if !found {
            debug!("itemref target '{}' not found in document", target);
        }
    }

    /// Extract the value of one property element
    ///
    /// An element with an `itemtype` is a nested item and recurses into
    /// item building; anything else resolves to a scalar according to its
    /// tag. `itemref` chains can loop back into a scope that is still
    /// being built; the repeat falls through to scalar extraction so the
    /// walk stays bounded by the document size.
    fn extract_value(
        &self,
        doc: &Html,
        el: ElementRef<'_>,
        base: &str,
        trail: &mut Vec<NodeId>,
    ) -> PropertyValue {
        if let Some(itemtype) = el.attr("itemtype") {
            if !trail.contains(&el.id()) {
                trace!("descending into nested item typed '{}'", itemtype);
                return PropertyValue::Item(self.build_item(doc, el, base, trail));
            }
        }

        let text = match el.value().name() {
            "meta" => attr_or_empty(el, "content"),
            "link" => attr_or_empty(el, "href"),
            "input" => attr_or_empty(el, "value"),
            "select" => selected_option_text(el),
            _ => el.text().collect::<String>().trim().to_string(),
        };
        PropertyValue::Text(text)
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring an [`Extractor`]
///
/// Limiter fragments are concatenated in the order they were added and
/// suffixed with `[itemscope]` to form the scope selector, so a fragment
/// with a trailing space restricts by ancestry (`"article "` matches
/// scopes inside `<article>`) while one without narrows the scope element
/// itself (`".post"` matches `itemscope` elements with that class).
pub struct ExtractorBuilder {
    limiter: Vec<String>,
    base: Option<String>,
}

impl ExtractorBuilder {
    /// Create a builder with no limiter and no base URL
    pub fn new() -> Self {
        Self {
            limiter: Vec::new(),
            base: None,
        }
    }

    /// Append one selector fragment to the limiter
    pub fn limit(mut self, fragment: impl Into<String>) -> Self {
        self.limiter.push(fragment.into());
        self
    }

    /// Append a sequence of selector fragments to the limiter
    pub fn limiter<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.limiter.extend(fragments.into_iter().map(Into::into));
        self
    }

    /// Set the base URL used when deriving `@id` from plain `id` attributes
    ///
    /// Takes precedence over any `<base href>` element in the document.
    pub fn base(mut self, url: impl Into<String>) -> Self {
        self.base = Some(url.into());
        self
    }

    /// Compile the scope selector and build the extractor
    ///
    /// Fails with [`Error::InvalidSelector`] when the limiter fragments do
    /// not compose into a valid CSS selector. With no fragments the
    /// composed selector is plain `[itemscope]` and building cannot fail.
    pub fn build(self) -> Result<Extractor, Error> {
        let expression = format!("{}{}", self.limiter.concat(), SCOPE_SUFFIX);
        match Selector::parse(&expression).map_err(|err| err.to_string()) {
            Ok(scopes) => Ok(Extractor {
                scopes,
                base: self.base,
            }),
            Err(error) => Err(Error::InvalidSelector {
                selector: expression,
                error,
            }),
        }
    }
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a vocabulary URL into its `@type` and `@context` halves
///
/// `"http://schema.org/Person"` becomes `("Person", "http://schema.org/")`.
/// URLs without a usable split (no `/`, nothing before the last one, or
/// nothing after it) yield `None` and both keys are omitted.
fn ldify_url(url: &str) -> Option<(String, String)> {
    let (prefix, name) = url.rsplit_once('/')?;
    if prefix.is_empty() || name.is_empty() {
        return None;
    }
    Some((name.to_string(), format!("{prefix}/")))
}

/// Walk a scope's subtree for the property elements it owns.
///
/// Descends in document order and stops at any `itemscope` boundary: a
/// nested scope's properties belong to the nested item alone. A property
/// element without its own `itemscope` is collected and descended into,
/// so properties may contain further properties of the same owner.
fn collect_props<'a>(el: ElementRef<'a>, found: &mut Vec<ElementRef<'a>>) {
    for node in el.children() {
        if let Some(child) = ElementRef::wrap(node) {
            if child.attr("itemprop").is_some() {
                found.push(child);
            }
            if child.attr("itemscope").is_none() {
                collect_props(child, found);
            }
        }
    }
}

fn attr_or_empty(el: ElementRef<'_>, attr: &str) -> String {
    el.attr(attr).map(str::trim).unwrap_or_default().to_string()
}

fn selected_option_text(el: ElementRef<'_>) -> String {
    el.select(&SELECTED_OPTION)
        .next()
        .map(|option| option.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}
