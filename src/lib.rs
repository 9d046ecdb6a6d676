//! # microdata
//!
//! Extract [W3C microdata] (`itemscope`, `itemtype`, `itemprop`, `itemref`,
//! `itemid`) from HTML into a flat list of JSON-LD-like items.
//!
//! [W3C microdata]: https://html.spec.whatwg.org/multipage/microdata.html
//!
//! ## Features
//!
//! - One [`Item`] per `itemscope` element, in document order — nested
//!   scopes appear both embedded in their parent and as their own entry
//! - `@type`/`@context` derived from `itemtype` URLs, `@id` from `itemid`
//!   or a plain `id` plus the document base
//! - Repeated property names aggregate into ordered lists
//! - `itemref` indirection, tolerant of dangling and duplicated ids
//! - Tag-aware values: `meta` content, `link` href, `input` value, the
//!   selected `option` of a `select`, text content for everything else
//! - Best-effort throughout: broken markup and missing attributes degrade
//!   to empty values instead of errors
//!
//! ## Quick Start
//!
//! ```
//! use microdata::microdata;
//!
//! let items = microdata(
//!     r#"<article itemscope itemtype="http://schema.org/BlogPosting">
//!         <h1 itemprop="headline">My Blog Post</h1>
//!         <div itemprop="author" itemscope itemtype="http://schema.org/Person">
//!             <span itemprop="name">John Doe</span>
//!         </div>
//!     </article>"#,
//! );
//!
//! // The article and the nested person are both top-level entries.
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].item_type.as_deref(), Some("BlogPosting"));
//!
//! let author = items[0].get("author").and_then(|v| v.as_item()).unwrap();
//! assert_eq!(author.get("name").and_then(|v| v.as_text()), Some("John Doe"));
//! ```
//!
//! Scans can be narrowed to part of a document, and given a base URL for
//! derived `@id` values, through [`Extractor::builder`].

// Core modules
mod error;
mod extract;
mod item;

// Public exports
pub use error::Error;
pub use extract::{microdata, Extractor, ExtractorBuilder};
pub use item::{Item, PropertyValue};
