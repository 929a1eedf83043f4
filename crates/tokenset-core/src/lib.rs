//! # tokenset-core
//!
//! An ordered, duplicate-free collection of whitespace-delimited string
//! tokens, mirroring the token-list semantics of markup attributes such as
//! a `class` value — plus an optional binding that keeps an external
//! attribute cell in sync with the set.
//!
//! ## Quick start
//!
//! ```rust
//! use tokenset_core::TokenSet;
//!
//! let mut classes = TokenSet::from_input("foo baz qux").unwrap();
//! classes.add("not xor").unwrap();
//! classes.remove(["foo", "qux"]).unwrap();
//! classes.replace("not", "and").unwrap();
//! assert_eq!(classes.value(), "baz and xor");
//! ```
//!
//! Bound to an element attribute, mutations write the canonical form back
//! through:
//!
//! ```rust
//! use tokenset_core::{AttrTokenSet, Element};
//!
//! let div = Element::new("div");
//! let class = div.set_attribute("class", "a b");
//! let mut list = AttrTokenSet::bind(&div, "class", "c").unwrap();
//! assert_eq!(class.read().as_deref(), Some("a b c"));
//! assert_eq!(list.to_attribute(), r#"class="a b c""#);
//! list.toggle("b", None).unwrap();
//! assert_eq!(class.read().as_deref(), Some("a c"));
//! ```
//!
//! ## Modules
//!
//! - [`set`] — the `TokenSet` engine (add/remove/replace/toggle, canonical
//!   serialization, iteration)
//! - [`attr`] — `Element`/`Attr` handles and the write-through
//!   `AttrTokenSet` binding
//! - [`token`] — token validation and the `TokenInput` input shapes
//! - [`error`] — error types

pub mod attr;
pub mod error;
pub mod set;
pub mod token;

pub use attr::{Attr, AttrArg, AttrTokenSet, Element, ElementArg};
pub use error::{Result, TokenSetError};
pub use set::TokenSet;
pub use token::TokenInput;
