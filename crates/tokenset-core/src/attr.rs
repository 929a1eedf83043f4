//! Attribute binding — a token set that mirrors its serialization into an
//! external mutable attribute value.
//!
//! The collaborator boundary is kept minimal: [`Element`] is a named owner
//! of [`Attr`] cells, and an [`Attr`] is a named mutable string value with
//! `read`/`write`. Both are cheap-to-clone single-threaded handles
//! (`Rc`-backed, deliberately `!Send`).
//!
//! [`AttrTokenSet`] composes a [`TokenSet`] with a binding resolved once at
//! construction. Every mutation that actually changes the token sequence
//! pushes the canonical serialization into the bound attribute — except
//! when the set has just become empty, in which case the attribute keeps
//! its last non-empty value. That suppression matches the interface being
//! mirrored and is intentional; see `clearing_tokens_leaves_sink_value` in
//! the attr tests.
//!
//! If two independent `AttrTokenSet`s are bound to the same attribute,
//! writes are last-writer-wins with no conflict detection. Callers that
//! share a sink must serialize access themselves.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::{Result, TokenSetError};
use crate::set::{Iter, TokenSet};
use crate::token::TokenInput;

/// A named mutable string cell, optionally owned by an [`Element`].
#[derive(Clone)]
pub struct Attr {
    inner: Rc<AttrInner>,
}

struct AttrInner {
    name: String,
    value: RefCell<Option<String>>,
    owner: Weak<ElementInner>,
}

impl Attr {
    /// A standalone cell with no owning element and no initial value.
    pub fn detached(name: impl Into<String>) -> Self {
        Attr {
            inner: Rc::new(AttrInner {
                name: name.into(),
                value: RefCell::new(None),
                owner: Weak::new(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Current value, if one has ever been written.
    pub fn read(&self) -> Option<String> {
        self.inner.value.borrow().clone()
    }

    /// Replace the current value.
    pub fn write(&self, value: &str) {
        *self.inner.value.borrow_mut() = Some(value.to_string());
    }
}

impl fmt::Debug for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attr")
            .field("name", &self.inner.name)
            .field("value", &*self.inner.value.borrow())
            .finish()
    }
}

/// A named element owning attribute cells. The owner relationship is what
/// the binding constructor's ownership check is defined against.
#[derive(Clone)]
pub struct Element {
    inner: Rc<ElementInner>,
}

struct ElementInner {
    name: String,
    attrs: RefCell<Vec<Attr>>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            inner: Rc::new(ElementInner {
                name: name.into(),
                attrs: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Create or overwrite the named attribute and return its handle.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) -> Attr {
        let name = name.into();
        if let Some(attr) = self.attribute(&name) {
            attr.write(&value.into());
            return attr;
        }
        let attr = Attr {
            inner: Rc::new(AttrInner {
                name,
                value: RefCell::new(Some(value.into())),
                owner: Rc::downgrade(&self.inner),
            }),
        };
        self.inner.attrs.borrow_mut().push(attr.clone());
        attr
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<Attr> {
        self.inner
            .attrs
            .borrow()
            .iter()
            .find(|a| a.name() == name)
            .cloned()
    }

    /// Whether `attr` belongs to this element.
    pub fn owns(&self, attr: &Attr) -> bool {
        attr.inner
            .owner
            .upgrade()
            .is_some_and(|owner| Rc::ptr_eq(&owner, &self.inner))
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.inner.name)
            .finish()
    }
}

/// The element argument to [`AttrTokenSet::bind`]: a bare name (no live
/// binding) or a live element handle.
#[derive(Debug, Clone)]
pub enum ElementArg {
    Name(String),
    Handle(Element),
}

impl From<&str> for ElementArg {
    fn from(name: &str) -> Self {
        ElementArg::Name(name.to_string())
    }
}

impl From<String> for ElementArg {
    fn from(name: String) -> Self {
        ElementArg::Name(name)
    }
}

impl From<Element> for ElementArg {
    fn from(element: Element) -> Self {
        ElementArg::Handle(element)
    }
}

impl From<&Element> for ElementArg {
    fn from(element: &Element) -> Self {
        ElementArg::Handle(element.clone())
    }
}

/// The attribute argument to [`AttrTokenSet::bind`]: a name to resolve on
/// the element, or an explicit handle to ownership-check against it.
#[derive(Debug, Clone)]
pub enum AttrArg {
    Name(String),
    Handle(Attr),
}

impl From<&str> for AttrArg {
    fn from(name: &str) -> Self {
        AttrArg::Name(name.to_string())
    }
}

impl From<String> for AttrArg {
    fn from(name: String) -> Self {
        AttrArg::Name(name)
    }
}

impl From<Attr> for AttrArg {
    fn from(attr: Attr) -> Self {
        AttrArg::Handle(attr)
    }
}

impl From<&Attr> for AttrArg {
    fn from(attr: &Attr) -> Self {
        AttrArg::Handle(attr.clone())
    }
}

/// How the bound set reaches its sink. Inert bindings track tokens in
/// memory only; writes are no-ops.
#[derive(Debug, Clone)]
enum Binding {
    Inert { attr: String },
    Live(Attr),
}

/// A [`TokenSet`] bound to a named attribute, with write-through.
#[derive(Debug, Clone)]
pub struct AttrTokenSet {
    set: TokenSet,
    binding: Binding,
}

impl AttrTokenSet {
    /// Resolve a binding and seed the set.
    ///
    /// Resolution:
    /// - element given by name → inert binding, the attribute argument only
    ///   supplies the label used by [`to_attribute`]
    /// - live element + attribute name → resolved on the element, or
    ///   [`AttributeNotFound`]
    /// - live element + attribute handle → ownership-checked, or
    ///   [`OwnershipMismatch`]
    /// - an empty element or attribute name → [`InvalidBindingTarget`]
    ///
    /// When the resolved attribute already holds a non-empty value, that
    /// value is split on whitespace and seeded first; `seed` tokens are
    /// appended after it under the usual `add` ordering and dedup rules.
    ///
    /// [`to_attribute`]: AttrTokenSet::to_attribute
    /// [`AttributeNotFound`]: TokenSetError::AttributeNotFound
    /// [`OwnershipMismatch`]: TokenSetError::OwnershipMismatch
    /// [`InvalidBindingTarget`]: TokenSetError::InvalidBindingTarget
    pub fn bind(
        element: impl Into<ElementArg>,
        attr: impl Into<AttrArg>,
        seed: impl Into<TokenInput>,
    ) -> Result<Self> {
        let binding = resolve(element.into(), attr.into())?;
        let mut set = TokenSet::new();
        if let Binding::Live(attr) = &binding {
            if let Some(existing) = attr.read() {
                if !existing.is_empty() {
                    set.add(existing)?;
                }
            }
        }
        set.add(seed)?;
        let bound = AttrTokenSet { set, binding };
        // Seeding goes through the mutation path, so it writes through too.
        bound.sync(0);
        Ok(bound)
    }

    /// Bind with no extra seed tokens.
    pub fn bind_empty(element: impl Into<ElementArg>, attr: impl Into<AttrArg>) -> Result<Self> {
        Self::bind(element, attr, TokenInput::Seq(Vec::new()))
    }

    /// See [`TokenSet::add`]. Writes through on change.
    pub fn add(&mut self, input: impl Into<TokenInput>) -> Result<&mut Self> {
        let before = self.set.revision();
        self.set.add(input)?;
        self.sync(before);
        Ok(self)
    }

    /// See [`TokenSet::remove`]. Writes through on change.
    pub fn remove(&mut self, input: impl Into<TokenInput>) -> Result<&mut Self> {
        let before = self.set.revision();
        self.set.remove(input)?;
        self.sync(before);
        Ok(self)
    }

    /// See [`TokenSet::remove_at`]. Writes through on change.
    pub fn remove_at(&mut self, index: usize) -> &mut Self {
        let before = self.set.revision();
        self.set.remove_at(index);
        self.sync(before);
        self
    }

    /// See [`TokenSet::replace`]. Writes through on change.
    pub fn replace(&mut self, old: &str, new: &str) -> Result<bool> {
        let before = self.set.revision();
        let replaced = self.set.replace(old, new)?;
        self.sync(before);
        Ok(replaced)
    }

    /// See [`TokenSet::toggle`]. Writes through on change.
    pub fn toggle(&mut self, token: &str, force: Option<bool>) -> Result<bool> {
        let before = self.set.revision();
        let present = self.set.toggle(token, force)?;
        self.sync(before);
        Ok(present)
    }

    pub fn contains(&self, token: &str) -> Result<bool> {
        self.set.contains(token)
    }

    pub fn item(&self, index: usize) -> Option<&str> {
        self.set.item(index)
    }

    /// Token count, under the `length` name the mirrored interface uses.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn value(&self) -> String {
        self.set.value()
    }

    pub fn iter(&self) -> Iter<'_> {
        self.set.iter()
    }

    /// Read-only access to the underlying set.
    pub fn as_set(&self) -> &TokenSet {
        &self.set
    }

    /// The attribute name this binding writes under.
    pub fn attr_name(&self) -> &str {
        match &self.binding {
            Binding::Inert { attr } => attr,
            Binding::Live(attr) => attr.name(),
        }
    }

    /// Handle to the bound attribute, when the binding is live.
    pub fn bound_attr(&self) -> Option<&Attr> {
        match &self.binding {
            Binding::Live(attr) => Some(attr),
            Binding::Inert { .. } => None,
        }
    }

    /// Markup-fragment form: `name="v1 v2"` with `&` and `"` escaped in the
    /// value. Empty string when the set is empty or the name is blank.
    pub fn to_attribute(&self) -> String {
        if self.set.is_empty() {
            return String::new();
        }
        let name = self.attr_name();
        if name.is_empty() {
            return String::new();
        }
        format!("{}=\"{}\"", name, escape_attr_value(&self.set.value()))
    }

    /// [`to_attribute`] with one leading space, for direct concatenation
    /// into a tag being assembled. Empty when the set is empty.
    ///
    /// [`to_attribute`]: AttrTokenSet::to_attribute
    pub fn with_leading_space(&self) -> String {
        let attr = self.to_attribute();
        if attr.is_empty() {
            attr
        } else {
            format!(" {attr}")
        }
    }

    /// Push the serialization into a live sink, but only when the sequence
    /// actually changed and the set is non-empty. Clearing the last token
    /// leaves the sink holding its previous value.
    fn sync(&self, before: u64) {
        if self.set.revision() == before || self.set.is_empty() {
            return;
        }
        if let Binding::Live(attr) = &self.binding {
            attr.write(&self.set.value());
        }
    }
}

impl fmt::Display for AttrTokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.set.value())
    }
}

impl<'a> IntoIterator for &'a AttrTokenSet {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Resolve the tagged constructor arguments into a binding.
fn resolve(element: ElementArg, attr: AttrArg) -> Result<Binding> {
    match element {
        ElementArg::Name(name) => {
            if name.is_empty() {
                return Err(TokenSetError::InvalidBindingTarget(
                    "element name is empty".to_string(),
                ));
            }
            // No live element, so no live binding regardless of the
            // attribute shape; a handle still contributes its name.
            let attr_name = match attr {
                AttrArg::Name(n) => n,
                AttrArg::Handle(a) => a.name().to_string(),
            };
            if attr_name.is_empty() {
                return Err(TokenSetError::InvalidBindingTarget(
                    "attribute name is empty".to_string(),
                ));
            }
            Ok(Binding::Inert { attr: attr_name })
        }
        ElementArg::Handle(element) => match attr {
            AttrArg::Name(name) => {
                if name.is_empty() {
                    return Err(TokenSetError::InvalidBindingTarget(
                        "attribute name is empty".to_string(),
                    ));
                }
                match element.attribute(&name) {
                    Some(attr) => Ok(Binding::Live(attr)),
                    None => Err(TokenSetError::AttributeNotFound {
                        attr: name,
                        element: element.name().to_string(),
                    }),
                }
            }
            AttrArg::Handle(attr) => {
                if element.owns(&attr) {
                    Ok(Binding::Live(attr))
                } else {
                    Err(TokenSetError::OwnershipMismatch {
                        attr: attr.name().to_string(),
                        element: element.name().to_string(),
                    })
                }
            }
        },
    }
}

/// Escape a string for double-quoted attribute-value position. Ampersand
/// first, then the quote.
fn escape_attr_value(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
