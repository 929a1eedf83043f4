use tokenset_core::{Attr, AttrTokenSet, Element, TokenSetError};

// ============================================================================
// Binding Resolution
// ============================================================================

#[test]
fn name_pair_binds_inert() {
    let list = AttrTokenSet::bind("div", "class", "a b").unwrap();
    assert_eq!(list.value(), "a b");
    assert!(list.bound_attr().is_none());
    assert_eq!(list.attr_name(), "class");
}

#[test]
fn live_element_resolves_attribute_by_name() {
    let el = Element::new("div");
    el.set_attribute("class", "a");
    let list = AttrTokenSet::bind_empty(&el, "class").unwrap();
    assert!(list.bound_attr().is_some());
    assert_eq!(list.value(), "a");
}

#[test]
fn missing_attribute_is_an_error() {
    let el = Element::new("div");
    let err = AttrTokenSet::bind_empty(&el, "class").unwrap_err();
    assert!(matches!(err, TokenSetError::AttributeNotFound { .. }));
}

#[test]
fn attribute_not_found_names_both_sides() {
    let el = Element::new("span");
    let err = AttrTokenSet::bind_empty(&el, "rel").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("rel"));
    assert!(msg.contains("span"));
}

#[test]
fn owned_handle_binds_live() {
    let el = Element::new("div");
    let attr = el.set_attribute("class", "a");
    let list = AttrTokenSet::bind_empty(&el, &attr).unwrap();
    assert_eq!(list.value(), "a");
}

#[test]
fn foreign_handle_is_an_ownership_error() {
    let el = Element::new("div");
    let other = Element::new("span");
    let attr = other.set_attribute("class", "a");
    let err = AttrTokenSet::bind_empty(&el, &attr).unwrap_err();
    assert!(matches!(err, TokenSetError::OwnershipMismatch { .. }));
}

#[test]
fn detached_handle_fails_ownership_check() {
    let el = Element::new("div");
    let attr = Attr::detached("class");
    let err = AttrTokenSet::bind_empty(&el, &attr).unwrap_err();
    assert!(matches!(err, TokenSetError::OwnershipMismatch { .. }));
}

#[test]
fn empty_element_name_is_invalid_target() {
    let err = AttrTokenSet::bind_empty("", "class").unwrap_err();
    assert!(matches!(err, TokenSetError::InvalidBindingTarget(_)));
}

#[test]
fn empty_attribute_name_is_invalid_target() {
    let err = AttrTokenSet::bind_empty("div", "").unwrap_err();
    assert!(matches!(err, TokenSetError::InvalidBindingTarget(_)));

    let el = Element::new("div");
    let err = AttrTokenSet::bind_empty(&el, "").unwrap_err();
    assert!(matches!(err, TokenSetError::InvalidBindingTarget(_)));
}

#[test]
fn handle_given_with_name_element_binds_inert_under_handle_name() {
    let other = Element::new("span");
    let attr = other.set_attribute("rel", "nofollow");
    let mut list = AttrTokenSet::bind("div", &attr, "a").unwrap();
    list.add("b").unwrap();
    // No live element means no live binding; the handle only lends its name.
    assert_eq!(attr.read().as_deref(), Some("nofollow"));
    assert_eq!(list.to_attribute(), r#"rel="a b""#);
}

// ============================================================================
// Seeding
// ============================================================================

#[test]
fn existing_value_seeds_before_caller_seed() {
    let el = Element::new("div");
    let attr = el.set_attribute("class", "a b");
    let list = AttrTokenSet::bind(&el, "class", "c").unwrap();
    let collected: Vec<&str> = list.iter().collect();
    assert_eq!(collected, vec!["a", "b", "c"]);
    assert_eq!(list.to_attribute(), r#"class="a b c""#);
    // The merged seed is written through at construction.
    assert_eq!(attr.read().as_deref(), Some("a b c"));
}

#[test]
fn caller_seed_deduplicates_against_existing_value() {
    let el = Element::new("div");
    el.set_attribute("class", "a b");
    let list = AttrTokenSet::bind(&el, "class", "b c").unwrap();
    assert_eq!(list.value(), "a b c");
}

#[test]
fn empty_existing_value_contributes_nothing() {
    let el = Element::new("div");
    el.set_attribute("class", "");
    let list = AttrTokenSet::bind(&el, "class", "x").unwrap();
    assert_eq!(list.value(), "x");
}

#[test]
fn invalid_seed_fails_construction() {
    let el = Element::new("div");
    el.set_attribute("class", "a");
    assert!(AttrTokenSet::bind(&el, "class", vec![String::new()]).is_err());
}

// ============================================================================
// Write-Through
// ============================================================================

#[test]
fn add_writes_through() {
    let el = Element::new("div");
    let attr = el.set_attribute("class", "a");
    let mut list = AttrTokenSet::bind_empty(&el, "class").unwrap();
    list.add("b").unwrap();
    assert_eq!(attr.read().as_deref(), Some("a b"));
}

#[test]
fn remove_writes_through() {
    let el = Element::new("div");
    let attr = el.set_attribute("class", "a b c");
    let mut list = AttrTokenSet::bind_empty(&el, "class").unwrap();
    list.remove("b").unwrap();
    assert_eq!(attr.read().as_deref(), Some("a c"));
}

#[test]
fn replace_writes_through() {
    let el = Element::new("div");
    let attr = el.set_attribute("class", "a b");
    let mut list = AttrTokenSet::bind_empty(&el, "class").unwrap();
    assert!(list.replace("a", "z").unwrap());
    assert_eq!(attr.read().as_deref(), Some("z b"));
}

#[test]
fn toggle_writes_through_both_ways() {
    let el = Element::new("div");
    let attr = el.set_attribute("class", "a");
    let mut list = AttrTokenSet::bind_empty(&el, "class").unwrap();
    list.toggle("b", None).unwrap();
    assert_eq!(attr.read().as_deref(), Some("a b"));
    list.toggle("b", None).unwrap();
    assert_eq!(attr.read().as_deref(), Some("a"));
}

#[test]
fn remove_at_writes_through() {
    let el = Element::new("div");
    let attr = el.set_attribute("class", "a b");
    let mut list = AttrTokenSet::bind_empty(&el, "class").unwrap();
    list.remove_at(0);
    assert_eq!(attr.read().as_deref(), Some("b"));
}

#[test]
fn noop_mutations_do_not_rewrite_the_sink() {
    let el = Element::new("div");
    let attr = el.set_attribute("class", "a");
    let mut list = AttrTokenSet::bind_empty(&el, "class").unwrap();
    // Clobber the cell behind the binding's back; an unchanged set must
    // not push its stale serialization over it.
    attr.write("sentinel");
    list.add("a").unwrap();
    list.remove("absent").unwrap();
    assert!(!list.replace("absent", "x").unwrap());
    assert_eq!(attr.read().as_deref(), Some("sentinel"));
}

#[test]
fn clearing_tokens_leaves_sink_value() {
    // Write-through is suppressed when the set empties: the attribute
    // keeps its last non-empty serialization. Intentional, if surprising.
    let el = Element::new("div");
    let attr = el.set_attribute("class", "a b");
    let mut list = AttrTokenSet::bind_empty(&el, "class").unwrap();
    list.remove("a b").unwrap();
    assert!(list.is_empty());
    assert_eq!(attr.read().as_deref(), Some("a b"));
}

#[test]
fn mutating_again_after_clear_resumes_write_through() {
    let el = Element::new("div");
    let attr = el.set_attribute("class", "a");
    let mut list = AttrTokenSet::bind_empty(&el, "class").unwrap();
    list.remove("a").unwrap();
    assert_eq!(attr.read().as_deref(), Some("a"));
    list.add("b").unwrap();
    assert_eq!(attr.read().as_deref(), Some("b"));
}

#[test]
fn inert_binding_tracks_in_memory_only() {
    let mut list = AttrTokenSet::bind("div", "class", "a").unwrap();
    list.add("b").unwrap();
    list.toggle("c", None).unwrap();
    assert_eq!(list.value(), "a b c");
    assert_eq!(list.len(), 3);
}

#[test]
fn independent_bindings_are_last_writer_wins() {
    let el = Element::new("div");
    let attr = el.set_attribute("class", "a");
    let mut first = AttrTokenSet::bind_empty(&el, "class").unwrap();
    let mut second = AttrTokenSet::bind_empty(&el, "class").unwrap();
    first.add("x").unwrap();
    second.add("y").unwrap();
    // Neither binding sees the other's tokens; the cell holds the last write.
    assert_eq!(attr.read().as_deref(), Some("a y"));
}

// ============================================================================
// Fragment Forms
// ============================================================================

#[test]
fn to_attribute_quotes_the_canonical_value() {
    let list = AttrTokenSet::bind("div", "class", "foo baz").unwrap();
    assert_eq!(list.to_attribute(), r#"class="foo baz""#);
}

#[test]
fn to_attribute_of_empty_set_is_empty_string() {
    let list = AttrTokenSet::bind_empty("div", "class").unwrap();
    assert_eq!(list.to_attribute(), "");
}

#[test]
fn to_attribute_escapes_ampersand_and_quote() {
    // Ampersands and quotes are legal inside tokens; only whitespace is not.
    let list = AttrTokenSet::bind("a", "href-extra", r#"q="a&b""#).unwrap();
    assert_eq!(list.to_attribute(), r#"href-extra="q=&quot;a&amp;b&quot;""#);
}

#[test]
fn with_leading_space_prefixes_one_space() {
    let list = AttrTokenSet::bind("div", "class", "a b").unwrap();
    assert_eq!(list.with_leading_space(), r#" class="a b""#);
}

#[test]
fn with_leading_space_of_empty_set_is_empty() {
    let list = AttrTokenSet::bind_empty("div", "class").unwrap();
    assert_eq!(list.with_leading_space(), "");
}

#[test]
fn fragment_assembly_concatenates_cleanly() {
    let classes = AttrTokenSet::bind("div", "class", "hero dark").unwrap();
    let tag = format!("<div{}>", classes.with_leading_space());
    assert_eq!(tag, r#"<div class="hero dark">"#);
}

// ============================================================================
// Delegated Reads
// ============================================================================

#[test]
fn reads_delegate_to_the_inner_set() {
    let list = AttrTokenSet::bind("div", "class", "a b c").unwrap();
    assert!(list.contains("b").unwrap());
    assert_eq!(list.item(2), Some("c"));
    assert_eq!(list.item(3), None);
    assert_eq!(list.len(), 3);
    assert!(!list.is_empty());
    assert_eq!(list.to_string(), "a b c");
    assert_eq!(list.as_set().value(), "a b c");
}

#[test]
fn iteration_delegates_in_order() {
    let list = AttrTokenSet::bind("div", "class", "x y").unwrap();
    let collected: Vec<&str> = (&list).into_iter().collect();
    assert_eq!(collected, vec!["x", "y"]);
}
