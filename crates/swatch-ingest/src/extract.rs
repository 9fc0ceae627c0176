//! Structural metadata extraction from component source text.
//!
//! Best-effort pattern matching, not parsing: the props pattern stops at
//! the first closing brace, so interfaces with nested object types are
//! captured only up to the inner brace. Acceptable for the flat props
//! interfaces this corpus uses.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

/// Metadata key for the first `*Props` interface declaration.
pub const PROPS_INTERFACE_KEY: &str = "props_interface";

/// Metadata key for the first exported component definition header.
pub const COMPONENT_DEFINITION_KEY: &str = "component_definition";

static PROPS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"interface\s+\w+Props\s*\{[^}]*\}").expect("props pattern must compile")
});

static COMPONENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(export\s+(?:default\s+)?(?:const|function)\s+\w+[^{]*)\{")
        .expect("component pattern must compile")
});

/// Extract a props-interface snippet and a component-definition snippet
/// from raw source text. Pure; absent patterns simply omit their key.
#[must_use]
pub fn extract_component_info(content: &str) -> BTreeMap<String, String> {
    let mut info = BTreeMap::new();

    if let Some(m) = PROPS_RE.find(content) {
        info.insert(PROPS_INTERFACE_KEY.to_string(), m.as_str().to_string());
    }

    if let Some(caps) = COMPONENT_RE.captures(content) {
        info.insert(
            COMPONENT_DEFINITION_KEY.to_string(),
            caps[1].to_string(),
        );
    }

    info
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn props_interface_captured_with_braces() {
        let src = "interface FooProps { bar: string }\nexport const Foo = () => null;";
        let info = extract_component_info(src);
        assert_eq!(
            info.get(PROPS_INTERFACE_KEY).unwrap(),
            "interface FooProps { bar: string }"
        );
    }

    #[test]
    fn non_props_interface_ignored() {
        let src = "interface Theme { color: string }";
        let info = extract_component_info(src);
        assert!(!info.contains_key(PROPS_INTERFACE_KEY));
    }

    #[test]
    fn component_definition_excludes_brace() {
        let src = "export const Button = () => {\n  return null;\n};";
        let info = extract_component_info(src);
        assert_eq!(
            info.get(COMPONENT_DEFINITION_KEY).unwrap(),
            "export const Button = () => "
        );
    }

    #[test]
    fn export_default_function_captured() {
        let src = "export default function Card(props: CardProps) {\n  return null;\n}";
        let info = extract_component_info(src);
        assert_eq!(
            info.get(COMPONENT_DEFINITION_KEY).unwrap(),
            "export default function Card(props: CardProps) "
        );
    }

    #[test]
    fn only_first_match_per_pattern() {
        let src = "interface AProps { a: 1 }\ninterface BProps { b: 2 }\n\
                   export const A = () => {};\nexport const B = () => {};";
        let info = extract_component_info(src);
        assert!(info.get(PROPS_INTERFACE_KEY).unwrap().contains("AProps"));
        assert!(info.get(COMPONENT_DEFINITION_KEY).unwrap().contains("const A"));
    }

    #[test]
    fn nested_braces_stop_at_first_close() {
        // Known limitation: the body is cut at the inner closing brace.
        let src = "interface BoxProps { style: { color: string } }";
        let info = extract_component_info(src);
        assert_eq!(
            info.get(PROPS_INTERFACE_KEY).unwrap(),
            "interface BoxProps { style: { color: string }"
        );
    }

    #[test]
    fn empty_source_yields_empty_map() {
        assert!(extract_component_info("").is_empty());
    }

    #[test]
    fn both_keys_independent() {
        let src = "export function useThing() {\n}";
        let info = extract_component_info(src);
        assert!(!info.contains_key(PROPS_INTERFACE_KEY));
        assert!(info.contains_key(COMPONENT_DEFINITION_KEY));
    }
}
