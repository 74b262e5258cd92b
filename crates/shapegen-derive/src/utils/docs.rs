// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Documentation extraction utilities.
//!
//! Doc comments (`///` and `/** */`) are stored as `#[doc = "..."]`
//! attributes. They become the comment lines of the declared resource and
//! its attributes, which emitters render next to the generated fields.
//!
//! ```rust,ignore
//! /// Given name.
//! ///
//! /// As printed on the passport.
//! first_name: String,
//!
//! // Extracts to: ["Given name.", "", "As printed on the passport."]
//! ```

use syn::Attribute;

/// Extract doc comment lines from attributes.
///
/// Each line is trimmed; leading and trailing blank lines are dropped,
/// blank lines in between are kept as paragraph breaks.
pub fn extract_doc_lines(attrs: &[Attribute]) -> Vec<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| {
            if let syn::Meta::NameValue(meta) = &attr.meta
                && let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit_str),
                    ..
                }) = &meta.value
            {
                return Some(lit_str.value());
            }
            None
        })
        .flat_map(|value| {
            value
                .split('\n')
                .map(|line| line.trim().to_string())
                .collect::<Vec<_>>()
        })
        .collect();

    let Some(first) = lines.iter().position(|line| !line.is_empty()) else {
        return Vec::new();
    };
    let last = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .unwrap_or(first);
    lines[first..=last].to_vec()
}

/// Join doc lines into one paragraph-preserving string.
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let lines = extract_doc_lines(attrs);
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_attrs(input: &str) -> Vec<Attribute> {
        let item: syn::ItemStruct = syn::parse_str(input).unwrap();
        item.attrs
    }

    #[test]
    fn extract_single_line_doc() {
        let attrs = parse_attrs(
            r#"
            /// Person entity.
            struct Foo;
        "#
        );
        assert_eq!(extract_doc_lines(&attrs), ["Person entity."]);
    }

    #[test]
    fn extract_keeps_inner_blank_lines() {
        let attrs = parse_attrs(
            r#"
            ///
            /// Summary.
            ///
            /// Details here.
            ///
            struct Foo;
        "#
        );
        assert_eq!(extract_doc_lines(&attrs), ["Summary.", "", "Details here."]);
        assert_eq!(
            extract_doc_comments(&attrs),
            Some("Summary.\n\nDetails here.".to_string())
        );
    }

    #[test]
    fn extract_block_comment_lines() {
        let attrs = parse_attrs(
            r#"
            /** First line.
                Second line. */
            struct Foo;
        "#
        );
        assert_eq!(extract_doc_lines(&attrs), ["First line.", "Second line."]);
    }

    #[test]
    fn extract_no_docs() {
        let attrs = parse_attrs(
            r#"
            #[derive(Debug)]
            struct Foo;
        "#
        );
        assert!(extract_doc_lines(&attrs).is_empty());
        assert_eq!(extract_doc_comments(&attrs), None);
    }
}
