use quote::quote;
use syn::{Attribute, Expr, ExprLit, Lit, Meta, Path, Type, TypePath};

pub fn to_kebab_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (idx, ch) in s.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if idx != 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}

/// First non-empty `///` line of an item, trimmed.
pub fn first_doc_line(attrs: &[Attribute]) -> Option<String> {
    attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .find(|line| !line.is_empty())
}

pub fn is_bool(ty: &Type) -> bool {
    last_segment_ident(ty).is_some_and(|ident| ident == "bool")
}

/// `<f64>`-style placeholder for usage rows when no explicit `value` is given.
pub fn default_placeholder(ty: &Type) -> String {
    match last_segment_ident(ty).as_deref() {
        Some("PathBuf") => "<path>".to_string(),
        Some("String") => "<value>".to_string(),
        Some(name) => format!("<{}>", name.to_ascii_lowercase()),
        None => "<value>".to_string(),
    }
}

fn last_segment_ident(ty: &Type) -> Option<String> {
    if let Type::Path(TypePath { path, .. }) = ty
        && let Some(seg) = path.segments.last()
    {
        return Some(seg.ident.to_string());
    }
    None
}

pub fn build_cli_parse_expr(ty: &Type, parse_with: Option<&Path>) -> proc_macro2::TokenStream {
    if let Some(parse_with) = parse_with {
        quote! { #parse_with(&raw)? }
    } else {
        quote! {
            raw.parse::<#ty>()
                .map_err(|e| crate::Error::invalid_input(format!(
                    "Invalid value for --{name}: {raw} ({e})"
                )))?
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::{default_placeholder, first_doc_line, is_bool, to_kebab_case};

    #[test]
    fn to_kebab_case_handles_pascal_and_snake_names() {
        assert_eq!(to_kebab_case("LogFormat"), "log-format");
        assert_eq!(to_kebab_case("progress_interval"), "progress-interval");
        assert_eq!(to_kebab_case("X"), "x");
    }

    #[test]
    fn first_doc_line_skips_blank_lines() {
        let field: syn::Field = parse_quote! {
            ///
            /// Seconds between progress notifications.
            /// More text.
            pub progress_interval: f64
        };
        assert_eq!(
            first_doc_line(&field.attrs).as_deref(),
            Some("Seconds between progress notifications.")
        );
    }

    #[test]
    fn first_doc_line_is_none_without_docs() {
        let field: syn::Field = parse_quote!(pub input: String);
        assert!(first_doc_line(&field.attrs).is_none());
    }

    #[test]
    fn is_bool_only_matches_bool() {
        let b: syn::Type = parse_quote!(bool);
        let s: syn::Type = parse_quote!(String);
        assert!(is_bool(&b));
        assert!(!is_bool(&s));
    }

    #[test]
    fn default_placeholder_uses_type_name() {
        let f: syn::Type = parse_quote!(f64);
        let p: syn::Type = parse_quote!(std::path::PathBuf);
        let s: syn::Type = parse_quote!(String);
        assert_eq!(default_placeholder(&f), "<f64>");
        assert_eq!(default_placeholder(&p), "<path>");
        assert_eq!(default_placeholder(&s), "<value>");
    }
}
