use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, Path, parse_macro_input, spanned::Spanned};

use crate::utils;

enum OptionKind {
    Value {
        long: String,
        placeholder: String,
        parse_with: Option<Path>,
    },
    Flag {
        name: String,
    },
}

pub fn derive_cli_options_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "CliOptions can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "CliOptions requires named fields")
            .to_compile_error()
            .into();
    };

    let mut arms = Vec::new();
    let mut help_rows: Vec<(String, String)> = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };

        let mut long: Option<String> = None;
        let mut flag: Option<String> = None;
        let mut placeholder: Option<String> = None;
        let mut parse_with: Option<Path> = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("cli") {
                continue;
            }
            let parse_result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("long") {
                    let lit: LitStr = meta.value()?.parse()?;
                    long = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("flag") {
                    let lit: LitStr = meta.value()?.parse()?;
                    flag = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("value") {
                    let lit: LitStr = meta.value()?.parse()?;
                    placeholder = Some(lit.value());
                    return Ok(());
                }
                if meta.path.is_ident("parse_with") {
                    let lit: LitStr = meta.value()?.parse()?;
                    parse_with = Some(syn::parse_str(&lit.value())?);
                    return Ok(());
                }
                Err(meta.error("unsupported cli attribute; expected long/flag/value/parse_with"))
            });
            if let Err(err) = parse_result {
                return err.to_compile_error().into();
            }
        }

        let kind = match (long, flag) {
            (Some(_), Some(_)) => {
                return syn::Error::new(field.span(), "use either `long` or `flag`, not both")
                    .to_compile_error()
                    .into();
            }
            (Some(long), None) => OptionKind::Value {
                long,
                placeholder: placeholder.unwrap_or_else(|| utils::default_placeholder(&field.ty)),
                parse_with,
            },
            (None, Some(name)) => {
                if !utils::is_bool(&field.ty) {
                    return syn::Error::new(field.ty.span(), "`flag` options must be `bool`")
                        .to_compile_error()
                        .into();
                }
                OptionKind::Flag { name }
            }
            (None, None) => continue,
        };

        let doc = utils::first_doc_line(&field.attrs).unwrap_or_default();

        match kind {
            OptionKind::Value {
                long,
                placeholder,
                parse_with,
            } => {
                let long_lit = LitStr::new(&long, Span::call_site());
                let parse_expr = utils::build_cli_parse_expr(&field.ty, parse_with.as_ref());
                arms.push(quote! {
                    #long_lit => {
                        let raw = value.ok_or_else(|| {
                            crate::Error::invalid_input(format!("Missing value for --{name}"))
                        })?;
                        self.#field_ident = #parse_expr;
                        Ok(true)
                    }
                });
                help_rows.push((format!("--{long} {placeholder}"), doc));
            }
            OptionKind::Flag { name } => {
                let on_lit = LitStr::new(&name, Span::call_site());
                let off_lit = LitStr::new(&format!("no-{name}"), Span::call_site());
                arms.push(quote! {
                    #on_lit => {
                        self.#field_ident = match value {
                            Some(raw) => Self::parse_flag_value(name, &raw)?,
                            None => true,
                        };
                        Ok(true)
                    }
                });
                arms.push(quote! {
                    #off_lit => {
                        if value.is_some() {
                            return Err(crate::Error::invalid_input(format!(
                                "Flag --{name} does not take a value"
                            )));
                        }
                        self.#field_ident = false;
                        Ok(true)
                    }
                });
                help_rows.push((format!("--{name}[=<bool>]"), doc));
                help_rows.push((format!("--no-{name}"), String::new()));
            }
        }
    }

    let width = help_rows.iter().map(|(lhs, _)| lhs.len()).max().unwrap_or(0);
    let help_text = help_rows
        .iter()
        .map(|(lhs, doc)| {
            if doc.is_empty() {
                format!("  {lhs}\n")
            } else {
                format!("  {lhs:<width$}  {doc}\n")
            }
        })
        .collect::<String>();
    let help_lit = LitStr::new(&help_text, Span::call_site());

    let expanded = quote! {
        impl #struct_ident {
            fn split_arg(
                raw_name: &str,
                args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
            ) -> (String, Option<String>) {
                if let Some((k, v)) = raw_name.split_once('=') {
                    return (k.to_string(), Some(v.to_string()));
                }

                let value = match args.peek() {
                    Some(next) if !next.starts_with("--") => args.next(),
                    _ => None,
                };

                (raw_name.to_string(), value)
            }

            fn parse_flag_value(name: &str, raw: &str) -> crate::Result<bool> {
                match raw.to_ascii_lowercase().as_str() {
                    "1" | "true" | "yes" | "on" => Ok(true),
                    "0" | "false" | "no" | "off" => Ok(false),
                    _ => Err(crate::Error::invalid_input(format!(
                        "Invalid boolean for --{name}: {raw} (expected true/false)"
                    ))),
                }
            }

            fn apply_cli_option(
                &mut self,
                name: &str,
                value: Option<String>,
            ) -> crate::Result<bool> {
                match name {
                    #(#arms,)*
                    _ => Ok(false),
                }
            }

            /// One line per option, generated from the field docs.
            pub fn option_help() -> &'static str {
                #help_lit
            }
        }
    };

    TokenStream::from(expanded)
}
