use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

pub fn derive_kv_display_inner(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let struct_ident = input.ident.clone();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data_struct) = &input.data else {
        return syn::Error::new(input.span(), "KvDisplay can only be derived for structs")
            .to_compile_error()
            .into();
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return syn::Error::new(input.span(), "KvDisplay requires named fields")
            .to_compile_error()
            .into();
    };

    let mut rows = Vec::new();

    for field in &fields.named {
        let Some(field_ident) = &field.ident else {
            continue;
        };
        let key = field_ident.to_string();
        let mut fmt_mode = String::from("display");

        for attr in &field.attrs {
            if !attr.path().is_ident("kv") {
                continue;
            }
            let parse_result = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("fmt") {
                    let lit: LitStr = meta.value()?.parse()?;
                    fmt_mode = lit.value();
                    return Ok(());
                }
                Err(meta.error("unsupported kv attribute; expected fmt"))
            });
            if let Err(err) = parse_result {
                return err.to_compile_error().into();
            }
        }

        let value = match fmt_mode.as_str() {
            "display" => quote! { &self.#field_ident },
            "debug" => quote! { &format!("{:?}", &self.#field_ident) },
            other => {
                return syn::Error::new(
                    field.span(),
                    format!("unsupported kv fmt mode: {other}; expected display/debug"),
                )
                .to_compile_error()
                .into();
            }
        };
        rows.push((key, value));
    }

    let width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    let writes = rows.iter().map(|(key, value)| {
        let key_lit = LitStr::new(&format!("{key:<width$}"), Span::call_site());
        quote! {
            write!(f, "\n\t{} = {}", #key_lit, #value)?;
        }
    });

    let expanded = quote! {
        impl #impl_generics std::fmt::Display for #struct_ident #ty_generics #where_clause {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                #(#writes)*
                Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}
