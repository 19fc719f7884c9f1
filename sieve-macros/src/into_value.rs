//! Implementation of `#[derive(IntoValue)]`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    Attribute, Data, DataEnum, DeriveInput, Fields, GenericParam, Ident, LitStr, parse_macro_input,
    parse_quote,
};

/// Options read from `#[sieve(...)]` attributes.
#[derive(Default)]
struct SieveAttrs {
    rename: Option<String>,
    skip: bool,
}

impl SieveAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = SieveAttrs::default();
        for attr in attrs {
            if !attr.path().is_ident("sieve") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    parsed.rename = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown sieve attribute, expected `rename` or `skip`"))
                }
            })?;
        }
        Ok(parsed)
    }

    fn key(&self, ident: &Ident) -> String {
        self.rename
            .clone()
            .unwrap_or_else(|| ident.to_string().trim_start_matches("r#").to_string())
    }
}

/// Implementation of the `IntoValue` derive.
pub fn derive_into_value_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    let mut generics = input.generics.clone();
    let type_params: Vec<Ident> = generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(ty.ident.clone()),
            _ => None,
        })
        .collect();
    let where_clause = generics.make_where_clause();
    for param in &type_params {
        where_clause
            .predicates
            .push(parse_quote!(#param: ::core::convert::Into<::sieve::Value>));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => struct_body(name, &data.fields)?,
        Data::Enum(data) => enum_body(name, data)?,
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "#[derive(IntoValue)] cannot be used on unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::core::convert::From<#name #ty_generics>
            for ::sieve::Value
            #where_clause
        {
            fn from(value: #name #ty_generics) -> Self {
                #body
            }
        }
    })
}

/// `Into<Value>` conversion of a bound local; generic fields only carry an
/// `Into` bound.
fn into_value(ident: &Ident) -> TokenStream2 {
    quote! { ::core::convert::Into::<::sieve::Value>::into(#ident) }
}

/// Insert statements for named fields already bound to local identifiers.
fn record_inserts(fields: &Fields) -> syn::Result<(Vec<Ident>, Vec<TokenStream2>)> {
    let mut bound = Vec::new();
    let mut inserts = Vec::new();
    for field in fields {
        let attrs = SieveAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let key = attrs.key(&ident);
        let value = into_value(&ident);
        inserts.push(quote! {
            __record.insert(
                ::std::string::String::from(#key),
                #value,
            );
        });
        bound.push(ident);
    }
    Ok((bound, inserts))
}

/// Local identifiers for tuple fields; skipped fields bind to `_`.
fn tuple_bindings(fields: &Fields) -> syn::Result<(Vec<TokenStream2>, Vec<Ident>)> {
    let mut patterns = Vec::new();
    let mut kept = Vec::new();
    for (i, field) in fields.iter().enumerate() {
        if SieveAttrs::parse(&field.attrs)?.skip {
            patterns.push(quote! { _ });
        } else {
            let ident = format_ident!("__field{}", i);
            patterns.push(quote! { #ident });
            kept.push(ident);
        }
    }
    Ok((patterns, kept))
}

fn struct_body(name: &Ident, fields: &Fields) -> syn::Result<TokenStream2> {
    Ok(match fields {
        Fields::Named(_) => {
            let (bound, inserts) = record_inserts(fields)?;
            quote! {
                #[allow(unused_mut)]
                let mut __record = ::sieve::Record::new();
                let #name { #(#bound,)* .. } = value;
                #(#inserts)*
                ::sieve::Value::Record(__record)
            }
        }
        Fields::Unnamed(_) => {
            let (patterns, kept) = tuple_bindings(fields)?;
            let items = kept.iter().map(into_value);
            quote! {
                let #name(#(#patterns),*) = value;
                ::sieve::Value::List(::std::vec![#(#items),*])
            }
        }
        Fields::Unit => quote! {
            let _ = value;
            ::sieve::Value::Nil
        },
    })
}

fn enum_body(name: &Ident, data: &DataEnum) -> syn::Result<TokenStream2> {
    let mut arms = Vec::new();
    for variant in &data.variants {
        let attrs = SieveAttrs::parse(&variant.attrs)?;
        let variant_ident = &variant.ident;
        let tag = attrs.key(variant_ident);

        let arm = match &variant.fields {
            Fields::Unit => quote! {
                #name::#variant_ident => ::sieve::Value::Str(::std::string::String::from(#tag)),
            },
            Fields::Named(_) => {
                let (bound, inserts) = record_inserts(&variant.fields)?;
                quote! {
                    #name::#variant_ident { #(#bound,)* .. } => {
                        let mut __record = ::sieve::Record::new();
                        __record.insert(
                            ::std::string::String::from("type"),
                            ::sieve::Value::Str(::std::string::String::from(#tag)),
                        );
                        #(#inserts)*
                        ::sieve::Value::Record(__record)
                    }
                }
            }
            Fields::Unnamed(_) => {
                let (patterns, kept) = tuple_bindings(&variant.fields)?;
                let payload = if kept.len() == 1 {
                    let only = into_value(&kept[0]);
                    quote! {
                        __record.insert(
                            ::std::string::String::from("value"),
                            #only,
                        );
                    }
                } else {
                    let items = kept.iter().map(into_value);
                    quote! {
                        __record.insert(
                            ::std::string::String::from("values"),
                            ::sieve::Value::List(::std::vec![#(#items),*]),
                        );
                    }
                };
                quote! {
                    #name::#variant_ident(#(#patterns),*) => {
                        let mut __record = ::sieve::Record::new();
                        __record.insert(
                            ::std::string::String::from("type"),
                            ::sieve::Value::Str(::std::string::String::from(#tag)),
                        );
                        #payload
                        ::sieve::Value::Record(__record)
                    }
                }
            }
        };
        arms.push(arm);
    }

    if arms.is_empty() {
        return Ok(quote! { match value {} });
    }
    Ok(quote! {
        match value {
            #(#arms)*
        }
    })
}
