use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, Ident, Type, Variant};

const INTERNAL: &str = "Internal";

/// What the expansion needs to know about a single variant.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
    cfgs: Vec<&'a Attribute>,
}

pub fn expand(input: DeriveInput) -> TokenStream {
    match try_expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn try_expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(&input.ident, "chairside_error only supports enums"));
    };

    let variants = data.variants.iter().map(inspect_variant).collect::<syn::Result<Vec<_>>>()?;

    let name = &input.ident;
    let ext = format_ident!("{}Ext", name);

    let derives = missing_derives(input);
    let context_trait = context_trait(name, &ext, &variants);
    let sources = variants.iter().filter_map(|v| source_conversion(name, &ext, v));
    let messages = message_conversions(name, &variants);

    Ok(quote! {
        #derives
        #input

        #context_trait
        #(#sources)*
        #messages

        #[allow(dead_code)]
        fn format_context(
            context: &Option<std::borrow::Cow<'static, str>>,
        ) -> std::borrow::Cow<'static, str> {
            match context {
                Some(c) => std::borrow::Cow::Owned(format!(" ({c})")),
                None => std::borrow::Cow::Borrowed(""),
            }
        }
    })
}

fn inspect_variant(variant: &Variant) -> syn::Result<ErrorVariant<'_>> {
    let Fields::Named(fields) = &variant.fields else {
        return Err(syn::Error::new_spanned(
            variant,
            "chairside_error variants need named fields (`message`/`source` plus `context`)",
        ));
    };

    let context = fields.named.iter().find(|f| is_named(f, "context"));
    if let Some(field) = context
        && !is_context_type(&field.ty)
    {
        return Err(syn::Error::new_spanned(
            &field.ty,
            "`context` must be Option<Cow<'static, str>>",
        ));
    }

    let source = fields
        .named
        .iter()
        .find(|f| is_named(f, "source") || has_attr(f, "source") || has_attr(f, "from"))
        .and_then(|f| f.ident.as_ref().map(|ident| (ident, &f.ty)));

    if source.is_some() && context.is_none() {
        return Err(syn::Error::new_spanned(
            &variant.ident,
            "variants wrapping a source need `context: Option<Cow<'static, str>>`",
        ));
    }

    Ok(ErrorVariant {
        ident: &variant.ident,
        source,
        has_context: context.is_some(),
        cfgs: variant.attrs.iter().filter(|a| a.path().is_ident("cfg")).collect(),
    })
}

fn missing_derives(input: &DeriveInput) -> TokenStream {
    let present = derived_traits(&input.attrs);
    let mut missing = Vec::new();
    if !present.contains("Debug") {
        missing.push(quote! { Debug });
    }
    if !present.contains("Error") {
        missing.push(quote! { ::thiserror::Error });
    }
    if missing.is_empty() { TokenStream::new() } else { quote! { #[derive(#(#missing),*)] } }
}

fn context_trait(name: &Ident, ext: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|v| v.has_context).map(|v| {
        let ErrorVariant { ident, cfgs, .. } = v;
        quote! { #(#cfgs)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        pub trait #ext<T> {
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for Result<T, #name> {
            #[inline]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut err| {
                    #[allow(unreachable_patterns)]
                    match &mut err {
                        #(#arms)*
                        _ => {}
                    }
                    err
                })
            }
        }
    }
}

fn source_conversion(name: &Ident, ext: &Ident, v: &ErrorVariant<'_>) -> Option<TokenStream> {
    if v.ident == INTERNAL {
        return None;
    }
    let (field, ty) = v.source?;
    let ErrorVariant { ident, cfgs, .. } = v;

    Some(quote! {
        #(#cfgs)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self {
                Self::#ident { #field, context: None }
            }
        }

        #(#cfgs)*
        #[automatically_derived]
        impl<T> #ext<T> for std::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> std::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    })
}

fn message_conversions(name: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let Some(internal) = variants.iter().find(|v| v.ident == INTERNAL) else {
        return TokenStream::new();
    };
    let cfgs = &internal.cfgs;

    quote! {
        #(#cfgs)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(message), context: None }
            }
        }

        #(#cfgs)*
        impl From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

fn derived_traits(attrs: &[Attribute]) -> FxHashSet<String> {
    let mut traits = FxHashSet::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                traits.insert(last.ident.to_string());
            }
            Ok(())
        });
    }
    traits
}

fn is_named(field: &Field, name: &str) -> bool {
    field.ident.as_ref().is_some_and(|ident| ident == name)
}

fn has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|a| a.path().is_ident(name))
}

/// Accepts `Option<Cow<'static, str>>` with or without path qualifiers.
fn is_context_type(ty: &Type) -> bool {
    let compact: String =
        ty.to_token_stream().to_string().chars().filter(|c| !c.is_whitespace()).collect();
    let Some(head) = compact.strip_suffix("Cow<'static,str>>") else {
        return false;
    };
    let head = head
        .strip_suffix("std::borrow::")
        .or_else(|| head.strip_suffix("borrow::"))
        .unwrap_or(head);
    head == "Option<" || head.ends_with("::Option<")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_type_detection() {
        let accepted: [Type; 3] = [
            syn::parse_quote!(Option<Cow<'static, str>>),
            syn::parse_quote!(Option<std::borrow::Cow<'static, str>>),
            syn::parse_quote!(std::option::Option<Cow<'static, str>>),
        ];
        for ty in &accepted {
            assert!(is_context_type(ty), "should accept {}", ty.to_token_stream());
        }

        let rejected: [Type; 3] = [
            syn::parse_quote!(Option<String>),
            syn::parse_quote!(Cow<'static, str>),
            syn::parse_quote!(Vec<Cow<'static, str>>),
        ];
        for ty in &rejected {
            assert!(!is_context_type(ty), "should reject {}", ty.to_token_stream());
        }
    }

    #[test]
    fn test_rejects_tuple_variants() {
        let input: DeriveInput = syn::parse_quote! {
            pub enum Demo {
                #[error("io: {0}")]
                Io(std::io::Error),
            }
        };
        assert!(try_expand(&input).is_err());
    }

    #[test]
    fn test_rejects_source_without_context() {
        let input: DeriveInput = syn::parse_quote! {
            pub enum Demo {
                #[error("io: {source}")]
                Io { source: std::io::Error },
            }
        };
        assert!(try_expand(&input).is_err());
    }

    #[test]
    fn test_respects_existing_derives() {
        let input: DeriveInput = syn::parse_quote! {
            #[derive(Debug)]
            pub enum Demo {
                #[error("internal: {message}")]
                Internal { message: String, context: Option<Cow<'static, str>> },
            }
        };
        let rendered: String = try_expand(&input)
            .map(|t| t.to_string())
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        assert!(rendered.contains("thiserror::Error"));
        assert_eq!(rendered.matches("Debug").count(), 1);
        assert!(rendered.contains("implFrom<String>forDemo"));
    }
}
