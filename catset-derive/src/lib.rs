//! Derive macros for the catset settings library
//!
//! This crate provides `#[derive(Settings)]` for generating the settings
//! declarations of a struct from field attributes.
//!
//! # Usage
//!
//! ```text
//! use catset::DeriveSettings;
//!
//! #[derive(DeriveSettings, Default)]
//! #[schema(category = "General")]
//! struct GeneralSettings {
//!     #[setting(name = "Port", min = 1023, max = 65536)]
//!     port: i32,
//!
//!     #[setting(category = "Paths", path)]
//!     log_file: String,
//!
//!     // Not a setting
//!     cache: Vec<u8>,
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Expr, Fields, Lit, LitStr, Meta, parse_macro_input,
    punctuated::Punctuated,
};

/// Derive macro for generating `Settings` implementations.
///
/// Only fields carrying a `#[setting(...)]` attribute become settings. The
/// field type must be `Clone` and needs a converter registered on the manager
/// before attaching.
///
/// # Attributes
///
/// ## Container attributes (`#[schema(...)]`)
/// - `category = "name"` - Default category for all fields
///
/// ## Field attributes (`#[setting(...)]`)
/// - `name = "Name"` - Setting name (defaults to the field name)
/// - `category = "..."` - Category override (required without a container category)
/// - `min = 0, max = 100` - Exclusive numeric range (`RangeRule`)
/// - `path` - Absolute filesystem path (`PathRule`)
/// - `pattern = "regex"` - Full regex match (`PatternRule`)
/// - `rule = expr` - Any expression implementing `Rule`
/// - `read_only` / `write_only` - Generate only one accessor
///
/// At most one of `min`/`max`, `path`, `pattern` and `rule` may be given.
#[proc_macro_derive(Settings, attributes(schema, setting))]
pub fn derive_settings(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let container_attrs = parse_container_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Settings can only be derived for structs with named fields.\n\nExample:\n  #[derive(Settings)]\n  struct MySettings {\n      #[setting(category = \"General\")]\n      field: i32,\n  }",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Settings can only be derived for structs.\n\nTry: #[derive(Settings)] on a struct, not an enum or union.",
            ));
        }
    };

    let mut defs = Vec::new();

    for field in fields {
        let Some(attrs) = parse_field_attrs(&field.attrs)? else {
            continue;
        };
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let field_type = &field.ty;

        let setting_name = attrs.name.unwrap_or_else(|| field_name.to_string());
        let Some(category) = attrs.category.or_else(|| container_attrs.category.clone()) else {
            return Err(syn::Error::new_spanned(
                field_name,
                "setting has no category.\n\nAdd #[setting(category = \"...\")] or #[schema(category = \"...\")] on the struct.",
            ));
        };

        let mut modifiers = Vec::new();

        if !attrs.write_only {
            modifiers.push(quote! { .get(|object: &Self| object.#field_name.clone()) });
        }
        if !attrs.read_only {
            modifiers.push(quote! {
                .set(|object: &mut Self, value: #field_type| object.#field_name = value)
            });
        }

        match attrs.rule {
            Some(RuleAttr::Range { min, max }) => modifiers.push(quote! {
                .rule(::catset::RangeRule::<#field_type>::new(
                    (#min) as #field_type,
                    (#max) as #field_type,
                ))
            }),
            Some(RuleAttr::Path) => modifiers.push(quote! { .rule(::catset::PathRule) }),
            Some(RuleAttr::Pattern(pattern)) => modifiers.push(quote! {
                .rule(
                    ::catset::PatternRule::new(#pattern)
                        .expect("#[setting(pattern)] is checked during expansion"),
                )
            }),
            Some(RuleAttr::Expr(rule)) => modifiers.push(quote! { .rule(#rule) }),
            None => {}
        }

        defs.push(quote! {
            ::catset::SettingDef::from(
                ::catset::setting::<Self, #field_type>(#setting_name, #category)
                    #(#modifiers)*
            )
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::catset::Settings for #name #ty_generics #where_clause {
            fn settings() -> ::std::vec::Vec<::catset::SettingDef<Self>> {
                ::std::vec![#(#defs),*]
            }
        }
    })
}

/// Container-level attributes from #[schema(...)]
#[derive(Default)]
struct ContainerAttrs {
    category: Option<String>,
}

/// Validator selected by a field attribute
enum RuleAttr {
    Range { min: Expr, max: Expr },
    Path,
    Pattern(LitStr),
    Expr(Expr),
}

/// Field-level attributes from #[setting(...)]
#[derive(Default)]
struct FieldAttrs {
    name: Option<String>,
    category: Option<String>,
    min: Option<Expr>,
    max: Option<Expr>,
    rule: Option<RuleAttr>,
    read_only: bool,
    write_only: bool,
}

fn nested_metas(attr: &Attribute) -> syn::Result<Punctuated<Meta, syn::Token![,]>> {
    attr.parse_args_with(Punctuated::<Meta, syn::Token![,]>::parse_terminated)
}

fn string_value(expr: &Expr, attr: &str) -> syn::Result<String> {
    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Str(s) => Ok(s.value()),
            _ => Err(syn::Error::new_spanned(
                expr,
                format!("#[setting({attr})] must be a string literal.\n\nExample: #[setting({attr} = \"...\")]"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            expr,
            format!("#[setting({attr})] must be a string literal.\n\nExample: #[setting({attr} = \"...\")]"),
        )),
    }
}

fn parse_container_attrs(attrs: &[Attribute]) -> syn::Result<ContainerAttrs> {
    let mut result = ContainerAttrs::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("schema")) {
        for meta in nested_metas(attr)? {
            match meta {
                Meta::NameValue(nv) if nv.path.is_ident("category") => {
                    result.category = Some(string_value(&nv.value, "category")?);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "unknown #[schema] attribute, expected `category = \"...\"`",
                    ));
                }
            }
        }
    }

    Ok(result)
}

/// Returns `None` for fields without a `#[setting]` attribute.
fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<Option<FieldAttrs>> {
    let mut result = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("setting")) {
        let field = result.get_or_insert_with(FieldAttrs::default);

        // A bare #[setting] takes every default
        if matches!(attr.meta, Meta::Path(_)) {
            continue;
        }

        for meta in nested_metas(attr)? {
            match meta {
                Meta::Path(path) => {
                    if path.is_ident("path") {
                        set_rule(field, RuleAttr::Path, &path)?;
                    } else if path.is_ident("read_only") {
                        field.read_only = true;
                    } else if path.is_ident("write_only") {
                        field.write_only = true;
                    } else {
                        return Err(syn::Error::new_spanned(path, "unknown #[setting] flag"));
                    }
                }
                Meta::NameValue(nv) => {
                    let value = nv.value;
                    if nv.path.is_ident("name") {
                        field.name = Some(string_value(&value, "name")?);
                    } else if nv.path.is_ident("category") {
                        field.category = Some(string_value(&value, "category")?);
                    } else if nv.path.is_ident("min") {
                        field.min = Some(value);
                    } else if nv.path.is_ident("max") {
                        field.max = Some(value);
                    } else if nv.path.is_ident("pattern") {
                        let Expr::Lit(syn::ExprLit { lit: Lit::Str(pattern), .. }) = &value else {
                            return Err(syn::Error::new_spanned(
                                &value,
                                "#[setting(pattern)] must be a string literal.\n\nExample: #[setting(pattern = \"^[a-z]+$\")]",
                            ));
                        };
                        check_pattern(pattern)?;
                        set_rule(field, RuleAttr::Pattern(pattern.clone()), &nv.path)?;
                    } else if nv.path.is_ident("rule") {
                        set_rule(field, RuleAttr::Expr(value), &nv.path)?;
                    } else {
                        return Err(syn::Error::new_spanned(
                            nv.path,
                            "unknown #[setting] attribute",
                        ));
                    }
                }
                Meta::List(list) => {
                    return Err(syn::Error::new_spanned(list, "unknown #[setting] attribute"));
                }
            }
        }
    }

    let Some(mut field) = result else {
        return Ok(None);
    };

    if field.read_only && field.write_only {
        return Err(syn::Error::new_spanned(
            &attrs[0],
            "a setting cannot be both read_only and write_only",
        ));
    }

    match (field.min.take(), field.max.take()) {
        (Some(min), Some(max)) => {
            if field.rule.is_some() {
                return Err(syn::Error::new_spanned(
                    &min,
                    "min/max cannot be combined with another rule",
                ));
            }
            field.rule = Some(RuleAttr::Range { min, max });
        }
        (None, None) => {}
        (Some(bound), None) | (None, Some(bound)) => {
            return Err(syn::Error::new_spanned(
                bound,
                "#[setting(min)] and #[setting(max)] must be given together.\n\nExample: #[setting(min = 0, max = 100)]",
            ));
        }
    }

    Ok(Some(field))
}

fn set_rule(field: &mut FieldAttrs, rule: RuleAttr, span: &syn::Path) -> syn::Result<()> {
    if field.rule.is_some() {
        return Err(syn::Error::new_spanned(
            span,
            "only one of path, pattern and rule may be given per setting",
        ));
    }
    field.rule = Some(rule);
    Ok(())
}

/// Reject a pattern that `PatternRule::new` would fail to compile.
fn check_pattern(pattern: &LitStr) -> syn::Result<()> {
    regex::Regex::new(&format!("^(?:{})$", pattern.value()))
        .map(|_| ())
        .map_err(|e| {
            syn::Error::new_spanned(
                pattern,
                format!("#[setting(pattern)] is not a valid regular expression: {e}"),
            )
        })
}
