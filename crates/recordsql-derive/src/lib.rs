//! Derive macro describing record types as database tables.
//!
//! This crate provides `#[derive(Record)]`, which implements
//! `recordsql_core::record::Record` so the declared table of a struct can
//! be extracted without runtime reflection.

use std::collections::BTreeSet;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{
    parse_macro_input, Attribute, Data, DeriveInput, Expr, Fields, GenericArgument, Lit, Meta,
    PathArguments, Type,
};

/// Derives `Record` for a struct with named fields.
///
/// # Attributes
///
/// - `#[table]` - Marks the struct as persisted. Without it the derived
///   definition reports "not a table".
/// - `#[table(name = "table_name")]` - Marks the struct and overrides the
///   table name (defaults to the struct name as written)
///
/// # Field Attributes
///
/// - `#[key]` - Marks the field as part of the primary key
/// - `#[column(name = "column_name")]` - Overrides the column name
///   (defaults to the field name, without any `r#` prefix)
/// - `#[column(type_name = "blob")]` - Overrides the host type name fed to
///   the type mapper
///
/// The host type name is the last path segment of the field type, with
/// `Option<T>` unwrapped: `chrono::DateTime<Utc>` becomes `DateTime`.
#[proc_macro_derive(Record, attributes(table, key, column))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_record_impl(&input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_record_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let table_attrs = parse_table_attrs(&input.attrs)?;
    let table_name = table_attrs
        .name
        .unwrap_or_else(|| struct_name.to_string());
    let is_table = table_attrs.marked;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Record derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Record derive only supports structs",
            ));
        }
    };

    let mut seen = BTreeSet::new();
    let mut field_entries: Vec<TokenStream2> = Vec::new();
    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attrs = parse_field_attrs(&field.attrs)?;
        let column_name = attrs
            .name
            .unwrap_or_else(|| field_name.unraw().to_string());
        if !seen.insert(column_name.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("duplicate column name `{column_name}`"),
            ));
        }
        let type_name = attrs
            .type_name
            .unwrap_or_else(|| host_type_name(&field.ty));
        let is_key = attrs.key;

        field_entries.push(quote! {
            ::recordsql_core::record::FieldDefinition {
                name: ::std::string::String::from(#column_name),
                type_name: ::std::string::String::from(#type_name),
                key: #is_key,
            }
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::recordsql_core::record::Record
            for #struct_name #ty_generics #where_clause
        {
            fn type_definition() -> ::recordsql_core::record::TypeDefinition {
                ::recordsql_core::record::TypeDefinition {
                    name: ::std::string::String::from(#table_name),
                    table: #is_table,
                    fields: ::std::vec![#(#field_entries),*],
                }
            }
        }
    })
}

struct TableAttrs {
    marked: bool,
    name: Option<String>,
}

#[derive(Default)]
struct FieldAttrs {
    key: bool,
    name: Option<String>,
    type_name: Option<String>,
}

fn parse_string_value(meta: &ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: Expr = meta.value()?.parse()?;
    if let Expr::Lit(lit) = &value {
        if let Lit::Str(s) = &lit.lit {
            return Ok(s.value());
        }
    }
    Err(syn::Error::new_spanned(value, "expected a string literal"))
}

fn parse_table_attrs(attrs: &[Attribute]) -> syn::Result<TableAttrs> {
    let mut result = TableAttrs {
        marked: false,
        name: None,
    };
    for attr in attrs {
        if !attr.path().is_ident("table") {
            continue;
        }
        result.marked = true;
        // Bare #[table]
        if matches!(attr.meta, Meta::Path(_)) {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                result.name = Some(parse_string_value(&meta)?);
                Ok(())
            } else {
                Err(meta.error("unsupported table attribute, expected `name`"))
            }
        })?;
    }
    Ok(result)
}

fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut result = FieldAttrs::default();
    for attr in attrs {
        if attr.path().is_ident("key") {
            attr.meta.require_path_only()?;
            result.key = true;
        } else if attr.path().is_ident("column") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    result.name = Some(parse_string_value(&meta)?);
                } else if meta.path.is_ident("type_name") {
                    result.type_name = Some(parse_string_value(&meta)?);
                } else {
                    return Err(meta.error(
                        "unsupported column attribute, expected `name` or `type_name`",
                    ));
                }
                Ok(())
            })?;
        }
    }
    Ok(result)
}

/// Reduces a field type to the name the type mapper understands.
fn host_type_name(ty: &Type) -> String {
    match ty {
        Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return compact(ty);
            };
            if segment.ident == "Option" {
                if let PathArguments::AngleBracketed(args) = &segment.arguments {
                    if let Some(GenericArgument::Type(inner)) = args.args.first() {
                        return host_type_name(inner);
                    }
                }
            }
            segment.ident.to_string()
        }
        Type::Reference(reference) => host_type_name(&reference.elem),
        Type::Paren(paren) => host_type_name(&paren.elem),
        Type::Group(group) => host_type_name(&group.elem),
        _ => compact(ty),
    }
}

fn compact(ty: &Type) -> String {
    quote!(#ty).to_string().replace(' ', "")
}
