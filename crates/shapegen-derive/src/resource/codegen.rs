// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `DeclareResource` implementation generation.
//!
//! For a struct `Person` the generated code reads:
//!
//! ```rust,ignore
//! impl ::shapegen::DeclareResource for Person {
//!     const RESOURCE_NAME: &'static str = "person";
//!
//!     fn declare(service: &mut ::shapegen::ServiceBuilder)
//!         -> ::shapegen::Result<::shapegen::ResourceId>
//!     {
//!         let resource = service.add_resource(::shapegen::ResourceOptions::new("person"))?;
//!         service.add_attribute(resource, /* one per field */)?;
//!         service.add_relationship_named(resource, "pet", /* ... */)?;
//!         service.add_access_pattern(resource, /* ... */)?;
//!         service.add_operation(resource, /* ... */)?;
//!         Ok(resource)
//!     }
//! }
//! ```
//!
//! Paths are absolute through `::shapegen`, so the derive needs the facade
//! crate as a dependency.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use super::parse::{
    AccessPatternConfig, Cardinality, FieldDef, FieldKind, OperationsConfig, ResourceDef, TypeDef
};

/// Generate the `DeclareResource` impl.
pub fn generate(resource: &ResourceDef) -> TokenStream {
    let ident = &resource.ident;
    let name = &resource.name;
    let (impl_generics, ty_generics, where_clause) = resource.generics.split_for_impl();

    let options = resource_options(resource);
    let fields = resource.fields.iter().map(field_declaration);
    let patterns = resource.access_patterns.iter().map(access_pattern);
    let operations = operations(&resource.operations);

    quote! {
        impl #impl_generics ::shapegen::DeclareResource for #ident #ty_generics #where_clause {
            const RESOURCE_NAME: &'static str = #name;

            fn declare(
                service: &mut ::shapegen::ServiceBuilder
            ) -> ::shapegen::Result<::shapegen::ResourceId> {
                let resource = service.add_resource(#options)?;
                #(#fields)*
                #(#patterns)*
                #(#operations)*
                ::core::result::Result::Ok(resource)
            }
        }
    }
}

fn resource_options(resource: &ResourceDef) -> TokenStream {
    let name = &resource.name;
    let mut options = quote!(::shapegen::ResourceOptions::new(#name));
    if let Some(short_name) = &resource.short_name {
        options = quote!(#options.short_name(#short_name));
    }
    if let Some(plural) = &resource.plural {
        options = quote!(#options.plural_name(#plural));
    }
    if let Some(versioned) = resource.versioned {
        options = quote!(#options.versioned(#versioned));
    }
    if let Some(comment) = &resource.comment {
        options = quote!(#options.comment(#comment));
    }
    options
}

fn field_declaration(field: &FieldDef) -> TokenStream {
    let name = &field.name;
    match &field.kind {
        FieldKind::Attribute(ty) => {
            let ty = attribute_type(ty);
            let mut options = quote!(::shapegen::AttributeOptions::new(#name, #ty));
            if let Some(short_name) = &field.short_name {
                options = quote!(#options.short_name(#short_name));
            }
            for line in &field.comments {
                options = quote!(#options.comment(#line));
            }
            for (flag, method) in [
                (field.required, "required"),
                (field.key, "key"),
                (field.remote_key, "remote_key"),
                (field.remote_field, "remote_field")
            ] {
                if flag {
                    let method = format_ident!("{}", method);
                    options = quote!(#options.#method(true));
                }
            }
            quote! {
                service.add_attribute(resource, #options)?;
            }
        }
        FieldKind::Relationship {
            cardinality,
            target
        } => {
            let cardinality = match cardinality {
                Cardinality::One => quote!(::shapegen::Cardinality::One),
                Cardinality::Many => quote!(::shapegen::Cardinality::Many)
            };
            let mut options = quote!(::shapegen::RelationshipOptions::default().name(#name));
            if let Some(short_name) = &field.short_name {
                options = quote!(#options.short_name(#short_name));
            }
            if !field.comments.is_empty() {
                let comment = field.comments.join("\n");
                options = quote!(#options.comment(#comment));
            }
            quote! {
                service.add_relationship_named(resource, #target, #cardinality, #options)?;
            }
        }
    }
}

fn attribute_type(ty: &TypeDef) -> TokenStream {
    match ty {
        TypeDef::Scalar(variant) => {
            let variant = format_ident!("{}", variant);
            quote!(::shapegen::AttributeType::#variant)
        }
        TypeDef::Array(inner) => {
            let inner = attribute_type(inner);
            quote!(::shapegen::AttributeType::array_of(#inner))
        }
        TypeDef::Named(name) => quote!(#name.parse::<::shapegen::AttributeType>()?)
    }
}

fn access_pattern(pattern: &AccessPatternConfig) -> TokenStream {
    let name = &pattern.name;
    let mut tokens = quote!(::shapegen::AccessPattern::new(#name)?);
    if let Some(index) = &pattern.index {
        tokens = quote!(#tokens.on_index(#index));
    }
    let pk = pattern.pk();
    tokens = quote!(#tokens.partition_key([#(#pk),*])?);
    let sk = pattern.sk();
    if !sk.is_empty() {
        tokens = quote!(#tokens.sort_key([#(#sk),*])?);
    }
    quote! {
        service.add_access_pattern(resource, #tokens)?;
    }
}

fn operations(config: &OperationsConfig) -> Vec<TokenStream> {
    config
        .enabled()
        .into_iter()
        .map(|variant| {
            let variant = format_ident!("{}", variant);
            quote! {
                service.add_operation(
                    resource,
                    ::shapegen::OperationSubType::#variant.operation_type(),
                    ::shapegen::OperationSubType::#variant
                )?;
            }
        })
        .collect()
}
