// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Attribute type inference from Rust field types.
//!
//! Only the last path segment is inspected, so `chrono::DateTime<Utc>` and
//! `DateTime<Utc>` infer the same type. `Option<T>` unwraps to `T`; whether
//! the field is required is decided separately by [`is_option`].

use syn::{GenericArgument, PathArguments, Type};

/// Attribute type of a field, as emitted by codegen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    /// Unit variant of `AttributeType`, by variant name.
    Scalar(&'static str),
    /// `AttributeType::Array` of the inner type.
    Array(Box<TypeDef>),
    /// Type name from `ty = "..."`, parsed when the resource is declared.
    Named(String)
}

/// Infer the attribute type of `ty`.
///
/// Returns `None` when the type has no known mapping.
pub fn infer(ty: &Type) -> Option<TypeDef> {
    infer_required(single_argument(ty, "Option").unwrap_or(ty))
}

/// Check if `ty` is `Option<_>`.
pub fn is_option(ty: &Type) -> bool {
    single_argument(ty, "Option").is_some()
}

fn infer_required(ty: &Type) -> Option<TypeDef> {
    match ty {
        Type::Reference(reference) => infer_required(&reference.elem),
        Type::Group(group) => infer_required(&group.elem),
        Type::Paren(paren) => infer_required(&paren.elem),
        Type::Path(_) => {
            if let Some(inner) = single_argument(ty, "Vec") {
                return infer_required(inner).map(|inner| TypeDef::Array(Box::new(inner)));
            }
            last_ident(ty).and_then(|ident| scalar(&ident)).map(TypeDef::Scalar)
        }
        _ => None
    }
}

fn scalar(ident: &str) -> Option<&'static str> {
    let variant = match ident {
        "String" | "str" => "String",
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => "Int",
        "f32" | "f64" => "Float",
        "bool" => "Boolean",
        "Uuid" => "Guid",
        "DateTime" | "NaiveDateTime" | "OffsetDateTime" => "DateTime",
        "NaiveDate" | "Date" => "Date",
        "NaiveTime" | "Time" => "Time",
        "Value" => "Json",
        "IpAddr" | "Ipv4Addr" | "Ipv6Addr" => "IpAddress",
        "Url" => "Url",
        _ => return None
    };
    Some(variant)
}

fn last_ident(ty: &Type) -> Option<String> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
    {
        return Some(segment.ident.to_string());
    }
    None
}

fn single_argument<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == wrapper
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner);
    }
    None
}
