// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, LitStr};

/// Member options parsed from `#[patch(...)]`.
#[derive(Default)]
struct MemberAttrs {
    nested: bool,
    skip: bool,
    rename: Option<String>,
}

struct MemberInfo {
    ident: syn::Ident,
    name: String,
    ty: syn::Type,
    nested: bool,
}

/// `#[derive(UpdateInfo)]` macro: generates `Typed` + `UpdateInfo` impls
///
/// Every member must be an `OptionalValue<T>` unless marked otherwise:
/// - `#[patch(nested)]`: the member is itself an update-info structure
///   (also `Box<T>` or `Option<T>` of one)
/// - `#[patch(rename = "name")]`: path segment used instead of the field name
/// - `#[patch(skip)]`: the member is ignored
///
/// A member that is not an `OptionalValue` still compiles when its type is
/// `Typed + Clone` (a bare `i32`, say), and `PatchBuilder` reports it as a
/// schema error at registration. Any other member type, including an
/// update-info struct missing `#[patch(nested)]`, is rejected at compile time
/// because it cannot be handed over as `&dyn Reflect`.
///
/// Example:
/// ```ignore
/// use optpatch::{OptionalValue, UpdateInfo};
///
/// #[derive(UpdateInfo)]
/// struct UserUpdate {
///     name: OptionalValue<String>,
///     #[patch(rename = "years")]
///     age: OptionalValue<i32>,
///     #[patch(nested)]
///     address: AddressUpdate,
/// }
/// ```
#[proc_macro_derive(UpdateInfo, attributes(patch))]
pub fn derive_update_info(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "UpdateInfo requires a struct with named fields",
                )
                .to_compile_error()
                .into()
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "UpdateInfo can only be derived for structs")
                .to_compile_error()
                .into()
        }
    };

    let mut members = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            return syn::Error::new_spanned(field, "Field must have a name")
                .to_compile_error()
                .into();
        };

        let attrs = match parse_member_attrs(&field.attrs) {
            Ok(attrs) => attrs,
            Err(err) => return err.to_compile_error().into(),
        };
        if attrs.skip {
            continue;
        }

        members.push(MemberInfo {
            ident: ident.clone(),
            name: attrs.rename.unwrap_or_else(|| ident.unraw().to_string()),
            ty: field.ty.clone(),
            nested: attrs.nested,
        });
    }

    let schema_entries = members.iter().map(member_schema);
    let visits = members.iter().map(member_visit);

    // Type parameters must satisfy the UpdateInfo supertraits.
    let mut generics = input.generics.clone();
    let params: Vec<_> = generics.type_params().map(|p| p.ident.clone()).collect();
    {
        let where_clause = generics.make_where_clause();
        for param in params {
            where_clause.predicates.push(parse_quote! {
                #param: ::core::marker::Send + ::core::marker::Sync + 'static
            });
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::optpatch::Typed for #name #ty_generics #where_clause {
            fn type_handle() -> ::optpatch::TypeHandle {
                ::optpatch::TypeHandle::opaque::<Self>()
            }
        }

        impl #impl_generics ::optpatch::UpdateInfo for #name #ty_generics #where_clause {
            fn schema() -> ::optpatch::UpdateSchema {
                ::optpatch::UpdateSchema::new(
                    <Self as ::optpatch::Typed>::type_handle(),
                    ::std::vec![#(#schema_entries),*],
                )
            }

            #[allow(unused_variables)]
            fn visit_members(
                &self,
                visitor: &mut dyn ::optpatch::MemberVisitor,
            ) -> ::optpatch::Result<()> {
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }
    };

    TokenStream::from(expanded)
}

fn member_schema(m: &MemberInfo) -> TokenStream2 {
    let name = &m.name;
    let ty = &m.ty;
    if m.nested {
        quote! {
            ::optpatch::MemberSchema::nested(#name, <#ty as ::optpatch::UpdateInfo>::schema)
        }
    } else {
        quote! {
            ::optpatch::MemberSchema::value(#name, <#ty as ::optpatch::Typed>::type_handle())
        }
    }
}

fn member_visit(m: &MemberInfo) -> TokenStream2 {
    let name = &m.name;
    let ident = &m.ident;
    if m.nested {
        quote! { visitor.visit_nested(#name, &self.#ident)?; }
    } else {
        quote! { visitor.visit_value(#name, &self.#ident)?; }
    }
}

fn parse_member_attrs(attrs: &[syn::Attribute]) -> syn::Result<MemberAttrs> {
    let mut parsed = MemberAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("patch")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("nested") {
                parsed.nested = true;
                Ok(())
            } else if meta.path.is_ident("skip") {
                parsed.skip = true;
                Ok(())
            } else if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(meta.error("rename must not be empty"));
                }
                parsed.rename = Some(lit.value());
                Ok(())
            } else {
                Err(meta.error("expected `nested`, `skip` or `rename = \"...\"`"))
            }
        })?;
    }
    Ok(parsed)
}
