//! Derive macro for `postgen_define::Shaped`.
//!
//! Generates the field table a request struct would otherwise have to write
//! by hand, reading routing metadata from `#[postgen(...)]` attributes.
//!
//! ## Examples
//!
//! ```ignore
//! use postgen_define::Shaped;
//!
//! #[derive(Shaped)]
//! pub struct CreateUserRequest {
//!     #[postgen(json = "username", example = "johndoe")]
//!     pub username: String,
//!     #[postgen(json = "is_admin", example = "false")]
//!     pub is_admin: bool,
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Fields, GenericParam, Ident, Result, Visibility, parse_quote, parse2,
};

mod parse;

use crate::parse::FieldConfig;

/// Derive `Shaped` for a struct with named fields.
///
/// ## Field Attributes
///
/// - `json`, `form`, `form_file`, `query`, `param` - route the field; takes an
///   optional key (`query = "tenant_id"`), defaulting to the field name
/// - `description = "..."` - display text; falls back to the doc comment
/// - `example = "..."` - literal placeholder value
/// - `flatten` - expand the field's record inline (embedded record)
/// - `skip` - hide the field from the generator
///
/// Fields that are not `pub` are treated as not exported and are skipped.
#[proc_macro_derive(Shaped, attributes(postgen))]
pub fn derive_shaped(input: TokenStream) -> TokenStream {
    match derive_shaped_inner(input.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn derive_shaped_inner(input: TokenStream2) -> Result<TokenStream2> {
    let mut input: DeriveInput = parse2(input)?;
    let ident = input.ident.clone();
    let display_name = ident.to_string();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
            Fields::Unit => Vec::new(),
            Fields::Unnamed(_) => {
                return Err(Error::new_spanned(
                    &ident,
                    "Shaped can only be derived for structs with named fields",
                ));
            }
        },
        Data::Enum(_) | Data::Union(_) => {
            return Err(Error::new_spanned(
                &ident,
                "Shaped can only be derived for structs",
            ));
        }
    };

    let cx = Ident::new("cx", Span::call_site());
    let mut field_exprs = Vec::with_capacity(fields.len());

    for field in fields {
        let config = FieldConfig::from_field(field)?;
        let ty = &field.ty;
        let name = &config.name;

        let mut expr = quote! {
            ::postgen_define::FieldDescriptor::new(
                #name,
                <#ty as ::postgen_define::Shaped>::describe(#cx),
            )
        };

        for (variant, value) in &config.tags {
            let variant = Ident::new(variant, Span::call_site());
            expr = quote! { #expr.tag(::postgen_define::Role::#variant, #value) };
        }

        let description = config.effective_description();
        if !description.is_empty() {
            expr = quote! { #expr.with_description(#description) };
        }
        if let Some(example) = &config.example {
            expr = quote! { #expr.with_example(#example) };
        }
        if config.skip || !matches!(field.vis, Visibility::Public(_)) {
            expr = quote! { #expr.private() };
        }
        if config.flatten {
            expr = quote! { #expr.embedded() };
        }

        field_exprs.push(expr);
    }

    // Every type parameter must itself be describable.
    let type_params: Vec<Ident> = input
        .generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(ty) => Some(ty.ident.clone()),
            _ => None,
        })
        .collect();
    let where_clause = input.generics.make_where_clause();
    for param in &type_params {
        where_clause
            .predicates
            .push(parse_quote!(#param: ::postgen_define::Shaped));
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::postgen_define::Shaped for #ident #ty_generics #where_clause {
            fn describe(
                #cx: &mut ::postgen_define::ShapeContext,
            ) -> ::postgen_define::TypeShape {
                #cx.record(::std::any::type_name::<Self>(), #display_name, |#cx| {
                    ::std::vec![#(#field_exprs),*]
                })
            }
        }
    })
}
