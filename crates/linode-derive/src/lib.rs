//! Derive macros for the Linode classic API.
//!
//! - `#[derive(ToArgs)]` flattens an options structure into call arguments.
//!   Every field needs `#[args("wireName")]`, or `#[args("wireName,int")]` for
//!   a boolean sent as `1`/`0`.
//! - `#[derive(Record)]` decodes a response object with lenient coercion. The
//!   key defaults to the field name and can be set with `#[record("KEY")]`;
//!   keys match regardless of case.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Data, DeriveInput, Field, Fields, GenericArgument, LitStr, PathArguments, Type};
use syn::{parse_macro_input, spanned::Spanned};

/// Derive `linode_common::args::ToArgs`.
///
/// # Example
/// ```ignore
/// #[derive(ToArgs)]
/// struct StackScriptOpts {
///     #[args("Label")]
///     label: Option<String>,
///     #[args("isPublic,int")]
///     is_public: Option<bool>,
/// }
/// // to_args() yields {"Label": .., "isPublic": 1 | 0} for present fields
/// ```
#[proc_macro_derive(ToArgs, attributes(args))]
pub fn derive_to_args(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match to_args_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Derive `linode_common::decode::Record`.
///
/// Field types must implement `FromLenient` and `Default`; keys missing from
/// the object leave the default value.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match record_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> syn::Result<&'a Punctuated<Field, Comma>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => Ok(&named.named),
            Fields::Unit => Err(syn::Error::new_spanned(
                &input.ident,
                format!("{derive} needs a struct with named fields"),
            )),
            Fields::Unnamed(_) => Err(syn::Error::new_spanned(
                &data.fields,
                format!("{derive} needs a struct with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            &input.ident,
            format!("{derive} can only be derived for structs"),
        )),
    }
}

/// The string literal of `#[name("...")]`, if the attribute is present.
fn field_tag(field: &Field, name: &str) -> syn::Result<Option<LitStr>> {
    let mut found = None;
    for attr in field.attrs.iter().filter(|a| a.path().is_ident(name)) {
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                format!("duplicate #[{name}] attribute"),
            ));
        }
        found = Some(attr.parse_args::<LitStr>()?);
    }
    Ok(found)
}

// `bool` or `Option<bool>`
fn is_bool_like(ty: &Type) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };
    let Some(last) = path.path.segments.last() else {
        return false;
    };
    if last.ident == "bool" {
        return true;
    }
    if last.ident != "Option" {
        return false;
    }
    match &last.arguments {
        PathArguments::AngleBracketed(args) => match args.args.first() {
            Some(GenericArgument::Type(Type::Path(inner))) => inner.path.is_ident("bool"),
            _ => false,
        },
        _ => false,
    }
}

fn to_args_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = named_fields(input, "ToArgs")?;
    let mut entries = Vec::with_capacity(fields.len());
    let mut seen: Vec<String> = Vec::new();

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new(field.span(), "field has no name"))?;
        let tag = field_tag(field, "args")?.ok_or_else(|| {
            syn::Error::new_spanned(
                ident,
                format!("no args tag set on field `{ident}`, add #[args(\"wireName\")]"),
            )
        })?;
        let text = tag.value();
        let (wire, mode) = match text.split_once(',') {
            Some((wire, mode)) => (wire, Some(mode)),
            None => (text.as_str(), None),
        };
        if wire.is_empty() {
            return Err(syn::Error::new_spanned(&tag, "empty wire name"));
        }
        match mode {
            None => {}
            Some("int") if is_bool_like(&field.ty) => {}
            Some("int") => {
                return Err(syn::Error::new_spanned(
                    &field.ty,
                    format!("`{ident}` has an int tag, but is not of type bool"),
                ));
            }
            Some(other) => {
                return Err(syn::Error::new_spanned(
                    &tag,
                    format!("unknown encoding mode `{other}`, expected `int`"),
                ));
            }
        }
        if seen.iter().any(|s| s == wire) {
            return Err(syn::Error::new_spanned(
                &tag,
                format!("wire name `{wire}` is already used by another field"),
            ));
        }
        seen.push(wire.to_owned());

        let field_name = ident.to_string();
        entries.push(quote! {
            (
                ::linode_common::args::ArgField::from_tag(#field_name, #tag)?,
                ::linode_common::wire::WireValue::from(::core::clone::Clone::clone(&self.#ident)),
            )
        });
    }

    let name = &input.ident;
    let type_name = name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::linode_common::args::ToArgs for #name #ty_generics #where_clause {
            fn to_args(
                &self,
            ) -> ::core::result::Result<
                ::linode_common::args::ApiArgs,
                ::linode_common::error::ConfigError,
            > {
                let fields: ::std::vec::Vec<(
                    ::linode_common::args::ArgField,
                    ::linode_common::wire::WireValue,
                )> = ::std::vec![#(#entries),*];
                ::linode_common::args::marshal_fields(#type_name, fields)
            }
        }
    })
}

fn record_impl(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let fields = named_fields(input, "Record")?;
    let mut inits = Vec::with_capacity(fields.len());

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new(field.span(), "field has no name"))?;
        let key = match field_tag(field, "record")? {
            Some(lit) => lit.value(),
            None => ident.to_string(),
        };
        inits.push(quote! {
            #ident: fields.lenient(#key)?
        });
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::linode_common::decode::Record for #name #ty_generics #where_clause {
            fn from_fields(
                fields: &::linode_common::decode::Fields<'_>,
            ) -> ::core::result::Result<Self, ::linode_common::error::DecodeError> {
                ::core::result::Result::Ok(Self {
                    #(#inits),*
                })
            }
        }
    })
}
