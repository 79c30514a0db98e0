//! Code generation for the `RowMapped` derive

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Error, Result};

use crate::parsing::{mapped_fields, parse_struct_attrs, MappedField};

pub fn expand_row_mapped(input: &DeriveInput) -> Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.ident.span(),
            "RowMapped cannot be derived for generic types",
        ));
    }

    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let fields = mapped_fields(input)?;
    let name = &input.ident;
    let name_str = name.to_string();

    let shape = if struct_attrs.field_style {
        expand_field_shape(input, &fields, &struct_attrs.default_factory)?
    } else {
        expand_record_shape(input, &fields)?
    };

    Ok(quote! {
        impl ::rowcast::registry::Keyed for #name {
            fn type_key() -> ::rowcast::registry::TypeKey {
                ::rowcast::registry::TypeKey::named(module_path!(), #name_str)
            }
        }

        impl ::rowcast::mapper::RowMapped for #name {
            fn shape() -> ::rowcast::mapper::MapperShape<Self> {
                #shape
            }
        }
    })
}

/// Constructor-style: ordered parameter list, all columns required
fn expand_record_shape(input: &DeriveInput, fields: &[MappedField]) -> Result<TokenStream> {
    let name_str = input.ident.to_string();

    let params: Vec<TokenStream> = fields.iter().map(param_spec).collect();

    let assemble: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let ident = &field.ident;
            let ty = &field.ty;
            let field_name = ident.to_string();
            quote! {
                #ident: ::rowcast::mapper::take_value::<#ty>(&mut values, #field_name)?,
            }
        })
        .collect();

    Ok(quote! {
        ::rowcast::mapper::MapperShape::Record(::rowcast::mapper::RecordShape {
            type_name: #name_str,
            params: ::std::vec![ #( #params )* ],
            construct: |values| {
                let mut values = values.into_iter();
                ::std::result::Result::Ok(Self {
                    #( #assemble )*
                })
            },
        })
    })
}

fn param_spec(field: &MappedField) -> TokenStream {
    let field_name = field.ident.to_string();
    let column = &field.column;
    let flatten = field.flatten;
    let nullable = field.inner.is_some();
    let decode = decode_body(field);

    quote! {
        ::rowcast::mapper::ParamSpec {
            name: #field_name,
            column: #column,
            nullable: #nullable,
            flatten: #flatten,
            decode: |registry, row, column| {
                #decode
                ::std::result::Result::Ok(
                    ::std::boxed::Box::new(value) as ::std::boxed::Box<dyn ::std::any::Any>
                )
            },
        },
    }
}

/// Field-style: default instance plus one setter per mapped field
fn expand_field_shape(
    input: &DeriveInput,
    fields: &[MappedField],
    default_factory: &Option<syn::Path>,
) -> Result<TokenStream> {
    let name = &input.ident;
    let name_str = name.to_string();

    let factory = match default_factory {
        Some(path) => quote! { ::std::option::Option::Some(#path) },
        None => quote! {
            ::std::option::Option::Some(<#name as ::std::default::Default>::default)
        },
    };

    let setters: Vec<TokenStream> = fields
        .iter()
        .map(|field| {
            let ident = &field.ident;
            let field_name = ident.to_string();
            let column = &field.column;
            let flatten = field.flatten;
            let nullable = field.inner.is_some();
            let decode = decode_body(field);
            quote! {
                ::rowcast::mapper::SetterSpec {
                    name: #field_name,
                    column: #column,
                    nullable: #nullable,
                    flatten: #flatten,
                    assign: |target: &mut Self, registry, row, column| {
                        #decode
                        target.#ident = value;
                        ::std::result::Result::Ok(())
                    },
                },
            }
        })
        .collect();

    Ok(quote! {
        ::rowcast::mapper::MapperShape::Fields(::rowcast::mapper::FieldShape {
            type_name: #name_str,
            default_factory: #factory,
            setters: ::std::vec![ #( #setters )* ],
        })
    })
}

/// Statements producing `value` of the field's declared type
fn decode_body(field: &MappedField) -> TokenStream {
    let field_name = field.ident.to_string();
    let ty = &field.ty;

    if field.flatten {
        // Parse the same row into the nested type
        return quote! {
            let value = registry.resolve_row_parser::<#ty>()?.parse(registry, row)?;
        };
    }

    match &field.inner {
        // Option<U>: SQL NULL decodes to None
        Some(inner) => quote! {
            let value = registry.resolve_decoder::<#inner>()?.decode(row, column)?;
        },
        // Non-nullable: SQL NULL is an error naming the parameter
        None => {
            let ty_str = quote!(#ty).to_string().replace(' ', "");
            quote! {
                let value = registry.resolve_decoder::<#ty>()?.decode(row, column)?;
                let value = value.ok_or_else(|| {
                    ::rowcast::errors::MapError::null_into_non_nullable(#field_name, #ty_str)
                })?;
            }
        }
    }
}
