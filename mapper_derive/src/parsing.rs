//! Parsing of `#[row(...)]` attributes and field shapes

use syn::{Attribute, Data, DeriveInput, Error, Fields, GenericArgument, LitStr, PathArguments, Result, Type};

/// Struct-level mapping options
#[derive(Default)]
pub struct StructAttrs {
    /// `#[row(fields)]`: use the field-style (mutable object) strategy
    pub field_style: bool,
    /// `#[row(default = "path")]`: explicit default-instance factory
    pub default_factory: Option<syn::Path>,
}

/// Field-level mapping options
#[derive(Default)]
pub struct FieldAttrs {
    pub rename: Option<String>,
    pub flatten: bool,
}

/// One mapped field, attributes applied
pub struct MappedField {
    pub ident: syn::Ident,
    pub column: String,
    pub ty: Type,
    /// For `Option<U>` fields, the inner `U`
    pub inner: Option<Type>,
    pub flatten: bool,
}

pub fn parse_struct_attrs(attrs: &[Attribute]) -> Result<StructAttrs> {
    let mut out = StructAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("row") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("fields") {
                out.field_style = true;
                Ok(())
            } else if meta.path.is_ident("default") {
                let lit: LitStr = meta.value()?.parse()?;
                out.default_factory = Some(lit.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported #[row(...)] option on struct"))
            }
        })?;
    }
    Ok(out)
}

fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("row") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let lit: LitStr = meta.value()?.parse()?;
                out.rename = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("flatten") {
                out.flatten = true;
                Ok(())
            } else {
                Err(meta.error("unsupported #[row(...)] option on field"))
            }
        })?;
    }
    Ok(out)
}

/// Collect the named fields of the input struct with attributes applied
pub fn mapped_fields(input: &DeriveInput) -> Result<Vec<MappedField>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => {
                let span = match other {
                    Fields::Unnamed(f) => f.paren_token.span.join(),
                    _ => input.ident.span(),
                };
                return Err(Error::new(
                    span,
                    "RowMapped requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new(
                input.ident.span(),
                "RowMapped can only be derived for structs",
            ))
        }
    };

    let mut out = Vec::with_capacity(fields.len());
    for field in fields {
        let attrs = parse_field_attrs(&field.attrs)?;
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| Error::new(input.ident.span(), "expected named field"))?;
        let inner = option_inner_type(&field.ty);

        if attrs.flatten && inner.is_some() {
            return Err(Error::new(
                ident.span(),
                "#[row(flatten)] cannot be combined with an Option field",
            ));
        }

        out.push(MappedField {
            column: attrs.rename.unwrap_or_else(|| ident.to_string()),
            ident,
            ty: field.ty.clone(),
            inner: inner.cloned(),
            flatten: attrs.flatten,
        });
    }
    Ok(out)
}

/// For `Option<U>` (by whatever path spelling), return `U`
fn option_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
