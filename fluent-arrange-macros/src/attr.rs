use syn::Attribute;

/// Whether `attrs` contain `#[arrange(skip)]`.
///
/// Any other `arrange` argument is an error.
pub fn is_skipped(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;

    for attr in attrs.iter().filter(|a| a.path().is_ident("arrange")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported arrange attribute, expected `skip`"))
            }
        })?;
    }

    Ok(skip)
}

/// Drop every `#[arrange(...)]` attribute.
pub fn strip(attrs: &mut Vec<Attribute>) {
    attrs.retain(|a| !a.path().is_ident("arrange"));
}
