use crate::attr;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, Type};

pub fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Constructible can only be derived for structs",
            ));
        }
    };

    let mut parameters = Vec::new();
    let mut parameter_types: Vec<&Type> = Vec::new();
    let mut values = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let ty = &field.ty;

        if attr::is_skipped(&field.attrs)? {
            values.push(quote! { ::core::default::Default::default() });
            continue;
        }

        let label = match &field.ident {
            Some(ident) => LitStr::new(&ident.unraw().to_string(), ident.span()),
            None => LitStr::new(&index.to_string(), proc_macro2::Span::call_site()),
        };
        parameters.push(quote! { ::fluent_arrange::Parameter::of::<#ty>(#label) });
        parameter_types.push(ty);
        values.push(quote! { args.next::<#ty>()? });
    }

    let body = match fields {
        Fields::Named(named) => {
            let idents = named.named.iter().map(|f| &f.ident);
            quote! { Self { #(#idents: #values),* } }
        }
        Fields::Unnamed(_) => quote! { Self(#(#values),*) },
        Fields::Unit => quote! { Self },
    };

    // Nothing to read from the cursor
    let args = if parameters.is_empty() {
        format_ident!("_args")
    } else {
        format_ident!("args")
    };

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let mut predicates = where_clause
        .map(|w| w.predicates.iter().map(|p| quote! { #p }).collect::<Vec<_>>())
        .unwrap_or_default();
    if !input.generics.params.is_empty() {
        predicates.extend(
            parameter_types
                .iter()
                .map(|ty| quote! { #ty: ::core::clone::Clone + 'static }),
        );
        predicates.push(quote! { Self: 'static });
    }

    Ok(quote! {
        impl #impl_generics ::fluent_arrange::Constructible for #name #ty_generics
        where #(#predicates,)*
        {
            fn constructors() -> ::std::vec::Vec<::fluent_arrange::Constructor<Self>> {
                ::std::vec![::fluent_arrange::Constructor::new(
                    "new",
                    ::fluent_arrange::Visibility::Public,
                    ::std::vec![#(#parameters),*],
                    |#args| ::core::result::Result::Ok(#body),
                )]
            }
        }
    })
}
