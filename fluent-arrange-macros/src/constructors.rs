use crate::attr;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{
    FnArg, GenericArgument, ImplItem, ImplItemFn, ItemImpl, LitStr, Pat, PathArguments,
    ReturnType, Type, Visibility,
};

/// How a constructor function hands back the built value.
#[derive(Debug, PartialEq, Eq)]
enum Returns {
    Value,
    Result,
}

pub fn expand(mut input: ItemImpl) -> syn::Result<TokenStream> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[constructors] must be placed on an inherent impl block",
        ));
    }

    let mut constructors = Vec::new();

    for item in &mut input.items {
        let ImplItem::Fn(function) = item else {
            continue;
        };

        let skipped = attr::is_skipped(&function.attrs)?;
        attr::strip(&mut function.attrs);
        if skipped {
            continue;
        }

        if let Some(returns) = constructor_kind(function, &input.self_ty) {
            constructors.push(descriptor(function, returns));
        }
    }

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #input

        impl #impl_generics ::fluent_arrange::Constructible for #self_ty #where_clause {
            fn constructors() -> ::std::vec::Vec<::fluent_arrange::Constructor<Self>> {
                ::std::vec![#(#constructors),*]
            }
        }
    })
}

/// Classify `function` as a constructor of `self_ty`, if it is one.
fn constructor_kind(function: &ImplItemFn, self_ty: &Type) -> Option<Returns> {
    let sig = &function.sig;
    if sig.receiver().is_some()
        || sig.asyncness.is_some()
        || sig.unsafety.is_some()
        || !sig.generics.params.is_empty()
    {
        return None;
    }

    let ReturnType::Type(_, output) = &sig.output else {
        return None;
    };

    if is_self(output, self_ty) {
        return Some(Returns::Value);
    }

    let Type::Path(path) = output.as_ref() else {
        return None;
    };
    let last = path.path.segments.last()?;
    if last.ident != "Result" {
        return None;
    }

    let PathArguments::AngleBracketed(arguments) = &last.arguments else {
        return None;
    };
    match arguments.args.first() {
        Some(GenericArgument::Type(ok)) if is_self(ok, self_ty) => Some(Returns::Result),
        _ => None,
    }
}

fn is_self(ty: &Type, self_ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() && path.path.is_ident("Self") => true,
        _ => quote!(#ty).to_string() == quote!(#self_ty).to_string(),
    }
}

fn descriptor(function: &ImplItemFn, returns: Returns) -> TokenStream {
    let ident = &function.sig.ident;
    let name = LitStr::new(&ident.unraw().to_string(), ident.span());

    let visibility = match function.vis {
        Visibility::Public(_) => quote! { ::fluent_arrange::Visibility::Public },
        _ => quote! { ::fluent_arrange::Visibility::Private },
    };

    let mut parameters = Vec::new();
    let mut arguments = Vec::new();

    for (index, input) in function.sig.inputs.iter().enumerate() {
        let FnArg::Typed(typed) = input else {
            continue;
        };
        let ty = &typed.ty;
        let label = match typed.pat.as_ref() {
            Pat::Ident(pat) => pat.ident.unraw().to_string(),
            _ => format!("arg{index}"),
        };
        let label = LitStr::new(&label, ident.span());

        parameters.push(quote! { ::fluent_arrange::Parameter::of::<#ty>(#label) });
        arguments.push(quote! { args.next::<#ty>()? });
    }

    let call = quote! { Self::#ident(#(#arguments),*) };
    let body = match returns {
        Returns::Value => quote! { ::core::result::Result::Ok(#call) },
        Returns::Result => quote! { #call.map_err(::core::convert::Into::into) },
    };

    let args = if arguments.is_empty() {
        format_ident!("_args")
    } else {
        format_ident!("args")
    };

    quote! {
        ::fluent_arrange::Constructor::new(
            #name,
            #visibility,
            ::std::vec![#(#parameters),*],
            |#args| #body,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn kind(function: ImplItemFn) -> Option<Returns> {
        constructor_kind(&function, &parse_quote!(Scheduler))
    }

    #[test]
    fn test_returning_self_is_constructor() {
        assert_eq!(kind(parse_quote!(pub fn new() -> Self { Self })), Some(Returns::Value));
        assert_eq!(kind(parse_quote!(fn new() -> Scheduler { Scheduler })), Some(Returns::Value));
    }

    #[test]
    fn test_returning_result_is_fallible_constructor() {
        assert_eq!(
            kind(parse_quote!(pub fn open(path: String) -> Result<Self, std::io::Error> { todo!() })),
            Some(Returns::Result)
        );
        assert_eq!(
            kind(parse_quote!(fn open() -> std::io::Result<Scheduler> { todo!() })),
            Some(Returns::Result)
        );
    }

    #[test]
    fn test_non_constructors_ignored() {
        assert_eq!(kind(parse_quote!(pub fn run(&self) -> Self { todo!() })), None);
        assert_eq!(kind(parse_quote!(pub fn count() -> usize { 0 })), None);
        assert_eq!(kind(parse_quote!(pub fn build() {})), None);
        assert_eq!(kind(parse_quote!(pub async fn new() -> Self { todo!() })), None);
        assert_eq!(kind(parse_quote!(pub fn new<C: Clock>(clock: C) -> Self { todo!() })), None);
        assert_eq!(kind(parse_quote!(pub fn parse() -> Result<usize, String> { todo!() })), None);
    }

    #[test]
    fn test_expand_strips_arrange_attributes() {
        let input: ItemImpl = parse_quote! {
            impl Scheduler {
                pub fn new(clock: Arc<dyn Clock>) -> Self { todo!() }

                #[arrange(skip)]
                pub fn for_production() -> Self { todo!() }

                fn with_store(clock: Arc<dyn Clock>, store: Arc<dyn Store>) -> Result<Self, String> { todo!() }
            }
        };

        let out = expand(input).unwrap().to_string();

        assert!(!out.contains("arrange (skip)"));
        assert!(out.contains("\"new\""));
        assert!(out.contains("\"with_store\""));
        assert!(!out.contains("\"for_production\""));
        assert!(out.contains("Visibility :: Private"));
        assert!(out.contains("map_err"));
    }

    #[test]
    fn test_parameters_follow_declaration_order() {
        let input: ItemImpl = parse_quote! {
            impl Scheduler {
                pub fn new(clock: Arc<dyn Clock>, store: Arc<dyn Store>) -> Self { todo!() }
            }
        };

        let out = expand(input).unwrap().to_string();

        assert!(out.find("\"clock\"").unwrap() < out.find("\"store\"").unwrap());
    }

    #[test]
    fn test_trait_impl_rejected() {
        let input: ItemImpl = parse_quote! {
            impl Default for Scheduler {
                fn default() -> Self { todo!() }
            }
        };

        assert!(expand(input).is_err());
    }
}
