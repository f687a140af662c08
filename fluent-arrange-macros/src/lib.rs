// Procedural macros for fluent-arrange
// Describe the constructors of a type under test at compile time

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

mod attr;
mod constructible;
mod constructors;

/// Derives `Constructible` with a single public constructor named `new`.
///
/// The constructor takes one parameter per field, in declaration order.
/// Fields marked `#[arrange(skip)]` are not parameters and are filled with
/// `Default::default()`.
///
/// ```ignore
/// #[derive(Constructible)]
/// struct AccountService {
///     repository: Arc<dyn AccountRepository>,
///     #[arrange(skip)]
///     cache: HashMap<u32, Account>,
/// }
/// ```
#[proc_macro_derive(Constructible, attributes(arrange))]
pub fn derive_constructible(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    constructible::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Implements `Constructible` from an inherent impl block.
///
/// Every associated function without a receiver that returns `Self`, the
/// implementing type, or `Result<Self, E>` is a constructor, in declaration
/// order. `pub` functions are public constructors, all others private.
/// `#[arrange(skip)]` leaves a function out.
///
/// ```ignore
/// #[constructors]
/// impl Scheduler {
///     pub fn new(clock: Arc<dyn Clock>) -> Self { /* ... */ }
///
///     fn with_store(clock: Arc<dyn Clock>, store: Arc<dyn Store>) -> Result<Self, StoreError> {
///         /* ... */
///     }
///
///     #[arrange(skip)]
///     pub fn for_production() -> Self { /* ... */ }
/// }
/// ```
#[proc_macro_attribute]
pub fn constructors(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "#[constructors] does not take arguments",
        )
        .to_compile_error()
        .into();
    }

    let input = parse_macro_input!(item as ItemImpl);
    constructors::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
