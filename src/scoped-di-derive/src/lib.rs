mod derive;
mod expand;
mod impls;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use syn::spanned::Spanned;
use syn::{Error as SynError, Result as SynResult};

/// Implements `Injectable` and `Component` for the self type of an `impl`
/// block.
///
/// The constructor is the associated function annotated with `#[inject]`.
/// Without an annotation, it is the associated function returning `Self` or
/// `Result<Self, E>` with the fewest parameters. If several functions share
/// the fewest parameters, only `Injectable` is implemented and reports the
/// type as ambiguous.
///
/// Every parameter must be `Arc<T>` or `Option<Arc<T>>` where `T` is
/// `Injectable`.
#[proc_macro_attribute]
pub fn component(attr: TokenStream, item: TokenStream) -> TokenStream {
    match component_impl(attr, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn component_impl(attr: TokenStream, item: TokenStream) -> SynResult<TokenStream2> {
    if !attr.is_empty() {
        let attr = TokenStream2::from(attr);
        return Err(SynError::new(
            attr.span(),
            "`#[component]` doesn't accept any argument",
        ));
    }
    impls::expand_implementation(item)
}

/// Implements `Injectable` and `Component` for a struct whose fields, in
/// declared order, are the constructor parameters.
#[proc_macro_derive(Component)]
pub fn derive_component(item: TokenStream) -> TokenStream {
    match derive::expand_derive(item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
