use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Error as SynError, Fields, Result as SynResult};

use crate::expand::{self, ArgumentData, ConstructorData, Invocation, ReturnTypeData};

pub fn expand_derive(item: TokenStream) -> SynResult<TokenStream2> {
    let input = syn::parse::<DeriveInput>(item)?;
    let ctor_data = parse_struct(input)?;
    Ok(expand::expand_component_implementation(ctor_data))
}

fn parse_struct(input: DeriveInput) -> SynResult<ConstructorData> {
    let Data::Struct(data) = input.data else {
        return Err(SynError::new(
            input.ident.span(),
            "`#[derive(Component)]` only supports structs",
        ));
    };

    let ident = &input.ident;
    let (_, type_generics, _) = input.generics.split_for_impl();
    let self_type = quote! { #ident #type_generics };

    let (arguments, invocation) = match data.fields {
        Fields::Named(fields) => {
            let names = fields
                .named
                .iter()
                .filter_map(|field| field.ident.clone())
                .collect();
            let arguments = fields
                .named
                .into_iter()
                .map(|field| ArgumentData {
                    span: field.span(),
                    ty: field.ty,
                })
                .collect();
            (arguments, Invocation::NamedFields(names))
        }
        Fields::Unnamed(fields) => {
            let arguments = fields
                .unnamed
                .into_iter()
                .map(|field| ArgumentData {
                    span: field.span(),
                    ty: field.ty,
                })
                .collect();
            (arguments, Invocation::UnnamedFields)
        }
        Fields::Unit => (Vec::new(), Invocation::Unit),
    };

    Ok(ConstructorData {
        self_type,
        generics: input.generics.clone(),
        arguments,
        return_type: ReturnTypeData::Infallible,
        invocation,
    })
}
