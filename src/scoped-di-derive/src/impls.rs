use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{quote, ToTokens};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::token::Comma;
use syn::visit_mut::{self, VisitMut};
use syn::{
    AngleBracketedGenericArguments, Attribute, Error as SynError, FnArg, GenericArgument,
    ImplItem, ImplItemFn, ItemImpl, Meta, PathArguments, Result as SynResult, ReturnType,
    Signature, Type, TypePath,
};

use crate::expand::{self, ArgumentData, ConstructorData, Invocation, ReturnTypeData};

const RETURN_TYPE_MESSAGE: &str = "a constructor's return type should be `Self` or `Result<Self, E>`";

struct AttributeRemovalVisitor;

impl AttributeRemovalVisitor {
    fn is_custom_attribute(attr: &Attribute) -> bool {
        if let Meta::Path(path) = &attr.meta {
            if path.segments.first().is_some_and(|s| s.ident == "inject") {
                return true;
            }
        }
        false
    }
}

impl VisitMut for AttributeRemovalVisitor {
    fn visit_attributes_mut(&mut self, attrs: &mut Vec<Attribute>) {
        attrs.retain(|attr| !Self::is_custom_attribute(attr));
        attrs
            .iter_mut()
            .for_each(|attr| visit_mut::visit_attribute_mut(self, attr));
    }
}

/// The outcome of looking for the constructor in an `impl` block.
enum ConstructorChoice {
    Unique(Signature),
    Ambiguous { arity: usize },
}

pub fn expand_implementation(impls: TokenStream) -> SynResult<TokenStream2> {
    let mut impls = match syn::parse::<ItemImpl>(impls) {
        Ok(impls) => impls,
        Err(err) => {
            return Err(SynError::new(
                err.span(),
                "`#[component]` should be annotated on the `impl` block",
            ))
        }
    };

    if let Some((_, path, _)) = &impls.trait_ {
        return Err(SynError::new(
            path.span(),
            "`#[component]` should be annotated on an inherent `impl` block",
        ));
    }

    let self_type = get_self_type(&impls)?;
    let generics = impls.generics.clone();

    let expanded = match choose_constructor(&impls.items, &self_type, impls.span())? {
        ConstructorChoice::Unique(signature) => {
            let ctor_data = parse_constructor(self_type, generics, signature)?;
            expand::expand_component_implementation(ctor_data)
        }
        ConstructorChoice::Ambiguous { arity } => {
            let self_type = self_type.to_token_stream();
            expand::expand_ambiguous_implementation(&self_type, &generics, arity)
        }
    };

    let mut visitor = AttributeRemovalVisitor;
    visitor.visit_item_impl_mut(&mut impls);

    Ok(quote! {
        #impls
        #expanded
    })
}

fn get_self_type(impls: &ItemImpl) -> SynResult<TypePath> {
    if let Type::Path(ty) = impls.self_ty.as_ref() {
        Ok(ty.clone())
    } else {
        Err(SynError::new(impls.self_ty.span(), "invalid self type"))
    }
}

fn choose_constructor(
    items: &[ImplItem],
    self_type: &TypePath,
    impl_span: Span,
) -> SynResult<ConstructorChoice> {
    let annotated: Vec<_> = items
        .iter()
        .filter_map(filter_and_map_item_fn)
        .filter(is_annotated_with_inject)
        .collect();

    if annotated.len() > 1 {
        return Err(SynError::new(
            impl_span,
            "only one associated function can be annotated with `#[inject]`",
        ));
    }

    if let Some(&ctor) = annotated.first() {
        if let Some(FnArg::Receiver(rec)) = ctor.sig.inputs.first() {
            return Err(SynError::new(
                rec.span(),
                "method is not allowed to be annotated with `#[inject]`",
            ));
        }
        return Ok(ConstructorChoice::Unique(ctor.sig.clone()));
    }

    let candidates: Vec<_> = items
        .iter()
        .filter_map(filter_and_map_item_fn)
        .map(|item_fn| &item_fn.sig)
        .filter(|sig| is_constructor_candidate(sig, self_type))
        .collect();

    let Some(arity) = candidates.iter().map(|sig| sig.inputs.len()).min() else {
        return Err(SynError::new(
            impl_span,
            "no constructor is found, annotate one with `#[inject]` or add an associated function returning `Self`",
        ));
    };

    let mut minimal = candidates.into_iter().filter(|sig| sig.inputs.len() == arity);
    match (minimal.next(), minimal.next()) {
        (Some(sig), None) => Ok(ConstructorChoice::Unique(sig.clone())),
        _ => Ok(ConstructorChoice::Ambiguous { arity }),
    }
}

fn is_constructor_candidate(signature: &Signature, self_type: &TypePath) -> bool {
    let has_receiver = matches!(signature.inputs.first(), Some(FnArg::Receiver(_)));
    let is_generic = signature.generics.type_params().next().is_some();
    !has_receiver
        && !is_generic
        && signature.asyncness.is_none()
        && parse_constructor_return_type(signature.output.clone(), self_type).is_ok()
}

fn filter_and_map_item_fn(item: &ImplItem) -> Option<&ImplItemFn> {
    if let ImplItem::Fn(impl_fn) = item {
        Some(impl_fn)
    } else {
        None
    }
}

fn is_annotated_with_inject(item_fn: &&ImplItemFn) -> bool {
    item_fn.attrs.iter().any(|attr| {
        let content = attr.meta.to_token_stream().to_string();
        &content == "inject"
    })
}

fn parse_constructor(
    self_type: TypePath,
    generics: syn::Generics,
    signature: Signature,
) -> SynResult<ConstructorData> {
    let identifier = signature.ident;
    let arguments = parse_constructor_arguments(signature.inputs);
    let return_type = parse_constructor_return_type(signature.output, &self_type)?;

    Ok(ConstructorData {
        self_type: self_type.to_token_stream(),
        generics,
        arguments,
        return_type,
        invocation: Invocation::Function(identifier),
    })
}

fn parse_constructor_arguments(inputs: Punctuated<FnArg, Comma>) -> Vec<ArgumentData> {
    inputs
        .into_iter()
        .map(|arg| {
            if let FnArg::Typed(arg) = arg {
                arg
            } else {
                unreachable!("a constructor should not have a receiver argument");
            }
        })
        .map(|arg| ArgumentData {
            span: arg.span(),
            ty: *arg.ty,
        })
        .collect()
}

fn parse_constructor_return_type(
    output: ReturnType,
    self_type: &TypePath,
) -> Result<ReturnTypeData, SynError> {
    let ReturnType::Type(_, return_type) = output else {
        return Err(SynError::new(output.span(), RETURN_TYPE_MESSAGE));
    };
    let Type::Path(return_type) = *return_type else {
        return Err(SynError::new(return_type.span(), RETURN_TYPE_MESSAGE));
    };

    let segments = &return_type.path.segments;

    let return_type = if &return_type == self_type {
        ReturnTypeData::Infallible
    } else if segments.len() == 1 && segments[0].ident == "Self" {
        ReturnTypeData::Infallible
    } else if segments.len() == 1 && segments[0].ident == "Result" {
        parse_result_return_type(&segments[0].arguments, self_type)?
    } else if segments.len() == 3
        && segments[0].ident == "std"
        && segments[1].ident == "result"
        && segments[2].ident == "Result"
    {
        parse_result_return_type(&segments[2].arguments, self_type)?
    } else {
        return Err(SynError::new(return_type.span(), RETURN_TYPE_MESSAGE));
    };
    Ok(return_type)
}

fn parse_result_return_type(
    type_args: &PathArguments,
    self_type: &TypePath,
) -> SynResult<ReturnTypeData> {
    let PathArguments::AngleBracketed(AngleBracketedGenericArguments {
        args: type_args, ..
    }) = type_args
    else {
        return Err(SynError::new(type_args.span(), RETURN_TYPE_MESSAGE));
    };

    if type_args.len() != 2 {
        return Err(SynError::new(type_args.span(), RETURN_TYPE_MESSAGE));
    }

    let (
        GenericArgument::Type(Type::Path(first_type)),
        GenericArgument::Type(Type::Path(error_type)),
    ) = (&type_args[0], &type_args[1])
    else {
        return Err(SynError::new(type_args.span(), RETURN_TYPE_MESSAGE));
    };

    let is_self = first_type == self_type
        || (first_type.path.segments.len() == 1 && first_type.path.segments[0].ident == "Self");

    if is_self {
        Ok(ReturnTypeData::Result {
            error_type: error_type.clone(),
        })
    } else {
        Err(SynError::new(type_args.span(), RETURN_TYPE_MESSAGE))
    }
}
