use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Generics, Ident, Type, TypePath};

/// Everything needed to implement `Component` for a type.
pub struct ConstructorData {
    pub self_type: TokenStream2,
    pub generics: Generics,
    pub arguments: Vec<ArgumentData>,
    pub return_type: ReturnTypeData,
    pub invocation: Invocation,
}

pub struct ArgumentData {
    pub span: Span,
    pub ty: Type,
}

impl ArgumentData {
    pub fn binding(&self, index: usize) -> Ident {
        Ident::new(&format!("dep{index}"), self.span)
    }
}

#[derive(Debug)]
pub enum ReturnTypeData {
    Infallible,
    Result { error_type: TypePath },
}

/// How the resolved arguments are turned into `Self`.
pub enum Invocation {
    Function(Ident),
    NamedFields(Vec<Ident>),
    UnnamedFields,
    Unit,
}

pub fn expand_component_implementation(ctor_data: ConstructorData) -> TokenStream2 {
    let self_type = &ctor_data.self_type;
    let (impl_generics, _, where_clause) = ctor_data.generics.split_for_impl();

    let associated_type_error =
        if let ReturnTypeData::Result { error_type } = &ctor_data.return_type {
            quote! { type Error = #error_type; }
        } else {
            quote! { type Error = ::std::convert::Infallible; }
        };

    let dependencies = ctor_data
        .arguments
        .iter()
        .map(|arg| {
            let ty = &arg.ty;
            quote! { <#ty as scoped_di::builder::Parameter>::dependency(), }
        })
        .collect::<TokenStream2>();

    let get_dep_statements = ctor_data
        .arguments
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            let dep = arg.binding(i);
            let ty = &arg.ty;
            quote! { let #dep = <#ty as scoped_di::builder::Parameter>::resolve(container)?; }
        })
        .collect::<TokenStream2>();

    let deps: Vec<_> = ctor_data
        .arguments
        .iter()
        .enumerate()
        .map(|(i, arg)| arg.binding(i))
        .collect();

    let construction = match &ctor_data.invocation {
        Invocation::Function(constructor) => quote! { Self::#constructor(#(#deps,)*) },
        Invocation::NamedFields(fields) => quote! { Self { #(#fields: #deps,)* } },
        Invocation::UnnamedFields => quote! { Self(#(#deps,)*) },
        Invocation::Unit => quote! { Self },
    };

    let wire_deps = if let ReturnTypeData::Infallible = &ctor_data.return_type {
        quote! { ::std::result::Result::Ok(::std::result::Result::Ok(#construction)) }
    } else {
        quote! { ::std::result::Result::Ok(#construction) }
    };

    quote! {
        impl #impl_generics scoped_di::builder::Injectable for #self_type #where_clause {
            fn constructibility() -> scoped_di::builder::Constructibility<Self> {
                scoped_di::builder::Constructibility::component()
            }
        }

        impl #impl_generics scoped_di::builder::Component for #self_type #where_clause {
            #associated_type_error

            fn signature() -> scoped_di::builder::Signature {
                scoped_di::builder::Signature::new(::std::vec![#dependencies])
            }

            fn construct(
                container: &scoped_di::container::Container,
            ) -> ::std::result::Result<
                ::std::result::Result<Self, Self::Error>,
                scoped_di::container::ContainerError
            > {
                #get_dep_statements
                #wire_deps
            }
        }
    }
}

pub fn expand_ambiguous_implementation(
    self_type: &TokenStream2,
    generics: &Generics,
    arity: usize,
) -> TokenStream2 {
    let (impl_generics, _, where_clause) = generics.split_for_impl();
    quote! {
        impl #impl_generics scoped_di::builder::Injectable for #self_type #where_clause {
            fn constructibility() -> scoped_di::builder::Constructibility<Self> {
                scoped_di::builder::Constructibility::Ambiguous { arity: #arity }
            }
        }
    }
}
