use std::error::Error;

use crate::builder::{Parameter, Signature};
use crate::container::{Container, ContainerError, Managed};

/// A specialized form of [`Fn`] that can be called by supplying arguments
/// resolved from a [`Container`].
///
/// Closures of `Fn(A1, A2, ...) -> Result<T, E> + Send + Sync + 'static`
/// where `Ai: Parameter` are [`Closure`]. Due to the lack of variadic
/// generics, [`Closure`] is only implemented for closures whose arity is at
/// most 16.
///
/// Usually you don't need to use a [`Closure`] directly. Pass it to
/// [`Builder::from_closure`] or the `to_closure()` [`dsl`] instead.
///
/// [`Builder::from_closure`]: crate::builder::Builder::from_closure
/// [`dsl`]: crate::module::dsl
pub trait Closure<D>
where
    Self: Send + Sync + 'static,
    D: Send + Sync + 'static,
{
    /// The successfully constructed object.
    type Constructed: Managed;

    /// The error occurred in object construction after all arguments are
    /// resolved.
    type Error: Into<Box<dyn Error + Send + Sync>>;

    /// Returns the parameters of the closure in declared order.
    fn signature() -> Signature;

    /// Resolves the arguments from the container and calls `self` with them.
    ///
    /// # Errors
    ///
    /// Returns an error if a required argument can't be resolved.
    ///
    /// Returns an inner error [`Closure::Error`] wrapped in the outer [`Ok`]
    /// if the closure fails.
    fn run(
        &self,
        container: &Container,
    ) -> Result<Result<Self::Constructed, Self::Error>, ContainerError>;
}

impl<F, T, E> Closure<()> for F
where
    F: Fn() -> Result<T, E> + Send + Sync + 'static,
    T: Managed,
    E: Into<Box<dyn Error + Send + Sync>>,
{
    type Constructed = T;

    type Error = E;

    fn signature() -> Signature {
        Signature::default()
    }

    fn run(
        &self,
        _container: &Container,
    ) -> Result<Result<Self::Constructed, Self::Error>, ContainerError> {
        Ok(self())
    }
}

macro_rules! for_all_tuples {
    ($implementation:ident) => {
        $implementation!(D1);
        $implementation!(D1, D2);
        $implementation!(D1, D2, D3);
        $implementation!(D1, D2, D3, D4);
        $implementation!(D1, D2, D3, D4, D5);
        $implementation!(D1, D2, D3, D4, D5, D6);
        $implementation!(D1, D2, D3, D4, D5, D6, D7);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14, D15);
        $implementation!(D1, D2, D3, D4, D5, D6, D7, D8, D9, D10, D11, D12, D13, D14, D15, D16);
    };
}

macro_rules! impl_closure {
    ($($dep:ident),*) => {
        #[allow(non_snake_case)]
        impl<F, T, E, $($dep,)*> Closure<($($dep,)*)> for F
        where
            F: Fn($($dep,)*) -> Result<T, E> + Send + Sync + 'static,
            T: Managed,
            E: Into<Box<dyn Error + Send + Sync>>,
            $($dep: Parameter,)*
        {
            type Constructed = T;

            type Error = E;

            fn signature() -> Signature {
                Signature::new(vec![$(<$dep as Parameter>::dependency(),)*])
            }

            fn run(
                &self,
                container: &Container,
            ) -> Result<Result<Self::Constructed, Self::Error>, ContainerError> {
                $(
                    let $dep = <$dep as Parameter>::resolve(container)?;
                )*
                Ok(self($($dep,)*))
            }
        }
    };
}

for_all_tuples!(impl_closure);
