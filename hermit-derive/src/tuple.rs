//! Implementation of the `tuple_family!` procedural macro.
//!
//! # Generated Code Structure
//!
//! For arity 2 the macro emits (abridged):
//!
//! ```text
//! #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
//! pub struct Tuple2<A, B> {
//!     first: A,
//!     second: B,
//! }
//!
//! impl<A, B> Tuple2<A, B> {
//!     pub const fn new(first: A, second: B) -> Self { Self { first, second } }
//!     pub const fn first(&self) -> &A { &self.first }
//!     pub const fn second(&self) -> &B { &self.second }
//!     pub fn into_tuple(self) -> (A, B) { (self.first, self.second) }
//! }
//! ```
//!
//! followed by `From`, `Debug`, `Display`, `TryFrom` and (behind the caller's
//! `serde` feature) serde implementations. `Debug` and `Display` share the
//! `Tuple2(a,b)` rendering so tuples nested in collections read the same.

use proc_macro2::{Ident, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::LitInt;

/// Accessor names, one per slot. Their count bounds the supported arity.
const ACCESSOR_NAMES: [&str; 12] = [
    "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth", "ninth", "tenth",
    "eleventh", "twelfth",
];

pub fn tuple_family_impl(input: TokenStream2) -> TokenStream2 {
    let literal: LitInt = match syn::parse2(input) {
        Ok(literal) => literal,
        Err(error) => return error.to_compile_error(),
    };

    let max_arity = match literal.base10_parse::<usize>() {
        Ok(value) if (1..=ACCESSOR_NAMES.len()).contains(&value) => value,
        Ok(_) => {
            return syn::Error::new(
                literal.span(),
                format!(
                    "tuple_family! supports arities 1 through {}",
                    ACCESSOR_NAMES.len()
                ),
            )
            .to_compile_error();
        }
        Err(error) => return error.to_compile_error(),
    };

    let family = (1..=max_arity).map(generate_tuple);
    quote! { #(#family)* }
}

/// Everything the templates need to know about one arity.
struct TupleShape {
    arity: usize,
    name: Ident,
    visitor: Ident,
    parameters: Vec<Ident>,
    fields: Vec<Ident>,
}

impl TupleShape {
    fn new(arity: usize) -> Self {
        let parameters = (b'A'..)
            .take(arity)
            .map(|letter| format_ident!("{}", char::from(letter)))
            .collect();
        let fields = ACCESSOR_NAMES[..arity]
            .iter()
            .map(|name| format_ident!("{}", name))
            .collect();
        Self {
            arity,
            name: format_ident!("Tuple{}", arity),
            visitor: format_ident!("Tuple{}Visitor", arity),
            parameters,
            fields,
        }
    }
}

fn generate_tuple(arity: usize) -> TokenStream2 {
    let shape = TupleShape::new(arity);
    let definition = generate_definition(&shape);
    let conversions = generate_conversions(&shape);
    let display = generate_display(&shape);
    let serde = generate_serde(&shape);

    quote! {
        #definition
        #conversions
        #display
        #serde
    }
}

fn generate_definition(shape: &TupleShape) -> TokenStream2 {
    let TupleShape {
        arity,
        name,
        parameters,
        fields,
        ..
    } = shape;

    let struct_doc = format!(
        "An immutable record of {arity} independently typed slot{}.\n\n\
         Equality, ordering and hashing are structural: two values are equal \
         exactly when every slot is equal.",
        if *arity == 1 { "" } else { "s" }
    );
    let accessor_docs = fields
        .iter()
        .enumerate()
        .map(|(index, field)| format!("Returns the {field} slot (position {}).", index + 1));

    quote! {
        #[doc = #struct_doc]
        #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct #name<#(#parameters),*> {
            #(#fields: #parameters),*
        }

        impl<#(#parameters),*> #name<#(#parameters),*> {
            /// Creates a tuple with every slot bound.
            #[inline]
            #[must_use]
            #[allow(clippy::too_many_arguments)]
            pub const fn new(#(#fields: #parameters),*) -> Self {
                Self { #(#fields),* }
            }

            #(
                #[doc = #accessor_docs]
                #[inline]
                #[must_use]
                pub const fn #fields(&self) -> &#parameters {
                    &self.#fields
                }
            )*

            /// Converts into a standard Rust tuple.
            #[inline]
            #[must_use]
            pub fn into_tuple(self) -> (#(#parameters,)*) {
                (#(self.#fields,)*)
            }
        }
    }
}

fn generate_conversions(shape: &TupleShape) -> TokenStream2 {
    let TupleShape {
        arity,
        name,
        parameters,
        fields,
        ..
    } = shape;
    let indices = (0..*arity).map(syn::Index::from);
    let homogeneous: Vec<Ident> = (0..*arity).map(|_| format_ident!("T")).collect();

    quote! {
        impl<#(#parameters),*> ::core::convert::From<(#(#parameters,)*)> for #name<#(#parameters),*> {
            #[inline]
            fn from(tuple: (#(#parameters,)*)) -> Self {
                Self::new(#(tuple.#indices),*)
            }
        }

        impl<T> ::core::convert::TryFrom<::std::vec::Vec<T>> for #name<#(#homogeneous),*> {
            type Error = crate::error::CollectionError;

            fn try_from(elements: ::std::vec::Vec<T>) -> ::core::result::Result<Self, Self::Error> {
                let actual = elements.len();
                let [#(#fields),*] = <[T; #arity]>::try_from(elements).map_err(|_| {
                    crate::error::CollectionError::ArityMismatch {
                        expected: #arity,
                        actual,
                    }
                })?;
                Ok(Self::new(#(#fields),*))
            }
        }

        #[cfg(feature = "persistent")]
        impl<T: ::core::clone::Clone> ::core::convert::TryFrom<crate::persistent::PersistentVector<T>>
            for #name<#(#homogeneous),*>
        {
            type Error = crate::error::CollectionError;

            fn try_from(
                vector: crate::persistent::PersistentVector<T>,
            ) -> ::core::result::Result<Self, Self::Error> {
                let actual = vector.len();
                if actual != #arity {
                    return Err(crate::error::CollectionError::ArityMismatch {
                        expected: #arity,
                        actual,
                    });
                }
                Self::try_from(vector.into_iter().collect::<::std::vec::Vec<T>>())
            }
        }
    }
}

fn generate_display(shape: &TupleShape) -> TokenStream2 {
    let TupleShape {
        name,
        parameters,
        fields,
        ..
    } = shape;
    let opening = format!("{name}(");
    let writes = fields.iter().enumerate().map(|(index, field)| {
        let separator = (index > 0).then(|| quote! { formatter.write_str(",")?; });
        quote! {
            #separator
            ::core::write!(formatter, "{:?}", self.#field)?;
        }
    });

    quote! {
        impl<#(#parameters: ::core::fmt::Debug),*> ::core::fmt::Debug for #name<#(#parameters),*> {
            fn fmt(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                formatter.write_str(#opening)?;
                #(#writes)*
                formatter.write_str(")")
            }
        }

        impl<#(#parameters: ::core::fmt::Debug),*> ::core::fmt::Display for #name<#(#parameters),*> {
            fn fmt(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, formatter)
            }
        }
    }
}

/// Method-level generics carry a `__` prefix; slot parameters are single
/// capital letters and reach `D` from arity 4.
fn generate_serde(shape: &TupleShape) -> TokenStream2 {
    let TupleShape {
        arity,
        name,
        visitor,
        parameters,
        fields,
    } = shape;
    let positions = 0..*arity;
    let expecting = format!("a sequence of {arity} elements");

    quote! {
        #[cfg(feature = "serde")]
        impl<#(#parameters: ::serde::Serialize),*> ::serde::Serialize for #name<#(#parameters),*> {
            fn serialize<__S>(&self, serializer: __S) -> ::core::result::Result<__S::Ok, __S::Error>
            where
                __S: ::serde::Serializer,
            {
                use ::serde::ser::SerializeTuple;
                let mut tuple = serializer.serialize_tuple(#arity)?;
                #(tuple.serialize_element(&self.#fields)?;)*
                tuple.end()
            }
        }

        #[cfg(feature = "serde")]
        #[doc(hidden)]
        struct #visitor<#(#parameters),*> {
            marker: ::core::marker::PhantomData<(#(#parameters,)*)>,
        }

        #[cfg(feature = "serde")]
        impl<'de, #(#parameters: ::serde::Deserialize<'de>),*> ::serde::de::Visitor<'de>
            for #visitor<#(#parameters),*>
        {
            type Value = #name<#(#parameters),*>;

            fn expecting(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                formatter.write_str(#expecting)
            }

            fn visit_seq<__A>(self, mut sequence: __A) -> ::core::result::Result<Self::Value, __A::Error>
            where
                __A: ::serde::de::SeqAccess<'de>,
            {
                #(
                    let #fields = sequence
                        .next_element()?
                        .ok_or_else(|| ::serde::de::Error::invalid_length(#positions, &self))?;
                )*
                Ok(#name::new(#(#fields),*))
            }
        }

        #[cfg(feature = "serde")]
        impl<'de, #(#parameters: ::serde::Deserialize<'de>),*> ::serde::Deserialize<'de>
            for #name<#(#parameters),*>
        {
            fn deserialize<__D>(deserializer: __D) -> ::core::result::Result<Self, __D::Error>
            where
                __D: ::serde::Deserializer<'de>,
            {
                deserializer.deserialize_tuple(
                    #arity,
                    #visitor {
                        marker: ::core::marker::PhantomData,
                    },
                )
            }
        }
    }
}
