use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derive macro for the `Categorical` trait on fieldless enums.
///
/// Generates an implementation of `autoopt::distribution::Categorical` that
/// lists the variants in declaration order and names each one after its
/// identifier.
///
/// # Example
///
/// ```ignore
/// use autoopt::Categorical;
///
/// #[derive(Clone, Debug, PartialEq, Categorical)]
/// enum Activation {
///     Relu,
///     Tanh,
///     Gelu,
/// }
/// ```
#[proc_macro_derive(Categorical)]
pub fn derive_categorical(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(&input, "Categorical can only be derived for enums")
            .to_compile_error()
            .into();
    };

    for variant in &data_enum.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return syn::Error::new_spanned(
                variant,
                "Categorical can only be derived for enums with unit variants (no fields)",
            )
            .to_compile_error()
            .into();
        }
    }

    let variant_idents: Vec<_> = data_enum.variants.iter().map(|v| &v.ident).collect();

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::autoopt::distribution::Categorical for #name #ty_generics #where_clause {
            fn variants() -> ::std::vec::Vec<Self> {
                ::std::vec![#(#name::#variant_idents),*]
            }

            fn variant_name(&self) -> &'static str {
                match *self {
                    #(#name::#variant_idents => stringify!(#variant_idents),)*
                }
            }
        }
    };

    expanded.into()
}
