use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Fields, ItemStruct};

pub fn expand_slice(input: ItemStruct) -> TokenStream {
    if !matches!(input.fields, Fields::Named(_)) {
        return syn::Error::new_spanned(
            &input.ident,
            "campus_slice expects a struct with named fields",
        )
        .to_compile_error();

    }

    let ItemStruct { attrs, vis, ident: handle, fields, .. } = &input;
    let state = format_ident!("{handle}Inner");

    quote! {
        #(#attrs)*
        #[derive(Debug, Clone)]
        #vis struct #state #fields

        #[derive(Debug, Clone)]
        #vis struct #handle(std::sync::Arc<#state>);

        impl #handle {
            #[must_use]
            pub fn new(state: #state) -> Self {
                Self(std::sync::Arc::new(state))
            }
        }

        impl std::ops::Deref for #handle {
            type Target = #state;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::campus_kernel::domain::registry::FeatureSlice for #handle {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    }
}
