use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DataStruct, DeriveInput, Fields, Type};

/// Implements `hardware_interface::ResourceHandle` for a struct with a `name: String` field.
#[proc_macro_derive(ResourceHandle)]
pub fn derive_resource_handle(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(fields),
            ..
        }) => fields,
        _ => {
            return syn::Error::new_spanned(name, "ResourceHandle can only be derived for structs with named fields")
                .to_compile_error()
                .into();
        }
    };

    let Some(name_field) = fields.named.iter().find(|field| field.ident.as_ref().is_some_and(|ident| ident == "name")) else {
        return syn::Error::new_spanned(name, "ResourceHandle requires a `name: String` field")
            .to_compile_error()
            .into();
    };

    if !is_string(&name_field.ty) {
        return syn::Error::new_spanned(&name_field.ty, "the `name` field of a ResourceHandle must be a `String`")
            .to_compile_error()
            .into();
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::hardware_interface::ResourceHandle for #name #ty_generics #where_clause {
            fn name(&self) -> &str {
                self.name.as_str()
            }
        }
    };

    expanded.into()
}

// Matches `String`, `std::string::String` and `alloc::string::String`.
fn is_string(ty: &Type) -> bool {
    match ty {
        Type::Path(path) if path.qself.is_none() => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "String" && segment.arguments.is_empty()),
        _ => false,
    }
}
