//! 字段注入派生宏实现

use crate::utils::{arc_inner_type, has_inject_attribute};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DeriveInput, Index, Result};

/// 实现 #[derive(Injectable)]
pub fn derive_injectable_impl(input: DeriveInput) -> TokenStream {
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> Result<TokenStream2> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Injectable 只能用于结构体",
            ))
        }
    };

    let mut dependencies = Vec::new();
    let mut initializers = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let member = match &field.ident {
            Some(ident) => quote! { #ident },
            None => {
                let index = Index::from(index);
                quote! { #index }
            }
        };

        if has_inject_attribute(field) {
            let inner = arc_inner_type(&field.ty).ok_or_else(|| {
                syn::Error::new_spanned(&field.ty, "#[inject] 字段必须是 Arc<T>")
            })?;
            dependencies.push(quote! { ::di_abstractions::ComponentType::of::<#inner>() });
            initializers.push(quote! { #member: arguments.next::<#inner>()? });
        } else {
            initializers.push(quote! { #member: ::std::default::Default::default() });
        }
    }

    // 没有依赖时参数不会被读取
    let arguments = if dependencies.is_empty() {
        quote! { _arguments }
    } else {
        quote! { arguments }
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::di_abstractions::Injectable for #name #ty_generics #where_clause {
            fn injectable_constructor() -> ::di_abstractions::ConstructorDescriptor<Self> {
                ::di_abstractions::ConstructorDescriptor::inject(
                    ::std::vec![#(#dependencies),*],
                    |#arguments: &mut ::di_abstractions::Arguments| {
                        ::std::result::Result::Ok(::std::sync::Arc::new(Self {
                            #(#initializers),*
                        }))
                    },
                )
            }
        }
    })
}
