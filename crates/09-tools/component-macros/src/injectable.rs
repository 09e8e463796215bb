//! `#[derive(Injectable)]` 实现

use crate::utils::{injection_keys, is_arc_type};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

/// 生成 `Injectable` 实现
///
/// 依赖键与字段按位置对应，数量不一致或字段不是 `Arc<T>` 时产生编译错误。
pub fn derive_injectable_impl(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Injectable)] 只支持结构体",
        ));
    };

    let keys = injection_keys(&input.attrs)?;
    if keys.len() != data.fields.len() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            format!(
                "#[inject] 声明了 {} 个依赖键, 但结构体有 {} 个字段",
                keys.len(),
                data.fields.len()
            ),
        ));
    }

    if let Some(field) = data.fields.iter().find(|field| !is_arc_type(&field.ty)) {
        return Err(syn::Error::new_spanned(&field.ty, "注入字段必须是 Arc<T>"));
    }

    let construct = match &data.fields {
        Fields::Named(fields) => {
            let assignments = fields.named.iter().enumerate().map(|(index, field)| {
                let ident = &field.ident;
                quote! { #ident: dependencies.get(#index)? }
            });
            quote! { Self { #(#assignments),* } }
        }
        Fields::Unnamed(fields) => {
            let values = (0..fields.unnamed.len()).map(|index| {
                quote! { dependencies.get(#index)? }
            });
            quote! { Self(#(#values),*) }
        }
        Fields::Unit => quote! { Self },
    };

    Ok(quote! {
        impl #impl_generics ::infrastructure_common::Injectable for #name #ty_generics #where_clause {
            fn dependencies() -> &'static [&'static str] {
                &[#(#keys),*]
            }

            #[allow(unused_variables)]
            fn create(
                dependencies: ::infrastructure_common::ResolvedDependencies,
            ) -> ::infrastructure_common::DependencyResult<Self> {
                ::std::result::Result::Ok(#construct)
            }
        }
    })
}
