//! `#[derive(Component)]` 实现

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

/// 生成空的 `Component` 实现，释放操作使用 trait 默认实现
pub fn derive_component_impl(input: &DeriveInput) -> TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::infrastructure_common::Component for #name #ty_generics #where_clause {}
    }
}
