//! 宏工具函数

use syn::{Attribute, GenericArgument, LitStr, PathArguments, Result, Token, Type};
use syn::punctuated::Punctuated;

/// 解析结构体上的 `#[inject("a", "b")]` 属性
///
/// 没有该属性时返回空列表；出现多次、包含空键时返回错误。
pub fn injection_keys(attrs: &[Attribute]) -> Result<Vec<LitStr>> {
    let mut keys: Option<Vec<LitStr>> = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
        if keys.is_some() {
            return Err(syn::Error::new_spanned(attr, "只能声明一个 #[inject] 属性"));
        }

        let parsed = attr.parse_args_with(Punctuated::<LitStr, Token![,]>::parse_terminated)?;
        for key in &parsed {
            if key.value().trim().is_empty() {
                return Err(syn::Error::new_spanned(key, "依赖键不能为空"));
            }
        }
        keys = Some(parsed.into_iter().collect());
    }

    Ok(keys.unwrap_or_default())
}

/// 字段类型是否为 `Arc<T>`（按路径最后一段判断，兼容 `std::sync::Arc<T>`）
pub fn is_arc_type(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };

    type_path.path.segments.last().is_some_and(|segment| {
        segment.ident == "Arc"
            && matches!(
                &segment.arguments,
                PathArguments::AngleBracketed(args)
                    if matches!(args.args.first(), Some(GenericArgument::Type(_)))
            )
    })
}
