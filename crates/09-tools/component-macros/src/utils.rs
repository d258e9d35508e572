//! 宏工具函数

use syn::{Field, GenericArgument, PathArguments, Type};

/// 字段是否标记了 `#[inject]`
pub fn has_inject_attribute(field: &Field) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident("inject"))
}

/// 提取 `Arc<T>` 中的 `T`
///
/// 接受 `Arc<T>`、`sync::Arc<T>` 和 `std::sync::Arc<T>` 等路径形式。
pub fn arc_inner_type(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }

    let segment = type_path.path.segments.last()?;
    if segment.ident != "Arc" {
        return None;
    }

    let PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    if arguments.args.len() != 1 {
        return None;
    }

    match arguments.args.first()? {
        GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
