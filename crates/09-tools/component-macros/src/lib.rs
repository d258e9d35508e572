//! # Component Macros
//!
//! 这个 crate 提供了字段注入的派生宏。
//!
//! ## 核心宏
//!
//! - [`Injectable`] - 为结构体生成注入构造器
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use component_macros::Injectable;
//! use std::sync::Arc;
//!
//! #[derive(Injectable)]
//! pub struct ComponentWithFieldInjection {
//!     #[inject]
//!     dependency: Arc<dyn Dependency>,
//!     calls: usize,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 字段注入派生宏
///
/// 为结构体实现 `di_abstractions::Injectable`。标记 `#[inject]` 的字段必须是
/// `Arc<T>`，按声明顺序成为构造器的依赖；其余字段使用 `Default::default()` 初始化。
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Injectable)]
/// pub struct MyService {
///     #[inject]
///     repository: Arc<dyn Repository>,
/// }
///
/// config.bind_class(ImplementationDescriptor::injectable::<MyService, _>(
///     |service| service as Arc<dyn Service>,
/// ))?;
/// ```
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    injectable::derive_injectable_impl(input)
}
