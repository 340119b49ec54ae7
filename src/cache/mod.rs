//! 对象缓存层
//!
//! 通过插件注册机制支持多种缓存后端（Moka 内存缓存 / Redis）。
//! 后端在编译期通过 `declare_object_cache_plugin!` 宏注册，
//! 运行时根据配置选择。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明并注册一个对象缓存插件
///
/// 在模块加载时（ctor）将构造函数注册到全局注册表。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:literal, $plugin:ident) => {
        paste::paste! {
            #[ctor::ctor]
            #[allow(non_snake_case)]
            fn [<__register_object_cache_ $plugin>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let plugin = $plugin::new()
                                .map_err($crate::errors::PlacementError::cache_connection)?;
                            Ok(Box::new(plugin) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
