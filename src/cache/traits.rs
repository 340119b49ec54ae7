use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    /// 命中
    Found(T),
    /// 未命中
    NotFound,
    /// 键存在但取值失败（连接错误、反序列化失败等）
    ExistsButNoValue,
}

/// 对象缓存统一接口
///
/// 所有缓存后端（Moka、Redis）都实现此 trait，
/// 存取均为字符串键值，由调用方自行序列化。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// 写入缓存，ttl 单位为秒，为 0 时使用后端默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}
