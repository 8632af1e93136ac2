use crate::domain::model::Category;
use crate::utils::error::Result;
use async_trait::async_trait;

/// 以 key 為檔名的簡單儲存介面（對應瀏覽器 localStorage）
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 可被查詢引擎篩選的目錄紀錄
pub trait Listing {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    /// 沒有分類的紀錄只會被 `CategoryFilter::All` 選中
    fn category(&self) -> Option<Category>;
    fn price(&self) -> u64;
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String>;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn generate(&self, prompt: &str, temperature: f32) -> Result<String> {
        (**self).generate(prompt, temperature).await
    }
}
