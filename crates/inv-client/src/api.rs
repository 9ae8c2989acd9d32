use std::future::Future;

use inv_model::{Id, LogoutResponse, MeResponse, Product, Resource};

use crate::ClientError;

/// Operations the admin pages need from the backend.
///
/// Collection operations are generic over [`Resource`], so products, users
/// and categories share one code path keyed by their collection name.
pub trait InventoryApi: Send + Sync {
    /// `GET /api/{collection}`
    fn list<R: Resource>(&self) -> impl Future<Output = Result<Vec<R>, ClientError>> + Send;

    /// `POST /api/{collection}`
    fn create<R: Resource>(
        &self,
        input: &R::Input,
    ) -> impl Future<Output = Result<R, ClientError>> + Send;

    /// `PUT /api/{collection}/{id}`
    fn update<R: Resource>(
        &self,
        id: Id,
        input: &R::Input,
    ) -> impl Future<Output = Result<R, ClientError>> + Send;

    /// `DELETE /api/{collection}/{id}`
    fn delete<R: Resource>(&self, id: Id) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// `GET /api/products/user/{id}`
    fn products_by_user(
        &self,
        user_id: Id,
    ) -> impl Future<Output = Result<Vec<Product>, ClientError>> + Send;

    /// `GET /api/auth/me`
    fn current_user(&self) -> impl Future<Output = Result<MeResponse, ClientError>> + Send;

    /// `POST /api/auth/logout`
    fn logout(&self) -> impl Future<Output = Result<LogoutResponse, ClientError>> + Send;
}
