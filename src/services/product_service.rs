use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use super::error::ServiceError;
use super::guard::OwnershipGuard;
use super::fetch_page;
use crate::api::request::{ProductAddRequest, ProductUpdateRequest};
use crate::api::response::ProductResponse;
use crate::auth::Principal;
use crate::config::AppConfig;
use crate::criteria::ProductCriteria;
use crate::database::models::{Audit, Product};
use crate::database::Repositories;
use crate::filter::{PageEnvelope, PageRequest};

/// One uploaded file as received from the multipart form.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn is_image(&self) -> bool {
        self.content_type.split('/').next().map(str::trim) == Some("image")
    }

    /// Random prefix plus the client's base name, path components stripped.
    fn stored_name(&self) -> String {
        let base = Path::new(&self.file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("image");
        format!("{}{}", Uuid::new_v4().simple(), base)
    }
}

#[derive(Clone)]
pub struct ProductService {
    repos: Repositories,
    guard: OwnershipGuard,
    config: Arc<AppConfig>,
}

impl ProductService {
    pub fn new(repos: Repositories, guard: OwnershipGuard, config: Arc<AppConfig>) -> Self {
        Self { repos, guard, config }
    }

    pub async fn create(&self, principal: Principal, request: ProductAddRequest) -> Result<Uuid, ServiceError> {
        let outlet = self.guard.outlet(principal, request.outlet_id).await?;

        let product = Product {
            id: Uuid::nil(),
            outlet_id: outlet.id,
            name: request.name,
            description: request.description,
            stock: request.stock,
            price: request.price,
            image: None,
            audit: Audit::default(),
        };
        let id = self.repos.products.save(product).await?;
        info!("Created product {} in outlet {}", id, outlet.id);
        Ok(id)
    }

    pub async fn get(&self, principal: Principal, id: Uuid) -> Result<ProductResponse, ServiceError> {
        Ok(self.guard.product(principal, id).await?.into())
    }

    pub async fn update(&self, principal: Principal, request: ProductUpdateRequest) -> Result<Uuid, ServiceError> {
        let outlet = self.guard.outlet(principal, request.outlet_id).await?;
        let existing = self.guard.product(principal, request.id).await?;

        let product = Product {
            id: existing.id,
            outlet_id: outlet.id,
            name: request.name,
            description: request.description,
            stock: request.stock,
            price: request.price,
            image: existing.image,
            audit: existing.audit,
        };
        Ok(self.repos.products.save(product).await?)
    }

    pub async fn delete(&self, principal: Principal, id: Uuid) -> Result<(), ServiceError> {
        let product = self.guard.product(principal, id).await?;
        self.repos.products.delete(&product).await?;
        info!("Deleted product {}", id);
        Ok(())
    }

    /// An `outlet_id` filter must name an outlet the principal owns.
    pub async fn fetch(
        &self,
        principal: Principal,
        criteria: &ProductCriteria,
        page: &PageRequest,
    ) -> Result<PageEnvelope<ProductResponse>, ServiceError> {
        if let Some(outlet_id) = criteria.outlet_id.filter(|id| !id.is_nil()) {
            self.guard.outlet(principal, outlet_id).await?;
        }
        fetch_page(self.repos.products.as_ref(), criteria, page, &self.config).await
    }

    /// Store each upload under the upload directory and point the product at
    /// the last one written. Every file is checked before anything is stored.
    pub async fn attach_images(
        &self,
        principal: Principal,
        product_id: Uuid,
        uploads: Vec<ImageUpload>,
    ) -> Result<Vec<String>, ServiceError> {
        if uploads.is_empty() {
            return Err(ServiceError::bad_request("image value is null"));
        }
        if uploads.iter().any(|u| !u.is_image()) {
            debug!("Rejected non-image upload for product {}", product_id);
            return Err(ServiceError::bad_request("file format isn't image"));
        }

        let mut product = self.guard.product(principal, product_id).await?;

        let dir = PathBuf::from(&self.config.storage.upload_dir);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| {
            error!("Cannot create upload directory {}: {}", dir.display(), e);
            ServiceError::internal("internal server error")
        })?;

        let mut stored = Vec::with_capacity(uploads.len());
        for upload in uploads {
            let name = upload.stored_name();
            let path = dir.join(&name);
            tokio::fs::write(&path, &upload.bytes).await.map_err(|e| {
                error!("Cannot write upload {}: {}", path.display(), e);
                ServiceError::internal("internal server error")
            })?;
            stored.push(name);
        }

        product.image = stored.last().cloned();
        self.repos.products.save(product).await?;
        info!("Attached {} image(s) to product {}", stored.len(), product_id);
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, content_type: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.into(),
            content_type: content_type.into(),
            bytes: vec![0xff, 0xd8],
        }
    }

    #[test]
    fn only_image_content_types_pass() {
        assert!(upload("a.png", "image/png").is_image());
        assert!(upload("a.jpg", "image/jpeg").is_image());
        assert!(!upload("a.txt", "text/plain").is_image());
        assert!(!upload("a", "").is_image());
    }

    #[test]
    fn stored_name_drops_directories() {
        let name = upload("../../etc/passwd.png", "image/png").stored_name();
        assert!(name.ends_with("passwd.png"));
        assert!(!name.contains('/'));
        assert_eq!(name.len(), 32 + "passwd.png".len());
    }
}
