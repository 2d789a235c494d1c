use tracing::info;

use crate::api::traits::PortfolioApi;
use crate::errors::CoreError;
use crate::models::asset::{Asset, AssetPatch};
use crate::models::form::{AssetForm, FormSubmission};

/// Asset create / update / delete against the backend.
///
/// Validates payloads before anything is sent. Does not reload; the
/// tracker does that after a success.
pub struct AssetService;

impl AssetService {
    pub fn new() -> Self {
        Self
    }

    /// Submit the form: `POST /api/assets/` without an id,
    /// `PUT /api/assets/{id}` with one.
    pub async fn submit(&self, api: &dyn PortfolioApi, form: &AssetForm) -> Result<Asset, CoreError> {
        match form.submission() {
            FormSubmission::Create(new_asset) => {
                new_asset.validate()?;
                let created = api.create_asset(&new_asset).await?;
                info!(id = created.id, symbol = %created.symbol, "asset created");
                Ok(created)
            }
            FormSubmission::Update { id, patch } => self.update(api, id, &patch).await,
        }
    }

    pub async fn update(
        &self,
        api: &dyn PortfolioApi,
        id: i64,
        patch: &AssetPatch,
    ) -> Result<Asset, CoreError> {
        patch.validate()?;
        let updated = api.update_asset(id, patch).await?;
        info!(id, symbol = %updated.symbol, "asset updated");
        Ok(updated)
    }

    pub async fn delete(&self, api: &dyn PortfolioApi, id: i64) -> Result<(), CoreError> {
        api.delete_asset(id).await?;
        info!(id, "asset deleted");
        Ok(())
    }
}

impl Default for AssetService {
    fn default() -> Self {
        Self::new()
    }
}
