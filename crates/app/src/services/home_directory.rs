//! Home directory: lazily fetched, shared list of homes.
//!
//! The home list is fetched from the client on first use and reused for the
//! lifetime of the directory. Commands never invalidate it. Share one
//! directory between every switch through an `Arc`.
//!
//! The lock is not held across the fetch: two concurrent first uses may both
//! fetch, and the first stored result wins.

use std::sync::Arc;

use tokio::sync::RwLock;

use vsmart_domain::error::{ApiError, VsmartError};
use vsmart_domain::home::{Home, HomeResolution, resolve_home};
use vsmart_domain::id::{DeviceId, HomeId};

use crate::ports::VaillantClient;

/// Cache of the account's homes.
#[derive(Debug, Default)]
pub struct HomeDirectory {
    homes: RwLock<Option<Arc<[Home]>>>,
}

impl HomeDirectory {
    /// Create an empty directory; the first lookup fetches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory pre-filled with `homes`.
    #[must_use]
    pub fn with_homes(homes: Vec<Home>) -> Self {
        let homes = (!homes.is_empty()).then(|| Arc::from(homes));
        Self {
            homes: RwLock::new(homes),
        }
    }

    /// The cached homes, if any were fetched.
    pub async fn cached(&self) -> Option<Arc<[Home]>> {
        self.homes.read().await.clone()
    }

    /// Return the cached homes, fetching them first if the cache is empty.
    ///
    /// An empty answer from the API is returned but not cached.
    ///
    /// # Errors
    ///
    /// Returns the client's [`ApiError`] when the fetch fails.
    pub async fn homes<C: VaillantClient>(&self, client: &C) -> Result<Arc<[Home]>, ApiError> {
        if let Some(homes) = self.cached().await {
            return Ok(homes);
        }

        tracing::debug!("fetching vSMART home data");
        let fetched: Arc<[Home]> = Arc::from(client.get_home_data().await?);
        if fetched.is_empty() {
            tracing::warn!("vSMART home data is empty");
            return Ok(fetched);
        }

        let mut guard = self.homes.write().await;
        Ok(Arc::clone(guard.get_or_insert(fetched)))
    }

    /// Resolve the home a device belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`VsmartError::Api`] when the home list cannot be fetched and
    /// [`VsmartError::HomeNotFound`] when no home matches the device.
    #[tracing::instrument(skip(self, client, device_id), fields(device_id = %device_id))]
    pub async fn resolve<C: VaillantClient>(
        &self,
        client: &C,
        device_id: &DeviceId,
    ) -> Result<HomeId, VsmartError> {
        let homes = self.homes(client).await?;
        match resolve_home(&homes, device_id) {
            HomeResolution::Found(home_id) => {
                tracing::debug!(%home_id, "resolved home");
                Ok(home_id)
            }
            HomeResolution::NotFound => Err(VsmartError::HomeNotFound {
                device_id: device_id.clone(),
            }),
        }
    }

    /// Forget the cached homes so the next lookup fetches again.
    pub async fn reset(&self) {
        self.homes.write().await.take();
    }
}
