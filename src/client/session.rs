//! Async driver for [`ClientState`].
//!
//! Each operation applies its `*Requested` event, performs the HTTP call, then applies
//! the matching succeeded/failed event. The state lock is never held across a network
//! await, so operations may overlap; the single-flight guard in [`ClientState`] is what
//! rejects a duplicate submission.

use crate::client::api::{ClientError, ProductApi};
use crate::client::field::FieldEdit;
use crate::client::state::{ClientState, Event, Rejection};
use crate::domain::product::{Product, ProductId};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error(transparent)]
    Request(#[from] ClientError),
}

pub struct ProductSession {
    api: ProductApi,
    state: Mutex<ClientState>,
}

impl ProductSession {
    pub fn new(api: ProductApi) -> Self {
        Self {
            api,
            state: Mutex::new(ClientState::new()),
        }
    }

    pub async fn snapshot(&self) -> ClientState {
        self.state.lock().await.clone()
    }

    async fn transition(&self, event: Event) -> Result<ClientState, Rejection> {
        let mut state = self.state.lock().await;
        let next = state.apply(event)?;
        *state = next.clone();
        Ok(next)
    }

    /// Fetches every product and replaces the local list.
    pub async fn load(&self) -> Result<(), SessionError> {
        self.transition(Event::FetchRequested).await?;
        match self.api.list().await {
            Ok(products) => {
                info!(count = products.len(), "products loaded");
                self.transition(Event::Fetched(products)).await?;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "loading products failed");
                self.transition(Event::FetchFailed(e.to_string())).await?;
                Err(e.into())
            }
        }
    }

    pub async fn change_draft(&self, edit: FieldEdit) -> Result<(), SessionError> {
        self.transition(Event::DraftFieldChanged(edit)).await?;
        Ok(())
    }

    /// Submits the draft. An incomplete draft is rejected without contacting the server.
    pub async fn submit_draft(&self) -> Result<Product, SessionError> {
        let requested = self.transition(Event::CreateRequested).await?;
        match self.api.create(requested.draft()).await {
            Ok(product) => {
                self.transition(Event::CreateSucceeded(product.clone())).await?;
                Ok(product)
            }
            Err(e) => {
                warn!(error = %e, "create failed");
                self.transition(Event::CreateFailed(e.to_string())).await?;
                Err(e.into())
            }
        }
    }

    pub async fn start_editing(&self, product: Product) -> Result<(), SessionError> {
        self.transition(Event::EditStarted(product)).await?;
        Ok(())
    }

    pub async fn change_editing(&self, edit: FieldEdit) -> Result<(), SessionError> {
        self.transition(Event::EditFieldChanged(edit)).await?;
        Ok(())
    }

    pub async fn cancel_editing(&self) -> Result<(), SessionError> {
        self.transition(Event::EditCancelled).await?;
        Ok(())
    }

    /// Submits the whole editing copy as an update.
    pub async fn save(&self) -> Result<Product, SessionError> {
        let requested = self.transition(Event::SaveRequested).await?;
        let editing = requested.editing().cloned().ok_or(Rejection::NotEditing)?;
        match self.api.update(&editing).await {
            Ok(product) => {
                self.transition(Event::SaveSucceeded(product.clone())).await?;
                Ok(product)
            }
            Err(e) => {
                warn!(error = %e, product_id = %editing.id, "save failed");
                self.transition(Event::SaveFailed {
                    id: editing.id,
                    detail: e.to_string(),
                })
                .await?;
                Err(e.into())
            }
        }
    }

    pub async fn delete(&self, id: &ProductId) -> Result<(), SessionError> {
        self.transition(Event::DeleteRequested(id.clone())).await?;
        match self.api.delete(id).await {
            Ok(()) => {
                self.transition(Event::DeleteSucceeded(id.clone())).await?;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, product_id = %id, "delete failed");
                self.transition(Event::DeleteFailed {
                    id: id.clone(),
                    detail: e.to_string(),
                })
                .await?;
                Err(e.into())
            }
        }
    }
}
