//! Lost-and-found workflow module.
//!
//! # Resources
//!
//! - **User** — account with a Finder/Claimant/Admin role
//! - **Item** — found-item report, pending until moderated, then cataloged
//! - **Claim** — claimant's ownership assertion against a cataloged item
//! - **Session** — the single active login
//!
//! All state lives in five keys of a [`lostfound_kv::KVStore`]; every
//! operation is a full read-modify-write of the collection it touches.
//!
//! # Usage
//!
//! ```ignore
//! use lostfound::LostFoundModule;
//!
//! let module = LostFoundModule::new(service);
//! let router = module.routes(); // Mount under /lostfound
//! ```

pub mod api;
pub mod model;
pub mod service;

use std::sync::Arc;

use axum::Router;

use lostfound_core::Module;

use crate::service::LostFoundService;

/// Lost-and-found module implementing the Module trait.
pub struct LostFoundModule {
    service: Arc<LostFoundService>,
}

impl LostFoundModule {
    pub fn new(service: LostFoundService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Get a reference to the underlying service.
    pub fn service(&self) -> &Arc<LostFoundService> {
        &self.service
    }
}

impl Module for LostFoundModule {
    fn name(&self) -> &str {
        "lostfound"
    }

    fn routes(&self) -> Router {
        api::build_router(self.service.clone())
    }
}
