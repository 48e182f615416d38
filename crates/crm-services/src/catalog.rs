//! Quotation catalog services
//!
//! Catalog edits are written through to durable storage by the store; a
//! storage failure comes back as a failed result with the catalog unchanged.

use crm_contracts::base::{ActorContext, Contract};
use crm_contracts::catalog::ModuleContract;
use crm_core::traits::generate_id;
use crm_core::types::Amount;
use crm_models::{ModulePatch, QuotationModule};
use crm_store::AppStore;

use crate::base::{check, ServiceContext};
use crate::result::ServiceResult;

pub struct CatalogService<'a, A: ActorContext> {
    ctx: ServiceContext<'a, A>,
}

impl<'a, A: ActorContext> CatalogService<'a, A> {
    pub fn new(ctx: ServiceContext<'a, A>) -> Self {
        Self { ctx }
    }

    pub fn add_module(
        &self,
        store: &mut AppStore,
        name: &str,
        description: &str,
        price: Amount,
    ) -> ServiceResult<QuotationModule> {
        let module = QuotationModule::new(generate_id("mod"), name.trim(), description.trim(), price);
        if let Err(failure) = check(&ModuleContract::new(self.ctx.actor), &module) {
            return failure;
        }
        store.add_module(module.clone()).map(|()| module).into()
    }

    /// The updated entry, `None` when the id is not in the catalog
    pub fn update_module(
        &self,
        store: &mut AppStore,
        id: &str,
        patch: &ModulePatch,
    ) -> ServiceResult<Option<QuotationModule>> {
        let contract = ModuleContract::new(self.ctx.actor);
        let Some(current) = store.snapshot().find_module(id) else {
            return match contract.validate_removal() {
                Ok(()) => ServiceResult::success(None),
                Err(errors) => ServiceResult::forbidden(errors.base_errors.join(", ")),
            };
        };

        let mut merged = current.clone();
        merged.apply(patch);
        if let Err(failure) = check(&contract, &merged) {
            return failure;
        }

        match store.update_module(id, patch) {
            Ok(true) => ServiceResult::success(Some(merged)),
            Ok(false) => ServiceResult::success(None),
            Err(err) => ServiceResult::from_error(err),
        }
    }

    pub fn delete_module(&self, store: &mut AppStore, id: &str) -> ServiceResult<bool> {
        if let Err(errors) = ModuleContract::new(self.ctx.actor).validate_removal() {
            return ServiceResult::forbidden(errors.base_errors.join(", "));
        }
        store.delete_module(id).into()
    }
}
