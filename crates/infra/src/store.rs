use std::collections::HashMap;
use std::sync::Arc;

use plansub_domain::DomainResult;
use plansub_domain::ports::BoxFuture;
use plansub_domain::ports::store::{ContractStore, RateStore, RawContract, RawRate};
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryPackageStore {
    contracts: Arc<RwLock<HashMap<String, RawContract>>>,
    rates: Arc<RwLock<HashMap<String, RawRate>>>,
}

impl InMemoryPackageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_contract(&self, contract: RawContract) {
        self.contracts
            .write()
            .await
            .insert(contract.id.clone(), contract);
    }

    pub async fn put_rate(&self, rate: RawRate) {
        self.rates.write().await.insert(rate.id.clone(), rate);
    }
}

impl ContractStore for InMemoryPackageStore {
    fn find_contract(
        &self,
        contract_id: &str,
    ) -> BoxFuture<'_, DomainResult<Option<RawContract>>> {
        let contract_id = contract_id.to_string();
        let contracts = self.contracts.clone();
        Box::pin(async move { Ok(contracts.read().await.get(&contract_id).cloned()) })
    }

    fn list_contracts(&self) -> BoxFuture<'_, DomainResult<Vec<RawContract>>> {
        let contracts = self.contracts.clone();
        Box::pin(async move {
            let mut rows: Vec<_> = contracts.read().await.values().cloned().collect();
            rows.sort_by(|left, right| {
                left.state_code
                    .cmp(&right.state_code)
                    .then_with(|| left.state_number.cmp(&right.state_number))
            });
            Ok(rows)
        })
    }

    fn list_contracts_by_state(
        &self,
        state_code: &str,
    ) -> BoxFuture<'_, DomainResult<Vec<RawContract>>> {
        let state_code = state_code.to_string();
        let contracts = self.contracts.clone();
        Box::pin(async move {
            let mut rows: Vec<_> = contracts
                .read()
                .await
                .values()
                .filter(|contract| contract.state_code == state_code)
                .cloned()
                .collect();
            rows.sort_by(|left, right| left.state_number.cmp(&right.state_number));
            Ok(rows)
        })
    }
}

impl RateStore for InMemoryPackageStore {
    fn find_rate(&self, rate_id: &str) -> BoxFuture<'_, DomainResult<Option<RawRate>>> {
        let rate_id = rate_id.to_string();
        let rates = self.rates.clone();
        Box::pin(async move { Ok(rates.read().await.get(&rate_id).cloned()) })
    }

    fn list_rates_by_state(&self, state_code: &str) -> BoxFuture<'_, DomainResult<Vec<RawRate>>> {
        let state_code = state_code.to_string();
        let rates = self.rates.clone();
        Box::pin(async move {
            let mut rows: Vec<_> = rates
                .read()
                .await
                .values()
                .filter(|rate| rate.state_code == state_code)
                .cloned()
                .collect();
            rows.sort_by(|left, right| left.state_number.cmp(&right.state_number));
            Ok(rows)
        })
    }
}
