//! The registry state machine.
//!
//! One lock guards the whole registry state, so every operation runs
//! to completion without interleaving and callers never observe a
//! partially applied registration, transfer, or renewal. Callers are
//! already authenticated; `caller` is trusted to be the invoking
//! principal. Time is an explicit parameter on every operation that
//! consults it.

use crate::config::RegistryConfig;
use crate::errors::*;
use crate::events::{EventSink, TracingEventSink};
use crate::settlement::SettlementGateway;
use namereg_storage::RegistryStore;
use namereg_types::{
    Amount, DomainName, DomainRecord, OwnerId, RegistryEvent, RegistryMeta, Timestamp,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Name registry: record table plus owner index, kept consistent
/// under a single lock.
pub struct DomainRegistry {
    admin: OwnerId,
    registration_period: u64,
    state: RwLock<RegistryState>,
    store: Option<Arc<dyn RegistryStore>>,
    events: Arc<dyn EventSink>,
}

struct RegistryState {
    /// Primary table, one record per name, never shrinks.
    records: HashMap<DomainName, DomainRecord>,
    /// Owner identity -> names currently attributed to them.
    /// Removal is swap-and-pop, so positions are not stable.
    owner_index: HashMap<OwnerId, Vec<DomainName>>,
    fee: Amount,
    balance: Amount,
}

impl DomainRegistry {
    /// In-memory registry with default configuration and log-only
    /// event sink.
    pub fn new(admin: OwnerId) -> Self {
        Self::in_memory(admin, RegistryConfig::default(), Arc::new(TracingEventSink))
    }

    /// In-memory registry with explicit configuration and sink.
    pub fn in_memory(admin: OwnerId, config: RegistryConfig, events: Arc<dyn EventSink>) -> Self {
        Self {
            admin,
            registration_period: config.registration_period_secs,
            state: RwLock::new(RegistryState {
                records: HashMap::new(),
                owner_index: HashMap::new(),
                fee: config.registration_fee,
                balance: 0,
            }),
            store: None,
            events,
        }
    }

    /// Open a persistent registry. On a fresh store the given admin
    /// and config are written down; otherwise the persisted admin,
    /// fee, and balance win and the record table is reloaded, with
    /// the owner index rebuilt from record ownership.
    pub fn open(
        admin: OwnerId,
        config: RegistryConfig,
        events: Arc<dyn EventSink>,
        store: Arc<dyn RegistryStore>,
    ) -> Result<Self> {
        let meta = match store.load_meta()? {
            Some(meta) => meta,
            None => {
                let meta = RegistryMeta {
                    admin,
                    fee: config.registration_fee,
                    balance: 0,
                };
                store.put_meta(&meta)?;
                meta
            }
        };

        let mut records = HashMap::new();
        let mut owner_index: HashMap<OwnerId, Vec<DomainName>> = HashMap::new();
        for (name, record) in store.load_records()? {
            if record.ever_registered() {
                owner_index.entry(record.owner).or_default().push(name.clone());
            }
            records.insert(name, record);
        }
        tracing::info!(
            records = records.len(),
            owners = owner_index.len(),
            admin = %meta.admin,
            "registry state restored"
        );

        Ok(Self {
            admin: meta.admin,
            registration_period: config.registration_period_secs,
            state: RwLock::new(RegistryState {
                records,
                owner_index,
                fee: meta.fee,
                balance: meta.balance,
            }),
            store: Some(store),
            events,
        })
    }

    /// The registry admin identity.
    pub fn admin(&self) -> OwnerId {
        self.admin
    }

    /// Current registration/renewal fee.
    pub fn registration_fee(&self) -> Amount {
        self.state.read().fee
    }

    /// Accumulated fees not yet withdrawn.
    pub fn balance(&self) -> Amount {
        self.state.read().balance
    }

    /// Register `name` to `caller`. Succeeds on never-registered,
    /// expired, and deactivated names; an expired or deactivated
    /// name is first evicted from its previous owner's index.
    pub fn register_domain(
        &self,
        caller: OwnerId,
        name: DomainName,
        endpoint: &str,
        paid: Amount,
        now: Timestamp,
    ) -> Result<()> {
        let mut state = self.state.write();
        if paid < state.fee {
            return Err(RegistryError::InsufficientFee {
                required: state.fee,
                paid,
            });
        }
        if !name.is_valid() {
            return Err(RegistryError::EmptyName);
        }
        if endpoint.is_empty() {
            return Err(RegistryError::EmptyEndpoint { name });
        }

        let previous_owner = match state.records.get(&name) {
            Some(record) if !record.is_available(now) => {
                return Err(RegistryError::AlreadyRegistered { name });
            }
            Some(record) => Some(record.owner),
            None => None,
        };

        let record = DomainRecord {
            owner: caller,
            endpoint: endpoint.to_string(),
            expires_at: now.saturating_add(self.registration_period),
            active: true,
        };
        let new_balance = state.balance.saturating_add(paid);
        self.persist_record_and_meta(&name, &record, state.fee, new_balance)?;

        if let Some(previous) = previous_owner {
            remove_from_index(&mut state.owner_index, &previous, &name);
        }
        state.records.insert(name.clone(), record.clone());
        state.owner_index.entry(caller).or_default().push(name.clone());
        state.balance = new_balance;

        self.events.record(&RegistryEvent::DomainRegistered {
            name,
            owner: caller,
            endpoint: record.endpoint,
        });
        Ok(())
    }

    /// Replace the endpoint of a live domain owned by `caller`.
    pub fn update_domain(
        &self,
        caller: OwnerId,
        name: DomainName,
        new_endpoint: &str,
        now: Timestamp,
    ) -> Result<()> {
        let mut state = self.state.write();
        let mut record = owned_record(&state, &name, caller, now)?;
        if new_endpoint.is_empty() {
            return Err(RegistryError::EmptyEndpoint { name });
        }

        record.endpoint = new_endpoint.to_string();
        self.persist_record(&name, &record)?;
        state.records.insert(name.clone(), record);

        self.events.record(&RegistryEvent::DomainUpdated {
            name,
            new_endpoint: new_endpoint.to_string(),
        });
        Ok(())
    }

    /// Resolve a live domain to its endpoint. Absent and deactivated
    /// names share one error; an active-but-expired name reports
    /// expiry instead.
    pub fn resolve_domain(&self, name: &DomainName, now: Timestamp) -> Result<String> {
        let state = self.state.read();
        match state.records.get(name) {
            None => Err(RegistryError::NotFound { name: name.clone() }),
            Some(record) if !record.active => Err(RegistryError::NotFound { name: name.clone() }),
            Some(record) if record.is_expired(now) => {
                Err(RegistryError::Expired { name: name.clone() })
            }
            Some(record) => Ok(record.endpoint.clone()),
        }
    }

    /// Hand a live domain over to `new_owner`, splicing the owner
    /// index on both sides.
    pub fn transfer_domain(
        &self,
        caller: OwnerId,
        name: DomainName,
        new_owner: OwnerId,
        now: Timestamp,
    ) -> Result<()> {
        let mut state = self.state.write();
        let mut record = owned_record(&state, &name, caller, now)?;
        if new_owner.is_zero() {
            return Err(RegistryError::InvalidNewOwner { name });
        }
        if new_owner == caller {
            return Err(RegistryError::SelfTransfer { name });
        }

        record.owner = new_owner;
        self.persist_record(&name, &record)?;
        state.records.insert(name.clone(), record);
        remove_from_index(&mut state.owner_index, &caller, &name);
        state.owner_index.entry(new_owner).or_default().push(name.clone());

        self.events.record(&RegistryEvent::DomainTransferred {
            name,
            old_owner: caller,
            new_owner,
        });
        Ok(())
    }

    /// Extend a live domain by one registration period, counted from
    /// the current expiry rather than from `now`.
    pub fn renew_domain(
        &self,
        caller: OwnerId,
        name: DomainName,
        paid: Amount,
        now: Timestamp,
    ) -> Result<()> {
        let mut state = self.state.write();
        let mut record = owned_record(&state, &name, caller, now)?;
        if paid < state.fee {
            return Err(RegistryError::InsufficientFee {
                required: state.fee,
                paid,
            });
        }

        record.expires_at = record.expires_at.saturating_add(self.registration_period);
        let new_balance = state.balance.saturating_add(paid);
        self.persist_record_and_meta(&name, &record, state.fee, new_balance)?;
        let new_expires_at = record.expires_at;
        state.records.insert(name.clone(), record);
        state.balance = new_balance;

        self.events.record(&RegistryEvent::DomainRenewed {
            name,
            new_expires_at,
        });
        Ok(())
    }

    /// Retire a live domain. Only the active flag changes: ownership,
    /// expiry, and the owner-index entry are all retained, so the
    /// name shows up in its owner's list until someone re-registers
    /// it, even though it is already available.
    pub fn deactivate_domain(
        &self,
        caller: OwnerId,
        name: DomainName,
        now: Timestamp,
    ) -> Result<()> {
        let mut state = self.state.write();
        let mut record = owned_record(&state, &name, caller, now)?;

        record.active = false;
        self.persist_record(&name, &record)?;
        state.records.insert(name.clone(), record);

        self.events
            .record(&RegistryEvent::DomainDeactivated { name });
        Ok(())
    }

    /// Whether `name` may be freshly registered right now. Unknown
    /// names (including malformed ones) are available.
    pub fn is_domain_available(&self, name: &DomainName, now: Timestamp) -> bool {
        let state = self.state.read();
        state
            .records
            .get(name)
            .map(|record| record.is_available(now))
            .unwrap_or(true)
    }

    /// Availability for each input name, in input order, under one
    /// consistent snapshot of the table.
    pub fn batch_check_availability(&self, names: &[DomainName], now: Timestamp) -> Vec<bool> {
        let state = self.state.read();
        names
            .iter()
            .map(|name| {
                state
                    .records
                    .get(name)
                    .map(|record| record.is_available(now))
                    .unwrap_or(true)
            })
            .collect()
    }

    /// Full record for `name`; the zero record if never registered.
    pub fn get_domain_info(&self, name: &DomainName) -> DomainRecord {
        let state = self.state.read();
        state.records.get(name).cloned().unwrap_or_default()
    }

    /// Names currently attributed to `owner`. Order is not stable
    /// across mutations.
    pub fn get_domains_by_owner(&self, owner: &OwnerId) -> Vec<DomainName> {
        let state = self.state.read();
        state.owner_index.get(owner).cloned().unwrap_or_default()
    }

    /// Admin-only: replace the registration fee. No bounds; zero is
    /// legal.
    pub fn set_registration_fee(&self, caller: OwnerId, new_fee: Amount) -> Result<()> {
        if caller != self.admin {
            return Err(RegistryError::NotAdmin);
        }
        let mut state = self.state.write();
        self.persist_meta(new_fee, state.balance)?;
        state.fee = new_fee;
        tracing::info!(new_fee, "registration fee updated");
        Ok(())
    }

    /// Admin-only: drain the accumulated balance through the
    /// settlement gateway. The drain is a reservation until the
    /// gateway confirms; on payout failure the reservation is rolled
    /// back and the gateway error surfaced.
    pub async fn withdraw(
        &self,
        caller: OwnerId,
        gateway: &dyn SettlementGateway,
    ) -> Result<Amount> {
        if caller != self.admin {
            return Err(RegistryError::NotAdmin);
        }

        let amount = {
            let mut state = self.state.write();
            if state.balance == 0 {
                return Ok(0);
            }
            let amount = state.balance;
            self.persist_meta(state.fee, 0)?;
            state.balance = 0;
            amount
        };

        if let Err(err) = gateway.pay_out(&self.admin, amount).await {
            let mut state = self.state.write();
            let restored = state.balance.saturating_add(amount);
            self.persist_meta(state.fee, restored)?;
            state.balance = restored;
            tracing::warn!(amount, error = %err, "payout refused, balance restored");
            return Err(RegistryError::Settlement(err));
        }

        tracing::info!(amount, "withdrawal settled");
        Ok(amount)
    }

    fn persist_record(&self, name: &DomainName, record: &DomainRecord) -> Result<()> {
        if let Some(store) = &self.store {
            store.put_record(name, record)?;
        }
        Ok(())
    }

    fn persist_meta(&self, fee: Amount, balance: Amount) -> Result<()> {
        if let Some(store) = &self.store {
            store.put_meta(&RegistryMeta {
                admin: self.admin,
                fee,
                balance,
            })?;
        }
        Ok(())
    }

    /// Fee-charging operations change a record and the balance in one
    /// step; their durable write must be all-or-nothing too.
    fn persist_record_and_meta(
        &self,
        name: &DomainName,
        record: &DomainRecord,
        fee: Amount,
        balance: Amount,
    ) -> Result<()> {
        if let Some(store) = &self.store {
            store.put_record_with_meta(
                name,
                record,
                &RegistryMeta {
                    admin: self.admin,
                    fee,
                    balance,
                },
            )?;
        }
        Ok(())
    }
}

/// Shared ownership guard for update/transfer/renew/deactivate: the
/// caller must own a currently active, unexpired record. A name that
/// was never registered fails the owner check (its owner is zero).
fn owned_record(
    state: &RegistryState,
    name: &DomainName,
    caller: OwnerId,
    now: Timestamp,
) -> Result<DomainRecord> {
    let record = state.records.get(name).cloned().unwrap_or_default();
    if record.owner != caller {
        return Err(RegistryError::NotOwner { name: name.clone() });
    }
    if !record.active {
        return Err(RegistryError::Inactive { name: name.clone() });
    }
    if record.is_expired(now) {
        return Err(RegistryError::Expired { name: name.clone() });
    }
    Ok(record)
}

/// Swap-and-pop removal: O(1), reorders the survivors.
fn remove_from_index(
    index: &mut HashMap<OwnerId, Vec<DomainName>>,
    owner: &OwnerId,
    name: &DomainName,
) {
    if let Some(list) = index.get_mut(owner) {
        if let Some(pos) = list.iter().position(|entry| entry == name) {
            list.swap_remove(pos);
        }
    }
}
