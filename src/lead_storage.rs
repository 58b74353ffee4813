use crate::db::Database;
use crate::errors::StorageError;
use crate::models::{Lead, NewLead};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Write-once store for leads.
///
/// Implementations must enforce uniqueness of the normalized email
/// atomically and report a second insert as [`StorageError::Duplicate`].
/// Leads are never updated or deleted.
#[async_trait]
pub trait LeadRepository: Send + Sync {
    async fn insert(&self, lead: &NewLead) -> Result<Lead, StorageError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Lead>, StorageError>;

    async fn count(&self) -> Result<i64, StorageError>;
}

/// Postgres-backed lead store.
pub struct PgLeadStore {
    db: Arc<Database>,
}

impl PgLeadStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeadRepository for PgLeadStore {
    async fn insert(&self, lead: &NewLead) -> Result<Lead, StorageError> {
        let pool = self.db.pool().await?;

        let stored = sqlx::query_as::<_, Lead>(
            "INSERT INTO leads (id, email, ip_address, created_at) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, email, ip_address, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(&lead.email)
        .bind(&lead.ip_address)
        .bind(Utc::now())
        .fetch_one(pool)
        .await
        .map_err(|e| match StorageError::from(e) {
            StorageError::Duplicate(_) => StorageError::Duplicate(lead.email.clone()),
            other => other,
        })?;

        tracing::debug!("Inserted lead {} ({})", stored.id, stored.email);
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Lead>, StorageError> {
        let pool = self.db.pool().await?;

        let lead = sqlx::query_as::<_, Lead>(
            "SELECT id, email, ip_address, created_at FROM leads WHERE lower(email) = lower($1)",
        )
        .bind(email.trim())
        .fetch_optional(pool)
        .await?;

        Ok(lead)
    }

    async fn count(&self) -> Result<i64, StorageError> {
        let pool = self.db.pool().await?;
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM leads")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}

/// In-process lead store keyed by normalized email.
///
/// The uniqueness check and the insert happen under one lock.
#[derive(Default, Clone)]
pub struct MemoryLeadStore {
    leads: Arc<Mutex<HashMap<String, Lead>>>,
}

impl MemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored leads, oldest first.
    pub fn snapshot(&self) -> Vec<Lead> {
        let mut leads: Vec<Lead> = match self.leads.lock() {
            Ok(guard) => guard.values().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().values().cloned().collect(),
        };
        leads.sort_by_key(|l| l.created_at);
        leads
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Lead>>, StorageError> {
        self.leads
            .lock()
            .map_err(|_| StorageError::Unavailable("lead store lock poisoned".to_string()))
    }
}

#[async_trait]
impl LeadRepository for MemoryLeadStore {
    async fn insert(&self, lead: &NewLead) -> Result<Lead, StorageError> {
        let key = lead.email.trim().to_lowercase();
        let mut leads = self.lock()?;

        if leads.contains_key(&key) {
            return Err(StorageError::Duplicate(key));
        }

        let stored = Lead {
            id: Uuid::new_v4(),
            email: key.clone(),
            ip_address: lead.ip_address.clone(),
            created_at: Utc::now(),
        };
        leads.insert(key, stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Lead>, StorageError> {
        let key = email.trim().to_lowercase();
        Ok(self.lock()?.get(&key).cloned())
    }

    async fn count(&self) -> Result<i64, StorageError> {
        Ok(self.lock()?.len() as i64)
    }
}
