//! Lifecycle of a managed object
//!
//! `ManagedObject` drives a [`ResourceHandler`] through the four
//! caller-visible states. Transitions happen only through create, read,
//! update and delete; there is no background reconciliation.

use std::fmt;

use crate::provider::{ProviderError, ProviderResult, ResourceHandler};
use crate::resource::ResourceData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStatus {
    Absent,
    PresentClean,
    /// Written upstream but computed attributes not yet refreshed
    PresentStale,
    /// A delete failed; the identifier is kept so it can be retried
    AbsentPendingRetry,
}

impl fmt::Display for ObjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectStatus::Absent => "absent",
            ObjectStatus::PresentClean => "present",
            ObjectStatus::PresentStale => "present (pending read)",
            ObjectStatus::AbsentPendingRetry => "pending delete retry",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct ManagedObject {
    data: ResourceData,
    status: ObjectStatus,
}

impl ManagedObject {
    /// Object that does not exist yet
    pub fn new(data: ResourceData) -> Self {
        let mut data = data;
        data.clear_id();
        Self {
            data,
            status: ObjectStatus::Absent,
        }
    }

    /// Object known only by its identifier, to be read before use
    pub fn existing(data: ResourceData) -> Self {
        let status = if data.id().is_some() {
            ObjectStatus::PresentStale
        } else {
            ObjectStatus::Absent
        };
        Self { data, status }
    }

    pub fn status(&self) -> ObjectStatus {
        self.status
    }

    pub fn data(&self) -> &ResourceData {
        &self.data
    }

    pub fn into_data(self) -> ResourceData {
        self.data
    }

    fn require(&self, operation: &str, allowed: &[ObjectStatus]) -> ProviderResult<()> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(ProviderError::InvalidState {
                operation: operation.to_string(),
                status: self.status.to_string(),
            })
        }
    }

    /// Create, then read back computed attributes
    ///
    /// A failed write leaves the object absent with no identifier. When the
    /// write succeeded but the read-back failed the identifier is kept and
    /// the object stays pending read, since it exists upstream.
    pub async fn create<M: Sync>(&mut self, handler: &dyn ResourceHandler<M>, meta: &M) -> ProviderResult<()> {
        self.require("create", &[ObjectStatus::Absent])?;
        let snapshot = self.data.clone();
        if let Err(e) = handler.create(meta, &mut self.data).await {
            self.data = snapshot;
            self.data.clear_id();
            return Err(e);
        }
        if self.data.id().is_none() {
            self.data = snapshot;
            return Err(ProviderError::StateSet {
                field: "id".to_string(),
                message: format!("{} create did not assign an identifier", handler.name()),
            });
        }
        log::info!("{}: created '{}'", handler.name(), self.data.id().unwrap_or_default());
        self.status = ObjectStatus::PresentStale;
        self.refresh(handler, meta).await
    }

    pub async fn read<M: Sync>(&mut self, handler: &dyn ResourceHandler<M>, meta: &M) -> ProviderResult<()> {
        self.require(
            "read",
            &[
                ObjectStatus::PresentClean,
                ObjectStatus::PresentStale,
                ObjectStatus::AbsentPendingRetry,
            ],
        )?;
        self.refresh(handler, meta).await
    }

    /// Full overwrite, then read back
    ///
    /// A failed write leaves the last-known-good attributes untouched.
    pub async fn update<M: Sync>(&mut self, handler: &dyn ResourceHandler<M>, meta: &M) -> ProviderResult<()> {
        self.require("update", &[ObjectStatus::PresentClean, ObjectStatus::PresentStale])?;
        let snapshot = self.data.clone();
        if let Err(e) = handler.update(meta, &mut self.data).await {
            self.data = snapshot;
            return Err(e);
        }
        self.status = ObjectStatus::PresentStale;
        self.refresh(handler, meta).await
    }

    /// Replace the caller attributes before an update
    pub fn set_desired(&mut self, data: ResourceData) {
        let id = self.data.id().map(str::to_string);
        self.data = data;
        match id {
            Some(id) => self.data.set_id(id),
            None => self.data.clear_id(),
        }
    }

    /// Delete; the identifier is cleared only when the upstream call succeeds
    ///
    /// Errors raised before any upstream call leave the status unchanged,
    /// since nothing was attempted that a retry could complete.
    pub async fn delete<M: Sync>(&mut self, handler: &dyn ResourceHandler<M>, meta: &M) -> ProviderResult<()> {
        self.require(
            "delete",
            &[
                ObjectStatus::PresentClean,
                ObjectStatus::PresentStale,
                ObjectStatus::AbsentPendingRetry,
            ],
        )?;
        match handler.delete(meta, &mut self.data).await {
            Ok(()) => {
                log::info!("{}: deleted '{}'", handler.name(), self.data.id().unwrap_or_default());
                self.data.clear_id();
                self.status = ObjectStatus::Absent;
                Ok(())
            }
            Err(e) if e.is_local() => Err(e),
            Err(e) => {
                self.status = ObjectStatus::AbsentPendingRetry;
                Err(e)
            }
        }
    }

    async fn refresh<M: Sync>(&mut self, handler: &dyn ResourceHandler<M>, meta: &M) -> ProviderResult<()> {
        let snapshot = self.data.clone();
        match handler.read(meta, &mut self.data).await {
            Ok(()) => {
                self.status = ObjectStatus::PresentClean;
                Ok(())
            }
            Err(e) => {
                self.data = snapshot;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::provider::ResourceType;
    use crate::schema::{AttributeSchema, AttributeType, ResourceSchema};

    /// Handler whose upstream calls fail on demand
    #[derive(Default)]
    struct Scripted {
        fail: Mutex<Vec<&'static str>>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl Scripted {
        fn failing(ops: &[&'static str]) -> Self {
            Self {
                fail: Mutex::new(ops.to_vec()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call(&self, op: &'static str) -> ProviderResult<()> {
            self.calls.lock().unwrap().push(op);
            if self.fail.lock().unwrap().contains(&op) {
                Err(ProviderError::upstream("thing", op, "rejected"))
            } else {
                Ok(())
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl ResourceType for Scripted {
        fn name(&self) -> &'static str {
            "thing"
        }

        fn schema(&self) -> ResourceSchema {
            ResourceSchema::new("thing")
                .attribute(AttributeSchema::new("name", AttributeType::String).required())
                .attribute(AttributeSchema::new("revision", AttributeType::Int).computed())
        }
    }

    #[async_trait]
    impl ResourceHandler<()> for Scripted {
        async fn create(&self, _meta: &(), data: &mut ResourceData) -> ProviderResult<()> {
            data.set_id("1");
            self.call("create")
        }

        async fn read(&self, _meta: &(), data: &mut ResourceData) -> ProviderResult<()> {
            data.set("revision", 2_i64)?;
            self.call("read")
        }

        async fn update(&self, _meta: &(), data: &mut ResourceData) -> ProviderResult<()> {
            data.set("name", "written")?;
            self.call("update")
        }

        async fn delete(&self, _meta: &(), data: &mut ResourceData) -> ProviderResult<()> {
            if data.require_id()? == "bad" {
                return Err(ProviderError::configuration("id", "unusable"));
            }
            self.call("delete")
        }
    }

    fn object(handler: &Scripted) -> ManagedObject {
        ManagedObject::new(ResourceData::new(&handler.schema()).with_attribute("name", "a"))
    }

    #[tokio::test]
    async fn create_reads_back_and_becomes_clean() {
        let handler = Scripted::default();
        let mut obj = object(&handler);
        obj.create(&handler, &()).await.unwrap();
        assert_eq!(obj.status(), ObjectStatus::PresentClean);
        assert_eq!(obj.data().id(), Some("1"));
        assert_eq!(obj.data().required_int("revision").unwrap(), 2);
        assert_eq!(handler.calls(), vec!["create", "read"]);
    }

    #[tokio::test]
    async fn failed_create_persists_no_identifier() {
        let handler = Scripted::failing(&["create"]);
        let mut obj = object(&handler);
        assert!(obj.create(&handler, &()).await.is_err());
        assert_eq!(obj.status(), ObjectStatus::Absent);
        assert_eq!(obj.data().id(), None);
        assert_eq!(handler.calls(), vec!["create"]);
    }

    #[tokio::test]
    async fn failed_read_after_create_keeps_identifier_pending_read() {
        let handler = Scripted::failing(&["read"]);
        let mut obj = object(&handler);
        assert!(obj.create(&handler, &()).await.is_err());
        assert_eq!(obj.status(), ObjectStatus::PresentStale);
        assert_eq!(obj.data().id(), Some("1"));
    }

    #[tokio::test]
    async fn failed_update_keeps_last_known_good() {
        let handler = Scripted::failing(&["update"]);
        let mut obj = object(&handler);
        obj.create(&handler, &()).await.unwrap();
        let before = obj.data().clone();

        assert!(obj.update(&handler, &()).await.is_err());
        assert_eq!(obj.data(), &before);
        assert_eq!(obj.status(), ObjectStatus::PresentClean);
    }

    #[tokio::test]
    async fn failed_delete_keeps_identifier_for_retry() {
        let handler = Scripted::failing(&["delete"]);
        let mut obj = object(&handler);
        obj.create(&handler, &()).await.unwrap();

        assert!(obj.delete(&handler, &()).await.is_err());
        assert_eq!(obj.status(), ObjectStatus::AbsentPendingRetry);
        assert_eq!(obj.data().id(), Some("1"));

        handler.fail.lock().unwrap().clear();
        obj.delete(&handler, &()).await.unwrap();
        assert_eq!(obj.status(), ObjectStatus::Absent);
        assert_eq!(obj.data().id(), None);
    }

    #[tokio::test]
    async fn local_delete_error_keeps_status() {
        let handler = Scripted::default();
        let mut obj = ManagedObject::existing(ResourceData::new(&handler.schema()).with_id("bad"));

        let err = obj.delete(&handler, &()).await.unwrap_err();
        assert!(err.is_local());
        assert_eq!(obj.status(), ObjectStatus::PresentStale);
        assert_eq!(obj.data().id(), Some("bad"));
        assert!(handler.calls().is_empty());
    }

    #[tokio::test]
    async fn operations_are_refused_from_wrong_state() {
        let handler = Scripted::default();
        let mut obj = object(&handler);
        assert!(matches!(
            obj.read(&handler, &()).await,
            Err(ProviderError::InvalidState { .. })
        ));
        assert!(matches!(
            obj.delete(&handler, &()).await,
            Err(ProviderError::InvalidState { .. })
        ));
        assert!(handler.calls().is_empty());
    }

    #[test]
    fn existing_object_starts_pending_read() {
        let handler = Scripted::default();
        let obj = ManagedObject::existing(ResourceData::new(&handler.schema()).with_id("1"));
        assert_eq!(obj.status(), ObjectStatus::PresentStale);
    }
}
