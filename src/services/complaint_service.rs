use std::sync::Arc;

use chrono::Utc;

use crate::api::{complaint_to_dto, ComplaintDto, ComplaintInput};
use crate::database::models::NewComplaint;
use crate::database::{ComplaintStore, DatabaseError, UserStore};
use crate::services::error::{ServiceError, ServiceResult};
use crate::types::ComplaintStatus;

/// Complaint CRUD on top of the complaint and user stores
#[derive(Clone)]
pub struct ComplaintService {
    complaints: Arc<dyn ComplaintStore>,
    users: Arc<dyn UserStore>,
}

impl ComplaintService {
    pub fn new(complaints: Arc<dyn ComplaintStore>, users: Arc<dyn UserStore>) -> Self {
        Self { complaints, users }
    }

    /// Create a complaint owned by `input.user_id`
    ///
    /// Status defaults to `OPEN` when absent. Nothing is written when
    /// validation fails or the owner does not exist.
    pub async fn create(&self, input: ComplaintInput) -> ServiceResult<ComplaintDto> {
        validate_title(&input.title)?;
        let status = parse_status(input.status.as_deref())?.unwrap_or_default();
        let user_id = input.user_id.ok_or(ServiceError::MissingField("userId"))?;

        let owner = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::UserNotFound(user_id))?;

        let saved = self
            .complaints
            .insert(NewComplaint {
                title: input.title,
                description: input.description,
                status: status.as_str().to_string(),
                created_at: Utc::now(),
                user_id: owner.id,
            })
            .await
            .map_err(|e| match e {
                // owner vanished between lookup and insert
                DatabaseError::ForeignKeyViolation(_) => ServiceError::UserNotFound(user_id),
                other => other.into(),
            })?;

        tracing::info!("Created complaint {} for user {}", saved.id, saved.user_id);
        Ok(complaint_to_dto(saved))
    }

    pub async fn list(&self) -> ServiceResult<Vec<ComplaintDto>> {
        let complaints = self.complaints.list().await?;
        Ok(complaints.into_iter().map(complaint_to_dto).collect())
    }

    pub async fn get(&self, id: i64) -> ServiceResult<ComplaintDto> {
        self.complaints
            .find_by_id(id)
            .await?
            .map(complaint_to_dto)
            .ok_or(ServiceError::ComplaintNotFound(id))
    }

    /// Replace title and description, and status when one is supplied
    ///
    /// This is a full overwrite: an absent description clears the stored one.
    /// The owner is never changed.
    pub async fn update(&self, id: i64, input: ComplaintInput) -> ServiceResult<ComplaintDto> {
        let mut complaint = self
            .complaints
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::ComplaintNotFound(id))?;

        validate_title(&input.title)?;
        if let Some(status) = parse_status(input.status.as_deref())? {
            complaint.status = Some(status.as_str().to_string());
        }
        complaint.title = input.title;
        complaint.description = input.description;

        let updated = self.complaints.update(complaint).await.map_err(|e| match e {
            DatabaseError::NotFound(_) => ServiceError::ComplaintNotFound(id),
            other => other.into(),
        })?;

        tracing::info!("Updated complaint {}", id);
        Ok(complaint_to_dto(updated))
    }

    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        if !self.complaints.exists(id).await? {
            return Err(ServiceError::ComplaintNotFound(id));
        }
        if !self.complaints.delete(id).await? {
            return Err(ServiceError::ComplaintNotFound(id));
        }

        tracing::info!("Deleted complaint {}", id);
        Ok(())
    }
}

fn validate_title(title: &str) -> ServiceResult<()> {
    if title.trim().is_empty() {
        return Err(ServiceError::Validation("Title cannot be empty".to_string()));
    }
    Ok(())
}

fn parse_status(raw: Option<&str>) -> ServiceResult<Option<ComplaintStatus>> {
    raw.map(|s| s.parse::<ComplaintStatus>().map_err(ServiceError::Validation))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::hash_password;
    use crate::database::models::NewUser;
    use crate::database::repository::MockComplaintStore;
    use crate::database::InMemoryStore;

    async fn service_with_user() -> (ComplaintService, i64) {
        let store = InMemoryStore::new();
        let user = UserStore::insert(
            &store,
            NewUser {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password_hash: hash_password("pw").unwrap(),
            },
        )
        .await
        .unwrap();

        let service = ComplaintService::new(Arc::new(store.clone()), Arc::new(store));
        (service, user.id)
    }

    fn input(title: &str, status: Option<&str>, user_id: Option<i64>) -> ComplaintInput {
        ComplaintInput {
            title: title.to_string(),
            description: Some("Parcel arrived two weeks late".to_string()),
            status: status.map(str::to_string),
            user_id,
        }
    }

    #[tokio::test]
    async fn create_defaults_status_to_open() {
        let (service, user_id) = service_with_user().await;

        let created = service.create(input("Late delivery", None, Some(user_id))).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.status, Some(ComplaintStatus::Open));
        assert!(created.created_at.is_some());
        assert_eq!(created.user_id, Some(user_id));

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_keeps_supplied_status() {
        let (service, user_id) = service_with_user().await;
        let created = service
            .create(input("Broken item", Some("IN_PROGRESS"), Some(user_id)))
            .await
            .unwrap();
        assert_eq!(created.status, Some(ComplaintStatus::InProgress));
    }

    #[tokio::test]
    async fn create_rejects_unknown_owner_and_persists_nothing() {
        let (service, _) = service_with_user().await;

        let err = service.create(input("Late delivery", None, Some(999))).await.unwrap_err();
        assert!(matches!(err, ServiceError::UserNotFound(999)));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_validates_before_touching_the_store() {
        let (service, user_id) = service_with_user().await;

        assert!(matches!(
            service.create(input("   ", None, Some(user_id))).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.create(input("Late", Some("ESCALATED"), Some(user_id))).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.create(input("Late", None, None)).await,
            Err(ServiceError::MissingField("userId"))
        ));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_owner_never_reaches_insert() {
        let mut complaints = MockComplaintStore::new();
        complaints.expect_insert().never();

        let service = ComplaintService::new(Arc::new(complaints), Arc::new(InMemoryStore::new()));
        let err = service.create(input("Late", None, Some(1))).await.unwrap_err();
        assert!(matches!(err, ServiceError::UserNotFound(1)));
    }

    #[tokio::test]
    async fn update_preserves_status_when_absent_and_overwrites_when_present() {
        let (service, user_id) = service_with_user().await;
        let created = service
            .create(input("Late delivery", Some("IN_PROGRESS"), Some(user_id)))
            .await
            .unwrap();

        let mut change = input("Late delivery (again)", None, None);
        change.description = None;
        let updated = service.update(created.id, change).await.unwrap();
        assert_eq!(updated.title, "Late delivery (again)");
        assert_eq!(updated.description, None);
        assert_eq!(updated.status, Some(ComplaintStatus::InProgress));
        assert_eq!(updated.created_at, created.created_at);

        let resolved = service
            .update(created.id, input("Late delivery", Some("resolved"), None))
            .await
            .unwrap();
        assert_eq!(resolved.status, Some(ComplaintStatus::Resolved));
    }

    #[tokio::test]
    async fn update_never_changes_owner() {
        let (service, user_id) = service_with_user().await;
        let created = service.create(input("Late", None, Some(user_id))).await.unwrap();

        let updated = service
            .update(created.id, input("Late", None, Some(user_id + 100)))
            .await
            .unwrap();
        assert_eq!(updated.user_id, Some(user_id));
    }

    #[tokio::test]
    async fn update_missing_complaint_leaves_store_unchanged() {
        let (service, user_id) = service_with_user().await;
        let created = service.create(input("Late", None, Some(user_id))).await.unwrap();

        let err = service.update(created.id + 1, input("Other", None, None)).await.unwrap_err();
        assert!(matches!(err, ServiceError::ComplaintNotFound(_)));
        assert_eq!(service.list().await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn update_rejects_unknown_status_without_writing() {
        let (service, user_id) = service_with_user().await;
        let created = service.create(input("Late", None, Some(user_id))).await.unwrap();

        let err = service
            .update(created.id, input("Changed", Some("ESCALATED"), None))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(service.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn delete_removes_and_then_fails() {
        let (service, user_id) = service_with_user().await;
        let created = service.create(input("Late", None, Some(user_id))).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get(created.id).await,
            Err(ServiceError::ComplaintNotFound(_))
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(ServiceError::ComplaintNotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_missing_never_calls_store_delete() {
        let mut complaints = MockComplaintStore::new();
        complaints.expect_exists().returning(|_| Ok(false));
        complaints.expect_delete().never();

        let service = ComplaintService::new(Arc::new(complaints), Arc::new(InMemoryStore::new()));
        assert!(matches!(
            service.delete(5).await,
            Err(ServiceError::ComplaintNotFound(5))
        ));
    }
}
