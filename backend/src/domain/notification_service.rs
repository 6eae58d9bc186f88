//! Notification inbox domain service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    AuthorView, NotificationRepository, NotificationRepositoryError, NotificationView,
    Notifications, UnreadNotifications,
};
use crate::domain::relative_age::format_relative_age;
use crate::domain::{Error, UserId};

/// Page size for the unread listing.
pub const UNREAD_PAGE_LIMIT: i64 = 15;

/// Notification service implementing the driving port.
#[derive(Clone)]
pub struct NotificationService<N> {
    notifications: Arc<N>,
}

impl<N> NotificationService<N> {
    /// Create a new service over a notification repository.
    pub fn new(notifications: Arc<N>) -> Self {
        Self { notifications }
    }
}

fn map_repository_error(error: NotificationRepositoryError) -> Error {
    match error {
        NotificationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("notification repository unavailable: {message}"))
        }
        NotificationRepositoryError::Query { message } => {
            Error::internal(format!("notification repository error: {message}"))
        }
    }
}

#[async_trait]
impl<N> Notifications for NotificationService<N>
where
    N: NotificationRepository,
{
    async fn list_unread(&self, user: UserId) -> Result<UnreadNotifications, Error> {
        let snapshot = self
            .notifications
            .list_unread(user, UNREAD_PAGE_LIMIT)
            .await
            .map_err(map_repository_error)?;
        let now = Utc::now();
        let notifications = snapshot
            .notifications
            .into_iter()
            .map(|record| {
                let relative_age = format_relative_age(now, record.created_at);
                NotificationView {
                    id: record.id,
                    kind: record.kind,
                    actor: AuthorView::from(record.actor),
                    post_id: record.post_id,
                    created_at: record.created_at,
                    relative_age,
                }
            })
            .collect();
        Ok(UnreadNotifications {
            unread_count: snapshot.unread_count,
            notifications,
        })
    }

    async fn mark_read(&self, user: UserId, ids: Vec<i64>) -> Result<u64, Error> {
        self.notifications
            .delete_unread(user, &ids)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    //! Mark-read scoping and listing annotation.
    use super::*;
    use crate::domain::NotificationKind;
    use crate::domain::ports::{AuthorRecord, MockNotificationRepository, NotificationRecord,
        UnreadSnapshot};
    use chrono::Duration;
    use mockall::predicate::{always, eq};
    use uuid::Uuid;

    fn recipient() -> UserId {
        UserId::from_uuid(Uuid::from_u128(30))
    }

    #[tokio::test]
    async fn mark_read_with_no_ids_targets_all_unread() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_delete_unread()
            .with(eq(recipient()), eq(&[] as &[i64]))
            .returning(|_, _| Ok(3));

        let service = NotificationService::new(Arc::new(repo));
        let deleted = service.mark_read(recipient(), Vec::new()).await.unwrap();
        assert_eq!(deleted, 3);
    }

    #[tokio::test]
    async fn mark_read_with_ids_passes_them_through() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_delete_unread()
            .with(eq(recipient()), eq(vec![4_i64, 7]))
            .returning(|_, _| Ok(1));

        let service = NotificationService::new(Arc::new(repo));
        let deleted = service.mark_read(recipient(), vec![4, 7]).await.unwrap();
        assert_eq!(deleted, 1);
    }

    #[tokio::test]
    async fn mark_read_with_no_matches_is_zero_not_an_error() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_delete_unread()
            .with(eq(recipient()), always())
            .returning(|_, _| Ok(0));

        let service = NotificationService::new(Arc::new(repo));
        let deleted = service.mark_read(recipient(), vec![999]).await.unwrap();
        assert_eq!(deleted, 0);
    }

    #[tokio::test]
    async fn listing_annotates_relative_age() {
        let mut repo = MockNotificationRepository::new();
        repo.expect_list_unread().returning(|_, limit| {
            assert_eq!(limit, UNREAD_PAGE_LIMIT);
            Ok(UnreadSnapshot {
                unread_count: 1,
                notifications: vec![NotificationRecord {
                    id: 1,
                    kind: NotificationKind::Like,
                    actor: AuthorRecord {
                        id: Uuid::from_u128(31),
                        display_name: "Grace".into(),
                        nickname: None,
                        picture_url: None,
                    },
                    post_id: Some(Uuid::from_u128(32)),
                    created_at: Utc::now() - Duration::seconds(90),
                }],
            })
        });

        let service = NotificationService::new(Arc::new(repo));
        let unread = service.list_unread(recipient()).await.unwrap();
        assert_eq!(unread.unread_count, 1);
        assert_eq!(unread.notifications[0].relative_age, "1 min ago");
        assert_eq!(unread.notifications[0].kind, NotificationKind::Like);
    }
}
