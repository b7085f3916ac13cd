use crate::api::dto::{ComplaintDto, UserDto};
use crate::database::models::{Complaint, User};
use crate::types::ComplaintStatus;

/// Convert a stored complaint into its wire format
///
/// A stored status that no longer parses maps to `null` instead of failing
/// the whole read.
pub fn complaint_to_dto(complaint: Complaint) -> ComplaintDto {
    let status = complaint.status.as_deref().and_then(|raw| {
        raw.parse::<ComplaintStatus>()
            .map_err(|e| {
                tracing::warn!("Complaint {} has unreadable status: {}", complaint.id, e);
            })
            .ok()
    });

    ComplaintDto {
        id: complaint.id,
        title: complaint.title,
        description: complaint.description,
        status,
        created_at: complaint.created_at,
        user_id: Some(complaint.user_id),
    }
}

pub fn user_to_dto(user: User) -> UserDto {
    UserDto {
        id: user.id,
        username: user.username,
        email: user.email,
    }
}
