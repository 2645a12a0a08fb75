// src/services/community.rs

use reqwest::Method;

use crate::{
    api::{ApiClient, Upload},
    error::AppError,
    models::{
        Envelope, SearchParams,
        community::{
            AssignableRole, BannerUploadResponse, CommunityCard, CommunityDetailResponse,
            CommunityListResponse, CreateCommunityRequest, CreateCommunityResponse, Member,
            MembershipResponse, UpdateMemberRoleRequest,
        },
    },
};

pub async fn list_communities(
    api: &ApiClient,
    params: &SearchParams,
) -> Result<Vec<CommunityCard>, AppError> {
    let res: CommunityListResponse = api.get_with_query("communities", params).await?;
    Ok(res.communities.unwrap_or_default())
}

/// Community with its members, quizzes and the caller's role.
pub async fn get_community(api: &ApiClient, id: &str) -> Result<CommunityDetailResponse, AppError> {
    api.get(&format!("communities/{id}")).await
}

/// Returns the id of the new community.
pub async fn create_community(api: &ApiClient, req: &CreateCommunityRequest) -> Result<String, AppError> {
    let res: CreateCommunityResponse = api.post("communities", req).await?;
    Ok(res.community_id)
}

pub async fn update_community(
    api: &ApiClient,
    id: &str,
    req: &CreateCommunityRequest,
) -> Result<(), AppError> {
    let _: serde_json::Value = api.put(&format!("communities/{id}"), req).await?;
    Ok(())
}

pub async fn delete_community(api: &ApiClient, id: &str) -> Result<(), AppError> {
    let _: serde_json::Value = api.delete(&format!("communities/{id}")).await?;
    Ok(())
}

/// The status is `"joined"` on success.
pub async fn join_community(api: &ApiClient, id: &str) -> Result<MembershipResponse, AppError> {
    api.post_empty(&format!("communities/{id}/join")).await
}

/// The status is `"left"` on success.
pub async fn leave_community(api: &ApiClient, id: &str) -> Result<MembershipResponse, AppError> {
    api.post_empty(&format!("communities/{id}/leave")).await
}

pub async fn get_community_members(api: &ApiClient, id: &str) -> Result<Vec<Member>, AppError> {
    let res: Envelope<Vec<Member>> = api.get(&format!("communities/{id}/members")).await?;
    res.into_data()
}

pub async fn update_member_role(
    api: &ApiClient,
    community_id: &str,
    user_id: &str,
    role: AssignableRole,
) -> Result<(), AppError> {
    let _: serde_json::Value = api
        .post(
            &format!("communities/{community_id}/members/{user_id}/role"),
            &UpdateMemberRoleRequest { role },
        )
        .await?;
    Ok(())
}

pub async fn remove_member(api: &ApiClient, community_id: &str, user_id: &str) -> Result<(), AppError> {
    let _: serde_json::Value = api
        .delete(&format!("communities/{community_id}/members/{user_id}"))
        .await?;
    Ok(())
}

pub async fn get_recommended_communities(api: &ApiClient) -> Result<Vec<CommunityCard>, AppError> {
    let res: Envelope<Vec<CommunityCard>> = api.get("communities/recommended").await?;
    res.into_data()
}

pub async fn get_user_communities(api: &ApiClient, user_id: &str) -> Result<Vec<CommunityCard>, AppError> {
    let res: Envelope<Vec<CommunityCard>> = api.get(&format!("users/{user_id}/communities")).await?;
    res.into_data()
}

/// Uploads a banner image and returns its server path.
pub async fn upload_community_banner(api: &ApiClient, upload: Upload) -> Result<String, AppError> {
    upload.ensure_image()?;
    let res: BannerUploadResponse = api
        .upload(Method::POST, "communities/upload-banner", upload)
        .await?;
    Ok(res.url)
}
