// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the records returned by the contract facades and the
//! request bodies accepted by the REST API. All types derive `Serialize` or
//! `Deserialize` and `ToSchema` for JSON handling and OpenAPI documentation.
//!
//! Addresses and object ids travel as `0x`-prefixed hex strings; handlers parse
//! them into typed addresses before calling a facade.
//!
//! ## Model Categories
//!
//! - **Courses**: Course records, catalogue entries, enrolment and reviews
//! - **Games**: Game contracts registered in the database
//! - **Users**: Learner records, XP and badges
//! - **NFTs**: Certificates and rewards, and their sale listing

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// Course Models
// =============================================================================

/// On-chain course record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CourseDetails {
    /// Object id of the course.
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Address of the course creator.
    pub creator: String,
    /// XP awarded on completion.
    pub xp: u64,
    /// Difficulty level.
    pub difficulty: u8,
    /// Image URL.
    pub image: String,
}

/// Id of an object whose details could not be read back yet.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct CreatedObject {
    pub id: String,
}

/// Course details, or only its id when the read-back failed.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum CourseResponse {
    Details(CourseDetails),
    Created(CreatedObject),
}

/// Request to publish a new course object.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCourseRequest {
    pub name: String,
    pub description: String,
    pub category: String,
    /// Address credited as the course creator.
    pub creator_address: String,
    pub xp: u64,
    pub difficulty: u8,
    pub image: String,
}

/// Name and description of a course in the database catalogue.
///
/// Used both to add a course to the catalogue and to update it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogueCourseRequest {
    /// Object id of the course.
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Enrols a user in, or completes a course for, a user.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CourseProgressRequest {
    pub user_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddReviewRequest {
    pub reviewer_address: String,
    /// Rating from 1 to 5.
    pub rating: u8,
    pub comment: String,
}

// =============================================================================
// Game Models
// =============================================================================

/// Request to register a game contract.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddGameRequest {
    /// Address of the game contract.
    pub address: String,
    pub name: String,
    pub description: String,
}

// =============================================================================
// User Models
// =============================================================================

/// On-chain user record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct UserDetails {
    pub address: String,
    pub name: String,
    pub xp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddUserRequest {
    pub address: String,
    pub name: String,
}

/// Sets a user's XP to an absolute value.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateXpRequest {
    pub xp: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AwardBadgeRequest {
    pub badge: String,
}

// =============================================================================
// NFT Models
// =============================================================================

/// On-chain NFT record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NftDetails {
    /// Object id of the NFT.
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    /// Sale price in MIST.
    pub price: u64,
    pub is_for_sale: bool,
    pub owner: String,
}

/// NFT details, or only its id when the read-back failed.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum NftResponse {
    Details(NftDetails),
    Created(CreatedObject),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNftRequest {
    pub name: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListForSaleRequest {
    /// Object id of the NFT.
    pub id: String,
    /// Sale price in MIST.
    pub price: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RemoveFromSaleRequest {
    /// Object id of the NFT.
    pub id: String,
}
